//! CSV output formatting.

use crate::scan::LineMatch;
use std::io::{self, Write};

/// Print matches as CSV rows to stdout.
pub fn print_csv(matches: &[LineMatch]) -> io::Result<()> {
    let stdout = io::stdout();
    write_csv(matches, stdout.lock())
}

/// Write matches as CSV: file, line number, matched tokens, full line.
pub fn write_csv<W: Write>(matches: &[LineMatch], writer: W) -> io::Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record(["file", "line", "matched_tokens", "text"])?;

    for line_match in matches {
        let line_number = line_match.line_number.to_string();
        let matched: Vec<&str> = line_match
            .matched
            .iter()
            .map(|&i| line_match.tokens[i].as_str())
            .collect();
        let matched = matched.join(" ");
        let text = line_match.line();
        wtr.write_record([
            line_match.file.as_str(),
            line_number.as_str(),
            matched.as_str(),
            text.as_str(),
        ])?;
    }

    wtr.flush()?;
    Ok(())
}
