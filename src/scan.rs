//! Line-by-line scanning of target files.
//!
//! Files are processed strictly one at a time, one line at a time; the
//! matcher itself performs no I/O. Lines are read as raw bytes and
//! converted lossily so stray binary data in a log cannot abort a scan.

use crate::matcher;
use crate::types::NetworkSet;
use serde::Serialize;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;
use tracing::debug;

/// One matching line of a scanned file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LineMatch {
    /// The file the line came from.
    pub file: String,
    /// 1-based line number.
    pub line_number: usize,
    /// The whitespace-split tokens of the line.
    pub tokens: Vec<String>,
    /// 0-based positions of the tokens inside a target network.
    pub matched: Vec<usize>,
}

impl LineMatch {
    /// The line re-joined from its tokens.
    pub fn line(&self) -> String {
        self.tokens.join(" ")
    }
}

/// Totals for one scanned input.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScanStats {
    /// Lines read.
    pub lines: usize,
    /// Lines with at least one matching token.
    pub matches: usize,
}

/// Scan one file, invoking `on_match` for every matching line.
///
/// Returns an error only when the file cannot be opened or read; the
/// caller decides whether that skips the file or aborts the run.
pub fn scan_file(
    path: &Path,
    networks: &NetworkSet,
    on_match: impl FnMut(LineMatch),
) -> io::Result<ScanStats> {
    let file = File::open(path)?;
    let name = path.display().to_string();
    let stats = scan_reader(BufReader::new(file), &name, networks, on_match)?;
    debug!(
        file = %name,
        lines = stats.lines,
        matches = stats.matches,
        "scanned file"
    );
    Ok(stats)
}

/// Scan a buffered reader under the given display name.
pub fn scan_reader<R: BufRead>(
    mut reader: R,
    name: &str,
    networks: &NetworkSet,
    mut on_match: impl FnMut(LineMatch),
) -> io::Result<ScanStats> {
    let mut stats = ScanStats::default();
    let mut buf = Vec::new();

    loop {
        buf.clear();
        if reader.read_until(b'\n', &mut buf)? == 0 {
            break;
        }
        stats.lines += 1;

        let line = String::from_utf8_lossy(&buf);
        let tokens: Vec<&str> = line.split_whitespace().collect();
        let matched = matcher::search_line(&tokens, networks);
        if matched.is_empty() {
            continue;
        }

        stats.matches += 1;
        on_match(LineMatch {
            file: name.to_string(),
            line_number: stats.lines,
            tokens: tokens.iter().map(|t| t.to_string()).collect(),
            matched,
        });
    }

    Ok(stats)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Cursor, Write};

    fn targets(specs: &[&str]) -> NetworkSet {
        let (set, rejected) = NetworkSet::build(specs);
        assert!(rejected.is_empty(), "bad test fixture: {:?}", rejected);
        set
    }

    fn collect_matches(content: &str, specs: &[&str]) -> (Vec<LineMatch>, ScanStats) {
        let set = targets(specs);
        let mut matches = Vec::new();
        let stats = scan_reader(Cursor::new(content), "test.log", &set, |m| matches.push(m))
            .expect("in-memory scan cannot fail");
        (matches, stats)
    }

    #[test]
    fn test_matching_lines_reported_with_line_numbers() {
        let content = "nothing here\nsaw 10.0.0.7 today\nalso nothing\n";
        let (matches, stats) = collect_matches(content, &["10.0.0.0/24"]);
        assert_eq!(stats, ScanStats { lines: 3, matches: 1 });
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].line_number, 2);
        assert_eq!(matches[0].matched, vec![1]);
        assert_eq!(matches[0].line(), "saw 10.0.0.7 today");
    }

    #[test]
    fn test_missing_trailing_newline() {
        let (matches, stats) = collect_matches("10.0.0.1", &["10.0.0.0/24"]);
        assert_eq!(stats, ScanStats { lines: 1, matches: 1 });
        assert_eq!(matches[0].tokens, vec!["10.0.0.1"]);
    }

    #[test]
    fn test_empty_input() {
        let (matches, stats) = collect_matches("", &["10.0.0.0/24"]);
        assert!(matches.is_empty());
        assert_eq!(stats, ScanStats::default());
    }

    #[test]
    fn test_invalid_utf8_does_not_abort() {
        let set = targets(&["10.0.0.0/24"]);
        let content = b"\xff\xfe garbage\n10.0.0.9 ok\n";
        let mut matches = Vec::new();
        let stats = scan_reader(Cursor::new(&content[..]), "bin.log", &set, |m| {
            matches.push(m)
        })
        .expect("lossy read cannot fail");
        assert_eq!(stats.lines, 2);
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].line_number, 2);
    }

    #[test]
    fn test_scan_file_reads_from_disk() {
        let set = targets(&["192.168.1.0/24"]);
        let mut file = tempfile::NamedTempFile::new().expect("create temp file");
        writeln!(file, "iface eth0 192.168.1.1 255.255.255.0").expect("write temp file");
        writeln!(file, "iface eth1 10.0.0.1 255.255.255.0").expect("write temp file");

        let mut matches = Vec::new();
        let stats = scan_file(file.path(), &set, |m| matches.push(m)).expect("scan temp file");
        assert_eq!(stats, ScanStats { lines: 2, matches: 1 });
        assert_eq!(matches[0].matched, vec![2, 3]);
    }

    #[test]
    fn test_scan_file_missing_path_errors() {
        let set = targets(&["10.0.0.0/24"]);
        let missing = Path::new("definitely/not/here.log");
        assert!(scan_file(missing, &set, |_| {}).is_err());
    }
}
