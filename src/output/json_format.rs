//! JSON output formatting.

use crate::scan::LineMatch;
use std::io;

/// Print all matches as a pretty-printed JSON array.
pub fn print_json(matches: &[LineMatch]) -> io::Result<()> {
    let json = serde_json::to_string_pretty(matches)
        .map_err(|e| io::Error::new(io::ErrorKind::Other, e))?;
    println!("{}", json);
    Ok(())
}
