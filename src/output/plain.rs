//! Plain text output formatting.
//!
//! Renders matching lines grep-style and provides the colorized
//! variant used when `--colorize` is requested.

use crate::scan::LineMatch;
use console::style;

/// Render one matching line as `<file>:<line-number>:<line>`.
///
/// With `colorize`, the separators are cyan, the file name magenta, the
/// line number green, and every matched token red. Styling is still
/// subject to terminal detection, so redirected output stays clean.
pub fn format_match(line_match: &LineMatch, colorize: bool) -> String {
    if !colorize {
        return format!(
            "{}:{}:{}",
            line_match.file,
            line_match.line_number,
            line_match.line()
        );
    }

    let sep = style(":").cyan().to_string();
    let tokens: Vec<String> = line_match
        .tokens
        .iter()
        .enumerate()
        .map(|(i, token)| {
            if line_match.matched.contains(&i) {
                style(token).red().bold().to_string()
            } else {
                token.clone()
            }
        })
        .collect();

    format!(
        "{file}{sep}{line}{sep}{text}",
        file = style(&line_match.file).magenta(),
        sep = sep,
        line = style(line_match.line_number).green(),
        text = tokens.join(" ")
    )
}

/// Print one matching line to stdout.
pub fn print_match(line_match: &LineMatch, colorize: bool) {
    println!("{}", format_match(line_match, colorize));
}

/// Print an error message.
pub fn print_error(msg: &str) {
    eprintln!("{} {}", style("Error:").red().bold(), msg);
}

/// Print a warning message.
pub fn print_warning(msg: &str) {
    eprintln!("{} {}", style("Warning:").yellow().bold(), msg);
}

/// Print an info message.
pub fn print_info(msg: &str) {
    eprintln!("{} {}", style("ℹ").blue().bold(), msg);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> LineMatch {
        LineMatch {
            file: "router.log".to_string(),
            line_number: 17,
            tokens: vec![
                "neighbor".to_string(),
                "10.0.0.7".to_string(),
                "up".to_string(),
            ],
            matched: vec![1],
        }
    }

    #[test]
    fn test_plain_format() {
        assert_eq!(
            format_match(&sample(), false),
            "router.log:17:neighbor 10.0.0.7 up"
        );
    }

    #[test]
    fn test_colorized_format_keeps_all_tokens() {
        let rendered = format_match(&sample(), true);
        for token in ["neighbor", "10.0.0.7", "up", "router.log", "17"] {
            assert!(rendered.contains(token), "missing '{}' in output", token);
        }
    }
}
