//! # netgrep - Search Files for Network References
//!
//! netgrep scans text files line by line and reports lines containing a
//! token that is an IP address or CIDR block inside a caller-supplied
//! set of target networks. It is built for auditing logs and
//! configuration dumps for references to specific ranges.
//!
//! ## Features
//!
//! - **Both address families**: IPv4 and IPv6, never mixed
//! - **Flexible notation**: bare addresses, CIDR, and address/netmask
//! - **Canonical target sets**: duplicates, overlaps, and adjacent
//!   sibling blocks collapse into a minimal set before matching
//! - **Field-pair recognition**: `10.0.0.1 255.255.255.0` written as two
//!   tokens is matched as the network it denotes
//! - **Multiple output formats**: grep-style plain text (optionally
//!   colorized), JSON, and CSV
//!
//! ## Example Usage
//!
//! ```rust
//! use netgrep::types::NetworkSet;
//!
//! let (networks, rejected) = NetworkSet::build(["10.0.0.0/24"]);
//! assert!(rejected.is_empty());
//!
//! let tokens = ["checking", "10.0.0.5", "now"];
//! assert_eq!(netgrep::matcher::search_line(&tokens, &networks), vec![1]);
//! ```
//!
//! ## Architecture
//!
//! - [`types`] - Token parsing and the canonical target-network sets
//! - [`matcher`] - Per-line matching against the target sets
//! - [`scan`] - Line-by-line file scanning
//! - [`cli`] - Command-line argument definitions and the run loop
//! - [`output`] - Plain, JSON, and CSV formatting
//! - [`error`] - Error types

pub mod cli;
pub mod error;
pub mod matcher;
pub mod output;
pub mod scan;
pub mod types;

// Re-export commonly used types
pub use error::{CliError, CliResult};
pub use scan::{LineMatch, ScanStats};
pub use types::{NetworkSet, Token};
