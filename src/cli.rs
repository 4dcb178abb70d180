//! Command-line interface for netgrep.
//!
//! Uses `clap` derive macros for declarative argument parsing.

use crate::error::CliResult;
use crate::output;
use crate::scan::{self, LineMatch};
use crate::types::NetworkSet;
use clap::{Parser, ValueEnum};
use std::fs;
use std::path::PathBuf;
use tracing::warn;

/// Search files for instances of a network or its subnets.
#[derive(Parser, Debug)]
#[command(name = "netgrep")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Search files for instances of a network or its subnets", long_about = None)]
pub struct Args {
    /// A network to find (CIDR, bare address, or address/netmask); may
    /// be specified multiple times
    #[arg(
        short = 'n',
        long = "network",
        value_name = "NETWORK",
        required_unless_present = "network_files"
    )]
    pub networks: Vec<String>,

    /// Read networks from a file, one specification per line; may be
    /// specified multiple times
    #[arg(short = 'N', long = "network-file", value_name = "PATH")]
    pub network_files: Vec<PathBuf>,

    /// Colorize the output
    #[arg(short = 'c', long)]
    pub colorize: bool,

    /// Output format for matches
    #[arg(short, long, value_enum, default_value = "plain")]
    pub output: OutputFormat,

    /// Verbose output (show the collapsed target networks)
    #[arg(short, long)]
    pub verbose: bool,

    /// Suppress warnings about skipped networks and files
    #[arg(short, long)]
    pub quiet: bool,

    /// The target files to be checked for matches
    #[arg(value_name = "FILE", required = true)]
    pub target_files: Vec<PathBuf>,
}

/// Output format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Grep-style plain text, streamed as matches are found
    Plain,
    /// JSON array of match records
    Json,
    /// CSV format for data analysis
    Csv,
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Plain => write!(f, "plain"),
            Self::Json => write!(f, "json"),
            Self::Csv => write!(f, "csv"),
        }
    }
}

impl Args {
    /// Run a search over every target file.
    ///
    /// Unparseable network specifications and unreadable files are
    /// reported and skipped; neither aborts the run nor changes the
    /// exit status.
    pub fn execute(&self) -> CliResult<()> {
        let specs = self.collect_network_specs();
        let (networks, rejected) = NetworkSet::build(specs);

        for spec in &rejected {
            warn!(spec = %spec, "discarded unparseable network specification");
            if !self.quiet {
                output::print_warning(&format!(
                    "'{}' does not appear to be an IPv4 or IPv6 network, ignoring.",
                    spec
                ));
            }
        }

        if self.verbose && self.output == OutputFormat::Plain {
            output::print_info(&format!(
                "matching against {} network(s): {}",
                networks.len(),
                networks
            ));
        }

        let mut collected: Vec<LineMatch> = Vec::new();
        for path in &self.target_files {
            let outcome = scan::scan_file(path, &networks, |line_match| {
                if self.output == OutputFormat::Plain {
                    output::print_match(&line_match, self.colorize);
                } else {
                    collected.push(line_match);
                }
            });
            if let Err(err) = outcome {
                warn!(file = %path.display(), error = %err, "skipped unreadable target file");
                if !self.quiet {
                    output::print_warning(&format!(
                        "Could not open file '{}', skipping.",
                        path.display()
                    ));
                }
            }
        }

        match self.output {
            OutputFormat::Plain => {}
            OutputFormat::Json => output::print_json(&collected)?,
            OutputFormat::Csv => output::print_csv(&collected)?,
        }

        Ok(())
    }

    /// Gather network specifications from the flags and list files.
    ///
    /// An unreadable list file is reported and skipped like any other
    /// recoverable input problem.
    fn collect_network_specs(&self) -> Vec<String> {
        let mut specs = self.networks.clone();
        for path in &self.network_files {
            match fs::read_to_string(path) {
                Ok(contents) => specs.extend(
                    contents
                        .lines()
                        .map(str::trim)
                        .filter(|line| !line.is_empty())
                        .map(String::from),
                ),
                Err(err) => {
                    warn!(file = %path.display(), error = %err, "skipped unreadable network list");
                    if !self.quiet {
                        output::print_warning(&format!(
                            "Could not open file '{}', skipping.",
                            path.display()
                        ));
                    }
                }
            }
        }
        specs
    }
}
