//! netgrep binary entry point.

use clap::Parser;
use netgrep::cli::Args;
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_tracing(args.verbose);
    args.execute()?;
    Ok(())
}

/// Route diagnostics to stderr. `NETGREP_LOG` overrides the default
/// level; `--verbose` raises it to debug.
fn init_tracing(verbose: bool) {
    let default = if verbose { "netgrep=debug" } else { "netgrep=warn" };
    let filter = EnvFilter::try_from_env("NETGREP_LOG").unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .without_time()
        .init();
}
