//! promptfold binary entry point

use std::io::{self, Write};

use color_eyre::Result;
use promptfold::cli::{run, Cli};

fn main() -> Result<()> {
    // Install error handler
    color_eyre::install()?;

    // Parse CLI arguments
    let cli = Cli::parse_args();

    // Set up logging
    if cli.verbose {
        tracing_subscriber::fmt()
            .with_env_filter("promptfold=debug")
            .with_writer(io::stderr)
            .init();
    }

    let registry = cli.load_registry()?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    run(&cli.command, &registry, &mut out)?;
    out.flush()?;

    Ok(())
}
