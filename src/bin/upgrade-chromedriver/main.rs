//! upgrade-chromedriver CLI entry point.

mod cli;

use clap::{CommandFactory, Parser};
use cli::Cli;
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};
use upgrade_chromedriver::{orchestrator, ConsoleReporter, Error, Toolbox};

fn main() -> color_eyre::Result<()> {
    // Initialize error handling
    color_eyre::install()?;

    // Parse CLI arguments
    let cli = Cli::parse();

    if cli.help {
        // Help exits 1; scripted callers rely on it.
        Cli::command().print_long_help()?;
        std::process::exit(1);
    }

    // Initialize tracing; diagnostics go to stderr so stdout stays
    // machine-readable.
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&cli.log_level));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    info!("upgrade-chromedriver v{}", env!("CARGO_PKG_VERSION"));

    let request = match cli.into_request() {
        Ok(request) => request,
        Err(e) => exit_with(&e),
    };

    let tools = Toolbox::production(&request.settings);
    match orchestrator::run(&request, &tools, &ConsoleReporter) {
        Ok(_) => Ok(()),
        Err(e) => exit_with(&e),
    }
}

/// Print the failure line and exit with its code.
///
/// Failure lines go to stdout with the rest of the run's output.
fn exit_with(error: &Error) -> ! {
    println!("{error}");
    std::process::exit(error.exit_code());
}
