//! depdiff - Dependency changelog generator CLI tool
//!
//! Writes a markdown changelog of the dependency changes made by the
//! latest commit of a git repository.

use clap::Parser;
use depdiff::cli::CliArgs;
use depdiff::logging;
use depdiff::orchestrator::Orchestrator;
use depdiff::output::{create_formatter, OutputConfig};
use std::io::{self, Write};
use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    let args = CliArgs::parse();

    // Run the main logic and handle errors
    match run(args).await {
        Ok(exit_code) => exit_code,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

/// Main application logic
async fn run(args: CliArgs) -> anyhow::Result<ExitCode> {
    let output_config = OutputConfig::from_cli(&args);
    logging::init(output_config.verbosity);

    let orchestrator = Orchestrator::new(args)?;
    let result = orchestrator.run().await?;

    let mut stdout = io::stdout().lock();

    if !output_config.dry_run {
        let path = orchestrator.write_changelog(&result)?;
        if output_config.announces_changelog() {
            writeln!(stdout, "Wrote {}", path.display())?;
        }
    }

    if output_config.prints_report() {
        create_formatter(&output_config).format(&result, &mut stdout)?;
    }
    stdout.flush()?;

    if result.errors.is_empty() {
        Ok(ExitCode::SUCCESS)
    } else {
        // Partial success - some manifests could not be analyzed
        Ok(ExitCode::from(2))
    }
}
