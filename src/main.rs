mod commands;
mod output;

use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use quizdup::{Config, Error};

/// quizdup - Detect duplicate and similar quiz questions
#[derive(Parser)]
#[command(version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: commands::Commands,

    /// Output JSON instead of human-readable text
    #[arg(long, global = true)]
    json: bool,

    /// Enable debug logging on stderr
    #[arg(short, long, global = true)]
    verbose: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(&cli) {
        Ok(code) => code,
        Err(e) => {
            if cli.json {
                output::print_json(&output::ErrorResponse {
                    error: e.to_string(),
                });
            } else {
                eprintln!("Error: {}", e);
            }
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<ExitCode, Error> {
    let config = Config::load()?;
    config.ensure_directories()?;
    commands::execute(&cli.command, &config, cli.json)
}

/// Logs go to stderr; `QUIZDUP_LOG` overrides the default filter.
fn init_tracing(verbose: bool) {
    let filter = EnvFilter::try_from_env("QUIZDUP_LOG").unwrap_or_else(|_| {
        EnvFilter::new(if verbose { "quizdup=debug" } else { "quizdup=warn" })
    });
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .init();
}
