//! # `cosmic`
//!
//! Runs space queries against the [`space_query`] engine from a terminal.
//!
//! ```bash
//! cosmic search Latest SpaceX Starship updates --pretty
//! cosmic --config ~/.config/cosmic-explorer/config.toml search mars rover
//! cosmic examples
//! cosmic default-config > config.toml
//! ```
//!
//! Results are printed to stdout as JSON; logs go to stderr. Log verbosity
//! comes from `RUST_LOG`, else from `logging.filter` in the config file.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use cosmic_explorer::output::{render_examples, render_result};
use cosmic_explorer::{AppConfig, AppError, EXAMPLE_QUERIES};
use space_query::QueryEngine;

/// Space news and reference search from the command line.
#[derive(Parser)]
#[command(name = "cosmic", version, about)]
struct Cli {
    /// Path to a TOML configuration file. Defaults apply when omitted.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run one query and print the aggregated result as JSON.
    Search {
        /// Query words; joined with spaces.
        #[arg(required = true, num_args = 1..)]
        query: Vec<String>,

        /// Indent the JSON output.
        #[arg(long)]
        pretty: bool,
    },

    /// Print example queries.
    Examples {
        /// Indent the JSON output.
        #[arg(long)]
        pretty: bool,
    },

    /// Print the default configuration as TOML.
    DefaultConfig,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match AppConfig::load(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("error: {e}");
            return exit_code(&e);
        }
    };

    init_tracing(&config.logging.filter);

    match run(cli.command, config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::debug!(error = ?e, "command failed");
            eprintln!("error: {e:#}");
            e.downcast_ref::<AppError>()
                .map_or(ExitCode::FAILURE, exit_code)
        }
    }
}

async fn run(command: Commands, config: AppConfig) -> anyhow::Result<()> {
    match command {
        Commands::Search { query, pretty } => {
            let engine = QueryEngine::new(config.search).map_err(AppError::from)?;
            let result = engine
                .handle_query(&query.join(" "))
                .await
                .map_err(AppError::from)?;
            println!("{}", render_result(&result, pretty)?);
        }
        Commands::Examples { pretty } => {
            println!("{}", render_examples(EXAMPLE_QUERIES, pretty)?);
        }
        Commands::DefaultConfig => {
            print!("{}", AppConfig::default().to_toml()?);
        }
    }
    Ok(())
}

/// Logs to stderr only; stdout carries the JSON output.
fn init_tracing(config_filter: &str) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(config_filter));
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .init();
}

fn exit_code(err: &AppError) -> ExitCode {
    ExitCode::from(u8::try_from(err.exit_code()).unwrap_or(1))
}
