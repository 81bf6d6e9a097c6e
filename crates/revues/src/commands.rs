use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use revues_core::Scenario;
use revues_core::client::ApiClient;
use revues_core::config::SuiteConfig;

use crate::ux;

/// Revues - ordered integration suite for the Food revues API.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Show verbose logs.
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the ordered scenario against the configured service.
    Run {
        /// Suite config file. Defaults to the embedded demo target.
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
    /// Print the scenario steps in execution order.
    Steps,
}

fn setup_logging() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter("revues=debug,revues_core=debug")
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to initialize tracing: {e}"))?;
    Ok(())
}

pub async fn run_app() -> Result<()> {
    let cli = Cli::parse();

    if cli.verbose {
        setup_logging().context("Failed to set up logging")?;
    }

    match &cli.command {
        Commands::Run { config } => run_suite(config.as_deref()).await,
        Commands::Steps => {
            for name in Scenario::standard().step_names() {
                println!("{name}");
            }
            Ok(())
        }
    }
}

async fn run_suite(config_path: Option<&Path>) -> Result<()> {
    let config = match config_path {
        Some(path) => SuiteConfig::load(path)
            .with_context(|| format!("Failed to load suite config from {}", path.display()))?,
        None => SuiteConfig::default(),
    };

    // A missing token is a setup failure: abort before any step runs.
    let client = ApiClient::authenticate(&config)
        .await
        .context("Authentication against the service failed")?;

    let report = Scenario::standard().run(&client).await;
    ux::present_report(&report);

    if report.all_passed() {
        Ok(())
    } else {
        anyhow::bail!(
            "{} of {} steps did not pass",
            report.failed(),
            report.steps.len()
        )
    }
}
