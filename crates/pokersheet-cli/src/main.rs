use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use pokersheet_cli::commands::{sheet, summary};
use pokersheet_cli::{Cli, Commands, Config};

/// Load config and apply command-line overrides on top of it.
fn load_config(cli: &Cli) -> Result<Config> {
    let mut config =
        Config::load_from(cli.config.as_deref()).context("failed to load configuration")?;

    if let Some(input) = &cli.input {
        config.input_path.clone_from(input);
    }
    if let Some(output) = &cli.output {
        config.output_path.clone_from(output);
    }
    if let Some(policy) = cli.on_malformed {
        config.on_malformed = policy.into();
    }

    tracing::debug!(?config, "loaded configuration");
    Ok(config)
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing with verbose flag support
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::from_default_env()
    };
    // Use try_init to avoid panic if tracing is already initialized (e.g., in tests)
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();

    let config = load_config(&cli)?;
    let options = config.walk_options();

    match &cli.command {
        Some(Commands::Sheet) | None => {
            sheet::run(&config.input_path, &config.output_path, options)?;
        }
        Some(Commands::Summary { json }) => {
            summary::run(&config.input_path, options, *json)?;
        }
    }

    Ok(())
}
