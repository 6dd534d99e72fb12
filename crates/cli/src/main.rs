mod cli;
mod commands;
mod metrics;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crewfinder_core::{load_config, load_config_from_env, validate_config, Config};

use cli::{Cli, Commands};
use commands::SelectArgs;

/// Config file picked up from the working directory when none is given.
const DEFAULT_CONFIG_FILE: &str = "crewfinder.toml";

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_logging(cli.log_json);

    if let Err(e) = run(cli).await {
        error!("Fatal error: {:#}", e);
        std::process::exit(1);
    }
}

fn init_logging(json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(filter);

    if json {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(std::io::stderr),
            )
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}

async fn run(cli: Cli) -> Result<()> {
    let config = resolve_config(cli.config.as_deref())?;
    validate_config(&config).context("Configuration validation failed")?;

    let output = match cli.command {
        Commands::Select {
            skills,
            team_size,
            concurrency,
            candidates_file,
            usernames,
        } => {
            commands::select(
                &config,
                SelectArgs {
                    skills,
                    team_size,
                    concurrency,
                    candidates_file,
                    usernames,
                },
            )
            .await?
        }
        Commands::Profile { username } => commands::profile(&config, &username).await?,
        Commands::Suggest {
            query,
            limit,
            users,
        } => commands::suggest(&config, query.as_deref(), limit, users).await?,
    };

    println!("{}", output);

    if cli.metrics {
        eprintln!("{}", metrics::encode_metrics()?);
    }

    Ok(())
}

/// Explicit path must exist; otherwise use ./crewfinder.toml if present,
/// else defaults plus environment overrides.
fn resolve_config(explicit: Option<&Path>) -> Result<Config> {
    let path = match explicit {
        Some(path) => Some(path.to_path_buf()),
        None => Some(PathBuf::from(DEFAULT_CONFIG_FILE)).filter(|p| p.exists()),
    };

    match path {
        Some(path) => {
            info!("Loading configuration from {:?}", path);
            load_config(&path).with_context(|| format!("Failed to load config from {:?}", path))
        }
        None => load_config_from_env().context("Failed to load config from environment"),
    }
}
