//! repl-pilot: A terminal operations console for database replication clusters

use clap::Parser;
use color_eyre::Result;
use repl_pilot_tui::App;
use replman_rs::ConsoleConfig;
use std::fs::File;
use std::path::PathBuf;
use tracing::Level;
use tracing_subscriber::{prelude::*, EnvFilter};

/// repl-pilot: Terminal console for replication-manager backends
#[derive(Parser, Debug)]
#[command(name = "repl-pilot")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Backend API URL (overrides the config file)
    #[arg(short, long)]
    url: Option<String>,

    /// Cluster to select at startup
    #[arg(short, long)]
    cluster: Option<String>,

    /// Path to the config file (default: ~/.repl-pilot/config)
    #[arg(long)]
    config: Option<String>,

    /// Basic-auth user (overrides the config file)
    #[arg(long)]
    user: Option<String>,

    /// Basic-auth password (overrides the config file)
    #[arg(long)]
    password: Option<String>,

    /// Poll interval in milliseconds (overrides the config file)
    #[arg(long)]
    refresh_ms: Option<u64>,

    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,

    /// Log file path (default: /tmp/repl-pilot.log)
    #[arg(long, default_value = "/tmp/repl-pilot.log")]
    log_file: String,
}

fn load_config(cli: &Cli) -> Result<ConsoleConfig> {
    let mut config = match &cli.config {
        Some(path) => ConsoleConfig::load_from(&PathBuf::from(path))?,
        None => match ConsoleConfig::load_default() {
            Ok(config) => config,
            // No config file is fine as long as the URL comes from the CLI
            Err(_) if cli.url.is_some() => ConsoleConfig::from_url(""),
            Err(e) => return Err(e.into()),
        },
    };

    if let Some(url) = &cli.url {
        config.url = url.clone();
    }
    if let Some(user) = &cli.user {
        config.username = Some(user.clone());
    }
    if let Some(password) = &cli.password {
        config.password = Some(password.clone());
    }
    if let Some(refresh_ms) = cli.refresh_ms {
        config.refresh_ms = refresh_ms;
    }

    Ok(config)
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    color_eyre::install()?;

    // Log to a file, not stdout, which would corrupt the TUI
    let log_level = if cli.debug { Level::DEBUG } else { Level::INFO };
    let log_file = File::create(&cli.log_file)?;

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(log_file)
                .with_ansi(false)
                .with_target(false),
        )
        .with(EnvFilter::from_default_env().add_directive(log_level.into()))
        .init();

    tracing::info!("Starting repl-pilot");

    let config = load_config(&cli)?;
    let refresh_ms = config.refresh_ms;

    if let Some(cluster) = &cli.cluster {
        tracing::info!("Starting with cluster: {}", cluster);
    }

    let mut app = App::new(&config, cli.cluster, refresh_ms)?;
    app.run().await?;

    tracing::info!("Goodbye!");
    Ok(())
}
