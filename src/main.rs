//! Standalone host for the autolink configuration core.
//!
//! # Architecture Overview
//!
//! ```text
//!   plugin.json ──notify──▶ ConfigWatcher ──ConfigChanged──▶ AutolinkPlugin
//!        ▲                                                     │
//!        │                                  load / compile / resolve admins
//!        │                                                     ▼
//!   FileHost::save_plugin_config ◀── save_links ◀── ConfigStore (ArcSwap)
//!                                                              │
//!                                      background task: (un)register /autolink
//! ```

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use clap::{Parser, Subcommand};

use autolink_config::commands::build_command;
use autolink_config::config::{ConfigStore, ConfigWatcher};
use autolink_config::host::settings::load_settings;
use autolink_config::host::{FileHost, HostSettings};
use autolink_config::observability::logging::init_logging;
use autolink_config::AutolinkPlugin;

#[derive(Parser)]
#[command(name = "autolink-config")]
#[command(about = "Standalone host for the autolink plugin configuration", long_about = None)]
struct Cli {
    /// Host settings file (TOML); defaults are used when omitted
    #[arg(short, long)]
    settings: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Load the plugin configuration and reload it on every change (default)
    Run,
    /// Print the /autolink command catalog as JSON
    Catalog,
    /// Print the configured links as JSON
    Links {
        /// Order by display name instead of configured order
        #[arg(long)]
        sorted: bool,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let settings = match &cli.settings {
        Some(path) => load_settings(path)?,
        None => HostSettings::default(),
    };
    init_logging(&settings.observability.log_level);

    match cli.command.unwrap_or(Commands::Run) {
        Commands::Run => run(settings).await?,
        Commands::Catalog => {
            println!("{}", serde_json::to_string_pretty(&build_command())?);
        }
        Commands::Links { sorted } => {
            let plugin = build_plugin(&settings);
            let change = plugin.on_configuration_change().await?;
            change.registration.await?;

            let config = if sorted {
                change.snapshot.sorted()
            } else {
                change.snapshot.as_ref().clone()
            };
            println!("{}", serde_json::to_string_pretty(&config.links)?);
        }
    }

    Ok(())
}

fn build_plugin(settings: &HostSettings) -> AutolinkPlugin {
    let host = Arc::new(FileHost::new(
        settings.plugin_config_path.clone(),
        settings.users.clone(),
    ));
    AutolinkPlugin::new(host, Arc::new(ConfigStore::default()))
}

async fn run(settings: HostSettings) -> Result<(), Box<dyn std::error::Error>> {
    tracing::info!(
        path = ?settings.plugin_config_path,
        known_users = settings.users.len(),
        "autolink-config v{} starting",
        env!("CARGO_PKG_VERSION")
    );

    let plugin = build_plugin(&settings);

    // A broken stored configuration at startup is fatal; later reload
    // failures keep the previous configuration.
    plugin.on_configuration_change().await?;

    let (watcher, mut changes) = ConfigWatcher::new(
        &settings.plugin_config_path,
        Duration::from_secs(settings.poll_interval_secs),
    );
    let _watcher = watcher.run()?;

    loop {
        tokio::select! {
            Some(_) = changes.recv() => {
                if let Err(e) = plugin.on_configuration_change().await {
                    tracing::error!(error = %e, "Configuration reload failed");
                }
            }
            _ = tokio::signal::ctrl_c() => {
                tracing::info!("Shutdown signal received");
                break;
            }
        }
    }

    tracing::info!("Shutdown complete");
    Ok(())
}
