//! Bidtrack CLI - serve the bid tracking API and inspect its datastore

use clap::{Parser, Subcommand, ValueEnum};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use bidtrack::config::{self, BidtrackConfig};
use bidtrack::server::{self, ServerOptions};
use bidtrack::ui::{self, Icons};
use bidtrack::{JsonFileStore, Repository};

#[derive(Parser)]
#[command(name = "bidtrack")]
#[command(version)]
#[command(about = "Construction bid tracking API - projects, bid categories and vendor quotes")]
#[command(long_about = r#"
Bidtrack serves the dashboard API for construction bid tracking:
  • Projects with completion metrics
  • Bid categories and the vendor quotes received for each
  • Vendor directory and project groups

Example usage:
  bidtrack init
  bidtrack serve --port 8000
  bidtrack stats --format json
"#)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to the config file (defaults to ./bidtrack.toml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Text,
    Json,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the HTTP API
    Serve {
        /// Path to the JSON data file
        #[arg(short, long)]
        data: Option<PathBuf>,

        /// Address to bind
        #[arg(long)]
        host: Option<String>,

        /// Port to listen on
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Write a default bidtrack.toml
    Init {
        /// Overwrite an existing config
        #[arg(short, long)]
        force: bool,
    },

    /// Show every project with its metrics
    Stats {
        /// Path to the JSON data file
        #[arg(short, long)]
        data: Option<PathBuf>,

        /// Output format
        #[arg(short, long, value_enum, default_value = "text")]
        format: Format,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    let settings = config::load_config(cli.config.as_deref())?.unwrap_or_default();

    match cli.command {
        Commands::Serve { data, host, port } => {
            let data_file = settings.data_file(data);
            let repository = open_repository(&data_file)?;

            ui::header("Bidtrack API");
            ui::info("Data file", &data_file.display().to_string());

            let options = ServerOptions {
                host: settings.host(host),
                port: settings.port(port),
                allowed_origins: settings.allowed_origins(),
            };
            server::start_server(options, repository).await?;
        }

        Commands::Init { force } => {
            let path = cli.config.unwrap_or_else(config::default_config_path);
            config::write_config(&path, &BidtrackConfig::with_defaults(), force)?;
            ui::success(&format!("Wrote {}", path.display()));
        }

        Commands::Stats { data, format } => {
            let data_file = settings.data_file(data);
            let repository = open_repository(&data_file)?;
            let projects = repository.projects_with_metrics()?;

            match format {
                Format::Json => println!("{}", serde_json::to_string_pretty(&projects)?),
                Format::Text => {
                    ui::section(&format!("{} Projects ({})", Icons::STATS, data_file.display()));
                    if projects.is_empty() {
                        ui::warn("No projects found.");
                    } else {
                        println!("{}", ui::project_table(&projects));
                    }
                }
            }
        }
    }

    Ok(())
}

fn open_repository(data_file: &Path) -> anyhow::Result<Repository> {
    config::ensure_data_dir(data_file)?;
    let store = JsonFileStore::open(data_file)?;
    Ok(Repository::new(Arc::new(store)))
}
