mod serve;

use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use color_eyre::eyre::{Report, Result};
use tracing_subscriber::EnvFilter;

use sysmap_core::{load_dataset, Config, MemoryLocation, Session, SparqlClient, ViewState};

#[derive(Parser)]
#[command(name = "sysmap")]
#[command(about = "System map of organizations, systems, services and datasets", long_about = None)]
struct Cli {
    /// Config file (defaults to ./sysmap.toml, then the user config dir)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Load the map and print what a view shows, as JSON
    Render {
        /// Address-bar query, e.g. "lang=en&focus=...&hidePercent=30"
        #[arg(default_value = "")]
        query: String,
    },
    /// Start the local viewer
    Serve {
        /// Port to listen on
        #[arg(short, long)]
        port: Option<u16>,
        /// Do not open the browser
        #[arg(long)]
        no_open: bool,
    },
    /// Print configuration as TOML
    Config {
        /// Print the effective configuration instead of the defaults
        #[arg(long)]
        effective: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("sysmap=info,sysmap_core=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = match &cli.config {
        Some(path) => Config::from_file(path)?,
        None => Config::load()?,
    };

    match cli.command {
        Commands::Render { query } => render(config, &query).await,
        Commands::Serve { port, no_open } => {
            let serve_config = serve::ServeConfig {
                port: port.unwrap_or(config.server.port),
                open_browser: config.server.open_browser && !no_open,
            };
            serve::start_server(Arc::new(config), serve_config).await
        }
        Commands::Config { effective } => {
            let text = if effective {
                toml::to_string_pretty(&config)?
            } else {
                Config::default_config_string()
            };
            println!("{text}");
            Ok(())
        }
    }
}

/// Load once and print the render update for `query`.
async fn render(config: Config, query: &str) -> Result<()> {
    let config = Arc::new(config);
    let view = ViewState::from_query(query, &config);
    let client = SparqlClient::from_config(&config.sparql);
    let location = MemoryLocation::new(query);

    let (mut session, error) = match load_dataset(&client, &config, &view).await {
        Ok(dataset) => (Session::new(config.clone(), Arc::new(dataset), location), None),
        Err(e) => (Session::failed(config.clone(), location), Some(e)),
    };

    let update = session.render();
    println!("{}", serde_json::to_string_pretty(&update)?);

    match error {
        Some(e) => Err(Report::new(e).wrap_err(update.title)),
        None => Ok(()),
    }
}
