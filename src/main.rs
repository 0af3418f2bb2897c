use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use livematch_cms::{
    config::Config, database::Database, obfuscation::Obfuscator, web::WebServer,
};

#[derive(Parser)]
#[command(name = "livematch-cms")]
#[command(version)]
#[command(about = "Catalog backend for live sports streams")]
#[command(long_about = None)]
struct Cli {
    /// Configuration file path
    #[arg(short, long, default_value = "config.toml", global = true)]
    config: PathBuf,

    /// Log level
    #[arg(short = 'v', long, default_value = "info", global = true)]
    log_level: String,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Run the HTTP server (default)
    Serve(ServeArgs),
    /// Decode an obfuscated public API response
    Decode {
        /// Value of the `t` response header
        #[arg(short, long)]
        t: String,
        /// Response body
        payload: String,
    },
}

#[derive(clap::Args, Default)]
struct ServeArgs {
    /// Listening IP address
    #[arg(short = 'H', long, value_name = "IP")]
    host: Option<String>,

    /// Listening port
    #[arg(short, long, value_name = "PORT")]
    port: Option<u16>,

    /// SQLite database file (overrides config file)
    #[arg(short = 'd', long, value_name = "PATH")]
    db_path: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_filter = format!("livematch_cms={}", cli.log_level);
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| log_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::load(&cli.config)
        .with_context(|| format!("Failed to load configuration from {}", cli.config.display()))?;

    match cli.command.unwrap_or(Command::Serve(ServeArgs::default())) {
        Command::Serve(args) => serve(config, args).await,
        Command::Decode { t, payload } => decode(&config, &t, &payload),
    }
}

async fn serve(mut config: Config, args: ServeArgs) -> Result<()> {
    info!("Starting livematch-cms v{}", env!("CARGO_PKG_VERSION"));

    if let Some(host) = args.host {
        config.web.host = host;
    }
    if let Some(port) = args.port {
        config.web.port = port;
    }
    if let Some(db_path) = args.db_path {
        config.database.path = db_path;
    }

    if config.uses_default_admin_token() {
        warn!("Admin token is the built-in default; set ADMIN_TOKEN before exposing this server");
    }

    info!("Using database: {}", config.database.path.display());
    let database = Database::new(&config.database).await?;
    database.migrate().await?;
    info!("Database connection established and migrations applied");

    let server = WebServer::new(config, database)?;
    info!(
        "Web server starting on http://{}:{}",
        server.host(),
        server.port()
    );
    server.serve().await
}

fn decode(config: &Config, timestamp: &str, payload: &str) -> Result<()> {
    let obfuscator = Obfuscator::new(config.obfuscation.key_base.clone());
    let value: serde_json::Value = obfuscator
        .decode_json(payload, timestamp)
        .context("Payload could not be decoded with this timestamp")?;
    println!("{}", serde_json::to_string_pretty(&value)?);
    Ok(())
}
