use clap::Parser;
use palette_core::client::GeminiClient;
use palette_core::config::{parse_log_level, PaletteConfig};
use palette_core::orchestrator::PaletteOrchestrator;
use palette_server::http_server;
use std::net::SocketAddr;
use std::path::PathBuf;
use tracing::{error, info, Level};
use tracing_subscriber::FmtSubscriber;

#[derive(Parser, Debug)]
#[command(name = "palette-server", about = "HTTP backend for the mood palette web app")]
struct Args {
    /// Path to config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Gemini API key
    #[arg(short = 'k', long)]
    api_key: Option<String>,

    /// Gemini model to use
    #[arg(short = 'o', long)]
    model: Option<String>,

    /// HTTP server address
    #[arg(long, default_value = "127.0.0.1:8080")]
    http_addr: SocketAddr,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    // Parse command line args
    let args = Args::parse();

    // Load config from file and environment, then apply CLI overrides
    let config = PaletteConfig::load(args.config.as_deref())
        .map_err(|e| anyhow::anyhow!("Configuration error: {}", e))?
        .merge(&PaletteConfig {
            api_key: args.api_key,
            model_name: args.model,
            ..PaletteConfig::default()
        });

    // Initialize logging; a daemon logs requests at INFO by default
    let subscriber = FmtSubscriber::builder()
        .with_max_level(parse_log_level(config.log_level.as_deref(), Level::INFO))
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    info!("Starting palette server");

    // The credential is checked here, once, before serving anything
    let gemini_client = match GeminiClient::new(&config) {
        Ok(client) => {
            info!(model = client.model_name(), "Initialized Gemini client");
            client
        }
        Err(e) => {
            error!(error = %e, "Failed to initialize Gemini client");
            return Err(anyhow::anyhow!("Failed to initialize Gemini client: {}", e));
        }
    };

    let orchestrator = PaletteOrchestrator::new(gemini_client, &config);

    if let Err(e) = http_server::run_server(orchestrator, args.http_addr).await {
        error!(error = %e, "HTTP server failed");
        return Err(e);
    }

    info!("Palette server shutting down");
    Ok(())
}
