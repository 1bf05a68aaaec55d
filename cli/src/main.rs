use clap::Parser;
use palette_core::client::GeminiClient;
use palette_core::config::parse_log_level;
use palette_core::orchestrator::PaletteOrchestrator;
use std::process::ExitCode;
use tracing::{error, info};

mod app;
mod cli;
mod config;
mod logging;
mod output;

use crate::app::Format;
use crate::cli::Args;
use crate::output::{print_error, print_usage_instructions};

/// Main function - builds the Gemini client once, then runs the requested mode
#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    // Pick up API_KEY / GEMINI_API_KEY from a local .env file
    dotenvy::dotenv().ok();

    let args = Args::parse();

    let config = match config::resolve_config(&args) {
        Ok(config) => config,
        Err(e) => {
            print_error(&e.to_string());
            return Ok(ExitCode::FAILURE);
        }
    };

    logging::init_logging(parse_log_level(
        config.log_level.as_deref(),
        logging::DEFAULT_LEVEL,
    ))?;

    // A missing credential is fatal at startup
    let client = match GeminiClient::new(&config) {
        Ok(client) => client,
        Err(e) => {
            error!(error = %e, "Failed to initialize Gemini client");
            print_error(&e.to_string());
            return Ok(ExitCode::FAILURE);
        }
    };
    info!(model = client.model_name(), "Initialized Gemini client");

    let orchestrator = PaletteOrchestrator::new(client, &config);
    let format = if args.json {
        Format::Json
    } else {
        Format::Swatches
    };

    if args.interactive {
        app::run_interactive(&orchestrator, format).await?;
    } else if let Some(mood) = args.mood {
        if !app::run_single_query(mood, &orchestrator, format).await? {
            return Ok(ExitCode::FAILURE);
        }
    } else {
        print_usage_instructions();
    }

    Ok(ExitCode::SUCCESS)
}
