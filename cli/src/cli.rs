use clap::Parser;
use std::path::PathBuf;

/// Generate a five-color palette from a mood or keyword
#[derive(Parser, Debug, Default)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// The mood or keyword to build a palette for
    #[arg(index = 1)] // Positional argument
    pub mood: Option<String>,

    /// Enter interactive mode
    #[arg(short, long, default_value_t = false)]
    pub interactive: bool,

    /// Path to a config file (defaults to ~/.config/mood-palette/config.toml)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Gemini API key
    #[arg(short = 'k', long)]
    pub api_key: Option<String>,

    /// Gemini model to use
    #[arg(short = 'm', long)]
    pub model: Option<String>,

    /// Print the palette as JSON instead of color swatches
    #[arg(long, default_value_t = false)]
    pub json: bool,

    /// Enable verbose output
    #[arg(short, long, default_value_t = false)]
    pub verbose: bool,
}
