use colored::*;
use palette_core::palette::{ColorPalette, HexColor};

const SWATCH_WIDTH: usize = 9;

/// Print a palette as a row of color swatches followed by the justification
pub fn print_palette(palette: &ColorPalette) {
    println!("{}", render_palette(palette));
}

/// Print the palette in its wire format
pub fn print_palette_json(palette: &ColorPalette) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(palette)?);
    Ok(())
}

pub fn print_error(message: &str) {
    eprintln!("{} {}", "Error:".red().bold(), message);
}

pub fn render_palette(palette: &ColorPalette) -> String {
    let swatches: Vec<String> = palette.colors().iter().map(swatch).collect();
    let labels: Vec<String> = palette
        .colors()
        .iter()
        .map(|color| format!("{:^width$}", color.as_str(), width = SWATCH_WIDTH))
        .collect();

    format!(
        "\n{}\n{}\n{}\n\n{}\n{}\n",
        swatches.join(" "),
        swatches.join(" "),
        labels.join(" "),
        "Aesthetic Justification".magenta().bold(),
        palette.justification()
    )
}

fn swatch(color: &HexColor) -> String {
    let (r, g, b) = color.rgb();
    " ".repeat(SWATCH_WIDTH).on_truecolor(r, g, b).to_string()
}

/// Show usage instructions when no mood or action is provided
pub fn print_usage_instructions() {
    println!("{}", "Usage:".yellow().bold());
    println!("  {}", "mood-palette \"your mood\"".green().bold());
    println!("    Generate a palette for a single mood or keyword");
    println!();
    println!("  {}", "mood-palette -i".green().bold());
    println!("    Enter moods interactively");
    println!();
    println!("{}", "Options:".cyan());
    println!("  --config <PATH>   Use a specific config file");
    println!("  --api-key <KEY>   Gemini API key (or set GEMINI_API_KEY)");
    println!("  --model <NAME>    Gemini model to use");
    println!("  --json            Print the palette as JSON");
    println!("  --help            Show this help message");
    println!();
}
