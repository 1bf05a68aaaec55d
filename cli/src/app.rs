use anyhow::{Context, Result};
use colored::*;
use indicatif::{ProgressBar, ProgressStyle};
use palette_core::client::ContentGenerator;
use palette_core::controller::{PaletteController, RequestState};
use palette_core::orchestrator::PaletteOrchestrator;
use std::io::{self, Write};
use std::time::Duration;
use tracing::debug;

use crate::output::{print_error, print_palette, print_palette_json};

/// How a finished request is shown
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Swatches,
    Json,
}

fn spinner() -> Result<ProgressBar> {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::default_spinner()
            .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏")
            .template("{spinner} {msg}")
            .context("Invalid spinner template")?,
    );
    spinner.set_message("Conjuring up some colors...");
    spinner.enable_steady_tick(Duration::from_millis(120));
    Ok(spinner)
}

/// Submit the controller's current mood, with a spinner while the request runs.
///
/// Returns `Ok(false)` if the controller ignored the submission.
async fn submit_with_spinner<G: ContentGenerator>(
    controller: &mut PaletteController,
    orchestrator: &PaletteOrchestrator<G>,
) -> Result<bool> {
    let spinner = spinner()?;
    let submitted = controller.submit(orchestrator).await;
    spinner.finish_and_clear();
    Ok(submitted)
}

/// Display the controller's settled state. Returns `true` for a palette.
fn render_state(controller: &PaletteController, format: Format) -> Result<bool> {
    match controller.state() {
        RequestState::Success(palette) => {
            match format {
                Format::Swatches => print_palette(palette),
                Format::Json => print_palette_json(palette)?,
            }
            Ok(true)
        }
        RequestState::Failure(message) => {
            print_error(message);
            Ok(false)
        }
        RequestState::Idle | RequestState::Requesting => Ok(false),
    }
}

/// Generates one palette for `mood`. Returns whether a palette was produced.
pub async fn run_single_query<G: ContentGenerator>(
    mood: String,
    orchestrator: &PaletteOrchestrator<G>,
    format: Format,
) -> Result<bool> {
    let mut controller = PaletteController::new();
    controller.set_mood(mood);

    if !submit_with_spinner(&mut controller, orchestrator).await? {
        print_error("Enter a mood or keyword to begin.");
        return Ok(false);
    }

    render_state(&controller, format)
}

/// Reads moods from stdin until `exit`, `quit` or end of input
pub async fn run_interactive<G: ContentGenerator>(
    orchestrator: &PaletteOrchestrator<G>,
    format: Format,
) -> Result<()> {
    println!("Enter a mood or keyword to begin.");
    println!("Type 'exit' or 'quit' to leave.");
    println!();

    let mut controller = PaletteController::new();

    loop {
        print!("{}: ", "Mood".magenta().bold());
        io::stdout().flush().context("Failed to flush stdout")?;

        let mut input = String::new();
        let read = io::stdin()
            .read_line(&mut input)
            .context("Failed to read input")?;
        if read == 0 {
            break;
        }

        let input = input.trim();
        if input.eq_ignore_ascii_case("exit") || input.eq_ignore_ascii_case("quit") {
            println!("Goodbye.");
            break;
        }

        controller.set_mood(input);
        if !submit_with_spinner(&mut controller, orchestrator).await? {
            debug!("Blank mood, nothing submitted");
            continue;
        }

        render_state(&controller, format)?;
        println!();
    }

    Ok(())
}
