use tracing::{debug, error, info};

use crate::client::{extract_text_from_response, ContentGenerator};
use crate::config::{PaletteConfig, DEFAULT_TEMPERATURE, DEFAULT_TOP_P};
use crate::errors::GenerationResult;
use crate::palette::{ColorPalette, PALETTE_SIZE};
use crate::types::{Content, GenerateContentRequest, GenerationConfig, Schema};

/// Turns a mood into a validated palette with a single generation call
#[derive(Debug)]
pub struct PaletteOrchestrator<G> {
    generator: G,
    temperature: f32,
    top_p: f32,
}

impl<G: ContentGenerator> PaletteOrchestrator<G> {
    pub fn new(generator: G, config: &PaletteConfig) -> Self {
        Self {
            generator,
            temperature: config.temperature.unwrap_or(DEFAULT_TEMPERATURE),
            top_p: config.top_p.unwrap_or(DEFAULT_TOP_P),
        }
    }

    pub fn generator(&self) -> &G {
        &self.generator
    }

    /// Generate a palette for `mood`.
    ///
    /// Callers are expected to reject empty moods first. Every failure comes
    /// back as the same user-facing [`crate::errors::GenerationError`]; the cause is logged here.
    pub async fn generate_palette(&self, mood: &str) -> GenerationResult<ColorPalette> {
        info!(mood, "Generating color palette");

        match self.try_generate(mood).await {
            Ok(palette) => {
                debug!(colors = ?palette.colors(), "Palette generated");
                Ok(palette)
            }
            Err(e) => {
                error!(error = %e.cause(), cause = ?e.cause(), "Error generating color palette");
                Err(e)
            }
        }
    }

    async fn try_generate(&self, mood: &str) -> GenerationResult<ColorPalette> {
        let request = self.build_request(mood);
        let response = self.generator.generate_content(request).await?;
        let text = extract_text_from_response(&response)?;
        Ok(ColorPalette::from_json(&text)?)
    }

    /// Creates the schema-constrained request for `mood`
    pub fn build_request(&self, mood: &str) -> GenerateContentRequest {
        GenerateContentRequest {
            contents: vec![Content::user(build_prompt(mood))],
            generation_config: Some(GenerationConfig {
                temperature: Some(self.temperature),
                top_p: Some(self.top_p),
                response_mime_type: Some("application/json".to_string()),
                response_schema: Some(palette_schema()),
            }),
        }
    }
}

pub fn build_prompt(mood: &str) -> String {
    format!("Generate a color palette for the mood or keyword: \"{}\"", mood)
}

/// `{ colors: [string; 5], justification: string }`, both required
pub fn palette_schema() -> Schema {
    Schema::object([
        (
            "colors",
            Schema::array(Schema::string())
                .with_exact_len(PALETTE_SIZE as u32)
                .with_description(
                    "An array of exactly 5 unique hex color codes, each starting with #.",
                ),
        ),
        (
            "justification",
            Schema::string().with_description(
                "A single sentence aesthetic justification for the color palette choice, \
                 explaining how the colors relate to the provided mood or keyword.",
            ),
        ),
    ])
}
