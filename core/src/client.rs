use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use tracing::debug;

use crate::config::{PaletteConfig, DEFAULT_API_BASE_URL};
use crate::errors::{GeminiError, GeminiResult};
use crate::types::*;

/// Anything that can answer a `generateContent` request.
///
/// [`GeminiClient`] is the production implementation; tests substitute their own.
#[async_trait]
pub trait ContentGenerator: Send + Sync {
    async fn generate_content(
        &self,
        request: GenerateContentRequest,
    ) -> GeminiResult<GenerateContentResponse>;
}

/// Client for interacting with the Gemini API
#[derive(Debug, Clone)]
pub struct GeminiClient {
    client: Client,
    model: GeminiModel,
    base_url: String,
}

impl GeminiClient {
    /// Create a new Gemini API client. Fails if no API key is configured.
    pub fn new(config: &PaletteConfig) -> GeminiResult<Self> {
        let api_key = config.require_api_key()?.to_string();
        let model = GeminiModel::new(api_key, config.model_name.clone());

        let mut builder = Client::builder();
        if let Some(secs) = config.request_timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let client = builder.build().map_err(|e| {
            GeminiError::ConfigError(format!("Failed to build HTTP client: {}", e))
        })?;

        let base_url = config
            .api_base_url
            .as_deref()
            .unwrap_or(DEFAULT_API_BASE_URL)
            .trim_end_matches('/')
            .to_string();

        Ok(Self {
            client,
            model,
            base_url,
        })
    }

    pub fn model_name(&self) -> &str {
        &self.model.model_name
    }

    /// Get the generateContent endpoint for the configured model
    fn get_endpoint_url(&self) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.base_url, self.model.model_name
        )
    }
}

#[async_trait]
impl ContentGenerator for GeminiClient {
    /// Generate content using the Gemini API
    async fn generate_content(
        &self,
        request: GenerateContentRequest,
    ) -> GeminiResult<GenerateContentResponse> {
        let url = self.get_endpoint_url();
        debug!(model = %self.model.model_name, "Sending generateContent request");

        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", &self.model.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| GeminiError::RequestError(format!("Failed to send request: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let error_body = response.text().await.map_err(|e| {
                GeminiError::ResponseError(format!("Failed to read error response: {}", e))
            })?;

            return Err(GeminiError::HttpError {
                status_code: status.as_u16(),
                message: format!("API request failed: {}", error_body),
            });
        }

        response
            .json::<GenerateContentResponse>()
            .await
            .map_err(|e| GeminiError::ParsingError(format!("Failed to parse response: {}", e)))
    }
}

/// Helper function to extract the first candidate's text from a response
pub fn extract_text_from_response(response: &GenerateContentResponse) -> GeminiResult<String> {
    let candidate = response
        .candidates
        .first()
        .ok_or_else(|| GeminiError::ResponseError("No candidates in response".to_string()))?;

    let content = candidate
        .content
        .as_ref()
        .ok_or_else(|| GeminiError::ResponseError("No content in candidate".to_string()))?;

    let text: String = content
        .parts
        .iter()
        .filter_map(|part| part.text.as_deref())
        .collect();

    if text.is_empty() {
        return Err(GeminiError::ResponseError("No text in content".to_string()));
    }

    Ok(text)
}
