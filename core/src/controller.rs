//! Interaction state for one palette form.
//!
//! The controller owns the mood input and a [`RequestState`]. A submission
//! moves it to `Requesting`; the orchestrator's result moves it to `Success`
//! or `Failure`. While `Requesting`, further submissions are ignored, so at
//! most one generation call is in flight per controller.

use tracing::{debug, warn};

use crate::client::ContentGenerator;
use crate::errors::GenerationResult;
use crate::orchestrator::PaletteOrchestrator;
use crate::palette::{ColorPalette, MoodQuery};

/// Shown when a failure carries no message of its own
pub const UNKNOWN_ERROR_MESSAGE: &str = "An unknown error occurred.";

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum RequestState {
    #[default]
    Idle,
    Requesting,
    Success(ColorPalette),
    Failure(String),
}

#[derive(Debug, Default)]
pub struct PaletteController {
    mood: String,
    state: RequestState,
}

impl PaletteController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the input text. Allowed in every state.
    pub fn set_mood(&mut self, mood: impl Into<String>) {
        self.mood = mood.into();
    }

    pub fn mood(&self) -> &str {
        &self.mood
    }

    pub fn state(&self) -> &RequestState {
        &self.state
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.state, RequestState::Requesting)
    }

    pub fn palette(&self) -> Option<&ColorPalette> {
        match &self.state {
            RequestState::Success(palette) => Some(palette),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match &self.state {
            RequestState::Failure(message) => Some(message),
            _ => None,
        }
    }

    /// Start a submission.
    ///
    /// Returns `None` and leaves the state alone when the mood is blank or a
    /// request is already in flight. Otherwise drops any previous result,
    /// enters `Requesting` and hands back the query to send.
    pub fn begin_submission(&mut self) -> Option<MoodQuery> {
        if self.is_loading() {
            debug!("Submission ignored: request already in flight");
            return None;
        }

        let query = MoodQuery::parse(&self.mood)?;
        self.state = RequestState::Requesting;
        Some(query)
    }

    /// Record the outcome of the in-flight request
    pub fn complete(&mut self, result: GenerationResult<ColorPalette>) {
        if !self.is_loading() {
            warn!("Ignoring generation result: no request in flight");
            return;
        }

        self.state = match result {
            Ok(palette) => RequestState::Success(palette),
            Err(e) => {
                let message = e.to_string();
                if message.is_empty() {
                    RequestState::Failure(UNKNOWN_ERROR_MESSAGE.to_string())
                } else {
                    RequestState::Failure(message)
                }
            }
        };
    }

    /// Submit the current mood and wait for the result.
    ///
    /// Returns `false` if the submission was ignored.
    pub async fn submit<G: ContentGenerator>(
        &mut self,
        orchestrator: &PaletteOrchestrator<G>,
    ) -> bool {
        let Some(query) = self.begin_submission() else {
            return false;
        };

        let result = orchestrator.generate_palette(query.as_str()).await;
        self.complete(result);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PaletteConfig;
    use crate::errors::{FailureCause, GenerationError, GENERATION_FAILED_MESSAGE};
    use crate::orchestrator::tests::{MockGenerator, RUSTIC_JSON};

    fn orchestrator(generator: MockGenerator) -> PaletteOrchestrator<MockGenerator> {
        PaletteOrchestrator::new(generator, &PaletteConfig::defaults())
    }

    #[test]
    fn test_starts_idle() {
        let controller = PaletteController::new();
        assert_eq!(controller.state(), &RequestState::Idle);
        assert!(!controller.is_loading());
        assert!(controller.palette().is_none());
        assert!(controller.error().is_none());
    }

    #[tokio::test]
    async fn test_blank_mood_is_ignored() {
        let orchestrator = orchestrator(MockGenerator::text(RUSTIC_JSON));
        let mut controller = PaletteController::new();

        for mood in ["", "   ", "\t\n"] {
            controller.set_mood(mood);
            assert!(!controller.submit(&orchestrator).await);
            assert_eq!(controller.state(), &RequestState::Idle);
        }
        assert_eq!(orchestrator.generator().calls(), 0);
    }

    #[tokio::test]
    async fn test_blank_mood_keeps_previous_result() {
        let orchestrator = orchestrator(MockGenerator::text(RUSTIC_JSON));
        let mut controller = PaletteController::new();
        controller.set_mood("Rustic");
        assert!(controller.submit(&orchestrator).await);

        controller.set_mood("  ");
        assert!(!controller.submit(&orchestrator).await);
        assert!(controller.palette().is_some());
        assert_eq!(orchestrator.generator().calls(), 1);
    }

    #[tokio::test]
    async fn test_submission_while_requesting_is_ignored() {
        let orchestrator = orchestrator(MockGenerator::text(RUSTIC_JSON));
        let mut controller = PaletteController::new();
        controller.set_mood("Rustic");

        let query = controller.begin_submission().unwrap();
        assert_eq!(query.as_str(), "Rustic");
        assert!(controller.is_loading());

        controller.set_mood("Futuristic");
        assert!(controller.begin_submission().is_none());
        assert!(!controller.submit(&orchestrator).await);
        assert_eq!(orchestrator.generator().calls(), 0);
        assert!(controller.is_loading());
    }

    #[tokio::test]
    async fn test_rustic_end_to_end() {
        let orchestrator = orchestrator(MockGenerator::text(RUSTIC_JSON));
        let mut controller = PaletteController::new();
        controller.set_mood("Rustic");

        assert!(controller.submit(&orchestrator).await);

        let expected = ColorPalette::new(
            ["#A1887F", "#6D4C41", "#D7CCC8", "#4E342E", "#BCAAA4"]
                .map(String::from)
                .to_vec(),
            "Warm earthy tones evoke a rustic, weathered feel.".to_string(),
        )
        .unwrap();
        assert_eq!(controller.state(), &RequestState::Success(expected));
        assert!(!controller.is_loading());

        let prompts = orchestrator.generator().prompts.lock().unwrap();
        assert!(prompts[0].contains("Rustic"));
    }

    #[tokio::test]
    async fn test_network_failure_end_to_end() {
        let orchestrator = orchestrator(MockGenerator::network_error());
        let mut controller = PaletteController::new();
        controller.set_mood("Rustic");

        assert!(controller.submit(&orchestrator).await);
        assert_eq!(
            controller.state(),
            &RequestState::Failure(GENERATION_FAILED_MESSAGE.to_string())
        );
        assert!(!controller.is_loading());
    }

    #[tokio::test]
    async fn test_new_submission_clears_previous_failure() {
        let failing = orchestrator(MockGenerator::network_error());
        let working = orchestrator(MockGenerator::text(RUSTIC_JSON));
        let mut controller = PaletteController::new();
        controller.set_mood("Rustic");

        controller.submit(&failing).await;
        assert!(controller.error().is_some());

        controller.begin_submission();
        assert_eq!(controller.state(), &RequestState::Requesting);
        assert!(controller.error().is_none());

        controller.complete(working.generate_palette("Rustic").await);
        assert!(controller.palette().is_some());
    }

    #[test]
    fn test_complete_without_request_is_ignored() {
        let mut controller = PaletteController::new();
        controller.complete(Err(GenerationError::from(FailureCause::InvalidColorData {
            reason: "late".to_string(),
        })));
        assert_eq!(controller.state(), &RequestState::Idle);
    }
}
