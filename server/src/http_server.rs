use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use palette_core::client::ContentGenerator;
use palette_core::controller::{PaletteController, RequestState};
use palette_core::orchestrator::PaletteOrchestrator;
use palette_core::palette::ColorPalette;
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tracing::{error, info, info_span, Instrument};
use uuid::Uuid;

/// Application state shared with all routes
pub struct AppState<G> {
    orchestrator: Arc<PaletteOrchestrator<G>>,
}

impl<G> Clone for AppState<G> {
    fn clone(&self) -> Self {
        Self {
            orchestrator: Arc::clone(&self.orchestrator),
        }
    }
}

/// Request model for palette generation
#[derive(Deserialize)]
pub struct PaletteRequest {
    mood: String,
}

/// Successful response body
#[derive(Serialize)]
pub struct PaletteResponse {
    palette: ColorPalette,
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

/// Error type for HTTP server
#[derive(Debug)]
pub enum ApiError {
    EmptyMood,
    GenerationFailed(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            Self::EmptyMood => (
                StatusCode::BAD_REQUEST,
                "Enter a mood or keyword to begin.".to_string(),
            ),
            Self::GenerationFailed(message) => (StatusCode::BAD_GATEWAY, message),
        };
        (status, Json(ErrorBody { error: message })).into_response()
    }
}

/// Build the router around an orchestrator
pub fn router<G>(orchestrator: PaletteOrchestrator<G>) -> Router
where
    G: ContentGenerator + 'static,
{
    let state = AppState {
        orchestrator: Arc::new(orchestrator),
    };

    // Set up CORS
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(health))
        .route("/palette", post(handle_palette::<G>))
        .layer(cors)
        .with_state(state)
}

/// Start the HTTP server
pub async fn run_server<G>(
    orchestrator: PaletteOrchestrator<G>,
    addr: SocketAddr,
) -> anyhow::Result<()>
where
    G: ContentGenerator + 'static,
{
    info!("Starting HTTP server on {}", addr);

    axum::Server::bind(&addr)
        .serve(router(orchestrator).into_make_service())
        .await
        .map_err(|e| anyhow::anyhow!("Failed to start HTTP server: {}", e))
}

/// Health check handler
async fn health() -> impl IntoResponse {
    "Mood palette server is running"
}

/// Each request drives its own controller through one submission
async fn handle_palette<G>(
    State(state): State<AppState<G>>,
    Json(payload): Json<PaletteRequest>,
) -> Result<Json<PaletteResponse>, ApiError>
where
    G: ContentGenerator + 'static,
{
    let request_id = Uuid::new_v4();
    let span = info_span!("palette_request", %request_id);

    async move {
        let mut controller = PaletteController::new();
        controller.set_mood(payload.mood);

        if !controller.submit(&*state.orchestrator).await {
            return Err(ApiError::EmptyMood);
        }

        match controller.state() {
            RequestState::Success(palette) => Ok(Json(PaletteResponse {
                palette: palette.clone(),
            })),
            RequestState::Failure(message) => Err(ApiError::GenerationFailed(message.clone())),
            state => {
                error!(?state, "Controller did not settle after submission");
                Err(ApiError::GenerationFailed(
                    palette_core::errors::GENERATION_FAILED_MESSAGE.to_string(),
                ))
            }
        }
    }
    .instrument(span)
    .await
}
