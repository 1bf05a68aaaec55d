// Core palette generation functionality

// Export client module - API client for Gemini
pub mod client;
pub use client::*;

// Export types module - Request/response data structures
pub mod types;
pub use types::*;

// Export config module - Configuration loading
pub mod config;
pub use config::*;

// Export errors module - Shared error types
pub mod errors;
pub use errors::*;

// Palette model, orchestration and interaction state
pub mod palette;
pub use palette::{ColorPalette, HexColor, MoodQuery, PALETTE_SIZE};

pub mod orchestrator;
pub use orchestrator::PaletteOrchestrator;

pub mod controller;
pub use controller::{PaletteController, RequestState};
