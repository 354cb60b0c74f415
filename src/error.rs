//! Error types for the game service.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use derive_more::{Display, Error, From};
use serde_json::json;
use strictly_gridtoe_core::{GridSizeError, MoveError};
use tracing::{instrument, warn};

/// Configuration error with location tracking.
#[derive(Debug, Clone, Display, Error)]
#[display("Config error: {} at {}:{}", message, file, line)]
pub struct ConfigError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ConfigError {
    /// Creates a new configuration error with caller location tracking.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn new(message: impl Into<String>) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message: message.into(),
            line: loc.line(),
            file: loc.file(),
        }
    }
}

/// Errors surfaced by the HTTP API.
#[derive(Debug, Clone, Display, Error, From)]
pub enum ApiError {
    /// No active game for the session.
    #[display("Game not found")]
    #[from(ignore)]
    GameNotFound,
    /// The submitted move was rejected by the game.
    #[display("Invalid move: {_0}")]
    InvalidMove(MoveError),
    /// The requested grid size is not playable.
    #[display("Invalid grid size: {_0}")]
    InvalidGridSize(GridSizeError),
    /// Grid larger than the server allows.
    #[display("Grid size {grid_size} exceeds the maximum of {max}")]
    #[from(ignore)]
    GridTooLarge {
        /// Requested side length.
        grid_size: usize,
        /// Largest side length allowed.
        max: usize,
    },
    /// Computer opponent requested on a grid too large to search.
    #[display("Computer opponent is only available for grids up to {max}x{max}")]
    #[from(ignore)]
    UnsupportedGrid {
        /// Requested side length.
        grid_size: usize,
        /// Largest side length allowed with a computer opponent.
        max: usize,
    },
}

impl ApiError {
    /// HTTP status for this error.
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::GameNotFound => StatusCode::NOT_FOUND,
            ApiError::InvalidMove(_)
            | ApiError::InvalidGridSize(_)
            | ApiError::GridTooLarge { .. }
            | ApiError::UnsupportedGrid { .. } => StatusCode::BAD_REQUEST,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        warn!(%status, error = %self, "Request failed");
        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}
