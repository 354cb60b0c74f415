//! Strictly Gridtoe - N×N tic-tac-toe game service
//!
//! Hosts games from [`strictly_gridtoe_core`] behind a JSON HTTP API.
//!
//! # Architecture
//!
//! - **Config**: TOML server settings with defaults
//! - **Session**: explicit map of sessions, each with a game and a win tally
//! - **Server**: axum routes for new games, moves, state and scores
//!
//! # Example
//!
//! ```no_run
//! use strictly_gridtoe::{ServerConfig, SessionManager, router};
//!
//! # async fn example() -> anyhow::Result<()> {
//! let config = ServerConfig::default();
//! let app = router(SessionManager::from_config(&config), &config);
//! let listener = tokio::net::TcpListener::bind("127.0.0.1:5000").await?;
//! axum::serve(listener, app).await?;
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod cli;
mod config;
mod error;
mod scores;
mod server;
mod session;

// Crate-level exports - CLI
pub use cli::{Cli, Command};

// Crate-level exports - Configuration
pub use config::ServerConfig;

// Crate-level exports - Errors
pub use error::{ApiError, ConfigError};

// Crate-level exports - Sessions and scores
pub use scores::ScoreBoard;
pub use session::{ActiveGame, GameMode, GameSession, MoveOutcome, NewGame, SessionId, SessionManager};

// Crate-level exports - HTTP API
pub use server::{
    GameSnapshot, MakeMoveRequest, MoveResponse, NewGameRequest, NewGameResponse, ScoresResponse,
    SessionQuery, router, serve,
};

// Crate-level exports - Game core
pub use strictly_gridtoe_core::{Coord, Difficulty, GameState, GameStatus, Player};
