//! HTTP API over the session manager.

use crate::config::ServerConfig;
use crate::error::ApiError;
use crate::scores::ScoreBoard;
use crate::session::{ActiveGame, GameMode, NewGame, SessionId, SessionManager};
use axum::extract::{Json, Query, State};
use axum::routing::{get, post};
use axum::Router;
use serde::{Deserialize, Serialize};
use strictly_gridtoe_core::{Coord, Difficulty, GameState, GameStatus, Player, Square};
use tracing::{info, instrument};

/// Request for starting a game.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NewGameRequest {
    /// Session to start the game in; a new one is created when absent.
    #[serde(default)]
    pub session_id: Option<SessionId>,
    /// Grid side length; the configured default when absent.
    #[serde(default)]
    pub grid_size: Option<usize>,
    /// Seat arrangement.
    #[serde(default)]
    pub game_mode: GameMode,
    /// Computer strength in single-player mode.
    #[serde(default)]
    pub difficulty: Difficulty,
}

/// Request for making a move.
///
/// Coordinates are signed so negative input is reported as an invalid move
/// rather than a deserialization failure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MakeMoveRequest {
    /// Session ID.
    pub session_id: SessionId,
    /// Target row.
    pub row: i64,
    /// Target column.
    pub col: i64,
}

/// Query identifying a session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionQuery {
    /// Session ID.
    pub session_id: SessionId,
}

/// Serialized view of a game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSnapshot {
    /// Rows of cells: `"X"`, `"O"` or `""`.
    pub board: Vec<Vec<String>>,
    /// Player to move next.
    pub current_player: Player,
    /// True once won or tied.
    pub game_over: bool,
    /// `"X"`, `"O"`, `"tie"`, or null while in progress.
    pub winner: Option<String>,
    /// Coordinates of the completed line.
    pub winning_line: Option<Vec<Coord>>,
    /// Grid side length.
    pub grid_size: usize,
}

impl From<&GameState> for GameSnapshot {
    fn from(state: &GameState) -> Self {
        let board = state
            .board()
            .rows()
            .map(|row| {
                row.iter()
                    .map(|sq| match sq {
                        Square::Empty => String::new(),
                        Square::Occupied(player) => player.to_string(),
                    })
                    .collect()
            })
            .collect();
        let winner = match state.status() {
            GameStatus::InProgress => None,
            GameStatus::Won(player) => Some(player.to_string()),
            GameStatus::Tied => Some("tie".to_string()),
        };
        Self {
            board,
            current_player: state.current_player(),
            game_over: state.is_over(),
            winner,
            winning_line: state.winning_line().map(<[Coord]>::to_vec),
            grid_size: state.size(),
        }
    }
}

/// Response to a new game request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewGameResponse {
    /// Session holding the game.
    pub session_id: SessionId,
    /// Seat arrangement.
    pub game_mode: GameMode,
    /// Initial game view.
    #[serde(flatten)]
    pub game: GameSnapshot,
}

/// Response to a move.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MoveResponse {
    /// Game view after the move.
    #[serde(flatten)]
    pub game: GameSnapshot,
    /// The computer's reply, if it moved.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub ai_move: Option<Coord>,
}

/// Response carrying a session's tally.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoresResponse {
    /// The tally.
    pub scores: ScoreBoard,
}

#[derive(Debug, Clone)]
struct AppState {
    sessions: SessionManager,
    default_grid_size: usize,
}

/// Builds the API router.
pub fn router(sessions: SessionManager, config: &ServerConfig) -> Router {
    let state = AppState {
        sessions,
        default_grid_size: *config.default_grid_size(),
    };

    Router::new()
        .route("/api/new_game", post(new_game))
        .route("/api/make_move", post(make_move))
        .route("/api/game_state", get(game_state))
        .route("/api/get_scores", get(get_scores))
        .route("/api/reset_scores", post(reset_scores))
        .with_state(state)
}

/// Binds the configured address and serves the API until shutdown.
#[instrument(skip(config), fields(host = %config.host(), port = config.port()))]
pub async fn serve(config: ServerConfig) -> anyhow::Result<()> {
    let sessions = SessionManager::from_config(&config);
    let app = router(sessions, &config);

    let listener = tokio::net::TcpListener::bind((config.host().as_str(), *config.port())).await?;
    info!("Server ready at http://{}:{}/", config.host(), config.port());

    axum::serve(listener, app).await?;
    Ok(())
}

fn snapshot(game: &ActiveGame) -> GameSnapshot {
    GameSnapshot::from(game.state())
}

#[instrument(skip(state))]
async fn new_game(
    State(state): State<AppState>,
    Json(req): Json<NewGameRequest>,
) -> Result<Json<NewGameResponse>, ApiError> {
    let settings = NewGame::new(
        req.grid_size.unwrap_or(state.default_grid_size),
        req.game_mode,
        req.difficulty,
    );
    let (session_id, game) = state.sessions.new_game(req.session_id, settings)?;

    Ok(Json(NewGameResponse {
        session_id,
        game_mode: *game.mode(),
        game: snapshot(&game),
    }))
}

#[instrument(skip(state))]
async fn make_move(
    State(state): State<AppState>,
    Json(req): Json<MakeMoveRequest>,
) -> Result<Json<MoveResponse>, ApiError> {
    // Negative coordinates land past the grid so the game rejects them in its usual order.
    let row = usize::try_from(req.row).unwrap_or(usize::MAX);
    let col = usize::try_from(req.col).unwrap_or(usize::MAX);

    let outcome = state.sessions.make_move(&req.session_id, row, col)?;
    Ok(Json(MoveResponse {
        game: snapshot(&outcome.game),
        ai_move: outcome.ai_move,
    }))
}

#[instrument(skip(state))]
async fn game_state(
    State(state): State<AppState>,
    Query(query): Query<SessionQuery>,
) -> Result<Json<GameSnapshot>, ApiError> {
    let game = state.sessions.game(&query.session_id)?;
    Ok(Json(snapshot(&game)))
}

#[instrument(skip(state))]
async fn get_scores(
    State(state): State<AppState>,
    Query(query): Query<SessionQuery>,
) -> Json<ScoresResponse> {
    Json(ScoresResponse {
        scores: state.sessions.scores(&query.session_id),
    })
}

#[instrument(skip(state))]
async fn reset_scores(
    State(state): State<AppState>,
    Json(query): Json<SessionQuery>,
) -> Json<ScoresResponse> {
    Json(ScoresResponse {
        scores: state.sessions.reset_scores(&query.session_id),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snapshot_of_won_game() {
        let mut state = GameState::new(3).unwrap();
        for (row, col) in [(0, 0), (1, 0), (1, 1), (2, 0), (2, 2)] {
            state.apply_move(row, col).unwrap();
        }
        let snap = GameSnapshot::from(&state);
        assert_eq!(snap.board[0], vec!["X", "", ""]);
        assert_eq!(snap.board[1], vec!["O", "X", ""]);
        assert!(snap.game_over);
        assert_eq!(snap.winner.as_deref(), Some("X"));
        assert_eq!(
            snap.winning_line,
            Some(vec![Coord::new(0, 0), Coord::new(1, 1), Coord::new(2, 2)])
        );
    }

    #[test]
    fn test_new_game_request_defaults() {
        let req: NewGameRequest = serde_json::from_str("{}").unwrap();
        assert_eq!(req.game_mode, GameMode::TwoPlayer);
        assert_eq!(req.difficulty, Difficulty::Medium);
        assert!(req.grid_size.is_none());

        let req: NewGameRequest =
            serde_json::from_str(r#"{"game_mode":"single_player","difficulty":"hard"}"#).unwrap();
        assert_eq!(req.game_mode, GameMode::SinglePlayer);
        assert_eq!(req.difficulty, Difficulty::Hard);
    }
}
