//! Game session management.
//!
//! A session owns at most one active game plus the win tally that survives
//! across games. All sessions live in one explicit map owned by the
//! [`SessionManager`]; the game core itself holds no shared state.

use crate::config::ServerConfig;
use crate::error::ApiError;
use crate::scores::ScoreBoard;
use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use strictly_gridtoe_core::{
    Coord, Difficulty, GameState, GameStatus, Opponent, Player, SearchConfig,
};
use tracing::{debug, info, instrument, warn};

/// Unique identifier for a session.
pub type SessionId = String;

/// Whether the second seat is a human or the computer.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum GameMode {
    /// Two humans share the board.
    #[default]
    TwoPlayer,
    /// A human plays X against the computer playing O.
    SinglePlayer,
}

/// Settings for a new game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_new::new)]
pub struct NewGame {
    /// Grid side length.
    pub grid_size: usize,
    /// Seat arrangement.
    pub mode: GameMode,
    /// Strength of the computer opponent in single-player mode.
    pub difficulty: Difficulty,
}

/// A game in progress within a session.
#[derive(Debug, Clone, Getters)]
pub struct ActiveGame {
    /// The game state.
    state: GameState,
    /// Seat arrangement.
    mode: GameMode,
    /// Computer opponent, present in single-player mode.
    opponent: Option<Opponent>,
}

/// Result of a submitted move.
#[derive(Debug, Clone)]
pub struct MoveOutcome {
    /// Game state after the human move and any computer reply.
    pub game: ActiveGame,
    /// The computer's reply, if it moved.
    pub ai_move: Option<Coord>,
}

/// One client's session.
#[derive(Debug, Clone)]
pub struct GameSession {
    /// Session ID.
    pub id: SessionId,
    /// The current game, if one was started.
    pub game: Option<ActiveGame>,
    /// Wins across games in this session.
    pub scores: ScoreBoard,
}

impl GameSession {
    /// Creates an empty session.
    #[instrument]
    pub fn new(id: SessionId) -> Self {
        info!(session_id = %id, "Creating new game session");
        Self {
            id,
            game: None,
            scores: ScoreBoard::default(),
        }
    }

    /// Applies a human move and, in single-player mode, the computer's reply.
    #[instrument(skip(self), fields(session_id = %self.id))]
    pub fn make_move(&mut self, row: usize, col: usize) -> Result<MoveOutcome, ApiError> {
        let game = self.game.as_mut().ok_or_else(|| {
            warn!("Move submitted without an active game");
            ApiError::GameNotFound
        })?;

        game.state.apply_move(row, col)?;
        if let GameStatus::Won(winner) = game.state.status() {
            self.scores.record_win(winner, game.mode);
        }

        let mut ai_move = None;
        if let Some(opponent) = game.opponent
            && !game.state.is_over()
            && let Some(reply) = opponent.select_move(&game.state)
        {
            game.state.apply_move(reply.row, reply.col)?;
            info!(%reply, "Computer replied");
            if let GameStatus::Won(winner) = game.state.status() {
                self.scores.record_win(winner, game.mode);
            }
            ai_move = Some(reply);
        }

        debug!(status = ?game.state.status(), "Move completed");
        Ok(MoveOutcome {
            game: game.clone(),
            ai_move,
        })
    }
}

/// Manages all game sessions.
#[derive(Debug, Clone)]
pub struct SessionManager {
    sessions: Arc<Mutex<HashMap<SessionId, GameSession>>>,
    max_grid_size: usize,
    max_ai_grid_size: usize,
    search: SearchConfig,
}

impl SessionManager {
    /// Creates a session manager with the given grid and opponent limits.
    #[instrument]
    pub fn new(max_grid_size: usize, max_ai_grid_size: usize, search: SearchConfig) -> Self {
        info!("Creating session manager");
        Self {
            sessions: Arc::new(Mutex::new(HashMap::new())),
            max_grid_size,
            max_ai_grid_size,
            search,
        }
    }

    /// Creates a session manager from server configuration.
    pub fn from_config(config: &ServerConfig) -> Self {
        Self::new(
            *config.max_grid_size(),
            *config.max_ai_grid_size(),
            config.search(),
        )
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<SessionId, GameSession>> {
        self.sessions.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Starts a game, creating the session when `session_id` is absent or unknown.
    ///
    /// Replaces any game already running in the session; scores are kept.
    #[instrument(skip(self))]
    pub fn new_game(
        &self,
        session_id: Option<SessionId>,
        settings: NewGame,
    ) -> Result<(SessionId, ActiveGame), ApiError> {
        if settings.grid_size > self.max_grid_size {
            warn!(
                grid_size = settings.grid_size,
                max = self.max_grid_size,
                "Grid size refused"
            );
            return Err(ApiError::GridTooLarge {
                grid_size: settings.grid_size,
                max: self.max_grid_size,
            });
        }
        if settings.mode == GameMode::SinglePlayer && settings.grid_size > self.max_ai_grid_size {
            warn!(
                grid_size = settings.grid_size,
                max = self.max_ai_grid_size,
                "Computer opponent refused for large grid"
            );
            return Err(ApiError::UnsupportedGrid {
                grid_size: settings.grid_size,
                max: self.max_ai_grid_size,
            });
        }

        let state = GameState::new(settings.grid_size)?;
        let opponent = match settings.mode {
            GameMode::SinglePlayer => {
                Some(Opponent::new(settings.difficulty, Player::O).with_search(self.search))
            }
            GameMode::TwoPlayer => None,
        };
        let game = ActiveGame {
            state,
            mode: settings.mode,
            opponent,
        };

        let id = session_id.unwrap_or_else(|| uuid::Uuid::new_v4().to_string());
        let mut sessions = self.lock();
        let session = sessions
            .entry(id.clone())
            .or_insert_with(|| GameSession::new(id.clone()));
        session.game = Some(game.clone());

        info!(session_id = %id, mode = %settings.mode, "Started new game");
        Ok((id, game))
    }

    /// Submits a move to the session's game.
    #[instrument(skip(self))]
    pub fn make_move(&self, session_id: &str, row: usize, col: usize) -> Result<MoveOutcome, ApiError> {
        let mut sessions = self.lock();
        let session = sessions.get_mut(session_id).ok_or_else(|| {
            debug!(session_id, "Session not found");
            ApiError::GameNotFound
        })?;
        session.make_move(row, col)
    }

    /// Returns the session's current game.
    #[instrument(skip(self))]
    pub fn game(&self, session_id: &str) -> Result<ActiveGame, ApiError> {
        self.lock()
            .get(session_id)
            .and_then(|session| session.game.clone())
            .ok_or(ApiError::GameNotFound)
    }

    /// Returns the session's tally; unknown sessions have a zero tally.
    #[instrument(skip(self))]
    pub fn scores(&self, session_id: &str) -> ScoreBoard {
        self.lock()
            .get(session_id)
            .map(|session| session.scores)
            .unwrap_or_default()
    }

    /// Zeroes the session's tally, creating the session if needed.
    #[instrument(skip(self))]
    pub fn reset_scores(&self, session_id: &str) -> ScoreBoard {
        let mut sessions = self.lock();
        let session = sessions
            .entry(session_id.to_string())
            .or_insert_with(|| GameSession::new(session_id.to_string()));
        session.scores.reset();
        info!(session_id, "Scores reset");
        session.scores
    }

    /// Lists all session IDs.
    #[instrument(skip(self))]
    pub fn list_sessions(&self) -> Vec<SessionId> {
        let ids: Vec<_> = self.lock().keys().cloned().collect();
        debug!(count = ids.len(), "Listed sessions");
        ids
    }
}

impl Default for SessionManager {
    fn default() -> Self {
        Self::from_config(&ServerConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn single_player(difficulty: Difficulty) -> NewGame {
        NewGame::new(3, GameMode::SinglePlayer, difficulty)
    }

    #[test]
    fn test_new_game_generates_id() {
        let manager = SessionManager::default();
        let (id, game) = manager
            .new_game(None, NewGame::new(4, GameMode::TwoPlayer, Difficulty::Easy))
            .unwrap();
        assert!(!id.is_empty());
        assert_eq!(game.state().size(), 4);
        assert!(game.opponent().is_none());
        assert_eq!(manager.list_sessions(), vec![id]);
    }

    #[test]
    fn test_ai_refused_on_large_grid() {
        let manager = SessionManager::default();
        let err = manager
            .new_game(None, NewGame::new(4, GameMode::SinglePlayer, Difficulty::Hard))
            .unwrap_err();
        assert!(matches!(err, ApiError::UnsupportedGrid { grid_size: 4, max: 3 }));
        assert!(manager.list_sessions().is_empty());
    }

    #[test]
    fn test_oversized_grid_refused() {
        let manager = SessionManager::default();
        for grid_size in [16, 100_000, usize::MAX] {
            let err = manager
                .new_game(None, NewGame::new(grid_size, GameMode::TwoPlayer, Difficulty::Easy))
                .unwrap_err();
            assert!(matches!(err, ApiError::GridTooLarge { max: 15, .. }));
        }
        assert!(manager.list_sessions().is_empty());

        let (_, game) = manager
            .new_game(None, NewGame::new(15, GameMode::TwoPlayer, Difficulty::Easy))
            .unwrap();
        assert_eq!(game.state().empty_cells().len(), 225);
    }

    #[test]
    fn test_zero_grid_refused() {
        let manager = SessionManager::default();
        let err = manager
            .new_game(None, NewGame::new(0, GameMode::TwoPlayer, Difficulty::Easy))
            .unwrap_err();
        assert!(matches!(err, ApiError::InvalidGridSize(_)));
    }

    #[test]
    fn test_computer_replies() {
        let manager = SessionManager::default();
        let (id, _) = manager.new_game(None, single_player(Difficulty::Hard)).unwrap();

        let outcome = manager.make_move(&id, 0, 0).unwrap();
        assert_eq!(outcome.ai_move, Some(Coord::new(1, 1)));
        assert_eq!(outcome.game.state().current_player(), Player::X);
        assert_eq!(outcome.game.state().empty_cells().len(), 7);
    }

    #[test]
    fn test_invalid_move_reported() {
        let manager = SessionManager::default();
        let (id, _) = manager
            .new_game(Some("s1".into()), NewGame::new(3, GameMode::TwoPlayer, Difficulty::Easy))
            .unwrap();
        manager.make_move(&id, 1, 1).unwrap();
        let err = manager.make_move(&id, 1, 1).unwrap_err();
        assert!(matches!(err, ApiError::InvalidMove(_)));
        assert!(matches!(
            manager.make_move("unknown", 0, 0),
            Err(ApiError::GameNotFound)
        ));
    }

    #[test]
    fn test_wins_tallied_and_kept_across_games() {
        let manager = SessionManager::default();
        let id = "tally".to_string();
        for _ in 0..2 {
            manager
                .new_game(Some(id.clone()), NewGame::new(3, GameMode::TwoPlayer, Difficulty::Easy))
                .unwrap();
            for (row, col) in [(0, 0), (1, 0), (0, 1), (1, 1), (0, 2)] {
                manager.make_move(&id, row, col).unwrap();
            }
        }
        assert_eq!(manager.scores(&id).player_x, 2);

        assert_eq!(manager.reset_scores(&id), ScoreBoard::default());
        assert_eq!(manager.scores(&id), ScoreBoard::default());
    }

    #[test]
    fn test_computer_win_credited_to_computer() {
        let manager = SessionManager::default();
        let (id, _) = manager.new_game(None, single_player(Difficulty::Hard)).unwrap();

        manager.make_move(&id, 0, 0).unwrap();
        manager.make_move(&id, 0, 1).unwrap();
        let outcome = manager.make_move(&id, 1, 0).unwrap();

        // X X O / X O . / O . .
        assert_eq!(outcome.ai_move, Some(Coord::new(2, 0)));
        assert_eq!(outcome.game.state().status(), GameStatus::Won(Player::O));
        assert_eq!(
            manager.scores(&id),
            ScoreBoard {
                player_x: 0,
                player_o: 0,
                computer: 1
            }
        );
    }
}
