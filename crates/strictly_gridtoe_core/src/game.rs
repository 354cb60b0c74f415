//! Game state machine for N×N tic-tac-toe.

use crate::rules;
use crate::types::{Board, Coord, GridSizeError, Player, Square};
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};

/// Current status of the game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameStatus {
    /// Game is ongoing.
    InProgress,
    /// Game ended in a win.
    Won(Player),
    /// Board filled with no completed line.
    Tied,
}

/// Reasons a move is rejected. A rejected move leaves the state untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Error)]
pub enum MoveError {
    /// The game already reached a terminal status.
    #[display("Game is already over")]
    GameOver,
    /// Coordinate outside the grid.
    #[display("Cell ({row}, {col}) is outside the {size}x{size} grid")]
    OutOfBounds {
        /// Requested row.
        row: usize,
        /// Requested column.
        col: usize,
        /// Grid side length.
        size: usize,
    },
    /// Target cell already holds a mark.
    #[display("Cell ({row}, {col}) is already occupied")]
    CellOccupied {
        /// Requested row.
        row: usize,
        /// Requested column.
        col: usize,
    },
}

/// A deserialized game state that no sequence of moves produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Error)]
pub enum StateError {
    /// Status or winning line disagrees with the board.
    #[display("status does not match the board")]
    StatusMismatch,
    /// X must have as many marks as O, or one more.
    #[display("mark counts cannot arise from alternating turns")]
    MarkCounts,
    /// The player to move disagrees with the mark counts.
    #[display("wrong player to move")]
    WrongTurn,
}

/// Complete game state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "GameStateRepr")]
pub struct GameState {
    /// The board.
    board: Board,
    /// Player to move next. Meaningless once terminal.
    current_player: Player,
    /// Game status.
    status: GameStatus,
    /// The completed line, present only when won.
    winning_line: Option<Vec<Coord>>,
}

#[derive(Deserialize)]
struct GameStateRepr {
    board: Board,
    current_player: Player,
    status: GameStatus,
    winning_line: Option<Vec<Coord>>,
}

impl TryFrom<GameStateRepr> for GameState {
    type Error = StateError;

    fn try_from(repr: GameStateRepr) -> Result<Self, Self::Error> {
        let (status, winning_line) = match rules::winning_line(&repr.board) {
            Some((winner, line)) => (GameStatus::Won(winner), Some(line)),
            None if rules::is_full(&repr.board) => (GameStatus::Tied, None),
            None => (GameStatus::InProgress, None),
        };
        if repr.status != status || repr.winning_line != winning_line {
            return Err(StateError::StatusMismatch);
        }

        let count = |player| {
            repr.board
                .squares()
                .iter()
                .filter(|sq| **sq == Square::Occupied(player))
                .count()
        };
        let (xs, os) = (count(Player::X), count(Player::O));
        let to_move = match xs.checked_sub(os) {
            Some(0) => Player::X,
            Some(1) => Player::O,
            _ => return Err(StateError::MarkCounts),
        };
        if status == GameStatus::InProgress && repr.current_player != to_move {
            return Err(StateError::WrongTurn);
        }

        Ok(Self {
            board: repr.board,
            current_player: repr.current_player,
            status,
            winning_line,
        })
    }
}

impl GameState {
    /// Creates an empty game on a `size`×`size` grid with X to move.
    #[instrument]
    pub fn new(size: usize) -> Result<Self, GridSizeError> {
        let board = Board::new(size)?;
        debug!(size, "Created game state");
        Ok(Self {
            board,
            current_player: Player::X,
            status: GameStatus::InProgress,
            winning_line: None,
        })
    }

    /// Returns the board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Returns the grid side length.
    pub fn size(&self) -> usize {
        self.board.size()
    }

    /// Returns the current player.
    pub fn current_player(&self) -> Player {
        self.current_player
    }

    /// Returns the game status.
    pub fn status(&self) -> GameStatus {
        self.status
    }

    /// Returns the winning line, if the game was won.
    pub fn winning_line(&self) -> Option<&[Coord]> {
        self.winning_line.as_deref()
    }

    /// True once the game is won or tied.
    pub fn is_over(&self) -> bool {
        self.status != GameStatus::InProgress
    }

    /// Returns the winner, if any.
    pub fn winner(&self) -> Option<Player> {
        match self.status {
            GameStatus::Won(player) => Some(player),
            GameStatus::InProgress | GameStatus::Tied => None,
        }
    }

    /// True iff no empty cell remains.
    pub fn is_full(&self) -> bool {
        rules::is_full(&self.board)
    }

    /// Empty cells in row-major order.
    pub fn empty_cells(&self) -> Vec<Coord> {
        self.board.empty_cells()
    }

    /// Places the current player's mark at (`row`, `col`).
    ///
    /// # Errors
    ///
    /// Checked in order: [`MoveError::GameOver`], [`MoveError::OutOfBounds`],
    /// [`MoveError::CellOccupied`]. On error nothing is mutated.
    #[instrument(skip(self), fields(player = %self.current_player))]
    pub fn apply_move(&mut self, row: usize, col: usize) -> Result<(), MoveError> {
        let player = self.current_player;
        self.place_mark(Coord::new(row, col), player)?;

        match self.status {
            GameStatus::Won(winner) => {
                info!(%winner, line = ?self.winning_line, "Game won");
                debug!(board = %self.board.display(), "Final board");
            }
            GameStatus::Tied => info!("Game tied"),
            GameStatus::InProgress => debug!(next = %self.current_player, "Move applied"),
        }
        Ok(())
    }

    /// Places `player`'s mark regardless of whose turn it is.
    ///
    /// Used by the opponent to probe hypothetical boards on clones. Updates
    /// status and winning line exactly like [`GameState::apply_move`], and
    /// hands the turn to `player`'s opponent when the game continues.
    pub(crate) fn place_mark(&mut self, coord: Coord, player: Player) -> Result<(), MoveError> {
        let Coord { row, col } = coord;
        if self.is_over() {
            warn!(row, col, "Move rejected: game over");
            return Err(MoveError::GameOver);
        }
        if !self.board.contains(coord) {
            warn!(row, col, size = self.size(), "Move rejected: out of bounds");
            return Err(MoveError::OutOfBounds {
                row,
                col,
                size: self.size(),
            });
        }
        if !self.board.is_empty(coord) {
            warn!(row, col, "Move rejected: cell occupied");
            return Err(MoveError::CellOccupied { row, col });
        }

        self.board.set(coord, Square::Occupied(player));
        self.update_status(player);
        Ok(())
    }

    /// Updates status after `player` moved.
    fn update_status(&mut self, player: Player) {
        if let Some((winner, line)) = rules::winning_line(&self.board) {
            self.status = GameStatus::Won(winner);
            self.winning_line = Some(line);
        } else if self.is_full() {
            self.status = GameStatus::Tied;
        } else {
            self.current_player = player.opponent();
        }
    }
}
