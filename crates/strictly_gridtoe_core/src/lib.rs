//! Pure N×N tic-tac-toe game logic and computer opponent.
//!
//! # Architecture
//!
//! - **Types**: [`Board`], [`Player`], [`Square`], [`Coord`]
//! - **Rules**: win and draw detection over any grid size
//! - **Game**: the [`GameState`] machine, mutated only by [`GameState::apply_move`]
//! - **Opponent**: difficulty-tiered move selection, including minimax search
//!
//! # Example
//!
//! ```
//! use strictly_gridtoe_core::{Difficulty, GameState, Opponent, Player};
//!
//! let mut state = GameState::new(3).unwrap();
//! state.apply_move(1, 1).unwrap();
//!
//! let opponent = Opponent::new(Difficulty::Hard, Player::O);
//! let reply = opponent.select_move(&state).unwrap();
//! state.apply_move(reply.row, reply.col).unwrap();
//! assert_eq!(state.current_player(), Player::X);
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod game;
mod opponent;
pub mod rules;
mod types;

pub use game::{GameState, GameStatus, MoveError, StateError};
pub use opponent::search::{DEFAULT_MAX_DEPTH, Search, SearchConfig};
pub use opponent::{Difficulty, Opponent, heuristic};
pub use types::{Board, Coord, GridSizeError, Player, Square};
