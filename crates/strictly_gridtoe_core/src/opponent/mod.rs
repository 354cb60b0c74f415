//! Computer opponent with three difficulty tiers.
//!
//! - **Easy** plays a uniformly random empty cell.
//! - **Medium** wins when it can, blocks when it must, otherwise plays randomly.
//! - **Hard** runs a depth-limited minimax search with alpha-beta pruning.
//!
//! The opponent holds no board. Every decision reads the live
//! [`GameState`] and only ever mutates clones of it.

pub mod heuristic;
pub mod search;

use crate::game::GameState;
use crate::types::{Coord, Player};
use rand::Rng;
use serde::{Deserialize, Serialize};
use search::{Search, SearchConfig};
use tracing::{debug, instrument};

/// Opponent strength.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Difficulty {
    /// Random play.
    Easy,
    /// Win, else block, else random.
    #[default]
    Medium,
    /// Minimax search.
    Hard,
}

/// A computer player.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Opponent {
    difficulty: Difficulty,
    own_mark: Player,
    search: SearchConfig,
}

impl Opponent {
    /// Creates an opponent playing `own_mark` with the default search config.
    pub fn new(difficulty: Difficulty, own_mark: Player) -> Self {
        Self {
            difficulty,
            own_mark,
            search: SearchConfig::default(),
        }
    }

    /// Replaces the search config used at [`Difficulty::Hard`].
    pub fn with_search(mut self, search: SearchConfig) -> Self {
        self.search = search;
        self
    }

    /// Returns the difficulty.
    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    /// The mark this opponent plays.
    pub fn own_mark(&self) -> Player {
        self.own_mark
    }

    /// The mark of the side it plays against.
    pub fn opponent_mark(&self) -> Player {
        self.own_mark.opponent()
    }

    /// Returns the search config.
    pub fn search_config(&self) -> SearchConfig {
        self.search
    }

    /// Chooses a move using the thread-local RNG.
    ///
    /// Returns `None` when the game is over or the board has no empty cell.
    pub fn select_move(&self, state: &GameState) -> Option<Coord> {
        self.select_move_with(state, &mut rand::rng())
    }

    /// Chooses a move drawing randomness from `rng`.
    #[instrument(skip(self, state, rng), fields(difficulty = %self.difficulty, own = %self.own_mark))]
    pub fn select_move_with<R: Rng + ?Sized>(&self, state: &GameState, rng: &mut R) -> Option<Coord> {
        let cells = state.empty_cells();
        if state.is_over() || cells.is_empty() {
            debug!(status = ?state.status(), "No move available");
            return None;
        }

        let choice = match self.difficulty {
            Difficulty::Easy => heuristic::random_cell(&cells, rng),
            Difficulty::Medium => self.medium_move(state, &cells, rng),
            Difficulty::Hard => self.hard_move(state, &cells),
        };
        debug!(?choice, "Opponent chose move");
        choice
    }

    fn medium_move<R: Rng + ?Sized>(
        &self,
        state: &GameState,
        cells: &[Coord],
        rng: &mut R,
    ) -> Option<Coord> {
        heuristic::winning_cell(state, self.own_mark, cells)
            .or_else(|| heuristic::winning_cell(state, self.opponent_mark(), cells))
            .or_else(|| heuristic::random_cell(cells, rng))
    }

    fn hard_move(&self, state: &GameState, cells: &[Coord]) -> Option<Coord> {
        let size = state.size();
        if cells.len() == size * size {
            let opening = if size % 2 == 1 {
                Coord::new(size / 2, size / 2)
            } else {
                Coord::new(0, 0)
            };
            debug!(%opening, "Playing fixed opening");
            return Some(opening);
        }

        Search::new(self.own_mark, self.search).best_move(state)
    }
}
