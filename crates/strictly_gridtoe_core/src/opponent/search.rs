//! Depth-limited minimax with alpha-beta pruning.

use crate::game::{GameState, GameStatus};
use crate::types::{Coord, Player};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, trace};

/// Default search horizon in plies below each root candidate.
pub const DEFAULT_MAX_DEPTH: usize = 6;

/// Score of an immediate win; shrinks by one per ply of delay.
const WIN_SCORE: i32 = 10;

/// Tunables for the minimax search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Nodes deeper than this score zero without further expansion.
    pub max_depth: usize,
    /// Stop visiting siblings once the window closes.
    pub pruning: bool,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            pruning: true,
        }
    }
}

impl SearchConfig {
    /// Config with the given depth ceiling and pruning enabled.
    pub fn with_max_depth(max_depth: usize) -> Self {
        Self {
            max_depth,
            ..Self::default()
        }
    }
}

/// One minimax search from `own`'s point of view.
#[derive(Debug)]
pub struct Search {
    own: Player,
    config: SearchConfig,
    nodes: u64,
}

impl Search {
    /// Creates a search maximizing for `own`.
    pub fn new(own: Player, config: SearchConfig) -> Self {
        Self {
            own,
            config,
            nodes: 0,
        }
    }

    /// Nodes evaluated so far.
    pub fn nodes(&self) -> u64 {
        self.nodes
    }

    /// Picks the root move with the highest minimax score.
    ///
    /// Candidates are tried in row-major order; the first one reaching the
    /// best score is kept. Each candidate is searched with a fresh window,
    /// so its score is exact and pruning never changes the choice.
    #[instrument(skip(self, state), fields(own = %self.own, depth = self.config.max_depth))]
    pub fn best_move(&mut self, state: &GameState) -> Option<Coord> {
        let mut best: Option<(Coord, i32)> = None;

        for coord in state.empty_cells() {
            let mut child = state.clone();
            if child.place_mark(coord, self.own).is_err() {
                continue;
            }
            let score = self.minimax(&child, 0, false, i32::MIN, i32::MAX);
            trace!(%coord, score, "Scored root candidate");

            if best.is_none_or(|(_, best_score)| score > best_score) {
                best = Some((coord, score));
            }
        }

        debug!(choice = ?best, nodes = self.nodes, "Search finished");
        best.map(|(coord, _)| coord)
    }

    /// Scores `state` where `maximizing` is true when `own` is to move.
    fn minimax(
        &mut self,
        state: &GameState,
        depth: usize,
        maximizing: bool,
        mut alpha: i32,
        mut beta: i32,
    ) -> i32 {
        self.nodes += 1;
        let depth_score = depth as i32;

        match state.status() {
            GameStatus::Won(winner) if winner == self.own => return WIN_SCORE - depth_score,
            GameStatus::Won(_) => return depth_score - WIN_SCORE,
            GameStatus::Tied => return 0,
            GameStatus::InProgress => {}
        }
        if depth > self.config.max_depth {
            return 0;
        }

        let mover = if maximizing { self.own } else { self.own.opponent() };
        let mut best = if maximizing { i32::MIN } else { i32::MAX };

        for coord in state.empty_cells() {
            let mut child = state.clone();
            if child.place_mark(coord, mover).is_err() {
                continue;
            }
            let score = self.minimax(&child, depth + 1, !maximizing, alpha, beta);

            if maximizing {
                best = best.max(score);
                alpha = alpha.max(score);
            } else {
                best = best.min(score);
                beta = beta.min(score);
            }

            if self.config.pruning && beta <= alpha {
                break;
            }
        }

        best
    }
}
