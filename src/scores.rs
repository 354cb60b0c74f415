//! Per-session win tally.

use serde::{Deserialize, Serialize};
use strictly_gridtoe_core::Player;
use tracing::{debug, instrument};

use crate::session::GameMode;

/// Wins counted across the games of one session.
///
/// In single-player mode wins by O are credited to the computer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreBoard {
    /// Wins by X.
    pub player_x: u32,
    /// Wins by O in two-player mode.
    pub player_o: u32,
    /// Wins by the computer opponent.
    pub computer: u32,
}

impl ScoreBoard {
    /// Credits a win to the right bucket for `mode`.
    #[instrument(skip(self))]
    pub fn record_win(&mut self, winner: Player, mode: GameMode) {
        let bucket = match (mode, winner) {
            (_, Player::X) => &mut self.player_x,
            (GameMode::SinglePlayer, Player::O) => &mut self.computer,
            (GameMode::TwoPlayer, Player::O) => &mut self.player_o,
        };
        *bucket += 1;
        debug!(scores = ?self, "Recorded win");
    }

    /// Zeroes every bucket.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
