//! Greedy one-ply heuristics used by the medium opponent.

use crate::game::GameState;
use crate::types::{Coord, Player};
use rand::Rng;
use rand::seq::IndexedRandom;

/// First cell, in the given order, where `player` would complete a line.
///
/// Each probe places the mark on a clone and checks for a win only.
pub fn winning_cell(state: &GameState, player: Player, cells: &[Coord]) -> Option<Coord> {
    cells.iter().copied().find(|&coord| {
        let mut probe = state.clone();
        probe.place_mark(coord, player).is_ok() && probe.winner() == Some(player)
    })
}

/// Uniformly random cell.
pub fn random_cell<R: Rng + ?Sized>(cells: &[Coord], rng: &mut R) -> Option<Coord> {
    cells.choose(rng).copied()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_winning_cell_first_in_order() {
        let mut state = GameState::new(3).unwrap();
        // X X . / X O O / . . O
        for (row, col) in [(0, 0), (1, 1), (0, 1), (1, 2), (1, 0), (2, 2)] {
            state.apply_move(row, col).unwrap();
        }
        let cells = state.empty_cells();
        // X wins at (0,2) and (2,0); row-major picks (0,2).
        assert_eq!(winning_cell(&state, Player::X, &cells), Some(Coord::new(0, 2)));
        // O completes column 2 at (0,2) but nothing else.
        assert_eq!(winning_cell(&state, Player::O, &cells[1..]), None);
    }

    #[test]
    fn test_random_cell_empty() {
        let mut rng = rand::rng();
        assert_eq!(random_cell(&[], &mut rng), None);
    }
}
