//! Win detection for N×N tic-tac-toe.

use crate::types::{Board, Coord, Player, Square};
use tracing::instrument;

/// Every line that can win, in detection order.
///
/// Rows top to bottom, then columns left to right, then the main diagonal,
/// then the anti-diagonal.
pub fn lines(size: usize) -> impl Iterator<Item = Vec<Coord>> {
    let rows = (0..size).map(move |r| (0..size).map(|c| Coord::new(r, c)).collect::<Vec<_>>());
    let cols = (0..size).map(move |c| (0..size).map(|r| Coord::new(r, c)).collect::<Vec<_>>());
    let diag = std::iter::once((0..size).map(|i| Coord::new(i, i)).collect::<Vec<_>>());
    let anti = std::iter::once((0..size).map(|i| Coord::new(i, size - 1 - i)).collect::<Vec<_>>());
    rows.chain(cols).chain(diag).chain(anti)
}

/// Returns the first completed line and its owner.
#[instrument(level = "trace", skip(board), fields(size = board.size()))]
pub fn winning_line(board: &Board) -> Option<(Player, Vec<Coord>)> {
    lines(board.size()).find_map(|line| {
        let Some(Square::Occupied(player)) = board.get(line[0]) else {
            return None;
        };
        line.iter()
            .all(|&coord| board.get(coord) == Some(Square::Occupied(player)))
            .then_some((player, line))
    })
}

/// Checks if there is a winner on the board.
pub fn check_winner(board: &Board) -> Option<Player> {
    winning_line(board).map(|(player, _)| player)
}
