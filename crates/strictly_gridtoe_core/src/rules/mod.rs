//! Game rules for N×N tic-tac-toe.
//!
//! Pure functions over a [`Board`](crate::Board), kept apart from the state
//! machine so the opponent can probe hypothetical boards with the same rules.

pub mod draw;
pub mod win;

pub use draw::{is_draw, is_full};
pub use win::{check_winner, lines, winning_line};
