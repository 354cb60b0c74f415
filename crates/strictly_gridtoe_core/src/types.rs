//! Core domain types for N×N tic-tac-toe.

use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};

/// Player in the game.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display, strum::EnumString,
)]
pub enum Player {
    /// Player X (goes first).
    X,
    /// Player O (goes second).
    O,
}

impl Player {
    /// Returns the opponent player.
    pub fn opponent(self) -> Self {
        match self {
            Player::X => Player::O,
            Player::O => Player::X,
        }
    }
}

/// A square on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Square {
    /// Empty square.
    Empty,
    /// Square occupied by a player.
    Occupied(Player),
}

/// A cell coordinate, zero-based.
///
/// Serializes as a `[row, col]` pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::From)]
#[serde(from = "(usize, usize)", into = "(usize, usize)")]
pub struct Coord {
    /// Row index.
    pub row: usize,
    /// Column index.
    pub col: usize,
}

impl Coord {
    /// Creates a coordinate.
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

impl From<Coord> for (usize, usize) {
    fn from(coord: Coord) -> Self {
        (coord.row, coord.col)
    }
}

impl std::fmt::Display for Coord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// Rejected board dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Error)]
pub enum GridSizeError {
    /// A board needs at least one cell.
    #[display("grid size must be at least 1")]
    Zero,
    /// The cell count does not fit in memory.
    #[display("grid size {size} is too large")]
    TooLarge {
        /// The requested size.
        size: usize,
    },
    /// A deserialized board whose squares do not fill the grid.
    #[display("a {size}x{size} board needs {expected} squares, got {found}")]
    SquareCount {
        /// Side length.
        size: usize,
        /// Squares required by the side length.
        expected: usize,
        /// Squares supplied.
        found: usize,
    },
}

/// Square N×N board.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "BoardRepr")]
pub struct Board {
    /// Side length.
    size: usize,
    /// Squares in row-major order.
    squares: Vec<Square>,
}

#[derive(Deserialize)]
struct BoardRepr {
    size: usize,
    squares: Vec<Square>,
}

impl TryFrom<BoardRepr> for Board {
    type Error = GridSizeError;

    fn try_from(repr: BoardRepr) -> Result<Self, Self::Error> {
        let expected = cell_count(repr.size)?;
        if repr.squares.len() != expected {
            return Err(GridSizeError::SquareCount {
                size: repr.size,
                expected,
                found: repr.squares.len(),
            });
        }
        Ok(Self {
            size: repr.size,
            squares: repr.squares,
        })
    }
}

fn cell_count(size: usize) -> Result<usize, GridSizeError> {
    if size == 0 {
        return Err(GridSizeError::Zero);
    }
    size.checked_mul(size).ok_or(GridSizeError::TooLarge { size })
}

impl Board {
    /// Creates a new empty board of the given side length.
    ///
    /// # Errors
    ///
    /// [`GridSizeError::Zero`] for an empty grid, [`GridSizeError::TooLarge`]
    /// when the cell count overflows or cannot be allocated.
    pub fn new(size: usize) -> Result<Self, GridSizeError> {
        let cells = cell_count(size)?;
        let mut squares = Vec::new();
        squares
            .try_reserve_exact(cells)
            .map_err(|_| GridSizeError::TooLarge { size })?;
        squares.resize(cells, Square::Empty);
        Ok(Self { size, squares })
    }

    /// Returns the side length.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Returns true when the coordinate lies on the board.
    pub fn contains(&self, coord: Coord) -> bool {
        coord.row < self.size && coord.col < self.size
    }

    /// Gets the square at the given coordinate.
    pub fn get(&self, coord: Coord) -> Option<Square> {
        if !self.contains(coord) {
            return None;
        }
        self.squares.get(self.index(coord)).copied()
    }

    /// Sets the square at the given coordinate.
    pub(crate) fn set(&mut self, coord: Coord, square: Square) {
        let idx = self.index(coord);
        self.squares[idx] = square;
    }

    /// Checks if a square is empty. Off-board coordinates are not empty.
    pub fn is_empty(&self, coord: Coord) -> bool {
        matches!(self.get(coord), Some(Square::Empty))
    }

    /// Returns all squares in row-major order.
    pub fn squares(&self) -> &[Square] {
        &self.squares
    }

    /// Iterates over the rows of the board.
    pub fn rows(&self) -> impl Iterator<Item = &[Square]> {
        self.squares.chunks(self.size)
    }

    /// Coordinates of every empty square, in row-major order.
    pub fn empty_cells(&self) -> Vec<Coord> {
        self.squares
            .iter()
            .enumerate()
            .filter(|(_, sq)| **sq == Square::Empty)
            .map(|(idx, _)| Coord::new(idx / self.size, idx % self.size))
            .collect()
    }

    /// Formats the board as a human-readable string.
    pub fn display(&self) -> String {
        let separator = vec!["-"; self.size].join("+");
        self.rows()
            .map(|row| {
                row.iter()
                    .map(|sq| match sq {
                        Square::Empty => ".",
                        Square::Occupied(Player::X) => "X",
                        Square::Occupied(Player::O) => "O",
                    })
                    .collect::<Vec<_>>()
                    .join("|")
            })
            .collect::<Vec<_>>()
            .join(&format!("\n{separator}\n"))
    }

    fn index(&self, coord: Coord) -> usize {
        coord.row * self.size + coord.col
    }
}
