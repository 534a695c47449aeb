//! Core board state: players, cells, and the square grid.

use serde::{Deserialize, Serialize};

/// A player in the game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Player {
    /// Black stones (moves first).
    Black,
    /// White stones (moves second).
    White,
}

impl Player {
    /// Returns the opposing player.
    pub fn opponent(self) -> Self {
        match self {
            Player::Black => Player::White,
            Player::White => Player::Black,
        }
    }
}

impl std::fmt::Display for Player {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Player::Black => write!(f, "Black"),
            Player::White => write!(f, "White"),
        }
    }
}

/// A single intersection on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Cell {
    /// No stone.
    Empty,
    /// A stone of the given color.
    Stone(Player),
}

/// Errors that can occur when placing a stone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaceError {
    /// Coordinates fall outside the board.
    OutOfBounds {
        /// Requested row.
        row: usize,
        /// Requested column.
        col: usize,
        /// Board side length.
        size: usize,
    },
    /// The target intersection already holds a stone.
    Occupied {
        /// Requested row.
        row: usize,
        /// Requested column.
        col: usize,
    },
}

impl std::fmt::Display for PlaceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PlaceError::OutOfBounds { row, col, size } => {
                write!(f, "({row}, {col}) is outside the {size}x{size} board")
            }
            PlaceError::Occupied { row, col } => {
                write!(f, "({row}, {col}) is already occupied")
            }
        }
    }
}

impl std::error::Error for PlaceError {}

/// Square grid of intersections, one [`Cell`] each.
///
/// Boards have value semantics: [`Board::place`] returns a fresh board and
/// leaves the receiver untouched, so historical snapshots never alias live
/// state. Rule legality beyond bounds and occupancy (captures, ko, suicide)
/// is the rules service's job; the local board is a provisional view that
/// the authoritative response may overwrite.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    size: usize,
    cells: Vec<Cell>,
}

impl Board {
    /// Creates an empty board with the given side length.
    ///
    /// Callers must pass `size >= 2`; a 1x1 board has no defined geometry
    /// and is rejected before any board is built (see `GameSession::start_game`).
    pub fn new(size: usize) -> Self {
        Self {
            size,
            cells: vec![Cell::Empty; size * size],
        }
    }

    /// Side length of the board.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Gets the cell at `(row, col)`, or `None` when out of bounds.
    pub fn get(&self, row: usize, col: usize) -> Option<Cell> {
        if row >= self.size || col >= self.size {
            return None;
        }
        self.cells.get(row * self.size + col).copied()
    }

    /// Checks whether the intersection is empty.
    pub fn is_empty(&self, row: usize, col: usize) -> bool {
        matches!(self.get(row, col), Some(Cell::Empty))
    }

    /// Places a stone, returning the resulting board.
    ///
    /// # Errors
    ///
    /// Returns [`PlaceError::OutOfBounds`] if either coordinate is not in
    /// `[0, size)`, or [`PlaceError::Occupied`] if the intersection already
    /// holds a stone. The receiver is never modified.
    pub fn place(&self, row: usize, col: usize, player: Player) -> Result<Board, PlaceError> {
        if row >= self.size || col >= self.size {
            return Err(PlaceError::OutOfBounds {
                row,
                col,
                size: self.size,
            });
        }
        match self.cells[row * self.size + col] {
            Cell::Empty => {
                let mut next = self.clone();
                next.cells[row * self.size + col] = Cell::Stone(player);
                Ok(next)
            }
            Cell::Stone(_) => Err(PlaceError::Occupied { row, col }),
        }
    }

    /// Overwrites a cell without an occupancy check.
    ///
    /// Used by replay reconstruction as the last-write-wins fallback for
    /// malformed records. Out-of-bounds coordinates are ignored.
    pub(crate) fn set(&mut self, row: usize, col: usize, cell: Cell) {
        if row < self.size && col < self.size {
            self.cells[row * self.size + col] = cell;
        }
    }

    /// Number of stones on the board.
    pub fn stone_count(&self) -> usize {
        self.cells
            .iter()
            .filter(|c| matches!(c, Cell::Stone(_)))
            .count()
    }
}
