//! Common types for the engine: coordinates, shot outcomes and errors.

use core::fmt;

use crate::config::BOARD_SIZE;

const GRID: usize = BOARD_SIZE as usize;

/// A cell position: `x` is the column, `y` the row, both zero-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct Coord {
    pub x: usize,
    pub y: usize,
}

impl Coord {
    pub const fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }

    /// Returns `true` when the coordinate lies on the board.
    pub fn in_bounds(&self) -> bool {
        self.x < GRID && self.y < GRID
    }

    /// Row-major index into an N×N board, if on the board.
    pub fn index(&self) -> Option<usize> {
        self.in_bounds().then(|| self.y * GRID + self.x)
    }

    /// Inverse of [`Coord::index`].
    pub fn from_index(idx: usize) -> Self {
        Self::new(idx % GRID, idx / GRID)
    }

    /// Every coordinate on the board, row by row.
    pub fn all() -> impl Iterator<Item = Coord> {
        (0..GRID * GRID).map(Coord::from_index)
    }
}

impl From<(usize, usize)> for Coord {
    fn from((x, y): (usize, usize)) -> Self {
        Self::new(x, y)
    }
}

/// Column letter followed by the one-based row, e.g. `A1` or `J10`.
impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match u8::try_from(self.x) {
            Ok(col) if col < 26 => write!(f, "{}{}", (b'A' + col) as char, self.y + 1),
            _ => write!(f, "({}, {})", self.x, self.y),
        }
    }
}

/// Outcome of a single shot, fixed when it is fired.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum ShotOutcome {
    /// The target cell holds a ship segment.
    Hit,
    /// The target cell is open water.
    Miss,
}

impl ShotOutcome {
    pub fn is_hit(&self) -> bool {
        matches!(self, ShotOutcome::Hit)
    }
}

/// Rejections raised during deployment. None of them mutate the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeployError {
    /// Ship index is not part of the fleet.
    UnknownShip(usize),
    /// The ship was already committed to the grid.
    AlreadyPlaced,
    /// The derived cells leave the board or overlap another ship.
    InvalidPlacement,
    /// Deployment cannot be finished while ships remain unplaced.
    Incomplete,
}

impl fmt::Display for DeployError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DeployError::UnknownShip(i) => write!(f, "No ship with index {} in the fleet", i),
            DeployError::AlreadyPlaced => write!(f, "Ship is already placed on the board"),
            DeployError::InvalidPlacement => write!(f, "Cannot place ship here"),
            DeployError::Incomplete => write!(f, "Not every ship has been placed"),
        }
    }
}

/// Rejections raised when firing. A rejected shot changes nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShotError {
    /// The battle already has a winner.
    GameOver,
    /// The other side holds the turn.
    NotYourTurn,
    /// Target lies off the board.
    OutOfBounds(Coord),
    /// This side already fired at the target.
    DuplicateShot(Coord),
    /// Every cell has been fired at.
    NoTargetsLeft,
}

impl fmt::Display for ShotError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShotError::GameOver => write!(f, "The battle is already decided"),
            ShotError::NotYourTurn => write!(f, "It is not this side's turn"),
            ShotError::OutOfBounds(c) => write!(f, "Target {} is off the board", c),
            ShotError::DuplicateShot(c) => write!(f, "Already fired at {}", c),
            ShotError::NoTargetsLeft => write!(f, "No cells left to fire at"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for DeployError {}

#[cfg(feature = "std")]
impl std::error::Error for ShotError {}
