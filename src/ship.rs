//! Ship definitions, identifiers and placement geometry.

use core::fmt;
use rand::Rng;

use crate::common::Coord;
use crate::config::SHIPS;

/// Orientation of a ship on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum Orientation {
    /// Extends toward increasing `x`.
    #[default]
    Horizontal,
    /// Extends toward increasing `y`.
    Vertical,
}

impl Orientation {
    /// The other orientation.
    pub fn rotated(self) -> Self {
        match self {
            Orientation::Horizontal => Orientation::Vertical,
            Orientation::Vertical => Orientation::Horizontal,
        }
    }

    /// Uniformly random orientation.
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        if rng.random() {
            Orientation::Vertical
        } else {
            Orientation::Horizontal
        }
    }
}

impl fmt::Display for Orientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Orientation::Horizontal => write!(f, "Horizontal"),
            Orientation::Vertical => write!(f, "Vertical"),
        }
    }
}

/// Type of ship: name and length.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShipType {
    name: &'static str,
    length: usize,
}

impl ShipType {
    pub const fn new(name: &'static str, length: usize) -> Self {
        Self { name, length }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn length(&self) -> usize {
        self.length
    }
}

/// Identifier written into grid cells: the ship's index in the fleet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct ShipId(pub u8);

impl ShipId {
    pub fn index(self) -> usize {
        self.0 as usize
    }

    /// Fleet definition for this id, if it names a fleet ship.
    pub fn ship_type(self) -> Option<ShipType> {
        SHIPS.get(self.index()).copied()
    }

    /// Fleet name, or `"?"` for ids outside the fleet.
    pub fn name(self) -> &'static str {
        self.ship_type().map_or("?", |t| t.name())
    }
}

/// A committed placement: which ship, where, which way.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct Placement {
    pub ship: ShipId,
    pub anchor: Coord,
    pub orientation: Orientation,
}

/// Cells covered by a ship of `size` laid from `anchor`. Cells may fall off
/// the board; bounds are the grid's business.
pub fn ship_cells(
    anchor: Coord,
    size: usize,
    orientation: Orientation,
) -> impl Iterator<Item = Coord> {
    (0..size).map(move |i| match orientation {
        Orientation::Horizontal => Coord::new(anchor.x.saturating_add(i), anchor.y),
        Orientation::Vertical => Coord::new(anchor.x, anchor.y.saturating_add(i)),
    })
}
