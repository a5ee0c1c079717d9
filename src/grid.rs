//! The N×N cell matrix each side deploys its fleet on.

use core::fmt;

use crate::bitboard::BitBoard;
use crate::common::Coord;
use crate::config::BOARD_SIZE;
use crate::ship::{ship_cells, Orientation, ShipId};

const GRID: usize = BOARD_SIZE as usize;

/// Cell set sized for the game board.
pub type BB = BitBoard<u128, GRID>;

/// Row-major matrix of cells, each empty or owned by one ship.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct Grid {
    cells: [[Option<ShipId>; GRID]; GRID],
}

impl Grid {
    /// An empty grid.
    pub fn new() -> Self {
        Self::default()
    }

    /// Owner of the cell at `coord`; `None` for water or off-board.
    pub fn get(&self, coord: Coord) -> Option<ShipId> {
        if coord.in_bounds() {
            self.cells[coord.y][coord.x]
        } else {
            None
        }
    }

    pub fn is_occupied(&self, coord: Coord) -> bool {
        self.get(coord).is_some()
    }

    /// Whether a ship of `size` fits at `anchor`: every derived cell on the
    /// board and empty. Never mutates.
    pub fn can_place(&self, anchor: Coord, size: usize, orientation: Orientation) -> bool {
        ship_cells(anchor, size, orientation).all(|c| c.in_bounds() && !self.is_occupied(c))
    }

    /// Writes `ship` into the derived cells. Performs no validation; callers
    /// confirm [`Grid::can_place`] first. Off-board cells are skipped.
    pub fn place(&mut self, anchor: Coord, size: usize, ship: ShipId, orientation: Orientation) {
        debug_assert!(self.can_place(anchor, size, orientation));
        for c in ship_cells(anchor, size, orientation) {
            if c.in_bounds() {
                self.cells[c.y][c.x] = Some(ship);
            }
        }
    }

    /// Empties every cell.
    pub fn clear(&mut self) {
        *self = Self::new();
    }

    /// All occupied cells.
    pub fn occupancy(&self) -> BB {
        self.mask_where(|cell| cell.is_some())
    }

    /// Number of occupied cells.
    pub fn occupied_count(&self) -> usize {
        self.occupancy().count_ones()
    }

    /// Cells owned by `ship`.
    pub fn ship_mask(&self, ship: ShipId) -> BB {
        self.mask_where(|cell| cell == Some(ship))
    }

    /// Distinct ships present on the grid, in id order.
    pub fn ships(&self) -> impl Iterator<Item = ShipId> {
        let mut seen = [false; u8::MAX as usize + 1];
        for id in self.cells.iter().flatten().flatten() {
            seen[id.index()] = true;
        }
        (0..=u8::MAX).filter(move |&i| seen[i as usize]).map(ShipId)
    }

    fn mask_where(&self, pred: impl Fn(Option<ShipId>) -> bool) -> BB {
        Coord::all()
            .filter(|c| pred(self.cells[c.y][c.x]))
            .collect()
    }
}

impl fmt::Debug for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Grid {{")?;
        for row in self.cells.iter() {
            write!(f, "  ")?;
            for cell in row.iter() {
                match cell {
                    Some(id) => write!(f, "{} ", id.0)?,
                    None => write!(f, ". ")?,
                }
            }
            writeln!(f)?;
        }
        write!(f, "}}")
    }
}
