//! Deployment phase: committing the fleet to a grid, by hand or at random.

use log::{debug, warn};
use rand::Rng;

use crate::common::{Coord, DeployError};
use crate::config::{BOARD_SIZE, NUM_SHIPS, PLACEMENT_ATTEMPTS, SHIPS};
use crate::grid::Grid;
use crate::ship::{Orientation, Placement, ShipId};

const GRID: usize = BOARD_SIZE as usize;

/// Per-ship placed flags, in fleet order.
pub type FleetStatus = [bool; NUM_SHIPS];

/// Pure predicate shared by interactive validation and random retries.
pub fn can_place(grid: &Grid, anchor: Coord, size: usize, orientation: Orientation) -> bool {
    grid.can_place(anchor, size, orientation)
}

/// Writes `ship` into `grid` without validation.
pub fn place(grid: &mut Grid, anchor: Coord, size: usize, ship: ShipId, orientation: Orientation) {
    grid.place(anchor, size, ship, orientation)
}

/// Tries up to [`PLACEMENT_ATTEMPTS`] uniformly random anchors and
/// orientations for one fleet ship, committing the first that fits.
/// Returns `None` when the budget runs out; the grid is then untouched.
pub fn random_placement<R: Rng + ?Sized>(
    grid: &mut Grid,
    rng: &mut R,
    ship_index: usize,
) -> Option<Placement> {
    let def = SHIPS.get(ship_index)?;
    let ship = ShipId(ship_index as u8);
    for _ in 0..PLACEMENT_ATTEMPTS {
        let anchor = Coord::new(rng.random_range(0..GRID), rng.random_range(0..GRID));
        let orientation = Orientation::random(rng);
        if can_place(grid, anchor, def.length(), orientation) {
            place(grid, anchor, def.length(), ship, orientation);
            return Some(Placement {
                ship,
                anchor,
                orientation,
            });
        }
    }
    warn!(
        "gave up placing {} after {} attempts",
        def.name(),
        PLACEMENT_ATTEMPTS
    );
    None
}

/// Lays the whole fleet on a fresh grid in fleet order. Ships whose retry
/// budget runs out are left off and reported `false` in the status.
pub fn random_fleet<R: Rng + ?Sized>(rng: &mut R) -> (Grid, FleetStatus) {
    let mut grid = Grid::new();
    let mut status = [false; NUM_SHIPS];
    for (i, placed) in status.iter_mut().enumerate() {
        *placed = random_placement(&mut grid, rng, i).is_some();
    }
    (grid, status)
}

/// Mutable deployment state for one side.
#[derive(Debug, Clone, Default)]
pub struct DeploymentEngine {
    grid: Grid,
    placed: FleetStatus,
    orientation: Orientation,
}

impl DeploymentEngine {
    /// Empty grid, no ships placed, horizontal default orientation.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn fleet_status(&self) -> &FleetStatus {
        &self.placed
    }

    /// Default orientation used by [`DeploymentEngine::place_ship`].
    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    pub fn set_orientation(&mut self, orientation: Orientation) {
        self.orientation = orientation;
    }

    /// Flips the default orientation and returns the new one.
    pub fn rotate(&mut self) -> Orientation {
        self.orientation = self.orientation.rotated();
        self.orientation
    }

    /// Commits ship `ship_index` at `anchor`. Rejections leave the grid and
    /// fleet status as they were.
    pub fn attempt_placement(
        &mut self,
        ship_index: usize,
        anchor: Coord,
        orientation: Orientation,
    ) -> Result<Placement, DeployError> {
        let def = SHIPS
            .get(ship_index)
            .ok_or(DeployError::UnknownShip(ship_index))?;
        if self.placed[ship_index] {
            return Err(DeployError::AlreadyPlaced);
        }
        if !can_place(&self.grid, anchor, def.length(), orientation) {
            debug!("rejected {} at {} ({})", def.name(), anchor, orientation);
            return Err(DeployError::InvalidPlacement);
        }
        let ship = ShipId(ship_index as u8);
        place(&mut self.grid, anchor, def.length(), ship, orientation);
        self.placed[ship_index] = true;
        debug!("placed {} at {} ({})", def.name(), anchor, orientation);
        Ok(Placement {
            ship,
            anchor,
            orientation,
        })
    }

    /// [`DeploymentEngine::attempt_placement`] with the current default
    /// orientation.
    pub fn place_ship(&mut self, ship_index: usize, anchor: Coord) -> Result<Placement, DeployError> {
        self.attempt_placement(ship_index, anchor, self.orientation)
    }

    /// Clears the grid and every placed flag. The orientation is kept.
    pub fn reset(&mut self) {
        self.grid.clear();
        self.placed = [false; NUM_SHIPS];
    }

    /// Discards the current layout and places the whole fleet at random.
    /// Returns the number of ships placed; fewer than [`NUM_SHIPS`] means
    /// the retry budget ran out for some ship.
    pub fn auto_place_all<R: Rng + ?Sized>(&mut self, rng: &mut R) -> usize {
        let (grid, placed) = random_fleet(rng);
        self.grid = grid;
        self.placed = placed;
        placed.iter().filter(|p| **p).count()
    }

    pub fn is_complete(&self) -> bool {
        self.placed.iter().all(|p| *p)
    }

    /// Copy of the committed grid for the battle phase.
    pub fn finish(&self) -> Result<Grid, DeployError> {
        if self.is_complete() {
            Ok(self.grid)
        } else {
            Err(DeployError::Incomplete)
        }
    }
}
