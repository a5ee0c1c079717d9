use broadside::{
    can_place, random_fleet, random_placement, Coord, DeployError, DeploymentEngine, Grid,
    Orientation, ShipId, NUM_SHIPS, SHIPS, TOTAL_SHIP_CELLS,
};
use rand::rngs::SmallRng;
use rand::{RngCore, SeedableRng};

/// Always yields all-ones words, so every sampled anchor lands on the
/// bottom-right cell, where no ship of two or more cells fits.
struct CornerRng;

impl RngCore for CornerRng {
    fn next_u32(&mut self) -> u32 {
        u32::MAX
    }

    fn next_u64(&mut self) -> u64 {
        u64::MAX
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        dest.fill(0xff);
    }
}

#[test]
fn test_manual_placement_marks_ship() {
    let mut engine = DeploymentEngine::new();
    let placement = engine
        .attempt_placement(0, Coord::new(0, 0), Orientation::Horizontal)
        .unwrap();

    assert_eq!(placement.ship, ShipId(0));
    assert!(engine.fleet_status()[0]);
    assert!(!engine.is_complete());
    for x in 0..SHIPS[0].length() {
        assert_eq!(engine.grid().get(Coord::new(x, 0)), Some(ShipId(0)));
    }
}

#[test]
fn test_already_placed_leaves_grid_identical() {
    let mut engine = DeploymentEngine::new();
    engine
        .attempt_placement(4, Coord::new(3, 3), Orientation::Vertical)
        .unwrap();
    let before = *engine.grid();

    assert_eq!(
        engine.attempt_placement(4, Coord::new(7, 7), Orientation::Horizontal),
        Err(DeployError::AlreadyPlaced)
    );
    assert_eq!(*engine.grid(), before);
}

#[test]
fn test_invalid_placement_rejected_without_mutation() {
    let mut engine = DeploymentEngine::new();
    engine
        .attempt_placement(1, Coord::new(2, 2), Orientation::Horizontal)
        .unwrap();
    let before = *engine.grid();

    // overlaps the battleship
    assert_eq!(
        engine.attempt_placement(2, Coord::new(3, 0), Orientation::Vertical),
        Err(DeployError::InvalidPlacement)
    );
    // runs off the right edge
    assert_eq!(
        engine.attempt_placement(2, Coord::new(8, 0), Orientation::Horizontal),
        Err(DeployError::InvalidPlacement)
    );
    assert_eq!(*engine.grid(), before);
    assert!(!engine.fleet_status()[2]);
}

#[test]
fn test_unknown_ship_rejected() {
    let mut engine = DeploymentEngine::new();
    assert_eq!(
        engine.attempt_placement(NUM_SHIPS, Coord::new(0, 0), Orientation::Horizontal),
        Err(DeployError::UnknownShip(NUM_SHIPS))
    );
    assert_eq!(engine.grid().occupied_count(), 0);
}

#[test]
fn test_rotate_changes_default_orientation() {
    let mut engine = DeploymentEngine::new();
    assert_eq!(engine.orientation(), Orientation::Horizontal);
    assert_eq!(engine.rotate(), Orientation::Vertical);

    let p = engine.place_ship(0, Coord::new(0, 0)).unwrap();
    assert_eq!(p.orientation, Orientation::Vertical);
    assert_eq!(engine.grid().get(Coord::new(0, 4)), Some(ShipId(0)));
    assert_eq!(engine.grid().get(Coord::new(1, 0)), None);
}

#[test]
fn test_finish_requires_full_fleet() {
    let mut engine = DeploymentEngine::new();
    assert_eq!(engine.finish(), Err(DeployError::Incomplete));

    for i in 0..NUM_SHIPS {
        engine
            .attempt_placement(i, Coord::new(0, i * 2), Orientation::Horizontal)
            .unwrap();
    }
    assert!(engine.is_complete());
    let grid = engine.finish().unwrap();
    assert_eq!(grid.occupied_count(), TOTAL_SHIP_CELLS);

    // the handed-off grid is a copy
    engine.reset();
    assert_eq!(engine.grid().occupied_count(), 0);
    assert_eq!(grid.occupied_count(), TOTAL_SHIP_CELLS);
    assert!(!engine.is_complete());
}

#[test]
fn test_auto_place_all_replaces_manual_layout() {
    let mut rng = SmallRng::seed_from_u64(42);
    let mut engine = DeploymentEngine::new();
    engine
        .attempt_placement(0, Coord::new(0, 0), Orientation::Horizontal)
        .unwrap();

    let placed = engine.auto_place_all(&mut rng);
    assert_eq!(placed, NUM_SHIPS);
    assert!(engine.is_complete());
    assert_eq!(engine.grid().occupied_count(), TOTAL_SHIP_CELLS);
}

#[test]
fn test_reproducible_auto_placement() {
    let mut rng1 = SmallRng::seed_from_u64(7);
    let mut rng2 = SmallRng::seed_from_u64(7);
    let (g1, s1) = random_fleet(&mut rng1);
    let (g2, s2) = random_fleet(&mut rng2);
    assert_eq!(g1, g2);
    assert_eq!(s1, s2);
}

#[test]
fn test_can_place_free_function_matches_grid() {
    let mut engine = DeploymentEngine::new();
    engine
        .attempt_placement(3, Coord::new(5, 5), Orientation::Vertical)
        .unwrap();
    let grid = engine.grid();
    assert!(!can_place(grid, Coord::new(4, 6), 3, Orientation::Horizontal));
    assert!(can_place(grid, Coord::new(6, 6), 3, Orientation::Horizontal));
}

#[test]
fn test_random_placement_gives_up_on_full_checkerboard() {
    // every horizontal or vertical pair of cells touches an occupied square
    let mut grid = Grid::new();
    for c in Coord::all().filter(|c| (c.x + c.y) % 2 == 0) {
        grid.place(c, 1, ShipId(9), Orientation::Horizontal);
    }
    let before = grid;
    let mut rng = SmallRng::seed_from_u64(3);

    assert_eq!(random_placement(&mut grid, &mut rng, 4), None);
    assert_eq!(grid, before);
    assert_eq!(grid.ship_mask(ShipId(4)).count_ones(), 0);
}

#[test]
fn test_exhausted_auto_placement_leaves_fleet_incomplete() {
    let mut engine = DeploymentEngine::new();
    let placed = engine.auto_place_all(&mut CornerRng);

    assert!(placed < NUM_SHIPS);
    assert_eq!(placed, 0);
    assert!(!engine.is_complete());
    assert!(engine.fleet_status().iter().all(|p| !*p));
    assert_eq!(engine.grid().occupied_count(), 0);
    assert_eq!(engine.finish(), Err(DeployError::Incomplete));
}
