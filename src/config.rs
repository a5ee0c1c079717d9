use crate::ship::ShipType;

pub const BOARD_SIZE: u8 = 10;
pub const NUM_SHIPS: usize = 5;
pub const SHIPS: [ShipType; NUM_SHIPS] = [
    ShipType::new("Carrier", 5),
    ShipType::new("Battleship", 4),
    ShipType::new("Cruiser", 3),
    ShipType::new("Submarine", 3),
    ShipType::new("Destroyer", 2),
];

/// Total number of ship segments used in the standard fleet.
pub const TOTAL_SHIP_CELLS: usize = 5 + 4 + 3 + 3 + 2;

/// Random anchors tried per ship before automatic placement gives up on it.
pub const PLACEMENT_ATTEMPTS: usize = 1000;

/// Pause before each opponent shot in the terminal front end, in milliseconds.
pub const DEFAULT_OPPONENT_DELAY_MS: u64 = 1000;

/// Runtime settings for a game session.
#[cfg(feature = "std")]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Fixed seed for reproducible games; `None` draws from the OS.
    pub seed: Option<u64>,
    /// Pause applied before every opponent shot.
    pub opponent_delay: std::time::Duration,
}

#[cfg(feature = "std")]
impl Default for Settings {
    fn default() -> Self {
        Self {
            seed: None,
            opponent_delay: std::time::Duration::from_millis(DEFAULT_OPPONENT_DELAY_MS),
        }
    }
}

#[cfg(feature = "std")]
impl Settings {
    /// Two independent generators: one for the player's side (deployment),
    /// one owned by the battle engine.
    pub fn rngs(&self) -> (rand::rngs::SmallRng, rand::rngs::SmallRng) {
        use rand::SeedableRng;
        match self.seed {
            Some(s) => (
                rand::rngs::SmallRng::seed_from_u64(s),
                rand::rngs::SmallRng::seed_from_u64(s.wrapping_add(1)),
            ),
            None => {
                let mut seed_rng = rand::rng();
                (
                    rand::rngs::SmallRng::from_rng(&mut seed_rng),
                    rand::rngs::SmallRng::from_rng(&mut seed_rng),
                )
            }
        }
    }
}
