//! Battle phase: alternating fire between the player and a random opponent.
//!
//! Turn flow is held in a single [`BattleState`] value and advanced by
//! [`BattleState::after_shot`]; sunk ships and the winner are always derived
//! from the grids and shot histories rather than stored.

use alloc::vec::Vec;
use log::{debug, info};
use rand::Rng;

use crate::ai;
use crate::common::{Coord, ShotError, ShotOutcome};
use crate::deployment::random_fleet;
use crate::grid::{Grid, BB};
use crate::ship::ShipId;

/// Which side is acting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum Side {
    Player,
    Opponent,
}

/// Result of the battle so far.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum Outcome {
    InProgress,
    PlayerWins,
    OpponentWins,
}

impl Outcome {
    pub fn is_decided(&self) -> bool {
        !matches!(self, Outcome::InProgress)
    }
}

/// Turn state machine. The two win states are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum BattleState {
    #[default]
    PlayerTurn,
    OpponentTurn,
    PlayerWins,
    OpponentWins,
}

impl BattleState {
    /// Side holding the turn, or `None` once decided.
    pub fn turn(&self) -> Option<Side> {
        match self {
            BattleState::PlayerTurn => Some(Side::Player),
            BattleState::OpponentTurn => Some(Side::Opponent),
            _ => None,
        }
    }

    pub fn outcome(&self) -> Outcome {
        match self {
            BattleState::PlayerWins => Outcome::PlayerWins,
            BattleState::OpponentWins => Outcome::OpponentWins,
            _ => Outcome::InProgress,
        }
    }

    pub fn is_terminal(&self) -> bool {
        self.outcome().is_decided()
    }

    /// Transition after a resolved shot. A decided `winner` ends the battle;
    /// otherwise a hit keeps the turn and a miss passes it.
    pub fn after_shot(self, shot: ShotOutcome, winner: Outcome) -> Self {
        match (self, winner) {
            (s, _) if s.is_terminal() => s,
            (_, Outcome::PlayerWins) => BattleState::PlayerWins,
            (_, Outcome::OpponentWins) => BattleState::OpponentWins,
            (s, Outcome::InProgress) if shot.is_hit() => s,
            (BattleState::PlayerTurn, Outcome::InProgress) => BattleState::OpponentTurn,
            (_, Outcome::InProgress) => BattleState::PlayerTurn,
        }
    }
}

/// One recorded shot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct Shot {
    pub coord: Coord,
    pub outcome: ShotOutcome,
}

/// Insertion-ordered shot history with set membership.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ShotLog {
    shots: Vec<Shot>,
    fired: BB,
    hits: BB,
}

impl ShotLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a shot. Returns `false`, recording nothing, for a cell
    /// already fired at or off the board.
    pub fn record(&mut self, coord: Coord, outcome: ShotOutcome) -> bool {
        let cell: BB = core::iter::once(coord).collect();
        if cell.is_empty() || self.fired.contains(coord) {
            return false;
        }
        self.fired = self.fired | cell;
        if outcome.is_hit() {
            self.hits = self.hits | cell;
        }
        self.shots.push(Shot { coord, outcome });
        true
    }

    pub fn contains(&self, coord: Coord) -> bool {
        self.fired.contains(coord)
    }

    /// Every cell fired at.
    pub fn fired(&self) -> BB {
        self.fired
    }

    /// Cells that were hits when fired.
    pub fn hits(&self) -> BB {
        self.hits
    }

    pub fn hit_count(&self) -> usize {
        self.hits.count_ones()
    }

    pub fn len(&self) -> usize {
        self.shots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shots.is_empty()
    }

    /// Shots in the order they were fired.
    pub fn iter(&self) -> core::slice::Iter<'_, Shot> {
        self.shots.iter()
    }
}

impl<'a> IntoIterator for &'a ShotLog {
    type Item = &'a Shot;
    type IntoIter = core::slice::Iter<'a, Shot>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Everything a front end needs to report a resolved shot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct ShotResult {
    pub side: Side,
    pub coord: Coord,
    pub outcome: ShotOutcome,
    /// Ship sunk by this very shot.
    pub sunk: Option<ShipId>,
    /// State after the shot was applied.
    pub state: BattleState,
}

/// Ships on `grid` whose every cell appears in `shots`.
pub fn sunk_ships<'a>(grid: &'a Grid, shots: &ShotLog) -> impl Iterator<Item = ShipId> + 'a {
    let fired = shots.fired();
    grid.ships().filter(move |&id| fired.is_superset(&grid.ship_mask(id)))
}

/// Cells of every sunk ship on `grid`.
pub fn sunk_cells(grid: &Grid, shots: &ShotLog) -> BB {
    sunk_ships(grid, shots).fold(BB::new(), |acc, id| acc | grid.ship_mask(id))
}

/// Winner implied by both grids and both histories. The player's fleet
/// check runs first.
pub fn evaluate_winner(
    player_grid: &Grid,
    opponent_grid: &Grid,
    player_shots: &ShotLog,
    opponent_shots: &ShotLog,
) -> Outcome {
    let opponent_cells = opponent_grid.occupancy();
    let player_cells = player_grid.occupancy();
    if (player_shots.fired() & opponent_cells).count_ones() == opponent_cells.count_ones() {
        Outcome::PlayerWins
    } else if (opponent_shots.fired() & player_cells).count_ones() == player_cells.count_ones() {
        Outcome::OpponentWins
    } else {
        Outcome::InProgress
    }
}

/// Battle session owning both boards, both histories and the opponent's
/// random source.
#[derive(Debug, Clone)]
pub struct BattleEngine<R: Rng> {
    player_grid: Grid,
    opponent_grid: Grid,
    player_shots: ShotLog,
    opponent_shots: ShotLog,
    state: BattleState,
    rng: R,
}

impl<R: Rng> BattleEngine<R> {
    /// Starts a battle on a copy of the player's deployed grid. The opponent
    /// fleet is laid out at random from `rng`, which the engine keeps for
    /// opponent targeting.
    pub fn new(player_grid: Grid, mut rng: R) -> Self {
        let (opponent_grid, _) = random_fleet(&mut rng);
        Self::with_opponent_grid(player_grid, opponent_grid, rng)
    }

    /// Starts a battle against a known opponent layout.
    pub fn with_opponent_grid(player_grid: Grid, opponent_grid: Grid, rng: R) -> Self {
        info!(
            "battle started: {} player cells vs {} opponent cells",
            player_grid.occupied_count(),
            opponent_grid.occupied_count()
        );
        Self {
            player_grid,
            opponent_grid,
            player_shots: ShotLog::new(),
            opponent_shots: ShotLog::new(),
            state: BattleState::PlayerTurn,
            rng,
        }
    }

    pub fn player_grid(&self) -> &Grid {
        &self.player_grid
    }

    pub fn opponent_grid(&self) -> &Grid {
        &self.opponent_grid
    }

    pub fn player_shots(&self) -> &ShotLog {
        &self.player_shots
    }

    pub fn opponent_shots(&self) -> &ShotLog {
        &self.opponent_shots
    }

    pub fn state(&self) -> BattleState {
        self.state
    }

    pub fn outcome(&self) -> Outcome {
        self.state.outcome()
    }

    pub fn turn(&self) -> Option<Side> {
        self.state.turn()
    }

    /// Player fires at `coord` on the opponent grid. Rejected without any
    /// state change once decided, out of turn, off the board or for a
    /// repeated target.
    pub fn fire_as_player(&mut self, coord: Coord) -> Result<ShotResult, ShotError> {
        self.check_turn(Side::Player)?;
        if !coord.in_bounds() {
            return Err(ShotError::OutOfBounds(coord));
        }
        if self.player_shots.contains(coord) {
            return Err(ShotError::DuplicateShot(coord));
        }
        Ok(self.resolve(Side::Player, coord))
    }

    /// Opponent fires at a uniformly random cell it has not tried before.
    pub fn fire_as_opponent(&mut self) -> Result<ShotResult, ShotError> {
        self.check_turn(Side::Opponent)?;
        let coord = ai::uniform_target(&self.opponent_shots.fired(), &mut self.rng)
            .ok_or(ShotError::NoTargetsLeft)?;
        Ok(self.resolve(Side::Opponent, coord))
    }

    /// Runs the opponent's turn: fires until a miss or a decided battle.
    /// Empty when it is not the opponent's turn.
    pub fn play_opponent_turn(&mut self) -> Vec<ShotResult> {
        let mut results = Vec::new();
        while self.state == BattleState::OpponentTurn {
            match self.fire_as_opponent() {
                Ok(r) => results.push(r),
                Err(_) => break,
            }
        }
        results
    }

    /// Cells of sunk ships on the opponent grid.
    pub fn sunk_opponent_cells(&self) -> BB {
        sunk_cells(&self.opponent_grid, &self.player_shots)
    }

    /// Cells of sunk ships on the player grid.
    pub fn sunk_player_cells(&self) -> BB {
        sunk_cells(&self.player_grid, &self.opponent_shots)
    }

    fn check_turn(&self, side: Side) -> Result<(), ShotError> {
        match self.state.turn() {
            None => Err(ShotError::GameOver),
            Some(s) if s != side => Err(ShotError::NotYourTurn),
            Some(_) => Ok(()),
        }
    }

    fn resolve(&mut self, side: Side, coord: Coord) -> ShotResult {
        let (target, log) = match side {
            Side::Player => (&self.opponent_grid, &mut self.player_shots),
            Side::Opponent => (&self.player_grid, &mut self.opponent_shots),
        };
        let hit = target.get(coord);
        let outcome = if hit.is_some() {
            ShotOutcome::Hit
        } else {
            ShotOutcome::Miss
        };
        log.record(coord, outcome);
        let sunk = hit.filter(|&id| log.fired().is_superset(&target.ship_mask(id)));

        let winner = evaluate_winner(
            &self.player_grid,
            &self.opponent_grid,
            &self.player_shots,
            &self.opponent_shots,
        );
        self.state = self.state.after_shot(outcome, winner);
        debug!("{:?} fired at {}: {:?} -> {:?}", side, coord, outcome, self.state);
        if let Some(id) = sunk {
            info!("{:?} sank the {}", side, id.name());
        }
        if self.state.is_terminal() {
            info!("battle over: {:?}", self.state.outcome());
        }

        ShotResult {
            side,
            coord,
            outcome,
            sunk,
            state: self.state,
        }
    }
}
