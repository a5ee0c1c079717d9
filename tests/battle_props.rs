use std::collections::HashSet;

use broadside::{
    ai, random_fleet, sunk_cells, BattleEngine, BattleState, Coord, Outcome, ShotError, BOARD_SIZE,
};
use proptest::prelude::*;
use rand::{rngs::SmallRng, Rng, SeedableRng};

fn new_battle(seed: u64) -> (BattleEngine<SmallRng>, SmallRng) {
    let mut player_rng = SmallRng::seed_from_u64(seed);
    let (grid, _) = random_fleet(&mut player_rng);
    let battle = BattleEngine::new(grid, SmallRng::seed_from_u64(seed.wrapping_add(1)));
    (battle, player_rng)
}

/// Plays to the end with the player firing at random fresh cells.
fn play_out(battle: &mut BattleEngine<SmallRng>, rng: &mut SmallRng) {
    while !battle.outcome().is_decided() {
        match battle.state() {
            BattleState::PlayerTurn => {
                let target = ai::uniform_target(&battle.player_shots().fired(), rng).unwrap();
                battle.fire_as_player(target).unwrap();
            }
            BattleState::OpponentTurn => {
                battle.play_opponent_turn();
            }
            _ => unreachable!(),
        }
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// The opponent never picks a cell twice, even deep into a game.
    #[test]
    fn opponent_never_repeats(seed in any::<u64>()) {
        let (mut battle, mut rng) = new_battle(seed);
        play_out(&mut battle, &mut rng);

        let mut seen = HashSet::new();
        for shot in battle.opponent_shots() {
            prop_assert!(seen.insert(shot.coord));
        }
        prop_assert_eq!(seen.len(), battle.opponent_shots().len());
        prop_assert_eq!(battle.opponent_shots().fired().count_ones(), seen.len());
    }

    /// Firing twice at the same cell changes neither the turn nor the history.
    #[test]
    fn duplicate_shot_changes_nothing(
        seed in any::<u64>(),
        x in 0..BOARD_SIZE as usize,
        y in 0..BOARD_SIZE as usize,
    ) {
        let (mut battle, _) = new_battle(seed);
        let target = Coord::new(x, y);
        battle.fire_as_player(target).unwrap();
        if battle.state() == BattleState::OpponentTurn {
            battle.play_opponent_turn();
        }
        if battle.state() != BattleState::PlayerTurn {
            return Ok(());
        }

        let state = battle.state();
        let len = battle.player_shots().len();
        prop_assert_eq!(battle.fire_as_player(target), Err(ShotError::DuplicateShot(target)));
        prop_assert_eq!(battle.state(), state);
        prop_assert_eq!(battle.player_shots().len(), len);
    }

    /// Once decided, nothing moves.
    #[test]
    fn outcome_is_monotonic(seed in any::<u64>(), probes in 1..10usize) {
        let (mut battle, mut rng) = new_battle(seed);
        play_out(&mut battle, &mut rng);

        let outcome = battle.outcome();
        prop_assert!(outcome != Outcome::InProgress);
        let player_shots = battle.player_shots().clone();
        let opponent_shots = battle.opponent_shots().clone();
        for _ in 0..probes {
            let c = Coord::new(
                rng.random_range(0..BOARD_SIZE as usize),
                rng.random_range(0..BOARD_SIZE as usize),
            );
            prop_assert_eq!(battle.fire_as_player(c), Err(ShotError::GameOver));
            prop_assert_eq!(battle.fire_as_opponent(), Err(ShotError::GameOver));
        }
        prop_assert_eq!(battle.outcome(), outcome);
        prop_assert_eq!(battle.player_shots(), &player_shots);
        prop_assert_eq!(battle.opponent_shots(), &opponent_shots);
    }

    /// The winner has sunk every ship of the losing fleet.
    #[test]
    fn winner_sank_whole_fleet(seed in any::<u64>()) {
        let (mut battle, mut rng) = new_battle(seed);
        play_out(&mut battle, &mut rng);

        match battle.outcome() {
            Outcome::PlayerWins => {
                let sunk = sunk_cells(battle.opponent_grid(), battle.player_shots());
                prop_assert_eq!(sunk, battle.opponent_grid().occupancy());
            }
            Outcome::OpponentWins => {
                let sunk = sunk_cells(battle.player_grid(), battle.opponent_shots());
                prop_assert_eq!(sunk, battle.player_grid().occupancy());
            }
            Outcome::InProgress => {
                prop_assert!(false, "game did not finish");
            }
        }
    }
}
