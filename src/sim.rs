#![cfg(feature = "std")]

//! Unattended games: the player side also deploys and fires at random.

use anyhow::{anyhow, Result};
use log::info;
use rand::{rngs::SmallRng, SeedableRng};
use serde::Serialize;

use crate::{
    ai,
    battle::{BattleEngine, BattleState, Outcome, Side},
    deployment::DeploymentEngine,
};

/// Auto-placement rounds tried before a simulated deployment gives up.
const DEPLOY_ROUNDS: usize = 16;

/// Per-side totals of a simulated game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SideReport {
    pub shots: usize,
    pub hits: usize,
    pub ships_sunk: usize,
}

/// Summary printed by `broadside sim`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SimReport {
    pub seed: u64,
    pub outcome: Outcome,
    pub winner: Option<Side>,
    pub player: SideReport,
    pub opponent: SideReport,
}

/// Plays one game to completion from `seed`.
pub fn simulate(seed: u64) -> Result<SimReport> {
    let mut player_rng = SmallRng::seed_from_u64(seed);
    let battle_rng = SmallRng::seed_from_u64(seed.wrapping_add(1));

    let mut deployment = DeploymentEngine::new();
    let mut rounds = 0;
    while !deployment.is_complete() {
        if rounds == DEPLOY_ROUNDS {
            return Err(anyhow!("fleet did not fit after {} rounds", DEPLOY_ROUNDS));
        }
        deployment.auto_place_all(&mut player_rng);
        rounds += 1;
    }
    let grid = deployment.finish().map_err(|e| anyhow!(e))?;

    let mut battle = BattleEngine::new(grid, battle_rng);
    while !battle.outcome().is_decided() {
        match battle.state() {
            BattleState::PlayerTurn => {
                let target = ai::uniform_target(&battle.player_shots().fired(), &mut player_rng)
                    .ok_or_else(|| anyhow!("player ran out of targets"))?;
                battle.fire_as_player(target).map_err(|e| anyhow!(e))?;
            }
            BattleState::OpponentTurn => {
                if battle.play_opponent_turn().is_empty() {
                    return Err(anyhow!("opponent could not fire"));
                }
            }
            BattleState::PlayerWins | BattleState::OpponentWins => break,
        }
    }

    let outcome = battle.outcome();
    let winner = match outcome {
        Outcome::PlayerWins => Some(Side::Player),
        Outcome::OpponentWins => Some(Side::Opponent),
        Outcome::InProgress => None,
    };
    let report = SimReport {
        seed,
        outcome,
        winner,
        player: SideReport {
            shots: battle.player_shots().len(),
            hits: battle.player_shots().hit_count(),
            ships_sunk: crate::battle::sunk_ships(battle.opponent_grid(), battle.player_shots())
                .count(),
        },
        opponent: SideReport {
            shots: battle.opponent_shots().len(),
            hits: battle.opponent_shots().hit_count(),
            ships_sunk: crate::battle::sunk_ships(battle.player_grid(), battle.opponent_shots())
                .count(),
        },
    };
    info!("simulated game {}: {:?}", seed, outcome);
    Ok(report)
}
