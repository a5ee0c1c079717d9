use std::process::Command;

use broadside::sim::simulate;
use broadside::{Outcome, TOTAL_SHIP_CELLS};

#[test]
fn sim_binary_smoke() {
    let output = Command::new(env!("CARGO_BIN_EXE_broadside"))
        .args(["sim", "--seed", "12"])
        .env("BROADSIDE_LOG", "off")
        .output()
        .expect("failed to run broadside binary");
    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).expect("non utf8 output");
    let v: serde_json::Value = serde_json::from_str(stdout.trim()).expect("invalid json");
    assert_eq!(v["seed"].as_u64(), Some(12));
    assert!(v["winner"].is_string());
}

#[test]
fn simulate_is_reproducible() {
    let a = simulate(99).unwrap();
    let b = simulate(99).unwrap();
    assert_eq!(a, b);
    assert_ne!(a.outcome, Outcome::InProgress);
}

#[test]
fn simulate_winner_hit_every_cell() {
    for seed in 0..10 {
        let report = simulate(seed).unwrap();
        let winner = match report.outcome {
            Outcome::PlayerWins => report.player,
            Outcome::OpponentWins => report.opponent,
            Outcome::InProgress => panic!("unfinished game for seed {}", seed),
        };
        assert_eq!(winner.hits, TOTAL_SHIP_CELLS);
        assert_eq!(winner.ships_sunk, 5);
    }
}
