#![cfg(feature = "std")]

//! Plain-text rendering of boards for the terminal front end.

use std::fmt::Write;
use std::string::String;

use crate::{
    battle::{BattleEngine, ShotLog},
    common::Coord,
    config::{BOARD_SIZE, SHIPS},
    deployment::DeploymentEngine,
    grid::{Grid, BB},
};
use rand::Rng;

const GRID: usize = BOARD_SIZE as usize;

/// What to show for each cell of a board.
struct View<'a> {
    grid: &'a Grid,
    shots: Option<&'a ShotLog>,
    sunk: BB,
    reveal: bool,
}

impl View<'_> {
    fn cell(&self, c: Coord) -> char {
        let fired = self.shots.map_or(false, |s| s.contains(c));
        let occupied = self.grid.is_occupied(c);
        if self.sunk.contains(c) {
            '#'
        } else if fired && occupied {
            'X'
        } else if fired {
            'o'
        } else if self.reveal && occupied {
            'S'
        } else {
            '.'
        }
    }

    fn render(&self, title: &str, out: &mut String) {
        let _ = writeln!(out, "    {}", title);
        out.push_str("       ");
        for x in 0..GRID {
            let _ = write!(out, " {}", (b'A' + x as u8) as char);
        }
        out.push('\n');
        for y in 0..GRID {
            let _ = write!(out, "    {:2} ", y + 1);
            for x in 0..GRID {
                let _ = write!(out, " {}", self.cell(Coord::new(x, y)));
            }
            out.push('\n');
        }
    }
}

/// Deployment board with the fleet roster and current orientation.
pub fn render_deployment(engine: &DeploymentEngine) -> String {
    let mut out = String::new();
    View {
        grid: engine.grid(),
        shots: None,
        sunk: BB::new(),
        reveal: true,
    }
    .render("Your fleet", &mut out);
    out.push_str("\n    Ships:\n");
    for (i, (def, placed)) in SHIPS.iter().zip(engine.fleet_status()).enumerate() {
        let status = if *placed { "placed" } else { "ready" };
        let _ = writeln!(
            out,
            "      {}. {} ({}): {}",
            i + 1,
            def.name(),
            def.length(),
            status
        );
    }
    let _ = writeln!(out, "    Orientation: {}", engine.orientation());
    out
}

/// Both battle boards: the opponent's fog-of-war grid above the player's own.
pub fn render_battle<R: Rng>(engine: &BattleEngine<R>) -> String {
    let mut out = String::new();
    let over = engine.outcome().is_decided();
    View {
        grid: engine.opponent_grid(),
        shots: Some(engine.player_shots()),
        sunk: engine.sunk_opponent_cells(),
        reveal: over,
    }
    .render("Enemy waters", &mut out);
    out.push('\n');
    View {
        grid: engine.player_grid(),
        shots: Some(engine.opponent_shots()),
        sunk: engine.sunk_player_cells(),
        reveal: true,
    }
    .render("Your fleet", &mut out);
    out.push_str("    Legend: S=Ship  X=Hit  #=Sunk  o=Miss  .=Water\n");
    out
}
