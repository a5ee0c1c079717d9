#![cfg(feature = "std")]

//! Line-oriented terminal front end driving both engines.

use std::io::{BufRead, Write};
use std::string::{String, ToString};
use std::thread;

use anyhow::Result;
use log::debug;
use rand::Rng;

use crate::{
    battle::{BattleEngine, Outcome, ShotResult, Side},
    common::{Coord, DeployError, ShotError},
    config::{Settings, BOARD_SIZE, NUM_SHIPS, SHIPS},
    deployment::DeploymentEngine,
    grid::Grid,
    ship::Orientation,
    ui::{render_battle, render_deployment},
};

/// Parses a column letter and one-based row, e.g. `A5` or `j10`.
pub fn parse_coord(input: &str) -> Result<Coord, String> {
    let input = input.trim();
    if input.is_empty() {
        return Err("Empty input".to_string());
    }
    if input.len() < 2 {
        return Err("Too short - need column letter and row number (e.g., A5)".to_string());
    }
    let mut chars = input.chars();
    let col_ch = chars.next().ok_or("No column letter")?.to_ascii_uppercase();
    if !col_ch.is_ascii_alphabetic() {
        return Err(format!("Invalid column '{}' - must be a letter A-J", col_ch));
    }
    let col = (col_ch as u8 - b'A') as usize;
    if col >= BOARD_SIZE as usize {
        return Err(format!("Column '{}' out of bounds - must be A-J", col_ch));
    }
    let row_str: String = chars.collect();
    let row: usize = row_str
        .parse()
        .map_err(|_| format!("Invalid row '{}' - must be a number 1-10", row_str))?;
    if row == 0 || row > BOARD_SIZE as usize {
        return Err(format!("Row {} out of bounds - must be 1-10", row));
    }
    Ok(Coord::new(col, row - 1))
}

/// Parses `h`/`v` (or the full words).
pub fn parse_orientation(input: &str) -> Result<Orientation, String> {
    match input.to_ascii_lowercase().as_str() {
        "h" | "horizontal" => Ok(Orientation::Horizontal),
        "v" | "vertical" => Ok(Orientation::Vertical),
        other => Err(format!("Unknown orientation '{}' - use h or v", other)),
    }
}

/// A deployment-phase command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeployCommand {
    /// Ship index (zero-based), anchor and optional explicit orientation.
    Place(usize, Coord, Option<Orientation>),
    Rotate,
    Auto,
    Reset,
    Ships,
    Start,
    Quit,
}

impl DeployCommand {
    pub fn parse(line: &str) -> Result<Self, String> {
        let mut words = line.split_whitespace();
        let cmd = words.next().ok_or("Empty input")?.to_ascii_lowercase();
        let cmd = match cmd.as_str() {
            "place" | "p" => {
                let ship: usize = words
                    .next()
                    .ok_or("Usage: place <ship#> <coord> [h|v]")?
                    .parse()
                    .map_err(|_| "Ship number must be 1-5".to_string())?;
                if ship == 0 || ship > NUM_SHIPS {
                    return Err(format!("Ship number must be 1-{}", NUM_SHIPS));
                }
                let anchor = parse_coord(words.next().ok_or("Missing coordinate")?)?;
                let orientation = words.next().map(parse_orientation).transpose()?;
                DeployCommand::Place(ship - 1, anchor, orientation)
            }
            "rotate" | "r" => DeployCommand::Rotate,
            "auto" | "a" => DeployCommand::Auto,
            "reset" => DeployCommand::Reset,
            "ships" | "show" => DeployCommand::Ships,
            "start" | "done" => DeployCommand::Start,
            "quit" | "q" | "exit" => DeployCommand::Quit,
            other => return Err(format!("Unknown command '{}'", other)),
        };
        if words.next().is_some() {
            return Err("Too many arguments".to_string());
        }
        Ok(cmd)
    }
}

const DEPLOY_HELP: &str = "Commands: place <ship#> <coord> [h|v], rotate, auto, reset, ships, start, quit";

/// How a session ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEnd {
    /// The battle reached a result.
    Finished(Outcome),
    /// The user left, or input ran out.
    Abandoned,
}

/// One game: deployment followed by battle, reading commands from `input`
/// and writing boards and messages to `output`.
pub struct Session<I, O> {
    input: I,
    output: O,
    settings: Settings,
}

impl<I: BufRead, O: Write> Session<I, O> {
    pub fn new(input: I, output: O, settings: Settings) -> Self {
        Self {
            input,
            output,
            settings,
        }
    }

    /// Plays a complete session.
    pub fn run(&mut self) -> Result<SessionEnd> {
        let (mut deploy_rng, battle_rng) = self.settings.rngs();
        let mut deployment = DeploymentEngine::new();
        let grid = match self.deploy(&mut deployment, &mut deploy_rng)? {
            Some(grid) => grid,
            None => return Ok(SessionEnd::Abandoned),
        };
        let mut battle = BattleEngine::new(grid, battle_rng);
        self.battle(&mut battle)
    }

    fn read_line(&mut self) -> Result<Option<String>> {
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    fn prompt(&mut self, text: &str) -> Result<()> {
        write!(self.output, "{}", text)?;
        self.output.flush()?;
        Ok(())
    }

    fn deploy<R: Rng>(
        &mut self,
        engine: &mut DeploymentEngine,
        rng: &mut R,
    ) -> Result<Option<Grid>> {
        writeln!(self.output, "=== DEPLOY YOUR SHIPS ===")?;
        writeln!(self.output, "{}", DEPLOY_HELP)?;
        write!(self.output, "{}", render_deployment(engine))?;
        loop {
            self.prompt("deploy> ")?;
            let line = match self.read_line()? {
                Some(l) => l,
                None => return Ok(None),
            };
            if line.is_empty() {
                continue;
            }
            let cmd = match DeployCommand::parse(&line) {
                Ok(c) => c,
                Err(msg) => {
                    writeln!(self.output, "{}", msg)?;
                    writeln!(self.output, "{}", DEPLOY_HELP)?;
                    continue;
                }
            };
            debug!("deploy command: {:?}", cmd);
            match cmd {
                DeployCommand::Place(ship, anchor, orientation) => {
                    let result = match orientation {
                        Some(o) => engine.attempt_placement(ship, anchor, o),
                        None => engine.place_ship(ship, anchor),
                    };
                    match result {
                        Ok(p) => {
                            writeln!(
                                self.output,
                                "Placed {} at {} ({})",
                                p.ship.name(),
                                p.anchor,
                                p.orientation
                            )?;
                            write!(self.output, "{}", render_deployment(engine))?;
                        }
                        Err(e) => writeln!(self.output, "{}", e)?,
                    }
                }
                DeployCommand::Rotate => {
                    let o = engine.rotate();
                    writeln!(self.output, "Rotate: {}", o)?;
                }
                DeployCommand::Auto => {
                    let placed = engine.auto_place_all(rng);
                    if placed < NUM_SHIPS {
                        writeln!(
                            self.output,
                            "Only {} of {} ships fit; try auto again or place the rest by hand",
                            placed, NUM_SHIPS
                        )?;
                    }
                    write!(self.output, "{}", render_deployment(engine))?;
                }
                DeployCommand::Reset => {
                    engine.reset();
                    write!(self.output, "{}", render_deployment(engine))?;
                }
                DeployCommand::Ships => write!(self.output, "{}", render_deployment(engine))?,
                DeployCommand::Start => match engine.finish() {
                    Ok(grid) => return Ok(Some(grid)),
                    Err(DeployError::Incomplete) => {
                        let missing: Vec<&str> = SHIPS
                            .iter()
                            .zip(engine.fleet_status())
                            .filter(|(_, placed)| !**placed)
                            .map(|(def, _)| def.name())
                            .collect();
                        writeln!(self.output, "Still to place: {}", missing.join(", "))?;
                    }
                    Err(e) => writeln!(self.output, "{}", e)?,
                },
                DeployCommand::Quit => return Ok(None),
            }
        }
    }

    fn battle<R: Rng>(&mut self, engine: &mut BattleEngine<R>) -> Result<SessionEnd> {
        writeln!(self.output, "=== BATTLE ===")?;
        writeln!(self.output, "Enter a coordinate to fire (e.g. B7), or quit.")?;
        write!(self.output, "{}", render_battle(engine))?;
        loop {
            if engine.outcome().is_decided() {
                break;
            }
            self.prompt("fire> ")?;
            let line = match self.read_line()? {
                Some(l) => l,
                None => return Ok(SessionEnd::Abandoned),
            };
            if line.is_empty() {
                continue;
            }
            if matches!(line.to_ascii_lowercase().as_str(), "quit" | "q" | "leave") {
                return Ok(SessionEnd::Abandoned);
            }
            let coord = match parse_coord(&line) {
                Ok(c) => c,
                Err(msg) => {
                    writeln!(self.output, "{}", msg)?;
                    continue;
                }
            };
            match engine.fire_as_player(coord) {
                Ok(result) => self.report(&result)?,
                // repeated targets are ignored
                Err(ShotError::DuplicateShot(_)) => continue,
                Err(e) => {
                    writeln!(self.output, "{}", e)?;
                    continue;
                }
            }
            while engine.turn() == Some(Side::Opponent) {
                if !self.settings.opponent_delay.is_zero() {
                    thread::sleep(self.settings.opponent_delay);
                }
                match engine.fire_as_opponent() {
                    Ok(result) => self.report(&result)?,
                    Err(e) => {
                        writeln!(self.output, "{}", e)?;
                        break;
                    }
                }
            }
            write!(self.output, "{}", render_battle(engine))?;
        }
        let outcome = engine.outcome();
        match outcome {
            Outcome::PlayerWins => writeln!(self.output, "You Win!")?,
            _ => writeln!(self.output, "AI Wins!")?,
        }
        write!(self.output, "{}", render_battle(engine))?;
        Ok(SessionEnd::Finished(outcome))
    }

    fn report(&mut self, result: &ShotResult) -> Result<()> {
        let who = match result.side {
            Side::Player => "You fire",
            Side::Opponent => "Enemy fires",
        };
        let what = if result.outcome.is_hit() { "hit" } else { "miss" };
        writeln!(self.output, "{} at {}: {}", who, result.coord, what)?;
        if let Some(id) = result.sunk {
            match result.side {
                Side::Player => writeln!(self.output, "You sank the {}!", id.name())?,
                Side::Opponent => writeln!(self.output, "Your {} was sunk!", id.name())?,
            }
        }
        Ok(())
    }
}
