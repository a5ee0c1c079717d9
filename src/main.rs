#[cfg(not(feature = "std"))]
fn main() {}

#[cfg(feature = "std")]
use broadside::{cli::Session, cli::SessionEnd, init_logging, sim::simulate, Settings};

#[cfg(feature = "std")]
use clap::Parser;
#[cfg(feature = "std")]
use std::time::Duration;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
#[cfg(feature = "std")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Parser)]
#[cfg(feature = "std")]
enum Commands {
    /// Deploy a fleet and fight the AI in the terminal.
    Play {
        #[arg(long, help = "Fix RNG seed for reproducible games (e.g., --seed 12345)")]
        seed: Option<u64>,
        #[arg(long, default_value_t = broadside::DEFAULT_OPPONENT_DELAY_MS, help = "Pause before each enemy shot")]
        delay_ms: u64,
    },
    /// Play a whole game unattended and print a JSON summary.
    Sim {
        #[arg(long, default_value_t = 0)]
        seed: u64,
    },
}

#[cfg(feature = "std")]
fn main() -> anyhow::Result<()> {
    init_logging();
    let cli = Cli::parse();

    match cli.command {
        Commands::Play { seed, delay_ms } => {
            if let Some(s) = seed {
                println!("Using fixed seed: {} (game will be reproducible)", s);
            }
            let settings = Settings {
                seed,
                opponent_delay: Duration::from_millis(delay_ms),
            };
            let stdin = std::io::stdin();
            let mut session = Session::new(stdin.lock(), std::io::stdout(), settings);
            if session.run()? == SessionEnd::Abandoned {
                println!("Left the battle.");
            }
        }
        Commands::Sim { seed } => {
            let report = simulate(seed)?;
            println!("{}", serde_json::to_string(&report)?);
        }
    }
    Ok(())
}
