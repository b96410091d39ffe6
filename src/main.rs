use std::path::PathBuf;

use bevy::prelude::AppExit;
use clap::Parser;

use nightmare_arena::common::tunables::Tunables;
use nightmare_arena::game;

/// Nightmare Arena: survive 100 days, then kill the boss.
#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// JSON file overriding any subset of the gameplay tunables.
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Fixed RNG seed for a reproducible run. Overrides the config file's seed.
    #[arg(long)]
    seed: Option<u64>,
}

fn main() -> AppExit {
    let cli = Cli::parse();

    let mut tunables = match cli.config {
        Some(path) => match Tunables::load(&path) {
            Ok(t) => t,
            Err(e) => {
                eprintln!("Error: {e}");
                return AppExit::error();
            }
        },
        None => Tunables::default(),
    };
    if cli.seed.is_some() {
        tunables.seed = cli.seed;
    }

    game::run(tunables)
}
