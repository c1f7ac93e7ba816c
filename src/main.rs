//! Zimp CLI - play, inspect and validate Zimp games.

// Allow print in the CLI binary
#![allow(clippy::print_stdout, clippy::print_stderr)]

mod cli;

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;
use zimp::Direction;

/// Zimp - survive the night, bury the totem
#[derive(Parser, Debug)]
#[command(name = "zimp")]
#[command(author, version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
enum Commands {
    /// Play a game on the terminal
    Play {
        /// Random seed (default: random)
        #[arg(short, long)]
        seed: Option<u64>,

        /// Tile and card data file (default: built-in data)
        #[arg(short, long)]
        data: Option<PathBuf>,

        /// Where `//save` writes the snapshot
        #[arg(long, default_value = "zimp_save.json")]
        save: PathBuf,
    },

    /// Walk a fixed list of moves and print the explored map
    Map {
        /// Moves, comma separated (e.g. up,up,left)
        #[arg(required = true, value_delimiter = ',')]
        moves: Vec<Direction>,

        /// Random seed (default: random)
        #[arg(short, long)]
        seed: Option<u64>,

        /// Tile and card data file (default: built-in data)
        #[arg(short, long)]
        data: Option<PathBuf>,

        /// Print every prompt and message of the walk
        #[arg(short, long)]
        verbose: bool,
    },

    /// Validate a tile and card data file
    Validate {
        /// Data file to validate
        #[arg(required = true)]
        data: PathBuf,
    },
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();
}

fn main() -> ExitCode {
    init_tracing();
    let args = Args::parse();

    let result = match args.command {
        Commands::Play { seed, data, save } => cli::play::execute(seed, data, save),

        Commands::Map {
            moves,
            seed,
            data,
            verbose,
        } => cli::map::execute(seed, data, moves, verbose),

        Commands::Validate { data } => cli::validate::execute(data),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
