mod config;
mod runner;

use clap::Parser;
use std::io;
use std::path::PathBuf;
use tictactoe_common::games::tictactoe::{Board, Player};
use tictactoe_common::{log, logger};

use runner::{GameRunner, RunnerSettings};

const DEFAULT_LOG_PREFIX: &str = "TicTacToe";

#[derive(Parser)]
#[command(name = "tictactoe", about = "Play tic-tac-toe against an exhaustive minimax bot")]
struct Args {
    /// Path to the YAML config file (defaults to one next to the executable)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Mark you play with: x or o
    #[arg(long)]
    human: Option<Player>,

    /// Let minimax play both sides
    #[arg(long, conflicts_with = "human")]
    self_play: bool,

    /// Starting position as nine cells, e.g. "XX.OO...."
    #[arg(long)]
    board: Option<Board>,

    #[arg(long)]
    use_log_prefix: bool,

    /// Write the effective configuration back to the config file
    #[arg(long)]
    save_config: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let config_manager = config::get_config_manager(args.config.as_deref());
    let mut cfg = config_manager.get_config()?;

    if let Some(human) = args.human {
        cfg.human = Some(human);
    }
    if args.self_play {
        cfg.human = None;
    }

    let prefix = if args.use_log_prefix {
        Some(cfg.log_prefix.clone().unwrap_or_else(|| DEFAULT_LOG_PREFIX.to_string()))
    } else {
        cfg.log_prefix.clone()
    };
    logger::init_logger(prefix);

    log!("Using config {}", config_manager.file_path().display());

    if args.save_config {
        config_manager.set_config(&cfg)?;
        log!("Config saved");
    }

    let start = args.board.unwrap_or_else(Board::initial_state);
    match cfg.human {
        Some(human) => log!("Starting game, human plays {}", human),
        None => log!("Starting self-play game"),
    }

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut runner = GameRunner::new(stdin.lock(), stdout.lock(), RunnerSettings::from(&cfg));
    let final_board = runner.run(start)?;

    log!("Game finished: {}", final_board.status());

    Ok(())
}
