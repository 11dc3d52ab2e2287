use std::io::{BufRead, Write};
use std::time::Duration;

use thiserror::Error;
use tictactoe_common::GameError;
use tictactoe_common::games::tictactoe::{Action, Board, Player, evaluate};
use tictactoe_common::log;

use crate::config::Config;

#[derive(Error, Debug)]
pub enum RunnerError {
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    #[error("input closed before the game finished")]
    InputClosed,

    #[error("minimax found no move on a board that is still in progress")]
    NoMove,

    #[error(transparent)]
    Game(#[from] GameError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunnerSettings {
    pub human: Option<Player>,
    pub show_evaluation: bool,
    pub bot_delay: Duration,
}

impl From<&Config> for RunnerSettings {
    fn from(config: &Config) -> Self {
        Self {
            human: config.human,
            show_evaluation: config.show_evaluation,
            bot_delay: Duration::from_millis(config.bot_delay_ms),
        }
    }
}

/// Drives one game from a starting board to a terminal one. Human moves come
/// from `input`; the other side is played by minimax.
pub struct GameRunner<R, W> {
    input: R,
    output: W,
    settings: RunnerSettings,
}

impl<R: BufRead, W: Write> GameRunner<R, W> {
    pub fn new(input: R, output: W, settings: RunnerSettings) -> Self {
        Self {
            input,
            output,
            settings,
        }
    }

    pub fn run(&mut self, start: Board) -> Result<Board, RunnerError> {
        let mut board = start;

        loop {
            writeln!(self.output, "{}\n", board)?;
            if board.status().is_over() {
                break;
            }

            let mover = board.player_to_move();
            board = if self.settings.human == Some(mover) {
                self.human_turn(&board, mover)?
            } else {
                self.bot_turn(&board, mover)?
            };
        }

        writeln!(self.output, "Game over: {}", board.status())?;
        self.output.flush()?;
        Ok(board)
    }

    fn human_turn(&mut self, board: &Board, mover: Player) -> Result<Board, RunnerError> {
        loop {
            write!(self.output, "Your move as {} (row col): ", mover)?;
            self.output.flush()?;

            let mut line = String::new();
            if self.input.read_line(&mut line)? == 0 {
                return Err(RunnerError::InputClosed);
            }

            let action = match line.parse::<Action>() {
                Ok(action) => action,
                Err(err) => {
                    writeln!(self.output, "{}", err)?;
                    continue;
                }
            };

            match board.result(action) {
                Ok(next) => {
                    log!("{} played {}", mover, action);
                    return Ok(next);
                }
                Err(err) => writeln!(self.output, "{}", err)?,
            }
        }
    }

    fn bot_turn(&mut self, board: &Board, mover: Player) -> Result<Board, RunnerError> {
        if !self.settings.bot_delay.is_zero() {
            std::thread::sleep(self.settings.bot_delay);
        }

        let evaluation = evaluate(board);
        let action = evaluation.action.ok_or(RunnerError::NoMove)?;
        log!("Minimax plays {} for {} (value {})", action, mover, evaluation.value);

        if self.settings.show_evaluation {
            writeln!(
                self.output,
                "{} plays {} (value {})",
                mover, action, evaluation.value
            )?;
        }

        Ok(board.result(action)?)
    }
}
