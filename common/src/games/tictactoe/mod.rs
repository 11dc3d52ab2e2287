mod board;
mod bot_controller;
mod types;
mod win_detector;

pub use board::Board;
pub use bot_controller::{Evaluation, evaluate, max_value, min_value, minimax_move};
pub use types::{Action, BOARD_SIZE, Cell, GameStatus, Player};
