use super::board::Board;
use super::types::{Action, Player};

/// Minimax value of a board together with the move that achieves it.
/// `action` is `None` only for terminal boards.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Evaluation {
    pub value: i32,
    pub action: Option<Action>,
}

impl Evaluation {
    fn leaf(board: &Board) -> Self {
        Self {
            value: board.utility(),
            action: None,
        }
    }
}

/// Optimal move for the player to act, or `None` once the game is over.
pub fn minimax_move(board: &Board) -> Option<Action> {
    if board.is_terminal() {
        return None;
    }
    evaluate(board).action
}

pub fn evaluate(board: &Board) -> Evaluation {
    match board.player_to_move() {
        Player::X => max_value(board),
        Player::O => min_value(board),
    }
}

/// Exhaustive evaluation from X's side. Among equally good moves the first
/// one in row-major order is kept.
pub fn max_value(board: &Board) -> Evaluation {
    if board.is_terminal() {
        return Evaluation::leaf(board);
    }

    let mut best = Evaluation {
        value: i32::MIN,
        action: None,
    };

    for action in board.legal_actions() {
        let Ok(next) = board.result(action) else {
            unreachable!("legal action {} rejected by result", action);
        };
        let reply = min_value(&next);
        if reply.value > best.value {
            best = Evaluation {
                value: reply.value,
                action: Some(action),
            };
        }
    }

    best
}

/// Exhaustive evaluation from O's side, mirroring `max_value`.
pub fn min_value(board: &Board) -> Evaluation {
    if board.is_terminal() {
        return Evaluation::leaf(board);
    }

    let mut best = Evaluation {
        value: i32::MAX,
        action: None,
    };

    for action in board.legal_actions() {
        let Ok(next) = board.result(action) else {
            unreachable!("legal action {} rejected by result", action);
        };
        let reply = max_value(&next);
        if reply.value < best.value {
            best = Evaluation {
                value: reply.value,
                action: Some(action),
            };
        }
    }

    best
}
