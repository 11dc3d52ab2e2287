use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use crate::error::GameError;
use super::types::{Action, BOARD_SIZE, Cell, GameStatus, Player};
use super::win_detector::{check_win, find_winning_line};

/// A snapshot of the 3x3 grid. Boards are values: every move produces a new
/// board and the turn is always re-derived from the cell contents.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub struct Board {
    cells: [[Cell; BOARD_SIZE]; BOARD_SIZE],
}

impl Board {
    pub fn initial_state() -> Self {
        Self::default()
    }

    pub fn from_cells(cells: [[Cell; BOARD_SIZE]; BOARD_SIZE]) -> Self {
        Self { cells }
    }

    pub fn cells(&self) -> &[[Cell; BOARD_SIZE]; BOARD_SIZE] {
        &self.cells
    }

    pub fn cell(&self, action: Action) -> Option<Cell> {
        if !action.is_in_bounds() {
            return None;
        }
        Some(self.cells[action.row][action.col])
    }

    pub fn filled_count(&self) -> usize {
        self.cells
            .iter()
            .flatten()
            .filter(|&&cell| cell != Cell::Empty)
            .count()
    }

    /// X moves on an even number of filled cells, O on an odd one.
    pub fn player_to_move(&self) -> Player {
        if self.filled_count() % 2 == 1 {
            Player::O
        } else {
            Player::X
        }
    }

    pub fn legal_actions(&self) -> BTreeSet<Action> {
        let mut actions = BTreeSet::new();
        for (row, cells) in self.cells.iter().enumerate() {
            for (col, &cell) in cells.iter().enumerate() {
                if cell == Cell::Empty {
                    actions.insert(Action::new(row, col));
                }
            }
        }
        actions
    }

    pub fn is_legal(&self, action: Action) -> bool {
        self.cell(action) == Some(Cell::Empty)
    }

    /// Returns the board after the player to move marks `action`.
    pub fn result(&self, action: Action) -> Result<Board, GameError> {
        if !self.is_legal(action) {
            return Err(GameError::InvalidAction {
                row: action.row,
                col: action.col,
            });
        }

        let mut next = *self;
        next.cells[action.row][action.col] = self.player_to_move().to_cell();
        Ok(next)
    }

    pub fn winner(&self) -> Option<Player> {
        check_win(&self.cells)
    }

    pub fn winning_line(&self) -> Option<[Action; 3]> {
        find_winning_line(&self.cells).map(|(_, line)| line)
    }

    pub fn is_full(&self) -> bool {
        self.cells
            .iter()
            .all(|row| row.iter().all(|&cell| cell != Cell::Empty))
    }

    pub fn is_terminal(&self) -> bool {
        self.winner().is_some() || self.is_full()
    }

    /// 1 if X has won, -1 if O has won, 0 otherwise.
    pub fn utility(&self) -> i32 {
        match self.winner() {
            Some(Player::X) => 1,
            Some(Player::O) => -1,
            None => 0,
        }
    }

    pub fn status(&self) -> GameStatus {
        match self.winner() {
            Some(Player::X) => GameStatus::XWon,
            Some(Player::O) => GameStatus::OWon,
            None if self.is_full() => GameStatus::Draw,
            None => GameStatus::InProgress,
        }
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, row) in self.cells.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            let line: Vec<String> = row.iter().map(|cell| cell.to_char().to_string()).collect();
            write!(f, "{}", line.join(" "))?;
        }
        Ok(())
    }
}

impl FromStr for Board {
    type Err = GameError;

    /// Reads nine cells in row-major order. Whitespace, `|` and `/` are
    /// ignored so both `"XX.OO...."` and `"XX. / OO. / ..."` parse.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut cells = [[Cell::Empty; BOARD_SIZE]; BOARD_SIZE];
        let mut count = 0;

        for c in s.chars() {
            if c.is_whitespace() || c == '|' || c == '/' {
                continue;
            }
            let cell = Cell::from_char(c).ok_or_else(|| GameError::InvalidBoard {
                reason: format!("unexpected character '{}'", c),
            })?;
            if count >= BOARD_SIZE * BOARD_SIZE {
                return Err(GameError::InvalidBoard {
                    reason: "more than 9 cells".to_string(),
                });
            }
            cells[count / BOARD_SIZE][count % BOARD_SIZE] = cell;
            count += 1;
        }

        if count != BOARD_SIZE * BOARD_SIZE {
            return Err(GameError::InvalidBoard {
                reason: format!("expected 9 cells, got {}", count),
            });
        }

        Ok(Self { cells })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board(s: &str) -> Board {
        s.parse().unwrap()
    }

    /// Every board reachable from the empty board, in no particular order.
    fn reachable_boards() -> Vec<Board> {
        let mut seen = std::collections::HashSet::new();
        let mut stack = vec![Board::initial_state()];
        while let Some(current) = stack.pop() {
            if !seen.insert(current) {
                continue;
            }
            if current.is_terminal() {
                continue;
            }
            for action in current.legal_actions() {
                stack.push(current.result(action).unwrap());
            }
        }
        seen.into_iter().collect()
    }

    #[test]
    fn test_initial_state_is_empty() {
        let initial = Board::initial_state();
        assert_eq!(initial.filled_count(), 0);
        assert_eq!(initial.player_to_move(), Player::X);
        assert_eq!(initial.legal_actions().len(), 9);
        assert!(!initial.is_terminal());
        assert_eq!(initial.status(), GameStatus::InProgress);
    }

    #[test]
    fn test_player_to_move_follows_filled_count() {
        assert_eq!(board("X........").player_to_move(), Player::O);
        assert_eq!(board("XO.......").player_to_move(), Player::X);
        assert_eq!(board("XX.OO....").player_to_move(), Player::X);
    }

    #[test]
    fn test_result_does_not_mutate_input() {
        let before = board("X...O....");
        let snapshot = before;
        let after = before.result(Action::new(2, 2)).unwrap();

        assert_eq!(before, snapshot);
        assert_eq!(before.cell(Action::new(2, 2)), Some(Cell::Empty));
        assert_eq!(after.cell(Action::new(2, 2)), Some(Cell::X));
        assert_ne!(before, after);
    }

    #[test]
    fn test_result_rejects_occupied_cell() {
        let current = board("X........");
        assert_eq!(
            current.result(Action::new(0, 0)),
            Err(GameError::InvalidAction { row: 0, col: 0 })
        );
    }

    #[test]
    fn test_result_rejects_out_of_range() {
        let current = Board::initial_state();
        assert_eq!(
            current.result(Action::new(3, 0)),
            Err(GameError::InvalidAction { row: 3, col: 0 })
        );
        assert_eq!(
            current.result(Action::new(0, 7)),
            Err(GameError::InvalidAction { row: 0, col: 7 })
        );
    }

    #[test]
    fn test_partial_board_scenario() {
        let current = board("XOX XOO ...");
        let expected: BTreeSet<Action> =
            [Action::new(2, 0), Action::new(2, 1), Action::new(2, 2)].into_iter().collect();
        assert_eq!(current.legal_actions(), expected);
        assert_eq!(current.winner(), None);
        assert!(!current.is_terminal());
    }

    #[test]
    fn test_full_board_draw_scenario() {
        let current = board("XOX XOO OXX");
        assert_eq!(current.winner(), None);
        assert!(current.legal_actions().is_empty());
        assert!(current.is_terminal());
        assert_eq!(current.utility(), 0);
        assert_eq!(current.status(), GameStatus::Draw);
    }

    #[test]
    fn test_top_row_win_scenario() {
        let current = board("XXX OO. ...");
        assert_eq!(current.winner(), Some(Player::X));
        assert_eq!(current.utility(), 1);
        assert!(current.is_terminal());
        assert_eq!(current.status(), GameStatus::XWon);
        assert_eq!(
            current.winning_line(),
            Some([Action::new(0, 0), Action::new(0, 1), Action::new(0, 2)])
        );
    }

    #[test]
    fn test_o_win_has_negative_utility() {
        let current = board("XX. OOO X..");
        assert_eq!(current.winner(), Some(Player::O));
        assert_eq!(current.utility(), -1);
        assert_eq!(current.status(), GameStatus::OWon);
    }

    #[test]
    fn test_utility_is_zero_for_non_terminal() {
        assert_eq!(board("XX.OO....").utility(), 0);
    }

    #[test]
    fn test_reachable_boards_keep_mark_balance() {
        for current in reachable_boards() {
            let x = current.cells().iter().flatten().filter(|&&c| c == Cell::X).count();
            let o = current.cells().iter().flatten().filter(|&&c| c == Cell::O).count();
            assert!(x == o || x == o + 1, "unbalanced board:\n{}", current);
        }
    }

    #[test]
    fn test_turn_alternates_after_each_move() {
        for current in reachable_boards() {
            if current.is_terminal() {
                continue;
            }
            let mover = current.player_to_move();
            for action in current.legal_actions() {
                let next = current.result(action).unwrap();
                assert_eq!(next.player_to_move(), mover.opponent());
            }
        }
    }

    #[test]
    fn test_terminal_iff_winner_or_no_actions() {
        for current in reachable_boards() {
            let expected = current.winner().is_some() || current.legal_actions().is_empty();
            assert_eq!(current.is_terminal(), expected);
        }
    }

    #[test]
    fn test_utility_matches_winner_on_terminal_boards() {
        for current in reachable_boards().into_iter().filter(Board::is_terminal) {
            let expected = match current.winner() {
                Some(Player::X) => 1,
                Some(Player::O) => -1,
                None => 0,
            };
            assert_eq!(current.utility(), expected);
        }
    }

    #[test]
    fn test_from_cells_matches_parsed_board() {
        let cells = [
            [Cell::X, Cell::O, Cell::Empty],
            [Cell::Empty, Cell::X, Cell::Empty],
            [Cell::Empty, Cell::Empty, Cell::O],
        ];
        let current = Board::from_cells(cells);
        assert_eq!(current, board("XO. .X. ..O"));
        assert_eq!(current.cells(), &cells);
        assert_eq!(current.player_to_move(), Player::X);
    }

    #[test]
    fn test_display_and_parse_agree() {
        let current = board("XO. .X. ..O");
        assert_eq!(current.to_string(), "X O .\n. X .\n. . O");
        assert_eq!(current.to_string().parse::<Board>().unwrap(), current);
    }

    #[test]
    fn test_parse_rejects_wrong_length_and_characters() {
        assert!("XO".parse::<Board>().is_err());
        assert!("XO.XO.XO.X".parse::<Board>().is_err());
        assert!("XO.XZ.XO.".parse::<Board>().is_err());
    }
}
