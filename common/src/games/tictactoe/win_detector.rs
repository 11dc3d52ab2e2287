use super::types::{Action, Cell, Player};

/// Rows top to bottom, columns left to right, then the two diagonals.
/// `check_win` reports the first completed line in this order.
const WINNING_LINES: [[(usize, usize); 3]; 8] = [
    [(0, 0), (0, 1), (0, 2)],
    [(1, 0), (1, 1), (1, 2)],
    [(2, 0), (2, 1), (2, 2)],
    [(0, 0), (1, 0), (2, 0)],
    [(0, 1), (1, 1), (2, 1)],
    [(0, 2), (1, 2), (2, 2)],
    [(0, 0), (1, 1), (2, 2)],
    [(2, 0), (1, 1), (0, 2)],
];

pub fn check_win(cells: &[[Cell; 3]; 3]) -> Option<Player> {
    find_winning_line(cells).map(|(player, _)| player)
}

pub fn find_winning_line(cells: &[[Cell; 3]; 3]) -> Option<(Player, [Action; 3])> {
    for line in WINNING_LINES {
        let [a, b, c] = line.map(|(row, col)| cells[row][col]);
        if a == Cell::Empty || a != b || b != c {
            continue;
        }
        if let Some(player) = a.player() {
            return Some((player, line.map(|(row, col)| Action::new(row, col))));
        }
    }
    None
}
