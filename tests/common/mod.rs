//! Helpers shared by the integration tests.

use arcade_tictactoe::{Board, Mark, check_outcome};
use std::collections::HashSet;

/// Every board reachable from the empty board with X moving first,
/// stopping at finished games.
pub fn reachable_boards() -> Vec<Board> {
    let mut seen = HashSet::new();
    let mut boards = Vec::new();
    let mut stack = vec![Board::new()];

    while let Some(board) = stack.pop() {
        if !seen.insert(board) {
            continue;
        }
        boards.push(board);
        if check_outcome(&board).is_terminal() {
            continue;
        }
        let mark = if board.count(Mark::X) == board.count(Mark::O) {
            Mark::X
        } else {
            Mark::O
        };
        for pos in board.empty_positions() {
            let mut next = board;
            next.place(pos, mark).expect("empty square");
            stack.push(next);
        }
    }
    boards
}
