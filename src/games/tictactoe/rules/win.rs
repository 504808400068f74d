//! Win detection logic for tic-tac-toe.

use super::super::{Board, Square, Win};
use crate::roster::Mark;
use tracing::instrument;

/// The eight winning lines in priority order: rows, columns, diagonals.
pub const LINES: [[usize; 3]; 8] = [
    // Rows
    [0, 1, 2],
    [3, 4, 5],
    [6, 7, 8],
    // Columns
    [0, 3, 6],
    [1, 4, 7],
    [2, 5, 8],
    // Diagonals
    [0, 4, 8],
    [2, 4, 6],
];

/// Finds the first completed line in [`LINES`] order.
///
/// When a board holds several completed lines (even of different marks)
/// the earliest one in the fixed order wins.
#[instrument(skip(board))]
pub fn evaluate(board: &Board) -> Option<Win> {
    for line in LINES {
        let [a, b, c] = line;
        if let Some(Square::Occupied(mark)) = board.get(a)
            && board.get(b) == Some(Square::Occupied(mark))
            && board.get(c) == Some(Square::Occupied(mark))
        {
            return Some(Win { mark, line });
        }
    }
    None
}

/// Returns the winning mark, if any.
#[instrument(skip(board))]
pub fn check_winner(board: &Board) -> Option<Mark> {
    evaluate(board).map(|win| win.mark)
}

#[cfg(test)]
mod tests {
    use super::*;

    const X: Option<Mark> = Some(Mark::X);
    const O: Option<Mark> = Some(Mark::O);
    const E: Option<Mark> = None;

    #[test]
    fn test_no_winner_empty_board() {
        assert_eq!(evaluate(&Board::new()), None);
    }

    #[test]
    fn test_winner_top_row() {
        let board = Board::from_marks([X, X, X, E, E, E, E, E, E]);
        assert_eq!(
            evaluate(&board),
            Some(Win {
                mark: Mark::X,
                line: [0, 1, 2]
            })
        );
    }

    #[test]
    fn test_winner_anti_diagonal() {
        let board = Board::from_marks([X, X, O, E, O, E, O, E, X]);
        assert_eq!(
            evaluate(&board),
            Some(Win {
                mark: Mark::O,
                line: [2, 4, 6]
            })
        );
    }

    #[test]
    fn test_no_winner_incomplete() {
        let board = Board::from_marks([X, X, E, E, E, E, E, E, E]);
        assert_eq!(check_winner(&board), None);
    }

    #[test]
    fn test_first_line_in_order_wins() {
        // Rows 0 and 2 are both complete; row 0 comes first.
        let board = Board::from_marks([O, O, O, X, E, E, X, X, X]);
        assert_eq!(
            evaluate(&board),
            Some(Win {
                mark: Mark::O,
                line: [0, 1, 2]
            })
        );
    }

    #[test]
    fn test_evaluate_is_idempotent() {
        let board = Board::from_marks([X, O, E, E, X, O, E, E, X]);
        assert_eq!(evaluate(&board), evaluate(&board));
    }
}
