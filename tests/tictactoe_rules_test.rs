//! Tests for board evaluation and placements.

use spinner_xo::{
    Board, CELLS, GameStatus, LINES, Mark, MoveError, Placement, TicTacToe, check_winner,
    evaluate, is_draw, is_full,
};

const X: Option<Mark> = Some(Mark::X);
const O: Option<Mark> = Some(Mark::O);
const E: Option<Mark> = None;

#[test]
fn test_top_row_wins_for_x() {
    let board = Board::from_marks([X, X, X, O, O, E, E, E, E]);
    let win = evaluate(&board).expect("top row is complete");
    assert_eq!(win.mark, Mark::X);
    assert_eq!(win.line, [0, 1, 2]);
}

#[test]
fn test_diagonal_win_for_o() {
    let board = Board::from_marks([O, X, X, E, O, X, E, E, O]);
    let win = evaluate(&board).expect("diagonal is complete");
    assert_eq!(win.mark, Mark::O);
    assert_eq!(win.line, [0, 4, 8]);
}

#[test]
fn test_full_board_without_line_is_draw() {
    let board = Board::from_marks([X, O, X, O, X, O, O, X, O]);
    assert!(evaluate(&board).is_none());
    assert!(is_full(&board));
    assert!(is_draw(&board));
}

#[test]
fn test_partial_board_without_line_is_neither() {
    let board = Board::from_marks([X, O, E, E, X, E, E, E, O]);
    assert!(evaluate(&board).is_none());
    assert!(!is_full(&board));
    assert!(!is_draw(&board));
}

#[test]
fn test_full_board_with_line_is_a_win_not_a_draw() {
    let board = Board::from_marks([X, X, X, O, O, X, X, O, O]);
    assert!(is_full(&board));
    assert!(evaluate(&board).is_some());
    assert!(!is_draw(&board));
}

#[test]
fn test_first_line_in_order_wins_when_several_match() {
    // Top row and left column are both X; rows come first.
    let board = Board::from_marks([X, X, X, X, O, O, X, O, O]);
    let win = evaluate(&board).expect("two complete lines");
    assert_eq!(win.line, [0, 1, 2]);
}

#[test]
fn test_line_table_covers_rows_columns_diagonals() {
    assert_eq!(LINES.len(), 8);
    assert_eq!(LINES[0], [0, 1, 2]);
    assert_eq!(LINES[3], [0, 3, 6]);
    assert_eq!(LINES[7], [2, 4, 6]);
}

#[test]
fn test_game_detects_win_on_placement() {
    let mut game = TicTacToe::new();
    for (pos, mark) in [(0, Mark::X), (3, Mark::O), (1, Mark::X), (4, Mark::O)] {
        assert_eq!(game.place(pos, mark), Ok(Placement::Continue));
    }
    match game.place(2, Mark::X) {
        Ok(Placement::Won(win)) => {
            assert_eq!(win.mark, Mark::X);
            assert_eq!(win.line, [0, 1, 2]);
        }
        other => panic!("expected a win, got {:?}", other),
    }
    assert!(game.status().is_over());
    assert_eq!(game.place(5, Mark::O), Err(MoveError::GameOver));
}

#[test]
fn test_same_team_may_move_twice_in_a_row() {
    let mut game = TicTacToe::new();
    assert_eq!(game.place(4, Mark::O), Ok(Placement::Continue));
    assert_eq!(game.place(0, Mark::O), Ok(Placement::Continue));
    assert_eq!(game.history(), &[4, 0]);
}

#[test]
fn test_occupied_and_out_of_range_cells_are_rejected() {
    let mut game = TicTacToe::new();
    game.place(4, Mark::X).expect("empty cell");
    let before = game.board().clone();

    assert_eq!(game.place(4, Mark::O), Err(MoveError::SquareOccupied(4)));
    assert_eq!(game.place(9, Mark::O), Err(MoveError::OutOfBounds(9)));
    assert_eq!(game.board(), &before);
    assert_eq!(*game.status(), GameStatus::InProgress);
}

#[test]
fn test_draw_detected_on_last_placement() {
    let mut game = TicTacToe::new();
    let moves = [
        (0, Mark::X),
        (1, Mark::O),
        (2, Mark::X),
        (4, Mark::O),
        (3, Mark::X),
        (5, Mark::O),
        (7, Mark::X),
        (6, Mark::O),
    ];
    for (pos, mark) in moves {
        assert_eq!(game.place(pos, mark), Ok(Placement::Continue));
    }
    assert_eq!(game.place(8, Mark::X), Ok(Placement::Draw));
    assert_eq!(*game.status(), GameStatus::Draw);
}

/// Lines built from coordinates: rows, then columns, then both diagonals.
fn reference_lines() -> Vec<[usize; 3]> {
    let mut lines = Vec::new();
    for r in 0..3 {
        lines.push([r * 3, r * 3 + 1, r * 3 + 2]);
    }
    for c in 0..3 {
        lines.push([c, c + 3, c + 6]);
    }
    lines.push([0, 4, 8]);
    lines.push([2, 4, 6]);
    lines
}

/// Decodes `n` in base 3 into a board: 0 empty, 1 X, 2 O.
fn board_from_code(mut n: u32) -> [Option<Mark>; CELLS] {
    let mut cells = [None; CELLS];
    for cell in cells.iter_mut() {
        *cell = match n % 3 {
            1 => Some(Mark::X),
            2 => Some(Mark::O),
            _ => None,
        };
        n /= 3;
    }
    cells
}

#[test]
fn test_line_table_matches_coordinate_order() {
    assert_eq!(LINES.to_vec(), reference_lines());
}

#[test]
fn test_every_line_wins_for_each_mark() {
    for line in reference_lines() {
        for mark in [Mark::X, Mark::O] {
            let mut cells = [None; CELLS];
            for idx in line {
                cells[idx] = Some(mark);
            }
            let win = evaluate(&Board::from_marks(cells)).expect("line is complete");
            assert_eq!(win.mark, mark);
            assert_eq!(win.line, line);
        }
    }
}

#[test]
fn test_outcome_agrees_with_reference_on_every_board() {
    let lines = reference_lines();
    for code in 0..3u32.pow(9) {
        let cells = board_from_code(code);
        let board = Board::from_marks(cells);

        let expected = lines.iter().find_map(|line| {
            let mark = cells[line[0]]?;
            line.iter()
                .all(|&i| cells[i] == Some(mark))
                .then_some((mark, *line))
        });
        let full = cells.iter().all(Option::is_some);

        let actual = evaluate(&board).map(|win| (win.mark, win.line));
        assert_eq!(actual, expected, "board {:?}", cells);
        assert_eq!(check_winner(&board), expected.map(|(mark, _)| mark));
        assert_eq!(is_full(&board), full, "board {:?}", cells);
        assert_eq!(is_draw(&board), full && expected.is_none(), "board {:?}", cells);
        if !full && expected.is_none() {
            assert!(!is_draw(&board));
            assert!(evaluate(&board).is_none());
        }
    }
}
