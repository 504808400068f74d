//! Tic-tac-toe engine: one board, one status, placements in any team order.

use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

use super::rules;
use super::types::{Board, CELLS, GameStatus, Win};
use crate::roster::Mark;

/// Error returned when a placement is not legal.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum MoveError {
    /// The square at the index is already occupied.
    #[display("Square {} is already occupied", _0)]
    SquareOccupied(#[error(not(source))] usize),

    /// The index is outside the board.
    #[display("Position {} out of bounds (must be 0-8)", _0)]
    OutOfBounds(#[error(not(source))] usize),

    /// The game is already over.
    #[display("Game is already over")]
    GameOver,
}

/// What a legal placement did to the game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Placement {
    /// The game continues.
    Continue,
    /// The placement completed a line.
    Won(Win),
    /// The placement filled the board without a line.
    Draw,
}

/// Tic-tac-toe game engine.
///
/// Turn order is not enforced: the caller decides which mark moves next.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TicTacToe {
    board: Board,
    status: GameStatus,
    history: Vec<usize>,
}

impl TicTacToe {
    /// Creates a new game on an empty board.
    #[instrument]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Returns the game status.
    pub fn status(&self) -> &GameStatus {
        &self.status
    }

    /// Indices played so far, in order.
    pub fn history(&self) -> &[usize] {
        &self.history
    }

    /// Places `mark` at `pos` (0-8) and re-evaluates the board.
    ///
    /// # Errors
    ///
    /// Returns [`MoveError`] if the game is over, the index is out of range
    /// or the square is taken. The game is unchanged on error.
    #[instrument(skip(self))]
    pub fn place(&mut self, pos: usize, mark: Mark) -> Result<Placement, MoveError> {
        if self.status.is_over() {
            return Err(MoveError::GameOver);
        }
        if pos >= CELLS {
            return Err(MoveError::OutOfBounds(pos));
        }
        if !self.board.place(pos, mark) {
            return Err(MoveError::SquareOccupied(pos));
        }
        self.history.push(pos);
        debug!(moves = self.history.len(), board = %self.board.display(), "Mark placed");

        if let Some(win) = rules::evaluate(&self.board) {
            info!(mark = %win.mark, line = ?win.line, "Line completed");
            self.status = GameStatus::Won(win);
            return Ok(Placement::Won(win));
        }
        if rules::is_full(&self.board) {
            info!("Board full, draw");
            self.status = GameStatus::Draw;
            return Ok(Placement::Draw);
        }
        Ok(Placement::Continue)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_occupied_square_rejected() {
        let mut game = TicTacToe::new();
        game.place(4, Mark::X).unwrap();
        let before = game.clone();
        assert_eq!(game.place(4, Mark::O), Err(MoveError::SquareOccupied(4)));
        assert_eq!(game, before);
    }

    #[test]
    fn test_same_mark_may_move_twice() {
        let mut game = TicTacToe::new();
        assert_eq!(game.place(0, Mark::X), Ok(Placement::Continue));
        assert_eq!(game.place(1, Mark::X), Ok(Placement::Continue));
        assert_eq!(
            game.place(2, Mark::X),
            Ok(Placement::Won(Win {
                mark: Mark::X,
                line: [0, 1, 2]
            }))
        );
        assert_eq!(game.place(5, Mark::O), Err(MoveError::GameOver));
    }

    #[test]
    fn test_out_of_bounds() {
        let mut game = TicTacToe::new();
        assert_eq!(game.place(9, Mark::O), Err(MoveError::OutOfBounds(9)));
        assert!(game.history().is_empty());
    }
}
