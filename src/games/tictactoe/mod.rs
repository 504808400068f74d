//! Team tic-tac-toe: board, rules and engine.

mod game;
pub mod rules;
mod types;

pub use game::{MoveError, Placement, TicTacToe};
pub use types::{Board, CELLS, GameStatus, Square, Win};
