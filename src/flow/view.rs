//! What each screen renders. The presentation layer reads a [`View`] and
//! answers with [`Event`](super::Event)s.

use crate::games::tictactoe::{Board, GameStatus};
use crate::roster::{Player, PlayerId, Settings};

use super::screen::{SpinStatus, WinnerInfo};

/// Borrowed snapshot of the active screen's data.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum View<'a> {
    /// Roster editing.
    Setup {
        /// Currently stored roster, the starting point for the edit.
        players: &'a [Player],
    },
    /// Wheel.
    Picker {
        /// Full roster; wheel segments follow this order.
        players: &'a [Player],
        /// Picker settings.
        settings: Settings,
        /// Last picked player, if still on the roster.
        last_picked: Option<&'a PlayerId>,
        /// Wheel progress.
        spin: &'a SpinStatus,
    },
    /// Board.
    Game {
        /// Board cells.
        board: &'a Board,
        /// Player placing this turn's mark.
        mover: Option<&'a Player>,
        /// In progress, won or drawn.
        status: &'a GameStatus,
        /// Winner details while a won board is on display.
        winner: Option<&'a WinnerInfo>,
    },
}
