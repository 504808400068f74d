//! Screens, events and reactions of the turn-flow state machine.

use derive_getters::Getters;
use serde::{Deserialize, Serialize};

use crate::games::tictactoe::{MoveError, Win};
use crate::picker::SpinPlan;
use crate::roster::{Mark, Player, PlayerId, RosterError, Settings};

use super::timer::TimerToken;

/// The active screen. Exactly one is active at any time.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::Display,
)]
pub enum Screen {
    /// Roster editing.
    #[display("Setup")]
    Setup,
    /// Wheel spin choosing the next mover.
    #[display("Picker")]
    PickerScreen,
    /// The board, waiting for the chosen mover's placement.
    #[display("Game")]
    Game,
}

/// Input the controller reacts to, one at a time.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    /// Setup finished with this roster.
    SubmitRoster(Vec<Player>),
    /// The user wants to edit the roster.
    EditRequested,
    /// Picker settings changed.
    SettingsChanged(Settings),
    /// The user asked the wheel to spin.
    SpinRequested,
    /// The current mover placed their mark at a board index.
    PlaceMark(usize),
    /// A player was deleted outside the Setup screen.
    ///
    /// For hosts that edit the stored roster directly (an admin panel, a
    /// second device). The terminal front end edits through the Setup draft
    /// and submits the whole roster instead.
    PlayerRemoved(PlayerId),
    /// A scheduled timer fired.
    TimerElapsed(TimerToken),
}

/// Why an event was ignored. Ignored events never change state.
#[derive(Debug, Clone, PartialEq, derive_more::Display)]
pub enum IgnoreReason {
    /// The event belongs to another screen.
    #[display("Event needs the {} screen but {} is active", expected, actual)]
    WrongScreen {
        /// Screen the event applies to.
        expected: Screen,
        /// Screen that was active.
        actual: Screen,
    },

    /// A submitted roster failed validation.
    #[display("Roster rejected: {}", _0)]
    InvalidRoster(RosterError),

    /// A spin is already running or its result is on display.
    #[display("Wheel is already spinning")]
    AlreadySpinning,

    /// Fewer than two players to choose from.
    #[display("Need at least two players to spin, have {}", _0)]
    NotEnoughPlayers(usize),

    /// The placement was not legal.
    #[display("Placement rejected: {}", _0)]
    Move(MoveError),

    /// No mover has been picked for this turn.
    #[display("No current mover")]
    NoMover,

    /// A timer fired that is no longer pending.
    #[display("Stale timer {:?}", _0)]
    StaleTimer(TimerToken),

    /// No player with this id.
    #[display("Unknown player {}", _0)]
    UnknownPlayer(PlayerId),

    /// The controller has been shut down.
    #[display("Controller is shut down")]
    ShutDown,
}

/// Result of handing an event to the controller.
#[derive(Debug, Clone, PartialEq)]
pub enum Reaction {
    /// The event was applied.
    Applied,
    /// The event was a no-op.
    Ignored(IgnoreReason),
}

impl Reaction {
    /// Returns true if the event was applied.
    pub fn is_applied(&self) -> bool {
        matches!(self, Reaction::Applied)
    }
}

/// Progress of the wheel on the picker screen.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum SpinStatus {
    /// Waiting for a spin request.
    #[default]
    Idle,
    /// Spinning; the result is decided but not yet revealed.
    Spinning(SpinPlan),
    /// Result revealed; the game screen follows after a pause.
    Revealed(SpinPlan),
}

/// The player whose placement completed a line, and the line itself.
#[derive(Debug, Clone, PartialEq, Eq, Getters)]
pub struct WinnerInfo {
    player: Player,
    mark: Mark,
    line: [usize; 3],
}

impl WinnerInfo {
    /// Combines the placing player with the evaluated line.
    pub fn new(player: Player, win: Win) -> Self {
        Self {
            player,
            mark: win.mark,
            line: win.line,
        }
    }
}
