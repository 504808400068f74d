//! Spinner XO - party-game companion for team tic-tac-toe.
//!
//! Players join team X or team O. A wheel picks who places the next mark,
//! the chosen player moves, and the wheel spins again until a line is
//! completed or the board fills up.
//!
//! # Architecture
//!
//! - **Roster**: players, teams, settings and their persistence
//! - **Picker**: fairness-constrained random choice of the next mover
//! - **Games**: tic-tac-toe board and win/draw evaluation
//! - **Flow**: the screen state machine driving everything
//!
//! # Example
//!
//! ```
//! use spinner_xo::{
//!     Event, ManualScheduler, Mark, MemoryStore, Player, RosterStore, Screen, Timings,
//!     TurnFlowController,
//! };
//!
//! let mut flow = TurnFlowController::new(
//!     RosterStore::new(MemoryStore::new()),
//!     ManualScheduler::new(),
//!     Timings::default(),
//! );
//! assert_eq!(*flow.screen(), Screen::Setup);
//!
//! let roster = vec![Player::new("Alice", Mark::X), Player::new("Bob", Mark::O)];
//! flow.handle(Event::SubmitRoster(roster));
//! assert_eq!(*flow.screen(), Screen::PickerScreen);
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Private module declarations
mod config;
mod flow;
mod games;
mod picker;
mod roster;

// Crate-level exports - Configuration
pub use config::{AppConfig, ConfigError, Timings};

// Crate-level exports - Roster
pub use roster::{
    FileStore, KeyValueStore, MAX_PLAYERS, Mark, MemoryStore, Player, PlayerId, RosterDraft,
    RosterError, RosterRecord, RosterStore, STORAGE_KEY, Settings, StoreError, has_both_teams,
    validate_players, validate_roster,
};

// Crate-level exports - Picker
pub use picker::{SpinPlan, pick, plan_spin, segment_at};

// Crate-level exports - Game types (tic-tac-toe)
pub use games::tictactoe::rules::{LINES, check_winner, evaluate, is_draw, is_full};
pub use games::tictactoe::{Board, CELLS, GameStatus, MoveError, Placement, Square, TicTacToe, Win};

// Crate-level exports - Turn flow
pub use flow::{
    Event, IgnoreReason, ManualScheduler, Reaction, Scheduler, Screen, SpinStatus, TimerKind,
    TimerToken, TokioScheduler, TurnFlowController, View, WinnerInfo,
};
