//! Turn flow: screens, timed transitions and the controller tying the
//! roster, picker and board together.

mod controller;
mod screen;
mod timer;
mod view;

pub use controller::TurnFlowController;
pub use screen::{Event, IgnoreReason, Reaction, Screen, SpinStatus, WinnerInfo};
pub use timer::{ManualScheduler, Scheduler, TimerKind, TimerToken, TokioScheduler};
pub use view::View;
