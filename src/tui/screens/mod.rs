//! Screen implementations, one per controller screen.

mod game;
mod picker;
mod setup;

pub use game::GameScreen;
pub use picker::PickerScreen;
pub use setup::SetupScreen;

use crossterm::event::KeyEvent;
use ratatui::{Frame, style::Color};
use spinner_xo::{Mark, Screen, View};

use super::screen::{ScreenView, UiAction};

/// Team colour used across all screens.
pub fn mark_color(mark: Mark) -> Color {
    match mark {
        Mark::X => Color::Cyan,
        Mark::O => Color::Magenta,
    }
}

/// The screen currently on display.
#[derive(Debug)]
pub enum ActiveScreen {
    /// Roster editing.
    Setup(SetupScreen),
    /// Wheel.
    Picker(PickerScreen),
    /// Board.
    Game(GameScreen),
}

impl ActiveScreen {
    /// Builds fresh presentation state for `screen`.
    pub fn for_screen(screen: Screen, view: &View<'_>) -> Self {
        match screen {
            Screen::Setup => {
                let players = match view {
                    View::Setup { players } => players.to_vec(),
                    _ => Vec::new(),
                };
                Self::Setup(SetupScreen::new(players))
            }
            Screen::PickerScreen => Self::Picker(PickerScreen::new()),
            Screen::Game => Self::Game(GameScreen::new()),
        }
    }

    fn inner_mut(&mut self) -> &mut dyn ScreenView {
        match self {
            Self::Setup(s) => s,
            Self::Picker(s) => s,
            Self::Game(s) => s,
        }
    }

    fn inner(&self) -> &dyn ScreenView {
        match self {
            Self::Setup(s) => s,
            Self::Picker(s) => s,
            Self::Game(s) => s,
        }
    }
}

impl ScreenView for ActiveScreen {
    fn render(&self, frame: &mut Frame, view: &View<'_>) {
        self.inner().render(frame, view);
    }

    fn handle_key(&mut self, key: KeyEvent, view: &View<'_>) -> UiAction {
        self.inner_mut().handle_key(key, view)
    }

    fn tick(&mut self, view: &View<'_>) {
        self.inner_mut().tick(view);
    }
}
