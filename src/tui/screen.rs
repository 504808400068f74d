//! Screen trait and action type for the terminal front end.

use crossterm::event::KeyEvent;
use ratatui::Frame;
use spinner_xo::{Event, View};

/// The result of handling a key on a screen.
#[derive(Debug, Clone)]
pub enum UiAction {
    /// Nothing for the controller.
    Stay,
    /// Forward an event to the controller.
    Send(Event),
    /// Exit the application cleanly.
    Quit,
}

/// Implemented by each terminal screen.
///
/// Screens keep only presentation state (text input, cursor, animation
/// clock); everything else comes from the controller's [`View`].
pub trait ScreenView {
    /// Renders the screen into the provided [`Frame`].
    fn render(&self, frame: &mut Frame, view: &View<'_>);

    /// Handles a key event and returns the resulting [`UiAction`].
    fn handle_key(&mut self, key: KeyEvent, view: &View<'_>) -> UiAction;

    /// Called once per loop iteration before rendering.
    fn tick(&mut self, _view: &View<'_>) {}
}
