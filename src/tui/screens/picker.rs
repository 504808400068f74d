//! Picker screen - the wheel choosing who moves next.

use std::time::Instant;

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph},
};
use spinner_xo::{Event, Settings, SpinStatus, View};
use tracing::{debug, instrument};

use super::mark_color;
use crate::tui::screen::{ScreenView, UiAction};

/// State for the picker screen. Only the animation clock lives here.
#[derive(Debug, Default)]
pub struct PickerScreen {
    spin_started: Option<Instant>,
}

impl PickerScreen {
    /// Creates a new picker screen.
    #[instrument]
    pub fn new() -> Self {
        debug!("Initializing PickerScreen");
        Self::default()
    }

    /// Segment currently under the pointer, if the wheel has moved.
    fn highlighted(&self, spin: &SpinStatus) -> Option<usize> {
        match spin {
            SpinStatus::Idle => None,
            SpinStatus::Spinning(plan) => {
                let elapsed = self.spin_started.map(|t| t.elapsed()).unwrap_or_default();
                Some(plan.segment_at(elapsed))
            }
            SpinStatus::Revealed(plan) => Some(*plan.index()),
        }
    }
}

impl ScreenView for PickerScreen {
    fn tick(&mut self, view: &View<'_>) {
        let View::Picker { spin, .. } = view else {
            return;
        };
        match spin {
            SpinStatus::Spinning(_) if self.spin_started.is_none() => {
                self.spin_started = Some(Instant::now());
            }
            SpinStatus::Idle => self.spin_started = None,
            _ => {}
        }
    }

    #[instrument(skip(self, frame, view))]
    fn render(&self, frame: &mut Frame, view: &View<'_>) {
        let View::Picker {
            players,
            settings,
            last_picked,
            spin,
        } = view
        else {
            return;
        };

        let area = frame.area();
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Min(5),
                Constraint::Length(3),
                Constraint::Length(3),
            ])
            .split(area);

        let title = Paragraph::new("Who's playing next?")
            .style(Style::default().add_modifier(Modifier::BOLD))
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL));
        frame.render_widget(title, chunks[0]);

        let highlighted = self.highlighted(spin);
        let items: Vec<ListItem> = players
            .iter()
            .enumerate()
            .map(|(i, p)| {
                let pointer = if highlighted == Some(i) { "▶ " } else { "  " };
                let recent = if Some(p.id()) == *last_picked { "  (last)" } else { "" };
                let mut style = Style::default().fg(mark_color(*p.mark()));
                if highlighted == Some(i) {
                    style = style.add_modifier(Modifier::REVERSED | Modifier::BOLD);
                }
                ListItem::new(format!("{}[{}] {}{}", pointer, p.mark(), p.name(), recent))
                    .style(style)
            })
            .collect();
        let wheel = List::new(items).block(Block::default().borders(Borders::ALL).title("Wheel"));
        frame.render_widget(wheel, chunks[1]);

        let status = match spin {
            SpinStatus::Idle => Line::from("Press Space to spin"),
            SpinStatus::Spinning(_) => Line::from("Spinning..."),
            SpinStatus::Revealed(plan) => {
                let mark = *plan.player().mark();
                Line::from(vec![
                    Span::styled(
                        plan.player().name().clone(),
                        Style::default()
                            .fg(Color::Green)
                            .add_modifier(Modifier::BOLD),
                    ),
                    Span::raw(" will place the next "),
                    Span::styled(
                        mark.to_string(),
                        Style::default()
                            .fg(mark_color(mark))
                            .add_modifier(Modifier::BOLD),
                    ),
                    Span::raw("!"),
                ])
            }
        };
        let status = Paragraph::new(status)
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL));
        frame.render_widget(status, chunks[2]);

        let help = format!(
            "Space: spin | a: avoid picking the same player twice [{}] | e: edit players | q: quit",
            if settings.avoid_repeat { "x" } else { " " }
        );
        let help = Paragraph::new(help)
            .style(Style::default().fg(Color::DarkGray))
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL));
        frame.render_widget(help, chunks[3]);
    }

    #[instrument(skip(self, key, view))]
    fn handle_key(&mut self, key: KeyEvent, view: &View<'_>) -> UiAction {
        let View::Picker { settings, .. } = view else {
            return UiAction::Stay;
        };
        match key.code {
            KeyCode::Char(' ') | KeyCode::Enter => UiAction::Send(Event::SpinRequested),
            KeyCode::Char('a') | KeyCode::Char('A') => {
                UiAction::Send(Event::SettingsChanged(Settings {
                    avoid_repeat: !settings.avoid_repeat,
                }))
            }
            KeyCode::Char('e') | KeyCode::Char('E') => UiAction::Send(Event::EditRequested),
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => UiAction::Quit,
            _ => UiAction::Stay,
        }
    }
}
