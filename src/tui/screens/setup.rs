//! Setup screen - build the two teams.

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
};
use spinner_xo::{Event, Mark, Player, RosterDraft, View};
use tracing::{debug, info, instrument};

use super::mark_color;
use crate::tui::screen::{ScreenView, UiAction};

/// State for the setup screen.
#[derive(Debug)]
pub struct SetupScreen {
    draft: RosterDraft,
    name_input: String,
    selected_mark: Mark,
    list_state: ListState,
    error_message: Option<String>,
}

impl SetupScreen {
    /// Creates a setup screen seeded with the stored roster.
    #[instrument(skip(players), fields(count = players.len()))]
    pub fn new(players: Vec<Player>) -> Self {
        debug!("Initializing SetupScreen");
        let mut list_state = ListState::default();
        if !players.is_empty() {
            list_state.select(Some(0));
        }
        Self {
            draft: RosterDraft::new(players),
            name_input: String::new(),
            selected_mark: Mark::X,
            list_state,
            error_message: None,
        }
    }

    #[instrument(skip(self))]
    fn add_player(&mut self) {
        match self.draft.add_player(&self.name_input, self.selected_mark) {
            Ok(player) => {
                info!(name = %player.name(), "Added player");
                self.name_input.clear();
                self.error_message = None;
                self.list_state.select(Some(self.draft.players().len() - 1));
            }
            Err(e) => self.error_message = Some(e.to_string()),
        }
    }

    #[instrument(skip(self))]
    fn delete_selected(&mut self) {
        let Some(idx) = self.list_state.selected() else {
            return;
        };
        let Some(id) = self.draft.players().get(idx).map(|p| p.id().clone()) else {
            return;
        };
        self.draft.remove_player(&id);
        let len = self.draft.players().len();
        self.list_state
            .select(if len == 0 { None } else { Some(idx.min(len - 1)) });
    }

    fn select_previous(&mut self) {
        let len = self.draft.players().len();
        if len == 0 {
            return;
        }
        let i = match self.list_state.selected() {
            Some(i) if i > 0 => i - 1,
            _ => len - 1,
        };
        self.list_state.select(Some(i));
    }

    fn select_next(&mut self) {
        let len = self.draft.players().len();
        if len == 0 {
            return;
        }
        let i = match self.list_state.selected() {
            Some(i) => (i + 1) % len,
            None => 0,
        };
        self.list_state.select(Some(i));
    }
}

impl ScreenView for SetupScreen {
    #[instrument(skip(self, frame, _view))]
    fn render(&self, frame: &mut Frame, _view: &View<'_>) {
        let area = frame.area();
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Length(3),
                Constraint::Length(1),
                Constraint::Min(5),
                Constraint::Length(3),
            ])
            .split(area);

        let title = Paragraph::new("Spinner XO: assign players to Team X and Team O")
            .style(
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            )
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL));
        frame.render_widget(title, chunks[0]);

        let input = Paragraph::new(self.name_input.as_str())
            .style(Style::default().fg(mark_color(self.selected_mark)))
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(format!("New player for Team {} (Tab switches)", self.selected_mark)),
            );
        frame.render_widget(input, chunks[1]);

        let error = Paragraph::new(self.error_message.as_deref().unwrap_or(""))
            .style(Style::default().fg(Color::Red))
            .alignment(Alignment::Center);
        frame.render_widget(error, chunks[2]);

        let teams = format!(
            "Roster: Team X ({}) / Team O ({})",
            self.draft.team(Mark::X).count(),
            self.draft.team(Mark::O).count()
        );
        let items: Vec<ListItem> = self
            .draft
            .players()
            .iter()
            .map(|p| {
                ListItem::new(format!("[{}] {}", p.mark(), p.name()))
                    .style(Style::default().fg(mark_color(*p.mark())))
            })
            .collect();
        let list = List::new(items)
            .block(Block::default().borders(Borders::ALL).title(teams))
            .highlight_style(Style::default().add_modifier(Modifier::REVERSED))
            .highlight_symbol("> ");
        let mut list_state = self.list_state.clone();
        frame.render_stateful_widget(list, chunks[3], &mut list_state);

        let help = if self.draft.can_start() {
            "Enter: add / start (empty name) | ↑↓ Del: remove | Esc: quit"
        } else {
            "Enter: add | ↑↓ Del: remove | Each team needs at least one player | Esc: quit"
        };
        let help = Paragraph::new(help)
            .style(Style::default().fg(Color::DarkGray))
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL));
        frame.render_widget(help, chunks[4]);
    }

    #[instrument(skip(self, key, _view))]
    fn handle_key(&mut self, key: KeyEvent, _view: &View<'_>) -> UiAction {
        match key.code {
            KeyCode::Esc => UiAction::Quit,
            KeyCode::Tab => {
                self.selected_mark = self.selected_mark.opponent();
                UiAction::Stay
            }
            KeyCode::Enter if self.name_input.trim().is_empty() && self.draft.can_start() => {
                info!(players = self.draft.players().len(), "Submitting roster");
                UiAction::Send(Event::SubmitRoster(self.draft.players().to_vec()))
            }
            KeyCode::Enter => {
                self.add_player();
                UiAction::Stay
            }
            KeyCode::Backspace => {
                self.name_input.pop();
                UiAction::Stay
            }
            KeyCode::Delete => {
                self.delete_selected();
                UiAction::Stay
            }
            KeyCode::Up => {
                self.select_previous();
                UiAction::Stay
            }
            KeyCode::Down => {
                self.select_next();
                UiAction::Stay
            }
            KeyCode::Char(c) => {
                self.name_input.push(c);
                UiAction::Stay
            }
            _ => UiAction::Stay,
        }
    }
}
