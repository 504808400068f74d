//! Game screen - the board for the chosen player's move.

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};
use spinner_xo::{Board, CELLS, Event, GameStatus, Player, Square, View, WinnerInfo};
use tracing::{debug, instrument};

use super::mark_color;
use crate::tui::screen::{ScreenView, UiAction};

/// State for the game screen: a cursor over the nine cells.
#[derive(Debug)]
pub struct GameScreen {
    cursor: usize,
}

impl GameScreen {
    /// Creates a game screen with the cursor on the centre cell.
    #[instrument]
    pub fn new() -> Self {
        debug!("Initializing GameScreen");
        Self { cursor: 4 }
    }

    fn move_cursor(&mut self, code: KeyCode) {
        let (row, col) = (self.cursor / 3, self.cursor % 3);
        let (row, col) = match code {
            KeyCode::Up => ((row + 2) % 3, col),
            KeyCode::Down => ((row + 1) % 3, col),
            KeyCode::Left => (row, (col + 2) % 3),
            KeyCode::Right => (row, (col + 1) % 3),
            _ => (row, col),
        };
        self.cursor = row * 3 + col;
    }

    fn board_lines(
        &self,
        board: &Board,
        winner: Option<&WinnerInfo>,
        active: bool,
    ) -> Vec<Line<'static>> {
        let winning = winner.map(|w| *w.line());
        let mut lines = Vec::new();
        for row in 0..3 {
            if row > 0 {
                lines.push(Line::from("───┼───┼───"));
            }
            let mut spans = Vec::new();
            for col in 0..3 {
                let idx = row * 3 + col;
                if col > 0 {
                    spans.push(Span::raw("│"));
                }
                let (text, mut style) = match board.squares()[idx] {
                    Square::Occupied(mark) => (
                        format!(" {} ", mark),
                        Style::default()
                            .fg(mark_color(mark))
                            .add_modifier(Modifier::BOLD),
                    ),
                    Square::Empty => (
                        format!(" {} ", idx + 1),
                        Style::default().fg(Color::DarkGray),
                    ),
                };
                if winning.is_some_and(|line| line.contains(&idx)) {
                    style = style.bg(Color::Green).fg(Color::Black);
                } else if active && idx == self.cursor {
                    style = style.add_modifier(Modifier::REVERSED);
                }
                spans.push(Span::styled(text, style));
            }
            lines.push(Line::from(spans));
        }
        lines
    }

    fn status_line(
        status: &GameStatus,
        mover: Option<&Player>,
        winner: Option<&WinnerInfo>,
    ) -> Line<'static> {
        match (status, winner, mover) {
            (GameStatus::Won(_), Some(w), _) => Line::from(vec![
                Span::styled(
                    format!("{} Wins!", w.player().name()),
                    Style::default()
                        .fg(mark_color(*w.mark()))
                        .add_modifier(Modifier::BOLD),
                ),
                Span::raw("  Returning to spinner..."),
            ]),
            (GameStatus::Won(win), None, _) => Line::from(format!(
                "Team {} Wins!  Returning to spinner...",
                win.mark
            )),
            (GameStatus::Draw, _, _) => Line::from("It's a Draw!  Returning to spinner..."),
            (GameStatus::InProgress, _, Some(p)) => Line::from(vec![
                Span::raw("Turn: "),
                Span::styled(
                    format!("{} ({})", p.name(), p.mark()),
                    Style::default()
                        .fg(mark_color(*p.mark()))
                        .add_modifier(Modifier::BOLD),
                ),
            ]),
            (GameStatus::InProgress, _, None) => Line::from("Waiting for the wheel..."),
        }
    }
}

impl Default for GameScreen {
    fn default() -> Self {
        Self::new()
    }
}

impl ScreenView for GameScreen {
    #[instrument(skip(self, frame, view))]
    fn render(&self, frame: &mut Frame, view: &View<'_>) {
        let View::Game {
            board,
            mover,
            status,
            winner,
        } = *view
        else {
            return;
        };

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Length(7),
                Constraint::Min(0),
                Constraint::Length(3),
            ])
            .split(frame.area());

        let status_line = Self::status_line(status, mover, winner);
        let header = Paragraph::new(status_line)
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL).title("Tic-Tac-Toe"));
        frame.render_widget(header, chunks[0]);

        let active = !status.is_over();
        let grid = Paragraph::new(self.board_lines(board, winner, active))
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL));
        frame.render_widget(grid, chunks[1]);

        let help = Paragraph::new("1-9 or arrows + Enter: place | e: edit players | q: quit")
            .style(Style::default().fg(Color::DarkGray))
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL));
        frame.render_widget(help, chunks[3]);
    }

    #[instrument(skip(self, key, _view))]
    fn handle_key(&mut self, key: KeyEvent, _view: &View<'_>) -> UiAction {
        match key.code {
            KeyCode::Char(c @ '1'..='9') => {
                let idx = (c as usize) - ('1' as usize);
                debug_assert!(idx < CELLS);
                self.cursor = idx;
                UiAction::Send(Event::PlaceMark(idx))
            }
            KeyCode::Up | KeyCode::Down | KeyCode::Left | KeyCode::Right => {
                self.move_cursor(key.code);
                UiAction::Stay
            }
            KeyCode::Enter | KeyCode::Char(' ') => UiAction::Send(Event::PlaceMark(self.cursor)),
            KeyCode::Char('e') | KeyCode::Char('E') => UiAction::Send(Event::EditRequested),
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => UiAction::Quit,
            _ => UiAction::Stay,
        }
    }
}
