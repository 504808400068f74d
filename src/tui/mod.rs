//! Terminal front end for Spinner XO.

mod screen;
mod screens;

use std::io::{self, Stdout};
use std::time::Duration;

use anyhow::Result;
use crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event as TermEvent, KeyCode, KeyEventKind,
        KeyModifiers,
    },
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use spinner_xo::{
    AppConfig, Event, FileStore, RosterStore, TimerToken, TokioScheduler, TurnFlowController,
};
use tokio::sync::mpsc::UnboundedReceiver;
use tracing::{debug, error, info, instrument};

use screen::{ScreenView, UiAction};
use screens::ActiveScreen;

type Tui = Terminal<CrosstermBackend<Stdout>>;
type Controller = TurnFlowController<FileStore, TokioScheduler>;

/// Runs the terminal game until the player quits.
pub async fn run_tui(config: AppConfig) -> Result<()> {
    info!(data_dir = %config.data_dir().display(), "Starting Spinner XO");

    let (scheduler, timer_rx) = TokioScheduler::new();
    let store = RosterStore::new(FileStore::new(config.data_dir()));
    let mut controller = TurnFlowController::new(store, scheduler, *config.timings());

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_loop(&mut terminal, &mut controller, timer_rx).await;

    controller.shutdown();
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = &res {
        error!(error = ?err, "Game loop error");
    }
    res
}

/// Main loop: deliver timers, draw, read keys.
#[instrument(skip_all)]
async fn run_loop(
    terminal: &mut Tui,
    controller: &mut Controller,
    mut timer_rx: UnboundedReceiver<TimerToken>,
) -> Result<()> {
    let mut shown = *controller.screen();
    let mut active = ActiveScreen::for_screen(shown, &controller.view());

    loop {
        while let Ok(token) = timer_rx.try_recv() {
            debug!(?token, "Delivering timer");
            controller.handle(Event::TimerElapsed(token));
        }

        if *controller.screen() != shown {
            shown = *controller.screen();
            active = ActiveScreen::for_screen(shown, &controller.view());
        }

        let view = controller.view();
        active.tick(&view);
        terminal.draw(|frame| active.render(frame, &view))?;

        if event::poll(Duration::from_millis(50))?
            && let TermEvent::Key(key) = event::read()?
            && key.kind != KeyEventKind::Release
        {
            if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
                info!("Interrupted");
                return Ok(());
            }
            let action = active.handle_key(key, &controller.view());
            match action {
                UiAction::Stay => {}
                UiAction::Send(event) => {
                    let reaction = controller.handle(event);
                    debug!(?reaction, "Controller reaction");
                }
                UiAction::Quit => {
                    info!("User quit");
                    return Ok(());
                }
            }
        }

        tokio::time::sleep(Duration::from_millis(10)).await;
    }
}
