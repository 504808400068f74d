//! Turn-flow controller: the state machine behind the three screens.
//!
//! Setup → Picker → Game → Picker … until a line or a full board, then a
//! timed reset back to Picker (or Setup if a team has emptied). Every
//! external input arrives through [`TurnFlowController::handle`]; after each
//! event the controller re-checks that both teams still have a player and
//! falls back to Setup if not.

use derive_getters::Getters;
use rand::SeedableRng;
use rand::rngs::StdRng;
use strum::IntoEnumIterator;
use tracing::{debug, info, instrument, warn};

use crate::config::Timings;
use crate::games::tictactoe::{Board, GameStatus, Placement, TicTacToe};
use crate::picker::plan_spin;
use crate::roster::{
    KeyValueStore, Mark, Player, PlayerId, RosterError, RosterRecord, RosterStore, Settings,
    validate_roster,
};

use super::screen::{Event, IgnoreReason, Reaction, Screen, SpinStatus, WinnerInfo};
use super::timer::{Scheduler, TimerKind, TimerToken};
use super::view::View;

/// Controller that owns all turn-flow state.
///
/// Feed it [`Event`]s with [`handle`](Self::handle) and render
/// [`view`](Self::view). Timers are requested from the injected
/// [`Scheduler`]; their tokens come back as [`Event::TimerElapsed`].
#[derive(Debug, Getters)]
pub struct TurnFlowController<K: KeyValueStore, S: Scheduler> {
    #[getter(skip)]
    store: RosterStore<K>,
    record: RosterRecord,
    screen: Screen,
    spin: SpinStatus,
    mover: Option<Player>,
    game: TicTacToe,
    winner: Option<WinnerInfo>,
    scheduler: S,
    pending: Option<TimerToken>,
    timings: Timings,
    #[getter(skip)]
    next_timer_id: u64,
    #[getter(skip)]
    rng: StdRng,
    #[getter(skip)]
    stopped: bool,
}

impl<K: KeyValueStore, S: Scheduler> TurnFlowController<K, S> {
    /// Creates a controller, loading the stored roster.
    ///
    /// Starts on the picker screen when both teams have a player, otherwise
    /// on Setup.
    #[instrument(skip(store, scheduler))]
    pub fn new(store: RosterStore<K>, scheduler: S, timings: Timings) -> Self {
        Self::with_rng(store, scheduler, timings, StdRng::from_entropy())
    }

    /// Like [`new`](Self::new) with a caller-supplied random source.
    #[instrument(skip(store, scheduler, rng))]
    pub fn with_rng(store: RosterStore<K>, scheduler: S, timings: Timings, rng: StdRng) -> Self {
        let record = store.load(RosterRecord::default());
        let screen = if record.has_both_teams() {
            Screen::PickerScreen
        } else {
            Screen::Setup
        };
        info!(players = record.players().len(), screen = %screen, "Creating TurnFlowController");
        Self {
            store,
            record,
            screen,
            spin: SpinStatus::Idle,
            mover: None,
            game: TicTacToe::new(),
            winner: None,
            scheduler,
            pending: None,
            timings,
            next_timer_id: 0,
            rng,
            stopped: false,
        }
    }

    /// Mutable access to the scheduler (hosts driving time by hand).
    pub fn scheduler_mut(&mut self) -> &mut S {
        &mut self.scheduler
    }

    /// The stored roster.
    pub fn players(&self) -> &[Player] {
        self.record.players()
    }

    /// Current picker settings.
    pub fn settings(&self) -> Settings {
        *self.record.settings()
    }

    /// The board of the game in progress.
    pub fn board(&self) -> &Board {
        self.game.board()
    }

    /// Status of the game in progress.
    pub fn status(&self) -> &GameStatus {
        self.game.status()
    }

    /// Which team, if any, currently has no players.
    pub fn empty_team(&self) -> Option<Mark> {
        Mark::iter().find(|mark| self.record.team(*mark).next().is_none())
    }

    /// Snapshot of what the active screen shows.
    pub fn view(&self) -> View<'_> {
        match self.screen {
            Screen::Setup => View::Setup {
                players: self.record.players(),
            },
            Screen::PickerScreen => View::Picker {
                players: self.record.players(),
                settings: *self.record.settings(),
                last_picked: self.record.effective_last_picked(),
                spin: &self.spin,
            },
            Screen::Game => View::Game {
                board: self.game.board(),
                mover: self.mover.as_ref(),
                status: self.game.status(),
                winner: self.winner.as_ref(),
            },
        }
    }

    /// Applies one event.
    ///
    /// Invalid operations are ignored without changing state; the returned
    /// [`Reaction`] says which.
    #[instrument(skip(self), fields(screen = %self.screen))]
    pub fn handle(&mut self, event: Event) -> Reaction {
        if self.stopped {
            return Self::ignore(IgnoreReason::ShutDown);
        }

        let reaction = match event {
            Event::SubmitRoster(players) => self.submit_roster(players),
            Event::EditRequested => self.edit_requested(),
            Event::SettingsChanged(settings) => self.settings_changed(settings),
            Event::SpinRequested => self.spin_requested(),
            Event::PlaceMark(index) => self.place_mark(index),
            Event::PlayerRemoved(id) => self.player_removed(id),
            Event::TimerElapsed(token) => self.timer_elapsed(token),
        };

        self.ensure_playable();
        reaction
    }

    /// Falls back to Setup if the picker or game screen is active while a
    /// team is empty. Returns true if the current screen may stay.
    #[instrument(skip(self))]
    pub fn ensure_playable(&mut self) -> bool {
        if self.screen == Screen::Setup || self.record.has_both_teams() {
            return true;
        }
        warn!(screen = %self.screen, "A team has no players, returning to Setup");
        self.cancel_pending();
        self.spin = SpinStatus::Idle;
        self.reset_game();
        self.go(Screen::Setup);
        false
    }

    /// Cancels every timer and stops reacting to events.
    #[instrument(skip(self))]
    pub fn shutdown(&mut self) {
        info!("Shutting down TurnFlowController");
        self.pending = None;
        self.scheduler.cancel_all();
        self.stopped = true;
    }

    fn submit_roster(&mut self, players: Vec<Player>) -> Reaction {
        if self.screen != Screen::Setup {
            return self.wrong_screen(Screen::Setup);
        }
        if let Err(e) = validate_roster(&players) {
            return Self::ignore(IgnoreReason::InvalidRoster(e));
        }

        info!(players = players.len(), "Roster submitted");
        self.record.replace_players(players);
        self.persist();
        self.cancel_pending();
        self.spin = SpinStatus::Idle;
        self.reset_game();
        self.go(Screen::PickerScreen);
        Reaction::Applied
    }

    fn edit_requested(&mut self) -> Reaction {
        if self.screen != Screen::Setup {
            self.cancel_pending();
            self.spin = SpinStatus::Idle;
            self.go(Screen::Setup);
        }
        Reaction::Applied
    }

    fn settings_changed(&mut self, settings: Settings) -> Reaction {
        info!(avoid_repeat = settings.avoid_repeat, "Settings changed");
        self.record.set_settings(settings);
        self.persist();
        Reaction::Applied
    }

    fn spin_requested(&mut self) -> Reaction {
        if self.screen != Screen::PickerScreen {
            return self.wrong_screen(Screen::PickerScreen);
        }
        if self.spin != SpinStatus::Idle {
            return Self::ignore(IgnoreReason::AlreadySpinning);
        }
        let count = self.record.players().len();
        if count < 2 {
            return Self::ignore(IgnoreReason::NotEnoughPlayers(count));
        }
        if let Some(mark) = self.empty_team() {
            return Self::ignore(IgnoreReason::InvalidRoster(RosterError::MissingTeam(mark)));
        }

        let plan = match plan_spin(
            self.record.players(),
            self.record.settings().avoid_repeat,
            self.record.effective_last_picked(),
            self.timings.spin_min(),
            self.timings.spin_max(),
            &mut self.rng,
        ) {
            Some(plan) => plan,
            None => return Self::ignore(IgnoreReason::NotEnoughPlayers(count)),
        };

        let delay = *plan.duration() + self.timings.spin_settle();
        info!(player = %plan.player().name(), delay_ms = delay.as_millis() as u64, "Spinning");
        self.spin = SpinStatus::Spinning(plan);
        self.schedule(TimerKind::SpinReveal, delay);
        Reaction::Applied
    }

    fn place_mark(&mut self, index: usize) -> Reaction {
        if self.screen != Screen::Game {
            return self.wrong_screen(Screen::Game);
        }
        let Some(mover) = self.mover.clone() else {
            return Self::ignore(IgnoreReason::NoMover);
        };

        match self.game.place(index, *mover.mark()) {
            Err(e) => Self::ignore(IgnoreReason::Move(e)),
            Ok(Placement::Continue) => {
                debug!(index, player = %mover.name(), "Turn complete");
                self.go(Screen::PickerScreen);
                Reaction::Applied
            }
            Ok(Placement::Won(win)) => {
                info!(player = %mover.name(), mark = %win.mark, line = ?win.line, "Game won");
                self.winner = Some(WinnerInfo::new(mover, win));
                self.schedule(TimerKind::GameEndReset, self.timings.game_end_pause());
                Reaction::Applied
            }
            Ok(Placement::Draw) => {
                info!("Game drawn");
                self.schedule(TimerKind::GameEndReset, self.timings.game_end_pause());
                Reaction::Applied
            }
        }
    }

    fn player_removed(&mut self, id: PlayerId) -> Reaction {
        let Some(removed) = self.record.remove_player(&id) else {
            return Self::ignore(IgnoreReason::UnknownPlayer(id));
        };
        info!(name = %removed.name(), "Player removed");
        self.persist();

        if self.screen != Screen::Setup {
            // The roster changed under a running game: start the flow over.
            self.cancel_pending();
            self.spin = SpinStatus::Idle;
            self.reset_game();
            self.go(Screen::PickerScreen);
        }
        Reaction::Applied
    }

    fn timer_elapsed(&mut self, token: TimerToken) -> Reaction {
        if self.pending != Some(token) {
            return Self::ignore(IgnoreReason::StaleTimer(token));
        }
        self.pending = None;

        match token.kind() {
            TimerKind::SpinReveal => {
                let SpinStatus::Spinning(plan) = std::mem::take(&mut self.spin) else {
                    return Self::ignore(IgnoreReason::StaleTimer(token));
                };
                info!(player = %plan.player().name(), "Pick revealed");
                self.record.set_last_picked(plan.player().id().clone());
                self.persist();
                self.spin = SpinStatus::Revealed(plan);
                self.schedule(TimerKind::RevealAdvance, self.timings.reveal_pause());
            }
            TimerKind::RevealAdvance => {
                let SpinStatus::Revealed(plan) = std::mem::take(&mut self.spin) else {
                    return Self::ignore(IgnoreReason::StaleTimer(token));
                };
                self.mover = Some(plan.player().clone());
                self.go(Screen::Game);
            }
            TimerKind::GameEndReset => {
                self.reset_game();
                let next = if self.record.has_both_teams() {
                    Screen::PickerScreen
                } else {
                    Screen::Setup
                };
                self.go(next);
            }
        }
        Reaction::Applied
    }

    fn schedule(&mut self, kind: TimerKind, delay: std::time::Duration) {
        self.cancel_pending();
        self.next_timer_id += 1;
        let token = TimerToken::new(kind, self.next_timer_id);
        debug!(%kind, delay_ms = delay.as_millis() as u64, "Scheduling timer");
        self.scheduler.schedule(token, delay);
        self.pending = Some(token);
    }

    fn cancel_pending(&mut self) {
        if let Some(token) = self.pending.take() {
            debug!(kind = %token.kind(), "Cancelling pending timer");
            self.scheduler.cancel(token);
        }
    }

    fn reset_game(&mut self) {
        self.game = TicTacToe::new();
        self.winner = None;
        self.mover = None;
    }

    fn persist(&mut self) {
        if let Err(e) = self.store.save(&self.record) {
            warn!(error = %e, "Failed to persist roster");
        }
    }

    fn go(&mut self, next: Screen) {
        if self.screen != next {
            info!(from = %self.screen, to = %next, "Screen transition");
            self.screen = next;
        }
    }

    fn wrong_screen(&self, expected: Screen) -> Reaction {
        Self::ignore(IgnoreReason::WrongScreen {
            expected,
            actual: self.screen,
        })
    }

    fn ignore(reason: IgnoreReason) -> Reaction {
        debug!(%reason, "Event ignored");
        Reaction::Ignored(reason)
    }
}

impl<K: KeyValueStore, S: Scheduler> Drop for TurnFlowController<K, S> {
    fn drop(&mut self) {
        if !self.stopped {
            self.scheduler.cancel_all();
        }
    }
}
