//! Timed transitions as explicit, cancellable scheduled tasks.
//!
//! The controller owns a [`Scheduler`] and at most one pending
//! [`TimerToken`]. A scheduler delivers the token back as
//! [`Event::TimerElapsed`](super::Event::TimerElapsed) when the delay
//! elapses; the controller ignores any token it is no longer waiting for.

use std::collections::HashMap;
use std::time::Duration;

use derive_getters::Getters;
use derive_new::new;
use serde::{Deserialize, Serialize};
use tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender, unbounded_channel};
use tokio::task::JoinHandle;
use tracing::{debug, instrument, trace};

/// The three timed transitions.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::Display,
)]
pub enum TimerKind {
    /// Wheel stops and the picked player is revealed.
    #[display("spin-reveal")]
    SpinReveal,
    /// Revealed result gives way to the game screen.
    #[display("reveal-advance")]
    RevealAdvance,
    /// Finished board is cleared.
    #[display("game-end-reset")]
    GameEndReset,
}

/// Identifies one scheduled timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Getters, new)]
pub struct TimerToken {
    kind: TimerKind,
    id: u64,
}

/// Runs delayed deliveries of timer tokens.
pub trait Scheduler {
    /// Delivers `token` after `delay`.
    fn schedule(&mut self, token: TimerToken, delay: Duration);

    /// Cancels one scheduled token. Unknown tokens are ignored.
    fn cancel(&mut self, token: TimerToken);

    /// Cancels everything still scheduled.
    fn cancel_all(&mut self);
}

/// Scheduler that only records requests; the caller fires them by hand.
///
/// Used by tests and by hosts that drive time themselves.
#[derive(Debug, Clone, Default)]
pub struct ManualScheduler {
    pending: Vec<(TimerToken, Duration)>,
    cancelled: Vec<TimerToken>,
}

impl ManualScheduler {
    /// Creates an empty scheduler.
    pub fn new() -> Self {
        Self::default()
    }

    /// Scheduled tokens with their delays, oldest first.
    pub fn pending(&self) -> &[(TimerToken, Duration)] {
        &self.pending
    }

    /// Tokens cancelled so far, oldest first.
    pub fn cancelled(&self) -> &[TimerToken] {
        &self.cancelled
    }

    /// Removes and returns the oldest scheduled token.
    pub fn pop(&mut self) -> Option<(TimerToken, Duration)> {
        if self.pending.is_empty() {
            None
        } else {
            Some(self.pending.remove(0))
        }
    }
}

impl Scheduler for ManualScheduler {
    fn schedule(&mut self, token: TimerToken, delay: Duration) {
        self.pending.push((token, delay));
    }

    fn cancel(&mut self, token: TimerToken) {
        let before = self.pending.len();
        self.pending.retain(|(t, _)| *t != token);
        if self.pending.len() != before {
            self.cancelled.push(token);
        }
    }

    fn cancel_all(&mut self) {
        let drained: Vec<TimerToken> = self.pending.drain(..).map(|(t, _)| t).collect();
        self.cancelled.extend(drained);
    }
}

/// Scheduler backed by tokio tasks.
///
/// Each timer is a spawned task that sleeps and then sends its token on the
/// channel returned by [`TokioScheduler::new`]. Cancelling aborts the task.
/// Dropping the scheduler aborts every outstanding task.
#[derive(Debug)]
pub struct TokioScheduler {
    tx: UnboundedSender<TimerToken>,
    tasks: HashMap<TimerToken, JoinHandle<()>>,
}

impl TokioScheduler {
    /// Creates a scheduler and the receiver its tokens arrive on.
    ///
    /// Must be used from within a tokio runtime.
    #[instrument]
    pub fn new() -> (Self, UnboundedReceiver<TimerToken>) {
        let (tx, rx) = unbounded_channel();
        (
            Self {
                tx,
                tasks: HashMap::new(),
            },
            rx,
        )
    }

    /// Number of timers that have not yet fired or been cancelled.
    pub fn outstanding(&self) -> usize {
        self.tasks.values().filter(|h| !h.is_finished()).count()
    }
}

impl Scheduler for TokioScheduler {
    #[instrument(skip(self))]
    fn schedule(&mut self, token: TimerToken, delay: Duration) {
        self.tasks.retain(|_, handle| !handle.is_finished());
        let tx = self.tx.clone();
        let handle = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            trace!(?token, "Timer fired");
            // Receiver gone means the host loop ended; nothing left to notify.
            let _ = tx.send(token);
        });
        self.tasks.insert(token, handle);
    }

    #[instrument(skip(self))]
    fn cancel(&mut self, token: TimerToken) {
        if let Some(handle) = self.tasks.remove(&token) {
            debug!("Aborting timer task");
            handle.abort();
        }
    }

    #[instrument(skip(self))]
    fn cancel_all(&mut self) {
        debug!(count = self.tasks.len(), "Aborting all timer tasks");
        for (_, handle) in self.tasks.drain() {
            handle.abort();
        }
    }
}

impl Drop for TokioScheduler {
    fn drop(&mut self) {
        for (_, handle) in self.tasks.drain() {
            handle.abort();
        }
    }
}
