//! Spin planning and wheel geometry.
//!
//! The winner is decided when the spin starts; the plan carries the
//! rotation that lands the pointer inside the winner's segment, so the
//! animation and the logical result always agree.

use std::time::Duration;

use derive_getters::Getters;
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use super::pick;
use crate::roster::{Player, PlayerId};

const FULL_TURN: f64 = 360.0;
/// Jitter stays within this fraction of a segment either side of its center.
const JITTER_FRACTION: f64 = 0.4;

/// A decided spin: who was picked and how the wheel gets there.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Getters)]
pub struct SpinPlan {
    /// Picked player.
    player: Player,
    /// Index of the picked player in the full roster (their wheel segment).
    index: usize,
    /// Number of segments on the wheel.
    segments: usize,
    /// How long the wheel spins before the result is revealed.
    duration: Duration,
    /// Final clockwise rotation of the wheel in degrees.
    rotation: f64,
}

impl SpinPlan {
    /// Rotation at `elapsed` into the spin, easing out towards the final angle.
    pub fn rotation_at(&self, elapsed: Duration) -> f64 {
        if self.duration.is_zero() || elapsed >= self.duration {
            return self.rotation;
        }
        let t = elapsed.as_secs_f64() / self.duration.as_secs_f64();
        let eased = 1.0 - (1.0 - t).powi(3);
        self.rotation * eased
    }

    /// Segment under the pointer at `elapsed` into the spin.
    pub fn segment_at(&self, elapsed: Duration) -> usize {
        segment_at(self.rotation_at(elapsed), self.segments).unwrap_or(self.index)
    }
}

/// Picks the next mover and plans the wheel animation for it.
///
/// The duration is uniform over `min..=max` (bounds are swapped if given in
/// the wrong order). Returns `None` for an empty roster.
#[instrument(skip(players, last_picked, rng), fields(count = players.len()))]
pub fn plan_spin<R: Rng + ?Sized>(
    players: &[Player],
    avoid_repeat: bool,
    last_picked: Option<&PlayerId>,
    min: Duration,
    max: Duration,
    rng: &mut R,
) -> Option<SpinPlan> {
    let player = pick(players, avoid_repeat, last_picked, rng)?.clone();
    let index = players.iter().position(|p| p.id() == player.id())?;
    let segments = players.len();

    let (lo, hi) = if min <= max { (min, max) } else { (max, min) };
    let lo_ms = u64::try_from(lo.as_millis()).unwrap_or(u64::MAX);
    let hi_ms = u64::try_from(hi.as_millis()).unwrap_or(u64::MAX);
    let duration = Duration::from_millis(rng.gen_range(lo_ms..=hi_ms));

    let segment = FULL_TURN / segments as f64;
    let turns = f64::from(rng.gen_range(5u32..=8)) * FULL_TURN;
    let center = index as f64 * segment + segment / 2.0;
    let jitter = rng.gen_range(-JITTER_FRACTION..JITTER_FRACTION) * segment;
    let rotation = turns + (FULL_TURN - center) + jitter;

    debug!(
        player = %player.name(),
        index,
        duration_ms = duration.as_millis() as u64,
        rotation,
        "Spin planned"
    );

    Some(SpinPlan {
        player,
        index,
        segments,
        duration,
        rotation,
    })
}

/// Index of the segment under the top pointer for a wheel rotated
/// clockwise by `rotation` degrees. Segment 0 starts at the pointer.
pub fn segment_at(rotation: f64, segments: usize) -> Option<usize> {
    if segments == 0 || !rotation.is_finite() {
        return None;
    }
    let segment = FULL_TURN / segments as f64;
    let under_pointer = (FULL_TURN - rotation.rem_euclid(FULL_TURN)).rem_euclid(FULL_TURN);
    let idx = (under_pointer / segment).floor() as usize;
    Some(idx.min(segments - 1))
}
