//! Picker: chooses who places the next mark.
//!
//! Selection picks a person, not a team: the turn's mark is whatever mark
//! the chosen player holds.

mod wheel;

pub use wheel::{SpinPlan, plan_spin, segment_at};

use rand::Rng;
use rand::seq::SliceRandom;
use tracing::{debug, instrument};

use crate::roster::{Player, PlayerId};

/// Picks the next mover uniformly at random.
///
/// With `avoid_repeat` set and more than one player, the player identified
/// by `last_picked` is excluded from the draw. An id that matches nobody
/// leaves the pool untouched. Returns `None` only for an empty roster.
#[instrument(skip(players, rng), fields(count = players.len()))]
pub fn pick<'a, R: Rng + ?Sized>(
    players: &'a [Player],
    avoid_repeat: bool,
    last_picked: Option<&PlayerId>,
    rng: &mut R,
) -> Option<&'a Player> {
    let mut pool: Vec<&Player> = players.iter().collect();

    if avoid_repeat
        && players.len() > 1
        && let Some(last) = last_picked
    {
        pool.retain(|p| p.id() != last);
    }

    if pool.is_empty() {
        pool = players.iter().collect();
    }

    let picked = pool.choose(rng).copied();
    debug!(pool = pool.len(), picked = ?picked.map(|p| p.name()), "Picked next mover");
    picked
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::roster::Mark;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_empty_roster_yields_none() {
        let mut rng = StdRng::seed_from_u64(1);
        assert!(pick(&[], true, None, &mut rng).is_none());
    }

    #[test]
    fn test_single_player_always_returned() {
        let mut rng = StdRng::seed_from_u64(2);
        let players = vec![Player::new("Solo", Mark::X)];
        let last = players[0].id().clone();
        for _ in 0..20 {
            let picked = pick(&players, true, Some(&last), &mut rng).unwrap();
            assert_eq!(picked.id(), &last);
        }
    }
}
