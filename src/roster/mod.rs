//! Roster: players, teams, settings and persistence.

mod draft;
mod store;
mod types;

pub use draft::{MAX_PLAYERS, RosterDraft, RosterError, validate_players, validate_roster};
pub use store::{FileStore, KeyValueStore, MemoryStore, RosterStore, STORAGE_KEY, StoreError};
pub use types::{Mark, Player, PlayerId, RosterRecord, Settings, has_both_teams};
