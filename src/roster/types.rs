//! Core roster types: marks, players, settings and the persisted record.

use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use tracing::instrument;
use uuid::Uuid;

/// Team symbol a player places on the board.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    derive_more::Display,
    strum::EnumIter,
)]
pub enum Mark {
    /// Team X.
    #[display("X")]
    X,
    /// Team O.
    #[display("O")]
    O,
}

impl Mark {
    /// Returns the other team's mark.
    pub fn opponent(self) -> Self {
        match self {
            Mark::X => Mark::O,
            Mark::O => Mark::X,
        }
    }
}

/// Opaque unique player identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::Display)]
#[serde(transparent)]
#[display("{_0}")]
pub struct PlayerId(String);

impl PlayerId {
    /// Wraps an existing identifier (e.g. one read back from storage).
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Generates a fresh random identifier.
    #[instrument]
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Returns the identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// A registered player.
///
/// Players are immutable once created; renaming or switching teams is a
/// delete followed by a fresh add.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Getters)]
pub struct Player {
    id: PlayerId,
    name: String,
    mark: Mark,
}

impl Player {
    /// Creates a player with a freshly generated id.
    #[instrument(skip(name), fields(name = %name.as_ref()))]
    pub fn new(name: impl AsRef<str>, mark: Mark) -> Self {
        Self {
            id: PlayerId::generate(),
            name: name.as_ref().to_string(),
            mark,
        }
    }

    /// Creates a player with a known id.
    pub fn with_id(id: PlayerId, name: impl Into<String>, mark: Mark) -> Self {
        Self {
            id,
            name: name.into(),
            mark,
        }
    }
}

/// User-adjustable picker settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    /// Never pick the same player twice in a row when someone else is available.
    pub avoid_repeat: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self { avoid_repeat: true }
    }
}

/// Returns true when both marks have at least one player.
#[instrument(skip(players), fields(count = players.len()))]
pub fn has_both_teams(players: &[Player]) -> bool {
    let has = |mark: Mark| players.iter().any(|p| p.mark == mark);
    has(Mark::X) && has(Mark::O)
}

/// The single persisted aggregate: roster, settings and the last pick.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters)]
#[serde(rename_all = "camelCase")]
pub struct RosterRecord {
    players: Vec<Player>,
    #[serde(default)]
    settings: Settings,
    #[serde(default)]
    last_picked_player_id: Option<PlayerId>,
}

impl Default for RosterRecord {
    fn default() -> Self {
        Self {
            players: Vec::new(),
            settings: Settings::default(),
            last_picked_player_id: None,
        }
    }
}

impl RosterRecord {
    /// Creates a record from its parts.
    pub fn new(
        players: Vec<Player>,
        settings: Settings,
        last_picked_player_id: Option<PlayerId>,
    ) -> Self {
        Self {
            players,
            settings,
            last_picked_player_id,
        }
    }

    /// Players holding the given mark, in roster order.
    pub fn team(&self, mark: Mark) -> impl Iterator<Item = &Player> {
        self.players.iter().filter(move |p| p.mark == mark)
    }

    /// Returns true when both marks have at least one player.
    pub fn has_both_teams(&self) -> bool {
        has_both_teams(&self.players)
    }

    /// Looks up a player by id.
    pub fn find(&self, id: &PlayerId) -> Option<&Player> {
        self.players.iter().find(|p| &p.id == id)
    }

    /// The last picked id, but only while that player is still on the roster.
    pub fn effective_last_picked(&self) -> Option<&PlayerId> {
        self.last_picked_player_id
            .as_ref()
            .filter(|id| self.find(id).is_some())
    }

    /// Replaces the whole roster and forgets the last pick.
    #[instrument(skip(self, players), fields(count = players.len()))]
    pub fn replace_players(&mut self, players: Vec<Player>) {
        self.players = players;
        self.last_picked_player_id = None;
    }

    /// Removes a player; forgets the last pick if it referenced them.
    #[instrument(skip(self))]
    pub fn remove_player(&mut self, id: &PlayerId) -> Option<Player> {
        let idx = self.players.iter().position(|p| &p.id == id)?;
        if self.last_picked_player_id.as_ref() == Some(id) {
            self.last_picked_player_id = None;
        }
        Some(self.players.remove(idx))
    }

    /// Records the outcome of a pick.
    pub fn set_last_picked(&mut self, id: PlayerId) {
        self.last_picked_player_id = Some(id);
    }

    /// Replaces the settings.
    pub fn set_settings(&mut self, settings: Settings) {
        self.settings = settings;
    }
}
