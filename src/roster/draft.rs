//! Roster editing rules used while the Setup screen is open.

use strum::IntoEnumIterator;
use tracing::{debug, info, instrument};

use super::types::{Mark, Player, PlayerId, has_both_teams};

/// Largest roster the game supports, across both teams.
pub const MAX_PLAYERS: usize = 10;

/// Reasons a roster edit or submission is rejected.
///
/// The display strings are shown to the user verbatim.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum RosterError {
    /// The trimmed name was empty.
    #[display("Player name cannot be empty.")]
    EmptyName,

    /// Another player already uses this name (case-insensitive).
    #[display("Player name must be unique across both teams.")]
    DuplicateName(#[error(not(source))] String),

    /// The roster already holds [`MAX_PLAYERS`] players.
    #[display("You can add a maximum of {} players in total.", _0)]
    RosterFull(#[error(not(source))] usize),

    /// Two players share an id.
    #[display("Player id {} appears more than once.", _0)]
    DuplicateId(#[error(not(source))] PlayerId),

    /// A team has no players.
    #[display("Each team needs at least one player (team {} is empty).", _0)]
    MissingTeam(#[error(not(source))] Mark),
}

/// In-progress roster edited on the Setup screen.
#[derive(Debug, Clone, Default)]
pub struct RosterDraft {
    players: Vec<Player>,
}

impl RosterDraft {
    /// Starts a draft from the currently stored roster.
    #[instrument(skip(players), fields(count = players.len()))]
    pub fn new(players: Vec<Player>) -> Self {
        debug!("Opening roster draft");
        Self { players }
    }

    /// Players in the draft, in insertion order.
    pub fn players(&self) -> &[Player] {
        &self.players
    }

    /// Players on one team.
    pub fn team(&self, mark: Mark) -> impl Iterator<Item = &Player> {
        self.players.iter().filter(move |p| *p.mark() == mark)
    }

    /// Returns true when the draft can be submitted.
    pub fn can_start(&self) -> bool {
        has_both_teams(&self.players)
    }

    /// Adds a player after trimming and validating the name.
    ///
    /// # Errors
    ///
    /// Returns [`RosterError`] for an empty name, a name already in use
    /// (ignoring case) or a full roster. The draft is unchanged on error.
    #[instrument(skip(self))]
    pub fn add_player(&mut self, name: &str, mark: Mark) -> Result<&Player, RosterError> {
        let trimmed = name.trim();
        if trimmed.is_empty() {
            return Err(RosterError::EmptyName);
        }
        if name_taken(&self.players, trimmed) {
            return Err(RosterError::DuplicateName(trimmed.to_string()));
        }
        if self.players.len() >= MAX_PLAYERS {
            return Err(RosterError::RosterFull(MAX_PLAYERS));
        }

        let player = Player::new(trimmed, mark);
        info!(name = %trimmed, mark = %mark, id = %player.id(), "Player added to draft");
        self.players.push(player);
        Ok(&self.players[self.players.len() - 1])
    }

    /// Removes a player from the draft.
    #[instrument(skip(self))]
    pub fn remove_player(&mut self, id: &PlayerId) -> Option<Player> {
        let idx = self.players.iter().position(|p| p.id() == id)?;
        let removed = self.players.remove(idx);
        info!(name = %removed.name(), "Player removed from draft");
        Some(removed)
    }

    /// Consumes the draft, yielding the roster to submit.
    pub fn into_players(self) -> Vec<Player> {
        self.players
    }
}

fn name_taken(players: &[Player], name: &str) -> bool {
    let lowered = name.to_lowercase();
    players.iter().any(|p| p.name().to_lowercase() == lowered)
}

/// Checks a complete roster before it replaces the stored one.
///
/// # Errors
///
/// Returns the first [`RosterError`] found: any [`validate_players`]
/// failure, or a team with nobody on it.
#[instrument(skip(players), fields(count = players.len()))]
pub fn validate_roster(players: &[Player]) -> Result<(), RosterError> {
    validate_players(players)?;
    for mark in Mark::iter() {
        if !players.iter().any(|p| *p.mark() == mark) {
            return Err(RosterError::MissingTeam(mark));
        }
    }
    Ok(())
}

/// Checks the per-player rules without requiring both teams.
///
/// A one-sided roster is still a valid stored roster; it just cannot leave
/// Setup.
///
/// # Errors
///
/// Returns the first [`RosterError`] found: more than [`MAX_PLAYERS`]
/// players, an empty or duplicate name, or a repeated id.
#[instrument(skip(players), fields(count = players.len()))]
pub fn validate_players(players: &[Player]) -> Result<(), RosterError> {
    if players.len() > MAX_PLAYERS {
        return Err(RosterError::RosterFull(MAX_PLAYERS));
    }
    for (i, player) in players.iter().enumerate() {
        let name = player.name().trim();
        if name.is_empty() {
            return Err(RosterError::EmptyName);
        }
        if name_taken(&players[..i], name) {
            return Err(RosterError::DuplicateName(name.to_string()));
        }
        if players[..i].iter().any(|p| p.id() == player.id()) {
            return Err(RosterError::DuplicateId(player.id().clone()));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_trims_name() {
        let mut draft = RosterDraft::default();
        let player = draft.add_player("  Alice  ", Mark::X).unwrap();
        assert_eq!(player.name(), "Alice");
    }

    #[test]
    fn test_empty_name_rejected() {
        let mut draft = RosterDraft::default();
        assert_eq!(draft.add_player("   ", Mark::X), Err(RosterError::EmptyName));
        assert!(draft.players().is_empty());
    }

    #[test]
    fn test_duplicate_name_rejected_across_teams() {
        let mut draft = RosterDraft::default();
        draft.add_player("Alice", Mark::X).unwrap();
        let err = draft.add_player("ALICE", Mark::O).unwrap_err();
        assert!(matches!(err, RosterError::DuplicateName(_)));
        assert_eq!(
            err.to_string(),
            "Player name must be unique across both teams."
        );
        assert_eq!(draft.players().len(), 1);
    }

    #[test]
    fn test_roster_full() {
        let mut draft = RosterDraft::default();
        for i in 0..MAX_PLAYERS {
            let mark = if i % 2 == 0 { Mark::X } else { Mark::O };
            draft.add_player(&format!("P{}", i), mark).unwrap();
        }
        let err = draft.add_player("Extra", Mark::X).unwrap_err();
        assert_eq!(err, RosterError::RosterFull(MAX_PLAYERS));
        assert_eq!(
            err.to_string(),
            "You can add a maximum of 10 players in total."
        );
    }

    #[test]
    fn test_can_start_needs_both_teams() {
        let mut draft = RosterDraft::default();
        draft.add_player("Alice", Mark::X).unwrap();
        assert!(!draft.can_start());
        draft.add_player("Bob", Mark::O).unwrap();
        assert!(draft.can_start());
    }

    #[test]
    fn test_remove_player() {
        let mut draft = RosterDraft::default();
        let id = draft.add_player("Alice", Mark::X).unwrap().id().clone();
        draft.add_player("Bob", Mark::O).unwrap();
        assert!(draft.remove_player(&id).is_some());
        assert_eq!(draft.team(Mark::X).count(), 0);
        assert!(draft.remove_player(&id).is_none());
    }

    #[test]
    fn test_validate_roster_missing_team() {
        let players = vec![Player::new("Alice", Mark::X)];
        assert_eq!(
            validate_roster(&players),
            Err(RosterError::MissingTeam(Mark::O))
        );
    }

    #[test]
    fn test_validate_roster_duplicate() {
        let players = vec![
            Player::new("Alice", Mark::X),
            Player::new("alice", Mark::O),
        ];
        assert!(matches!(
            validate_roster(&players),
            Err(RosterError::DuplicateName(_))
        ));
    }

    #[test]
    fn test_validate_players_allows_one_team() {
        let players = vec![Player::new("Alice", Mark::X)];
        assert_eq!(validate_players(&players), Ok(()));
    }

    #[test]
    fn test_validate_players_rejects_repeated_id() {
        let id = PlayerId::new("same");
        let players = vec![
            Player::with_id(id.clone(), "Alice", Mark::X),
            Player::with_id(id.clone(), "Bob", Mark::O),
        ];
        assert_eq!(
            validate_players(&players),
            Err(RosterError::DuplicateId(id))
        );
    }
}
