//! Player data structure and its cumulative counters.

use serde::{Deserialize, Serialize};

/// Unique identifier for a player (queue entries and court teams refer to it).
pub type PlayerId = u32;

/// Name shown for a queue or court entry whose player no longer exists.
pub const UNKNOWN_PLAYER_NAME: &str = "Unknown";

/// A player on the roster.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
    pub matches_played: u32,
    pub wins: u32,
    pub losses: u32,
    pub points: u32,
}

impl Player {
    /// Create a new player with the given id and name. Counters start at zero.
    pub fn new(id: PlayerId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            matches_played: 0,
            wins: 0,
            losses: 0,
            points: 0,
        }
    }

    /// Placeholder used when a stored id has no matching roster entry (id 0).
    pub fn unknown() -> Self {
        Self::new(0, UNKNOWN_PLAYER_NAME)
    }

    /// Record a won match worth `win_points`. Counters saturate.
    pub fn add_win(&mut self, win_points: u32) {
        self.matches_played = self.matches_played.saturating_add(1);
        self.wins = self.wins.saturating_add(1);
        self.points = self.points.saturating_add(win_points);
    }

    /// Record a lost match.
    pub fn add_loss(&mut self) {
        self.matches_played = self.matches_played.saturating_add(1);
        self.losses = self.losses.saturating_add(1);
    }
}
