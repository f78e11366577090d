//! Tournament rows: configuration, roster, queue, active courts, history.
//!
//! `TournamentData` is the whole persisted state. Writers work on a clone and swap it in
//! on success (see `session`), so every method here may assume it runs inside a transaction.

mod snapshot;

pub use snapshot::SnapshotFile;

use crate::models::{
    ActiveCourt, CourtId, CourtLineup, CourtView, HistoryId, MatchHistoryEntry, Player, PlayerId,
    Tournament, UNKNOWN_PLAYER_NAME,
};
use serde::{Deserialize, Serialize};

/// Full tournament state.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TournamentData {
    pub tournament: Tournament,
    /// Roster in insertion order.
    pub players: Vec<Player>,
    /// Rotation queue; may hold ids of players removed during the current round.
    pub queue: Vec<PlayerId>,
    /// Current round's courts, ordered by court number.
    pub courts: Vec<ActiveCourt>,
    /// Append-only, oldest first.
    pub history: Vec<MatchHistoryEntry>,
    next_player_id: PlayerId,
    next_court_id: CourtId,
    next_history_id: HistoryId,
}

impl Default for TournamentData {
    fn default() -> Self {
        Self {
            tournament: Tournament::default(),
            players: Vec::new(),
            queue: Vec::new(),
            courts: Vec::new(),
            history: Vec::new(),
            next_player_id: 1,
            next_court_id: 1,
            next_history_id: 1,
        }
    }
}

impl TournamentData {
    pub fn player(&self, id: PlayerId) -> Option<&Player> {
        self.players.iter().find(|p| p.id == id)
    }

    pub fn player_mut(&mut self, id: PlayerId) -> Option<&mut Player> {
        self.players.iter_mut().find(|p| p.id == id)
    }

    /// Player for display; dangling ids resolve to the `Unknown` placeholder.
    pub fn player_or_unknown(&self, id: PlayerId) -> Player {
        self.player(id).cloned().unwrap_or_else(Player::unknown)
    }

    pub fn player_name_or_unknown(&self, id: PlayerId) -> String {
        self.player(id)
            .map(|p| p.name.clone())
            .unwrap_or_else(|| UNKNOWN_PLAYER_NAME.to_string())
    }

    /// Add a player by name. Trims whitespace; blank or already-present names are ignored.
    /// Returns the new id when a player was inserted.
    pub fn add_player(&mut self, name: &str) -> Option<PlayerId> {
        let name = name.trim();
        if name.is_empty() || self.players.iter().any(|p| p.name == name) {
            return None;
        }
        let id = self.next_player_id;
        self.next_player_id += 1;
        self.players.push(Player::new(id, name));
        Some(id)
    }

    /// Remove a player by id. Returns false (not an error) if there was no such player.
    /// Queue entries and courts keep the id; readers resolve it as `Unknown`.
    pub fn remove_player(&mut self, id: PlayerId) -> bool {
        let before = self.players.len();
        self.players.retain(|p| p.id != id);
        self.players.len() != before
    }

    pub fn remove_all_players(&mut self) {
        self.players.clear();
    }

    pub fn court(&self, id: CourtId) -> Option<&ActiveCourt> {
        self.courts.iter().find(|c| c.id == id)
    }

    pub fn court_mut(&mut self, id: CourtId) -> Option<&mut ActiveCourt> {
        self.courts.iter_mut().find(|c| c.id == id)
    }

    /// Replace the active courts with a new round's lineups. Every court gets a fresh id.
    pub fn replace_courts(&mut self, lineups: &[CourtLineup], round_number: u32) {
        let mut courts = Vec::with_capacity(lineups.len());
        for lineup in lineups {
            let id = self.next_court_id;
            self.next_court_id += 1;
            courts.push(ActiveCourt {
                id,
                court_number: lineup.court_number,
                team_a: lineup.team_a.iter().map(|p| p.id).collect(),
                team_b: lineup.team_b.iter().map(|p| p.id).collect(),
                score_a: None,
                score_b: None,
                round_number,
            });
        }
        self.courts = courts;
    }

    /// Active courts with teams resolved to players.
    pub fn court_views(&self) -> Vec<CourtView> {
        self.courts
            .iter()
            .map(|c| CourtView {
                id: c.id,
                court_number: c.court_number,
                team_a: c.team_a.iter().map(|&id| self.player_or_unknown(id)).collect(),
                team_b: c.team_b.iter().map(|&id| self.player_or_unknown(id)).collect(),
                score_a: c.score_a,
                score_b: c.score_b,
                round_number: c.round_number,
            })
            .collect()
    }

    /// Append a history entry, assigning its id.
    pub fn push_history(&mut self, mut entry: MatchHistoryEntry) -> HistoryId {
        let id = self.next_history_id;
        self.next_history_id += 1;
        entry.id = id;
        self.history.push(entry);
        id
    }

    /// Back to a fresh tournament. Id sequences keep counting so old ids are never reused.
    pub fn reset(&mut self) {
        *self = Self {
            next_player_id: self.next_player_id,
            next_court_id: self.next_court_id,
            next_history_id: self.next_history_id,
            ..Self::default()
        };
    }
}
