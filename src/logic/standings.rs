//! Read-side views: leaderboard and match history.

use crate::models::{LeaderboardEntry, MatchHistoryEntry, Player};
use std::cmp::Reverse;

/// Players ranked by points desc, then wins desc, then name asc. Ranks are positional (1..=N).
pub fn leaderboard(players: &[Player]) -> Vec<LeaderboardEntry> {
    let mut sorted: Vec<&Player> = players.iter().collect();
    sorted.sort_by(|a, b| {
        (Reverse(a.points), Reverse(a.wins), &a.name).cmp(&(Reverse(b.points), Reverse(b.wins), &b.name))
    });
    sorted
        .into_iter()
        .zip(1u32..)
        .map(|(p, rank)| LeaderboardEntry {
            rank,
            player: p.clone(),
        })
        .collect()
}

/// History newest first.
pub fn history(entries: &[MatchHistoryEntry]) -> Vec<MatchHistoryEntry> {
    let mut sorted = entries.to_vec();
    sorted.sort_by(|a, b| b.id.cmp(&a.id));
    sorted
}

/// Roster sorted by name.
pub fn roster(players: &[Player]) -> Vec<Player> {
    let mut sorted = players.to_vec();
    sorted.sort_by(|a, b| a.name.cmp(&b.name));
    sorted
}
