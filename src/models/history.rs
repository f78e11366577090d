//! Match history records and leaderboard rows.

use crate::models::court::Side;
use crate::models::player::Player;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Unique identifier for a history entry; also its insertion order.
pub type HistoryId = u32;

/// Immutable record of one finished court. Names are snapshotted at submission time.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchHistoryEntry {
    pub id: HistoryId,
    pub round_number: u32,
    pub court_number: u32,
    pub team_a_names: Vec<String>,
    pub team_b_names: Vec<String>,
    pub score_a: u32,
    pub score_b: u32,
    pub winner: Side,
    pub played_at: DateTime<Utc>,
}

/// A player's stats with its position on the leaderboard.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    /// 1-based positional rank; ties do not share a rank.
    pub rank: u32,
    #[serde(flatten)]
    pub player: Player,
}
