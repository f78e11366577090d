//! Courts: the persisted per-round assignment, its resolved view, and lineups.

use crate::models::player::{Player, PlayerId};
use serde::{Deserialize, Serialize};

/// Unique identifier for an active court row (not the 1-based court number).
pub type CourtId = u32;

/// One side of a court.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Side {
    A,
    B,
}

/// Court assignment produced by the court builder, before it is stored.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CourtLineup<P = Player> {
    /// 1-based, sequential.
    pub court_number: u32,
    pub team_a: Vec<P>,
    pub team_b: Vec<P>,
}

/// Result of partitioning an ordered player list.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Lineup<P = Player> {
    pub courts: Vec<CourtLineup<P>>,
    pub sitting_out: Vec<P>,
}

impl<P> Default for Lineup<P> {
    fn default() -> Self {
        Self {
            courts: Vec::new(),
            sitting_out: Vec::new(),
        }
    }
}

/// A stored court for the current round. Teams hold player ids.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActiveCourt {
    pub id: CourtId,
    pub court_number: u32,
    pub team_a: Vec<PlayerId>,
    pub team_b: Vec<PlayerId>,
    /// None until scores are submitted.
    pub score_a: Option<u32>,
    pub score_b: Option<u32>,
    pub round_number: u32,
}

impl ActiveCourt {
    pub fn team(&self, side: Side) -> &[PlayerId] {
        match side {
            Side::A => &self.team_a,
            Side::B => &self.team_b,
        }
    }
}

/// Active court with teams resolved to players (for API / display).
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CourtView {
    pub id: CourtId,
    pub court_number: u32,
    pub team_a: Vec<Player>,
    pub team_b: Vec<Player>,
    pub score_a: Option<u32>,
    pub score_b: Option<u32>,
    pub round_number: u32,
}

/// Projected future round; never stored.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpcomingRound {
    /// 1 = the round after the one in play.
    pub round_offset: u32,
    pub courts: Vec<CourtLineup>,
    pub sitting_out: Vec<Player>,
}
