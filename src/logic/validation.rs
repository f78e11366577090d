//! Score submission checks done at the request boundary, before scoring.

use crate::models::{CourtId, TournamentError};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Raw score entry as sent by a client.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreSubmission {
    pub court_id: CourtId,
    pub score_a: i64,
    pub score_b: i64,
}

/// A checked score: non-negative and not tied.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct CourtScore {
    pub court_id: CourtId,
    pub score_a: u32,
    pub score_b: u32,
}

/// Check a batch: non-empty, every score in `0..=u32::MAX`, no tie, each court at most once.
pub fn validate_scores(entries: &[ScoreSubmission]) -> Result<Vec<CourtScore>, TournamentError> {
    if entries.is_empty() {
        return Err(TournamentError::NoScores);
    }
    let mut seen = HashSet::with_capacity(entries.len());
    entries
        .iter()
        .map(|e| {
            let score_a = court_score(e.score_a, e.court_id)?;
            let score_b = court_score(e.score_b, e.court_id)?;
            if score_a == score_b {
                return Err(TournamentError::TiedScore(e.court_id));
            }
            if !seen.insert(e.court_id) {
                return Err(TournamentError::DuplicateCourt(e.court_id));
            }
            Ok(CourtScore {
                court_id: e.court_id,
                score_a,
                score_b,
            })
        })
        .collect()
}

fn court_score(score: i64, court_id: CourtId) -> Result<u32, TournamentError> {
    if score < 0 {
        return Err(TournamentError::NegativeScore(court_id));
    }
    u32::try_from(score).map_err(|_| TournamentError::ScoreOutOfRange(court_id))
}
