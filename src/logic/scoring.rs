//! Scoring: apply a batch of court scores to player stats and match history.

use crate::logic::validation::CourtScore;
use crate::models::{ActiveCourt, HistoryId, MatchHistoryEntry, PlayerId, Side, TournamentError};
use crate::store::TournamentData;
use chrono::{DateTime, Utc};

/// Apply a batch of scores. All or nothing: every court id is resolved before anything
/// changes, so a missing court leaves stats and history untouched.
///
/// Scores are assumed checked (no ties); the strictly higher side wins. Win points are
/// read once for the whole batch. Does not rotate the queue or advance the round.
///
/// Returns the ids of the new history entries, in submission order.
pub fn submit_scores(
    data: &mut TournamentData,
    scores: &[CourtScore],
    played_at: DateTime<Utc>,
) -> Result<Vec<HistoryId>, TournamentError> {
    let resolved: Vec<(ActiveCourt, &CourtScore)> = scores
        .iter()
        .map(|s| {
            data.court(s.court_id)
                .cloned()
                .map(|court| (court, s))
                .ok_or(TournamentError::CourtNotFound(s.court_id))
        })
        .collect::<Result<_, _>>()?;

    let win_points = data.tournament.win_points;
    let mut entries = Vec::with_capacity(resolved.len());

    for (court, score) in resolved {
        let winner = if score.score_a > score.score_b {
            Side::A
        } else {
            Side::B
        };

        // Names first: history keeps who played, even if a player is gone later.
        let team_a_names = names(data, &court.team_a);
        let team_b_names = names(data, &court.team_b);

        apply_match_result(data, &court, winner, win_points);

        if let Some(active) = data.court_mut(court.id) {
            active.score_a = Some(score.score_a);
            active.score_b = Some(score.score_b);
        }

        entries.push(data.push_history(MatchHistoryEntry {
            id: 0,
            round_number: court.round_number,
            court_number: court.court_number,
            team_a_names,
            team_b_names,
            score_a: score.score_a,
            score_b: score.score_b,
            winner,
            played_at,
        }));
    }

    Ok(entries)
}

/// Winners: +1 played, +1 win, +win_points. Losers: +1 played, +1 loss.
/// Dangling ids on a court have nobody to credit and are skipped.
fn apply_match_result(data: &mut TournamentData, court: &ActiveCourt, winner: Side, win_points: u32) {
    let loser = match winner {
        Side::A => Side::B,
        Side::B => Side::A,
    };
    for &pid in court.team(winner) {
        if let Some(p) = data.player_mut(pid) {
            p.add_win(win_points);
        }
    }
    for &pid in court.team(loser) {
        if let Some(p) = data.player_mut(pid) {
            p.add_loss();
        }
    }
}

fn names(data: &TournamentData, team: &[PlayerId]) -> Vec<String> {
    team.iter().map(|&id| data.player_name_or_unknown(id)).collect()
}
