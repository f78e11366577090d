//! Round-robin schedule: the simpler pairing mode without a rotation queue.
//!
//! Players are shuffled into fixed participants (single players, or pairs in doubles, with
//! a three-player team when the count is odd), every participant meets every other once
//! (circle method), and matches are packed into rounds of at most `court_count` courts.
//! Read-only preview; nothing here touches the stored tournament.

use crate::models::{Player, TournamentMode};
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// One match in the schedule.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduledMatch {
    pub round: u32,
    pub court_number: u32,
    /// Players on court; for a three-player team, only the two playing this match.
    pub team_a: Vec<Player>,
    pub team_b: Vec<Player>,
    /// Three-player team member sitting this match out.
    pub resting: Option<Player>,
}

/// Sub-pairs a three-player team cycles through: (playing, resting) member indices.
const TRIPLE_LINEUPS: [([usize; 2], usize); 3] = [([0, 1], 2), ([0, 2], 1), ([1, 2], 0)];

/// Build a full round-robin schedule for the roster.
pub fn round_robin_schedule<R: Rng + ?Sized>(
    players: &[Player],
    court_count: usize,
    mode: TournamentMode,
    rng: &mut R,
) -> Vec<ScheduledMatch> {
    let mut shuffled = players.to_vec();
    shuffled.shuffle(rng);
    let mut participants = participants(shuffled, mode);
    participants.shuffle(rng);

    let per_round = court_count.max(1);
    let mut triple_turn = 0;

    circle_pairings(participants.len())
        .into_iter()
        .enumerate()
        .map(|(i, (a, b))| {
            let (team_a, rest_a) = lineup(&participants[a], &mut triple_turn);
            let (team_b, rest_b) = lineup(&participants[b], &mut triple_turn);
            ScheduledMatch {
                round: (i / per_round) as u32 + 1,
                court_number: (i % per_round) as u32 + 1,
                team_a,
                team_b,
                resting: rest_a.or(rest_b),
            }
        })
        .collect()
}

/// Singles: one participant per player. Doubles: sequential pairs; an odd count of at
/// least three folds the last three players into one team.
fn participants(players: Vec<Player>, mode: TournamentMode) -> Vec<Vec<Player>> {
    match mode {
        TournamentMode::Singles => players.into_iter().map(|p| vec![p]).collect(),
        TournamentMode::Doubles => {
            let n = players.len();
            let has_triple = n >= 3 && n % 2 == 1;
            let pair_end = if has_triple { n - 3 } else { n };
            let mut teams: Vec<Vec<Player>> =
                players[..pair_end].chunks_exact(2).map(|c| c.to_vec()).collect();
            if has_triple {
                teams.push(players[pair_end..].to_vec());
            }
            teams
        }
    }
}

/// Players on court for a participant; a three-player team rotates through its sub-pairs.
fn lineup(participant: &[Player], triple_turn: &mut usize) -> (Vec<Player>, Option<Player>) {
    if participant.len() != 3 {
        return (participant.to_vec(), None);
    }
    let (playing, rest) = TRIPLE_LINEUPS[*triple_turn % TRIPLE_LINEUPS.len()];
    *triple_turn += 1;
    (
        playing.iter().map(|&i| participant[i].clone()).collect(),
        Some(participant[rest].clone()),
    )
}

/// Circle method over `n` participants, in round order. Odd `n` gets a bye slot; pairings
/// against the bye are skipped.
fn circle_pairings(n: usize) -> Vec<(usize, usize)> {
    if n < 2 {
        return Vec::new();
    }
    let total = if n % 2 == 0 { n } else { n + 1 };
    let half = total / 2;
    let mut rotating: Vec<usize> = (1..total).collect();
    let mut pairings = Vec::with_capacity(n * (n - 1) / 2);

    for _ in 0..total - 1 {
        let last = rotating.len() - 1;
        let round = std::iter::once((0, rotating[last]))
            .chain((0..half - 1).map(|i| (rotating[i], rotating[last - 1 - i])));
        pairings.extend(round.filter(|&(a, b)| a < n && b < n));
        rotating.rotate_right(1);
    }

    pairings
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn circle_pairs_every_participant_once() {
        for n in 2..9 {
            let pairings = circle_pairings(n);
            let unique: HashSet<(usize, usize)> =
                pairings.iter().map(|&(a, b)| (a.min(b), a.max(b))).collect();
            assert_eq!(pairings.len(), n * (n - 1) / 2);
            assert_eq!(unique.len(), pairings.len());
        }
    }

    #[test]
    fn circle_pairs_nothing_for_single_participant() {
        assert!(circle_pairings(1).is_empty());
        assert!(circle_pairings(0).is_empty());
    }

    #[test]
    fn odd_doubles_roster_forms_a_triple() {
        let players: Vec<Player> = (1..=7).map(|i| Player::new(i, format!("P{i}"))).collect();
        let teams = participants(players, TournamentMode::Doubles);
        let sizes: Vec<usize> = teams.iter().map(Vec::len).collect();
        assert_eq!(sizes, vec![2, 2, 3]);
    }
}
