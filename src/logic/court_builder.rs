//! Partition an ordered player list into courts and a sitting-out remainder.

use crate::models::{CourtLineup, Lineup, TournamentMode};

/// Build courts from players in queue order.
///
/// 1. The first `court_count * players_per_match` players are active; the rest sit out.
/// 2. Active players are split into groups of `players_per_match`, courts numbered from 1.
/// 3. Partitioning stops at the first incomplete group; those players are dropped
///    (neither on a court nor sitting out). Courts are never partially filled.
/// 4. Singles: `[g0]` vs `[g1]`. Doubles: `[g0, g1]` vs `[g2, g3]`.
///
/// No courts means no lineup at all: both lists come back empty.
pub fn build_courts<P: Clone>(ordered: &[P], court_count: usize, mode: TournamentMode) -> Lineup<P> {
    if court_count == 0 {
        return Lineup::default();
    }

    let per_match = mode.players_per_match();
    let per_team = mode.players_per_team();
    let max_players = court_count * per_match;

    let active_len = ordered.len().min(max_players);
    let (active, sitting_out) = ordered.split_at(active_len);

    let courts = active
        .chunks_exact(per_match)
        .zip(1u32..)
        .map(|(group, court_number)| {
            let (team_a, team_b) = group.split_at(per_team);
            CourtLineup {
                court_number,
                team_a: team_a.to_vec(),
                team_b: team_b.to_vec(),
            }
        })
        .collect();

    Lineup {
        courts,
        sitting_out: sitting_out.to_vec(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn incomplete_group_is_dropped() {
        // 2 courts of doubles, only 6 players: one full court, 2 players left over.
        let lineup = build_courts(&[1, 2, 3, 4, 5, 6], 2, TournamentMode::Doubles);
        assert_eq!(lineup.courts.len(), 1);
        assert!(lineup.sitting_out.is_empty());
    }

    #[test]
    fn zero_courts_yields_nothing() {
        let lineup = build_courts(&[1, 2, 3, 4], 0, TournamentMode::Singles);
        assert!(lineup.courts.is_empty());
        assert!(lineup.sitting_out.is_empty());
    }
}
