//! Integration tests for the court builder: partitioning players into courts.

use badminton_rotation::{build_courts, Player, TournamentMode};
use std::collections::HashSet;

fn players(n: u32) -> Vec<Player> {
    (1..=n).map(|i| Player::new(i, format!("P{i}"))).collect()
}

#[test]
fn singles_two_players_one_court() {
    let lineup = build_courts(&players(2), 1, TournamentMode::Singles);
    assert_eq!(lineup.courts.len(), 1);
    let court = &lineup.courts[0];
    assert_eq!(court.court_number, 1);
    assert_eq!(court.team_a[0].name, "P1");
    assert_eq!(court.team_b[0].name, "P2");
    assert!(lineup.sitting_out.is_empty());
}

#[test]
fn doubles_teams_take_first_two_and_last_two() {
    let lineup = build_courts(&[10, 11, 12, 13, 14, 15, 16, 17], 2, TournamentMode::Doubles);
    assert_eq!(lineup.courts.len(), 2);
    assert_eq!(lineup.courts[0].team_a, vec![10, 11]);
    assert_eq!(lineup.courts[0].team_b, vec![12, 13]);
    assert_eq!(lineup.courts[1].court_number, 2);
    assert_eq!(lineup.courts[1].team_a, vec![14, 15]);
    assert_eq!(lineup.courts[1].team_b, vec![16, 17]);
}

#[test]
fn extra_players_sit_out_in_order() {
    let lineup = build_courts(&[1, 2, 3, 4, 5, 6, 7], 1, TournamentMode::Doubles);
    assert_eq!(lineup.courts.len(), 1);
    assert_eq!(lineup.sitting_out, vec![5, 6, 7]);
}

#[test]
fn short_roster_fills_whole_courts_only() {
    // 3 courts of singles, 5 players: 2 full courts, 1 player left without a partner.
    let lineup = build_courts(&[1, 2, 3, 4, 5], 3, TournamentMode::Singles);
    assert_eq!(lineup.courts.len(), 2);
    assert!(lineup.sitting_out.is_empty());
    let numbers: Vec<u32> = lineup.courts.iter().map(|c| c.court_number).collect();
    assert_eq!(numbers, vec![1, 2]);
}

#[test]
fn empty_roster_yields_nothing() {
    let lineup = build_courts::<u32>(&[], 4, TournamentMode::Doubles);
    assert!(lineup.courts.is_empty());
    assert!(lineup.sitting_out.is_empty());
}

#[test]
fn partition_is_complete_and_disjoint() {
    for mode in [TournamentMode::Singles, TournamentMode::Doubles] {
        let per_match = mode.players_per_match();
        for court_count in 1..5usize {
            for n in 0..20u32 {
                let ids: Vec<u32> = (0..n).collect();
                let lineup = build_courts(&ids, court_count, mode);

                let max_players = court_count * per_match;
                let active = (n as usize).min(max_players);
                assert_eq!(lineup.courts.len(), active / per_match);
                assert_eq!(lineup.sitting_out.len(), (n as usize).saturating_sub(max_players));

                let mut seen = HashSet::new();
                for court in &lineup.courts {
                    assert_eq!(court.team_a.len(), mode.players_per_team());
                    assert_eq!(court.team_b.len(), mode.players_per_team());
                    for id in court.team_a.iter().chain(&court.team_b) {
                        assert!(seen.insert(*id), "player {id} on two courts");
                    }
                }
                for id in &lineup.sitting_out {
                    assert!(seen.insert(*id), "player {id} both playing and sitting out");
                }
            }
        }
    }
}
