//! Integration tests for the round-robin schedule preview.

use badminton_rotation::{round_robin_schedule, Player, ScheduledMatch, TournamentMode};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::collections::{BTreeSet, HashMap};

fn players(n: u32) -> Vec<Player> {
    (1..=n).map(|i| Player::new(i, format!("P{i}"))).collect()
}

fn side_key(team: &[Player]) -> BTreeSet<u32> {
    team.iter().map(|p| p.id).collect()
}

#[test]
fn singles_everyone_meets_once() {
    let mut rng = StdRng::seed_from_u64(1);
    let schedule = round_robin_schedule(&players(5), 2, TournamentMode::Singles, &mut rng);

    assert_eq!(schedule.len(), 10);
    let pairs: BTreeSet<(u32, u32)> = schedule
        .iter()
        .map(|m| {
            let (a, b) = (m.team_a[0].id, m.team_b[0].id);
            (a.min(b), a.max(b))
        })
        .collect();
    assert_eq!(pairs.len(), 10);
    assert!(schedule.iter().all(|m| m.resting.is_none()));
}

#[test]
fn rounds_never_exceed_court_count() {
    let mut rng = StdRng::seed_from_u64(2);
    let schedule = round_robin_schedule(&players(8), 3, TournamentMode::Singles, &mut rng);

    let mut per_round: HashMap<u32, Vec<u32>> = HashMap::new();
    for m in &schedule {
        per_round.entry(m.round).or_default().push(m.court_number);
    }
    for courts in per_round.values() {
        assert!(courts.len() <= 3);
        let expected: Vec<u32> = (1..=courts.len() as u32).collect();
        assert_eq!(courts, &expected);
    }
}

#[test]
fn doubles_odd_roster_rotates_triple_lineup() {
    let mut rng = StdRng::seed_from_u64(3);
    // 7 players: two pairs and one triple -> 3 teams -> 3 matches.
    let schedule = round_robin_schedule(&players(7), 2, TournamentMode::Doubles, &mut rng);
    assert_eq!(schedule.len(), 3);

    let triple_matches: Vec<&ScheduledMatch> =
        schedule.iter().filter(|m| m.resting.is_some()).collect();
    // The triple team plays the other two teams.
    assert_eq!(triple_matches.len(), 2);

    let mut resting = BTreeSet::new();
    for m in &triple_matches {
        assert_eq!(m.team_a.len(), 2);
        assert_eq!(m.team_b.len(), 2);
        resting.insert(m.resting.as_ref().unwrap().id);
    }
    // Two matches, two different members resting.
    assert_eq!(resting.len(), 2);
}

#[test]
fn doubles_even_roster_every_team_meets_once() {
    let mut rng = StdRng::seed_from_u64(4);
    let schedule = round_robin_schedule(&players(8), 2, TournamentMode::Doubles, &mut rng);
    assert_eq!(schedule.len(), 6);

    let meetings: BTreeSet<(BTreeSet<u32>, BTreeSet<u32>)> = schedule
        .iter()
        .map(|m| {
            let a = side_key(&m.team_a);
            let b = side_key(&m.team_b);
            if a < b {
                (a, b)
            } else {
                (b, a)
            }
        })
        .collect();
    assert_eq!(meetings.len(), 6);
}

#[test]
fn too_few_players_means_no_matches() {
    let mut rng = StdRng::seed_from_u64(5);
    assert!(round_robin_schedule(&players(1), 1, TournamentMode::Singles, &mut rng).is_empty());
    assert!(round_robin_schedule(&players(3), 1, TournamentMode::Doubles, &mut rng).is_empty());
}
