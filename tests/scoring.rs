//! Integration tests for the scoring transaction.

use badminton_rotation::logic::queue::from_queue;
use badminton_rotation::logic::submit_scores;
use badminton_rotation::{
    CourtScore, PlayerId, Side, TournamentData, TournamentError, TournamentMode,
};
use chrono::{TimeZone, Utc};

/// Data with `n` players and round-1 courts built from roster order.
fn data_with_courts(n: usize, courts: u32, mode: TournamentMode, win_points: u32) -> TournamentData {
    let mut data = TournamentData::default();
    for i in 0..n {
        data.add_player(&format!("P{i}"));
    }
    data.tournament.courts = courts;
    data.tournament.mode = mode;
    data.tournament.win_points = win_points;
    data.tournament.begin();
    data.queue = data.players.iter().map(|p| p.id).collect();
    let lineup = from_queue(&data.queue, &data.players, courts as usize, mode);
    data.replace_courts(&lineup.courts, 1);
    data
}

fn score(court_id: u32, score_a: u32, score_b: u32) -> CourtScore {
    CourtScore {
        court_id,
        score_a,
        score_b,
    }
}

fn played_at() -> chrono::DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 5, 1, 18, 30, 0).unwrap()
}

#[test]
fn singles_winner_gets_win_and_points() {
    let mut data = data_with_courts(2, 1, TournamentMode::Singles, 1);
    let court = data.courts[0].clone();

    submit_scores(&mut data, &[score(court.id, 21, 18)], played_at()).unwrap();

    let a = data.player(court.team_a[0]).unwrap();
    assert_eq!((a.matches_played, a.wins, a.losses, a.points), (1, 1, 0, 1));
    let b = data.player(court.team_b[0]).unwrap();
    assert_eq!((b.matches_played, b.wins, b.losses, b.points), (1, 0, 1, 0));

    assert_eq!(data.history.len(), 1);
    let entry = &data.history[0];
    assert_eq!(entry.winner, Side::A);
    assert_eq!((entry.score_a, entry.score_b), (21, 18));
    assert_eq!(entry.round_number, 1);
    assert_eq!(entry.court_number, 1);
    assert_eq!(entry.team_a_names, vec![a.name.clone()]);
    assert_eq!(entry.played_at, played_at());
}

#[test]
fn team_b_can_win() {
    let mut data = data_with_courts(4, 1, TournamentMode::Doubles, 2);
    let court = data.courts[0].clone();

    submit_scores(&mut data, &[score(court.id, 15, 21)], played_at()).unwrap();

    for id in &court.team_b {
        assert_eq!(data.player(*id).unwrap().points, 2);
    }
    for id in &court.team_a {
        assert_eq!(data.player(*id).unwrap().losses, 1);
    }
    assert_eq!(data.history[0].winner, Side::B);
}

#[test]
fn every_player_on_a_scored_court_plays_exactly_once() {
    let mut data = data_with_courts(10, 2, TournamentMode::Doubles, 3);
    let ids: Vec<u32> = data.courts.iter().map(|c| c.id).collect();

    submit_scores(&mut data, &[score(ids[0], 21, 10), score(ids[1], 19, 21)], played_at()).unwrap();

    let on_court: Vec<PlayerId> = data
        .courts
        .iter()
        .flat_map(|c| c.team_a.iter().chain(&c.team_b).copied())
        .collect();
    for p in &data.players {
        let expected = u32::from(on_court.contains(&p.id));
        assert_eq!(p.matches_played, expected, "{}", p.name);
    }
    let wins: u32 = data.players.iter().map(|p| p.wins).sum();
    let losses: u32 = data.players.iter().map(|p| p.losses).sum();
    let points: u32 = data.players.iter().map(|p| p.points).sum();
    assert_eq!(wins, losses);
    assert_eq!(points, 4 * 3);
    assert_eq!(data.history.len(), 2);
}

#[test]
fn missing_court_fails_whole_batch() {
    let mut data = data_with_courts(4, 1, TournamentMode::Doubles, 1);
    let court_id = data.courts[0].id;
    let before = data.clone();

    let result = submit_scores(&mut data, &[score(court_id, 21, 5), score(999, 21, 5)], played_at());

    assert_eq!(result, Err(TournamentError::CourtNotFound(999)));
    assert_eq!(data.players, before.players);
    assert_eq!(data.history, before.history);
    assert_eq!(data.courts, before.courts);
}

#[test]
fn submitted_scores_are_recorded_on_the_court() {
    let mut data = data_with_courts(2, 1, TournamentMode::Singles, 1);
    let court_id = data.courts[0].id;

    submit_scores(&mut data, &[score(court_id, 11, 21)], played_at()).unwrap();

    let court = data.court(court_id).unwrap();
    assert_eq!((court.score_a, court.score_b), (Some(11), Some(21)));
}

#[test]
fn removed_player_is_recorded_as_unknown() {
    let mut data = data_with_courts(2, 1, TournamentMode::Singles, 1);
    let court = data.courts[0].clone();
    data.remove_player(court.team_b[0]);

    submit_scores(&mut data, &[score(court.id, 21, 3)], played_at()).unwrap();

    assert_eq!(data.history[0].team_b_names, vec!["Unknown".to_string()]);
    assert_eq!(data.player(court.team_a[0]).unwrap().wins, 1);
}

#[test]
fn history_names_survive_later_removal() {
    let mut data = data_with_courts(2, 1, TournamentMode::Singles, 1);
    let court = data.courts[0].clone();
    let name = data.player(court.team_a[0]).unwrap().name.clone();

    submit_scores(&mut data, &[score(court.id, 21, 3)], played_at()).unwrap();
    data.remove_all_players();

    assert_eq!(data.history[0].team_a_names, vec![name]);
}
