//! CSV roster import and leaderboard/history export.

use crate::models::{LeaderboardEntry, MatchHistoryEntry, Side, TournamentError};

/// Player names from the first column of a CSV roster. A leading `name` header row is
/// skipped; blank cells are dropped. Extra columns are ignored.
pub fn parse_roster_csv(text: &str) -> Result<Vec<String>, TournamentError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(text.as_bytes());

    let mut names = Vec::new();
    for (i, record) in reader.records().enumerate() {
        let record = record.map_err(csv_error)?;
        let Some(name) = record.get(0).filter(|n| !n.is_empty()) else {
            continue;
        };
        if i == 0 && name.eq_ignore_ascii_case("name") {
            continue;
        }
        names.push(name.to_string());
    }
    Ok(names)
}

/// Leaderboard as CSV: rank, name, played, wins, losses, points.
pub fn leaderboard_csv(entries: &[LeaderboardEntry]) -> Result<String, TournamentError> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer
        .write_record(["rank", "name", "matches_played", "wins", "losses", "points"])
        .map_err(csv_error)?;
    for e in entries {
        writer
            .write_record([
                e.rank.to_string(),
                e.player.name.clone(),
                e.player.matches_played.to_string(),
                e.player.wins.to_string(),
                e.player.losses.to_string(),
                e.player.points.to_string(),
            ])
            .map_err(csv_error)?;
    }
    finish(writer)
}

/// History as CSV, one row per finished court. Team members are joined with " / ".
pub fn history_csv(entries: &[MatchHistoryEntry]) -> Result<String, TournamentError> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer
        .write_record([
            "round", "court", "team_a", "team_b", "score_a", "score_b", "winner", "played_at",
        ])
        .map_err(csv_error)?;
    for e in entries {
        let winner = match e.winner {
            Side::A => "a",
            Side::B => "b",
        };
        writer
            .write_record([
                e.round_number.to_string(),
                e.court_number.to_string(),
                e.team_a_names.join(" / "),
                e.team_b_names.join(" / "),
                e.score_a.to_string(),
                e.score_b.to_string(),
                winner.to_string(),
                e.played_at.to_rfc3339(),
            ])
            .map_err(csv_error)?;
    }
    finish(writer)
}

fn finish(writer: csv::Writer<Vec<u8>>) -> Result<String, TournamentError> {
    let bytes = writer.into_inner().map_err(|e| csv_error(e.error()))?;
    String::from_utf8(bytes).map_err(csv_error)
}

fn csv_error(e: impl std::fmt::Display) -> TournamentError {
    TournamentError::Csv(e.to_string())
}
