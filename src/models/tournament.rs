//! Tournament configuration, status, and errors.

use crate::models::court::CourtId;
use serde::{Deserialize, Serialize};

/// Errors that can occur during tournament operations.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum TournamentError {
    /// Roster too small to fill every configured court.
    NotEnoughPlayersToStart { required: usize, available: usize },
    /// Tournament is not in a state that allows this action.
    InvalidState,
    /// A configuration value is out of range.
    InvalidConfig(&'static str),
    /// Add-players request without any names.
    NoPlayerNames,
    /// Score submission without any entries.
    NoScores,
    /// A submitted score is below zero.
    NegativeScore(CourtId),
    /// Both sides of a court were given the same score.
    TiedScore(CourtId),
    /// The same court appears twice in one submission.
    DuplicateCourt(CourtId),
    /// A submission references a court that is not in play.
    CourtNotFound(CourtId),
    /// Roster CSV could not be read.
    Csv(String),
    /// Snapshot file could not be read or written.
    Storage(String),
    /// A submitted score does not fit a court score.
    ScoreOutOfRange(CourtId),
}

impl std::fmt::Display for TournamentError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TournamentError::NotEnoughPlayersToStart { required, available } => write!(
                f,
                "Need at least {} players to start (have {})",
                required, available
            ),
            TournamentError::InvalidState => write!(f, "Invalid state for this action"),
            TournamentError::InvalidConfig(reason) => write!(f, "Invalid configuration: {}", reason),
            TournamentError::NoPlayerNames => write!(f, "names must be a non-empty array of strings"),
            TournamentError::NoScores => write!(f, "scores must be a non-empty array"),
            TournamentError::NegativeScore(id) => {
                write!(f, "Scores for court {} must not be negative", id)
            }
            TournamentError::TiedScore(id) => {
                write!(f, "Scores for court {} are tied; a match needs a winner", id)
            }
            TournamentError::ScoreOutOfRange(id) => {
                write!(f, "Scores for court {} are out of range", id)
            }
            TournamentError::DuplicateCourt(id) => {
                write!(f, "Court {} was submitted more than once", id)
            }
            TournamentError::CourtNotFound(id) => write!(f, "Court {} not found", id),
            TournamentError::Csv(msg) => write!(f, "CSV error: {}", msg),
            TournamentError::Storage(msg) => write!(f, "Storage error: {}", msg),
        }
    }
}

impl std::error::Error for TournamentError {}

/// Team composition on a court.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TournamentMode {
    /// 1v1.
    Singles,
    /// 2v2.
    #[default]
    Doubles,
}

impl TournamentMode {
    /// Players on one side of a court.
    pub fn players_per_team(self) -> usize {
        match self {
            TournamentMode::Singles => 1,
            TournamentMode::Doubles => 2,
        }
    }

    /// Players needed to fill one court.
    pub fn players_per_match(self) -> usize {
        self.players_per_team() * 2
    }
}

/// Current phase of the tournament.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TournamentStatus {
    /// Editing roster and configuration; no courts.
    #[default]
    Setup,
    /// Rounds are being played.
    Playing,
}

/// The singleton tournament record: configuration plus progress.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tournament {
    pub courts: u32,
    pub mode: TournamentMode,
    pub win_points: u32,
    /// 0 before start, 1 for the first round.
    pub current_round: u32,
    pub status: TournamentStatus,
}

impl Default for Tournament {
    fn default() -> Self {
        Self {
            courts: 2,
            mode: TournamentMode::Doubles,
            win_points: 1,
            current_round: 0,
            status: TournamentStatus::Setup,
        }
    }
}

/// Partial configuration update: only provided fields change.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigUpdate {
    #[serde(default)]
    pub courts: Option<u32>,
    #[serde(default)]
    pub mode: Option<TournamentMode>,
    #[serde(default)]
    pub win_points: Option<u32>,
}

impl Tournament {
    /// Players required to fill every configured court.
    pub fn players_required_to_start(&self) -> usize {
        self.courts as usize * self.mode.players_per_match()
    }

    pub fn is_playing(&self) -> bool {
        self.status == TournamentStatus::Playing
    }

    /// Apply a partial update. Allowed in any status; takes effect from the next generated round.
    pub fn apply_config(&mut self, update: ConfigUpdate) -> Result<(), TournamentError> {
        if update.courts == Some(0) {
            return Err(TournamentError::InvalidConfig("courts must be at least 1"));
        }
        if update.win_points == Some(0) {
            return Err(TournamentError::InvalidConfig("winPoints must be at least 1"));
        }
        if let Some(courts) = update.courts {
            self.courts = courts;
        }
        if let Some(mode) = update.mode {
            self.mode = mode;
        }
        if let Some(win_points) = update.win_points {
            self.win_points = win_points;
        }
        Ok(())
    }

    /// Setup -> Playing at round 1.
    pub fn begin(&mut self) {
        self.status = TournamentStatus::Playing;
        self.current_round = 1;
    }

    /// Playing -> Playing with the next round number.
    pub fn advance_round(&mut self) {
        self.current_round = self.current_round.saturating_add(1);
    }
}
