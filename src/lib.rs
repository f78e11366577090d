//! Badminton rotation tournament: models, matchmaking logic, and the shared session.

pub mod config;
pub mod events;
pub mod export;
pub mod logic;
pub mod models;
pub mod session;
pub mod store;

pub use config::ServerConfig;
pub use events::{EventBatch, EventBus, FullState, TournamentEvent};
pub use logic::{
    build_courts, project_upcoming_rounds, round_robin_schedule, validate_scores, CourtScore,
    ScheduledMatch, ScoreSubmission,
};
pub use models::{
    ActiveCourt, ConfigUpdate, CourtId, CourtLineup, CourtView, HistoryId, LeaderboardEntry,
    Lineup, MatchHistoryEntry, Player, PlayerId, Side, Tournament, TournamentError,
    TournamentMode, TournamentStatus, UpcomingRound,
};
pub use session::{ShuffleOutcome, StartOutcome, SubmitOutcome, TournamentSession};
pub use store::{SnapshotFile, TournamentData};
