//! Tournament business logic: court building, rotation, scoring, standings.

pub mod court_builder;
pub mod matchmaker;
pub mod queue;
mod round_robin;
mod scoring;
mod standings;
mod validation;

pub use court_builder::build_courts;
pub use matchmaker::{project as project_upcoming_rounds, DEFAULT_UPCOMING_ROUNDS};
pub use round_robin::{round_robin_schedule, ScheduledMatch};
pub use scoring::submit_scores;
pub use standings::{history, leaderboard, roster};
pub use validation::{validate_scores, CourtScore, ScoreSubmission};
