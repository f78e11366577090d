//! Data structures for the badminton tournament: players, courts, history, tournament state.

mod court;
mod history;
mod player;
mod tournament;

pub use court::{ActiveCourt, CourtId, CourtLineup, CourtView, Lineup, Side, UpcomingRound};
pub use history::{HistoryId, LeaderboardEntry, MatchHistoryEntry};
pub use player::{Player, PlayerId, UNKNOWN_PLAYER_NAME};
pub use tournament::{
    ConfigUpdate, Tournament, TournamentError, TournamentMode, TournamentStatus,
};
