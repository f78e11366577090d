//! Change events pushed to observers after each committed mutation.

use crate::models::{
    CourtView, LeaderboardEntry, MatchHistoryEntry, Player, Tournament, UpcomingRound,
};
use serde::Serialize;
use std::sync::Arc;
use tokio::sync::broadcast;

/// Everything an observer needs to render the tournament.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FullState {
    pub tournament: Tournament,
    pub players: Vec<Player>,
    pub courts: Vec<CourtView>,
    pub upcoming_rounds: Vec<UpcomingRound>,
    pub leaderboard: Vec<LeaderboardEntry>,
    pub history: Vec<MatchHistoryEntry>,
}

/// One typed view update.
#[derive(Clone, Debug, Serialize)]
#[serde(tag = "event", content = "data")]
pub enum TournamentEvent {
    #[serde(rename = "sync:full-state")]
    FullState(Box<FullState>),
    #[serde(rename = "tournament:updated")]
    TournamentUpdated(Tournament),
    #[serde(rename = "players:updated")]
    PlayersUpdated(Vec<Player>),
    #[serde(rename = "courts:updated")]
    CourtsUpdated(Vec<CourtView>),
    #[serde(rename = "upcoming:updated")]
    UpcomingUpdated(Vec<UpcomingRound>),
    #[serde(rename = "leaderboard:updated")]
    LeaderboardUpdated(Vec<LeaderboardEntry>),
    #[serde(rename = "history:updated")]
    HistoryUpdated(Vec<MatchHistoryEntry>),
    #[serde(rename = "tournament:reset")]
    Reset,
}

impl TournamentEvent {
    /// Wire name, e.g. `courts:updated`.
    pub fn name(&self) -> &'static str {
        match self {
            TournamentEvent::FullState(_) => "sync:full-state",
            TournamentEvent::TournamentUpdated(_) => "tournament:updated",
            TournamentEvent::PlayersUpdated(_) => "players:updated",
            TournamentEvent::CourtsUpdated(_) => "courts:updated",
            TournamentEvent::UpcomingUpdated(_) => "upcoming:updated",
            TournamentEvent::LeaderboardUpdated(_) => "leaderboard:updated",
            TournamentEvent::HistoryUpdated(_) => "history:updated",
            TournamentEvent::Reset => "tournament:reset",
        }
    }
}

/// Events from one mutation, in publish order. Observers receive them together.
pub type EventBatch = Arc<Vec<TournamentEvent>>;

/// Batches kept for slow observers before they start lagging.
const EVENT_CAPACITY: usize = 64;

/// Fan-out of event batches to every subscribed observer.
#[derive(Debug)]
pub struct EventBus {
    sender: broadcast::Sender<EventBatch>,
}

impl Default for EventBus {
    fn default() -> Self {
        let (sender, _) = broadcast::channel(EVENT_CAPACITY);
        Self { sender }
    }
}

impl EventBus {
    pub fn subscribe(&self) -> broadcast::Receiver<EventBatch> {
        self.sender.subscribe()
    }

    /// Send a batch to current observers. Having no observers is fine.
    pub fn publish(&self, events: Vec<TournamentEvent>) {
        let names: Vec<&str> = events.iter().map(TournamentEvent::name).collect();
        match self.sender.send(Arc::new(events)) {
            Ok(observers) => log::debug!("Published {:?} to {} observer(s)", names, observers),
            Err(_) => log::trace!("No observers for {:?}", names),
        }
    }
}
