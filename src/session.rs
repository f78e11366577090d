//! The tournament session: every operation the web layer calls.
//!
//! Mutations are serialized behind one write lock and run on a copy of the state. The copy
//! is saved to the snapshot file (if any) and swapped in only when the whole operation
//! succeeded; its change events are published before the lock is released, so observers
//! never see a half-applied update or batches out of order.

use crate::events::{EventBatch, EventBus, FullState, TournamentEvent};
use crate::export;
use crate::logic::{
    self, queue, round_robin_schedule, validate_scores, ScheduledMatch, ScoreSubmission,
    DEFAULT_UPCOMING_ROUNDS,
};
use crate::models::{
    ConfigUpdate, CourtView, LeaderboardEntry, MatchHistoryEntry, Player, PlayerId, Tournament,
    TournamentError, UpcomingRound,
};
use crate::store::{SnapshotFile, TournamentData};
use chrono::Utc;
use serde::Serialize;
use std::sync::{PoisonError, RwLock};
use tokio::sync::broadcast;

/// Result of starting the tournament.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StartOutcome {
    pub tournament: Tournament,
    pub courts: Vec<CourtView>,
    pub upcoming_rounds: Vec<UpcomingRound>,
}

/// Result of reshuffling the current round.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ShuffleOutcome {
    pub courts: Vec<CourtView>,
    pub upcoming_rounds: Vec<UpcomingRound>,
}

/// Result of submitting a round's scores.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitOutcome {
    pub courts: Vec<CourtView>,
    pub upcoming_rounds: Vec<UpcomingRound>,
    pub leaderboard: Vec<LeaderboardEntry>,
    pub history: Vec<MatchHistoryEntry>,
}

/// Single shared tournament for the process.
#[derive(Debug)]
pub struct TournamentSession {
    data: RwLock<TournamentData>,
    snapshot: Option<SnapshotFile>,
    events: EventBus,
    upcoming_rounds: usize,
}

impl TournamentSession {
    /// Fresh tournament kept in memory only.
    pub fn in_memory() -> Self {
        Self::with_data(TournamentData::default(), None)
    }

    /// Resume from the snapshot file if present, otherwise start fresh. Later commits are
    /// written back to the same file.
    pub fn open(snapshot: Option<SnapshotFile>) -> Result<Self, TournamentError> {
        let data = match &snapshot {
            Some(file) => file.load()?.unwrap_or_default(),
            None => TournamentData::default(),
        };
        Ok(Self::with_data(data, snapshot))
    }

    fn with_data(data: TournamentData, snapshot: Option<SnapshotFile>) -> Self {
        Self {
            data: RwLock::new(data),
            snapshot,
            events: EventBus::default(),
            upcoming_rounds: DEFAULT_UPCOMING_ROUNDS,
        }
    }

    /// Number of rounds in the upcoming-rounds projection.
    pub fn with_upcoming_rounds(mut self, rounds: usize) -> Self {
        self.upcoming_rounds = rounds;
        self
    }

    fn read<T>(&self, f: impl FnOnce(&TournamentData) -> T) -> Result<T, TournamentError> {
        let data = self.data.read().unwrap_or_else(PoisonError::into_inner);
        Ok(f(&data))
    }

    /// Run one mutation as a transaction: commit and publish only if `f` succeeds.
    ///
    /// A poisoned lock is recovered: the guarded state is only ever replaced by a finished
    /// draft, so a panic inside `f` leaves it as it was.
    fn mutate<T>(
        &self,
        f: impl FnOnce(&mut TournamentData) -> Result<(T, Vec<TournamentEvent>), TournamentError>,
    ) -> Result<T, TournamentError> {
        let mut guard = self.data.write().unwrap_or_else(PoisonError::into_inner);
        let mut draft = guard.clone();
        let (out, events) = f(&mut draft)?;
        if let Some(snapshot) = &self.snapshot {
            snapshot.save(&draft)?;
        }
        *guard = draft;
        if !events.is_empty() {
            self.events.publish(events);
        }
        Ok(out)
    }

    fn upcoming(&self, data: &TournamentData) -> Vec<UpcomingRound> {
        if !data.tournament.is_playing() {
            return Vec::new();
        }
        logic::project_upcoming_rounds(
            &data.queue,
            &data.players,
            data.tournament.courts as usize,
            data.tournament.mode,
            self.upcoming_rounds,
        )
    }

    fn roster_events(&self, data: &TournamentData) -> Vec<TournamentEvent> {
        vec![
            TournamentEvent::PlayersUpdated(logic::roster(&data.players)),
            TournamentEvent::CourtsUpdated(data.court_views()),
            TournamentEvent::UpcomingUpdated(self.upcoming(data)),
            TournamentEvent::LeaderboardUpdated(logic::leaderboard(&data.players)),
        ]
    }

    fn full_state_of(&self, data: &TournamentData) -> FullState {
        FullState {
            tournament: data.tournament,
            players: logic::roster(&data.players),
            courts: data.court_views(),
            upcoming_rounds: self.upcoming(data),
            leaderboard: logic::leaderboard(&data.players),
            history: logic::history(&data.history),
        }
    }

    pub fn tournament(&self) -> Result<Tournament, TournamentError> {
        self.read(|d| d.tournament)
    }

    /// Change only the provided fields. Accepted while playing; the new values apply from
    /// the next generated round.
    pub fn update_config(&self, update: ConfigUpdate) -> Result<Tournament, TournamentError> {
        self.mutate(|data| {
            data.tournament.apply_config(update)?;
            log::info!("Tournament config updated: {:?}", data.tournament);
            let events = vec![
                TournamentEvent::TournamentUpdated(data.tournament),
                TournamentEvent::UpcomingUpdated(self.upcoming(data)),
            ];
            Ok((data.tournament, events))
        })
    }

    /// Roster sorted by name.
    pub fn players(&self) -> Result<Vec<Player>, TournamentError> {
        self.read(|d| logic::roster(&d.players))
    }

    /// Add players by name (trimmed; blanks and existing names ignored). While playing, new
    /// players join the back of the rotation queue. Returns the roster sorted by name.
    pub fn add_players<S: AsRef<str>>(&self, names: &[S]) -> Result<Vec<Player>, TournamentError> {
        self.mutate(|data| {
            let mut added = 0;
            for name in names {
                if let Some(id) = data.add_player(name.as_ref()) {
                    added += 1;
                    if data.tournament.is_playing() {
                        data.queue.push(id);
                    }
                }
            }
            log::info!("Added {} player(s), roster size {}", added, data.players.len());
            let events = if added > 0 { self.roster_events(data) } else { Vec::new() };
            Ok((logic::roster(&data.players), events))
        })
    }

    /// Add players from the first column of a CSV roster.
    pub fn import_roster_csv(&self, csv_text: &str) -> Result<Vec<Player>, TournamentError> {
        let names = export::parse_roster_csv(csv_text)?;
        self.add_players(names.as_slice())
    }

    /// Remove a player. Unknown ids are a no-op.
    pub fn remove_player(&self, id: PlayerId) -> Result<(), TournamentError> {
        self.mutate(|data| {
            if !data.remove_player(id) {
                return Ok(((), Vec::new()));
            }
            log::info!("Removed player {}", id);
            Ok(((), self.roster_events(data)))
        })
    }

    pub fn remove_all_players(&self) -> Result<(), TournamentError> {
        self.mutate(|data| {
            data.remove_all_players();
            log::info!("Removed all players");
            Ok(((), self.roster_events(data)))
        })
    }

    /// Setup -> Playing: needs enough players to fill every court. Shuffles a fresh queue
    /// and builds round 1.
    pub fn start(&self) -> Result<StartOutcome, TournamentError> {
        self.mutate(|data| {
            if data.tournament.is_playing() {
                return Err(TournamentError::InvalidState);
            }
            let required = data.tournament.players_required_to_start();
            if data.players.len() < required {
                return Err(TournamentError::NotEnoughPlayersToStart {
                    required,
                    available: data.players.len(),
                });
            }

            data.queue = queue::initialize(&data.players, &mut rand::thread_rng());
            data.tournament.begin();
            regenerate_courts(data);
            log::info!(
                "Tournament started: {} players, {} court(s), {:?}",
                data.players.len(),
                data.tournament.courts,
                data.tournament.mode
            );

            let outcome = StartOutcome {
                tournament: data.tournament,
                courts: data.court_views(),
                upcoming_rounds: self.upcoming(data),
            };
            let events = vec![
                TournamentEvent::TournamentUpdated(outcome.tournament),
                TournamentEvent::CourtsUpdated(outcome.courts.clone()),
                TournamentEvent::UpcomingUpdated(outcome.upcoming_rounds.clone()),
            ];
            Ok((outcome, events))
        })
    }

    /// Back to setup with default config; clears roster, courts, history, and queue.
    pub fn reset(&self) -> Result<(), TournamentError> {
        self.mutate(|data| {
            data.reset();
            log::info!("Tournament reset");
            let events = vec![
                TournamentEvent::Reset,
                TournamentEvent::TournamentUpdated(data.tournament),
                TournamentEvent::PlayersUpdated(Vec::new()),
                TournamentEvent::CourtsUpdated(Vec::new()),
                TournamentEvent::UpcomingUpdated(Vec::new()),
                TournamentEvent::LeaderboardUpdated(Vec::new()),
                TournamentEvent::HistoryUpdated(Vec::new()),
            ];
            Ok(((), events))
        })
    }

    pub fn active_courts(&self) -> Result<Vec<CourtView>, TournamentError> {
        self.read(|d| d.court_views())
    }

    /// Projection of the next rounds; empty before the tournament starts.
    pub fn upcoming_rounds(&self) -> Result<Vec<UpcomingRound>, TournamentError> {
        self.read(|d| self.upcoming(d))
    }

    /// Current rotation queue. Ids of players removed during the round stay until the
    /// round is scored.
    pub fn queue(&self) -> Result<Vec<PlayerId>, TournamentError> {
        self.read(|d| d.queue.clone())
    }

    /// New random queue and new courts for the current round. Round, stats, and history
    /// are untouched.
    pub fn shuffle(&self) -> Result<ShuffleOutcome, TournamentError> {
        self.mutate(|data| {
            if !data.tournament.is_playing() {
                return Err(TournamentError::InvalidState);
            }
            data.queue = queue::initialize(&data.players, &mut rand::thread_rng());
            regenerate_courts(data);
            log::info!("Round {} reshuffled", data.tournament.current_round);

            let outcome = ShuffleOutcome {
                courts: data.court_views(),
                upcoming_rounds: self.upcoming(data),
            };
            let events = vec![
                TournamentEvent::CourtsUpdated(outcome.courts.clone()),
                TournamentEvent::UpcomingUpdated(outcome.upcoming_rounds.clone()),
            ];
            Ok((outcome, events))
        })
    }

    /// Finish the round: score the courts, rotate the queue, advance the round, and build
    /// the next round's courts from the rotated queue. One transaction.
    pub fn submit_scores(&self, entries: &[ScoreSubmission]) -> Result<SubmitOutcome, TournamentError> {
        let scores = validate_scores(entries)?;
        self.mutate(|data| {
            if !data.tournament.is_playing() {
                return Err(TournamentError::InvalidState);
            }
            logic::submit_scores(data, &scores, Utc::now())?;

            let courts = data.tournament.courts as usize;
            data.queue = queue::rotate(&data.queue, courts, data.tournament.mode);
            queue::prune(&mut data.queue, &data.players);
            data.tournament.advance_round();
            regenerate_courts(data);
            log::info!(
                "Scored {} court(s); round {} begins",
                scores.len(),
                data.tournament.current_round
            );

            let outcome = SubmitOutcome {
                courts: data.court_views(),
                upcoming_rounds: self.upcoming(data),
                leaderboard: logic::leaderboard(&data.players),
                history: logic::history(&data.history),
            };
            let events = vec![
                TournamentEvent::TournamentUpdated(data.tournament),
                TournamentEvent::CourtsUpdated(outcome.courts.clone()),
                TournamentEvent::UpcomingUpdated(outcome.upcoming_rounds.clone()),
                TournamentEvent::LeaderboardUpdated(outcome.leaderboard.clone()),
                TournamentEvent::HistoryUpdated(outcome.history.clone()),
            ];
            Ok((outcome, events))
        })
    }

    pub fn leaderboard(&self) -> Result<Vec<LeaderboardEntry>, TournamentError> {
        self.read(|d| logic::leaderboard(&d.players))
    }

    /// Match history, newest first.
    pub fn history(&self) -> Result<Vec<MatchHistoryEntry>, TournamentError> {
        self.read(|d| logic::history(&d.history))
    }

    pub fn leaderboard_csv(&self) -> Result<String, TournamentError> {
        export::leaderboard_csv(&self.leaderboard()?)
    }

    pub fn history_csv(&self) -> Result<String, TournamentError> {
        export::history_csv(&self.history()?)
    }

    pub fn full_state(&self) -> Result<FullState, TournamentError> {
        self.read(|d| self.full_state_of(d))
    }

    /// Snapshot plus a receiver for every later batch. Taken under the read lock, so the
    /// first batch received is the first mutation after the snapshot.
    pub fn subscribe(&self) -> Result<(FullState, broadcast::Receiver<EventBatch>), TournamentError> {
        self.read(|d| (self.full_state_of(d), self.events.subscribe()))
    }

    /// Full round-robin schedule for the current roster and config. Not stored.
    pub fn round_robin_preview(&self) -> Result<Vec<ScheduledMatch>, TournamentError> {
        self.read(|d| {
            round_robin_schedule(
                &logic::roster(&d.players),
                d.tournament.courts as usize,
                d.tournament.mode,
                &mut rand::thread_rng(),
            )
        })
    }
}

/// Replace active courts with the lineup from the current queue and round.
fn regenerate_courts(data: &mut TournamentData) {
    let lineup = queue::from_queue(
        &data.queue,
        &data.players,
        data.tournament.courts as usize,
        data.tournament.mode,
    );
    let round = data.tournament.current_round;
    data.replace_courts(&lineup.courts, round);
}
