//! Rotation queue: the turn order that gives everyone roughly equal court time.

use crate::logic::court_builder::build_courts;
use crate::models::{Lineup, Player, PlayerId, TournamentMode};
use rand::seq::SliceRandom;
use rand::Rng;
use std::collections::{HashMap, HashSet};

/// Fresh queue: a uniformly random permutation of all player ids.
pub fn initialize<R: Rng + ?Sized>(players: &[Player], rng: &mut R) -> Vec<PlayerId> {
    let mut queue: Vec<PlayerId> = players.iter().map(|p| p.id).collect();
    queue.shuffle(rng);
    queue
}

/// Move the players who just played to the back, keeping relative order on both sides.
///
/// The first `min(court_count * players_per_match, len)` entries count as played.
/// When the whole queue played, the result equals the input.
pub fn rotate(queue: &[PlayerId], court_count: usize, mode: TournamentMode) -> Vec<PlayerId> {
    let played_count = (court_count * mode.players_per_match()).min(queue.len());
    let (played, rest) = queue.split_at(played_count);
    rest.iter().chain(played).copied().collect()
}

/// Drop ids that are no longer on the roster.
pub fn prune(queue: &mut Vec<PlayerId>, players: &[Player]) {
    let live: HashSet<PlayerId> = players.iter().map(|p| p.id).collect();
    queue.retain(|id| live.contains(id));
}

/// Resolve queue ids to live players, dropping ids that are no longer on the roster.
pub fn resolve(queue: &[PlayerId], players: &[Player]) -> Vec<Player> {
    let by_id: HashMap<PlayerId, &Player> = players.iter().map(|p| (p.id, p)).collect();
    queue
        .iter()
        .filter_map(|id| by_id.get(id).map(|p| (*p).clone()))
        .collect()
}

/// Courts and sitting-out players for the current queue order.
pub fn from_queue(
    queue: &[PlayerId],
    players: &[Player],
    court_count: usize,
    mode: TournamentMode,
) -> Lineup {
    build_courts(&resolve(queue, players), court_count, mode)
}
