//! Upcoming rounds: forward simulation of the rotation queue.

use crate::logic::queue::{from_queue, prune, rotate};
use crate::models::{Player, PlayerId, TournamentMode, UpcomingRound};

/// Rounds shown when no count is configured.
pub const DEFAULT_UPCOMING_ROUNDS: usize = 3;

/// Project `num_rounds` future rounds from the current queue without touching it.
///
/// The queue is rotated once first to skip the round already in play, then cleared of
/// removed players; each projected round is built from the simulated queue and the queue
/// rotated again.
pub fn project(
    queue: &[PlayerId],
    players: &[Player],
    court_count: usize,
    mode: TournamentMode,
    num_rounds: usize,
) -> Vec<UpcomingRound> {
    let mut simulated = rotate(queue, court_count, mode);
    prune(&mut simulated, players);
    let mut rounds = Vec::with_capacity(num_rounds);

    for round_offset in (1u32..).take(num_rounds) {
        let lineup = from_queue(&simulated, players, court_count, mode);
        rounds.push(UpcomingRound {
            round_offset,
            courts: lineup.courts,
            sitting_out: lineup.sitting_out,
        });
        simulated = rotate(&simulated, court_count, mode);
    }

    rounds
}
