// Fantasy team records and the week-projection aggregate.

use serde::Serialize;

use crate::provider::MatchupProgress;
use crate::roster::PlayerRecord;
use crate::stats::{self, StatRecord};

/// One fantasy team inside a snapshot.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TeamRecord {
    pub team_key: String,
    pub team_name: String,
    pub roster: Vec<PlayerRecord>,
    pub waiver_priority: i64,
    pub roster_adds: i64,
    pub current_matchup_stats: StatRecord,
    pub future_matchup_stats: StatRecord,
    pub projected_matchup_stats: StatRecord,
    pub matchup_progress: Option<MatchupProgress>,
}

/// Indices of the two opposing teams in the snapshot's team list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchupRecord {
    pub team1: usize,
    pub team2: usize,
}

/// Projected remaining output of a roster and the projected final totals.
///
/// `future` is the sum over every rostered player of their per-game stats
/// scaled by their remaining games; a player without a projection
/// contributes nothing. `projected = current + future`.
pub fn aggregate(roster: &[PlayerRecord], current: &StatRecord) -> (StatRecord, StatRecord) {
    let future = roster.iter().fold(stats::zero(), |acc, player| {
        let per_game = player.stats.unwrap_or_default();
        stats::add(&acc, &stats::scale(&per_game, player.games_remaining))
    });
    let projected = stats::add(current, &future);
    (future, projected)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
