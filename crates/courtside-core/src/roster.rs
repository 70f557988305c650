// Per-player enrichment: joins a provider roster row to the projection sheet
// and the weekly schedule.

use serde::{Serialize, Serializer};
use std::fmt;
use tracing::warn;

use crate::normalize::resolve_team_code;
use crate::projections::ProjectionSheet;
use crate::provider::RosterEntry;
use crate::schedule::WeeklySchedule;
use crate::stats::StatRecord;

/// Provider status marking a player as out for the rest of the week.
pub const STATUS_INJURED: &str = "INJ";

// ---------------------------------------------------------------------------
// Positions
// ---------------------------------------------------------------------------

/// Basketball roster positions and lineup slots.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Position {
    PointGuard,
    ShootingGuard,
    Guard,
    SmallForward,
    PowerForward,
    Forward,
    Center,
    Utility,
    Bench,
    InjuredList,
    InjuredListPlus,
    /// A slot this table does not know, kept as the provider spelled it.
    Other(String),
}

impl Position {
    /// Parse a provider position string. Unknown strings are kept verbatim
    /// in [`Position::Other`].
    ///
    /// - "UTIL" -> Utility, "BN"/"BE" -> Bench
    /// - "IL"/"IR" -> InjuredList, "IL+"/"IR+" -> InjuredListPlus
    pub fn from_str_pos(s: &str) -> Self {
        let trimmed = s.trim();
        match trimmed.to_uppercase().as_str() {
            "PG" => Position::PointGuard,
            "SG" => Position::ShootingGuard,
            "G" => Position::Guard,
            "SF" => Position::SmallForward,
            "PF" => Position::PowerForward,
            "F" => Position::Forward,
            "C" => Position::Center,
            "UTIL" => Position::Utility,
            "BN" | "BE" => Position::Bench,
            "IL" | "IR" => Position::InjuredList,
            "IL+" | "IR+" => Position::InjuredListPlus,
            _ => Position::Other(trimmed.to_string()),
        }
    }

    /// Return the display string for this position, as the provider spells it.
    pub fn display_str(&self) -> &str {
        match self {
            Position::PointGuard => "PG",
            Position::ShootingGuard => "SG",
            Position::Guard => "G",
            Position::SmallForward => "SF",
            Position::PowerForward => "PF",
            Position::Forward => "F",
            Position::Center => "C",
            Position::Utility => "Util",
            Position::Bench => "BN",
            Position::InjuredList => "IL",
            Position::InjuredListPlus => "IL+",
            Position::Other(raw) => raw,
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_str())
    }
}

impl Serialize for Position {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.display_str())
    }
}

// ---------------------------------------------------------------------------
// Records
// ---------------------------------------------------------------------------

/// A rostered player with everything the aggregator needs.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlayerRecord {
    #[serde(rename = "id")]
    pub player_id: String,
    pub name: String,
    pub team: Option<String>,
    pub status: String,
    /// Per-game projection; `None` when the sheet has no row for the player.
    pub stats: Option<StatRecord>,
    pub games_played: u32,
    pub games_remaining: u32,
    pub eligible_positions: Vec<Position>,
    pub selected_position: Position,
}

/// Why a player could not be fully joined.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum UnresolvedKind {
    NoProjection,
    NoTeam,
    NoSchedule,
}

impl fmt::Display for UnresolvedKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            UnresolvedKind::NoProjection => "no projection",
            UnresolvedKind::NoTeam => "no team",
            UnresolvedKind::NoSchedule => "no schedule",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UnresolvedEntity {
    pub player_id: String,
    pub name: String,
    pub kind: UnresolvedKind,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Enriched {
    pub player: PlayerRecord,
    pub unresolved: Vec<UnresolvedEntity>,
}

// ---------------------------------------------------------------------------
// RosterEnricher
// ---------------------------------------------------------------------------

/// Borrowed view over the parsed sources for one refresh.
#[derive(Debug, Clone, Copy)]
pub struct RosterEnricher<'a> {
    sheet: &'a ProjectionSheet,
    schedule: &'a WeeklySchedule,
}

impl<'a> RosterEnricher<'a> {
    pub fn new(sheet: &'a ProjectionSheet, schedule: &'a WeeklySchedule) -> Self {
        Self { sheet, schedule }
    }

    /// Join one roster row. Never fails; every miss is recorded in
    /// `unresolved` and logged.
    ///
    /// Team precedence: the projection sheet's team, then the team the
    /// provider reports. `current_day` is the 0-based weekday index.
    pub fn enrich(&self, entry: &RosterEntry, current_day: usize) -> Enriched {
        let mut unresolved = Vec::new();
        let mut miss = |kind: UnresolvedKind| {
            warn!(
                "Unresolved player {} ({}): {}",
                entry.name, entry.player_id, kind
            );
            unresolved.push(UnresolvedEntity {
                player_id: entry.player_id.clone(),
                name: entry.name.clone(),
                kind,
            });
        };

        let projection = self.sheet.entry_for(&entry.name);
        if projection.is_none() {
            miss(UnresolvedKind::NoProjection);
        }

        let team = projection
            .and_then(|p| p.team.clone())
            .filter(|code| !code.trim().is_empty())
            .or_else(|| {
                entry
                    .team
                    .as_deref()
                    .map(resolve_team_code)
                    .filter(|code| !code.is_empty())
            });

        let (games_played, mut games_remaining) = match team.as_deref() {
            None => {
                miss(UnresolvedKind::NoTeam);
                (0, 0)
            }
            Some(code) if self.schedule.get_team_schedule(code).is_none() => {
                miss(UnresolvedKind::NoSchedule);
                (0, 0)
            }
            Some(code) => (
                self.schedule.games_played(code, current_day),
                self.schedule.games_remaining(code, current_day),
            ),
        };

        if entry.status == STATUS_INJURED {
            games_remaining = 0;
        }

        Enriched {
            player: PlayerRecord {
                player_id: entry.player_id.clone(),
                name: entry.name.clone(),
                team,
                status: entry.status.clone(),
                stats: projection.map(|p| p.stats),
                games_played,
                games_remaining,
                eligible_positions: entry.eligible_positions.clone(),
                selected_position: entry.selected_position.clone(),
            },
            unresolved,
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
