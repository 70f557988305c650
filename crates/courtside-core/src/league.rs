// League assembly: pulls one league's teams, rosters and scoreboard from the
// provider, joins them with the cached sources, and publishes an immutable
// snapshot.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{Local, NaiveDate};
use serde::ser::{SerializeMap, SerializeStruct};
use serde::{Serialize, Serializer};
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::cache::{SourceCache, SourceData};
use crate::provider::{
    decode_league_name, decode_roster, decode_scoreboard, decode_teams, LeagueProvider,
    ProviderError, ScoreboardTeam, TeamInfo,
};
use crate::roster::{PlayerRecord, RosterEnricher, UnresolvedEntity};
use crate::team::{aggregate, MatchupRecord, TeamRecord};

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// A refresh was aborted. The previously published snapshot is untouched.
#[derive(Debug, Error)]
pub enum RefreshError {
    #[error(transparent)]
    Upstream(#[from] ProviderError),

    #[error("{0} cache has not been built")]
    MissingSource(&'static str),
}

// ---------------------------------------------------------------------------
// Snapshot
// ---------------------------------------------------------------------------

/// Fully assembled view of one league for the current week.
#[derive(Debug, Clone, PartialEq)]
pub struct LeagueSnapshot {
    pub name: String,
    pub current_week: u32,
    pub week_date_range: (NaiveDate, NaiveDate),
    /// 0-based index of today within the week.
    pub current_day: usize,
    pub teams: Vec<TeamRecord>,
    pub matchups: Vec<MatchupRecord>,
    pub unresolved: Vec<UnresolvedEntity>,
}

impl LeagueSnapshot {
    pub fn team_by_key(&self, team_key: &str) -> Option<&TeamRecord> {
        self.teams.iter().find(|t| t.team_key == team_key)
    }

    /// Case-insensitive lookup by display name.
    pub fn team_by_name(&self, name: &str) -> Option<&TeamRecord> {
        let wanted = name.trim();
        self.teams
            .iter()
            .find(|t| t.team_name.eq_ignore_ascii_case(wanted))
    }

    /// The two teams of each matchup, in scoreboard order. A matchup that
    /// points outside `teams` is skipped.
    pub fn matchup_pairs(&self) -> impl Iterator<Item = (&TeamRecord, &TeamRecord)> {
        self.matchups.iter().filter_map(|m| {
            match (self.teams.get(m.team1), self.teams.get(m.team2)) {
                (Some(a), Some(b)) => Some((a, b)),
                _ => {
                    warn!(
                        "League '{}': matchup ({}, {}) is out of range for {} teams",
                        self.name,
                        m.team1,
                        m.team2,
                        self.teams.len()
                    );
                    None
                }
            }
        })
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

/// A matchup on the wire: `{"0": team, "1": team}`.
struct MatchupView<'a>(&'a TeamRecord, &'a TeamRecord);

impl Serialize for MatchupView<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(2))?;
        map.serialize_entry("0", self.0)?;
        map.serialize_entry("1", self.1)?;
        map.end()
    }
}

impl Serialize for LeagueSnapshot {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let matchups: Vec<MatchupView<'_>> = self
            .matchup_pairs()
            .map(|(a, b)| MatchupView(a, b))
            .collect();

        let mut s = serializer.serialize_struct("LeagueSnapshot", 6)?;
        s.serialize_field("name", &self.name)?;
        s.serialize_field("current_week", &self.current_week)?;
        s.serialize_field("week_date_range", &self.week_date_range)?;
        s.serialize_field("current_day", &self.current_day)?;
        s.serialize_field("matchups", &matchups)?;
        s.serialize_field("unresolved", &self.unresolved)?;
        s.end()
    }
}

/// Day index of `today` within `[start, end]`, clamped to the week.
pub fn current_day(today: NaiveDate, start: NaiveDate, end: NaiveDate) -> usize {
    let elapsed = (today - start).num_days();
    let span = (end - start).num_days();
    elapsed.min(span).max(0) as usize
}

// ---------------------------------------------------------------------------
// Assembler
// ---------------------------------------------------------------------------

/// Owns one league's provider and its latest snapshot.
pub struct LeagueAssembler<P> {
    provider: P,
    sources: Arc<SourceData>,
    snapshot: SourceCache<LeagueSnapshot>,
}

impl<P: LeagueProvider> LeagueAssembler<P> {
    pub fn new(provider: P, sources: Arc<SourceData>) -> Self {
        Self {
            provider,
            sources,
            snapshot: SourceCache::new(),
        }
    }

    /// Rebuild the snapshot for today's date.
    pub fn refresh(&self) -> Result<Arc<LeagueSnapshot>, RefreshError> {
        self.refresh_on(Local::now().date_naive())
    }

    /// Rebuild the snapshot as of `today`. On error the previous snapshot
    /// stays published.
    pub fn refresh_on(&self, today: NaiveDate) -> Result<Arc<LeagueSnapshot>, RefreshError> {
        let result = self.snapshot.build(|| self.assemble(today));
        match &result {
            Ok(snap) => info!(
                "League '{}' refreshed: week {} day {}, {} matchups, {} unresolved players",
                snap.name,
                snap.current_week,
                snap.current_day,
                snap.matchups.len(),
                snap.unresolved.len()
            ),
            Err(e) => warn!("League refresh failed, keeping previous snapshot: {}", e),
        }
        result
    }

    pub fn snapshot(&self) -> Option<Arc<LeagueSnapshot>> {
        self.snapshot.get()
    }

    pub fn is_refreshed(&self) -> bool {
        self.snapshot.is_populated()
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    fn assemble(&self, today: NaiveDate) -> Result<LeagueSnapshot, RefreshError> {
        let sheet = self
            .sources
            .projections()
            .ok_or(RefreshError::MissingSource("projection"))?;
        let schedule = self
            .sources
            .schedule()
            .ok_or(RefreshError::MissingSource("schedule"))?;
        let enricher = RosterEnricher::new(&sheet, &schedule);

        let name = decode_league_name(&self.provider.settings()?)?;
        let current_week = self.provider.current_week()?;
        let (start, end) = self.provider.week_date_range(current_week)?;
        let day = current_day(today, start, end);
        debug!(league = %name, week = current_week, day, "assembling snapshot");

        let team_info = decode_teams(&self.provider.teams()?)?;
        let scoreboard = decode_scoreboard(&self.provider.scoreboard()?)?;

        // Scoreboard teams first, in matchup order, then any team without a
        // matchup this week in key order.
        let mut sides: HashMap<&str, &ScoreboardTeam> = HashMap::new();
        let mut order: Vec<&str> = Vec::with_capacity(team_info.len());
        for side in scoreboard.iter().flat_map(|m| [&m.team1, &m.team2]) {
            if !team_info.contains_key(&side.team_key) {
                return Err(ProviderError::Decode {
                    path: format!("teams.{}", side.team_key),
                    message: "scoreboard team is missing from the team list".into(),
                }
                .into());
            }
            if sides.insert(side.team_key.as_str(), side).is_none() {
                order.push(side.team_key.as_str());
            }
        }
        let mut idle: Vec<&str> = team_info
            .keys()
            .map(String::as_str)
            .filter(|k| !sides.contains_key(k))
            .collect();
        idle.sort_unstable();
        order.extend(idle);

        let mut teams = Vec::with_capacity(order.len());
        let mut unresolved = Vec::new();
        for key in &order {
            let roster = decode_roster(&self.provider.roster(key)?)?;
            let mut players = Vec::with_capacity(roster.len());
            for entry in &roster {
                let enriched = enricher.enrich(entry, day);
                unresolved.extend(enriched.unresolved);
                players.push(enriched.player);
            }
            teams.push(build_team(&team_info[*key], sides.get(key).copied(), players));
        }

        let position = |key: &str| order.iter().position(|k| *k == key).unwrap_or_default();
        let matchups = scoreboard
            .iter()
            .map(|m| MatchupRecord {
                team1: position(&m.team1.team_key),
                team2: position(&m.team2.team_key),
            })
            .collect();

        Ok(LeagueSnapshot {
            name,
            current_week,
            week_date_range: (start, end),
            current_day: day,
            teams,
            matchups,
            unresolved,
        })
    }
}

fn build_team(info: &TeamInfo, side: Option<&ScoreboardTeam>, roster: Vec<PlayerRecord>) -> TeamRecord {
    let current = side.map(|s| s.totals).unwrap_or_default();
    let (future, projected) = aggregate(&roster, &current);
    TeamRecord {
        team_key: info.team_key.clone(),
        team_name: info.name.clone(),
        roster,
        waiver_priority: info.waiver_priority,
        roster_adds: info.roster_adds,
        current_matchup_stats: current,
        future_matchup_stats: future,
        projected_matchup_stats: projected,
        matchup_progress: side.and_then(|s| s.progress),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
