// Fantasy league provider boundary.
//
// The provider hands back its responses in their native nested key/value
// shape. Every path into that shape lives in the `decode_*` functions below;
// the rest of the crate only sees the typed records they produce.

use std::collections::HashMap;

use chrono::NaiveDate;
use serde_json::Value;
use thiserror::Error;

use crate::roster::Position;
use crate::stats::StatRecord;

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// An upstream failure: the provider could not be reached, or its response
/// did not have the documented shape. Either one aborts a refresh.
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("provider request `{operation}` failed: {message}")]
    Fetch {
        operation: &'static str,
        message: String,
    },

    #[error("unexpected provider response at `{path}`: {message}")]
    Decode { path: String, message: String },
}

impl ProviderError {
    pub fn fetch(operation: &'static str, message: impl Into<String>) -> Self {
        ProviderError::Fetch {
            operation,
            message: message.into(),
        }
    }

    fn decode(path: impl Into<String>, message: impl Into<String>) -> Self {
        ProviderError::Decode {
            path: path.into(),
            message: message.into(),
        }
    }
}

// ---------------------------------------------------------------------------
// Provider trait
// ---------------------------------------------------------------------------

/// Source of league, team, roster and scoreboard data for one league.
///
/// Calls are synchronous and fallible; timeouts and retries belong to the
/// implementation.
pub trait LeagueProvider: Send + Sync {
    /// League settings object; must contain `name`.
    fn settings(&self) -> Result<Value, ProviderError>;

    fn current_week(&self) -> Result<u32, ProviderError>;

    /// First and last calendar day of `week`, both inclusive.
    fn week_date_range(&self, week: u32) -> Result<(NaiveDate, NaiveDate), ProviderError>;

    /// All teams keyed by team key. See [`decode_teams`].
    fn teams(&self) -> Result<Value, ProviderError>;

    /// A team's current roster. See [`decode_roster`].
    fn roster(&self, team_key: &str) -> Result<Value, ProviderError>;

    /// The current week's scoreboard. See [`decode_scoreboard`].
    fn scoreboard(&self) -> Result<Value, ProviderError>;
}

// ---------------------------------------------------------------------------
// Typed records
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct TeamInfo {
    pub team_key: String,
    pub name: String,
    pub waiver_priority: i64,
    pub roster_adds: i64,
}

/// One roster row as reported by the provider.
#[derive(Debug, Clone, PartialEq)]
pub struct RosterEntry {
    pub player_id: String,
    pub name: String,
    pub status: String,
    pub eligible_positions: Vec<Position>,
    pub selected_position: Position,
    /// NBA team abbreviation, when the provider includes one.
    pub team: Option<String>,
}

/// Live matchup bookkeeping the provider reports alongside the stat totals.
#[derive(Debug, Clone, Copy, PartialEq, Default, serde::Serialize)]
pub struct MatchupProgress {
    pub team_points: f64,
    pub games_remaining: u32,
    pub games_live: u32,
    pub games_completed: u32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScoreboardTeam {
    pub team_key: String,
    pub totals: StatRecord,
    pub progress: Option<MatchupProgress>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScoreboardMatchup {
    pub team1: ScoreboardTeam,
    pub team2: ScoreboardTeam,
}

// ---------------------------------------------------------------------------
// Stat-ID vocabulary
// ---------------------------------------------------------------------------

pub const STAT_FG_RATIO_ID: &str = "9004003";
pub const STAT_FT_RATIO_ID: &str = "9007006";
pub const STAT_3PTM_ID: &str = "10";
pub const STAT_PTS_ID: &str = "12";
pub const STAT_REB_ID: &str = "15";
pub const STAT_AST_ID: &str = "16";
pub const STAT_STL_ID: &str = "17";
pub const STAT_BLK_ID: &str = "18";
pub const STAT_TOV_ID: &str = "19";

// ---------------------------------------------------------------------------
// Scalar helpers
// ---------------------------------------------------------------------------

/// Integer from a JSON number or a numeric string.
fn coerce_int(value: &Value, path: &str) -> Result<i64, ProviderError> {
    match value {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().filter(|f| f.fract() == 0.0).map(|f| f as i64))
            .ok_or_else(|| ProviderError::decode(path, format!("`{n}` is not an integer"))),
        Value::String(s) => s
            .trim()
            .parse::<i64>()
            .map_err(|_| ProviderError::decode(path, format!("`{s}` is not an integer"))),
        other => Err(ProviderError::decode(path, format!("expected integer, got {other}"))),
    }
}

/// Float from a JSON number or a numeric string.
fn coerce_float(value: &Value, path: &str) -> Result<f64, ProviderError> {
    match value {
        Value::Number(n) => n
            .as_f64()
            .ok_or_else(|| ProviderError::decode(path, format!("`{n}` is not a number"))),
        Value::String(s) => s
            .trim()
            .parse::<f64>()
            .map_err(|_| ProviderError::decode(path, format!("`{s}` is not a number"))),
        other => Err(ProviderError::decode(path, format!("expected number, got {other}"))),
    }
}

/// String from a JSON string or number (ids are sometimes numeric).
fn coerce_string(value: &Value, path: &str) -> Result<String, ProviderError> {
    match value {
        Value::String(s) => Ok(s.clone()),
        Value::Number(n) => Ok(n.to_string()),
        other => Err(ProviderError::decode(path, format!("expected string, got {other}"))),
    }
}

fn field<'a>(value: &'a Value, key: &str, path: &str) -> Result<&'a Value, ProviderError> {
    value
        .get(key)
        .ok_or_else(|| ProviderError::decode(format!("{path}.{key}"), "missing"))
}

fn index<'a>(value: &'a Value, idx: usize, path: &str) -> Result<&'a Value, ProviderError> {
    value
        .get(idx)
        .ok_or_else(|| ProviderError::decode(format!("{path}[{idx}]"), "missing"))
}

/// Counting stat; the provider prints "-" before any game has been played.
fn counting_stat(raw: &str, path: &str) -> Result<f64, ProviderError> {
    let raw = raw.trim();
    if raw.is_empty() || raw == "-" {
        return Ok(0.0);
    }
    let v = raw
        .parse::<i64>()
        .map_err(|_| ProviderError::decode(path, format!("`{raw}` is not an integer")))?;
    if v < 0 {
        return Err(ProviderError::decode(path, format!("negative total {v}")));
    }
    Ok(v as f64)
}

/// "made/attempted" pair.
fn ratio_stat(raw: &str, path: &str) -> Result<(f64, f64), ProviderError> {
    let Some((made, attempted)) = raw.split_once('/') else {
        return Err(ProviderError::decode(path, format!("`{raw}` is not made/attempted")));
    };
    Ok((counting_stat(made, path)?, counting_stat(attempted, path)?))
}

// ---------------------------------------------------------------------------
// Decoders
// ---------------------------------------------------------------------------

/// League display name from the settings object (`settings.name`).
pub fn decode_league_name(settings: &Value) -> Result<String, ProviderError> {
    coerce_string(field(settings, "name", "settings")?, "settings.name")
}

/// Team list.
///
/// Input: an object keyed by team key, each value holding `team_key`, `name`,
/// `waiver_priority` and `roster_adds` (either a bare value or an object with
/// a `value` field). Integer fields may arrive as numbers or numeric strings
/// and are coerced to integers here.
pub fn decode_teams(teams: &Value) -> Result<HashMap<String, TeamInfo>, ProviderError> {
    let obj = teams
        .as_object()
        .ok_or_else(|| ProviderError::decode("teams", "expected an object keyed by team key"))?;

    let mut out = HashMap::with_capacity(obj.len());
    for (key, raw) in obj {
        let path = format!("teams.{key}");
        let team_key = match raw.get("team_key") {
            Some(v) => coerce_string(v, &format!("{path}.team_key"))?,
            None => key.clone(),
        };
        let name = coerce_string(field(raw, "name", &path)?, &format!("{path}.name"))?;
        let waiver_priority = coerce_int(
            field(raw, "waiver_priority", &path)?,
            &format!("{path}.waiver_priority"),
        )?;
        let adds_raw = field(raw, "roster_adds", &path)?;
        let adds_value = adds_raw.get("value").unwrap_or(adds_raw);
        let roster_adds = coerce_int(adds_value, &format!("{path}.roster_adds"))?;

        out.insert(
            team_key.clone(),
            TeamInfo {
                team_key,
                name,
                waiver_priority,
                roster_adds,
            },
        );
    }
    Ok(out)
}

/// Roster rows.
///
/// Input: an array of objects with `player_id`, `name`, optional `status`
/// (missing means healthy, ""), `eligible_positions` (array of strings),
/// `selected_position`, and optional `editorial_team_abbr` / `team`.
pub fn decode_roster(roster: &Value) -> Result<Vec<RosterEntry>, ProviderError> {
    let rows = roster
        .as_array()
        .ok_or_else(|| ProviderError::decode("roster", "expected an array"))?;

    rows.iter()
        .enumerate()
        .map(|(i, row)| {
            let path = format!("roster[{i}]");
            let eligible = field(row, "eligible_positions", &path)?
                .as_array()
                .ok_or_else(|| {
                    ProviderError::decode(format!("{path}.eligible_positions"), "expected an array")
                })?
                .iter()
                .map(|p| {
                    coerce_string(p, &format!("{path}.eligible_positions"))
                        .map(|raw| Position::from_str_pos(&raw))
                })
                .collect::<Result<Vec<_>, _>>()?;
            let status = match row.get("status") {
                None | Some(Value::Null) => String::new(),
                Some(v) => coerce_string(v, &format!("{path}.status"))?,
            };
            let team = row
                .get("editorial_team_abbr")
                .or_else(|| row.get("team"))
                .and_then(Value::as_str)
                .map(str::to_string);

            Ok(RosterEntry {
                player_id: coerce_string(field(row, "player_id", &path)?, &format!("{path}.player_id"))?,
                name: coerce_string(field(row, "name", &path)?, &format!("{path}.name"))?,
                status,
                eligible_positions: eligible,
                selected_position: Position::from_str_pos(&coerce_string(
                    field(row, "selected_position", &path)?,
                    &format!("{path}.selected_position"),
                )?),
                team,
            })
        })
        .collect()
}

/// Current matchup totals from a team's stats block.
///
/// Input: an object with `team_stats.stats`, an array of
/// `{"stat": {"stat_id": ..., "value": ...}}`. Stat IDs outside the
/// vocabulary are ignored; every vocabulary ID must be present.
pub fn to_matchup_totals(team_block: &Value) -> Result<StatRecord, ProviderError> {
    let stats = field(field(team_block, "team_stats", "team")?, "stats", "team.team_stats")?
        .as_array()
        .ok_or_else(|| ProviderError::decode("team.team_stats.stats", "expected an array"))?;

    let mut values: HashMap<String, String> = HashMap::new();
    for (i, raw) in stats.iter().enumerate() {
        let path = format!("team.team_stats.stats[{i}].stat");
        let stat = field(raw, "stat", &format!("team.team_stats.stats[{i}]"))?;
        let id = coerce_string(field(stat, "stat_id", &path)?, &path)?;
        let value = match stat.get("value") {
            None | Some(Value::Null) => String::new(),
            Some(v) => coerce_string(v, &path)?,
        };
        values.insert(id, value);
    }

    let get = |id: &str| {
        values
            .get(id)
            .map(String::as_str)
            .ok_or_else(|| ProviderError::decode(format!("team.team_stats.stats[{id}]"), "missing"))
    };

    let (fgm, fga) = ratio_stat(get(STAT_FG_RATIO_ID)?, STAT_FG_RATIO_ID)?;
    let (ftm, fta) = ratio_stat(get(STAT_FT_RATIO_ID)?, STAT_FT_RATIO_ID)?;

    Ok(StatRecord {
        fgm,
        fga,
        ftm,
        fta,
        three_pm: counting_stat(get(STAT_3PTM_ID)?, STAT_3PTM_ID)?,
        pts: counting_stat(get(STAT_PTS_ID)?, STAT_PTS_ID)?,
        reb: counting_stat(get(STAT_REB_ID)?, STAT_REB_ID)?,
        ast: counting_stat(get(STAT_AST_ID)?, STAT_AST_ID)?,
        stl: counting_stat(get(STAT_STL_ID)?, STAT_STL_ID)?,
        blk: counting_stat(get(STAT_BLK_ID)?, STAT_BLK_ID)?,
        tov: counting_stat(get(STAT_TOV_ID)?, STAT_TOV_ID)?,
    })
}

/// Optional `team_points.total` and `team_remaining_games.total` counters.
fn decode_progress(team_block: &Value) -> Result<Option<MatchupProgress>, ProviderError> {
    let points = team_block.pointer("/team_points/total");
    let games = team_block.pointer("/team_remaining_games/total");
    if points.is_none() && games.is_none() {
        return Ok(None);
    }

    let count = |key: &str| -> Result<u32, ProviderError> {
        match games.and_then(|g| g.get(key)) {
            None => Ok(0),
            Some(v) => {
                let path = format!("team_remaining_games.total.{key}");
                let n = coerce_int(v, &path)?;
                u32::try_from(n).map_err(|_| ProviderError::decode(path, format!("`{n}` out of range")))
            }
        }
    };

    Ok(Some(MatchupProgress {
        team_points: points
            .map(|p| coerce_float(p, "team_points.total"))
            .transpose()?
            .unwrap_or(0.0),
        games_remaining: count("remaining_games")?,
        games_live: count("live_games")?,
        games_completed: count("completed_games")?,
    }))
}

/// One side of a matchup: `team[0]` is a list of metadata fragments (one of
/// which carries `team_key`), `team[1]` is the stats block.
fn decode_scoreboard_team(team: &Value, path: &str) -> Result<ScoreboardTeam, ProviderError> {
    let meta = index(team, 0, path)?;
    let meta_path = format!("{path}[0]");
    let team_key = meta
        .as_array()
        .ok_or_else(|| ProviderError::decode(meta_path.clone(), "expected an array"))?
        .iter()
        .find_map(|fragment| fragment.get("team_key"))
        .ok_or_else(|| ProviderError::decode(meta_path.clone(), "no team_key fragment"))?;
    let team_key = coerce_string(team_key, &meta_path)?;

    let block = index(team, 1, path)?;
    let totals = to_matchup_totals(block).map_err(|e| match e {
        ProviderError::Decode { path: inner, message } => {
            ProviderError::decode(format!("{path}[1].{inner}"), message)
        }
        other => other,
    })?;

    Ok(ScoreboardTeam {
        team_key,
        totals,
        progress: decode_progress(block)?,
    })
}

/// Scoreboard for the current week.
///
/// Input contract:
/// `fantasy_content.league[1].scoreboard["0"].matchups` is an object whose
/// numeric-string keys map to `{"matchup": {"0": {"teams": {"0": {"team":
/// T}, "1": {"team": T}}}}}`, where `T` is the two-element team array read
/// by `decode_scoreboard_team`. `count` keys are ignored. Matchups are
/// returned in ascending key order.
pub fn decode_scoreboard(scoreboard: &Value) -> Result<Vec<ScoreboardMatchup>, ProviderError> {
    let base = "fantasy_content.league[1].scoreboard.0.matchups";
    let matchups = scoreboard
        .pointer("/fantasy_content/league/1/scoreboard/0/matchups")
        .and_then(Value::as_object)
        .ok_or_else(|| ProviderError::decode(base, "missing or not an object"))?;

    let mut keyed: Vec<(usize, &Value)> = Vec::new();
    for (key, value) in matchups {
        if key == "count" {
            continue;
        }
        let n = key
            .parse::<usize>()
            .map_err(|_| ProviderError::decode(format!("{base}.{key}"), "unexpected key"))?;
        keyed.push((n, value));
    }
    keyed.sort_by_key(|(n, _)| *n);

    keyed
        .into_iter()
        .map(|(n, raw)| {
            let path = format!("{base}.{n}.matchup.0.teams");
            let teams = raw
                .pointer("/matchup/0/teams")
                .ok_or_else(|| ProviderError::decode(path.clone(), "missing"))?;
            let side = |i: &str| -> Result<ScoreboardTeam, ProviderError> {
                let team = teams
                    .get(i)
                    .and_then(|t| t.get("team"))
                    .ok_or_else(|| ProviderError::decode(format!("{path}.{i}.team"), "missing"))?;
                decode_scoreboard_team(team, &format!("{path}.{i}.team"))
            };
            Ok(ScoreboardMatchup {
                team1: side("0")?,
                team2: side("1")?,
            })
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn stats_block(fg: &str, ft: &str, rest: [&str; 7]) -> Value {
        let ids = [
            STAT_3PTM_ID,
            STAT_PTS_ID,
            STAT_REB_ID,
            STAT_AST_ID,
            STAT_STL_ID,
            STAT_BLK_ID,
            STAT_TOV_ID,
        ];
        let mut stats = vec![
            json!({"stat": {"stat_id": STAT_FG_RATIO_ID, "value": fg}}),
            json!({"stat": {"stat_id": "5", "value": ".488"}}),
            json!({"stat": {"stat_id": STAT_FT_RATIO_ID, "value": ft}}),
        ];
        for (id, v) in ids.iter().zip(rest) {
            stats.push(json!({"stat": {"stat_id": id, "value": v}}));
        }
        json!({"team_stats": {"coverage_type": "week", "stats": stats}})
    }

    // -- Matchup totals --

    #[test]
    fn matchup_totals_follow_stat_ids() {
        let block = stats_block("120/246", "40/52", ["30", "310", "140", "80", "20", "15", "44"]);
        let totals = to_matchup_totals(&block).unwrap();
        assert_eq!(
            totals,
            StatRecord::from_ordered([
                120.0, 246.0, 40.0, 52.0, 30.0, 310.0, 140.0, 80.0, 20.0, 15.0, 44.0
            ])
        );
    }

    #[test]
    fn placeholder_values_decode_to_zero() {
        let block = stats_block("-/-", "-/-", ["-", "-", "", "-", "-", "-", "-"]);
        assert_eq!(to_matchup_totals(&block).unwrap(), StatRecord::default());
    }

    #[test]
    fn missing_stat_id_is_a_decode_error() {
        let block = json!({"team_stats": {"stats": [
            {"stat": {"stat_id": STAT_FG_RATIO_ID, "value": "1/2"}}
        ]}});
        assert!(matches!(
            to_matchup_totals(&block).unwrap_err(),
            ProviderError::Decode { .. }
        ));
    }

    #[test]
    fn ratio_without_slash_is_a_decode_error() {
        let block = stats_block("120", "40/52", ["30", "310", "140", "80", "20", "15", "44"]);
        assert!(to_matchup_totals(&block).is_err());
    }

    // -- Teams --

    #[test]
    fn teams_coerce_string_and_integer_fields() {
        let raw = json!({
            "428.l.1.t.1": {
                "team_key": "428.l.1.t.1",
                "name": "Dunk Tank",
                "waiver_priority": 3,
                "roster_adds": {"coverage_type": "week", "coverage_value": 5, "value": "2"}
            },
            "428.l.1.t.2": {
                "team_key": "428.l.1.t.2",
                "name": "Brick City",
                "waiver_priority": "7",
                "roster_adds": 0
            }
        });
        let teams = decode_teams(&raw).unwrap();
        assert_eq!(teams.len(), 2);
        let a = &teams["428.l.1.t.1"];
        assert_eq!(a.name, "Dunk Tank");
        assert_eq!(a.waiver_priority, 3);
        assert_eq!(a.roster_adds, 2);
        let b = &teams["428.l.1.t.2"];
        assert_eq!(b.waiver_priority, 7);
        assert_eq!(b.roster_adds, 0);
    }

    #[test]
    fn team_with_non_numeric_priority_fails() {
        let raw = json!({"t1": {"name": "X", "waiver_priority": "first", "roster_adds": 0}});
        assert!(decode_teams(&raw).is_err());
    }

    // -- Roster --

    #[test]
    fn roster_rows_decode() {
        let raw = json!([
            {
                "player_id": 5583,
                "name": "Nikola Jokić",
                "status": "",
                "position_type": "P",
                "eligible_positions": ["C", "Util"],
                "selected_position": "C"
            },
            {
                "player_id": "6014",
                "name": "Zion Williamson",
                "status": "INJ",
                "eligible_positions": ["PF", "Util", "IL"],
                "selected_position": "IL",
                "editorial_team_abbr": "NO"
            },
            {
                "player_id": 1,
                "name": "No Status",
                "eligible_positions": [],
                "selected_position": "BN"
            }
        ]);
        let roster = decode_roster(&raw).unwrap();
        assert_eq!(roster.len(), 3);
        assert_eq!(roster[0].player_id, "5583");
        assert_eq!(roster[0].eligible_positions, vec![Position::Center, Position::Utility]);
        assert_eq!(roster[0].selected_position, Position::Center);
        assert_eq!(roster[0].team, None);
        assert_eq!(roster[1].status, "INJ");
        assert_eq!(roster[1].selected_position, Position::InjuredList);
        assert_eq!(roster[2].selected_position, Position::Bench);
        assert_eq!(roster[1].team.as_deref(), Some("NO"));
        assert_eq!(roster[2].status, "");
    }

    #[test]
    fn roster_missing_name_fails() {
        let raw = json!([{"player_id": 1, "eligible_positions": [], "selected_position": "BN"}]);
        let err = decode_roster(&raw).unwrap_err();
        assert!(err.to_string().contains("roster[0].name"));
    }

    // -- Scoreboard --

    fn scoreboard_team(key: &str, pts: &str) -> Value {
        let mut block = stats_block("10/20", "5/6", ["2", pts, "8", "4", "1", "1", "2"]);
        block["team_points"] = json!({"coverage_type": "week", "total": "4"});
        block["team_remaining_games"] =
            json!({"total": {"remaining_games": 12, "live_games": 1, "completed_games": 20}});
        json!([[{"team_key": key}, {"team_id": "1"}, {"name": "whatever"}], block])
    }

    fn scoreboard(pairs: &[(&str, &str)]) -> Value {
        let mut matchups = serde_json::Map::new();
        for (i, (a, b)) in pairs.iter().enumerate() {
            matchups.insert(
                i.to_string(),
                json!({"matchup": {"0": {"teams": {
                    "0": {"team": scoreboard_team(a, "30")},
                    "1": {"team": scoreboard_team(b, "40")},
                    "count": 2
                }}}}),
            );
        }
        matchups.insert("count".into(), json!(pairs.len()));
        json!({"fantasy_content": {"league": [
            {"league_key": "428.l.1"},
            {"scoreboard": {"0": {"matchups": matchups}, "week": "3"}}
        ]}})
    }

    #[test]
    fn scoreboard_decodes_matchups_in_key_order() {
        let raw = scoreboard(&[("t1", "t2"), ("t3", "t4")]);
        let matchups = decode_scoreboard(&raw).unwrap();
        assert_eq!(matchups.len(), 2);
        assert_eq!(matchups[0].team1.team_key, "t1");
        assert_eq!(matchups[0].team2.team_key, "t2");
        assert_eq!(matchups[1].team1.team_key, "t3");
        assert!((matchups[0].team1.totals.pts - 30.0).abs() < f64::EPSILON);
        assert!((matchups[0].team2.totals.pts - 40.0).abs() < f64::EPSILON);

        let progress = matchups[0].team1.progress.unwrap();
        assert!((progress.team_points - 4.0).abs() < f64::EPSILON);
        assert_eq!(progress.games_remaining, 12);
        assert_eq!(progress.games_live, 1);
        assert_eq!(progress.games_completed, 20);
    }

    #[test]
    fn scoreboard_with_wrong_shape_fails() {
        let raw = json!({"fantasy_content": {"league": [{}]}});
        assert!(matches!(
            decode_scoreboard(&raw).unwrap_err(),
            ProviderError::Decode { .. }
        ));
    }

    #[test]
    fn scoreboard_team_without_key_fails() {
        let mut raw = scoreboard(&[("t1", "t2")]);
        raw["fantasy_content"]["league"][1]["scoreboard"]["0"]["matchups"]["0"]["matchup"]["0"]
            ["teams"]["1"]["team"][0] = json!([{"team_id": "2"}]);
        let err = decode_scoreboard(&raw).unwrap_err();
        assert!(err.to_string().contains("team_key"), "{err}");
    }

    #[test]
    fn settings_name_decodes() {
        assert_eq!(
            decode_league_name(&json!({"name": "Hoops League", "num_teams": 10})).unwrap(),
            "Hoops League"
        );
        assert!(decode_league_name(&json!({})).is_err());
    }
}
