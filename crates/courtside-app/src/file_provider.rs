// League provider backed by a saved JSON export.
//
// The document holds one league's provider responses side by side:
// `settings`, `current_week`, `weeks` (week number -> [start, end] ISO
// dates), `teams`, `rosters` (team key -> roster list) and `scoreboard`.

use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use serde_json::Value;
use tracing::debug;

use courtside_core::provider::{LeagueProvider, ProviderError};

#[derive(Debug, Clone)]
pub struct JsonFileProvider {
    path: PathBuf,
    doc: Value,
}

impl JsonFileProvider {
    /// Read and parse the export at `path`.
    pub fn open(path: &Path) -> Result<Self, ProviderError> {
        let text = std::fs::read_to_string(path)
            .map_err(|e| ProviderError::fetch("open", format!("{}: {e}", path.display())))?;
        let doc: Value = serde_json::from_str(&text)
            .map_err(|e| ProviderError::fetch("open", format!("{}: {e}", path.display())))?;
        debug!("loaded provider export {}", path.display());
        Ok(Self {
            path: path.to_path_buf(),
            doc,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn part(&self, operation: &'static str, key: &str) -> Result<&Value, ProviderError> {
        self.doc.get(key).ok_or_else(|| {
            ProviderError::fetch(
                operation,
                format!("`{key}` missing from {}", self.path.display()),
            )
        })
    }
}

fn parse_date(value: &Value, week: u32) -> Result<NaiveDate, ProviderError> {
    let raw = value
        .as_str()
        .ok_or_else(|| ProviderError::fetch("week_date_range", format!("week {week}: expected a date string")))?;
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .map_err(|e| ProviderError::fetch("week_date_range", format!("week {week}: `{raw}`: {e}")))
}

impl LeagueProvider for JsonFileProvider {
    fn settings(&self) -> Result<Value, ProviderError> {
        self.part("settings", "settings").cloned()
    }

    fn current_week(&self) -> Result<u32, ProviderError> {
        let raw = self.part("current_week", "current_week")?;
        let week = match raw {
            Value::Number(n) => n.as_u64(),
            Value::String(s) => s.trim().parse::<u64>().ok(),
            _ => None,
        };
        week.and_then(|w| u32::try_from(w).ok())
            .ok_or_else(|| ProviderError::fetch("current_week", format!("`{raw}` is not a week number")))
    }

    fn week_date_range(&self, week: u32) -> Result<(NaiveDate, NaiveDate), ProviderError> {
        let weeks = self.part("week_date_range", "weeks")?;
        let range = weeks
            .get(week.to_string())
            .and_then(Value::as_array)
            .filter(|r| r.len() == 2)
            .ok_or_else(|| {
                ProviderError::fetch("week_date_range", format!("no [start, end] pair for week {week}"))
            })?;
        let start = parse_date(&range[0], week)?;
        let end = parse_date(&range[1], week)?;
        if end < start {
            return Err(ProviderError::fetch(
                "week_date_range",
                format!("week {week} ends ({end}) before it starts ({start})"),
            ));
        }
        Ok((start, end))
    }

    fn teams(&self) -> Result<Value, ProviderError> {
        self.part("teams", "teams").cloned()
    }

    fn roster(&self, team_key: &str) -> Result<Value, ProviderError> {
        self.part("roster", "rosters")?
            .get(team_key)
            .cloned()
            .ok_or_else(|| ProviderError::fetch("roster", format!("no roster for team {team_key}")))
    }

    fn scoreboard(&self) -> Result<Value, ProviderError> {
        self.part("scoreboard", "scoreboard").cloned()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
