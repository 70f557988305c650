// Weekly NBA schedule grid: extraction, parsing and games-per-week queries.
//
// The schedule source is a table with one row per NBA team and one column per
// day of the fantasy week. A day cell holds the opponent when the team plays
// and is blank otherwise. Header, spacer and summary rows are mixed in and
// are recognised by their first cell not naming an NBA team.

use std::collections::HashMap;

use scraper::{ElementRef, Html, Selector};
use serde::{Serialize, Serializer};
use tracing::{debug, info, warn};

use crate::error::ParseError;
use crate::normalize::{resolve_team_code, team_for_label, NbaTeam};

/// Days in a fantasy week.
pub const DAYS_PER_WEEK: usize = 7;

/// Class list of the decorative cells the schedule page interleaves with
/// real data cells.
const DECORATIVE_CLASSES: [&str; 2] = ["cell-bg-1", "mw100"];

// ---------------------------------------------------------------------------
// ScheduleVector
// ---------------------------------------------------------------------------

/// One team's week: `1` on days with a game, `0` otherwise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScheduleVector([u8; DAYS_PER_WEEK]);

impl ScheduleVector {
    /// Build from raw indicators; any non-zero value counts as a game.
    pub fn new(days: [u8; DAYS_PER_WEEK]) -> Self {
        ScheduleVector(days.map(|d| u8::from(d != 0)))
    }

    pub fn days(&self) -> &[u8; DAYS_PER_WEEK] {
        &self.0
    }

    /// Games scheduled across the whole week.
    pub fn total(&self) -> u32 {
        self.0.iter().map(|&d| u32::from(d)).sum()
    }

    /// Games on days `[0, day)`. `day` is clamped to the week length.
    pub fn played_through(&self, day: usize) -> u32 {
        let day = day.min(DAYS_PER_WEEK);
        self.0[..day].iter().map(|&d| u32::from(d)).sum()
    }

    /// Games on days `[day, 7)`. `day` is clamped to the week length.
    pub fn remaining_from(&self, day: usize) -> u32 {
        let day = day.min(DAYS_PER_WEEK);
        self.0[day..].iter().map(|&d| u32::from(d)).sum()
    }
}

impl Serialize for ScheduleVector {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.0.serialize(serializer)
    }
}

// ---------------------------------------------------------------------------
// WeeklySchedule
// ---------------------------------------------------------------------------

/// Parsed schedule for every team that appeared in the grid.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WeeklySchedule {
    teams: HashMap<NbaTeam, ScheduleVector>,
}

impl WeeklySchedule {
    /// Look up a team by code. Source-specific variants ("GS", "PHO") are
    /// resolved before the lookup.
    pub fn get_team_schedule(&self, code: &str) -> Option<&ScheduleVector> {
        let team = NbaTeam::from_code(&resolve_team_code(code))?;
        self.teams.get(&team)
    }

    /// Games scheduled before `day`. Unknown teams play zero games.
    pub fn games_played(&self, code: &str, day: usize) -> u32 {
        self.get_team_schedule(code)
            .map_or(0, |v| v.played_through(day))
    }

    /// Games scheduled from `day` to the end of the week. Unknown teams play
    /// zero games.
    pub fn games_remaining(&self, code: &str, day: usize) -> u32 {
        self.get_team_schedule(code)
            .map_or(0, |v| v.remaining_from(day))
    }

    pub fn team_count(&self) -> usize {
        self.teams.len()
    }
}

// ---------------------------------------------------------------------------
// Grid parsing
// ---------------------------------------------------------------------------

/// Turn a grid of cell texts into a [`WeeklySchedule`].
///
/// The first cell of each row is the team label (full name or code). Rows
/// whose label is not an NBA team are skipped. The last seven cells of a team
/// row are the day cells; anything between the label and those is treated as
/// a spacer. If a team appears twice, the later row wins.
pub fn parse_grid<R, S>(rows: &[R]) -> Result<WeeklySchedule, ParseError>
where
    R: AsRef<[S]>,
    S: AsRef<str>,
{
    let mut teams = HashMap::new();

    for (idx, row) in rows.iter().enumerate() {
        let row = row.as_ref();
        let Some(label) = row.first().map(|c| c.as_ref().trim()) else {
            continue;
        };
        let Some(team) = team_for_label(label) else {
            debug!("skipping non-team schedule row {}: '{}'", idx + 1, label);
            continue;
        };

        let cells = &row[1..];
        if cells.len() < DAYS_PER_WEEK {
            return Err(ParseError::schedule(
                idx + 1,
                format!(
                    "{} has {} day cells, expected {DAYS_PER_WEEK}",
                    team.code(),
                    cells.len()
                ),
            ));
        }

        let day_cells = &cells[cells.len() - DAYS_PER_WEEK..];
        let mut days = [0u8; DAYS_PER_WEEK];
        for (slot, cell) in days.iter_mut().zip(day_cells) {
            *slot = u8::from(!cell.as_ref().trim().is_empty());
        }

        if teams.insert(team, ScheduleVector::new(days)).is_some() {
            warn!("duplicate schedule row for {}, using latest", team.code());
        }
    }

    if teams.is_empty() {
        return Err(ParseError::Empty {
            source_name: "schedule grid",
        });
    }

    info!("Parsed schedule for {} teams", teams.len());

    Ok(WeeklySchedule { teams })
}

// ---------------------------------------------------------------------------
// HTML extraction
// ---------------------------------------------------------------------------

fn selector(css: &str) -> Result<Selector, ParseError> {
    Selector::parse(css).map_err(|e| ParseError::Selector {
        selector: css.to_string(),
        message: e.to_string(),
    })
}

fn is_decorative(cell: &ElementRef<'_>) -> bool {
    let classes: Vec<&str> = cell.value().classes().collect();
    classes.len() == DECORATIVE_CLASSES.len()
        && DECORATIVE_CLASSES.iter().all(|c| classes.contains(c))
}

/// Extract the first `<table>` of a schedule page into rows of trimmed cell
/// text. Only `<td>` cells are kept (header `<th>` cells are dropped) and
/// decorative cells are filtered out. Rows without data cells are omitted.
pub fn extract_grid(html: &str) -> Result<Vec<Vec<String>>, ParseError> {
    let document = Html::parse_document(html);
    let table_sel = selector("table")?;
    let row_sel = selector("tr")?;
    let cell_sel = selector("td")?;

    let Some(table) = document.select(&table_sel).next() else {
        return Err(ParseError::Empty {
            source_name: "schedule table",
        });
    };

    let grid: Vec<Vec<String>> = table
        .select(&row_sel)
        .map(|row| {
            row.select(&cell_sel)
                .filter(|cell| !is_decorative(cell))
                .map(|cell| cell.text().collect::<String>().trim().to_string())
                .collect::<Vec<String>>()
        })
        .filter(|cells| !cells.is_empty())
        .collect();

    debug!("extracted {} schedule rows from HTML", grid.len());
    Ok(grid)
}

/// `extract_grid` followed by `parse_grid`.
pub fn parse_html(html: &str) -> Result<WeeklySchedule, ParseError> {
    let grid = extract_grid(html)?;
    parse_grid(&grid)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
