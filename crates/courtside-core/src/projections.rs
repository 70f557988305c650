// Season projection sheet parsing.
//
// The projection feed is a copy of a ranked table where each player occupies
// a ten-line block: one tab-separated header line ending in the FG% composite
// ("48.2% 9.3/19.3"), followed by nine single-value lines (FT% composite,
// 3PTM, PTS, REB, AST, STL, BLK, TOV, total value). Repeated column-header
// lines start with "R#" and are skipped.
//
// Only the name, team and the stat lines are read. Rank, ADP, positions,
// games, minutes and the total-value line are layout, not data.

use std::collections::HashMap;

use tracing::{debug, info, warn};

use crate::error::ParseError;
use crate::normalize::{resolve_team_code, NameNormalizer};
use crate::stats::StatRecord;

// ---------------------------------------------------------------------------
// Layout constants
// ---------------------------------------------------------------------------

/// Prefix of the repeated table header row.
pub const HEADER_TOKEN: &str = "R#";

/// Tab-separated fields on a player's header line.
const HEADER_FIELDS: usize = 8;

/// Lines that follow each header line.
const BLOCK_LINES: usize = 9;

// ---------------------------------------------------------------------------
// Public types
// ---------------------------------------------------------------------------

/// One parsed player block.
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectionEntry {
    /// Cleaned display name as printed on the sheet.
    pub name: String,
    /// Team code after variant resolution; `None` when the column is blank.
    pub team: Option<String>,
    /// Per-game rates.
    pub stats: StatRecord,
}

/// All projection rows keyed by canonical player name.
#[derive(Debug, Clone)]
pub struct ProjectionSheet {
    names: NameNormalizer,
    entries: HashMap<String, ProjectionEntry>,
}

impl ProjectionSheet {
    /// Per-game rates for a player, looked up by any spelling of their name.
    pub fn stats_for(&self, name: &str) -> Option<&StatRecord> {
        self.entry_for(name).map(|e| &e.stats)
    }

    /// Team code the sheet lists for a player. A blank team column reads as
    /// `None`, the same as an unknown player.
    pub fn team_for(&self, name: &str) -> Option<&str> {
        self.entry_for(name).and_then(|e| e.team.as_deref())
    }

    pub fn entry_for(&self, name: &str) -> Option<&ProjectionEntry> {
        self.entries.get(&self.names.canonical_name(name))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Composite fields
// ---------------------------------------------------------------------------

/// A decoded "pct% made/attempted" field. The printed percentage is only
/// range-checked.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Composite {
    made: f64,
    attempted: f64,
}

/// Maximal runs of digits and dots, in order of appearance.
fn numeric_tokens(field: &str) -> Vec<&str> {
    let mut tokens = Vec::new();
    let mut start: Option<usize> = None;
    for (idx, c) in field.char_indices() {
        let numeric = c.is_ascii_digit() || c == '.';
        match (numeric, start) {
            (true, None) => start = Some(idx),
            (false, Some(s)) => {
                tokens.push(&field[s..idx]);
                start = None;
            }
            _ => {}
        }
    }
    if let Some(s) = start {
        tokens.push(&field[s..]);
    }
    tokens
}

fn decode_composite(field: &str, line: usize, label: &str) -> Result<Composite, ParseError> {
    let tokens = numeric_tokens(field);
    if tokens.len() < 3 {
        return Err(ParseError::projection(
            line,
            format!("{label} composite `{field}` needs pct, made and attempted"),
        ));
    }
    let mut values = [0.0; 3];
    for (slot, token) in values.iter_mut().zip(&tokens) {
        *slot = token.parse::<f64>().map_err(|_| {
            ParseError::projection(line, format!("{label} composite `{field}` has bad number `{token}`"))
        })?;
    }
    let [pct, made, attempted] = values;
    if pct > 100.0 {
        return Err(ParseError::projection(
            line,
            format!("{label} percentage {pct} is out of range"),
        ));
    }
    if made > attempted {
        return Err(ParseError::projection(
            line,
            format!("{label} made {made} exceeds attempted {attempted}"),
        ));
    }
    Ok(Composite { made, attempted })
}

// ---------------------------------------------------------------------------
// Line helpers
// ---------------------------------------------------------------------------

fn parse_stat(field: &str, line: usize, label: &str) -> Result<f64, ParseError> {
    let v: f64 = field
        .trim()
        .parse()
        .map_err(|_| ParseError::projection(line, format!("{label} `{field}` is not numeric")))?;
    if !v.is_finite() || v < 0.0 {
        return Err(ParseError::projection(
            line,
            format!("{label} `{field}` must be a non-negative number"),
        ));
    }
    Ok(v)
}

struct Header<'a> {
    name: &'a str,
    team: Option<String>,
    fg: Composite,
}

fn parse_header(line: &str, line_no: usize) -> Result<Header<'_>, ParseError> {
    let fields: Vec<&str> = line.split('\t').map(str::trim).collect();
    if fields.len() != HEADER_FIELDS {
        return Err(ParseError::projection(
            line_no,
            format!(
                "expected {HEADER_FIELDS} tab-separated fields, found {}",
                fields.len()
            ),
        ));
    }
    if fields[2].is_empty() {
        return Err(ParseError::projection(line_no, "player name is empty"));
    }

    let team = resolve_team_code(fields[4]);
    Ok(Header {
        name: fields[2],
        team: (!team.is_empty()).then_some(team),
        fg: decode_composite(fields[7], line_no, "FG")?,
    })
}

// ---------------------------------------------------------------------------
// Parser
// ---------------------------------------------------------------------------

/// Parse the raw projection text into a [`ProjectionSheet`].
///
/// Any malformed block fails the whole parse; the error carries the 1-based
/// line number of the offending line. A sheet without a single player row is
/// also rejected.
pub fn parse_projections(raw: &str, names: &NameNormalizer) -> Result<ProjectionSheet, ParseError> {
    let lines: Vec<&str> = raw.lines().collect();
    let mut entries: HashMap<String, ProjectionEntry> = HashMap::new();
    let mut idx = 0;

    while idx < lines.len() {
        let line_no = idx + 1;
        let line = lines[idx].trim();
        idx += 1;

        if line.is_empty() || line.starts_with(HEADER_TOKEN) {
            continue;
        }

        let header = parse_header(line, line_no)?;

        let mut block: [&str; BLOCK_LINES] = [""; BLOCK_LINES];
        for (k, slot) in block.iter_mut().enumerate() {
            let Some(next) = lines.get(idx) else {
                return Err(ParseError::projection(
                    line_no,
                    format!("block for `{}` ends after {k} of {BLOCK_LINES} stat lines", header.name),
                ));
            };
            let next = next.trim();
            if next.contains('\t') || next.starts_with(HEADER_TOKEN) {
                return Err(ParseError::projection(
                    idx + 1,
                    format!("block for `{}` has only {k} of {BLOCK_LINES} stat lines", header.name),
                ));
            }
            *slot = next;
            idx += 1;
        }

        // Line numbers of the block: header is `line_no`, stat k is `line_no + 1 + k`.
        let at = |k: usize| line_no + 1 + k;
        let ft = decode_composite(block[0], at(0), "FT")?;
        let three_pm = parse_stat(block[1], at(1), "3PTM")?;
        let pts = parse_stat(block[2], at(2), "PTS")?;
        let reb = parse_stat(block[3], at(3), "REB")?;
        let ast = parse_stat(block[4], at(4), "AST")?;
        let stl = parse_stat(block[5], at(5), "STL")?;
        let blk = parse_stat(block[6], at(6), "BLK")?;
        let tov = parse_stat(block[7], at(7), "TOV")?;

        let stats = StatRecord::from_ordered([
            header.fg.made,
            header.fg.attempted,
            ft.made,
            ft.attempted,
            three_pm,
            pts,
            reb,
            ast,
            stl,
            blk,
            tov,
        ]);

        let key = names.canonical_name(header.name);
        debug!(player = %key, team = ?header.team, "parsed projection row");

        let entry = ProjectionEntry {
            name: crate::normalize::clean(header.name),
            team: header.team,
            stats,
        };

        if entries.insert(key.clone(), entry).is_some() {
            warn!("duplicate projection row for '{}', using latest", key);
        }
    }

    if entries.is_empty() {
        return Err(ParseError::Empty {
            source_name: "projection sheet",
        });
    }

    info!("Parsed {} projection rows", entries.len());

    Ok(ProjectionSheet {
        names: names.clone(),
        entries,
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn block(header: &str, rest: &[&str]) -> String {
        let mut s = String::from(header);
        for line in rest {
            s.push('\n');
            s.push_str(line);
        }
        s
    }

    const LEBRON_HEADER: &str = "1\t1\tLeBron James\tPF\tLAL\t70\t35.0\t50.0% 10.0/20.0";
    const LEBRON_REST: [&str; 9] = [
        "80.0% 5.0/6.25",
        "25.0",
        "7.0",
        "8.0",
        "1.5",
        "0.5",
        "3.5",
        "2.0",
        "4.12",
    ];

    fn lebron() -> String {
        block(LEBRON_HEADER, &LEBRON_REST)
    }

    fn parse(raw: &str) -> Result<ProjectionSheet, ParseError> {
        parse_projections(raw, &NameNormalizer::default())
    }

    // -- Composite decoding --

    #[test]
    fn numeric_tokens_split_on_non_numeric() {
        assert_eq!(numeric_tokens("48.2% 9.3/19.3"), vec!["48.2", "9.3", "19.3"]);
        assert_eq!(numeric_tokens("(.812) 4/5"), vec![".812", "4", "5"]);
        assert!(numeric_tokens("--").is_empty());
    }

    #[test]
    fn composite_keeps_made_and_attempted() {
        let c = decode_composite("48.2% 9.3/19.3", 1, "FG").unwrap();
        assert!((c.made - 9.3).abs() < f64::EPSILON);
        assert!((c.attempted - 19.3).abs() < f64::EPSILON);
    }

    #[test]
    fn composite_with_too_few_numbers_fails() {
        let err = decode_composite("48.2%", 7, "FG").unwrap_err();
        assert!(matches!(err, ParseError::Projection { line: 7, .. }));
    }

    #[test]
    fn composite_percentage_above_hundred_fails() {
        assert!(decode_composite("148.2% 9.3/19.3", 1, "FG").is_err());
    }

    #[test]
    fn composite_made_above_attempted_fails() {
        assert!(decode_composite("50.0% 6.0/5.0", 1, "FT").is_err());
    }

    // -- Full blocks --

    #[test]
    fn lebron_example_parses() {
        let sheet = parse(&lebron()).unwrap();
        assert_eq!(sheet.len(), 1);

        let stats = sheet.stats_for("LeBron James").unwrap();
        assert_eq!(
            *stats,
            StatRecord::from_ordered([10.0, 20.0, 5.0, 6.25, 25.0, 7.0, 8.0, 1.5, 0.5, 3.5, 2.0])
        );
        assert_eq!(sheet.team_for("LeBron James"), Some("LAL"));
        assert_eq!(sheet.entry_for("LeBron James").unwrap().name, "LeBron James");
    }

    #[test]
    fn header_rows_and_blank_lines_are_skipped() {
        let raw = format!(
            "R#\tADP\tPLAYER\tPOS\tTEAM\tGP\tMPG\tFG%\n{}\n\nR#\tADP\tPLAYER\tPOS\tTEAM\tGP\tMPG\tFG%\n{}\n",
            lebron(),
            block(
                "2\t-\tNikola Jokić\tC\tDEN\t74\t34.6\t58.3% 10.5/18.0",
                &["82.1% 4.6/5.6", "1.1", "26.4", "12.4", "9.0", "1.4", "0.8", "3.0", "-0.5"],
            )
        );
        let sheet = parse(&raw).unwrap();
        assert_eq!(sheet.len(), 2);
        assert_eq!(sheet.team_for("Nikola Jokic"), Some("DEN"));
        assert!((sheet.stats_for("Nikola Jokić").unwrap().reb - 12.4).abs() < f64::EPSILON);
    }

    #[test]
    fn lookups_apply_cleaning_and_aliases() {
        let raw = block(
            "40\t38\tPJ Washington\tPF,C\tDAL\t70\t30.1\t45.0% 4.5/10.0",
            &["70.0% 1.4/2.0", "2.0", "12.8", "7.2", "2.0", "1.0", "0.9", "1.3", "0.1"],
        );
        let sheet = parse(&raw).unwrap();
        assert!(sheet.stats_for("P.J. Washington Jr.").is_some());
        assert_eq!(sheet.team_for("PJ Washington"), Some("DAL"));
    }

    #[test]
    fn team_variants_are_resolved() {
        let raw = block(
            "5\t6\tStephen Curry\tPG\tGS\t70\t33.0\t45.0% 8.9/19.8",
            &["91.0% 4.5/4.9", "4.8", "26.8", "4.6", "5.1", "0.8", "0.4", "3.0", "3.3"],
        );
        let sheet = parse(&raw).unwrap();
        assert_eq!(sheet.team_for("Stephen Curry"), Some("GSW"));
    }

    #[test]
    fn blank_team_column_reads_as_none() {
        let header = LEBRON_HEADER.replace("LAL", " ");
        let sheet = parse(&block(&header, &LEBRON_REST)).unwrap();
        assert!(sheet.stats_for("LeBron James").is_some());
        assert_eq!(sheet.entry_for("LeBron James").unwrap().team, None);
        assert_eq!(sheet.team_for("LeBron James"), None);
    }

    #[test]
    fn unknown_player_returns_none() {
        let sheet = parse(&lebron()).unwrap();
        assert!(sheet.stats_for("Not A Player").is_none());
        assert!(sheet.team_for("Not A Player").is_none());
    }

    #[test]
    fn duplicate_rows_keep_latest() {
        let second = LEBRON_HEADER.replace("LAL", "CLE");
        let raw = format!("{}\n{}", lebron(), block(&second, &LEBRON_REST));
        let sheet = parse(&raw).unwrap();
        assert_eq!(sheet.len(), 1);
        assert_eq!(sheet.team_for("LeBron James"), Some("CLE"));
    }

    // -- Malformed input --

    #[test]
    fn truncated_block_before_next_header_fails() {
        let short = block(LEBRON_HEADER, &LEBRON_REST[..5]);
        let raw = format!("{short}\n{}", lebron());
        let err = parse(&raw).unwrap_err();
        assert!(matches!(err, ParseError::Projection { line: 7, .. }), "{err}");
    }

    #[test]
    fn truncated_block_at_end_of_input_fails() {
        let raw = block(LEBRON_HEADER, &LEBRON_REST[..8]);
        assert!(matches!(
            parse(&raw).unwrap_err(),
            ParseError::Projection { line: 1, .. }
        ));
    }

    #[test]
    fn wrong_field_count_fails() {
        let raw = block("1\t1\tLeBron James\tPF\tLAL\t70\t50.0% 10.0/20.0", &LEBRON_REST);
        let err = parse(&raw).unwrap_err();
        assert!(err.to_string().contains("line 1"));
    }

    #[test]
    fn non_numeric_stat_fails_with_line_number() {
        let mut rest = LEBRON_REST;
        rest[3] = "eight";
        let err = parse(&block(LEBRON_HEADER, &rest)).unwrap_err();
        assert!(matches!(err, ParseError::Projection { line: 5, .. }), "{err}");
    }

    #[test]
    fn negative_stat_fails() {
        let mut rest = LEBRON_REST;
        rest[5] = "-0.5";
        assert!(parse(&block(LEBRON_HEADER, &rest)).is_err());
    }

    #[test]
    fn layout_columns_are_not_validated() {
        let header = "-	-	LeBron James		LAL	n/a	--	50.0% 10.0/20.0";
        let mut rest = LEBRON_REST;
        rest[8] = "n/a";
        let sheet = parse(&block(header, &rest)).unwrap();
        assert_eq!(sheet.team_for("LeBron James"), Some("LAL"));
    }

    #[test]
    fn empty_sheet_fails() {
        let err = parse("R#\tADP\tPLAYER\n\n").unwrap_err();
        assert!(matches!(err, ParseError::Empty { .. }));
    }
}
