// Stat lines and the arithmetic used to roll them up.

use std::iter::Sum;
use std::ops::{Add, Mul};

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

// ---------------------------------------------------------------------------
// StatRecord
// ---------------------------------------------------------------------------

/// The eleven counting categories tracked for every player and team.
///
/// Used both for per-game rates (projections) and for period totals (matchup
/// actuals and projections). All fields are expected to be non-negative.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct StatRecord {
    pub fgm: f64,
    pub fga: f64,
    pub ftm: f64,
    pub fta: f64,
    pub three_pm: f64,
    pub pts: f64,
    pub reb: f64,
    pub ast: f64,
    pub stl: f64,
    pub blk: f64,
    pub tov: f64,
}

impl StatRecord {
    /// Build a record from values in the fixed category order
    /// FGM, FGA, FTM, FTA, 3PTM, PTS, REB, AST, STL, BLK, TOV.
    pub fn from_ordered(v: [f64; 11]) -> Self {
        StatRecord {
            fgm: v[0],
            fga: v[1],
            ftm: v[2],
            fta: v[3],
            three_pm: v[4],
            pts: v[5],
            reb: v[6],
            ast: v[7],
            stl: v[8],
            blk: v[9],
            tov: v[10],
        }
    }

    /// Values in the fixed category order (inverse of `from_ordered`).
    pub fn to_ordered(&self) -> [f64; 11] {
        [
            self.fgm,
            self.fga,
            self.ftm,
            self.fta,
            self.three_pm,
            self.pts,
            self.reb,
            self.ast,
            self.stl,
            self.blk,
            self.tov,
        ]
    }

    fn map2(&self, other: &StatRecord, f: impl Fn(f64, f64) -> f64) -> StatRecord {
        let a = self.to_ordered();
        let b = other.to_ordered();
        let mut out = [0.0; 11];
        for i in 0..11 {
            out[i] = f(a[i], b[i]);
        }
        StatRecord::from_ordered(out)
    }

    fn map(&self, f: impl Fn(f64) -> f64) -> StatRecord {
        StatRecord::from_ordered(self.to_ordered().map(f))
    }

    /// Field goal percentage as a ratio, 0.0 when no attempts.
    pub fn fg_pct(&self) -> f64 {
        ratio(self.fgm, self.fga)
    }

    /// Free throw percentage as a ratio, 0.0 when no attempts.
    pub fn ft_pct(&self) -> f64 {
        ratio(self.ftm, self.fta)
    }
}

// ---------------------------------------------------------------------------
// Algebra
// ---------------------------------------------------------------------------

/// Round to one decimal place (half away from zero).
pub fn round1(v: f64) -> f64 {
    (v * 10.0).round() / 10.0
}

/// Round to three decimal places (half away from zero).
pub fn round3(v: f64) -> f64 {
    (v * 1000.0).round() / 1000.0
}

fn ratio(made: f64, attempted: f64) -> f64 {
    if attempted <= 0.0 {
        return 0.0;
    }
    round3(made / attempted)
}

/// The identity for `add`.
pub fn zero() -> StatRecord {
    StatRecord::default()
}

/// Field-wise sum, each field rounded to one decimal.
pub fn add(a: &StatRecord, b: &StatRecord) -> StatRecord {
    a.map2(b, |x, y| round1(x + y))
}

/// Field-wise product with a game count, each field rounded to one decimal.
pub fn scale(a: &StatRecord, games: u32) -> StatRecord {
    let n = games as f64;
    a.map(|x| round1(x * n))
}

impl Add for StatRecord {
    type Output = StatRecord;

    fn add(self, rhs: StatRecord) -> StatRecord {
        add(&self, &rhs)
    }
}

impl Mul<u32> for StatRecord {
    type Output = StatRecord;

    fn mul(self, games: u32) -> StatRecord {
        scale(&self, games)
    }
}

impl Sum for StatRecord {
    fn sum<I: Iterator<Item = StatRecord>>(iter: I) -> StatRecord {
        iter.fold(zero(), |acc, s| add(&acc, &s))
    }
}

// ---------------------------------------------------------------------------
// Serialization
// ---------------------------------------------------------------------------

/// Wire keys, in category order. `_3PTM` keeps the front-end's spelling.
pub const STAT_KEYS: [&str; 11] = [
    "FGM", "FGA", "FTM", "FTA", "_3PTM", "PTS", "REB", "AST", "STL", "BLK", "TOV",
];

impl Serialize for StatRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(STAT_KEYS.len() + 2))?;
        for (key, value) in STAT_KEYS.iter().zip(self.to_ordered()) {
            map.serialize_entry(key, &value)?;
        }
        map.serialize_entry("FG%", &self.fg_pct())?;
        map.serialize_entry("FT%", &self.ft_pct())?;
        map.end()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
