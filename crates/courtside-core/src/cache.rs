// Swap-in caches for parsed sources and published snapshots.
//
// Values are built completely outside the lock and then swapped in as a new
// `Arc`, so a reader holds either the previous value or the new one.

use std::sync::{Arc, PoisonError, RwLock};

use tracing::{info, warn};

use crate::error::ParseError;
use crate::normalize::NameNormalizer;
use crate::projections::{parse_projections, ProjectionSheet};
use crate::schedule::{parse_grid, parse_html, WeeklySchedule};

// ---------------------------------------------------------------------------
// SourceCache
// ---------------------------------------------------------------------------

/// A single cached value that is replaced wholesale.
#[derive(Debug)]
pub struct SourceCache<T> {
    slot: RwLock<Option<Arc<T>>>,
}

impl<T> Default for SourceCache<T> {
    fn default() -> Self {
        Self {
            slot: RwLock::new(None),
        }
    }
}

impl<T> SourceCache<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cache pre-populated with `value`.
    pub fn with_value(value: T) -> Self {
        Self {
            slot: RwLock::new(Some(Arc::new(value))),
        }
    }

    /// The current value, if one has been published.
    pub fn get(&self) -> Option<Arc<T>> {
        self.slot
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Publish `value`, returning the value it replaced.
    pub fn swap(&self, value: T) -> Option<Arc<T>> {
        let next = Arc::new(value);
        let mut slot = self.slot.write().unwrap_or_else(PoisonError::into_inner);
        slot.replace(next)
    }

    /// Run `build` and publish its result. On error nothing is published and
    /// the previous value stays visible.
    pub fn build<E>(&self, build: impl FnOnce() -> Result<T, E>) -> Result<Arc<T>, E> {
        let value = Arc::new(build()?);
        let mut slot = self.slot.write().unwrap_or_else(PoisonError::into_inner);
        *slot = Some(Arc::clone(&value));
        Ok(value)
    }

    pub fn is_populated(&self) -> bool {
        self.slot
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .is_some()
    }
}

// ---------------------------------------------------------------------------
// SourceData
// ---------------------------------------------------------------------------

/// The parsed projection sheet and schedule, shared read-only by every
/// league refresh.
#[derive(Debug, Default)]
pub struct SourceData {
    names: NameNormalizer,
    projections: SourceCache<ProjectionSheet>,
    schedule: SourceCache<WeeklySchedule>,
}

impl SourceData {
    pub fn new(names: NameNormalizer) -> Self {
        Self {
            names,
            projections: SourceCache::new(),
            schedule: SourceCache::new(),
        }
    }

    /// Re-parse the projection text and swap it in.
    pub fn refresh_stats(&self, raw: &str) -> Result<Arc<ProjectionSheet>, ParseError> {
        let result = self
            .projections
            .build(|| parse_projections(raw, &self.names));
        match &result {
            Ok(sheet) => info!("Projection cache rebuilt: {} players", sheet.len()),
            Err(e) => warn!("Projection rebuild failed, keeping previous cache: {}", e),
        }
        result
    }

    /// Re-parse an already-extracted schedule grid and swap it in.
    pub fn refresh_schedule<R, S>(&self, rows: &[R]) -> Result<Arc<WeeklySchedule>, ParseError>
    where
        R: AsRef<[S]>,
        S: AsRef<str>,
    {
        let result = self.schedule.build(|| parse_grid(rows));
        log_schedule_rebuild(&result);
        result
    }

    /// Re-parse the schedule page HTML and swap it in.
    pub fn refresh_schedule_html(&self, html: &str) -> Result<Arc<WeeklySchedule>, ParseError> {
        let result = self.schedule.build(|| parse_html(html));
        log_schedule_rebuild(&result);
        result
    }

    pub fn projections(&self) -> Option<Arc<ProjectionSheet>> {
        self.projections.get()
    }

    pub fn schedule(&self) -> Option<Arc<WeeklySchedule>> {
        self.schedule.get()
    }
}

fn log_schedule_rebuild(result: &Result<Arc<WeeklySchedule>, ParseError>) {
    match result {
        Ok(schedule) => info!("Schedule cache rebuilt: {} teams", schedule.team_count()),
        Err(e) => warn!("Schedule rebuild failed, keeping previous cache: {}", e),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    const SHEET: &str = "1\t1\tLeBron James\tPF\tLAL\t70\t35.0\t50.0% 10.0/20.0
80.0% 5.0/6.25
2.0
27.0
7.0
8.0
1.5
0.5
3.5
4.1";

    #[test]
    fn empty_cache_returns_none() {
        let cache: SourceCache<u32> = SourceCache::new();
        assert!(cache.get().is_none());
        assert!(!cache.is_populated());
    }

    #[test]
    fn swap_returns_previous_value() {
        let cache = SourceCache::with_value(1u32);
        let prev = cache.swap(2).unwrap();
        assert_eq!(*prev, 1);
        assert_eq!(*cache.get().unwrap(), 2);
    }

    #[test]
    fn failed_build_keeps_previous_value() {
        let cache = SourceCache::with_value(1u32);
        let result: Result<_, &str> = cache.build(|| Err("boom"));
        assert!(result.is_err());
        assert_eq!(*cache.get().unwrap(), 1);
    }

    #[test]
    fn readers_keep_their_snapshot_across_swaps() {
        let cache = SourceCache::with_value(String::from("old"));
        let held = cache.get().unwrap();
        cache.swap(String::from("new"));
        assert_eq!(held.as_str(), "old");
        assert_eq!(cache.get().unwrap().as_str(), "new");
    }

    #[test]
    fn refresh_stats_populates_projections() {
        let data = SourceData::default();
        assert!(data.projections().is_none());
        data.refresh_stats(SHEET).unwrap();
        let sheet = data.projections().unwrap();
        assert_eq!(sheet.team_for("LeBron James"), Some("LAL"));
    }

    #[test]
    fn malformed_sheet_leaves_previous_projections() {
        let data = SourceData::default();
        data.refresh_stats(SHEET).unwrap();

        let truncated: String = SHEET.lines().take(6).collect::<Vec<_>>().join("\n");
        assert!(data.refresh_stats(&truncated).is_err());

        let sheet = data.projections().unwrap();
        assert_eq!(sheet.len(), 1);
        assert!(sheet.stats_for("LeBron James").is_some());
    }

    #[test]
    fn bad_schedule_leaves_previous_schedule() {
        let data = SourceData::default();
        data.refresh_schedule(&[vec!["LAL", "X", "", "", "", "", "", "X"]])
            .unwrap();
        assert!(data.refresh_schedule(&[vec!["Team"]]).is_err());
        assert_eq!(data.schedule().unwrap().games_remaining("LAL", 0), 2);
    }
}
