// Library root: fantasy-basketball stat aggregation. Parses the projection
// sheet and weekly schedule, joins them to provider rosters, and assembles
// per-league matchup snapshots.

pub mod cache;
pub mod error;
pub mod league;
pub mod normalize;
pub mod projections;
pub mod provider;
pub mod roster;
pub mod schedule;
pub mod stats;
pub mod team;

pub use cache::{SourceCache, SourceData};
pub use error::ParseError;
pub use league::{LeagueAssembler, LeagueSnapshot, RefreshError};
pub use provider::{LeagueProvider, ProviderError};
pub use stats::StatRecord;
