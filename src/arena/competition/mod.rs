//! Everything above a single match: generating the teams, working out
//! the fixtures, playing the group and the resulting table.

mod fixtures;
mod generators;
pub mod standings;
mod tournament;

pub use fixtures::{FixtureScheduler, GROUP_SIZE};
pub use generators::{DEFAULT_HANDICAPS, GenerationContext, PlayerFactory, TeamFactory};
pub use standings::{compare_records, goals_through, rank, top_scorers};
pub use tournament::{GroupStage, GroupStageBuilder};
