//! This is the core module. It exports the data model every
//! other part of the library works on: formations, players,
//! teams, names and the source of randomness.

/// Everything that can go wrong while setting things up.
mod error;
pub use self::error::GroupStageError;

/// Lines, positions and the fixed formations.
mod formation;
pub use self::formation::{
    Formation, FormationLayout, KEEPER_COLUMN, Line, OUTFIELD_SIZE, PITCH_COLUMNS, Position,
    TEAM_SIZE,
};

/// Players and their skills.
mod player;
pub use self::player::{
    MAX_AGE, MAX_HEIGHT_CM, MIN_AGE, MIN_HEIGHT_CM, Player, PlayerId, age_speed_power,
    length_power,
};

/// Teams and their season record.
mod team;
pub use self::team::{DRAW_POINTS, Team, TeamId, TeamRecord, WIN_POINTS};

/// Unique names for players and teams.
mod names;
pub use self::names::{DEFAULT_MAX_ATTEMPTS, NameGenerator, NamePool};

/// Injectable randomness.
mod random;
pub use self::random::{RandomSource, ScriptedRandom};
