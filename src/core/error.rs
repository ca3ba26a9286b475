use thiserror::Error;

use super::{Line, PlayerId, TeamId};

/// This is the core error type for the group stage
/// library. Everything in here is a configuration
/// problem that is found while generating, never while
/// a match is being simulated.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GroupStageError {
    #[error("Formation {forwards}-{midfielders}-{defenders} doesn't fill the 10 outfield slots")]
    FormationSize {
        forwards: u8,
        midfielders: u8,
        defenders: u8,
    },
    #[error("Formation leaves the {0} line empty")]
    EmptyLine(Line),
    #[error("Unable to parse formation from {0:?}")]
    UnparsableFormation(String),
    #[error("Unable to find an unused name after {0} attempts")]
    NamePoolExhausted(usize),
    #[error("A team needs exactly 11 players, found {0}")]
    InvalidTeamSize(usize),
    #[error("A team needs exactly one keeper in the last slot, found {0} keepers")]
    InvalidKeeper(usize),
    #[error("Team has nobody on the {0} line")]
    MissingLine(Line),
    #[error("Team id {0} is used by more than one team")]
    DuplicateTeamId(TeamId),
    #[error("Team name {0:?} is used by more than one team")]
    DuplicateTeamName(String),
    #[error("Player id {0} is used by more than one player")]
    DuplicatePlayerId(PlayerId),
    #[error("At least one handicap is needed to generate teams")]
    NoHandicaps,
    #[error("At least one formation is needed to generate teams")]
    NoFormations,
}
