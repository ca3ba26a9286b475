use thiserror::Error;

use crate::core::{GroupStageError, PlayerId, TeamId};

use super::game::MatchId;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum SimulationError {
    #[error("Need a home and an away team to simulate a match")]
    NeedTeams,
    #[error("Match {0} is played by other teams than the ones given")]
    TeamMismatch(MatchId),
    #[error("Player {0} has nobody to pass to")]
    NoPassTarget(PlayerId),
    #[error("Nobody can contest a pass to player {0}")]
    NoContest(PlayerId),
    #[error("Player {0} isn't playing in this match")]
    UnknownPlayer(PlayerId),
    #[error("No match with id {0}")]
    UnknownMatch(MatchId),
    #[error("No team with id {0}")]
    UnknownTeam(TeamId),
    #[error("Match {0} has already been simulated")]
    AlreadySimulated(MatchId),
    #[error("Turn {index} is past the end of a match with {len} turns")]
    TurnOutOfRange { index: usize, len: usize },
    #[error("A group needs at least two teams, got {0}")]
    NotEnoughTeams(usize),
    #[error(transparent)]
    Setup(#[from] GroupStageError),
}
