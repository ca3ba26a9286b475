use std::cmp::Ordering;

use crate::arena::errors::SimulationError;
use crate::arena::game::Match;
use crate::core::{Player, Team, TeamRecord};

/// Order two records the way a group table does: most points first,
/// then goal difference, then goals scored, then fewest goals conceded.
pub fn compare_records(a: &TeamRecord, b: &TeamRecord) -> Ordering {
    b.points
        .cmp(&a.points)
        .then_with(|| b.goal_difference().cmp(&a.goal_difference()))
        .then_with(|| b.goals_for.cmp(&a.goals_for))
        .then_with(|| a.goals_against.cmp(&b.goals_against))
}

/// The group table. Teams that can't be told apart stay in the
/// order they were given.
pub fn rank(teams: &[Team]) -> Vec<&Team> {
    let mut table: Vec<&Team> = teams.iter().collect();
    table.sort_by(|a, b| compare_records(&a.record, &b.record));
    table
}

/// The score after turn `turn_index` of `game`, as (home, away).
///
/// `home` is the home team of the match. A goal counts for the home side
/// when the scorer is in its squad.
pub fn goals_through(
    game: &Match,
    home: &Team,
    turn_index: usize,
) -> Result<(u32, u32), SimulationError> {
    if turn_index >= game.turns.len() {
        return Err(SimulationError::TurnOutOfRange {
            index: turn_index,
            len: game.turns.len(),
        });
    }
    if home.id != game.home {
        return Err(SimulationError::TeamMismatch(game.id));
    }

    Ok(game.turns[..=turn_index]
        .iter()
        .filter(|turn| turn.goal)
        .fold((0, 0), |(home_goals, away_goals), turn| {
            if home.contains(turn.from) {
                (home_goals + 1, away_goals)
            } else {
                (home_goals, away_goals + 1)
            }
        }))
}

/// Players with the most goals, best first, at most `limit` of them.
/// Players that haven't scored are left out.
pub fn top_scorers(teams: &[Team], limit: usize) -> Vec<(&Team, &Player)> {
    let mut scorers: Vec<(&Team, &Player)> = teams
        .iter()
        .flat_map(|team| team.players().iter().map(move |player| (team, player)))
        .filter(|(_, player)| player.goals() > 0)
        .collect();
    scorers.sort_by(|(_, a), (_, b)| b.goals().cmp(&a.goals()));
    scorers.truncate(limit);
    scorers
}
