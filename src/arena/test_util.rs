use crate::core::{Formation, Player, PlayerId, TEAM_SIZE, Team, TeamId};

use super::game::Match;

/// Build a team where every player has the same age and height.
///
/// Player ids are `team_id * 100 + slot` so they never clash between
/// teams built here.
pub fn build_team_with(
    team_id: u32,
    formation: Formation,
    age: u8,
    height_cm: u16,
    handicap: f64,
) -> Team {
    let layout = formation.layout();
    let players = (0..TEAM_SIZE)
        .map(|slot| {
            Player::new(
                PlayerId(team_id * 100 + slot as u32),
                format!("Player{slot}"),
                format!("Team{team_id}"),
                age,
                height_cm,
                handicap,
                layout.position_for_slot(slot).unwrap(),
            )
        })
        .collect();

    Team::new(TeamId(team_id), format!("Team {team_id}"), layout, players).unwrap()
}

/// Every player is 18 and 1.50m, so power 58 with no handicap.
pub fn build_team(team_id: u32, formation: Formation, handicap: f64) -> Team {
    build_team_with(team_id, formation, 18, 150, handicap)
}

/// Check everything that has to hold for a finished match.
pub fn assert_valid_match(game: &Match, home: &Team, away: &Team, turn_budget: usize) {
    assert!(game.is_simulated);
    assert_eq!(turn_budget, game.turns.len());

    // Every turn is between players in this match.
    for turn in &game.turns {
        assert!(home.contains(turn.from) || away.contains(turn.from));
        assert!(home.contains(turn.to) || away.contains(turn.to));
    }

    // The score is exactly the goals each side's players scored.
    let home_goals = game.goal_turns().filter(|t| home.contains(t.from)).count();
    let away_goals = game.goal_turns().filter(|t| away.contains(t.from)).count();
    assert_eq!(game.goals_home as usize, home_goals);
    assert_eq!(game.goals_away as usize, away_goals);

    // Possession only jumps at the two kick offs.
    let half = turn_budget / 2;
    for (idx, pair) in game.turns.windows(2).enumerate() {
        if idx + 1 != half {
            assert_eq!(pair[0].to, pair[1].from);
        }
    }
}
