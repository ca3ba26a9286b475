use tracing::{event, trace_span};

use crate::arena::errors::SimulationError;
use crate::arena::game::{Match, MatchId};
use crate::core::Team;

/// The number of teams in a classic group.
pub const GROUP_SIZE: usize = 4;

/// The fixed order a group of four plays in. Every team plays once per
/// round and every team gets to play at home at least once.
const GROUP_OF_FOUR: [(usize, usize); 6] = [(0, 2), (3, 1), (1, 0), (2, 3), (1, 2), (0, 3)];

/// Works out who plays who, and in which order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FixtureScheduler {
    /// Play every pairing a second time with home and away swapped.
    pub reverse_fixtures: bool,
}

impl FixtureScheduler {
    pub fn new(reverse_fixtures: bool) -> Self {
        Self { reverse_fixtures }
    }

    /// The (home, away) team indexes of every match for a group of
    /// `num_teams`, in playing order.
    ///
    /// A group of four uses the fixed order. Any other size is paired up
    /// with the circle method, one round at a time.
    pub fn pairings(&self, num_teams: usize) -> Result<Vec<(usize, usize)>, SimulationError> {
        if num_teams < 2 {
            return Err(SimulationError::NotEnoughTeams(num_teams));
        }

        let mut pairings = if num_teams == GROUP_SIZE {
            GROUP_OF_FOUR.to_vec()
        } else {
            round_robin(num_teams)
        };

        if self.reverse_fixtures {
            let reversed: Vec<(usize, usize)> =
                pairings.iter().map(|&(home, away)| (away, home)).collect();
            pairings.extend(reversed);
        }
        Ok(pairings)
    }

    /// Create every match of the group. Match ids are their place
    /// in the returned list.
    pub fn schedule(&self, teams: &[Team]) -> Result<Vec<Match>, SimulationError> {
        let span = trace_span!("FixtureScheduler::schedule", teams = teams.len());
        let _enter = span.enter();

        let fixtures: Vec<Match> = self
            .pairings(teams.len())?
            .into_iter()
            .enumerate()
            .map(|(idx, (home, away))| Match::new(MatchId(idx), &teams[home], &teams[away]))
            .collect();

        event!(
            tracing::Level::DEBUG,
            "Scheduled {} matches for {} teams",
            fixtures.len(),
            teams.len()
        );
        Ok(fixtures)
    }
}

/// Circle method. One team stays put while the others rotate around it.
/// With an odd number of teams a bye is added and whoever draws it
/// sits the round out.
fn round_robin(num_teams: usize) -> Vec<(usize, usize)> {
    let bye = num_teams % 2 == 1;
    let slots = if bye { num_teams + 1 } else { num_teams };
    let mut circle: Vec<usize> = (0..slots).collect();

    let mut pairings = Vec::with_capacity(num_teams * (num_teams - 1) / 2);
    for round in 0..slots - 1 {
        for i in 0..slots / 2 {
            let (a, b) = (circle[i], circle[slots - 1 - i]);
            if a >= num_teams || b >= num_teams {
                continue;
            }
            // Alternate so nobody is always at home.
            if (round + i) % 2 == 0 {
                pairings.push((a, b));
            } else {
                pairings.push((b, a));
            }
        }
        circle[1..].rotate_right(1);
    }
    pairings
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use crate::arena::game::Side;
    use crate::arena::test_util::build_team;
    use crate::core::Formation;

    use super::*;

    fn teams(n: u32) -> Vec<Team> {
        (0..n).map(|id| build_team(id, Formation::A, 1.0)).collect()
    }

    fn assert_round_robin(num_teams: usize, pairings: &[(usize, usize)]) {
        assert_eq!(num_teams * (num_teams - 1) / 2, pairings.len());
        let unique: HashSet<(usize, usize)> = pairings
            .iter()
            .map(|&(h, a)| (h.min(a), h.max(a)))
            .collect();
        assert_eq!(pairings.len(), unique.len());
        for &(h, a) in pairings {
            assert_ne!(h, a);
            assert!(h < num_teams && a < num_teams);
        }
    }

    #[test]
    fn test_group_of_four_order() {
        let teams = teams(4);
        let fixtures = FixtureScheduler::default().schedule(&teams).unwrap();

        let expected = [(0, 2), (3, 1), (1, 0), (2, 3), (1, 2), (0, 3)];
        assert_eq!(expected.len(), fixtures.len());
        for (idx, (game, (home, away))) in fixtures.iter().zip(expected).enumerate() {
            assert_eq!(MatchId(idx), game.id);
            assert_eq!(teams[home].id, game.home);
            assert_eq!(teams[away].id, game.away);
            assert!(!game.is_simulated);
            assert_eq!(Side::Home, game.holding);
            assert_eq!(teams[home].keeper().id, game.ball_holder);
            assert!(game.turns.is_empty());
        }
    }

    #[test]
    fn test_reverse_fixtures() {
        let pairings = FixtureScheduler::new(true).pairings(4).unwrap();
        assert_eq!(12, pairings.len());
        for idx in 0..6 {
            let (home, away) = pairings[idx];
            assert_eq!((away, home), pairings[idx + 6]);
        }
    }

    #[test]
    fn test_other_group_sizes() {
        let scheduler = FixtureScheduler::default();
        for n in [2, 3, 5, 6, 7, 8] {
            assert_round_robin(n, &scheduler.pairings(n).unwrap());
        }
        assert_round_robin(4, &scheduler.pairings(4).unwrap());
    }

    #[test]
    fn test_every_round_has_everyone_once() {
        // Six teams means five rounds of three matches each.
        let pairings = FixtureScheduler::default().pairings(6).unwrap();
        for round in pairings.chunks(3) {
            let playing: HashSet<usize> = round.iter().flat_map(|&(h, a)| [h, a]).collect();
            assert_eq!(6, playing.len());
        }
    }

    #[test]
    fn test_not_enough_teams() {
        let scheduler = FixtureScheduler::default();
        assert_eq!(
            Err(SimulationError::NotEnoughTeams(1)),
            scheduler.pairings(1)
        );
        assert_eq!(
            Some(SimulationError::NotEnoughTeams(0)),
            scheduler.schedule(&[]).err()
        );
    }
}
