use std::collections::HashSet;

use tracing::{event, trace_span};

use crate::arena::{
    MatchSimulationBuilder,
    errors::SimulationError,
    game::{Match, MatchId, Side},
    historian::HistorianGenerator,
    simulation::DEFAULT_TURN_BUDGET,
};
use crate::core::{GroupStageError, NameGenerator, Player, RandomSource, Team, TeamId};

use super::fixtures::{FixtureScheduler, GROUP_SIZE};
use super::generators::{GenerationContext, TeamFactory};
use super::standings;

type MatchListener = Box<dyn FnMut(MatchId)>;

/// This builder is used to create a `GroupStage`.
///
/// Without any configuration it generates a group of four random teams
/// that play each other once over 40 turns per match.
#[derive(Default)]
pub struct GroupStageBuilder {
    num_teams: Option<usize>,
    turn_budget: Option<usize>,
    reverse_fixtures: bool,
    team_factory: Option<TeamFactory>,
    name_generator: Option<NameGenerator>,
    teams: Option<Vec<Team>>,
    historian_generators: Option<Vec<Box<dyn HistorianGenerator>>>,
    panic_on_historian_error: bool,
}

impl GroupStageBuilder {
    /// How many teams to generate. Ignored when the teams are given.
    pub fn num_teams(mut self, num_teams: usize) -> Self {
        self.num_teams = Some(num_teams);
        self
    }

    /// Turns per match.
    pub fn turn_budget(mut self, turn_budget: usize) -> Self {
        self.turn_budget = Some(turn_budget);
        self
    }

    /// Play every pairing twice, once at each team's home.
    pub fn reverse_fixtures(mut self, reverse_fixtures: bool) -> Self {
        self.reverse_fixtures = reverse_fixtures;
        self
    }

    pub fn team_factory(mut self, team_factory: TeamFactory) -> Self {
        self.team_factory = Some(team_factory);
        self
    }

    /// Set where names come from. Handy to use other name pools.
    pub fn name_generator(mut self, name_generator: NameGenerator) -> Self {
        self.name_generator = Some(name_generator);
        self
    }

    /// Use these teams instead of generating any.
    pub fn teams(mut self, teams: Vec<Team>) -> Self {
        self.teams = Some(teams);
        self
    }

    /// Sets the historian generators. Each match simulated gets a fresh
    /// historian from every generator.
    pub fn historian_generators(
        mut self,
        historian_generators: Vec<Box<dyn HistorianGenerator>>,
    ) -> Self {
        self.historian_generators = Some(historian_generators);
        self
    }

    /// Sets whether the underlying `MatchSimulation` should panic if a
    /// historian errors.
    pub fn panic_on_historian_error(mut self, panic_on_historian_error: bool) -> Self {
        self.panic_on_historian_error = panic_on_historian_error;
        self
    }

    /// Generate the teams (unless given) and schedule the fixtures.
    pub fn build<R: RandomSource + ?Sized>(
        self,
        rng: &mut R,
    ) -> Result<GroupStage, SimulationError> {
        let span = trace_span!("GroupStageBuilder::build");
        let _enter = span.enter();

        let teams = match self.teams {
            Some(teams) => teams,
            None => {
                let factory = self.team_factory.unwrap_or_default();
                let mut ctx = GenerationContext::new(self.name_generator.unwrap_or_default());
                let num_teams = self.num_teams.unwrap_or(GROUP_SIZE);
                if num_teams < 2 {
                    return Err(SimulationError::NotEnoughTeams(num_teams));
                }
                (0..num_teams)
                    .map(|_| factory.create(&mut ctx, rng))
                    .collect::<Result<Vec<_>, _>>()?
            }
        };
        check_unique(&teams)?;

        for team in &teams {
            event!(
                tracing::Level::INFO,
                "{} lines up {} with power {}",
                team,
                team.formation,
                team.power()
            );
        }

        let fixtures = FixtureScheduler::new(self.reverse_fixtures).schedule(&teams)?;

        Ok(GroupStage {
            teams,
            fixtures,
            turn_budget: self.turn_budget.unwrap_or(DEFAULT_TURN_BUDGET),
            historian_generators: self.historian_generators.unwrap_or_default(),
            panic_on_historian_error: self.panic_on_historian_error,
            listeners: vec![],
        })
    }
}

/// Team ids, team names and player ids have to be unique across the group,
/// otherwise results and goals would be credited to the wrong team.
fn check_unique(teams: &[Team]) -> Result<(), GroupStageError> {
    let mut team_ids = HashSet::new();
    let mut names = HashSet::new();
    let mut player_ids = HashSet::new();
    for team in teams {
        if !team_ids.insert(team.id) {
            return Err(GroupStageError::DuplicateTeamId(team.id));
        }
        if !names.insert(team.name.as_str()) {
            return Err(GroupStageError::DuplicateTeamName(team.name.clone()));
        }
        if let Some(player) = team.players().iter().find(|p| !player_ids.insert(p.id)) {
            return Err(GroupStageError::DuplicatePlayerId(player.id));
        }
    }
    Ok(())
}

/// A group of teams that all play each other.
///
/// The group stage owns the teams and the fixtures. Simulating a match
/// through it is the only way a team's record or a player's goal count
/// changes.
pub struct GroupStage {
    teams: Vec<Team>,
    fixtures: Vec<Match>,
    turn_budget: usize,
    historian_generators: Vec<Box<dyn HistorianGenerator>>,
    panic_on_historian_error: bool,
    listeners: Vec<MatchListener>,
}

impl GroupStage {
    /// A randomly generated group of four with the default settings.
    pub fn generate<R: RandomSource + ?Sized>(rng: &mut R) -> Result<Self, SimulationError> {
        GroupStageBuilder::default().build(rng)
    }

    pub fn teams(&self) -> &[Team] {
        &self.teams
    }

    pub fn team(&self, id: TeamId) -> Option<&Team> {
        self.teams.iter().find(|t| t.id == id)
    }

    pub fn fixtures(&self) -> &[Match] {
        &self.fixtures
    }

    pub fn fixture(&self, id: MatchId) -> Option<&Match> {
        self.fixtures.get(id.0)
    }

    pub fn turn_budget(&self) -> usize {
        self.turn_budget
    }

    /// Have all the fixtures been played.
    pub fn is_complete(&self) -> bool {
        self.fixtures.iter().all(|m| m.is_simulated)
    }

    /// Call `listener` every time a match result has been applied.
    pub fn on_match_simulated<F: FnMut(MatchId) + 'static>(&mut self, listener: F) {
        self.listeners.push(Box::new(listener));
    }

    /// Play a match and apply the result to both teams.
    ///
    /// A match can only be played once, asking for it again is
    /// `SimulationError::AlreadySimulated`.
    pub fn simulate<R: RandomSource + ?Sized>(
        &mut self,
        id: MatchId,
        rng: &mut R,
    ) -> Result<&Match, SimulationError> {
        let span = trace_span!("GroupStage::simulate", id = id.0);
        let _enter = span.enter();

        let fixture = self
            .fixtures
            .get(id.0)
            .ok_or(SimulationError::UnknownMatch(id))?;
        if fixture.is_simulated {
            return Err(SimulationError::AlreadySimulated(id));
        }

        let home_idx = self.team_index(fixture.home)?;
        let away_idx = self.team_index(fixture.away)?;

        let historians = self
            .historian_generators
            .iter()
            .map(|generator| generator.generate(fixture))
            .collect::<Vec<_>>();
        let mut sim = MatchSimulationBuilder::default()
            .game(fixture.clone())
            .home(&self.teams[home_idx])
            .away(&self.teams[away_idx])
            .turn_budget(self.turn_budget)
            .historians(historians)
            .panic_on_historian_error(self.panic_on_historian_error)
            .build()?;
        sim.run(rng)?;
        let game = sim.into_game();

        self.apply_result(&game, home_idx, away_idx);
        self.fixtures[id.0] = game;

        for listener in self.listeners.iter_mut() {
            listener(id);
        }
        Ok(&self.fixtures[id.0])
    }

    /// Play every fixture that hasn't been played yet, in order.
    pub fn simulate_all<R: RandomSource + ?Sized>(
        &mut self,
        rng: &mut R,
    ) -> Result<(), SimulationError> {
        for idx in 0..self.fixtures.len() {
            if !self.fixtures[idx].is_simulated {
                self.simulate(MatchId(idx), rng)?;
            }
        }
        Ok(())
    }

    /// The teams in table order.
    pub fn standings(&self) -> Vec<&Team> {
        standings::rank(&self.teams)
    }

    /// The score of a match after the turn at `turn_index`.
    pub fn goals_through(
        &self,
        id: MatchId,
        turn_index: usize,
    ) -> Result<(u32, u32), SimulationError> {
        let game = self.fixture(id).ok_or(SimulationError::UnknownMatch(id))?;
        let home = self
            .team(game.home)
            .ok_or(SimulationError::UnknownTeam(game.home))?;
        standings::goals_through(game, home, turn_index)
    }

    pub fn top_scorers(&self, limit: usize) -> Vec<(&Team, &Player)> {
        standings::top_scorers(&self.teams, limit)
    }

    fn team_index(&self, id: TeamId) -> Result<usize, SimulationError> {
        self.teams
            .iter()
            .position(|t| t.id == id)
            .ok_or(SimulationError::UnknownTeam(id))
    }

    fn apply_result(&mut self, game: &Match, home_idx: usize, away_idx: usize) {
        for (side, idx) in [(Side::Home, home_idx), (Side::Away, away_idx)] {
            let goals_for = game.goals(side);
            let goals_against = game.goals(side.opponent());
            let team = &mut self.teams[idx];
            let points = team.record.record(goals_for, goals_against);
            event!(
                tracing::Level::INFO,
                "{} gets {} points from {}",
                team,
                points,
                game
            );
        }

        for turn in game.goal_turns() {
            let credited = self.teams[home_idx].credit_goals(turn.from, 1)
                || self.teams[away_idx].credit_goals(turn.from, 1);
            if !credited {
                event!(
                    tracing::Level::WARN,
                    "Scorer {} of match {} plays for neither team",
                    turn.from,
                    game.id
                );
            }
        }
    }
}

#[cfg(feature = "serde")]
#[derive(serde::Serialize)]
struct GroupStageExport<'a> {
    teams: &'a [Team],
    fixtures: &'a [Match],
    standings: Vec<TeamId>,
}

#[cfg(feature = "serde")]
impl GroupStage {
    /// Everything about the group stage as pretty printed JSON:
    /// teams with their players and records, the fixtures with every
    /// turn played and the table as a list of team ids.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        let export = GroupStageExport {
            teams: &self.teams,
            fixtures: &self.fixtures,
            standings: self.standings().iter().map(|t| t.id).collect(),
        };
        serde_json::to_string_pretty(&export)
    }
}

#[cfg(test)]
mod tests {
    use std::{cell::RefCell, collections::HashSet, rc::Rc};

    use rand::{SeedableRng, rngs::StdRng};

    use crate::arena::historian::{CloneHistorianGenerator, VecHistorian};
    use crate::arena::test_util::{assert_valid_match, build_team};
    use crate::core::{Formation, PlayerId, ScriptedRandom, TEAM_SIZE, TeamRecord};

    use super::*;

    fn played_stage(seed: u64) -> GroupStage {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut stage = GroupStage::generate(&mut rng).unwrap();
        stage.simulate_all(&mut rng).unwrap();
        stage
    }

    #[test_log::test]
    fn test_generated_group() {
        let mut rng = StdRng::seed_from_u64(420);
        let stage = GroupStage::generate(&mut rng).unwrap();

        assert_eq!(GROUP_SIZE, stage.teams().len());
        assert_eq!(6, stage.fixtures().len());
        assert!(!stage.is_complete());

        let names: HashSet<&str> = stage.teams().iter().map(|t| t.name.as_str()).collect();
        assert_eq!(GROUP_SIZE, names.len());
        let player_names: HashSet<String> = stage
            .teams()
            .iter()
            .flat_map(|t| t.players().iter().map(Player::full_name))
            .collect();
        assert_eq!(GROUP_SIZE * TEAM_SIZE, player_names.len());
    }

    #[test_log::test]
    fn test_full_group_stage() {
        let stage = played_stage(420);
        assert!(stage.is_complete());

        for game in stage.fixtures() {
            let home = stage.team(game.home).unwrap();
            let away = stage.team(game.away).unwrap();
            assert_valid_match(game, home, away, DEFAULT_TURN_BUDGET);
        }

        // Everyone played three times, six matches with two teams each.
        let played: u32 = stage.teams().iter().map(|t| t.record().played).sum();
        assert_eq!(12, played);
        for team in stage.teams() {
            assert_eq!(3, team.record().played);
        }

        // A win hands out three points, a draw two.
        let points: u32 = stage.teams().iter().map(|t| t.record().points).sum();
        let draws = stage
            .fixtures()
            .iter()
            .filter(|m| m.goals_home == m.goals_away)
            .count() as u32;
        assert_eq!(3 * 6 - draws, points);

        // Goals credited to players add up to all goals scored.
        let scored: u32 = stage.fixtures().iter().map(|m| m.goals_home + m.goals_away).sum();
        let credited: u32 = stage
            .teams()
            .iter()
            .flat_map(|t| t.players().iter().map(|p| p.goals()))
            .sum();
        assert_eq!(scored, credited);
        let goals_for: u32 = stage.teams().iter().map(|t| t.record().goals_for).sum();
        assert_eq!(scored, goals_for);

        // The table is sorted.
        let table = stage.standings();
        for pair in table.windows(2) {
            assert!(pair[0].record().points >= pair[1].record().points);
        }
    }

    #[test]
    fn test_same_seed_same_group_stage() {
        let a = played_stage(7);
        let b = played_stage(7);
        assert_eq!(a.teams(), b.teams());
        assert_eq!(a.fixtures(), b.fixtures());
    }

    #[test]
    fn test_simulate_twice() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut stage = GroupStage::generate(&mut rng).unwrap();
        stage.simulate(MatchId(2), &mut rng).unwrap();
        let records: Vec<_> = stage.teams().iter().map(|t| *t.record()).collect();

        assert_eq!(
            Some(SimulationError::AlreadySimulated(MatchId(2))),
            stage.simulate(MatchId(2), &mut rng).err()
        );
        // Nothing was counted twice
        let after: Vec<_> = stage.teams().iter().map(|t| *t.record()).collect();
        assert_eq!(records, after);

        assert_eq!(
            Some(SimulationError::UnknownMatch(MatchId(6))),
            stage.simulate(MatchId(6), &mut rng).err()
        );
    }

    #[test]
    fn test_listener_fires_per_match() {
        let seen = Rc::new(RefCell::new(vec![]));
        let mut rng = StdRng::seed_from_u64(3);
        let mut stage = GroupStage::generate(&mut rng).unwrap();

        let listener_seen = seen.clone();
        stage.on_match_simulated(move |id| listener_seen.borrow_mut().push(id));
        stage.simulate_all(&mut rng).unwrap();

        let expected: Vec<MatchId> = (0..6).map(MatchId).collect();
        assert_eq!(expected, *seen.borrow());
    }

    /// A script of lowest draws with a few high ones. With eleven turns
    /// and all lowest draws a match goes 2-1, the shot draws are at 5, 16
    /// and 22. Drawing high there misses.
    fn script(misses: &[usize]) -> ScriptedRandom {
        let mut script = vec![0.0; 24];
        for &idx in misses {
            script[idx] = 0.999;
        }
        ScriptedRandom::new(script)
    }

    #[test_log::test]
    fn test_scripted_group_stage() {
        let teams = (0..4)
            .map(|id| build_team(id, Formation::A, 1.0))
            .collect();
        let mut stage = GroupStageBuilder::default()
            .teams(teams)
            .turn_budget(11)
            .build(&mut ScriptedRandom::default())
            .unwrap();

        let scripts: [&[usize]; 6] = [&[16], &[16], &[22], &[5, 21], &[], &[5, 21]];
        let mut scores = vec![];
        for (idx, misses) in scripts.into_iter().enumerate() {
            let game = stage.simulate(MatchId(idx), &mut script(misses)).unwrap();
            scores.push((game.home, game.goals_home, game.goals_away, game.away));
        }
        assert_eq!(
            vec![
                (TeamId(0), 1, 0, TeamId(2)),
                (TeamId(3), 1, 0, TeamId(1)),
                (TeamId(1), 1, 1, TeamId(0)),
                (TeamId(2), 0, 1, TeamId(3)),
                (TeamId(1), 2, 1, TeamId(2)),
                (TeamId(0), 0, 1, TeamId(3)),
            ],
            scores
        );

        // Team 1 and team 0 are level on points and goal difference,
        // team 1 scored more.
        let table: Vec<TeamId> = stage.standings().iter().map(|t| t.id).collect();
        assert_eq!(vec![TeamId(3), TeamId(1), TeamId(0), TeamId(2)], table);

        let record = |id| *stage.team(TeamId(id)).unwrap().record();
        let expected = [(3, 9, 3, 0), (1, 4, 3, 3), (0, 4, 2, 2), (2, 0, 1, 4)];
        for (id, points, goals_for, goals_against) in expected {
            assert_eq!(
                TeamRecord {
                    played: 3,
                    points,
                    goals_for,
                    goals_against,
                },
                record(id)
            );
        }

        // The first forward of each team scored all its goals.
        let scorers: Vec<(PlayerId, u32)> = stage
            .top_scorers(10)
            .into_iter()
            .map(|(_, player)| (player.id, player.goals()))
            .collect();
        assert_eq!(
            vec![
                (PlayerId(100), 3),
                (PlayerId(300), 3),
                (PlayerId(0), 2),
                (PlayerId(200), 1)
            ],
            scorers
        );

        assert_eq!(Ok((0, 0)), stage.goals_through(MatchId(4), 1));
        assert_eq!(Ok((1, 0)), stage.goals_through(MatchId(4), 2));
        assert_eq!(Ok((1, 0)), stage.goals_through(MatchId(4), 6));
        assert_eq!(Ok((1, 1)), stage.goals_through(MatchId(4), 7));
        assert_eq!(Ok((2, 1)), stage.goals_through(MatchId(4), 10));
        assert_eq!(
            Err(SimulationError::TurnOutOfRange { index: 11, len: 11 }),
            stage.goals_through(MatchId(4), 11)
        );
    }

    #[test]
    fn test_duplicate_team_ids() {
        let teams = vec![
            build_team(0, Formation::A, 1.0),
            build_team(1, Formation::A, 1.0),
            build_team(0, Formation::B, 1.0),
            build_team(3, Formation::A, 1.0),
        ];
        let result = GroupStageBuilder::default()
            .teams(teams)
            .build(&mut StdRng::seed_from_u64(1));
        assert_eq!(
            Some(SimulationError::Setup(GroupStageError::DuplicateTeamId(
                TeamId(0)
            ))),
            result.err()
        );
    }

    #[test]
    fn test_duplicate_team_names() {
        let mut copy = build_team(1, Formation::A, 1.0);
        copy.name = "Team 0".to_string();
        let teams = vec![build_team(0, Formation::A, 1.0), copy];
        let result = GroupStageBuilder::default()
            .teams(teams)
            .build(&mut StdRng::seed_from_u64(1));
        assert_eq!(
            Some(SimulationError::Setup(GroupStageError::DuplicateTeamName(
                "Team 0".to_string()
            ))),
            result.err()
        );
    }

    #[test]
    fn test_duplicate_player_ids() {
        let first = build_team(0, Formation::A, 1.0);
        let copy = Team::new(
            TeamId(1),
            "Copycats".to_string(),
            first.formation,
            first.players().to_vec(),
        )
        .unwrap();
        let teams = vec![first, build_team(2, Formation::C, 1.0), copy];
        let result = GroupStageBuilder::default()
            .teams(teams)
            .build(&mut StdRng::seed_from_u64(1));
        assert_eq!(
            Some(SimulationError::Setup(GroupStageError::DuplicatePlayerId(
                PlayerId(0)
            ))),
            result.err()
        );
    }

    #[test]
    fn test_distinct_teams_are_accepted() {
        let teams = (0..4)
            .map(|id| build_team(id, Formation::B, 1.0))
            .collect();
        let stage = GroupStageBuilder::default()
            .teams(teams)
            .build(&mut StdRng::seed_from_u64(1))
            .unwrap();
        assert_eq!(6, stage.fixtures().len());
    }

    #[test]
    fn test_zero_turn_budget() {
        let mut rng = StdRng::seed_from_u64(5);
        let mut stage = GroupStageBuilder::default()
            .turn_budget(0)
            .build(&mut rng)
            .unwrap();
        stage.simulate_all(&mut rng).unwrap();

        for team in stage.teams() {
            assert_eq!(3, team.record().points);
        }
        assert!(stage.fixtures().iter().all(|m| m.turns.is_empty()));
    }

    #[test]
    fn test_reverse_fixtures_and_bigger_groups() {
        let mut rng = StdRng::seed_from_u64(9);
        let mut stage = GroupStageBuilder::default()
            .num_teams(5)
            .reverse_fixtures(true)
            .turn_budget(10)
            .build(&mut rng)
            .unwrap();
        assert_eq!(20, stage.fixtures().len());

        stage.simulate_all(&mut rng).unwrap();
        for team in stage.teams() {
            assert_eq!(8, team.record().played);
        }
    }

    #[test]
    fn test_not_enough_teams() {
        let mut rng = StdRng::seed_from_u64(9);
        let result = GroupStageBuilder::default().num_teams(1).build(&mut rng);
        assert_eq!(Some(SimulationError::NotEnoughTeams(1)), result.err());
    }

    #[test]
    fn test_historians_per_match() {
        let records = VecHistorian::new_storage();
        let generator = CloneHistorianGenerator::new(VecHistorian::new(records.clone()));
        let mut rng = StdRng::seed_from_u64(11);
        let mut stage = GroupStageBuilder::default()
            .turn_budget(10)
            .historian_generators(vec![Box::new(generator)])
            .build(&mut rng)
            .unwrap();
        stage.simulate_all(&mut rng).unwrap();

        let records = records.borrow();
        assert_eq!(60, records.len());
        for (idx, record) in records.iter().enumerate() {
            assert_eq!(MatchId(idx / 10), record.id);
        }
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_to_json() {
        let stage = played_stage(13);
        let json = stage.to_json().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(4, value["teams"].as_array().unwrap().len());
        assert_eq!(6, value["fixtures"].as_array().unwrap().len());
        assert_eq!(4, value["standings"].as_array().unwrap().len());
        assert_eq!(40, value["fixtures"][0]["turns"].as_array().unwrap().len());
    }
}
