use crate::core::Team;

use super::{
    errors::SimulationError,
    game::{Match, MatchId},
    historian::Historian,
    simulation::{DEFAULT_TURN_BUDGET, MatchSimulation},
};

/// # MatchSimulationBuilder
///
/// `MatchSimulationBuilder` is a builder to allow for complex
/// configurations of a single match. Both teams are required, other
/// fields are optional.
///
/// ## Setters
///
/// Each setter will set the optional value to the passed in value. Then
/// return the mutated builder.
///
/// If no match is given a fresh one with id 0 is created between the two
/// teams. If one is given it has to be between the same two teams.
///
/// ## Examples
///
/// ```
/// use group_stage::arena::MatchSimulationBuilder;
/// use group_stage::arena::competition::{GenerationContext, TeamFactory};
/// use rand::{SeedableRng, rngs::StdRng};
///
/// let mut rng = StdRng::seed_from_u64(420);
/// let mut ctx = GenerationContext::default();
/// let factory = TeamFactory::default();
/// let home = factory.create(&mut ctx, &mut rng).unwrap();
/// let away = factory.create(&mut ctx, &mut rng).unwrap();
///
/// let mut sim = MatchSimulationBuilder::default()
///     .home(&home)
///     .away(&away)
///     .turn_budget(20)
///     .build()
///     .unwrap();
/// sim.run(&mut rng).unwrap();
/// assert_eq!(20, sim.game.turns.len());
/// ```
pub struct MatchSimulationBuilder<'a> {
    game: Option<Match>,
    home: Option<&'a Team>,
    away: Option<&'a Team>,
    turn_budget: Option<usize>,
    historians: Vec<Box<dyn Historian>>,
    panic_on_historian_error: bool,
}

impl<'a> MatchSimulationBuilder<'a> {
    /// Set the match to advance. Useful when the match
    /// is one of a list of fixtures.
    pub fn game(mut self, game: Match) -> Self {
        self.game = Some(game);
        self
    }

    pub fn home(mut self, home: &'a Team) -> Self {
        self.home = Some(home);
        self
    }

    pub fn away(mut self, away: &'a Team) -> Self {
        self.away = Some(away);
        self
    }

    /// Set the number of turns. Half time comes after half of them.
    pub fn turn_budget(mut self, turn_budget: usize) -> Self {
        self.turn_budget = Some(turn_budget);
        self
    }

    /// Set the historians for the simulation created by this builder.
    pub fn historians(mut self, historians: Vec<Box<dyn Historian>>) -> Self {
        self.historians = historians;
        self
    }

    /// Should the simulation panic if a historian errors.
    /// Default is false.
    pub fn panic_on_historian_error(mut self, panic_on_historian_error: bool) -> Self {
        self.panic_on_historian_error = panic_on_historian_error;
        self
    }

    /// Given the fields already specified build any that are not specified
    /// and create a new `MatchSimulation`.
    ///
    /// @returns `SimulationError::NeedTeams` if either team is missing,
    /// `SimulationError::TeamMismatch` if the match is between other teams.
    pub fn build(self) -> Result<MatchSimulation<'a>, SimulationError> {
        let home = self.home.ok_or(SimulationError::NeedTeams)?;
        let away = self.away.ok_or(SimulationError::NeedTeams)?;

        let game = self
            .game
            .unwrap_or_else(|| Match::new(MatchId(0), home, away));
        if game.home != home.id || game.away != away.id {
            return Err(SimulationError::TeamMismatch(game.id));
        }

        Ok(MatchSimulation {
            game,
            home,
            away,
            turn_budget: self.turn_budget.unwrap_or(DEFAULT_TURN_BUDGET),
            historians: self.historians,
            panic_on_historian_error: self.panic_on_historian_error,
        })
    }
}

impl Default for MatchSimulationBuilder<'_> {
    fn default() -> Self {
        Self {
            game: None,
            home: None,
            away: None,
            turn_budget: None,
            historians: vec![],
            panic_on_historian_error: false,
        }
    }
}
