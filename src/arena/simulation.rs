use std::fmt;

use tracing::{event, trace_span};

use crate::core::{Line, Player, RandomSource, Team};

use super::errors::SimulationError;
use super::game::{Match, Side, Turn};
use super::historian::Historian;

/// Turns in a match unless configured otherwise.
pub const DEFAULT_TURN_BUDGET: usize = 40;

/// Goal chance in percent for an even duel between forward and keeper.
const BASE_GOAL_CHANCE: f64 = 60.0;
/// Goal chance gained for every point of power the forward has over the keeper.
const GOAL_CHANCE_PER_POWER: f64 = 1.5;
const MIN_GOAL_CHANCE: f64 = 10.0;
const MAX_GOAL_CHANCE: f64 = 95.0;

/// Every teammate starts with this many points when picking who to pass to.
const BASE_PASS_POINTS: f64 = 100.0;
/// Points for each power point a teammate has over the weakest option.
const PASS_POINTS_PER_POWER: f64 = 2.5;
/// Points lost for each line between passer and receiver.
const PASS_POINTS_PER_LINE: f64 = 7.5;

/// Nobody contests a pass with less than this.
const MIN_CONTEST_WEIGHT: f64 = 10.0;
/// Share of power lost for every column away from the receiver.
const CONTEST_FALLOFF_PER_COLUMN: f64 = 0.1;
/// Share of power a contender always keeps, however far away.
const MIN_CONTEST_SHARE: f64 = 0.1;

/// Percent chance a shot from `shooter_power` beats a keeper of
/// `keeper_power`.
pub fn goal_chance(shooter_power: i32, keeper_power: i32) -> f64 {
    let difference = f64::from(shooter_power - keeper_power);
    (BASE_GOAL_CHANCE + difference * GOAL_CHANCE_PER_POWER).clamp(MIN_GOAL_CHANCE, MAX_GOAL_CHANCE)
}

/// How strongly a player takes part in the fight for a pass. Full power
/// when standing in the receiver's column, 10% less for each column away.
pub fn contest_weight(power: i32, column_distance: u8) -> f64 {
    let share =
        (1.0 - f64::from(column_distance) * CONTEST_FALLOFF_PER_COLUMN).max(MIN_CONTEST_SHARE);
    (f64::from(power) * share).max(MIN_CONTEST_WEIGHT)
}

/// Pick an index with probability proportional to its weight.
fn weighted_index<R: RandomSource + ?Sized>(weights: &[f64], rng: &mut R) -> usize {
    let total: f64 = weights.iter().sum();
    let draw = rng.uniform_real(0.0, total);

    let mut checked = 0.0;
    for (idx, weight) in weights.iter().enumerate() {
        checked += weight;
        if draw < checked {
            return idx;
        }
    }
    // Only reachable through float rounding at the very top.
    weights.len() - 1
}

/// A single match being played out turn by turn.
///
/// The simulation borrows both teams for their squads and owns the
/// `Match` it is advancing. Nothing on the teams is changed here;
/// applying the result to the season records is left to the owner of the
/// teams (see `GroupStage::simulate`).
pub struct MatchSimulation<'a> {
    pub game: Match,
    pub(crate) home: &'a Team,
    pub(crate) away: &'a Team,
    pub(crate) turn_budget: usize,
    pub(crate) historians: Vec<Box<dyn Historian>>,
    pub(crate) panic_on_historian_error: bool,
}

impl<'a> MatchSimulation<'a> {
    pub fn turn_budget(&self) -> usize {
        self.turn_budget
    }

    pub fn more_turns(&self) -> bool {
        !self.game.is_simulated
    }

    /// Play the match to the end. Running a match that is already
    /// simulated does nothing.
    pub fn run<R: RandomSource + ?Sized>(&mut self, rng: &mut R) -> Result<(), SimulationError> {
        let span = trace_span!("MatchSimulation::run", id = self.game.id.0);
        let _enter = span.enter();

        while self.more_turns() {
            self.step(rng)?;
        }
        Ok(())
    }

    /// Play a single turn, or finish the match if the budget is used up.
    pub fn step<R: RandomSource + ?Sized>(&mut self, rng: &mut R) -> Result<(), SimulationError> {
        if self.game.is_simulated {
            return Ok(());
        }

        if self.game.turns.len() < self.turn_budget {
            self.kick_off_if_needed(rng)?;

            let holder = self.holder()?;
            let turn = if holder.line() == Line::Forward {
                self.shoot(holder, rng)
            } else {
                self.pass(holder, rng)?
            };
            self.record_turn(turn);
        }

        if self.game.turns.len() >= self.turn_budget {
            self.complete();
        }
        Ok(())
    }

    pub fn into_game(self) -> Match {
        self.game
    }

    fn team(&self, side: Side) -> &'a Team {
        match side {
            Side::Home => self.home,
            Side::Away => self.away,
        }
    }

    fn holder(&self) -> Result<&'a Player, SimulationError> {
        let id = self.game.ball_holder;
        self.team(self.game.holding)
            .player(id)
            .ok_or(SimulationError::UnknownPlayer(id))
    }

    /// The home side starts the first half and the away side the
    /// second, both from one of their defenders.
    fn kick_off_if_needed<R: RandomSource + ?Sized>(
        &mut self,
        rng: &mut R,
    ) -> Result<(), SimulationError> {
        let played = self.game.turns.len();
        let side = if played == 0 {
            Side::Home
        } else if played == self.turn_budget / 2 {
            Side::Away
        } else {
            return Ok(());
        };

        let defender = self.random_defender(side, rng)?;
        event!(
            tracing::Level::DEBUG,
            "Kick off for {}, {} has the ball",
            self.team(side),
            defender
        );
        self.game.holding = side;
        self.game.ball_holder = defender.id;
        Ok(())
    }

    fn random_defender<R: RandomSource + ?Sized>(
        &self,
        side: Side,
        rng: &mut R,
    ) -> Result<&'a Player, SimulationError> {
        let team = self.team(side);
        let defenders: Vec<&'a Player> = team.on_line(Line::Defender).collect();
        if defenders.is_empty() {
            return Err(SimulationError::NoPassTarget(team.keeper().id));
        }
        Ok(defenders[rng.choose_index(defenders.len())])
    }

    fn shoot<R: RandomSource + ?Sized>(&mut self, shooter: &'a Player, rng: &mut R) -> Turn {
        let attacking = self.game.holding;
        let defending = attacking.opponent();
        let keeper = self.team(defending).keeper();

        let chance = goal_chance(shooter.power(), keeper.power());
        let goal = rng.uniform_int(0, 100) < chance as i64;

        let receiver = if goal {
            self.game.add_goal(attacking);
            event!(
                tracing::Level::DEBUG,
                "{} scored! The score now stands {}-{}",
                shooter,
                self.game.goals_home,
                self.game.goals_away
            );
            // After a goal the defenders restart. There are
            // always defenders in a valid team, fall back to
            // the keeper all the same.
            self.random_defender(defending, rng).unwrap_or(keeper)
        } else {
            event!(tracing::Level::DEBUG, "{} misses!", shooter);
            keeper
        };

        self.game.holding = defending;
        self.game.ball_holder = receiver.id;
        Turn::shot(shooter.id, receiver.id, goal)
    }

    fn pass<R: RandomSource + ?Sized>(
        &mut self,
        holder: &'a Player,
        rng: &mut R,
    ) -> Result<Turn, SimulationError> {
        let attacking = self.game.holding;
        let teammates = self.team(attacking);
        let opponents = self.team(attacking.opponent());

        let target_line = holder
            .line()
            .ahead()
            .ok_or(SimulationError::NoPassTarget(holder.id))?;
        let candidates: Vec<&'a Player> = teammates.on_line(target_line).collect();
        if candidates.is_empty() {
            return Err(SimulationError::NoPassTarget(holder.id));
        }

        // Stronger teammates are more likely to be picked,
        // teammates further away less likely.
        let weakest = candidates.iter().map(|p| p.power()).min().unwrap_or_default();
        let pass_weights: Vec<f64> = candidates
            .iter()
            .map(|p| {
                BASE_PASS_POINTS + f64::from(p.power() - weakest) * PASS_POINTS_PER_POWER
                    - f64::from(p.line().distance(holder.line())) * PASS_POINTS_PER_LINE
            })
            .collect();
        let receiver_idx = weighted_index(&pass_weights, rng);
        let receiver = candidates[receiver_idx];

        // The opponents standing in the same band of the pitch try to get
        // to the ball first. The receiver's teammates on that line help out.
        let contest_line = receiver
            .line()
            .opposing()
            .ok_or(SimulationError::NoContest(receiver.id))?;
        let enemies: Vec<&'a Player> = opponents.on_line(contest_line).collect();
        if enemies.is_empty() {
            return Err(SimulationError::NoContest(receiver.id));
        }

        let supporters = candidates
            .iter()
            .enumerate()
            .filter(|(idx, _)| *idx != receiver_idx)
            .map(|(_, p)| p);
        let mut contest_weights: Vec<f64> = std::iter::once(&receiver)
            .chain(supporters)
            .map(|p| contest_weight(p.power(), p.position.column_distance(&receiver.position)))
            .collect();
        let friendly_slices = contest_weights.len();
        contest_weights.extend(
            enemies
                .iter()
                .map(|p| contest_weight(p.power(), p.position.column_distance(&receiver.position))),
        );

        let winner = weighted_index(&contest_weights, rng);
        if winner < friendly_slices {
            event!(
                tracing::Level::DEBUG,
                "{} passed to {}!",
                holder,
                receiver
            );
            self.game.ball_holder = receiver.id;
            Ok(Turn::pass(holder.id, receiver.id))
        } else {
            let interceptor = enemies[rng.choose_index(enemies.len())];
            event!(
                tracing::Level::DEBUG,
                "{} intercepts the pass!",
                interceptor
            );
            self.game.holding = attacking.opponent();
            self.game.ball_holder = interceptor.id;
            Ok(Turn::interception(holder.id, interceptor.id))
        }
    }

    fn record_turn(&mut self, turn: Turn) {
        self.game.turns.push(turn);

        let id = self.game.id;
        let game = &self.game;
        let panic_on_historian_error = self.panic_on_historian_error;
        self.historians.retain_mut(|historian| {
            match historian.record_turn(id, game, &turn) {
                Ok(()) => true,
                Err(error) => {
                    if panic_on_historian_error {
                        panic!("Historian failed to record turn: {error}");
                    }
                    event!(
                        tracing::Level::WARN,
                        "Dropping historian that failed to record turn: {}",
                        error
                    );
                    false
                }
            }
        });
    }

    fn complete(&mut self) {
        self.game.is_simulated = true;
        event!(
            tracing::Level::INFO,
            "Match finished! {} {}-{} {}",
            self.home,
            self.game.goals_home,
            self.game.goals_away,
            self.away
        );

        let id = self.game.id;
        let game = &self.game;
        let panic_on_historian_error = self.panic_on_historian_error;
        self.historians.retain_mut(|historian| {
            match historian.record_complete(id, game) {
                Ok(()) => true,
                Err(error) => {
                    if panic_on_historian_error {
                        panic!("Historian failed to record match end: {error}");
                    }
                    event!(
                        tracing::Level::WARN,
                        "Dropping historian that failed to record match end: {}",
                        error
                    );
                    false
                }
            }
        });
    }
}

impl fmt::Debug for MatchSimulation<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MatchSimulation")
            .field("game", &self.game)
            .field("turn_budget", &self.turn_budget)
            .finish()
    }
}
