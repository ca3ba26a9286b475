//! This is the arena module where matches get played.
//!
//! # Single Match
//!
//! The tools allow explicit control over a single match
//! all the way down to the source of randomness.
//!
//! ## Single Match Example
//!
//! ```
//! use group_stage::arena::MatchSimulationBuilder;
//! use group_stage::arena::competition::{GenerationContext, TeamFactory};
//! use rand::{SeedableRng, rngs::StdRng};
//!
//! let mut rng = StdRng::seed_from_u64(420);
//! let mut ctx = GenerationContext::default();
//! let factory = TeamFactory::default();
//! let home = factory.create(&mut ctx, &mut rng).unwrap();
//! let away = factory.create(&mut ctx, &mut rng).unwrap();
//!
//! let mut sim = MatchSimulationBuilder::default()
//!     .home(&home)
//!     .away(&away)
//!     .build()
//!     .unwrap();
//! sim.run(&mut rng).unwrap();
//!
//! println!("{}", sim.game);
//! ```
//!
//! # Group Stage Example
//!
//! A whole group: four generated teams that all play each
//! other once, with the table at the end.
//!
//! ```
//! use group_stage::arena::competition::GroupStage;
//! use rand::{SeedableRng, rngs::StdRng};
//!
//! let mut rng = StdRng::seed_from_u64(420);
//! let mut stage = GroupStage::generate(&mut rng).unwrap();
//! stage.simulate_all(&mut rng).unwrap();
//!
//! for (place, team) in stage.standings().iter().enumerate() {
//!     println!("{}. {} {} pts", place + 1, team, team.record().points);
//! }
//! ```
//!
//! # Watching a match
//!
//! Historians get every turn as it is played. A `VecHistorian` keeps them
//! all so a match can be played back one turn at a time.
//!
//! ```
//! use group_stage::arena::MatchSimulationBuilder;
//! use group_stage::arena::competition::{GenerationContext, TeamFactory};
//! use group_stage::arena::historian::VecHistorian;
//! use rand::{SeedableRng, rngs::StdRng};
//!
//! let mut rng = StdRng::seed_from_u64(7);
//! let mut ctx = GenerationContext::default();
//! let factory = TeamFactory::default();
//! let home = factory.create(&mut ctx, &mut rng).unwrap();
//! let away = factory.create(&mut ctx, &mut rng).unwrap();
//!
//! let records = VecHistorian::new_storage();
//! let mut sim = MatchSimulationBuilder::default()
//!     .home(&home)
//!     .away(&away)
//!     .historians(vec![Box::new(VecHistorian::new(records.clone()))])
//!     .build()
//!     .unwrap();
//! sim.run(&mut rng).unwrap();
//!
//! assert_eq!(40, records.borrow().len());
//! ```
pub mod competition;
pub mod errors;
pub mod game;
pub mod historian;
pub mod sim_builder;
pub mod simulation;

#[cfg(any(test, feature = "arena-test-util"))]
pub mod test_util;

pub use errors::SimulationError;
pub use game::{Match, MatchId, Outcome, Side, Turn, TurnKind};
pub use historian::{CloneHistorianGenerator, Historian, HistorianError, HistorianGenerator};
pub use sim_builder::MatchSimulationBuilder;
pub use simulation::{DEFAULT_TURN_BUDGET, MatchSimulation};
