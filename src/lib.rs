//! group_stage is a library to simulate a football group stage.
//! Teams and players are generated, every team plays every other
//! team and matches are played out one possession at a time.
//!
//! ```
//! use group_stage::arena::competition::GroupStage;
//! use rand::{SeedableRng, rngs::StdRng};
//!
//! let mut rng = StdRng::seed_from_u64(1);
//! let mut stage = GroupStage::generate(&mut rng).unwrap();
//! stage.simulate_all(&mut rng).unwrap();
//! assert!(stage.is_complete());
//! ```

/// Allow the data model to be used externally. Everything
/// in core is plain data and the rules for creating it.
pub mod core;
/// Allow the match simulation and the group stage to be
/// used externally.
pub mod arena;
