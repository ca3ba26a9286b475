use crate::arena::game::{Match, MatchId, Turn};

use super::{Historian, HistorianError};

/// A historian that hands every recorded turn to a function.
/// Useful for tests, debugging, or wiring a match up to
/// something that wants to show it as it happens.
#[derive(Debug, Clone)]
pub struct FnHistorian<F> {
    func: F,
}

impl<F: FnMut(MatchId, &Match, &Turn) -> Result<(), HistorianError>> FnHistorian<F> {
    /// Create a new `FnHistorian` with the provided function
    /// that will be called when a turn is recorded.
    pub fn new(f: F) -> Self {
        Self { func: f }
    }
}

impl<F: FnMut(MatchId, &Match, &Turn) -> Result<(), HistorianError>> Historian
    for FnHistorian<F>
{
    fn record_turn(
        &mut self,
        id: MatchId,
        game: &Match,
        turn: &Turn,
    ) -> Result<(), HistorianError> {
        (self.func)(id, game, turn)
    }
}
