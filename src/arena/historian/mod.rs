use thiserror::Error;

use super::game::{Match, MatchId, Turn};

/// HistorianError is the error type for historian implementations.
#[derive(Error, Debug)]
pub enum HistorianError {
    #[error("Unable to record turn")]
    UnableToRecordTurn,
    #[error("Borrow Mut Error: {0}")]
    BorrowMutError(#[from] std::cell::BorrowMutError),
}

/// Historians are a way for the simulation to record or notify of
/// turns while the match is progressing. This is useful for
/// logging, debugging, or for playing a match back turn by turn.
pub trait Historian {
    /// This method is called by the simulation after a turn was appended.
    ///
    /// # Arguments
    /// - `id` - The id of the match the turn was played in.
    /// - `game` - The match after the turn was played
    /// - `turn` - The turn that was played
    ///
    /// # Returns
    /// - `Ok(())` if the turn was recorded successfully
    /// - `Err(HistorianError)` if there was an error recording the turn.
    ///
    /// Returning an error will cause the historian to be dropped from the
    /// `MatchSimulation`.
    fn record_turn(&mut self, id: MatchId, game: &Match, turn: &Turn)
    -> Result<(), HistorianError>;

    /// Called once when the turn budget is used up and the
    /// match is marked as simulated.
    fn record_complete(&mut self, _id: MatchId, _game: &Match) -> Result<(), HistorianError> {
        Ok(())
    }
}

/// HistorianGenerator is used by the group stage to create a
/// fresh historian for every match it simulates.
pub trait HistorianGenerator {
    fn generate(&self, game: &Match) -> Box<dyn Historian>;
}

/// Hands out clones of one historian. Historians that keep their
/// storage behind an `Rc` (like `VecHistorian`) share it this way.
pub struct CloneHistorianGenerator<T> {
    historian: T,
}

impl<T> CloneHistorianGenerator<T>
where
    T: Historian + Clone + 'static,
{
    pub fn new(historian: T) -> Self {
        Self { historian }
    }
}

impl<T> HistorianGenerator for CloneHistorianGenerator<T>
where
    T: Historian + Clone + 'static,
{
    fn generate(&self, _game: &Match) -> Box<dyn Historian> {
        Box::new(self.historian.clone())
    }
}

mod fn_historian;
mod vec;

pub use fn_historian::FnHistorian;
pub use vec::{HistoryRecord, VecHistorian};
