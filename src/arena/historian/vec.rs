use std::{cell::RefCell, rc::Rc};

use crate::arena::game::{Match, MatchId, Side, Turn};

use super::{Historian, HistorianError};

#[derive(Debug, Clone, PartialEq)]
pub struct HistoryRecord {
    pub id: MatchId,
    pub turn: Turn,
    /// Index of the turn within its match.
    pub index: usize,
    /// Side in possession after the turn.
    pub holding: Side,
    pub goals_home: u32,
    pub goals_away: u32,
}

/// VecHistorian is a historian that will
/// append each turn to a vector.
#[derive(Clone)]
pub struct VecHistorian {
    records: Rc<RefCell<Vec<HistoryRecord>>>,
}

impl VecHistorian {
    /// Create a new storage for the historian
    /// that can be introspected later.
    pub fn new_storage() -> Rc<RefCell<Vec<HistoryRecord>>> {
        Rc::new(RefCell::new(vec![]))
    }

    /// Create a new VecHistorian with the provided storage
    /// `Rc<RefCell<Vec<HistoryRecord>>>`
    pub fn new(records: Rc<RefCell<Vec<HistoryRecord>>>) -> Self {
        Self { records }
    }
}

impl Historian for VecHistorian {
    fn record_turn(
        &mut self,
        id: MatchId,
        game: &Match,
        turn: &Turn,
    ) -> Result<(), HistorianError> {
        let mut records = self.records.try_borrow_mut()?;

        records.push(HistoryRecord {
            id,
            turn: *turn,
            index: game.turns.len() - 1,
            holding: game.holding,
            goals_home: game.goals_home,
            goals_away: game.goals_away,
        });
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use rand::{SeedableRng, rngs::StdRng};

    use crate::arena::MatchSimulationBuilder;
    use crate::arena::test_util::build_team;
    use crate::core::{Formation, PlayerId};

    use super::*;

    #[test_log::test]
    fn test_vec_historian() {
        let records = VecHistorian::new_storage();
        let hist = Box::new(VecHistorian::new(records.clone()));

        let home = build_team(0, Formation::C, 1.0);
        let away = build_team(1, Formation::D, 1.5);

        let mut sim = MatchSimulationBuilder::default()
            .home(&home)
            .away(&away)
            .historians(vec![hist])
            .build()
            .unwrap();
        let mut rng = StdRng::seed_from_u64(420);
        sim.run(&mut rng).unwrap();

        let records = records.borrow();
        assert_eq!(sim.game.turns.len(), records.len());

        // The running score in the records ends where the match did.
        let last = records.last().unwrap();
        assert_eq!(sim.game.goals_home, last.goals_home);
        assert_eq!(sim.game.goals_away, last.goals_away);

        for (idx, record) in records.iter().enumerate() {
            assert_eq!(idx, record.index);
            assert_eq!(sim.game.turns[idx], record.turn);
        }
    }

    #[test]
    fn test_storage_in_use_is_an_error() {
        let records = VecHistorian::new_storage();
        let mut hist = VecHistorian::new(records.clone());

        let home = build_team(0, Formation::A, 1.0);
        let away = build_team(1, Formation::A, 1.0);
        let mut game = Match::new(MatchId(0), &home, &away);
        let turn = Turn::pass(PlayerId(6), PlayerId(2));
        game.turns.push(turn);

        let reading = records.borrow();
        let result = hist.record_turn(MatchId(0), &game, &turn);
        assert!(matches!(result, Err(HistorianError::BorrowMutError(_))));
        drop(reading);

        hist.record_turn(MatchId(0), &game, &turn).unwrap();
        assert_eq!(1, records.borrow().len());
    }
}
