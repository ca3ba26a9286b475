use crate::core::{
    Formation, FormationLayout, GroupStageError, MAX_AGE, MAX_HEIGHT_CM, MIN_AGE, MIN_HEIGHT_CM,
    NameGenerator, Player, PlayerId, RandomSource, TEAM_SIZE, Team, TeamId,
};

/// The skill multipliers a generated team can get.
pub const DEFAULT_HANDICAPS: [f64; 3] = [0.75, 1.0, 1.5];

/// Everything that has to stay unique while generating a group stage:
/// names already handed out and the next free ids.
#[derive(Debug, Clone, Default)]
pub struct GenerationContext {
    pub names: NameGenerator,
    next_player_id: u32,
    next_team_id: u32,
}

impl GenerationContext {
    pub fn new(names: NameGenerator) -> Self {
        Self {
            names,
            next_player_id: 0,
            next_team_id: 0,
        }
    }

    pub(crate) fn next_player_id(&mut self) -> PlayerId {
        let id = PlayerId(self.next_player_id);
        self.next_player_id += 1;
        id
    }

    pub(crate) fn next_team_id(&mut self) -> TeamId {
        let id = TeamId(self.next_team_id);
        self.next_team_id += 1;
        id
    }
}

/// Creates players with random names, ages and heights.
pub struct PlayerFactory;

impl PlayerFactory {
    /// Create the player for `slot` of a team lined up in `layout`.
    ///
    /// The name is drawn first, then the age and then the height.
    pub fn create<R: RandomSource + ?Sized>(
        ctx: &mut GenerationContext,
        layout: &FormationLayout,
        slot: usize,
        handicap: f64,
        rng: &mut R,
    ) -> Result<Player, GroupStageError> {
        let position = layout
            .position_for_slot(slot)
            .ok_or(GroupStageError::InvalidTeamSize(slot + 1))?;

        let (first_name, last_name) = ctx.names.next_player_name(rng)?;
        let age = rng.uniform_int(i64::from(MIN_AGE), i64::from(MAX_AGE)) as u8;
        let height_cm = rng.uniform_int(i64::from(MIN_HEIGHT_CM), i64::from(MAX_HEIGHT_CM)) as u16;

        Ok(Player::new(
            ctx.next_player_id(),
            first_name,
            last_name,
            age,
            height_cm,
            handicap,
            position,
        ))
    }
}

/// Creates whole teams. The formation and handicap of each team are
/// drawn from the configured sets.
#[derive(Debug, Clone)]
pub struct TeamFactory {
    handicaps: Vec<f64>,
    formations: Vec<FormationLayout>,
}

impl TeamFactory {
    pub fn new(handicaps: Vec<f64>, formations: Vec<FormationLayout>) -> Self {
        Self {
            handicaps,
            formations,
        }
    }

    pub fn handicaps(&self) -> &[f64] {
        &self.handicaps
    }

    pub fn formations(&self) -> &[FormationLayout] {
        &self.formations
    }

    /// Create a team with a unique name and 11 freshly generated players.
    ///
    /// Draws the name, then the formation, then the handicap, then
    /// the players in slot order.
    pub fn create<R: RandomSource + ?Sized>(
        &self,
        ctx: &mut GenerationContext,
        rng: &mut R,
    ) -> Result<Team, GroupStageError> {
        if self.handicaps.is_empty() {
            return Err(GroupStageError::NoHandicaps);
        }
        if self.formations.is_empty() {
            return Err(GroupStageError::NoFormations);
        }

        let name = ctx.names.next_team_name(rng)?;
        let formation = self.formations[rng.choose_index(self.formations.len())];
        let handicap = self.handicaps[rng.choose_index(self.handicaps.len())];

        let players = (0..TEAM_SIZE)
            .map(|slot| PlayerFactory::create(ctx, &formation, slot, handicap, rng))
            .collect::<Result<Vec<_>, _>>()?;

        Team::new(ctx.next_team_id(), name, formation, players)
    }
}

impl Default for TeamFactory {
    fn default() -> Self {
        Self::new(
            DEFAULT_HANDICAPS.to_vec(),
            Formation::formations()
                .into_iter()
                .map(FormationLayout::from)
                .collect(),
        )
    }
}
