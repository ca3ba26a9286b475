use std::fmt;

use super::error::GroupStageError;
use super::formation::{FormationLayout, Line, TEAM_SIZE};
use super::player::{Player, PlayerId};

#[derive(PartialEq, PartialOrd, Eq, Ord, Debug, Clone, Copy, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct TeamId(pub u32);

impl fmt::Display for TeamId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Points for a win.
pub const WIN_POINTS: u32 = 3;
/// Points each side gets for a draw.
pub const DRAW_POINTS: u32 = 1;

/// A team's tallies over the group stage.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TeamRecord {
    pub played: u32,
    pub points: u32,
    pub goals_for: u32,
    pub goals_against: u32,
}

impl TeamRecord {
    pub fn goal_difference(&self) -> i64 {
        i64::from(self.goals_for) - i64::from(self.goals_against)
    }

    /// Fold one finished match into the record.
    ///
    /// Returns the points that were awarded.
    pub fn record(&mut self, goals_for: u32, goals_against: u32) -> u32 {
        let points = match goals_for.cmp(&goals_against) {
            std::cmp::Ordering::Greater => WIN_POINTS,
            std::cmp::Ordering::Equal => DRAW_POINTS,
            std::cmp::Ordering::Less => 0,
        };
        self.played += 1;
        self.points += points;
        self.goals_for += goals_for;
        self.goals_against += goals_against;
        points
    }
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "TeamData"))]
pub struct Team {
    pub id: TeamId,
    pub name: String,
    pub formation: FormationLayout,
    players: Vec<Player>,
    pub(crate) record: TeamRecord,
}

impl Team {
    /// Create a team from a full squad.
    ///
    /// The squad has to be exactly 11 players with the only keeper in the
    /// last slot and at least one player on every outfield line, otherwise
    /// a match with this team could get stuck.
    pub fn new(
        id: TeamId,
        name: impl Into<String>,
        formation: FormationLayout,
        players: Vec<Player>,
    ) -> Result<Self, GroupStageError> {
        if players.len() != TEAM_SIZE {
            return Err(GroupStageError::InvalidTeamSize(players.len()));
        }

        let keepers = players.iter().filter(|p| p.line() == Line::Keeper).count();
        let keeper_last = players.last().map(|p| p.line()) == Some(Line::Keeper);
        if keepers != 1 || !keeper_last {
            return Err(GroupStageError::InvalidKeeper(keepers));
        }

        for line in [Line::Defender, Line::Midfielder, Line::Forward] {
            if !players.iter().any(|p| p.line() == line) {
                return Err(GroupStageError::MissingLine(line));
            }
        }

        Ok(Self {
            id,
            name: name.into(),
            formation,
            players,
            record: TeamRecord::default(),
        })
    }

    /// The season so far. Only playing matches in a group stage
    /// changes it.
    pub fn record(&self) -> &TeamRecord {
        &self.record
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn player(&self, id: PlayerId) -> Option<&Player> {
        self.players.iter().find(|p| p.id == id)
    }

    pub fn contains(&self, id: PlayerId) -> bool {
        self.player(id).is_some()
    }

    pub fn keeper(&self) -> &Player {
        // Team::new guarantees the last player is the keeper.
        &self.players[TEAM_SIZE - 1]
    }

    /// All the players on `line` in squad order.
    pub fn on_line(&self, line: Line) -> impl Iterator<Item = &Player> {
        self.players.iter().filter(move |p| p.line() == line)
    }

    /// Average power of the squad.
    pub fn power(&self) -> i32 {
        let total: i32 = self.players.iter().map(Player::power).sum();
        total / self.players.len() as i32
    }

    /// Credit goals to one of the players. Returns false if
    /// the player isn't in this squad.
    pub(crate) fn credit_goals(&mut self, id: PlayerId, goals: u32) -> bool {
        match self.players.iter_mut().find(|p| p.id == id) {
            Some(player) => {
                player.add_goals(goals);
                true
            }
            None => false,
        }
    }
}

/// The shape a team is read back in. Goes through `Team::new` so a
/// team from a file is held to the same rules as a generated one.
#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct TeamData {
    id: TeamId,
    name: String,
    formation: FormationLayout,
    players: Vec<Player>,
    #[serde(default)]
    record: TeamRecord,
}

#[cfg(feature = "serde")]
impl TryFrom<TeamData> for Team {
    type Error = GroupStageError;

    fn try_from(data: TeamData) -> Result<Self, Self::Error> {
        let mut team = Team::new(data.id, data.name, data.formation, data.players)?;
        team.record = data.record;
        Ok(team)
    }
}

impl fmt::Display for Team {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}
