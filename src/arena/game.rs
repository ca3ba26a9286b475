use std::fmt;

use crate::core::{PlayerId, Team, TeamId};

#[derive(PartialEq, PartialOrd, Eq, Ord, Debug, Clone, Copy, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct MatchId(pub usize);

impl fmt::Display for MatchId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Side {
    Home,
    Away,
}

impl Side {
    pub fn opponent(self) -> Side {
        match self {
            Side::Home => Side::Away,
            Side::Away => Side::Home,
        }
    }
}

/// What happened during a turn.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TurnKind {
    /// The ball reached a teammate.
    Pass,
    /// The other side took the ball from a pass.
    Interception,
    /// A forward had a go at goal. The turn's `goal` flag
    /// tells if it went in.
    Shot,
}

/// One possession event. The list of turns of a match is
/// everything needed to replay it.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Turn {
    pub from: PlayerId,
    pub to: PlayerId,
    pub goal: bool,
    pub kind: TurnKind,
}

impl Turn {
    pub fn pass(from: PlayerId, to: PlayerId) -> Self {
        Self {
            from,
            to,
            goal: false,
            kind: TurnKind::Pass,
        }
    }

    pub fn interception(from: PlayerId, to: PlayerId) -> Self {
        Self {
            from,
            to,
            goal: false,
            kind: TurnKind::Interception,
        }
    }

    pub fn shot(from: PlayerId, to: PlayerId, goal: bool) -> Self {
        Self {
            from,
            to,
            goal,
            kind: TurnKind::Shot,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Outcome {
    HomeWin,
    Draw,
    AwayWin,
}

/// A fixture between two teams and everything that
/// happened in it so far.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Match {
    pub id: MatchId,
    pub home: TeamId,
    pub away: TeamId,
    pub goals_home: u32,
    pub goals_away: u32,
    pub is_simulated: bool,
    /// The side in possession.
    pub holding: Side,
    pub ball_holder: PlayerId,
    pub turns: Vec<Turn>,
}

impl Match {
    /// A fresh fixture. The home keeper starts with the ball.
    pub fn new(id: MatchId, home: &Team, away: &Team) -> Self {
        Self {
            id,
            home: home.id,
            away: away.id,
            goals_home: 0,
            goals_away: 0,
            is_simulated: false,
            holding: Side::Home,
            ball_holder: home.keeper().id,
            turns: vec![],
        }
    }

    pub fn team_id(&self, side: Side) -> TeamId {
        match side {
            Side::Home => self.home,
            Side::Away => self.away,
        }
    }

    pub fn goals(&self, side: Side) -> u32 {
        match side {
            Side::Home => self.goals_home,
            Side::Away => self.goals_away,
        }
    }

    pub(crate) fn add_goal(&mut self, side: Side) {
        match side {
            Side::Home => self.goals_home += 1,
            Side::Away => self.goals_away += 1,
        }
    }

    pub fn involves(&self, team: TeamId) -> bool {
        self.home == team || self.away == team
    }

    /// The result, once the match has been played.
    pub fn outcome(&self) -> Option<Outcome> {
        if !self.is_simulated {
            return None;
        }
        Some(match self.goals_home.cmp(&self.goals_away) {
            std::cmp::Ordering::Greater => Outcome::HomeWin,
            std::cmp::Ordering::Equal => Outcome::Draw,
            std::cmp::Ordering::Less => Outcome::AwayWin,
        })
    }

    pub fn goal_turns(&self) -> impl Iterator<Item = &Turn> {
        self.turns.iter().filter(|t| t.goal)
    }
}

impl fmt::Display for Match {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_simulated {
            write!(
                f,
                "{} {} - {} {}",
                self.home, self.goals_home, self.goals_away, self.away
            )
        } else {
            write!(f, "{} - {}", self.home, self.away)
        }
    }
}
