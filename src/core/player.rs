use std::fmt;

use super::formation::{Line, Position};

/// Stable identity of a player. Handed out once when the
/// player is generated and never reused within a group stage.
#[derive(PartialEq, PartialOrd, Eq, Ord, Debug, Clone, Copy, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct PlayerId(pub u32);

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Youngest age a generated player can have.
pub const MIN_AGE: u8 = 18;
/// Oldest age a generated player can have.
pub const MAX_AGE: u8 = 36;
/// Shortest generated player in centimetres.
pub const MIN_HEIGHT_CM: u16 = 150;
/// Tallest generated player in centimetres.
pub const MAX_HEIGHT_CM: u16 = 200;

/// Skill every player gets from their height. Taller is
/// always better: 50 at 1.50m up to 100 at 2.00m.
pub fn length_power(height_cm: u16) -> f64 {
    50.0 + f64::from(height_cm) - f64::from(MIN_HEIGHT_CM)
}

/// Speed lost with age: 50 at 18 down to 25 at 36.
pub fn age_speed_power(age: u8) -> f64 {
    50.0 - (25.0 / 18.0) * (f64::from(age) - f64::from(MIN_AGE))
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Player {
    pub id: PlayerId,
    pub first_name: String,
    pub last_name: String,
    pub age: u8,
    pub height_cm: u16,
    pub kick_power: i32,
    pub head_power: i32,
    pub speed_power: i32,
    pub position: Position,
    goals: u32,
}

impl Player {
    /// Create a player with skills derived from their height and age.
    ///
    /// Kick and head power come straight from the height, speed mixes in
    /// age. All three are scaled by the team `handicap` and truncated.
    pub fn new(
        id: PlayerId,
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        age: u8,
        height_cm: u16,
        handicap: f64,
        position: Position,
    ) -> Self {
        let length = length_power(height_cm);
        let speed = age_speed_power(age) + length / 2.0;

        Self {
            id,
            first_name: first_name.into(),
            last_name: last_name.into(),
            age,
            height_cm,
            kick_power: (length * handicap) as i32,
            head_power: (length * handicap) as i32,
            speed_power: (speed * handicap) as i32,
            position,
            goals: 0,
        }
    }

    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    /// Height in meters.
    pub fn height(&self) -> f64 {
        f64::from(self.height_cm) / 100.0
    }

    /// Average of the three skills.
    pub fn power(&self) -> i32 {
        (self.kick_power + self.head_power + self.speed_power) / 3
    }

    pub fn line(&self) -> Line {
        self.position.line
    }

    pub fn goals(&self) -> u32 {
        self.goals
    }

    pub(crate) fn add_goals(&mut self, goals: u32) {
        self.goals += goals;
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.first_name, self.last_name)
    }
}
