use std::fmt;

use super::error::GroupStageError;

/// Number of columns a line of players is spread over.
pub const PITCH_COLUMNS: u8 = 9;
/// Players in a team including the keeper.
pub const TEAM_SIZE: usize = 11;
/// Players in a team without the keeper.
pub const OUTFIELD_SIZE: usize = TEAM_SIZE - 1;
/// The keeper always stands in the middle column.
pub const KEEPER_COLUMN: u8 = 4;

/// The line on the pitch a player stands on, counted from
/// the player's own goal.
#[derive(PartialEq, PartialOrd, Eq, Ord, Debug, Clone, Copy, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Line {
    Keeper = 0,
    Defender = 1,
    Midfielder = 2,
    Forward = 3,
}

impl Line {
    pub fn row(self) -> u8 {
        self as u8
    }

    pub fn from_row(row: u8) -> Option<Line> {
        match row {
            0 => Some(Line::Keeper),
            1 => Some(Line::Defender),
            2 => Some(Line::Midfielder),
            3 => Some(Line::Forward),
            _ => None,
        }
    }

    /// The line a pass from this line is aimed at.
    /// Forwards have nobody ahead of them, they shoot.
    pub fn ahead(self) -> Option<Line> {
        Line::from_row(self.row() + 1)
    }

    /// The line of the other team that occupies the same
    /// band of the pitch. Defenders face forwards,
    /// midfielders face midfielders.
    pub fn opposing(self) -> Option<Line> {
        match self {
            Line::Keeper => None,
            _ => Line::from_row(4 - self.row()),
        }
    }

    pub fn distance(self, other: Line) -> u8 {
        self.row().abs_diff(other.row())
    }
}

impl fmt::Display for Line {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Line::Keeper => "keeper",
            Line::Defender => "defender",
            Line::Midfielder => "midfielder",
            Line::Forward => "forward",
        };
        write!(f, "{name}")
    }
}

/// Where a player stands on the pitch.
#[derive(PartialEq, Eq, Debug, Clone, Copy, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Position {
    /// 0 to 8, left to right.
    pub column: u8,
    pub line: Line,
}

impl Position {
    pub fn new(column: u8, line: Line) -> Self {
        Self { column, line }
    }

    pub fn keeper() -> Self {
        Self::new(KEEPER_COLUMN, Line::Keeper)
    }

    pub fn column_distance(&self, other: &Position) -> u8 {
        self.column.abs_diff(other.column)
    }
}

/// How many outfield players stand on each line.
///
/// A layout can only be created through [`FormationLayout::new`] (or from
/// one of the fixed [`Formation`]s) so every layout in use fills exactly
/// ten slots with no line left empty.
#[derive(PartialEq, Eq, Debug, Clone, Copy, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "LayoutData"))]
pub struct FormationLayout {
    forwards: u8,
    midfielders: u8,
    defenders: u8,
}

impl FormationLayout {
    pub fn new(forwards: u8, midfielders: u8, defenders: u8) -> Result<Self, GroupStageError> {
        let total = forwards as usize + midfielders as usize + defenders as usize;
        if total != OUTFIELD_SIZE {
            return Err(GroupStageError::FormationSize {
                forwards,
                midfielders,
                defenders,
            });
        }
        for (count, line) in [
            (forwards, Line::Forward),
            (midfielders, Line::Midfielder),
            (defenders, Line::Defender),
        ] {
            if count == 0 {
                return Err(GroupStageError::EmptyLine(line));
            }
        }
        Ok(Self {
            forwards,
            midfielders,
            defenders,
        })
    }

    pub fn line_size(&self, line: Line) -> usize {
        match line {
            Line::Keeper => 1,
            Line::Defender => self.defenders as usize,
            Line::Midfielder => self.midfielders as usize,
            Line::Forward => self.forwards as usize,
        }
    }

    /// Work out where the player in `slot` stands.
    ///
    /// Slots are filled forwards first, then midfielders, then
    /// defenders. The last slot is the keeper. Players on a line are
    /// spread evenly over the columns, each in the middle of their share.
    pub fn position_for_slot(&self, slot: usize) -> Option<Position> {
        let forwards = self.forwards as usize;
        let midfielders = self.midfielders as usize;
        let defenders = self.defenders as usize;

        let (line, idx) = if slot < forwards {
            (Line::Forward, slot)
        } else if slot < forwards + midfielders {
            (Line::Midfielder, slot - forwards)
        } else if slot < OUTFIELD_SIZE {
            (Line::Defender, slot - forwards - midfielders)
        } else if slot == OUTFIELD_SIZE {
            return Some(Position::keeper());
        } else {
            return None;
        };

        let size = match line {
            Line::Forward => forwards,
            Line::Midfielder => midfielders,
            _ => defenders,
        };
        let space = f64::from(PITCH_COLUMNS) / size as f64;
        let column = (space * idx as f64 + space / 2.0).floor() as u8;
        Some(Position::new(column, line))
    }
}

impl fmt::Display for FormationLayout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}-{}", self.forwards, self.midfielders, self.defenders)
    }
}

impl TryFrom<&str> for FormationLayout {
    type Error = GroupStageError;

    /// Parse the `forwards-midfielders-defenders` form, eg `"3-4-3"`.
    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let unparsable = || GroupStageError::UnparsableFormation(value.to_string());
        let counts = value
            .split('-')
            .map(|part| part.trim().parse::<u8>().map_err(|_| unparsable()))
            .collect::<Result<Vec<_>, _>>()?;

        match counts.as_slice() {
            [forwards, midfielders, defenders] => {
                FormationLayout::new(*forwards, *midfielders, *defenders)
            }
            _ => Err(unparsable()),
        }
    }
}

#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct LayoutData {
    forwards: u8,
    midfielders: u8,
    defenders: u8,
}

#[cfg(feature = "serde")]
impl TryFrom<LayoutData> for FormationLayout {
    type Error = GroupStageError;

    fn try_from(data: LayoutData) -> Result<Self, Self::Error> {
        FormationLayout::new(data.forwards, data.midfielders, data.defenders)
    }
}

/// The fixed formations teams are generated with.
#[derive(PartialEq, Eq, Debug, Clone, Copy, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Formation {
    /// 2-4-4
    A,
    /// 3-3-4
    B,
    /// 4-2-4
    C,
    /// 1-4-5
    D,
    /// 3-4-3
    E,
}

/// Constant of all the formations.
/// This is what `Formation::formations()` returns
const FORMATIONS: [Formation; 5] = [
    Formation::A,
    Formation::B,
    Formation::C,
    Formation::D,
    Formation::E,
];

impl Formation {
    pub fn formations() -> [Formation; 5] {
        FORMATIONS
    }

    pub fn layout(self) -> FormationLayout {
        let (forwards, midfielders, defenders) = match self {
            Formation::A => (2, 4, 4),
            Formation::B => (3, 3, 4),
            Formation::C => (4, 2, 4),
            Formation::D => (1, 4, 5),
            Formation::E => (3, 4, 3),
        };
        FormationLayout {
            forwards,
            midfielders,
            defenders,
        }
    }
}

impl From<Formation> for FormationLayout {
    fn from(value: Formation) -> Self {
        value.layout()
    }
}

impl fmt::Display for Formation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.layout(), f)
    }
}
