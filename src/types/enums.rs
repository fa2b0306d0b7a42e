use std::fmt::{self, Display};

/// Kind of graph element a site index refers to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SiteType {
    #[default]
    Cell,
    Vertex,
    Edge,
}

/// Adjacency relation used by topology queries.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RelationType {
    #[default]
    Orthogonal,
    Diagonal,
    All,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Direction {
    N,
    NE,
    E,
    SE,
    S,
    SW,
    W,
    NW,
}

impl Direction {
    pub const ALL: [Direction; 8] = [
        Self::N,
        Self::NE,
        Self::E,
        Self::SE,
        Self::S,
        Self::SW,
        Self::W,
        Self::NW,
    ];

    pub const ORTHOGONAL: [Direction; 4] = [Self::N, Self::E, Self::S, Self::W];

    pub const DIAGONAL: [Direction; 4] = [Self::NE, Self::SE, Self::SW, Self::NW];

    /// Row and column deltas, rows growing towards `N`.
    #[inline]
    pub fn delta(self) -> (i32, i32) {
        match self {
            Self::N => (1, 0),
            Self::NE => (1, 1),
            Self::E => (0, 1),
            Self::SE => (-1, 1),
            Self::S => (-1, 0),
            Self::SW => (-1, -1),
            Self::W => (0, -1),
            Self::NW => (1, -1),
        }
    }
}

impl RelationType {
    #[inline]
    pub fn directions(self) -> &'static [Direction] {
        match self {
            Self::Orthogonal => &Direction::ORTHOGONAL,
            Self::Diagonal => &Direction::DIAGONAL,
            Self::All => &Direction::ALL,
        }
    }
}

/// Player role resolved against the current `State`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RoleType {
    Mover,
    Next,
    Prev,
    Shared,
    Player(u8),
}

impl Display for RoleType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Mover => f.write_str("Mover"),
            Self::Next => f.write_str("Next"),
            Self::Prev => f.write_str("Prev"),
            Self::Shared => f.write_str("Shared"),
            Self::Player(p) => write!(f, "P{p}"),
        }
    }
}

/// Granularity of the repetition check.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RepetitionType {
    /// Board contents over the whole game.
    #[default]
    Positional,
    /// Board contents plus whose turn it is, over the whole game.
    Situational,
    /// Board contents within the current turn of the mover.
    PositionalInTurn,
    /// Board contents plus turn within the current turn of the mover.
    SituationalInTurn,
}

impl RepetitionType {
    #[inline]
    pub fn is_situational(self) -> bool {
        matches!(self, Self::Situational | Self::SituationalInTurn)
    }

    #[inline]
    pub fn is_in_turn(self) -> bool {
        matches!(self, Self::PositionalInTurn | Self::SituationalInTurn)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CompareOp {
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
}

impl CompareOp {
    #[inline]
    pub fn test<T: PartialOrd>(self, a: T, b: T) -> bool {
        match self {
            Self::Eq => a == b,
            Self::Ne => a != b,
            Self::Lt => a < b,
            Self::Le => a <= b,
            Self::Gt => a > b,
            Self::Ge => a >= b,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ArithOp {
    Add,
    Sub,
    Mul,
    Div,
    Mod,
    Max,
    Min,
}

impl ArithOp {
    #[inline]
    pub fn divides(self) -> bool {
        matches!(self, Self::Div | Self::Mod)
    }
}

/// Outcome declared by an end rule for the player it applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ResultType {
    Win,
    Loss,
    Draw,
}
