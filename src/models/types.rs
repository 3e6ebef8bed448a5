use crate::error::MapError;
use serde::{Deserialize, Serialize};

#[macro_export]
macro_rules! define_id {
    ($name:ident, $inner:ty) => {
        #[derive(
            Copy,
            Clone,
            Debug,
            PartialEq,
            Eq,
            Hash,
            PartialOrd,
            Ord,
            serde::Serialize,
            serde::Deserialize,
        )]
        #[repr(transparent)]
        #[serde(transparent)]
        pub struct $name(pub $inner);

        impl $name {
            #[inline]
            pub fn get(&self) -> $inner {
                self.0
            }
        }

        impl core::fmt::Display for $name {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl core::str::FromStr for $name {
            type Err = core::num::ParseIntError;
            fn from_str(s: &str) -> Result<Self, Self::Err> {
                s.trim().parse::<$inner>().map(Self)
            }
        }

        impl From<$inner> for $name {
            fn from(v: $inner) -> Self {
                Self(v)
            }
        }
    };
}

define_id!(NodeId, u32);
define_id!(ZoneId, u32);

/// Grid position of a room. `z` is the vertical level.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
    #[serde(default)]
    pub z: i32,
}

impl Position {
    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }
}

/// Direction classification of an arc. The first eleven are cardinal and can
/// be observed as exit flags; the rest are verbose movement commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    North,
    Northeast,
    East,
    Southeast,
    South,
    Southwest,
    West,
    Northwest,
    Up,
    Down,
    Out,
    Go,
    Climb,
    None,
}

impl Direction {
    pub const CARDINALS: [Direction; 11] = [
        Direction::North,
        Direction::Northeast,
        Direction::East,
        Direction::Southeast,
        Direction::South,
        Direction::Southwest,
        Direction::West,
        Direction::Northwest,
        Direction::Up,
        Direction::Down,
        Direction::Out,
    ];

    #[inline]
    pub fn is_cardinal(&self) -> bool {
        self.cardinal_index().is_some()
    }

    /// Bit position inside an [`ExitSet`], `None` for non-cardinal directions.
    fn cardinal_index(&self) -> Option<u8> {
        let idx = match self {
            Direction::North => 0,
            Direction::Northeast => 1,
            Direction::East => 2,
            Direction::Southeast => 3,
            Direction::South => 4,
            Direction::Southwest => 5,
            Direction::West => 6,
            Direction::Northwest => 7,
            Direction::Up => 8,
            Direction::Down => 9,
            Direction::Out => 10,
            Direction::Go | Direction::Climb | Direction::None => return None,
        };
        Some(idx)
    }

    #[inline]
    pub fn canonical(&self) -> &'static str {
        match self {
            Direction::North => "north",
            Direction::Northeast => "northeast",
            Direction::East => "east",
            Direction::Southeast => "southeast",
            Direction::South => "south",
            Direction::Southwest => "southwest",
            Direction::West => "west",
            Direction::Northwest => "northwest",
            Direction::Up => "up",
            Direction::Down => "down",
            Direction::Out => "out",
            Direction::Go => "go",
            Direction::Climb => "climb",
            Direction::None => "none",
        }
    }

    /// Movement command sent to the game. `None` for non-cardinal directions,
    /// which have no command of their own.
    pub fn abbreviation(&self) -> Option<&'static str> {
        match self {
            Direction::North => Some("n"),
            Direction::Northeast => Some("ne"),
            Direction::East => Some("e"),
            Direction::Southeast => Some("se"),
            Direction::South => Some("s"),
            Direction::Southwest => Some("sw"),
            Direction::West => Some("w"),
            Direction::Northwest => Some("nw"),
            Direction::Up => Some("up"),
            Direction::Down => Some("down"),
            Direction::Out => Some("out"),
            Direction::Go | Direction::Climb | Direction::None => None,
        }
    }

    /// Parses cardinal names and their abbreviations.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "n" | "north" => Some(Direction::North),
            "ne" | "northeast" => Some(Direction::Northeast),
            "e" | "east" => Some(Direction::East),
            "se" | "southeast" => Some(Direction::Southeast),
            "s" | "south" => Some(Direction::South),
            "sw" | "southwest" => Some(Direction::Southwest),
            "w" | "west" => Some(Direction::West),
            "nw" | "northwest" => Some(Direction::Northwest),
            "u" | "up" => Some(Direction::Up),
            "d" | "down" => Some(Direction::Down),
            "o" | "out" => Some(Direction::Out),
            _ => None,
        }
    }

    /// Classifies a free-form exit token. Cardinals first, then verbose
    /// "go ..." / "climb ..." commands, anything else is `None`.
    pub fn classify(exit: &str) -> Self {
        if let Some(dir) = Direction::parse(exit) {
            return dir;
        }

        let lower = exit.trim().to_ascii_lowercase();
        let verb = lower.split_whitespace().next().unwrap_or("");
        match verb {
            "go" => Direction::Go,
            "climb" => Direction::Climb,
            _ => Direction::None,
        }
    }
}

impl core::str::FromStr for Direction {
    type Err = MapError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if let Some(dir) = Direction::parse(s) {
            return Ok(dir);
        }
        match s.trim().to_ascii_lowercase().as_str() {
            "go" => Ok(Direction::Go),
            "climb" => Ok(Direction::Climb),
            "none" => Ok(Direction::None),
            _ => Err(MapError::InvalidDirection(s.to_string())),
        }
    }
}

impl core::fmt::Display for Direction {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.canonical())
    }
}

/// Set of cardinal directions, as observed from the game or derived from a
/// room's visible arcs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct ExitSet(u16);

impl ExitSet {
    pub const fn empty() -> Self {
        Self(0)
    }

    /// Inserts a direction. Non-cardinal directions are ignored.
    pub fn insert(&mut self, dir: Direction) {
        if let Some(idx) = dir.cardinal_index() {
            self.0 |= 1 << idx;
        }
    }

    pub fn remove(&mut self, dir: Direction) {
        if let Some(idx) = dir.cardinal_index() {
            self.0 &= !(1 << idx);
        }
    }

    pub fn set(&mut self, dir: Direction, present: bool) {
        if present {
            self.insert(dir);
        } else {
            self.remove(dir);
        }
    }

    pub fn contains(&self, dir: Direction) -> bool {
        dir.cardinal_index().is_some_and(|idx| self.0 & (1 << idx) != 0)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.0.count_ones() as usize
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    pub fn overlap(&self, other: &ExitSet) -> usize {
        (self.0 & other.0).count_ones() as usize
    }

    pub fn iter(&self) -> impl Iterator<Item = Direction> + '_ {
        Direction::CARDINALS.into_iter().filter(|d| self.contains(*d))
    }
}

impl FromIterator<Direction> for ExitSet {
    fn from_iter<I: IntoIterator<Item = Direction>>(iter: I) -> Self {
        let mut set = ExitSet::empty();
        for dir in iter {
            set.insert(dir);
        }
        set
    }
}
