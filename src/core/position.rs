//! Position addressing: the key space shared by every other component.
//!
//! A key is a non-digit prefix followed by a decimal suffix:
//! - `bt0`..`bt8`, `wt0`..`wt8`: tray slots. The suffix is the zero-based
//!   slot index, used as is.
//! - `a1`..`g7`: board points. The letter is the column (a = 0), the digit is
//!   the one-based row. Only the 24 points of the Morris board are valid.
//!
//! ```
//! use morris_engine::core::{Player, Position};
//!
//! let tray: Position = "bt3".parse().unwrap();
//! assert_eq!(tray.tray_slot().map(|s| (s.side(), s.index())), Some((Player::Black, 3)));
//!
//! let point: Position = "d2".parse().unwrap();
//! let p = point.point().unwrap();
//! assert_eq!((p.col(), p.row()), (3, 1));
//! assert_eq!(point.to_string(), "d2");
//! ```

use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use std::str::FromStr;

use super::error::PositionError;
use super::player::Player;

/// Number of slots in each side's tray.
pub const TRAY_SIZE: usize = 9;

/// Number of points on the board.
pub const POINT_COUNT: usize = 24;

const COLUMNS: &str = "abcdefg";

/// (column, row) of each point, in canonical order.
#[rustfmt::skip]
const POINT_COORDS: [(u8, u8); POINT_COUNT] = [
    (0, 0), (3, 0), (6, 0),
    (1, 1), (3, 1), (5, 1),
    (2, 2), (3, 2), (4, 2),
    (0, 3), (1, 3), (2, 3), (4, 3), (5, 3), (6, 3),
    (2, 4), (3, 4), (4, 4),
    (1, 5), (3, 5), (5, 5),
    (0, 6), (3, 6), (6, 6),
];

/// One of the 24 board points.
///
/// The wrapped value is the canonical index (0..24), which is also the
/// point's slot in the board array.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Point(u8);

impl Point {
    /// Get the point at a canonical index.
    #[must_use]
    pub const fn from_index(index: usize) -> Option<Self> {
        if index < POINT_COUNT {
            Some(Self(index as u8))
        } else {
            None
        }
    }

    /// Build a point from a canonical index known to be in range.
    pub(crate) const fn at(index: u8) -> Self {
        debug_assert!((index as usize) < POINT_COUNT);
        Self(index)
    }

    /// Get the point at a grid coordinate, if one exists there.
    #[must_use]
    pub fn from_coords(col: u8, row: u8) -> Option<Self> {
        POINT_COORDS
            .iter()
            .position(|&c| c == (col, row))
            .map(|i| Self(i as u8))
    }

    /// Canonical index (0..24).
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// Column, 0..=6 (a..g).
    #[must_use]
    pub const fn col(self) -> u8 {
        POINT_COORDS[self.0 as usize].0
    }

    /// Row, 0..=6 (displayed as 1..7).
    #[must_use]
    pub const fn row(self) -> u8 {
        POINT_COORDS[self.0 as usize].1
    }

    /// All 24 points in canonical order.
    pub fn all() -> impl Iterator<Item = Point> {
        (0..POINT_COUNT as u8).map(Point)
    }
}

impl std::fmt::Display for Point {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let col = COLUMNS.as_bytes()[self.col() as usize] as char;
        write!(f, "{}{}", col, self.row() + 1)
    }
}

/// A slot in one side's tray.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TraySlot {
    side: Player,
    index: u8,
}

impl TraySlot {
    #[must_use]
    pub fn new(side: Player, index: usize) -> Option<Self> {
        (index < TRAY_SIZE).then_some(Self {
            side,
            index: index as u8,
        })
    }

    #[must_use]
    pub const fn side(self) -> Player {
        self.side
    }

    #[must_use]
    pub const fn index(self) -> usize {
        self.index as usize
    }
}

impl std::fmt::Display for TraySlot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", self.side.tray_prefix(), self.index)
    }
}

/// Either a board point or a tray slot.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Position {
    Board(Point),
    Tray(TraySlot),
}

impl Position {
    /// Parse a position key.
    ///
    /// Rejects anything that does not round-trip through `Display`: unknown
    /// prefixes, signs, leading zeros, out-of-range indices and grid
    /// coordinates that are not board points.
    pub fn parse(key: &str) -> Result<Self, PositionError> {
        let invalid = || PositionError::InvalidPositionKey(key.to_string());

        let split = key.find(|c: char| c.is_ascii_digit()).unwrap_or(key.len());
        let (prefix, digits) = key.split_at(split);
        let number = parse_suffix(digits).ok_or_else(invalid)?;

        if let Some(side) = Player::ALL.into_iter().find(|p| p.tray_prefix() == prefix) {
            return TraySlot::new(side, number as usize)
                .map(Position::Tray)
                .ok_or_else(invalid);
        }

        let col = match prefix.as_bytes() {
            [letter] => COLUMNS.bytes().position(|c| c == *letter).ok_or_else(invalid)?,
            _ => return Err(invalid()),
        };
        let row = number.checked_sub(1).ok_or_else(invalid)?;

        Point::from_coords(col as u8, row)
            .map(Position::Board)
            .ok_or_else(invalid)
    }

    /// Every valid key: 24 board points then both trays.
    pub fn all() -> impl Iterator<Item = Position> {
        Point::all().map(Position::Board).chain(Player::ALL.into_iter().flat_map(|side| {
            (0..TRAY_SIZE).filter_map(move |i| TraySlot::new(side, i).map(Position::Tray))
        }))
    }

    #[must_use]
    pub const fn point(self) -> Option<Point> {
        match self {
            Position::Board(p) => Some(p),
            Position::Tray(_) => None,
        }
    }

    #[must_use]
    pub const fn tray_slot(self) -> Option<TraySlot> {
        match self {
            Position::Tray(s) => Some(s),
            Position::Board(_) => None,
        }
    }
}

/// Canonical decimal: no sign, no leading zero.
fn parse_suffix(digits: &str) -> Option<u8> {
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    if digits.len() > 1 && digits.starts_with('0') {
        return None;
    }
    digits.parse().ok()
}

impl From<Point> for Position {
    fn from(point: Point) -> Self {
        Position::Board(point)
    }
}

impl From<TraySlot> for Position {
    fn from(slot: TraySlot) -> Self {
        Position::Tray(slot)
    }
}

impl FromStr for Position {
    type Err = PositionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Position::parse(s)
    }
}

impl FromStr for Point {
    type Err = PositionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Position::parse(s)?
            .point()
            .ok_or_else(|| PositionError::InvalidPositionKey(s.to_string()))
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Position::Board(p) => p.fmt(f),
            Position::Tray(s) => s.fmt(f),
        }
    }
}

// Positions travel as their string keys.

impl Serialize for Position {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Position {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let key = String::deserialize(deserializer)?;
        Position::parse(&key).map_err(de::Error::custom)
    }
}

impl Serialize for Point {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Point {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let key = String::deserialize(deserializer)?;
        key.parse().map_err(de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_tray() {
        let pos = Position::parse("wt0").unwrap();
        assert_eq!(pos, Position::Tray(TraySlot::new(Player::White, 0).unwrap()));

        let pos = Position::parse("bt8").unwrap();
        assert_eq!(pos.tray_slot().unwrap().index(), 8);
        assert_eq!(pos.point(), None);
    }

    #[test]
    fn test_parse_board() {
        let p = Position::parse("a1").unwrap().point().unwrap();
        assert_eq!((p.col(), p.row()), (0, 0));
        assert_eq!(p.index(), 0);

        let p = Position::parse("g7").unwrap().point().unwrap();
        assert_eq!((p.col(), p.row()), (6, 6));
        assert_eq!(p.index(), 23);
    }

    #[test]
    fn test_rejects_malformed() {
        for key in [
            "", "d", "7", "bt", "bt9", "bt10", "bt-1", "bt03", "xt1", "h1", "d0", "d8", "d01",
            "a2", "d4", "D2", "d2x", "dd2", "d 2", "b+2",
        ] {
            assert_eq!(
                Position::parse(key),
                Err(PositionError::InvalidPositionKey(key.to_string())),
                "{key} should be rejected"
            );
        }
    }

    #[test]
    fn test_round_trip_every_key() {
        let keys: Vec<String> = Position::all().map(|p| p.to_string()).collect();
        assert_eq!(keys.len(), POINT_COUNT + 2 * TRAY_SIZE);

        for key in keys {
            assert_eq!(Position::parse(&key).unwrap().to_string(), key);
        }
    }

    #[test]
    fn test_point_coords_are_unique() {
        for a in Point::all() {
            assert_eq!(Point::from_coords(a.col(), a.row()), Some(a));
        }
        assert_eq!(Point::from_index(POINT_COUNT), None);
    }

    #[test]
    fn test_point_from_str_rejects_tray() {
        assert!("bt1".parse::<Point>().is_err());
        assert_eq!("d3".parse::<Point>().unwrap().to_string(), "d3");
    }

    #[test]
    fn test_serde_as_key() {
        let pos = Position::parse("f4").unwrap();
        let json = serde_json::to_string(&pos).unwrap();
        assert_eq!(json, "\"f4\"");
        assert_eq!(serde_json::from_str::<Position>(&json).unwrap(), pos);
        assert!(serde_json::from_str::<Position>("\"zz\"").is_err());
    }
}
