//! Sides, cell contents and per-side data storage.
//!
//! ## Player
//!
//! The two sides of the game. BLACK always places first.
//!
//! ## Cell
//!
//! What a board point or tray slot holds: a color, never a piece identity.
//! Pieces of one color are interchangeable.
//!
//! ## PlayerMap
//!
//! Fixed two-entry storage indexed by `Player`.

use serde::{Deserialize, Serialize};
use std::ops::{Index, IndexMut};

/// One of the two sides.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Player {
    /// Moves first.
    Black,
    /// Moves second.
    White,
}

impl Player {
    /// Both sides in turn order.
    pub const ALL: [Player; 2] = [Player::Black, Player::White];

    /// The other side.
    #[must_use]
    pub const fn opponent(self) -> Self {
        match self {
            Player::Black => Player::White,
            Player::White => Player::Black,
        }
    }

    /// Storage index (BLACK = 0, WHITE = 1).
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Player::Black => 0,
            Player::White => 1,
        }
    }

    /// Tray key prefix (`bt` / `wt`).
    #[must_use]
    pub const fn tray_prefix(self) -> &'static str {
        match self {
            Player::Black => "bt",
            Player::White => "wt",
        }
    }
}

impl std::fmt::Display for Player {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Player::Black => f.write_str("BLACK"),
            Player::White => f.write_str("WHITE"),
        }
    }
}

/// Contents of a board point or tray slot.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Cell {
    #[default]
    #[serde(rename = "E")]
    Empty,
    #[serde(rename = "B")]
    Black,
    #[serde(rename = "W")]
    White,
}

impl Cell {
    /// The side whose color this is, if any.
    #[must_use]
    pub const fn owner(self) -> Option<Player> {
        match self {
            Cell::Empty => None,
            Cell::Black => Some(Player::Black),
            Cell::White => Some(Player::White),
        }
    }

    #[must_use]
    pub const fn is_empty(self) -> bool {
        matches!(self, Cell::Empty)
    }

    /// Check if this cell holds `player`'s color.
    #[must_use]
    pub fn is(self, player: Player) -> bool {
        self.owner() == Some(player)
    }
}

impl From<Player> for Cell {
    fn from(player: Player) -> Self {
        match player {
            Player::Black => Cell::Black,
            Player::White => Cell::White,
        }
    }
}

/// Per-side data storage with O(1) access.
///
/// ## Example
///
/// ```
/// use morris_engine::core::{Player, PlayerMap};
///
/// let mut captured: PlayerMap<u8> = PlayerMap::with_value(0);
/// captured[Player::White] += 1;
///
/// assert_eq!(captured[Player::Black], 0);
/// assert_eq!(captured[Player::White], 1);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlayerMap<T> {
    data: [T; 2],
}

impl<T> PlayerMap<T> {
    /// Create a map with values from a factory function.
    pub fn new(factory: impl Fn(Player) -> T) -> Self {
        Self {
            data: [factory(Player::Black), factory(Player::White)],
        }
    }

    /// Create a map from BLACK's and WHITE's values.
    pub fn from_pair(black: T, white: T) -> Self {
        Self {
            data: [black, white],
        }
    }

    /// Create a map with both entries set to the same value.
    pub fn with_value(value: T) -> Self
    where
        T: Clone,
    {
        Self::new(|_| value.clone())
    }

    /// Create a map with default values.
    pub fn with_default() -> Self
    where
        T: Default,
    {
        Self::new(|_| T::default())
    }

    #[must_use]
    pub fn get(&self, player: Player) -> &T {
        &self.data[player.index()]
    }

    pub fn get_mut(&mut self, player: Player) -> &mut T {
        &mut self.data[player.index()]
    }

    /// Iterate over (Player, &T) pairs in turn order.
    pub fn iter(&self) -> impl Iterator<Item = (Player, &T)> {
        Player::ALL.into_iter().zip(self.data.iter())
    }
}

impl<T> Index<Player> for PlayerMap<T> {
    type Output = T;

    fn index(&self, player: Player) -> &Self::Output {
        self.get(player)
    }
}

impl<T> IndexMut<Player> for PlayerMap<T> {
    fn index_mut(&mut self, player: Player) -> &mut Self::Output {
        self.get_mut(player)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_opponent() {
        assert_eq!(Player::Black.opponent(), Player::White);
        assert_eq!(Player::White.opponent(), Player::Black);
        assert_eq!(Player::Black.opponent().opponent(), Player::Black);
    }

    #[test]
    fn test_cell_owner() {
        assert_eq!(Cell::Empty.owner(), None);
        assert_eq!(Cell::Black.owner(), Some(Player::Black));
        assert_eq!(Cell::from(Player::White), Cell::White);
        assert!(Cell::White.is(Player::White));
        assert!(!Cell::White.is(Player::Black));
        assert!(!Cell::Empty.is(Player::Black));
    }

    #[test]
    fn test_player_map_new() {
        let map = PlayerMap::new(|p| p.index() * 10);
        assert_eq!(map[Player::Black], 0);
        assert_eq!(map[Player::White], 10);
    }

    #[test]
    fn test_player_map_mutation_and_iter() {
        let mut map: PlayerMap<i32> = PlayerMap::with_default();
        map[Player::White] = 7;

        let pairs: Vec<_> = map.iter().collect();
        assert_eq!(pairs, vec![(Player::Black, &0), (Player::White, &7)]);
    }

    #[test]
    fn test_cell_and_player_serialization() {
        assert_eq!(serde_json::to_string(&Cell::Black).unwrap(), "\"B\"");
        assert_eq!(serde_json::to_string(&Cell::Empty).unwrap(), "\"E\"");
        assert_eq!(serde_json::to_string(&Player::White).unwrap(), "\"WHITE\"");

        let map: PlayerMap<u8> = PlayerMap::new(|p| p.index() as u8 + 1);
        let json = serde_json::to_string(&map).unwrap();
        let back: PlayerMap<u8> = serde_json::from_str(&json).unwrap();
        assert_eq!(map, back);
    }
}
