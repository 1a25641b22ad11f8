//! Board snapshot: the contents of all 24 points.
//!
//! Backed by a fixed array indexed by `Point`, so every point is always
//! present and none can be added or removed.

use serde::{Deserialize, Serialize};

use super::topology::topology;
use crate::core::player::{Cell, Player};
use crate::core::position::{Point, POINT_COUNT};

/// Contents of the 24 board points.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Board {
    cells: [Cell; POINT_COUNT],
}

impl Board {
    /// Create an empty board.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn get(&self, point: Point) -> Cell {
        self.cells[point.index()]
    }

    pub fn set(&mut self, point: Point, cell: Cell) {
        self.cells[point.index()] = cell;
    }

    /// Check if a point is empty.
    #[must_use]
    pub fn is_empty(&self, point: Point) -> bool {
        self.get(point).is_empty()
    }

    /// Iterate over (Point, Cell) pairs in canonical order.
    pub fn iter(&self) -> impl Iterator<Item = (Point, Cell)> + '_ {
        Point::all().map(move |p| (p, self.get(p)))
    }

    /// Points holding `player`'s color.
    pub fn points_of(&self, player: Player) -> impl Iterator<Item = Point> + '_ {
        self.iter().filter(move |(_, c)| c.is(player)).map(|(p, _)| p)
    }

    /// Empty points.
    pub fn empty_points(&self) -> impl Iterator<Item = Point> + '_ {
        self.iter().filter(|(_, c)| c.is_empty()).map(|(p, _)| p)
    }

    /// Number of `player`'s pieces on the board.
    #[must_use]
    pub fn count(&self, player: Player) -> usize {
        self.cells.iter().filter(|c| c.is(player)).count()
    }

    /// Check if `player` can relocate any piece: to any empty point when
    /// flying, otherwise along an edge to an empty neighbor.
    #[must_use]
    pub fn can_move(&self, player: Player, flying: bool) -> bool {
        if flying {
            return self.count(player) > 0 && self.empty_points().next().is_some();
        }
        self.points_of(player)
            .any(|p| topology().neighbors(p).iter().any(|&n| self.is_empty(n)))
    }

    /// Exact 48-bit encoding of the board (2 bits per point).
    ///
    /// Used as the repetition key; distinct boards never collide.
    #[must_use]
    pub fn key(&self) -> u64 {
        self.cells.iter().enumerate().fold(0u64, |acc, (i, cell)| {
            let bits = match cell {
                Cell::Empty => 0u64,
                Cell::Black => 1,
                Cell::White => 2,
            };
            acc | (bits << (2 * i))
        })
    }

    /// Render as a 7x7 text diagram, row 7 on top.
    #[must_use]
    pub fn display(&self) -> String {
        let mut out = String::new();
        for row in (0..7u8).rev() {
            for col in 0..7u8 {
                let symbol = match Point::from_coords(col, row).map(|p| self.get(p)) {
                    Some(Cell::Black) => 'B',
                    Some(Cell::White) => 'W',
                    Some(Cell::Empty) => '+',
                    None => ' ',
                };
                out.push(symbol);
            }
            if row > 0 {
                out.push('\n');
            }
        }
        out
    }
}
