//! Board topology: the fixed graph of points, mill lines and adjacency.
//!
//! ```text
//! 7  a7 ---------- d7 ---------- g7
//! 6  |    b6 ----- d6 ----- f6    |
//! 5  |    |   c5 - d5 - e5   |    |
//! 4  a4 - b4 - c4      e4 - f4 - g4
//! 3  |    |   c3 - d3 - e3   |    |
//! 2  |    b2 ----- d2 ----- f2    |
//! 1  a1 ---------- d1 ---------- g1
//!    a    b   c    d    e    f    g
//! ```
//!
//! Mills are the 16 declared lines, not "three points sharing a letter or
//! digit": `a4-b4-c4-e4-f4-g4` share a row but form two lines, and so do
//! the d column points.
//!
//! The tables are built once per process and shared read-only.

use smallvec::SmallVec;
use std::sync::LazyLock;

use crate::core::position::{Point, POINT_COUNT};

/// Number of mill lines on the board.
pub const LINE_COUNT: usize = 16;

/// Identifier of one of the 16 mill lines.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LineId(u8);

impl LineId {
    /// The three points of this line, in board order.
    #[must_use]
    pub fn points(self) -> [Point; 3] {
        MILL_LINES[self.0 as usize]
    }

    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl std::fmt::Display for LineId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let [a, b, c] = self.points();
        write!(f, "{}-{}-{}", a, b, c)
    }
}

const fn line(a: u8, b: u8, c: u8) -> [Point; 3] {
    [Point::at(a), Point::at(b), Point::at(c)]
}

#[rustfmt::skip]
const MILL_LINES: [[Point; 3]; LINE_COUNT] = [
    // Rows
    line(0, 1, 2),    // a1 d1 g1
    line(3, 4, 5),    // b2 d2 f2
    line(6, 7, 8),    // c3 d3 e3
    line(9, 10, 11),  // a4 b4 c4
    line(12, 13, 14), // e4 f4 g4
    line(15, 16, 17), // c5 d5 e5
    line(18, 19, 20), // b6 d6 f6
    line(21, 22, 23), // a7 d7 g7
    // Columns
    line(0, 9, 21),   // a1 a4 a7
    line(3, 10, 18),  // b2 b4 b6
    line(6, 11, 15),  // c3 c4 c5
    line(1, 4, 7),    // d1 d2 d3
    line(16, 19, 22), // d5 d6 d7
    line(8, 12, 17),  // e3 e4 e5
    line(5, 13, 20),  // f2 f4 f6
    line(2, 14, 23),  // g1 g4 g7
];

/// Derived lookup tables.
#[derive(Debug)]
pub struct Topology {
    neighbors: [SmallVec<[Point; 4]>; POINT_COUNT],
    lines_through: [SmallVec<[LineId; 2]>; POINT_COUNT],
}

static TOPOLOGY: LazyLock<Topology> = LazyLock::new(Topology::build);

/// The shared board topology.
pub fn topology() -> &'static Topology {
    &TOPOLOGY
}

impl Topology {
    fn build() -> Self {
        let mut neighbors: [SmallVec<[Point; 4]>; POINT_COUNT] = Default::default();
        let mut lines_through: [SmallVec<[LineId; 2]>; POINT_COUNT] = Default::default();

        for (id, [a, b, c]) in MILL_LINES.iter().enumerate() {
            for p in [a, b, c] {
                lines_through[p.index()].push(LineId(id as u8));
            }
            // Consecutive points on a line are joined by an edge.
            for (x, y) in [(a, b), (b, c)] {
                neighbors[x.index()].push(*y);
                neighbors[y.index()].push(*x);
            }
        }

        for list in &mut neighbors {
            list.sort();
        }

        Self {
            neighbors,
            lines_through,
        }
    }

    /// All 16 mill lines.
    pub fn lines(&self) -> impl Iterator<Item = LineId> {
        (0..LINE_COUNT as u8).map(LineId)
    }

    /// All 24 points.
    pub fn points(&self) -> impl Iterator<Item = Point> {
        Point::all()
    }

    /// Points joined to `point` by an edge (2 to 4 of them).
    #[must_use]
    pub fn neighbors(&self, point: Point) -> &[Point] {
        &self.neighbors[point.index()]
    }

    #[must_use]
    pub fn is_adjacent(&self, a: Point, b: Point) -> bool {
        self.neighbors(a).contains(&b)
    }

    /// Mill lines containing `point` (always two).
    #[must_use]
    pub fn mill_lines_through(&self, point: Point) -> &[LineId] {
        &self.lines_through[point.index()]
    }
}

/// Shorthand for `topology().is_adjacent(a, b)`.
#[must_use]
pub fn is_adjacent(a: Point, b: Point) -> bool {
    topology().is_adjacent(a, b)
}

/// Shorthand for `topology().mill_lines_through(point)`.
#[must_use]
pub fn mill_lines_through(point: Point) -> &'static [LineId] {
    topology().mill_lines_through(point)
}
