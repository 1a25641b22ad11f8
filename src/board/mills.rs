//! Mill detection.
//!
//! `formed_new_mill` is what decides whether a capture is earned: it only
//! looks at lines through the point that changed, and only counts a line
//! that was not already a mill before the move. A piece that slides out of
//! a mill and back on a later turn re-forms the mill, because the line was
//! broken in between; a move that leaves an existing mill untouched earns
//! nothing.

use smallvec::SmallVec;
use tracing::trace;

use super::grid::Board;
use super::topology::{mill_lines_through, topology, LineId};
use crate::core::player::Player;
use crate::core::position::Point;

/// Check if every point of `line` holds `color`.
#[must_use]
pub fn is_mill(board: &Board, line: LineId, color: Player) -> bool {
    line.points().iter().all(|&p| board.get(p).is(color))
}

/// Check if `color` occupies any complete mill line.
#[must_use]
pub fn has_mill(board: &Board, color: Player) -> bool {
    topology().lines().any(|line| is_mill(board, line, color))
}

/// Lines through `touched` that are mills for `color` in `after` but were
/// not in `before`.
#[must_use]
pub fn new_mills(
    before: &Board,
    after: &Board,
    color: Player,
    touched: Point,
) -> SmallVec<[LineId; 2]> {
    mill_lines_through(touched)
        .iter()
        .copied()
        .filter(|&line| is_mill(after, line, color) && !is_mill(before, line, color))
        .collect()
}

/// Check if changing `touched` formed at least one new mill for `color`.
#[must_use]
pub fn formed_new_mill(before: &Board, after: &Board, color: Player, touched: Point) -> bool {
    let formed = new_mills(before, after, color, touched);
    if !formed.is_empty() {
        trace!(%color, %touched, lines = ?formed, "mill formed");
    }
    !formed.is_empty()
}

/// Check if the piece on `point` is part of a mill of its own color.
#[must_use]
pub fn in_mill(board: &Board, point: Point) -> bool {
    match board.get(point).owner() {
        Some(color) => mill_lines_through(point)
            .iter()
            .any(|&line| is_mill(board, line, color)),
        None => false,
    }
}

/// Pieces of `victim` that may be captured.
///
/// Pieces inside mills are protected while any other piece of that color
/// remains; once every piece is in a mill, all of them are fair game.
#[must_use]
pub fn capturable(board: &Board, victim: Player) -> Vec<Point> {
    let (free, locked): (Vec<Point>, Vec<Point>) =
        board.points_of(victim).partition(|&p| !in_mill(board, p));

    if free.is_empty() {
        locked
    } else {
        free
    }
}
