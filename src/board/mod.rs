//! The board: point contents, fixed topology and mill detection.
//!
//! Nothing here knows about turns or phases. The state machine in
//! `games::morris` reads boards through these functions and never
//! interprets rows or columns directly.

pub mod grid;
pub mod mills;
pub mod topology;

pub use grid::Board;
pub use mills::{capturable, formed_new_mill, has_mill, in_mill, is_mill, new_mills};
pub use topology::{is_adjacent, mill_lines_through, topology, LineId, Topology, LINE_COUNT};
