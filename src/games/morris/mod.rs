//! Nine Men's Morris.
//!
//! Two sides with nine pieces each play on three concentric squares:
//! - Place pieces one at a time until both trays are empty
//! - Then slide pieces to adjacent empty points
//! - A side down to three pieces may fly to any empty point
//! - Completing a mill removes one opponent piece
//! - Fewer than three pieces, or no legal move, loses

mod game;
mod session;

pub use game::MorrisRules;
pub use session::MorrisSession;
