//! Intents: what a UI, an AI or a relay asks the engine to do.
//!
//! One intent per completed user gesture. Intents carry positions only; the
//! acting side is always the side to move (see `RulesEngine::apply_as` for
//! hosts that want the engine to check the sender).
//!
//! ## Example
//!
//! ```
//! use morris_engine::core::{Intent, IntentKind};
//!
//! let place = Intent::place("bt0", "d1").unwrap();
//! assert_eq!(place.kind(), IntentKind::Place);
//! assert_eq!(place.to_string(), "PLACE bt0 -> d1");
//!
//! assert!(Intent::capture("z9").is_err());
//! ```

use serde::{Deserialize, Serialize};

use super::error::PositionError;
use super::position::Position;

/// A request to change the game state.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Intent {
    /// Start a fresh game from any state.
    NewGame,
    /// Move a piece from the mover's tray to an empty point.
    Place { from: Position, to: Position },
    /// Remove an opponent piece after forming a mill.
    Capture { position: Position },
    /// Slide a piece to an adjacent empty point.
    Move { from: Position, to: Position },
    /// Jump a piece to any empty point (three pieces left).
    Fly { from: Position, to: Position },
}

impl Intent {
    pub fn place(from: &str, to: &str) -> Result<Self, PositionError> {
        Ok(Intent::Place {
            from: from.parse()?,
            to: to.parse()?,
        })
    }

    pub fn capture(position: &str) -> Result<Self, PositionError> {
        Ok(Intent::Capture {
            position: position.parse()?,
        })
    }

    pub fn slide(from: &str, to: &str) -> Result<Self, PositionError> {
        Ok(Intent::Move {
            from: from.parse()?,
            to: to.parse()?,
        })
    }

    pub fn fly(from: &str, to: &str) -> Result<Self, PositionError> {
        Ok(Intent::Fly {
            from: from.parse()?,
            to: to.parse()?,
        })
    }

    /// The intent's tag without its positions.
    #[must_use]
    pub const fn kind(&self) -> IntentKind {
        match self {
            Intent::NewGame => IntentKind::NewGame,
            Intent::Place { .. } => IntentKind::Place,
            Intent::Capture { .. } => IntentKind::Capture,
            Intent::Move { .. } => IntentKind::Move,
            Intent::Fly { .. } => IntentKind::Fly,
        }
    }
}

impl std::fmt::Display for Intent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Intent::NewGame => write!(f, "{}", self.kind()),
            Intent::Capture { position } => write!(f, "{} {}", self.kind(), position),
            Intent::Place { from, to } | Intent::Move { from, to } | Intent::Fly { from, to } => {
                write!(f, "{} {} -> {}", self.kind(), from, to)
            }
        }
    }
}

/// Intent tag, used in rejection reasons.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum IntentKind {
    NewGame,
    Place,
    Capture,
    Move,
    Fly,
}

impl std::fmt::Display for IntentKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            IntentKind::NewGame => "NEW_GAME",
            IntentKind::Place => "PLACE",
            IntentKind::Capture => "CAPTURE",
            IntentKind::Move => "MOVE",
            IntentKind::Fly => "FLY",
        })
    }
}
