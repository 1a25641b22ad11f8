//! Error taxonomy.
//!
//! - `PositionError`: a malformed position key. Always a caller bug.
//! - `IllegalIntent`: a well-formed intent the rules do not allow right now.
//!   Recoverable: the caller keeps its state and picks another intent.
//! - `EngineError::InconsistentState`: an invariant broke. This is an engine
//!   defect and the transition is aborted instead of returning a corrupt
//!   state.

use thiserror::Error;

use super::action::IntentKind;
use super::player::Player;
use super::state::PhaseKind;

/// A position key that names neither a tray slot nor a board point.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PositionError {
    #[error("invalid position key `{0}`")]
    InvalidPositionKey(String),
}

/// Why an intent was rejected.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum IllegalIntent {
    #[error("no game in progress; start one with NEW_GAME")]
    GameNotStarted,
    #[error("the game is over; only NEW_GAME is accepted")]
    GameOver,
    #[error("{intent} is not accepted during {phase}")]
    WrongPhase { phase: PhaseKind, intent: IntentKind },
    #[error("it is {expected}'s turn, not {got}'s")]
    NotYourTurn { expected: Player, got: Player },
    #[error("{0} is not a tray slot")]
    NotATraySlot(String),
    #[error("{0} is not a board point")]
    NotABoardPoint(String),
    #[error("{0} belongs to the other side's tray")]
    WrongTray(String),
    #[error("tray slot {0} is empty")]
    EmptyTraySlot(String),
    #[error("there is no piece on {0}")]
    EmptySource(String),
    #[error("the piece on {0} belongs to the other side")]
    NotYourPiece(String),
    #[error("{0} is already occupied")]
    Occupied(String),
    #[error("{to} is not adjacent to {from}")]
    NotAdjacent { from: String, to: String },
    #[error("{0} does not hold an opponent piece")]
    NotOpponentPiece(String),
    #[error("{0} is part of a mill and other pieces are still capturable")]
    ProtectedMill(String),
}

/// Every failure the engine can report.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EngineError {
    #[error(transparent)]
    InvalidPositionKey(#[from] PositionError),
    #[error("illegal intent: {0}")]
    IllegalIntent(#[from] IllegalIntent),
    #[error("inconsistent state: {0}")]
    InconsistentState(String),
}

impl EngineError {
    /// Check if the caller can recover by submitting a different intent.
    #[must_use]
    pub fn is_recoverable(&self) -> bool {
        !matches!(self, EngineError::InconsistentState(_))
    }

    /// The rejection reason, if this is an illegal intent.
    #[must_use]
    pub fn illegal_intent(&self) -> Option<&IllegalIntent> {
        match self {
            EngineError::IllegalIntent(reason) => Some(reason),
            _ => None,
        }
    }
}

/// Failure while encoding or decoding a binary snapshot.
#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("snapshot codec failed: {0}")]
    Codec(#[from] bincode::Error),
    #[error("snapshot holds an invalid state: {0}")]
    Invalid(#[from] EngineError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recoverability() {
        let illegal: EngineError = IllegalIntent::GameOver.into();
        assert!(illegal.is_recoverable());
        assert_eq!(illegal.illegal_intent(), Some(&IllegalIntent::GameOver));

        let parse: EngineError = PositionError::InvalidPositionKey("zz9".into()).into();
        assert!(parse.is_recoverable());
        assert_eq!(parse.illegal_intent(), None);

        let broken = EngineError::InconsistentState("tray overflow".into());
        assert!(!broken.is_recoverable());
    }

    #[test]
    fn test_messages() {
        let err = IllegalIntent::NotAdjacent {
            from: "a1".into(),
            to: "g1".into(),
        };
        assert_eq!(err.to_string(), "g1 is not adjacent to a1");

        let err = PositionError::InvalidPositionKey("h1".into());
        assert_eq!(err.to_string(), "invalid position key `h1`");
    }
}
