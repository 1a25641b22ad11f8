//! Rules engine trait.
//!
//! The engine is a pure function over values:
//! `(&GameState, &Intent) -> Result<GameState, EngineError>`. A rejected
//! intent leaves the caller's state exactly as it was.
//!
//! ## Implementation Notes
//!
//! - `apply`: must be deterministic and must never return a state that
//!   fails `GameState::check_invariants`
//! - `legal_sources`: positions the side to act can use right now
//! - `legal_destinations`: where a piece on `from` may go; empty for
//!   anything that cannot act
//! - `is_terminal`: `None` while the game continues

use rustc_hash::FxHashSet;

use crate::core::action::Intent;
use crate::core::config::RulesConfig;
use crate::core::error::{EngineError, IllegalIntent};
use crate::core::player::Player;
use crate::core::position::Position;
use crate::core::state::{GameResult, GameState, Phase};

/// Rules engine trait.
///
/// Serves a human UI, an AI or a network relay equally; none of them need
/// to know any rule beyond what these methods answer.
pub trait RulesEngine {
    /// Get the rule configuration.
    fn config(&self) -> &RulesConfig;

    /// Apply an intent, producing the next state.
    fn apply(&self, state: &GameState, intent: &Intent) -> Result<GameState, EngineError>;

    /// Positions the side to act can start an intent from.
    ///
    /// Tray slots while placing, own board points while moving or flying,
    /// capturable opponent points while awaiting a capture.
    fn legal_sources(&self, state: &GameState) -> Vec<Position>;

    /// Legal destinations for a piece on `from`.
    fn legal_destinations(&self, state: &GameState, from: Position) -> FxHashSet<Position>;

    /// Check if the game is over.
    ///
    /// Returns `Some(result)` if the game has ended, `None` if it continues.
    fn is_terminal(&self, state: &GameState) -> Option<GameResult> {
        state.result()
    }

    // === Convenience Methods ===

    /// Apply an intent on behalf of `player`.
    ///
    /// Rejects with `NotYourTurn` when another side is to act. NEW_GAME is
    /// accepted from either side.
    fn apply_as(
        &self,
        state: &GameState,
        player: Player,
        intent: &Intent,
    ) -> Result<GameState, EngineError> {
        if let (Some(expected), false) = (state.phase().turn(), matches!(intent, Intent::NewGame)) {
            if expected != player {
                return Err(IllegalIntent::NotYourTurn {
                    expected,
                    got: player,
                }
                .into());
            }
        }
        self.apply(state, intent)
    }

    /// Enumerate every game-progressing intent for the side to act.
    ///
    /// NEW_GAME is always accepted and is not listed. While placing, only
    /// the first filled tray slot is used as a source, since pieces are
    /// interchangeable.
    fn legal_intents(&self, state: &GameState) -> Vec<Intent> {
        let sources = match state.phase() {
            Phase::Start | Phase::Terminal { .. } => return Vec::new(),
            Phase::AwaitingCapture { .. } => {
                return self
                    .legal_sources(state)
                    .into_iter()
                    .map(|position| Intent::Capture { position })
                    .collect();
            }
            Phase::Placing { turn } => state
                .next_tray_slot(turn)
                .map(Position::Tray)
                .into_iter()
                .collect(),
            Phase::Moving { .. } | Phase::Flying { .. } => self.legal_sources(state),
        };

        let mut intents = Vec::new();
        for from in sources {
            let mut destinations: Vec<Position> =
                self.legal_destinations(state, from).into_iter().collect();
            destinations.sort();

            for to in destinations {
                intents.push(match state.phase() {
                    Phase::Placing { .. } => Intent::Place { from, to },
                    Phase::Flying { .. } => Intent::Fly { from, to },
                    _ => Intent::Move { from, to },
                });
            }
        }
        intents
    }

    /// Replay a sequence of intents from the pre-game state.
    fn replay(&self, intents: &[Intent]) -> Result<GameState, EngineError> {
        intents
            .iter()
            .try_fold(GameState::start(), |state, intent| self.apply(&state, intent))
    }
}
