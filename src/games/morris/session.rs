//! Stateful wrapper for hosts that keep one game per session.
//!
//! `MorrisSession` owns a rule set and the current state, and answers the
//! questions a board UI asks in position-key terms.

use rustc_hash::FxHashSet;
use tracing::instrument;

use super::game::MorrisRules;
use crate::core::{EngineError, GameState, Intent, PhaseInfo, Player, Position, RulesConfig};
use crate::rules::{GameResult, RulesEngine};

/// One game in progress.
#[derive(Clone, Debug)]
pub struct MorrisSession {
    rules: MorrisRules,
    state: GameState,
}

impl MorrisSession {
    /// A session in the pre-game state; submit `Intent::NewGame` to begin.
    pub fn new(config: RulesConfig) -> Self {
        Self {
            rules: MorrisRules::new(config),
            state: GameState::start(),
        }
    }

    /// Resume a session from an existing state, which must be one `config`
    /// could have produced.
    pub fn from_state(config: RulesConfig, state: GameState) -> Result<Self, EngineError> {
        state.validate(&config)?;
        Ok(Self {
            rules: MorrisRules::new(config),
            state,
        })
    }

    #[must_use]
    pub fn rules(&self) -> &MorrisRules {
        &self.rules
    }

    #[must_use]
    pub fn state(&self) -> &GameState {
        &self.state
    }

    #[must_use]
    pub fn phase_info(&self) -> PhaseInfo {
        self.state.phase_info()
    }

    #[must_use]
    pub fn result(&self) -> Option<GameResult> {
        self.rules.is_terminal(&self.state)
    }

    /// Apply an intent. On error the session keeps its current state.
    pub fn submit(&mut self, intent: &Intent) -> Result<&GameState, EngineError> {
        self.state = self.rules.apply(&self.state, intent)?;
        Ok(&self.state)
    }

    /// Apply an intent on behalf of `player`, rejecting it when another
    /// side is to act.
    pub fn submit_as(
        &mut self,
        player: Player,
        intent: &Intent,
    ) -> Result<&GameState, EngineError> {
        self.state = self.rules.apply_as(&self.state, player, intent)?;
        Ok(&self.state)
    }

    /// Legal destinations for the piece at `key`, for move highlighting.
    #[instrument(level = "trace", skip(self))]
    pub fn legal_destinations(&self, key: &str) -> Result<FxHashSet<Position>, EngineError> {
        let from = Position::parse(key)?;
        Ok(self.rules.legal_destinations(&self.state, from))
    }

    /// Every game-progressing intent for the side to act.
    #[must_use]
    pub fn legal_intents(&self) -> Vec<Intent> {
        self.rules.legal_intents(&self.state)
    }
}

impl Default for MorrisSession {
    fn default() -> Self {
        Self::new(RulesConfig::default())
    }
}
