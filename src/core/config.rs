//! Rule configuration.
//!
//! The defaults are the standard tournament rules. The knobs cover the
//! common regional variants: no flying, and different (or no) draw rules.

use serde::{Deserialize, Serialize};

/// Rule parameters for a game.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RulesConfig {
    /// Whether a side reduced to `fly_threshold` board pieces may jump to any
    /// empty point.
    pub flying: bool,

    /// Board piece count at which a side starts flying.
    pub fly_threshold: u8,

    /// A side with fewer pieces than this (board + tray) has lost.
    pub min_pieces: u8,

    /// Movement plies without a capture before the game is drawn.
    /// `None` disables the rule.
    pub quiet_ply_limit: Option<u32>,

    /// Occurrences of the same movement-phase position (board and side to
    /// move) before the game is drawn. `None` disables the rule.
    pub repetition_limit: Option<u8>,
}

impl Default for RulesConfig {
    fn default() -> Self {
        Self {
            flying: true,
            fly_threshold: 3,
            min_pieces: 3,
            quiet_ply_limit: Some(100),
            repetition_limit: Some(3),
        }
    }
}

impl RulesConfig {
    #[must_use]
    pub fn with_flying(mut self, flying: bool) -> Self {
        self.flying = flying;
        self
    }

    #[must_use]
    pub fn with_quiet_ply_limit(mut self, limit: Option<u32>) -> Self {
        self.quiet_ply_limit = limit;
        self
    }

    #[must_use]
    pub fn with_repetition_limit(mut self, limit: Option<u8>) -> Self {
        self.repetition_limit = limit;
        self
    }

    /// Disable both draw rules.
    #[must_use]
    pub fn without_draws(self) -> Self {
        self.with_quiet_ply_limit(None).with_repetition_limit(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = RulesConfig::default();
        assert!(config.flying);
        assert_eq!(config.fly_threshold, 3);
        assert_eq!(config.min_pieces, 3);
        assert_eq!(config.quiet_ply_limit, Some(100));
        assert_eq!(config.repetition_limit, Some(3));
    }

    #[test]
    fn test_builder_pattern() {
        let config = RulesConfig::default()
            .with_flying(false)
            .with_quiet_ply_limit(Some(40));

        assert!(!config.flying);
        assert_eq!(config.quiet_ply_limit, Some(40));
        assert_eq!(config.repetition_limit, Some(3));

        let config = config.without_draws();
        assert_eq!(config.quiet_ply_limit, None);
        assert_eq!(config.repetition_limit, None);
    }

    #[test]
    fn test_serialization() {
        let config = RulesConfig::default().with_flying(false);
        let json = serde_json::to_string(&config).unwrap();
        let deserialized: RulesConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(config, deserialized);
    }
}
