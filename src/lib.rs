//! # morris-engine
//!
//! A rule engine for Nine Men's Morris, independent of any UI.
//!
//! ## Design Principles
//!
//! 1. **Single Source of Truth**: A `GameState` value holds the board, both
//!    trays, the phase and the side to move. Hosts render it and submit
//!    intents; they never interpret rules themselves.
//!
//! 2. **Pure Transitions**: `RulesEngine::apply` maps a state and an intent
//!    to a new state or a typed rejection. The input state is never touched.
//!
//! 3. **Explicit Topology**: The 24 points, 16 mill lines and 32 adjacency
//!    edges are declared once. Nothing infers geometry from coordinates.
//!
//! ## Modules
//!
//! - `core`: Sides, position keys, intents, state, configuration, errors
//! - `board`: Point contents, topology, mill detection
//! - `rules`: RulesEngine trait
//! - `games`: The Nine Men's Morris rule set and a session wrapper
//!
//! ## Example
//!
//! ```
//! use morris_engine::{Intent, MorrisSession, PhaseKind, Player};
//!
//! let mut session = MorrisSession::default();
//! session.submit(&Intent::NewGame).unwrap();
//! session.submit(&Intent::place("bt0", "d1").unwrap()).unwrap();
//!
//! assert_eq!(session.phase_info().phase, PhaseKind::Placing);
//! assert_eq!(session.phase_info().turn, Player::White);
//! ```

pub mod board;
pub mod core;
pub mod games;
pub mod rules;

// Re-export commonly used types
pub use crate::core::{
    Cell, Player, PlayerMap,
    Point, Position, TraySlot,
    Intent, IntentKind,
    GameState, GameResult, Phase, PhaseInfo, PhaseKind,
    CanonicalState, ResultCode,
    RulesConfig,
    EngineError, IllegalIntent, PositionError, SnapshotError,
};

pub use crate::board::{Board, LineId};

pub use crate::rules::RulesEngine;

pub use crate::games::morris::{MorrisRules, MorrisSession};
