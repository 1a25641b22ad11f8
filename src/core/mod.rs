//! Core engine types: sides, positions, intents, state, configuration, errors.
//!
//! Everything here is a plain value. The rules that move between states
//! live in `games::morris`; the board geometry lives in `board`.

pub mod action;
pub mod config;
pub mod error;
pub mod player;
pub mod position;
pub mod snapshot;
pub mod state;

pub use action::{Intent, IntentKind};
pub use config::RulesConfig;
pub use error::{EngineError, IllegalIntent, PositionError, SnapshotError};
pub use player::{Cell, Player, PlayerMap};
pub use position::{Point, Position, TraySlot, POINT_COUNT, TRAY_SIZE};
pub use snapshot::{CanonicalState, ResultCode};
pub use state::{GameResult, GameState, Phase, PhaseInfo, PhaseKind};
