//! Rules engine trait for the game implementation.
//!
//! `RulesEngine` defines:
//! - How intents turn one state into the next
//! - Which sources and destinations are legal for the side to act
//! - When the game is over
//!
//! Hosts (UI, AI, relay) program against this trait and never interpret
//! game rules directly.

pub mod engine;

pub use crate::core::state::GameResult;
pub use engine::RulesEngine;
