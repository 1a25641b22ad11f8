//! State serialization for hosts that persist or sync games.
//!
//! Two forms:
//! - `CanonicalState`: the documented interchange shape (24 keyed board
//!   points, two 9-slot trays, phase, turn, result). Counters and the
//!   repetition table are not part of it and restart at zero on import.
//! - Binary snapshots (`GameState::to_bytes`): full-fidelity bincode.
//!
//! Both are validated on the way in against the rule configuration the
//! state will be played under; a decoded state that breaks an invariant, or
//! whose phase those rules could never produce, is rejected rather than
//! handed to the engine.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::config::RulesConfig;
use super::error::{EngineError, SnapshotError};
use super::player::{Cell, Player, PlayerMap};
use super::position::{Point, POINT_COUNT, TRAY_SIZE};
use super::state::{GameResult, GameState, Phase, PhaseKind, RawGameState};
use crate::board::Board;

/// Result tag of the canonical form.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ResultCode {
    BlackWins,
    WhiteWins,
    Draw,
}

impl From<GameResult> for ResultCode {
    fn from(result: GameResult) -> Self {
        match result {
            GameResult::Winner(Player::Black) => ResultCode::BlackWins,
            GameResult::Winner(Player::White) => ResultCode::WhiteWins,
            GameResult::Draw => ResultCode::Draw,
        }
    }
}

impl From<ResultCode> for GameResult {
    fn from(code: ResultCode) -> Self {
        match code {
            ResultCode::BlackWins => GameResult::Winner(Player::Black),
            ResultCode::WhiteWins => GameResult::Winner(Player::White),
            ResultCode::Draw => GameResult::Draw,
        }
    }
}

/// Interchange form of a game state.
///
/// ```json
/// { "board": { "a1": "E", "d1": "B", ... },
///   "blackTray": ["B", "E", ...], "whiteTray": ["W", ...],
///   "phase": "PLACING", "turn": "WHITE", "result": null }
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CanonicalState {
    pub board: BTreeMap<Point, Cell>,
    pub black_tray: Vec<Cell>,
    pub white_tray: Vec<Cell>,
    pub phase: PhaseKind,
    pub turn: Player,
    pub result: Option<ResultCode>,
}

impl GameState {
    /// Export to the canonical interchange form.
    #[must_use]
    pub fn to_canonical(&self) -> CanonicalState {
        CanonicalState {
            board: self.board().iter().collect(),
            black_tray: self.tray(Player::Black).to_vec(),
            white_tray: self.tray(Player::White).to_vec(),
            phase: self.phase().kind(),
            turn: self.turn(),
            result: self.result().map(ResultCode::from),
        }
    }

    /// Import from the canonical interchange form.
    ///
    /// Requires exactly the 24 board keys, 9-slot trays holding only their
    /// own color, a result exactly when the phase is `TERMINAL`, and a state
    /// that passes `validate` under `config`.
    pub fn from_canonical(
        canonical: &CanonicalState,
        config: &RulesConfig,
    ) -> Result<Self, EngineError> {
        let invalid = |msg: String| EngineError::InconsistentState(msg);

        if canonical.board.len() != POINT_COUNT {
            return Err(invalid(format!(
                "board has {} points, expected {}",
                canonical.board.len(),
                POINT_COUNT
            )));
        }
        let mut board = Board::new();
        for (&point, &cell) in &canonical.board {
            board.set(point, cell);
        }

        let tray = |cells: &[Cell], side: Player| -> Result<[Cell; TRAY_SIZE], EngineError> {
            <[Cell; TRAY_SIZE]>::try_from(cells).map_err(|_| {
                invalid(format!("{} tray has {} slots, expected {}", side, cells.len(), TRAY_SIZE))
            })
        };
        let trays = PlayerMap::from_pair(
            tray(&canonical.black_tray, Player::Black)?,
            tray(&canonical.white_tray, Player::White)?,
        );

        let turn = canonical.turn;
        let phase = match (canonical.phase, canonical.result) {
            (PhaseKind::Terminal, Some(code)) => Phase::Terminal {
                result: code.into(),
            },
            (PhaseKind::Terminal, None) => {
                return Err(invalid("terminal phase without a result".to_string()))
            }
            (kind, Some(_)) => return Err(invalid(format!("{} phase with a result", kind))),
            (PhaseKind::Start, None) => Phase::Start,
            (PhaseKind::Placing, None) => Phase::Placing { turn },
            (PhaseKind::AwaitingCapture, None) => Phase::AwaitingCapture { turn },
            (PhaseKind::Moving, None) => Phase::Moving { turn },
            (PhaseKind::Flying, None) => Phase::Flying { turn },
        };

        let state = GameState::from_parts(board, trays, phase, turn);
        state.validate(config)?;
        Ok(state)
    }

    /// Encode a full-fidelity binary snapshot.
    pub fn to_bytes(&self) -> Result<Vec<u8>, SnapshotError> {
        Ok(bincode::serialize(self)?)
    }

    /// Decode a binary snapshot and `validate` it under `config`.
    pub fn from_bytes(bytes: &[u8], config: &RulesConfig) -> Result<Self, SnapshotError> {
        let raw: RawGameState = bincode::deserialize(bytes)?;
        let state = raw.into_unchecked();
        state.validate(config)?;
        Ok(state)
    }
}
