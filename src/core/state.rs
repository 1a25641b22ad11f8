//! Game state: the single source of truth for one game.
//!
//! ## GameState
//!
//! - Board contents (all 24 points, always)
//! - Both trays (9 slots each)
//! - Phase, with the side to move carried in the phase payload
//! - Ply counters and the repetition table used by the draw rules
//!
//! States are values. The engine never mutates the caller's state; every
//! accepted intent produces a new one. Cloning is cheap: the board and
//! trays are small arrays and the repetition table is an `im` persistent
//! map, so keeping old states around for replay or undo costs little.

use im::HashMap as ImHashMap;
use serde::{Deserialize, Serialize};

use super::config::RulesConfig;
use super::error::EngineError;
use super::player::{Cell, Player, PlayerMap};
use super::position::{Point, Position, TraySlot, TRAY_SIZE};
use crate::board::{self, Board};

/// Result of a completed game.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameResult {
    /// Single winner.
    Winner(Player),
    /// Draw (no winner).
    Draw,
}

impl GameResult {
    /// Check if a player won.
    #[must_use]
    pub fn is_winner(&self, player: Player) -> bool {
        matches!(self, GameResult::Winner(p) if *p == player)
    }
}

impl std::fmt::Display for GameResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GameResult::Winner(p) => write!(f, "{} wins", p),
            GameResult::Draw => f.write_str("draw"),
        }
    }
}

/// Game phase. The side to act is part of the variant.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Phase {
    /// Before the first NEW_GAME.
    Start,
    /// Pieces go from tray to board.
    Placing { turn: Player },
    /// `turn` formed a mill and must remove an opponent piece.
    AwaitingCapture { turn: Player },
    /// Pieces slide to adjacent empty points.
    Moving { turn: Player },
    /// `turn` has three pieces left and may jump anywhere.
    Flying { turn: Player },
    /// Absorbing: only NEW_GAME leaves it.
    Terminal { result: GameResult },
}

impl Phase {
    #[must_use]
    pub const fn kind(&self) -> PhaseKind {
        match self {
            Phase::Start => PhaseKind::Start,
            Phase::Placing { .. } => PhaseKind::Placing,
            Phase::AwaitingCapture { .. } => PhaseKind::AwaitingCapture,
            Phase::Moving { .. } => PhaseKind::Moving,
            Phase::Flying { .. } => PhaseKind::Flying,
            Phase::Terminal { .. } => PhaseKind::Terminal,
        }
    }

    /// The side to act, for phases that have one.
    #[must_use]
    pub const fn turn(&self) -> Option<Player> {
        match *self {
            Phase::Placing { turn }
            | Phase::AwaitingCapture { turn }
            | Phase::Moving { turn }
            | Phase::Flying { turn } => Some(turn),
            Phase::Start | Phase::Terminal { .. } => None,
        }
    }

    #[must_use]
    pub const fn result(&self) -> Option<GameResult> {
        match *self {
            Phase::Terminal { result } => Some(result),
            _ => None,
        }
    }

    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        matches!(self, Phase::Terminal { .. })
    }

    /// Check if this is a board-movement phase (moving or flying).
    #[must_use]
    pub const fn is_movement(&self) -> bool {
        matches!(self, Phase::Moving { .. } | Phase::Flying { .. })
    }
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match (self.turn(), self.result()) {
            (Some(turn), _) => write!(f, "{}({})", self.kind(), turn),
            (None, Some(result)) => write!(f, "{}({})", self.kind(), result),
            (None, None) => write!(f, "{}", self.kind()),
        }
    }
}

/// Phase tag without payload.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PhaseKind {
    Start,
    Placing,
    AwaitingCapture,
    Moving,
    Flying,
    Terminal,
}

impl std::fmt::Display for PhaseKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            PhaseKind::Start => "START",
            PhaseKind::Placing => "PLACING",
            PhaseKind::AwaitingCapture => "AWAITING_CAPTURE",
            PhaseKind::Moving => "MOVING",
            PhaseKind::Flying => "FLYING",
            PhaseKind::Terminal => "TERMINAL",
        })
    }
}

/// What a UI needs to label the current turn.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PhaseInfo {
    pub phase: PhaseKind,
    pub turn: Player,
}

/// Complete state of one game.
///
/// Deserializing checks the structural invariants; use
/// `GameState::from_canonical` or `GameState::from_bytes` to also check the
/// phase against a rule configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawGameState")]
pub struct GameState {
    board: Board,
    trays: PlayerMap<[Cell; TRAY_SIZE]>,
    phase: Phase,

    /// Side to move; in `Terminal` the side that was to move when the game
    /// ended.
    turn: Player,

    /// Accepted intents since NEW_GAME.
    ply: u32,

    /// Movement plies since the last capture.
    quiet_plies: u32,

    /// Occurrences of each movement-phase position, keyed by
    /// `position_key`.
    repetitions: ImHashMap<u64, u8>,
}

/// Wire shape of `GameState`, before any check.
#[derive(Deserialize)]
pub(crate) struct RawGameState {
    board: Board,
    trays: PlayerMap<[Cell; TRAY_SIZE]>,
    phase: Phase,
    turn: Player,
    ply: u32,
    quiet_plies: u32,
    repetitions: ImHashMap<u64, u8>,
}

impl RawGameState {
    pub(crate) fn into_unchecked(self) -> GameState {
        GameState {
            board: self.board,
            trays: self.trays,
            phase: self.phase,
            turn: self.turn,
            ply: self.ply,
            quiet_plies: self.quiet_plies,
            repetitions: self.repetitions,
        }
    }
}

impl TryFrom<RawGameState> for GameState {
    type Error = EngineError;

    fn try_from(raw: RawGameState) -> Result<Self, Self::Error> {
        let state = raw.into_unchecked();
        state.check_invariants()?;
        Ok(state)
    }
}

impl GameState {
    /// The pre-game state: full trays, empty board, phase `Start`.
    #[must_use]
    pub fn start() -> Self {
        Self {
            board: Board::new(),
            trays: PlayerMap::new(|p| [Cell::from(p); TRAY_SIZE]),
            phase: Phase::Start,
            turn: Player::Black,
            ply: 0,
            quiet_plies: 0,
            repetitions: ImHashMap::new(),
        }
    }

    /// A freshly started game: full trays, empty board, BLACK to place.
    #[must_use]
    pub fn new_game() -> Self {
        Self {
            phase: Phase::Placing {
                turn: Player::Black,
            },
            ..Self::start()
        }
    }

    /// Assemble a state from its observable parts, with fresh counters.
    pub(crate) fn from_parts(
        board: Board,
        trays: PlayerMap<[Cell; TRAY_SIZE]>,
        phase: Phase,
        turn: Player,
    ) -> Self {
        Self {
            board,
            trays,
            phase,
            turn,
            ply: 0,
            quiet_plies: 0,
            repetitions: ImHashMap::new(),
        }
    }

    // === Accessors ===

    #[must_use]
    pub fn board(&self) -> &Board {
        &self.board
    }

    #[must_use]
    pub fn tray(&self, player: Player) -> &[Cell; TRAY_SIZE] {
        &self.trays[player]
    }

    #[must_use]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    #[must_use]
    pub fn turn(&self) -> Player {
        self.turn
    }

    #[must_use]
    pub fn phase_info(&self) -> PhaseInfo {
        PhaseInfo {
            phase: self.phase.kind(),
            turn: self.turn,
        }
    }

    #[must_use]
    pub fn result(&self) -> Option<GameResult> {
        self.phase.result()
    }

    #[must_use]
    pub fn ply(&self) -> u32 {
        self.ply
    }

    #[must_use]
    pub fn quiet_plies(&self) -> u32 {
        self.quiet_plies
    }

    /// Contents of any position.
    #[must_use]
    pub fn get(&self, position: Position) -> Cell {
        match position {
            Position::Board(p) => self.board.get(p),
            Position::Tray(slot) => self.trays[slot.side()][slot.index()],
        }
    }

    /// Board pieces of `player`.
    #[must_use]
    pub fn board_count(&self, player: Player) -> usize {
        self.board.count(player)
    }

    /// Unplaced pieces of `player`.
    #[must_use]
    pub fn tray_count(&self, player: Player) -> usize {
        self.trays[player].iter().filter(|c| !c.is_empty()).count()
    }

    /// Pieces still in the game (board + tray).
    #[must_use]
    pub fn pieces(&self, player: Player) -> usize {
        self.board_count(player) + self.tray_count(player)
    }

    /// First tray slot of `player` still holding a piece.
    #[must_use]
    pub fn next_tray_slot(&self, player: Player) -> Option<TraySlot> {
        self.trays[player]
            .iter()
            .position(|c| !c.is_empty())
            .and_then(|i| TraySlot::new(player, i))
    }

    /// Check if `color` currently has a complete mill.
    #[must_use]
    pub fn has_mill(&self, color: Player) -> bool {
        board::has_mill(&self.board, color)
    }

    /// Exact key of (board, side to move) used for repetition counting.
    #[must_use]
    pub fn position_key(&self) -> u64 {
        self.board.key() | ((self.turn.index() as u64) << 48)
    }

    /// Times the current position has occurred in the movement phase.
    #[must_use]
    pub fn repetitions(&self) -> u8 {
        self.repetitions.get(&self.position_key()).copied().unwrap_or(0)
    }

    // === Transition helpers (engine only) ===

    pub(crate) fn set(&mut self, position: Position, cell: Cell) {
        match position {
            Position::Board(p) => self.board.set(p, cell),
            Position::Tray(slot) => self.trays[slot.side()][slot.index()] = cell,
        }
    }

    /// Move the contents of `from` to `to`, leaving `from` empty.
    pub(crate) fn transfer(&mut self, from: Position, to: Point) {
        let cell = self.get(from);
        self.set(Position::Board(to), cell);
        self.set(from, Cell::Empty);
    }

    pub(crate) fn set_phase(&mut self, phase: Phase) {
        if let Some(turn) = phase.turn() {
            self.turn = turn;
        }
        self.phase = phase;
    }

    /// Enter `Terminal`, recording `turn` as the side that was to move.
    pub(crate) fn finish(&mut self, result: GameResult, turn: Player) {
        self.turn = turn;
        self.phase = Phase::Terminal { result };
    }

    pub(crate) fn record_ply(&mut self, quiet: bool) {
        self.ply += 1;
        if quiet {
            self.quiet_plies += 1;
        }
    }

    pub(crate) fn reset_quiet_plies(&mut self) {
        self.quiet_plies = 0;
    }

    /// Count the current position; returns the new occurrence count.
    pub(crate) fn record_repetition(&mut self) -> u8 {
        let key = self.position_key();
        let count = self.repetitions.entry(key).or_insert(0);
        *count = count.saturating_add(1);
        *count
    }

    // === Invariants ===

    /// Verify the structural invariants.
    ///
    /// A failure means the engine (or a decoded snapshot) produced a state
    /// that cannot occur in a legal game.
    pub fn check_invariants(&self) -> Result<(), EngineError> {
        let broken = |msg: String| Err(EngineError::InconsistentState(msg));

        for (side, tray) in self.trays.iter() {
            if let Some(i) = tray.iter().position(|c| !c.is_empty() && !c.is(side)) {
                return broken(format!("{}{} holds the wrong color", side.tray_prefix(), i));
            }
            if self.pieces(side) > TRAY_SIZE {
                return broken(format!("{} has {} pieces", side, self.pieces(side)));
            }
        }

        if let Some(turn) = self.phase.turn() {
            if turn != self.turn {
                return broken(format!("phase {} disagrees with turn {}", self.phase, self.turn));
            }
        }

        match self.phase {
            Phase::Placing { turn } if self.tray_count(turn) == 0 => {
                broken(format!("{} is placing with an empty tray", turn))
            }
            Phase::AwaitingCapture { turn } if !self.has_mill(turn) => {
                broken(format!("{} awaits a capture without a mill", turn))
            }
            Phase::AwaitingCapture { turn } if self.board_count(turn.opponent()) == 0 => {
                broken(format!("{} awaits a capture with nothing to capture", turn))
            }
            Phase::Moving { .. } | Phase::Flying { .. }
                if self.tray_count(Player::Black) + self.tray_count(Player::White) > 0 =>
            {
                broken(format!("{} with pieces left in a tray", self.phase))
            }
            _ => Ok(()),
        }
    }
}

impl GameState {
    /// Verify the structural invariants and the rule-dependent ones.
    ///
    /// Under `config`, a live game must not hold a side that has already
    /// lost on material, and a movement phase must match the mover's piece
    /// count (flying exactly at the threshold) and leave it a legal move.
    pub fn validate(&self, config: &RulesConfig) -> Result<(), EngineError> {
        self.check_invariants()?;

        let broken = |msg: String| Err(EngineError::InconsistentState(msg));
        if matches!(self.phase, Phase::Start | Phase::Terminal { .. }) {
            return Ok(());
        }

        for side in Player::ALL {
            if self.pieces(side) < usize::from(config.min_pieces) {
                return broken(format!(
                    "{} has {} pieces during {}; the game should be over",
                    side,
                    self.pieces(side),
                    self.phase
                ));
            }
        }

        if let Phase::Moving { turn } | Phase::Flying { turn } = self.phase {
            let count = self.board_count(turn);
            let flying = config.flying && count == usize::from(config.fly_threshold);
            if flying != matches!(self.phase, Phase::Flying { .. }) {
                return broken(format!("{} with {} board pieces", self.phase, count));
            }
            if !self.board.can_move(turn, flying) {
                return broken(format!("{} has no legal move during {}", turn, self.phase));
            }
        }
        Ok(())
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::start()
    }
}
