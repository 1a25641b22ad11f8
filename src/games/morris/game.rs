//! Nine Men's Morris rules.

use rustc_hash::FxHashSet;
use tracing::{debug, error, instrument};

use crate::board::{self, topology};
use crate::core::{
    Cell, EngineError, GameResult, GameState, IllegalIntent, Intent, Phase, Player, Point, Position,
    RulesConfig, TraySlot, TRAY_SIZE,
};
use crate::rules::RulesEngine;

/// The rule set: a pure transition function parameterized by `RulesConfig`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MorrisRules {
    config: RulesConfig,
}

impl MorrisRules {
    pub fn new(config: RulesConfig) -> Self {
        Self { config }
    }

    // === Transitions ===

    fn place(
        &self,
        state: &GameState,
        turn: Player,
        from: Position,
        to: Position,
    ) -> Result<GameState, IllegalIntent> {
        let slot = from
            .tray_slot()
            .ok_or_else(|| IllegalIntent::NotATraySlot(from.to_string()))?;
        if slot.side() != turn {
            return Err(IllegalIntent::WrongTray(from.to_string()));
        }
        if state.get(from).is_empty() {
            return Err(IllegalIntent::EmptyTraySlot(from.to_string()));
        }
        let to = empty_point(state, to)?;

        let mut next = state.clone();
        next.transfer(from, to);
        next.record_ply(false);
        Ok(self.conclude(state, next, turn, to))
    }

    fn capture(
        &self,
        state: &GameState,
        turn: Player,
        position: Position,
    ) -> Result<GameState, IllegalIntent> {
        let point = position
            .point()
            .ok_or_else(|| IllegalIntent::NotABoardPoint(position.to_string()))?;
        let victim = turn.opponent();
        if !state.board().get(point).is(victim) {
            return Err(IllegalIntent::NotOpponentPiece(position.to_string()));
        }
        if !board::capturable(state.board(), victim).contains(&point) {
            return Err(IllegalIntent::ProtectedMill(position.to_string()));
        }

        let mut next = state.clone();
        next.set(position, Cell::Empty);
        next.reset_quiet_plies();
        next.record_ply(false);
        Ok(self.advance(next, turn))
    }

    /// Slide (`flying == false`) or fly a piece already on the board.
    fn relocate(
        &self,
        state: &GameState,
        turn: Player,
        from: Position,
        to: Position,
        flying: bool,
    ) -> Result<GameState, IllegalIntent> {
        let source = from
            .point()
            .ok_or_else(|| IllegalIntent::NotABoardPoint(from.to_string()))?;
        match state.board().get(source).owner() {
            None => return Err(IllegalIntent::EmptySource(from.to_string())),
            Some(owner) if owner != turn => {
                return Err(IllegalIntent::NotYourPiece(from.to_string()))
            }
            Some(_) => {}
        }
        let target = empty_point(state, to)?;
        if !flying && !board::is_adjacent(source, target) {
            return Err(IllegalIntent::NotAdjacent {
                from: from.to_string(),
                to: to.to_string(),
            });
        }

        let mut next = state.clone();
        next.transfer(from, target);
        next.record_ply(true);
        Ok(self.conclude(state, next, turn, target))
    }

    /// Decide between a capture and a plain turn advance after `mover` put
    /// a piece on `touched`.
    fn conclude(
        &self,
        before: &GameState,
        mut next: GameState,
        mover: Player,
        touched: Point,
    ) -> GameState {
        let milled = board::formed_new_mill(before.board(), next.board(), mover, touched);

        if milled && next.board_count(mover.opponent()) > 0 {
            next.set_phase(Phase::AwaitingCapture { turn: mover });
            next
        } else {
            self.advance(next, mover)
        }
    }

    /// Hand the turn to the opponent of `mover`, ending the game when
    /// they have lost or the position is drawn.
    fn advance(&self, mut next: GameState, mover: Player) -> GameState {
        let side = mover.opponent();

        if next.pieces(side) < usize::from(self.config.min_pieces) {
            next.finish(GameResult::Winner(mover), side);
            return next;
        }

        if next.tray_count(side) > 0 {
            next.set_phase(Phase::Placing { turn: side });
            return next;
        }
        if next.tray_count(mover) > 0 {
            // Only reachable from imported positions with uneven trays.
            next.set_phase(Phase::Placing { turn: mover });
            return next;
        }

        let phase = self.movement_phase(&next, side);
        next.set_phase(phase);

        if !next.board().can_move(side, matches!(phase, Phase::Flying { .. })) {
            next.finish(GameResult::Winner(mover), side);
            return next;
        }

        let seen = next.record_repetition();
        let quiet_limit_hit = self
            .config
            .quiet_ply_limit
            .is_some_and(|limit| next.quiet_plies() >= limit);
        let repetition_limit_hit = self.config.repetition_limit.is_some_and(|limit| seen >= limit);

        if quiet_limit_hit || repetition_limit_hit {
            debug!(quiet_plies = next.quiet_plies(), repetitions = seen, "draw");
            next.finish(GameResult::Draw, side);
        }
        next
    }

    fn movement_phase(&self, state: &GameState, side: Player) -> Phase {
        if self.config.flying && state.board_count(side) == usize::from(self.config.fly_threshold) {
            Phase::Flying { turn: side }
        } else {
            Phase::Moving { turn: side }
        }
    }

    /// Reject a transition that produced a state these rules cannot reach.
    fn verify(&self, before: &GameState, after: &GameState) -> Result<(), EngineError> {
        let total = |s: &GameState| s.pieces(Player::Black) + s.pieces(Player::White);

        let check = after.validate(&self.config).and_then(|()| {
            if total(after) > total(before) {
                Err(EngineError::InconsistentState(format!(
                    "piece count grew from {} to {}",
                    total(before),
                    total(after)
                )))
            } else {
                Ok(())
            }
        });

        if let Err(err) = &check {
            error!(
                %err,
                before = %before.phase(),
                after = %after.phase(),
                board = %after.board().display(),
                "transition aborted"
            );
        }
        check
    }
}

impl RulesEngine for MorrisRules {
    fn config(&self) -> &RulesConfig {
        &self.config
    }

    #[instrument(
        level = "debug",
        skip(self, state, intent),
        fields(phase = %state.phase(), intent = %intent)
    )]
    fn apply(&self, state: &GameState, intent: &Intent) -> Result<GameState, EngineError> {
        let outcome = match (state.phase(), *intent) {
            (_, Intent::NewGame) => Ok(GameState::new_game()),
            (Phase::Start, _) => Err(IllegalIntent::GameNotStarted),
            (Phase::Terminal { .. }, _) => Err(IllegalIntent::GameOver),
            (Phase::Placing { turn }, Intent::Place { from, to }) => {
                self.place(state, turn, from, to)
            }
            (Phase::AwaitingCapture { turn }, Intent::Capture { position }) => {
                self.capture(state, turn, position)
            }
            (Phase::Moving { turn }, Intent::Move { from, to }) => {
                self.relocate(state, turn, from, to, false)
            }
            (Phase::Flying { turn }, Intent::Fly { from, to }) => {
                self.relocate(state, turn, from, to, true)
            }
            (phase, intent) => Err(IllegalIntent::WrongPhase {
                phase: phase.kind(),
                intent: intent.kind(),
            }),
        };

        let next = outcome.map_err(|reason| {
            debug!(%reason, "intent rejected");
            EngineError::from(reason)
        })?;

        if !matches!(intent, Intent::NewGame) {
            self.verify(state, &next)?;
        }
        if next.phase().kind() != state.phase().kind() {
            debug!(from = %state.phase(), to = %next.phase(), "phase changed");
        }
        debug!(ply = next.ply(), next = %next.phase(), "intent applied");
        Ok(next)
    }

    fn legal_sources(&self, state: &GameState) -> Vec<Position> {
        match state.phase() {
            Phase::Placing { turn } => (0..TRAY_SIZE)
                .filter_map(|i| TraySlot::new(turn, i))
                .map(Position::Tray)
                .filter(|&slot| !state.get(slot).is_empty())
                .collect(),
            Phase::AwaitingCapture { turn } => board::capturable(state.board(), turn.opponent())
                .into_iter()
                .map(Position::Board)
                .collect(),
            Phase::Moving { turn } | Phase::Flying { turn } => state
                .board()
                .points_of(turn)
                .map(Position::Board)
                .filter(|&from| !self.legal_destinations(state, from).is_empty())
                .collect(),
            Phase::Start | Phase::Terminal { .. } => Vec::new(),
        }
    }

    #[instrument(level = "trace", skip(self, state), fields(phase = %state.phase()))]
    fn legal_destinations(&self, state: &GameState, from: Position) -> FxHashSet<Position> {
        let board = state.board();
        match (state.phase(), from) {
            (Phase::Placing { turn }, Position::Tray(slot))
                if slot.side() == turn && !state.get(from).is_empty() =>
            {
                board.empty_points().map(Position::Board).collect()
            }
            (Phase::Moving { turn }, Position::Board(point)) if board.get(point).is(turn) => {
                topology()
                    .neighbors(point)
                    .iter()
                    .copied()
                    .filter(|&n| board.is_empty(n))
                    .map(Position::Board)
                    .collect()
            }
            (Phase::Flying { turn }, Position::Board(point)) if board.get(point).is(turn) => {
                board.empty_points().map(Position::Board).collect()
            }
            _ => FxHashSet::default(),
        }
    }
}

/// Resolve `to` as an empty board point.
fn empty_point(state: &GameState, to: Position) -> Result<Point, IllegalIntent> {
    let point = to
        .point()
        .ok_or_else(|| IllegalIntent::NotABoardPoint(to.to_string()))?;
    if !state.board().is_empty(point) {
        return Err(IllegalIntent::Occupied(to.to_string()));
    }
    Ok(point)
}
