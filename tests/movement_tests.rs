//! Movement, flying and end-of-game tests.
//!
//! Positions are imported through the canonical form, the same way a host
//! would resume a saved game.

use morris_engine::core::TRAY_SIZE;
use morris_engine::{
    Cell, EngineError, GameResult, GameState, IllegalIntent, Intent, MorrisRules, Phase, PhaseKind,
    Player, Position, RulesConfig, RulesEngine,
};

fn slide(from: &str, to: &str) -> Intent {
    Intent::slide(from, to).unwrap()
}

fn fly(from: &str, to: &str) -> Intent {
    Intent::fly(from, to).unwrap()
}

fn capture(at: &str) -> Intent {
    Intent::capture(at).unwrap()
}

fn key(key: &str) -> Position {
    key.parse().unwrap()
}

/// Import a post-placement position.
fn position(black: &[&str], white: &[&str], phase: PhaseKind, turn: Player) -> GameState {
    let mut canonical = GameState::start().to_canonical();
    canonical.black_tray = vec![Cell::Empty; TRAY_SIZE];
    canonical.white_tray = vec![Cell::Empty; TRAY_SIZE];
    for k in black {
        canonical.board.insert(k.parse().unwrap(), Cell::Black);
    }
    for k in white {
        canonical.board.insert(k.parse().unwrap(), Cell::White);
    }
    canonical.phase = phase;
    canonical.turn = turn;
    GameState::from_canonical(&canonical, &RulesConfig::default()).unwrap()
}

fn play(rules: &MorrisRules, mut state: GameState, intents: &[Intent]) -> GameState {
    for intent in intents {
        state = rules.apply(&state, intent).unwrap();
    }
    state
}

// =============================================================================
// Sliding
// =============================================================================

/// Slides follow the declared adjacency only.
#[test]
fn test_slide_adjacency() {
    let rules = MorrisRules::default();
    let state = position(
        &["d2", "a1", "g7", "c5"],
        &["b2", "f6", "a7", "e3"],
        PhaseKind::Moving,
        Player::Black,
    );

    let mut destinations: Vec<Position> = rules
        .legal_destinations(&state, key("d2"))
        .into_iter()
        .collect();
    destinations.sort();
    assert_eq!(destinations, vec![key("d1"), key("f2"), key("d3")]);

    // Same row, different ring.
    assert_eq!(
        rules.apply(&state, &slide("d2", "d5")),
        Err(EngineError::IllegalIntent(IllegalIntent::NotAdjacent {
            from: "d2".to_string(),
            to: "d5".to_string(),
        }))
    );
    // Flying is not allowed with four pieces.
    assert!(matches!(
        rules.apply(&state, &fly("d2", "d5")),
        Err(EngineError::IllegalIntent(IllegalIntent::WrongPhase { .. }))
    ));

    let next = rules.apply(&state, &slide("d2", "d1")).unwrap();
    assert_eq!(next.get(key("d1")), Cell::Black);
    assert_eq!(next.get(key("d2")), Cell::Empty);
    assert_eq!(next.phase(), Phase::Moving { turn: Player::White });
}

/// Sliding out of a mill and back re-forms it and earns a capture.
#[test]
fn test_mill_oscillation() {
    let rules = MorrisRules::default();
    let state = position(
        &["a1", "d1", "g1", "c5"],
        &["a7", "d7", "e3", "b6"],
        PhaseKind::Moving,
        Player::Black,
    );
    assert!(state.has_mill(Player::Black));

    // Sliding out is not a new mill.
    let state = play(&rules, state, &[slide("g1", "g4")]);
    assert_eq!(state.phase(), Phase::Moving { turn: Player::White });

    // Back in after the line was broken.
    let state = play(&rules, state, &[slide("e3", "e4"), slide("g4", "g1")]);
    assert_eq!(state.phase(), Phase::AwaitingCapture { turn: Player::Black });
    assert_eq!(state.quiet_plies(), 3);

    let state = play(&rules, state, &[capture("b6")]);
    assert_eq!(state.quiet_plies(), 0);
    assert_eq!(state.board_count(Player::White), 3);
}

/// Moving a different piece beside a standing mill earns nothing.
#[test]
fn test_standing_mill_earns_nothing() {
    let rules = MorrisRules::default();
    let state = position(
        &["a1", "d1", "g1", "f4"],
        &["a7", "d7", "e3", "b6"],
        PhaseKind::Moving,
        Player::Black,
    );

    let state = rules.apply(&state, &slide("f4", "g4")).unwrap();
    assert_eq!(state.phase(), Phase::Moving { turn: Player::White });
}

// =============================================================================
// Flying
// =============================================================================

/// A side reduced to three board pieces flies.
#[test]
fn test_enter_flying_after_capture() {
    let rules = MorrisRules::default();
    let state = position(
        &["a1", "d1", "g4", "c5"],
        &["a7", "d7", "e3", "b6"],
        PhaseKind::Moving,
        Player::Black,
    );

    let state = play(&rules, state, &[slide("g4", "g1"), capture("b6")]);
    assert_eq!(state.phase(), Phase::Flying { turn: Player::White });

    let destinations = rules.legal_destinations(&state, key("a7"));
    assert_eq!(destinations.len(), 24 - 7);
    assert!(destinations.contains(&key("f2")));
    assert!(!destinations.contains(&key("a1")));

    let state = rules.apply(&state, &fly("a7", "f2")).unwrap();
    assert_eq!(state.get(key("f2")), Cell::White);
    assert_eq!(state.phase(), Phase::Moving { turn: Player::Black });
}

/// With flying disabled, three pieces keep sliding.
#[test]
fn test_flying_disabled() {
    let rules = MorrisRules::new(RulesConfig::default().with_flying(false));
    let state = position(
        &["a1", "d1", "g4", "c5"],
        &["a7", "d7", "e3", "b6"],
        PhaseKind::Moving,
        Player::Black,
    );

    let state = play(&rules, state, &[slide("g4", "g1"), capture("b6")]);
    assert_eq!(state.phase(), Phase::Moving { turn: Player::White });
    assert_eq!(rules.legal_destinations(&state, key("e3")).len(), 2);
    assert_eq!(rules.legal_destinations(&state, key("a7")).len(), 1);
}

// =============================================================================
// Game end
// =============================================================================

/// Dropping below three pieces loses.
#[test]
fn test_two_pieces_lose() {
    let rules = MorrisRules::default();
    let state = position(
        &["a1", "d1", "g4"],
        &["a7", "d7", "e3", "b6"],
        PhaseKind::Flying,
        Player::Black,
    );

    let state = play(&rules, state, &[fly("g4", "g1")]);
    assert_eq!(state.phase(), Phase::AwaitingCapture { turn: Player::Black });

    let state = play(
        &rules,
        state,
        &[
            capture("b6"),
            fly("a7", "f4"),
            fly("g1", "g7"),
            fly("e3", "e5"),
            fly("g7", "g1"),
        ],
    );
    assert_eq!(state.phase(), Phase::AwaitingCapture { turn: Player::Black });

    let state = play(&rules, state, &[capture("d7")]);
    assert_eq!(state.result(), Some(GameResult::Winner(Player::Black)));
    assert_eq!(state.phase_info().phase, PhaseKind::Terminal);
    assert_eq!(
        rules.apply(&state, &fly("e3", "e4")),
        Err(EngineError::IllegalIntent(IllegalIntent::GameOver))
    );
}

/// A side with no legal slide loses at the start of its turn.
#[test]
fn test_blocked_side_loses() {
    let rules = MorrisRules::default();
    let state = position(
        &["a1", "g1", "a7", "g7"],
        &["d1", "a4", "g4", "d6"],
        PhaseKind::Moving,
        Player::White,
    );

    let state = rules.apply(&state, &slide("d6", "d7")).unwrap();
    assert_eq!(state.result(), Some(GameResult::Winner(Player::White)));
    assert!(rules.legal_intents(&state).is_empty());
}

/// Shuffling without captures hits the quiet-ply limit.
#[test]
fn test_quiet_ply_draw() {
    let rules = MorrisRules::new(
        RulesConfig::default()
            .with_quiet_ply_limit(Some(6))
            .with_repetition_limit(None),
    );
    let mut state = position(
        &["b2", "e3", "c5", "f6"],
        &["g4", "d7", "a1", "d5"],
        PhaseKind::Moving,
        Player::Black,
    );

    let cycle = [
        slide("b2", "b4"),
        slide("g4", "g7"),
        slide("b4", "b2"),
        slide("g7", "g4"),
    ];
    for intent in cycle.iter().cycle().take(5) {
        state = rules.apply(&state, intent).unwrap();
        assert_eq!(state.result(), None);
    }
    state = rules.apply(&state, &cycle[1]).unwrap();
    assert_eq!(state.quiet_plies(), 6);
    assert_eq!(state.result(), Some(GameResult::Draw));
}

/// The same position with the same side to move a third time is a draw.
#[test]
fn test_threefold_repetition_draw() {
    let rules = MorrisRules::new(RulesConfig::default().with_quiet_ply_limit(None));
    let mut state = position(
        &["b2", "e3", "c5", "f6"],
        &["g4", "d7", "a1", "d5"],
        PhaseKind::Moving,
        Player::Black,
    );

    let cycle = [
        slide("b2", "b4"),
        slide("g4", "g7"),
        slide("b4", "b2"),
        slide("g7", "g4"),
    ];
    // The first position after each move recurs every four plies.
    for intent in cycle.iter().cycle().take(8) {
        state = rules.apply(&state, intent).unwrap();
        assert_eq!(state.result(), None);
    }
    state = rules.apply(&state, &cycle[0]).unwrap();
    assert_eq!(state.repetitions(), 3);
    assert_eq!(state.result(), Some(GameResult::Draw));
}
