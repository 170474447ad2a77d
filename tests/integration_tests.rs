//! Integration tests for the session state machine

use tetris_sim::core::{GameConfig, GameEvent, GameState, PieceQueue};
use tetris_sim::types::{GameAction, GameOverCause, PieceKind, Rotation, Status};

/// Column the active piece should hard-drop in: the deepest landing spot whose
/// cells all stay within columns 0..=8, so column 9 never fills.
fn deepest_column(state: &GameState) -> i8 {
    let piece = state.active().unwrap();
    let board = state.board();
    let (min_dx, max_dx) = piece
        .matrix
        .cells()
        .fold((i8::MAX, i8::MIN), |(lo, hi), (dx, _)| (lo.min(dx), hi.max(dx)));

    (-min_dx..=8 - max_dx)
        .filter(|&x| board.is_valid_position(&piece.matrix, x, piece.y))
        .max_by_key(|&x| (board.ghost_row(&piece.matrix, x, piece.y), -x))
        .unwrap()
}

fn shift_to(state: &mut GameState, target: i8) {
    while state.active().unwrap().x > target {
        assert!(!state.apply_action(GameAction::MoveLeft).is_empty());
    }
    while state.active().unwrap().x < target {
        assert!(!state.apply_action(GameAction::MoveRight).is_empty());
    }
    state.apply_action(GameAction::ReleaseLeft);
    state.apply_action(GameAction::ReleaseRight);
}

#[test]
fn test_game_lifecycle() {
    let mut state = GameState::new(12345);
    assert_eq!(state.status(), Status::Idle);
    assert!(state.active().is_none());

    state.start();
    assert_eq!(state.status(), Status::Playing);
    assert!(state.active().is_some());

    state.apply_action(GameAction::Pause);
    assert_eq!(state.status(), Status::Paused);
    state.apply_action(GameAction::Resume);
    assert_eq!(state.status(), Status::Playing);
}

#[test]
fn test_twenty_hard_drops_score_only_drop_points() {
    let mut state = GameState::new(2024);
    state.start();

    let mut expected = 0;
    for _ in 0..20 {
        assert_eq!(state.status(), Status::Playing);
        let target = deepest_column(&state);
        shift_to(&mut state, target);

        let piece = state.active().unwrap();
        let rows = (state.ghost_y().unwrap() - piece.y) as u32;
        expected += 2 * rows;

        let events = state.apply_action(GameAction::HardDrop);
        assert!(events.contains(&GameEvent::HardDropped { rows }));
    }

    assert_eq!(state.score(), expected);
    assert_eq!(state.lines(), 0);
    assert_eq!(state.level(), 0);
}

#[test]
fn test_two_bags_hold_every_kind_once() {
    let mut queue = PieceQueue::new(31337);
    let draws: Vec<PieceKind> = (0..14).map(|_| queue.draw()).collect();

    for bag in draws.chunks(7) {
        for kind in PieceKind::ALL {
            assert_eq!(
                bag.iter().filter(|&&k| k == kind).count(),
                1,
                "{:?} in {:?}",
                kind,
                bag
            );
        }
    }
}

#[test]
fn test_kicked_rotation_on_the_floor_resets_lock_delay() {
    let seed = (1..1000)
        .find(|&seed| {
            let mut game = GameState::new(seed);
            game.start();
            game.active().map(|p| p.kind) == Some(PieceKind::T)
        })
        .unwrap();
    let mut state = GameState::new(seed);
    state.start();

    state.apply_action(GameAction::RotateCw);
    shift_to(&mut state, -1);
    assert_eq!(state.active().unwrap().rotation, Rotation::East);

    state.apply_action(GameAction::SoftDropOn);
    let mut guard = 0;
    while !state.is_locking() {
        state.tick(50.0);
        guard += 1;
        assert!(guard < 100, "piece never grounded");
    }
    let grounded = state.active().unwrap();
    assert_eq!(grounded.y, 17);
    assert_eq!(state.snapshot().timers.lock_ms, 50.0);

    let events = state.apply_action(GameAction::RotateCw);
    let piece = state.active().unwrap();
    assert_eq!(events.as_slice(), &[GameEvent::Rotated { kicked: true }]);
    assert_eq!(piece.rotation, Rotation::South);
    assert_eq!((piece.x, piece.y), (0, 17));
    assert!(state.is_locking());
    assert_eq!(state.snapshot().timers.lock_ms, 0.0);
}

#[test]
fn test_stacking_ends_in_block_out_without_touching_totals() {
    let mut state = GameState::new(8);
    state.start();

    let mut drops = 0;
    loop {
        let piece = state.active().unwrap();
        let rows = (state.ghost_y().unwrap() - piece.y) as u32;
        let score = state.score();

        let events = state.apply_action(GameAction::HardDrop);
        drops += 1;
        assert!(drops < 100, "never topped out");

        if state.status() == Status::GameOver {
            assert_eq!(state.game_over_cause(), Some(GameOverCause::BlockOut));
            assert!(events.contains(&GameEvent::GameOver {
                cause: GameOverCause::BlockOut
            }));
            assert_eq!(state.score(), score + 2 * rows);
            assert_eq!(state.lines(), 0);
            assert_eq!(state.level(), 0);
            break;
        }
    }

    let frozen = state.snapshot();
    state.tick(10_000.0);
    state.apply_action(GameAction::HardDrop);
    assert_eq!(state.snapshot(), frozen);
}

#[test]
fn test_pause_freezes_simulation() {
    let mut state = GameState::new(3);
    state.start();
    state.apply_action(GameAction::SoftDropOn);
    state.tick(50.0);
    state.apply_action(GameAction::Pause);

    let frozen = state.snapshot();
    for _ in 0..100 {
        state.tick(16.0);
    }
    assert_eq!(state.snapshot(), frozen);

    state.apply_action(GameAction::Resume);
    assert_eq!(state.snapshot().timers.drop_ms, 0.0);
}

#[test]
fn test_lock_delay_follows_config() {
    let config = GameConfig {
        lock_delay_ms: 100,
        ..GameConfig::default()
    };
    let mut state = GameState::with_config(4, config);
    state.start();
    state.apply_action(GameAction::SoftDropOn);

    let first = state.piece_id();
    let mut elapsed = 0.0;
    while state.piece_id() == first {
        state.tick(10.0);
        elapsed += 10.0;
        assert!(elapsed < 5_000.0);
    }
    // at most 20 rows at 50 ms each, then 100 ms of lock delay
    assert!(elapsed <= 20.0 * 50.0 + 100.0);
    assert!(state.board().cells().iter().any(|c| c.is_some()));
}

#[test]
fn test_same_seed_same_game() {
    let script = [
        GameAction::MoveLeft,
        GameAction::RotateCw,
        GameAction::HardDrop,
        GameAction::MoveRight,
        GameAction::MoveRight,
        GameAction::HardDrop,
        GameAction::RotateCcw,
        GameAction::HardDrop,
    ];

    let play = |seed: u32| {
        let mut state = GameState::new(seed);
        state.start();
        for (i, action) in script.iter().cycle().take(40).enumerate() {
            state.apply_action(*action);
            state.tick(16.0 * (i % 5) as f64);
        }
        state.snapshot()
    };

    assert_eq!(play(99), play(99));
}
