//! Snapshot and event serialization shape

use serde_json::Value;
use tetris_sim::core::{GameEvent, GameSnapshot, GameState};
use tetris_sim::types::{GameAction, GameOverCause, PieceKind, Status};

#[test]
fn default_snapshot_serializes_empty_board() {
    let v = serde_json::to_value(GameSnapshot::default()).unwrap();
    assert_eq!(v["status"], "idle");
    assert!(v["active"].is_null());
    assert!(v["next"].is_null());

    let board = v["board"].as_array().unwrap();
    assert_eq!(board.len(), 20);
    assert!(board.iter().all(|row| row.as_array().unwrap().len() == 10));
    assert!(board.iter().flat_map(|row| row.as_array().unwrap()).all(Value::is_null));
}

#[test]
fn playing_snapshot_carries_piece_and_ghost() {
    let mut gs = GameState::new(1);
    gs.start();
    let snap = gs.snapshot();
    let v = serde_json::to_value(snap).unwrap();

    assert_eq!(v["status"], "playing");
    assert_eq!(v["active"]["kind"], snap.active.unwrap().kind.as_str());
    assert_eq!(v["active"]["rotation"], "North");
    assert_eq!(v["ghost_y"], snap.ghost_y.unwrap());
    assert_eq!(v["score"], 0);
    assert_eq!(v["timers"]["is_locking"], false);
}

#[test]
fn locked_cells_serialize_as_kind_names() {
    let mut gs = GameState::new(1);
    gs.start();
    let kind = gs.active().unwrap().kind;
    gs.apply_action(GameAction::HardDrop);

    let v = serde_json::to_value(gs.snapshot()).unwrap();
    let bottom = v["board"][19].as_array().unwrap();
    assert!(bottom.iter().any(|cell| cell == kind.as_str()));
}

#[test]
fn status_uses_kebab_case() {
    assert_eq!(serde_json::to_value(Status::GameOver).unwrap(), "game-over");
    assert_eq!(serde_json::to_value(Status::Paused).unwrap(), "paused");
}

#[test]
fn events_are_internally_tagged() {
    let v = serde_json::to_value(GameEvent::LinesCleared {
        count: 2,
        points: 300,
    })
    .unwrap();
    assert_eq!(v["type"], "linesCleared");
    assert_eq!(v["count"], 2);
    assert_eq!(v["points"], 300);

    let v = serde_json::to_value(GameEvent::GameOver {
        cause: GameOverCause::BlockOut,
    })
    .unwrap();
    assert_eq!(v["type"], "gameOver");

    let v = serde_json::to_value(GameEvent::Spawned { kind: PieceKind::T }).unwrap();
    assert_eq!(v["kind"], "T");
}

#[test]
fn action_names_parse_from_json() {
    let actions: Vec<GameAction> =
        serde_json::from_str(r#"["start","moveLeft","rotateCW","rotateCCW","hardDrop"]"#).unwrap();
    assert_eq!(
        actions,
        vec![
            GameAction::Start,
            GameAction::MoveLeft,
            GameAction::RotateCw,
            GameAction::RotateCcw,
            GameAction::HardDrop,
        ]
    );
}
