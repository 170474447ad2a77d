//! Board tests - grid storage, collision and row clearing

use tetris_sim::core::{base_matrix, Board, Matrix};
use tetris_sim::types::{PieceKind, BOARD_HEIGHT, BOARD_WIDTH};

fn fill_row(board: &mut Board, y: i8, kind: PieceKind) {
    for x in 0..BOARD_WIDTH as i8 {
        board.set(x, y, Some(kind));
    }
}

#[test]
fn test_board_new_empty() {
    let board = Board::new();
    assert_eq!(board.width(), BOARD_WIDTH);
    assert_eq!(board.height(), BOARD_HEIGHT);
    assert_eq!(board.rows().count(), 20);
    assert!(board.rows().all(|row| row.len() == 10));

    for y in 0..BOARD_HEIGHT as i8 {
        for x in 0..BOARD_WIDTH as i8 {
            assert!(!board.is_occupied(x, y), "cell ({}, {}) should be empty", x, y);
            assert_eq!(board.get(x, y), Some(None));
        }
    }
}

#[test]
fn test_board_get_out_of_bounds() {
    let board = Board::new();
    assert_eq!(board.get(-1, 0), None);
    assert_eq!(board.get(0, -1), None);
    assert_eq!(board.get(BOARD_WIDTH as i8, 0), None);
    assert_eq!(board.get(0, BOARD_HEIGHT as i8), None);
}

#[test]
fn test_board_set_and_get() {
    let mut board = Board::new();
    assert!(board.set(5, 10, Some(PieceKind::T)));
    assert_eq!(board.get(5, 10), Some(Some(PieceKind::T)));
    assert!(board.is_occupied(5, 10));

    assert!(board.set(5, 10, None));
    assert_eq!(board.get(5, 10), Some(None));
}

#[test]
fn test_board_set_out_of_bounds() {
    let mut board = Board::new();
    assert!(!board.set(-1, 0, Some(PieceKind::I)));
    assert!(!board.set(0, 20, Some(PieceKind::I)));
    assert!(board.cells().iter().all(|c| c.is_none()));
}

#[test]
fn test_valid_position_walls_and_floor() {
    let board = Board::new();
    let o = base_matrix(PieceKind::O);

    assert!(board.is_valid_position(&o, 0, 0));
    assert!(board.is_valid_position(&o, 8, 18));
    assert!(!board.is_valid_position(&o, -1, 0));
    assert!(!board.is_valid_position(&o, 9, 0));
    assert!(!board.is_valid_position(&o, 0, 19));
}

#[test]
fn test_valid_position_above_top() {
    let board = Board::new();
    let o = base_matrix(PieceKind::O);
    assert!(board.is_valid_position(&o, 4, -2));
    assert!(board.is_valid_position(&o, 4, -100));
    // side walls still apply above the field
    assert!(!board.is_valid_position(&o, -1, -5));
}

#[test]
fn test_empty_bitmap_rows_may_hang_outside() {
    let board = Board::new();
    let i = base_matrix(PieceKind::I);
    // only the second bitmap row is occupied
    assert!(board.is_valid_position(&i, 0, 18));
    assert!(!board.is_valid_position(&i, 0, 19));
}

#[test]
fn test_lock_then_overlap_is_invalid() {
    let mut board = Board::new();
    let t = base_matrix(PieceKind::T);
    assert!(board.is_valid_position(&t, 3, 10));
    board.lock(&t, 3, 10, PieceKind::T);
    assert!(!board.is_valid_position(&t, 3, 10));

    assert_eq!(board.get(4, 10), Some(Some(PieceKind::T)));
    assert_eq!(board.get(3, 11), Some(Some(PieceKind::T)));
    assert_eq!(board.get(3, 10), Some(None));
}

#[test]
fn test_lock_skips_cells_above_field() {
    let mut board = Board::new();
    let t = base_matrix(PieceKind::T);
    board.lock(&t, 3, -1, PieceKind::T);

    let filled = board.cells().iter().filter(|c| c.is_some()).count();
    assert_eq!(filled, 3);
}

#[test]
fn test_board_is_row_full() {
    let mut board = Board::new();
    assert!(!board.is_row_full(19));
    for x in 0..9 {
        board.set(x, 19, Some(PieceKind::I));
    }
    assert!(!board.is_row_full(19));
    board.set(9, 19, Some(PieceKind::I));
    assert!(board.is_row_full(19));
    assert!(!board.is_row_full(20));
}

#[test]
fn test_clear_single_bottom_row() {
    let mut board = Board::new();
    fill_row(&mut board, 19, PieceKind::I);
    board.set(2, 18, Some(PieceKind::T));
    board.set(7, 0, Some(PieceKind::Z));

    assert_eq!(board.clear_rows(), 1);
    assert_eq!(board.get(2, 19), Some(Some(PieceKind::T)));
    assert_eq!(board.get(7, 1), Some(Some(PieceKind::Z)));
    assert!((0..10).all(|x| board.get(x, 0) == Some(None)));
    assert_eq!(board.cells().iter().filter(|c| c.is_some()).count(), 2);
}

#[test]
fn test_clear_is_noop_without_full_rows() {
    let mut board = Board::new();
    board.set(0, 19, Some(PieceKind::J));
    board.set(9, 5, Some(PieceKind::L));
    let before = board.clone();

    assert_eq!(board.clear_rows(), 0);
    assert_eq!(board, before);
    assert_eq!(board.clear_rows(), 0);
    assert_eq!(board, before);
}

#[test]
fn test_clear_four_rows() {
    let mut board = Board::new();
    for y in 16..20 {
        fill_row(&mut board, y, PieceKind::I);
    }
    board.set(4, 15, Some(PieceKind::O));

    assert_eq!(board.full_rows().as_slice(), &[16, 17, 18, 19]);
    assert_eq!(board.clear_rows(), 4);
    assert_eq!(board.get(4, 19), Some(Some(PieceKind::O)));
    assert_eq!(board.cells().iter().filter(|c| c.is_some()).count(), 1);
}

#[test]
fn test_clear_multiple_rows_keeps_order() {
    let mut board = Board::new();
    fill_row(&mut board, 19, PieceKind::I);
    board.set(0, 18, Some(PieceKind::S));
    fill_row(&mut board, 17, PieceKind::I);
    board.set(0, 16, Some(PieceKind::Z));

    assert_eq!(board.clear_rows(), 2);
    assert_eq!(board.get(0, 19), Some(Some(PieceKind::S)));
    assert_eq!(board.get(0, 18), Some(Some(PieceKind::Z)));
}

#[test]
fn test_board_reset() {
    let mut board = Board::new();
    fill_row(&mut board, 3, PieceKind::L);
    board.reset();
    assert_eq!(board, Board::new());
}

#[test]
fn test_ghost_row() {
    let mut board = Board::new();
    let o = base_matrix(PieceKind::O);
    assert_eq!(board.ghost_row(&o, 4, 0), 18);

    board.set(5, 12, Some(PieceKind::T));
    assert_eq!(board.ghost_row(&o, 4, 0), 10);
    // already resting
    assert_eq!(board.ghost_row(&o, 4, 10), 10);
}

#[test]
fn test_spawn_blocked() {
    let mut board = Board::new();
    let t = base_matrix(PieceKind::T);
    assert!(board.is_valid_position(&t, 3, 0));
    board.set(4, 1, Some(PieceKind::Z));
    assert!(!board.is_valid_position(&t, 3, 0));
}

#[test]
fn test_custom_matrix_collision() {
    let board = Board::new();
    let bar = Matrix::from_rows(&[&[1, 1, 1]]);
    assert!(board.is_valid_position(&bar, 7, 19));
    assert!(!board.is_valid_position(&bar, 8, 19));
}
