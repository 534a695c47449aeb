//! Tests for the board grid.

use goban_client::{Board, Cell, PlaceError, Player};

#[test]
fn test_new_board_is_empty() {
    let board = Board::new(9);
    assert_eq!(board.size(), 9);
    for row in 0..9 {
        for col in 0..9 {
            assert_eq!(board.get(row, col), Some(Cell::Empty));
        }
    }
}

#[test]
fn test_place_sets_exactly_one_cell() {
    let board = Board::new(5);
    let next = board.place(2, 3, Player::Black).unwrap();

    assert_eq!(next.get(2, 3), Some(Cell::Stone(Player::Black)));
    let changed = (0..5)
        .flat_map(|r| (0..5).map(move |c| (r, c)))
        .filter(|&(r, c)| next.get(r, c) != board.get(r, c))
        .count();
    assert_eq!(changed, 1);
}

#[test]
fn test_place_has_value_semantics() {
    let board = Board::new(5);
    let _next = board.place(0, 0, Player::Black).unwrap();

    // The original snapshot is untouched.
    assert_eq!(board.get(0, 0), Some(Cell::Empty));
}

#[test]
fn test_place_occupied_is_an_error() {
    let board = Board::new(5)
        .place(1, 1, Player::Black)
        .unwrap();

    let err = board.place(1, 1, Player::White).unwrap_err();
    assert_eq!(err, PlaceError::Occupied { row: 1, col: 1 });
    // And the board is unchanged.
    assert_eq!(board.get(1, 1), Some(Cell::Stone(Player::Black)));
}

#[test]
fn test_place_out_of_bounds_is_an_error() {
    let board = Board::new(5);
    let err = board.place(5, 0, Player::Black).unwrap_err();
    assert_eq!(
        err,
        PlaceError::OutOfBounds {
            row: 5,
            col: 0,
            size: 5
        }
    );
    assert!(board.place(0, 17, Player::Black).is_err());
}

#[test]
fn test_get_out_of_bounds_is_none() {
    let board = Board::new(5);
    assert_eq!(board.get(5, 0), None);
    assert_eq!(board.get(0, 5), None);
    assert!(!board.is_empty(5, 5));
}

#[test]
fn test_opponent_alternates() {
    assert_eq!(Player::Black.opponent(), Player::White);
    assert_eq!(Player::White.opponent(), Player::Black);
}
