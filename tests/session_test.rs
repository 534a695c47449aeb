//! Tests for the game session state machine.

use goban_client::{
    Board, Cell, GameSession, Move, MoveRecord, Player, SessionState, SyncResponse, reconstruct,
};

fn started_session() -> GameSession {
    let mut session = GameSession::new();
    assert!(session.start_game(9, Some("robot-9")));
    session
}

/// Builds the canonical response the service would send after answering
/// the local record with one opponent move.
fn response_for(record: &[(usize, usize)], winner: Option<Player>) -> SyncResponse {
    let record: MoveRecord = record
        .iter()
        .map(|&(row, col)| Move::new(row, col))
        .collect::<Vec<_>>()
        .into();
    SyncResponse {
        board: reconstruct(&record, 9),
        record,
        winner,
    }
}

#[test]
fn test_start_requires_an_opponent() {
    let mut session = GameSession::new();
    assert!(!session.start_game(9, None));
    assert_eq!(session.state(), SessionState::Setup);
}

#[test]
fn test_start_rejects_degenerate_size() {
    let mut session = GameSession::new();
    assert!(!session.start_game(1, Some("robot-9")));
    assert_eq!(session.state(), SessionState::Setup);
}

#[test]
fn test_submit_applies_optimistically_and_requests_sync() {
    let mut session = started_session();
    let request = session.submit_local_move(4, 4).expect("move accepted");

    assert_eq!(session.state(), SessionState::AwaitingRemote);
    assert_eq!(session.board().get(4, 4), Some(Cell::Stone(Player::Black)));
    assert_eq!(session.record().len(), 1);

    assert_eq!(request.opponent, "robot-9");
    assert_eq!(request.mover, Player::Black);
    assert_eq!(request.record.len(), 1);
    assert_eq!(request.board.get(4, 4), Some(Cell::Stone(Player::Black)));
}

#[test]
fn test_submit_before_start_is_ignored() {
    let mut session = GameSession::new();
    assert!(session.submit_local_move(0, 0).is_none());
    assert_eq!(session.state(), SessionState::Setup);
}

#[test]
fn test_submit_on_occupied_cell_changes_nothing() {
    let mut session = started_session();
    let request = session.submit_local_move(0, 0).unwrap();
    session.apply_remote(
        request.generation,
        response_for(&[(0, 0), (1, 1)], None),
    );
    assert_eq!(session.state(), SessionState::AwaitingLocalMove);

    // Cell (0, 0) is occupied: the submission is absorbed silently.
    let before = session.board().clone();
    assert!(session.submit_local_move(0, 0).is_none());
    assert_eq!(session.state(), SessionState::AwaitingLocalMove);
    assert_eq!(session.board(), &before);
    assert_eq!(session.record().len(), 2);
}

#[test]
fn test_second_submit_while_awaiting_remote_is_ignored() {
    let mut session = started_session();
    assert!(session.submit_local_move(4, 4).is_some());
    assert!(session.submit_local_move(5, 5).is_none());
    assert_eq!(session.record().len(), 1);
}

#[test]
fn test_remote_response_replaces_local_state() {
    let mut session = started_session();
    let request = session.submit_local_move(4, 4).unwrap();

    session.apply_remote(
        request.generation,
        response_for(&[(4, 4), (3, 4)], None),
    );

    assert_eq!(session.state(), SessionState::AwaitingLocalMove);
    assert_eq!(session.record().len(), 2);
    assert_eq!(session.board().get(3, 4), Some(Cell::Stone(Player::White)));
}

#[test]
fn test_winner_finishes_the_session() {
    let mut session = started_session();
    let request = session.submit_local_move(4, 4).unwrap();

    session.apply_remote(
        request.generation,
        response_for(&[(4, 4), (3, 4)], Some(Player::White)),
    );

    assert_eq!(session.state(), SessionState::Finished(Player::White));
    // No further moves are accepted.
    assert!(session.submit_local_move(5, 5).is_none());
}

#[test]
fn test_remote_failure_keeps_optimistic_state() {
    let mut session = started_session();
    let request = session.submit_local_move(4, 4).unwrap();

    session.remote_failed(request.generation);

    assert_eq!(session.state(), SessionState::AwaitingLocalMove);
    assert_eq!(session.board().get(4, 4), Some(Cell::Stone(Player::Black)));
    assert_eq!(session.record().len(), 1);
}

#[test]
fn test_stale_response_is_discarded() {
    let mut session = started_session();
    let request = session.submit_local_move(4, 4).unwrap();
    let stale_generation = request.generation;

    // A new game supersedes the outstanding request.
    assert!(session.start_game(9, Some("robot-9")));
    session.apply_remote(
        stale_generation,
        response_for(&[(4, 4), (3, 4)], Some(Player::White)),
    );

    // The new session's empty grid is intact and play continues.
    assert_eq!(session.state(), SessionState::AwaitingLocalMove);
    assert_eq!(session.board(), &Board::new(9));
    assert!(session.record().is_empty());
}

#[test]
fn test_stale_failure_is_discarded() {
    let mut session = started_session();
    let request = session.submit_local_move(4, 4).unwrap();
    let stale_generation = request.generation;

    assert!(session.start_game(9, Some("robot-9")));
    assert!(session.submit_local_move(2, 2).is_some());
    session.remote_failed(stale_generation);

    // Still waiting on the new game's exchange.
    assert_eq!(session.state(), SessionState::AwaitingRemote);
}

#[test]
fn test_review_never_touches_live_state() {
    let mut session = started_session();
    let request = session.submit_local_move(4, 4).unwrap();
    session.apply_remote(
        request.generation,
        response_for(&[(4, 4), (3, 4)], None),
    );

    let live = session.board().clone();

    session.review_back();
    assert_eq!(session.review_position(), Some(1));
    let shown = session.displayed_board();
    assert_eq!(shown.get(4, 4), Some(Cell::Stone(Player::Black)));
    assert_eq!(shown.get(3, 4), Some(Cell::Empty));

    session.review_back();
    assert_eq!(session.review_position(), Some(0));
    assert_eq!(session.displayed_board(), Board::new(9));

    // Cursor at zero stays put.
    session.review_back();
    assert_eq!(session.review_position(), Some(0));

    // Live board and record were never altered.
    assert_eq!(session.board(), &live);
    assert_eq!(session.record().len(), 2);
    assert_eq!(session.state(), SessionState::AwaitingLocalMove);
}

#[test]
fn test_review_forward_returns_to_live() {
    let mut session = started_session();
    let request = session.submit_local_move(4, 4).unwrap();
    session.apply_remote(
        request.generation,
        response_for(&[(4, 4), (3, 4)], None),
    );

    session.review_back();
    session.review_forward();
    assert!(!session.is_reviewing());
    assert_eq!(session.displayed_board(), *session.board());
}

#[test]
fn test_review_jump_to_end() {
    let mut session = started_session();
    let request = session.submit_local_move(4, 4).unwrap();
    session.apply_remote(
        request.generation,
        response_for(&[(4, 4), (3, 4)], None),
    );

    session.review_back();
    session.review_back();
    session.review_jump_to_end();
    assert!(!session.is_reviewing());
}

#[test]
fn test_moves_while_reviewing_are_still_accepted() {
    // Review only changes the displayed board; live play goes on.
    let mut session = started_session();
    let request = session.submit_local_move(4, 4).unwrap();
    session.apply_remote(
        request.generation,
        response_for(&[(4, 4), (3, 4)], None),
    );

    session.review_back();
    let request = session.submit_local_move(5, 5).expect("live play continues");
    assert_eq!(request.record.len(), 3);
    assert_eq!(request.mover, Player::Black);
}
