//! Game session state machine.
//!
//! One [`GameSession`] owns the board and record exclusively. All mutations
//! happen sequentially in response to discrete events: a local click, a
//! remote response or failure, a review-cursor change, or a new game. The
//! one asynchronous operation, the synchronization call, is represented by
//! the `AwaitingRemote` state; while it is outstanding no further local
//! move is accepted, so at most one request is ever in flight.

use tracing::{debug, info, instrument, warn};

use crate::game::{Board, Move, MoveRecord, Player, ReviewCursor, reconstruct};
use crate::remote::{SyncRequest, SyncResponse};

/// Board side used for the idle backdrop before the first game starts.
const DEFAULT_SIZE: usize = 9;

/// Lifecycle states of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// No game running; size and opponent are being chosen.
    Setup,
    /// Live play, local player to move.
    AwaitingLocalMove,
    /// Live play, a synchronization request is outstanding.
    AwaitingRemote,
    /// The rules service reported a winner.
    Finished(Player),
}

/// A running game against one remote opponent.
///
/// Review mode is orthogonal to the live states: engaging the cursor only
/// changes which board [`GameSession::displayed_board`] returns, never the
/// live board, the record, or the state machine.
#[derive(Debug, Clone)]
pub struct GameSession {
    state: SessionState,
    board: Board,
    record: MoveRecord,
    size: usize,
    opponent: Option<String>,
    generation: u64,
    review: Option<ReviewCursor>,
}

impl GameSession {
    /// Creates a session in setup, with an empty default board on display.
    #[instrument]
    pub fn new() -> Self {
        Self {
            state: SessionState::Setup,
            board: Board::new(DEFAULT_SIZE),
            record: MoveRecord::new(),
            size: DEFAULT_SIZE,
            opponent: None,
            generation: 0,
            review: None,
        }
    }

    /// Current state.
    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Live board (the optimistic local view during play).
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Canonical move record.
    pub fn record(&self) -> &MoveRecord {
        &self.record
    }

    /// Board side length of the current game.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Selected opponent, once a game has started.
    pub fn opponent(&self) -> Option<&str> {
        self.opponent.as_deref()
    }

    /// Generation of the current game, bumped by every `start_game`.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Starts a new game, discarding any previous board and record.
    ///
    /// Rejects (no state change) when no opponent is selected or the size
    /// is too small for the coordinate map, which divides by `size - 1`.
    /// Bumping the generation guarantees that a response still in flight
    /// for the previous game is recognized as stale and discarded.
    #[instrument(skip(self), fields(generation = self.generation))]
    pub fn start_game(&mut self, size: usize, opponent: Option<&str>) -> bool {
        let Some(opponent) = opponent else {
            warn!("Ignoring start request without an opponent selection");
            return false;
        };
        if size < 2 {
            warn!(size, "Ignoring start request with a degenerate board size");
            return false;
        }

        self.generation += 1;
        self.size = size;
        self.board = Board::new(size);
        self.record = MoveRecord::new();
        self.opponent = Some(opponent.to_string());
        self.review = None;
        self.state = SessionState::AwaitingLocalMove;

        info!(size, opponent, generation = self.generation, "Game started");
        true
    }

    /// Submits a local move.
    ///
    /// Valid only while awaiting a local move. Occupied or out-of-bounds
    /// targets, and submissions in any other state, are absorbed silently:
    /// the state does not change and `None` is returned. On success the
    /// move is applied optimistically, recorded, and a request payload for
    /// the rules service is returned; the session then refuses further
    /// moves until the outcome arrives.
    #[instrument(skip(self), fields(generation = self.generation))]
    pub fn submit_local_move(&mut self, row: usize, col: usize) -> Option<SyncRequest> {
        if self.state != SessionState::AwaitingLocalMove {
            debug!(state = ?self.state, "Dropping move submission outside local turn");
            return None;
        }

        let mover = self.record.to_move();
        let board = match self.board.place(row, col, mover) {
            Ok(board) => board,
            Err(e) => {
                debug!(error = %e, "Dropping invalid move submission");
                return None;
            }
        };

        self.board = board;
        self.record = self.record.append(Move::new(row, col));
        self.state = SessionState::AwaitingRemote;

        info!(row, col, mover = %mover, "Local move applied, synchronizing");
        Some(SyncRequest {
            generation: self.generation,
            board: self.board.clone(),
            record: self.record.clone(),
            opponent: self.opponent.clone().unwrap_or_default(),
            mover,
        })
    }

    /// Applies the canonical state returned by the rules service.
    ///
    /// A response tagged with an older generation belongs to a superseded
    /// game and is discarded without touching current state; this is the
    /// one failure mode that must never be allowed through, only dropped.
    #[instrument(skip(self, response), fields(current = self.generation))]
    pub fn apply_remote(&mut self, generation: u64, response: SyncResponse) {
        if generation != self.generation {
            debug!(stale = generation, "Discarding stale response");
            return;
        }
        if self.state != SessionState::AwaitingRemote {
            debug!(state = ?self.state, "Discarding response outside synchronization");
            return;
        }

        self.board = response.board;
        self.record = response.record;

        match response.winner {
            Some(winner) => {
                info!(winner = %winner, "Game finished");
                self.state = SessionState::Finished(winner);
            }
            None => {
                debug!(moves = self.record.len(), "Canonical state merged");
                self.state = SessionState::AwaitingLocalMove;
            }
        }
    }

    /// Records a failed synchronization attempt.
    ///
    /// The optimistic local state stands as last-known; the session goes
    /// back to accepting local moves, and the next submission implicitly
    /// retries the exchange. Stale failures are ignored like stale
    /// responses.
    #[instrument(skip(self), fields(current = self.generation))]
    pub fn remote_failed(&mut self, generation: u64) {
        if generation != self.generation {
            debug!(stale = generation, "Discarding stale failure");
            return;
        }
        if self.state != SessionState::AwaitingRemote {
            return;
        }
        warn!("Synchronization failed, keeping optimistic state");
        self.state = SessionState::AwaitingLocalMove;
    }

    /// Returns to setup for a new game.
    #[instrument(skip(self))]
    pub fn enter_setup(&mut self) {
        self.review = None;
        self.state = SessionState::Setup;
    }

    // ── Review mode ──────────────────────────────────────────────

    /// Review cursor position, when review is engaged.
    pub fn review_position(&self) -> Option<usize> {
        self.review.map(|c| c.position())
    }

    /// Whether a historical position is currently displayed.
    pub fn is_reviewing(&self) -> bool {
        self.review.is_some()
    }

    /// Steps the review cursor one move back.
    pub fn review_back(&mut self) {
        if self.state == SessionState::Setup || self.record.is_empty() {
            return;
        }
        let cursor = self
            .review
            .unwrap_or_else(|| ReviewCursor::new(self.record.len()));
        self.review = Some(cursor.back());
    }

    /// Steps the review cursor one move forward, leaving review mode when
    /// it reaches the live position.
    pub fn review_forward(&mut self) {
        if let Some(cursor) = self.review {
            let next = cursor.forward(self.record.len());
            self.review = if next.at_end(self.record.len()) {
                None
            } else {
                Some(next)
            };
        }
    }

    /// Jumps back to the live position.
    pub fn review_jump_to_end(&mut self) {
        self.review = None;
    }

    /// Board to display: the live board, or a reconstruction of the
    /// selected record prefix while reviewing.
    ///
    /// Reconstruction is deterministic, so stepping the cursor around and
    /// back always lands on the same grid the live path produced.
    pub fn displayed_board(&self) -> Board {
        match self.review {
            Some(cursor) => reconstruct(&self.record.prefix(cursor.position()), self.size),
            None => self.board.clone(),
        }
    }
}

impl Default for GameSession {
    fn default() -> Self {
        Self::new()
    }
}
