//! Goban client library - board state and replay engine for a Go-style game
//!
//! The client tracks a move-by-move game state, translates between the
//! abstract grid and a rendered surface, and keeps a canonical move record
//! that can be replayed independently of live play. Rule enforcement is
//! delegated entirely to a remote rules service reached over HTTP.
//!
//! # Architecture
//!
//! - **Game core**: board grid, move record, replay reconstruction, and
//!   coordinate geometry - pure and synchronous
//! - **Session**: the state machine that owns board and record and guards
//!   against stale remote responses
//! - **Remote**: the HTTP exchange with the rules service
//! - **TUI**: ratatui front end driven by translated input actions

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Private module declarations
mod cli;
mod config;
mod game;
mod remote;
mod session;

// Public module - the binary drives the run loop through these parts
pub mod tui;

// Crate-level exports - CLI
pub use cli::Cli;

// Crate-level exports - Configuration
pub use config::{ClientConfig, ConfigError};

// Crate-level exports - Game core
pub use game::{
    Board, BoardGeometry, Cell, Move, MoveRecord, PlaceError, Player, ReviewCursor, reconstruct,
};

// Crate-level exports - Session
pub use session::{GameSession, SessionState};

// Crate-level exports - Remote service
pub use remote::{RulesClient, RulesService, SyncRequest, SyncResponse};

// Crate-level exports - Terminal UI
pub use tui::{Action, App, BoardSize, ClientEvent, Screen};
