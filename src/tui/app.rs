//! Application state and event handling.

use ratatui::layout::Rect;
use strum::IntoEnumIterator;
use tracing::{debug, info};

use crate::config::ClientConfig;
use crate::game::BoardGeometry;
use crate::remote::{SyncRequest, SyncResponse};
use crate::session::{GameSession, SessionState};

/// Which screen the client shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    /// Board size and opponent selection.
    Setup,
    /// Live board (playing, reviewing, or finished).
    Game,
}

/// Board sizes offered in setup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::EnumIter)]
pub enum BoardSize {
    /// 5×5 board.
    Five,
    /// 7×7 board.
    Seven,
    /// 9×9 board.
    Nine,
    /// 13×13 board.
    Thirteen,
    /// 19×19 board.
    Nineteen,
}

impl BoardSize {
    /// Side length in intersections.
    pub fn cells(self) -> usize {
        match self {
            BoardSize::Five => 5,
            BoardSize::Seven => 7,
            BoardSize::Nine => 9,
            BoardSize::Thirteen => 13,
            BoardSize::Nineteen => 19,
        }
    }

    /// The choice matching `cells`, if it is one of the offered sizes.
    pub fn from_cells(cells: usize) -> Option<Self> {
        BoardSize::iter().find(|s| s.cells() == cells)
    }

    fn cycle(self, step: isize) -> Self {
        let all: Vec<Self> = BoardSize::iter().collect();
        let index = all.iter().position(|s| *s == self).unwrap_or(0) as isize;
        let next = (index + step).rem_euclid(all.len() as isize) as usize;
        all[next]
    }
}

impl std::fmt::Display for BoardSize {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let n = self.cells();
        write!(f, "{n}x{n}")
    }
}

/// Events delivered to the app from background tasks.
#[derive(Debug)]
pub enum ClientEvent {
    /// Opponent roster fetched.
    RosterLoaded(Vec<String>),
    /// Roster fetch failed.
    RosterFailed(String),
    /// Synchronization completed with canonical state.
    SyncCompleted {
        /// Session generation the request carried.
        generation: u64,
        /// Authoritative response.
        response: SyncResponse,
    },
    /// Synchronization failed.
    SyncFailed {
        /// Session generation the request carried.
        generation: u64,
        /// Human-readable cause.
        error: String,
    },
}

/// Main application state.
///
/// Owns the [`GameSession`] and the presentation parameters; the run loop
/// feeds it translated input actions and [`ClientEvent`]s and then redraws.
pub struct App {
    screen: Screen,
    session: GameSession,
    config: ClientConfig,
    roster: Vec<String>,
    selected_opponent: usize,
    size_choice: BoardSize,
    status: String,
    geometry: BoardGeometry,
    board_area: Rect,
}

impl App {
    /// Creates the application in the setup screen.
    pub fn new(config: ClientConfig) -> Self {
        let size_choice = BoardSize::from_cells(config.board_size).unwrap_or(BoardSize::Nine);
        Self {
            screen: Screen::Setup,
            session: GameSession::new(),
            config,
            roster: Vec::new(),
            selected_opponent: 0,
            size_choice,
            status: "Fetching opponents...".to_string(),
            geometry: BoardGeometry::from_edge(1.0),
            board_area: Rect::default(),
        }
    }

    /// Current screen.
    pub fn screen(&self) -> Screen {
        self.screen
    }

    /// The session (for rendering).
    pub fn session(&self) -> &GameSession {
        &self.session
    }

    /// Opponent roster for the setup list.
    pub fn roster(&self) -> &[String] {
        &self.roster
    }

    /// Index of the highlighted roster entry.
    pub fn selected_opponent(&self) -> usize {
        self.selected_opponent
    }

    /// Board size currently chosen in setup.
    pub fn size_choice(&self) -> BoardSize {
        self.size_choice
    }

    /// Status line text.
    pub fn status(&self) -> &str {
        &self.status
    }

    /// Presentation geometry for the current board area.
    pub fn geometry(&self) -> &BoardGeometry {
        &self.geometry
    }

    /// Recomputes geometry when the board widget area changed.
    ///
    /// Terminal cells are roughly twice as tall as wide, so the board
    /// surface uses square units with the x axis rendered at two columns
    /// per unit: the surface edge is `min(width / 2, height)`.
    pub fn sync_geometry(&mut self, board_area: Rect) {
        if board_area == self.board_area {
            return;
        }
        debug!(?board_area, "Viewport changed, recomputing geometry");
        self.board_area = board_area;
        self.geometry = BoardGeometry::from_viewport(
            f64::from(board_area.width) / 2.0,
            f64::from(board_area.height),
        );
    }

    /// Handles an event from a background task.
    pub fn handle_event(&mut self, event: ClientEvent) {
        debug!(?event, "Handling client event");
        match event {
            ClientEvent::RosterLoaded(roster) => {
                self.selected_opponent = self.selected_opponent.min(roster.len().saturating_sub(1));
                self.roster = roster;
                self.status = if self.roster.is_empty() {
                    "No opponents available. Press 'n' to retry.".to_string()
                } else {
                    "Choose a board size and opponent, then press Enter.".to_string()
                };
            }
            ClientEvent::RosterFailed(error) => {
                self.status = format!("Could not fetch opponents: {error}. Press 'n' to retry.");
            }
            ClientEvent::SyncCompleted {
                generation,
                response,
            } => {
                self.session.apply_remote(generation, response);
                self.refresh_status();
            }
            ClientEvent::SyncFailed { generation, error } => {
                self.session.remote_failed(generation);
                if self.session.state() == SessionState::AwaitingLocalMove {
                    self.status = format!("Sync failed: {error}. Your next move retries.");
                }
            }
        }
    }

    /// Starts a game with the current setup selections.
    pub fn start_game(&mut self) {
        let opponent = self.roster.get(self.selected_opponent).map(String::as_str);
        if self
            .session
            .start_game(self.size_choice.cells(), opponent)
        {
            self.screen = Screen::Game;
            self.refresh_status();
        } else {
            self.status = "Select an opponent before starting.".to_string();
        }
    }

    /// Returns to setup for a new game.
    pub fn enter_setup(&mut self) {
        info!("Returning to setup");
        self.session.enter_setup();
        self.screen = Screen::Setup;
        self.status = "Fetching opponents...".to_string();
    }

    /// Cycles the board size selection.
    pub fn cycle_size(&mut self, step: isize) {
        self.size_choice = self.size_choice.cycle(step);
    }

    /// Moves the opponent highlight.
    pub fn select_opponent(&mut self, step: isize) {
        if self.roster.is_empty() {
            return;
        }
        let len = self.roster.len() as isize;
        let next = (self.selected_opponent as isize + step).rem_euclid(len);
        self.selected_opponent = next as usize;
    }

    /// Translates a terminal click into a move submission.
    ///
    /// Returns the synchronization request to dispatch when the click
    /// landed on a playable intersection; rejected clicks (outside the
    /// board, occupied cell, not our turn) produce no state change.
    pub fn click(&mut self, column: u16, row: u16) -> Option<SyncRequest> {
        if self.screen != Screen::Game {
            return None;
        }
        let area = self.board_area;
        if column < area.x
            || row < area.y
            || column >= area.x.saturating_add(area.width)
            || row >= area.y.saturating_add(area.height)
        {
            return None;
        }

        let x = f64::from(column - area.x) / 2.0;
        let y = f64::from(row - area.y);
        let size = self.session.size();
        let hit_radius = self.geometry.spacing(size) * self.config.hit_radius_ratio;
        let (r, c) = self.geometry.point_to_nearest(x, y, size, hit_radius)?;

        let request = self.session.submit_local_move(r, c)?;
        self.status = format!(
            "Waiting for {}...",
            self.session.opponent().unwrap_or("opponent")
        );
        Some(request)
    }

    /// Steps the review cursor back.
    pub fn review_back(&mut self) {
        self.session.review_back();
        self.refresh_status();
    }

    /// Steps the review cursor forward.
    pub fn review_forward(&mut self) {
        self.session.review_forward();
        self.refresh_status();
    }

    /// Leaves review mode.
    pub fn review_live(&mut self) {
        self.session.review_jump_to_end();
        self.refresh_status();
    }

    fn refresh_status(&mut self) {
        if let Some(position) = self.session.review_position() {
            self.status = format!(
                "Review {position}/{} - Right/End returns to live play.",
                self.session.record().len()
            );
            return;
        }
        self.status = match self.session.state() {
            SessionState::Setup => "Choose a board size and opponent, then press Enter.".to_string(),
            SessionState::AwaitingLocalMove => "Your move: click an intersection.".to_string(),
            SessionState::AwaitingRemote => format!(
                "Waiting for {}...",
                self.session.opponent().unwrap_or("opponent")
            ),
            SessionState::Finished(winner) => {
                format!("{winner} wins! Press 'n' for a new game or 'q' to quit.")
            }
        };
    }
}
