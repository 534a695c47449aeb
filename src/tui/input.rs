//! Translation of terminal events into application actions.

use crossterm::event::{Event, KeyCode, KeyEventKind, MouseButton, MouseEventKind};

use super::app::Screen;

/// An input gesture the run loop should act on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Exit the client.
    Quit,
    /// Start a game with the current setup selections.
    StartGame,
    /// Cycle the board size selection.
    CycleSize(isize),
    /// Move the opponent highlight.
    SelectOpponent(isize),
    /// Step the review cursor one move back.
    ReviewBack,
    /// Step the review cursor one move forward.
    ReviewForward,
    /// Return to the live position.
    ReviewLive,
    /// Return to setup for a new game.
    NewGame,
    /// Pointer click at absolute terminal coordinates.
    Click {
        /// Terminal column.
        column: u16,
        /// Terminal row.
        row: u16,
    },
}

/// Maps a terminal event to an action for the current screen.
///
/// Events with no meaning on the current screen yield `None` and are
/// dropped by the run loop.
pub fn to_action(event: &Event, screen: Screen) -> Option<Action> {
    match event {
        Event::Key(key) if key.kind != KeyEventKind::Release => match (screen, key.code) {
            (_, KeyCode::Char('q')) => Some(Action::Quit),
            (Screen::Setup, KeyCode::Enter) => Some(Action::StartGame),
            (Screen::Setup, KeyCode::Left) => Some(Action::CycleSize(-1)),
            (Screen::Setup, KeyCode::Right) => Some(Action::CycleSize(1)),
            (Screen::Setup, KeyCode::Up) => Some(Action::SelectOpponent(-1)),
            (Screen::Setup, KeyCode::Down) => Some(Action::SelectOpponent(1)),
            (Screen::Setup, KeyCode::Char('n')) => Some(Action::NewGame),
            (Screen::Game, KeyCode::Left) => Some(Action::ReviewBack),
            (Screen::Game, KeyCode::Right) => Some(Action::ReviewForward),
            (Screen::Game, KeyCode::End) => Some(Action::ReviewLive),
            (Screen::Game, KeyCode::Char('n')) => Some(Action::NewGame),
            _ => None,
        },
        Event::Mouse(mouse) => match (screen, mouse.kind) {
            (Screen::Game, MouseEventKind::Down(MouseButton::Left)) => Some(Action::Click {
                column: mouse.column,
                row: mouse.row,
            }),
            _ => None,
        },
        _ => None,
    }
}
