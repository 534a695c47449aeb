//! Terminal UI: application state, input translation, and rendering.

pub mod app;
pub mod input;
pub mod ui;

pub use app::{App, BoardSize, ClientEvent, Screen};
pub use input::Action;
