//! Stateless UI rendering.

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

use crate::game::Cell;
use crate::session::SessionState;

use super::app::{App, Screen};

/// Computes the board widget area for a frame of the given size.
///
/// The board is a centered rect twice as wide as tall, so that the square
/// surface geometry renders roughly square in terminal cells. The same
/// rect feeds both rendering and click hit-testing.
pub fn board_area(frame_area: Rect) -> Rect {
    let chunks = layout(frame_area);
    let chunk = chunks[1];
    let side = chunk.height.min(chunk.width / 2);
    let width = side * 2;
    Rect {
        x: chunk.x + (chunk.width.saturating_sub(width)) / 2,
        y: chunk.y + (chunk.height.saturating_sub(side)) / 2,
        width,
        height: side,
    }
}

fn layout(area: Rect) -> std::rc::Rc<[Rect]> {
    Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Title
            Constraint::Min(9),    // Board / setup panel
            Constraint::Length(3), // Status
        ])
        .split(area)
}

/// Renders the current screen.
pub fn draw(frame: &mut Frame, app: &App) {
    let chunks = layout(frame.size());

    let title = Paragraph::new("Goban Client")
        .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::BOTTOM));
    frame.render_widget(title, chunks[0]);

    match app.screen() {
        Screen::Setup => draw_setup(frame, chunks[1], app),
        Screen::Game => draw_board(frame, app),
    }

    let status = Paragraph::new(app.status())
        .style(Style::default().fg(Color::Yellow))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).title(help_line(app)));
    frame.render_widget(status, chunks[2]);
}

fn help_line(app: &App) -> &'static str {
    match app.screen() {
        Screen::Setup => " Up/Down opponent - Left/Right size - Enter start - q quit ",
        Screen::Game => " click to play - Left/Right review - End live - n new game - q quit ",
    }
}

fn draw_setup(frame: &mut Frame, area: Rect, app: &App) {
    let panel = center_rect(area, 44, (app.roster().len() as u16 + 6).max(8));

    let mut lines = vec![
        Line::from(vec![
            Span::raw("Board size:  "),
            Span::styled(
                format!("< {} >", app.size_choice()),
                Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
            ),
        ]),
        Line::raw(""),
        Line::raw("Opponent:"),
    ];

    if app.roster().is_empty() {
        lines.push(Line::styled(
            "  (no opponents yet)",
            Style::default().fg(Color::DarkGray),
        ));
    }
    for (index, opponent) in app.roster().iter().enumerate() {
        let style = if index == app.selected_opponent() {
            Style::default().bg(Color::White).fg(Color::Black)
        } else {
            Style::default()
        };
        lines.push(Line::from(Span::styled(format!("  {opponent}"), style)));
    }

    let panel_widget = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL).title(" New game "));
    frame.render_widget(panel_widget, panel);
}

fn draw_board(frame: &mut Frame, app: &App) {
    let area = board_area(frame.size());
    if area.width < 2 || area.height < 2 {
        return;
    }

    let session = app.session();
    let board = session.displayed_board();
    let size = board.size();
    let geometry = app.geometry();

    // The last move marker tracks the displayed prefix, not just live play.
    let shown_moves = session.review_position().unwrap_or(session.record().len());
    let last_move = shown_moves
        .checked_sub(1)
        .and_then(|i| session.record().get(i));

    let buf = frame.buffer_mut();
    for row in 0..size {
        for col in 0..size {
            let (x, y) = geometry.grid_to_point(row, col, size);
            let tx = area.x + (x * 2.0).round() as u16;
            let ty = area.y + y.round() as u16;
            if tx >= area.x + area.width || ty >= area.y + area.height {
                continue;
            }

            let (glyph, style) = match board.get(row, col) {
                Some(Cell::Stone(player)) => {
                    let glyph = match player {
                        crate::game::Player::Black => '\u{25CF}', // ●
                        crate::game::Player::White => '\u{25CB}', // ○
                    };
                    let mut style = Style::default().fg(Color::White).add_modifier(Modifier::BOLD);
                    if last_move.is_some_and(|m| m.row == row && m.col == col) {
                        style = style.fg(Color::Yellow);
                    }
                    (glyph, style)
                }
                _ => ('\u{00B7}', Style::default().fg(Color::DarkGray)), // ·
            };

            let cell = buf.get_mut(tx, ty);
            cell.set_char(glyph);
            cell.set_style(style);
        }
    }

    if session.state() == SessionState::AwaitingRemote {
        // Input is ignored while a request is outstanding.
        let hint = Paragraph::new("...").style(Style::default().fg(Color::DarkGray));
        let hint_area = Rect {
            x: area.x,
            y: area.y.saturating_sub(1),
            width: 3.min(area.width),
            height: 1,
        };
        frame.render_widget(hint, hint_area);
    }
}

fn center_rect(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}
