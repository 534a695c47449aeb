//! Goban Client - terminal entry point.
//!
//! Sets up tracing and the terminal, then runs the event loop: draw,
//! drain background events, translate input, dispatch.

#![warn(missing_docs)]

use std::io;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use tokio::sync::mpsc;
use tracing::info;
use tracing_subscriber::EnvFilter;

use goban_client::tui::app::{App, ClientEvent};
use goban_client::tui::input::{self, Action};
use goban_client::tui::ui;
use goban_client::{Cli, ClientConfig, RulesClient, RulesService, SyncRequest};

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    let mut config = ClientConfig::load_or_default(&cli.config)?;
    if let Some(url) = cli.server_url {
        config.server_url = url;
    }
    if let Some(size) = cli.board_size {
        config.board_size = size;
    }

    info!(server_url = %config.server_url, "Starting goban client");

    let service: Arc<dyn RulesService + Send + Sync> =
        Arc::new(RulesClient::new(config.server_url.clone()));

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Channel for events flowing back from background tasks.
    let (event_tx, mut event_rx) = mpsc::unbounded_channel();
    spawn_roster_fetch(service.clone(), event_tx.clone());

    let app = App::new(config);
    let res = run_app(&mut terminal, app, service, event_tx, &mut event_rx).await;

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen, DisableMouseCapture)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        eprintln!("Error: {err}");
    }

    Ok(())
}

async fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    mut app: App,
    service: Arc<dyn RulesService + Send + Sync>,
    event_tx: mpsc::UnboundedSender<ClientEvent>,
    event_rx: &mut mpsc::UnboundedReceiver<ClientEvent>,
) -> Result<()> {
    loop {
        terminal.draw(|frame| {
            app.sync_geometry(ui::board_area(frame.size()));
            ui::draw(frame, &app);
        })?;

        // Apply events from background tasks before reading input.
        while let Ok(event) = event_rx.try_recv() {
            app.handle_event(event);
        }

        if event::poll(Duration::from_millis(100))? {
            let event = event::read()?;
            let Some(action) = input::to_action(&event, app.screen()) else {
                continue;
            };
            match action {
                Action::Quit => return Ok(()),
                Action::StartGame => app.start_game(),
                Action::NewGame => {
                    app.enter_setup();
                    spawn_roster_fetch(service.clone(), event_tx.clone());
                }
                Action::CycleSize(step) => app.cycle_size(step),
                Action::SelectOpponent(step) => app.select_opponent(step),
                Action::ReviewBack => app.review_back(),
                Action::ReviewForward => app.review_forward(),
                Action::ReviewLive => app.review_live(),
                Action::Click { column, row } => {
                    if let Some(request) = app.click(column, row) {
                        spawn_sync(service.clone(), event_tx.clone(), request);
                    }
                }
            }
        }
    }
}

/// Fetches the opponent roster in the background.
fn spawn_roster_fetch(
    service: Arc<dyn RulesService + Send + Sync>,
    event_tx: mpsc::UnboundedSender<ClientEvent>,
) {
    tokio::spawn(async move {
        match service.opponents().await {
            Ok(roster) => {
                let _ = event_tx.send(ClientEvent::RosterLoaded(roster));
            }
            Err(e) => {
                let _ = event_tx.send(ClientEvent::RosterFailed(e.to_string()));
            }
        }
    });
}

/// Runs one synchronization exchange in the background.
///
/// The session is already in `AwaitingRemote`; whatever happens here comes
/// back as a [`ClientEvent`] tagged with the request's generation, so a
/// response that outlives its game is recognized and dropped.
fn spawn_sync(
    service: Arc<dyn RulesService + Send + Sync>,
    event_tx: mpsc::UnboundedSender<ClientEvent>,
    request: SyncRequest,
) {
    tokio::spawn(async move {
        let generation = request.generation;
        match service.synchronize(&request).await {
            Ok(response) => {
                let _ = event_tx.send(ClientEvent::SyncCompleted {
                    generation,
                    response,
                });
            }
            Err(e) => {
                let _ = event_tx.send(ClientEvent::SyncFailed {
                    generation,
                    error: e.to_string(),
                });
            }
        }
    });
}
