//! HTTP client for the rule-enforcing opponent service.

use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};

use crate::game::{Board, MoveRecord, Player};

/// Synchronization request carrying the full local state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SyncRequest {
    /// Session generation the request belongs to. Local guard only, never
    /// sent on the wire; responses for an older generation are discarded.
    #[serde(skip)]
    pub generation: u64,
    /// Provisional local board after the optimistic move.
    pub board: Board,
    /// Full move record including the move just made.
    pub record: MoveRecord,
    /// Identifier of the selected opponent.
    pub opponent: String,
    /// Color of the player who made the move being reported.
    pub mover: Player,
}

/// Authoritative state returned by the rules service.
///
/// `board` and `record` fully replace local state; a present `winner`
/// ends the session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SyncResponse {
    /// Canonical board after the service applied rules and replied.
    pub board: Board,
    /// Canonical record, including the opponent's answering move.
    pub record: MoveRecord,
    /// Winner, when the game is over.
    #[serde(default)]
    pub winner: Option<Player>,
}

/// Seam toward the remote rules service.
///
/// The terminal client only talks to this trait, so tests can script an
/// opponent without a network.
#[async_trait]
pub trait RulesService {
    /// Reports a local move and waits for the canonical reply state.
    async fn synchronize(&self, request: &SyncRequest) -> Result<SyncResponse>;

    /// Fetches the roster of selectable opponents.
    async fn opponents(&self) -> Result<Vec<String>>;
}

/// reqwest-backed [`RulesService`] implementation.
#[derive(Debug, Clone)]
pub struct RulesClient {
    base_url: String,
    client: reqwest::Client,
}

impl RulesClient {
    /// Creates a client for the service at `base_url`.
    pub fn new(base_url: String) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client: reqwest::Client::new(),
        }
    }

    /// Base URL the client targets.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[async_trait]
impl RulesService for RulesClient {
    #[instrument(skip_all, fields(opponent = %request.opponent, moves = request.record.len()))]
    async fn synchronize(&self, request: &SyncRequest) -> Result<SyncResponse> {
        let url = format!("{}/api/games/sync", self.base_url);
        debug!(url = %url, "Sending synchronization request");

        let response = self
            .client
            .post(&url)
            .json(request)
            .send()
            .await
            .context("rules service unreachable")?;

        let status = response.status();
        if !status.is_success() {
            warn!(status = %status, "Rules service rejected synchronization");
            anyhow::bail!("rules service returned {status}");
        }

        let sync: SyncResponse = response
            .json()
            .await
            .context("malformed synchronization response")?;

        debug!(
            moves = sync.record.len(),
            winner = ?sync.winner,
            "Received canonical state"
        );
        Ok(sync)
    }

    #[instrument(skip(self))]
    async fn opponents(&self) -> Result<Vec<String>> {
        let url = format!("{}/api/opponents", self.base_url);
        debug!(url = %url, "Fetching opponent roster");

        let roster: Vec<String> = self
            .client
            .get(&url)
            .send()
            .await
            .context("rules service unreachable")?
            .error_for_status()
            .context("roster request rejected")?
            .json()
            .await
            .context("malformed roster response")?;

        info!(count = roster.len(), "Opponent roster loaded");
        Ok(roster)
    }
}
