use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tabled::Tabled;
use tokio::sync::{Mutex, oneshot};

use crate::{config::Config, error::Error};

/// Access token obtained once per run via the authorization-code grant.
/// Not persisted anywhere; it dies with the process.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Token {
    pub access_token: String,
    pub refresh_token: String,
    pub scope: String,
    pub expires_in: u64,
    pub obtained_at: u64,
}

/// Shared state between the authorization orchestrator and the callback
/// handler: the issued state nonce, the credentials needed for the token
/// exchange and the single-shot channel delivering the outcome.
///
/// The sender is `take()`n by the first callback; a later callback finds
/// `None` and is answered with an "already completed" page.
pub struct AuthFlow {
    pub config: Config,
    pub expected_state: String,
    pub outcome: Mutex<Option<oneshot::Sender<Result<Token, Error>>>>,
}

impl AuthFlow {
    pub fn new(
        config: Config,
        expected_state: String,
    ) -> (Arc<Self>, oneshot::Receiver<Result<Token, Error>>) {
        let (tx, rx) = oneshot::channel();
        let flow = Arc::new(AuthFlow {
            config,
            expected_state,
            outcome: Mutex::new(Some(tx)),
        });
        (flow, rx)
    }

    /// Delivers the flow outcome to the waiting orchestrator. Returns false
    /// if the outcome was already delivered (the value is dropped then).
    pub async fn deliver(&self, result: Result<Token, Error>) -> bool {
        match self.outcome.lock().await.take() {
            Some(tx) => tx.send(result).is_ok(),
            None => false,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PrivateUser {
    pub id: String,
    pub display_name: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GetUserPlaylistsResponse {
    pub items: Vec<PlaylistSummary>,
}

/// Read-only view over one entry of the list-playlists response; the API
/// order is preserved for display and selection indexing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaylistSummary {
    pub id: String,
    pub name: String,
    pub tracks: TrackCount,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrackCount {
    pub total: u64,
}

#[derive(Tabled)]
pub struct PlaylistTableRow {
    #[tabled(rename = "#")]
    pub index: usize,
    pub name: String,
    pub tracks: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaylistItemsPage {
    pub items: Vec<PlaylistItem>,
}

/// One entry of a playlist page. `track` is `None` for removed tracks and
/// the id is `None` for local files; both contribute nothing to the mix.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaylistItem {
    pub track: Option<PlaylistTrack>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaylistTrack {
    pub id: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatePlaylistRequest {
    pub name: String,
    pub description: String,
    pub public: bool,
    pub collaborative: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatePlaylistResponse {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddTracksToPlaylistRequest {
    pub uris: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddTracksToPlaylistResponse {
    pub snapshot_id: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    #[serde(default)]
    pub refresh_token: String,
    #[serde(default)]
    pub scope: String,
    pub expires_in: u64,
}
