//! Error types for the playlist mixer.
//!
//! Everything upstream of track aggregation is fail-fast: config, auth,
//! fetch and validation errors abort the run before any playlist is
//! created. A single batch-write failure ([`Error::Write`]) is the only
//! recoverable kind; it is logged and the remaining batches continue.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("cannot read config file {path}: {source}")]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed config file {path}: {source}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("cannot bind callback listener on {addr}: {source}")]
    Listener {
        addr: String,
        #[source]
        source: std::io::Error,
    },

    /// The state nonce echoed by the authorization callback does not match
    /// the one issued for this run. Treated as a forged grant; fatal.
    #[error("authorization state mismatch, rejecting callback")]
    StateMismatch,

    #[error("authorization callback carried no code")]
    MissingCode,

    #[error("token exchange failed: {0}")]
    TokenExchange(#[source] reqwest::Error),

    #[error("authorization flow ended before a token was delivered")]
    AuthAborted,

    #[error("fetching {what} failed: {source}")]
    Fetch {
        what: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("invalid selection: {0}")]
    Selection(String),

    #[error("cannot read input: {0}")]
    Input(#[from] std::io::Error),

    #[error("playlist name must not be empty")]
    EmptyPlaylistName,

    #[error("creating playlist failed: {0}")]
    Create(#[source] reqwest::Error),

    #[error("adding tracks to playlist failed: {0}")]
    Write(#[source] Box<dyn std::error::Error + Send + Sync>),
}
