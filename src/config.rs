//! Configuration loading for the playlist mixer.
//!
//! The configuration is a small JSON document supplying the Spotify client
//! credentials; everything else (endpoints, callback address, scope) has
//! sensible defaults and can be overridden per key:
//!
//! ```json
//! {
//!   "spotify": {
//!     "client_id": "...",
//!     "client_secret": "..."
//!   }
//! }
//! ```
//!
//! The file is read exactly once at process entry and the resulting
//! [`Config`] value is passed by reference to the components that need it.
//! A missing or malformed file is fatal before anything else runs.

use std::path::PathBuf;

use serde::Deserialize;

use crate::error::Error;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub spotify: SpotifyCredentials,

    /// Address the local callback server binds to.
    #[serde(default = "default_listen_addr")]
    pub listen_addr: String,

    /// Redirect URI registered with the Spotify application; must point at
    /// the local callback server.
    #[serde(default = "default_redirect_uri")]
    pub redirect_uri: String,

    #[serde(default = "default_auth_url")]
    pub auth_url: String,

    #[serde(default = "default_token_url")]
    pub token_url: String,

    #[serde(default = "default_api_url")]
    pub api_url: String,

    #[serde(default = "default_scope")]
    pub scope: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SpotifyCredentials {
    pub client_id: String,
    pub client_secret: String,
}

fn default_listen_addr() -> String {
    "127.0.0.1:8888".to_string()
}

fn default_redirect_uri() -> String {
    "http://127.0.0.1:8888/callback".to_string()
}

fn default_auth_url() -> String {
    "https://accounts.spotify.com/authorize".to_string()
}

fn default_token_url() -> String {
    "https://accounts.spotify.com/api/token".to_string()
}

fn default_api_url() -> String {
    "https://api.spotify.com/v1".to_string()
}

fn default_scope() -> String {
    "user-read-private playlist-read-private playlist-modify-public playlist-modify-private"
        .to_string()
}

impl Config {
    /// Loads the configuration from `path`, or from the default locations
    /// when no path is given: `./config.json` first, then
    /// `<config_dir>/mixcli/config.json`.
    pub async fn load(path: Option<PathBuf>) -> Result<Config, Error> {
        let path = path.unwrap_or_else(default_config_path);

        let content = async_fs::read_to_string(&path)
            .await
            .map_err(|source| Error::ConfigRead {
                path: path.clone(),
                source,
            })?;

        serde_json::from_str(&content).map_err(|source| Error::ConfigParse { path, source })
    }
}

fn default_config_path() -> PathBuf {
    let local = PathBuf::from("config.json");
    if local.is_file() {
        return local;
    }

    let mut path = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push("mixcli/config.json");
    path
}
