use std::sync::Arc;

use chrono::Utc;
use reqwest::Client;
use tokio::net::TcpListener;

use crate::{
    config::Config,
    error::Error,
    info,
    server::serve_callback,
    spotify::client::SpotifyClient,
    types::{AuthFlow, Token, TokenResponse},
    utils, warning,
};

/// Runs the complete authorization-code flow and returns an authenticated
/// client handle.
///
/// The callback listener is bound *before* the authorization URL is shown
/// so the user cannot complete the login before the acceptor is ready.
/// The function then blocks on the single-shot hand-off channel until the
/// callback handler delivers either a token or a fatal auth error; there
/// is no timeout on that wait. The listener stays open for the remainder
/// of the process, which is fine for a tool that exits after one run.
pub async fn authorize(config: &Config) -> Result<SpotifyClient, Error> {
    let state_nonce = utils::generate_state_nonce();
    let (flow, outcome) = AuthFlow::new(config.clone(), state_nonce.clone());

    let listener = TcpListener::bind(&config.listen_addr)
        .await
        .map_err(|source| Error::Listener {
            addr: config.listen_addr.clone(),
            source,
        })?;
    tokio::spawn(serve_callback(listener, Arc::clone(&flow)));

    let auth_url = build_auth_url(config, &state_nonce);
    info!(
        "Please log in to Spotify by visiting the following page in your browser:\n{}",
        auth_url
    );
    if webbrowser::open(&auth_url).is_err() {
        warning!("Failed to open browser, use the URL above manually.");
    }

    // Exactly-once hand-off: the callback handler consumes the sender.
    let token = match outcome.await {
        Ok(result) => result?,
        Err(_) => return Err(Error::AuthAborted),
    };

    Ok(SpotifyClient::new(config, token))
}

/// Deterministic construction of the authorization URL. The state nonce
/// must be echoed back unchanged by the callback. Every query parameter
/// is percent-encoded, so a redirect URI carrying `?` or `&` survives.
pub fn build_auth_url(config: &Config, state: &str) -> String {
    format!(
        "{auth_url}?client_id={client_id}&response_type=code&redirect_uri={redirect_uri}&scope={scope}&state={state}",
        auth_url = &config.auth_url,
        client_id = urlencoding::encode(&config.spotify.client_id),
        redirect_uri = urlencoding::encode(&config.redirect_uri),
        scope = urlencoding::encode(&config.scope),
        state = urlencoding::encode(state)
    )
}

/// Exchanges the one-time authorization code for a token. The client
/// credentials go out as HTTP basic auth, per the authorization-code
/// grant.
pub async fn exchange_code(config: &Config, code: &str) -> Result<Token, Error> {
    let client = Client::new();
    let res = client
        .post(&config.token_url)
        .basic_auth(
            &config.spotify.client_id,
            Some(&config.spotify.client_secret),
        )
        .form(&[
            ("grant_type", "authorization_code"),
            ("code", code),
            ("redirect_uri", &config.redirect_uri),
        ])
        .send()
        .await
        .and_then(|res| res.error_for_status())
        .map_err(Error::TokenExchange)?;

    let token: TokenResponse = res.json().await.map_err(Error::TokenExchange)?;

    Ok(Token {
        access_token: token.access_token,
        refresh_token: token.refresh_token,
        scope: token.scope,
        expires_in: token.expires_in,
        obtained_at: Utc::now().timestamp() as u64,
    })
}
