//! Spotify Web API integration.
//!
//! [`auth`] drives the OAuth 2.0 authorization-code flow: it builds the
//! authorization URL, hosts the local callback acceptor and exchanges the
//! returned code for a token. [`client`] is the authenticated handle used
//! by the mixer for everything after that: current user, playlist listing,
//! paginated item fetches, playlist creation and batched track additions.

pub mod auth;
pub mod client;
