//! HTTP endpoints of the local OAuth callback server.
//!
//! [`callback`] completes the authorization-code flow by validating the
//! echoed state nonce and exchanging the one-time code for a token;
//! [`health`] is a plain liveness endpoint.

mod callback;
mod health;

pub use callback::callback;
pub use callback::validate_callback_params;
pub use health::health;
