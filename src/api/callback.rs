use std::{collections::HashMap, sync::Arc};

use axum::{Extension, extract::Query, http::StatusCode, response::Html};

use crate::{
    error::Error,
    spotify::auth::exchange_code,
    types::AuthFlow,
};

/// Single-shot OAuth callback handler.
///
/// Validates the echoed state nonce against the one issued for this run,
/// exchanges the code for a token and delivers the outcome through the
/// flow's one-shot channel. Fatal conditions (state mismatch, exchange
/// failure) are delivered as error values for the orchestrator to check;
/// the handler itself never terminates the process.
pub async fn callback(
    Query(params): Query<HashMap<String, String>>,
    Extension(flow): Extension<Arc<AuthFlow>>,
) -> (StatusCode, Html<&'static str>) {
    let code = match validate_callback_params(&params, &flow.expected_state) {
        Ok(code) => code,
        Err(Error::MissingCode) => {
            // Not a grant at all; keep waiting for the real callback.
            return (StatusCode::BAD_REQUEST, Html("<h4>Missing authorization code.</h4>"));
        }
        Err(e) => {
            // A mismatched nonce means a possibly forged grant; abort the run.
            flow.deliver(Err(e)).await;
            return (StatusCode::FORBIDDEN, Html("<h4>State mismatch, login rejected.</h4>"));
        }
    };

    match exchange_code(&flow.config, &code).await {
        Ok(token) => {
            if flow.deliver(Ok(token)).await {
                (StatusCode::OK, Html("Login completed. You can close this window."))
            } else {
                (StatusCode::OK, Html("Login already completed."))
            }
        }
        Err(e) => {
            flow.deliver(Err(e)).await;
            (StatusCode::FORBIDDEN, Html("<h4>Token exchange failed.</h4>"))
        }
    }
}

/// Extracts the authorization code from the callback query, rejecting any
/// callback whose state nonce does not match the issued one.
pub fn validate_callback_params(
    params: &HashMap<String, String>,
    expected_state: &str,
) -> Result<String, Error> {
    let code = params.get("code").ok_or(Error::MissingCode)?;

    match params.get("state") {
        Some(state) if state == expected_state => Ok(code.clone()),
        _ => Err(Error::StateMismatch),
    }
}
