use axum::{Extension, Router, routing::get};
use std::sync::Arc;
use tokio::net::TcpListener;

use crate::{api, types::AuthFlow, warning};

/// Serves the OAuth callback on an already-bound listener.
///
/// The listener is bound by the caller so the authorization URL is only
/// shown once the acceptor is ready. A serve failure is delivered through
/// the flow channel so the orchestrator aborts instead of waiting forever.
pub async fn serve_callback(listener: TcpListener, flow: Arc<AuthFlow>) {
    let app = Router::new()
        .route("/health", get(api::health))
        .route("/callback", get(api::callback).layer(Extension(Arc::clone(&flow))));

    if let Err(e) = axum::serve(listener, app).await {
        warning!("Callback server stopped: {}", e);
        flow.deliver(Err(crate::error::Error::AuthAborted)).await;
    }
}
