pub mod error;
mod prices;

use std::sync::Arc;

use anyhow::Result;
use axum::{
    extract::FromRef,
    http::StatusCode,
    routing::post,
    Router,
};
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::config::AppConfig;

#[derive(Clone)]
pub(crate) struct WebState {
    /// Read only. Store handles are opened per request, never kept here.
    pub(crate) config: Arc<AppConfig>,
}

impl WebState {
    pub(crate) fn new(config: AppConfig) -> Self {
        Self {
            config: Arc::new(config),
        }
    }
}

impl FromRef<WebState> for Arc<AppConfig> {
    fn from_ref(input: &WebState) -> Self {
        input.config.clone()
    }
}

pub(crate) fn router(state: WebState) -> Router {
    Router::new()
        .route("/get_prices", post(prices::get_prices))
        .fallback(fallback)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

pub(crate) async fn start_web(state: WebState) -> Result<()> {
    let addr = format!(
        "{}:{}",
        state.config.server_hostname, state.config.server_port
    );
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!(
        "listening on {}, fund store {}",
        listener.local_addr()?,
        state.config.db_file.display()
    );
    axum::serve(listener, router(state))
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            info!("shutting down");
        })
        .await?;
    Ok(())
}

async fn fallback() -> (StatusCode, &'static str) {
    (StatusCode::NOT_FOUND, "Not found")
}
