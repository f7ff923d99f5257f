//! HTTP front end.
//!
//! Every request is bound to a browser session through a cookie. The
//! session's [`RecordStore`](crate::store::RecordStore) is locked for the
//! duration of one synchronous render pass and never across an await.

mod api;
mod pages;
mod session;

use std::sync::Arc;
use std::time::Duration;

use axum::http::HeaderMap;
use axum::routing::get;
use axum::Router;
use chrono::{Local, NaiveDate};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tower_http::trace::TraceLayer;
use tracing::{debug, info};

use crate::config::Config;
use crate::error::Result;
use crate::store::SessionRegistry;

use self::session::RequestSession;

/// State shared by every request handler.
#[derive(Debug)]
pub struct AppState {
    registry: Arc<SessionRegistry>,
    config: Config,
}

impl AppState {
    /// Create the state for a server running with `config`.
    #[must_use]
    pub fn new(config: Config) -> Self {
        Self {
            registry: Arc::new(SessionRegistry::new(config.idle_timeout())),
            config,
        }
    }

    fn open_session(&self, headers: &HeaderMap) -> RequestSession {
        RequestSession::open(&self.registry, headers, &self.config.session.cookie_name)
    }
}

/// Build the application router.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(pages::home))
        .route("/pages/:slug", get(pages::show).post(pages::submit))
        .route("/api/tables/:table", get(api::table))
        .route("/api/summary", get(api::summary))
        .route("/api/goals/progress", get(api::goal_progress))
        .route("/api/exercises/chart", get(api::duration_chart))
        .route("/health", get(health))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Serve the application until interrupted.
///
/// # Errors
///
/// Returns an error if the listener cannot be bound or the server fails.
pub async fn serve(config: Config) -> Result<()> {
    let addr = config.bind_addr();
    let state = Arc::new(AppState::new(config));
    let pruner = state
        .registry
        .idle_timeout()
        .map(|_| spawn_pruner(Arc::clone(&state.registry), state.config.prune_interval()));

    let listener = TcpListener::bind(addr).await?;
    info!("Listening on http://{}", listener.local_addr()?);

    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    if let Some(pruner) = pruner {
        pruner.abort();
    }
    info!("Server stopped");
    Ok(())
}

fn spawn_pruner(registry: Arc<SessionRegistry>, every: Duration) -> JoinHandle<()> {
    debug!(interval_secs = every.as_secs(), "Starting session pruner");
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(every);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        loop {
            ticker.tick().await;
            registry.prune_idle();
        }
    })
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        info!("Shutdown requested");
    }
}

async fn health() -> &'static str {
    "ok"
}

fn today() -> NaiveDate {
    Local::now().date_naive()
}
