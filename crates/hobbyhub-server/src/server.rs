use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post},
};
use tower_http::trace::TraceLayer;

use crate::accounts::{AccountService, AccountSettings};
use crate::config::AppConfig;
use crate::handlers;

/// Shared state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub accounts: Arc<AccountService>,
}

pub struct HobbyhubServer {
    addr: SocketAddr,
    app: Router,
}

pub fn build_app(state: AppState, cfg: &AppConfig) -> Router {
    let body_limit = cfg.server.body_limit_bytes;
    Router::new()
        // Pages
        .route("/", get(handlers::index))
        .route(
            "/register",
            get(handlers::register_page).post(handlers::register),
        )
        .route("/login", get(handlers::login_page))
        .route("/logout", get(handlers::logout).post(handlers::logout))
        // Account operations
        .route("/signup", post(handlers::login))
        .route("/add", post(handlers::add_hobby))
        .route("/delete", post(handlers::delete_hobby))
        .route("/edit", post(handlers::edit_hobby))
        .route("/clear-cache", get(handlers::clear_cache))
        .route("/healthz", get(handlers::healthz))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|req: &axum::http::Request<_>| {
                    use tracing::field::Empty;
                    tracing::info_span!(
                        "http.request",
                        http.method = %req.method(),
                        http.target = %req.uri().path(),
                        http.status_code = Empty,
                    )
                })
                .on_response(
                    |res: &axum::http::Response<_>,
                     latency: std::time::Duration,
                     span: &tracing::Span| {
                        span.record(
                            "http.status_code",
                            tracing::field::display(res.status().as_u16()),
                        );
                        tracing::info!(
                            http.status = %res.status().as_u16(),
                            elapsed_ms = %latency.as_millis(),
                            "request handled"
                        );
                    },
                ),
        )
        .layer(axum::extract::DefaultBodyLimit::max(body_limit))
        .with_state(state)
}

pub struct ServerBuilder {
    addr: SocketAddr,
    config: AppConfig,
}

impl Default for ServerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ServerBuilder {
    pub fn new() -> Self {
        let cfg = AppConfig::default();
        Self {
            addr: cfg.addr(),
            config: cfg,
        }
    }

    pub fn with_addr(mut self, addr: SocketAddr) -> Self {
        self.addr = addr;
        self
    }

    pub fn with_config(mut self, cfg: AppConfig) -> Self {
        self.addr = cfg.addr();
        self.config = cfg;
        self
    }

    /// Connects the credential store and cache, then assembles the router.
    ///
    /// Unreachable backends do not fail the build; requests that need them
    /// fail individually.
    pub async fn build(self) -> anyhow::Result<HobbyhubServer> {
        let storage = crate::create_account_storage(&self.config).await?;
        let cache = crate::create_cache_backend(&self.config.redis).await?;
        let accounts = AccountService::new(
            storage,
            cache,
            hobbyhub_auth::PasswordHasher::new(self.config.password.clone()),
            account_settings(&self.config),
        );
        let state = AppState {
            accounts: Arc::new(accounts),
        };

        Ok(HobbyhubServer {
            addr: self.addr,
            app: build_app(state, &self.config),
        })
    }
}

/// Account service settings derived from the application config.
pub fn account_settings(cfg: &AppConfig) -> AccountSettings {
    AccountSettings {
        user_ttl: cfg.cache.user_ttl(),
        verify_store_on_cache_mismatch: cfg.accounts.verify_store_on_cache_mismatch,
    }
}

impl HobbyhubServer {
    pub async fn run(self) -> anyhow::Result<()> {
        let listener = tokio::net::TcpListener::bind(self.addr).await?;
        tracing::info!("listening on {}", self.addr);
        axum::serve(listener, self.app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;
        Ok(())
    }
}

async fn shutdown_signal() {
    // Wait for Ctrl+C
    let _ = tokio::signal::ctrl_c().await;
    tracing::info!("shutdown signal received");
}
