//! HTTP Server configuration and startup.

use std::sync::Arc;
use std::time::Duration;

use axum::{
    Router,
    routing::{get, post},
};
use tower_http::{cors::CorsLayer, timeout::TimeoutLayer, trace::TraceLayer};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use beers_types::{BeerRepository, CurrencyService};

use super::handlers::{self, AppState};
use crate::BeerService;
use crate::openapi::ApiDoc;

/// Default per-request deadline.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// HTTP Server for the Beers API.
pub struct HttpServer<R: BeerRepository, C: CurrencyService> {
    state: Arc<AppState<R, C>>,
    request_timeout: Duration,
}

impl<R: BeerRepository, C: CurrencyService> HttpServer<R, C> {
    /// Creates a new HTTP server with the given service.
    pub fn new(service: BeerService<R, C>) -> Self {
        Self {
            state: Arc::new(AppState { service }),
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
        }
    }

    /// Overrides the per-request deadline.
    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    /// Returns the service behind the handlers.
    pub fn service(&self) -> &BeerService<R, C> {
        &self.state.service
    }

    /// Versioned API routes, mounted both at the root and under `/api/v1`.
    fn api_routes() -> Router<Arc<AppState<R, C>>> {
        Router::new()
            .route(
                "/beers",
                post(handlers::create_beer::<R, C>).get(handlers::list_beers::<R, C>),
            )
            .route("/beers/{id}", get(handlers::get_beer::<R, C>))
            .route("/beers/{id}/boxprice", get(handlers::box_price::<R, C>))
            .route("/currencies", get(handlers::currencies::<R, C>))
    }

    /// Builds the Axum router with all routes.
    pub fn router(&self) -> Router {
        Router::new()
            .route("/health", get(handlers::health))
            .merge(Self::api_routes())
            .nest("/api/v1", Self::api_routes())
            .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
            .layer(TimeoutLayer::new(self.request_timeout))
            .layer(CorsLayer::permissive())
            .layer(TraceLayer::new_for_http())
            .with_state(self.state.clone())
    }

    /// Runs the server on the given address with graceful shutdown.
    ///
    /// Borrows the server so the caller can release adapters afterwards.
    pub async fn run(&self, addr: &str) -> anyhow::Result<()> {
        let listener = tokio::net::TcpListener::bind(addr).await?;
        tracing::info!("Server listening on {}", listener.local_addr()?);

        axum::serve(listener, self.router())
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        Ok(())
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received, starting graceful shutdown...");
}
