//! # HTTP Server
//!
//! Main HTTP server combining the health check and the shoe routes.

use std::any::Any;
use std::sync::Arc;

use axum::extract::Request;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::{Json, Router, ServiceExt};
use tokio::net::TcpListener;
use tower::{Layer, ServiceBuilder};
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::{AllowOrigin, Any as CorsAny, CorsLayer};
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};
use tower_http::trace::TraceLayer;
use tracing::{error, info};

use crate::observability::Event;
use crate::rest_api::{
    endpoint_not_found, shoe_routes, ErrorResponse, ShoeHandler, INTERNAL_ERROR_MESSAGE,
};
use crate::store::ShoeStore;

use super::config::HttpServerConfig;
use super::observability_routes::health_routes;

/// Path prefix for the shoe resource
pub const SHOES_MOUNT: &str = "/api/shoes";

/// Router wrapped so `/api/shoes/` and `/api/shoes` route alike
pub type ShoeboxApp = NormalizePath<Router>;

/// HTTP Server for the shoe catalogue
pub struct HttpServer {
    config: HttpServerConfig,
    router: Router,
}

impl HttpServer {
    /// Create a server over an opened store
    pub fn new(config: HttpServerConfig, store: Arc<dyn ShoeStore>) -> Self {
        let router = Self::build_router(&config, store);
        Self { config, router }
    }

    /// Build the combined router with all endpoints
    fn build_router(config: &HttpServerConfig, store: Arc<dyn ShoeStore>) -> Router {
        let handler = ShoeHandler::new(store.clone());

        Router::new()
            // Health check at root level
            .merge(health_routes(store))
            .nest(SHOES_MOUNT, shoe_routes(handler))
            .fallback(endpoint_not_found)
            .layer(
                ServiceBuilder::new()
                    .layer(TraceLayer::new_for_http())
                    .layer(CatchPanicLayer::custom(panic_response))
                    .layer(cors_layer(config)),
            )
    }

    /// Get the socket address
    pub fn socket_addr(&self) -> String {
        self.config.socket_addr()
    }

    /// The complete service, trailing slashes trimmed before routing
    pub fn app(self) -> ShoeboxApp {
        NormalizePathLayer::trim_trailing_slash().layer(self.router)
    }

    /// Serve until Ctrl-C or SIGTERM, then drain in-flight requests
    pub async fn start(self) -> Result<(), std::io::Error> {
        let addr = self.config.socket_addr();
        let app = self.app();
        let listener = TcpListener::bind(&addr).await?;
        let local = listener.local_addr()?;

        info!(
            event = %Event::Serving,
            addr = %local,
            health = %format!("http://{}/health", local),
            shoes = %format!("http://{}{}", local, SHOES_MOUNT),
            "serving"
        );

        axum::serve(listener, ServiceExt::<Request>::into_make_service(app))
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        info!(event = %Event::ShutdownComplete, "server stopped");
        Ok(())
    }
}

/// Permissive when no origins are configured
fn cors_layer(config: &HttpServerConfig) -> CorsLayer {
    if config.cors_origins.is_empty() {
        return CorsLayer::new()
            .allow_origin(CorsAny)
            .allow_methods(CorsAny)
            .allow_headers(CorsAny);
    }

    let origins: Vec<_> = config
        .cors_origins
        .iter()
        .filter_map(|s| s.parse().ok())
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods(CorsAny)
        .allow_headers(CorsAny)
}

fn panic_response(_panic: Box<dyn Any + Send + 'static>) -> Response {
    error!(event = %Event::RequestFailed, "handler panicked");
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorResponse::new(INTERNAL_ERROR_MESSAGE)),
    )
        .into_response()
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            error!(error = %err, "failed to listen for ctrl-c");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(err) => {
                error!(error = %err, "failed to listen for SIGTERM");
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

    info!(event = %Event::ShutdownStart, "shutdown signal received");
}
