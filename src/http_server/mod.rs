//! # Shoebox HTTP Server Module
//!
//! Combines the shoe routes and the health check into one Axum server.
//!
//! # Endpoints
//!
//! - `/health` - Health check
//! - `/api/shoes/*` - Shoe CRUD

pub mod config;
pub mod observability_routes;
pub mod server;

pub use config::HttpServerConfig;
pub use observability_routes::HealthResponse;
pub use server::{HttpServer, ShoeboxApp, SHOES_MOUNT};
