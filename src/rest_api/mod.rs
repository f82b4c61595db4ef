//! # Shoe REST API
//!
//! Resource handlers plus their axum wiring. Handlers return `ApiResult`;
//! the error's `IntoResponse` impl is the single place where failures
//! become status codes and `{"message": ...}` bodies.

pub mod errors;
pub mod handler;
pub mod routes;

pub use errors::{ApiError, ApiResult, ErrorResponse, INTERNAL_ERROR_MESSAGE};
pub use handler::ShoeHandler;
pub use routes::{endpoint_not_found, shoe_routes, IdPath, JsonBody};
