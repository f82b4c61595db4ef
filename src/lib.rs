//! shoebox - a small CRUD service for a shoe catalogue
//!
//! One resource, five endpoints, one document collection behind a
//! pluggable store.

pub mod cli;
pub mod config;
pub mod http_server;
pub mod observability;
pub mod rest_api;
pub mod shoe;
pub mod store;
