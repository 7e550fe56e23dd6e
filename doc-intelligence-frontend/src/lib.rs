pub mod cli;
pub mod config;
pub mod controller;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod services;
pub mod startup;

use services::backend_client::DocumentBackend;
use std::sync::Arc;

/// Shared application state: the backend client and request limits.
#[derive(Clone)]
pub struct AppState {
    pub backend: Arc<dyn DocumentBackend>,
    pub max_request_bytes: usize,
}

impl AppState {
    pub fn new(backend: Arc<dyn DocumentBackend>, max_request_bytes: usize) -> Self {
        Self {
            backend,
            max_request_bytes,
        }
    }
}
