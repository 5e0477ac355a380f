pub mod api;
pub mod cache;
pub mod config;
pub mod controllers;
pub mod database;
pub mod entities;
pub mod errors;
pub mod metrics;
pub mod middlewares;
pub mod models;
pub mod observability;
pub mod prelude;
pub mod requests;
pub mod responses;
pub mod router;
pub mod security;
pub mod services;
pub mod state;

// Testing utilities (always available for integration tests)
pub mod testing;

pub use cache::{Cache, CacheKey, LocalCache};
pub use errors::Error;
pub use metrics::{AppMetrics, MetricsMiddleware};
pub use middlewares::v1::auth::{AdminPrincipal, Principal, UserPrincipal};
pub use security::SecurityHeadersMiddleware;
pub use state::AppState;
