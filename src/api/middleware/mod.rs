//! API middleware components

pub mod admin_auth;
pub mod logging;
pub mod metrics;

pub use admin_auth::{AdminCredentials, RequireAdmin};
pub use logging::logging_middleware;
pub use metrics::metrics_middleware;
