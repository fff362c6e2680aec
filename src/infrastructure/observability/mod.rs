//! Observability infrastructure - Prometheus metrics

mod config;
mod metrics;

pub use config::MetricsConfig;
pub use metrics::{
    create_metrics_router, init_metrics, record_http_request, record_key_rotation,
    record_sign_rejected, record_token_issued, PrometheusMetrics,
};
