//! HTTP middleware components.

pub mod family_auth;
pub mod logging;
pub mod metrics;
pub mod security_headers;
pub mod trace_id;

pub use family_auth::require_family_auth;
pub use metrics::{
    init_metrics, metrics_handler, metrics_middleware, record_instance_completed,
    record_instance_verified, record_instances_generated,
};
pub use security_headers::security_headers_middleware;
#[allow(unused_imports)] // Re-exports for downstream use
pub use trace_id::{trace_id, RequestId, REQUEST_ID_HEADER};
