//! API middleware components

pub mod access;
pub mod logging;
pub mod metrics;

pub use access::{request_context, AuthorizedAdmin, AuthorizedMutation, AuthorizedRead};
pub use logging::logging_middleware;
pub use metrics::metrics_middleware;
