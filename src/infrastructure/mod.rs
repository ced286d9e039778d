//! Infrastructure layer - Storage, services and runtime plumbing

pub mod access;
pub mod account;
pub mod api_key;
pub mod kudo;
pub mod logging;
pub mod observability;
pub mod project;
pub mod seed;
