//! Request and response types

pub mod api_key;
pub mod error;
pub mod json;
pub mod kudo;
pub mod project;

pub use api_key::ApiKeyResponse;
pub use error::{ApiError, ApiErrorResponse};
pub use json::Json;
pub use kudo::{KudoListResponse, KudoResponse};
pub use project::{ProjectListResponse, ProjectResponse, ProjectsQuery, SimilarProjectsResponse};
