//! API layer - HTTP endpoints and middleware

pub mod api_keys;
pub mod health;
pub mod kudos;
pub mod middleware;
pub mod projects;
pub mod render;
pub mod router;
pub mod state;
pub mod types;

pub use middleware::{AuthorizedAdmin, AuthorizedMutation, AuthorizedRead};
pub use router::{create_router, create_router_with_state};
pub use state::AppState;
