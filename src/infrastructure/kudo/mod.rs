//! Kudo infrastructure

mod repository;
mod service;

pub use repository::InMemoryKudoRepository;
pub use service::{KudoListing, KudoService};
