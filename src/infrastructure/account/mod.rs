//! Account infrastructure

mod repository;

pub use repository::InMemoryAccountRepository;
