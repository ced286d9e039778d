//! Account domain
//!
//! Accounts own API keys, manage projects, and send and receive kudos.

mod entity;
mod repository;

pub use entity::{Account, AccountId};
pub use repository::AccountRepository;
