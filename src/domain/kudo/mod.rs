//! Kudos domain

mod entity;
mod repository;
mod validation;

pub use entity::{Kudo, KudoId, KudoRecipient, NewKudo};
pub use repository::KudoRepository;
pub use validation::{
    validate_new_kudo, KudoValidationError, MAX_CONTRIBUTOR_NAME_LENGTH, MAX_MESSAGE_LENGTH,
};

#[cfg(test)]
pub use repository::MockKudoRepository;
