//! Kudo validation

use thiserror::Error;

use super::entity::{KudoRecipient, NewKudo};
use crate::domain::account::AccountId;

/// Longest message a kudo may carry
pub const MAX_MESSAGE_LENGTH: usize = 80;

/// Longest contributor name accepted on a contribution kudo
pub const MAX_CONTRIBUTOR_NAME_LENGTH: usize = 100;

/// Errors that can occur during kudo validation
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum KudoValidationError {
    #[error("You cannot give kudos to yourself")]
    SelfKudo,

    #[error("Contributor name cannot be empty")]
    EmptyContributorName,

    #[error("Contributor name cannot exceed {0} characters")]
    ContributorNameTooLong(usize),

    #[error("Kudo message cannot exceed {0} characters")]
    MessageTooLong(usize),
}

/// Validate a kudo before it is stored
pub fn validate_new_kudo(sender: AccountId, kudo: &NewKudo) -> Result<(), KudoValidationError> {
    match &kudo.recipient {
        KudoRecipient::Account { account_id } if *account_id == sender => {
            return Err(KudoValidationError::SelfKudo);
        }
        KudoRecipient::Contribution { name, .. } => {
            let name = name.trim();
            if name.is_empty() {
                return Err(KudoValidationError::EmptyContributorName);
            }
            if name.chars().count() > MAX_CONTRIBUTOR_NAME_LENGTH {
                return Err(KudoValidationError::ContributorNameTooLong(
                    MAX_CONTRIBUTOR_NAME_LENGTH,
                ));
            }
        }
        KudoRecipient::Account { .. } => {}
    }

    if let Some(message) = &kudo.message {
        if message.chars().count() > MAX_MESSAGE_LENGTH {
            return Err(KudoValidationError::MessageTooLong(MAX_MESSAGE_LENGTH));
        }
    }

    Ok(())
}
