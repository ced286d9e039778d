//! Format checks for key ids and client tokens

use thiserror::Error;

/// Which identifier a validation error refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyField {
    KeyId,
    ClientId,
}

impl std::fmt::Display for KeyField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::KeyId => f.write_str("key id"),
            Self::ClientId => f.write_str("client id"),
        }
    }
}

#[derive(Debug, Error, Clone, PartialEq)]
pub enum ApiKeyValidationError {
    #[error("{0} is empty")]
    Empty(KeyField),

    #[error("{field} is longer than {max} characters")]
    TooLong { field: KeyField, max: usize },

    #[error("{field} contains '{found}'")]
    InvalidCharacter { field: KeyField, found: char },

    #[error("key id must begin and end with a letter or digit")]
    Edge,

    #[error("key id contains '--'")]
    DoubleHyphen,
}

const MAX_KEY_ID_LENGTH: usize = 50;
const MAX_CLIENT_ID_LENGTH: usize = 64;

fn check_length(field: KeyField, value: &str, max: usize) -> Result<(), ApiKeyValidationError> {
    match value.len() {
        0 => Err(ApiKeyValidationError::Empty(field)),
        n if n > max => Err(ApiKeyValidationError::TooLong { field, max }),
        _ => Ok(()),
    }
}

fn check_alphabet(
    field: KeyField,
    value: &str,
    allowed: impl Fn(char) -> bool,
) -> Result<(), ApiKeyValidationError> {
    match value.chars().find(|c| !allowed(*c)) {
        Some(found) => Err(ApiKeyValidationError::InvalidCharacter { field, found }),
        None => Ok(()),
    }
}

/// Key ids are lowercase-or-uppercase slugs: `robin-key`, `reporting-2`
pub fn validate_api_key_id(id: &str) -> Result<(), ApiKeyValidationError> {
    check_length(KeyField::KeyId, id, MAX_KEY_ID_LENGTH)?;
    check_alphabet(KeyField::KeyId, id, |c| c.is_ascii_alphanumeric() || c == '-')?;

    if id.starts_with('-') || id.ends_with('-') {
        return Err(ApiKeyValidationError::Edge);
    }
    if id.contains("--") {
        return Err(ApiKeyValidationError::DoubleHyphen);
    }

    Ok(())
}

/// Client ids are the tokens callers present: the uid of the application
/// that owns the key.
pub fn validate_client_id(client_id: &str) -> Result<(), ApiKeyValidationError> {
    check_length(KeyField::ClientId, client_id, MAX_CLIENT_ID_LENGTH)?;
    check_alphabet(KeyField::ClientId, client_id, |c| {
        c.is_ascii_alphanumeric() || c == '-' || c == '_'
    })
}
