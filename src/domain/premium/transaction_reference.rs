//! Bank transfer reference (UTR) supplied for direct activation.

use std::fmt;

use crate::domain::foundation::ValidationError;

/// Minimum accepted length after trimming.
pub const MIN_UTR_LEN: usize = 6;

pub const INVALID_UTR_MESSAGE: &str = "Invalid UTR. Must be at least 6 characters.";

/// A trimmed, validated transaction reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransactionReference(String);

impl TransactionReference {
    /// Trims `raw` and requires at least [`MIN_UTR_LEN`] characters.
    pub fn parse(raw: &str) -> Result<Self, ValidationError> {
        let trimmed = raw.trim();
        if trimmed.chars().count() < MIN_UTR_LEN {
            return Err(ValidationError::invalid_format("utr", INVALID_UTR_MESSAGE));
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TransactionReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
