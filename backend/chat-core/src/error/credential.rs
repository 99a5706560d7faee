//! Failure reasons for credential format validation.
//!
//! These reasons are logged for diagnostics; the user only ever sees the
//! single invalid-format status message.

/// Specific reasons for key validation failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyValidationFailure {
    Empty,
    WrongLength { expected: usize, actual: usize },
    InvalidCharacters,
}

impl std::fmt::Display for KeyValidationFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Empty => write!(f, "key is empty"),
            Self::WrongLength { expected, actual } => {
                write!(f, "key has {} chars, expected exactly {}", actual, expected)
            }
            Self::InvalidCharacters => write!(f, "contains characters outside [a-z0-9]"),
        }
    }
}
