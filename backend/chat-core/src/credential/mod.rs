//! API key format validation.
//!
//! Validates keys BEFORE sending to the server to fail fast on obviously
//! invalid values. The qBraid key shape is fixed: exactly 30 characters,
//! lowercase letters and digits only.

use crate::error::KeyValidationFailure;

use common::RedactedApiKey;

use std::sync::OnceLock;

use regex::Regex;

/// Exact length of a qBraid API key.
pub const API_KEY_LENGTH: usize = 30;

const KEY_SHAPE_PATTERN: &str = r"^[a-z0-9]+$";

static KEY_SHAPE_REGEX: OnceLock<Regex> = OnceLock::new();

fn key_shape_regex() -> &'static Regex {
    KEY_SHAPE_REGEX.get_or_init(|| Regex::new(KEY_SHAPE_PATTERN).expect("valid regex pattern"))
}

/// Validation result for an API key.
///
/// Rejection is a normal UI-state transition, not an error: the gate never
/// propagates a failure beyond the status line.
#[derive(Debug)]
pub enum ValidationResult {
    Valid(RedactedApiKey),
    Invalid(KeyValidationFailure),
}

impl ValidationResult {
    pub fn is_valid(&self) -> bool {
        matches!(self, ValidationResult::Valid(_))
    }
}

/// Validate a raw key as typed into the key-entry field.
///
/// Trims surrounding whitespace, then accepts iff the trimmed value is
/// exactly [`API_KEY_LENGTH`] characters of `[a-z0-9]`. On acceptance the
/// key is wrapped in [`RedactedApiKey`] so it can no longer leak through
/// Debug output or serialization.
pub fn validate(raw: &str) -> ValidationResult {
    let trimmed = raw.trim();

    if trimmed.is_empty() {
        return ValidationResult::Invalid(KeyValidationFailure::Empty);
    }

    if trimmed.len() != API_KEY_LENGTH {
        return ValidationResult::Invalid(KeyValidationFailure::WrongLength {
            expected: API_KEY_LENGTH,
            actual: trimmed.len(),
        });
    }

    if !key_shape_regex().is_match(trimmed) {
        return ValidationResult::Invalid(KeyValidationFailure::InvalidCharacters);
    }

    ValidationResult::Valid(RedactedApiKey::new(trimmed.to_owned()))
}
