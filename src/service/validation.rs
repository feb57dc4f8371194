//! Required-field checks shared by the handlers.

use crate::error::AppError;

pub struct RequestValidator;

impl RequestValidator {
    /// Every listed field must be present and non-empty. Reports all missing names at once.
    pub fn require(fields: &[(&str, Option<&str>)]) -> Result<(), AppError> {
        let missing: Vec<&str> = fields
            .iter()
            .filter(|(_, v)| v.map_or(true, |s| s.trim().is_empty()))
            .map(|(name, _)| *name)
            .collect();
        if missing.is_empty() {
            Ok(())
        } else {
            Err(Self::missing(&missing))
        }
    }

    /// The error for fields already known to be absent.
    pub fn missing(names: &[&str]) -> AppError {
        AppError::Validation(format!("missing required fields: {}", names.join(", ")))
    }

    /// `Some` only for a value with non-whitespace content.
    pub fn present(value: Option<String>) -> Option<String> {
        value.filter(|v| !v.trim().is_empty())
    }
}
