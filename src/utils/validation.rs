//! Centralized validation and normalization helpers for model designations.

/// Maximum number of catalog entries accepted in one snapshot (DOS protection)
pub const MAX_CATALOG_ITEMS: usize = 100_000;

/// Longest model designation the engine will look at
pub const MAX_MODEL_LENGTH: usize = 64;

/// Normalize a model designation for rule lookups: trimmed and uppercased.
///
/// # Examples
///
/// ```
/// use marine_select::utils::validation::normalize_model;
///
/// assert_eq!(normalize_model("  hc1200/1 "), "HC1200/1");
/// ```
#[must_use]
pub fn normalize_model(model: &str) -> String {
    model.trim().to_uppercase()
}

/// Normalize a model designation for equality checks: uppercased with every
/// whitespace character removed.
///
/// # Examples
///
/// ```
/// use marine_select::utils::validation::compact_model;
///
/// assert_eq!(compact_model("2cy 7.5 / 2.5d"), "2CY7.5/2.5D");
/// ```
#[must_use]
pub fn compact_model(model: &str) -> String {
    model
        .chars()
        .filter(|c| !c.is_whitespace())
        .flat_map(char::to_uppercase)
        .collect()
}

/// Model validation error types
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Empty model designation")]
    EmptyModel,
    #[error("Model designation too long: exceeds {MAX_MODEL_LENGTH} characters")]
    ModelTooLong,
    #[error("Model designation contains no letters or digits")]
    NoAlphanumeric,
    #[error("Model designation contains control characters")]
    ControlCharacters,
}

/// Check that a primary model string is usable before it reaches the classifier.
///
/// # Errors
///
/// Returns `ValidationError::EmptyModel` for blank input,
/// `ValidationError::ModelTooLong` past the length limit,
/// `ValidationError::ControlCharacters` for embedded control characters, and
/// `ValidationError::NoAlphanumeric` when nothing identifies a series or size.
pub fn validate_model(model: &str) -> Result<(), ValidationError> {
    let trimmed = model.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::EmptyModel);
    }

    if trimmed.chars().count() > MAX_MODEL_LENGTH {
        return Err(ValidationError::ModelTooLong);
    }

    if trimmed.chars().any(char::is_control) {
        return Err(ValidationError::ControlCharacters);
    }

    if !trimmed.chars().any(char::is_alphanumeric) {
        return Err(ValidationError::NoAlphanumeric);
    }

    Ok(())
}

/// Check if adding another catalog entry would exceed the maximum allowed.
///
/// Call this with the current count BEFORE adding a new entry.
#[must_use]
pub fn check_catalog_limit(count: usize) -> Option<String> {
    if count >= MAX_CATALOG_ITEMS {
        Some(format!(
            "Too many catalog entries: adding another would exceed maximum of {MAX_CATALOG_ITEMS}"
        ))
    } else {
        None
    }
}
