//! Centralized input validation for the CLI and web boundaries.

/// Maximum accepted query length in bytes (DOS protection)
pub const MAX_QUERY_LENGTH: usize = 4096;

/// Upper bound for caller-supplied `top_k` values
pub const MAX_TOP_K: usize = 50;

/// Input validation error types
#[derive(Debug, thiserror::Error)]
pub enum ValidationError {
    #[error("Query too long: exceeds {MAX_QUERY_LENGTH} bytes")]
    QueryTooLong,
    #[error("Query contains control characters")]
    InvalidCharacters,
}

/// Validate free-text symptoms before they reach the matcher.
///
/// Blank text is valid here; the matcher treats it as a no-op.
///
/// # Examples
///
/// ```
/// use symptom_matcher::utils::validation::validate_query;
///
/// assert!(validate_query("fever, cough").is_ok());
/// assert!(validate_query("").is_ok());
/// assert!(validate_query("fever\0").is_err());
/// ```
///
/// # Errors
///
/// Returns `ValidationError::QueryTooLong` if the text exceeds
/// [`MAX_QUERY_LENGTH`], or `ValidationError::InvalidCharacters` if it contains
/// control characters other than whitespace.
pub fn validate_query(text: &str) -> Result<&str, ValidationError> {
    if text.len() > MAX_QUERY_LENGTH {
        return Err(ValidationError::QueryTooLong);
    }

    if text.chars().any(|c| c.is_control() && !c.is_whitespace()) {
        return Err(ValidationError::InvalidCharacters);
    }

    Ok(text)
}

/// Clamp a caller-supplied `top_k` into `1..=MAX_TOP_K`
#[must_use]
pub fn clamp_top_k(top_k: usize) -> usize {
    top_k.clamp(1, MAX_TOP_K)
}
