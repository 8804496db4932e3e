//! Input validation for search queries and document identifiers
//!
//! Runs before anything reaches the query builder. Validation can reject;
//! sanitization never does, it only strips characters.

use crate::error::ApiError;

/// Maximum query length, measured after trimming and before sanitization.
pub const MAX_QUERY_LENGTH: usize = 200;
/// Maximum document identifier length after trimming.
pub const MAX_ID_LENGTH: usize = 100;

/// Characters stripped from queries before they reach the query builder.
const QUERY_DENYLIST: [char; 7] = ['<', '>', '{', '}', '[', ']', '\\'];

/// Validate and sanitize a search query.
///
/// Rejects absent, empty-after-trim and over-long values, then strips the
/// structural denylist characters. Hebrew, Latin, digits, spaces and common
/// punctuation all pass through untouched.
pub fn validate_search_query(query: Option<&str>) -> Result<String, ApiError> {
    let query = query.ok_or_else(|| ApiError::invalid_input("Search query is required"))?;

    let trimmed = query.trim();

    if trimmed.is_empty() {
        return Err(ApiError::invalid_input("Search query cannot be empty"));
    }

    if trimmed.chars().count() > MAX_QUERY_LENGTH {
        return Err(ApiError::invalid_input(format!(
            "Search query cannot exceed {} characters",
            MAX_QUERY_LENGTH
        )));
    }

    let sanitized: String = trimmed.chars().filter(|c| !QUERY_DENYLIST.contains(c)).collect();

    Ok(sanitized)
}

/// Validate a document identifier.
///
/// Backend-assigned ids are ASCII alphanumerics plus `_` and `-`; anything
/// else is rejected rather than escaped.
pub fn validate_document_id(id: Option<&str>) -> Result<String, ApiError> {
    let id = id.ok_or_else(|| ApiError::invalid_input("Document ID is required"))?;

    let trimmed = id.trim();

    if trimmed.is_empty() {
        return Err(ApiError::invalid_input("Document ID cannot be empty"));
    }

    if trimmed.len() > MAX_ID_LENGTH {
        return Err(ApiError::invalid_input(format!(
            "Document ID cannot exceed {} characters",
            MAX_ID_LENGTH
        )));
    }

    if !trimmed.chars().all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-') {
        return Err(ApiError::invalid_input("Invalid document ID format"));
    }

    Ok(trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_required() {
        assert!(validate_search_query(None).is_err());
    }

    #[test]
    fn test_query_empty_and_whitespace_rejected() {
        assert!(validate_search_query(Some("")).is_err());
        assert!(validate_search_query(Some("   \t ")).is_err());
    }

    #[test]
    fn test_query_length_boundary() {
        let ok = "א".repeat(MAX_QUERY_LENGTH);
        assert_eq!(validate_search_query(Some(&ok)).unwrap(), ok);

        let too_long = "א".repeat(300);
        assert!(validate_search_query(Some(&too_long)).is_err());
    }

    #[test]
    fn test_query_length_measured_after_trim() {
        let padded = format!("  {}  ", "x".repeat(MAX_QUERY_LENGTH));
        assert!(validate_search_query(Some(&padded)).is_ok());
    }

    #[test]
    fn test_query_sanitization_strips_denylist() {
        let sanitized = validate_search_query(Some("הרצל <script>{}[]\\")).unwrap();
        assert_eq!(sanitized, "הרצל script");
    }

    #[test]
    fn test_query_keeps_hebrew_and_punctuation() {
        let sanitized = validate_search_query(Some("בן-גוריון (דוד)")).unwrap();
        assert_eq!(sanitized, "בן-גוריון (דוד)");
    }

    #[test]
    fn test_punctuation_only_query_sanitizes_without_error() {
        // degenerates to an empty string; the query builder still gets a
        // valid (zero-hit) expression out of it
        assert_eq!(validate_search_query(Some("[]{}")).unwrap(), "");
    }

    #[test]
    fn test_id_required_and_empty() {
        assert!(validate_document_id(None).is_err());
        assert!(validate_document_id(Some("  ")).is_err());
    }

    #[test]
    fn test_id_charset() {
        assert_eq!(
            validate_document_id(Some("abc_DEF-123")).unwrap(),
            "abc_DEF-123"
        );
        assert!(validate_document_id(Some("invalid@id#with$")).is_err());
        assert!(validate_document_id(Some("id with space")).is_err());
    }

    #[test]
    fn test_id_length_boundary() {
        let ok = "a".repeat(MAX_ID_LENGTH);
        assert!(validate_document_id(Some(&ok)).is_ok());
        let too_long = "a".repeat(MAX_ID_LENGTH + 1);
        assert!(validate_document_id(Some(&too_long)).is_err());
    }
}
