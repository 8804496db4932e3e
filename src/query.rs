//! Query builder - translates (query, mode) into an Elasticsearch expression
//!
//! Three search modes:
//! - `free`: word-level match against the main name only
//! - `exact`: word-level match against all searchable fields, OR across
//!   tokens and fields (best match wins)
//! - `full`: contiguous phrase match against all searchable fields
//!
//! Every expression excludes tombstoned records via a structural
//! `must_not` clause; no query content can bypass it.

use serde_json::{json, Value};

use crate::fields;

/// Search mode. Anything that is not one of the three recognized tokens
/// (including case variants) is coerced to [`SearchMode::Free`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchMode {
    Free,
    Exact,
    Full,
}

impl SearchMode {
    /// Normalize the raw wire value. Never fails: absent or unrecognized
    /// values fall back to `free`, and the caller learns the effective mode
    /// from the response echo.
    pub fn from_param(mode: Option<&str>) -> Self {
        match mode {
            Some("free") => SearchMode::Free,
            Some("exact") => SearchMode::Exact,
            Some("full") => SearchMode::Full,
            _ => SearchMode::Free,
        }
    }

    /// Wire token for this mode, echoed back in search responses.
    pub fn as_str(&self) -> &'static str {
        match self {
            SearchMode::Free => "free",
            SearchMode::Exact => "exact",
            SearchMode::Full => "full",
        }
    }
}

/// Build the Elasticsearch query for a sanitized, non-empty query string.
///
/// The caller must have run the string through
/// [`crate::validation::validate_search_query`] first; a query that
/// sanitized down to punctuation still yields a valid expression, it just
/// matches nothing.
pub fn build_search_query(query: &str, mode: SearchMode) -> Value {
    let deleted_filter = json!({ "term": { (fields::DELETED): true } });

    let must = match mode {
        SearchMode::Free => json!({
            "match": { (fields::MAIN_NAME): query }
        }),
        SearchMode::Exact => json!({
            "multi_match": {
                "query": query,
                "fields": fields::SEARCHABLE_FIELDS,
                "operator": "or",
                "type": "best_fields"
            }
        }),
        SearchMode::Full => json!({
            "multi_match": {
                "query": query,
                "fields": fields::SEARCHABLE_FIELDS,
                "type": "phrase"
            }
        }),
    };

    json!({
        "bool": {
            "must": [must],
            "must_not": [deleted_filter]
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn deleted_clause(expr: &Value) -> &Value {
        &expr["bool"]["must_not"][0]["term"][fields::DELETED]
    }

    #[test]
    fn test_mode_from_param() {
        assert_eq!(SearchMode::from_param(Some("free")), SearchMode::Free);
        assert_eq!(SearchMode::from_param(Some("exact")), SearchMode::Exact);
        assert_eq!(SearchMode::from_param(Some("full")), SearchMode::Full);
    }

    #[test]
    fn test_unrecognized_mode_coerces_to_free() {
        assert_eq!(SearchMode::from_param(None), SearchMode::Free);
        assert_eq!(SearchMode::from_param(Some("bogus")), SearchMode::Free);
        assert_eq!(SearchMode::from_param(Some("")), SearchMode::Free);
        // case-sensitive at the wire boundary
        assert_eq!(SearchMode::from_param(Some("FREE")), SearchMode::Free);
        assert_eq!(SearchMode::from_param(Some("Exact")), SearchMode::Free);
    }

    #[test]
    fn test_free_mode_matches_main_name_only() {
        let expr = build_search_query("הרצל", SearchMode::Free);
        assert_eq!(expr["bool"]["must"][0]["match"][fields::MAIN_NAME], "הרצל");
        assert!(expr["bool"]["must"][0]["multi_match"].is_null());
    }

    #[test]
    fn test_exact_mode_is_or_across_all_fields() {
        let expr = build_search_query("בן גוריון", SearchMode::Exact);
        let mm = &expr["bool"]["must"][0]["multi_match"];
        assert_eq!(mm["query"], "בן גוריון");
        assert_eq!(mm["operator"], "or");
        assert_eq!(mm["type"], "best_fields");
        assert_eq!(mm["fields"].as_array().unwrap().len(), fields::SEARCHABLE_FIELDS.len());
    }

    #[test]
    fn test_full_mode_is_phrase_without_operator() {
        let expr = build_search_query("יהודה הלוי", SearchMode::Full);
        let mm = &expr["bool"]["must"][0]["multi_match"];
        assert_eq!(mm["type"], "phrase");
        assert!(mm["operator"].is_null());
        assert_eq!(mm["fields"].as_array().unwrap().len(), fields::SEARCHABLE_FIELDS.len());
    }

    #[test]
    fn test_every_mode_excludes_deleted_records() {
        for mode in [SearchMode::Free, SearchMode::Exact, SearchMode::Full] {
            let expr = build_search_query("רחוב", mode);
            assert_eq!(deleted_clause(&expr), true, "mode {:?}", mode);
        }
    }

    #[test]
    fn test_degenerate_query_still_builds_valid_expression() {
        // punctuation-only content that survived sanitization: legal query,
        // legitimately zero hits
        let expr = build_search_query("...", SearchMode::Exact);
        assert!(expr["bool"]["must"].is_array());
        assert_eq!(deleted_clause(&expr), true);
    }
}
