//! Field registry for the street-name index
//!
//! The index schema is fixed: eight text attributes per record plus the
//! `deleted` tombstone flag. Field names are the original Hebrew column
//! headers from the municipal archive CSV, so they are used verbatim as
//! Elasticsearch field names.

use serde_json::{json, Value};

/// Main street name / שם ראשי
pub const MAIN_NAME: &str = "שם ראשי";
/// Title or honorific / תואר
pub const TITLE: &str = "תואר";
/// Secondary name / שם מישני
pub const SECONDARY_NAME: &str = "שם מישני";
/// Primary group / קבוצה
pub const GROUP: &str = "קבוצה";
/// Secondary group / קבוצה נוספת
pub const ADDITIONAL_GROUP: &str = "קבוצה נוספת";
/// Record type / סוג
pub const TYPE: &str = "סוג";
/// Short code / קוד
pub const CODE: &str = "קוד";
/// Neighborhood / שכונה
pub const NEIGHBORHOOD: &str = "שכונה";
/// Tombstone flag, the only field this service ever mutates
pub const DELETED: &str = "deleted";

/// Fields consulted by the `exact` and `full` search modes.
/// `free` mode only looks at [`MAIN_NAME`].
pub const SEARCHABLE_FIELDS: [&str; 8] = [
    MAIN_NAME,
    TITLE,
    SECONDARY_NAME,
    GROUP,
    ADDITIONAL_GROUP,
    TYPE,
    CODE,
    NEIGHBORHOOD,
];

/// Fields returned to callers. The group fields and the tombstone flag are
/// searchable but never exposed in results.
pub const RESULT_FIELDS: [&str; 6] = [
    MAIN_NAME,
    TITLE,
    SECONDARY_NAME,
    TYPE,
    CODE,
    NEIGHBORHOOD,
];

/// Index mapping expected by this service. The loader creates the index with
/// this mapping; text fields carry a `keyword` sub-field for exact matching,
/// the code is a plain keyword and the tombstone is a boolean.
pub fn index_mapping() -> Value {
    fn text_field() -> Value {
        json!({
            "type": "text",
            "fields": { "keyword": { "type": "keyword" } }
        })
    }

    json!({
        "mappings": {
            "properties": {
                MAIN_NAME: text_field(),
                TITLE: text_field(),
                SECONDARY_NAME: text_field(),
                GROUP: text_field(),
                ADDITIONAL_GROUP: text_field(),
                TYPE: text_field(),
                NEIGHBORHOOD: text_field(),
                CODE: { "type": "keyword" },
                DELETED: { "type": "boolean" }
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn result_fields_are_a_subset_of_searchable_fields() {
        for field in RESULT_FIELDS {
            assert!(SEARCHABLE_FIELDS.contains(&field));
        }
    }

    #[test]
    fn group_fields_and_tombstone_are_never_returned() {
        assert!(!RESULT_FIELDS.contains(&GROUP));
        assert!(!RESULT_FIELDS.contains(&ADDITIONAL_GROUP));
        assert!(!RESULT_FIELDS.contains(&DELETED));
    }

    #[test]
    fn mapping_covers_every_field() {
        let mapping = index_mapping();
        let props = &mapping["mappings"]["properties"];
        for field in SEARCHABLE_FIELDS {
            assert!(!props[field].is_null(), "missing mapping for {}", field);
        }
        assert_eq!(props[DELETED]["type"], "boolean");
        assert_eq!(props[CODE]["type"], "keyword");
    }
}
