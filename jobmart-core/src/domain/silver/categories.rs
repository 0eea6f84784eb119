// jobmart-core/src/domain/silver/categories.rs

use regex::Regex;
use serde_json::Value;
use std::collections::BTreeSet;
use std::sync::OnceLock;
use tracing::info;

use crate::domain::posting::{EnrichedPosting, UNKNOWN};

fn re_category() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r#""category":"([^"]+)""#).unwrap_or_else(|_| {
            // Hardcoded pattern, cannot fail
            Regex::new("$^").unwrap_or_else(|_| unreachable!())
        })
    })
}

/// Ordered industry tags of a category payload.
///
/// The payload is a JSON list of objects carrying a `category` key. Objects
/// without the key, or with a null one, yield an empty tag; non-object items
/// are skipped. A payload
/// that is not valid JSON is scanned for `"category":"..."` pairs instead.
pub fn parse_categories(payload: Option<&str>) -> Vec<String> {
    let Some(payload) = payload else {
        return Vec::new();
    };

    match serde_json::from_str::<Value>(payload) {
        Ok(Value::Array(items)) => items
            .iter()
            .filter_map(Value::as_object)
            .map(|obj| {
                obj.get("category")
                    .map(|c| match c {
                        Value::String(s) => s.clone(),
                        Value::Null => String::new(),
                        other => other.to_string(),
                    })
                    .unwrap_or_default()
            })
            .collect(),
        Ok(_) => Vec::new(),
        Err(_) => re_category()
            .captures_iter(payload)
            .filter_map(|c| c.get(1))
            .map(|m| m.as_str().to_string())
            .collect(),
    }
}

/// Fills `industry_list`, `primary_industry` and `industry_count`.
/// Returns the number of distinct primary industries.
pub fn apply(rows: &mut [EnrichedPosting]) -> usize {
    for row in rows.iter_mut() {
        row.industry_list = parse_categories(row.posting.categories.as_deref());
        row.primary_industry = row
            .industry_list
            .first()
            .cloned()
            .unwrap_or_else(|| UNKNOWN.to_string());
        row.industry_count = row.industry_list.len();
    }

    let distinct = rows
        .iter()
        .map(|r| r.primary_industry.as_str())
        .collect::<BTreeSet<_>>()
        .len();
    info!(industries = distinct, "Categories parsed");
    distinct
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_category() {
        assert_eq!(
            parse_categories(Some(r#"[{"category":"X"}]"#)),
            vec!["X".to_string()]
        );
    }

    #[test]
    fn test_empty_null_and_non_list() {
        assert!(parse_categories(Some("[]")).is_empty());
        assert!(parse_categories(None).is_empty());
        assert!(parse_categories(Some(r#"{"category":"X"}"#)).is_empty());
    }

    #[test]
    fn test_multi_tag_order_is_kept() {
        let payload = r#"[{"id":21,"category":"Information Technology"},{"id":3,"category":"Banking and Finance"}]"#;
        assert_eq!(
            parse_categories(Some(payload)),
            vec![
                "Information Technology".to_string(),
                "Banking and Finance".to_string()
            ]
        );
    }

    #[test]
    fn test_items_without_key_or_not_objects() {
        let payload = r#"[{"id":1},"loose",{"category":"Y"}]"#;
        assert_eq!(
            parse_categories(Some(payload)),
            vec![String::new(), "Y".to_string()]
        );
    }

    #[test]
    fn test_null_category_is_an_empty_tag() {
        let payload = r#"[{"category":null},{"category":"IT"}]"#;
        assert_eq!(
            parse_categories(Some(payload)),
            vec![String::new(), "IT".to_string()]
        );
    }

    #[test]
    fn test_malformed_json_falls_back_to_scan() {
        let payload = r#"[{"category":"A"},{"category":"B"}"#;
        assert_eq!(
            parse_categories(Some(payload)),
            vec!["A".to_string(), "B".to_string()]
        );
        assert!(parse_categories(Some("garbage")).is_empty());
    }
}
