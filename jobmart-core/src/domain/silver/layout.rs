// jobmart-core/src/domain/silver/layout.rs

use std::collections::HashSet;
use tracing::debug;

use crate::domain::configuration::LayoutPolicy;
use crate::domain::posting::{EnrichedPosting, columns};

/// Value of a low-cardinality string column, `None` for columns that
/// cannot be dictionary-encoded.
fn string_value<'a>(row: &'a EnrichedPosting, column: &str) -> Option<Option<&'a str>> {
    let value = match column {
        columns::EMPLOYMENT_TYPES => row.posting.employment_type.as_deref(),
        columns::POSITION_LEVELS => row.posting.position_level.as_deref(),
        columns::SENIORITY_TIER => Some(row.seniority_tier.as_str()),
        columns::ROLE_FAMILY => Some(row.role_family.as_str()),
        columns::EXPERIENCE_BAND => Some(row.experience_band.as_str()),
        columns::PRIMARY_INDUSTRY => Some(row.primary_industry.as_str()),
        _ => return None,
    };
    Some(value)
}

/// Candidate columns whose distinct non-null ratio is below the threshold.
/// These are written dictionary-encoded.
pub fn dictionary_columns(rows: &[EnrichedPosting], policy: &LayoutPolicy) -> Vec<String> {
    if rows.is_empty() {
        return Vec::new();
    }
    let mut selected = Vec::new();
    for column in &policy.candidates {
        let mut distinct = HashSet::new();
        let mut known = true;
        for row in rows {
            match string_value(row, column) {
                Some(Some(v)) => {
                    distinct.insert(v);
                }
                Some(None) => {}
                None => {
                    known = false;
                    break;
                }
            }
        }
        if !known {
            continue;
        }
        let ratio = distinct.len() as f64 / rows.len() as f64;
        debug!(column = %column, ratio, "Dictionary candidate");
        if ratio < policy.max_unique_ratio {
            selected.push(column.clone());
        }
    }
    selected
}
