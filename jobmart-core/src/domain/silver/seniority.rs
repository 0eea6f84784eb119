// jobmart-core/src/domain/silver/seniority.rs

use std::collections::BTreeMap;

use crate::domain::posting::{EnrichedPosting, SeniorityTier};

pub fn tier_of(level: Option<&str>, map: &BTreeMap<String, SeniorityTier>) -> SeniorityTier {
    level
        .and_then(|l| map.get(l))
        .copied()
        .unwrap_or(SeniorityTier::Unknown)
}

/// Maps every posting and returns the tier distribution.
pub fn apply(
    rows: &mut [EnrichedPosting],
    map: &BTreeMap<String, SeniorityTier>,
) -> BTreeMap<String, u64> {
    let mut distribution = BTreeMap::new();
    for row in rows.iter_mut() {
        row.seniority_tier = tier_of(row.posting.position_level.as_deref(), map);
        *distribution
            .entry(row.seniority_tier.to_string())
            .or_insert(0) += 1;
    }
    distribution
}
