// jobmart-core/src/domain/gold/experience.rs

use std::collections::BTreeMap;

use crate::domain::gold::explode;
use crate::domain::posting::EnrichedPosting;
use crate::domain::stats;

/// Grain: industry (exploded) x experience band x seniority tier.
#[derive(Debug, Clone, PartialEq)]
pub struct ExperienceDemandRow {
    pub industry: String,
    pub experience_band: String,
    pub seniority_tier: String,
    pub posting_count: u64,
    pub avg_salary: Option<f64>,
}

pub fn aggregate(rows: &[EnrichedPosting]) -> Vec<ExperienceDemandRow> {
    let mut groups: BTreeMap<(&str, &str, &str), Vec<Option<f64>>> = BTreeMap::new();
    for (industry, row) in explode(rows) {
        groups
            .entry((
                industry,
                row.experience_band.as_str(),
                row.seniority_tier.as_str(),
            ))
            .or_default()
            .push(row.salary.average_clean);
    }

    groups
        .into_iter()
        .map(|((industry, band, tier), salaries)| ExperienceDemandRow {
            industry: industry.to_string(),
            experience_band: band.to_string(),
            seniority_tier: tier.to_string(),
            posting_count: salaries.len() as u64,
            avg_salary: stats::mean(salaries),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::gold::fixtures::{Spec, row};
    use crate::domain::posting::SeniorityTier;

    #[test]
    fn test_experience_grain() {
        let mut rows = vec![
            row(Spec {
                industries: &["IT", "Banking"],
                tier: SeniorityTier::Mid,
                salary: Some(4000.0),
                ..Default::default()
            }),
            row(Spec {
                industries: &["IT"],
                tier: SeniorityTier::Mid,
                salary: Some(6000.0),
                ..Default::default()
            }),
            row(Spec {
                industries: &["IT"],
                tier: SeniorityTier::Senior,
                ..Default::default()
            }),
        ];
        for r in rows.iter_mut() {
            r.experience_band = "2-3 yrs".to_string();
        }

        let table = aggregate(&rows);
        let keys: Vec<(&str, &str)> = table
            .iter()
            .map(|r| (r.industry.as_str(), r.seniority_tier.as_str()))
            .collect();
        assert_eq!(keys, vec![("Banking", "Mid"), ("IT", "Mid"), ("IT", "Senior")]);

        assert_eq!(table[1].posting_count, 2);
        assert_eq!(table[1].avg_salary, Some(5000.0));
        assert_eq!(table[2].avg_salary, None);
    }
}
