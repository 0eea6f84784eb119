// jobmart-core/src/domain/gold/competition.rs

use std::collections::BTreeMap;

use crate::domain::gold::explode;
use crate::domain::posting::EnrichedPosting;
use crate::domain::stats;

/// Grain: industry (exploded) x role family.
#[derive(Debug, Clone, PartialEq)]
pub struct CompetitionRow {
    pub industry: String,
    pub role_family: String,
    pub posting_count: u64,
    pub avg_applications: Option<f64>,
    pub competition_ratio_median: Option<f64>,
    pub competition_ratio_p25: Option<f64>,
    pub competition_ratio_p75: Option<f64>,
}

/// Applicant pressure, over postings that have a competition ratio.
pub fn aggregate(rows: &[EnrichedPosting]) -> Vec<CompetitionRow> {
    let mut groups: BTreeMap<(&str, &str), Vec<&EnrichedPosting>> = BTreeMap::new();
    for (industry, row) in explode(rows) {
        if row.competition_ratio.is_none() {
            continue;
        }
        groups
            .entry((industry, row.role_family.as_str()))
            .or_default()
            .push(row);
    }

    groups
        .into_iter()
        .map(|((industry, role), members)| {
            let ratios = stats::sorted(members.iter().map(|r| r.competition_ratio));
            CompetitionRow {
                industry: industry.to_string(),
                role_family: role.to_string(),
                posting_count: members.len() as u64,
                avg_applications: stats::mean(
                    members.iter().map(|r| r.posting.applications.map(|v| v as f64)),
                ),
                competition_ratio_median: stats::quantile(&ratios, 0.5),
                competition_ratio_p25: stats::quantile(&ratios, 0.25),
                competition_ratio_p75: stats::quantile(&ratios, 0.75),
            }
        })
        .collect()
}
