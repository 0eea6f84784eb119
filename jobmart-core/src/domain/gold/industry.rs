// jobmart-core/src/domain/gold/industry.rs

use std::collections::BTreeMap;

use crate::domain::gold::{explode, rate};
use crate::domain::posting::EnrichedPosting;
use crate::domain::stats;

/// Grain: industry (exploded).
#[derive(Debug, Clone, PartialEq)]
pub struct IndustryDemandRow {
    pub industry: String,
    pub posting_count: u64,
    pub total_vacancies: i64,
    pub avg_applications: Option<f64>,
    pub avg_views: Option<f64>,
    pub avg_salary: Option<f64>,
    pub repost_rate: Option<f64>,
}

pub fn aggregate(rows: &[EnrichedPosting]) -> Vec<IndustryDemandRow> {
    let mut groups: BTreeMap<&str, Vec<&EnrichedPosting>> = BTreeMap::new();
    for (industry, row) in explode(rows) {
        groups.entry(industry).or_default().push(row);
    }

    groups
        .into_iter()
        .map(|(industry, members)| {
            let reposted: Vec<bool> = members.iter().map(|r| r.is_reposted).collect();
            IndustryDemandRow {
                industry: industry.to_string(),
                posting_count: members.len() as u64,
                total_vacancies: stats::sum(members.iter().map(|r| r.posting.vacancies)),
                avg_applications: stats::mean(
                    members.iter().map(|r| r.posting.applications.map(|v| v as f64)),
                ),
                avg_views: stats::mean(members.iter().map(|r| r.posting.views.map(|v| v as f64))),
                avg_salary: stats::mean(members.iter().map(|r| r.salary.average_clean)),
                repost_rate: rate(&reposted),
            }
        })
        .collect()
}
