// jobmart-core/src/domain/gold/companies.rs

use std::collections::BTreeMap;

use crate::domain::gold::rate;
use crate::domain::posting::EnrichedPosting;
use crate::domain::stats;

/// Grain: company x primary industry. Not exploded: one contribution
/// per posting.
#[derive(Debug, Clone, PartialEq)]
pub struct TopCompanyRow {
    pub company: String,
    pub primary_industry: String,
    pub posting_count: u64,
    pub avg_salary: Option<f64>,
    pub repost_rate: Option<f64>,
    pub avg_vacancies_per_post: Option<f64>,
}

pub fn aggregate(rows: &[EnrichedPosting]) -> Vec<TopCompanyRow> {
    let mut groups: BTreeMap<(&str, &str), Vec<&EnrichedPosting>> = BTreeMap::new();
    for row in rows {
        let Some(company) = row.posting.company_name.as_deref() else {
            continue;
        };
        groups
            .entry((company, row.primary_industry.as_str()))
            .or_default()
            .push(row);
    }

    groups
        .into_iter()
        .map(|((company, industry), members)| {
            let reposted: Vec<bool> = members.iter().map(|r| r.is_reposted).collect();
            TopCompanyRow {
                company: company.to_string(),
                primary_industry: industry.to_string(),
                posting_count: members.len() as u64,
                avg_salary: stats::mean(members.iter().map(|r| r.salary.average_clean)),
                repost_rate: rate(&reposted),
                avg_vacancies_per_post: stats::mean(
                    members.iter().map(|r| r.posting.vacancies.map(|v| v as f64)),
                ),
            }
        })
        .collect()
}
