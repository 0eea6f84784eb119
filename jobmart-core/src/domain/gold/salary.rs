// jobmart-core/src/domain/gold/salary.rs

use std::collections::BTreeMap;

use crate::domain::posting::EnrichedPosting;
use crate::domain::stats;

/// Grain: role family x seniority tier x primary industry.
#[derive(Debug, Clone, PartialEq)]
pub struct SalaryByRoleRow {
    pub role_family: String,
    pub seniority_tier: String,
    pub industry: String,
    pub n: u64,
    pub salary_mean: Option<f64>,
    pub salary_p25: Option<f64>,
    pub salary_median: Option<f64>,
    pub salary_p75: Option<f64>,
}

/// Benchmarks over postings with a cleaned average salary.
pub fn aggregate(rows: &[EnrichedPosting]) -> Vec<SalaryByRoleRow> {
    let mut groups: BTreeMap<(&str, &str, &str), Vec<f64>> = BTreeMap::new();
    for row in rows {
        let Some(salary) = row.salary.average_clean else {
            continue;
        };
        groups
            .entry((
                row.role_family.as_str(),
                row.seniority_tier.as_str(),
                row.primary_industry.as_str(),
            ))
            .or_default()
            .push(salary);
    }

    groups
        .into_iter()
        .map(|((role, tier, industry), salaries)| {
            let sorted = stats::sorted(salaries.iter().copied().map(Some));
            SalaryByRoleRow {
                role_family: role.to_string(),
                seniority_tier: tier.to_string(),
                industry: industry.to_string(),
                n: salaries.len() as u64,
                salary_mean: stats::mean(salaries.iter().copied().map(Some)),
                salary_p25: stats::quantile(&sorted, 0.25),
                salary_median: stats::quantile(&sorted, 0.5),
                salary_p75: stats::quantile(&sorted, 0.75),
            }
        })
        .collect()
}
