// jobmart-core/src/domain/silver/mod.rs

pub mod categories;
pub mod dates;
pub mod features;
pub mod layout;
pub mod roles;
pub mod salary;
pub mod seniority;

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::info;

use crate::domain::configuration::PipelineConfig;
use crate::domain::posting::{EnrichedPosting, JobPosting};
use crate::domain::stats;

pub use salary::{Bounds, SalaryReport};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SilverReport {
    pub rows: u64,
    pub distinct_industries: usize,
    pub mean_industries_per_posting: Option<f64>,
    pub seniority_distribution: BTreeMap<String, u64>,
    pub salary: SalaryReport,
    pub role_families: usize,
    pub dictionary_columns: Vec<String>,
}

/// Feature engineering over the Bronze postings, steps in fixed order.
pub fn enrich(
    postings: Vec<JobPosting>,
    config: &PipelineConfig,
) -> (Vec<EnrichedPosting>, SilverReport) {
    let mut rows: Vec<EnrichedPosting> = postings.into_iter().map(EnrichedPosting::from).collect();
    let mut report = SilverReport {
        rows: rows.len() as u64,
        ..Default::default()
    };

    // 1. Categories -> industries
    report.distinct_industries = categories::apply(&mut rows);
    report.mean_industries_per_posting =
        stats::mean(rows.iter().map(|r| Some(r.industry_count as f64)));

    // 2. Seniority 9 -> 4
    report.seniority_distribution = seniority::apply(&mut rows, &config.seniority_map);

    // 3. Salary
    report.salary = salary::apply(&mut rows, &config.salary);

    // 4. Dates
    dates::apply(&mut rows);

    // 5. Roles
    report.role_families = roles::apply(&mut rows, &config.role_keywords);

    // 6. Derived
    features::apply(&mut rows, &config.experience);

    // 7. Layout
    report.dictionary_columns = layout::dictionary_columns(&rows, &config.layout);

    info!(
        rows = report.rows,
        industries = report.distinct_industries,
        families = report.role_families,
        dictionary_columns = report.dictionary_columns.len(),
        "Silver enrichment complete"
    );
    (rows, report)
}
