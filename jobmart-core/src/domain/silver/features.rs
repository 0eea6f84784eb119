// jobmart-core/src/domain/silver/features.rs

use tracing::info;

use crate::domain::configuration::ExperiencePolicy;
use crate::domain::posting::{EnrichedPosting, UNKNOWN};
use crate::domain::stats;

/// Band label for a years-of-experience value, after clamping to the cap.
pub fn experience_band(years: Option<i64>, policy: &ExperiencePolicy) -> &str {
    let Some(years) = years else {
        return UNKNOWN;
    };
    let years = years.min(policy.max_years);
    policy
        .bands
        .iter()
        .find(|band| band.min <= years && years <= band.max)
        .map(|band| band.label.as_str())
        .unwrap_or(UNKNOWN)
}

/// Applications per vacancy. Null for zero vacancies or missing inputs.
pub fn competition_ratio(applications: Option<i64>, vacancies: Option<i64>) -> Option<f64> {
    match (applications, vacancies) {
        (Some(a), Some(v)) if v != 0 => Some(a as f64 / v as f64),
        _ => None,
    }
}

pub fn apply(rows: &mut [EnrichedPosting], policy: &ExperiencePolicy) {
    for row in rows.iter_mut() {
        row.experience_band =
            experience_band(row.posting.min_years_experience, policy).to_string();
        row.competition_ratio =
            competition_ratio(row.posting.applications, row.posting.vacancies);
        row.is_reposted = row.posting.repost_count.is_some_and(|c| c > 0);
        row.salary.annual_clean = row.salary.average_clean.map(|v| v * 12.0);
    }

    let reposted = rows.iter().filter(|r| r.is_reposted).count();
    info!(
        avg_competition = ?stats::mean(rows.iter().map(|r| r.competition_ratio)),
        reposted,
        "Derived features added"
    );
}
