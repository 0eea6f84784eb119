// jobmart-core/src/domain/silver/salary.rs

//! Three-stage salary cleaning: hard bounds, IQR flagging, winsorization.

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::domain::configuration::SalaryPolicy;
use crate::domain::posting::EnrichedPosting;
use crate::domain::stats;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub lower: f64,
    pub upper: f64,
}

impl Bounds {
    pub fn clip(&self, value: f64) -> f64 {
        value.clamp(self.lower, self.upper)
    }

    pub fn contains(&self, value: f64) -> bool {
        value >= self.lower && value <= self.upper
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SalaryReport {
    /// Postings left without a bounded minimum.
    pub missing_minimum: u64,
    pub swapped: u64,
    pub iqr_fences: Option<Bounds>,
    pub outliers_flagged: u64,
    pub winsor_bounds: Option<Bounds>,
}

/// Stage 1. Values outside [floor, ceiling] become null, then an inverted
/// pair is swapped. Returns whether a swap happened.
pub fn bound(minimum: Option<f64>, maximum: Option<f64>, policy: &SalaryPolicy) -> (Option<f64>, Option<f64>, bool) {
    let within = |v: f64| v >= policy.floor && v <= policy.ceiling;
    let minimum = minimum.filter(|v| within(*v));
    let maximum = maximum.filter(|v| within(*v));
    match (minimum, maximum) {
        (Some(lo), Some(hi)) if lo > hi => (Some(hi), Some(lo), true),
        other => (other.0, other.1, false),
    }
}

/// Stage 2 fences: [Q1 - k*IQR, Q3 + k*IQR] over the sorted valid averages.
pub fn iqr_fences(sorted_averages: &[f64], multiplier: f64) -> Option<Bounds> {
    let q1 = stats::quantile(sorted_averages, 0.25)?;
    let q3 = stats::quantile(sorted_averages, 0.75)?;
    let iqr = q3 - q1;
    Some(Bounds {
        lower: q1 - multiplier * iqr,
        upper: q3 + multiplier * iqr,
    })
}

/// Stage 3 bounds: the low/high percentiles of the valid averages.
pub fn winsor_bounds(sorted_averages: &[f64], low: f64, high: f64) -> Option<Bounds> {
    Some(Bounds {
        lower: stats::quantile(sorted_averages, low)?,
        upper: stats::quantile(sorted_averages, high)?,
    })
}

/// Runs the three stages over every posting. Raw values are kept on
/// `*_raw`; the `*_clean` fields carry the winsorized result.
pub fn apply(rows: &mut [EnrichedPosting], policy: &SalaryPolicy) -> SalaryReport {
    let mut report = SalaryReport::default();

    for row in rows.iter_mut() {
        let raw_min = row.posting.salary_minimum;
        let raw_max = row.posting.salary_maximum;
        let (minimum, maximum, swapped) = bound(raw_min, raw_max, policy);

        row.salary.minimum_raw = raw_min;
        row.salary.maximum_raw = raw_max;
        row.salary.minimum = minimum;
        row.salary.maximum = maximum;
        if swapped {
            report.swapped += 1;
        }
        if minimum.is_none() {
            report.missing_minimum += 1;
        }
    }
    info!(
        floor = policy.floor,
        ceiling = policy.ceiling,
        missing_minimum = report.missing_minimum,
        swapped = report.swapped,
        "Salary stage 1/3: hard bounds applied"
    );

    let averages = stats::sorted(rows.iter().map(|r| r.salary.bounded_average()));

    report.iqr_fences = iqr_fences(&averages, policy.iqr_multiplier);
    for row in rows.iter_mut() {
        row.salary.outlier_iqr = match (report.iqr_fences, row.salary.bounded_average()) {
            (Some(fences), Some(avg)) => !fences.contains(avg),
            _ => false,
        };
        if row.salary.outlier_iqr {
            report.outliers_flagged += 1;
        }
    }
    info!(
        outliers = report.outliers_flagged,
        fences = ?report.iqr_fences,
        "Salary stage 2/3: IQR outliers flagged (not removed)"
    );

    report.winsor_bounds = winsor_bounds(&averages, policy.winsor_low, policy.winsor_high);
    for row in rows.iter_mut() {
        let s = &mut row.salary;
        match report.winsor_bounds {
            Some(bounds) => {
                s.minimum_clean = s.minimum.map(|v| bounds.clip(v));
                s.maximum_clean = s.maximum.map(|v| bounds.clip(v));
                s.average_clean = match (s.minimum_clean, s.maximum_clean) {
                    (Some(lo), Some(hi)) => Some((lo + hi) / 2.0),
                    _ => None,
                };
            }
            None => {
                s.minimum_clean = s.minimum;
                s.maximum_clean = s.maximum;
                s.average_clean = s.bounded_average();
            }
        }
    }
    info!(bounds = ?report.winsor_bounds, "Salary stage 3/3: winsorized");

    report
}
