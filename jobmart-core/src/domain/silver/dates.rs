// jobmart-core/src/domain/silver/dates.rs

use chrono::Datelike;
use tracing::info;

use crate::domain::posting::{EnrichedPosting, YearMonth};
use crate::domain::stats;

/// Posting month/year and listing duration. Null dates give null features.
pub fn apply(rows: &mut [EnrichedPosting]) {
    for row in rows.iter_mut() {
        let posted = row.posting.posted_on;
        row.posting_month = posted.map(YearMonth::of);
        row.posting_year = posted.map(|d| d.year());
        row.posting_month_num = posted.map(|d| d.month());
        row.posting_duration_days = match (posted, row.posting.expires_on) {
            (Some(p), Some(e)) => Some((e - p).num_days()),
            _ => None,
        };
    }

    let avg_duration = stats::mean(
        rows.iter()
            .map(|r| r.posting_duration_days.map(|d| d as f64)),
    );
    info!(avg_duration_days = ?avg_duration, "Date features derived");
}
