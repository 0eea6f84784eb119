// jobmart-core/src/domain/gold/monthly.rs

use std::collections::{BTreeMap, BTreeSet};

use crate::domain::gold::explode;
use crate::domain::posting::{EnrichedPosting, YearMonth};
use crate::domain::stats;

/// Grain: posting month x industry (exploded).
#[derive(Debug, Clone, PartialEq)]
pub struct MonthlyPostingsRow {
    pub posting_month: YearMonth,
    pub industry: String,
    pub posting_count: u64,
    pub avg_salary: Option<f64>,
    pub total_vacancies: i64,
    /// `pct_*` column -> share of the group's typed postings. `None` when no
    /// posting of the group carries an employment type.
    pub employment_share: Option<BTreeMap<String, f64>>,
}

impl MonthlyPostingsRow {
    /// Value of one `pct_*` column for this row.
    pub fn share(&self, column: &str) -> Option<f64> {
        self.employment_share
            .as_ref()
            .map(|shares| shares.get(column).copied().unwrap_or(0.0))
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct MonthlyPostings {
    /// `pct_*` columns, ordered by employment type.
    pub share_columns: Vec<String>,
    pub rows: Vec<MonthlyPostingsRow>,
}

/// `Full Time` -> `pct_full_time`, `Part Time/Temp` -> `pct_part_time_temp`.
pub fn share_column(employment_type: &str) -> String {
    format!(
        "pct_{}",
        employment_type.to_lowercase().replace([' ', '/'], "_")
    )
}

#[derive(Default)]
struct Group {
    count: u64,
    salaries: Vec<Option<f64>>,
    vacancies: Vec<Option<i64>>,
    types: BTreeMap<String, u64>,
    typed: u64,
}

pub fn aggregate(rows: &[EnrichedPosting]) -> MonthlyPostings {
    let mut groups: BTreeMap<(YearMonth, &str), Group> = BTreeMap::new();
    let mut observed: BTreeSet<&str> = BTreeSet::new();

    for (industry, row) in explode(rows) {
        let Some(month) = row.posting_month else {
            continue;
        };
        let group = groups.entry((month, industry)).or_default();
        group.count += 1;
        group.salaries.push(row.salary.average_clean);
        group.vacancies.push(row.posting.vacancies);
        if let Some(kind) = row.posting.employment_type.as_deref() {
            observed.insert(kind);
            *group.types.entry(share_column(kind)).or_insert(0) += 1;
            group.typed += 1;
        }
    }

    let mut share_columns: Vec<String> = Vec::new();
    for kind in observed {
        let column = share_column(kind);
        if !share_columns.contains(&column) {
            share_columns.push(column);
        }
    }

    let rows = groups
        .into_iter()
        .map(|((posting_month, industry), group)| {
            let employment_share = (group.typed > 0).then(|| {
                group
                    .types
                    .iter()
                    .map(|(column, n)| (column.clone(), *n as f64 / group.typed as f64))
                    .collect()
            });
            MonthlyPostingsRow {
                posting_month,
                industry: industry.to_string(),
                posting_count: group.count,
                avg_salary: stats::mean(group.salaries),
                total_vacancies: stats::sum(group.vacancies),
                employment_share,
            }
        })
        .collect();

    MonthlyPostings {
        share_columns,
        rows,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::gold::fixtures::{Spec, row};

    #[test]
    fn test_share_column_naming() {
        assert_eq!(share_column("Full Time"), "pct_full_time");
        assert_eq!(share_column("Part Time/Temp"), "pct_part_time_temp");
    }

    #[test]
    fn test_monthly_grain_and_shares() {
        let rows = vec![
            row(Spec {
                industries: &["IT", "Banking"],
                salary: Some(4000.0),
                vacancies: Some(2),
                employment: Some("Full Time"),
                ..Default::default()
            }),
            row(Spec {
                industries: &["IT"],
                salary: None,
                vacancies: Some(5),
                employment: Some("Contract"),
                ..Default::default()
            }),
            row(Spec {
                industries: &["IT"],
                month: Some((2023, 2)),
                ..Default::default()
            }),
            // No month: ignored
            row(Spec {
                industries: &["IT"],
                month: None,
                employment: Some("Temporary"),
                ..Default::default()
            }),
        ];

        let monthly = aggregate(&rows);
        assert_eq!(
            monthly.share_columns,
            vec!["pct_contract".to_string(), "pct_full_time".to_string()]
        );

        let keys: Vec<(String, &str)> = monthly
            .rows
            .iter()
            .map(|r| (r.posting_month.to_string(), r.industry.as_str()))
            .collect();
        assert_eq!(
            keys,
            vec![
                ("2023-01".to_string(), "Banking"),
                ("2023-01".to_string(), "IT"),
                ("2023-02".to_string(), "IT"),
            ]
        );

        let it_jan = &monthly.rows[1];
        assert_eq!(it_jan.posting_count, 2);
        assert_eq!(it_jan.avg_salary, Some(4000.0));
        assert_eq!(it_jan.total_vacancies, 7);
        assert_eq!(it_jan.share("pct_full_time"), Some(0.5));
        assert_eq!(it_jan.share("pct_contract"), Some(0.5));

        let banking = &monthly.rows[0];
        assert_eq!(banking.share("pct_full_time"), Some(1.0));
        assert_eq!(banking.share("pct_contract"), Some(0.0));

        let it_feb = &monthly.rows[2];
        assert_eq!(it_feb.share("pct_full_time"), None);
        assert_eq!(it_feb.avg_salary, None);
    }
}
