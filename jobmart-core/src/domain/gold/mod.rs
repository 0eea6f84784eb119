// jobmart-core/src/domain/gold/mod.rs

//! Business aggregates computed from the Silver postings. Each table has
//! its own grain. Tables keyed on `industry` explode the industry list (one
//! contribution per tag), tables keyed on `primary_industry` do not.

pub mod companies;
pub mod competition;
pub mod experience;
pub mod industry;
pub mod monthly;
pub mod salary;

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::info;

use crate::domain::posting::EnrichedPosting;

pub use companies::TopCompanyRow;
pub use competition::CompetitionRow;
pub use experience::ExperienceDemandRow;
pub use industry::IndustryDemandRow;
pub use monthly::{MonthlyPostings, MonthlyPostingsRow};
pub use salary::SalaryByRoleRow;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GoldTable {
    MonthlyPostings,
    SalaryByRole,
    IndustryDemand,
    Competition,
    TopCompanies,
    ExperienceDemand,
}

impl GoldTable {
    pub const ALL: [GoldTable; 6] = [
        GoldTable::MonthlyPostings,
        GoldTable::SalaryByRole,
        GoldTable::IndustryDemand,
        GoldTable::Competition,
        GoldTable::TopCompanies,
        GoldTable::ExperienceDemand,
    ];

    pub fn file_stem(&self) -> &'static str {
        match self {
            GoldTable::MonthlyPostings => "agg_monthly_postings",
            GoldTable::SalaryByRole => "agg_salary_by_role",
            GoldTable::IndustryDemand => "agg_industry_demand",
            GoldTable::Competition => "agg_competition",
            GoldTable::TopCompanies => "agg_top_companies",
            GoldTable::ExperienceDemand => "agg_experience_demand",
        }
    }
}

impl fmt::Display for GoldTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.file_stem())
    }
}

impl FromStr for GoldTable {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        GoldTable::ALL
            .into_iter()
            .find(|t| t.file_stem() == s)
            .ok_or_else(|| {
                let known: Vec<&str> = GoldTable::ALL.iter().map(|t| t.file_stem()).collect();
                format!("unknown gold table '{}' (expected one of: {})", s, known.join(", "))
            })
    }
}

/// The six aggregates of one Gold run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GoldTables {
    pub monthly_postings: MonthlyPostings,
    pub salary_by_role: Vec<SalaryByRoleRow>,
    pub industry_demand: Vec<IndustryDemandRow>,
    pub competition: Vec<CompetitionRow>,
    pub top_companies: Vec<TopCompanyRow>,
    pub experience_demand: Vec<ExperienceDemandRow>,
}

impl GoldTables {
    pub fn row_count(&self, table: GoldTable) -> usize {
        match table {
            GoldTable::MonthlyPostings => self.monthly_postings.rows.len(),
            GoldTable::SalaryByRole => self.salary_by_role.len(),
            GoldTable::IndustryDemand => self.industry_demand.len(),
            GoldTable::Competition => self.competition.len(),
            GoldTable::TopCompanies => self.top_companies.len(),
            GoldTable::ExperienceDemand => self.experience_demand.len(),
        }
    }
}

pub fn aggregate(rows: &[EnrichedPosting]) -> GoldTables {
    let tables = GoldTables {
        monthly_postings: monthly::aggregate(rows),
        salary_by_role: salary::aggregate(rows),
        industry_demand: industry::aggregate(rows),
        competition: competition::aggregate(rows),
        top_companies: companies::aggregate(rows),
        experience_demand: experience::aggregate(rows),
    };
    for table in GoldTable::ALL {
        info!(table = %table, rows = tables.row_count(table), "Gold table aggregated");
    }
    tables
}

/// One `(industry, posting)` pair per industry tag. Untagged postings vanish.
pub fn explode(rows: &[EnrichedPosting]) -> impl Iterator<Item = (&str, &EnrichedPosting)> {
    rows.iter()
        .flat_map(|row| row.industry_list.iter().map(move |tag| (tag.as_str(), row)))
}

/// Fraction of `true` values, `None` over an empty group.
pub(crate) fn rate(flags: &[bool]) -> Option<f64> {
    if flags.is_empty() {
        None
    } else {
        Some(flags.iter().filter(|f| **f).count() as f64 / flags.len() as f64)
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use crate::domain::posting::{EnrichedPosting, JobPosting, SeniorityTier, YearMonth};

    pub struct Spec<'a> {
        pub industries: &'a [&'a str],
        pub month: Option<(i32, u32)>,
        pub salary: Option<f64>,
        pub vacancies: Option<i64>,
        pub applications: Option<i64>,
        pub employment: Option<&'a str>,
        pub company: Option<&'a str>,
        pub role: &'a str,
        pub tier: SeniorityTier,
    }

    impl Default for Spec<'_> {
        fn default() -> Self {
            Self {
                industries: &[],
                month: Some((2023, 1)),
                salary: None,
                vacancies: Some(1),
                applications: Some(10),
                employment: None,
                company: None,
                role: "Other",
                tier: SeniorityTier::Unknown,
            }
        }
    }

    pub fn row(spec: Spec<'_>) -> EnrichedPosting {
        let mut row = EnrichedPosting::from(JobPosting {
            vacancies: spec.vacancies,
            applications: spec.applications,
            employment_type: spec.employment.map(str::to_string),
            company_name: spec.company.map(str::to_string),
            ..Default::default()
        });
        row.industry_list = spec.industries.iter().map(|s| s.to_string()).collect();
        row.primary_industry = row
            .industry_list
            .first()
            .cloned()
            .unwrap_or_else(|| "Unknown".to_string());
        row.industry_count = row.industry_list.len();
        row.posting_month = spec.month.map(|(year, month)| YearMonth { year, month });
        row.salary.average_clean = spec.salary;
        row.competition_ratio = match (spec.applications, spec.vacancies) {
            (Some(a), Some(v)) if v != 0 => Some(a as f64 / v as f64),
            _ => None,
        };
        row.role_family = spec.role.to_string();
        row.seniority_tier = spec.tier;
        row
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::{Spec, row};
    use super::*;

    #[test]
    fn test_table_names_round_trip() {
        for table in GoldTable::ALL {
            assert_eq!(table.file_stem().parse::<GoldTable>(), Ok(table));
        }
        assert!("agg_unknown".parse::<GoldTable>().is_err());
    }

    #[test]
    fn test_explode_duplicates_per_tag() {
        let rows = vec![
            row(Spec {
                industries: &["IT", "Banking"],
                ..Default::default()
            }),
            row(Spec::default()),
        ];
        let pairs: Vec<&str> = explode(&rows).map(|(tag, _)| tag).collect();
        assert_eq!(pairs, vec!["IT", "Banking"]);
    }

    #[test]
    fn test_aggregate_builds_all_six_tables() {
        let rows = vec![row(Spec {
            industries: &["IT"],
            salary: Some(4000.0),
            company: Some("Acme"),
            employment: Some("Full Time"),
            ..Default::default()
        })];
        let tables = aggregate(&rows);
        for table in GoldTable::ALL {
            assert_eq!(tables.row_count(table), 1, "{}", table);
        }
    }
}
