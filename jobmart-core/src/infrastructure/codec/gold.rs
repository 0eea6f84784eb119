// jobmart-core/src/infrastructure/codec/gold.rs

use datafusion::arrow::array::{ArrayRef, Float64Array, Int64Array, StringArray};
use datafusion::arrow::datatypes::{DataType, Field, Schema};
use datafusion::arrow::error::ArrowError;
use datafusion::arrow::record_batch::RecordBatch;
use std::sync::Arc;

use crate::domain::gold::{GoldTable, GoldTables};

/// Column-at-a-time builder for the flat Gold schemas.
#[derive(Default)]
struct TableBuilder {
    fields: Vec<Field>,
    arrays: Vec<ArrayRef>,
}

impl TableBuilder {
    fn text<'a>(mut self, name: &str, values: impl Iterator<Item = &'a str>) -> Self {
        let array: StringArray = values.map(Some).collect();
        self.fields.push(Field::new(name, DataType::Utf8, false));
        self.arrays.push(Arc::new(array));
        self
    }

    fn int(mut self, name: &str, values: impl Iterator<Item = i64>) -> Self {
        let array: Int64Array = values.map(Some).collect();
        self.fields.push(Field::new(name, DataType::Int64, false));
        self.arrays.push(Arc::new(array));
        self
    }

    fn float(mut self, name: &str, values: impl Iterator<Item = Option<f64>>) -> Self {
        let array: Float64Array = values.collect();
        self.fields.push(Field::new(name, DataType::Float64, true));
        self.arrays.push(Arc::new(array));
        self
    }

    fn build(self) -> Result<RecordBatch, ArrowError> {
        RecordBatch::try_new(Arc::new(Schema::new(self.fields)), self.arrays)
    }
}

pub fn encode_table(tables: &GoldTables, table: GoldTable) -> Result<RecordBatch, ArrowError> {
    match table {
        GoldTable::MonthlyPostings => {
            let monthly = &tables.monthly_postings;
            let rows = &monthly.rows;
            let months: Vec<String> = rows.iter().map(|r| r.posting_month.to_string()).collect();
            let mut builder = TableBuilder::default()
                .text("posting_month", months.iter().map(String::as_str))
                .text("industry", rows.iter().map(|r| r.industry.as_str()))
                .int("posting_count", rows.iter().map(|r| r.posting_count as i64))
                .float("avg_salary", rows.iter().map(|r| r.avg_salary))
                .int("total_vacancies", rows.iter().map(|r| r.total_vacancies));
            for column in &monthly.share_columns {
                builder = builder.float(column, rows.iter().map(|r| r.share(column)));
            }
            builder.build()
        }
        GoldTable::SalaryByRole => {
            let rows = &tables.salary_by_role;
            TableBuilder::default()
                .text("role_family", rows.iter().map(|r| r.role_family.as_str()))
                .text("seniority_tier", rows.iter().map(|r| r.seniority_tier.as_str()))
                .text("industry", rows.iter().map(|r| r.industry.as_str()))
                .int("n", rows.iter().map(|r| r.n as i64))
                .float("salary_mean", rows.iter().map(|r| r.salary_mean))
                .float("salary_p25", rows.iter().map(|r| r.salary_p25))
                .float("salary_median", rows.iter().map(|r| r.salary_median))
                .float("salary_p75", rows.iter().map(|r| r.salary_p75))
                .build()
        }
        GoldTable::IndustryDemand => {
            let rows = &tables.industry_demand;
            TableBuilder::default()
                .text("industry", rows.iter().map(|r| r.industry.as_str()))
                .int("posting_count", rows.iter().map(|r| r.posting_count as i64))
                .int("total_vacancies", rows.iter().map(|r| r.total_vacancies))
                .float("avg_applications", rows.iter().map(|r| r.avg_applications))
                .float("avg_views", rows.iter().map(|r| r.avg_views))
                .float("avg_salary", rows.iter().map(|r| r.avg_salary))
                .float("repost_rate", rows.iter().map(|r| r.repost_rate))
                .build()
        }
        GoldTable::Competition => {
            let rows = &tables.competition;
            TableBuilder::default()
                .text("industry", rows.iter().map(|r| r.industry.as_str()))
                .text("role_family", rows.iter().map(|r| r.role_family.as_str()))
                .int("posting_count", rows.iter().map(|r| r.posting_count as i64))
                .float("avg_applications", rows.iter().map(|r| r.avg_applications))
                .float(
                    "competition_ratio_median",
                    rows.iter().map(|r| r.competition_ratio_median),
                )
                .float(
                    "competition_ratio_p25",
                    rows.iter().map(|r| r.competition_ratio_p25),
                )
                .float(
                    "competition_ratio_p75",
                    rows.iter().map(|r| r.competition_ratio_p75),
                )
                .build()
        }
        GoldTable::TopCompanies => {
            let rows = &tables.top_companies;
            TableBuilder::default()
                .text("company", rows.iter().map(|r| r.company.as_str()))
                .text(
                    "primary_industry",
                    rows.iter().map(|r| r.primary_industry.as_str()),
                )
                .int("posting_count", rows.iter().map(|r| r.posting_count as i64))
                .float("avg_salary", rows.iter().map(|r| r.avg_salary))
                .float("repost_rate", rows.iter().map(|r| r.repost_rate))
                .float(
                    "avg_vacancies_per_post",
                    rows.iter().map(|r| r.avg_vacancies_per_post),
                )
                .build()
        }
        GoldTable::ExperienceDemand => {
            let rows = &tables.experience_demand;
            TableBuilder::default()
                .text("industry", rows.iter().map(|r| r.industry.as_str()))
                .text(
                    "experience_band",
                    rows.iter().map(|r| r.experience_band.as_str()),
                )
                .text(
                    "seniority_tier",
                    rows.iter().map(|r| r.seniority_tier.as_str()),
                )
                .int("posting_count", rows.iter().map(|r| r.posting_count as i64))
                .float("avg_salary", rows.iter().map(|r| r.avg_salary))
                .build()
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::domain::gold::{MonthlyPostings, MonthlyPostingsRow};
    use crate::domain::posting::YearMonth;
    use datafusion::arrow::array::{Array, AsArray};
    use datafusion::arrow::datatypes::Float64Type;
    use std::collections::BTreeMap;

    #[test]
    fn test_monthly_share_columns_follow_the_fixed_ones() -> anyhow::Result<()> {
        let shares: BTreeMap<String, f64> = [("pct_full_time".to_string(), 1.0)].into_iter().collect();
        let tables = GoldTables {
            monthly_postings: MonthlyPostings {
                share_columns: vec!["pct_contract".to_string(), "pct_full_time".to_string()],
                rows: vec![
                    MonthlyPostingsRow {
                        posting_month: YearMonth {
                            year: 2023,
                            month: 1,
                        },
                        industry: "IT".to_string(),
                        posting_count: 1,
                        avg_salary: None,
                        total_vacancies: 2,
                        employment_share: Some(shares),
                    },
                    MonthlyPostingsRow {
                        posting_month: YearMonth {
                            year: 2023,
                            month: 2,
                        },
                        industry: "IT".to_string(),
                        posting_count: 1,
                        avg_salary: Some(4000.0),
                        total_vacancies: 0,
                        employment_share: None,
                    },
                ],
            },
            ..Default::default()
        };

        let batch = encode_table(&tables, GoldTable::MonthlyPostings)?;
        let names: Vec<String> = batch
            .schema()
            .fields()
            .iter()
            .map(|f| f.name().clone())
            .collect();
        assert_eq!(
            names,
            vec![
                "posting_month",
                "industry",
                "posting_count",
                "avg_salary",
                "total_vacancies",
                "pct_contract",
                "pct_full_time"
            ]
        );

        let contract = batch.column(5).as_primitive::<Float64Type>();
        assert_eq!(contract.value(0), 0.0);
        assert!(contract.is_null(1));
        Ok(())
    }

    #[test]
    fn test_empty_tables_encode_with_schema() -> anyhow::Result<()> {
        let tables = GoldTables::default();
        for table in GoldTable::ALL {
            let batch = encode_table(&tables, table)?;
            assert_eq!(batch.num_rows(), 0);
            assert!(batch.num_columns() >= 5, "{}", table);
        }
        Ok(())
    }
}
