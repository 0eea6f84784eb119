// jobmart-core/src/infrastructure/codec/silver.rs

use datafusion::arrow::array::{
    Array, ArrayRef, BooleanArray, Date32Array, DictionaryArray, Float64Array, Int32Array,
    Int64Array, ListBuilder, StringArray, StringBuilder,
};
use datafusion::arrow::datatypes::{DataType, Date32Type, Field, Int32Type, Schema};
use datafusion::arrow::error::ArrowError;
use datafusion::arrow::record_batch::RecordBatch;
use std::sync::Arc;

use crate::domain::posting::{EnrichedPosting, SeniorityTier, SalaryFields, YearMonth, columns};
use crate::infrastructure::codec::columns::{bools, floats, ints, string_lists, strings};
use crate::infrastructure::codec::posting::decode_postings;

struct Columns {
    fields: Vec<Field>,
    arrays: Vec<ArrayRef>,
    dictionary: Vec<String>,
}

impl Columns {
    fn push(&mut self, field: Field, array: ArrayRef) {
        self.fields.push(field);
        self.arrays.push(array);
    }

    fn strings<'a>(&mut self, name: &str, values: impl Iterator<Item = Option<&'a str>>) {
        if self.dictionary.iter().any(|c| c == name) {
            let array: DictionaryArray<Int32Type> = values.collect();
            self.push(
                Field::new(name, array.data_type().clone(), true),
                Arc::new(array),
            );
        } else {
            let array: StringArray = values.collect();
            self.push(Field::new(name, DataType::Utf8, true), Arc::new(array));
        }
    }

    fn ints(&mut self, name: &str, values: impl Iterator<Item = Option<i64>>) {
        let array: Int64Array = values.collect();
        self.push(Field::new(name, DataType::Int64, true), Arc::new(array));
    }

    fn floats(&mut self, name: &str, values: impl Iterator<Item = Option<f64>>) {
        let array: Float64Array = values.collect();
        self.push(Field::new(name, DataType::Float64, true), Arc::new(array));
    }

    fn finish(self) -> Result<RecordBatch, ArrowError> {
        RecordBatch::try_new(Arc::new(Schema::new(self.fields)), self.arrays)
    }
}

/// Silver checkpoint layout: the fixed posting columns, then the enrichments.
/// Columns named in `dictionary` are written dictionary-encoded.
pub fn encode_enriched(
    rows: &[EnrichedPosting],
    dictionary: &[String],
) -> Result<RecordBatch, ArrowError> {
    let mut out = Columns {
        fields: Vec::new(),
        arrays: Vec::new(),
        dictionary: dictionary.to_vec(),
    };

    out.strings(
        columns::JOB_POST_ID,
        rows.iter().map(|r| r.posting.job_post_id.as_deref()),
    );
    out.strings(columns::TITLE, rows.iter().map(|r| r.posting.title.as_deref()));
    out.strings(
        columns::CATEGORIES,
        rows.iter().map(|r| r.posting.categories.as_deref()),
    );
    out.strings(
        columns::POSITION_LEVELS,
        rows.iter().map(|r| r.posting.position_level.as_deref()),
    );
    out.ints(columns::VACANCIES, rows.iter().map(|r| r.posting.vacancies));
    out.ints(columns::APPLICATIONS, rows.iter().map(|r| r.posting.applications));
    out.ints(columns::VIEWS, rows.iter().map(|r| r.posting.views));
    out.ints(columns::REPOST_COUNT, rows.iter().map(|r| r.posting.repost_count));
    out.ints(
        columns::MIN_YEARS_EXPERIENCE,
        rows.iter().map(|r| r.posting.min_years_experience),
    );
    // Bounded values; the untouched input lives on *_raw
    out.floats(columns::SALARY_MINIMUM, rows.iter().map(|r| r.salary.minimum));
    out.floats(columns::SALARY_MAXIMUM, rows.iter().map(|r| r.salary.maximum));
    out.strings(
        columns::EMPLOYMENT_TYPES,
        rows.iter().map(|r| r.posting.employment_type.as_deref()),
    );
    out.strings(
        columns::COMPANY_NAME,
        rows.iter().map(|r| r.posting.company_name.as_deref()),
    );
    for (name, dates) in [
        (
            columns::NEW_POSTING_DATE,
            rows.iter().map(|r| r.posting.posted_on).collect::<Vec<_>>(),
        ),
        (
            columns::ORIGINAL_POSTING_DATE,
            rows.iter().map(|r| r.posting.originally_posted_on).collect(),
        ),
        (
            columns::EXPIRY_DATE,
            rows.iter().map(|r| r.posting.expires_on).collect(),
        ),
    ] {
        let array: Date32Array = dates
            .into_iter()
            .map(|d| d.map(Date32Type::from_naive_date))
            .collect();
        out.push(Field::new(name, DataType::Date32, true), Arc::new(array));
    }

    let mut industries = ListBuilder::new(StringBuilder::new());
    for row in rows {
        for tag in &row.industry_list {
            industries.values().append_value(tag);
        }
        industries.append(true);
    }
    let industries = industries.finish();
    out.push(
        Field::new(columns::INDUSTRY_LIST, industries.data_type().clone(), true),
        Arc::new(industries),
    );
    out.strings(
        columns::PRIMARY_INDUSTRY,
        rows.iter().map(|r| Some(r.primary_industry.as_str())),
    );
    out.ints(
        columns::INDUSTRY_COUNT,
        rows.iter().map(|r| Some(r.industry_count as i64)),
    );
    out.strings(
        columns::SENIORITY_TIER,
        rows.iter().map(|r| Some(r.seniority_tier.as_str())),
    );

    out.floats(columns::SALARY_MINIMUM_RAW, rows.iter().map(|r| r.salary.minimum_raw));
    out.floats(columns::SALARY_MAXIMUM_RAW, rows.iter().map(|r| r.salary.maximum_raw));
    let outliers: BooleanArray = rows.iter().map(|r| Some(r.salary.outlier_iqr)).collect();
    out.push(
        Field::new(columns::SALARY_OUTLIER_IQR, DataType::Boolean, true),
        Arc::new(outliers),
    );
    out.floats(
        columns::SALARY_MINIMUM_CLEAN,
        rows.iter().map(|r| r.salary.minimum_clean),
    );
    out.floats(
        columns::SALARY_MAXIMUM_CLEAN,
        rows.iter().map(|r| r.salary.maximum_clean),
    );
    out.floats(
        columns::AVERAGE_SALARY_CLEAN,
        rows.iter().map(|r| r.salary.average_clean),
    );
    out.floats(
        columns::ANNUAL_SALARY_CLEAN,
        rows.iter().map(|r| r.salary.annual_clean),
    );

    let months: Vec<Option<String>> = rows
        .iter()
        .map(|r| r.posting_month.map(|m| m.to_string()))
        .collect();
    out.strings(columns::POSTING_MONTH, months.iter().map(|m| m.as_deref()));
    out.ints(
        columns::POSTING_DURATION_DAYS,
        rows.iter().map(|r| r.posting_duration_days),
    );
    let years: Int32Array = rows.iter().map(|r| r.posting_year).collect();
    out.push(
        Field::new(columns::POSTING_YEAR, DataType::Int32, true),
        Arc::new(years),
    );
    let month_nums: Int32Array = rows
        .iter()
        .map(|r| r.posting_month_num.map(|m| m as i32))
        .collect();
    out.push(
        Field::new(columns::POSTING_MONTH_NUM, DataType::Int32, true),
        Arc::new(month_nums),
    );

    out.strings(
        columns::ROLE_FAMILY,
        rows.iter().map(|r| Some(r.role_family.as_str())),
    );
    out.strings(
        columns::EXPERIENCE_BAND,
        rows.iter().map(|r| Some(r.experience_band.as_str())),
    );
    out.floats(
        columns::COMPETITION_RATIO,
        rows.iter().map(|r| r.competition_ratio),
    );
    let reposted: BooleanArray = rows.iter().map(|r| Some(r.is_reposted)).collect();
    out.push(
        Field::new(columns::IS_REPOSTED, DataType::Boolean, true),
        Arc::new(reposted),
    );

    out.finish()
}

/// Reads a Silver checkpoint back into enriched postings.
pub fn decode_enriched(batch: &RecordBatch) -> Result<Vec<EnrichedPosting>, ArrowError> {
    let postings = decode_postings(batch)?;

    let industry_lists = string_lists(batch, columns::INDUSTRY_LIST)?;
    let primary = strings(batch, columns::PRIMARY_INDUSTRY)?;
    let tiers = strings(batch, columns::SENIORITY_TIER)?;
    let min_raw = floats(batch, columns::SALARY_MINIMUM_RAW)?;
    let max_raw = floats(batch, columns::SALARY_MAXIMUM_RAW)?;
    let outliers = bools(batch, columns::SALARY_OUTLIER_IQR)?;
    let min_clean = floats(batch, columns::SALARY_MINIMUM_CLEAN)?;
    let max_clean = floats(batch, columns::SALARY_MAXIMUM_CLEAN)?;
    let avg_clean = floats(batch, columns::AVERAGE_SALARY_CLEAN)?;
    let annual_clean = floats(batch, columns::ANNUAL_SALARY_CLEAN)?;
    let months = strings(batch, columns::POSTING_MONTH)?;
    let durations = ints(batch, columns::POSTING_DURATION_DAYS)?;
    let years = ints(batch, columns::POSTING_YEAR)?;
    let month_nums = ints(batch, columns::POSTING_MONTH_NUM)?;
    let families = strings(batch, columns::ROLE_FAMILY)?;
    let bands = strings(batch, columns::EXPERIENCE_BAND)?;
    let ratios = floats(batch, columns::COMPETITION_RATIO)?;
    let reposted = bools(batch, columns::IS_REPOSTED)?;

    let rows = postings
        .into_iter()
        .enumerate()
        .map(|(i, posting)| {
            let salary = SalaryFields {
                minimum_raw: min_raw[i],
                maximum_raw: max_raw[i],
                minimum: posting.salary_minimum,
                maximum: posting.salary_maximum,
                outlier_iqr: outliers[i].unwrap_or(false),
                minimum_clean: min_clean[i],
                maximum_clean: max_clean[i],
                average_clean: avg_clean[i],
                annual_clean: annual_clean[i],
            };
            let industry_list = industry_lists[i].clone();
            let mut row = EnrichedPosting::from(posting);
            row.industry_count = industry_list.len();
            row.industry_list = industry_list;
            if let Some(p) = &primary[i] {
                row.primary_industry = p.clone();
            }
            row.seniority_tier = tiers[i]
                .as_deref()
                .and_then(|t| t.parse::<SeniorityTier>().ok())
                .unwrap_or_default();
            row.salary = salary;
            row.posting_month = months[i]
                .as_deref()
                .and_then(|m| m.parse::<YearMonth>().ok());
            row.posting_duration_days = durations[i];
            row.posting_year = years[i].map(|y| y as i32);
            row.posting_month_num = month_nums[i].map(|m| m as u32);
            if let Some(f) = &families[i] {
                row.role_family = f.clone();
            }
            if let Some(b) = &bands[i] {
                row.experience_band = b.clone();
            }
            row.competition_ratio = ratios[i];
            row.is_reposted = reposted[i].unwrap_or(false);
            row
        })
        .collect();
    Ok(rows)
}
