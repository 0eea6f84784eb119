// jobmart-core/src/domain/bronze.rs

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use datafusion::arrow::array::{Array, ArrayRef, AsArray, BooleanArray, Date32Array};
use datafusion::arrow::compute::{cast, filter_record_batch};
use datafusion::arrow::datatypes::{DataType, Date32Type, Field, Float64Type, Schema};
use datafusion::arrow::record_batch::RecordBatch;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::domain::configuration::{PipelineConfig, SyntheticRowPolicy};
use crate::domain::error::DomainError;
use crate::domain::posting::columns;
use crate::domain::quality::{DataQualityWarning, SyntheticCheck};

/// Outcome of the structural cleaning pass.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BronzeReport {
    pub rows_loaded: u64,
    pub synthetic: SyntheticCheck,
    pub synthetic_removed: u64,
    pub null_title_removed: u64,
    pub dropped_columns: Vec<String>,
    pub date_columns: Vec<String>,
    pub rows_written: u64,
    pub warnings: Vec<DataQualityWarning>,
}

/// Structural cleaning of the raw extract, in order: synthetic rows,
/// null-title rows, useless columns, date normalization.
pub fn clean(
    raw: &RecordBatch,
    config: &PipelineConfig,
) -> Result<(RecordBatch, BronzeReport), DomainError> {
    require_columns(raw)?;

    let mut report = BronzeReport {
        rows_loaded: raw.num_rows() as u64,
        ..Default::default()
    };

    let (batch, check) = drop_synthetic_rows(raw, &config.synthetic)?;
    report.synthetic_removed = check.flagged_rows;
    info!(
        flagged = check.flagged_rows,
        anomalous = check.anomalous_rows,
        max_salary = ?check.max_salary,
        "Synthetic rows dropped"
    );
    if let Err(warning) = check.validate(config.synthetic.sanity_max_salary) {
        if config.strict {
            return Err(DomainError::StrictDataQuality(warning));
        }
        warn!("{}", warning);
        report.warnings.push(warning);
    }
    report.synthetic = check;

    let (batch, removed) = drop_null_titles(&batch)?;
    report.null_title_removed = removed;
    debug!(removed, "Null-title rows dropped");

    let (batch, dropped) = drop_columns(&batch, &config.useless_columns)?;
    report.dropped_columns = dropped;

    let (batch, parsed) = normalize_dates(&batch, &config.date_columns)?;
    report.date_columns = parsed;

    report.rows_written = batch.num_rows() as u64;
    Ok((batch, report))
}

pub fn require_columns(batch: &RecordBatch) -> Result<(), DomainError> {
    let schema = batch.schema();
    let missing: Vec<&str> = columns::REQUIRED_COLUMNS
        .iter()
        .copied()
        .filter(|name| schema.column_with_name(name).is_none())
        .collect();
    if missing.is_empty() {
        Ok(())
    } else {
        Err(DomainError::SchemaError(format!(
            "missing required column(s): {}",
            missing.join(", ")
        )))
    }
}

/// Removes rows whose identifier starts with the synthetic prefix, and
/// reports what the removed rows looked like. Null identifiers are kept.
pub fn drop_synthetic_rows(
    batch: &RecordBatch,
    policy: &SyntheticRowPolicy,
) -> Result<(RecordBatch, SyntheticCheck), DomainError> {
    let ids = utf8_column(batch, columns::JOB_POST_ID)?;
    let ids = ids.as_string::<i32>();

    let flagged: Vec<bool> = ids
        .iter()
        .map(|id| id.is_some_and(|v| v.starts_with(policy.id_prefix.as_str())))
        .collect();

    let salary_min = float_column(batch, columns::SALARY_MINIMUM)?;
    let salary_max = float_column(batch, columns::SALARY_MAXIMUM)?;
    let salary_at = |column: &Option<ArrayRef>, row: usize| -> Option<f64> {
        let values = column.as_ref()?.as_primitive::<Float64Type>();
        values.is_valid(row).then(|| values.value(row))
    };

    let mut check = SyntheticCheck::default();
    for (row, _) in flagged.iter().enumerate().filter(|(_, f)| **f) {
        check.flagged_rows += 1;
        let salaries = [salary_at(&salary_min, row), salary_at(&salary_max, row)];
        for s in salaries.iter().flatten() {
            check.max_salary = Some(check.max_salary.map_or(*s, |m| m.max(*s)));
        }
        if salaries
            .iter()
            .flatten()
            .any(|s| *s > policy.anomalous_salary)
        {
            check.anomalous_rows += 1;
        }
    }

    let keep: BooleanArray = flagged.iter().map(|f| Some(!f)).collect();
    Ok((filter_record_batch(batch, &keep)?, check))
}

/// Removes rows with a null title and nothing else.
pub fn drop_null_titles(batch: &RecordBatch) -> Result<(RecordBatch, u64), DomainError> {
    let titles = batch
        .column_by_name(columns::TITLE)
        .ok_or_else(|| DomainError::SchemaError(format!("missing column '{}'", columns::TITLE)))?;
    let keep: BooleanArray = (0..titles.len()).map(|i| Some(titles.is_valid(i))).collect();
    let removed = titles.null_count() as u64;
    Ok((filter_record_batch(batch, &keep)?, removed))
}

/// Projects away the named columns that are present. Returns the ones dropped.
pub fn drop_columns(
    batch: &RecordBatch,
    names: &[String],
) -> Result<(RecordBatch, Vec<String>), DomainError> {
    let schema = batch.schema();
    let mut keep = Vec::with_capacity(schema.fields().len());
    let mut dropped = Vec::new();
    for (idx, field) in schema.fields().iter().enumerate() {
        if names.iter().any(|n| n == field.name()) {
            dropped.push(field.name().clone());
        } else {
            keep.push(idx);
        }
    }
    Ok((batch.project(&keep)?, dropped))
}

/// Converts the named columns to `Date32`. Unparseable strings become null.
pub fn normalize_dates(
    batch: &RecordBatch,
    names: &[String],
) -> Result<(RecordBatch, Vec<String>), DomainError> {
    let schema = batch.schema();
    let mut fields: Vec<Field> = Vec::with_capacity(schema.fields().len());
    let mut arrays: Vec<ArrayRef> = Vec::with_capacity(schema.fields().len());
    let mut parsed = Vec::new();

    for (field, array) in schema.fields().iter().zip(batch.columns()) {
        if !names.iter().any(|n| n == field.name()) {
            fields.push(field.as_ref().clone());
            arrays.push(Arc::clone(array));
            continue;
        }

        let dates: ArrayRef = match array.data_type() {
            DataType::Date32 => Arc::clone(array),
            DataType::Utf8 | DataType::LargeUtf8 | DataType::Utf8View => {
                let text = cast(array, &DataType::Utf8)?;
                let parsed_values: Date32Array = text
                    .as_string::<i32>()
                    .iter()
                    .map(|v| {
                        v.and_then(parse_flexible_date)
                            .map(Date32Type::from_naive_date)
                    })
                    .collect();
                Arc::new(parsed_values)
            }
            _ => cast(array, &DataType::Date32)?,
        };
        fields.push(Field::new(field.name(), DataType::Date32, true));
        arrays.push(dates);
        parsed.push(field.name().clone());
    }

    let batch = RecordBatch::try_new(Arc::new(Schema::new(fields)), arrays)?;
    Ok((batch, parsed))
}

/// Accepts ISO dates, ISO date-times (space or `T`, optional fraction),
/// RFC 3339 and `DD/MM/YYYY`.
pub fn parse_flexible_date(value: &str) -> Option<NaiveDate> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }
    if let Ok(d) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        return Some(d);
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.date_naive());
    }
    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(value, format) {
            return Some(dt.date());
        }
    }
    NaiveDate::parse_from_str(value, "%d/%m/%Y").ok()
}

fn utf8_column(batch: &RecordBatch, name: &str) -> Result<ArrayRef, DomainError> {
    let column = batch
        .column_by_name(name)
        .ok_or_else(|| DomainError::SchemaError(format!("missing column '{}'", name)))?;
    Ok(cast(column, &DataType::Utf8)?)
}

fn float_column(batch: &RecordBatch, name: &str) -> Result<Option<ArrayRef>, DomainError> {
    batch
        .column_by_name(name)
        .map(|c| cast(c, &DataType::Float64))
        .transpose()
        .map_err(DomainError::from)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use datafusion::arrow::array::{Float64Array, StringArray};

    fn raw_batch() -> RecordBatch {
        let schema = Arc::new(Schema::new(vec![
            Field::new(columns::JOB_POST_ID, DataType::Utf8, true),
            Field::new(columns::TITLE, DataType::Utf8, true),
            Field::new(columns::SALARY_MINIMUM, DataType::Float64, true),
            Field::new(columns::SALARY_MAXIMUM, DataType::Float64, true),
            Field::new("occupationId", DataType::Utf8, true),
            Field::new(columns::NEW_POSTING_DATE, DataType::Utf8, true),
        ]));
        RecordBatch::try_new(
            schema,
            vec![
                Arc::new(StringArray::from(vec![
                    Some("JOB001"),
                    Some("RANDOM_JOB_999"),
                    Some("JOB002"),
                    None,
                    Some("JOB004"),
                ])),
                Arc::new(StringArray::from(vec![
                    Some("Data Analyst"),
                    Some("Test Job"),
                    None,
                    Some("Clerk"),
                    Some("Sales Manager"),
                ])),
                Arc::new(Float64Array::from(vec![
                    Some(3000.0),
                    Some(250_000.0),
                    Some(4000.0),
                    None,
                    Some(2500.0),
                ])),
                Arc::new(Float64Array::from(vec![
                    Some(5000.0),
                    Some(300_000.0),
                    Some(6000.0),
                    None,
                    Some(4500.0),
                ])),
                Arc::new(StringArray::from(vec![Some("x"); 5])),
                Arc::new(StringArray::from(vec![
                    Some("2023-01-15"),
                    Some("2023-01-16"),
                    Some("not a date"),
                    None,
                    Some("20/02/2023"),
                ])),
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_synthetic_filter_removes_exactly_prefixed_rows() -> anyhow::Result<()> {
        let batch = raw_batch();
        let (kept, check) = drop_synthetic_rows(&batch, &SyntheticRowPolicy::default())?;

        assert_eq!(kept.num_rows(), 4);
        assert_eq!(check.flagged_rows, 1);
        assert_eq!(check.max_salary, Some(300_000.0));
        assert_eq!(check.anomalous_rows, 1);

        let ids = kept.column(0).as_string::<i32>();
        assert!(ids.iter().flatten().all(|id| !id.starts_with("RANDOM_JOB_")));
        // Null identifier survives
        assert_eq!(ids.null_count(), 1);
        Ok(())
    }

    #[test]
    fn test_null_title_filter_removes_only_null_titles() -> anyhow::Result<()> {
        let (kept, removed) = drop_null_titles(&raw_batch())?;
        assert_eq!(removed, 1);
        assert_eq!(kept.num_rows(), 4);
        assert_eq!(kept.column(1).null_count(), 0);
        Ok(())
    }

    #[test]
    fn test_drop_columns_ignores_absent_names() -> anyhow::Result<()> {
        let names = vec!["occupationId".to_string(), "status_id".to_string()];
        let (batch, dropped) = drop_columns(&raw_batch(), &names)?;
        assert_eq!(dropped, vec!["occupationId".to_string()]);
        assert!(batch.schema().column_with_name("occupationId").is_none());
        assert_eq!(batch.num_columns(), 5);
        Ok(())
    }

    #[test]
    fn test_dates_parsed_and_garbage_nulled() -> anyhow::Result<()> {
        let names = vec![
            columns::NEW_POSTING_DATE.to_string(),
            columns::EXPIRY_DATE.to_string(),
        ];
        let (batch, parsed) = normalize_dates(&raw_batch(), &names)?;
        assert_eq!(parsed, vec![columns::NEW_POSTING_DATE.to_string()]);

        let dates = batch
            .column_by_name(columns::NEW_POSTING_DATE)
            .unwrap()
            .as_primitive::<Date32Type>();
        assert_eq!(
            dates.value_as_date(0),
            NaiveDate::from_ymd_opt(2023, 1, 15)
        );
        assert!(dates.is_null(2));
        assert!(dates.is_null(3));
        assert_eq!(
            dates.value_as_date(4),
            NaiveDate::from_ymd_opt(2023, 2, 20)
        );
        Ok(())
    }

    #[test]
    fn test_parse_flexible_date_formats() {
        let expected = NaiveDate::from_ymd_opt(2023, 3, 9);
        assert_eq!(parse_flexible_date("2023-03-09"), expected);
        assert_eq!(parse_flexible_date("2023-03-09 10:11:12"), expected);
        assert_eq!(parse_flexible_date("2023-03-09T10:11:12.123"), expected);
        assert_eq!(parse_flexible_date("2023-03-09T10:11:12+08:00"), expected);
        assert_eq!(parse_flexible_date("09/03/2023"), expected);
        assert_eq!(parse_flexible_date(""), None);
        assert_eq!(parse_flexible_date("yesterday"), None);
    }

    #[test]
    fn test_clean_runs_every_step() -> anyhow::Result<()> {
        let (batch, report) = clean(&raw_batch(), &PipelineConfig::default())?;
        assert_eq!(report.rows_loaded, 5);
        assert_eq!(report.synthetic_removed, 1);
        assert_eq!(report.null_title_removed, 1);
        assert_eq!(report.rows_written, 3);
        assert_eq!(batch.num_rows(), 3);
        assert!(report.warnings.is_empty());
        assert_eq!(report.dropped_columns, vec!["occupationId".to_string()]);
        Ok(())
    }

    #[test]
    fn test_strict_mode_escalates_normal_looking_synthetic_rows() {
        let mut config = PipelineConfig::default();
        config.synthetic.id_prefix = "JOB00".to_string();

        let (_, report) = clean(&raw_batch(), &config).unwrap();
        assert_eq!(report.warnings.len(), 1);

        config.strict = true;
        let res = clean(&raw_batch(), &config);
        assert!(matches!(res, Err(DomainError::StrictDataQuality(_))));
    }

    #[test]
    fn test_missing_title_column_is_schema_error() {
        let batch = raw_batch().project(&[0, 2]).unwrap();
        let res = clean(&batch, &PipelineConfig::default());
        assert!(matches!(res, Err(DomainError::SchemaError(_))));
    }
}
