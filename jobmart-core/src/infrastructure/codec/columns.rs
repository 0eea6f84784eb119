// jobmart-core/src/infrastructure/codec/columns.rs

//! Typed column access over Arrow batches. Readers tolerate absent columns
//! (all nulls) and the physical variants DataFusion may hand back
//! (view strings, dictionaries, large offsets).

use chrono::NaiveDate;
use datafusion::arrow::array::{Array, ArrayRef, AsArray};
use datafusion::arrow::compute::cast;
use datafusion::arrow::datatypes::{
    DataType, Date32Type, Field, FieldRef, Float64Type, Int64Type, Schema,
};
use datafusion::arrow::error::ArrowError;
use datafusion::arrow::record_batch::RecordBatch;
use std::sync::Arc;

pub fn utf8_list_type() -> DataType {
    DataType::List(Arc::new(Field::new_list_field(DataType::Utf8, true)))
}

/// Logical type a physical column is read back as.
fn logical_type(data_type: &DataType) -> Option<DataType> {
    match data_type {
        DataType::Utf8View | DataType::LargeUtf8 => Some(DataType::Utf8),
        DataType::Dictionary(_, value) if is_string(value) => Some(DataType::Utf8),
        DataType::List(item) | DataType::LargeList(item)
            if is_string(item.data_type()) && data_type != &utf8_list_type() =>
        {
            Some(utf8_list_type())
        }
        _ => None,
    }
}

fn is_string(data_type: &DataType) -> bool {
    matches!(
        data_type,
        DataType::Utf8 | DataType::LargeUtf8 | DataType::Utf8View
    )
}

/// Decodes dictionaries and view types so every string column is plain `Utf8`
/// and every string list is `List<Utf8>`. Values are unchanged.
pub fn normalize_batch(batch: &RecordBatch) -> Result<RecordBatch, ArrowError> {
    let schema = batch.schema();
    if schema
        .fields()
        .iter()
        .all(|f| logical_type(f.data_type()).is_none())
    {
        return Ok(batch.clone());
    }

    let mut fields: Vec<FieldRef> = Vec::with_capacity(schema.fields().len());
    let mut arrays: Vec<ArrayRef> = Vec::with_capacity(schema.fields().len());
    for (field, array) in schema.fields().iter().zip(batch.columns()) {
        match logical_type(field.data_type()) {
            Some(target) => {
                arrays.push(cast(array, &target)?);
                fields.push(Arc::new(
                    Field::new(field.name(), target, field.is_nullable())
                        .with_metadata(field.metadata().clone()),
                ));
            }
            None => {
                arrays.push(Arc::clone(array));
                fields.push(Arc::clone(field));
            }
        }
    }
    RecordBatch::try_new(
        Arc::new(Schema::new_with_metadata(fields, schema.metadata().clone())),
        arrays,
    )
}

fn column_as(
    batch: &RecordBatch,
    name: &str,
    data_type: &DataType,
) -> Result<Option<ArrayRef>, ArrowError> {
    batch
        .column_by_name(name)
        .map(|c| cast(c, data_type))
        .transpose()
}

pub fn strings(batch: &RecordBatch, name: &str) -> Result<Vec<Option<String>>, ArrowError> {
    Ok(match column_as(batch, name, &DataType::Utf8)? {
        Some(array) => array
            .as_string::<i32>()
            .iter()
            .map(|v| v.map(str::to_string))
            .collect(),
        None => vec![None; batch.num_rows()],
    })
}

pub fn ints(batch: &RecordBatch, name: &str) -> Result<Vec<Option<i64>>, ArrowError> {
    Ok(match column_as(batch, name, &DataType::Int64)? {
        Some(array) => array.as_primitive::<Int64Type>().iter().collect(),
        None => vec![None; batch.num_rows()],
    })
}

pub fn floats(batch: &RecordBatch, name: &str) -> Result<Vec<Option<f64>>, ArrowError> {
    Ok(match column_as(batch, name, &DataType::Float64)? {
        Some(array) => array.as_primitive::<Float64Type>().iter().collect(),
        None => vec![None; batch.num_rows()],
    })
}

pub fn bools(batch: &RecordBatch, name: &str) -> Result<Vec<Option<bool>>, ArrowError> {
    Ok(match column_as(batch, name, &DataType::Boolean)? {
        Some(array) => array.as_boolean().iter().collect(),
        None => vec![None; batch.num_rows()],
    })
}

pub fn dates(batch: &RecordBatch, name: &str) -> Result<Vec<Option<NaiveDate>>, ArrowError> {
    Ok(match column_as(batch, name, &DataType::Date32)? {
        Some(array) => array
            .as_primitive::<Date32Type>()
            .iter()
            .map(|v| v.map(Date32Type::to_naive_date))
            .collect(),
        None => vec![None; batch.num_rows()],
    })
}

/// Null lists read back as empty lists.
pub fn string_lists(batch: &RecordBatch, name: &str) -> Result<Vec<Vec<String>>, ArrowError> {
    let Some(array) = column_as(batch, name, &utf8_list_type())? else {
        return Ok(vec![Vec::new(); batch.num_rows()]);
    };
    Ok(array
        .as_list::<i32>()
        .iter()
        .map(|item| match item {
            Some(values) => values
                .as_string::<i32>()
                .iter()
                .map(|v| v.unwrap_or_default().to_string())
                .collect(),
            None => Vec::new(),
        })
        .collect())
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use datafusion::arrow::array::{DictionaryArray, Int64Array, StringViewArray};
    use datafusion::arrow::datatypes::Int32Type;

    #[test]
    fn test_normalize_decodes_dictionary_and_views() -> anyhow::Result<()> {
        let dict: DictionaryArray<Int32Type> =
            vec![Some("Mid"), Some("Mid"), None].into_iter().collect();
        let view = StringViewArray::from(vec![Some("a"), None, Some("c")]);
        let schema = Arc::new(Schema::new(vec![
            Field::new("tier", dict.data_type().clone(), true),
            Field::new("title", DataType::Utf8View, true),
        ]));
        let batch = RecordBatch::try_new(schema, vec![Arc::new(dict), Arc::new(view)])?;

        let normalized = normalize_batch(&batch)?;
        assert_eq!(normalized.schema().field(0).data_type(), &DataType::Utf8);
        assert_eq!(normalized.schema().field(1).data_type(), &DataType::Utf8);
        assert_eq!(
            strings(&normalized, "tier")?,
            vec![Some("Mid".to_string()), Some("Mid".to_string()), None]
        );
        Ok(())
    }

    #[test]
    fn test_absent_columns_read_as_nulls() -> anyhow::Result<()> {
        let schema = Arc::new(Schema::new(vec![Field::new("n", DataType::Int64, true)]));
        let batch = RecordBatch::try_new(schema, vec![Arc::new(Int64Array::from(vec![1, 2]))])?;

        assert_eq!(ints(&batch, "n")?, vec![Some(1), Some(2)]);
        assert_eq!(floats(&batch, "n")?, vec![Some(1.0), Some(2.0)]);
        assert_eq!(strings(&batch, "missing")?, vec![None, None]);
        assert_eq!(string_lists(&batch, "missing")?, vec![Vec::<String>::new(); 2]);
        Ok(())
    }
}
