// jobmart-core/src/infrastructure/codec/raw.rs

use datafusion::arrow::datatypes::{DataType, Field, Schema};

use crate::domain::posting::columns;

/// Explicit Arrow type of a raw column: counters are `Int64`, salaries
/// `Float64`, everything else `Utf8`.
pub fn raw_type(column: &str) -> DataType {
    if columns::INTEGER_COLUMNS.contains(&column) {
        DataType::Int64
    } else if columns::FLOAT_COLUMNS.contains(&column) {
        DataType::Float64
    } else {
        DataType::Utf8
    }
}

/// Column names of a delimited header line. Surrounding quotes and a BOM
/// are stripped.
pub fn header_columns(line: &str, delimiter: char) -> Vec<String> {
    line.trim_start_matches('\u{feff}')
        .trim_end_matches(['\r', '\n'])
        .split(delimiter)
        .map(|name| name.trim().trim_matches('"').to_string())
        .collect()
}

pub fn raw_schema(header: &[String]) -> Schema {
    Schema::new(
        header
            .iter()
            .map(|name| Field::new(name, raw_type(name), true))
            .collect::<Vec<_>>(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_and_types() {
        let header = header_columns(
            "\u{feff}metadata_jobPostId,\"title\",numberOfVacancies,salary_minimum,status_id\r\n",
            ',',
        );
        assert_eq!(
            header,
            vec![
                "metadata_jobPostId",
                "title",
                "numberOfVacancies",
                "salary_minimum",
                "status_id"
            ]
        );

        let schema = raw_schema(&header);
        assert_eq!(schema.field(0).data_type(), &DataType::Utf8);
        assert_eq!(schema.field(2).data_type(), &DataType::Int64);
        assert_eq!(schema.field(3).data_type(), &DataType::Float64);
        assert!(schema.fields().iter().all(|f| f.is_nullable()));
    }
}
