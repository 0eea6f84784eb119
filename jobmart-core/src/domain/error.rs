// jobmart-core/src/domain/error.rs

use datafusion::arrow::error::ArrowError;
use miette::Diagnostic;
use thiserror::Error;

use crate::domain::quality::DataQualityWarning;

#[derive(Error, Debug, Diagnostic)]
pub enum DomainError {
    #[error("Schema Error: {0}")]
    #[diagnostic(
        code(jobmart::domain::schema),
        help("The input file does not carry the columns the stage needs.")
    )]
    SchemaError(String),

    #[error("Compute Error: {0}")]
    #[diagnostic(code(jobmart::domain::compute))]
    Compute(#[from] ArrowError),

    #[error("Data quality check failed (strict mode): {0}")]
    #[diagnostic(
        code(jobmart::domain::data_quality),
        help("Review the flagged rows, or run without --strict to log this as a warning.")
    )]
    StrictDataQuality(DataQualityWarning),

    #[error("Quality gate failed (strict mode): {} warning(s): {}", .0.len(), .0.join("; "))]
    #[diagnostic(code(jobmart::domain::quality_gate))]
    QualityGateFailed(Vec<String>),
}
