// jobmart-core/src/error.rs

use crate::domain::error::DomainError;
use crate::infrastructure::error::{DatabaseError, InfrastructureError};
use datafusion::arrow::error::ArrowError;
use datafusion::error::DataFusionError;
use datafusion::parquet::errors::ParquetError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PipelineError {
    // --- ERREURS DU DOMAINE (Schéma, Qualité) ---
    #[error(transparent)]
    Domain(#[from] DomainError),

    // --- ERREURS D'INFRASTRUCTURE (IO, Parsing, Engine) ---
    #[error(transparent)]
    Infrastructure(#[from] InfrastructureError),

    // --- ERREURS GÉNÉRIQUES / APPLICATIVES ---
    #[error("Internal Error: {0}")]
    InternalError(String),

    #[error("Unsafe path traversal detected: {0}")]
    UnsafePath(String),
}

// Manual implementations so `?` works on engine calls without the
// map_err(Infrastructure(Database(..))) ladder at every call site.
impl From<std::io::Error> for PipelineError {
    fn from(err: std::io::Error) -> Self {
        PipelineError::Infrastructure(InfrastructureError::Io(err))
    }
}

impl From<DataFusionError> for PipelineError {
    fn from(err: DataFusionError) -> Self {
        PipelineError::Infrastructure(InfrastructureError::Database(DatabaseError::DataFusion(
            Box::new(err),
        )))
    }
}

impl From<ArrowError> for PipelineError {
    fn from(err: ArrowError) -> Self {
        PipelineError::Infrastructure(InfrastructureError::Database(DatabaseError::Arrow(err)))
    }
}

impl From<ParquetError> for PipelineError {
    fn from(err: ParquetError) -> Self {
        PipelineError::Infrastructure(InfrastructureError::Database(DatabaseError::Parquet(err)))
    }
}
