// jobmart-core/src/infrastructure/error.rs

use miette::Diagnostic;
use thiserror::Error;

#[derive(Error, Debug, Diagnostic)]
pub enum DatabaseError {
    #[error("DataFusion Engine Error: {0}")]
    #[diagnostic(
        code(jobmart::infra::database::datafusion),
        help("An error occurred inside the query engine while reading or scanning a file.")
    )]
    DataFusion(Box<datafusion::error::DataFusionError>),

    #[error("Arrow Error: {0}")]
    #[diagnostic(
        code(jobmart::infra::database::arrow),
        help("A column did not have the expected type or length.")
    )]
    Arrow(#[from] datafusion::arrow::error::ArrowError),

    #[error("Parquet Error: {0}")]
    #[diagnostic(code(jobmart::infra::database::parquet))]
    Parquet(#[from] datafusion::parquet::errors::ParquetError),
}

#[derive(Error, Debug, Diagnostic)]
pub enum InfrastructureError {
    // --- DATABASE (Abstracted) ---
    #[error(transparent)]
    #[diagnostic(transparent)]
    Database(#[from] DatabaseError),

    // --- FILESYSTEM (IO) ---
    #[error("File System Error: {0}")]
    #[diagnostic(
        code(jobmart::infra::io),
        help("Check file permissions or path validity.")
    )]
    Io(#[from] std::io::Error),

    // --- CONFIG / YAML ---
    #[error("YAML Parsing Error: {0}")]
    #[diagnostic(
        code(jobmart::infra::yaml),
        help("Check your YAML syntax (indentation, types).")
    )]
    YamlError(#[from] serde_yaml::Error),

    #[error("JSON Serialization Error: {0}")]
    #[diagnostic(code(jobmart::infra::json))]
    JsonError(#[from] serde_json::Error),

    #[error("Configuration Error: {0}")]
    #[diagnostic(code(jobmart::infra::config_invalid))]
    ConfigError(String),

    #[error("Pipeline configuration not found at '{0}'")]
    #[diagnostic(code(jobmart::infra::config_missing))]
    ConfigNotFound(String),

    // --- LAYERS ---
    #[error("Raw data not found at: {path}. Place the raw extract there before running the pipeline")]
    #[diagnostic(
        code(jobmart::infra::source_missing),
        help("Place the raw extract at this path (or set JOBMART_RAW_PATH) and run again.")
    )]
    SourceMissing { path: String },

    #[error("{layer} data not found at: {path}. Run the pipeline first (jobmart run --stage {remedy})")]
    #[diagnostic(
        code(jobmart::infra::checkpoint_missing),
        help("Run the upstream stages first, e.g. `jobmart run --stage all`.")
    )]
    CheckpointMissing {
        layer: String,
        path: String,
        remedy: String,
    },
}
