// jobmart-core/src/ports/connector.rs

// Ce fichier définit ce dont l'application a besoin, sans savoir comment c'est fait.
// The pipeline reads and writes layers as Arrow batches; where the bytes come
// from (DataFusion today) stays behind this trait.

use async_trait::async_trait;
use datafusion::arrow::record_batch::RecordBatch;
use std::path::Path;

use crate::error::PipelineError;

#[async_trait]
pub trait Connector: Send + Sync {
    /// Reads a delimited file with a header line. Every column gets an
    /// explicit type derived from its name.
    async fn read_csv(&self, path: &Path) -> Result<RecordBatch, PipelineError>;

    /// Reads a whole Parquet checkpoint as one batch.
    async fn read_parquet(&self, path: &Path) -> Result<RecordBatch, PipelineError>;

    /// Atomically replaces `path` with the batch (ZSTD Parquet). Returns rows written.
    async fn write_parquet(&self, path: &Path, batch: &RecordBatch) -> Result<u64, PipelineError>;

    async fn count_rows(&self, path: &Path) -> Result<u64, PipelineError>;

    /// First `limit` rows of a checkpoint.
    async fn preview(&self, path: &Path, limit: usize) -> Result<Vec<RecordBatch>, PipelineError>;

    fn engine_name(&self) -> &str;
}
