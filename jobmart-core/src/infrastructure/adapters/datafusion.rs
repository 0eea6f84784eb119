// jobmart-core/src/infrastructure/adapters/datafusion.rs

use async_trait::async_trait;
use datafusion::arrow::compute::concat_batches;
use datafusion::arrow::record_batch::RecordBatch;
use datafusion::parquet::arrow::ArrowWriter;
use datafusion::parquet::basic::{Compression, ZstdLevel};
use datafusion::parquet::file::properties::WriterProperties;
use datafusion::prelude::*;
use std::io::{BufRead, BufReader};
use std::path::Path;
use std::sync::Arc;
use tracing::debug;

// Hexagonal Imports
use crate::error::PipelineError;
use crate::infrastructure::codec::columns::normalize_batch;
use crate::infrastructure::codec::raw::{header_columns, raw_schema};
use crate::infrastructure::fs::atomic_write_with;
use crate::ports::connector::Connector;

pub struct DataFusionConnector {
    ctx: Arc<SessionContext>,
}

impl DataFusionConnector {
    pub fn new() -> Self {
        Self {
            ctx: Arc::new(SessionContext::new()),
        }
    }

    fn path_str(path: &Path) -> Result<&str, PipelineError> {
        path.to_str()
            .ok_or_else(|| PipelineError::InternalError(format!("Invalid path: {:?}", path)))
    }

    fn extension(path: &Path) -> String {
        path.extension()
            .and_then(|e| e.to_str())
            .map(|e| format!(".{}", e))
            .unwrap_or_default()
    }

    async fn collect_one(df: DataFrame) -> Result<RecordBatch, PipelineError> {
        let logical = Arc::new(df.schema().as_arrow().clone());
        let batches = df.collect().await?;
        let schema = batches.first().map(|b| b.schema()).unwrap_or(logical);
        let batch = concat_batches(&schema, &batches)?;
        Ok(normalize_batch(&batch)?)
    }
}

impl Default for DataFusionConnector {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Connector for DataFusionConnector {
    async fn read_csv(&self, path: &Path) -> Result<RecordBatch, PipelineError> {
        let mut header = String::new();
        BufReader::new(std::fs::File::open(path)?).read_line(&mut header)?;
        let schema = raw_schema(&header_columns(&header, ','));
        debug!(path = %path.display(), columns = schema.fields().len(), "Reading delimited file");

        let extension = Self::extension(path);
        let options = CsvReadOptions::new()
            .has_header(true)
            .newlines_in_values(true)
            .schema(&schema)
            .file_extension(&extension);
        let df = self.ctx.read_csv(Self::path_str(path)?, options).await?;
        Self::collect_one(df).await
    }

    async fn read_parquet(&self, path: &Path) -> Result<RecordBatch, PipelineError> {
        let extension = Self::extension(path);
        let options = ParquetReadOptions::default().file_extension(&extension);
        let df = self
            .ctx
            .read_parquet(Self::path_str(path)?, options)
            .await?;
        Self::collect_one(df).await
    }

    async fn write_parquet(&self, path: &Path, batch: &RecordBatch) -> Result<u64, PipelineError> {
        let props = WriterProperties::builder()
            .set_compression(Compression::ZSTD(ZstdLevel::default()))
            .build();

        atomic_write_with(path, |file| -> Result<(), PipelineError> {
            let mut writer = ArrowWriter::try_new(file, batch.schema(), Some(props))?;
            writer.write(batch)?;
            writer.close()?;
            Ok(())
        })?;
        debug!(path = %path.display(), rows = batch.num_rows(), "Parquet written");
        Ok(batch.num_rows() as u64)
    }

    async fn count_rows(&self, path: &Path) -> Result<u64, PipelineError> {
        let extension = Self::extension(path);
        let options = ParquetReadOptions::default().file_extension(&extension);
        let df = self
            .ctx
            .read_parquet(Self::path_str(path)?, options)
            .await?;
        Ok(df.count().await? as u64)
    }

    async fn preview(&self, path: &Path, limit: usize) -> Result<Vec<RecordBatch>, PipelineError> {
        let extension = Self::extension(path);
        let options = ParquetReadOptions::default().file_extension(&extension);
        let df = self
            .ctx
            .read_parquet(Self::path_str(path)?, options)
            .await?
            .limit(0, Some(limit))?;
        let batches = df.collect().await?;
        batches
            .iter()
            .map(|b| normalize_batch(b).map_err(PipelineError::from))
            .collect()
    }

    fn engine_name(&self) -> &str {
        "datafusion"
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use anyhow::Result;
    use datafusion::arrow::array::{Array, AsArray};
    use datafusion::arrow::datatypes::{DataType, Float64Type, Int64Type};

    #[tokio::test]
    async fn test_csv_typed_by_column_name() -> Result<()> {
        let tmp = tempfile::tempdir()?;
        let path = tmp.path().join("raw.csv");
        std::fs::write(
            &path,
            "metadata_jobPostId,title,numberOfVacancies,salary_minimum\n\
             JOB001,\"Analyst, Data\",2,3000\n\
             JOB002,\"Multi\nline\",,\n",
        )?;

        let connector = DataFusionConnector::new();
        let batch = connector.read_csv(&path).await?;

        assert_eq!(batch.num_rows(), 2);
        let schema = batch.schema();
        assert_eq!(schema.field(0).data_type(), &DataType::Utf8);
        assert_eq!(schema.field(2).data_type(), &DataType::Int64);
        assert_eq!(schema.field(3).data_type(), &DataType::Float64);

        let titles = batch.column(1).as_string::<i32>();
        assert_eq!(titles.value(0), "Analyst, Data");
        assert_eq!(titles.value(1), "Multi\nline");
        let vacancies = batch.column(2).as_primitive::<Int64Type>();
        assert!(vacancies.is_null(1));
        let salaries = batch.column(3).as_primitive::<Float64Type>();
        assert_eq!(salaries.value(0), 3000.0);
        Ok(())
    }

    #[tokio::test]
    async fn test_parquet_write_count_and_preview() -> Result<()> {
        let tmp = tempfile::tempdir()?;
        let csv = tmp.path().join("raw.csv");
        std::fs::write(&csv, "metadata_jobPostId,title\nA,x\nB,y\nC,z\n")?;

        let connector = DataFusionConnector::new();
        let batch = connector.read_csv(&csv).await?;
        let out = tmp.path().join("bronze").join("layer.parquet");

        assert_eq!(connector.write_parquet(&out, &batch).await?, 3);
        assert_eq!(connector.count_rows(&out).await?, 3);

        let back = connector.read_parquet(&out).await?;
        assert_eq!(back.num_rows(), 3);
        assert_eq!(back.schema().field(1).data_type(), &DataType::Utf8);

        let preview = connector.preview(&out, 2).await?;
        let rows: usize = preview.iter().map(|b| b.num_rows()).sum();
        assert_eq!(rows, 2);
        Ok(())
    }

    #[tokio::test]
    async fn test_missing_file_is_an_error() -> Result<()> {
        let tmp = tempfile::tempdir()?;
        let connector = DataFusionConnector::new();
        assert!(connector.read_csv(&tmp.path().join("nope.csv")).await.is_err());
        assert_eq!(connector.engine_name(), "datafusion");
        Ok(())
    }
}
