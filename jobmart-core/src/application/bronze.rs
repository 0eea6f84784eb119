// jobmart-core/src/application/bronze.rs

use tracing::{info, instrument};

use crate::domain::bronze::{self, BronzeReport};
use crate::domain::configuration::PipelineConfig;
use crate::error::PipelineError;
use crate::infrastructure::error::InfrastructureError;
use crate::ports::connector::Connector;

/// Raw extract -> Bronze checkpoint.
#[instrument(skip_all, fields(raw = %config.paths.raw.display()))]
pub async fn run_bronze(
    connector: &dyn Connector,
    config: &PipelineConfig,
) -> Result<BronzeReport, PipelineError> {
    let raw_path = &config.paths.raw;
    if !raw_path.exists() {
        return Err(InfrastructureError::SourceMissing {
            path: raw_path.display().to_string(),
        }
        .into());
    }

    let raw = connector.read_csv(raw_path).await?;
    info!(rows = raw.num_rows(), columns = raw.num_columns(), "Raw extract loaded");

    let (batch, report) = bronze::clean(&raw, config)?;
    connector.write_parquet(&config.paths.bronze, &batch).await?;

    info!(
        rows = report.rows_written,
        removed = report.rows_loaded - report.rows_written,
        path = %config.paths.bronze.display(),
        "Bronze checkpoint written"
    );
    Ok(report)
}
