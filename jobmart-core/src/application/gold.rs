// jobmart-core/src/application/gold.rs

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use tracing::{error, info, instrument};

use crate::application::checkpoint;
use crate::domain::configuration::PipelineConfig;
use crate::domain::gold::{self, GoldTable, GoldTables};
use crate::error::PipelineError;
use crate::infrastructure::codec::encode_table;
use crate::ports::connector::Connector;

/// Rows written per Gold table, and the tables that could not be written.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GoldReport {
    pub tables: BTreeMap<String, u64>,
    pub failures: BTreeMap<String, String>,
}

impl GoldReport {
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Silver checkpoint -> the six Gold tables.
///
/// Tables are persisted one by one; a failed write is recorded and the
/// remaining tables are still attempted.
#[instrument(skip_all)]
pub async fn run_gold(
    connector: &dyn Connector,
    config: &PipelineConfig,
) -> Result<GoldReport, PipelineError> {
    let rows = checkpoint::load_silver_postings(connector, &config.paths).await?;
    let tables = gold::aggregate(&rows);

    let mut report = GoldReport::default();
    for table in GoldTable::ALL {
        let path = config.paths.gold_table(table.file_stem());
        match write_table(connector, &tables, table, &path).await {
            Ok(written) => {
                info!(table = %table, rows = written, "Gold table written");
                report.tables.insert(table.to_string(), written);
            }
            Err(e) => {
                error!(table = %table, error = %e, "Gold table write failed");
                report.failures.insert(table.to_string(), e.to_string());
            }
        }
    }
    Ok(report)
}

async fn write_table(
    connector: &dyn Connector,
    tables: &GoldTables,
    table: GoldTable,
    path: &Path,
) -> Result<u64, PipelineError> {
    let batch = encode_table(tables, table)?;
    connector.write_parquet(path, &batch).await
}
