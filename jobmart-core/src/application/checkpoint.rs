// jobmart-core/src/application/checkpoint.rs
//
// Readers for the durable layer files. Standalone stages and consumers
// (CLI inspect, dashboard) go through here so a missing file always
// surfaces as the same actionable error.

use datafusion::arrow::record_batch::RecordBatch;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use tracing::debug;

use crate::domain::configuration::LayerPaths;
use crate::domain::gold::GoldTable;
use crate::domain::posting::EnrichedPosting;
use crate::error::PipelineError;
use crate::infrastructure::codec::decode_enriched;
use crate::infrastructure::error::InfrastructureError;
use crate::ports::connector::Connector;

/// A readable checkpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layer {
    Bronze,
    Silver,
    Gold(GoldTable),
}

impl Layer {
    pub fn path(&self, paths: &LayerPaths) -> PathBuf {
        match self {
            Layer::Bronze => paths.bronze.clone(),
            Layer::Silver => paths.silver.clone(),
            Layer::Gold(table) => paths.gold_table(table.file_stem()),
        }
    }

    /// Stage that produces this checkpoint.
    fn remedy(&self) -> &'static str {
        match self {
            Layer::Bronze => "bronze",
            Layer::Silver => "silver",
            Layer::Gold(_) => "gold",
        }
    }

    fn label(&self) -> String {
        match self {
            Layer::Bronze => "Bronze".to_string(),
            Layer::Silver => "Silver".to_string(),
            Layer::Gold(table) => format!("Gold table {}", table),
        }
    }

    /// Path of the checkpoint, or `CheckpointMissing` when it was never written.
    pub fn require(&self, paths: &LayerPaths) -> Result<PathBuf, PipelineError> {
        let path = self.path(paths);
        if path.exists() {
            return Ok(path);
        }
        Err(InfrastructureError::CheckpointMissing {
            layer: self.label(),
            path: path.display().to_string(),
            remedy: self.remedy().to_string(),
        }
        .into())
    }
}

impl fmt::Display for Layer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Layer::Bronze => f.write_str("bronze"),
            Layer::Silver => f.write_str("silver"),
            Layer::Gold(table) => write!(f, "{}", table),
        }
    }
}

impl FromStr for Layer {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "bronze" => Ok(Layer::Bronze),
            "silver" => Ok(Layer::Silver),
            other => other
                .parse::<GoldTable>()
                .map(Layer::Gold)
                .map_err(|e| format!("{} (or bronze, silver)", e)),
        }
    }
}

pub async fn load(
    connector: &dyn Connector,
    paths: &LayerPaths,
    layer: Layer,
) -> Result<RecordBatch, PipelineError> {
    let path = layer.require(paths)?;
    debug!(layer = %layer, path = %path.display(), "Loading checkpoint");
    connector.read_parquet(&path).await
}

/// First `limit` rows of a checkpoint, with its total row count.
pub async fn preview(
    connector: &dyn Connector,
    paths: &LayerPaths,
    layer: Layer,
    limit: usize,
) -> Result<(Vec<RecordBatch>, u64), PipelineError> {
    let path = layer.require(paths)?;
    let total = connector.count_rows(&path).await?;
    Ok((connector.preview(&path, limit).await?, total))
}

pub async fn load_bronze(
    connector: &dyn Connector,
    paths: &LayerPaths,
) -> Result<RecordBatch, PipelineError> {
    load(connector, paths, Layer::Bronze).await
}

pub async fn load_silver(
    connector: &dyn Connector,
    paths: &LayerPaths,
) -> Result<RecordBatch, PipelineError> {
    load(connector, paths, Layer::Silver).await
}

/// Silver checkpoint decoded back into typed rows.
pub async fn load_silver_postings(
    connector: &dyn Connector,
    paths: &LayerPaths,
) -> Result<Vec<EnrichedPosting>, PipelineError> {
    let batch = load_silver(connector, paths).await?;
    Ok(decode_enriched(&batch)?)
}

pub async fn load_gold(
    connector: &dyn Connector,
    paths: &LayerPaths,
    table: GoldTable,
) -> Result<RecordBatch, PipelineError> {
    load(connector, paths, Layer::Gold(table)).await
}
