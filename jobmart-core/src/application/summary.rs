// jobmart-core/src/application/summary.rs

use std::collections::BTreeMap;
use std::path::Path;
use tracing::{info, instrument, warn};
use walkdir::WalkDir;

use crate::domain::configuration::PipelineConfig;
use crate::domain::quality::{DataQualityWarning, PipelineSummary};
use crate::error::PipelineError;
use crate::ports::connector::Connector;

/// Row counts of every layer on disk, with the threshold warnings.
/// Advisory: reads only, never fails. A missing layer counts zero; an
/// unreadable one counts zero too and is reported as a warning (unreadable
/// Gold files are left out of the Gold map).
#[instrument(skip_all)]
pub async fn pipeline_summary(
    connector: &dyn Connector,
    config: &PipelineConfig,
) -> Result<PipelineSummary, PipelineError> {
    let mut unreadable = Vec::new();

    let bronze = count_if_present(connector, &config.paths.bronze, &mut unreadable)
        .await
        .unwrap_or(0);
    let silver = count_if_present(connector, &config.paths.silver, &mut unreadable)
        .await
        .unwrap_or(0);

    let mut gold = BTreeMap::new();
    for path in gold_files(&config.paths.gold_dir) {
        let Some(stem) = path.file_stem().and_then(|s| s.to_str()) else {
            continue;
        };
        if let Some(rows) = count_if_present(connector, &path, &mut unreadable).await {
            gold.insert(stem.to_string(), rows);
        }
    }

    let mut summary = PipelineSummary::evaluate(bronze, silver, gold, &config.quality);
    summary.warnings.extend(unreadable);
    info!(
        bronze = summary.bronze,
        silver = summary.silver,
        gold_tables = summary.gold.len(),
        loss = ?summary.bronze_to_silver_loss,
        "Pipeline summary"
    );
    for warning in &summary.warnings {
        warn!("{}", warning);
    }
    Ok(summary)
}

/// `None` when the file exists but cannot be read; the failure is pushed
/// onto `unreadable`.
async fn count_if_present(
    connector: &dyn Connector,
    path: &Path,
    unreadable: &mut Vec<DataQualityWarning>,
) -> Option<u64> {
    if !path.exists() {
        return Some(0);
    }
    match connector.count_rows(path).await {
        Ok(rows) => Some(rows),
        Err(e) => {
            unreadable.push(DataQualityWarning::UnreadableLayer {
                path: path.display().to_string(),
                error: e.to_string(),
            });
            None
        }
    }
}

/// `.parquet` files directly under the Gold directory, sorted by name.
fn gold_files(dir: &Path) -> Vec<std::path::PathBuf> {
    if !dir.is_dir() {
        return Vec::new();
    }
    WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .map(|e| e.into_path())
        .filter(|p| p.extension().and_then(|x| x.to_str()) == Some("parquet"))
        .collect()
}
