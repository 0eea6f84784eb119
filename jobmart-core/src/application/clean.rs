// jobmart-core/src/application/clean.rs

use std::fs;
use std::path::{Component, Path, PathBuf};
use tracing::{info, warn};

use crate::domain::configuration::PipelineConfig;
use crate::error::PipelineError;

/// Removes the derived layers (Bronze, Silver, Gold, run results).
/// The raw extract is never touched. Returns the paths actually removed.
///
/// Targets must live under `project_dir` or under the configured data root
/// (`JOBMART_DATA_DIR`).
pub fn clean_layers(
    project_dir: &Path,
    config: &PipelineConfig,
) -> Result<Vec<PathBuf>, PipelineError> {
    info!("🧹 Initializing layer cleanup...");

    let paths = &config.paths;
    let targets = [
        &paths.bronze,
        &paths.silver,
        &paths.gold_dir,
        &paths.run_results,
    ];

    let mut roots = vec![project_dir];
    if let Some(root) = config.data_root.as_deref() {
        roots.push(root);
    }

    // Zero-Trust Path Traversal Guard: every target is checked before anything is deleted
    let mut resolved = Vec::with_capacity(targets.len());
    for target in targets {
        let full_path = if target.is_absolute() {
            target.clone()
        } else {
            project_dir.join(target)
        };
        let escapes = full_path
            .components()
            .any(|c| matches!(c, Component::ParentDir));
        let contained = roots.iter().any(|root| full_path.starts_with(root));
        if escapes || !contained {
            return Err(PipelineError::UnsafePath(target.display().to_string()));
        }
        resolved.push(full_path);
    }

    let mut removed = Vec::new();
    for full_path in resolved {
        if paths.raw.starts_with(&full_path) {
            warn!(path = %full_path.display(), "Skipping target that holds the raw extract");
            continue;
        }

        if full_path.exists() {
            if full_path.is_dir() {
                fs::remove_dir_all(&full_path)?;
            } else {
                fs::remove_file(&full_path)?;
            }
            info!(path = %full_path.display(), "Layer removed");
            removed.push(full_path);
        }
    }

    Ok(removed)
}
