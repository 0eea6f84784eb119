// jobmart-core/src/infrastructure/config/pipeline.rs

use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, instrument};
use validator::Validate;

use crate::domain::configuration::{LayerPaths, PipelineConfig};
use crate::infrastructure::error::InfrastructureError;

pub const CONFIG_CANDIDATES: [&str; 2] = ["jobmart.yaml", "jobmart.yml"];

// --- LOADER ---

/// Loads, overrides, validates and anchors the pipeline configuration.
///
/// Discovery: `explicit` when given (must exist), else the first of
/// [`CONFIG_CANDIDATES`] in `project_dir`, else the built-in defaults.
#[instrument(skip(project_dir, explicit))]
pub fn load_pipeline_config(
    project_dir: &Path,
    explicit: Option<&Path>,
) -> Result<PipelineConfig, InfrastructureError> {
    // 1. Découverte du fichier
    let mut config = match find_config(project_dir, explicit)? {
        Some(path) => {
            info!(path = ?path, "Loading pipeline configuration");
            parse_config(&fs::read_to_string(&path)?)?
        }
        None => {
            info!("No configuration file found, using built-in defaults");
            PipelineConfig::default()
        }
    };

    // 2. Override via variables d'environnement (pattern 'Layering')
    // JOBMART_DATA_DIR=/mnt/jobs jobmart run
    apply_env_overrides(&mut config, |key| std::env::var(key).ok());

    // 3. Validation (fail fast)
    validate(&config)?;

    config.paths = config.paths.resolve(project_dir);
    config.data_root = config.data_root.map(|dir| {
        if dir.is_absolute() {
            dir
        } else {
            project_dir.join(dir)
        }
    });
    Ok(config)
}

fn find_config(
    project_dir: &Path,
    explicit: Option<&Path>,
) -> Result<Option<PathBuf>, InfrastructureError> {
    if let Some(path) = explicit {
        let path = if path.is_absolute() {
            path.to_path_buf()
        } else {
            project_dir.join(path)
        };
        if !path.exists() {
            return Err(InfrastructureError::ConfigNotFound(
                path.display().to_string(),
            ));
        }
        return Ok(Some(path));
    }
    Ok(CONFIG_CANDIDATES
        .iter()
        .map(|name| project_dir.join(name))
        .find(|p| p.exists()))
}

pub fn parse_config(content: &str) -> Result<PipelineConfig, InfrastructureError> {
    if content.trim().is_empty() {
        return Ok(PipelineConfig::default());
    }
    Ok(serde_yaml::from_str(content)?)
}

pub fn validate(config: &PipelineConfig) -> Result<(), InfrastructureError> {
    config
        .validate()
        .map_err(|e| InfrastructureError::ConfigError(e.to_string()))
}

/// `JOBMART_DATA_DIR` re-roots the layer paths left at their defaults,
/// `JOBMART_RAW_PATH` points at another extract, `JOBMART_STRICT` toggles
/// strict mode.
pub fn apply_env_overrides<F>(config: &mut PipelineConfig, lookup: F)
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(dir) = lookup("JOBMART_DATA_DIR") {
        let defaults = LayerPaths::default();
        let rooted = LayerPaths::under(Path::new(&dir));
        let paths = &mut config.paths;
        info!(data_dir = %dir, "Re-rooting layer paths via ENV");
        if paths.raw == defaults.raw {
            paths.raw = rooted.raw;
        }
        if paths.bronze == defaults.bronze {
            paths.bronze = rooted.bronze;
        }
        if paths.silver == defaults.silver {
            paths.silver = rooted.silver;
        }
        if paths.gold_dir == defaults.gold_dir {
            paths.gold_dir = rooted.gold_dir;
        }
        if paths.run_results == defaults.run_results {
            paths.run_results = rooted.run_results;
        }
        config.data_root = Some(PathBuf::from(dir));
    }
    if let Some(raw) = lookup("JOBMART_RAW_PATH") {
        info!(old = ?config.paths.raw, new = %raw, "Overriding raw path via ENV");
        config.paths.raw = PathBuf::from(raw);
    }
    if let Some(flag) = lookup("JOBMART_STRICT") {
        config.strict = matches!(
            flag.trim().to_ascii_lowercase().as_str(),
            "1" | "true" | "yes" | "on"
        );
        info!(strict = config.strict, "Overriding strict mode via ENV");
    }
}
