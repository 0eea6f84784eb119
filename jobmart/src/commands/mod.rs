// jobmart/src/commands/mod.rs

pub mod clean;
pub mod inspect;
pub mod run;
pub mod summary;

use anyhow::Context;
use jobmart_core::PipelineError;
use jobmart_core::domain::PipelineConfig;
use jobmart_core::infrastructure::config::load_pipeline_config;

use crate::cli::ProjectArgs;

pub fn load_config(project: &ProjectArgs) -> anyhow::Result<PipelineConfig> {
    let config = load_pipeline_config(&project.project_dir, project.config.as_deref())
        .with_context(|| {
            format!(
                "Failed to load pipeline configuration from {:?}",
                project.project_dir
            )
        })?;
    tracing::debug!(config = ?config, "Resolved configuration");
    Ok(config)
}

/// Prints a fatal pipeline error with its diagnostic help, then exits 1.
pub fn fail(err: PipelineError) -> ! {
    eprintln!("\n💥 CRITICAL PIPELINE ERROR: {}", err);
    let report = match err {
        PipelineError::Domain(e) => miette::Report::new(e),
        PipelineError::Infrastructure(e) => miette::Report::new(e),
        other => miette::miette!("{}", other),
    };
    eprintln!("{:?}", report);
    std::process::exit(1);
}
