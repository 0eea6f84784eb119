// jobmart-core/src/application/pipeline.rs

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::str::FromStr;
use std::time::Instant;
use tracing::{info, instrument, warn};

use crate::application::bronze::run_bronze;
use crate::application::gold::{GoldReport, run_gold};
use crate::application::silver::run_silver;
use crate::application::summary::pipeline_summary;
use crate::domain::bronze::BronzeReport;
use crate::domain::configuration::PipelineConfig;
use crate::domain::error::DomainError;
use crate::domain::quality::PipelineSummary;
use crate::domain::silver::SilverReport;
use crate::error::PipelineError;
use crate::infrastructure::error::InfrastructureError;
use crate::infrastructure::fs::atomic_write;
use crate::ports::connector::Connector;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    Bronze,
    Silver,
    Gold,
    #[default]
    All,
}

impl Stage {
    fn runs(self, step: Stage) -> bool {
        self == Stage::All || self == step
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Stage::Bronze => "bronze",
            Stage::Silver => "silver",
            Stage::Gold => "gold",
            Stage::All => "all",
        })
    }
}

impl FromStr for Stage {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "bronze" => Ok(Stage::Bronze),
            "silver" => Ok(Stage::Silver),
            "gold" => Ok(Stage::Gold),
            "all" => Ok(Stage::All),
            other => Err(format!(
                "unknown stage '{}' (expected bronze, silver, gold or all)",
                other
            )),
        }
    }
}

/// Machine-readable outcome of one run, persisted as `run_results.json`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunResult {
    pub success: bool,
    pub stage: Stage,
    pub strict: bool,
    pub started_at: String,
    pub duration_secs: f64,
    pub bronze: Option<BronzeReport>,
    pub silver: Option<SilverReport>,
    pub gold: Option<GoldReport>,
    pub summary: PipelineSummary,
    pub warnings: Vec<String>,
    pub errors: Vec<String>,
}

/// Runs the selected stage (or all of them in order), then the summary.
///
/// Fatal stage errors abort immediately. In strict mode a summary carrying
/// warnings fails the run with [`DomainError::QualityGateFailed`], after the
/// run result has been written.
#[instrument(skip_all, fields(stage = %stage, strict = config.strict))]
pub async fn run_pipeline(
    connector: &dyn Connector,
    config: &PipelineConfig,
    stage: Stage,
) -> Result<RunResult, PipelineError> {
    let start = Instant::now();
    let started_at = chrono::Utc::now().to_rfc3339();
    info!(engine = connector.engine_name(), "Starting pipeline");

    let mut warnings = Vec::new();
    let mut errors = Vec::new();

    // 1. BRONZE
    let bronze = if stage.runs(Stage::Bronze) {
        let report = run_bronze(connector, config).await?;
        warnings.extend(report.warnings.iter().map(ToString::to_string));
        Some(report)
    } else {
        None
    };

    // 2. SILVER
    let silver = if stage.runs(Stage::Silver) {
        Some(run_silver(connector, config).await?)
    } else {
        None
    };

    // 3. GOLD
    let gold = if stage.runs(Stage::Gold) {
        let report = run_gold(connector, config).await?;
        errors.extend(
            report
                .failures
                .iter()
                .map(|(table, e)| format!("{}: {}", table, e)),
        );
        Some(report)
    } else {
        None
    };

    // 4. SUMMARY (post-flight)
    let summary = pipeline_summary(connector, config).await?;
    warnings.extend(summary.warnings.iter().map(ToString::to_string));

    let gate_failed = config.strict && !summary.is_clean();
    let result = RunResult {
        success: errors.is_empty() && !gate_failed,
        stage,
        strict: config.strict,
        started_at,
        duration_secs: start.elapsed().as_secs_f64(),
        bronze,
        silver,
        gold,
        summary,
        warnings,
        errors,
    };
    save_json(&config.paths.run_results, &result)?;

    if gate_failed {
        let messages = result
            .summary
            .warnings
            .iter()
            .map(ToString::to_string)
            .collect();
        return Err(DomainError::QualityGateFailed(messages).into());
    }
    if !result.success {
        warn!(failures = result.errors.len(), "Pipeline finished with errors");
    }
    Ok(result)
}

fn save_json<T: Serialize>(path: &Path, data: &T) -> Result<(), PipelineError> {
    let content = serde_json::to_string_pretty(data).map_err(InfrastructureError::JsonError)?;
    atomic_write(path, content)?;
    Ok(())
}
