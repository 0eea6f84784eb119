// jobmart-core/src/domain/quality.rs

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use thiserror::Error;

use crate::domain::configuration::QualityThresholds;

/// Non-fatal findings collected on stage reports and on the summary.
/// Strict mode turns them into `DomainError`s.
#[derive(Debug, Error, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DataQualityWarning {
    #[error(
        "Synthetic rows look like real postings: {flagged} flagged, max salary {max_salary:.0} (expected >= {threshold:.0})"
    )]
    SyntheticRowsLookNormal {
        flagged: u64,
        max_salary: f64,
        threshold: f64,
    },

    #[error("Bronze has only {rows} rows (expected >= {minimum})")]
    BronzeBelowMinimum { rows: u64, minimum: u64 },

    #[error(
        "Lost {:.1}% of rows from Bronze to Silver (threshold: {:.1}%). Bronze: {bronze}, Silver: {silver}",
        .loss * 100.0,
        .threshold * 100.0
    )]
    RetentionLossExceeded {
        loss: f64,
        threshold: f64,
        bronze: u64,
        silver: u64,
    },

    #[error("Gold table '{table}' is empty")]
    EmptyGoldTable { table: String },

    #[error("Could not count rows of '{path}': {error}")]
    UnreadableLayer { path: String, error: String },
}

/// What the synthetic-row filter saw before dropping the flagged rows.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SyntheticCheck {
    pub flagged_rows: u64,
    /// Largest of salary minimum/maximum across the flagged rows.
    pub max_salary: Option<f64>,
    /// Flagged rows with a salary above the anomalous threshold.
    pub anomalous_rows: u64,
}

impl SyntheticCheck {
    /// Synthetic rows are expected to carry absurd salaries. A flagged set
    /// whose maximum stays below `sanity_max` probably caught real postings.
    pub fn validate(&self, sanity_max: f64) -> Result<(), DataQualityWarning> {
        match self.max_salary {
            Some(max) if self.flagged_rows > 0 && max < sanity_max => {
                Err(DataQualityWarning::SyntheticRowsLookNormal {
                    flagged: self.flagged_rows,
                    max_salary: max,
                    threshold: sanity_max,
                })
            }
            _ => Ok(()),
        }
    }
}

pub struct RowCountCheck;

impl RowCountCheck {
    /// An empty layer is not checked (nothing ran yet).
    pub fn validate(rows: u64, minimum: u64) -> Result<(), DataQualityWarning> {
        if rows > 0 && rows < minimum {
            return Err(DataQualityWarning::BronzeBelowMinimum { rows, minimum });
        }
        Ok(())
    }
}

pub struct RetentionCheck;

impl RetentionCheck {
    /// Fraction of Bronze rows missing from Silver, when both layers hold rows.
    pub fn loss(bronze: u64, silver: u64) -> Option<f64> {
        if bronze == 0 || silver == 0 {
            return None;
        }
        Some(1.0 - silver as f64 / bronze as f64)
    }

    pub fn validate(bronze: u64, silver: u64, threshold: f64) -> Result<(), DataQualityWarning> {
        match Self::loss(bronze, silver) {
            Some(loss) if loss > threshold => Err(DataQualityWarning::RetentionLossExceeded {
                loss,
                threshold,
                bronze,
                silver,
            }),
            _ => Ok(()),
        }
    }
}

/// Row counts per layer with the warnings they raise.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PipelineSummary {
    pub bronze: u64,
    pub silver: u64,
    /// Gold file stem -> row count.
    pub gold: BTreeMap<String, u64>,
    pub bronze_to_silver_loss: Option<f64>,
    pub warnings: Vec<DataQualityWarning>,
}

impl PipelineSummary {
    /// Advisory only: never fails, whatever the counts.
    pub fn evaluate(
        bronze: u64,
        silver: u64,
        gold: BTreeMap<String, u64>,
        thresholds: &QualityThresholds,
    ) -> Self {
        let mut warnings = Vec::new();

        if let Err(w) = RowCountCheck::validate(bronze, thresholds.min_expected_rows) {
            warnings.push(w);
        }
        if let Err(w) =
            RetentionCheck::validate(bronze, silver, thresholds.max_bronze_to_silver_loss)
        {
            warnings.push(w);
        }
        for (table, rows) in &gold {
            if *rows == 0 {
                warnings.push(DataQualityWarning::EmptyGoldTable {
                    table: table.clone(),
                });
            }
        }

        Self {
            bronze,
            silver,
            bronze_to_silver_loss: RetentionCheck::loss(bronze, silver),
            gold,
            warnings,
        }
    }

    pub fn is_clean(&self) -> bool {
        self.warnings.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn thresholds() -> QualityThresholds {
        QualityThresholds {
            min_expected_rows: 1_000,
            max_bronze_to_silver_loss: 0.10,
        }
    }

    #[test]
    fn test_synthetic_rows_with_absurd_salaries_pass() {
        let check = SyntheticCheck {
            flagged_rows: 1,
            max_salary: Some(300_000.0),
            anomalous_rows: 1,
        };
        assert!(check.validate(20_000.0).is_ok());
    }

    #[test]
    fn test_synthetic_rows_with_normal_salaries_warn() {
        let check = SyntheticCheck {
            flagged_rows: 2,
            max_salary: Some(4_500.0),
            anomalous_rows: 0,
        };
        let res = check.validate(20_000.0);
        assert!(matches!(
            res,
            Err(DataQualityWarning::SyntheticRowsLookNormal { flagged: 2, .. })
        ));
    }

    #[test]
    fn test_no_flagged_rows_no_warning() {
        assert!(SyntheticCheck::default().validate(20_000.0).is_ok());
    }

    #[test]
    fn test_retention_loss() {
        let loss = RetentionCheck::loss(100, 95).unwrap_or_default();
        assert!((loss - 0.05).abs() < 1e-9);
        assert_eq!(RetentionCheck::loss(0, 95), None);
        assert_eq!(RetentionCheck::loss(100, 0), None);
        assert!(RetentionCheck::validate(100, 95, 0.10).is_ok());
        assert!(matches!(
            RetentionCheck::validate(100, 80, 0.10),
            Err(DataQualityWarning::RetentionLossExceeded { .. })
        ));
    }

    #[test]
    fn test_summary_collects_every_warning() {
        let gold: BTreeMap<String, u64> = [
            ("agg_competition".to_string(), 0),
            ("agg_industry_demand".to_string(), 4),
        ]
        .into_iter()
        .collect();

        let summary = PipelineSummary::evaluate(500, 400, gold, &thresholds());

        assert_eq!(summary.bronze, 500);
        assert_eq!(summary.silver, 400);
        assert_eq!(summary.gold.len(), 2);
        assert_eq!(summary.warnings.len(), 3);
        assert!(summary.warnings.contains(&DataQualityWarning::EmptyGoldTable {
            table: "agg_competition".to_string()
        }));
        assert!(!summary.is_clean());
    }

    #[test]
    fn test_empty_layers_are_not_judged() {
        let summary = PipelineSummary::evaluate(0, 0, BTreeMap::new(), &thresholds());
        assert!(summary.is_clean());
        assert_eq!(summary.bronze_to_silver_loss, None);
    }

    #[test]
    fn test_warning_serializes_with_kind_tag() -> anyhow::Result<()> {
        let json = serde_json::to_value(DataQualityWarning::BronzeBelowMinimum {
            rows: 3,
            minimum: 10,
        })?;
        assert_eq!(json["kind"], "bronze_below_minimum");
        assert_eq!(json["rows"], 3);
        Ok(())
    }
}
