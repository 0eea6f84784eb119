// jobmart-core/src/application/silver.rs

use tracing::{info, instrument};

use crate::application::checkpoint;
use crate::domain::configuration::PipelineConfig;
use crate::domain::silver::{self, SilverReport};
use crate::error::PipelineError;
use crate::infrastructure::codec::{decode_postings, encode_enriched};
use crate::ports::connector::Connector;

/// Bronze checkpoint -> Silver checkpoint.
#[instrument(skip_all)]
pub async fn run_silver(
    connector: &dyn Connector,
    config: &PipelineConfig,
) -> Result<SilverReport, PipelineError> {
    let bronze = checkpoint::load_bronze(connector, &config.paths).await?;
    let postings = decode_postings(&bronze)?;

    let (rows, report) = silver::enrich(postings, config);

    let batch = encode_enriched(&rows, &report.dictionary_columns)?;
    connector.write_parquet(&config.paths.silver, &batch).await?;

    info!(
        rows = report.rows,
        columns = batch.num_columns(),
        path = %config.paths.silver.display(),
        "Silver checkpoint written"
    );
    Ok(report)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::application::{bronze::run_bronze, fixtures};
    use crate::domain::posting::SeniorityTier;
    use crate::infrastructure::adapters::DataFusionConnector;
    use crate::infrastructure::error::InfrastructureError;
    use anyhow::Result;

    #[tokio::test]
    async fn test_silver_enriches_bronze_rows() -> Result<()> {
        let tmp = tempfile::tempdir()?;
        let config = fixtures::project(tmp.path())?;
        let connector = DataFusionConnector::new();
        run_bronze(&connector, &config).await?;

        let report = run_silver(&connector, &config).await?;
        assert_eq!(report.rows, 3);
        assert_eq!(report.distinct_industries, 2);

        let mut rows = checkpoint::load_silver_postings(&connector, &config.paths).await?;
        rows.sort_by(|a, b| a.posting.job_post_id.cmp(&b.posting.job_post_id));
        let ids: Vec<_> = rows
            .iter()
            .map(|r| r.posting.job_post_id.as_deref().unwrap_or_default())
            .collect();
        assert_eq!(ids, vec!["JOB001", "JOB002", "JOB003"]);

        let families: Vec<_> = rows.iter().map(|r| r.role_family.as_str()).collect();
        assert_eq!(families, vec!["Analyst", "Engineer", "Sales"]);

        let tiers: Vec<_> = rows.iter().map(|r| r.seniority_tier).collect();
        assert_eq!(
            tiers,
            vec![SeniorityTier::Mid, SeniorityTier::Senior, SeniorityTier::Management]
        );

        assert_eq!(rows[0].primary_industry, "Information Technology");
        assert_eq!(rows[2].industry_list, vec!["Sales / Marketing"]);
        // Zero vacancies leave the ratio undefined
        assert_eq!(rows[0].competition_ratio, Some(25.0));
        assert_eq!(rows[1].competition_ratio, None);
        assert!(rows[1].is_reposted);
        Ok(())
    }

    #[tokio::test]
    async fn test_silver_without_bronze_is_fatal() -> Result<()> {
        let tmp = tempfile::tempdir()?;
        let config = fixtures::project(tmp.path())?;

        let err = run_silver(&DataFusionConnector::new(), &config)
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            PipelineError::Infrastructure(InfrastructureError::CheckpointMissing { .. })
        ));
        Ok(())
    }
}
