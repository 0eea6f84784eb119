// jobmart-core/src/domain/configuration.rs

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use validator::{Validate, ValidationError};

use crate::domain::posting::SeniorityTier;

/// Every knob of a pipeline run. Each section falls back to the built-in
/// defaults, so a YAML file only needs to carry what it overrides.
#[derive(Debug, Deserialize, Serialize, Clone, Validate)]
#[serde(default)]
#[validate(schema(function = "validate_pipeline_config"))]
pub struct PipelineConfig {
    pub name: String,

    /// Escalate data-quality warnings to fatal errors.
    pub strict: bool,

    pub paths: LayerPaths,

    /// External data directory set through `JOBMART_DATA_DIR`, if any.
    #[serde(skip)]
    pub data_root: Option<PathBuf>,

    #[validate(nested)]
    pub synthetic: SyntheticRowPolicy,

    #[serde(rename = "useless-columns", alias = "useless_columns")]
    pub useless_columns: Vec<String>,

    #[serde(rename = "date-columns", alias = "date_columns")]
    pub date_columns: Vec<String>,

    #[validate(nested)]
    pub salary: SalaryPolicy,

    #[serde(rename = "seniority-map", alias = "seniority_map")]
    pub seniority_map: BTreeMap<String, SeniorityTier>,

    #[validate(nested)]
    pub experience: ExperiencePolicy,

    /// Evaluated top to bottom: specific families before generic ones.
    #[serde(rename = "role-keywords", alias = "role_keywords")]
    #[validate(length(min = 1, message = "role-keywords cannot be empty"))]
    pub role_keywords: Vec<RoleRule>,

    #[validate(nested)]
    pub layout: LayoutPolicy,

    #[validate(nested)]
    pub quality: QualityThresholds,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(default)]
pub struct LayerPaths {
    pub raw: PathBuf,
    pub bronze: PathBuf,
    pub silver: PathBuf,
    #[serde(rename = "gold-dir", alias = "gold_dir")]
    pub gold_dir: PathBuf,
    #[serde(rename = "run-results", alias = "run_results")]
    pub run_results: PathBuf,
}

impl LayerPaths {
    /// Standard layout below a data directory.
    pub fn under(data_dir: &Path) -> Self {
        Self {
            raw: data_dir.join("raw").join("SGJobData.csv"),
            bronze: data_dir.join("bronze").join("sg_jobs_bronze.parquet"),
            silver: data_dir.join("silver").join("sg_jobs_silver.parquet"),
            gold_dir: data_dir.join("gold"),
            run_results: data_dir.join("run_results.json"),
        }
    }

    /// Anchors relative paths on the project directory.
    pub fn resolve(&self, project_dir: &Path) -> Self {
        let anchor = |p: &Path| {
            if p.is_absolute() {
                p.to_path_buf()
            } else {
                project_dir.join(p)
            }
        };
        Self {
            raw: anchor(&self.raw),
            bronze: anchor(&self.bronze),
            silver: anchor(&self.silver),
            gold_dir: anchor(&self.gold_dir),
            run_results: anchor(&self.run_results),
        }
    }

    pub fn gold_table(&self, file_stem: &str) -> PathBuf {
        self.gold_dir.join(format!("{}.parquet", file_stem))
    }
}

impl Default for LayerPaths {
    fn default() -> Self {
        Self::under(Path::new("data"))
    }
}

/// How test records are recognised, and what makes them look genuinely synthetic.
#[derive(Debug, Deserialize, Serialize, Clone, Validate)]
#[serde(default)]
pub struct SyntheticRowPolicy {
    #[serde(rename = "id-prefix", alias = "id_prefix")]
    #[validate(length(min = 1, message = "id-prefix cannot be empty"))]
    pub id_prefix: String,

    /// Flagged rows whose largest salary stays below this look like real postings.
    #[serde(rename = "sanity-max-salary", alias = "sanity_max_salary")]
    #[validate(range(min = 0.0))]
    pub sanity_max_salary: f64,

    /// Salaries above this count as anomalous in the Bronze report.
    #[serde(rename = "anomalous-salary", alias = "anomalous_salary")]
    #[validate(range(min = 0.0))]
    pub anomalous_salary: f64,
}

impl Default for SyntheticRowPolicy {
    fn default() -> Self {
        Self {
            id_prefix: "RANDOM_JOB_".to_string(),
            sanity_max_salary: 20_000.0,
            anomalous_salary: 100_000.0,
        }
    }
}

/// Monthly salary bounds and outlier handling.
#[derive(Debug, Deserialize, Serialize, Clone, Validate)]
#[serde(default)]
#[validate(schema(function = "validate_salary_policy"))]
pub struct SalaryPolicy {
    #[validate(range(min = 0.0))]
    pub floor: f64,
    #[validate(range(min = 0.0))]
    pub ceiling: f64,
    #[serde(rename = "winsor-low", alias = "winsor_low")]
    #[validate(range(min = 0.0, max = 1.0))]
    pub winsor_low: f64,
    #[serde(rename = "winsor-high", alias = "winsor_high")]
    #[validate(range(min = 0.0, max = 1.0))]
    pub winsor_high: f64,
    #[serde(rename = "iqr-multiplier", alias = "iqr_multiplier")]
    #[validate(range(min = 0.0))]
    pub iqr_multiplier: f64,
}

impl Default for SalaryPolicy {
    fn default() -> Self {
        Self {
            floor: 500.0,
            ceiling: 50_000.0,
            winsor_low: 0.01,
            winsor_high: 0.99,
            iqr_multiplier: 1.5,
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct ExperienceBand {
    pub min: i64,
    pub max: i64,
    pub label: String,
}

impl ExperienceBand {
    fn new(min: i64, max: i64, label: &str) -> Self {
        Self {
            min,
            max,
            label: label.to_string(),
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, Validate)]
#[serde(default)]
pub struct ExperiencePolicy {
    #[validate(length(min = 1, message = "experience bands cannot be empty"))]
    pub bands: Vec<ExperienceBand>,

    /// Years above the cap are clamped before banding.
    #[serde(rename = "max-years", alias = "max_years")]
    #[validate(range(min = 0))]
    pub max_years: i64,
}

impl Default for ExperiencePolicy {
    fn default() -> Self {
        Self {
            bands: vec![
                ExperienceBand::new(0, 1, "0-1 yr"),
                ExperienceBand::new(2, 3, "2-3 yrs"),
                ExperienceBand::new(4, 5, "4-5 yrs"),
                ExperienceBand::new(6, 10, "6-10 yrs"),
                ExperienceBand::new(11, 999, "10+ yrs"),
            ],
            max_years: 30,
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct RoleRule {
    pub family: String,
    pub keywords: Vec<String>,
}

impl RoleRule {
    fn new(family: &str, keywords: &[&str]) -> Self {
        Self {
            family: family.to_string(),
            keywords: keywords.iter().map(|k| k.to_string()).collect(),
        }
    }
}

/// Which Silver string columns may be dictionary-encoded.
#[derive(Debug, Deserialize, Serialize, Clone, Validate)]
#[serde(default)]
pub struct LayoutPolicy {
    pub candidates: Vec<String>,
    #[serde(rename = "max-unique-ratio", alias = "max_unique_ratio")]
    #[validate(range(min = 0.0, max = 1.0))]
    pub max_unique_ratio: f64,
}

impl Default for LayoutPolicy {
    fn default() -> Self {
        Self {
            candidates: [
                "employmentTypes",
                "seniority_tier",
                "role_family",
                "experience_band",
                "primary_industry",
                "positionLevels",
            ]
            .iter()
            .map(|c| c.to_string())
            .collect(),
            max_unique_ratio: 0.5,
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, Validate)]
#[serde(default)]
pub struct QualityThresholds {
    #[serde(rename = "min-expected-rows", alias = "min_expected_rows")]
    pub min_expected_rows: u64,

    /// Fraction (0.10 = 10%).
    #[serde(
        rename = "max-bronze-to-silver-loss",
        alias = "max_bronze_to_silver_loss"
    )]
    #[validate(range(min = 0.0, max = 1.0))]
    pub max_bronze_to_silver_loss: f64,
}

impl Default for QualityThresholds {
    fn default() -> Self {
        Self {
            min_expected_rows: 1_000_000,
            max_bronze_to_silver_loss: 0.10,
        }
    }
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            name: "sg_jobs".to_string(),
            strict: false,
            paths: LayerPaths::default(),
            data_root: None,
            synthetic: SyntheticRowPolicy::default(),
            useless_columns: vec![
                "occupationId".to_string(),
                "status_id".to_string(),
                "salary_type".to_string(),
            ],
            date_columns: vec![
                "metadata_newPostingDate".to_string(),
                "metadata_originalPostingDate".to_string(),
                "metadata_expiryDate".to_string(),
            ],
            salary: SalaryPolicy::default(),
            seniority_map: default_seniority_map(),
            experience: ExperiencePolicy::default(),
            role_keywords: default_role_keywords(),
            layout: LayoutPolicy::default(),
            quality: QualityThresholds::default(),
        }
    }
}

fn default_seniority_map() -> BTreeMap<String, SeniorityTier> {
    [
        ("Fresh/entry level", SeniorityTier::Entry),
        ("Non-executive", SeniorityTier::Entry),
        ("Junior Executive", SeniorityTier::Mid),
        ("Executive", SeniorityTier::Mid),
        ("Professional", SeniorityTier::Senior),
        ("Senior Executive", SeniorityTier::Senior),
        ("Manager", SeniorityTier::Management),
        ("Middle Management", SeniorityTier::Management),
        ("Senior Management", SeniorityTier::Management),
    ]
    .into_iter()
    .map(|(level, tier)| (level.to_string(), tier))
    .collect()
}

fn default_role_keywords() -> Vec<RoleRule> {
    vec![
        // Most specific roles first
        RoleRule::new(
            "Healthcare",
            &["nurse", "doctor", "medical", "clinical", "healthcare", "pharmacy", "therapist"],
        ),
        RoleRule::new(
            "Education",
            &["teacher", "educator", "trainer", "lecturer", "tutor", "instructor"],
        ),
        // Technical roles. "engineer" outranks "software" for titles carrying both.
        RoleRule::new(
            "Engineer",
            &["engineer", "engineering", "technician", "mechanic", "maintenance"],
        ),
        RoleRule::new(
            "Developer",
            &[
                "developer",
                "programmer",
                "software",
                "frontend",
                "backend",
                "fullstack",
                "full stack",
                "full-stack",
            ],
        ),
        RoleRule::new(
            "Analyst",
            &["analyst", "analytics", "data scientist", "insight", "research"],
        ),
        RoleRule::new(
            "IT/Systems",
            &[
                "it support",
                "infrastructure",
                "network",
                "system admin",
                "cloud",
                "devops",
                "cybersecurity",
                "security analyst",
            ],
        ),
        // Business functions
        RoleRule::new(
            "Finance",
            &["finance", "accounting", "accountant", "audit", "tax", "treasury"],
        ),
        RoleRule::new(
            "HR",
            &[
                "hr ",
                "human resource",
                "talent acquisition",
                "recruitment",
                "recruiter",
                "people",
            ],
        ),
        RoleRule::new(
            "Marketing",
            &[
                "marketing",
                "brand",
                "content",
                "social media",
                "digital marketing",
                "seo",
                "sem",
            ],
        ),
        RoleRule::new(
            "Sales",
            &[
                "sales",
                "business development",
                "account manager",
                "account executive",
                "relationship manager",
            ],
        ),
        // General leadership (less specific)
        RoleRule::new(
            "Manager",
            &["manager", "head of", "director", "vp ", "vice president", "chief", "lead"],
        ),
        RoleRule::new("Consultant", &["consultant", "advisor", "advisory"]),
        // Operational roles
        RoleRule::new(
            "Operations",
            &[
                "operations",
                "logistics",
                "supply chain",
                "procurement",
                "warehouse",
                "inventory",
            ],
        ),
        RoleRule::new(
            "Admin",
            &["admin", "secretary", "coordinator", "clerk", "receptionist", "assistant"],
        ),
        RoleRule::new(
            "Retail/F&B",
            &["cashier", "barista", "chef", "cook", "server", "waiter", "retail", "outlet", "店员"],
        ),
        RoleRule::new(
            "Driver",
            &["driver", "delivery", "dispatch", "courier", "rider"],
        ),
    ]
}

fn validate_salary_policy(policy: &SalaryPolicy) -> Result<(), ValidationError> {
    if policy.floor >= policy.ceiling {
        return Err(ValidationError::new("salary_floor_not_below_ceiling"));
    }
    if policy.winsor_low > policy.winsor_high {
        return Err(ValidationError::new("winsor_percentiles_inverted"));
    }
    Ok(())
}

fn validate_pipeline_config(config: &PipelineConfig) -> Result<(), ValidationError> {
    if config
        .role_keywords
        .iter()
        .any(|rule| rule.family.is_empty() || rule.keywords.iter().all(|k| k.is_empty()))
    {
        return Err(ValidationError::new("role_rule_without_keywords"));
    }
    if config
        .experience
        .bands
        .iter()
        .any(|band| band.min > band.max)
    {
        return Err(ValidationError::new("experience_band_inverted"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(PipelineConfig::default().validate().is_ok());
    }

    #[test]
    fn test_seniority_map_has_nine_levels_over_four_tiers() {
        let config = PipelineConfig::default();
        assert_eq!(config.seniority_map.len(), 9);

        let tiers: std::collections::BTreeSet<SeniorityTier> =
            config.seniority_map.values().copied().collect();
        let expected: std::collections::BTreeSet<SeniorityTier> = [
            SeniorityTier::Entry,
            SeniorityTier::Mid,
            SeniorityTier::Senior,
            SeniorityTier::Management,
        ]
        .into_iter()
        .collect();
        assert_eq!(tiers, expected);
    }

    #[test]
    fn test_role_table_is_ordered_and_populated() {
        let config = PipelineConfig::default();
        assert!(config.role_keywords.iter().all(|r| !r.keywords.is_empty()));

        let position = |family: &str| {
            config
                .role_keywords
                .iter()
                .position(|r| r.family == family)
        };
        assert!(position("Sales") < position("Manager"));
        assert!(position("Engineer") < position("Developer"));
    }

    #[test]
    fn test_inverted_salary_bounds_rejected() {
        let mut config = PipelineConfig::default();
        config.salary.floor = 60_000.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_out_of_range_percentile_rejected() {
        let mut config = PipelineConfig::default();
        config.salary.winsor_high = 1.5;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_partial_yaml_keeps_defaults() -> anyhow::Result<()> {
        let yaml = "salary:\n  floor: 1000\nstrict: true\n";
        let config: PipelineConfig = serde_yaml::from_str(yaml)?;
        assert_eq!(config.salary.floor, 1000.0);
        assert_eq!(config.salary.ceiling, 50_000.0);
        assert!(config.strict);
        assert_eq!(config.role_keywords.len(), 16);
        Ok(())
    }

    #[test]
    fn test_resolve_anchors_relative_paths() {
        let paths = LayerPaths::default().resolve(Path::new("/srv/jobs"));
        assert_eq!(paths.raw, PathBuf::from("/srv/jobs/data/raw/SGJobData.csv"));
        assert_eq!(
            paths.gold_table("agg_competition"),
            PathBuf::from("/srv/jobs/data/gold/agg_competition.parquet")
        );
    }
}
