// jobmart/src/cli.rs
//
// Single source of truth for all CLI definitions (Clap structs).

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use jobmart_core::application::{Layer, Stage};

#[derive(Parser)]
#[command(name = "jobmart")]
#[command(about = "Bronze / Silver / Gold pipeline for job-postings extracts", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

/// Where the project lives and which configuration to load.
#[derive(Args, Debug, Clone)]
pub struct ProjectArgs {
    /// Project directory
    #[arg(long, default_value = ".")]
    pub project_dir: PathBuf,

    /// Pipeline configuration (default: jobmart.yaml in the project directory)
    #[arg(long, short)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// 🚀 Runs the pipeline (Raw -> Bronze -> Silver -> Gold)
    Run {
        #[command(flatten)]
        project: ProjectArgs,

        /// Stage to run: bronze | silver | gold | all
        #[arg(long, short, default_value = "all")]
        stage: Stage,

        /// Escalate data-quality warnings to failures
        #[arg(long)]
        strict: bool,
    },

    /// 📊 Row counts per layer and quality warnings
    Summary {
        #[command(flatten)]
        project: ProjectArgs,
    },

    /// 🔍 Inspects a checkpoint (schema + sample rows)
    Inspect {
        #[command(flatten)]
        project: ProjectArgs,

        /// bronze | silver | a Gold table (ex: "agg_industry_demand")
        #[arg(long, short)]
        table: Layer,

        /// Number of sample rows to display
        #[arg(long, default_value = "5")]
        limit: usize,
    },

    /// 🧹 Removes the derived layers (the raw extract is kept)
    Clean {
        #[command(flatten)]
        project: ProjectArgs,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::{Result, bail};
    use jobmart_core::domain::gold::GoldTable;

    #[test]
    fn test_cli_parse_run_defaults() -> Result<()> {
        let args = Cli::parse_from(["jobmart", "run"]);
        match args.command {
            Commands::Run {
                project,
                stage,
                strict,
            } => {
                assert_eq!(project.project_dir.to_string_lossy(), ".");
                assert_eq!(project.config, None);
                assert_eq!(stage, Stage::All);
                assert!(!strict);
                Ok(())
            }
            _ => bail!("Expected Run command"),
        }
    }

    #[test]
    fn test_cli_parse_run_stage_and_strict() -> Result<()> {
        let args = Cli::parse_from([
            "jobmart",
            "run",
            "--stage",
            "silver",
            "--strict",
            "--project-dir",
            "/tmp",
            "--config",
            "custom.yaml",
        ]);
        match args.command {
            Commands::Run {
                project,
                stage,
                strict,
            } => {
                assert_eq!(project.project_dir.to_string_lossy(), "/tmp");
                assert_eq!(project.config, Some(PathBuf::from("custom.yaml")));
                assert_eq!(stage, Stage::Silver);
                assert!(strict);
                Ok(())
            }
            _ => bail!("Expected Run command"),
        }
    }

    #[test]
    fn test_cli_rejects_unknown_stage() {
        assert!(Cli::try_parse_from(["jobmart", "run", "--stage", "platinum"]).is_err());
    }

    #[test]
    fn test_cli_parse_inspect() -> Result<()> {
        let args = Cli::parse_from(["jobmart", "inspect", "-t", "agg_top_companies", "--limit", "3"]);
        match args.command {
            Commands::Inspect { table, limit, .. } => {
                assert_eq!(table, Layer::Gold(GoldTable::TopCompanies));
                assert_eq!(limit, 3);
                Ok(())
            }
            _ => bail!("Expected Inspect command"),
        }
    }

    #[test]
    fn test_cli_parse_summary_and_clean() -> Result<()> {
        let args = Cli::parse_from(["jobmart", "summary", "--project-dir", "demo"]);
        let Commands::Summary { project } = args.command else {
            bail!("Expected Summary command");
        };
        assert_eq!(project.project_dir, PathBuf::from("demo"));

        let args = Cli::parse_from(["jobmart", "clean"]);
        assert!(matches!(args.command, Commands::Clean { .. }));
        Ok(())
    }
}
