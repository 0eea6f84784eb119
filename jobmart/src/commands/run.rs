// jobmart/src/commands/run.rs
//
// USE CASE: Run the pipeline.

use jobmart_core::application::{RunResult, Stage, run_pipeline};
use jobmart_core::infrastructure::adapters::DataFusionConnector;
use jobmart_core::ports::connector::Connector;

use super::summary::print_summary;
use crate::cli::ProjectArgs;

pub async fn execute(project: ProjectArgs, stage: Stage, strict: bool) -> anyhow::Result<()> {
    let start = std::time::Instant::now();

    // A. Load the Config (Infra)
    println!("⚙️  Loading configuration...");
    let mut config = super::load_config(&project)?;
    // Le flag CLI l'emporte sur le YAML et l'ENV
    if strict {
        config.strict = true;
    }
    println!("   Pipeline: {} (stage: {})", config.name, stage);
    if config.strict {
        println!("    🔒 Strict Data Quality Mode: ON");
    } else {
        println!("    🔓 Strict Data Quality Mode: OFF (warnings only)");
    }

    // B. Instantiate the storage adapter
    let connector = DataFusionConnector::new();
    println!("   Engine: Apache DataFusion 🏹 ({})", connector.engine_name());

    // C. Run the Pipeline (Application Layer)
    println!("🟢 Processing Pipeline...");
    match run_pipeline(&connector, &config, stage).await {
        Ok(result) => {
            print_stages(&result);
            print_summary(&result.summary);
            if result.success {
                println!("\n✨ SUCCESS! Pipeline finished in {:.2?}", start.elapsed());
                println!("   Run results: {}", config.paths.run_results.display());
            } else {
                eprintln!("\n❌ FAILURE. {} Gold table(s) failed.", result.errors.len());
                for error in &result.errors {
                    eprintln!("   ❌ {}", error);
                }
                std::process::exit(1);
            }
        }
        Err(e) => super::fail(e),
    }

    Ok(())
}

fn print_stages(result: &RunResult) {
    if let Some(bronze) = &result.bronze {
        println!(
            "    ✅ Bronze: {} -> {} rows ({} synthetic, {} null titles removed)",
            bronze.rows_loaded, bronze.rows_written, bronze.synthetic_removed, bronze.null_title_removed
        );
    }
    if let Some(silver) = &result.silver {
        println!(
            "    ✅ Silver: {} rows, {} industries, {} role families, {} salary outliers flagged",
            silver.rows, silver.distinct_industries, silver.role_families, silver.salary.outliers_flagged
        );
    }
    if let Some(gold) = &result.gold {
        for (table, rows) in &gold.tables {
            println!("    ✅ Gold: {} ({} rows)", table, rows);
        }
        for table in gold.failures.keys() {
            eprintln!("    ❌ Gold: {}", table);
        }
    }
    for warning in &result.warnings {
        eprintln!("    ⚠️  {}", warning);
    }
}
