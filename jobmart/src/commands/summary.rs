// jobmart/src/commands/summary.rs
//
// USE CASE: Row counts per layer and quality warnings (read-only).

use comfy_table::{Table, presets::UTF8_FULL};
use jobmart_core::application::pipeline_summary;
use jobmart_core::domain::quality::PipelineSummary;
use jobmart_core::infrastructure::adapters::DataFusionConnector;

use crate::cli::ProjectArgs;

pub async fn execute(project: ProjectArgs) -> anyhow::Result<()> {
    let config = super::load_config(&project)?;
    let connector = DataFusionConnector::new();

    match pipeline_summary(&connector, &config).await {
        Ok(summary) => print_summary(&summary),
        Err(e) => super::fail(e),
    }
    Ok(())
}

pub fn print_summary(summary: &PipelineSummary) {
    println!("\n📊 Pipeline Summary");

    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_header(vec!["Layer", "Table", "Rows"]);
    table.add_row(vec!["Bronze".to_string(), "-".to_string(), summary.bronze.to_string()]);
    table.add_row(vec!["Silver".to_string(), "-".to_string(), summary.silver.to_string()]);
    for (name, rows) in &summary.gold {
        table.add_row(vec!["Gold".to_string(), name.clone(), rows.to_string()]);
    }
    println!("{table}");

    if let Some(loss) = summary.bronze_to_silver_loss {
        println!("   Bronze -> Silver loss: {:.2}%", loss * 100.0);
    }
    if summary.is_clean() {
        println!("   ✅ No data-quality warnings.");
    } else {
        eprintln!("\n⚠️  {} warning(s):", summary.warnings.len());
        for warning in &summary.warnings {
            eprintln!("   ⚠️  {}", warning);
        }
    }
}
