// jobmart/src/commands/inspect.rs
//
// USE CASE: Inspect a checkpoint (schema + sample rows).

use comfy_table::{Table, presets::UTF8_FULL};
use datafusion::arrow::record_batch::RecordBatch;
use datafusion::arrow::util::display::{ArrayFormatter, FormatOptions};
use jobmart_core::application::{Layer, checkpoint};
use jobmart_core::infrastructure::adapters::DataFusionConnector;

use crate::cli::ProjectArgs;

pub async fn execute(project: ProjectArgs, layer: Layer, limit: usize) -> anyhow::Result<()> {
    let config = super::load_config(&project)?;
    let connector = DataFusionConnector::new();

    let (batches, total) =
        match checkpoint::preview(&connector, &config.paths, layer, limit).await {
            Ok(preview) => preview,
            Err(e) => super::fail(e),
        };

    println!("\n🔍 Inspecting Table: '{}' ({} rows)", layer, total);
    println!("   Path: {}", layer.path(&config.paths).display());

    let Some(first) = batches.first() else {
        println!("   (empty)");
        return Ok(());
    };
    let schema = first.schema();
    let columns: Vec<String> = schema
        .fields()
        .iter()
        .map(|f| format!("{}: {}", f.name(), f.data_type()))
        .collect();
    println!("   Columns: [{}]", columns.join(", "));
    println!("   --- Rows (Limit {}) ---", limit);

    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_header(schema.fields().iter().map(|f| f.name().clone()).collect::<Vec<_>>());
    for batch in &batches {
        for row in render_rows(batch)? {
            table.add_row(row);
        }
    }
    println!("{table}");
    Ok(())
}

fn render_rows(batch: &RecordBatch) -> anyhow::Result<Vec<Vec<String>>> {
    let options = FormatOptions::default().with_null("∅");
    let formatters = batch
        .columns()
        .iter()
        .map(|c| ArrayFormatter::try_new(c.as_ref(), &options))
        .collect::<Result<Vec<_>, _>>()?;

    let mut rows = Vec::with_capacity(batch.num_rows());
    for row in 0..batch.num_rows() {
        rows.push(
            formatters
                .iter()
                .map(|f| f.value(row).try_to_string())
                .collect::<Result<Vec<_>, _>>()?,
        );
    }
    Ok(rows)
}
