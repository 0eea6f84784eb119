// jobmart/src/commands/clean.rs
//
// USE CASE: Remove the derived layers.

use jobmart_core::application::clean_layers;

use crate::cli::ProjectArgs;

pub fn execute(project: ProjectArgs) -> anyhow::Result<()> {
    let config = super::load_config(&project)?;

    match clean_layers(&project.project_dir, &config) {
        Ok(removed) if removed.is_empty() => println!("   Nothing to clean."),
        Ok(removed) => {
            for path in removed {
                println!("   🗑️  Layer removed: {}", path.display());
            }
        }
        Err(e) => {
            eprintln!("❌ Clean failed: {}", e);
            std::process::exit(1);
        }
    }
    Ok(())
}
