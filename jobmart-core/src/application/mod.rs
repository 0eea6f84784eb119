// jobmart-core/src/application/mod.rs

pub mod bronze;
pub mod checkpoint;
pub mod clean;
pub mod gold;
pub mod pipeline;
pub mod silver;
pub mod summary;

// --- RE-EXPORTS (FACADE PATTERN) ---
// `use jobmart_core::application::{run_pipeline, clean_layers, Stage};`

pub use bronze::run_bronze;
pub use checkpoint::{Layer, load_bronze, load_gold, load_silver, load_silver_postings};
pub use clean::clean_layers;
pub use gold::{GoldReport, run_gold};
pub use pipeline::{RunResult, Stage, run_pipeline};
pub use silver::run_silver;
pub use summary::pipeline_summary;
