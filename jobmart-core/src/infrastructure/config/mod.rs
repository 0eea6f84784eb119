pub mod pipeline;

pub use crate::domain::configuration::PipelineConfig;
pub use pipeline::{CONFIG_CANDIDATES, load_pipeline_config};
