pub mod bronze;
pub mod configuration;
pub mod error;
pub mod gold;
pub mod posting;
pub mod quality;
pub mod silver;
pub mod stats;

// Re-exports pratiques pour simplifier les imports ailleurs
pub use configuration::PipelineConfig;
pub use error::DomainError;
pub use posting::{EnrichedPosting, JobPosting, SeniorityTier, YearMonth};
