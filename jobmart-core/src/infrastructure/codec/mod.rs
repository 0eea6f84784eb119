// jobmart-core/src/infrastructure/codec/mod.rs

// Conversions between domain records and Arrow batches.
pub mod columns;
pub mod gold;
pub mod posting;
pub mod raw;
pub mod silver;

pub use columns::normalize_batch;
pub use gold::encode_table;
pub use posting::decode_postings;
pub use silver::{decode_enriched, encode_enriched};
