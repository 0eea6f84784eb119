pub mod datafusion;

pub use self::datafusion::DataFusionConnector;
