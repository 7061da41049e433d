/// Data layer: core types, loading, and filtering.
///
/// Architecture:
/// ```text
///  .csv / .json / .parquet
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file → LaunchDataset
///   └──────────┘
///        │
///        ▼
///   ┌───────────────┐
///   │ LaunchDataset │  Vec<LaunchRecord>, sites, payload bounds
///   └───────────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  site / payload predicates → matching records
///   └──────────┘
/// ```

pub mod loader;
pub mod model;
pub mod filter;

use thiserror::Error;

/// Column names of the launch table.
pub mod columns {
    pub const FLIGHT_NUMBER: &str = "Flight Number";
    pub const LAUNCH_SITE: &str = "Launch Site";
    pub const PAYLOAD_MASS: &str = "Payload Mass (kg)";
    pub const CLASS: &str = "class";
    pub const BOOSTER_VERSION: &str = "Booster Version";
}

/// Violations of the launch table's schema.
#[derive(Debug, Error)]
pub enum SchemaError {
    #[error("missing required column '{0}'")]
    MissingColumn(&'static str),
    #[error("row {row}: class must be 0 or 1, got {value}")]
    InvalidOutcome { row: usize, value: String },
    #[error("row {row}: payload mass must be a non-negative number, got {value}")]
    InvalidPayload { row: usize, value: String },
    #[error("row {row}: column '{column}' is empty")]
    EmptyField { row: usize, column: &'static str },
    #[error("row {row}: flight number must be a non-negative integer, got {value}")]
    InvalidFlightNumber { row: usize, value: String },
    #[error("dataset contains no launch records")]
    Empty,
}
