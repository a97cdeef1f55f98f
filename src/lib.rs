//! # Crudewatch - Oil price and event-impact data service
//!
//! Serves a daily oil price series and a table of annotated historical events
//! to a charting frontend, and generates a synthetic price series for demos.
//!
//! Crudewatch provides:
//! - An immutable in-memory store loaded once from two CSV tables
//! - A query engine: range filters, descriptive statistics, log-return
//!   volatility, and before/after event-impact windows
//! - An axum JSON API over the query engine
//! - A synthetic generator (piecewise trend + mean-reverting walk + event shocks)

pub mod price;
pub mod event;
pub mod storage;
pub mod query;
pub mod generator;
pub mod server;
pub mod output;
pub mod config;
pub mod ui;

// Re-exports for convenient access
pub use price::PriceObservation;
pub use event::EventRecord;
pub use storage::DataStore;
pub use query::{DateRange, EventFilter, QueryEngine};
pub use generator::{Generator, GeneratorConfig};

/// Result type alias for Crudewatch operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for Crudewatch operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Failed to load {path}: {message}")]
    Load { path: String, message: String },

    #[error("{0} parameter required")]
    MissingParameter(&'static str),

    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("Not enough price observations in range: {count} (need at least 2)")]
    EmptyRange { count: usize },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Build a load error for the given source file
    pub fn load(path: impl AsRef<std::path::Path>, message: impl Into<String>) -> Self {
        Error::Load {
            path: path.as_ref().display().to_string(),
            message: message.into(),
        }
    }

    /// Whether the error was caused by caller input rather than the data
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            Error::MissingParameter(_) | Error::InvalidParameter(_) | Error::EmptyRange { .. }
        )
    }
}
