//! Storage Layer - flat files loaded once into memory
//!
//! Two CSV tables are the system of record:
//! - prices(Date `DD-Mon-YY`, Price)
//! - events(Date ISO, Event, Description, Category, Impact_Level)

pub mod schema;
pub mod loader;
pub mod memory;

pub use loader::{load_events, load_prices, write_prices};
pub use memory::{DataStore, StoreStats};
