pub mod engine;
pub mod filter;
pub mod stats;

pub use engine::{
    Categories, DateBounds, EventImpact, ImpactSummary, PriceStatistics, QueryEngine,
    DEFAULT_WINDOW_DAYS,
};
pub use filter::{DateRange, EventFilter};
