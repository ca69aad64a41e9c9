pub mod cache;
pub mod config;
pub mod engine;

pub use cache::SnapshotCache;
pub use config::ForecastConfig;
pub use engine::{DerivedForecast, ForecastEngine, ForecastRow, InventorySnapshot, InventorySummary};
