pub mod item;
pub mod usage;

pub use item::{Category, InventoryItem};
pub use usage::{UsageHistory, UsageRecord};
