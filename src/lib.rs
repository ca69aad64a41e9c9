//! Replenishment forecasting for a small workshop inventory.
//!
//! Given each item's stock on hand, supplier lead time, safety stock and a
//! history of daily usage, the crate derives the average daily usage, the
//! reorder point, days of cover, a projected stock trajectory, a status
//! badge and a suggested order quantity.
//!
//! The arithmetic in [`forecast`] is pure; [`planning`] runs it over a whole
//! snapshot and [`io`] handles loading and exporting.

pub mod error;
pub mod forecast;
pub mod io;
pub mod model;
pub mod planning;

pub use error::{ForecastError, Result};
