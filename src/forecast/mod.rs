pub mod calculator;
pub mod estimator;
pub mod status;

pub use calculator::{DaysCover, ProjectedPoint};
pub use estimator::{ExponentialSmoothing, MovingAverage, UsageEstimator};
pub use status::{classify_status, rank_by_severity, StockStatus};
