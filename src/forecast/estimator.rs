// src/forecast/estimator.rs

use chrono::NaiveDate;
use std::fmt::Debug;

use super::calculator::{average_daily_usage, sanitize, DEFAULT_WINDOW_DAYS};
use crate::model::UsageRecord;

/// Turns one SKU's usage history into an average daily usage rate.
///
/// We require `Send` + `Sync` so an engine can be shared between threads
/// by a host that recomputes off its UI thread.
pub trait UsageEstimator: Debug + Send + Sync {
    /// Must return a finite value `>= 0` for any input, including an empty history.
    fn estimate(&self, history: &[UsageRecord]) -> f64;

    fn name(&self) -> &'static str;
}

// =========================================================================
// 1. Moving Average (default)
// =========================================================================

/// Mean of the trailing `window_days` records.
#[derive(Debug, Clone)]
pub struct MovingAverage {
    window_days: usize,
}

impl MovingAverage {
    pub fn new(window_days: usize) -> Self {
        Self {
            window_days: window_days.max(1),
        }
    }
}

impl Default for MovingAverage {
    fn default() -> Self {
        Self::new(DEFAULT_WINDOW_DAYS)
    }
}

impl UsageEstimator for MovingAverage {
    fn estimate(&self, history: &[UsageRecord]) -> f64 {
        average_daily_usage(history, self.window_days)
    }

    fn name(&self) -> &'static str {
        "moving-average"
    }
}

// =========================================================================
// 2. Exponential Smoothing
// =========================================================================

/// Exponentially weighted average over the trailing window.
///
/// Reacts faster to a recent change in consumption than the plain mean.
/// Seeded with the oldest kept observation.
#[derive(Debug, Clone)]
pub struct ExponentialSmoothing {
    alpha: f64, // Smoothing factor (0.1 = very stable, 0.9 = reactive)
    window_days: usize,
}

impl ExponentialSmoothing {
    pub fn new(alpha: f64, window_days: usize) -> Self {
        let alpha = if alpha.is_finite() {
            alpha.clamp(f64::EPSILON, 1.0)
        } else {
            1.0
        };
        Self {
            alpha,
            window_days: window_days.max(1),
        }
    }
}

impl UsageEstimator for ExponentialSmoothing {
    fn estimate(&self, history: &[UsageRecord]) -> f64 {
        let mut sorted: Vec<(NaiveDate, f64)> = history
            .iter()
            .map(|r| (r.date, sanitize(r.qty_used)))
            .collect();
        sorted.sort_by(|a, b| a.0.cmp(&b.0).then(a.1.total_cmp(&b.1)));

        let start = sorted.len().saturating_sub(self.window_days);
        let mut kept = sorted[start..].iter().map(|(_, qty)| *qty);

        let Some(first) = kept.next() else {
            return 0.0;
        };
        let smoothed = kept.fold(first, |acc, qty| {
            self.alpha * qty + (1.0 - self.alpha) * acc
        });
        sanitize(smoothed)
    }

    fn name(&self) -> &'static str {
        "exponential-smoothing"
    }
}
