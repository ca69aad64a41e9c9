// src/forecast/calculator.rs

//! Replenishment arithmetic.
//!
//! Every function here is pure and total: non-finite or negative inputs are
//! coerced to zero (see [`sanitize`]) so a NaN can never leak into a status
//! badge or an order quantity.

use chrono::{Days, NaiveDate};
use serde::Serialize;
use std::fmt;

use crate::model::UsageRecord;

/// Default trailing window for the moving average, in days.
pub const DEFAULT_WINDOW_DAYS: usize = 14;

/// Default planning horizon for the projected trajectory, in days.
pub const DEFAULT_HORIZON_DAYS: usize = 30;

/// Clamps a quantity to the valid domain `[0, +inf)`; NaN and infinities become 0.
pub fn sanitize(value: f64) -> f64 {
    if value.is_finite() && value > 0.0 {
        value
    } else {
        0.0
    }
}

/// How long current stock lasts at the current usage rate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum DaysCover {
    Days(f64),
    /// Usage is zero: the item never runs out.
    Infinite,
}

impl DaysCover {
    pub fn is_infinite(&self) -> bool {
        matches!(self, DaysCover::Infinite)
    }
}

impl fmt::Display for DaysCover {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DaysCover::Days(d) => write!(f, "{:.1}", d),
            DaysCover::Infinite => f.write_str("∞"),
        }
    }
}

/// One point of the projected stock trajectory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ProjectedPoint {
    pub day: usize,
    pub projected: u64,
}

/// Trailing moving average of daily usage.
///
/// Records are sorted by date (ties by quantity, so the result does not
/// depend on input order) and the last `window_days` are kept. The sum is
/// divided by the number of records kept, not by `window_days`: a SKU with
/// two records in a 14-day window averages over 2.
pub fn average_daily_usage(history: &[UsageRecord], window_days: usize) -> f64 {
    if history.is_empty() {
        return 0.0;
    }

    let mut sorted: Vec<(NaiveDate, f64)> = history
        .iter()
        .map(|r| (r.date, sanitize(r.qty_used)))
        .collect();
    sorted.sort_by(|a, b| a.0.cmp(&b.0).then(a.1.total_cmp(&b.1)));

    let window = window_days.max(1);
    let start = sorted.len().saturating_sub(window);
    let kept = &sorted[start..];

    let total: f64 = kept.iter().map(|(_, qty)| qty).sum();
    total / kept.len() as f64
}

/// Expected consumption over the lead time plus the safety buffer, rounded to a whole unit.
pub fn reorder_point(avg_daily_usage: f64, lead_time_days: f64, safety_stock: f64) -> f64 {
    (sanitize(avg_daily_usage) * sanitize(lead_time_days) + sanitize(safety_stock)).round()
}

/// Uses the backend-supplied reorder point when present, otherwise derives one.
pub fn resolve_reorder_point(
    supplied: Option<f64>,
    avg_daily_usage: f64,
    lead_time_days: f64,
    safety_stock: f64,
) -> f64 {
    match supplied {
        Some(rop) => sanitize(rop),
        None => reorder_point(avg_daily_usage, lead_time_days, safety_stock),
    }
}

pub fn days_of_cover(on_hand: f64, avg_daily_usage: f64) -> DaysCover {
    let avg = sanitize(avg_daily_usage);
    if avg <= 0.0 {
        DaysCover::Infinite
    } else {
        DaysCover::Days(sanitize(on_hand) / avg)
    }
}

/// Linear depletion of `on_hand` at `avg_daily_usage` per day over `horizon_days`.
///
/// Returns `horizon_days + 1` points, floored at zero.
pub fn project_on_hand(
    on_hand: f64,
    avg_daily_usage: f64,
    horizon_days: usize,
) -> Vec<ProjectedPoint> {
    let on_hand = sanitize(on_hand);
    let avg = sanitize(avg_daily_usage);

    (0..=horizon_days)
        .map(|day| {
            let balance = on_hand - avg * day as f64;
            ProjectedPoint {
                day,
                projected: balance.max(0.0).round() as u64,
            }
        })
        .collect()
}

/// Quantity to order so stock climbs back to the target level.
///
/// Nothing is suggested while stock is above the reorder point. The target
/// is the max level when one is set, otherwise `reorder_point + safety_stock`.
pub fn suggested_order_qty(
    on_hand: f64,
    reorder_point: f64,
    safety_stock: f64,
    max_level: Option<f64>,
) -> u64 {
    let on_hand = sanitize(on_hand);
    let rop = sanitize(reorder_point);
    if on_hand > rop {
        return 0;
    }

    let target = match max_level.map(sanitize) {
        Some(max) if max > 0.0 => max,
        _ => rop + sanitize(safety_stock),
    };
    (target - on_hand).round().max(0.0) as u64
}

/// Whole days until stock falls to the reorder point.
///
/// `None` when usage is zero: there is no honest ETA to report.
pub fn days_to_reorder_point(
    on_hand: f64,
    reorder_point: f64,
    avg_daily_usage: f64,
) -> Option<u64> {
    let avg = sanitize(avg_daily_usage);
    if avg <= 0.0 {
        return None;
    }
    let raw = (sanitize(on_hand) - sanitize(reorder_point)) / avg;
    if !raw.is_finite() {
        return None;
    }
    Some(raw.ceil().max(0.0) as u64)
}

/// Calendar date on which the reorder point is reached, if it is known.
pub fn eta_reorder_date(
    today: NaiveDate,
    days_to_reorder_point: Option<u64>,
) -> Option<NaiveDate> {
    days_to_reorder_point.and_then(|days| today.checked_add_days(Days::new(days)))
}
