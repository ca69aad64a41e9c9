// src/forecast/status.rs

use serde::Serialize;
use std::fmt;

use super::calculator::sanitize;

/// Replenishment badge shown for an item.
///
/// Variants are declared in severity order, most urgent first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum StockStatus {
    ReorderNow,
    Overstock,
    Ok,
}

impl StockStatus {
    pub fn label(&self) -> &'static str {
        match self {
            StockStatus::ReorderNow => "Reorder now",
            StockStatus::Overstock => "Overstock",
            StockStatus::Ok => "OK",
        }
    }

    /// 0 is the most urgent.
    pub fn severity(&self) -> u8 {
        match self {
            StockStatus::ReorderNow => 0,
            StockStatus::Overstock => 1,
            StockStatus::Ok => 2,
        }
    }
}

impl fmt::Display for StockStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Classifies stock against the reorder point and the overstock ceiling.
///
/// The reorder check runs first, so an item at or below its reorder point
/// is flagged even if a stale max level says it is overstocked.
pub fn classify_status(on_hand: f64, reorder_point: f64, max_level: Option<f64>) -> StockStatus {
    let on_hand = sanitize(on_hand);
    if on_hand <= sanitize(reorder_point) {
        return StockStatus::ReorderNow;
    }
    // A max level of 0 is an unset ceiling upstream.
    match max_level.map(sanitize) {
        Some(max) if max > 0.0 && on_hand > max => StockStatus::Overstock,
        _ => StockStatus::Ok,
    }
}

/// Stable sort by severity; items with the same status keep their order.
pub fn rank_by_severity<T, F>(rows: &mut [T], status_of: F)
where
    F: Fn(&T) -> StockStatus,
{
    rows.sort_by_key(|row| status_of(row).severity());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reorder_wins_over_overstock() {
        assert_eq!(classify_status(10.0, 10.0, Some(5.0)), StockStatus::ReorderNow);
        assert_eq!(classify_status(0.0, 0.0, None), StockStatus::ReorderNow);
    }

    #[test]
    fn overstock_above_max_level() {
        assert_eq!(classify_status(50.0, 20.0, Some(40.0)), StockStatus::Overstock);
        assert_eq!(classify_status(40.0, 20.0, Some(40.0)), StockStatus::Ok);
        assert_eq!(classify_status(50.0, 20.0, None), StockStatus::Ok);
        assert_eq!(classify_status(50.0, 20.0, Some(0.0)), StockStatus::Ok);
    }

    #[test]
    fn reorder_now_whenever_at_or_below_rop() {
        for rop in [0.0, 1.0, 7.0, 20.0] {
            for on_hand in [0.0, rop / 2.0, rop] {
                for max in [None, Some(0.0), Some(rop / 3.0), Some(1000.0)] {
                    assert_eq!(classify_status(on_hand, rop, max), StockStatus::ReorderNow);
                }
            }
        }
    }

    #[test]
    fn nan_on_hand_is_treated_as_empty() {
        assert_eq!(classify_status(f64::NAN, 5.0, Some(10.0)), StockStatus::ReorderNow);
    }

    #[test]
    fn ranking_is_stable_within_tier() {
        let mut rows = vec![
            ("a", StockStatus::Ok),
            ("b", StockStatus::Overstock),
            ("c", StockStatus::ReorderNow),
            ("d", StockStatus::Ok),
            ("e", StockStatus::ReorderNow),
        ];
        rank_by_severity(&mut rows, |r| r.1);
        let order: Vec<&str> = rows.iter().map(|r| r.0).collect();
        assert_eq!(order, vec!["c", "e", "b", "a", "d"]);
    }

    #[test]
    fn labels() {
        assert_eq!(StockStatus::ReorderNow.to_string(), "Reorder now");
        assert_eq!(StockStatus::Overstock.label(), "Overstock");
        assert_eq!(StockStatus::Ok.label(), "OK");
    }
}
