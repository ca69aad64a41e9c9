// src/io/synthetic.rs

//! Synthetic inventory and usage data for demos and smoke runs.

use chrono::{Days, NaiveDate};
use rand::Rng;
use rand_distr::{Distribution, Normal};

use crate::error::{ForecastError, Result};
use crate::model::{Category, InventoryItem, UsageRecord};

/// Generates one usage record per day for `days` days ending on `end`.
///
/// Daily quantities are drawn from a Normal distribution, rounded to whole
/// units and clamped at 0 (usage cannot be negative).
pub fn generate_normal_usage<R: Rng + ?Sized>(
    rng: &mut R,
    sku: &str,
    end: NaiveDate,
    days: usize,
    mean: f64,
    std_dev: f64,
) -> Result<Vec<UsageRecord>> {
    let normal = Normal::new(mean, std_dev)
        .map_err(|e| ForecastError::InvalidConfig(format!("usage distribution: {e}")))?;

    let mut records = Vec::with_capacity(days);
    for offset in (0..days).rev() {
        let Some(date) = end.checked_sub_days(Days::new(offset as u64)) else {
            continue;
        };
        let qty = normal.sample(rng).round().max(0.0);
        records.push(UsageRecord::new(sku, date, qty));
    }
    Ok(records)
}

/// Generates a "Step" pattern: `before` per day, then `after` from day `step_at` on.
///
/// Useful for watching how the moving average lags a sudden change in consumption.
pub fn generate_step_usage(
    sku: &str,
    end: NaiveDate,
    days: usize,
    step_at: usize,
    before: f64,
    after: f64,
) -> Vec<UsageRecord> {
    (0..days)
        .filter_map(|i| {
            let offset = (days - 1 - i) as u64;
            let date = end.checked_sub_days(Days::new(offset))?;
            let qty = if i < step_at { before } else { after };
            Some(UsageRecord::new(sku, date, qty))
        })
        .collect()
}

/// A small workshop inventory: lumber, hardware and a finished product.
pub fn demo_inventory() -> Vec<InventoryItem> {
    let mut oak = InventoryItem::new("RAW-OAK-1X6", 42.0);
    oak.name = "Oak board 1x6".to_string();
    oak.category = Category::Raw;
    oak.location = Some("Rack A".to_string());
    oak.lead_time_days = 7.0;
    oak.safety_stock = 10.0;
    oak.max_level = Some(150.0);

    let mut screws = InventoryItem::new("RAW-SCREW-8", 900.0);
    screws.name = "Wood screw #8".to_string();
    screws.category = Category::Raw;
    screws.location = Some("Bin 12".to_string());
    screws.lead_time_days = 3.0;
    screws.safety_stock = 100.0;
    screws.max_level = Some(600.0);

    let mut varnish = InventoryItem::new("RAW-VARNISH", 14.0);
    varnish.name = "Clear varnish (L)".to_string();
    varnish.category = Category::Raw;
    varnish.location = Some("Cabinet 2".to_string());
    varnish.lead_time_days = 5.0;
    varnish.safety_stock = 4.0;

    let mut bank = InventoryItem::new("FIN-COINBANK", 35.0);
    bank.name = "Wooden coin bank".to_string();
    bank.category = Category::Finished;
    bank.location = Some("Showroom".to_string());
    bank.lead_time_days = 2.0;
    bank.safety_stock = 5.0;
    bank.reorder_point = Some(15.0);

    vec![oak, screws, varnish, bank]
}

/// Usage history matching [`demo_inventory`].
pub fn demo_usage<R: Rng + ?Sized>(
    rng: &mut R,
    end: NaiveDate,
    days: usize,
) -> Result<Vec<UsageRecord>> {
    let mut usage = Vec::new();
    usage.extend(generate_normal_usage(rng, "RAW-OAK-1X6", end, days, 6.0, 2.0)?);
    usage.extend(generate_normal_usage(rng, "RAW-SCREW-8", end, days, 40.0, 12.0)?);
    usage.extend(generate_step_usage("RAW-VARNISH", end, days, days / 2, 1.0, 3.0));
    usage.extend(generate_normal_usage(rng, "FIN-COINBANK", end, days, 2.0, 1.0)?);
    Ok(usage)
}
