// src/planning/engine.rs

use chrono::NaiveDate;
use serde::Serialize;
use tracing::{debug, info};

use crate::forecast::calculator::{
    days_of_cover, days_to_reorder_point, eta_reorder_date, project_on_hand, resolve_reorder_point,
    sanitize, suggested_order_qty, DaysCover, ProjectedPoint,
};
use crate::forecast::estimator::UsageEstimator;
use crate::forecast::status::{classify_status, rank_by_severity, StockStatus};
use crate::model::{Category, InventoryItem, UsageHistory, UsageRecord};
use crate::planning::config::ForecastConfig;

/// Everything derived for one item. Recomputed on every run, never cached.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DerivedForecast {
    pub avg_daily_usage: f64,
    pub reorder_point: f64,
    pub days_cover: DaysCover,
    pub projected_trajectory: Vec<ProjectedPoint>,
    pub status: StockStatus,
    pub suggested_order_qty: u64,
    pub days_to_reorder_point: Option<u64>,
    pub eta_reorder_date: Option<NaiveDate>,
}

/// An item together with its forecast; one per input item.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ForecastRow {
    pub sku: String,
    pub name: String,
    pub category: Category,
    pub location: Option<String>,
    pub on_hand: f64,
    pub lead_time_days: f64,
    pub safety_stock: f64,
    pub max_level: Option<f64>,
    pub forecast: DerivedForecast,
}

/// Plain data handed to the engine. The host owns fetching and caching.
#[derive(Debug, Clone, Default)]
pub struct InventorySnapshot {
    pub items: Vec<InventoryItem>,
    pub usage: Vec<UsageRecord>,
}

/// Dashboard counters over a forecast run.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct InventorySummary {
    pub total_items: usize,
    pub reorder_now: usize,
    pub overstock: usize,
    pub ok: usize,
    /// Above the reorder point but within `approaching_factor * ROP`.
    pub approaching_reorder: usize,
    pub total_suggested_qty: u64,
}

#[derive(Debug)]
pub struct ForecastEngine {
    config: ForecastConfig,
    estimator: Box<dyn UsageEstimator>,
}

impl ForecastEngine {
    pub fn new(config: ForecastConfig, estimator: Box<dyn UsageEstimator>) -> Self {
        Self { config, estimator }
    }

    pub fn config(&self) -> &ForecastConfig {
        &self.config
    }

    /// Derives the forecast for one item from its own usage history.
    pub fn forecast_item(
        &self,
        item: &InventoryItem,
        history: &[UsageRecord],
        today: NaiveDate,
    ) -> DerivedForecast {
        let on_hand = sanitize(item.quantity_on_hand);
        let max_level = item.max_level();

        // Backend-supplied values win over derived ones.
        let avg_daily_usage = match item.avg_daily_usage {
            Some(avg) => sanitize(avg),
            None => sanitize(self.estimator.estimate(history)),
        };
        let reorder_point = resolve_reorder_point(
            item.reorder_point,
            avg_daily_usage,
            item.lead_time_days,
            item.safety_stock,
        );

        let days_to_rop = days_to_reorder_point(on_hand, reorder_point, avg_daily_usage);

        DerivedForecast {
            avg_daily_usage,
            reorder_point,
            days_cover: days_of_cover(on_hand, avg_daily_usage),
            projected_trajectory: project_on_hand(
                on_hand,
                avg_daily_usage,
                self.config.horizon_days,
            ),
            status: classify_status(on_hand, reorder_point, max_level),
            suggested_order_qty: suggested_order_qty(
                on_hand,
                reorder_point,
                item.safety_stock,
                max_level,
            ),
            days_to_reorder_point: days_to_rop,
            eta_reorder_date: eta_reorder_date(today, days_to_rop),
        }
    }

    /// Forecasts every item in the snapshot and ranks the result by severity.
    ///
    /// Output has exactly one row per input item. The sort is stable, so
    /// items of equal severity keep their input order.
    pub fn run(&self, snapshot: &InventorySnapshot, today: NaiveDate) -> Vec<ForecastRow> {
        let history = UsageHistory::from_records(&snapshot.usage);

        let orphaned = history
            .skus()
            .filter(|sku| !snapshot.items.iter().any(|item| item.sku == *sku))
            .count();
        if orphaned > 0 {
            debug!(orphaned, "usage records reference unknown SKUs; ignoring them");
        }

        let mut rows: Vec<ForecastRow> = snapshot
            .items
            .iter()
            .map(|item| ForecastRow {
                sku: item.sku.clone(),
                name: item.name.clone(),
                category: item.category.clone(),
                location: item.location.clone(),
                on_hand: sanitize(item.quantity_on_hand),
                lead_time_days: sanitize(item.lead_time_days),
                safety_stock: sanitize(item.safety_stock),
                max_level: item.max_level(),
                forecast: self.forecast_item(item, history.for_sku(&item.sku), today),
            })
            .collect();

        rank_by_severity(&mut rows, |row| row.forecast.status);

        info!(
            items = rows.len(),
            usage_records = history.len(),
            estimator = self.estimator.name(),
            "forecast computed"
        );
        rows
    }

    pub fn summarize(&self, rows: &[ForecastRow]) -> InventorySummary {
        let mut summary = InventorySummary {
            total_items: rows.len(),
            ..InventorySummary::default()
        };

        for row in rows {
            let f = &row.forecast;
            match f.status {
                StockStatus::ReorderNow => summary.reorder_now += 1,
                StockStatus::Overstock => summary.overstock += 1,
                StockStatus::Ok => summary.ok += 1,
            }
            if row.on_hand > f.reorder_point
                && row.on_hand <= f.reorder_point * self.config.approaching_factor
            {
                summary.approaching_reorder += 1;
            }
            summary.total_suggested_qty = summary
                .total_suggested_qty
                .saturating_add(f.suggested_order_qty);
        }
        summary
    }
}
