// src/model/usage.rs

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A single day of consumption for one SKU.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UsageRecord {
    pub sku: String,
    pub date: NaiveDate,
    #[serde(alias = "qtyUsed")]
    pub qty_used: f64,
}

impl UsageRecord {
    pub fn new(sku: impl Into<String>, date: NaiveDate, qty_used: f64) -> Self {
        Self {
            sku: sku.into(),
            date,
            qty_used,
        }
    }
}

/// Usage records bucketed by SKU.
#[derive(Debug, Clone, Default)]
pub struct UsageHistory {
    by_sku: HashMap<String, Vec<UsageRecord>>,
}

impl UsageHistory {
    pub fn from_records(records: &[UsageRecord]) -> Self {
        let mut by_sku: HashMap<String, Vec<UsageRecord>> = HashMap::new();
        for record in records {
            by_sku
                .entry(record.sku.clone())
                .or_default()
                .push(record.clone());
        }
        Self { by_sku }
    }

    /// History for one SKU; empty when the SKU has never been used.
    pub fn for_sku(&self, sku: &str) -> &[UsageRecord] {
        self.by_sku.get(sku).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn skus(&self) -> impl Iterator<Item = &str> {
        self.by_sku.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.by_sku.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.by_sku.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, d).unwrap()
    }

    #[test]
    fn groups_records_by_sku() {
        let records = vec![
            UsageRecord::new("A", day(1), 2.0),
            UsageRecord::new("B", day(1), 5.0),
            UsageRecord::new("A", day(2), 3.0),
        ];
        let history = UsageHistory::from_records(&records);

        assert_eq!(history.for_sku("A").len(), 2);
        assert_eq!(history.for_sku("B").len(), 1);
        assert!(history.for_sku("missing").is_empty());
        assert_eq!(history.len(), 3);
    }
}
