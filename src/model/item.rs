// src/model/item.rs

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{ForecastError, Result};

/// Item category. Free text upstream, so it is matched loosely.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Category {
    Raw,
    Finished,
    Other(String),
}

impl From<String> for Category {
    fn from(value: String) -> Self {
        let lower = value.trim().to_lowercase();
        if lower.contains("raw") {
            Category::Raw
        } else if lower.contains("finished") {
            Category::Finished
        } else if lower.is_empty() {
            Category::default()
        } else {
            Category::Other(value.trim().to_string())
        }
    }
}

impl From<Category> for String {
    fn from(category: Category) -> Self {
        category.to_string()
    }
}

impl Default for Category {
    fn default() -> Self {
        Category::Other("unspecified".to_string())
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Category::Raw => f.write_str("raw"),
            Category::Finished => f.write_str("finished"),
            Category::Other(s) => f.write_str(s),
        }
    }
}

/// One inventory line as exported by the inventory API.
///
/// `reorder_point` and `avg_daily_usage` are optional backend overrides:
/// when present they win over the values the calculator would derive.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InventoryItem {
    pub sku: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub category: Category,
    #[serde(default)]
    pub location: Option<String>,

    #[serde(alias = "quantityOnHand", alias = "quantity")]
    pub quantity_on_hand: f64,
    #[serde(default, alias = "leadTimeDays")]
    pub lead_time_days: f64,
    #[serde(default, alias = "safetyStock")]
    pub safety_stock: f64,

    // Upstream stores 0 for "no ceiling"; see `max_level()`.
    #[serde(default, alias = "maxLevel")]
    pub max_level: Option<f64>,
    #[serde(default, alias = "reorderPoint")]
    pub reorder_point: Option<f64>,
    #[serde(default, alias = "avgDailyUsage")]
    pub avg_daily_usage: Option<f64>,
}

impl InventoryItem {
    pub fn new(sku: impl Into<String>, quantity_on_hand: f64) -> Self {
        Self {
            sku: sku.into(),
            name: String::new(),
            category: Category::default(),
            location: None,
            quantity_on_hand,
            lead_time_days: 0.0,
            safety_stock: 0.0,
            max_level: None,
            reorder_point: None,
            avg_daily_usage: None,
        }
    }

    /// The overstock ceiling, treating a stored 0 as unset.
    pub fn max_level(&self) -> Option<f64> {
        self.max_level.filter(|m| *m > 0.0)
    }

    /// Rejects negative or non-finite numbers before they reach the calculator.
    ///
    /// `row` is the 1-based data row, used only for the error message.
    pub fn validate(&self, row: usize) -> Result<()> {
        if self.sku.trim().is_empty() {
            return Err(ForecastError::EmptySku { row });
        }
        check_quantity("quantity_on_hand", row, self.quantity_on_hand)?;
        check_quantity("lead_time_days", row, self.lead_time_days)?;
        check_quantity("safety_stock", row, self.safety_stock)?;
        if let Some(v) = self.max_level {
            check_quantity("max_level", row, v)?;
        }
        if let Some(v) = self.reorder_point {
            check_quantity("reorder_point", row, v)?;
        }
        if let Some(v) = self.avg_daily_usage {
            check_quantity("avg_daily_usage", row, v)?;
        }
        Ok(())
    }
}

pub(crate) fn check_quantity(field: &'static str, row: usize, value: f64) -> Result<()> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ForecastError::InvalidNumber {
            field,
            row,
            value: value.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_is_matched_loosely() {
        assert_eq!(Category::from("Raw Material".to_string()), Category::Raw);
        assert_eq!(Category::from(" finished goods".to_string()), Category::Finished);
        assert_eq!(
            Category::from("Consumable".to_string()),
            Category::Other("Consumable".to_string())
        );
        assert_eq!(Category::from(String::new()), Category::default());
    }

    #[test]
    fn zero_max_level_means_unset() {
        let mut item = InventoryItem::new("PLY-001", 10.0);
        item.max_level = Some(0.0);
        assert_eq!(item.max_level(), None);
        item.max_level = Some(40.0);
        assert_eq!(item.max_level(), Some(40.0));
    }

    #[test]
    fn validate_rejects_negative_and_nan() {
        let mut item = InventoryItem::new("PLY-001", -1.0);
        assert!(matches!(
            item.validate(3),
            Err(ForecastError::InvalidNumber {
                field: "quantity_on_hand",
                row: 3,
                ..
            })
        ));

        item.quantity_on_hand = 5.0;
        item.lead_time_days = f64::NAN;
        assert!(item.validate(1).is_err());

        item.lead_time_days = 3.0;
        assert!(item.validate(1).is_ok());
    }

    #[test]
    fn validate_rejects_blank_sku() {
        let item = InventoryItem::new("  ", 1.0);
        assert!(matches!(item.validate(7), Err(ForecastError::EmptySku { row: 7 })));
    }

    #[test]
    fn deserializes_camel_case_json() {
        let json = r#"{"sku":"NAIL-2IN","name":"Nails","category":"raw","quantityOnHand":120,
                       "leadTimeDays":4,"safetyStock":20,"maxLevel":500,"reorderPoint":null}"#;
        let item: InventoryItem = serde_json::from_str(json).unwrap();
        assert_eq!(item.category, Category::Raw);
        assert_eq!(item.quantity_on_hand, 120.0);
        assert_eq!(item.max_level(), Some(500.0));
        assert_eq!(item.reorder_point, None);
    }
}
