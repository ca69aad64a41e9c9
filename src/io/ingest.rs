// src/io/ingest.rs

//! Loading inventory and usage exports.
//!
//! This is the validation boundary: negative or non-finite numbers and
//! malformed dates are rejected here with the offending row, so the
//! calculator only ever sees clean data.

use chrono::NaiveDate;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::{debug, info};

use crate::error::{ForecastError, Result};
use crate::model::item::check_quantity;
use crate::model::{InventoryItem, UsageRecord};
use crate::planning::engine::InventorySnapshot;

/// Reads inventory items from a `.csv` or `.json` file.
pub fn load_inventory(path: &Path) -> Result<Vec<InventoryItem>> {
    let file = File::open(path)?;
    let items = match extension(path).as_deref() {
        Some("csv") => read_inventory_csv(file)?,
        Some("json") => read_inventory_json(file)?,
        _ => return Err(ForecastError::UnsupportedFormat(path.display().to_string())),
    };
    info!(path = %path.display(), items = items.len(), "inventory loaded");
    Ok(items)
}

/// Reads usage records from a CSV file with headers `sku,date,qtyUsed`.
pub fn load_usage(path: &Path) -> Result<Vec<UsageRecord>> {
    let records = read_usage_csv(File::open(path)?)?;
    info!(path = %path.display(), records = records.len(), "usage history loaded");
    Ok(records)
}

pub fn load_snapshot(inventory: &Path, usage: Option<&Path>) -> Result<InventorySnapshot> {
    let items = load_inventory(inventory)?;
    let usage = match usage {
        Some(path) => load_usage(path)?,
        None => Vec::new(),
    };
    Ok(InventorySnapshot { items, usage })
}

pub fn read_inventory_csv<R: Read>(reader: R) -> Result<Vec<InventoryItem>> {
    let mut rdr = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut items = Vec::new();
    for (i, result) in rdr.deserialize::<InventoryItem>().enumerate() {
        let item = result?;
        item.validate(i + 1)?;
        items.push(item);
    }
    Ok(items)
}

pub fn read_inventory_json<R: Read>(reader: R) -> Result<Vec<InventoryItem>> {
    let items: Vec<InventoryItem> = serde_json::from_reader(reader)?;
    for (i, item) in items.iter().enumerate() {
        item.validate(i + 1)?;
    }
    Ok(items)
}

/// Header names are matched case-insensitively; column order is free.
/// An empty quantity counts as zero usage.
pub fn read_usage_csv<R: Read>(reader: R) -> Result<Vec<UsageRecord>> {
    let mut rdr = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(reader);

    let headers: Vec<String> = rdr
        .headers()?
        .iter()
        .map(|h| h.trim().to_lowercase())
        .collect();
    let column = |name: &'static str| {
        headers
            .iter()
            .position(|h| h == name)
            .ok_or(ForecastError::MissingColumn(name))
    };
    let sku_idx = column("sku")?;
    let date_idx = column("date")?;
    let qty_idx = column("qtyused")?;

    let mut records = Vec::new();
    for (i, result) in rdr.records().enumerate() {
        let row = i + 1;
        let record = result?;

        let sku = record.get(sku_idx).unwrap_or("");
        if sku.is_empty() {
            return Err(ForecastError::EmptySku { row });
        }
        let date = parse_date(record.get(date_idx).unwrap_or(""), row)?;
        let qty_used = parse_quantity("qtyUsed", record.get(qty_idx).unwrap_or(""), row)?;

        records.push(UsageRecord::new(sku, date, qty_used));
    }
    debug!(records = records.len(), "usage CSV parsed");
    Ok(records)
}

fn parse_date(raw: &str, row: usize) -> Result<NaiveDate> {
    // Accept full timestamps by keeping only the calendar date.
    let day = raw.split('T').next().unwrap_or(raw);
    NaiveDate::parse_from_str(day, "%Y-%m-%d").map_err(|_| ForecastError::InvalidDate {
        row,
        value: raw.to_string(),
    })
}

fn parse_quantity(field: &'static str, raw: &str, row: usize) -> Result<f64> {
    if raw.is_empty() {
        return Ok(0.0);
    }
    let value: f64 = raw.parse().map_err(|_| ForecastError::InvalidNumber {
        field,
        row,
        value: raw.to_string(),
    })?;
    check_quantity(field, row, value)?;
    Ok(value)
}

fn extension(path: &Path) -> Option<String> {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_ascii_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Category;

    #[test]
    fn usage_headers_are_case_insensitive() {
        let data = "Date, SKU ,QTYUSED\n2024-01-02,OAK,3\n2024-01-01,OAK,\n";
        let records = read_usage_csv(data.as_bytes()).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].sku, "OAK");
        assert_eq!(records[0].qty_used, 3.0);
        assert_eq!(records[1].qty_used, 0.0);
        assert_eq!(records[1].date, NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());
    }

    #[test]
    fn usage_requires_all_headers() {
        let data = "sku,date\nOAK,2024-01-01\n";
        assert!(matches!(
            read_usage_csv(data.as_bytes()),
            Err(ForecastError::MissingColumn("qtyused"))
        ));
    }

    #[test]
    fn usage_rejects_negative_quantity() {
        let data = "sku,date,qtyUsed\nOAK,2024-01-01,4\nOAK,2024-01-02,-2\n";
        assert!(matches!(
            read_usage_csv(data.as_bytes()),
            Err(ForecastError::InvalidNumber { row: 2, .. })
        ));
    }

    #[test]
    fn usage_rejects_bad_dates_and_nan() {
        let data = "sku,date,qtyUsed\nOAK,01/02/2024,4\n";
        assert!(matches!(
            read_usage_csv(data.as_bytes()),
            Err(ForecastError::InvalidDate { row: 1, .. })
        ));

        let data = "sku,date,qtyUsed\nOAK,2024-01-02,NaN\n";
        assert!(read_usage_csv(data.as_bytes()).is_err());
    }

    #[test]
    fn usage_accepts_timestamps() {
        let data = "sku,date,qtyUsed\nOAK,2024-01-02T08:30:00Z,1.5\n";
        let records = read_usage_csv(data.as_bytes()).unwrap();
        assert_eq!(records[0].date, NaiveDate::from_ymd_opt(2024, 1, 2).unwrap());
    }

    #[test]
    fn inventory_csv_with_optional_columns() {
        let data = "\
sku,name,category,location,quantity_on_hand,lead_time_days,safety_stock,max_level,reorder_point
OAK-1,Oak board,Raw Material,Shelf A,12,5,4,,
VARN,Varnish,raw,,3,2,1,20,8
";
        let items = read_inventory_csv(data.as_bytes()).unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].category, Category::Raw);
        assert_eq!(items[0].location.as_deref(), Some("Shelf A"));
        assert_eq!(items[0].max_level, None);
        assert_eq!(items[0].reorder_point, None);
        assert_eq!(items[1].location, None);
        assert_eq!(items[1].reorder_point, Some(8.0));
        assert_eq!(items[1].avg_daily_usage, None);
    }

    #[test]
    fn inventory_csv_rejects_negative_stock() {
        let data = "sku,quantity_on_hand\nOAK,-4\n";
        assert!(matches!(
            read_inventory_csv(data.as_bytes()),
            Err(ForecastError::InvalidNumber {
                field: "quantity_on_hand",
                ..
            })
        ));
    }

    #[test]
    fn inventory_json_array() {
        let data = r#"[{"sku":"A","quantity_on_hand":5,"reorder_point":10},
                       {"sku":"B","quantityOnHand":7,"category":"finished"}]"#;
        let items = read_inventory_json(data.as_bytes()).unwrap();
        assert_eq!(items[0].reorder_point, Some(10.0));
        assert_eq!(items[1].category, Category::Finished);
    }

    #[test]
    fn unknown_extension_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("inventory.xlsx");
        std::fs::write(&path, "").unwrap();
        assert!(matches!(
            load_inventory(&path),
            Err(ForecastError::UnsupportedFormat(_))
        ));
    }
}
