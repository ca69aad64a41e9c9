// src/io/reporting.rs

use std::fs::File;
use std::io::Write;
use std::path::Path;
use tracing::info;

use crate::error::Result;
use crate::planning::engine::ForecastRow;

pub const REPORT_HEADERS: [&str; 11] = [
    "SKU",
    "Item",
    "Category",
    "Location",
    "OnHand",
    "AvgDailyUsage",
    "LeadTimeDays",
    "SafetyStock",
    "ROP",
    "DaysCover",
    "Status",
];

/// Writes one header row and one row per item.
///
/// Every field is double-quoted, embedded quotes are doubled, and line
/// breaks inside a field become spaces so each item stays on one line.
pub fn write_forecast_report<W: Write>(writer: W, rows: &[ForecastRow]) -> Result<()> {
    let mut wtr = csv::WriterBuilder::new()
        .quote_style(csv::QuoteStyle::Always)
        .from_writer(writer);

    wtr.write_record(REPORT_HEADERS)?;

    for row in rows {
        let f = &row.forecast;
        wtr.write_record([
            flatten(&row.sku),
            flatten(&row.name),
            flatten(&row.category.to_string()),
            flatten(row.location.as_deref().unwrap_or("")),
            row.on_hand.to_string(),
            format!("{:.2}", f.avg_daily_usage),
            row.lead_time_days.to_string(),
            row.safety_stock.to_string(),
            f.reorder_point.to_string(),
            f.days_cover.to_string(),
            f.status.label().to_string(),
        ])?;
    }

    // Flush the buffer to ensure all data is written
    wtr.flush()?;
    Ok(())
}

/// Writes the report to a file, replacing it if it exists.
pub fn write_report_file(path: &Path, rows: &[ForecastRow]) -> Result<()> {
    let file = File::create(path)?;
    write_forecast_report(file, rows)?;
    info!(rows = rows.len(), path = %path.display(), "forecast report exported");
    Ok(())
}

fn flatten(value: &str) -> String {
    value.replace(['\r', '\n'], " ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::forecast::{DaysCover, StockStatus};
    use crate::model::Category;
    use crate::planning::engine::DerivedForecast;

    fn row(name: &str, location: Option<&str>, days_cover: DaysCover) -> ForecastRow {
        ForecastRow {
            sku: "OAK-1".to_string(),
            name: name.to_string(),
            category: Category::Raw,
            location: location.map(str::to_string),
            on_hand: 12.0,
            lead_time_days: 5.0,
            safety_stock: 4.0,
            max_level: None,
            forecast: DerivedForecast {
                avg_daily_usage: 1.0 / 3.0,
                reorder_point: 6.0,
                days_cover,
                projected_trajectory: Vec::new(),
                status: StockStatus::Ok,
                suggested_order_qty: 0,
                days_to_reorder_point: Some(18),
                eta_reorder_date: None,
            },
        }
    }

    fn render(rows: &[ForecastRow]) -> String {
        let mut out = Vec::new();
        write_forecast_report(&mut out, rows).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn header_only_for_no_rows() {
        let text = render(&[]);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(
            lines,
            vec![
                "\"SKU\",\"Item\",\"Category\",\"Location\",\"OnHand\",\"AvgDailyUsage\",\
                 \"LeadTimeDays\",\"SafetyStock\",\"ROP\",\"DaysCover\",\"Status\""
            ]
        );
    }

    #[test]
    fn quotes_every_field_and_formats_numbers() {
        let text = render(&[row("Oak board", Some("Shelf A"), DaysCover::Days(36.0))]);
        let line = text.lines().nth(1).unwrap();
        assert_eq!(
            line,
            "\"OAK-1\",\"Oak board\",\"raw\",\"Shelf A\",\"12\",\"0.33\",\"5\",\"4\",\"6\",\"36.0\",\"OK\""
        );
    }

    #[test]
    fn escapes_quotes_and_newlines() {
        let text = render(&[row("2\" dowel\nbirch", None, DaysCover::Infinite)]);
        assert_eq!(text.lines().count(), 2);
        let line = text.lines().nth(1).unwrap();
        assert!(line.contains("\"2\"\" dowel birch\""));
        assert!(line.contains("\"\",\"12\""));
        assert!(line.contains("\"∞\""));
    }
}
