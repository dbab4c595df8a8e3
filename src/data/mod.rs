//! Dataset loading: bundled CSVs, file overrides and monthly synthesis

use crate::core::config::AppConfig;
use crate::core::history::{PricePoint, PriceSeries};
use crate::core::region::RegionMap;
use crate::core::sales::{MonthlyPurchase, SalesAggregator, SalesRow};
use anyhow::{Context, Result};
use chrono::{Month, NaiveDate};
use serde::Deserialize;
use std::fs;
use std::io::Read;
use tracing::debug;

const DEFAULT_PRICE_CSV: &str = include_str!("../../data/historical_silver_price.csv");
const DEFAULT_SALES_CSV: &str = include_str!("../../data/state_wise_silver_purchased_kg.csv");

/// Seasonal distribution of a state's annual purchases, January through
/// December. Heavier towards the festival and wedding months at the end
/// of the year.
pub const MONTHLY_WEIGHTS: [f64; 12] = [
    1.0, 0.9, 1.1, 0.95, 0.85, 0.9, 0.88, 0.92, 1.05, 1.15, 1.2, 1.3,
];

const MONTHS: [Month; 12] = [
    Month::January,
    Month::February,
    Month::March,
    Month::April,
    Month::May,
    Month::June,
    Month::July,
    Month::August,
    Month::September,
    Month::October,
    Month::November,
    Month::December,
];

#[derive(Debug, Deserialize)]
struct PriceCsvRow {
    #[serde(rename = "Year")]
    year: i32,
    #[serde(rename = "Month")]
    month: String,
    #[serde(rename = "Silver_Price_INR_per_kg")]
    price_inr_per_kg: f64,
}

#[derive(Debug, Deserialize)]
struct SalesCsvRow {
    #[serde(rename = "State")]
    state: String,
    #[serde(rename = "Silver_Purchased_kg")]
    purchased_kg: f64,
}

/// Loads the historical price series, from the configured file when one
/// is set and from the bundled dataset otherwise.
pub fn load_price_series(config: &AppConfig) -> Result<PriceSeries> {
    match &config.price_data_path {
        Some(path) => {
            debug!("Loading price history from {path}");
            let file = fs::File::open(path)
                .with_context(|| format!("Failed to open price data file: {path}"))?;
            parse_price_series(file).with_context(|| format!("Invalid price data in {path}"))
        }
        None => {
            debug!("Loading bundled price history");
            parse_price_series(DEFAULT_PRICE_CSV.as_bytes()).context("Invalid bundled price data")
        }
    }
}

/// Loads the state-wise sales table and attaches a synthesized monthly
/// series for the configured monthly-data state.
///
/// A table without that state still loads; month-level queries for it
/// then fail with `UnknownState` at lookup time.
pub fn load_sales(config: &AppConfig, regions: RegionMap) -> Result<SalesAggregator> {
    let rows = match &config.sales_data_path {
        Some(path) => {
            debug!("Loading sales table from {path}");
            let file = fs::File::open(path)
                .with_context(|| format!("Failed to open sales data file: {path}"))?;
            parse_sales_rows(file).with_context(|| format!("Invalid sales data in {path}"))?
        }
        None => {
            debug!("Loading bundled sales table");
            parse_sales_rows(DEFAULT_SALES_CSV.as_bytes()).context("Invalid bundled sales data")?
        }
    };

    let mut sales = SalesAggregator::new(rows, regions)?;
    let state = &config.monthly_state;
    let annual_kg = sales
        .records()
        .iter()
        .find(|r| &r.state == state)
        .map(|r| r.purchased_kg);
    match annual_kg {
        Some(annual_kg) => {
            sales.attach_monthly(state, synthesize_monthly(annual_kg))?;
            debug!("Attached synthesized monthly series for {state}");
        }
        None => {
            debug!("Monthly-data state {state} is not in the sales table, skipping synthesis");
        }
    }
    Ok(sales)
}

/// Distributes an annual quantity over twelve months using
/// [`MONTHLY_WEIGHTS`]. The series sums back to the annual total up to
/// float rounding.
pub fn synthesize_monthly(annual_kg: f64) -> Vec<MonthlyPurchase> {
    let weight_sum: f64 = MONTHLY_WEIGHTS.iter().sum();
    MONTHS
        .iter()
        .zip(MONTHLY_WEIGHTS.iter())
        .map(|(&month, &weight)| MonthlyPurchase {
            month,
            purchased_kg: annual_kg * weight / weight_sum,
        })
        .collect()
}

fn parse_price_series<R: Read>(reader: R) -> Result<PriceSeries> {
    let mut csv_reader = csv::Reader::from_reader(reader);
    let mut points = Vec::new();
    for (index, row) in csv_reader.deserialize().enumerate() {
        let line = index + 2;
        let row: PriceCsvRow =
            row.with_context(|| format!("Failed to parse price row at line {line}"))?;
        let date = NaiveDate::parse_from_str(
            &format!("{}-{}-01", row.year, row.month),
            "%Y-%b-%d",
        )
        .with_context(|| {
            format!("Invalid month {:?} at line {line}", row.month)
        })?;
        points.push(PricePoint {
            date,
            price_per_kg: row.price_inr_per_kg,
        });
    }
    let series = PriceSeries::new(points)?;
    debug!("Loaded {} price points", series.len());
    Ok(series)
}

fn parse_sales_rows<R: Read>(reader: R) -> Result<Vec<SalesRow>> {
    let mut csv_reader = csv::Reader::from_reader(reader);
    let mut rows = Vec::new();
    for (index, row) in csv_reader.deserialize().enumerate() {
        let row: SalesCsvRow =
            row.with_context(|| format!("Failed to parse sales row at line {}", index + 2))?;
        rows.push(SalesRow {
            state: row.state,
            purchased_kg: row.purchased_kg,
        });
    }
    debug!("Loaded {} sales rows", rows.len());
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error::CoreError;
    use crate::core::history::PriceBand;

    #[test]
    fn test_parse_price_series() {
        let csv = "Year,Month,Silver_Price_INR_per_kg\n\
                   2024,Jan,41000\n\
                   2024,Feb,41500\n\
                   2024,Mar,40800\n";
        let series = parse_price_series(csv.as_bytes()).unwrap();

        assert_eq!(series.len(), 3);
        let first = series.first().unwrap();
        assert_eq!(first.date, NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());
        assert_eq!(first.price_per_kg, 41000.0);
        assert_eq!(
            series.latest().unwrap().date,
            NaiveDate::from_ymd_opt(2024, 3, 1).unwrap()
        );
    }

    #[test]
    fn test_parse_price_series_rejects_malformed_row() {
        let csv = "Year,Month,Silver_Price_INR_per_kg\n\
                   2024,Jan,not-a-number\n";
        let err = parse_price_series(csv.as_bytes()).unwrap_err();
        assert!(err.to_string().contains("line 2"));
    }

    #[test]
    fn test_parse_price_series_rejects_unknown_month() {
        let csv = "Year,Month,Silver_Price_INR_per_kg\n\
                   2024,Janvier,41000\n";
        let err = parse_price_series(csv.as_bytes()).unwrap_err();
        assert!(err.to_string().contains("Janvier"));
    }

    #[test]
    fn test_parse_price_series_rejects_out_of_order_months() {
        let csv = "Year,Month,Silver_Price_INR_per_kg\n\
                   2024,Feb,41500\n\
                   2024,Jan,41000\n";
        assert!(parse_price_series(csv.as_bytes()).is_err());
    }

    #[test]
    fn test_bundled_price_history() {
        let series = parse_price_series(DEFAULT_PRICE_CSV.as_bytes()).unwrap();

        assert_eq!(series.len(), 312);
        assert_eq!(
            series.first().unwrap().date,
            NaiveDate::from_ymd_opt(2000, 1, 1).unwrap()
        );
        let latest = series.latest().unwrap();
        assert_eq!(latest.date, NaiveDate::from_ymd_opt(2025, 12, 1).unwrap());
        assert_eq!(latest.price_per_kg, 43100.0);

        for band in PriceBand::ALL {
            assert!(
                !series.filter_by_band(band).is_empty(),
                "bundled history should cover the {band} band"
            );
        }
    }

    #[test]
    fn test_bundled_sales_table() {
        let rows = parse_sales_rows(DEFAULT_SALES_CSV.as_bytes()).unwrap();
        assert_eq!(rows.len(), 31);

        let total: f64 = rows.iter().map(|r| r.purchased_kg).sum();
        assert_eq!(total, 217_100.0);

        // Every bundled state must resolve to a region.
        let sales = SalesAggregator::new(rows, RegionMap::new()).unwrap();
        assert_eq!(sales.state_count(), 31);
    }

    #[test]
    fn test_synthesize_monthly() {
        let series = synthesize_monthly(16800.0);

        assert_eq!(series.len(), 12);
        let sum: f64 = series.iter().map(|m| m.purchased_kg).sum();
        assert!((sum - 16800.0).abs() < 1e-6);

        let peak = series
            .iter()
            .max_by(|a, b| a.purchased_kg.total_cmp(&b.purchased_kg))
            .unwrap();
        assert_eq!(peak.month, Month::December);
        let low = series
            .iter()
            .min_by(|a, b| a.purchased_kg.total_cmp(&b.purchased_kg))
            .unwrap();
        assert_eq!(low.month, Month::May);
    }

    #[test]
    fn test_load_sales_attaches_monthly_series() {
        let sales = load_sales(&AppConfig::default(), RegionMap::new()).unwrap();

        let monthly = sales.monthly_series("Karnataka").unwrap();
        assert_eq!(monthly.len(), 12);

        assert_eq!(
            sales.monthly_series("Maharashtra").unwrap_err(),
            CoreError::NoMonthlyData("Maharashtra".to_string())
        );
    }

    #[test]
    fn test_load_sales_skips_missing_monthly_state() {
        let config = AppConfig {
            monthly_state: "Atlantis".to_string(),
            ..AppConfig::default()
        };
        let sales = load_sales(&config, RegionMap::new()).unwrap();

        assert_eq!(sales.state_count(), 31);
        assert_eq!(
            sales.monthly_series("Atlantis").unwrap_err(),
            CoreError::UnknownState("Atlantis".to_string())
        );
        // Nothing was attached, so even the default state has no series.
        assert_eq!(
            sales.monthly_series("Karnataka").unwrap_err(),
            CoreError::NoMonthlyData("Karnataka".to_string())
        );
    }
}
