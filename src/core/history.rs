//! Historical price series store, band filtering and statistics

use crate::core::error::CoreError;
use chrono::NaiveDate;
use std::fmt::Display;
use std::str::FromStr;

/// Band thresholds in INR per kg. A price exactly at the lower threshold is
/// low, exactly at the upper threshold is high; the mid band is everything
/// strictly between them, so no point is ever counted twice.
const LOW_BAND_MAX: f64 = 20_000.0;
const HIGH_BAND_MIN: f64 = 30_000.0;

/// One month of the historical series.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PricePoint {
    /// First day of the month the price was recorded for.
    pub date: NaiveDate,
    pub price_per_kg: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd)]
pub enum PriceBand {
    Low,
    Mid,
    High,
}

impl PriceBand {
    pub const ALL: [PriceBand; 3] = [PriceBand::Low, PriceBand::Mid, PriceBand::High];

    /// Assigns a price to exactly one band.
    pub fn classify(price_per_kg: f64) -> PriceBand {
        if price_per_kg <= LOW_BAND_MAX {
            PriceBand::Low
        } else if price_per_kg >= HIGH_BAND_MIN {
            PriceBand::High
        } else {
            PriceBand::Mid
        }
    }

    /// Human-readable price range covered by this band.
    pub fn range_label(&self) -> &'static str {
        match self {
            PriceBand::Low => "≤ ₹20,000/kg",
            PriceBand::Mid => "₹20,000 – ₹30,000/kg",
            PriceBand::High => "≥ ₹30,000/kg",
        }
    }
}

impl Display for PriceBand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                PriceBand::Low => "Low",
                PriceBand::Mid => "Mid",
                PriceBand::High => "High",
            }
        )
    }
}

impl FromStr for PriceBand {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "low" => Ok(PriceBand::Low),
            "mid" | "medium" => Ok(PriceBand::Mid),
            "high" => Ok(PriceBand::High),
            _ => Err(CoreError::InvalidInput(format!("unknown price band: {s}"))),
        }
    }
}

/// Aggregate metrics over a (possibly filtered) run of price points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PriceStats {
    pub min: f64,
    pub max: f64,
    pub mean: f64,
    /// Change from the chronologically first to the last point, in percent.
    pub pct_change: f64,
}

/// Immutable snapshot of the monthly price history.
///
/// Built once at load time; every query works on the same snapshot, so
/// results are reproducible for the lifetime of the process.
#[derive(Debug, Clone)]
pub struct PriceSeries {
    points: Vec<PricePoint>,
}

impl PriceSeries {
    /// Wraps an ordered series of monthly prices.
    ///
    /// Dates must be strictly increasing and every price positive; the
    /// loader is expected to hand over validated rows, and anything else is
    /// rejected here with `InvalidInput`.
    pub fn new(points: Vec<PricePoint>) -> Result<Self, CoreError> {
        if let Some(w) = points.windows(2).find(|w| w[1].date <= w[0].date) {
            return Err(CoreError::InvalidInput(format!(
                "price series dates must be strictly increasing, {} follows {}",
                w[1].date, w[0].date
            )));
        }
        if let Some(p) = points
            .iter()
            .find(|p| !(p.price_per_kg.is_finite() && p.price_per_kg > 0.0))
        {
            return Err(CoreError::InvalidInput(format!(
                "price for {} must be positive, got {}",
                p.date, p.price_per_kg
            )));
        }
        Ok(Self { points })
    }

    pub fn points(&self) -> &[PricePoint] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn first(&self) -> Option<PricePoint> {
        self.points.first().copied()
    }

    pub fn latest(&self) -> Option<PricePoint> {
        self.points.last().copied()
    }

    /// Per-gram price of the most recent month, used to seed the calculator.
    pub fn latest_price_per_gram(&self) -> Option<f64> {
        self.latest().map(|p| p.price_per_kg / 1000.0)
    }

    /// Sub-series of the points falling in `band`, original order preserved.
    pub fn filter_by_band(&self, band: PriceBand) -> Vec<PricePoint> {
        self.points
            .iter()
            .filter(|p| PriceBand::classify(p.price_per_kg) == band)
            .copied()
            .collect()
    }

    /// Filter by band, then compute statistics over the matching points.
    pub fn band_statistics(&self, band: PriceBand) -> Result<PriceStats, CoreError> {
        statistics(&self.filter_by_band(band))
    }
}

/// Computes min/max/mean and first-to-last percent change over a series.
///
/// Works on any sub-sequence (typically a band filter result). Fails with
/// `EmptySeries` when there is nothing to aggregate; a single point yields
/// a zero percent change.
pub fn statistics(points: &[PricePoint]) -> Result<PriceStats, CoreError> {
    let (first, last) = match (points.first(), points.last()) {
        (Some(first), Some(last)) => (first, last),
        _ => return Err(CoreError::EmptySeries),
    };
    if !(first.price_per_kg.is_finite() && first.price_per_kg > 0.0) {
        return Err(CoreError::InvalidInput(format!(
            "price for {} must be positive, got {}",
            first.date, first.price_per_kg
        )));
    }

    let mut min = f64::MAX;
    let mut max = f64::MIN;
    let mut sum = 0.0;
    for point in points {
        min = min.min(point.price_per_kg);
        max = max.max(point.price_per_kg);
        sum += point.price_per_kg;
    }

    Ok(PriceStats {
        min,
        max,
        mean: sum / points.len() as f64,
        pct_change: (last.price_per_kg - first.price_per_kg) / first.price_per_kg * 100.0,
    })
}
