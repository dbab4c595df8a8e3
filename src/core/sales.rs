//! State-wise sales aggregation: totals, rankings, shares and regional rollups

use crate::core::error::CoreError;
use crate::core::region::{Region, RegionMap};
use chrono::Month;
use std::collections::{BTreeMap, HashMap, HashSet};

/// Raw loader row: one state's annual purchase quantity.
#[derive(Debug, Clone, PartialEq)]
pub struct SalesRow {
    pub state: String,
    pub purchased_kg: f64,
}

/// One state's purchases with its resolved region.
#[derive(Debug, Clone, PartialEq)]
pub struct StateRecord {
    pub state: String,
    pub purchased_kg: f64,
    pub region: Region,
}

/// One month of a state's purchase series.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MonthlyPurchase {
    pub month: Month,
    pub purchased_kg: f64,
}

/// Headline metrics shown on the sales dashboard.
#[derive(Debug, Clone, PartialEq)]
pub struct SalesSummary {
    pub total_kg: f64,
    pub state_count: usize,
    pub mean_kg: f64,
    pub top_state: Option<StateRecord>,
}

/// Seasonal metrics of one state's monthly series.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MonthlySummary {
    pub peak: MonthlyPurchase,
    pub low: MonthlyPurchase,
    pub mean_kg: f64,
    pub annual_kg: f64,
}

/// Immutable snapshot of the state-wise purchase table.
///
/// Built once from loader rows; the national total is derived at
/// construction and every query reads the same snapshot.
#[derive(Debug, Clone)]
pub struct SalesAggregator {
    records: Vec<StateRecord>,
    regions: RegionMap,
    monthly: HashMap<String, Vec<MonthlyPurchase>>,
    total_kg: f64,
}

impl SalesAggregator {
    /// Builds the table from raw rows, resolving each state's region
    /// through `regions`.
    ///
    /// Fails with `UnknownState` for a state the map does not cover,
    /// `InvalidInput` for duplicate states or negative quantities.
    pub fn new(rows: Vec<SalesRow>, regions: RegionMap) -> Result<Self, CoreError> {
        let mut records = Vec::with_capacity(rows.len());
        for row in rows {
            let region = regions.region_of(&row.state)?;
            records.push(StateRecord {
                state: row.state,
                purchased_kg: row.purchased_kg,
                region,
            });
        }
        Self::from_records(records, regions)
    }

    /// Builds the table from records that already carry region labels
    /// (datasets classified at the source). `regional_totals` still
    /// re-resolves every state through `regions`.
    pub fn from_records(
        records: Vec<StateRecord>,
        regions: RegionMap,
    ) -> Result<Self, CoreError> {
        let mut seen = HashSet::new();
        for record in &records {
            if !(record.purchased_kg.is_finite() && record.purchased_kg >= 0.0) {
                return Err(CoreError::InvalidInput(format!(
                    "purchased quantity for {} must be non-negative, got {}",
                    record.state, record.purchased_kg
                )));
            }
            if !seen.insert(record.state.clone()) {
                return Err(CoreError::InvalidInput(format!(
                    "duplicate state in sales table: {}",
                    record.state
                )));
            }
        }
        let total_kg = records.iter().map(|r| r.purchased_kg).sum();
        Ok(Self {
            records,
            regions,
            monthly: HashMap::new(),
            total_kg,
        })
    }

    pub fn records(&self) -> &[StateRecord] {
        &self.records
    }

    pub fn state_count(&self) -> usize {
        self.records.len()
    }

    /// National total across all states, derived once at construction.
    pub fn total(&self) -> f64 {
        self.total_kg
    }

    /// All records sorted by purchased quantity descending. Equal
    /// quantities are ordered by state name ascending so the ranking is
    /// deterministic.
    pub fn rank(&self) -> Vec<StateRecord> {
        let mut ranked = self.records.clone();
        ranked.sort_by(|a, b| {
            b.purchased_kg
                .total_cmp(&a.purchased_kg)
                .then_with(|| a.state.cmp(&b.state))
        });
        ranked
    }

    /// The first `n` entries of [`rank`](Self::rank). An `n` larger than
    /// the table is clamped to the table size; zero is rejected.
    pub fn top_n(&self, n: usize) -> Result<Vec<StateRecord>, CoreError> {
        if n == 0 {
            return Err(CoreError::InvalidInput(
                "top-n count must be positive".to_string(),
            ));
        }
        let mut ranked = self.rank();
        ranked.truncate(n.min(self.records.len()));
        Ok(ranked)
    }

    /// A state's purchases as a percentage of the national total, zero
    /// when the table itself sums to zero.
    pub fn percentage_share(&self, state: &str) -> Result<f64, CoreError> {
        let record = self.record(state)?;
        if self.total_kg == 0.0 {
            return Ok(0.0);
        }
        Ok(record.purchased_kg / self.total_kg * 100.0)
    }

    /// Purchase totals accumulated per region.
    ///
    /// Every record is resolved through the region map; a state the map
    /// does not know fails the whole operation instead of being skipped.
    pub fn regional_totals(&self) -> Result<BTreeMap<Region, f64>, CoreError> {
        let mut totals = BTreeMap::new();
        for record in &self.records {
            let region = self.regions.region_of(&record.state)?;
            *totals.entry(region).or_insert(0.0) += record.purchased_kg;
        }
        Ok(totals)
    }

    /// Stores a month-level purchase series for one state.
    pub fn attach_monthly(
        &mut self,
        state: &str,
        series: Vec<MonthlyPurchase>,
    ) -> Result<(), CoreError> {
        self.record(state)?;
        if let Some(entry) = series
            .iter()
            .find(|m| !(m.purchased_kg.is_finite() && m.purchased_kg >= 0.0))
        {
            return Err(CoreError::InvalidInput(format!(
                "monthly quantity for {state} in {} must be non-negative, got {}",
                entry.month.name(),
                entry.purchased_kg
            )));
        }
        self.monthly.insert(state.to_string(), series);
        Ok(())
    }

    /// The month-level series for a state, if one was loaded. States
    /// known only by their annual total answer `NoMonthlyData`.
    pub fn monthly_series(&self, state: &str) -> Result<&[MonthlyPurchase], CoreError> {
        self.record(state)?;
        self.monthly
            .get(state)
            .map(|series| series.as_slice())
            .ok_or_else(|| CoreError::NoMonthlyData(state.to_string()))
    }

    /// Headline metrics: national total, state count, per-state mean and
    /// the highest-purchasing state.
    pub fn summary(&self) -> SalesSummary {
        let state_count = self.records.len();
        let mean_kg = if state_count == 0 {
            0.0
        } else {
            self.total_kg / state_count as f64
        };
        SalesSummary {
            total_kg: self.total_kg,
            state_count,
            mean_kg,
            top_state: self.rank().into_iter().next(),
        }
    }

    /// Peak month, low month, monthly mean and annual total of a state's
    /// monthly series. Same failure modes as
    /// [`monthly_series`](Self::monthly_series).
    pub fn monthly_summary(&self, state: &str) -> Result<MonthlySummary, CoreError> {
        let series = self.monthly_series(state)?;
        let (mut peak, rest) = match series.split_first() {
            Some((first, rest)) => (*first, rest),
            None => return Err(CoreError::NoMonthlyData(state.to_string())),
        };
        let mut low = peak;
        let mut annual_kg = peak.purchased_kg;
        for month in rest {
            if month.purchased_kg > peak.purchased_kg {
                peak = *month;
            }
            if month.purchased_kg < low.purchased_kg {
                low = *month;
            }
            annual_kg += month.purchased_kg;
        }
        Ok(MonthlySummary {
            peak,
            low,
            mean_kg: annual_kg / series.len() as f64,
            annual_kg,
        })
    }

    fn record(&self, state: &str) -> Result<&StateRecord, CoreError> {
        self.records
            .iter()
            .find(|r| r.state == state)
            .ok_or_else(|| CoreError::UnknownState(state.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(state: &str, purchased_kg: f64) -> SalesRow {
        SalesRow {
            state: state.to_string(),
            purchased_kg,
        }
    }

    fn sample_aggregator() -> SalesAggregator {
        SalesAggregator::new(
            vec![
                row("Rajasthan", 19800.0),
                row("Maharashtra", 22000.0),
                row("Karnataka", 16800.0),
            ],
            RegionMap::new(),
        )
        .unwrap()
    }

    #[test]
    fn test_total() {
        assert_eq!(sample_aggregator().total(), 58600.0);
    }

    #[test]
    fn test_rank_orders_by_quantity_descending() {
        let ranked = sample_aggregator().rank();
        let states: Vec<&str> = ranked.iter().map(|r| r.state.as_str()).collect();
        assert_eq!(states, vec!["Maharashtra", "Rajasthan", "Karnataka"]);

        for pair in ranked.windows(2) {
            assert!(pair[0].purchased_kg >= pair[1].purchased_kg);
        }
    }

    #[test]
    fn test_rank_is_a_permutation() {
        let aggregator = sample_aggregator();
        let ranked = aggregator.rank();
        assert_eq!(ranked.len(), aggregator.state_count());
        for record in aggregator.records() {
            assert!(ranked.contains(record));
        }
    }

    #[test]
    fn test_rank_breaks_ties_alphabetically() {
        let aggregator = SalesAggregator::new(
            vec![
                row("Kerala", 5000.0),
                row("Assam", 5000.0),
                row("Bihar", 5000.0),
                row("Goa", 8000.0),
            ],
            RegionMap::new(),
        )
        .unwrap();

        let ranked = aggregator.rank();
        let states: Vec<&str> = ranked.iter().map(|r| r.state.as_str()).collect();
        assert_eq!(states, vec!["Goa", "Assam", "Bihar", "Kerala"]);
    }

    #[test]
    fn test_top_n_clamps_oversized_request() {
        let aggregator = sample_aggregator();

        let top_two = aggregator.top_n(2).unwrap();
        assert_eq!(top_two.len(), 2);
        assert_eq!(top_two[0].state, "Maharashtra");
        assert_eq!(top_two[1].state, "Rajasthan");

        let all = aggregator.top_n(99).unwrap();
        assert_eq!(all.len(), 3);
    }

    #[test]
    fn test_top_n_rejects_zero() {
        assert!(matches!(
            sample_aggregator().top_n(0),
            Err(CoreError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_percentage_share_scenario() {
        let aggregator = sample_aggregator();
        let share = aggregator.percentage_share("Maharashtra").unwrap();
        assert!((share - 37.54).abs() < 0.01);
    }

    #[test]
    fn test_shares_sum_to_hundred() {
        let aggregator = sample_aggregator();
        let sum: f64 = aggregator
            .records()
            .iter()
            .map(|r| aggregator.percentage_share(&r.state).unwrap())
            .sum();
        assert!((sum - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_share_of_unknown_state() {
        assert_eq!(
            sample_aggregator().percentage_share("Atlantis").unwrap_err(),
            CoreError::UnknownState("Atlantis".to_string())
        );
    }

    #[test]
    fn test_share_with_zero_total() {
        let aggregator =
            SalesAggregator::new(vec![row("Goa", 0.0), row("Kerala", 0.0)], RegionMap::new())
                .unwrap();
        assert_eq!(aggregator.total(), 0.0);
        assert_eq!(aggregator.percentage_share("Goa").unwrap(), 0.0);
    }

    #[test]
    fn test_regional_totals_sum_to_national_total() {
        let aggregator = sample_aggregator();
        let totals = aggregator.regional_totals().unwrap();

        assert_eq!(totals.get(&Region::West), Some(&22000.0));
        assert_eq!(totals.get(&Region::North), Some(&19800.0));
        assert_eq!(totals.get(&Region::South), Some(&16800.0));

        let sum: f64 = totals.values().sum();
        assert_eq!(sum, aggregator.total());
    }

    #[test]
    fn test_regional_totals_propagate_unknown_state() {
        let records = vec![StateRecord {
            state: "Wakanda".to_string(),
            purchased_kg: 100.0,
            region: Region::North,
        }];
        let aggregator = SalesAggregator::from_records(records, RegionMap::new()).unwrap();

        assert_eq!(
            aggregator.regional_totals().unwrap_err(),
            CoreError::UnknownState("Wakanda".to_string())
        );
    }

    #[test]
    fn test_new_rejects_bad_rows() {
        let duplicate = SalesAggregator::new(
            vec![row("Goa", 100.0), row("Goa", 200.0)],
            RegionMap::new(),
        );
        assert!(matches!(duplicate, Err(CoreError::InvalidInput(_))));

        let negative = SalesAggregator::new(vec![row("Goa", -5.0)], RegionMap::new());
        assert!(matches!(negative, Err(CoreError::InvalidInput(_))));

        let unmapped = SalesAggregator::new(vec![row("Wakanda", 5.0)], RegionMap::new());
        assert_eq!(
            unmapped.unwrap_err(),
            CoreError::UnknownState("Wakanda".to_string())
        );
    }

    #[test]
    fn test_monthly_series_round_trip() {
        let mut aggregator = sample_aggregator();
        let series = vec![
            MonthlyPurchase {
                month: Month::January,
                purchased_kg: 1400.0,
            },
            MonthlyPurchase {
                month: Month::February,
                purchased_kg: 1200.0,
            },
        ];
        aggregator.attach_monthly("Karnataka", series.clone()).unwrap();

        assert_eq!(aggregator.monthly_series("Karnataka").unwrap(), &series[..]);
    }

    #[test]
    fn test_monthly_series_failures() {
        let aggregator = sample_aggregator();
        assert_eq!(
            aggregator.monthly_series("Maharashtra").unwrap_err(),
            CoreError::NoMonthlyData("Maharashtra".to_string())
        );
        assert_eq!(
            aggregator.monthly_series("Atlantis").unwrap_err(),
            CoreError::UnknownState("Atlantis".to_string())
        );
    }

    #[test]
    fn test_monthly_summary() {
        let mut aggregator = sample_aggregator();
        aggregator
            .attach_monthly(
                "Karnataka",
                vec![
                    MonthlyPurchase {
                        month: Month::January,
                        purchased_kg: 1000.0,
                    },
                    MonthlyPurchase {
                        month: Month::February,
                        purchased_kg: 1600.0,
                    },
                    MonthlyPurchase {
                        month: Month::March,
                        purchased_kg: 700.0,
                    },
                ],
            )
            .unwrap();

        let summary = aggregator.monthly_summary("Karnataka").unwrap();
        assert_eq!(summary.peak.month, Month::February);
        assert_eq!(summary.peak.purchased_kg, 1600.0);
        assert_eq!(summary.low.month, Month::March);
        assert_eq!(summary.low.purchased_kg, 700.0);
        assert_eq!(summary.annual_kg, 3300.0);
        assert_eq!(summary.mean_kg, 1100.0);
    }

    #[test]
    fn test_summary_metrics() {
        let summary = sample_aggregator().summary();
        assert_eq!(summary.total_kg, 58600.0);
        assert_eq!(summary.state_count, 3);
        assert!((summary.mean_kg - 58600.0 / 3.0).abs() < 1e-9);
        assert_eq!(summary.top_state.unwrap().state, "Maharashtra");
    }
}
