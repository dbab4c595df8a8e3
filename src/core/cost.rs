//! Silver cost calculation from a weight and a price per gram

use crate::core::error::CoreError;
use std::fmt::Display;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WeightUnit {
    Gram,
    Kilogram,
}

impl WeightUnit {
    /// Normalizes a weight in this unit to grams.
    pub fn to_grams(&self, weight: f64) -> f64 {
        match self {
            WeightUnit::Gram => weight,
            WeightUnit::Kilogram => weight * 1000.0,
        }
    }
}

impl Display for WeightUnit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                WeightUnit::Gram => "g",
                WeightUnit::Kilogram => "kg",
            }
        )
    }
}

impl FromStr for WeightUnit {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "g" | "gram" | "grams" => Ok(WeightUnit::Gram),
            "kg" | "kilogram" | "kilograms" => Ok(WeightUnit::Kilogram),
            _ => Err(CoreError::InvalidInput(format!("unknown weight unit: {s}"))),
        }
    }
}

/// The fixed weight ladder shown in the quick-reference table, in display order.
const QUICK_REFERENCE_WEIGHTS: [(&str, f64); 4] = [
    ("1 gram", 1.0),
    ("10 grams", 10.0),
    ("100 grams", 100.0),
    ("1 kg", 1000.0),
];

/// One row of the quick-reference price table.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QuickReference {
    pub label: &'static str,
    pub grams: f64,
    pub cost_inr: f64,
}

/// Computes the INR cost of a quantity of silver.
///
/// The weight is normalized to grams and multiplied by the per-gram price.
/// Both inputs must be positive finite numbers.
pub fn compute_cost(price_per_gram: f64, weight: f64, unit: WeightUnit) -> Result<f64, CoreError> {
    if !(price_per_gram.is_finite() && price_per_gram > 0.0) {
        return Err(CoreError::InvalidInput(format!(
            "price per gram must be positive, got {price_per_gram}"
        )));
    }
    if !(weight.is_finite() && weight > 0.0) {
        return Err(CoreError::InvalidInput(format!(
            "weight must be positive, got {weight}"
        )));
    }
    Ok(unit.to_grams(weight) * price_per_gram)
}

/// Costs for the fixed reference weights {1 g, 10 g, 100 g, 1 kg}, in that
/// order, each consistent with [`compute_cost`].
pub fn quick_reference(price_per_gram: f64) -> Result<Vec<QuickReference>, CoreError> {
    QUICK_REFERENCE_WEIGHTS
        .iter()
        .map(|&(label, grams)| {
            compute_cost(price_per_gram, grams, WeightUnit::Gram).map(|cost_inr| QuickReference {
                label,
                grams,
                cost_inr,
            })
        })
        .collect()
}
