//! Currency conversion against a fixed INR rate table

use crate::core::error::CoreError;
use std::collections::HashMap;
use std::fmt::Display;
use std::str::FromStr;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd)]
pub enum Currency {
    Usd,
    Eur,
    Gbp,
    Aed,
}

impl Currency {
    pub const ALL: [Currency; 4] = [Currency::Usd, Currency::Eur, Currency::Gbp, Currency::Aed];

    pub fn code(&self) -> &'static str {
        match self {
            Currency::Usd => "USD",
            Currency::Eur => "EUR",
            Currency::Gbp => "GBP",
            Currency::Aed => "AED",
        }
    }
}

impl Display for Currency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl FromStr for Currency {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "USD" => Ok(Currency::Usd),
            "EUR" => Ok(Currency::Eur),
            "GBP" => Ok(Currency::Gbp),
            "AED" => Ok(Currency::Aed),
            _ => Err(CoreError::InvalidCurrency(s.to_string())),
        }
    }
}

/// Converts INR amounts into the supported foreign currencies.
///
/// The rate table is fixed configuration, not a live lookup: each entry is
/// the amount of foreign currency one rupee buys (units per INR).
#[derive(Debug, Clone)]
pub struct CurrencyConverter {
    rates: HashMap<Currency, f64>,
}

impl Default for CurrencyConverter {
    fn default() -> Self {
        // Reciprocals of the approximate Jan 2026 quotes:
        // 85.50 INR/USD, 92.30 INR/EUR, 107.80 INR/GBP, 23.28 INR/AED.
        let rates = HashMap::from([
            (Currency::Usd, 0.0117),
            (Currency::Eur, 0.0108),
            (Currency::Gbp, 0.0093),
            (Currency::Aed, 0.0430),
        ]);
        Self { rates }
    }
}

impl CurrencyConverter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a converter from a custom rate table. Every rate must be
    /// positive; currencies absent from the table fail conversion with
    /// `InvalidCurrency`.
    pub fn with_rates(rates: HashMap<Currency, f64>) -> Result<Self, CoreError> {
        if let Some((currency, rate)) = rates.iter().find(|(_, r)| !(r.is_finite() && **r > 0.0)) {
            return Err(CoreError::InvalidInput(format!(
                "rate for {currency} must be positive, got {rate}"
            )));
        }
        Ok(Self { rates })
    }

    pub fn rate(&self, currency: Currency) -> Result<f64, CoreError> {
        self.rates
            .get(&currency)
            .copied()
            .ok_or_else(|| CoreError::InvalidCurrency(currency.to_string()))
    }

    /// Converts an INR amount: `amount_inr × rate[currency]`.
    ///
    /// Zero converts to zero; negative or non-finite amounts are rejected.
    pub fn convert(&self, amount_inr: f64, currency: Currency) -> Result<f64, CoreError> {
        if !amount_inr.is_finite() || amount_inr < 0.0 {
            return Err(CoreError::InvalidInput(format!(
                "amount must be a non-negative number of rupees, got {amount_inr}"
            )));
        }
        let rate = self.rate(currency)?;
        let converted = amount_inr * rate;
        debug!("Converted {amount_inr} INR to {converted} {currency} at rate {rate}");
        Ok(converted)
    }
}
