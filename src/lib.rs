pub mod cli;
pub mod core;
pub mod data;

use crate::core::config::AppConfig;
use crate::core::cost::WeightUnit;
use crate::core::currency::Currency;
use crate::core::history::PriceBand;
use crate::core::region::RegionMap;
use anyhow::{Context, Result};
use tracing::{debug, info};

/// Commands the application can execute, decoupled from the clap surface
/// in `main`.
#[derive(Debug, Clone)]
pub enum AppCommand {
    Calc {
        weight: f64,
        unit: WeightUnit,
        price: Option<f64>,
        currency: Option<Currency>,
    },
    History {
        band: Option<PriceBand>,
    },
    Sales,
    Insights {
        top: usize,
    },
}

pub fn run_command(command: AppCommand, config_path: Option<&str>) -> Result<()> {
    info!("Silver explorer starting...");

    let config = match config_path {
        Some(path) => AppConfig::load_from_path(path)?,
        None => AppConfig::load()?,
    };
    debug!("Loaded config: {config:#?}");

    match command {
        AppCommand::Calc {
            weight,
            unit,
            price,
            currency,
        } => {
            let prices = data::load_price_series(&config)?;
            let display_currency = match currency {
                Some(currency) => currency,
                None => config.display_currency.parse().with_context(|| {
                    format!(
                        "Unsupported display currency in config: {}",
                        config.display_currency
                    )
                })?,
            };
            cli::calc::run(&prices, weight, unit, price, display_currency)
        }
        AppCommand::History { band } => {
            let prices = data::load_price_series(&config)?;
            cli::history::run(&prices, band)
        }
        AppCommand::Sales => {
            let sales = data::load_sales(&config, RegionMap::new())?;
            cli::sales::run(&sales)
        }
        AppCommand::Insights { top } => {
            let sales = data::load_sales(&config, RegionMap::new())?;
            cli::insights::run(&sales, top, &config.monthly_state)
        }
    }
}
