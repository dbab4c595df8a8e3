use anyhow::Result;
use chandi::core::cost::WeightUnit;
use chandi::core::currency::Currency;
use chandi::core::history::PriceBand;
use chandi::core::log::init_logging;
use clap::{CommandFactory, Parser, Subcommand};
use std::str::FromStr;

#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to optional configuration file
    #[arg(short, long, global = true)]
    config_path: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

impl From<Commands> for chandi::AppCommand {
    fn from(cmd: Commands) -> chandi::AppCommand {
        match cmd {
            Commands::Calc {
                weight,
                unit,
                price,
                currency,
            } => chandi::AppCommand::Calc {
                weight,
                unit,
                price,
                currency,
            },
            Commands::History { band } => chandi::AppCommand::History { band },
            Commands::Sales => chandi::AppCommand::Sales,
            Commands::Insights { top } => chandi::AppCommand::Insights { top },
            Commands::Setup => unreachable!("Setup command should be handled separately"),
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Create default configuration
    Setup,
    /// Calculate the cost of a silver purchase at the latest price
    Calc {
        /// Weight of silver to price
        weight: f64,

        /// Weight unit: g or kg
        #[arg(short, long, default_value = "g", value_parser = WeightUnit::from_str)]
        unit: WeightUnit,

        /// Price per gram in INR, instead of the latest historical price
        #[arg(short, long)]
        price: Option<f64>,

        /// Currency for the headline conversion: USD, EUR, GBP or AED
        #[arg(long, value_parser = Currency::from_str)]
        currency: Option<Currency>,
    },
    /// Display historical silver prices with band statistics
    History {
        /// Show detail for one price band: low, mid or high
        #[arg(short, long, value_parser = PriceBand::from_str)]
        band: Option<PriceBand>,
    },
    /// Display state-wise sales ranked by quantity
    Sales,
    /// Display top states, regional totals and the monthly trend
    Insights {
        /// Number of top states to display
        #[arg(short, long, default_value_t = 5)]
        top: usize,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    let result = match cli.command {
        Some(Commands::Setup) => chandi::cli::setup::setup(),
        Some(cmd) => chandi::run_command(cmd.into(), cli.config_path.as_deref()),
        None => {
            Cli::command().print_help()?;
            Ok(())
        }
    };

    if let Err(e) = &result {
        tracing::error!(error = %e, "Application failed");
    }
    result
}
