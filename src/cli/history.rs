use super::ui;
use crate::core::error::CoreError;
use crate::core::history::{self, PriceBand, PriceSeries, PriceStats};
use anyhow::Result;
use comfy_table::Cell;
use tracing::info;

pub fn run(prices: &PriceSeries, band: Option<PriceBand>) -> Result<()> {
    info!("Displaying silver price history");

    let stats = history::statistics(prices.points())?;

    println!(
        "\n{}\n",
        ui::style_text("Silver Price History", ui::StyleType::Title)
    );
    if let (Some(first), Some(latest)) = (prices.first(), prices.latest()) {
        println!(
            "Period: {} to {} ({} months)",
            first.date.format("%b %Y"),
            latest.date.format("%b %Y"),
            prices.len()
        );
        println!(
            "Latest price: ₹{}/kg\n",
            ui::format_amount(latest.price_per_kg)
        );
    }

    display_stats_table(&stats);
    display_band_table(prices);

    if let Some(band) = band {
        ui::print_separator();
        display_band_detail(prices, band)?;
    }
    Ok(())
}

fn display_stats_table(stats: &PriceStats) {
    let mut table = ui::new_styled_table();
    table.set_header(vec![
        ui::header_cell("Metric"),
        ui::header_cell("Value (INR/kg)"),
    ]);
    table.add_row(vec![
        Cell::new("Minimum"),
        ui::value_cell(format!("₹{}", ui::format_amount(stats.min))),
    ]);
    table.add_row(vec![
        Cell::new("Maximum"),
        ui::value_cell(format!("₹{}", ui::format_amount(stats.max))),
    ]);
    table.add_row(vec![
        Cell::new("Mean"),
        ui::value_cell(format!("₹{}", ui::format_amount(stats.mean))),
    ]);
    table.add_row(vec![
        Cell::new("Change since start"),
        ui::change_cell(stats.pct_change),
    ]);
    println!("{table}");
}

fn display_band_table(prices: &PriceSeries) {
    let mut table = ui::new_styled_table();
    table.set_header(vec![
        ui::header_cell("Band"),
        ui::header_cell("Price range"),
        ui::header_cell("Months"),
        ui::header_cell("Share"),
    ]);

    let total = prices.len();
    for band in PriceBand::ALL {
        let count = prices.filter_by_band(band).len();
        let share = if total == 0 {
            0.0
        } else {
            count as f64 / total as f64 * 100.0
        };
        table.add_row(vec![
            Cell::new(band.to_string()),
            Cell::new(band.range_label()),
            ui::value_cell(count.to_string()),
            ui::value_cell(format!("{share:.1}%")),
        ]);
    }

    println!(
        "\n{}\n",
        ui::style_text("Price Bands", ui::StyleType::TotalLabel)
    );
    println!("{table}");
}

fn display_band_detail(prices: &PriceSeries, band: PriceBand) -> Result<()> {
    match prices.band_statistics(band) {
        Ok(stats) => {
            let months = prices.filter_by_band(band).len();
            println!(
                "\n{} {} months\n",
                ui::style_text(
                    &format!("{band} band ({}):", band.range_label()),
                    ui::StyleType::TotalLabel
                ),
                months
            );
            display_stats_table(&stats);
            Ok(())
        }
        Err(CoreError::EmptySeries) => {
            println!(
                "\n{}",
                ui::style_text(
                    &format!("No months fall within the {band} band."),
                    ui::StyleType::Subtle
                )
            );
            Ok(())
        }
        Err(e) => Err(e.into()),
    }
}
