use super::ui;
use crate::core::cost::{self, WeightUnit};
use crate::core::currency::{Currency, CurrencyConverter};
use crate::core::history::{PricePoint, PriceSeries};
use anyhow::{Context, Result};
use comfy_table::Cell;
use tracing::info;

pub fn run(
    prices: &PriceSeries,
    weight: f64,
    unit: WeightUnit,
    price: Option<f64>,
    display_currency: Currency,
) -> Result<()> {
    info!("Calculating silver cost for {weight} {unit}");

    let price_per_gram = match price {
        Some(price) => price,
        None => prices
            .latest_price_per_gram()
            .context("Price history is empty")?,
    };
    let converter = CurrencyConverter::default();

    let cost_inr = cost::compute_cost(price_per_gram, weight, unit)?;
    let converted = converter.convert(cost_inr, display_currency)?;

    println!(
        "\n{}\n",
        ui::style_text("Silver Cost Calculator", ui::StyleType::Title)
    );
    match price {
        Some(price) => println!("Price: ₹{}/g\n", ui::format_amount(price)),
        None => {
            if let Some(latest) = prices.latest() {
                print_latest_price(&latest);
            }
        }
    }

    display_breakdown(weight, unit, cost_inr, &converter)?;

    println!(
        "\n{} {}",
        ui::style_text(
            &format!("Cost ({display_currency}):"),
            ui::StyleType::TotalLabel
        ),
        ui::style_text(&ui::format_amount(converted), ui::StyleType::TotalValue)
    );

    ui::print_separator();
    display_quick_reference(price_per_gram)
}

fn print_latest_price(latest: &PricePoint) {
    println!(
        "Latest price ({}): ₹{}/kg (₹{}/g)\n",
        latest.date.format("%b %Y"),
        ui::format_amount(latest.price_per_kg),
        ui::format_amount(latest.price_per_kg / 1000.0)
    );
}

fn display_breakdown(
    weight: f64,
    unit: WeightUnit,
    cost_inr: f64,
    converter: &CurrencyConverter,
) -> Result<()> {
    let mut table = ui::new_styled_table();
    table.set_header(vec![
        ui::header_cell("Currency"),
        ui::header_cell(&format!("Cost for {weight} {unit}")),
    ]);

    table.add_row(vec![
        Cell::new("INR"),
        ui::value_cell(format!("₹{}", ui::format_amount(cost_inr))),
    ]);
    for currency in Currency::ALL {
        let converted = converter.convert(cost_inr, currency)?;
        table.add_row(vec![
            Cell::new(currency.code()),
            ui::value_cell(ui::format_amount(converted)),
        ]);
    }

    println!("{table}");
    Ok(())
}

fn display_quick_reference(price_per_gram: f64) -> Result<()> {
    let mut table = ui::new_styled_table();
    table.set_header(vec![
        ui::header_cell("Weight"),
        ui::header_cell("Cost (INR)"),
    ]);

    for entry in cost::quick_reference(price_per_gram)? {
        table.add_row(vec![
            Cell::new(entry.label),
            ui::value_cell(format!("₹{}", ui::format_amount(entry.cost_inr))),
        ]);
    }

    println!(
        "\n{}\n",
        ui::style_text("Quick Reference", ui::StyleType::TotalLabel)
    );
    println!("{table}");
    Ok(())
}
