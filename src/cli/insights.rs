use super::ui;
use crate::core::error::CoreError;
use crate::core::sales::SalesAggregator;
use anyhow::Result;
use comfy_table::Cell;
use tracing::info;

pub fn run(sales: &SalesAggregator, top: usize, monthly_state: &str) -> Result<()> {
    info!("Displaying sales insights (top {top}, monthly trend for {monthly_state})");

    println!(
        "\n{}\n",
        ui::style_text("Silver Sales Insights", ui::StyleType::Title)
    );

    display_top_states(sales, top)?;
    ui::print_separator();
    display_regional_totals(sales)?;
    ui::print_separator();
    display_monthly_trend(sales, monthly_state)
}

fn display_top_states(sales: &SalesAggregator, top: usize) -> Result<()> {
    let top_states = sales.top_n(top)?;

    let mut table = ui::new_styled_table();
    table.set_header(vec![
        ui::header_cell("Rank"),
        ui::header_cell("State"),
        ui::header_cell("Region"),
        ui::header_cell("Purchased (kg)"),
        ui::header_cell("Share"),
        ui::header_cell("Cumulative"),
    ]);
    let mut cumulative = 0.0;
    for (rank, record) in top_states.iter().enumerate() {
        let share = sales.percentage_share(&record.state)?;
        cumulative += share;
        table.add_row(vec![
            ui::value_cell((rank + 1).to_string()),
            Cell::new(&record.state),
            Cell::new(record.region.name()),
            ui::value_cell(ui::format_amount(record.purchased_kg)),
            ui::percentage_cell(share),
            ui::percentage_cell(cumulative),
        ]);
    }

    println!(
        "{}\n",
        ui::style_text(
            &format!("Top {} states by purchases", top_states.len()),
            ui::StyleType::TotalLabel
        )
    );
    println!("{table}");
    Ok(())
}

fn display_regional_totals(sales: &SalesAggregator) -> Result<()> {
    let totals = sales.regional_totals()?;
    let national_total = sales.total();

    let mut regions: Vec<_> = totals.into_iter().collect();
    regions.sort_by(|(_, a), (_, b)| b.total_cmp(a));

    let mut table = ui::new_styled_table();
    table.set_header(vec![
        ui::header_cell("Region"),
        ui::header_cell("Purchased (kg)"),
        ui::header_cell("Share"),
    ]);
    for (region, total_kg) in regions {
        let share = if national_total == 0.0 {
            0.0
        } else {
            total_kg / national_total * 100.0
        };
        table.add_row(vec![
            Cell::new(region.name()),
            ui::value_cell(ui::format_amount(total_kg)),
            ui::percentage_cell(share),
        ]);
    }

    println!(
        "\n{}\n",
        ui::style_text("Purchases by region", ui::StyleType::TotalLabel)
    );
    println!("{table}");
    Ok(())
}

fn display_monthly_trend(sales: &SalesAggregator, state: &str) -> Result<()> {
    let series = match sales.monthly_series(state) {
        Ok(series) => series,
        Err(CoreError::NoMonthlyData(_)) | Err(CoreError::UnknownState(_)) => {
            println!(
                "\n{}",
                ui::style_text(
                    &format!("No monthly purchase data available for {state}."),
                    ui::StyleType::Subtle
                )
            );
            return Ok(());
        }
        Err(e) => return Err(e.into()),
    };

    let mut table = ui::new_styled_table();
    table.set_header(vec![
        ui::header_cell("Month"),
        ui::header_cell("Purchased (kg)"),
    ]);
    for month in series {
        table.add_row(vec![
            Cell::new(month.month.name()),
            ui::value_cell(ui::format_amount(month.purchased_kg)),
        ]);
    }

    println!(
        "\n{}\n",
        ui::style_text(
            &format!("Monthly purchases in {state}"),
            ui::StyleType::TotalLabel
        )
    );
    println!("{table}");

    let summary = sales.monthly_summary(state)?;
    println!(
        "\nPeak month: {} with {} kg",
        summary.peak.month.name(),
        ui::format_amount(summary.peak.purchased_kg)
    );
    println!(
        "Lowest month: {} with {} kg",
        summary.low.month.name(),
        ui::format_amount(summary.low.purchased_kg)
    );
    println!("Monthly mean: {} kg", ui::format_amount(summary.mean_kg));
    println!(
        "Annual total: {} kg",
        ui::format_amount(summary.annual_kg)
    );
    Ok(())
}
