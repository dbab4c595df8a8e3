use super::ui;
use crate::core::sales::SalesAggregator;
use anyhow::Result;
use comfy_table::Cell;
use tracing::info;

pub fn run(sales: &SalesAggregator) -> Result<()> {
    info!("Displaying state-wise silver sales");

    println!(
        "\n{}\n",
        ui::style_text("State-wise Silver Sales", ui::StyleType::Title)
    );

    display_ranking(sales)?;

    let summary = sales.summary();
    println!(
        "\n{} {} kg across {} states",
        ui::style_text("Total purchases:", ui::StyleType::TotalLabel),
        ui::style_text(&ui::format_amount(summary.total_kg), ui::StyleType::TotalValue),
        summary.state_count
    );
    println!(
        "Average per state: {} kg",
        ui::format_amount(summary.mean_kg)
    );
    if let Some(top) = summary.top_state {
        let share = sales.percentage_share(&top.state)?;
        println!(
            "Top state: {} with {} kg ({share:.2}% of the national total)",
            top.state,
            ui::format_amount(top.purchased_kg)
        );
    }
    Ok(())
}

fn display_ranking(sales: &SalesAggregator) -> Result<()> {
    let mut table = ui::new_styled_table();
    table.set_header(vec![
        ui::header_cell("Rank"),
        ui::header_cell("State"),
        ui::header_cell("Region"),
        ui::header_cell("Purchased (kg)"),
        ui::header_cell("Share"),
    ]);

    for (rank, record) in sales.rank().iter().enumerate() {
        let share = sales.percentage_share(&record.state)?;
        table.add_row(vec![
            ui::value_cell((rank + 1).to_string()),
            Cell::new(&record.state),
            Cell::new(record.region.name()),
            ui::value_cell(ui::format_amount(record.purchased_kg)),
            ui::percentage_cell(share),
        ]);
    }

    println!("{table}");
    Ok(())
}
