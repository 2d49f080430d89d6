//! Table Enrichment Pipeline
//!
//! This example builds a small table, enriches it with derived columns
//! through a scripted pipeline, then reuses slices of the same pipeline:
//! - declarative step scripts with stock transforms
//! - pipeline concatenation and name-range slicing
//! - broadcasting a column-retention operation over a list of tables
//!
//! Run with: cargo run --example enrich

use tabpipe::{broadcast, ops, Cell, Pipeline, Step, Table, Tables};

fn sample_table() -> Table {
    Table::from_columns([
        (
            "price",
            vec![Cell::Float(9.5), Cell::Float(12.0), Cell::Float(7.25)],
        ),
        ("quantity", vec![Cell::Int(3), Cell::Int(1), Cell::Int(4)]),
        (
            "label",
            vec![
                Cell::Str("ok".to_string()),
                Cell::Str("ok".to_string()),
                Cell::Str("backorder".to_string()),
            ],
        ),
    ])
    .expect("columns share one length")
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let enrich = Pipeline::from_script(vec![
        Step::new(
            "taxed_price",
            &["price"],
            Some("taxed_price"),
            vec![ops::map_f64(|x| x * 1.2)],
        )?,
        Step::new(
            "order_total",
            &["price", "quantity"],
            Some("order_total"),
            vec![ops::row_sum()],
        )?,
        Step::new(
            "avg_component",
            &["price", "quantity"],
            Some("avg_component"),
            vec![ops::row_mean()],
        )?,
    ])?;

    println!("pipeline:\n{}", enrich);

    let mut table = sample_table();
    enrich.apply(&mut table)?;
    println!("taxed_price: {:?}", table.column("taxed_price"));
    println!("order_total: {:?}", table.column("order_total"));

    // Rerun only the aggregation steps against a fresh table.
    let aggregates = enrich.slice_names(Some("order_total"), None)?;
    let mut fresh = sample_table();
    aggregates.apply(&mut fresh)?;
    println!("aggregate-only columns: {:?}", fresh.column_names());

    // Trim a whole batch of tables down to the numeric columns.
    let mut batch = Tables::from(vec![table, fresh]);
    broadcast::retain_columns(&mut batch, &["price", "quantity", "order_total"]);
    for (i, t) in batch.iter().enumerate() {
        println!("table {} now has columns {:?}", i, t.column_names());
    }

    Ok(())
}
