//! Pass-Through Pipeline
//!
//! Computes a single end-to-end result instead of enriching the table:
//! each step's output becomes the next step's working subject, and the
//! final running value is returned rather than written back.
//!
//! Run with: cargo run --example chained

use tabpipe::{ops, Pipeline, Step, Table, Value};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let table = Table::from_csv_reader(
        "width,height\n2,3\n4,1\n10,10\n".as_bytes(),
    )?;

    let perimeter = Pipeline::from_script(vec![
        Step::new(
            "half_perimeter",
            &["width", "height"],
            None,
            vec![ops::row_sum()],
        )?,
        Step::new(
            "full_perimeter",
            &["half_perimeter"],
            None,
            vec![ops::map_f64(|x| x * 2.0)],
        )?,
    ])?;

    match perimeter.apply_chained(&table)? {
        Value::Column(cells) => println!("perimeters: {:?}", cells),
        other => println!("unexpected result shape: {:?}", other),
    }

    Ok(())
}
