//! # tabpipe
//!
//! A small engine for describing and executing named, ordered pipelines of
//! column-level transformations over tabular data.
//!
//! ## Core Design Principles
//!
//! - **Pipelines are data, not code**: a pipeline is built from a declarative
//!   script of steps, each naming its input columns, its output column, and
//!   the transform functions to apply.
//! - **Algebraic composition**: pipelines concatenate (`+`), repeat (`*`),
//!   and slice by step name or position, always producing new instances and
//!   never mutating their operands.
//! - **Deterministic execution**: steps run in script order, transforms run
//!   in list order, and later steps may read columns written by earlier
//!   ones. No implicit reordering, no parallelism.
//! - **Opaque transforms**: a transform is a unary function from a table
//!   projection to a scalar, column, or sub-table. The table itself carries
//!   no numeric behavior.
//!
//! ## Quick Start
//!
//! ```rust
//! use tabpipe::{ops, Cell, Pipeline, Step, Table};
//!
//! let mut table = Table::from_columns([
//!     ("A", vec![Cell::Int(1), Cell::Int(2)]),
//!     ("B", vec![Cell::Int(3), Cell::Int(4)]),
//! ])
//! .unwrap();
//!
//! let pipeline = Pipeline::from_script(vec![
//!     Step::new("add_one", &["A"], Some("A+1"), vec![ops::map_f64(|x| x + 1.0)]).unwrap(),
//!     Step::new("sum", &["A", "B"], Some("sum"), vec![ops::row_sum()]).unwrap(),
//! ])
//! .unwrap();
//!
//! pipeline.apply(&mut table).unwrap();
//! assert_eq!(table.column("sum").unwrap(), &[Cell::Float(4.0), Cell::Float(6.0)]);
//! ```
//!
//! ## Module Structure
//!
//! - `table` — the tabular container: `Table`, `Cell`, `Value`, row views,
//!   CSV and serde round-trips
//! - `step` — the atomic pipeline unit and the `Transform` function type
//! - `pipeline` — the ordered, name-keyed step collection and its algebra
//! - `runner` — in-place and pass-through execution
//! - `columns` — column-presence set operations for pre-filtering
//! - `broadcast` — applying single-table operations over lists of tables
//! - `ops` — stock transforms (numeric maps, row aggregation)
//! - `error` — the crate error type

pub mod broadcast;
pub mod columns;
pub mod error;
pub mod ops;
pub mod pipeline;
pub mod runner;
pub mod step;
pub mod table;

pub use broadcast::Tables;
pub use error::PipelineError;
pub use pipeline::Pipeline;
pub use runner::RunConfig;
pub use step::{transform, Step, Transform};
pub use table::{Cell, Column, Table, Value};

#[cfg(test)]
mod tests {
    use super::*;

    fn script() -> Vec<Step> {
        vec![
            Step::new("add1", &["A"], Some("A+1"), vec![ops::map_f64(|x| x + 1.0)]).unwrap(),
            Step::new("double", &["B"], Some("B*2"), vec![ops::map_f64(|x| x * 2.0)]).unwrap(),
            Step::new("sum", &["A", "B"], Some("sum"), vec![ops::row_sum()]).unwrap(),
        ]
    }

    fn table() -> Table {
        Table::from_columns([
            ("A", vec![Cell::Int(1), Cell::Int(2)]),
            ("B", vec![Cell::Int(3), Cell::Int(4)]),
        ])
        .unwrap()
    }

    #[test]
    fn test_end_to_end_enrichment() {
        let pipeline = Pipeline::from_script(script()).unwrap();
        let mut t = table();
        pipeline.apply(&mut t).unwrap();

        assert_eq!(
            t.column("A+1").unwrap(),
            &[Cell::Float(2.0), Cell::Float(3.0)]
        );
        assert_eq!(
            t.column("B*2").unwrap(),
            &[Cell::Float(6.0), Cell::Float(8.0)]
        );
        // The sum step reads the original A and B columns, not the
        // derived A+1 / B*2 ones.
        assert_eq!(
            t.column("sum").unwrap(),
            &[Cell::Float(4.0), Cell::Float(6.0)]
        );
        assert_eq!(t.column_names(), ["A", "B", "A+1", "B*2", "sum"]);
    }

    #[test]
    fn test_concatenation_executes_like_sequential_application() {
        let head = Pipeline::from_script(script()).unwrap();
        let tail = Pipeline::from_script(vec![Step::new(
            "mean",
            &["A", "B"],
            Some("mean"),
            vec![ops::row_mean()],
        )
        .unwrap()])
        .unwrap();

        let mut combined_result = table();
        (&head + &tail).apply(&mut combined_result).unwrap();

        let mut sequential_result = table();
        head.apply(&mut sequential_result).unwrap();
        tail.apply(&mut sequential_result).unwrap();

        assert_eq!(combined_result, sequential_result);
    }

    #[test]
    fn test_repetition_equals_repeated_application() {
        let grow = Pipeline::from_script(vec![Step::new(
            "grow",
            &["A"],
            Some("A"),
            vec![ops::map_f64(|x| x * 2.0)],
        )
        .unwrap()])
        .unwrap();

        let mut repeated = table();
        (&grow * 3).apply(&mut repeated).unwrap();

        let mut looped = table();
        for _ in 0..3 {
            grow.apply(&mut looped).unwrap();
        }

        assert_eq!(repeated, looped);
        assert_eq!(
            repeated.column("A").unwrap(),
            &[Cell::Float(8.0), Cell::Float(16.0)]
        );
    }

    #[test]
    fn test_repetition_zero_is_noop() {
        let pipeline = Pipeline::from_script(script()).unwrap() * 0;
        let mut t = table();
        let before = t.clone();
        pipeline.apply(&mut t).unwrap();
        assert_eq!(t, before);
    }

    #[test]
    fn test_sliced_pipeline_runs_subset() {
        let pipeline = Pipeline::from_script(script()).unwrap();
        let tail = pipeline.slice_names(Some("double"), None).unwrap();

        let mut t = table();
        tail.apply(&mut t).unwrap();
        assert!(!t.has_column("A+1"));
        assert!(t.has_column("B*2"));
        assert!(t.has_column("sum"));
    }

    #[test]
    fn test_prefilter_with_column_groups() {
        let pipeline = Pipeline::from_script(script()).unwrap();
        let t = Table::from_columns([("A", vec![Cell::Int(1)])]).unwrap();

        // Keep only the steps whose input columns are all present.
        let groups: Vec<Vec<String>> = pipeline
            .iter()
            .map(|step| step.input_columns().to_vec())
            .collect();
        let runnable = columns::present_col_groups(t.column_names(), &groups);
        let filtered: Vec<Step> = pipeline
            .iter()
            .filter(|step| runnable.contains(&step.input_columns().to_vec()))
            .cloned()
            .collect();
        let filtered = Pipeline::from_script(filtered).unwrap();

        assert_eq!(filtered.step_names(), ["add1"]);
        let mut t = t;
        filtered.apply_with(&mut t, &RunConfig::strict()).unwrap();
        assert_eq!(t.column("A+1").unwrap(), &[Cell::Float(2.0)]);
    }
}
