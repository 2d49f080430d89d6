//! Stock transform constructors for common column computations.
//!
//! These cover the transforms scripts reach for most often: elementwise
//! numeric maps and row-wise aggregation over a projection. Anything else
//! is written as an ad-hoc closure via [`transform`](crate::step::transform).

use crate::error::PipelineError;
use crate::step::{transform, Transform};
use crate::table::{Cell, Table, Value};

/// Elementwise map over every cell of the input.
///
/// Applies `f` to each cell of a scalar, column, or every column of a
/// table, preserving the input's shape. The closure decides how to treat
/// each cell type and may fail.
pub fn map_cells<F>(f: F) -> Transform
where
    F: Fn(&Cell) -> Result<Cell, PipelineError> + Send + Sync + 'static,
{
    transform(move |value| match value {
        Value::Scalar(cell) => Ok(Value::Scalar(f(&cell)?)),
        Value::Column(cells) => Ok(Value::Column(
            cells.iter().map(&f).collect::<Result<_, _>>()?,
        )),
        Value::Table(table) => {
            let mut mapped = Table::new();
            for (name, cells) in table.columns() {
                let column = cells.iter().map(&f).collect::<Result<_, _>>()?;
                mapped.insert(name, column)?;
            }
            Ok(Value::Table(mapped))
        }
    })
}

/// Elementwise numeric map.
///
/// Int and float cells pass through `f` and come back as floats; nulls
/// stay null; bool and text cells are an error.
pub fn map_f64<F>(f: F) -> Transform
where
    F: Fn(f64) -> f64 + Send + Sync + 'static,
{
    map_cells(move |cell| match cell {
        Cell::Null => Ok(Cell::Null),
        other => match other.as_f64() {
            Some(v) => Ok(Cell::Float(f(v))),
            None => Err(PipelineError::Transform(format!(
                "cannot apply numeric map to non-numeric cell '{}'",
                other
            ))),
        },
    })
}

/// Row-wise sum over the input's columns.
///
/// For a table, each output cell is the sum of that row's numeric cells;
/// nulls are skipped, so an all-null row sums to zero. A column input is
/// treated as a one-column table. Non-numeric cells are an error.
pub fn row_sum() -> Transform {
    row_aggregate("row_sum", |values| {
        Some(Cell::Float(values.iter().sum()))
    })
}

/// Row-wise mean over the input's columns.
///
/// Nulls are skipped; a row with no numeric cells yields null.
pub fn row_mean() -> Transform {
    row_aggregate("row_mean", |values| {
        if values.is_empty() {
            None
        } else {
            Some(Cell::Float(values.iter().sum::<f64>() / values.len() as f64))
        }
    })
}

fn row_aggregate<F>(name: &'static str, f: F) -> Transform
where
    F: Fn(&[f64]) -> Option<Cell> + Send + Sync + 'static,
{
    transform(move |value| {
        let table = match value {
            Value::Table(table) => table,
            Value::Column(cells) => {
                let mut table = Table::new();
                table.insert("value", cells)?;
                table
            }
            Value::Scalar(_) => {
                return Err(PipelineError::Transform(format!(
                    "{} expects a table or column input",
                    name
                )))
            }
        };

        let mut output = Vec::with_capacity(table.n_rows());
        for row in table.rows() {
            let mut values = Vec::new();
            for cell in row.cells() {
                match cell {
                    Cell::Null => {}
                    other => match other.as_f64() {
                        Some(v) => values.push(v),
                        None => {
                            return Err(PipelineError::Transform(format!(
                                "{} over non-numeric cell '{}' in row {}",
                                name,
                                other,
                                row.index()
                            )))
                        }
                    },
                }
            }
            output.push(f(&values).unwrap_or(Cell::Null));
        }
        Ok(Value::Column(output))
    })
}
