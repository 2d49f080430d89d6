//! Broadcasting single-table operations over collections of tables.
//!
//! [`Tables`] is a closed variant over "one table" and "an ordered list of
//! tables". [`Tables::broadcast`] applies a fallible in-place operation to
//! each element sequentially, in collection order, so any single-table
//! operation transparently accepts either shape. The convenience operations
//! in this module are all defined that way; the core pipeline itself never
//! depends on broadcasting.

use crate::columns::present_cols;
use crate::error::PipelineError;
use crate::pipeline::Pipeline;
use crate::runner::RunConfig;
use crate::step::{Step, Transform};
use crate::table::Table;

/// One table or an ordered collection of tables.
#[derive(Clone, Debug, PartialEq)]
pub enum Tables {
    /// A single table.
    Single(Table),
    /// An ordered list of tables, processed in order.
    Many(Vec<Table>),
}

impl Tables {
    /// Apply an in-place operation to every contained table, in order.
    ///
    /// Strictly sequential: element `i + 1` is not touched until `f`
    /// returned successfully for element `i`; the first failure aborts.
    pub fn broadcast<F>(&mut self, mut f: F) -> Result<(), PipelineError>
    where
        F: FnMut(&mut Table) -> Result<(), PipelineError>,
    {
        match self {
            Tables::Single(table) => f(table),
            Tables::Many(tables) => {
                for table in tables {
                    f(table)?;
                }
                Ok(())
            }
        }
    }

    /// Number of contained tables.
    pub fn len(&self) -> usize {
        match self {
            Tables::Single(_) => 1,
            Tables::Many(tables) => tables.len(),
        }
    }

    /// Whether no tables are contained (only possible for an empty list).
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Iterate the contained tables in order.
    pub fn iter(&self) -> impl Iterator<Item = &Table> {
        match self {
            Tables::Single(table) => std::slice::from_ref(table).iter(),
            Tables::Many(tables) => tables.iter(),
        }
    }
}

impl From<Table> for Tables {
    fn from(table: Table) -> Self {
        Tables::Single(table)
    }
}

impl From<Vec<Table>> for Tables {
    fn from(tables: Vec<Table>) -> Self {
        Tables::Many(tables)
    }
}

impl Pipeline {
    /// Apply the pipeline in place to every contained table, in order.
    pub fn apply_each(
        &self,
        tables: &mut Tables,
        config: &RunConfig,
    ) -> Result<(), PipelineError> {
        tables.broadcast(|table| self.apply_with(table, config))
    }
}

/// Keep only the named columns on every table, if they are present.
pub fn retain_columns<S: AsRef<str>>(tables: &mut Tables, keep: &[S]) {
    // Dropping columns cannot fail.
    let _ = tables.broadcast(|table| {
        table.retain_columns(keep);
        Ok(())
    });
}

/// Apply per-column transform chains to existing columns, in place.
///
/// Each `(column, transforms)` entry rewrites that column through its
/// transform chain, in entry order; columns not present on a table are
/// skipped for that table. Internally each table gets a pipeline with one
/// step per present column.
pub fn apply_column_ops(
    tables: &mut Tables,
    ops: &[(String, Vec<Transform>)],
) -> Result<(), PipelineError> {
    tables.broadcast(|table| {
        let requested: Vec<&str> = ops.iter().map(|(name, _)| name.as_str()).collect();
        let present = present_cols(table.column_names(), &requested);
        let mut steps = Vec::new();
        for (name, transforms) in ops {
            if present.contains(name) {
                steps.push(Step::new(
                    name,
                    &[name.as_str()],
                    Some(name.as_str()),
                    transforms.clone(),
                )?);
            }
        }
        Pipeline::from_script(steps)?.apply(table)
    })
}

/// Derive new columns from whole-table functions, in place.
///
/// Each `(name, transform)` entry computes a new column from the table's
/// current full projection, in entry order, so later entries see columns
/// added by earlier ones. Internally each table gets a one-step-per-column
/// pipeline.
pub fn add_table_columns(
    tables: &mut Tables,
    ops: &[(String, Transform)],
) -> Result<(), PipelineError> {
    tables.broadcast(|table| {
        for (name, transform) in ops {
            let inputs: Vec<&str> = table.column_names().iter().map(String::as_str).collect();
            let step = Step::new(name, &inputs, Some(name.as_str()), vec![transform.clone()])?;
            Pipeline::new().push_step(step)?.apply(table)?;
        }
        Ok(())
    })
}
