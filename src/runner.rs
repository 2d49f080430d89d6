//! Pipeline execution semantics.
//!
//! Two modes exist. In-place mode walks the steps in pipeline order, feeds
//! each step's transforms the table projected onto its input columns, and
//! assigns the computed value back onto the table under the step's output
//! column. Pass-through mode threads the running value from step to step
//! instead and returns it, leaving the table untouched.
//!
//! Within one step the transforms form a strict left-to-right composition:
//! the first transform receives the projection, each later transform
//! receives its predecessor's output. Execution is single-threaded and
//! synchronous; later steps may read columns written by earlier ones.

use log::debug;

use crate::error::PipelineError;
use crate::pipeline::Pipeline;
use crate::step::Step;
use crate::table::{Table, Value};

/// Execution options.
///
/// By default missing input columns are not an error: the projection simply
/// omits them and the transform sees whatever is left (callers wanting a
/// guarantee pre-filter with the column-presence helpers). With `strict`
/// set, a step whose declared input columns are not all present fails with
/// [`PipelineError::MissingColumns`] before any transform runs.
#[derive(Clone, Debug, Default)]
pub struct RunConfig {
    /// Fail on absent input columns instead of projecting leniently.
    pub strict: bool,
}

impl RunConfig {
    /// Options with strict column checking enabled.
    pub fn strict() -> Self {
        Self { strict: true }
    }
}

impl Pipeline {
    /// Apply the pipeline to a table in place with default options.
    pub fn apply(&self, table: &mut Table) -> Result<(), PipelineError> {
        self.apply_with(table, &RunConfig::default())
    }

    /// Apply the pipeline to a table in place.
    ///
    /// For each step in pipeline order, each transform's output is assigned
    /// to the step's output column (when it has one), overwriting any
    /// existing column of that name. The table is borrowed exclusively for
    /// the duration of the call and not retained.
    pub fn apply_with(&self, table: &mut Table, config: &RunConfig) -> Result<(), PipelineError> {
        for step in self {
            if config.strict {
                check_columns(step, table.column_names())?;
            }
            debug!(
                "applying step '{}' on columns [{}]",
                step.name(),
                step.input_columns().join(", ")
            );
            let mut value = Value::Table(table.project(step.input_columns()));
            for transform in step.transforms() {
                value = transform(value)?;
                if let Some(output) = step.output_column() {
                    table.assign(output, value.clone())?;
                }
            }
        }
        Ok(())
    }

    /// Run the pipeline in pass-through mode with default options.
    pub fn apply_chained(&self, table: &Table) -> Result<Value, PipelineError> {
        self.apply_chained_with(table, &RunConfig::default())
    }

    /// Run the pipeline in pass-through mode.
    ///
    /// The value returned by each step's last transform becomes the working
    /// subject for the next step's projection; the final running value is
    /// returned and the table is left unmodified. Output columns are not
    /// written in this mode. A non-table running value is handed to the
    /// next step's transforms as-is (there is nothing to project).
    pub fn apply_chained_with(
        &self,
        table: &Table,
        config: &RunConfig,
    ) -> Result<Value, PipelineError> {
        let mut subject = Value::Table(table.clone());
        for step in self {
            debug!("chaining step '{}'", step.name());
            let mut value = match &subject {
                Value::Table(current) => {
                    if config.strict {
                        check_columns(step, current.column_names())?;
                    }
                    Value::Table(current.project(step.input_columns()))
                }
                other => {
                    if config.strict {
                        return Err(PipelineError::MissingColumns {
                            step: step.name().to_string(),
                            columns: step.input_columns().to_vec(),
                        });
                    }
                    other.clone()
                }
            };
            for transform in step.transforms() {
                value = transform(value)?;
            }
            subject = value;
        }
        Ok(subject)
    }
}

fn check_columns(step: &Step, available: &[String]) -> Result<(), PipelineError> {
    let missing: Vec<String> = step
        .input_columns()
        .iter()
        .filter(|name| !available.contains(*name))
        .cloned()
        .collect();
    if missing.is_empty() {
        Ok(())
    } else {
        Err(PipelineError::MissingColumns {
            step: step.name().to_string(),
            columns: missing,
        })
    }
}
