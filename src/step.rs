//! The atomic unit of a pipeline.

use std::fmt;
use std::sync::Arc;

use crate::error::PipelineError;
use crate::table::Value;

/// An opaque unary transform function.
///
/// A transform receives the table projected onto a step's input columns
/// (or the previous transform's output, when chained within a step) and
/// returns any [`Value`] assignable as a table column.
pub type Transform = Arc<dyn Fn(Value) -> Result<Value, PipelineError> + Send + Sync>;

/// Wrap a closure as a [`Transform`].
pub fn transform<F>(f: F) -> Transform
where
    F: Fn(Value) -> Result<Value, PipelineError> + Send + Sync + 'static,
{
    Arc::new(f)
}

/// One named unit of a pipeline: input columns, an optional output column,
/// and an ordered list of transform functions.
///
/// Construction validates shape only; column presence against a concrete
/// table is checked at execution time, so one step can be reused against
/// tables with different schemas.
#[derive(Clone)]
pub struct Step {
    name: String,
    input_columns: Vec<String>,
    output_column: Option<String>,
    transforms: Vec<Transform>,
}

impl Step {
    /// Build a step from its script entry:
    /// `(name, input_columns, output_column, transforms)`.
    ///
    /// # Errors
    /// Returns [`PipelineError::InvalidStep`] if the name is empty, the
    /// input column list is empty, or the transform list is empty.
    pub fn new(
        name: &str,
        input_columns: &[&str],
        output_column: Option<&str>,
        transforms: Vec<Transform>,
    ) -> Result<Self, PipelineError> {
        if name.is_empty() {
            return Err(PipelineError::InvalidStep(
                "step name must not be empty".to_string(),
            ));
        }
        if input_columns.is_empty() {
            return Err(PipelineError::InvalidStep(format!(
                "step '{}' has no input columns",
                name
            )));
        }
        if transforms.is_empty() {
            return Err(PipelineError::InvalidStep(format!(
                "step '{}' has no transforms",
                name
            )));
        }
        Ok(Self {
            name: name.to_string(),
            input_columns: input_columns.iter().map(|c| c.to_string()).collect(),
            output_column: output_column.map(str::to_string),
            transforms,
        })
    }

    /// The step's name, its primary key within a pipeline.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Input column names in declaration order.
    pub fn input_columns(&self) -> &[String] {
        &self.input_columns
    }

    /// Output column name, if the step writes one.
    ///
    /// A step without an output column runs its transforms for their side
    /// effects only.
    pub fn output_column(&self) -> Option<&str> {
        self.output_column.as_deref()
    }

    /// The transform functions in application order.
    pub fn transforms(&self) -> &[Transform] {
        &self.transforms
    }
}

impl fmt::Debug for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Step")
            .field("name", &self.name)
            .field("input_columns", &self.input_columns)
            .field("output_column", &self.output_column)
            .field("transforms", &self.transforms.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn identity() -> Transform {
        transform(Ok)
    }

    #[test]
    fn test_step_new() {
        let step = Step::new("scale", &["A", "B"], Some("scaled"), vec![identity()]).unwrap();
        assert_eq!(step.name(), "scale");
        assert_eq!(step.input_columns(), ["A", "B"]);
        assert_eq!(step.output_column(), Some("scaled"));
        assert_eq!(step.transforms().len(), 1);
    }

    #[test]
    fn test_step_without_output_column() {
        let step = Step::new("probe", &["A"], None, vec![identity()]).unwrap();
        assert_eq!(step.output_column(), None);
    }

    #[test]
    fn test_empty_name_rejected() {
        let result = Step::new("", &["A"], None, vec![identity()]);
        assert!(matches!(result, Err(PipelineError::InvalidStep(_))));
    }

    #[test]
    fn test_empty_inputs_rejected() {
        let result = Step::new("s", &[], None, vec![identity()]);
        assert!(matches!(result, Err(PipelineError::InvalidStep(_))));
    }

    #[test]
    fn test_empty_transforms_rejected() {
        let result = Step::new("s", &["A"], None, Vec::new());
        assert!(matches!(result, Err(PipelineError::InvalidStep(_))));
    }

    #[test]
    fn test_debug_hides_closures() {
        let step = Step::new("s", &["A"], None, vec![identity(), identity()]).unwrap();
        let text = format!("{:?}", step);
        assert!(text.contains("\"s\""));
        assert!(text.contains("transforms: 2"));
    }
}
