//! Ordered, name-keyed pipelines of steps and their composition algebra.
//!
//! A [`Pipeline`] is data, not code: it is built from a script of
//! [`Step`]s and can be concatenated (`+`), repeated (`*`), sliced by step
//! name or position, and iterated, each operation producing a new pipeline
//! and leaving its operands untouched.

use std::collections::HashMap;
use std::fmt;
use std::ops::{Add, Bound, Mul, RangeBounds};
use std::slice;

use crate::error::PipelineError;
use crate::step::Step;

/// An ordered, name-keyed collection of steps.
///
/// Step order is significant and preserved: insertion order is execution
/// order is iteration order. Name-based lookup resolves to the *last* step
/// with that name, so pipelines produced by concatenation or repetition
/// stay well-defined under lookup and slicing even when names collide.
///
/// Pipelines are immutable once built; the algebra returns new instances
/// and never lets mutation of a result reach its operands.
#[derive(Clone, Debug, Default)]
pub struct Pipeline {
    steps: Vec<Step>,
    index: HashMap<String, usize>,
}

impl Pipeline {
    /// Create an empty pipeline.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a pipeline from a script: an ordered list of steps.
    ///
    /// # Errors
    /// Returns [`PipelineError::DuplicateStepName`] if two entries share a
    /// name. Collisions are legal only when introduced by the algebra.
    pub fn from_script(steps: Vec<Step>) -> Result<Self, PipelineError> {
        let mut pipeline = Pipeline::new();
        for step in steps {
            pipeline = pipeline.push_step(step)?;
        }
        Ok(pipeline)
    }

    /// Append one step, consuming and returning the pipeline.
    ///
    /// # Errors
    /// Returns [`PipelineError::DuplicateStepName`] if the name is taken.
    pub fn push_step(mut self, step: Step) -> Result<Self, PipelineError> {
        if self.index.contains_key(step.name()) {
            return Err(PipelineError::DuplicateStepName(step.name().to_string()));
        }
        self.index.insert(step.name().to_string(), self.steps.len());
        self.steps.push(step);
        Ok(self)
    }

    /// Build a pipeline from an existing step collection.
    ///
    /// Used by the algebra: name collisions are tolerated and the index is
    /// rebuilt last-write-wins, so lookup and name slicing resolve to the
    /// final occurrence.
    fn from_steps(steps: Vec<Step>) -> Self {
        let index = steps
            .iter()
            .enumerate()
            .map(|(i, step)| (step.name().to_string(), i))
            .collect();
        Self { steps, index }
    }

    /// Number of steps.
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// Whether the pipeline has no steps.
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Step names in pipeline order.
    pub fn step_names(&self) -> Vec<&str> {
        self.steps.iter().map(Step::name).collect()
    }

    /// Whether a step with the given name exists.
    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// Look up a step by name (the last occurrence, if names collide).
    pub fn get(&self, name: &str) -> Option<&Step> {
        self.index.get(name).map(|&i| &self.steps[i])
    }

    /// The steps in pipeline order.
    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    /// Iterate steps in pipeline order.
    pub fn iter(&self) -> slice::Iter<'_, Step> {
        self.steps.iter()
    }

    /// Slice the contiguous run of steps between two step names, inclusive
    /// of both endpoints.
    ///
    /// A `None` bound defaults to the first or last step. A start that
    /// falls after its end yields an empty pipeline.
    ///
    /// # Errors
    /// Returns [`PipelineError::UnknownStep`] if a named bound does not
    /// exist in the pipeline.
    pub fn slice_names(
        &self,
        start: Option<&str>,
        end: Option<&str>,
    ) -> Result<Pipeline, PipelineError> {
        let start = match start {
            Some(name) => self.resolve(name)?,
            None => 0,
        };
        let end = match end {
            Some(name) => Some(self.resolve(name)?),
            None => self.len().checked_sub(1),
        };
        match end {
            Some(end) if start <= end => {
                Ok(Pipeline::from_steps(self.steps[start..=end].to_vec()))
            }
            _ => Ok(Pipeline::new()),
        }
    }

    /// Slice by step position with standard half-open range semantics.
    ///
    /// Out-of-range bounds are clamped, so `pipeline.slice(..)` copies the
    /// whole pipeline and `pipeline.slice(9..)` of a shorter pipeline is
    /// empty.
    pub fn slice<R: RangeBounds<usize>>(&self, range: R) -> Pipeline {
        let start = match range.start_bound() {
            Bound::Included(&i) => i,
            Bound::Excluded(&i) => i + 1,
            Bound::Unbounded => 0,
        };
        let end = match range.end_bound() {
            Bound::Included(&i) => i + 1,
            Bound::Excluded(&i) => i,
            Bound::Unbounded => self.len(),
        };
        let end = end.min(self.len());
        if start >= end {
            return Pipeline::new();
        }
        Pipeline::from_steps(self.steps[start..end].to_vec())
    }

    fn resolve(&self, name: &str) -> Result<usize, PipelineError> {
        self.index
            .get(name)
            .copied()
            .ok_or_else(|| PipelineError::UnknownStep(name.to_string()))
    }
}

/// Concatenation: the left operand's steps followed by the right's.
///
/// Name collisions are retained as distinct execution positions; lookup and
/// name slicing resolve to the last occurrence.
impl Add for Pipeline {
    type Output = Pipeline;

    fn add(mut self, other: Pipeline) -> Pipeline {
        self.steps.extend(other.steps);
        Pipeline::from_steps(self.steps)
    }
}

impl Add for &Pipeline {
    type Output = Pipeline;

    fn add(self, other: &Pipeline) -> Pipeline {
        self.clone() + other.clone()
    }
}

/// Repetition: the pipeline concatenated with itself `n` times.
///
/// `n = 0` yields an empty pipeline. With `n > 1` every step name collides
/// with its earlier repetitions; name lookup then resolves to the final
/// repetition, so repeated pipelines are meant for replay, not name slicing.
impl Mul<usize> for Pipeline {
    type Output = Pipeline;

    fn mul(self, n: usize) -> Pipeline {
        &self * n
    }
}

impl Mul<usize> for &Pipeline {
    type Output = Pipeline;

    fn mul(self, n: usize) -> Pipeline {
        let mut steps = Vec::with_capacity(self.len() * n);
        for _ in 0..n {
            steps.extend(self.steps.iter().cloned());
        }
        Pipeline::from_steps(steps)
    }
}

impl<'a> IntoIterator for &'a Pipeline {
    type Item = &'a Step;
    type IntoIter = slice::Iter<'a, Step>;

    fn into_iter(self) -> Self::IntoIter {
        self.steps.iter()
    }
}

impl IntoIterator for Pipeline {
    type Item = Step;
    type IntoIter = std::vec::IntoIter<Step>;

    fn into_iter(self) -> Self::IntoIter {
        self.steps.into_iter()
    }
}

/// Tabular listing of the pipeline's steps for diagnostics.
impl fmt::Display for Pipeline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rows: Vec<(&str, String, &str)> = self
            .steps
            .iter()
            .map(|step| {
                let inputs = step.input_columns().join(", ");
                (step.name(), inputs, step.output_column().unwrap_or("-"))
            })
            .collect();
        let mut name_width = "step".len();
        let mut input_width = "inputs".len();
        for (name, inputs, _) in &rows {
            name_width = name_width.max(name.len());
            input_width = input_width.max(inputs.len());
        }
        writeln!(
            f,
            "{:<name_width$}  {:<input_width$}  output",
            "step", "inputs"
        )?;
        for (name, inputs, output) in &rows {
            writeln!(
                f,
                "{:<name_width$}  {:<input_width$}  {}",
                name, inputs, output
            )?;
        }
        Ok(())
    }
}
