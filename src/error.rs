//! Error types for pipeline construction and execution.

use std::fmt;

/// Error type for pipeline construction, composition, and execution.
#[derive(Debug)]
pub enum PipelineError {
    /// Malformed step definition (empty name, input list, or transform list).
    InvalidStep(String),
    /// Two script entries share a step name.
    DuplicateStepName(String),
    /// A name used for lookup or slicing does not exist in the pipeline.
    UnknownStep(String),
    /// Strict-mode execution found a step whose input columns are absent.
    MissingColumns {
        step: String,
        columns: Vec<String>,
    },
    /// A column assignment's length does not match the table's row count.
    LengthMismatch {
        column: String,
        expected: usize,
        got: usize,
    },
    /// A computed value has a shape that cannot be assigned to one column.
    InvalidAssignment(String),
    /// A transform function reported a failure.
    Transform(String),
    /// I/O error during table loading or writing.
    IoError(String),
    /// Malformed CSV input.
    CsvError(String),
}

impl fmt::Display for PipelineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PipelineError::InvalidStep(msg) => {
                write!(f, "Invalid step: {}", msg)
            }
            PipelineError::DuplicateStepName(name) => {
                write!(f, "Duplicate step name: '{}'", name)
            }
            PipelineError::UnknownStep(name) => {
                write!(f, "Unknown step: '{}'", name)
            }
            PipelineError::MissingColumns { step, columns } => {
                write!(
                    f,
                    "Step '{}' requires missing columns: {}",
                    step,
                    columns.join(", ")
                )
            }
            PipelineError::LengthMismatch {
                column,
                expected,
                got,
            } => {
                write!(
                    f,
                    "Column '{}' length mismatch: expected {} rows, got {}",
                    column, expected, got
                )
            }
            PipelineError::InvalidAssignment(msg) => {
                write!(f, "Invalid assignment: {}", msg)
            }
            PipelineError::Transform(msg) => {
                write!(f, "Transform error: {}", msg)
            }
            PipelineError::IoError(msg) => {
                write!(f, "I/O error: {}", msg)
            }
            PipelineError::CsvError(msg) => {
                write!(f, "CSV error: {}", msg)
            }
        }
    }
}

impl std::error::Error for PipelineError {}

impl From<std::io::Error> for PipelineError {
    fn from(err: std::io::Error) -> Self {
        PipelineError::IoError(err.to_string())
    }
}

impl From<csv::Error> for PipelineError {
    fn from(err: csv::Error) -> Self {
        PipelineError::CsvError(err.to_string())
    }
}
