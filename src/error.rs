use std::error::Error;
use std::fmt;

/// Validation failures raised before a gather is reindexed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GatherError {
    /// The outer sequence had no elements, so no shape can be inferred.
    EmptyInput,
    /// Element `index` does not share the shape of element 0.
    ShapeMismatch {
        index: usize,
        expected: (usize, usize),
        found: (usize, usize),
    },
}

impl fmt::Display for GatherError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            GatherError::EmptyInput => {
                write!(f, "Gather sequence is empty; cannot infer matrix shape")
            }
            GatherError::ShapeMismatch {
                index,
                expected,
                found,
            } => write!(
                f,
                "Gather element {} has shape ({}, {}) but expected ({}, {})",
                index, found.0, found.1, expected.0, expected.1
            ),
        }
    }
}

impl Error for GatherError {}
