//! Errors reported by strip detection

use std::collections::TryReserveError;

/// Ways that strip detection can fail.
///
/// Failures are detected before any caller-visible state is changed: when an error is returned, the input
/// triangles and the strip accumulator are exactly as they were passed in.
#[derive(Clone, Debug, Eq, PartialEq, thiserror::Error)]
#[non_exhaustive]
pub enum StripError {
    /// A triangle references the same vertex index more than once.
    #[error("triangle {triangle} is degenerate (repeats a vertex index)")]
    DegenerateTriangle {
        /// Position of the offending triangle in the input.
        triangle: usize,
    },
    /// Memory for the adjacency table or the output buffers couldn't be reserved.
    #[error("failed to allocate strip detection buffers")]
    Allocation(#[from] TryReserveError),
}
