//! scenery-strips
//!
//! Converts indexed triangle lists produced by terrain triangulation into triangle strips.
//!
//! The pipeline runs in three stages over one triangle slice:
//!
//! 1. [adjacency]: finds, for every triangle, up to three neighbors sharing an edge
//! 2. [stripify]: greedily walks the adjacency graph and emits strips of two or more triangles
//! 3. [residual]: compacts the triangles which didn't end up in a strip to the front of the input
//!
//! [detect_strips] runs all three.
//!
//! # Features
//!
//! * `tools`: Builds the `strip_stats` binary, which reports strip statistics for OBJ files

pub mod adjacency;
pub mod error;
mod hash;
pub mod residual;
pub mod stripify;
#[cfg(test)]
mod testing;

use std::fmt::Debug;
use std::hash::Hash;

use num_traits::{PrimInt, Unsigned};

pub use crate::error::StripError;
pub use crate::stripify::{detect_strips, detect_strips_with, StripOptions, Strips};

/// Integer type used for vertex indices.
///
/// The width limits the number of distinct vertices a mesh can reference: [u16] allows indices `0..=65535`,
/// [u32] allows indices `0..=4294967295`. The same type is used for input triangles and emitted strips.
pub trait VertexIndex: PrimInt + Unsigned + Hash + Debug + Default + Send + Sync + 'static {}

impl VertexIndex for u16 {}
impl VertexIndex for u32 {}

/// Three vertex indices; identity of a triangle is its position in the input slice.
pub type Triangle<T> = [T; 3];

/// Checks that no triangle references the same vertex twice.
pub(crate) fn validate_triangles<T: VertexIndex>(triangles: &[Triangle<T>]) -> Result<(), StripError> {
    match triangles
        .iter()
        .position(|&[a, b, c]| a == b || b == c || c == a)
    {
        Some(triangle) => Err(StripError::DegenerateTriangle { triangle }),
        None => Ok(()),
    }
}
