//! Mesh generators shared by tests

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use crate::{Triangle, VertexIndex};

/// Counter-clockwise triangulation of a `width` × `height` grid of quads, the way a regular elevation grid is meshed.
///
/// Quads are split along alternating diagonals, so vertex valences vary like they do in terrain tiles.
pub fn grid_triangles<T: VertexIndex>(width: usize, height: usize) -> Vec<Triangle<T>> {
    let stride = width + 1;
    let vertex = |x: usize, y: usize| {
        num_traits::cast::<usize, T>(y * stride + x).expect("grid vertex index fits the index type")
    };

    let mut triangles = Vec::with_capacity(width * height * 2);

    for y in 0..height {
        for x in 0..width {
            let (a, b, c, d) = (vertex(x, y), vertex(x + 1, y), vertex(x + 1, y + 1), vertex(x, y + 1));

            if (x + y) % 2 == 0 {
                triangles.push([a, b, c]);
                triangles.push([a, c, d]);
            } else {
                triangles.push([a, b, d]);
                triangles.push([b, c, d]);
            }
        }
    }

    triangles
}

/// Returns `triangles` in a seeded random order, each rotated by a random amount.
pub fn shuffled<T: VertexIndex>(mut triangles: Vec<Triangle<T>>, seed: u64) -> Vec<Triangle<T>> {
    let mut rng = StdRng::seed_from_u64(seed);

    triangles.shuffle(&mut rng);

    for triangle in &mut triangles {
        triangle.rotate_left(rand::Rng::random_range(&mut rng, 0..3));
    }

    triangles
}

/// Rotates a triangle so its smallest index comes first, keeping winding; used to compare triangle sets.
pub fn normalized<T: VertexIndex>(triangle: Triangle<T>) -> Triangle<T> {
    let mut triangle = triangle;
    let min = (0..3).min_by_key(|&k| triangle[k]).unwrap_or(0);
    triangle.rotate_left(min);

    triangle
}

/// Sorted, normalized copy of a triangle list.
pub fn sorted_set<T: VertexIndex>(triangles: impl IntoIterator<Item = Triangle<T>>) -> Vec<Triangle<T>> {
    let mut set: Vec<_> = triangles.into_iter().map(normalized).collect();
    set.sort_unstable();

    set
}

/// Closed band of `width` quads, like a grid whose left and right columns are stitched together.
pub fn band_triangles<T: VertexIndex>(width: usize) -> Vec<Triangle<T>> {
    assert!(width >= 3);

    let vertex = |i: usize| num_traits::cast::<usize, T>(i).expect("band vertex index fits the index type");

    let mut triangles = Vec::with_capacity(width * 2);

    for x in 0..width {
        let next = (x + 1) % width;
        let (a, b, c, d) = (vertex(x), vertex(next), vertex(width + next), vertex(width + x));

        if x % 2 == 0 {
            triangles.push([a, b, c]);
            triangles.push([a, c, d]);
        } else {
            triangles.push([a, b, d]);
            triangles.push([b, c, d]);
        }
    }

    triangles
}
