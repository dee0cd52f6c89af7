//! Collection of triangles left over after strip building

/// Moves every element for which `is_stripped` returns `false` to the front of `triangles`, preserving their relative
/// order.
///
/// Returns the number of elements kept; `triangles[count..]` is left with unspecified (but valid) contents.
pub fn compact_residuals<T: Copy>(triangles: &mut [T], is_stripped: impl Fn(usize) -> bool) -> usize {
    let mut count = 0;

    for i in 0..triangles.len() {
        if !is_stripped(i) {
            triangles[count] = triangles[i];
            count += 1;
        }
    }

    count
}
