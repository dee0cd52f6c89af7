//! Triangle list → triangle strip conversion

use crate::adjacency::{scan_adjacency, AdjacencyScan, AdjacencyTable, Hit, SharedEdge, MAX_HITS};
use crate::residual::compact_residuals;
use crate::{StripError, Triangle, VertexIndex};

/// Strips emitted by [detect_strips], stored back to back.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Strips<T> {
    lengths: Vec<usize>,
    indices: Vec<T>,
}

impl<T: VertexIndex> Strips<T> {
    pub fn new() -> Self {
        Self {
            lengths: Vec::new(),
            indices: Vec::new(),
        }
    }

    /// Returns the number of strips.
    pub fn len(&self) -> usize {
        self.lengths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lengths.is_empty()
    }

    /// Index count of every strip, in emission order.
    pub fn lengths(&self) -> &[usize] {
        &self.lengths
    }

    /// Indices of all strips, concatenated in emission order.
    pub fn indices(&self) -> &[T] {
        &self.indices
    }

    /// Returns the total number of indices of all strips.
    pub fn index_count(&self) -> usize {
        self.indices.len()
    }

    /// Returns the number of triangles covered by all strips.
    pub fn triangle_count(&self) -> usize {
        self.index_count() - 2 * self.len()
    }

    /// Iterates over the index lists of individual strips.
    pub fn iter(&self) -> impl Iterator<Item = &[T]> + '_ {
        let mut offset = 0;

        self.lengths.iter().map(move |&length| {
            let strip = &self.indices[offset..offset + length];
            offset += length;
            strip
        })
    }

    pub fn clear(&mut self) {
        self.lengths.clear();
        self.indices.clear();
    }
}

/// Options for [detect_strips_with].
#[derive(Clone, Debug, Default)]
pub struct StripOptions {
    /// How adjacent triangles are found; the result doesn't depend on it.
    pub scan: AdjacencyScan,
}

/// Returns the worst case number of strips and strip indices for `triangle_count` input triangles.
pub fn strips_bound(triangle_count: usize) -> (usize, usize) {
    // every strip has at least 2 triangles and 2 indices on top of its triangle count
    let max_strips = triangle_count / 2;

    if max_strips == 0 {
        (0, 0)
    } else {
        (max_strips, triangle_count + 2 * max_strips)
    }
}

enum Walk<T> {
    SeekingSeed,
    Extending {
        current: usize,
        window: Triangle<T>,
        appended: usize,
    },
    Terminated {
        appended: usize,
    },
}

struct StripBuilder<'a, T> {
    triangles: &'a [Triangle<T>],
    table: &'a mut AdjacencyTable<T>,
    strips: &'a mut Strips<T>,
}

impl<T: VertexIndex> StripBuilder<'_, T> {
    fn build(&mut self) {
        // triangles with fewer neighbors are the most constrained, so they start strips first
        for required in 1..=MAX_HITS {
            for seed in 0..self.triangles.len() {
                let record = &self.table[seed];

                if record.hit_count() == required && !record.is_stripped() {
                    self.walk(seed);
                }
            }
        }
    }

    fn walk(&mut self, seed: usize) {
        let start = self.strips.indices.len();
        let mut state = Walk::SeekingSeed;

        loop {
            state = match state {
                Walk::SeekingSeed => match self.seed_window(seed) {
                    Some((window, hit, next)) => {
                        self.strips.indices.extend_from_slice(&window);
                        self.extend(hit, next, 0)
                    }
                    None => Walk::Terminated { appended: 0 },
                },
                Walk::Extending {
                    current,
                    window,
                    appended,
                } => match self.next_hit(seed, current, &window, appended) {
                    Some((hit, next)) => self.extend(hit, next, appended),
                    None => Walk::Terminated { appended },
                },
                Walk::Terminated { appended } => {
                    if appended > 0 {
                        let triangles = appended + 1;

                        self.strips.lengths.push(triangles + 2);
                        self.table.mark_stripped(seed);

                        log::trace!(
                            "strip of {} triangles seeded at triangle {}: {:?}",
                            triangles,
                            seed,
                            &self.strips.indices[start..]
                        );
                    }

                    debug_assert_eq!(self.strips.indices.len() - start, if appended > 0 { appended + 3 } else { 0 });

                    return;
                }
            };
        }
    }

    /// Finds the first orientation of `seed` which can be extended, trying its neighbors in discovery order.
    fn seed_window(&self, seed: usize) -> Option<(Triangle<T>, Hit<T>, Triangle<T>)> {
        let triangle = self.triangles[seed];

        self.table[seed].hits().iter().find_map(|slot| {
            // put the edge shared with this neighbor last
            let window = SharedEdge::from_pattern(slot.mask.own())?.trailing(triangle);

            self.next_hit(seed, seed, &window, 0).map(|(hit, next)| (window, hit, next))
        })
    }

    /// Finds the neighbor of `current` continuing the strip ending in `window`, and the window after it.
    ///
    /// Strip triangles alternate winding, so the edge to continue across alternates between `last0 → last2` (after
    /// an odd number of appended triangles) and `last2 → last1` (after an even number). A neighbor traversing that
    /// edge in the same direction is preferred; otherwise the first one traversing it backwards is taken, in which
    /// case the strip renders that triangle with its winding flipped.
    fn next_hit(
        &self,
        seed: usize,
        current: usize,
        window: &Triangle<T>,
        appended: usize,
    ) -> Option<(Hit<T>, Triangle<T>)> {
        let [last0, last1, last2] = *window;
        let (from, to) = if appended % 2 == 1 { (last0, last2) } else { (last2, last1) };

        // the seed isn't flagged until its strip is complete
        let eligible = |hit: &&Hit<T>| hit.triangle != seed && !self.table.is_stripped(hit.triangle);
        let hits = self.table[current].hits();

        let hit = hits
            .iter()
            .filter(eligible)
            .find(|hit| hit.canonical.shared0 == from && hit.canonical.shared1 == to)
            .or_else(|| {
                hits.iter()
                    .filter(eligible)
                    .find(|hit| hit.canonical.shared0 == to && hit.canonical.shared1 == from)
            })?;

        Some((*hit, [from, to, hit.canonical.opposite]))
    }

    fn extend(&mut self, hit: Hit<T>, window: Triangle<T>, appended: usize) -> Walk<T> {
        debug_assert_eq!(window[2], hit.canonical.opposite);

        self.table.mark_stripped(hit.triangle);
        self.strips.indices.push(hit.canonical.opposite);

        Walk::Extending {
            current: hit.triangle,
            window,
            appended: appended + 1,
        }
    }
}

/// Converts as much of a triangle list as possible into triangle strips, using default [StripOptions].
///
/// See [detect_strips_with].
pub fn detect_strips<T: VertexIndex>(
    triangles: &mut [Triangle<T>],
    strips: &mut Strips<T>,
) -> Result<usize, StripError> {
    detect_strips_with(triangles, strips, &StripOptions::default())
}

/// Converts as much of a triangle list as possible into triangle strips.
///
/// Strips are appended to `strips`; every strip covers at least 2 triangles and has the same winding as the triangles
/// it was built from, provided the input is consistently wound. Triangles which didn't end up in any strip are moved to
/// the front of `triangles`, keeping their relative order.
///
/// Returns the number of these residual triangles.
///
/// The strips are built greedily: triangles with 1, then 2, then 3 neighbors are used as strip starting points, and a
/// strip is extended across the first matching edge found, so the result is deterministic but not optimal.
///
/// # Errors
///
/// Fails if a triangle is degenerate or if buffers can't be allocated. Neither `triangles` nor `strips` are modified
/// in that case.
pub fn detect_strips_with<T: VertexIndex>(
    triangles: &mut [Triangle<T>],
    strips: &mut Strips<T>,
    options: &StripOptions,
) -> Result<usize, StripError> {
    let mut table = scan_adjacency(triangles, options.scan)?;

    let (max_strips, max_indices) = strips_bound(triangles.len());
    strips.lengths.try_reserve(max_strips)?;
    strips.indices.try_reserve(max_indices)?;

    let strip_offset = strips.len();
    let triangle_offset = strips.triangle_count();

    StripBuilder {
        triangles: &*triangles,
        table: &mut table,
        strips: &mut *strips,
    }
    .build();

    let triangle_count = triangles.len();
    let residual_count = compact_residuals(triangles, |i| table.is_stripped(i));

    log::debug!(
        "detected {} strips covering {} of {} triangles, {} residual",
        strips.len() - strip_offset,
        strips.triangle_count() - triangle_offset,
        triangle_count,
        residual_count
    );

    Ok(residual_count)
}

/// Converts strips back to a triangle list.
///
/// Odd triangles of every strip are flipped, so each triangle has the winding it was rendered with.
pub fn unstripify<T: VertexIndex>(strips: &Strips<T>) -> Vec<Triangle<T>> {
    let mut triangles = Vec::with_capacity(strips.triangle_count());

    for strip in strips.iter() {
        for (i, abc) in strip.windows(3).enumerate() {
            let (mut a, mut b, c) = (abc[0], abc[1], abc[2]);

            // flip winding for odd triangles
            if (i & 1) != 0 {
                std::mem::swap(&mut a, &mut b);
            }

            triangles.push([a, b, c]);
        }
    }

    triangles
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct StripStatistics {
    pub strip_count: usize,
    pub stripped_triangles: usize,
    pub residual_triangles: usize,
    pub index_count: usize,
    /// Stripped triangles / strip count
    pub triangles_per_strip: f32,
    /// (Strip indices + 3 * residual triangles) / triangle count
    ///
    /// Best case approaches 1.0, worst case 3.0 (nothing stripped)
    pub indices_per_triangle: f32,
}

/// Returns statistics of the output of [detect_strips].
pub fn analyze_strips<T: VertexIndex>(strips: &Strips<T>, residual_count: usize) -> StripStatistics {
    let stripped_triangles = strips.triangle_count();
    let total_triangles = stripped_triangles + residual_count;
    let index_count = strips.index_count() + residual_count * 3;

    StripStatistics {
        strip_count: strips.len(),
        stripped_triangles,
        residual_triangles: residual_count,
        index_count,
        triangles_per_strip: if strips.is_empty() {
            0.0
        } else {
            stripped_triangles as f32 / strips.len() as f32
        },
        indices_per_triangle: if total_triangles == 0 {
            0.0
        } else {
            index_count as f32 / total_triangles as f32
        },
    }
}
