//! Triangle adjacency detection
//!
//! Two triangles are adjacent when they share exactly two vertices, i.e. one edge. Every triangle keeps at most three
//! neighbors, in the order they were discovered.

use std::collections::HashMap;
use std::ops::Index;

use crate::hash::BuildVertexHasher;
use crate::{StripError, Triangle, VertexIndex};

/// Maximum number of neighbors kept per triangle; a triangle has three edges.
pub const MAX_HITS: usize = 3;

/// Records which vertices matched between a triangle and one of its neighbors.
///
/// The low nibble holds the matched vertex positions of the triangle owning the record, the high nibble those of the
/// neighbor. Each nibble has exactly two of its three low bits set.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct MatchMask(u8);

impl MatchMask {
    fn new(own: u8, neighbor: u8) -> Self {
        debug_assert!(own.count_ones() == 2 && own < 8);
        debug_assert!(neighbor.count_ones() == 2 && neighbor < 8);

        Self((neighbor << 4) | own)
    }

    /// Matched vertex positions of the triangle owning the record.
    pub fn own(self) -> u8 {
        self.0 & 0xf
    }

    /// Matched vertex positions of the neighbor.
    pub fn neighbor(self) -> u8 {
        self.0 >> 4
    }

    /// The packed mask, neighbor nibble high.
    pub fn bits(self) -> u8 {
        self.0
    }
}

/// Position of a shared edge within a triangle.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum SharedEdge {
    /// Vertices 0 and 1 are shared (pattern `0b011`).
    Edge01,
    /// Vertices 1 and 2 are shared (pattern `0b110`).
    Edge12,
    /// Vertices 2 and 0 are shared (pattern `0b101`).
    Edge20,
}

impl SharedEdge {
    /// Decodes a 3-bit matched position pattern; anything but exactly two set bits has no shared edge.
    pub fn from_pattern(pattern: u8) -> Option<Self> {
        match pattern {
            0b011 => Some(Self::Edge01),
            0b110 => Some(Self::Edge12),
            0b101 => Some(Self::Edge20),
            _ => None,
        }
    }

    /// Rotates `triangle` so the shared edge comes first and the opposite vertex last.
    ///
    /// Rotations are cyclic, so winding is preserved.
    pub fn canonicalize<T: Copy>(self, triangle: Triangle<T>) -> CanonicalTriangle<T> {
        let [a, b, c] = triangle;

        let [shared0, shared1, opposite] = match self {
            Self::Edge01 => [a, b, c],
            Self::Edge12 => [b, c, a],
            Self::Edge20 => [c, a, b],
        };

        CanonicalTriangle { shared0, shared1, opposite }
    }

    /// Rotates `triangle` so the shared edge comes last and the opposite vertex first.
    pub fn trailing<T: Copy>(self, triangle: Triangle<T>) -> Triangle<T> {
        let [a, b, c] = triangle;

        match self {
            Self::Edge01 => [c, a, b],
            Self::Edge12 => [a, b, c],
            Self::Edge20 => [b, c, a],
        }
    }
}

/// A neighbor's vertices in `(shared0, shared1, opposite)` order.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct CanonicalTriangle<T> {
    /// First vertex of the shared edge, in the neighbor's winding.
    pub shared0: T,
    /// Second vertex of the shared edge.
    pub shared1: T,
    /// The vertex not on the shared edge.
    pub opposite: T,
}

impl<T: Copy> CanonicalTriangle<T> {
    /// Returns the vertices as `[shared0, shared1, opposite]`.
    pub fn to_triangle(self) -> Triangle<T> {
        [self.shared0, self.shared1, self.opposite]
    }
}

/// One adjacent triangle.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct Hit<T> {
    /// Index of the neighbor in the input triangles.
    pub triangle: usize,
    pub mask: MatchMask,
    /// The neighbor rotated so the edge shared with the owner of the record comes first.
    pub canonical: CanonicalTriangle<T>,
}

/// Neighbors of one triangle.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct AdjacencyRecord<T> {
    hits: [Hit<T>; MAX_HITS],
    hit_count: u8,
    pub(crate) stripped: bool,
}

impl<T: Copy> AdjacencyRecord<T> {
    /// Number of neighbors found, `0..=3`.
    pub fn hit_count(&self) -> usize {
        self.hit_count as usize
    }

    /// Neighbors in discovery order.
    pub fn hits(&self) -> &[Hit<T>] {
        &self.hits[..self.hit_count as usize]
    }

    /// Whether the triangle has been consumed by a strip.
    pub fn is_stripped(&self) -> bool {
        self.stripped
    }

    fn is_full(&self) -> bool {
        self.hit_count as usize == MAX_HITS
    }

    fn push(&mut self, hit: Hit<T>) {
        debug_assert!(!self.is_full());

        self.hits[self.hit_count as usize] = hit;
        self.hit_count += 1;
    }
}

/// Per-triangle adjacency records, parallel to the input triangles.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AdjacencyTable<T> {
    records: Vec<AdjacencyRecord<T>>,
}

impl<T: VertexIndex> AdjacencyTable<T> {
    fn with_len(len: usize) -> Result<Self, StripError> {
        let mut records = Vec::new();
        records.try_reserve_exact(len)?;
        records.resize(len, AdjacencyRecord::default());

        Ok(Self { records })
    }

    /// Returns the number of records, equal to the number of triangles scanned.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether no triangles were scanned.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Records in input triangle order.
    pub fn records(&self) -> &[AdjacencyRecord<T>] {
        &self.records
    }

    pub(crate) fn is_stripped(&self, triangle: usize) -> bool {
        self.records[triangle].stripped
    }

    pub(crate) fn mark_stripped(&mut self, triangle: usize) {
        self.records[triangle].stripped = true;
    }
}

impl<T> Index<usize> for AdjacencyTable<T> {
    type Output = AdjacencyRecord<T>;

    fn index(&self, index: usize) -> &Self::Output {
        &self.records[index]
    }
}

/// Strategy used to find adjacent triangles. Both produce identical tables.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum AdjacencyScan {
    /// Compares every pair of triangles; quadratic in the triangle count.
    Exhaustive,
    /// Only compares triangles sharing at least one vertex, using a vertex to triangle index.
    #[default]
    Indexed,
}

/// Compares two triangles, returning the match mask if they share exactly two vertices.
///
/// Triangles must not be degenerate; identical triangles (three matches) aren't adjacent.
pub fn match_triangles<T: VertexIndex>(own: &Triangle<T>, other: &Triangle<T>) -> Option<MatchMask> {
    let mut own_bits = 0u8;
    let mut other_bits = 0u8;
    let mut matches = 0;

    for (k, v) in other.iter().enumerate() {
        if let Some(m) = own.iter().position(|o| o == v) {
            own_bits |= 1 << m;
            other_bits |= 1 << k;
            matches += 1;
        }
    }

    (matches == 2).then(|| MatchMask::new(own_bits, other_bits))
}

fn record_hit<T: VertexIndex>(record: &mut AdjacencyRecord<T>, triangles: &[Triangle<T>], i: usize, j: usize) {
    if let Some(mask) = match_triangles(&triangles[i], &triangles[j]) {
        // a valid mask always has a two-bit neighbor pattern
        if let Some(edge) = SharedEdge::from_pattern(mask.neighbor()) {
            record.push(Hit {
                triangle: j,
                mask,
                canonical: edge.canonicalize(triangles[j]),
            });
        }
    }
}

fn scan_exhaustive<T: VertexIndex>(table: &mut AdjacencyTable<T>, triangles: &[Triangle<T>]) {
    for (i, record) in table.records.iter_mut().enumerate() {
        for j in 0..triangles.len() {
            if j == i {
                continue;
            }

            record_hit(record, triangles, i, j);

            if record.is_full() {
                break;
            }
        }
    }
}

fn scan_indexed<T: VertexIndex>(table: &mut AdjacencyTable<T>, triangles: &[Triangle<T>]) -> Result<(), StripError> {
    // at most three distinct vertices per triangle, so the map never grows past this
    let mut vertex_triangles: HashMap<T, Vec<usize>, BuildVertexHasher> = HashMap::default();
    vertex_triangles.try_reserve(triangles.len().saturating_mul(3))?;

    // triangles are pushed in input order, so every list is sorted
    for (i, triangle) in triangles.iter().enumerate() {
        for v in triangle {
            let list = vertex_triangles.entry(*v).or_default();
            list.try_reserve(1)?;
            list.push(i);
        }
    }

    let mut candidates = Vec::new();

    for (i, record) in table.records.iter_mut().enumerate() {
        candidates.clear();

        for v in &triangles[i] {
            if let Some(list) = vertex_triangles.get(v) {
                candidates.try_reserve(list.len())?;
                candidates.extend_from_slice(list);
            }
        }

        // visiting candidates in input order keeps the discovery order of the exhaustive scan
        candidates.sort_unstable();
        candidates.dedup();

        for &j in &candidates {
            if j == i {
                continue;
            }

            record_hit(record, triangles, i, j);

            if record.is_full() {
                break;
            }
        }
    }

    Ok(())
}

/// Builds the adjacency table for `triangles`.
///
/// For every triangle, the first three other triangles (in input order) sharing exactly one edge with it are recorded.
/// Degenerate triangles are rejected.
pub fn scan_adjacency<T: VertexIndex>(
    triangles: &[Triangle<T>],
    scan: AdjacencyScan,
) -> Result<AdjacencyTable<T>, StripError> {
    crate::validate_triangles(triangles)?;

    let mut table = AdjacencyTable::with_len(triangles.len())?;

    match scan {
        AdjacencyScan::Exhaustive => scan_exhaustive(&mut table, triangles),
        AdjacencyScan::Indexed => scan_indexed(&mut table, triangles)?,
    }

    Ok(table)
}
