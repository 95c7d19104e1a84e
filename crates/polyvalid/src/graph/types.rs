//! Data types of the boundary graph.

use std::cmp::Ordering;

use crate::geom::{Coord, Label};

/// Ring identifier (insertion order within the graph).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RingId(pub usize);

/// Edge identifier (index into `BoundaryGraph::edges`).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EdgeId(pub usize);

/// Role of a ring inside its polygon.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RingRole {
    Shell,
    Hole { shell: RingId },
}

/// Intersection point recorded on an edge.
///
/// `segment_index` is normalized so that a point equal to a vertex refers to the
/// segment starting at that vertex with `dist == 0`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EdgeIntersection {
    pub coord: Coord,
    pub segment_index: usize,
    pub dist: f64,
}

impl EdgeIntersection {
    #[inline]
    fn cmp_position(&self, segment_index: usize, dist: f64) -> Ordering {
        self.segment_index
            .cmp(&segment_index)
            .then(self.dist.partial_cmp(&dist).unwrap_or(Ordering::Equal))
    }
}

/// Intersections of one edge, sorted by `(segment_index, dist)` and deduplicated.
#[derive(Clone, Debug, Default)]
pub struct EdgeIntersectionList {
    items: Vec<EdgeIntersection>,
}

impl EdgeIntersectionList {
    /// Insert unless an intersection at the same position exists. Returns true if inserted.
    pub fn add(&mut self, coord: Coord, segment_index: usize, dist: f64) -> bool {
        match self
            .items
            .binary_search_by(|ei| ei.cmp_position(segment_index, dist))
        {
            Ok(_) => false,
            Err(at) => {
                self.items.insert(
                    at,
                    EdgeIntersection {
                        coord,
                        segment_index,
                        dist,
                    },
                );
                true
            }
        }
    }

    #[inline]
    pub fn iter(&self) -> std::slice::Iter<'_, EdgeIntersection> {
        self.items.iter()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Copy of the list with both edge endpoints added.
    pub fn with_endpoints(&self, coords: &[Coord]) -> EdgeIntersectionList {
        let mut out = self.clone();
        if let (Some(&first), Some(&last)) = (coords.first(), coords.last()) {
            out.add(first, 0, 0.0);
            out.add(last, coords.len() - 1, 0.0);
        }
        out
    }
}

/// One boundary ring as a graph edge.
#[derive(Clone, Debug)]
pub struct Edge {
    pub(crate) coords: Vec<Coord>,
    pub(crate) label: Label,
    pub(crate) ring: RingId,
    pub(crate) intersections: EdgeIntersectionList,
}

impl Edge {
    pub(crate) fn new(coords: Vec<Coord>, label: Label, ring: RingId) -> Self {
        Self {
            coords,
            label,
            ring,
            intersections: EdgeIntersectionList::default(),
        }
    }

    #[inline]
    pub fn coords(&self) -> &[Coord] {
        &self.coords
    }

    #[inline]
    pub fn coord(&self, i: usize) -> Coord {
        self.coords[i]
    }

    /// First coordinate (the ring start after repeated-point removal).
    #[inline]
    pub fn first_coord(&self) -> Coord {
        self.coords[0]
    }

    #[inline]
    pub fn num_points(&self) -> usize {
        self.coords.len()
    }

    #[inline]
    pub fn is_closed(&self) -> bool {
        self.coords.first() == self.coords.last()
    }

    #[inline]
    pub fn label(&self) -> Label {
        self.label
    }

    #[inline]
    pub fn ring(&self) -> RingId {
        self.ring
    }

    #[inline]
    pub fn intersections(&self) -> &EdgeIntersectionList {
        &self.intersections
    }

    /// Record an intersection found on `segment_index`, moving it onto the next
    /// segment when it coincides with that segment's start vertex.
    pub(crate) fn add_intersection(&mut self, coord: Coord, segment_index: usize, dist: f64) {
        let next = segment_index + 1;
        let (segment_index, dist) = if next < self.coords.len() && coord == self.coords[next] {
            (next, 0.0)
        } else {
            (segment_index, dist)
        };
        self.intersections.add(coord, segment_index, dist);
    }
}

/// Node of the boundary graph: a ring start point or a self-intersection.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BoundaryNode {
    pub coord: Coord,
    pub label: Label,
}
