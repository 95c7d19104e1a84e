//! Self-noding: intersect all boundary segments with each other.
//!
//! Candidate pairs come from a sort-and-sweep over segment x extents; the
//! envelope test then runs on the survivors in edge/segment order.

use crate::geom::{envelopes_intersect, Coord};
use crate::intersect::LineIntersector;

use super::build::BoundaryGraph;
use super::types::Edge;

/// Summary of a self-noding pass.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct SelfNodes {
    /// First proper intersection found, in edge/segment order.
    pub proper_intersection_point: Option<Coord>,
    /// Non-trivial segment intersections seen (point or collinear).
    pub intersection_count: usize,
}

impl SelfNodes {
    #[inline]
    pub fn has_proper_intersection(&self) -> bool {
        self.proper_intersection_point.is_some()
    }
}

/// Pending record `(edge, segment, coord, dist)`; applied after the scan.
type Record = (usize, usize, Coord, f64);

struct SegmentIntersector {
    done_on_proper: bool,
    done: bool,
    result: SelfNodes,
    records: Vec<Record>,
}

impl SegmentIntersector {
    fn new(done_on_proper: bool) -> Self {
        Self {
            done_on_proper,
            done: false,
            result: SelfNodes::default(),
            records: Vec::new(),
        }
    }

    /// Adjacent segments of one edge (and the closing pair of a ring) always
    /// share a vertex; a single-point contact there is not a self-intersection.
    fn is_trivial(li: &LineIntersector, same_edge: bool, e0: &Edge, s0: usize, s1: usize) -> bool {
        if !same_edge || li.intersection_count() != 1 {
            return false;
        }
        if s0.abs_diff(s1) == 1 {
            return true;
        }
        if e0.is_closed() {
            let last = e0.num_points() - 2;
            if (s0 == 0 && s1 == last) || (s1 == 0 && s0 == last) {
                return true;
            }
        }
        false
    }

    fn add_intersections(
        &mut self,
        li: &mut LineIntersector,
        (i0, e0): (usize, &Edge),
        s0: usize,
        (i1, e1): (usize, &Edge),
        s1: usize,
    ) {
        let same_edge = i0 == i1;
        if same_edge && s0 == s1 {
            return;
        }
        let (p1, p2) = (e0.coords[s0], e0.coords[s0 + 1]);
        let (q1, q2) = (e1.coords[s1], e1.coords[s1 + 1]);
        if !envelopes_intersect(p1, p2, q1, q2) {
            return;
        }
        li.compute_intersection(p1, p2, q1, q2);
        if !li.has_intersection() || Self::is_trivial(li, same_edge, e0, s0, s1) {
            return;
        }
        self.result.intersection_count += 1;
        for k in 0..li.intersection_count() {
            if let Some(pt) = li.intersection(k) {
                self.records.push((i0, s0, pt, li.edge_distance(0, k)));
                self.records.push((i1, s1, pt, li.edge_distance(1, k)));
            }
        }
        if li.is_proper() {
            if self.result.proper_intersection_point.is_none() {
                self.result.proper_intersection_point = li.intersection(0);
                tracing::trace!(edge0 = i0, seg0 = s0, edge1 = i1, seg1 = s1, "proper intersection");
            }
            if self.done_on_proper {
                self.done = true;
            }
        }
    }
}

/// One boundary segment with its x extent.
struct SweepItem {
    edge: usize,
    seg: usize,
    min_x: f64,
    max_x: f64,
}

/// Segment pairs `(edge0, edge1, seg0, seg1)` whose x extents overlap, in scan
/// order: `edge0 <= edge1`, and `seg0 < seg1` within one edge.
///
/// Sort-and-sweep on `min_x`; coordinates are finite (checked by the builder).
pub(super) fn candidate_pairs(edges: &[Edge]) -> Vec<(usize, usize, usize, usize)> {
    let mut items: Vec<SweepItem> = edges
        .iter()
        .enumerate()
        .flat_map(|(edge, e)| {
            e.coords.windows(2).enumerate().map(move |(seg, w)| SweepItem {
                edge,
                seg,
                min_x: w[0].x.min(w[1].x),
                max_x: w[0].x.max(w[1].x),
            })
        })
        .collect();
    items.sort_by(|a, b| a.min_x.total_cmp(&b.min_x));
    let mut pairs = Vec::new();
    for (k, a) in items.iter().enumerate() {
        for b in items[k + 1..].iter().take_while(|b| b.min_x <= a.max_x) {
            let (p, q) = if (a.edge, a.seg) < (b.edge, b.seg) { (a, b) } else { (b, a) };
            pairs.push((p.edge, q.edge, p.seg, q.seg));
        }
    }
    pairs.sort_unstable();
    pairs
}

impl BoundaryGraph {
    /// Intersect every pair of boundary segments (including pairs within one
    /// ring), record the intersections on the edges and add them as nodes.
    ///
    /// With `done_on_proper`, scanning stops at the first proper intersection.
    /// Re-running on an unchanged graph records nothing new.
    pub fn compute_self_nodes(&mut self, li: &mut LineIntersector, done_on_proper: bool) -> SelfNodes {
        let mut si = SegmentIntersector::new(done_on_proper);
        let n = self.edges.len();
        for (i0, i1, s0, s1) in candidate_pairs(&self.edges) {
            si.add_intersections(li, (i0, &self.edges[i0]), s0, (i1, &self.edges[i1]), s1);
            if si.done {
                break;
            }
        }
        for &(edge, seg, pt, dist) in &si.records {
            self.edges[edge].add_intersection(pt, seg, dist);
        }
        self.add_self_intersection_nodes();
        tracing::debug!(
            edges = n,
            intersections = si.result.intersection_count,
            proper = si.result.has_proper_intersection(),
            "self nodes"
        );
        si.result
    }

    fn add_self_intersection_nodes(&mut self) {
        let coords: Vec<Coord> = self
            .edges
            .iter()
            .flat_map(|e| e.intersections.iter().map(|ei| ei.coord))
            .collect();
        for c in coords {
            self.insert_boundary_node(c);
        }
    }
}
