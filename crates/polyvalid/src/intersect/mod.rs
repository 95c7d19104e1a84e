//! Segment intersection classifier.
//!
//! Purpose
//! - Decide whether two segments meet and classify the contact: a single
//!   point (proper crossing or endpoint touch) or a collinear overlap.
//! - Report the distance of each intersection point along its input segment so
//!   the boundary graph can order intersections on an edge.
//!
//! Numerics
//! - Classification is driven by `orientation_index` signs only; the point of a
//!   proper crossing is computed from the line equations in coordinates
//!   centred on the segments and clamped back to an endpoint if rounding moves
//!   it outside both segment envelopes.

use crate::geom::{envelopes_intersect, in_envelope, orientation_index, Coord};

/// Outcome of one segment pair.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum SegmentIntersection {
    None,
    Point(Coord),
    Collinear(Coord, Coord),
}

/// Stateful classifier: keeps the last input pair and result so callers can
/// query distances and properness after `compute_intersection`.
#[derive(Clone, Debug)]
pub struct LineIntersector {
    input: [[Coord; 2]; 2],
    result: SegmentIntersection,
    proper: bool,
}

impl Default for LineIntersector {
    fn default() -> Self {
        Self {
            input: [[Coord::zeros(); 2]; 2],
            result: SegmentIntersection::None,
            proper: false,
        }
    }
}

impl LineIntersector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Classify segments `p1p2` and `q1q2`.
    pub fn compute_intersection(
        &mut self,
        p1: Coord,
        p2: Coord,
        q1: Coord,
        q2: Coord,
    ) -> SegmentIntersection {
        self.input = [[p1, p2], [q1, q2]];
        self.proper = false;
        self.result = self.classify(p1, p2, q1, q2);
        self.result
    }

    fn classify(&mut self, p1: Coord, p2: Coord, q1: Coord, q2: Coord) -> SegmentIntersection {
        if !envelopes_intersect(p1, p2, q1, q2) {
            return SegmentIntersection::None;
        }
        let pq1 = orientation_index(p1, p2, q1);
        let pq2 = orientation_index(p1, p2, q2);
        if (pq1 > 0 && pq2 > 0) || (pq1 < 0 && pq2 < 0) {
            return SegmentIntersection::None;
        }
        let qp1 = orientation_index(q1, q2, p1);
        let qp2 = orientation_index(q1, q2, p2);
        if (qp1 > 0 && qp2 > 0) || (qp1 < 0 && qp2 < 0) {
            return SegmentIntersection::None;
        }
        if pq1 == 0 && pq2 == 0 && qp1 == 0 && qp2 == 0 {
            return collinear_intersection(p1, p2, q1, q2);
        }
        if pq1 == 0 || pq2 == 0 || qp1 == 0 || qp2 == 0 {
            // Endpoint touch; prefer an exactly shared endpoint over the
            // orientation-derived one so equal inputs give equal nodes.
            let pt = if p1 == q1 || p1 == q2 {
                p1
            } else if p2 == q1 || p2 == q2 {
                p2
            } else if pq1 == 0 {
                q1
            } else if pq2 == 0 {
                q2
            } else if qp1 == 0 {
                p1
            } else {
                p2
            };
            return SegmentIntersection::Point(pt);
        }
        self.proper = true;
        SegmentIntersection::Point(proper_point(p1, p2, q1, q2))
    }

    #[inline]
    pub fn result(&self) -> SegmentIntersection {
        self.result
    }

    #[inline]
    pub fn has_intersection(&self) -> bool {
        !matches!(self.result, SegmentIntersection::None)
    }

    /// True if the last pair crossed through the interior of both segments.
    #[inline]
    pub fn is_proper(&self) -> bool {
        self.has_intersection() && self.proper
    }

    #[inline]
    pub fn intersection_count(&self) -> usize {
        match self.result {
            SegmentIntersection::None => 0,
            SegmentIntersection::Point(_) => 1,
            SegmentIntersection::Collinear(..) => 2,
        }
    }

    /// The `k`-th intersection point of the last pair.
    pub fn intersection(&self, k: usize) -> Option<Coord> {
        match (self.result, k) {
            (SegmentIntersection::Point(p), 0) => Some(p),
            (SegmentIntersection::Collinear(a, _), 0) => Some(a),
            (SegmentIntersection::Collinear(_, b), 1) => Some(b),
            _ => None,
        }
    }

    /// Distance of intersection `k` along input segment `segment` (0 = p, 1 = q).
    pub fn edge_distance(&self, segment: usize, k: usize) -> f64 {
        let Some(p) = self.intersection(k) else {
            return 0.0;
        };
        let [p0, p1] = self.input[segment];
        edge_distance(p, p0, p1)
    }
}

/// Distance of `p` from `p0` along segment `p0p1`, measured on the dominant axis.
///
/// Monotone along the segment and exactly zero at `p0`; used only for ordering
/// intersections on one segment.
pub fn edge_distance(p: Coord, p0: Coord, p1: Coord) -> f64 {
    let dx = (p1.x - p0.x).abs();
    let dy = (p1.y - p0.y).abs();
    if p == p0 {
        0.0
    } else if p == p1 {
        dx.max(dy)
    } else {
        let pdx = (p.x - p0.x).abs();
        let pdy = (p.y - p0.y).abs();
        let mut dist = if dx > dy { pdx } else { pdy };
        // Keep points distinct from p0 at non-zero distance.
        if dist == 0.0 {
            dist = pdx.max(pdy);
        }
        dist
    }
}

fn collinear_intersection(p1: Coord, p2: Coord, q1: Coord, q2: Coord) -> SegmentIntersection {
    let q1_in_p = in_envelope(p1, p2, q1);
    let q2_in_p = in_envelope(p1, p2, q2);
    let p1_in_q = in_envelope(q1, q2, p1);
    let p2_in_q = in_envelope(q1, q2, p2);
    if q1_in_p && q2_in_p {
        return SegmentIntersection::Collinear(q1, q2);
    }
    if p1_in_q && p2_in_q {
        return SegmentIntersection::Collinear(p1, p2);
    }
    let pick = |a: Coord, b: Coord, lone: bool| {
        if a == b && lone {
            SegmentIntersection::Point(a)
        } else {
            SegmentIntersection::Collinear(a, b)
        }
    };
    if q1_in_p && p1_in_q {
        return pick(q1, p1, !q2_in_p && !p2_in_q);
    }
    if q1_in_p && p2_in_q {
        return pick(q1, p2, !q2_in_p && !p1_in_q);
    }
    if q2_in_p && p1_in_q {
        return pick(q2, p1, !q1_in_p && !p2_in_q);
    }
    if q2_in_p && p2_in_q {
        return pick(q2, p2, !q1_in_p && !p1_in_q);
    }
    SegmentIntersection::None
}

fn proper_point(p1: Coord, p2: Coord, q1: Coord, q2: Coord) -> Coord {
    let mid = (p1 + p2 + q1 + q2) * 0.25;
    let (a1, a2, b1, b2) = (p1 - mid, p2 - mid, q1 - mid, q2 - mid);
    let r = a2 - a1;
    let s = b2 - b1;
    let denom = r.x * s.y - r.y * s.x;
    if denom != 0.0 {
        let w = b1 - a1;
        let t = (w.x * s.y - w.y * s.x) / denom;
        let pt = a1 + r * t + mid;
        if pt.x.is_finite() && pt.y.is_finite() && in_envelope(p1, p2, pt) && in_envelope(q1, q2, pt)
        {
            return pt;
        }
    }
    nearest_endpoint(p1, p2, q1, q2)
}

/// Endpoint closest to the other segment.
fn nearest_endpoint(p1: Coord, p2: Coord, q1: Coord, q2: Coord) -> Coord {
    let candidates = [
        (p1, point_segment_distance(p1, q1, q2)),
        (p2, point_segment_distance(p2, q1, q2)),
        (q1, point_segment_distance(q1, p1, p2)),
        (q2, point_segment_distance(q2, p1, p2)),
    ];
    let mut best = candidates[0];
    for c in &candidates[1..] {
        if c.1 < best.1 {
            best = *c;
        }
    }
    best.0
}

fn point_segment_distance(p: Coord, a: Coord, b: Coord) -> f64 {
    let ab = b - a;
    let len2 = ab.norm_squared();
    if len2 == 0.0 {
        return (p - a).norm();
    }
    let t = ((p - a).dot(&ab) / len2).clamp(0.0, 1.0);
    (p - (a + ab * t)).norm()
}
