//! Orientation predicates, quadrants, envelopes and ring helpers.

use super::types::Coord;

/// Orientation of `q` relative to the directed line `p1 → p2`.
///
/// Returns `1` if `q` is to the left (counter-clockwise turn), `-1` if to the
/// right, `0` if collinear. The sign is exact (adaptive-precision `orient2d`),
/// so nearly collinear triples are never rounded to `0`.
#[inline]
pub fn orientation_index(p1: Coord, p2: Coord, q: Coord) -> i8 {
    let det = robust::orient2d(robust_coord(p1), robust_coord(p2), robust_coord(q));
    if det > 0.0 {
        1
    } else if det < 0.0 {
        -1
    } else {
        0
    }
}

#[inline]
fn robust_coord(c: Coord) -> robust::Coord<f64> {
    robust::Coord { x: c.x, y: c.y }
}

/// Quadrant of direction `(dx, dy)`: 0 = NE, 1 = NW, 2 = SW, 3 = SE.
///
/// Quadrants increase counter-clockwise starting at the positive x axis; axis
/// directions belong to the quadrant they open (east → 0, north → 0, west → 1,
/// south → 3). The zero vector maps to 0.
#[inline]
pub fn quadrant(dx: f64, dy: f64) -> u8 {
    if dx >= 0.0 {
        if dy >= 0.0 {
            0
        } else {
            3
        }
    } else if dy >= 0.0 {
        1
    } else {
        2
    }
}

/// Signed area of a ring (shoelace, positive for counter-clockwise).
///
/// Coordinates are shifted by the first point to keep the products small.
pub fn signed_area(ring: &[Coord]) -> f64 {
    if ring.len() < 3 {
        return 0.0;
    }
    let o = ring[0];
    let mut sum = 0.0;
    for w in ring.windows(2) {
        let a = w[0] - o;
        let b = w[1] - o;
        sum += a.x * b.y - a.y * b.x;
    }
    sum * 0.5
}

/// True if the ring is oriented counter-clockwise.
#[inline]
pub fn is_ccw(ring: &[Coord]) -> bool {
    signed_area(ring) > 0.0
}

/// True if `q` lies in the axis-aligned envelope of `p1`, `p2` (closed).
#[inline]
pub fn in_envelope(p1: Coord, p2: Coord, q: Coord) -> bool {
    q.x >= p1.x.min(p2.x) && q.x <= p1.x.max(p2.x) && q.y >= p1.y.min(p2.y) && q.y <= p1.y.max(p2.y)
}

/// True if the envelopes of segments `p1p2` and `q1q2` intersect (closed).
#[inline]
pub fn envelopes_intersect(p1: Coord, p2: Coord, q1: Coord, q2: Coord) -> bool {
    let (pminx, pmaxx) = (p1.x.min(p2.x), p1.x.max(p2.x));
    let (pminy, pmaxy) = (p1.y.min(p2.y), p1.y.max(p2.y));
    let (qminx, qmaxx) = (q1.x.min(q2.x), q1.x.max(q2.x));
    let (qminy, qmaxy) = (q1.y.min(q2.y), q1.y.max(q2.y));
    !(qminx > pmaxx || qmaxx < pminx || qminy > pmaxy || qmaxy < pminy)
}

/// Drop consecutive duplicate coordinates.
pub fn remove_repeated_points(coords: &[Coord]) -> Vec<Coord> {
    let mut out: Vec<Coord> = Vec::with_capacity(coords.len());
    for &c in coords {
        if out.last() != Some(&c) {
            out.push(c);
        }
    }
    out
}
