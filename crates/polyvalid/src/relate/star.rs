//! Edge-ends, equal-direction bundles and the counter-clockwise star at a node.

use std::cmp::Ordering;

use crate::geom::{orientation_index, quadrant, Coord, Label, Location, Position};
use crate::graph::EdgeId;

/// Directed half of an edge leaving a node: from `p0` (the node) toward `p1`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EdgeEnd {
    edge: EdgeId,
    p0: Coord,
    p1: Coord,
    label: Label,
    quadrant: u8,
}

impl EdgeEnd {
    pub fn new(edge: EdgeId, p0: Coord, p1: Coord, label: Label) -> Self {
        let d = p1 - p0;
        Self {
            edge,
            p0,
            p1,
            label,
            quadrant: quadrant(d.x, d.y),
        }
    }

    #[inline]
    pub fn edge(&self) -> EdgeId {
        self.edge
    }

    /// Node coordinate.
    #[inline]
    pub fn coord(&self) -> Coord {
        self.p0
    }

    #[inline]
    pub fn direction(&self) -> Coord {
        self.p1 - self.p0
    }

    #[inline]
    pub fn label(&self) -> Label {
        self.label
    }

    /// Counter-clockwise angular order starting at the positive x axis.
    ///
    /// Ends with identical or collinear same-quadrant directions compare equal.
    pub fn compare_direction(&self, other: &EdgeEnd) -> Ordering {
        if self.direction() == other.direction() {
            return Ordering::Equal;
        }
        match self.quadrant.cmp(&other.quadrant) {
            Ordering::Equal => match orientation_index(other.p0, other.p1, self.p1) {
                1 => Ordering::Greater,
                -1 => Ordering::Less,
                _ => Ordering::Equal,
            },
            ord => ord,
        }
    }
}

/// Edge-ends of one node sharing a direction.
///
/// More than one end means the contributing edges coincide along that direction.
#[derive(Clone, Debug)]
pub struct EdgeEndBundle {
    ends: Vec<EdgeEnd>,
    label: Label,
}

impl EdgeEndBundle {
    fn new(e: EdgeEnd) -> Self {
        Self {
            label: e.label,
            ends: vec![e],
        }
    }

    /// First inserted end; defines the bundle direction.
    #[inline]
    pub fn leader(&self) -> &EdgeEnd {
        &self.ends[0]
    }

    #[inline]
    pub fn edge_ends(&self) -> &[EdgeEnd] {
        &self.ends
    }

    /// Edge of the leading end.
    #[inline]
    pub fn edge(&self) -> EdgeId {
        self.ends[0].edge
    }

    #[inline]
    pub fn direction(&self) -> Coord {
        self.ends[0].direction()
    }

    /// Merged label (valid after `compute_label`).
    #[inline]
    pub fn label(&self) -> Label {
        self.label
    }

    #[inline]
    pub fn is_duplicated(&self) -> bool {
        self.ends.len() > 1
    }

    /// Both sides known and different.
    #[inline]
    pub fn labels_consistent(&self) -> bool {
        matches!((self.label.left, self.label.right), (Some(l), Some(r)) if l != r)
    }

    /// Merge end labels: a side is Interior if any end says so, else Exterior;
    /// the on-location follows the mod-2 boundary rule.
    pub(crate) fn compute_label(&mut self) {
        let is_area = self.ends.iter().any(|e| e.label.is_area());
        let mut label = Label::default();
        let boundary_count = self
            .ends
            .iter()
            .filter(|e| e.label.on == Some(Location::Boundary))
            .count();
        let found_interior = self
            .ends
            .iter()
            .any(|e| e.label.on == Some(Location::Interior));
        label.on = if boundary_count > 0 {
            Some(if boundary_count % 2 == 1 {
                Location::Boundary
            } else {
                Location::Interior
            })
        } else if found_interior {
            Some(Location::Interior)
        } else {
            None
        };
        if is_area {
            for pos in [Position::Left, Position::Right] {
                label.set_location(pos, self.merged_side(pos));
            }
        }
        self.label = label;
    }

    fn merged_side(&self, pos: Position) -> Option<Location> {
        let mut loc = None;
        for e in self.ends.iter().filter(|e| e.label.is_area()) {
            match e.label.location(pos) {
                Some(Location::Interior) => return Some(Location::Interior),
                Some(Location::Exterior) => loc = Some(Location::Exterior),
                _ => {}
            }
        }
        loc
    }
}

/// Bundles around one node, kept sorted counter-clockwise.
#[derive(Clone, Debug, Default)]
pub struct BundleStar {
    bundles: Vec<EdgeEndBundle>,
}

impl BundleStar {
    /// Add `e` to the bundle with its direction, creating one if needed.
    pub fn insert(&mut self, e: EdgeEnd) {
        match self
            .bundles
            .binary_search_by(|b| b.leader().compare_direction(&e))
        {
            Ok(i) => self.bundles[i].ends.push(e),
            Err(i) => self.bundles.insert(i, EdgeEndBundle::new(e)),
        }
    }

    #[inline]
    pub fn bundles(&self) -> &[EdgeEndBundle] {
        &self.bundles
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.bundles.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.bundles.is_empty()
    }

    /// Total number of edge-ends incident to the node.
    pub fn degree(&self) -> usize {
        self.bundles.iter().map(|b| b.ends.len()).sum()
    }

    pub(crate) fn compute_labels(&mut self) {
        for b in &mut self.bundles {
            b.compute_label();
        }
    }

    /// Walking the bundles counter-clockwise, the location between two
    /// consecutive bundles must agree: each bundle's right side equals the
    /// previous bundle's left side, and no bundle has equal sides.
    pub fn is_area_labels_consistent(&self) -> bool {
        let Some(last) = self.bundles.last() else {
            return true;
        };
        let Some(mut current) = last.label.left else {
            return false;
        };
        for b in &self.bundles {
            let (Some(left), Some(right)) = (b.label.left, b.label.right) else {
                return false;
            };
            if left == right || right != current {
                return false;
            }
            current = left;
        }
        true
    }
}
