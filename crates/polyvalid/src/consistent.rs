//! Node-consistency tester for area boundaries.
//!
//! Decides whether the boundary graph of an area geometry is well formed:
//! first no proper self-intersection, then consistent side labels around
//! every node. A second, orthogonal check looks for coincident rings; it is
//! only meaningful once the area is known to be node-consistent.
//!
//! Every check returns an `AreaCheck` value and also records the located
//! point, readable afterwards through `invalid_point`. Only the first
//! violation found is kept.

use std::fmt;

use crate::geom::Coord;
use crate::graph::BoundaryGraph;
use crate::intersect::LineIntersector;
use crate::relate::NodeGraph;

/// Kind of violation found by the tester.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ViolationKind {
    /// Two boundary segments cross through each other's interior.
    SelfIntersection,
    /// Area labels do not alternate around a node.
    InconsistentNodeLabels,
    /// Two rings occupy the same location.
    DuplicateRings,
}

/// A located violation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Violation {
    pub kind: ViolationKind,
    pub point: Coord,
}

/// Result of one check.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AreaCheck {
    pub valid: bool,
    pub violation: Option<Violation>,
}

impl AreaCheck {
    #[inline]
    pub fn valid() -> Self {
        Self {
            valid: true,
            violation: None,
        }
    }

    #[inline]
    pub fn invalid(kind: ViolationKind, point: Coord) -> Self {
        Self {
            valid: false,
            violation: Some(Violation { kind, point }),
        }
    }

    #[inline]
    pub fn is_valid(&self) -> bool {
        self.valid
    }

    #[inline]
    pub fn point(&self) -> Option<Coord> {
        self.violation.map(|v| v.point)
    }

    #[inline]
    pub fn kind(&self) -> Option<ViolationKind> {
        self.violation.map(|v| v.kind)
    }
}

/// Outcome of the most recent node-consistency check.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TesterState {
    Unchecked,
    Valid,
    InvalidSelfIntersection,
    InvalidNodeLabels,
}

/// Misuse of the tester.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CheckError {
    /// Duplicate-ring detection requires a preceding successful node-consistency check.
    NotNodeConsistent { state: TesterState },
}

impl fmt::Display for CheckError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CheckError::NotNodeConsistent { state } => write!(
                f,
                "duplicate-ring check needs a node-consistent area (last check: {state:?})"
            ),
        }
    }
}

impl std::error::Error for CheckError {}

/// Checks node consistency and duplicate rings of one boundary graph.
///
/// Holds the graph mutably: the self-noding pass writes intersection records
/// onto its edges.
#[derive(Debug)]
pub struct ConsistentAreaTester<'g> {
    graph: &'g mut BoundaryGraph,
    li: LineIntersector,
    node_graph: NodeGraph,
    invalid_point: Option<Coord>,
    state: TesterState,
}

impl<'g> ConsistentAreaTester<'g> {
    pub fn new(graph: &'g mut BoundaryGraph) -> Self {
        Self {
            graph,
            li: LineIntersector::new(),
            node_graph: NodeGraph::default(),
            invalid_point: None,
            state: TesterState::Unchecked,
        }
    }

    /// Location of the last violation; `None` before any check or after a passing one.
    #[inline]
    pub fn invalid_point(&self) -> Option<Coord> {
        self.invalid_point
    }

    #[inline]
    pub fn state(&self) -> TesterState {
        self.state
    }

    /// Node graph of the last check (empty unless the self-intersection test passed).
    #[inline]
    pub fn node_graph(&self) -> &NodeGraph {
        &self.node_graph
    }

    #[inline]
    pub fn graph(&self) -> &BoundaryGraph {
        &*self.graph
    }

    /// Boolean form of `check_node_consistent_area`.
    pub fn is_node_consistent_area(&mut self) -> bool {
        self.check_node_consistent_area().valid
    }

    /// Reject proper self-intersections, then verify label consistency at
    /// every node in node-graph order.
    pub fn check_node_consistent_area(&mut self) -> AreaCheck {
        let self_nodes = self.graph.compute_self_nodes(&mut self.li, true);
        if let Some(point) = self_nodes.proper_intersection_point {
            self.node_graph = NodeGraph::default();
            tracing::debug!(x = point.x, y = point.y, "proper self-intersection");
            return self.finish(
                TesterState::InvalidSelfIntersection,
                AreaCheck::invalid(ViolationKind::SelfIntersection, point),
            );
        }
        self.node_graph = NodeGraph::build(&*self.graph);
        let bad = self
            .node_graph
            .nodes()
            .iter()
            .find(|n| !n.is_area_labels_consistent())
            .map(|n| n.coord());
        match bad {
            Some(point) => {
                tracing::debug!(x = point.x, y = point.y, "inconsistent node labels");
                self.finish(
                    TesterState::InvalidNodeLabels,
                    AreaCheck::invalid(ViolationKind::InconsistentNodeLabels, point),
                )
            }
            None => self.finish(TesterState::Valid, AreaCheck::valid()),
        }
    }

    /// True if two rings coincide; records the start of the first edge found in
    /// a bundle with more than one edge-end.
    pub fn has_duplicate_rings(&mut self) -> Result<bool, CheckError> {
        Ok(!self.duplicate_ring_check()?.valid)
    }

    /// Value form of `has_duplicate_rings`: valid means no duplicate rings.
    pub fn duplicate_ring_check(&mut self) -> Result<AreaCheck, CheckError> {
        if self.state != TesterState::Valid {
            return Err(CheckError::NotNodeConsistent { state: self.state });
        }
        let dup = self
            .node_graph
            .nodes()
            .iter()
            .flat_map(|n| n.star().bundles())
            .find(|b| b.edge_ends().len() > 1)
            .map(|b| self.graph.edge(b.edge()).first_coord());
        let check = match dup {
            Some(point) => {
                tracing::debug!(x = point.x, y = point.y, "duplicate rings");
                AreaCheck::invalid(ViolationKind::DuplicateRings, point)
            }
            None => AreaCheck::valid(),
        };
        self.invalid_point = check.point();
        Ok(check)
    }

    fn finish(&mut self, state: TesterState, check: AreaCheck) -> AreaCheck {
        self.state = state;
        self.invalid_point = check.point();
        check
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geom::{AreaGeometry, Polygon};
    use nalgebra::vector;

    fn square(x0: f64, y0: f64, side: f64) -> Vec<Coord> {
        vec![
            vector![x0, y0],
            vector![x0 + side, y0],
            vector![x0 + side, y0 + side],
            vector![x0, y0 + side],
            vector![x0, y0],
        ]
    }

    fn graph(area: AreaGeometry) -> BoundaryGraph {
        BoundaryGraph::from_area(&area).unwrap()
    }

    #[test]
    fn simple_ring_is_consistent() {
        let mut g = graph(Polygon::simple(square(0.0, 0.0, 1.0)).into());
        let mut t = ConsistentAreaTester::new(&mut g);
        assert_eq!(t.state(), TesterState::Unchecked);
        assert!(t.invalid_point().is_none());
        let r = t.check_node_consistent_area();
        assert_eq!(r, AreaCheck::valid());
        assert_eq!(t.state(), TesterState::Valid);
        assert!(t.invalid_point().is_none());
        assert_eq!(t.has_duplicate_rings(), Ok(false));
        assert!(t.invalid_point().is_none());
    }

    #[test]
    fn figure_eight_reports_the_crossing() {
        let ring = vec![
            vector![0.0, 0.0],
            vector![2.0, 2.0],
            vector![2.0, 0.0],
            vector![0.0, 2.0],
            vector![0.0, 0.0],
        ];
        let mut g = graph(Polygon::simple(ring).into());
        let mut t = ConsistentAreaTester::new(&mut g);
        assert!(!t.is_node_consistent_area());
        assert_eq!(t.invalid_point(), Some(vector![1.0, 1.0]));
        assert_eq!(t.state(), TesterState::InvalidSelfIntersection);
        assert!(t.node_graph().is_empty());
    }

    #[test]
    fn touching_rings_are_consistent_without_duplicates() {
        let mut g = graph(AreaGeometry::multi(vec![
            Polygon::simple(square(0.0, 0.0, 1.0)),
            Polygon::simple(square(1.0, 1.0, 1.0)),
        ]));
        let mut t = ConsistentAreaTester::new(&mut g);
        assert!(t.is_node_consistent_area());
        assert!(!t.has_duplicate_rings().unwrap());
        assert!(t.invalid_point().is_none());
    }

    #[test]
    fn hole_touching_shell_at_a_vertex_is_consistent() {
        let hole = vec![
            vector![0.0, 0.0],
            vector![5.0, 2.0],
            vector![2.0, 5.0],
            vector![0.0, 0.0],
        ];
        let mut g = graph(Polygon::new(square(0.0, 0.0, 10.0), vec![hole]).into());
        let mut t = ConsistentAreaTester::new(&mut g);
        assert!(t.is_node_consistent_area());
        assert_eq!(t.has_duplicate_rings(), Ok(false));
    }

    #[test]
    fn coincident_rings_are_duplicates() {
        let ring = square(0.0, 0.0, 1.0);
        // Same ring, other start vertex and opposite winding.
        let mut other: Vec<Coord> = ring[2..].iter().chain(ring[1..3].iter()).copied().collect();
        other.reverse();
        let mut g = graph(AreaGeometry::multi(vec![
            Polygon::simple(ring.clone()),
            Polygon::simple(other),
        ]));
        let mut t = ConsistentAreaTester::new(&mut g);
        assert!(t.is_node_consistent_area());
        let dup = t.duplicate_ring_check().unwrap();
        assert_eq!(dup.kind(), Some(ViolationKind::DuplicateRings));
        assert_eq!(t.invalid_point(), Some(ring[0]));
        assert_eq!(t.has_duplicate_rings(), Ok(true));
    }

    #[test]
    fn overlapping_rings_have_inconsistent_labels() {
        let mut g = graph(AreaGeometry::multi(vec![
            Polygon::simple(square(0.0, 0.0, 2.0)),
            Polygon::simple(square(1.0, 0.0, 2.0)),
        ]));
        let mut t = ConsistentAreaTester::new(&mut g);
        let r = t.check_node_consistent_area();
        assert_eq!(r.kind(), Some(ViolationKind::InconsistentNodeLabels));
        assert_eq!(t.state(), TesterState::InvalidNodeLabels);
        let p = r.point().unwrap();
        let n = t.node_graph().find(p).expect("reported point is a node");
        assert!(!n.is_area_labels_consistent());
        assert_eq!(
            t.has_duplicate_rings(),
            Err(CheckError::NotNodeConsistent {
                state: TesterState::InvalidNodeLabels
            })
        );
        // A failed precondition leaves the recorded point untouched.
        assert_eq!(t.invalid_point(), Some(p));
    }

    #[test]
    fn duplicate_check_requires_a_prior_check() {
        let mut g = graph(Polygon::simple(square(0.0, 0.0, 1.0)).into());
        let mut t = ConsistentAreaTester::new(&mut g);
        let err = t.has_duplicate_rings().unwrap_err();
        assert_eq!(
            err,
            CheckError::NotNodeConsistent {
                state: TesterState::Unchecked
            }
        );
        assert!(err.to_string().contains("Unchecked"));
    }

    #[test]
    fn repeated_checks_agree() {
        let mut g = graph(AreaGeometry::multi(vec![
            Polygon::simple(square(0.0, 0.0, 2.0)),
            Polygon::simple(square(1.0, 0.0, 2.0)),
        ]));
        let mut t = ConsistentAreaTester::new(&mut g);
        let first = t.check_node_consistent_area();
        let p1 = t.invalid_point();
        let second = t.check_node_consistent_area();
        assert_eq!(first, second);
        assert_eq!(p1, t.invalid_point());
    }

    #[test]
    fn empty_area_is_trivially_consistent() {
        let mut g = graph(AreaGeometry::empty());
        let mut t = ConsistentAreaTester::new(&mut g);
        assert!(t.is_node_consistent_area());
        assert_eq!(t.has_duplicate_rings(), Ok(false));
        assert!(t.invalid_point().is_none());
        assert!(t.graph().is_empty());
    }
}
