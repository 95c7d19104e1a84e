//! Curated API surface.
//!
//! Re-exports the types a caller needs to build a boundary graph, run the
//! tester and read its verdict. Internal module paths may move; these names
//! stay.

// Geometry input and labels
pub use crate::geom::{AreaGeometry, Coord, Label, Location, Polygon, Position};
// Intersection classifier
pub use crate::intersect::{LineIntersector, SegmentIntersection};
// Boundary graph
pub use crate::graph::{
    BoundaryGraph, BoundaryGraphBuilder, EdgeId, RingId, RingRole, SelfNodes, TopologyError,
};
// Node consistency graph
pub use crate::relate::{BundleStar, EdgeEnd, EdgeEndBundle, Node, NodeGraph, NodeId};
// Tester and facade
pub use crate::consistent::{
    AreaCheck, CheckError, ConsistentAreaTester, TesterState, Violation, ViolationKind,
};
pub use crate::validate::{is_valid_area, validate_area, ValidationError, ValidationErrorKind};

/// Check node consistency of `area` and, if consistent, duplicate rings.
///
/// Returns the first failing check, or the passing duplicate-ring check.
/// Structural ring errors are returned as `Err`.
pub fn check_area(area: &AreaGeometry) -> Result<AreaCheck, TopologyError> {
    let mut graph = BoundaryGraph::from_area(area)?;
    let mut tester = ConsistentAreaTester::new(&mut graph);
    let consistency = tester.check_node_consistent_area();
    if !consistency.valid {
        return Ok(consistency);
    }
    Ok(tester.duplicate_ring_check().unwrap_or(consistency))
}
