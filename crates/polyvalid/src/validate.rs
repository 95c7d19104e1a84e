//! Validation facade: ring preconditions, node consistency, duplicate rings.
//!
//! Turns the tester's verdicts into a single located `ValidationError` with a
//! human readable message, in this order:
//! 1. structural ring errors from the graph builder,
//! 2. self-intersections (proper crossings and inconsistent node labels are
//!    both reported as `SelfIntersection`),
//! 3. duplicate rings.

use std::fmt;

use crate::consistent::{ConsistentAreaTester, ViolationKind};
use crate::geom::{AreaGeometry, Coord};
use crate::graph::{BoundaryGraph, TopologyError};

/// Category of a validation failure.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ValidationErrorKind {
    InvalidCoordinate,
    RingNotClosed,
    TooFewPoints,
    RingStructure,
    SelfIntersection,
    DuplicateRings,
}

impl ValidationErrorKind {
    pub fn message(self) -> &'static str {
        match self {
            ValidationErrorKind::InvalidCoordinate => "Invalid Coordinate",
            ValidationErrorKind::RingNotClosed => "Ring is not closed",
            ValidationErrorKind::TooFewPoints => "Too few distinct points in geometry component",
            ValidationErrorKind::RingStructure => "Hole is not attached to a shell",
            ValidationErrorKind::SelfIntersection => "Self-intersection",
            ValidationErrorKind::DuplicateRings => "Duplicate Rings",
        }
    }
}

/// A failed validation, located where possible.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ValidationError {
    pub kind: ValidationErrorKind,
    pub point: Option<Coord>,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.point {
            Some(p) => write!(f, "{} at or near point ({}, {})", self.kind.message(), p.x, p.y),
            None => write!(f, "{}", self.kind.message()),
        }
    }
}

impl std::error::Error for ValidationError {}

impl From<TopologyError> for ValidationError {
    fn from(err: TopologyError) -> Self {
        let kind = match err {
            TopologyError::NonFiniteCoordinate { .. } => ValidationErrorKind::InvalidCoordinate,
            TopologyError::RingNotClosed { .. } => ValidationErrorKind::RingNotClosed,
            TopologyError::TooFewPoints { .. } => ValidationErrorKind::TooFewPoints,
            TopologyError::ShellHoleIdentity { .. } => ValidationErrorKind::RingStructure,
        };
        Self {
            kind,
            point: err.point(),
        }
    }
}

/// Validate the rings of `area` against the area well-formedness rules.
pub fn validate_area(area: &AreaGeometry) -> Result<(), ValidationError> {
    let mut graph = BoundaryGraph::from_area(area)?;
    validate_graph(&mut graph)
}

/// Run node consistency and then duplicate-ring detection on a built graph.
pub fn validate_graph(graph: &mut BoundaryGraph) -> Result<(), ValidationError> {
    let mut tester = ConsistentAreaTester::new(graph);
    let check = tester.check_node_consistent_area();
    if let Some(v) = check.violation {
        let kind = match v.kind {
            ViolationKind::DuplicateRings => ValidationErrorKind::DuplicateRings,
            ViolationKind::SelfIntersection | ViolationKind::InconsistentNodeLabels => {
                ValidationErrorKind::SelfIntersection
            }
        };
        return Err(ValidationError {
            kind,
            point: Some(v.point),
        });
    }
    // The consistency check above passed, so the precondition holds.
    if let Ok(dup) = tester.duplicate_ring_check() {
        if let Some(v) = dup.violation {
            return Err(ValidationError {
                kind: ValidationErrorKind::DuplicateRings,
                point: Some(v.point),
            });
        }
    }
    tracing::debug!(rings = tester.graph().ring_count(), "area valid");
    Ok(())
}

/// Boolean form of `validate_area`.
pub fn is_valid_area(area: &AreaGeometry) -> bool {
    validate_area(area).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geom::Polygon;
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

    #[test]
    fn valid_polygon_with_hole() {
        let area = Polygon::new(square(0.0, 0.0, 10.0), vec![square(2.0, 2.0, 3.0)]).into();
        assert_eq!(validate_area(&area), Ok(()));
        assert!(is_valid_area(&AreaGeometry::empty()));
    }

    #[test]
    fn figure_eight_message() {
        let ring = vec![
            vector![0.0, 0.0],
            vector![2.0, 2.0],
            vector![2.0, 0.0],
            vector![0.0, 2.0],
            vector![0.0, 0.0],
        ];
        let err = validate_area(&Polygon::simple(ring).into()).unwrap_err();
        assert_eq!(err.kind, ValidationErrorKind::SelfIntersection);
        assert_eq!(err.to_string(), "Self-intersection at or near point (1, 1)");
    }

    #[test]
    fn hole_equal_to_shell_is_a_self_intersection() {
        let ring = square(0.0, 0.0, 1.0);
        let err = validate_area(&Polygon::new(ring.clone(), vec![ring]).into()).unwrap_err();
        assert_eq!(err.kind, ValidationErrorKind::SelfIntersection);
        assert_eq!(err.point, Some(vector![0.0, 0.0]));
    }

    #[test]
    fn duplicate_shells_are_reported() {
        let area = AreaGeometry::multi(vec![
            Polygon::simple(square(5.0, 5.0, 1.0)),
            Polygon::simple(square(0.0, 0.0, 1.0)),
            Polygon::simple(square(0.0, 0.0, 1.0)),
        ]);
        let err = validate_area(&area).unwrap_err();
        assert_eq!(err.kind, ValidationErrorKind::DuplicateRings);
        assert_eq!(err.point, Some(vector![0.0, 0.0]));
        assert_eq!(err.to_string(), "Duplicate Rings at or near point (0, 0)");
    }

    #[test]
    fn structural_errors_map_to_kinds() {
        let short = vec![vector![0.0, 0.0], vector![1.0, 0.0], vector![0.0, 0.0]];
        let err = validate_area(&Polygon::simple(short).into()).unwrap_err();
        assert_eq!(err.kind, ValidationErrorKind::TooFewPoints);
        let open = vec![vector![0.0, 0.0], vector![1.0, 0.0], vector![1.0, 1.0], vector![0.0, 1.0]];
        let err = validate_area(&Polygon::simple(open).into()).unwrap_err();
        assert_eq!(err.kind, ValidationErrorKind::RingNotClosed);
        let err: ValidationError = TopologyError::ShellHoleIdentity {
            hole: crate::graph::RingId(1),
            shell: crate::graph::RingId(1),
        }
        .into();
        assert_eq!(err.to_string(), "Hole is not attached to a shell");
    }
}
