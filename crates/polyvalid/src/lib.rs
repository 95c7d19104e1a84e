//! Area validity checks for planar polygons and multipolygons.
//!
//! Pipeline
//! - `geom`: coordinates, labels, orientation predicates, area input.
//! - `intersect`: segment intersection classifier (proper / endpoint / collinear).
//! - `graph`: boundary graph (one labelled edge per ring) and self-noding.
//! - `relate`: node graph with counter-clockwise stars of edge-end bundles.
//! - `consistent`: the node-consistency tester (self-intersections, label
//!   consistency, duplicate rings).
//! - `validate`: facade that turns verdicts into located errors.
//! - `rand`: reproducible random star rings for tests and benches.
//!
//! API Policy
//! - Module paths are public for tests and benches; prefer `api` or `prelude`
//!   for imports in callers.

pub mod api;
pub mod consistent;
pub mod geom;
pub mod graph;
pub mod intersect;
pub mod rand;
pub mod relate;
pub mod validate;

/// Library version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub use geom::Coord;

/// Common exports for quick imports in callers.
pub mod prelude {
    pub use crate::consistent::{AreaCheck, ConsistentAreaTester, ViolationKind};
    pub use crate::geom::{AreaGeometry, Coord, Polygon};
    pub use crate::graph::BoundaryGraph;
    pub use crate::validate::{is_valid_area, validate_area, ValidationError, ValidationErrorKind};
    pub use nalgebra::Vector2 as Vec2;
}
