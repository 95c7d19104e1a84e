//! Planar geometry primitives shared by the boundary graph and the checker.
//!
//! Purpose
//! - Provide the coordinate type (`Coord`), topological labels (`Location`,
//!   `Position`, `Label`) and the orientation predicates used to sort
//!   edge-ends around a node.
//! - Keep area input (`Polygon`, `AreaGeometry`) as plain coordinate rings;
//!   no parsing or CRS handling lives here.
//!
//! Conventions
//! - Coordinates are compared by exact equality. Two coordinates that differ
//!   only by the sign of a zero are treated as the same node key.
//! - Orientation follows the usual sign rule: `+1` left turn (counter-clockwise),
//!   `-1` right turn, `0` collinear.

mod area;
pub(crate) mod cfg;
mod orient;
mod types;

pub use area::{AreaGeometry, Polygon};
pub use orient::{
    envelopes_intersect, in_envelope, is_ccw, orientation_index, quadrant, remove_repeated_points,
    signed_area,
};
pub use types::{Coord, Label, Location, Position};

pub(crate) use types::{coord_key, CoordKey};
