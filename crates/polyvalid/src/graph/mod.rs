//! Boundary graph of an area geometry.
//!
//! Purpose
//! - Hold one edge per ring (repeated points removed) labelled with the area
//!   locations on its left and right, plus the boundary nodes.
//! - Compute self-nodes: run the segment classifier over every pair of
//!   boundary segments, record intersections on the edges and insert the
//!   corresponding nodes; report the first proper intersection.
//!
//! Split
//! - `types.rs` (edges, intersection lists, ids), `build.rs` (ring intake and
//!   labelling, `TopologyError`), `self_nodes.rs` (segment intersector).

mod build;
mod self_nodes;
mod types;

pub use build::{BoundaryGraph, BoundaryGraphBuilder, TopologyError};
pub use self_nodes::SelfNodes;
pub use types::{
    BoundaryNode, Edge, EdgeId, EdgeIntersection, EdgeIntersectionList, RingId, RingRole,
};

#[cfg(test)]
mod tests;
