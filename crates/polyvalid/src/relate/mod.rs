//! Node consistency graph.
//!
//! Purpose
//! - Turn a self-noded boundary graph into nodes with counter-clockwise stars
//!   of edge-end bundles, so that label consistency and duplicate directions
//!   can be read off per node.
//!
//! Layout
//! - Nodes live in an arena (`Vec<Node>`) addressed by `NodeId`; iteration
//!   order is insertion order and therefore reproducible for a given input.
//! - `star.rs` holds `EdgeEnd`, `EdgeEndBundle` and `BundleStar`;
//!   `build.rs` the construction from a `BoundaryGraph`.

mod build;
mod star;

use std::collections::HashMap;

use crate::geom::{coord_key, Coord, CoordKey, Label};

pub use star::{BundleStar, EdgeEnd, EdgeEndBundle};

/// Node identifier (index into `NodeGraph::nodes`).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub usize);

/// A point where boundary edges meet, with its bundle star.
#[derive(Clone, Debug)]
pub struct Node {
    coord: Coord,
    label: Label,
    star: BundleStar,
}

impl Node {
    #[inline]
    pub fn coord(&self) -> Coord {
        self.coord
    }

    #[inline]
    pub fn label(&self) -> Label {
        self.label
    }

    #[inline]
    pub fn star(&self) -> &BundleStar {
        &self.star
    }

    #[inline]
    pub fn is_area_labels_consistent(&self) -> bool {
        self.star.is_area_labels_consistent()
    }
}

/// Arena of nodes built from a boundary graph.
#[derive(Clone, Debug, Default)]
pub struct NodeGraph {
    nodes: Vec<Node>,
    index: HashMap<CoordKey, NodeId>,
}

impl NodeGraph {
    #[inline]
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    #[inline]
    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }

    /// Nodes with their ids, in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &Node)> + '_ {
        self.nodes.iter().enumerate().map(|(i, n)| (NodeId(i), n))
    }

    pub fn find(&self, coord: Coord) -> Option<&Node> {
        self.index.get(&coord_key(coord)).map(|id| &self.nodes[id.0])
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}
