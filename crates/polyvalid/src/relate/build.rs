//! Node graph construction: split edges into edge-ends at their intersections.

use std::collections::HashMap;

use crate::geom::{coord_key, Coord, Label, Location};
use crate::graph::{BoundaryGraph, Edge, EdgeId, EdgeIntersection};

use super::star::{BundleStar, EdgeEnd};
use super::{Node, NodeGraph, NodeId};

impl NodeGraph {
    /// Build the node graph of `graph`. Expects self-nodes to be computed and
    /// free of proper intersections; otherwise the stars are not meaningful.
    ///
    /// Node order: the boundary graph's nodes in their order, then any
    /// remaining edge intersections in edge order.
    pub fn build(graph: &BoundaryGraph) -> Self {
        let mut ng = NodeGraph {
            nodes: Vec::new(),
            index: HashMap::new(),
        };
        for n in graph.nodes() {
            let id = ng.add_node(n.coord);
            ng.nodes[id.0].label.on = n.label.on;
        }
        for e in graph.edges() {
            for ei in e.intersections().iter() {
                let id = ng.add_node(ei.coord);
                let label = &mut ng.nodes[id.0].label;
                if e.label().on == Some(Location::Boundary) {
                    label.on = Some(Location::Boundary);
                } else if label.on.is_none() {
                    label.on = Some(Location::Interior);
                }
            }
        }
        let mut ends = Vec::new();
        for (i, e) in graph.edges().iter().enumerate() {
            compute_edge_ends(EdgeId(i), e, &mut ends);
        }
        for e in ends {
            let id = ng.add_node(e.coord());
            ng.nodes[id.0].star.insert(e);
        }
        for n in &mut ng.nodes {
            n.star.compute_labels();
        }
        tracing::debug!(nodes = ng.nodes.len(), "node graph");
        ng
    }

    fn add_node(&mut self, coord: Coord) -> NodeId {
        let key = coord_key(coord);
        if let Some(&id) = self.index.get(&key) {
            return id;
        }
        let id = NodeId(self.nodes.len());
        self.index.insert(key, id);
        self.nodes.push(Node {
            coord,
            label: Label::default(),
            star: BundleStar::default(),
        });
        id
    }
}

/// One backward and one forward end per intersection (endpoints included).
///
/// Backward ends point against the ring direction, so their labels are flipped.
pub(crate) fn compute_edge_ends(id: EdgeId, edge: &Edge, out: &mut Vec<EdgeEnd>) {
    let list = edge.intersections().with_endpoints(edge.coords());
    let items: Vec<&EdgeIntersection> = list.iter().collect();
    for (k, curr) in items.iter().enumerate() {
        let prev = k.checked_sub(1).map(|j| items[j]);
        let next = items.get(k + 1).copied();
        if let Some(e) = end_for_prev(id, edge, curr, prev) {
            out.push(e);
        }
        if let Some(e) = end_for_next(id, edge, curr, next) {
            out.push(e);
        }
    }
}

fn end_for_prev(
    id: EdgeId,
    edge: &Edge,
    curr: &EdgeIntersection,
    prev: Option<&EdgeIntersection>,
) -> Option<EdgeEnd> {
    let mut i_prev = curr.segment_index;
    if curr.dist == 0.0 {
        // At a vertex: the previous point is the vertex before it.
        if i_prev == 0 {
            return None;
        }
        i_prev -= 1;
    }
    let mut p_prev = edge.coord(i_prev);
    if let Some(prev) = prev {
        if prev.segment_index >= i_prev {
            p_prev = prev.coord;
        }
    }
    Some(EdgeEnd::new(id, curr.coord, p_prev, edge.label().flipped()))
}

fn end_for_next(
    id: EdgeId,
    edge: &Edge,
    curr: &EdgeIntersection,
    next: Option<&EdgeIntersection>,
) -> Option<EdgeEnd> {
    let i_next = curr.segment_index + 1;
    let p_next = match next {
        Some(n) if n.segment_index == curr.segment_index => n.coord,
        _ if i_next < edge.num_points() => edge.coord(i_next),
        Some(n) => n.coord,
        None => return None,
    };
    Some(EdgeEnd::new(id, curr.coord, p_next, edge.label()))
}
