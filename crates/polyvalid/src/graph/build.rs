//! Ring intake, side labelling and boundary nodes.

use std::collections::HashMap;
use std::fmt;

use crate::geom::cfg::MIN_RING_POINTS;
use crate::geom::{
    coord_key, is_ccw, remove_repeated_points, AreaGeometry, Coord, CoordKey, Label, Location,
};

use super::types::{BoundaryNode, Edge, EdgeId, RingId, RingRole};

/// Structural errors raised while building the boundary graph.
///
/// These are stop conditions of the graph builder; the consistency tester
/// never produces them.
#[derive(Clone, Debug, PartialEq)]
pub enum TopologyError {
    /// A coordinate is NaN or infinite.
    NonFiniteCoordinate { ring: RingId, point: Coord },
    /// First and last coordinates differ.
    RingNotClosed { ring: RingId, point: Coord },
    /// Fewer than four points remain after removing repeated points.
    TooFewPoints {
        ring: RingId,
        count: usize,
        point: Option<Coord>,
    },
    /// A hole was attached to a ring id that is not a shell of this graph.
    ShellHoleIdentity { hole: RingId, shell: RingId },
}

impl TopologyError {
    /// Location to report, if the error has one.
    pub fn point(&self) -> Option<Coord> {
        match self {
            TopologyError::NonFiniteCoordinate { point, .. }
            | TopologyError::RingNotClosed { point, .. } => Some(*point),
            TopologyError::TooFewPoints { point, .. } => *point,
            TopologyError::ShellHoleIdentity { .. } => None,
        }
    }
}

impl fmt::Display for TopologyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TopologyError::NonFiniteCoordinate { ring, point } => write!(
                f,
                "ring {} has a non-finite coordinate ({}, {})",
                ring.0, point.x, point.y
            ),
            TopologyError::RingNotClosed { ring, point } => write!(
                f,
                "ring {} is not closed (starts at ({}, {}))",
                ring.0, point.x, point.y
            ),
            TopologyError::TooFewPoints { ring, count, .. } => write!(
                f,
                "ring {} has {} distinct points (needs at least {})",
                ring.0, count, MIN_RING_POINTS
            ),
            TopologyError::ShellHoleIdentity { hole, shell } => write!(
                f,
                "hole {} refers to ring {}, which is not a shell",
                hole.0, shell.0
            ),
        }
    }
}

impl std::error::Error for TopologyError {}

/// Boundary graph of one area geometry: edges (one per ring) and nodes.
///
/// Nodes keep first-insertion order: ring start points in ring order, then
/// self-intersection nodes in edge/intersection order.
#[derive(Clone, Debug, Default)]
pub struct BoundaryGraph {
    pub(crate) edges: Vec<Edge>,
    pub(crate) rings: Vec<RingRole>,
    pub(crate) nodes: Vec<BoundaryNode>,
    pub(crate) node_index: HashMap<CoordKey, usize>,
}

impl BoundaryGraph {
    /// Build the graph of all rings of `area` (empty polygons are skipped).
    pub fn from_area(area: &AreaGeometry) -> Result<Self, TopologyError> {
        let mut b = BoundaryGraphBuilder::new();
        for poly in &area.polygons {
            if poly.is_empty() {
                continue;
            }
            let shell = b.add_shell(&poly.shell)?;
            for hole in &poly.holes {
                b.add_hole(shell, hole)?;
            }
        }
        Ok(b.build())
    }

    #[inline]
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    #[inline]
    pub fn edge(&self, id: EdgeId) -> &Edge {
        &self.edges[id.0]
    }

    #[inline]
    pub fn nodes(&self) -> &[BoundaryNode] {
        &self.nodes
    }

    #[inline]
    pub fn ring_role(&self, id: RingId) -> Option<RingRole> {
        self.rings.get(id.0).copied()
    }

    #[inline]
    pub fn ring_count(&self) -> usize {
        self.rings.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    /// Insert a boundary node unless one exists at `coord`.
    pub(crate) fn insert_boundary_node(&mut self, coord: Coord) {
        let key = coord_key(coord);
        if let Some(&i) = self.node_index.get(&key) {
            self.nodes[i].label.on = Some(Location::Boundary);
            return;
        }
        self.node_index.insert(key, self.nodes.len());
        self.nodes.push(BoundaryNode {
            coord,
            label: Label::node(Location::Boundary),
        });
    }
}

/// Incremental builder that validates rings and assigns side labels.
#[derive(Debug, Default)]
pub struct BoundaryGraphBuilder {
    graph: BoundaryGraph,
}

impl BoundaryGraphBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_shell(&mut self, coords: &[Coord]) -> Result<RingId, TopologyError> {
        self.add_ring(coords, RingRole::Shell)
    }

    /// Add a hole of `shell`; `shell` must be a shell previously returned by this builder.
    pub fn add_hole(&mut self, shell: RingId, coords: &[Coord]) -> Result<RingId, TopologyError> {
        let hole = RingId(self.graph.rings.len());
        match self.graph.ring_role(shell) {
            Some(RingRole::Shell) => self.add_ring(coords, RingRole::Hole { shell }),
            _ => Err(TopologyError::ShellHoleIdentity { hole, shell }),
        }
    }

    pub fn build(self) -> BoundaryGraph {
        self.graph
    }

    fn add_ring(&mut self, coords: &[Coord], role: RingRole) -> Result<RingId, TopologyError> {
        let ring = RingId(self.graph.rings.len());
        if let Some(&point) = coords
            .iter()
            .find(|c| !(c.x.is_finite() && c.y.is_finite()))
        {
            return Err(TopologyError::NonFiniteCoordinate { ring, point });
        }
        if let (Some(&first), Some(&last)) = (coords.first(), coords.last()) {
            if first != last {
                return Err(TopologyError::RingNotClosed { ring, point: first });
            }
        }
        let pts = remove_repeated_points(coords);
        if pts.len() < MIN_RING_POINTS {
            return Err(TopologyError::TooFewPoints {
                ring,
                count: pts.len(),
                point: pts.first().copied(),
            });
        }
        // Clockwise convention: a shell has its interior on the right, a hole on the left.
        let (cw_left, cw_right) = match role {
            RingRole::Shell => (Location::Exterior, Location::Interior),
            RingRole::Hole { .. } => (Location::Interior, Location::Exterior),
        };
        let (left, right) = if is_ccw(&pts) {
            (cw_right, cw_left)
        } else {
            (cw_left, cw_right)
        };
        let start = pts[0];
        tracing::trace!(ring = ring.0, points = pts.len(), ?role, "add ring");
        self.graph.rings.push(role);
        self.graph
            .edges
            .push(Edge::new(pts, Label::area(Location::Boundary, left, right), ring));
        self.graph.insert_boundary_node(start);
        Ok(ring)
    }
}
