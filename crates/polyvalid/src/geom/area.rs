//! Area input: polygons as closed coordinate rings.

use super::types::Coord;

/// A polygon: one shell and zero or more holes, each a closed ring.
///
/// An empty shell denotes the empty polygon.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Polygon {
    pub shell: Vec<Coord>,
    pub holes: Vec<Vec<Coord>>,
}

impl Polygon {
    pub fn new(shell: Vec<Coord>, holes: Vec<Vec<Coord>>) -> Self {
        Self { shell, holes }
    }

    /// Polygon without holes.
    pub fn simple(shell: Vec<Coord>) -> Self {
        Self {
            shell,
            holes: Vec::new(),
        }
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.shell.is_empty()
    }

    /// Shell plus holes, or zero for the empty polygon.
    #[inline]
    pub fn ring_count(&self) -> usize {
        if self.is_empty() {
            0
        } else {
            1 + self.holes.len()
        }
    }
}

/// A polygon or multipolygon (all rings of one area geometry).
#[derive(Clone, Debug, Default, PartialEq)]
pub struct AreaGeometry {
    pub polygons: Vec<Polygon>,
}

impl AreaGeometry {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn multi(polygons: Vec<Polygon>) -> Self {
        Self { polygons }
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.polygons.iter().all(Polygon::is_empty)
    }

    #[inline]
    pub fn ring_count(&self) -> usize {
        self.polygons.iter().map(Polygon::ring_count).sum()
    }
}

impl From<Polygon> for AreaGeometry {
    fn from(p: Polygon) -> Self {
        Self { polygons: vec![p] }
    }
}
