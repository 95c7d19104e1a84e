//! Coordinates and topological labels.
//!
//! - `Coord`: 2D point value (`nalgebra::Vector2<f64>`), `Copy`.
//! - `Location`: where a point lies relative to the area.
//! - `Label`: on/left/right locations of a boundary component.

use nalgebra::Vector2;

/// Planar coordinate. Copies are independent values.
pub type Coord = Vector2<f64>;

/// Hashable key of a coordinate (bit patterns, `-0.0` folded into `0.0`).
pub(crate) type CoordKey = (u64, u64);

#[inline]
pub(crate) fn coord_key(c: Coord) -> CoordKey {
    ((c.x + 0.0).to_bits(), (c.y + 0.0).to_bits())
}

/// Topological location relative to an area geometry.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Location {
    Interior,
    Boundary,
    Exterior,
}

/// Position relative to a directed boundary component.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Position {
    On,
    Left,
    Right,
}

/// Locations of a graph component with respect to the single area geometry.
///
/// An area label carries side locations; a node label only `on`.
/// `None` means "not determined".
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Label {
    pub on: Option<Location>,
    pub left: Option<Location>,
    pub right: Option<Location>,
}

impl Label {
    #[inline]
    pub fn area(on: Location, left: Location, right: Location) -> Self {
        Self {
            on: Some(on),
            left: Some(left),
            right: Some(right),
        }
    }

    #[inline]
    pub fn node(on: Location) -> Self {
        Self {
            on: Some(on),
            left: None,
            right: None,
        }
    }

    #[inline]
    pub fn location(&self, pos: Position) -> Option<Location> {
        match pos {
            Position::On => self.on,
            Position::Left => self.left,
            Position::Right => self.right,
        }
    }

    #[inline]
    pub fn set_location(&mut self, pos: Position, loc: Option<Location>) {
        match pos {
            Position::On => self.on = loc,
            Position::Left => self.left = loc,
            Position::Right => self.right = loc,
        }
    }

    /// Swap the side locations (reverses the direction the label refers to).
    #[inline]
    pub fn flip(&mut self) {
        std::mem::swap(&mut self.left, &mut self.right);
    }

    #[inline]
    pub fn flipped(mut self) -> Self {
        self.flip();
        self
    }

    #[inline]
    pub fn is_area(&self) -> bool {
        self.left.is_some() || self.right.is_some()
    }
}
