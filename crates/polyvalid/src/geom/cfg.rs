//! Fixed constants for ring handling (internal).
//!
//! Policy
//! - The checker works on exact coordinates, so there are no tolerances here;
//!   only structural minimums live in this module.

/// Minimum number of points of a closed ring (three distinct plus the closing point).
pub(crate) const MIN_RING_POINTS: usize = 4;
