//! Random star-shaped rings (jittered angles and radii + replay tokens).
//!
//! Model
//! - `n` equally spaced angles on [0, 2π) with bounded angular jitter, radii
//!   `radius * (1 + u)` with `u ∈ [-radial_jitter, radial_jitter]`.
//! - Angles stay strictly increasing and radii positive, so every ring is
//!   simple and star-shaped around `center`, counter-clockwise and closed.
//! - Determinism: a replay token `(seed, index)` is mixed into one `StdRng`.

use nalgebra::Vector2;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::geom::Coord;

/// Star ring sampler configuration.
#[derive(Clone, Copy, Debug)]
pub struct StarCfg {
    /// Number of distinct vertices (at least 3).
    pub vertex_count: usize,
    /// Angular jitter as a fraction of the base spacing. Clamped to [0, 0.49].
    pub angle_jitter_frac: f64,
    /// Relative radial jitter. Clamped to [0, 0.9].
    pub radial_jitter: f64,
    pub radius: f64,
    pub center: Coord,
}

impl Default for StarCfg {
    fn default() -> Self {
        Self {
            vertex_count: 12,
            angle_jitter_frac: 0.3,
            radial_jitter: 0.4,
            radius: 1.0,
            center: Vector2::zeros(),
        }
    }
}

/// Replay token to make draws reproducible and indexable.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ReplayToken {
    pub seed: u64,
    pub index: u64,
}

impl ReplayToken {
    #[inline]
    fn to_std_rng(self) -> StdRng {
        // SplitMix64 finalizer.
        fn mix(mut x: u64) -> u64 {
            x ^= x >> 30;
            x = x.wrapping_mul(0xbf58476d1ce4e5b9);
            x ^= x >> 27;
            x = x.wrapping_mul(0x94d049bb133111eb);
            x ^ (x >> 31)
        }
        let k = mix(self.seed ^ mix(self.index.wrapping_add(0x9e3779b97f4a7c15)));
        StdRng::seed_from_u64(k)
    }
}

/// Draw a closed, simple, counter-clockwise star-shaped ring.
pub fn draw_star_ring(cfg: StarCfg, tok: ReplayToken) -> Vec<Coord> {
    let mut rng = tok.to_std_rng();
    let n = cfg.vertex_count.max(3);
    let aj = cfg.angle_jitter_frac.clamp(0.0, 0.49);
    let rj = cfg.radial_jitter.clamp(0.0, 0.9);
    let r0 = cfg.radius.max(1e-9);
    let delta = std::f64::consts::TAU / (n as f64);
    let mut ring: Vec<Coord> = (0..n)
        .map(|k| {
            let theta = (k as f64) * delta + (rng.gen::<f64>() * 2.0 - 1.0) * aj * delta;
            let r = r0 * (1.0 + (rng.gen::<f64>() * 2.0 - 1.0) * rj);
            cfg.center + Vector2::new(theta.cos(), theta.sin()) * r
        })
        .collect();
    ring.push(ring[0]);
    ring
}
