//! Deterministic synthetic star fields for tests, benches, and demos.
//!
//! Model
//! - `scatter` draws uniform points in [0, 1)² from a seeded RNG.
//! - `disturbed_pair` builds a source field and its registered counterpart:
//!   the copy holds every source point plus `extras` unrelated ones, all
//!   mapped through the given affine, shuffled, then jittered per
//!   coordinate. The same seed always reproduces the same pair.

use nalgebra::{Matrix3, Vector2};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use crate::geometry::apply;

/// Disturbed-copy configuration.
#[derive(Clone, Copy, Debug)]
pub struct FieldCfg {
    /// Points in the source field.
    pub points: usize,
    /// Unrelated points appended before the transform.
    pub extras: usize,
    /// Uniform per-coordinate jitter amplitude applied after the transform,
    /// in target units.
    pub jitter: f64,
}

impl Default for FieldCfg {
    fn default() -> Self {
        Self {
            points: 12,
            extras: 5,
            jitter: 0.0,
        }
    }
}

/// Uniform points in [0, 1)².
pub fn scatter(n: usize, seed: u64) -> Vec<Vector2<f64>> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..n)
        .map(|_| Vector2::new(rng.gen::<f64>(), rng.gen::<f64>()))
        .collect()
}

/// Source field plus its disturbed copy under `m`.
pub fn disturbed_pair(
    cfg: FieldCfg,
    m: &Matrix3<f64>,
    seed: u64,
) -> (Vec<Vector2<f64>>, Vec<Vector2<f64>>) {
    let mut rng = StdRng::seed_from_u64(seed);
    let source: Vec<Vector2<f64>> = (0..cfg.points)
        .map(|_| Vector2::new(rng.gen::<f64>(), rng.gen::<f64>()))
        .collect();
    let mut widened = source.clone();
    widened.extend((0..cfg.extras).map(|_| Vector2::new(rng.gen::<f64>(), rng.gen::<f64>())));
    let mut copy = apply(m, &widened);
    copy.shuffle(&mut rng);
    if cfg.jitter > 0.0 {
        for p in &mut copy {
            p.x += rng.gen::<f64>() * cfg.jitter;
            p.y += rng.gen::<f64>() * cfg.jitter;
        }
    }
    (source, copy)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::transform_matrix;

    #[test]
    fn draws_are_reproducible() {
        let a = scatter(20, 42);
        let b = scatter(20, 42);
        assert_eq!(a, b);
        assert_ne!(a, scatter(20, 43));
    }

    #[test]
    fn disturbed_pair_has_the_requested_shape() {
        let m = transform_matrix(2.0, 0.3, Vector2::new(1.0, -1.0));
        let cfg = FieldCfg {
            points: 9,
            extras: 4,
            jitter: 0.01,
        };
        let (source, copy) = disturbed_pair(cfg, &m, 7);
        assert_eq!(source.len(), 9);
        assert_eq!(copy.len(), 13);
        let (source2, copy2) = disturbed_pair(cfg, &m, 7);
        assert_eq!(source, source2);
        assert_eq!(copy, copy2);
        assert!(source.iter().all(|p| (0.0..1.0).contains(&p.x) && (0.0..1.0).contains(&p.y)));
    }
}
