//! Four-point asterisms and the Lang2009 quad hash.
//!
//! A quad is kept when all four points fit inside the closed disk spanned by
//! its most distant pair (the diameter pair), up to a small relative slack.
//! The hash projects the two inner points onto the diameter frame rotated by
//! -45 and +45 degrees, normalized by the diameter length, giving a 4-vector
//! invariant under translation, rotation, and uniform scale.

use nalgebra::Vector2;

use super::{gather, Combinations};
use crate::geometry::{project_onto_axis, u1u2};

/// Canonically ordered 4-tuple: diameter pair first, then the two inner
/// points by increasing distance from `A`.
pub type Quad = [Vector2<f64>; 4];

/// Quad fingerprint in the rotated diameter frame.
pub type QuadHash = [f64; 4];

/// Default relative slack on the bounding-circle test.
pub const DEFAULT_CIRCLE_TOL: f64 = 0.01;

/// Reorder a tuple so positions 0 and 1 hold the pair realizing the maximum
/// pairwise distance.
///
/// Of the two diameter endpoints, the one at the larger tuple position
/// becomes `A`; the remaining points follow by increasing distance from `A`.
pub fn canonicalize(q: Quad) -> Quad {
    let mut diameter = (0usize, 1usize);
    let mut longest = -1.0f64;
    for i in 0..4 {
        for j in i + 1..4 {
            let d = (q[j] - q[i]).norm();
            if d > longest {
                longest = d;
                diameter = (i, j);
            }
        }
    }
    let (a_idx, b_idx) = (diameter.1, diameter.0);
    let a = q[a_idx];
    let b = q[b_idx];
    let mut rest: Vec<Vector2<f64>> = (0..4)
        .filter(|&k| k != a_idx && k != b_idx)
        .map(|k| q[k])
        .collect();
    rest.sort_by(|p, r| {
        let dp = (*p - a).norm();
        let dr = (*r - a).norm();
        dp.partial_cmp(&dr).unwrap_or(std::cmp::Ordering::Equal)
    });
    [a, b, rest[0], rest[1]]
}

/// Bounding-circle test: every point inside the disk of diameter `AB`, with
/// `circletol` relative slack. NaN geometry fails the comparison and is
/// thereby rejected.
fn in_circle(q: &Quad, circletol: f64) -> bool {
    let half = (q[1] - q[0]) / 2.0;
    let center = q[0] + half;
    let bound = half.norm() * (1.0 + circletol);
    q.iter().all(|p| (*p - center).norm() <= bound)
}

/// Hash a canonical quad: projections of `C` and `D` onto the two rotated
/// diameter axes, normalized by `|AB|`.
pub fn quad_hash(q: &Quad) -> QuadHash {
    let [a, b, c, d] = *q;
    let h = (b - a).norm();
    let (u1, u2) = u1u2(a, b);
    [
        project_onto_axis(c, a, u1) / h,
        project_onto_axis(d, a, u1) / h,
        project_onto_axis(c, a, u2) / h,
        project_onto_axis(d, a, u2) / h,
    ]
}

/// Hash table of every valid quad in the point set, largest diameter first.
pub fn hashes(xy: &[Vector2<f64>], circletol: f64) -> Vec<(QuadHash, Quad)> {
    let mut table: Vec<(QuadHash, Quad)> = Vec::new();
    for idx in Combinations::<4>::new(xy.len()) {
        let quad = canonicalize(gather(xy, idx));
        if !in_circle(&quad, circletol) {
            continue;
        }
        let hash = quad_hash(&quad);
        if hash.iter().any(|v| !v.is_finite()) {
            continue;
        }
        table.push((hash, quad));
    }
    // Larger diameters are better conditioned; scan them first.
    table.sort_by(|(_, p), (_, q)| {
        let dp = (p[1] - p[0]).norm();
        let dq = (q[1] - q[0]).norm();
        dq.partial_cmp(&dp).unwrap_or(std::cmp::Ordering::Equal)
    });
    table
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{apply, transform_matrix};
    use approx::assert_abs_diff_eq;

    fn sample_quad() -> Quad {
        [
            Vector2::new(0.0, 0.0),
            Vector2::new(0.35, 0.62),
            Vector2::new(1.0, 1.0),
            Vector2::new(0.61, 0.23),
        ]
    }

    #[test]
    fn canonical_order_puts_diameter_first() {
        let c = canonicalize(sample_quad());
        // The diameter is (0,0)-(1,1); the later tuple position becomes A.
        assert_eq!(c[0], Vector2::new(1.0, 1.0));
        assert_eq!(c[1], Vector2::new(0.0, 0.0));
        assert!((c[2] - c[0]).norm() <= (c[3] - c[0]).norm());
    }

    #[test]
    fn hash_is_similarity_invariant() {
        let base = sample_quad();
        let m = transform_matrix(2.5, 1.1, Vector2::new(3.0, -2.0));
        let moved = apply(&m, &base);
        let h1 = quad_hash(&canonicalize(base));
        let h2 = quad_hash(&canonicalize([moved[0], moved[1], moved[2], moved[3]]));
        for k in 0..4 {
            assert_abs_diff_eq!(h1[k], h2[k], epsilon = 1e-9);
        }
    }

    #[test]
    fn point_outside_the_diameter_disk_is_rejected() {
        // (1, 1.2) lies 1.2 from the disk center while the radius is 1.0.
        let xy = [
            Vector2::new(0.0, 0.0),
            Vector2::new(2.0, 0.0),
            Vector2::new(1.0, 1.2),
            Vector2::new(1.0, -0.1),
        ];
        assert!(hashes(&xy, DEFAULT_CIRCLE_TOL).is_empty());
    }

    #[test]
    fn tables_are_sorted_by_decreasing_diameter() {
        let xy = [
            Vector2::new(0.1, 0.2),
            Vector2::new(0.9, 0.3),
            Vector2::new(0.4, 0.8),
            Vector2::new(0.6, 0.1),
            Vector2::new(0.3, 0.5),
            Vector2::new(0.8, 0.9),
        ];
        let table = hashes(&xy, DEFAULT_CIRCLE_TOL);
        assert!(!table.is_empty());
        let diameters: Vec<f64> = table.iter().map(|(_, q)| (q[1] - q[0]).norm()).collect();
        for w in diameters.windows(2) {
            assert!(w[0] >= w[1]);
        }
    }

    #[test]
    fn duplicate_points_never_reach_the_table() {
        let p = Vector2::new(0.5, 0.5);
        let xy = [p, p, p, p];
        assert!(hashes(&xy, DEFAULT_CIRCLE_TOL).is_empty());
    }
}
