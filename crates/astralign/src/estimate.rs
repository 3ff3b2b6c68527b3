//! Transform estimation.
//!
//! Two regimes: an exact similarity from a single pair of corresponding
//! segments (candidate evaluation), and a least-squares affine over many
//! inlier pairs (refinement).

use nalgebra::{DMatrix, Matrix3, Vector2, Vector3};

use crate::error::MatchError;
use crate::geometry::{pad, transform_matrix};

/// Exact similarity mapping segment `v1` onto segment `v2`.
///
/// The rotation magnitude comes from the clamped dot product of the unit
/// directions; its sign from the 2D cross product.
pub fn similarity_from_pair(v1: &[Vector2<f64>; 2], v2: &[Vector2<f64>; 2]) -> Matrix3<f64> {
    let u1 = v1[1] - v1[0];
    let u2 = v2[1] - v2[0];
    let n1 = u1.norm();
    let n2 = u2.norm();
    let cos = (u1.dot(&u2) / (n1 * n2)).clamp(-1.0, 1.0);
    let mut theta = cos.acos();
    if u1.x * u2.y - u1.y * u2.x < 0.0 {
        theta = -theta;
    }
    let scale = n2 / n1;
    let linear = transform_matrix(scale, theta, Vector2::zeros());
    let anchor = linear * Vector3::new(v1[0].x, v1[0].y, 1.0);
    let t = v2[0] - Vector2::new(anchor.x, anchor.y);
    transform_matrix(scale, theta, t)
}

/// Least-squares affine `M` with `M * from ≈ to`, solved through the padded
/// design matrix.
///
/// Needs at least three non-collinear correspondences; anything less leaves
/// the system rank-deficient and returns [`MatchError::Singular`].
pub fn affine_lstsq(
    from: &[Vector2<f64>],
    to: &[Vector2<f64>],
) -> Result<Matrix3<f64>, MatchError> {
    debug_assert_eq!(from.len(), to.len());
    let x = pad(from);
    let y = DMatrix::from_fn(to.len(), 2, |r, c| if c == 0 { to[r].x } else { to[r].y });
    let svd = x.svd(true, true);
    if svd.rank(1e-10) < 3 {
        return Err(MatchError::Singular);
    }
    let sol = svd.solve(&y, 1e-10).map_err(|_| MatchError::Singular)?;
    let m = Matrix3::new(
        sol[(0, 0)],
        sol[(1, 0)],
        sol[(2, 0)],
        sol[(0, 1)],
        sol[(1, 1)],
        sol[(2, 1)],
        0.0,
        0.0,
        1.0,
    );
    let det = m[(0, 0)] * m[(1, 1)] - m[(0, 1)] * m[(1, 0)];
    if !det.is_finite() || det.abs() < 1e-12 {
        return Err(MatchError::Singular);
    }
    Ok(m)
}
