//! Planar geometry primitives shared by the hashing and matching stages.
//!
//! - Homogeneous helpers: `pad`, `apply`, `transform_matrix`.
//! - The rotated diameter frame of Lang et al. 2009: `rotate_about`, `u1u2`,
//!   `project_onto_axis`.
//! - `triangle_angles` via the law of cosines, with the `acos` argument
//!   clamped to [-1, 1].
//!
//! All functions are pure. Coincident points produce NaN instead of a panic;
//! the asterism filters reject such tuples downstream.

use nalgebra::{DMatrix, Matrix3, Vector2, Vector3};

/// Append a column of ones, turning `n` points into an `n x 3` homogeneous
/// design matrix.
pub fn pad(xy: &[Vector2<f64>]) -> DMatrix<f64> {
    DMatrix::from_fn(xy.len(), 3, |r, c| match c {
        0 => xy[r].x,
        1 => xy[r].y,
        _ => 1.0,
    })
}

/// Apply a homogeneous affine map to every point.
pub fn apply(m: &Matrix3<f64>, xy: &[Vector2<f64>]) -> Vec<Vector2<f64>> {
    xy.iter()
        .map(|p| {
            let q = m * Vector3::new(p.x, p.y, 1.0);
            Vector2::new(q.x, q.y)
        })
        .collect()
}

/// Compose `T * S * R`: rotation first, then uniform scale, then translation.
pub fn transform_matrix(scale: f64, rotation: f64, translation: Vector2<f64>) -> Matrix3<f64> {
    let (sin, cos) = rotation.sin_cos();
    let r = Matrix3::new(cos, -sin, 0.0, sin, cos, 0.0, 0.0, 0.0, 1.0);
    let s = Matrix3::new(scale, 0.0, 0.0, 0.0, scale, 0.0, 0.0, 0.0, 1.0);
    let t = Matrix3::new(
        1.0,
        0.0,
        translation.x,
        0.0,
        1.0,
        translation.y,
        0.0,
        0.0,
        1.0,
    );
    t * s * r
}

/// Signed scalar projection of `p - origin` onto the unit vector pointing
/// from `origin` to `axis`. NaN when `axis == origin`.
#[inline]
pub fn project_onto_axis(p: Vector2<f64>, origin: Vector2<f64>, axis: Vector2<f64>) -> f64 {
    let n = axis - origin;
    let n = n / n.norm();
    (p - origin).dot(&n)
}

/// Rigid rotation of `point` about `pivot` by `angle` radians.
#[inline]
pub fn rotate_about(point: Vector2<f64>, pivot: Vector2<f64>, angle: f64) -> Vector2<f64> {
    let (sin, cos) = angle.sin_cos();
    let d = point - pivot;
    Vector2::new(cos * d.x - sin * d.y, sin * d.x + cos * d.y) + pivot
}

/// Axis endpoints of the Lang2009 frame: `b` rotated about `a` by -45 and
/// +45 degrees.
#[inline]
pub fn u1u2(a: Vector2<f64>, b: Vector2<f64>) -> (Vector2<f64>, Vector2<f64>) {
    (
        rotate_about(b, a, -std::f64::consts::FRAC_PI_4),
        rotate_about(b, a, std::f64::consts::FRAC_PI_4),
    )
}

/// Interior angles at the three vertices, in radians. Degenerate sides
/// yield NaN entries.
pub fn triangle_angles(t: &[Vector2<f64>; 3]) -> [f64; 3] {
    let a = (t[2] - t[1]).norm();
    let b = (t[0] - t[2]).norm();
    let c = (t[1] - t[0]).norm();
    let angle = |u: f64, v: f64, w: f64| ((v * v + w * w - u * u) / (2.0 * v * w)).clamp(-1.0, 1.0).acos();
    [angle(a, b, c), angle(b, c, a), angle(c, a, b)]
}

/// Greedy thinning: keep points (in input order) that sit at least `radius`
/// away from every point already kept.
pub fn sparsify(points: &[Vector2<f64>], radius: f64) -> Vec<Vector2<f64>> {
    let mut kept: Vec<Vector2<f64>> = Vec::new();
    for p in points {
        if kept.iter().all(|q| (p - q).norm() >= radius) {
            kept.push(*p);
        }
    }
    kept
}
