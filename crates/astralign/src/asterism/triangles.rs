//! Three-point asterisms hashed by their interior angles.
//!
//! The two smallest angles, sorted ascending, identify a triangle up to
//! translation, rotation, uniform scale, and reflection. The reflection
//! ambiguity is left for the transform scorer to settle.

use nalgebra::Vector2;

use super::{gather, Combinations};
use crate::geometry::triangle_angles;

/// Vertices ordered by increasing distance from the centroid.
pub type Triangle = [Vector2<f64>; 3];

/// The two smallest interior angles, ascending, in radians.
pub type TriangleHash = [f64; 2];

/// Default minimum interior angle; thinner triangles hash unreliably.
pub const DEFAULT_MIN_ANGLE: f64 = 30.0 * std::f64::consts::PI / 180.0;

/// Sort vertices by distance from the centroid, ties broken by coordinate
/// order.
fn order_vertices(t: Triangle) -> Triangle {
    let centroid = (t[0] + t[1] + t[2]) / 3.0;
    let mut v = t;
    v.sort_by(|p, q| {
        let dp = (*p - centroid).norm();
        let dq = (*q - centroid).norm();
        dp.partial_cmp(&dq)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| {
                (p.x, p.y)
                    .partial_cmp(&(q.x, q.y))
                    .unwrap_or(std::cmp::Ordering::Equal)
            })
    });
    v
}

/// Hash table of every triangle whose interior angles all exceed
/// `min_angle`, in enumeration order.
pub fn hashes(xy: &[Vector2<f64>], min_angle: f64) -> Vec<(TriangleHash, Triangle)> {
    let mut table: Vec<(TriangleHash, Triangle)> = Vec::new();
    for idx in Combinations::<3>::new(xy.len()) {
        let tri = order_vertices(gather(xy, idx));
        let mut angles = triangle_angles(&tri);
        if !angles.iter().all(|a| a.is_finite() && a.abs() > min_angle) {
            continue;
        }
        angles.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
        table.push(([angles[0], angles[1]], tri));
    }
    table
}
