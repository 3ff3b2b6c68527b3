//! Sky-side boundary: tangent-plane projection and plate solving.
//!
//! `solve_field` turns a catalog of RA/Dec positions plus unordered pixel
//! centroids into a planar affine and the inlier pairs a downstream WCS
//! fitter consumes. The spherical fit itself lives outside this crate.

use log::debug;
use nalgebra::{Matrix3, Vector2, Vector3};

use crate::error::MatchError;
use crate::matcher::{find_transform, refine, MatchCfg};

/// Planar registration of a pixel set against a projected catalog.
#[derive(Clone, Debug)]
pub struct PlateSolution {
    /// Affine from tangent-plane coordinates to pixels; non-singular.
    pub matrix: Matrix3<f64>,
    /// Inlier `(pixel, catalog)` index pairs for the downstream WCS fit.
    pub pairs: Vec<(usize, usize)>,
}

/// Offset-frame projection of `radecs` about `center`, everything in
/// degrees.
///
/// Rotates the sphere so `center` sits at the origin and returns offset
/// longitude/latitude; locally planar for the small fields the matcher
/// handles.
pub fn project_tangent_plane(
    center: Vector2<f64>,
    radecs: &[Vector2<f64>],
) -> Vec<Vector2<f64>> {
    let ra0 = center.x.to_radians();
    let dec0 = center.y.to_radians();
    radecs
        .iter()
        .map(|rd| {
            let ra = rd.x.to_radians();
            let dec = rd.y.to_radians();
            let v = Vector3::new(
                dec.cos() * (ra - ra0).cos(),
                dec.cos() * (ra - ra0).sin(),
                dec.sin(),
            );
            // Rotate about the y-axis so the center's unit vector lands on x.
            let x = dec0.cos() * v.x + dec0.sin() * v.z;
            let y = v.y;
            let z = -dec0.sin() * v.x + dec0.cos() * v.z;
            Vector2::new(y.atan2(x).to_degrees(), z.asin().to_degrees())
        })
        .collect()
}

/// Blind-register pixel centroids against catalog positions.
///
/// Projects the catalog about its mean position, finds the transform, and
/// runs the cross-match refinement; `Ok(None)` mirrors
/// [`find_transform`].
pub fn solve_field(
    pixels: &[Vector2<f64>],
    radecs: &[Vector2<f64>],
    cfg: &MatchCfg,
) -> Result<Option<PlateSolution>, MatchError> {
    let min = cfg.asterism.arity();
    if pixels.len() < min || radecs.len() < min {
        return Err(MatchError::BadInput {
            kind: cfg.asterism.name(),
            min,
            got: pixels.len().min(radecs.len()),
        });
    }
    let center = radecs
        .iter()
        .fold(Vector2::zeros(), |acc: Vector2<f64>, p| acc + p)
        / radecs.len() as f64;
    let plane = project_tangent_plane(center, radecs);
    let Some(found) = find_transform(&plane, pixels, cfg)? else {
        return Ok(None);
    };
    let Some((matrix, pairs)) = refine(&plane, pixels, &found.matrix, cfg.tolerance)? else {
        return Ok(None);
    };
    debug!("plate solution with {} inlier pairs", pairs.len());
    Ok(Some(PlateSolution { matrix, pairs }))
}
