//! Candidate scoring and the public matching entry points.
//!
//! Flow: hash both point sets, pair hashes within `quads_tolerance` in hash
//! space, estimate one similarity per candidate from the bound asterisms'
//! leading pairs, and keep the transform that puts the most target points
//! within `tolerance` of a transformed source point. An optional `min_match`
//! threshold allows an early exit on the first good-enough candidate and
//! doubles as the acceptance bound after a full scan.

use log::{debug, trace};
use nalgebra::{Matrix3, Vector2};

use crate::asterism::{quads, triangles, Asterism};
use crate::error::MatchError;
use crate::estimate::{affine_lstsq, similarity_from_pair};
use crate::geometry::apply;
use crate::index::pair_candidates;

/// Early-exit and acceptance threshold for the scoring loop.
#[derive(Clone, Copy, Debug)]
pub enum MinMatch {
    /// Absolute number of matched target points.
    Count(usize),
    /// Fraction of the target set, in [0, 1].
    Fraction(f64),
}

impl MinMatch {
    #[inline]
    fn threshold(self, targets: usize) -> f64 {
        match self {
            MinMatch::Count(c) => c as f64,
            MinMatch::Fraction(f) => f * targets as f64,
        }
    }
}

/// Matcher configuration. Distances are in target-point units.
#[derive(Clone, Copy, Debug)]
pub struct MatchCfg {
    /// Tuple size used for hashing.
    pub asterism: Asterism,
    /// Inlier distance for scoring and cross-matching.
    pub tolerance: f64,
    /// Radius of the hash-space candidate query.
    pub quads_tolerance: f64,
    /// Score needed to exit early and to accept the final best candidate.
    /// `None` scores every candidate and returns the best non-zero one.
    pub min_match: Option<MinMatch>,
    /// Relative slack of the quad bounding-circle test.
    pub circletol: f64,
    /// Minimum interior angle for triangle asterisms, radians.
    pub min_angle: f64,
}

impl Default for MatchCfg {
    fn default() -> Self {
        Self {
            asterism: Asterism::Quad,
            tolerance: 12.0,
            quads_tolerance: 0.02,
            min_match: Some(MinMatch::Fraction(0.7)),
            circletol: quads::DEFAULT_CIRCLE_TOL,
            min_angle: triangles::DEFAULT_MIN_ANGLE,
        }
    }
}

/// Accepted transform plus its inlier count at the scoring tolerance.
#[derive(Clone, Copy, Debug)]
pub struct TransformMatch {
    /// Affine map with `matrix * source ≈ target`; always non-singular.
    pub matrix: Matrix3<f64>,
    /// Target points within `tolerance` of a transformed source point.
    pub matched: usize,
}

/// Number of points in `a` whose nearest neighbor in `b` lies within `tol`.
pub fn count_cross_match(a: &[Vector2<f64>], b: &[Vector2<f64>], tol: f64) -> usize {
    a.iter()
        .filter(|p| nearest(**p, b).is_some_and(|(_, d)| d < tol))
        .count()
}

/// Pair every point of `a` with its nearest neighbor in `b` when closer
/// than `tolerance`. Not symmetric, and not injective on `b`.
pub fn cross_match(
    a: &[Vector2<f64>],
    b: &[Vector2<f64>],
    tolerance: f64,
) -> Vec<(usize, usize)> {
    let mut pairs = Vec::new();
    for (i, p) in a.iter().enumerate() {
        if let Some((j, d)) = nearest(*p, b) {
            if d < tolerance {
                pairs.push((i, j));
            }
        }
    }
    pairs
}

#[inline]
fn nearest(p: Vector2<f64>, set: &[Vector2<f64>]) -> Option<(usize, f64)> {
    let mut best: Option<(usize, f64)> = None;
    for (j, q) in set.iter().enumerate() {
        let d = (p - q).norm();
        if best.is_none_or(|(_, bd)| d < bd) {
            best = Some((j, d));
        }
    }
    best
}

/// Recover the affine transform mapping `source` onto `target` without any
/// correspondence information.
///
/// `Ok(None)` means no candidate reached the acceptance bound; widening the
/// tolerances and retrying is the caller's decision, not an error.
pub fn find_transform(
    source: &[Vector2<f64>],
    target: &[Vector2<f64>],
    cfg: &MatchCfg,
) -> Result<Option<TransformMatch>, MatchError> {
    let min = cfg.asterism.arity();
    let got = source.len().min(target.len());
    if got < min {
        return Err(MatchError::BadInput {
            kind: cfg.asterism.name(),
            min,
            got,
        });
    }
    match cfg.asterism {
        Asterism::Quad => {
            let target_table = quads::hashes(target, cfg.circletol);
            let source_table = quads::hashes(source, cfg.circletol);
            scan(source, target, &target_table, &source_table, cfg)
        }
        Asterism::Triangle => {
            let target_table = triangles::hashes(target, cfg.min_angle);
            let source_table = triangles::hashes(source, cfg.min_angle);
            scan(source, target, &target_table, &source_table, cfg)
        }
    }
}

/// Score all candidate asterism pairs and keep the incumbent best.
fn scan<const K: usize, const N: usize>(
    source: &[Vector2<f64>],
    target: &[Vector2<f64>],
    target_table: &[([f64; K], [Vector2<f64>; N])],
    source_table: &[([f64; K], [Vector2<f64>; N])],
    cfg: &MatchCfg,
) -> Result<Option<TransformMatch>, MatchError> {
    let target_hashes: Vec<[f64; K]> = target_table.iter().map(|(h, _)| *h).collect();
    let source_hashes: Vec<[f64; K]> = source_table.iter().map(|(h, _)| *h).collect();
    let candidates = pair_candidates(&target_hashes, &source_hashes, cfg.quads_tolerance);
    debug!(
        "{} candidate pairs from {} target / {} source asterisms",
        candidates.len(),
        target_table.len(),
        source_table.len()
    );
    if candidates.is_empty() {
        return Ok(None);
    }

    let threshold = cfg.min_match.map(|m| m.threshold(target.len()));
    let mut best: Option<(usize, Matrix3<f64>)> = None;
    for (i, j) in candidates {
        let anchor_t = &target_table[i].1;
        let anchor_s = &source_table[j].1;
        let m = similarity_from_pair(&[anchor_s[0], anchor_s[1]], &[anchor_t[0], anchor_t[1]]);
        if !m.iter().all(|v| v.is_finite()) {
            continue;
        }
        let projected = apply(&m, source);
        let score = count_cross_match(target, &projected, cfg.tolerance);
        trace!("candidate ({i}, {j}) matched {score}");
        if best.is_none_or(|(s, _)| score > s) {
            best = Some((score, m));
        }
        if let Some(th) = threshold {
            if score as f64 >= th {
                trace!("early exit at {score} matched");
                break;
            }
        }
    }

    let Some((matched, matrix)) = best else {
        return Ok(None);
    };
    if matched == 0 {
        return Ok(None);
    }
    if let Some(th) = threshold {
        if (matched as f64) < th {
            debug!("best candidate matched {matched} target points, below threshold");
            return Ok(None);
        }
    }
    debug!("accepted transform matching {matched} target points");
    Ok(Some(TransformMatch { matrix, matched }))
}

/// Re-fit a transform against its cross-matched inliers, twice.
///
/// The first pass absorbs the candidate similarity's anchor noise, the
/// second stabilizes numerically. Returns the refined matrix and the
/// surviving `(target, source)` index pairs, or `Ok(None)` when fewer than
/// three inliers remain.
pub fn refine(
    source: &[Vector2<f64>],
    target: &[Vector2<f64>],
    matrix: &Matrix3<f64>,
    tolerance: f64,
) -> Result<Option<(Matrix3<f64>, Vec<(usize, usize)>)>, MatchError> {
    let mut m = *matrix;
    let mut pairs = Vec::new();
    for _ in 0..2 {
        let projected = apply(&m, source);
        pairs = cross_match(target, &projected, tolerance);
        if pairs.len() < 3 {
            return Ok(None);
        }
        let from: Vec<Vector2<f64>> = pairs.iter().map(|&(_, j)| source[j]).collect();
        let to: Vec<Vector2<f64>> = pairs.iter().map(|&(i, _)| target[i]).collect();
        m = affine_lstsq(&from, &to)?;
    }
    Ok(Some((m, pairs)))
}
