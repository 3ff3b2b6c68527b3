//! Hash-space candidate pairing.
//!
//! A k-d tree over the target table's hash vectors answers one radius query
//! per probe hash; every hit becomes a candidate correspondence. The radius
//! query is deliberate: under noise the true counterpart need not be the
//! nearest hash, so all plausible pairs go to the scorer instead of the
//! single closest one.

use kiddo::immutable::float::kdtree::ImmutableKdTree;
use kiddo::SquaredEuclidean;

/// Candidate `(target, probe)` index pairs within `tolerance` (Euclidean) in
/// hash space.
///
/// Deterministic for a given input: probes in table order, hits sorted by
/// target index.
pub(crate) fn pair_candidates<const K: usize>(
    target: &[[f64; K]],
    probe: &[[f64; K]],
    tolerance: f64,
) -> Vec<(usize, usize)> {
    if target.is_empty() || probe.is_empty() {
        return Vec::new();
    }
    let tree: ImmutableKdTree<f64, u32, K, 32> = ImmutableKdTree::new_from_slice(target);
    let r2 = tolerance * tolerance;
    let mut pairs = Vec::new();
    for (j, h) in probe.iter().enumerate() {
        let mut hits: Vec<usize> = tree
            .within_unsorted::<SquaredEuclidean>(h, r2)
            .into_iter()
            .map(|n| n.item as usize)
            .collect();
        hits.sort_unstable();
        pairs.extend(hits.into_iter().map(|i| (i, j)));
    }
    pairs
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn radius_pairs_match_brute_force() {
        let target = [
            [0.10, 0.90],
            [0.45, 0.15],
            [0.80, 0.55],
            [0.25, 0.30],
            [0.60, 0.75],
        ];
        let probe = [[0.42, 0.18], [0.05, 0.95], [0.70, 0.70], [0.50, 0.50]];
        let tolerance = 0.3;

        let got = pair_candidates(&target, &probe, tolerance);

        let mut want = Vec::new();
        for (j, h) in probe.iter().enumerate() {
            for (i, g) in target.iter().enumerate() {
                let d = ((h[0] - g[0]).powi(2) + (h[1] - g[1]).powi(2)).sqrt();
                if d <= tolerance {
                    want.push((i, j));
                }
            }
        }
        assert!(!want.is_empty());
        assert_eq!(got, want);
    }

    #[test]
    fn empty_tables_yield_no_candidates() {
        let some = [[0.0, 0.0, 0.0, 0.0]];
        let none: [[f64; 4]; 0] = [];
        assert!(pair_candidates(&none, &some, 1.0).is_empty());
        assert!(pair_candidates(&some, &none, 1.0).is_empty());
    }

    #[test]
    fn out_of_radius_probes_find_nothing() {
        let target = [[0.0, 0.0, 0.0, 0.0]];
        let probe = [[1.0, 1.0, 1.0, 1.0]];
        assert!(pair_candidates(&target, &probe, 0.5).is_empty());
    }
}
