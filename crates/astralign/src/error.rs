//! Error types for the matching pipeline.
//!
//! An unmatched field is not an error: the matcher entry points return
//! `Ok(None)` for it. The variants here indicate caller mistakes or
//! pathological inlier geometry.

use thiserror::Error;

/// Errors surfaced by the matcher entry points.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MatchError {
    /// Input point set too small for the requested asterism size.
    #[error("need at least {min} points to form {kind} asterisms, got {got}")]
    BadInput {
        kind: &'static str,
        min: usize,
        got: usize,
    },

    /// Rank-deficient least-squares system during refinement.
    #[error("singular least-squares system, inlier geometry is degenerate")]
    Singular,
}
