//! Blind astrometric registration by geometric hashing.
//!
//! Given two unordered 2D point sets with no correspondence information,
//! recover the affine map aligning them: hash small point tuples
//! ("asterisms") into fingerprints invariant under translation, rotation,
//! and uniform scale (Lang et al. 2009), pair fingerprints across the sets,
//! and keep the candidate transform that explains the most points.
//!
//! Entry points
//! - [`matcher::find_transform`]: planar set onto planar set.
//! - [`matcher::refine`]: least-squares refit against cross-matched inliers.
//! - [`sky::solve_field`]: RA/Dec catalog onto pixel centroids via a
//!   tangent-plane projection, feeding a downstream WCS fit.

pub mod asterism;
pub mod error;
pub mod estimate;
pub mod geometry;
mod index;
pub mod matcher;
pub mod sim;
pub mod sky;

/// Library version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub use error::MatchError;
pub use matcher::{
    count_cross_match, cross_match, find_transform, refine, MatchCfg, MinMatch, TransformMatch,
};

/// Common exports for quick imports in callers.
pub mod prelude {
    pub use crate::asterism::Asterism;
    pub use crate::error::MatchError;
    pub use crate::geometry::{apply, sparsify, transform_matrix};
    pub use crate::matcher::{
        count_cross_match, cross_match, find_transform, refine, MatchCfg, MinMatch, TransformMatch,
    };
    pub use crate::sky::{project_tangent_plane, solve_field, PlateSolution};
    pub use nalgebra::{Matrix3, Vector2};
}
