//! # barysample algorithms
//!
//! Area-weighted barycentric sampling of triangle meshes.
//!
//! Sampling runs in three stages: [`allocation`] splits the requested sample
//! count across triangles in proportion to their area, [`assignment`] expands
//! the counts into a triangle id per sample, and [`barycentric`] draws raw
//! unit-square coordinates. [`interpolation`] maps the result back onto the
//! surface to obtain positions and normals.

pub mod allocation;
pub mod assignment;
pub mod barycentric;
pub mod interpolation;
pub mod normals;
pub mod sampling;

// Re-export commonly used items
pub use allocation::*;
pub use assignment::*;
pub use barycentric::*;
pub use interpolation::*;
pub use normals::*;
pub use sampling::*;
