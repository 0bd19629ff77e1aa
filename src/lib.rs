//! # barysample
//!
//! Area-weighted barycentric sampling of triangle meshes.
//!
//! This is the umbrella crate that provides convenient access to all barysample
//! functionality. You can use this crate to get everything in one place, or use
//! the individual crates for more granular control over dependencies.
//!
//! ## Crates
//!
//! - **Core**: points, point clouds, triangle meshes, camera and rotation helpers
//! - **Algorithms**: sample allocation, coordinate generation, surface interpolation
//!   and vertex normals
//!
//! ## Quick Start
//!
//! ```rust
//! use barysample::prelude::*;
//!
//! let mesh = TriangleMesh::from_vertices_and_faces(
//!     vec![
//!         Point3f::new(0.0, 0.0, 0.0),
//!         Point3f::new(1.0, 0.0, 0.0),
//!         Point3f::new(0.0, 1.0, 0.0),
//!     ],
//!     vec![[0, 1, 2]],
//! );
//!
//! let sampler = MeshSampler::new(SamplingConfig::default().with_seed(42));
//! let cloud = sampler.sample_points(&mesh, 100).unwrap();
//! assert_eq!(cloud.len(), 100);
//! ```

// Re-export core functionality
pub use barysample_core::*;

// Re-export sub-crates
pub use barysample_algorithms as algorithms;

/// Convenient imports for common use cases
pub mod prelude {
    pub use barysample_core::*;
    pub use barysample_algorithms::*;
}
