//! Core data structures for barysample
//!
//! This crate provides the types shared by the sampling algorithms: points,
//! point clouds, triangle meshes and the error type, together with the
//! closed-form camera and rotation helpers used around them.

pub mod point;
pub mod point_cloud;
pub mod mesh;
pub mod transform;
pub mod camera;
pub mod error;

pub use point::*;
pub use point_cloud::*;
pub use mesh::*;
pub use transform::*;
pub use camera::*;
pub use error::*;

/// Re-export commonly used types from nalgebra
pub use nalgebra::{Point3, Vector3, Matrix3};
