//! Pinhole conversions between the camera frame and the image frame.
//!
//! Image-frame points are `(u, v, d)` where `d` is the camera-frame depth `z`.

use crate::error::{Error, Result};
use crate::point::*;
use serde::{Deserialize, Serialize};

/// Pinhole intrinsics `[fx, fy, cx, cy]`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CameraIntrinsics {
    pub fx: f32,
    pub fy: f32,
    pub cx: f32,
    pub cy: f32,
}

impl CameraIntrinsics {
    pub fn new(fx: f32, fy: f32, cx: f32, cy: f32) -> Self {
        Self { fx, fy, cx, cy }
    }

    /// Build from the packed `[fx, fy, cx, cy]` layout
    pub fn from_array(params: [f32; 4]) -> Self {
        let [fx, fy, cx, cy] = params;
        Self { fx, fy, cx, cy }
    }
}

/// Camera frame to image frame
pub fn xyz_to_uvd(xyz: &Point3f, cam: &CameraIntrinsics) -> Point3f {
    Point3f::new(
        xyz.x * cam.fx / xyz.z + cam.cx,
        xyz.y * cam.fy / xyz.z + cam.cy,
        xyz.z,
    )
}

/// Image frame to camera frame
pub fn uvd_to_xyz(uvd: &Point3f, cam: &CameraIntrinsics) -> Point3f {
    Point3f::new(
        (uvd.x - cam.cx) * uvd.z / cam.fx,
        (uvd.y - cam.cy) * uvd.z / cam.fy,
        uvd.z,
    )
}

/// Batch form of [`xyz_to_uvd`]
pub fn xyz_to_uvd_batch(points: &[Point3f], cam: &CameraIntrinsics) -> Vec<Point3f> {
    points.iter().map(|p| xyz_to_uvd(p, cam)).collect()
}

/// Batch form of [`uvd_to_xyz`]
pub fn uvd_to_xyz_batch(points: &[Point3f], cam: &CameraIntrinsics) -> Vec<Point3f> {
    points.iter().map(|p| uvd_to_xyz(p, cam)).collect()
}

/// Expand a row-major depth image into `(u, v, d)` points, `u` being the column
pub fn depth_to_uvd(depth: &[f32], width: usize, height: usize) -> Result<Vec<Point3f>> {
    let expected = width
        .checked_mul(height)
        .ok_or_else(|| Error::InvalidData(format!("depth image size {width}x{height} overflows")))?;
    if depth.len() != expected {
        return Err(Error::InvalidData(format!(
            "depth image has {} values, expected {width}x{height}",
            depth.len()
        )));
    }

    Ok(depth
        .iter()
        .enumerate()
        .map(|(i, &d)| Point3f::new((i % width) as f32, (i / width) as f32, d))
        .collect())
}

/// Back-project a row-major depth image into camera-frame points
pub fn depth_to_xyz(
    depth: &[f32],
    width: usize,
    height: usize,
    cam: &CameraIntrinsics,
) -> Result<Vec<Point3f>> {
    Ok(uvd_to_xyz_batch(&depth_to_uvd(depth, width, height)?, cam))
}
