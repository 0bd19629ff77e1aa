//! Point cloud container and the cleanup operations applied to sampled clouds

use crate::point::*;
use serde::{Deserialize, Serialize};
use std::ops::{Index, IndexMut};

/// A generic point cloud container
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PointCloud<T> {
    pub points: Vec<T>,
}

/// A point cloud with 3D points
pub type PointCloud3f = PointCloud<Point3f>;

/// A point cloud with normal vectors
pub type NormalPointCloud3f = PointCloud<NormalPoint3f>;

/// Access to the position of a point-like value
pub trait Positioned {
    fn position(&self) -> Point3f;
    fn position_mut(&mut self) -> &mut Point3f;
}

impl Positioned for Point3f {
    fn position(&self) -> Point3f {
        *self
    }

    fn position_mut(&mut self) -> &mut Point3f {
        self
    }
}

impl Positioned for NormalPoint3f {
    fn position(&self) -> Point3f {
        self.position
    }

    fn position_mut(&mut self) -> &mut Point3f {
        &mut self.position
    }
}

impl<T> PointCloud<T> {
    /// Create a new empty point cloud
    pub fn new() -> Self {
        Self { points: Vec::new() }
    }

    /// Create a new point cloud with specified capacity
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            points: Vec::with_capacity(capacity),
        }
    }

    /// Create a point cloud from a vector of points
    pub fn from_points(points: Vec<T>) -> Self {
        Self { points }
    }

    /// Get the number of points in the cloud
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Check if the point cloud is empty
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Add a point to the cloud
    pub fn push(&mut self, point: T) {
        self.points.push(point);
    }

    /// Get an iterator over the points
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.points.iter()
    }
}

impl<T: Positioned> PointCloud<T> {
    /// Mean position, or `None` for an empty cloud
    pub fn centroid(&self) -> Option<Point3f> {
        if self.points.is_empty() {
            return None;
        }
        let sum = self
            .points
            .iter()
            .fold(Vector3f::zeros(), |acc, p| acc + p.position().coords);
        Some(Point3f::from(sum / self.points.len() as f32))
    }

    /// Subtract `center` (the centroid when `None`) from every position.
    ///
    /// Returns the center that was subtracted.
    pub fn recenter(&mut self, center: Option<Point3f>) -> Option<Point3f> {
        let center = center.or_else(|| self.centroid())?;
        for point in &mut self.points {
            let p = point.position_mut();
            *p = Point3f::from(*p - center);
        }
        Some(center)
    }

    /// Keep only points inside the inclusive box `[min_bound, max_bound]`
    pub fn crop(&mut self, min_bound: &Point3f, max_bound: &Point3f) {
        self.points.retain(|point| {
            let p = point.position();
            (0..3).all(|axis| p[axis] >= min_bound[axis] && p[axis] <= max_bound[axis])
        });
    }

    /// Axis-aligned bounding box as `(min, max)`
    pub fn bounding_box(&self) -> Option<(Point3f, Point3f)> {
        let first = self.points.first()?.position();
        Some(self.points.iter().fold((first, first), |(min, max), point| {
            let p = point.position();
            (min.inf(&p), max.sup(&p))
        }))
    }
}

impl<T> Default for PointCloud<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Index<usize> for PointCloud<T> {
    type Output = T;

    fn index(&self, index: usize) -> &Self::Output {
        &self.points[index]
    }
}

impl<T> IndexMut<usize> for PointCloud<T> {
    fn index_mut(&mut self, index: usize) -> &mut Self::Output {
        &mut self.points[index]
    }
}

impl<T> IntoIterator for PointCloud<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.points.into_iter()
    }
}

impl<'a, T> IntoIterator for &'a PointCloud<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.points.iter()
    }
}

impl<T> Extend<T> for PointCloud<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        self.points.extend(iter);
    }
}

impl<T> FromIterator<T> for PointCloud<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self {
            points: Vec::from_iter(iter),
        }
    }
}
