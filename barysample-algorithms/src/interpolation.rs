//! Interpolation of per-vertex attributes at sampled surface points

use crate::sampling::SampleSet;
use barysample_core::{Error, Point3f, Result, TriangleMesh, Vector3f};
use rayon::prelude::*;
use std::ops::{Add, Mul};

/// Barycentric weights for a raw unit-square sample `[s, v]`.
///
/// With `r = sqrt(s)` the weights are `(1 - r, r (1 - v), r v)`. They are
/// non-negative, sum to one, and place the point uniformly over the
/// triangle's area.
pub fn barycentric_weights(coord: [f32; 2]) -> [f32; 3] {
    let [s, v] = coord;
    let r = s.sqrt();
    [1.0 - r, r * (1.0 - v), r * v]
}

/// Interpolate a per-vertex attribute at every sample.
///
/// # Arguments
/// * `faces` - Vertex indices of each triangle
/// * `samples` - Raw coordinates and owning triangle of each sample
/// * `attribute` - One value per vertex
///
/// # Returns
/// * `Result<Vec<T>>` - One interpolated value per sample, in sample order
pub fn interpolate<T>(faces: &[[usize; 3]], samples: &SampleSet, attribute: &[T]) -> Result<Vec<T>>
where
    T: Copy + Send + Sync + Add<Output = T> + Mul<f32, Output = T>,
{
    samples.check_parallel()?;

    let corner = |index: usize| {
        attribute.get(index).copied().ok_or(Error::IndexOutOfRange {
            what: "vertex",
            index,
            len: attribute.len(),
        })
    };

    samples
        .coords
        .par_iter()
        .zip(samples.triangle_ids.par_iter())
        .map(|(&coord, &triangle)| {
            let face = faces.get(triangle).ok_or(Error::IndexOutOfRange {
                what: "triangle",
                index: triangle,
                len: faces.len(),
            })?;
            let [w1, w2, w3] = barycentric_weights(coord);
            Ok(corner(face[0])? * w1 + corner(face[1])? * w2 + corner(face[2])? * w3)
        })
        .collect()
}

/// Surface positions of the samples
pub fn interpolate_positions(mesh: &TriangleMesh, samples: &SampleSet) -> Result<Vec<Point3f>> {
    let coords: Vec<Vector3f> = mesh.vertices.iter().map(|v| v.coords).collect();
    let positions = interpolate(&mesh.faces, samples, &coords)?;
    Ok(positions.into_iter().map(Point3f::from).collect())
}

/// Interpolated normals of the samples.
///
/// With `renormalize` false the weighted average is returned as is, so its
/// length can fall below one where corner normals disagree. With `renormalize`
/// true every nonzero result is scaled to unit length.
pub fn interpolate_normals(
    mesh: &TriangleMesh,
    samples: &SampleSet,
    normals: &[Vector3f],
    renormalize: bool,
) -> Result<Vec<Vector3f>> {
    if normals.len() != mesh.vertices.len() {
        return Err(Error::InvalidData(format!(
            "expected {} vertex normals, got {}",
            mesh.vertices.len(),
            normals.len()
        )));
    }

    let mut interpolated = interpolate(&mesh.faces, samples, normals)?;
    if renormalize {
        interpolated.par_iter_mut().for_each(|n| {
            if let Some(unit) = n.try_normalize(f32::EPSILON) {
                *n = unit;
            }
        });
    }
    Ok(interpolated)
}
