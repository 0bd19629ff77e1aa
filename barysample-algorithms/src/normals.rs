//! Vertex normal estimation for triangle meshes

use barysample_core::{corners, Point3f, Result, TriangleMesh, Vector3f};
use serde::{Deserialize, Serialize};

/// How adjacent face normals are combined at a vertex
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum NormalWeighting {
    /// Every adjacent face contributes its unit normal
    #[default]
    Unweighted,
    /// Adjacent faces contribute in proportion to their area
    AreaWeighted,
}

/// Estimate one unit normal per vertex from the faces around it.
///
/// Vertices that touch no face with nonzero area get the zero vector.
pub fn compute_vertex_normals(
    vertices: &[Point3f],
    faces: &[[usize; 3]],
    weighting: NormalWeighting,
) -> Result<Vec<Vector3f>> {
    let mut accumulated = vec![Vector3f::zeros(); vertices.len()];

    for face in faces {
        let [a, b, c] = corners(vertices, face)?;
        // length is twice the face area
        let cross = (b - a).cross(&(c - a));
        let contribution = match weighting {
            NormalWeighting::Unweighted => cross.try_normalize(f32::EPSILON).unwrap_or_else(Vector3f::zeros),
            NormalWeighting::AreaWeighted => cross,
        };
        for &index in face {
            accumulated[index] += contribution;
        }
    }

    Ok(accumulated
        .into_iter()
        .map(|n| n.try_normalize(f32::EPSILON).unwrap_or_else(Vector3f::zeros))
        .collect())
}

/// Compute vertex normals for `mesh` and store them on it
pub fn estimate_mesh_normals(mesh: &mut TriangleMesh, weighting: NormalWeighting) -> Result<()> {
    let normals = compute_vertex_normals(&mesh.vertices, &mesh.faces, weighting)?;
    mesh.set_normals(normals)
}
