//! Triangle mesh data structure and per-face geometry

use crate::error::{Error, Result};
use crate::point::*;
use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

/// A triangle mesh with vertices and faces
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TriangleMesh {
    pub vertices: Vec<Point3f>,
    pub faces: Vec<[usize; 3]>,
    /// Optional per-vertex normals, parallel to `vertices`
    pub normals: Option<Vec<Vector3f>>,
}

impl TriangleMesh {
    /// Create a new empty mesh
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a mesh from vertices and faces
    pub fn from_vertices_and_faces(vertices: Vec<Point3f>, faces: Vec<[usize; 3]>) -> Self {
        Self {
            vertices,
            faces,
            normals: None,
        }
    }

    /// Get the number of vertices
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Get the number of faces
    pub fn face_count(&self) -> usize {
        self.faces.len()
    }

    /// Check if the mesh is empty
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty() || self.faces.is_empty()
    }

    /// Add a vertex to the mesh, returning its index
    pub fn add_vertex(&mut self, vertex: Point3f) -> usize {
        let index = self.vertices.len();
        self.vertices.push(vertex);
        index
    }

    /// Add a face to the mesh
    pub fn add_face(&mut self, face: [usize; 3]) {
        self.faces.push(face);
    }

    /// Check that every face references an existing vertex
    pub fn validate(&self) -> Result<()> {
        validate_faces(&self.vertices, &self.faces)
    }

    /// Corner positions of face `index`
    pub fn triangle(&self, index: usize) -> Result<[Point3f; 3]> {
        let face = self.faces.get(index).ok_or(Error::IndexOutOfRange {
            what: "face",
            index,
            len: self.faces.len(),
        })?;
        corners(&self.vertices, face)
    }

    /// Area of every face, parallel to `faces`
    pub fn triangle_areas(&self) -> Result<Vec<f64>> {
        triangle_areas(&self.vertices, &self.faces)
    }

    /// Total surface area of the mesh
    pub fn surface_area(&self) -> Result<f64> {
        Ok(self.triangle_areas()?.iter().sum())
    }

    /// Set vertex normals; the count must match the vertex count
    pub fn set_normals(&mut self, normals: Vec<Vector3f>) -> Result<()> {
        if normals.len() != self.vertices.len() {
            return Err(Error::InvalidData(format!(
                "expected {} vertex normals, got {}",
                self.vertices.len(),
                normals.len()
            )));
        }
        self.normals = Some(normals);
        Ok(())
    }

    /// Clear the mesh
    pub fn clear(&mut self) {
        self.vertices.clear();
        self.faces.clear();
        self.normals = None;
    }
}

/// Check that every index in `faces` is below `vertices.len()`
pub fn validate_faces(vertices: &[Point3f], faces: &[[usize; 3]]) -> Result<()> {
    for face in faces {
        for &index in face {
            if index >= vertices.len() {
                return Err(Error::IndexOutOfRange {
                    what: "vertex",
                    index,
                    len: vertices.len(),
                });
            }
        }
    }
    Ok(())
}

/// Look up the three corner positions of `face`
pub fn corners(vertices: &[Point3f], face: &[usize; 3]) -> Result<[Point3f; 3]> {
    let get = |index: usize| {
        vertices.get(index).copied().ok_or(Error::IndexOutOfRange {
            what: "vertex",
            index,
            len: vertices.len(),
        })
    };
    Ok([get(face[0])?, get(face[1])?, get(face[2])?])
}

/// Area of the triangle `(a, b, c)` as ½‖(a−c)×(b−c)‖, evaluated in double precision
pub fn triangle_area(a: &Point3f, b: &Point3f, c: &Point3f) -> f64 {
    let a = a.coords.cast::<f64>();
    let b = b.coords.cast::<f64>();
    let c = c.coords.cast::<f64>();
    let cross: Vector3<f64> = (a - c).cross(&(b - c));
    0.5 * cross.norm()
}

/// Per-face areas for an indexed triangle list
pub fn triangle_areas(vertices: &[Point3f], faces: &[[usize; 3]]) -> Result<Vec<f64>> {
    faces
        .iter()
        .map(|face| {
            let [a, b, c] = corners(vertices, face)?;
            Ok(triangle_area(&a, &b, &c))
        })
        .collect()
}
