//! Area-weighted sampling pipeline
//!
//! Allocation, assignment and coordinate generation are chained into a
//! [`SampleSet`]; [`MeshSampler`] adds the dense path that turns a sample set
//! into positions and normals.

use crate::allocation::{allocate, ExcessCorrection};
use crate::assignment::expand;
use crate::barycentric::generate;
use crate::interpolation::{interpolate_normals, interpolate_positions};
use crate::normals::{compute_vertex_normals, NormalWeighting};
use barysample_core::{Error, NormalPoint3f, Point3f, PointCloud, Result, TriangleMesh, Vector3f};
use itertools::Itertools;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

/// Samples drawn from a mesh surface
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SampleSet {
    /// Raw unit-square parameters `[s, v]`, one per sample
    pub coords: Vec<[f32; 2]>,
    /// Owning triangle of each sample, grouped in ascending order
    pub triangle_ids: Vec<usize>,
}

impl SampleSet {
    pub fn len(&self) -> usize {
        self.triangle_ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.triangle_ids.is_empty()
    }

    /// `(triangle, count)` for every contiguous run of samples
    pub fn triangle_runs(&self) -> Vec<(usize, usize)> {
        self.triangle_ids
            .iter()
            .copied()
            .dedup_with_count()
            .map(|(count, triangle)| (triangle, count))
            .collect()
    }

    pub(crate) fn check_parallel(&self) -> Result<()> {
        if self.coords.len() != self.triangle_ids.len() {
            return Err(Error::InvalidData(format!(
                "{} coordinates but {} triangle ids",
                self.coords.len(),
                self.triangle_ids.len()
            )));
        }
        Ok(())
    }
}

/// Configuration for [`MeshSampler`]
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SamplingConfig {
    /// Reconciliation of rounded per-triangle counts with the requested total
    pub excess_correction: ExcessCorrection,
    /// Weighting used when vertex normals have to be computed
    pub normal_weighting: NormalWeighting,
    /// Rescale interpolated normals to unit length
    pub renormalize_normals: bool,
    /// Seed for reproducible sampling; entropy-seeded when `None`
    pub seed: Option<u64>,
}

impl SamplingConfig {
    pub fn with_excess_correction(mut self, excess_correction: ExcessCorrection) -> Self {
        self.excess_correction = excess_correction;
        self
    }

    pub fn with_normal_weighting(mut self, normal_weighting: NormalWeighting) -> Self {
        self.normal_weighting = normal_weighting;
        self
    }

    pub fn with_renormalized_normals(mut self, renormalize: bool) -> Self {
        self.renormalize_normals = renormalize;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}

/// Draw `n_samples` area-weighted samples from an indexed triangle list.
///
/// # Arguments
/// * `vertices` - Mesh vertex positions
/// * `faces` - Vertex indices of each triangle
/// * `n_samples` - Number of samples on the surface
/// * `strategy` - Rounding reconciliation used by the allocator
/// * `rng` - Random source for allocation and coordinates
///
/// # Returns
/// * `Result<SampleSet>` - Exactly `n_samples` samples grouped by triangle
pub fn sample_mesh<R: Rng + ?Sized>(
    vertices: &[Point3f],
    faces: &[[usize; 3]],
    n_samples: usize,
    strategy: ExcessCorrection,
    rng: &mut R,
) -> Result<SampleSet> {
    let allocation = allocate(vertices, faces, n_samples, strategy, rng)?;
    let triangle_ids = expand(&allocation);
    let coords = generate(triangle_ids.len(), rng);

    log::trace!(
        "sampled {} points over {} of {} triangles",
        triangle_ids.len(),
        allocation.counts().iter().filter(|&&c| c > 0).count(),
        faces.len()
    );

    Ok(SampleSet { coords, triangle_ids })
}

/// Raw coordinates and triangle ids for `n_samples` area-weighted samples,
/// using the default random-decrement allocation.
///
/// # Example
/// ```rust
/// use barysample_core::Point3f;
/// use barysample_algorithms::compute_barycentric_coords;
/// use rand::SeedableRng;
///
/// let vertices = vec![
///     Point3f::new(0.0, 0.0, 0.0),
///     Point3f::new(1.0, 0.0, 0.0),
///     Point3f::new(0.0, 1.0, 0.0),
/// ];
/// let mut rng = rand::rngs::StdRng::seed_from_u64(0);
/// let (coords, triangle_ids) =
///     compute_barycentric_coords(&vertices, &[[0, 1, 2]], 100, &mut rng).unwrap();
/// assert_eq!(coords.len(), 100);
/// assert!(triangle_ids.iter().all(|&t| t == 0));
/// ```
pub fn compute_barycentric_coords<R: Rng + ?Sized>(
    vertices: &[Point3f],
    faces: &[[usize; 3]],
    n_samples: usize,
    rng: &mut R,
) -> Result<(Vec<[f32; 2]>, Vec<usize>)> {
    let samples = sample_mesh(vertices, faces, n_samples, ExcessCorrection::default(), rng)?;
    Ok((samples.coords, samples.triangle_ids))
}

/// Configured area-weighted mesh sampler
#[derive(Debug, Clone, Default)]
pub struct MeshSampler {
    config: SamplingConfig,
}

impl MeshSampler {
    pub fn new(config: SamplingConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &SamplingConfig {
        &self.config
    }

    /// Random source described by the configuration
    pub fn rng(&self) -> StdRng {
        match self.config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        }
    }

    /// Draw raw samples using the configured random source
    pub fn sample(&self, mesh: &TriangleMesh, n_samples: usize) -> Result<SampleSet> {
        self.sample_with_rng(mesh, n_samples, &mut self.rng())
    }

    /// Draw raw samples using the given random source
    pub fn sample_with_rng<R: Rng + ?Sized>(
        &self,
        mesh: &TriangleMesh,
        n_samples: usize,
        rng: &mut R,
    ) -> Result<SampleSet> {
        sample_mesh(&mesh.vertices, &mesh.faces, n_samples, self.config.excess_correction, rng)
    }

    /// Sample surface points with interpolated normals
    pub fn sample_points(&self, mesh: &TriangleMesh, n_samples: usize) -> Result<PointCloud<NormalPoint3f>> {
        self.sample_points_with_rng(mesh, n_samples, &mut self.rng())
    }

    /// Sample surface points with interpolated normals using the given random source.
    ///
    /// The mesh's own vertex normals are used when present; otherwise they are
    /// computed with the configured weighting.
    pub fn sample_points_with_rng<R: Rng + ?Sized>(
        &self,
        mesh: &TriangleMesh,
        n_samples: usize,
        rng: &mut R,
    ) -> Result<PointCloud<NormalPoint3f>> {
        let samples = self.sample_with_rng(mesh, n_samples, rng)?;
        self.points_from_samples(mesh, &samples)
    }

    /// Positions and normals for an existing sample set
    pub fn points_from_samples(&self, mesh: &TriangleMesh, samples: &SampleSet) -> Result<PointCloud<NormalPoint3f>> {
        let positions = interpolate_positions(mesh, samples)?;
        let vertex_normals = self.vertex_normals(mesh)?;
        let normals = interpolate_normals(mesh, samples, &vertex_normals, self.config.renormalize_normals)?;

        Ok(positions
            .into_iter()
            .zip(normals)
            .map(|(position, normal)| NormalPoint3f::new(position, normal))
            .collect())
    }

    fn vertex_normals(&self, mesh: &TriangleMesh) -> Result<Vec<Vector3f>> {
        match &mesh.normals {
            Some(normals) if normals.len() == mesh.vertices.len() => Ok(normals.clone()),
            Some(normals) => {
                log::warn!(
                    "ignoring {} mesh normals for {} vertices; recomputing",
                    normals.len(),
                    mesh.vertices.len()
                );
                compute_vertex_normals(&mesh.vertices, &mesh.faces, self.config.normal_weighting)
            }
            None => compute_vertex_normals(&mesh.vertices, &mesh.faces, self.config.normal_weighting),
        }
    }
}
