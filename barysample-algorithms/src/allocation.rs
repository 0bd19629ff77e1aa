//! Area-proportional allocation of samples to triangles
//!
//! The allocator turns per-triangle areas into integer sample counts that sum
//! to exactly the requested total. Two strategies are available:
//!
//! - [`ExcessCorrection::RandomDecrement`] rounds every share up and then removes
//!   the surplus one sample at a time from distinct, randomly chosen triangles.
//! - [`ExcessCorrection::LargestRemainder`] rounds every share down and hands the
//!   shortfall to the triangles with the largest fractional parts. It does not
//!   consume randomness.

use barysample_core::{triangle_areas, validate_faces, Error, Point3f, Result};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::ops::Index;

/// How the rounding surplus or shortfall is reconciled with the requested count
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ExcessCorrection {
    /// Ceil each share, then decrement randomly chosen nonzero triangles
    #[default]
    RandomDecrement,
    /// Floor each share, then increment the largest fractional remainders
    LargestRemainder,
}

/// Per-triangle sample counts, parallel to the face list
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SampleAllocation {
    counts: Vec<usize>,
}

impl SampleAllocation {
    /// Wrap precomputed counts
    pub fn from_counts(counts: Vec<usize>) -> Self {
        Self { counts }
    }

    /// Build from signed counts, rejecting negative entries
    pub fn try_from_signed(counts: &[i64]) -> Result<Self> {
        counts
            .iter()
            .enumerate()
            .map(|(triangle, &count)| {
                usize::try_from(count).map_err(|_| Error::InvalidAllocation { triangle, count })
            })
            .collect::<Result<Vec<_>>>()
            .map(Self::from_counts)
    }

    pub fn counts(&self) -> &[usize] {
        &self.counts
    }

    pub fn into_counts(self) -> Vec<usize> {
        self.counts
    }

    /// Number of triangles covered
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Total number of samples; this is the realized sample count
    pub fn total(&self) -> usize {
        self.counts.iter().sum()
    }
}

impl Index<usize> for SampleAllocation {
    type Output = usize;

    fn index(&self, index: usize) -> &Self::Output {
        &self.counts[index]
    }
}

/// Normalized area distribution over the faces of a mesh
///
/// # Errors
/// * empty face list or zero total area → [`Error::DegenerateMesh`]
/// * face index past the vertex list → [`Error::IndexOutOfRange`]
/// * non-finite area → [`Error::InvalidData`]
pub fn area_distribution(vertices: &[Point3f], faces: &[[usize; 3]]) -> Result<Vec<f64>> {
    if faces.is_empty() {
        return Err(Error::DegenerateMesh("mesh has no triangles".to_string()));
    }
    validate_faces(vertices, faces)?;

    let areas = triangle_areas(vertices, faces)?;
    if let Some(face) = areas.iter().position(|a| !a.is_finite()) {
        return Err(Error::InvalidData(format!("triangle {face} has non-finite area")));
    }

    let total: f64 = areas.iter().sum();
    if !(total > 0.0) {
        return Err(Error::DegenerateMesh("total surface area is zero".to_string()));
    }

    Ok(areas.into_iter().map(|area| area / total).collect())
}

/// Allocate `n_samples` across the faces proportionally to their area.
///
/// The returned allocation always sums to `n_samples`, and triangles with zero
/// area always receive zero samples.
///
/// # Arguments
/// * `vertices` - Mesh vertex positions
/// * `faces` - Vertex indices of each triangle
/// * `n_samples` - Requested total number of samples
/// * `strategy` - How rounding is reconciled with the total
/// * `rng` - Random source, only consumed by [`ExcessCorrection::RandomDecrement`]
pub fn allocate<R: Rng + ?Sized>(
    vertices: &[Point3f],
    faces: &[[usize; 3]],
    n_samples: usize,
    strategy: ExcessCorrection,
    rng: &mut R,
) -> Result<SampleAllocation> {
    let distribution = area_distribution(vertices, faces)?;

    let counts = match strategy {
        ExcessCorrection::RandomDecrement => random_decrement(&distribution, n_samples, rng)?,
        ExcessCorrection::LargestRemainder => largest_remainder(&distribution, n_samples)?,
    };

    let allocation = SampleAllocation::from_counts(counts);
    debug_assert_eq!(allocation.total(), n_samples);
    Ok(allocation)
}

fn random_decrement<R: Rng + ?Sized>(
    distribution: &[f64],
    n_samples: usize,
    rng: &mut R,
) -> Result<Vec<usize>> {
    let scale = n_samples as f64;
    let mut counts: Vec<usize> = distribution
        .iter()
        .map(|&p| (scale * p).ceil() as usize)
        .collect();

    // each ceiling is at least its share and the shares sum to n_samples
    let total: usize = counts.iter().sum();
    debug_assert!(total >= n_samples, "ceiled allocation {total} below {n_samples}");

    let excess = total.saturating_sub(n_samples);
    if excess > 0 {
        let candidates: Vec<usize> = counts
            .iter()
            .enumerate()
            .filter(|(_, &count)| count > 0)
            .map(|(triangle, _)| triangle)
            .collect();

        if excess > candidates.len() {
            return Err(Error::SamplingUnderflow {
                excess,
                available: candidates.len(),
            });
        }

        log::debug!(
            "removing {excess} surplus samples from {} candidate triangles",
            candidates.len()
        );
        for pick in rand::seq::index::sample(rng, candidates.len(), excess) {
            counts[candidates[pick]] -= 1;
        }
    }

    Ok(counts)
}

fn largest_remainder(distribution: &[f64], n_samples: usize) -> Result<Vec<usize>> {
    let scale = n_samples as f64;
    let shares: Vec<f64> = distribution.iter().map(|&p| scale * p).collect();
    let mut counts: Vec<usize> = shares.iter().map(|s| s.floor() as usize).collect();

    // each floor is at most its share and the shares sum to n_samples
    let assigned: usize = counts.iter().sum();
    debug_assert!(assigned <= n_samples, "floored allocation {assigned} above {n_samples}");
    let remaining = n_samples.saturating_sub(assigned);

    if remaining > 0 {
        let remainder = |i: usize| shares[i] - counts[i] as f64;
        let mut candidates: Vec<usize> = (0..shares.len())
            .filter(|&i| distribution[i] > 0.0)
            .collect();
        candidates.sort_by(|&a, &b| remainder(b).total_cmp(&remainder(a)).then(a.cmp(&b)));

        if remaining > candidates.len() {
            return Err(Error::SamplingUnderflow {
                excess: remaining,
                available: candidates.len(),
            });
        }

        log::debug!("distributing {remaining} remainder samples by largest fraction");
        for &triangle in &candidates[..remaining] {
            counts[triangle] += 1;
        }
    }

    Ok(counts)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    /// Two triangles sharing an edge, with areas 1.5 and 0.5
    fn three_to_one() -> (Vec<Point3f>, Vec<[usize; 3]>) {
        let vertices = vec![
            Point3f::new(0.0, 0.0, 0.0),
            Point3f::new(3.0, 0.0, 0.0),
            Point3f::new(0.0, 1.0, 0.0),
            Point3f::new(-1.0, 0.0, 0.0),
        ];
        (vertices, vec![[0, 1, 2], [3, 0, 2]])
    }

    /// Fan of triangles with uneven areas, plus a degenerate sliver
    fn fan() -> (Vec<Point3f>, Vec<[usize; 3]>) {
        let mut vertices = vec![Point3f::origin()];
        let mut faces = Vec::new();
        let radii = [1.0, 0.3, 2.7, 0.05, 1.9, 1.1, 0.8];
        for (i, r) in radii.iter().enumerate() {
            let angle = i as f32 * 0.8;
            vertices.push(Point3f::new(r * angle.cos(), r * angle.sin(), 0.1 * i as f32));
        }
        for i in 1..radii.len() {
            faces.push([0, i, i + 1]);
        }
        // collinear with the origin and vertex 1
        vertices.push(Point3f::new(2.0 * vertices[1].x, 2.0 * vertices[1].y, 2.0 * vertices[1].z));
        faces.push([0, 1, vertices.len() - 1]);
        (vertices, faces)
    }

    #[test]
    fn test_distribution_is_normalized() {
        let (vertices, faces) = three_to_one();
        let p = area_distribution(&vertices, &faces).unwrap();
        assert_relative_eq!(p[0], 0.75, epsilon = 1e-12);
        assert_relative_eq!(p[1], 0.25, epsilon = 1e-12);
    }

    #[test]
    fn test_three_to_one_split() {
        let (vertices, faces) = three_to_one();
        let mut rng = StdRng::seed_from_u64(7);
        for strategy in [ExcessCorrection::RandomDecrement, ExcessCorrection::LargestRemainder] {
            let allocation = allocate(&vertices, &faces, 40, strategy, &mut rng).unwrap();
            assert_eq!(allocation.counts(), &[30, 10]);
        }
    }

    #[test]
    fn test_total_matches_request() {
        let (vertices, faces) = fan();
        let mut rng = StdRng::seed_from_u64(42);
        for strategy in [ExcessCorrection::RandomDecrement, ExcessCorrection::LargestRemainder] {
            for n in [0, 1, 2, 5, 6, 7, 13, 100, 999, 10_000] {
                let allocation = allocate(&vertices, &faces, n, strategy, &mut rng).unwrap();
                assert_eq!(allocation.total(), n, "{strategy:?} with n = {n}");
                assert_eq!(allocation.len(), faces.len());
            }
        }
    }

    #[test]
    fn test_zero_area_triangles_get_nothing() {
        let (vertices, faces) = fan();
        let sliver = faces.len() - 1;
        let mut rng = StdRng::seed_from_u64(1);
        for strategy in [ExcessCorrection::RandomDecrement, ExcessCorrection::LargestRemainder] {
            for n in [1, 10, 1000] {
                let allocation = allocate(&vertices, &faces, n, strategy, &mut rng).unwrap();
                assert_eq!(allocation[sliver], 0);
            }
        }
    }

    #[test]
    fn test_largest_remainder_is_deterministic() {
        let (vertices, faces) = fan();
        let a = allocate(&vertices, &faces, 57, ExcessCorrection::LargestRemainder, &mut StdRng::seed_from_u64(1)).unwrap();
        let b = allocate(&vertices, &faces, 57, ExcessCorrection::LargestRemainder, &mut StdRng::seed_from_u64(2)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_random_decrement_is_seed_reproducible() {
        let (vertices, faces) = fan();
        let a = allocate(&vertices, &faces, 57, ExcessCorrection::RandomDecrement, &mut StdRng::seed_from_u64(9)).unwrap();
        let b = allocate(&vertices, &faces, 57, ExcessCorrection::RandomDecrement, &mut StdRng::seed_from_u64(9)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_counts_stay_near_proportional_share() {
        let (vertices, faces) = fan();
        let p = area_distribution(&vertices, &faces).unwrap();
        let n = 500;
        let mut rng = StdRng::seed_from_u64(3);
        for strategy in [ExcessCorrection::RandomDecrement, ExcessCorrection::LargestRemainder] {
            let allocation = allocate(&vertices, &faces, n, strategy, &mut rng).unwrap();
            for (count, share) in allocation.counts().iter().zip(&p) {
                assert!((*count as f64 - n as f64 * share).abs() <= 1.0);
            }
        }
    }

    #[test]
    fn test_empty_faces_rejected() {
        let vertices = vec![Point3f::origin()];
        let result = allocate(&vertices, &[], 10, ExcessCorrection::default(), &mut StdRng::seed_from_u64(0));
        assert!(matches!(result, Err(Error::DegenerateMesh(_))));
    }

    #[test]
    fn test_zero_total_area_rejected() {
        let vertices = vec![
            Point3f::new(0.0, 0.0, 0.0),
            Point3f::new(1.0, 0.0, 0.0),
            Point3f::new(2.0, 0.0, 0.0),
        ];
        let result = allocate(&vertices, &[[0, 1, 2]], 10, ExcessCorrection::default(), &mut StdRng::seed_from_u64(0));
        assert!(matches!(result, Err(Error::DegenerateMesh(_))));
    }

    #[test]
    fn test_out_of_range_index_rejected() {
        let (vertices, _) = three_to_one();
        let result = allocate(&vertices, &[[0, 1, 9]], 10, ExcessCorrection::default(), &mut StdRng::seed_from_u64(0));
        assert_eq!(
            result,
            Err(Error::IndexOutOfRange { what: "vertex", index: 9, len: 4 })
        );
    }

    #[test]
    fn test_non_finite_area_rejected() {
        let vertices = vec![
            Point3f::new(0.0, 0.0, 0.0),
            Point3f::new(f32::NAN, 0.0, 0.0),
            Point3f::new(0.0, 1.0, 0.0),
        ];
        let result = allocate(&vertices, &[[0, 1, 2]], 10, ExcessCorrection::default(), &mut StdRng::seed_from_u64(0));
        assert!(matches!(result, Err(Error::InvalidData(_))));
    }

    /// Three congruent triangles side by side
    fn equal_thirds() -> (Vec<Point3f>, Vec<[usize; 3]>) {
        let mut vertices = Vec::new();
        let mut faces = Vec::new();
        for i in 0..3 {
            let x = 2.0 * i as f32;
            let base = vertices.len();
            vertices.push(Point3f::new(x, 0.0, 0.0));
            vertices.push(Point3f::new(x + 1.0, 0.0, 0.0));
            vertices.push(Point3f::new(x, 1.0, 0.0));
            faces.push([base, base + 1, base + 2]);
        }
        (vertices, faces)
    }

    #[test]
    fn test_largest_remainder_ties_go_to_lower_index() {
        let (vertices, faces) = equal_thirds();
        let mut rng = StdRng::seed_from_u64(0);
        let expected: [(usize, [usize; 3]); 4] =
            [(4, [2, 1, 1]), (5, [2, 2, 1]), (7, [3, 2, 2]), (8, [3, 3, 2])];
        for (n, counts) in expected {
            let allocation = allocate(&vertices, &faces, n, ExcessCorrection::LargestRemainder, &mut rng).unwrap();
            assert_eq!(allocation.counts(), &counts, "n = {n}");
        }
    }

    #[test]
    fn test_largest_remainder_prefers_bigger_fraction() {
        // shares 1.2, 1.5, 1.3: the single leftover sample goes to the middle triangle
        assert_eq!(largest_remainder(&[0.3, 0.375, 0.325], 4), Ok(vec![1, 2, 1]));
    }

    #[test]
    fn test_largest_remainder_underflow() {
        // an unnormalized share leaves more samples than positive-area triangles
        assert_eq!(
            largest_remainder(&[0.25, 0.0], 4),
            Err(Error::SamplingUnderflow { excess: 3, available: 1 })
        );
    }

    #[test]
    fn test_signed_counts() {
        let allocation = SampleAllocation::try_from_signed(&[2, 0, 3]).unwrap();
        assert_eq!(allocation.total(), 5);
        assert_eq!(
            SampleAllocation::try_from_signed(&[2, -1, 3]),
            Err(Error::InvalidAllocation { triangle: 1, count: -1 })
        );
    }

    #[test]
    fn test_random_decrement_underflow() {
        // an unnormalized share rounds up past what one triangle can give back
        let mut rng = StdRng::seed_from_u64(0);
        assert_eq!(random_decrement(&[1.5, 0.0], 2, &mut rng), Ok(vec![2, 0]));
        assert_eq!(
            random_decrement(&[1.5, 0.0], 4, &mut rng),
            Err(Error::SamplingUnderflow { excess: 2, available: 1 })
        );
    }
}
