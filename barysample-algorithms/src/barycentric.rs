//! Raw barycentric parameters for sampled points

use rand::Rng;

/// Draw `n_samples` points uniformly from the unit square `[0, 1)²`.
///
/// These are not barycentric weights yet. The square-root mapping onto a
/// triangle is applied by [`crate::interpolation::barycentric_weights`], so the
/// same draw can feed several interpolated attributes.
pub fn generate<R: Rng + ?Sized>(n_samples: usize, rng: &mut R) -> Vec<[f32; 2]> {
    (0..n_samples).map(|_| [rng.gen::<f32>(), rng.gen::<f32>()]).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_shape_and_range() {
        let mut rng = StdRng::seed_from_u64(11);
        let coords = generate(1000, &mut rng);
        assert_eq!(coords.len(), 1000);
        assert!(coords.iter().flatten().all(|&c| (0.0..1.0).contains(&c)));
    }

    #[test]
    fn test_zero_samples() {
        assert!(generate(0, &mut StdRng::seed_from_u64(0)).is_empty());
    }

    #[test]
    fn test_roughly_uniform() {
        let mut rng = StdRng::seed_from_u64(5);
        let coords = generate(20_000, &mut rng);
        let mean_s = coords.iter().map(|c| c[0]).sum::<f32>() / coords.len() as f32;
        let mean_v = coords.iter().map(|c| c[1]).sum::<f32>() / coords.len() as f32;
        assert!((mean_s - 0.5).abs() < 0.02, "mean s = {mean_s}");
        assert!((mean_v - 0.5).abs() < 0.02, "mean v = {mean_v}");
    }
}
