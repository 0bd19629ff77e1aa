//! Rotation matrix builders and conversions

use crate::point::*;
use nalgebra::{Matrix3, Rotation3};

/// Rotation matrix about the X axis, `angle` in radians
pub fn rot_mat_x(angle: f32) -> Matrix3<f32> {
    let (s, c) = angle.sin_cos();
    Matrix3::new(
        1.0, 0.0, 0.0,
        0.0, c, -s,
        0.0, s, c,
    )
}

/// Rotation matrix about the Y axis, `angle` in radians
pub fn rot_mat_y(angle: f32) -> Matrix3<f32> {
    let (s, c) = angle.sin_cos();
    Matrix3::new(
        c, 0.0, s,
        0.0, 1.0, 0.0,
        -s, 0.0, c,
    )
}

/// Rotation matrix about the Z axis, `angle` in radians
pub fn rot_mat_z(angle: f32) -> Matrix3<f32> {
    let (s, c) = angle.sin_cos();
    Matrix3::new(
        c, -s, 0.0,
        s, c, 0.0,
        0.0, 0.0, 1.0,
    )
}

/// Apply `rot` to every point (`p' = R p`)
pub fn rotate_points(points: &[Point3f], rot: &Matrix3<f32>) -> Vec<Point3f> {
    points.iter().map(|p| Point3f::from(rot * p.coords)).collect()
}

/// Rotate points about the X axis
pub fn rotate_x(points: &[Point3f], angle: f32) -> Vec<Point3f> {
    rotate_points(points, &rot_mat_x(angle))
}

/// Rotate points about the Y axis
pub fn rotate_y(points: &[Point3f], angle: f32) -> Vec<Point3f> {
    rotate_points(points, &rot_mat_y(angle))
}

/// Rotate points about the Z axis
pub fn rotate_z(points: &[Point3f], angle: f32) -> Vec<Point3f> {
    rotate_points(points, &rot_mat_z(angle))
}

/// Convert an axis-angle vector (unit axis scaled by the angle) to a rotation matrix.
///
/// The zero vector maps to the identity.
pub fn axis_angle_to_rot_mat(axis_angle: &Vector3f) -> Matrix3<f32> {
    Rotation3::new(*axis_angle).into_inner()
}

/// Convert a rotation matrix to its axis-angle vector.
///
/// `rot` is assumed to be orthonormal; it is not re-orthogonalized.
pub fn rot_mat_to_axis_angle(rot: &Matrix3<f32>) -> Vector3f {
    Rotation3::from_matrix_unchecked(*rot).scaled_axis()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f32::consts::FRAC_PI_2;

    #[test]
    fn test_elementary_rotations_are_proper() {
        for angle in [0.0, 0.3, 1.2, -2.5] {
            for rot in [rot_mat_x(angle), rot_mat_y(angle), rot_mat_z(angle)] {
                assert_relative_eq!(rot * rot.transpose(), Matrix3::identity(), epsilon = 1e-6);
                assert_relative_eq!(rot.determinant(), 1.0, epsilon = 1e-6);
            }
        }
    }

    #[test]
    fn test_quarter_turns() {
        let x = Point3f::new(1.0, 0.0, 0.0);
        let y = Point3f::new(0.0, 1.0, 0.0);
        let z = Point3f::new(0.0, 0.0, 1.0);

        assert_relative_eq!(rotate_z(&[x], FRAC_PI_2)[0], y, epsilon = 1e-6);
        assert_relative_eq!(rotate_x(&[y], FRAC_PI_2)[0], z, epsilon = 1e-6);
        assert_relative_eq!(rotate_y(&[z], FRAC_PI_2)[0], x, epsilon = 1e-6);
    }

    #[test]
    fn test_matches_nalgebra_axis_rotations() {
        let angle = 0.7;
        assert_relative_eq!(
            rot_mat_x(angle),
            Rotation3::from_axis_angle(&Vector3f::x_axis(), angle).into_inner(),
            epsilon = 1e-6
        );
        assert_relative_eq!(
            rot_mat_y(angle),
            Rotation3::from_axis_angle(&Vector3f::y_axis(), angle).into_inner(),
            epsilon = 1e-6
        );
    }

    #[test]
    fn test_axis_angle_round_trip() {
        let axis_angle = Vector3f::new(0.2, -0.4, 0.9);
        let rot = axis_angle_to_rot_mat(&axis_angle);
        assert_relative_eq!(rot_mat_to_axis_angle(&rot), axis_angle, epsilon = 1e-5);
    }

    #[test]
    fn test_zero_axis_angle_is_identity() {
        let rot = axis_angle_to_rot_mat(&Vector3f::zeros());
        assert_relative_eq!(rot, Matrix3::identity(), epsilon = 1e-7);
        assert_relative_eq!(rot_mat_to_axis_angle(&rot), Vector3f::zeros(), epsilon = 1e-7);
    }
}
