// Rotation utilities for Mat3
//
// Axis-angle (Rodrigues) rotations between directions and Euler rotations
// used to orient cameras and meshes.

use glam::{Mat3, Vec3};

/// Squared length below which a cross product is treated as zero,
/// i.e. the two directions are considered (anti)parallel.
pub const ALIGNMENT_EPSILON: f32 = 1e-12;

/// Rotation taking direction `from` onto direction `to`.
///
/// The axis is the normalized cross product of the two directions and the
/// angle is the arccos of their dot product. When the directions are
/// parallel the result is the identity; when they are opposite it is a half
/// turn about `fallback_axis`, which must be perpendicular to `from`.
pub fn rotation_between(from: Vec3, to: Vec3, fallback_axis: Vec3) -> Mat3 {
    let from = from.normalize();
    let to = to.normalize();
    let cos_angle = from.dot(to).clamp(-1.0, 1.0);
    let axis = from.cross(to);

    if axis.length_squared() < ALIGNMENT_EPSILON {
        return if cos_angle > 0.0 {
            Mat3::IDENTITY
        } else {
            Mat3::from_axis_angle(fallback_axis.normalize(), std::f32::consts::PI)
        };
    }

    Mat3::from_axis_angle(axis.normalize(), cos_angle.acos())
}

/// Rotation from Euler angles in degrees, applied X first, then Y, then Z.
pub fn euler_rotation_degrees(x: f32, y: f32, z: f32) -> Mat3 {
    Mat3::from_rotation_z(z.to_radians())
        * Mat3::from_rotation_y(y.to_radians())
        * Mat3::from_rotation_x(x.to_radians())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx_eq(a: Vec3, b: Vec3) -> bool {
        (a - b).length() < 1e-5
    }

    #[test]
    fn test_rotation_between_maps_from_onto_to() {
        let from = Vec3::NEG_Z;
        let to = Vec3::new(1.0, 2.0, -0.5).normalize();
        let rot = rotation_between(from, to, Vec3::Y);

        assert!(approx_eq(rot * from, to));
    }

    #[test]
    fn test_rotation_between_quarter_turn() {
        // -Z onto +X is a quarter turn about -Y
        let rot = rotation_between(Vec3::NEG_Z, Vec3::X, Vec3::Y);
        assert!(approx_eq(rot * Vec3::NEG_Z, Vec3::X));
        assert!(approx_eq(rot * Vec3::Y, Vec3::Y));
    }

    #[test]
    fn test_rotation_between_parallel_is_identity() {
        let rot = rotation_between(Vec3::NEG_Z, Vec3::new(0.0, 0.0, -3.0), Vec3::Y);
        assert_eq!(rot, Mat3::IDENTITY);
    }

    #[test]
    fn test_rotation_between_opposite_is_half_turn() {
        let rot = rotation_between(Vec3::NEG_Z, Vec3::Z, Vec3::Y);
        let v = rot * Vec3::NEG_Z;

        assert!(!v.is_nan());
        assert!(approx_eq(v, Vec3::Z));
        // Up is preserved by a half turn about up
        assert!(approx_eq(rot * Vec3::Y, Vec3::Y));
    }

    #[test]
    fn test_euler_zero_is_identity() {
        assert_eq!(euler_rotation_degrees(0.0, 0.0, 0.0), Mat3::IDENTITY);
    }

    #[test]
    fn test_euler_order_x_then_y() {
        // X by 90 takes +Y to +Z, then Y by 90 takes +Z to +X
        let rot = euler_rotation_degrees(90.0, 90.0, 0.0);
        assert!(approx_eq(rot * Vec3::Y, Vec3::X));
    }

    #[test]
    fn test_euler_single_axis() {
        let rot = euler_rotation_degrees(0.0, 0.0, 90.0);
        assert!(approx_eq(rot * Vec3::X, Vec3::Y));
    }
}
