//! Vector helpers for landmark geometry
//!
//! Thin wrappers over `nalgebra::Vector3`. All functions are pure.

use nalgebra::Vector3;

use crate::landmarks::Landmark;

pub type Vec3 = Vector3<f32>;

pub fn to_vec3(landmark: Landmark) -> Vec3 {
    Vec3::new(landmark.x, landmark.y, landmark.z)
}

/// Vector pointing from `from` to `to`
pub fn vector_between(from: &Vec3, to: &Vec3) -> Vec3 {
    to - from
}

/// Unit vector in the direction of `v`; the zero vector is returned unchanged
pub fn normalize(v: &Vec3) -> Vec3 {
    let norm = v.norm();
    if norm == 0.0 {
        return *v;
    }
    v / norm
}

pub fn cross(a: &Vec3, b: &Vec3) -> Vec3 {
    a.cross(b)
}

pub fn distance(a: &Vec3, b: &Vec3) -> f32 {
    (a - b).norm()
}

/// Angle between two vectors in degrees
///
/// Uses cos(θ) = û · v̂ with the dot product clamped to [-1, 1] so
/// floating-point overshoot never reaches `acos` as NaN.
///
/// - 0° = same direction
/// - 180° = opposite directions
pub fn angle_between(v1: &Vec3, v2: &Vec3) -> f32 {
    let u1 = normalize(v1);
    let u2 = normalize(v2);
    let cos_angle = u1.dot(&u2).clamp(-1.0, 1.0);
    cos_angle.acos().to_degrees()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_direction() {
        let v = Vec3::new(0.3, -1.2, 0.7);
        assert!(angle_between(&v, &v).abs() < 0.1);
    }

    #[test]
    fn test_opposite_direction() {
        let v = Vec3::new(0.3, -1.2, 0.7);
        assert!((angle_between(&v, &-v) - 180.0).abs() < 0.1);
    }

    #[test]
    fn test_right_angle() {
        let a = Vec3::new(1.0, 0.0, 0.0);
        let b = Vec3::new(0.0, 0.5, 0.0);
        assert!((angle_between(&a, &b) - 90.0).abs() < 0.01);
    }

    #[test]
    fn test_normalize_zero_vector() {
        let zero = Vec3::zeros();
        assert_eq!(normalize(&zero), zero);
    }

    #[test]
    fn test_normalize_unit_length() {
        let v = normalize(&Vec3::new(3.0, 4.0, 0.0));
        assert!((v.norm() - 1.0).abs() < 1e-6);
        assert!((v.x - 0.6).abs() < 1e-6);
    }

    #[test]
    fn test_cross_and_distance() {
        let x = Vec3::new(1.0, 0.0, 0.0);
        let y = Vec3::new(0.0, 1.0, 0.0);
        assert_eq!(cross(&x, &y), Vec3::new(0.0, 0.0, 1.0));
        assert!((distance(&x, &y) - 2f32.sqrt()).abs() < 1e-6);
        assert_eq!(vector_between(&x, &y), Vec3::new(-1.0, 1.0, 0.0));
    }
}
