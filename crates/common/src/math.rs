use glam::Vec3;

/// Scale `v` to unit length by dividing each component by its Euclidean length.
///
/// `v` must not be the zero vector. A zero input divides by zero and yields
/// NaN components; it is not checked.
pub fn normalize(v: Vec3) -> Vec3 {
    v / v.length()
}

/// Right-handed cross product `a × b`.
pub fn cross(a: Vec3, b: Vec3) -> Vec3 {
    Vec3::new(
        a.y * b.z - a.z * b.y,
        a.z * b.x - a.x * b.z,
        a.x * b.y - a.y * b.x,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_produces_unit_length() {
        let v = normalize(Vec3::new(3.0, 4.0, 12.0));
        assert!((v.length() - 1.0).abs() < 1e-6);
        assert!(v.abs_diff_eq(Vec3::new(3.0, 4.0, 12.0) / 13.0, 1e-6));
    }

    #[test]
    fn normalize_keeps_direction_of_axis_vectors() {
        assert_eq!(normalize(Vec3::new(0.0, 0.0, -5.0)), Vec3::NEG_Z);
        assert_eq!(normalize(Vec3::new(0.0, 2.0, 0.0)), Vec3::Y);
    }

    #[test]
    fn normalize_zero_is_nan() {
        assert!(normalize(Vec3::ZERO).is_nan());
    }

    #[test]
    fn cross_is_right_handed() {
        assert_eq!(cross(Vec3::X, Vec3::Y), Vec3::Z);
        assert_eq!(cross(Vec3::Y, Vec3::Z), Vec3::X);
        assert_eq!(cross(Vec3::Z, Vec3::X), Vec3::Y);
    }

    #[test]
    fn cross_matches_glam() {
        let a = Vec3::new(1.5, -2.0, 0.25);
        let b = Vec3::new(-0.5, 4.0, 3.0);
        assert!(cross(a, b).abs_diff_eq(a.cross(b), 1e-6));
    }

    #[test]
    fn cross_of_back_and_up_points_along_x() {
        // Initial camera: back = -Z, up = +Y.
        assert_eq!(cross(Vec3::NEG_Z, Vec3::Y), Vec3::X);
    }
}
