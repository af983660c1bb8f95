//=========================================================================
// Math Primitives
//=========================================================================
//
// Transform type and Euler-orientation helpers shared across the engine.
//
// Conventions:
// - Rotations are stored in degrees and applied X → Y → Z.
// - Model matrix composition is fixed: T · Rx · Ry · Rz · S.
// - Degrees live in the data model; radians appear only at matrix
//   construction time.
//
// The orientation helpers are the single implementation used everywhere
// a local offset or direction must be rotated into world space (attached
// camera, spotlight rig).
//
//=========================================================================

//=== External Dependencies ===============================================

use glam::{Mat4, Vec3};

//=== Transform ===========================================================

/// Position, Euler rotation (degrees), and scale of an entity.
///
/// The derived model matrix uses the fixed composition
/// `translate · rotate_x · rotate_y · rotate_z · scale`; the rotation
/// order is part of the engine contract and must not change.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    /// World-space position.
    pub position: Vec3,

    /// Euler rotation in degrees, applied X → Y → Z.
    pub rotation: Vec3,

    /// Per-axis scale factors.
    pub scale: Vec3,
}

impl Transform {
    /// Creates a transform from explicit components.
    pub fn new(position: Vec3, rotation: Vec3, scale: Vec3) -> Self {
        Self { position, rotation, scale }
    }

    /// Creates a transform at `position` with no rotation and unit scale.
    pub fn at(position: Vec3) -> Self {
        Self { position, ..Self::default() }
    }

    //--- Derived Matrices -------------------------------------------------

    /// Full model matrix: `T · Rx · Ry · Rz · S`.
    pub fn model_matrix(&self) -> Mat4 {
        Mat4::from_translation(self.position)
            * self.orientation()
            * Mat4::from_scale(self.scale)
    }

    /// Rotation-only matrix: `Rx · Ry · Rz`.
    ///
    /// Used wherever a local-space offset or direction must be carried
    /// into world space by this entity's pose.
    pub fn orientation(&self) -> Mat4 {
        Mat4::from_rotation_x(self.rotation.x.to_radians())
            * Mat4::from_rotation_y(self.rotation.y.to_radians())
            * Mat4::from_rotation_z(self.rotation.z.to_radians())
    }

    //--- Pose Helpers -----------------------------------------------------

    /// Rotates a local-space offset by this pose's orientation.
    ///
    /// The result is relative to the entity's position; add
    /// `self.position` to obtain a world-space point.
    pub fn rotate_offset(&self, local: Vec3) -> Vec3 {
        self.orientation().transform_point3(local)
    }

    /// Rotates a local-space direction by this pose's orientation and
    /// normalizes the result.
    pub fn rotate_direction(&self, local: Vec3) -> Vec3 {
        self.orientation().transform_vector3(local).normalize()
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Vec3::ZERO,
            scale: Vec3::ONE,
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const EPS: f32 = 1e-5;

    fn assert_vec3_eq(actual: Vec3, expected: Vec3) {
        assert_relative_eq!(actual.x, expected.x, epsilon = EPS);
        assert_relative_eq!(actual.y, expected.y, epsilon = EPS);
        assert_relative_eq!(actual.z, expected.z, epsilon = EPS);
    }

    //=====================================================================
    // Model Matrix Tests
    //=====================================================================

    #[test]
    fn default_transform_is_identity() {
        let t = Transform::default();
        let m = t.model_matrix();

        assert!(m.abs_diff_eq(Mat4::IDENTITY, EPS));
    }

    #[test]
    fn identity_rotation_round_trips_translation_and_scale() {
        let t = Transform::new(
            Vec3::new(4.0, -2.5, 7.0),
            Vec3::ZERO,
            Vec3::new(2.0, 3.0, 0.5),
        );
        let m = t.model_matrix();

        // Translation column survives untouched
        assert_vec3_eq(m.w_axis.truncate(), t.position);

        // Basis vector lengths recover the per-axis scale
        assert_relative_eq!(m.x_axis.truncate().length(), 2.0, epsilon = EPS);
        assert_relative_eq!(m.y_axis.truncate().length(), 3.0, epsilon = EPS);
        assert_relative_eq!(m.z_axis.truncate().length(), 0.5, epsilon = EPS);
    }

    #[test]
    fn model_matrix_applies_scale_before_rotation() {
        // 90° yaw with asymmetric scale: local +X (scaled by 2) must end
        // up along world -Z with length 2.
        let t = Transform::new(
            Vec3::ZERO,
            Vec3::new(0.0, 90.0, 0.0),
            Vec3::new(2.0, 1.0, 1.0),
        );
        let p = t.model_matrix().transform_point3(Vec3::X);

        assert_vec3_eq(p, Vec3::new(0.0, 0.0, -2.0));
    }

    #[test]
    fn rotation_order_is_x_then_y_then_z() {
        let t = Transform::new(
            Vec3::ZERO,
            Vec3::new(30.0, 45.0, 60.0),
            Vec3::ONE,
        );
        let expected = Mat4::from_rotation_x(30f32.to_radians())
            * Mat4::from_rotation_y(45f32.to_radians())
            * Mat4::from_rotation_z(60f32.to_radians());

        assert!(t.orientation().abs_diff_eq(expected, EPS));
    }

    //=====================================================================
    // Pose Helper Tests
    //=====================================================================

    #[test]
    fn half_turn_yaw_flips_offset_in_ground_plane() {
        let t = Transform::new(
            Vec3::ZERO,
            Vec3::new(0.0, 180.0, 0.0),
            Vec3::ONE,
        );
        let world = t.rotate_offset(Vec3::new(-9.0, 3.5, 0.0));

        // x and z flip under a 180° yaw; y is untouched
        assert_vec3_eq(world, Vec3::new(9.0, 3.5, 0.0));
    }

    #[test]
    fn pure_yaw_matches_analytic_rotation() {
        let theta = 37.0f32;
        let t = Transform::new(
            Vec3::ZERO,
            Vec3::new(0.0, theta, 0.0),
            Vec3::ONE,
        );
        let local = Vec3::new(-9.0, 3.5, 0.0);
        let expected = Mat4::from_rotation_y(theta.to_radians()).transform_point3(local);

        assert_vec3_eq(t.rotate_offset(local), expected);
    }

    #[test]
    fn rotate_direction_returns_unit_vector() {
        let t = Transform::new(
            Vec3::ZERO,
            Vec3::new(10.0, 20.0, 30.0),
            Vec3::ONE,
        );
        let dir = t.rotate_direction(Vec3::new(-1.0, -0.25, 0.0));

        assert_relative_eq!(dir.length(), 1.0, epsilon = EPS);
    }

    #[test]
    fn rotate_offset_ignores_position_and_scale() {
        let mut t = Transform::new(
            Vec3::new(100.0, 100.0, 100.0),
            Vec3::new(0.0, 90.0, 0.0),
            Vec3::new(5.0, 5.0, 5.0),
        );
        let rotated = t.rotate_offset(Vec3::X);

        t.position = Vec3::ZERO;
        t.scale = Vec3::ONE;
        assert_vec3_eq(rotated, t.rotate_offset(Vec3::X));
    }
}
