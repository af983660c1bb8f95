//=========================================================================
// Bezier Patch
//=========================================================================
//
// The tessellated ground patch: a 4×4 grid of control points whose
// heights oscillate over time. Purely cosmetic — the only guarantee is
// boundedness of the oscillation around the base heights.
//
//=========================================================================

//=== External Dependencies ===============================================

use glam::Vec3;

//=== Internal Dependencies ===============================================

use crate::core::math::Transform;

//=== Animation Constants =================================================

const ANIMATION_SPEED: f32 = 3.5;
const ANIMATION_AMPLITUDE: f32 = 0.005;

/// Phase offset between consecutive control points, radians.
const PHASE_STEP: f32 = 0.5;

//=== BezierPatch =========================================================

/// A 16-point bicubic patch with animated control-point heights.
#[derive(Debug, Clone)]
pub struct BezierPatch {
    pub control_points: Vec<Vec3>,
    pub transform: Transform,

    time: f32,
}

impl BezierPatch {
    /// The demo patch: a gently uneven 4×4 grid placed at (3, 1, 10)
    /// and scaled ×3.
    pub fn new() -> Self {
        let control_points = vec![
            // Bottom row
            Vec3::new(-1.0, 0.5, -1.0),
            Vec3::new(-0.33, 0.0, -1.0),
            Vec3::new(0.33, 0.0, -1.0),
            Vec3::new(1.0, 0.0, -1.0),
            // Second row
            Vec3::new(-1.0, 0.0, -0.33),
            Vec3::new(-0.33, 0.0, -0.33),
            Vec3::new(0.33, 0.0, -0.33),
            Vec3::new(1.0, 0.2, -0.33),
            // Third row
            Vec3::new(-1.0, 0.0, 0.33),
            Vec3::new(-0.33, 0.0, 0.33),
            Vec3::new(0.33, 0.0, 0.33),
            Vec3::new(1.0, 0.0, 0.33),
            // Top row
            Vec3::new(-1.0, -0.3, 1.0),
            Vec3::new(-0.33, 0.0, 1.0),
            Vec3::new(0.33, 0.0, 1.0),
            Vec3::new(1.0, 0.5, 1.0),
        ];

        Self {
            control_points,
            transform: Transform::new(
                Vec3::new(3.0, 1.0, 10.0),
                Vec3::ZERO,
                Vec3::splat(3.0),
            ),
            time: 0.0,
        }
    }

    //--- Per-Frame Update -------------------------------------------------

    /// Advances the oscillation: each control point's height shifts by
    /// amplitude · sin(time + index · phase step).
    pub fn update(&mut self, delta_time: f32) {
        self.time += delta_time * ANIMATION_SPEED;

        for (i, point) in self.control_points.iter_mut().enumerate() {
            point.y += ANIMATION_AMPLITUDE * (self.time + i as f32 * PHASE_STEP).sin();
        }
    }
}

impl Default for BezierPatch {
    fn default() -> Self {
        Self::new()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
