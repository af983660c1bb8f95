//=========================================================================
// Game Object
//=========================================================================
//
// A named entity in the scene: a pose, a shared model resource, and an
// optional circular-motion behavior.
//
// Motion model: the angle accumulator advances by speed · dt, the object
// orbits the world origin in the ground plane, and its yaw is set so it
// faces the direction of travel. Variable timestep — orbit speed follows
// frame rate by design of the simulation (see the engine docs).
//
//=========================================================================

//=== Internal Dependencies ===============================================

use crate::core::math::Transform;
use crate::core::render::ModelId;

//=== CircularMotion ======================================================

/// Parameters of a circular path around the world origin.
#[derive(Debug, Clone, Copy)]
pub struct CircularMotion {
    /// Orbit radius in world units.
    pub radius: f32,

    /// Angular speed in radians per second.
    pub speed: f32,

    /// Current angle along the path, in radians.
    pub angle: f32,
}

impl CircularMotion {
    pub fn new(radius: f32, speed: f32) -> Self {
        Self { radius, speed, angle: 0.0 }
    }
}

//=== GameObject ==========================================================

/// Scene entity owning a pose and referencing a shared model.
#[derive(Debug, Clone)]
pub struct GameObject {
    pub name: String,
    pub model: ModelId,
    pub transform: Transform,

    /// Present on objects that travel the circular path.
    pub motion: Option<CircularMotion>,
}

impl GameObject {
    pub fn new(name: impl Into<String>, model: ModelId, transform: Transform) -> Self {
        Self {
            name: name.into(),
            model,
            transform,
            motion: None,
        }
    }

    /// Adds circular-motion behavior (builder style).
    pub fn with_motion(mut self, radius: f32, speed: f32) -> Self {
        self.motion = Some(CircularMotion::new(radius, speed));
        self
    }

    //--- Per-Frame Update -------------------------------------------------

    /// Advances the circular path, if any.
    ///
    /// Position: x = r·sin(angle), z = r·cos(angle). Yaw faces the travel
    /// direction: degrees(atan2(-sin angle, -cos angle)).
    pub fn update(&mut self, delta_time: f32) {
        let Some(motion) = &mut self.motion else {
            return;
        };

        motion.angle += motion.speed * delta_time;

        self.transform.position.x = motion.radius * motion.angle.sin();
        self.transform.position.z = motion.radius * motion.angle.cos();

        self.transform.rotation.y =
            (-motion.angle.sin()).atan2(-motion.angle.cos()).to_degrees();
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use glam::Vec3;

    const EPS: f32 = 1e-4;

    fn orbiter(radius: f32, speed: f32) -> GameObject {
        GameObject::new("orbiter", ModelId(0), Transform::default()).with_motion(radius, speed)
    }

    #[test]
    fn static_object_never_moves() {
        let mut obj = GameObject::new(
            "rock",
            ModelId(0),
            Transform::at(Vec3::new(1.0, 2.0, 3.0)),
        );

        obj.update(10.0);

        assert_eq!(obj.transform.position, Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(obj.transform.rotation, Vec3::ZERO);
    }

    #[test]
    fn orbit_advances_by_speed_times_dt() {
        // radius 15, speed 0.5, dt 2.0 → angle 1.0 rad
        let mut obj = orbiter(15.0, 0.5);
        obj.update(2.0);

        let motion = obj.motion.as_ref().unwrap();
        assert_relative_eq!(motion.angle, 1.0, epsilon = EPS);
        assert_relative_eq!(obj.transform.position.x, 15.0 * 1.0f32.sin(), epsilon = EPS);
        assert_relative_eq!(obj.transform.position.z, 15.0 * 1.0f32.cos(), epsilon = EPS);
    }

    #[test]
    fn orbit_preserves_height() {
        let mut obj = orbiter(15.0, 0.5);
        obj.transform.position.y = 4.5;

        obj.update(2.0);

        assert_relative_eq!(obj.transform.position.y, 4.5, epsilon = EPS);
    }

    #[test]
    fn orbit_accumulates_across_frames() {
        let mut stepped = orbiter(15.0, 0.5);
        let mut single = orbiter(15.0, 0.5);

        for _ in 0..4 {
            stepped.update(0.5);
        }
        single.update(2.0);

        assert_relative_eq!(
            stepped.motion.as_ref().unwrap().angle,
            single.motion.as_ref().unwrap().angle,
            epsilon = EPS
        );
    }

    #[test]
    fn facing_follows_travel_direction() {
        let mut obj = orbiter(15.0, 0.5);
        obj.update(2.0); // angle = 1.0 rad

        let expected = (-1.0f32.sin()).atan2(-1.0f32.cos()).to_degrees();
        assert_relative_eq!(obj.transform.rotation.y, expected, epsilon = EPS);
    }

    #[test]
    fn facing_at_start_of_path() {
        // angle 0: position (0, 0, r), travel along -x → yaw is a half
        // turn (atan2 with signed zero reports it as -180°)
        let mut obj = orbiter(15.0, 1.0);
        obj.update(0.0);

        assert_relative_eq!(obj.transform.rotation.y.abs(), 180.0, epsilon = EPS);
    }
}
