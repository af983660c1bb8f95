//=========================================================================
// Camera
//=========================================================================
//
// Mode-switched scene camera.
//
// Modes:
//   StaticScene    — fixed eye, looks at the world origin
//   StaticTracking — fixed eye, looks at the tracked target
//   Attached       — third person: eye and view direction derived from
//                    the target's pose each frame
//   Free           — fly camera driven by keyboard + mouse
//
// The mode is a tagged variant; per-mode data (the attached offset and
// view direction) lives on the variant itself. View derivation is a pure
// function per mode behind a single dispatch point, and the position the
// attached mode computes is committed by an explicit `follow` step, not
// by the view accessor.
//
// The last free-flight position is persisted across mode switches as a
// real field, so Free → Static → Free returns to where the pilot left.
//
//=========================================================================

//=== External Dependencies ===============================================

use glam::{Mat4, Vec3};
use log::debug;

//=== Internal Dependencies ===============================================

use super::math::Transform;

//=== Default Camera Values ===============================================

const DEFAULT_YAW: f32 = -90.0;
const DEFAULT_PITCH: f32 = 0.0;
const DEFAULT_SPEED: f32 = 7.5;
const DEFAULT_SENSITIVITY: f32 = 0.1;
const DEFAULT_ZOOM: f32 = 45.0;
const SCROLL_SENSITIVITY: f32 = 2.0;

const PITCH_LIMIT: f32 = 89.0;
const ZOOM_MIN: f32 = 1.0;
const ZOOM_MAX: f32 = 45.0;

/// Fixed eye position for the scene-overview mode.
const STATIC_SCENE_EYE: Vec3 = Vec3::new(7.0, 30.0, 7.0);

/// Fixed eye position for the tracking mode.
const STATIC_TRACKING_EYE: Vec3 = Vec3::new(0.0, 17.0, 0.0);

/// Near/far planes shared by all modes.
const NEAR_PLANE: f32 = 0.1;
const FAR_PLANE: f32 = 1000.0;

//=== CameraMovement ======================================================

/// Direction of a free-flight movement request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CameraMovement {
    Forward,
    Backward,
    Left,
    Right,
    Up,
    Down,
}

//=== CameraMode ==========================================================

/// Camera behavior selector, carrying per-mode data where needed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CameraMode {
    /// Fixed eye observing the whole scene, aimed at the world origin.
    StaticScene,

    /// Fixed eye following the tracked target's position.
    StaticTracking,

    /// Third-person view: `offset` and `view_dir` are expressed in the
    /// target's local space and rotated by its pose every frame.
    Attached {
        offset: Vec3,
        view_dir: Vec3,
    },

    /// Keyboard/mouse fly camera.
    Free,
}

impl CameraMode {
    /// The standard third-person rig used by the demo scene.
    pub fn attached_default() -> Self {
        Self::Attached {
            offset: Vec3::new(11.0, 11.0, 0.0),
            view_dir: Vec3::new(-1.0, -0.3, 0.0),
        }
    }
}

//=== Camera ==============================================================

/// Scene camera with switchable behavior.
///
/// Orientation state (yaw/pitch and the derived front/right/up basis)
/// belongs to the free mode; the other modes derive their view entirely
/// from preset eyes and the tracked target's transform.
#[derive(Debug, Clone)]
pub struct Camera {
    /// Current eye position. Mutated by free-flight movement and by the
    /// `follow` step while attached.
    pub position: Vec3,

    front: Vec3,
    up: Vec3,
    right: Vec3,
    world_up: Vec3,

    yaw: f32,
    pitch: f32,

    movement_speed: f32,
    mouse_sensitivity: f32,
    zoom: f32,

    mode: CameraMode,

    /// Eye position held the last time the camera left free mode.
    last_free_position: Vec3,
}

impl Camera {
    //--- Construction -----------------------------------------------------

    /// Creates a free camera at `position` with default orientation.
    pub fn new(position: Vec3) -> Self {
        let mut camera = Self {
            position,
            front: Vec3::new(0.0, 0.0, -1.0),
            up: Vec3::Y,
            right: Vec3::X,
            world_up: Vec3::Y,
            yaw: DEFAULT_YAW,
            pitch: DEFAULT_PITCH,
            movement_speed: DEFAULT_SPEED,
            mouse_sensitivity: DEFAULT_SENSITIVITY,
            zoom: DEFAULT_ZOOM,
            mode: CameraMode::Free,
            last_free_position: position,
        };
        camera.update_vectors();
        camera
    }

    //--- Accessors --------------------------------------------------------

    pub fn mode(&self) -> CameraMode {
        self.mode
    }

    /// Vertical field of view in degrees.
    pub fn zoom(&self) -> f32 {
        self.zoom
    }

    pub fn yaw(&self) -> f32 {
        self.yaw
    }

    pub fn pitch(&self) -> f32 {
        self.pitch
    }

    pub fn front(&self) -> Vec3 {
        self.front
    }

    //--- Mode Switching ---------------------------------------------------

    /// Switches camera behavior.
    ///
    /// Leaving free mode records the current position; entering free mode
    /// restores it. The static modes snap to their preset eyes. Entering
    /// attached mode leaves the position to the next `follow` step.
    pub fn set_mode(&mut self, mode: CameraMode) {
        if matches!(self.mode, CameraMode::Free) {
            self.last_free_position = self.position;
        }

        debug!(target: "core::camera", "Mode: {:?} -> {:?}", self.mode, mode);
        self.mode = mode;

        match self.mode {
            CameraMode::StaticScene => self.position = STATIC_SCENE_EYE,
            CameraMode::StaticTracking => self.position = STATIC_TRACKING_EYE,
            CameraMode::Free => self.position = self.last_free_position,
            CameraMode::Attached { .. } => {}
        }
    }

    //--- Per-Frame Follow -------------------------------------------------

    /// Commits the attached-mode eye position from the target's pose.
    ///
    /// Called once per frame after the target has moved, so that the eye
    /// position queried for lighting (`viewPos`) matches the view matrix
    /// built later the same frame. No-op in the other modes.
    pub fn follow(&mut self, target: &Transform) {
        if let CameraMode::Attached { offset, .. } = self.mode {
            self.position = target.position + target.rotate_offset(offset);
        }
    }

    //--- Input Processing -------------------------------------------------

    /// Moves the eye along the free-flight basis. Ignored outside free mode.
    pub fn process_keyboard(&mut self, direction: CameraMovement, delta_time: f32) {
        if !matches!(self.mode, CameraMode::Free) {
            return;
        }

        let velocity = self.movement_speed * delta_time;
        match direction {
            CameraMovement::Forward => self.position += self.front * velocity,
            CameraMovement::Backward => self.position -= self.front * velocity,
            CameraMovement::Left => self.position -= self.right * velocity,
            CameraMovement::Right => self.position += self.right * velocity,
            CameraMovement::Up => self.position += self.up * velocity,
            CameraMovement::Down => self.position -= self.up * velocity,
        }
    }

    /// Applies a mouse delta to yaw/pitch. Ignored outside free mode.
    ///
    /// Pitch is clamped to ±89° so the view never flips over the pole.
    pub fn process_mouse_movement(&mut self, x_offset: f32, y_offset: f32) {
        if !matches!(self.mode, CameraMode::Free) {
            return;
        }

        self.yaw += x_offset * self.mouse_sensitivity;
        self.pitch += y_offset * self.mouse_sensitivity;
        self.pitch = self.pitch.clamp(-PITCH_LIMIT, PITCH_LIMIT);

        self.update_vectors();
    }

    /// Adjusts the field of view from a scroll delta, clamped to [1°, 45°].
    pub fn process_mouse_scroll(&mut self, y_offset: f32) {
        self.zoom = (self.zoom - y_offset * SCROLL_SENSITIVITY).clamp(ZOOM_MIN, ZOOM_MAX);
    }

    //--- View Derivation --------------------------------------------------

    /// Builds the view matrix for the current mode.
    ///
    /// `target` is the transform of the tracked object; it is only read
    /// by the tracking and attached modes.
    pub fn view_matrix(&self, target: &Transform) -> Mat4 {
        match self.mode {
            CameraMode::StaticScene => self.static_scene_view(),
            CameraMode::StaticTracking => self.tracking_view(target),
            CameraMode::Attached { offset, view_dir } => {
                Self::attached_view(target, offset, view_dir, self.world_up)
            }
            CameraMode::Free => self.free_view(),
        }
    }

    /// Perspective projection for the current field of view.
    pub fn projection_matrix(&self, aspect_ratio: f32) -> Mat4 {
        Mat4::perspective_rh_gl(self.zoom.to_radians(), aspect_ratio, NEAR_PLANE, FAR_PLANE)
    }

    //--- Per-Mode View Functions ------------------------------------------

    fn static_scene_view(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, Vec3::ZERO, self.up)
    }

    fn tracking_view(&self, target: &Transform) -> Mat4 {
        Mat4::look_at_rh(self.position, target.position, self.world_up)
    }

    fn attached_view(target: &Transform, offset: Vec3, view_dir: Vec3, world_up: Vec3) -> Mat4 {
        let eye = target.position + target.rotate_offset(offset);
        let direction = target.rotate_direction(view_dir);
        Mat4::look_at_rh(eye, eye + direction, world_up)
    }

    fn free_view(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.position + self.front, self.up)
    }

    //--- Internal Helpers -------------------------------------------------

    // Spherical-to-Cartesian derivation of the movement basis from
    // yaw/pitch around the world up axis.
    fn update_vectors(&mut self) {
        let (yaw, pitch) = (self.yaw.to_radians(), self.pitch.to_radians());

        let front = Vec3::new(
            yaw.cos() * pitch.cos(),
            pitch.sin(),
            yaw.sin() * pitch.cos(),
        );

        self.front = front.normalize();
        self.right = self.front.cross(self.world_up).normalize();
        self.up = self.right.cross(self.front).normalize();
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(Vec3::ZERO)
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const EPS: f32 = 1e-4;

    fn assert_vec3_eq(actual: Vec3, expected: Vec3) {
        assert_relative_eq!(actual.x, expected.x, epsilon = EPS);
        assert_relative_eq!(actual.y, expected.y, epsilon = EPS);
        assert_relative_eq!(actual.z, expected.z, epsilon = EPS);
    }

    fn target_at(position: Vec3, yaw_degrees: f32) -> Transform {
        Transform::new(position, Vec3::new(0.0, yaw_degrees, 0.0), Vec3::ONE)
    }

    //=====================================================================
    // Orientation Tests
    //=====================================================================

    #[test]
    fn default_orientation_looks_down_negative_z() {
        let camera = Camera::new(Vec3::ZERO);
        assert_vec3_eq(camera.front(), Vec3::new(0.0, 0.0, -1.0));
    }

    #[test]
    fn pitch_is_clamped_after_any_input_sequence() {
        let mut camera = Camera::new(Vec3::ZERO);

        for _ in 0..100 {
            camera.process_mouse_movement(0.0, 10_000.0);
        }
        assert_relative_eq!(camera.pitch(), 89.0, epsilon = EPS);

        for _ in 0..100 {
            camera.process_mouse_movement(0.0, -10_000.0);
        }
        assert_relative_eq!(camera.pitch(), -89.0, epsilon = EPS);
    }

    #[test]
    fn mouse_movement_is_ignored_outside_free_mode() {
        let mut camera = Camera::new(Vec3::ZERO);
        camera.set_mode(CameraMode::StaticScene);

        camera.process_mouse_movement(500.0, 500.0);

        assert_relative_eq!(camera.yaw(), -90.0, epsilon = EPS);
        assert_relative_eq!(camera.pitch(), 0.0, epsilon = EPS);
    }

    //=====================================================================
    // Zoom Tests
    //=====================================================================

    #[test]
    fn zoom_is_clamped_after_any_scroll_sequence() {
        let mut camera = Camera::new(Vec3::ZERO);

        for _ in 0..500 {
            camera.process_mouse_scroll(3.0);
        }
        assert_relative_eq!(camera.zoom(), 1.0, epsilon = EPS);

        for _ in 0..500 {
            camera.process_mouse_scroll(-3.0);
        }
        assert_relative_eq!(camera.zoom(), 45.0, epsilon = EPS);
    }

    //=====================================================================
    // Mode Switching Tests
    //=====================================================================

    #[test]
    fn static_modes_snap_to_preset_eyes() {
        let mut camera = Camera::new(Vec3::ZERO);

        camera.set_mode(CameraMode::StaticScene);
        assert_vec3_eq(camera.position, Vec3::new(7.0, 30.0, 7.0));

        camera.set_mode(CameraMode::StaticTracking);
        assert_vec3_eq(camera.position, Vec3::new(0.0, 17.0, 0.0));
    }

    #[test]
    fn free_position_survives_a_mode_round_trip() {
        let start = Vec3::new(3.0, 4.0, 5.0);
        let mut camera = Camera::new(start);

        camera.set_mode(CameraMode::StaticScene);
        camera.set_mode(CameraMode::Free);

        assert_vec3_eq(camera.position, start);
    }

    #[test]
    fn free_position_survives_chained_switches() {
        let start = Vec3::new(-8.0, 2.0, 11.0);
        let mut camera = Camera::new(start);

        camera.set_mode(CameraMode::StaticTracking);
        camera.set_mode(CameraMode::attached_default());
        camera.set_mode(CameraMode::StaticScene);
        camera.set_mode(CameraMode::Free);

        assert_vec3_eq(camera.position, start);
    }

    #[test]
    fn movement_before_departure_is_what_gets_restored() {
        let mut camera = Camera::new(Vec3::ZERO);
        camera.process_keyboard(CameraMovement::Forward, 1.0);
        let moved = camera.position;

        camera.set_mode(CameraMode::StaticScene);
        camera.set_mode(CameraMode::Free);

        assert_vec3_eq(camera.position, moved);
    }

    //=====================================================================
    // Movement Tests
    //=====================================================================

    #[test]
    fn keyboard_moves_along_front_at_speed() {
        let mut camera = Camera::new(Vec3::ZERO);
        camera.process_keyboard(CameraMovement::Forward, 2.0);

        // speed 7.5 · dt 2.0 along -Z
        assert_vec3_eq(camera.position, Vec3::new(0.0, 0.0, -15.0));
    }

    #[test]
    fn keyboard_is_ignored_outside_free_mode() {
        let mut camera = Camera::new(Vec3::ZERO);
        camera.set_mode(CameraMode::StaticScene);
        let before = camera.position;

        camera.process_keyboard(CameraMovement::Forward, 1.0);

        assert_vec3_eq(camera.position, before);
    }

    #[test]
    fn vertical_movement_uses_the_up_basis() {
        let mut camera = Camera::new(Vec3::ZERO);
        camera.process_keyboard(CameraMovement::Up, 1.0);
        assert_vec3_eq(camera.position, Vec3::new(0.0, 7.5, 0.0));

        camera.process_keyboard(CameraMovement::Down, 1.0);
        assert_vec3_eq(camera.position, Vec3::ZERO);
    }

    //=====================================================================
    // Attached Mode Tests
    //=====================================================================

    #[test]
    fn follow_places_eye_at_rotated_offset() {
        let mut camera = Camera::new(Vec3::ZERO);
        camera.set_mode(CameraMode::attached_default());

        // 180° yaw flips the (11, 11, 0) offset to (-11, 11, 0)
        let target = target_at(Vec3::new(1.0, 2.0, 3.0), 180.0);
        camera.follow(&target);

        assert_vec3_eq(camera.position, Vec3::new(-10.0, 13.0, 3.0));
    }

    #[test]
    fn follow_is_noop_outside_attached_mode() {
        let mut camera = Camera::new(Vec3::new(5.0, 5.0, 5.0));
        let target = target_at(Vec3::new(1.0, 2.0, 3.0), 90.0);

        camera.follow(&target);

        assert_vec3_eq(camera.position, Vec3::new(5.0, 5.0, 5.0));
    }

    #[test]
    fn attached_view_matches_manual_look_at() {
        let mut camera = Camera::new(Vec3::ZERO);
        camera.set_mode(CameraMode::attached_default());

        let target = target_at(Vec3::new(4.0, 0.0, -2.0), 90.0);
        camera.follow(&target);

        let eye = target.position + target.rotate_offset(Vec3::new(11.0, 11.0, 0.0));
        let dir = target.rotate_direction(Vec3::new(-1.0, -0.3, 0.0));
        let expected = Mat4::look_at_rh(eye, eye + dir, Vec3::Y);

        assert!(camera.view_matrix(&target).abs_diff_eq(expected, EPS));
    }

    //=====================================================================
    // View / Projection Tests
    //=====================================================================

    #[test]
    fn static_scene_view_aims_at_origin() {
        let mut camera = Camera::new(Vec3::ZERO);
        camera.set_mode(CameraMode::StaticScene);

        let view = camera.view_matrix(&Transform::default());
        // The origin must land on the view axis: x and y vanish
        let origin = view.transform_point3(Vec3::ZERO);

        assert_relative_eq!(origin.x, 0.0, epsilon = EPS);
        assert_relative_eq!(origin.y, 0.0, epsilon = EPS);
        assert!(origin.z < 0.0);
    }

    #[test]
    fn projection_uses_current_zoom() {
        let mut camera = Camera::new(Vec3::ZERO);
        let wide = camera.projection_matrix(16.0 / 9.0);

        camera.process_mouse_scroll(10.0); // zoom in
        let narrow = camera.projection_matrix(16.0 / 9.0);

        // Zooming in increases the focal scale terms
        assert!(narrow.x_axis.x > wide.x_axis.x);
        assert!(narrow.y_axis.y > wide.y_axis.y);
    }
}
