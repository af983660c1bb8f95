//=========================================================================
// Core State & Tick
//=========================================================================
//
// Central coordinator for the engine's per-frame work on the one and
// only thread.
//
// Each tick:
//  1. Digests the frame's input events into actions
//  2. Routes actions (toggles, camera modes, exit) and held movement
//  3. Applies captured-mouse look and zoom to the camera
//  4. Advances the scene simulation by the frame's delta time
//  5. Walks the draw traversal against the renderer seam
//
// State that used to hide in process-wide variables (camera, toggle
// flags, capture state) lives here explicitly and is threaded through
// the tick; callbacks never reach around it.
//
//=========================================================================

//=== Module Declarations =================================================

pub mod camera;
pub mod input;
pub mod math;
pub mod render;
pub mod scene;

//=== External Crates =====================================================

use log::{debug, info};

//=== Internal Modules ====================================================

use camera::{CameraMode, CameraMovement};
use input::{Action, InputEvent, InputSystem, KeyCode};
use render::Renderer;
use scene::Scene;

//=== SceneAction =========================================================

/// The demo's command vocabulary, bound to keys at construction time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SceneAction {
    //--- Free-Flight Movement (level-triggered) --------------------------
    MoveForward,
    MoveBackward,
    MoveLeft,
    MoveRight,
    MoveUp,
    MoveDown,

    //--- Toggles (edge-triggered) ----------------------------------------
    ToggleWireframe,
    ToggleBlinn,
    ToggleDayNight,
    ToggleMouseCapture,

    //--- Camera Modes -----------------------------------------------------
    CameraStaticScene,
    CameraTracking,
    CameraAttached,
    CameraFree,

    //--- Application ------------------------------------------------------
    Exit,
}

impl Action for SceneAction {}

/// Movement actions paired with the camera direction they drive.
const MOVEMENT_BINDINGS: [(SceneAction, CameraMovement); 6] = [
    (SceneAction::MoveForward, CameraMovement::Forward),
    (SceneAction::MoveBackward, CameraMovement::Backward),
    (SceneAction::MoveLeft, CameraMovement::Left),
    (SceneAction::MoveRight, CameraMovement::Right),
    (SceneAction::MoveUp, CameraMovement::Up),
    (SceneAction::MoveDown, CameraMovement::Down),
];

//=== FrameDirectives =====================================================

/// Requests flowing core → platform at the end of a tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameDirectives {
    /// `Some(state)` when the cursor capture should change.
    pub capture_mouse: Option<bool>,

    /// The close flag: the platform should exit its event loop.
    pub exit: bool,
}

//=== CoreState ===========================================================

/// All mutable engine state, updated in place every frame.
pub struct CoreState {
    pub input: InputSystem<SceneAction>,
    pub scene: Scene,

    wireframe: bool,
    mouse_captured: bool,
}

impl CoreState {
    //--- Construction -----------------------------------------------------

    /// Creates the core with an empty scene and the standard key layout.
    pub fn new() -> Self {
        let mut input = InputSystem::new();
        Self::install_bindings(&mut input);

        Self {
            input,
            scene: Scene::new(),
            wireframe: false,
            mouse_captured: false,
        }
    }

    /// Replaces the scene with the demo world.
    pub fn load_showcase(&mut self) {
        info!(target: "core", "Loading showcase scene");
        self.scene = Scene::showcase();
    }

    //--- Accessors --------------------------------------------------------

    pub fn wireframe(&self) -> bool {
        self.wireframe
    }

    pub fn mouse_captured(&self) -> bool {
        self.mouse_captured
    }

    //--- Per-Frame Tick ---------------------------------------------------

    /// Runs one frame of input routing, simulation and drawing.
    ///
    /// `delta_time` comes from the frame clock; the simulation is
    /// variable-rate by design.
    pub fn tick(
        &mut self,
        events: &[InputEvent],
        delta_time: f32,
        renderer: &mut dyn Renderer,
    ) -> FrameDirectives {
        self.input.process_frame(events);

        let mut directives = FrameDirectives::default();
        self.route_pressed_actions(renderer, &mut directives);
        self.route_movement(delta_time);
        self.route_mouse_look();

        self.scene.update(delta_time);
        self.scene.draw(renderer);

        directives
    }

    //--- Action Routing ---------------------------------------------------

    fn route_pressed_actions(
        &mut self,
        renderer: &mut dyn Renderer,
        directives: &mut FrameDirectives,
    ) {
        // Collected first: routing mutates self
        let pressed: Vec<SceneAction> = self.input.pressed_actions().copied().collect();

        for action in pressed {
            debug!(target: "core", "Action: {:?}", action);

            match action {
                SceneAction::ToggleWireframe => {
                    self.wireframe = !self.wireframe;
                    renderer.set_wireframe(self.wireframe);
                }
                SceneAction::ToggleBlinn => {
                    self.scene.use_blinn = !self.scene.use_blinn;
                }
                SceneAction::ToggleDayNight => {
                    self.scene.toggle_daylight();
                }
                SceneAction::ToggleMouseCapture => {
                    self.mouse_captured = !self.mouse_captured;
                    directives.capture_mouse = Some(self.mouse_captured);
                    // First captured frame must not inherit the jump to
                    // wherever the cursor happened to be
                    self.input.rebase_mouse();
                }

                SceneAction::CameraStaticScene => {
                    self.scene.camera.set_mode(CameraMode::StaticScene);
                }
                SceneAction::CameraTracking => {
                    self.scene.camera.set_mode(CameraMode::StaticTracking);
                }
                SceneAction::CameraAttached => {
                    self.scene.camera.set_mode(CameraMode::attached_default());
                }
                SceneAction::CameraFree => {
                    self.scene.camera.set_mode(CameraMode::Free);
                }

                SceneAction::Exit => {
                    info!(target: "core", "Exit requested");
                    directives.exit = true;
                }

                // Movement is level-triggered, handled in route_movement
                _ => {}
            }
        }
    }

    fn route_movement(&mut self, delta_time: f32) {
        for (action, direction) in MOVEMENT_BINDINGS {
            if self.input.is_active(action) {
                self.scene.camera.process_keyboard(direction, delta_time);
            }
        }
    }

    // Mouse look and zoom apply only while the cursor is captured; the
    // y axis is flipped so dragging up pitches up.
    fn route_mouse_look(&mut self) {
        if !self.mouse_captured {
            return;
        }

        let (dx, dy) = self.input.mouse_delta();
        if dx != 0.0 || dy != 0.0 {
            self.scene.camera.process_mouse_movement(dx, -dy);
        }

        let scroll = self.input.scroll_delta();
        if scroll != 0.0 {
            self.scene.camera.process_mouse_scroll(scroll);
        }
    }

    //--- Internal Helpers -------------------------------------------------

    fn install_bindings(input: &mut InputSystem<SceneAction>) {
        input.bind_key(KeyCode::KeyW, SceneAction::MoveForward);
        input.bind_key(KeyCode::KeyS, SceneAction::MoveBackward);
        input.bind_key(KeyCode::KeyA, SceneAction::MoveLeft);
        input.bind_key(KeyCode::KeyD, SceneAction::MoveRight);
        input.bind_key(KeyCode::Space, SceneAction::MoveUp);
        input.bind_key(KeyCode::ShiftLeft, SceneAction::MoveDown);

        input.bind_key(KeyCode::KeyF, SceneAction::ToggleWireframe);
        input.bind_key(KeyCode::KeyB, SceneAction::ToggleBlinn);
        input.bind_key(KeyCode::KeyN, SceneAction::ToggleDayNight);
        input.bind_key(KeyCode::ControlLeft, SceneAction::ToggleMouseCapture);

        input.bind_key(KeyCode::Digit1, SceneAction::CameraStaticScene);
        input.bind_key(KeyCode::Digit2, SceneAction::CameraTracking);
        input.bind_key(KeyCode::Digit3, SceneAction::CameraAttached);
        input.bind_key(KeyCode::Digit4, SceneAction::CameraFree);

        input.bind_key(KeyCode::Escape, SceneAction::Exit);
    }
}

impl Default for CoreState {
    fn default() -> Self {
        Self::new()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
