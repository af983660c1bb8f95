//=========================================================================
// Render Seam
//=========================================================================
//
// The engine computes scene state; a backend turns it into pixels.
// This module defines the contract between the two:
//
// - `ShaderProgram`: a named-uniform sink. Uniform names are the wire
//   format — the scene writes `model`, `view`, `dirLight.direction`,
//   `spotLight.cutOff`, ... and the backend maps them onto whatever
//   pipeline it owns.
// - `Renderer`: frame lifecycle and draw submission, organized as three
//   passes (scene objects, point-light markers, tessellated patch).
//
// GPU resources, shader compilation and mesh loading are deliberately
// outside this crate; `LogRenderer` is the bundled backend that traces
// submissions, which is enough to run the engine headless.
//
//=========================================================================

//=== External Dependencies ===============================================

use glam::{Mat4, Vec3};
use log::trace;

//=== ModelId =============================================================

/// Handle to a model resource registered with the scene.
///
/// The engine never looks inside a model; backends are expected to have
/// loaded the resource under the same id (the scene's model table maps
/// ids to source paths).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ModelId(pub(crate) usize);

impl ModelId {
    /// Index into the scene's model table.
    pub fn index(&self) -> usize {
        self.0
    }
}

//=== ScenePass ===========================================================

/// The three shader passes a frame is composed of.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScenePass {
    /// Lit, textured scene geometry.
    Objects,

    /// Small emissive spheres marking point-light positions.
    LightMarkers,

    /// The tessellated Bezier patch.
    Tessellation,
}

//=== ShaderProgram =======================================================

/// Named-uniform sink for one shader program.
///
/// Names follow the fragment-shader struct conventions of the backend
/// (`dirLight.direction`, `pointLights[2].diffuse`, ...). Values are
/// converted before upload where the contract demands it — spotlight
/// cutoff angles, for instance, arrive here as cosines.
pub trait ShaderProgram {
    fn set_bool(&mut self, name: &str, value: bool);
    fn set_f32(&mut self, name: &str, value: f32);
    fn set_vec3(&mut self, name: &str, value: Vec3);
    fn set_mat4(&mut self, name: &str, value: Mat4);
}

//=== Renderer ============================================================

/// Frame lifecycle and draw submission.
///
/// Call order within a frame: `begin_frame`, then for each pass `bind`
/// followed by uniform writes and draw calls, then `end_frame`. The
/// bound pass is backend state, exactly like a bound GL program.
pub trait Renderer {
    /// Starts a frame, clearing color and depth to the sky color.
    fn begin_frame(&mut self, sky_color: Vec3);

    /// Switches fill/line polygon rasterization.
    fn set_wireframe(&mut self, enabled: bool);

    /// Binds a pass and exposes its uniform sink.
    fn bind(&mut self, pass: ScenePass) -> &mut dyn ShaderProgram;

    /// Draws a model with the currently bound pass.
    fn draw_model(&mut self, model: ModelId);

    /// Submits the control points of one 16-point patch to the
    /// currently bound (tessellation) pass.
    fn draw_patch(&mut self, control_points: &[Vec3]);

    /// Finishes the frame (present/swap happens platform-side).
    fn end_frame(&mut self);
}

//=== LogRenderer =========================================================

/// Backend that traces draw submissions instead of rendering.
///
/// Keeps the engine runnable without any GPU plumbing; every submission
/// is visible under the `render` log target at trace level.
pub struct LogRenderer {
    shader: LogShader,
    bound: Option<ScenePass>,
}

impl LogRenderer {
    pub fn new() -> Self {
        Self {
            shader: LogShader,
            bound: None,
        }
    }
}

impl Default for LogRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl Renderer for LogRenderer {
    fn begin_frame(&mut self, sky_color: Vec3) {
        trace!(target: "render", "begin_frame sky={:?}", sky_color);
    }

    fn set_wireframe(&mut self, enabled: bool) {
        trace!(target: "render", "wireframe={}", enabled);
    }

    fn bind(&mut self, pass: ScenePass) -> &mut dyn ShaderProgram {
        self.bound = Some(pass);
        trace!(target: "render", "bind {:?}", pass);
        &mut self.shader
    }

    fn draw_model(&mut self, model: ModelId) {
        trace!(target: "render", "draw_model {:?} pass={:?}", model, self.bound);
    }

    fn draw_patch(&mut self, control_points: &[Vec3]) {
        trace!(
            target: "render",
            "draw_patch {} control points pass={:?}",
            control_points.len(),
            self.bound
        );
    }

    fn end_frame(&mut self) {
        trace!(target: "render", "end_frame");
        self.bound = None;
    }
}

//--- LogShader -----------------------------------------------------------

struct LogShader;

impl ShaderProgram for LogShader {
    fn set_bool(&mut self, name: &str, value: bool) {
        trace!(target: "render", "uniform {} = {}", name, value);
    }

    fn set_f32(&mut self, name: &str, value: f32) {
        trace!(target: "render", "uniform {} = {}", name, value);
    }

    fn set_vec3(&mut self, name: &str, value: Vec3) {
        trace!(target: "render", "uniform {} = {:?}", name, value);
    }

    fn set_mat4(&mut self, name: &str, _value: Mat4) {
        trace!(target: "render", "uniform {} = <mat4>", name);
    }
}
