//=========================================================================
// Scene
//=========================================================================
//
// The world: game objects, lights, camera, sky/fog state and the
// tessellated patch, plus the per-frame update and draw traversals.
//
// Update order each frame:
//   1. advance circular motion on moving objects
//   2. re-derive the spotlight pose from its anchor object
//   3. commit the attached-camera eye from the same anchor
//   4. animate the Bezier control points
//
// Draw is a pure traversal: clear to sky, upload uniforms per pass,
// submit draw calls through the renderer seam. The scene never touches
// GPU state directly.
//
//=========================================================================

//=== Module Declarations =================================================

mod bezier;
mod game_object;
mod lighting;

//=== Public API ==========================================================

pub use bezier::BezierPatch;
pub use game_object::{CircularMotion, GameObject};
pub use lighting::{Attenuation, DaylightPreset, DirectionalLight, PointLight, SpotLight};

//=== External Dependencies ===============================================

use glam::{Mat4, Vec3};
use log::debug;

//=== Internal Dependencies ===============================================

use super::camera::Camera;
use super::math::Transform;
use super::render::{ModelId, Renderer, ScenePass, ShaderProgram};

//=== Scene Constants =====================================================

/// Number of point lights; matches the shader's `pointLights` array size.
pub const POINT_LIGHT_COUNT: usize = 4;

/// Shininess of the shared material (no specular maps in the demo assets).
const MATERIAL_SHININESS: f32 = 32.0;

const DEFAULT_FOG_DISTANCE: f32 = 60.0;
const DEFAULT_TESS_LEVEL: f32 = 32.0;

const DEFAULT_VIEWPORT: (u32, u32) = (1400, 900);

/// Scale of the spheres marking point-light positions.
const LIGHT_MARKER_SCALE: f32 = 0.2;

//=== ModelSource =========================================================

/// Entry in the scene's model table. The path is opaque to the engine;
/// backends resolve it when loading resources under the same id.
#[derive(Debug, Clone)]
pub struct ModelSource {
    pub path: String,
}

//=== Scene ===============================================================

/// The complete world state mutated in place every frame.
pub struct Scene {
    models: Vec<ModelSource>,

    pub objects: Vec<GameObject>,

    pub dir_light: DirectionalLight,
    pub point_lights: Vec<PointLight>,
    pub spot_light: SpotLight,

    // Spotlight rig: the light rides `anchor`, offset and aimed in the
    // anchor's local space.
    spot_anchor: Option<usize>,
    spot_local_offset: Vec3,
    spot_local_direction: Vec3,

    pub camera: Camera,

    pub sky_color: Vec3,
    pub fog_distance: f32,
    pub use_blinn: bool,
    pub tess_level: f32,

    daylight: bool,

    /// Model drawn at each point light's position.
    marker_model: Option<ModelId>,

    pub bezier: BezierPatch,

    viewport: (u32, u32),
}

impl Scene {
    //--- Construction -----------------------------------------------------

    /// Creates an empty scene with the standard lighting rig.
    pub fn new() -> Self {
        let day = DaylightPreset::DAY;

        Self {
            models: Vec::new(),
            objects: Vec::new(),
            dir_light: DirectionalLight::new(
                Vec3::new(-0.2, -1.0, -0.3),
                day.ambient,
                day.diffuse,
                day.specular,
            ),
            point_lights: Self::generate_point_lights(),
            spot_light: SpotLight::new(
                Vec3::ZERO,
                Vec3::new(0.0, 0.0, -1.0),
                12.5,
                15.0,
                Attenuation::new(1.0, 0.008, 0.001),
                Vec3::ZERO,
                Vec3::ONE,
                Vec3::ONE,
            ),
            spot_anchor: None,
            spot_local_offset: Vec3::ZERO,
            spot_local_direction: Vec3::new(0.0, 0.0, -1.0),
            camera: Camera::new(Vec3::new(0.0, 1.0, 15.0)),
            sky_color: day.sky_color,
            fog_distance: DEFAULT_FOG_DISTANCE,
            use_blinn: true,
            tess_level: DEFAULT_TESS_LEVEL,
            daylight: true,
            marker_model: None,
            bezier: BezierPatch::new(),
            viewport: DEFAULT_VIEWPORT,
        }
    }

    /// Builds the demo world: a train on a circular track with the
    /// spotlight as its headlight, a pair of dinosaurs, a floor, a
    /// backpack, and sphere markers for the point lights.
    pub fn showcase() -> Self {
        let mut scene = Self::new();

        let train = scene.register_model("assets/objects/train/train.obj");
        let dinosaur = scene.register_model("assets/objects/dinosaur/dinosaur.obj");
        let floor = scene.register_model("assets/objects/floor/floor.obj");
        let backpack = scene.register_model("assets/objects/backpack/backpack.obj");
        let sphere = scene.register_model("assets/objects/sphere/sphere.obj");

        scene.add_object(GameObject::new("floor", floor, Transform::default()));

        let train_index = scene.add_object(
            GameObject::new("train", train, Transform::default()).with_motion(15.0, 0.5),
        );

        // Two dinosaurs share one model resource
        scene.add_object(GameObject::new(
            "dinosaur",
            dinosaur,
            Transform::new(
                Vec3::new(6.0, 0.0, -8.0),
                Vec3::new(0.0, 45.0, 0.0),
                Vec3::splat(1.5),
            ),
        ));
        scene.add_object(GameObject::new(
            "dinosaur",
            dinosaur,
            Transform::new(
                Vec3::new(-7.0, 0.0, 5.0),
                Vec3::new(0.0, -120.0, 0.0),
                Vec3::splat(1.2),
            ),
        ));

        scene.add_object(GameObject::new(
            "backpack",
            backpack,
            Transform::at(Vec3::new(0.0, 2.0, -6.0)),
        ));

        scene.marker_model = Some(sphere);

        // Headlight: ahead of and slightly above the train, beam tilted
        // down the direction of travel
        scene.attach_spotlight(
            train_index,
            Vec3::new(-9.0, 3.5, 0.0),
            Vec3::new(-1.0, -0.25, 0.0),
        );

        scene
    }

    //--- Setup API --------------------------------------------------------

    /// Registers a model source path and returns its handle.
    pub fn register_model(&mut self, path: impl Into<String>) -> ModelId {
        let id = ModelId(self.models.len());
        self.models.push(ModelSource { path: path.into() });
        id
    }

    /// Source path for a registered model.
    pub fn model_path(&self, id: ModelId) -> Option<&str> {
        self.models.get(id.index()).map(|m| m.path.as_str())
    }

    /// Adds an object and returns its index.
    pub fn add_object(&mut self, object: GameObject) -> usize {
        self.objects.push(object);
        self.objects.len() - 1
    }

    /// Rides the spotlight on an object: every frame the light's position
    /// and direction are re-derived from that object's pose.
    ///
    /// The anchor also serves as the target of the tracking and attached
    /// camera modes.
    pub fn attach_spotlight(&mut self, object: usize, local_offset: Vec3, local_direction: Vec3) {
        debug!(target: "core::scene", "Spotlight anchored to object {}", object);
        self.spot_anchor = Some(object);
        self.spot_local_offset = local_offset;
        self.spot_local_direction = local_direction;
    }

    /// Sets the viewport used for the projection's aspect ratio.
    pub fn set_viewport(&mut self, width: u32, height: u32) {
        if width > 0 && height > 0 {
            self.viewport = (width, height);
        }
    }

    pub fn aspect_ratio(&self) -> f32 {
        self.viewport.0 as f32 / self.viewport.1 as f32
    }

    pub fn is_daylight(&self) -> bool {
        self.daylight
    }

    /// Transform of the object the camera tracks (the spotlight anchor).
    pub fn tracked_transform(&self) -> Transform {
        self.spot_anchor
            .and_then(|i| self.objects.get(i))
            .map(|obj| obj.transform)
            .unwrap_or_default()
    }

    //--- Per-Frame Update -------------------------------------------------

    /// Advances the world by `delta_time` seconds.
    pub fn update(&mut self, delta_time: f32) {
        for object in &mut self.objects {
            object.update(delta_time);
        }

        self.update_spotlight();

        let tracked = self.tracked_transform();
        self.camera.follow(&tracked);

        self.bezier.update(delta_time);
    }

    /// Swaps the sky color and directional-light intensities between the
    /// day and night preset rows.
    pub fn toggle_daylight(&mut self) {
        self.daylight = !self.daylight;

        let preset = DaylightPreset::for_daylight(self.daylight);
        self.sky_color = preset.sky_color;
        self.dir_light.ambient = preset.ambient;
        self.dir_light.diffuse = preset.diffuse;
        self.dir_light.specular = preset.specular;

        debug!(
            target: "core::scene",
            "Daylight toggled: {}",
            if self.daylight { "day" } else { "night" }
        );
    }

    // Spotlight rig: the same pose helpers the attached camera uses carry
    // the local offset and beam direction into world space.
    fn update_spotlight(&mut self) {
        let Some(anchor) = self.spot_anchor.and_then(|i| self.objects.get(i)) else {
            return;
        };
        let pose = anchor.transform;

        self.spot_light.position = pose.position + pose.rotate_offset(self.spot_local_offset);
        self.spot_light.direction = pose.rotate_direction(self.spot_local_direction);
    }

    //--- Draw Traversal ---------------------------------------------------

    /// Uploads uniforms and submits draw calls for one frame.
    pub fn draw(&self, renderer: &mut dyn Renderer) {
        renderer.begin_frame(self.sky_color);

        self.draw_objects(renderer);
        self.draw_light_markers(renderer);
        self.draw_tessellated(renderer);

        renderer.end_frame();
    }

    fn draw_objects(&self, renderer: &mut dyn Renderer) {
        let shader = renderer.bind(ScenePass::Objects);
        self.upload_shared(shader);

        for object in &self.objects {
            let shader = renderer.bind(ScenePass::Objects);
            shader.set_mat4("model", object.transform.model_matrix());
            renderer.draw_model(object.model);
        }
    }

    fn draw_light_markers(&self, renderer: &mut dyn Renderer) {
        let Some(marker) = self.marker_model else {
            return;
        };

        let tracked = self.tracked_transform();
        let shader = renderer.bind(ScenePass::LightMarkers);
        shader.set_mat4("projection", self.camera.projection_matrix(self.aspect_ratio()));
        shader.set_mat4("view", self.camera.view_matrix(&tracked));
        shader.set_vec3("viewPos", self.camera.position);
        shader.set_f32("fogDistance", self.fog_distance);
        shader.set_vec3("skyColor", self.sky_color);

        for light in &self.point_lights {
            let model = Mat4::from_translation(light.position)
                * Mat4::from_scale(Vec3::splat(LIGHT_MARKER_SCALE));

            let shader = renderer.bind(ScenePass::LightMarkers);
            shader.set_mat4("model", model);
            shader.set_vec3("lightColor", light.diffuse);
            renderer.draw_model(marker);
        }
    }

    fn draw_tessellated(&self, renderer: &mut dyn Renderer) {
        let shader = renderer.bind(ScenePass::Tessellation);
        shader.set_mat4("model", self.bezier.transform.model_matrix());
        shader.set_f32("tessLevel", self.tess_level);
        self.upload_shared(shader);

        renderer.draw_patch(&self.bezier.control_points);
    }

    // Uniforms common to the lit passes: matrices, eye position, shading
    // flags, the full light rig, and fog.
    fn upload_shared(&self, shader: &mut dyn ShaderProgram) {
        let tracked = self.tracked_transform();

        shader.set_vec3("viewPos", self.camera.position);
        shader.set_bool("blinn", self.use_blinn);
        shader.set_f32("material.shininess", MATERIAL_SHININESS);

        shader.set_mat4("projection", self.camera.projection_matrix(self.aspect_ratio()));
        shader.set_mat4("view", self.camera.view_matrix(&tracked));

        self.dir_light.set_uniforms(shader);
        for (i, light) in self.point_lights.iter().enumerate() {
            light.set_uniforms(shader, i);
        }
        self.spot_light.set_uniforms(shader);

        shader.set_f32("fogDistance", self.fog_distance);
        shader.set_vec3("skyColor", self.sky_color);
    }

    //--- Internal Helpers -------------------------------------------------

    fn generate_point_lights() -> Vec<PointLight> {
        let ambient = Vec3::splat(0.05);
        let attenuation = Attenuation::new(1.0, 0.09, 0.002);

        let positions = [
            Vec3::new(0.7, 3.2, 10.0),
            Vec3::new(2.3, 3.3, -4.0),
            Vec3::new(-4.0, 2.0, -12.0),
            Vec3::new(0.0, 0.7, -3.0),
        ];

        let colors = [
            Vec3::new(0.1, 0.8, 0.2),
            Vec3::new(0.1, 0.2, 0.7),
            Vec3::new(0.8, 0.1, 0.1),
            Vec3::new(0.8, 0.8, 0.8),
        ];

        positions
            .iter()
            .zip(colors.iter())
            .take(POINT_LIGHT_COUNT)
            .map(|(&position, &color)| {
                PointLight::new(position, attenuation, ambient, color, color)
            })
            .collect()
    }
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
