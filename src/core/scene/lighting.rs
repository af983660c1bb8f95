//=========================================================================
// Lighting
//=========================================================================
//
// Light types and their uniform upload, plus the day/night preset table.
//
// Each light writes its fields into the backend's named-uniform
// interface. The names are the wire format: `dirLight.*`,
// `pointLights[i].*`, `spotLight.*`. Spotlight cutoff angles are stored
// in degrees and converted to cosines at upload time, matching what the
// fragment shader compares against.
//
//=========================================================================

//=== External Dependencies ===============================================

use glam::Vec3;

//=== Internal Dependencies ===============================================

use crate::core::render::ShaderProgram;

//=== Attenuation =========================================================

/// Distance falloff terms shared by point and spot lights.
#[derive(Debug, Clone, Copy)]
pub struct Attenuation {
    pub constant: f32,
    pub linear: f32,
    pub quadratic: f32,
}

impl Attenuation {
    pub fn new(constant: f32, linear: f32, quadratic: f32) -> Self {
        Self { constant, linear, quadratic }
    }
}

//=== DirectionalLight ====================================================

/// Sun-style light: a direction and three color terms.
#[derive(Debug, Clone, Copy)]
pub struct DirectionalLight {
    pub direction: Vec3,
    pub ambient: Vec3,
    pub diffuse: Vec3,
    pub specular: Vec3,
}

impl DirectionalLight {
    pub fn new(direction: Vec3, ambient: Vec3, diffuse: Vec3, specular: Vec3) -> Self {
        Self { direction, ambient, diffuse, specular }
    }

    pub fn set_uniforms(&self, shader: &mut dyn ShaderProgram) {
        shader.set_vec3("dirLight.direction", self.direction);
        shader.set_vec3("dirLight.ambient", self.ambient);
        shader.set_vec3("dirLight.diffuse", self.diffuse);
        shader.set_vec3("dirLight.specular", self.specular);
    }
}

//=== PointLight ==========================================================

/// Positioned light with distance attenuation.
#[derive(Debug, Clone, Copy)]
pub struct PointLight {
    pub position: Vec3,
    pub attenuation: Attenuation,
    pub ambient: Vec3,
    pub diffuse: Vec3,
    pub specular: Vec3,
}

impl PointLight {
    pub fn new(
        position: Vec3,
        attenuation: Attenuation,
        ambient: Vec3,
        diffuse: Vec3,
        specular: Vec3,
    ) -> Self {
        Self { position, attenuation, ambient, diffuse, specular }
    }

    /// Uploads into the `pointLights[index]` uniform slot.
    pub fn set_uniforms(&self, shader: &mut dyn ShaderProgram, index: usize) {
        let slot = format!("pointLights[{}]", index);

        shader.set_vec3(&format!("{}.position", slot), self.position);
        shader.set_vec3(&format!("{}.ambient", slot), self.ambient);
        shader.set_vec3(&format!("{}.diffuse", slot), self.diffuse);
        shader.set_vec3(&format!("{}.specular", slot), self.specular);
        shader.set_f32(&format!("{}.constant", slot), self.attenuation.constant);
        shader.set_f32(&format!("{}.linear", slot), self.attenuation.linear);
        shader.set_f32(&format!("{}.quadratic", slot), self.attenuation.quadratic);
    }
}

//=== SpotLight ===========================================================

/// Cone light with inner/outer cutoff angles in degrees.
#[derive(Debug, Clone, Copy)]
pub struct SpotLight {
    pub position: Vec3,
    pub direction: Vec3,

    /// Inner cone angle, degrees.
    pub cut_off: f32,

    /// Outer cone angle, degrees.
    pub outer_cut_off: f32,

    pub attenuation: Attenuation,
    pub ambient: Vec3,
    pub diffuse: Vec3,
    pub specular: Vec3,
}

impl SpotLight {
    pub fn new(
        position: Vec3,
        direction: Vec3,
        cut_off: f32,
        outer_cut_off: f32,
        attenuation: Attenuation,
        ambient: Vec3,
        diffuse: Vec3,
        specular: Vec3,
    ) -> Self {
        Self {
            position,
            direction,
            cut_off,
            outer_cut_off,
            attenuation,
            ambient,
            diffuse,
            specular,
        }
    }

    /// Uploads the spotlight; cutoff angles go out as cosines.
    pub fn set_uniforms(&self, shader: &mut dyn ShaderProgram) {
        shader.set_vec3("spotLight.position", self.position);
        shader.set_vec3("spotLight.direction", self.direction);
        shader.set_vec3("spotLight.ambient", self.ambient);
        shader.set_vec3("spotLight.diffuse", self.diffuse);
        shader.set_vec3("spotLight.specular", self.specular);
        shader.set_f32("spotLight.constant", self.attenuation.constant);
        shader.set_f32("spotLight.linear", self.attenuation.linear);
        shader.set_f32("spotLight.quadratic", self.attenuation.quadratic);
        shader.set_f32("spotLight.cutOff", self.cut_off.to_radians().cos());
        shader.set_f32("spotLight.outerCutOff", self.outer_cut_off.to_radians().cos());
    }
}

//=== Day/Night Presets ===================================================

/// One row of the day/night preset table: a sky color and the
/// directional-light intensities that go with it.
///
/// Nothing is computed — toggling swaps the active row into the scene.
#[derive(Debug, Clone, Copy)]
pub struct DaylightPreset {
    pub sky_color: Vec3,
    pub ambient: Vec3,
    pub diffuse: Vec3,
    pub specular: Vec3,
}

impl DaylightPreset {
    pub const DAY: Self = Self {
        sky_color: Vec3::new(0.2, 0.3, 0.3),
        ambient: Vec3::splat(0.05),
        diffuse: Vec3::splat(0.4),
        specular: Vec3::splat(0.5),
    };

    pub const NIGHT: Self = Self {
        sky_color: Vec3::ZERO,
        ambient: Vec3::splat(0.05),
        diffuse: Vec3::ZERO,
        specular: Vec3::ZERO,
    };

    pub fn for_daylight(daylight: bool) -> Self {
        if daylight {
            Self::DAY
        } else {
            Self::NIGHT
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
    use std::collections::HashMap;

    use glam::Mat4;

    //--- Recording Fake ---------------------------------------------------
    //
    // Captures uniform writes so tests can assert on the wire format.
    //
    #[derive(Default)]
    struct RecordingShader {
        floats: HashMap<String, f32>,
        vecs: HashMap<String, Vec3>,
    }

    impl ShaderProgram for RecordingShader {
        fn set_bool(&mut self, _name: &str, _value: bool) {}
        fn set_f32(&mut self, name: &str, value: f32) {
            self.floats.insert(name.to_string(), value);
        }
        fn set_vec3(&mut self, name: &str, value: Vec3) {
            self.vecs.insert(name.to_string(), value);
        }
        fn set_mat4(&mut self, _name: &str, _value: Mat4) {}
    }

    fn demo_spot() -> SpotLight {
        SpotLight::new(
            Vec3::ZERO,
            Vec3::new(0.0, 0.0, -1.0),
            12.5,
            15.0,
            Attenuation::new(1.0, 0.008, 0.001),
            Vec3::ZERO,
            Vec3::ONE,
            Vec3::ONE,
        )
    }

    //=====================================================================
    // Upload Tests
    //=====================================================================

    #[test]
    fn directional_light_writes_its_slot() {
        let light = DirectionalLight::new(
            Vec3::new(-0.2, -1.0, -0.3),
            Vec3::splat(0.05),
            Vec3::splat(0.4),
            Vec3::splat(0.5),
        );
        let mut shader = RecordingShader::default();

        light.set_uniforms(&mut shader);

        assert_eq!(shader.vecs["dirLight.direction"], Vec3::new(-0.2, -1.0, -0.3));
        assert_eq!(shader.vecs["dirLight.diffuse"], Vec3::splat(0.4));
    }

    #[test]
    fn point_light_writes_indexed_slot() {
        let light = PointLight::new(
            Vec3::new(0.7, 3.2, 10.0),
            Attenuation::new(1.0, 0.09, 0.002),
            Vec3::splat(0.05),
            Vec3::new(0.1, 0.8, 0.2),
            Vec3::new(0.1, 0.8, 0.2),
        );
        let mut shader = RecordingShader::default();

        light.set_uniforms(&mut shader, 2);

        assert_eq!(shader.vecs["pointLights[2].position"], Vec3::new(0.7, 3.2, 10.0));
        assert_relative_eq!(shader.floats["pointLights[2].linear"], 0.09);
        assert!(!shader.vecs.contains_key("pointLights[0].position"));
    }

    #[test]
    fn spotlight_cutoffs_upload_as_cosines() {
        let mut shader = RecordingShader::default();

        demo_spot().set_uniforms(&mut shader);

        assert_relative_eq!(
            shader.floats["spotLight.cutOff"],
            12.5f32.to_radians().cos(),
            epsilon = 1e-6
        );
        assert_relative_eq!(
            shader.floats["spotLight.outerCutOff"],
            15.0f32.to_radians().cos(),
            epsilon = 1e-6
        );
    }

    //=====================================================================
    // Preset Tests
    //=====================================================================

    #[test]
    fn night_preset_kills_diffuse_and_specular() {
        let night = DaylightPreset::for_daylight(false);

        assert_eq!(night.sky_color, Vec3::ZERO);
        assert_eq!(night.diffuse, Vec3::ZERO);
        assert_eq!(night.specular, Vec3::ZERO);
        // Ambient survives the night
        assert_eq!(night.ambient, Vec3::splat(0.05));
    }

    #[test]
    fn day_preset_restores_sky() {
        let day = DaylightPreset::for_daylight(true);

        assert_eq!(day.sky_color, Vec3::new(0.2, 0.3, 0.3));
        assert_eq!(day.diffuse, Vec3::splat(0.4));
    }
}
