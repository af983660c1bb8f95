//=========================================================================
// Prelude
//=========================================================================
//
// Convenience module that re-exports commonly used types and traits.
//
// Usage:
//   use lumen_engine::prelude::*;
//
//=========================================================================

//=== Public API ==========================================================

// Engine core
pub use crate::engine::{Engine, EngineBuilder, EngineError};

// Per-frame state and actions
pub use crate::core::{CoreState, FrameDirectives, SceneAction};

// Scene system
pub use crate::core::scene::{
    Attenuation, BezierPatch, CircularMotion, DirectionalLight, GameObject, PointLight, Scene,
    SpotLight,
};

// Camera
pub use crate::core::camera::{Camera, CameraMode, CameraMovement};

// Math
pub use crate::core::math::Transform;

// Input system
pub use crate::core::input::{Action, InputSystem, KeyCode, Modifiers, MouseButton};

// Render seam
pub use crate::core::render::{LogRenderer, ModelId, Renderer, ScenePass, ShaderProgram};
