//=========================================================================
// Lumen Engine — Library Root
//
// This crate defines the public API surface of the Lumen Engine.
//
// Responsibilities:
// - Expose the core engine interface (`Engine`)
// - Keep internal modules (like `platform`) hidden from end users
// - Provide clean separation between the high-level engine facade
//   and lower-level subsystems (scene, camera, input, OS integration)
//
// Typical usage:
// ```no_run
// use lumen_engine::EngineBuilder;
//
// fn main() {
//     EngineBuilder::new()
//         .build()
//         .init(|core| core.load_showcase())
//         .run()
//         .unwrap();
// }
// ```
//
//=========================================================================

//--- Public Modules ------------------------------------------------------
//
// `core` contains all internal engine systems and logic (scene, camera,
// input, the render seam). It is exposed publicly for engine-level
// extensibility, but normal application code will mostly use the
// top-level `Engine` facade.
//
pub mod core;

//--- Internal Modules ----------------------------------------------------
//
// `platform` contains OS-specific logic (window, Winit integration,
// event loop) and is kept private, as it is not part of the public API
// surface.
//
// `engine` defines the main engine entry point and initialization logic.
//
mod engine;
mod platform;

//--- Public Exports ------------------------------------------------------
//
// Re-exports the `Engine` types as the main entry point for applications.
// This allows users to simply `use lumen_engine::Engine;` without having
// to know the internal module structure.
//
pub use engine::{Engine, EngineBuilder, EngineError};
pub use platform::PlatformError;

pub mod prelude;
