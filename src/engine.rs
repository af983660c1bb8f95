//=========================================================================
// Lumen Engine
//
// Main entry point and coordinator for the engine.
//
// Architecture:
// ```text
//     EngineBuilder  ──build()──>  Engine  ──run()──>  [Runtime]
//         │                          │
//         └─ with_channel_capacity() └─ enters the platform event loop
//                                       ticks core at redraw boundary
//                                       blocks until exit
// ```
//
// The whole engine is single-threaded: input polling, simulation and
// draw submission happen in order on the thread that owns the window.
// Delta time comes from a monotonic clock once per frame; the simulation
// is variable-rate (object motion and animations follow frame rate).
//
//=========================================================================

//=== Standard Library Imports ============================================

use std::time::Instant;

//=== External Dependencies ===============================================

use log::info;

//=== Internal Dependencies ===============================================

use crate::core::render::{LogRenderer, Renderer};
use crate::core::CoreState;
use crate::platform::{self, PlatformError};

//=== EngineError =========================================================

/// Fatal engine failures.
///
/// There is no recovery path: a failed bootstrap is reported and the
/// process is expected to terminate.
#[derive(Debug)]
pub enum EngineError {
    /// Platform bootstrap or event loop failure.
    Platform(PlatformError),
}

impl std::fmt::Display for EngineError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Platform(e) => write!(f, "Platform failure: {}", e),
        }
    }
}

impl std::error::Error for EngineError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Platform(e) => Some(e),
        }
    }
}

//=== EngineBuilder =======================================================

/// Builder for configuring and constructing an [`Engine`].
///
/// # Default Values
///
/// - **Channel capacity**: 128 events buffered between frame boundaries
///
/// # Examples
///
/// Simple usage with defaults:
/// ```no_run
/// use lumen_engine::EngineBuilder;
///
/// EngineBuilder::new()
///     .build()
///     .init(|core| core.load_showcase())
///     .run()
///     .unwrap();
/// ```
///
/// Advanced configuration:
/// ```no_run
/// # use lumen_engine::EngineBuilder;
/// EngineBuilder::new()
///     .with_channel_capacity(256)   // Extra input buffering
///     .build()
///     .init(|core| core.load_showcase())
///     .run()
///     .unwrap();
/// ```
pub struct EngineBuilder {
    channel_capacity: usize,
}

impl EngineBuilder {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self {
            channel_capacity: 128,
        }
    }

    /// Sets the capacity of the frame-boundary input channel.
    ///
    /// Larger values provide more buffering during frame spikes; when
    /// the channel is full, further input batches are dropped with a
    /// warning until it drains.
    ///
    /// Default: 128
    ///
    /// # Panics
    ///
    /// Panics if `capacity == 0`.
    pub fn with_channel_capacity(mut self, capacity: usize) -> Self {
        assert!(capacity > 0, "Channel capacity must be positive");
        self.channel_capacity = capacity;
        self
    }

    /// Builds the engine instance.
    ///
    /// Consumes the builder and produces a configured [`Engine`] with an
    /// empty scene and the standard key bindings. Call [`Engine::init`]
    /// to populate the scene before running.
    pub fn build(self) -> Engine {
        info!("Building engine (channel: {})", self.channel_capacity);

        Engine {
            core: CoreState::new(),
            channel_capacity: self.channel_capacity,
        }
    }
}

impl Default for EngineBuilder {
    fn default() -> Self {
        Self::new()
    }
}

//=== Engine ==============================================================

/// Lumen Engine runtime.
///
/// Create via [`EngineBuilder`] with `EngineBuilder::new().build()`.
///
/// # Lifecycle
///
/// 1. [`Engine::init`] configures the core (scene content, extra
///    bindings) before anything runs
/// 2. [`Engine::run`] enters the platform event loop and blocks until
///    the window closes or the close flag is raised
///
/// # Examples
///
/// ```no_run
/// use lumen_engine::EngineBuilder;
///
/// EngineBuilder::new()
///     .build()
///     .init(|core| core.load_showcase())
///     .run()
///     .unwrap();
/// ```
pub struct Engine {
    core: CoreState,
    channel_capacity: usize,
}

impl Engine {
    //--- Initialization ---------------------------------------------------

    /// Initializes engine state before execution.
    ///
    /// Provides mutable access to [`CoreState`] for configuring the
    /// scene and input bindings before the engine starts running.
    pub fn init<F>(mut self, init_fn: F) -> Self
    where
        F: FnOnce(&mut CoreState),
    {
        info!("Initializing engine state");
        init_fn(&mut self.core);
        self
    }

    //--- Execution --------------------------------------------------------

    /// Starts the engine with the bundled logging renderer and blocks
    /// until the application exits.
    pub fn run(self) -> Result<(), EngineError> {
        self.run_with(LogRenderer::new())
    }

    /// Starts the engine with a caller-provided rendering backend.
    ///
    /// # Lifecycle
    ///
    /// 1. Enters the platform event loop (blocks here)
    /// 2. Every redraw: buffered input → core tick → draw submission
    /// 3. On window close or Escape: event loop exits, this returns
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Platform`] if the event loop cannot be
    /// created or fails while running. Both are fatal; the caller is
    /// expected to report and terminate.
    pub fn run_with<R: Renderer>(self, renderer: R) -> Result<(), EngineError> {
        info!("Starting engine runtime");

        platform::run(self.core, renderer, self.channel_capacity)
            .map_err(EngineError::Platform)?;

        info!("Engine shutdown complete");
        Ok(())
    }

    //--- Test Accessors ---------------------------------------------------

    #[cfg(test)]
    pub(crate) fn core(&self) -> &CoreState {
        &self.core
    }
}

//=== FrameClock ==========================================================

/// Monotonic per-frame delta time source.
///
/// One `tick()` per frame; the returned value feeds every update
/// function that frame. No fixed-timestep guarantee is made.
pub(crate) struct FrameClock {
    last_frame: Instant,
}

impl FrameClock {
    pub(crate) fn new() -> Self {
        Self {
            last_frame: Instant::now(),
        }
    }

    /// Seconds elapsed since the previous tick.
    pub(crate) fn tick(&mut self) -> f32 {
        let now = Instant::now();
        let delta = now.duration_since(self.last_frame).as_secs_f32();
        self.last_frame = now;
        delta
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    //=====================================================================
    // EngineBuilder Tests
    //=====================================================================

    #[test]
    fn builder_defaults() {
        let builder = EngineBuilder::new();
        assert_eq!(builder.channel_capacity, 128);
    }

    #[test]
    fn builder_with_channel_capacity() {
        let builder = EngineBuilder::new().with_channel_capacity(256);
        assert_eq!(builder.channel_capacity, 256);
    }

    #[test]
    #[should_panic(expected = "Channel capacity must be positive")]
    fn builder_with_channel_capacity_panics_on_zero() {
        EngineBuilder::new().with_channel_capacity(0);
    }

    #[test]
    fn builder_build_creates_engine() {
        let engine = EngineBuilder::new().with_channel_capacity(64).build();
        assert_eq!(engine.channel_capacity, 64);
    }

    //=====================================================================
    // Engine Tests
    //=====================================================================

    #[test]
    fn init_reaches_the_core() {
        let engine = EngineBuilder::new()
            .build()
            .init(|core| core.load_showcase());

        assert!(!engine.core().scene.objects.is_empty());
    }

    #[test]
    fn engine_starts_with_an_empty_scene() {
        let engine = EngineBuilder::new().build();
        assert!(engine.core().scene.objects.is_empty());
    }

    //=====================================================================
    // FrameClock Tests
    //=====================================================================

    #[test]
    fn clock_delta_is_nonnegative() {
        let mut clock = FrameClock::new();
        assert!(clock.tick() >= 0.0);
        assert!(clock.tick() >= 0.0);
    }

    #[test]
    fn clock_measures_elapsed_time() {
        let mut clock = FrameClock::new();
        std::thread::sleep(std::time::Duration::from_millis(10));

        let delta = clock.tick();
        assert!(delta >= 0.010, "expected at least 10ms, got {}s", delta);
    }
}
