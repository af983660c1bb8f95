//=========================================================================
// Platform Subsystem
//=========================================================================
//
// Bridges Winit (OS-level events) with the engine core.
//
// Architecture:
// ```text
//  Winit Event Loop (main thread)
//   ├─ InputProcessor: Winit types → engine InputEvents
//   ├─ InputBuffer: coalesces cursor moves, sums scroll, dedups keys
//   ├─ RedrawRequested = frame boundary:
//   │    buffered input → channel → drained → CoreState::tick()
//   └─ FrameDirectives applied: cursor capture, exit
// ```
//
// The whole cycle runs on one thread. The bounded channel is a frame
// buffer, not a thread boundary: the platform side fills it between
// redraws, the core side drains it at the top of each tick. It keeps the
// platform/core seam message-shaped, so neither side reaches into the
// other's state.
//
// Key Design Decisions:
// - **RedrawRequested = frame boundary**: all input collected since the
//   last frame is handed to the core as one batch, in arrival order
// - **Sticky modifiers**: modifier state persists across events until
//   explicitly changed (matches platform behavior)
// - **try_send**: a full channel drops the batch with a warning rather
//   than blocking the only thread
// - **Window constants**: title and size are compile-time constants;
//   there is no runtime configuration surface
//
//=========================================================================

//=== Submodules ==========================================================

mod input_buffer;
mod input_processor;

//=== External Crates =====================================================

use crossbeam_channel::{bounded, Receiver, Sender};
use log::*;
use winit::{
    application::ApplicationHandler,
    dpi::LogicalSize,
    event::WindowEvent,
    event_loop::{ActiveEventLoop, EventLoop},
    window::{CursorGrabMode, Window, WindowAttributes},
};

//=== Internal Imports ====================================================

use crate::core::input::event::InputEvent;
use crate::core::render::Renderer;
use crate::core::CoreState;
use crate::engine::FrameClock;
use input_buffer::InputBuffer;
use input_processor::InputProcessor;

//=== Window Constants ====================================================

const WINDOW_TITLE: &str = "Lumen Scene";
const WINDOW_WIDTH: u32 = 1400;
const WINDOW_HEIGHT: u32 = 900;

//=== PlatformEvent =======================================================

/// Messages crossing the platform → core seam.
#[derive(Debug, Clone)]
pub(crate) enum PlatformEvent {
    /// Batched input events for a single frame, in arrival order.
    ///
    /// Empty batches are not sent.
    Inputs(Vec<InputEvent>),

    /// Window close requested by user or OS, or window creation failed.
    /// The core loop terminates upon draining this.
    WindowClosed,
}

//=== PlatformError =======================================================

/// Platform initialization and runtime errors.
///
/// These are fatal: if the event loop cannot be created or run, the
/// engine cannot run either.
#[derive(Debug)]
pub enum PlatformError {
    /// Failed to create the event loop (rare, indicates an OS-level issue).
    EventLoopCreation(winit::error::EventLoopError),

    /// Event loop execution error.
    EventLoopExecution(winit::error::EventLoopError),
}

//--- Trait Implementations -----------------------------------------------

impl std::fmt::Display for PlatformError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EventLoopCreation(e) => write!(f, "Event loop creation failed: {}", e),
            Self::EventLoopExecution(e) => write!(f, "Event loop error: {}", e),
        }
    }
}

impl std::error::Error for PlatformError {}

//=== Entry Point =========================================================

/// Creates the window, enters the event loop, and drives the core tick
/// at the redraw boundary. Blocks until the close flag is raised.
pub(crate) fn run<R: Renderer>(
    core: CoreState,
    renderer: R,
    channel_capacity: usize,
) -> Result<(), PlatformError> {
    debug!(target: "platform", "Starting Winit event loop");

    let (event_sender, event_receiver) = bounded(channel_capacity);

    let mut runtime = Runtime {
        window: None,
        buffer: InputBuffer::new(),
        input_processor: InputProcessor::new(),
        event_sender,
        event_receiver,
        core,
        renderer,
        clock: FrameClock::new(),
    };

    let event_loop = EventLoop::new().map_err(PlatformError::EventLoopCreation)?;

    event_loop
        .run_app(&mut runtime)
        .map_err(PlatformError::EventLoopExecution)
}

//=== Runtime =============================================================

/// Window manager, input aggregator and frame driver.
///
/// Owns both ends of the platform/core seam: Winit callbacks feed the
/// input buffer, and `RedrawRequested` flushes it through the channel
/// into the core tick.
struct Runtime<R: Renderer> {
    /// OS window handle (None until `resumed()` is called).
    window: Option<Window>,

    /// Buffers input until the frame boundary.
    buffer: InputBuffer,

    /// Converts Winit events to engine InputEvents.
    input_processor: InputProcessor,

    /// Platform side of the frame-boundary channel.
    event_sender: Sender<PlatformEvent>,

    /// Core side of the frame-boundary channel.
    event_receiver: Receiver<PlatformEvent>,

    core: CoreState,
    renderer: R,
    clock: FrameClock,
}

impl<R: Renderer> Runtime<R> {
    //--- Frame Boundary ---------------------------------------------------

    /// Flushes buffered input events through the channel.
    ///
    /// If the channel is full the batch is dropped with a warning;
    /// blocking would stall the only thread.
    fn flush_input_buffer(&mut self) {
        if self.buffer.is_empty() {
            return;
        }

        let batch = self.buffer.drain();
        let count = batch.len();

        trace!(target: "platform::input", "Flushing {} events", count);

        if self.event_sender.try_send(PlatformEvent::Inputs(batch)).is_err() {
            warn!(
                target: "platform::input",
                "Channel full or disconnected, dropping {} events",
                count
            );
        }
    }

    /// Runs one frame: drain input, tick the core, apply directives.
    fn frame(&mut self, event_loop: &ActiveEventLoop) {
        self.flush_input_buffer();

        //--- Drain the frame's platform events ---------------------------
        let mut events: Vec<InputEvent> = Vec::new();
        while let Ok(message) = self.event_receiver.try_recv() {
            match message {
                PlatformEvent::Inputs(batch) => events.extend(batch),
                PlatformEvent::WindowClosed => {
                    info!(target: "platform", "Close flag drained, exiting");
                    event_loop.exit();
                    return;
                }
            }
        }

        //--- Update and draw ---------------------------------------------
        let delta_time = self.clock.tick();
        let directives = self.core.tick(&events, delta_time, &mut self.renderer);

        //--- Apply core → platform directives ----------------------------
        if let Some(captured) = directives.capture_mouse {
            if let Some(window) = &self.window {
                apply_cursor_capture(window, captured);
            }
        }

        if directives.exit {
            info!(target: "platform", "Exit directive received");
            event_loop.exit();
            return;
        }

        //--- Schedule the next frame -------------------------------------
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }
}

//=== Winit Integration ===================================================

impl<R: Renderer> ApplicationHandler for Runtime<R> {
    /// Called when the app becomes active (startup or mobile resume).
    ///
    /// Creates the window if it doesn't exist yet.
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            debug!(target: "platform", "Window already exists (mobile resume?)");
            return;
        }

        let attrs = WindowAttributes::default()
            .with_title(WINDOW_TITLE)
            .with_inner_size(LogicalSize::new(WINDOW_WIDTH, WINDOW_HEIGHT));

        match event_loop.create_window(attrs) {
            Ok(window) => {
                let size = window.inner_size();
                info!(
                    target: "platform",
                    "Window created: {}x{} @ {}x DPI",
                    size.width,
                    size.height,
                    window.scale_factor()
                );

                self.core.scene.set_viewport(size.width, size.height);
                window.request_redraw();
                self.window = Some(window);
            }
            Err(e) => {
                // Startup failure is fatal: report and terminate
                error!(target: "platform", "Window creation failed: {}", e);
                let _ = self.event_sender.try_send(PlatformEvent::WindowClosed);
                event_loop.exit();
            }
        }
    }

    /// Handles per-window events.
    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: winit::window::WindowId,
        event: WindowEvent,
    ) {
        match &event {
            WindowEvent::CloseRequested => {
                info!(target: "platform", "Window close requested");
                let _ = self.event_sender.try_send(PlatformEvent::WindowClosed);
                event_loop.exit();
            }

            WindowEvent::ModifiersChanged(state) => {
                trace!(target: "platform::input", "Modifiers changed: {:?}", state);
                self.input_processor.update_modifiers(state.state());
            }

            WindowEvent::CursorMoved { position, .. } => {
                self.buffer.push_cursor(position.x as f32, position.y as f32);
            }

            WindowEvent::MouseWheel { delta, .. } => {
                self.buffer.push_scroll(self.input_processor.process_scroll(*delta));
            }

            WindowEvent::KeyboardInput { event: key_event, .. } => {
                if let Some(event) = self.input_processor.process_key_event(key_event) {
                    self.buffer.push_discrete(event);
                } else {
                    trace!(target: "platform::input", "Unmapped key ignored");
                }
            }

            WindowEvent::MouseInput { state, button, .. } => {
                let event = self.input_processor.process_mouse_button(*button, *state);
                self.buffer.push_discrete(event);
            }

            WindowEvent::Resized(size) => {
                self.core.scene.set_viewport(size.width, size.height);
            }

            WindowEvent::RedrawRequested => {
                self.frame(event_loop);
            }

            _ => {
                // Ignore: Focused, Occluded, etc. (not needed for input)
            }
        }
    }
}

//=== Cursor Capture ======================================================

// Locked keeps the cursor pinned (preferred for mouse look); platforms
// without Locked support fall back to Confined.
fn apply_cursor_capture(window: &Window, captured: bool) {
    if captured {
        if window.set_cursor_grab(CursorGrabMode::Locked).is_err() {
            if let Err(e) = window.set_cursor_grab(CursorGrabMode::Confined) {
                warn!(target: "platform", "Cursor grab failed: {}", e);
            }
        }
        window.set_cursor_visible(false);
    } else {
        if let Err(e) = window.set_cursor_grab(CursorGrabMode::None) {
            warn!(target: "platform", "Cursor release failed: {}", e);
        }
        window.set_cursor_visible(true);
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::input::event::{KeyCode, Modifiers};
    use crate::core::render::LogRenderer;

    //--- Test Helpers -----------------------------------------------------

    fn test_runtime() -> Runtime<LogRenderer> {
        let (event_sender, event_receiver) = bounded(8);
        Runtime {
            window: None,
            buffer: InputBuffer::new(),
            input_processor: InputProcessor::new(),
            event_sender,
            event_receiver,
            core: CoreState::new(),
            renderer: LogRenderer::new(),
            clock: FrameClock::new(),
        }
    }

    fn key_down(key: KeyCode) -> InputEvent {
        InputEvent::KeyDown { key, modifiers: Modifiers::NONE }
    }

    //=====================================================================
    // PlatformEvent Tests
    //=====================================================================

    #[test]
    fn platform_event_is_cloneable_and_debug() {
        let event = PlatformEvent::Inputs(vec![key_down(KeyCode::Space)]);
        let cloned = event.clone();
        assert!(format!("{:?}", cloned).contains("Inputs"));

        let closed = PlatformEvent::WindowClosed;
        assert!(format!("{:?}", closed).contains("WindowClosed"));
    }

    //=====================================================================
    // Flush Tests
    //=====================================================================

    #[test]
    fn flush_empty_buffer_is_noop() {
        let mut runtime = test_runtime();

        runtime.flush_input_buffer();

        assert!(runtime.event_receiver.try_recv().is_err());
    }

    #[test]
    fn flush_sends_buffered_events() {
        let mut runtime = test_runtime();
        runtime.buffer.push_discrete(key_down(KeyCode::Space));

        runtime.flush_input_buffer();

        match runtime.event_receiver.try_recv() {
            Ok(PlatformEvent::Inputs(batch)) => assert_eq!(batch.len(), 1),
            other => panic!("Expected Inputs event, got {:?}", other),
        }
    }

    #[test]
    fn second_flush_has_nothing_to_send() {
        let mut runtime = test_runtime();
        runtime.buffer.push_discrete(key_down(KeyCode::KeyA));

        runtime.flush_input_buffer();
        runtime.flush_input_buffer();

        assert!(runtime.event_receiver.try_recv().is_ok());
        assert!(runtime.event_receiver.try_recv().is_err());
    }

    #[test]
    fn flush_survives_a_full_channel() {
        let (event_sender, event_receiver) = bounded(1);
        let mut runtime = Runtime {
            window: None,
            buffer: InputBuffer::new(),
            input_processor: InputProcessor::new(),
            event_sender,
            event_receiver,
            core: CoreState::new(),
            renderer: LogRenderer::new(),
            clock: FrameClock::new(),
        };

        runtime.buffer.push_discrete(key_down(KeyCode::KeyA));
        runtime.flush_input_buffer();

        // Channel now full; the second flush must not block or panic
        runtime.buffer.push_discrete(key_down(KeyCode::KeyB));
        runtime.flush_input_buffer();

        assert!(runtime.event_receiver.try_recv().is_ok());
        assert!(runtime.event_receiver.try_recv().is_err());
    }

    //=====================================================================
    // PlatformError Tests
    //=====================================================================

    #[test]
    fn platform_error_implements_error_and_display() {
        fn assert_error<T: std::error::Error + std::fmt::Display>() {}
        assert_error::<PlatformError>();
    }
}
