//=========================================================================
// Input Buffer
//=========================================================================
//
// Collects and normalizes raw input events between frame boundaries.
//
// Responsibilities:
// - Store discrete inputs (keys, buttons) in arrival order, dropping
//   immediate duplicates
// - Coalesce cursor movement (last position wins)
// - Accumulate scroll deltas (they sum, unlike positions)
// - Hand everything over as one batch via `drain()`
//
// The buffer exists only for the current frame and is emptied when the
// frame is flushed to the core.
//
//=========================================================================

//=== Internal Modules ====================================================

use crate::core::input::event::InputEvent;

//=== InputBuffer =========================================================

/// Transient event store for one frame of input.
pub(crate) struct InputBuffer {
    discrete: Vec<InputEvent>,
    cursor: Option<(f32, f32)>,
    scroll: f32,
}

impl InputBuffer {
    //--- Construction -----------------------------------------------------

    pub(crate) fn new() -> Self {
        const DISCRETE_BASE: usize = 128;

        Self {
            discrete: Vec::with_capacity(DISCRETE_BASE),
            cursor: None,
            scroll: 0.0,
        }
    }

    //--- Event Intake -----------------------------------------------------

    /// Appends a discrete input (key press, button click).
    /// Immediate duplicates are ignored to prevent flooding.
    pub(crate) fn push_discrete(&mut self, event: InputEvent) {
        if self.discrete.last() != Some(&event) {
            self.discrete.push(event);
        }
    }

    /// Records the latest cursor position; earlier positions this frame
    /// are discarded.
    pub(crate) fn push_cursor(&mut self, x: f32, y: f32) {
        self.cursor = Some((x, y));
    }

    /// Adds a scroll delta; deltas within a frame sum.
    pub(crate) fn push_scroll(&mut self, delta: f32) {
        self.scroll += delta;
    }

    //--- Drain ------------------------------------------------------------

    /// Returns all collected events for this frame and clears the buffer.
    ///
    /// Discrete events keep their order; the coalesced cursor position
    /// and summed scroll delta are appended after them.
    pub(crate) fn drain(&mut self) -> Vec<InputEvent> {
        let mut events = std::mem::take(&mut self.discrete);

        if let Some((x, y)) = self.cursor.take() {
            events.push(InputEvent::MouseMoved { x, y });
        }

        if self.scroll != 0.0 {
            events.push(InputEvent::MouseScrolled { delta: self.scroll });
            self.scroll = 0.0;
        }

        events
    }

    //--- Utilities --------------------------------------------------------

    pub(crate) fn is_empty(&self) -> bool {
        self.discrete.is_empty() && self.cursor.is_none() && self.scroll == 0.0
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
