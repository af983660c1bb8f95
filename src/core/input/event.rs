//=========================================================================
// Input Event Types
//=========================================================================
//
// Internal representation of low-level input events.
//
// This module abstracts platform-specific input (Winit here, but nothing
// below this layer knows that) into a stable, engine-friendly format
// consumed by the input subsystem.
//
// Event Flow:
// ```text
// Platform Layer (Winit)
//         ↓
//    InputEvent (this module)
//         ↓
//    StateTracker (persistent state + frame deltas)
//         ↓
//    Actions (high-level game input)
// ```
//
//=========================================================================

//=== MouseButton =========================================================

/// Physical mouse button identifier.
///
/// The `Other` variant covers side buttons, macro buttons, and any
/// non-standard inputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    /// Primary button (typically left).
    Left,

    /// Secondary button (typically right).
    Right,

    /// Middle button (wheel click).
    Middle,

    /// Any other button (side buttons, thumb buttons, macro keys).
    Other,
}

//=== KeyCode =============================================================

/// Physical keyboard key identifier.
///
/// Represents the physical key location, not the character produced:
/// `KeyA` is the same key on QWERTY and AZERTY layouts.
///
/// The left-hand modifier keys appear here as ordinary keys as well —
/// the engine binds Left Shift as a movement key and Left Ctrl as a
/// toggle, independent of their modifier role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    //--- Numeric Keys -----------------------------------------------------

    /// Number row: 0-9
    Digit0, Digit1, Digit2, Digit3, Digit4,
    Digit5, Digit6, Digit7, Digit8, Digit9,

    //--- Alphabetic Keys --------------------------------------------------

    /// Letter keys: A-Z (physical location, not character)
    KeyA, KeyB, KeyC, KeyD, KeyE, KeyF, KeyG, KeyH, KeyI,
    KeyJ, KeyK, KeyL, KeyM, KeyN, KeyO, KeyP, KeyQ, KeyR,
    KeyS, KeyT, KeyU, KeyV, KeyW, KeyX, KeyY, KeyZ,

    //--- Arrow Keys -------------------------------------------------------

    ArrowDown,
    ArrowLeft,
    ArrowRight,
    ArrowUp,

    //--- Special Keys -----------------------------------------------------

    /// Spacebar
    Space,

    /// Return/Enter key
    Enter,

    /// Escape key
    Escape,

    /// Tab key
    Tab,

    /// Left Shift, as a bindable key
    ShiftLeft,

    /// Left Ctrl, as a bindable key
    ControlLeft,

    /// Fallback for keys not explicitly mapped by the input layer.
    Unidentified,
}

//=== Modifiers ===========================================================

/// Modifier key state (Shift, Ctrl, Alt).
///
/// Left/right variants are not distinguished. Bindings match modifiers
/// exactly, with a fallback to the unmodified binding when no exact
/// match exists (see the action mapper).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Modifiers {
    /// Shift key held (either left or right).
    pub shift: bool,

    /// Ctrl key held (either left or right, Command on macOS).
    pub ctrl: bool,

    /// Alt key held (either left or right, Option on macOS).
    pub alt: bool,
}

impl Modifiers {
    /// No modifiers held.
    pub const NONE: Self = Self { shift: false, ctrl: false, alt: false };

    /// Shift only.
    pub const SHIFT: Self = Self { shift: true, ctrl: false, alt: false };

    /// Ctrl only.
    pub const CTRL: Self = Self { shift: false, ctrl: true, alt: false };

    /// Alt only.
    pub const ALT: Self = Self { shift: false, ctrl: false, alt: true };
}

impl Default for Modifiers {
    fn default() -> Self {
        Self::NONE
    }
}

//=== InputEvent ==========================================================

/// Low-level input event from the platform layer.
///
/// Discrete events (keys, buttons) carry the modifier state at the time
/// they fired. Continuous events (cursor movement, scroll) carry raw
/// values; the platform buffer coalesces cursor positions and sums
/// scroll deltas before they reach the core.
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    /// Key pressed down.
    KeyDown {
        key: KeyCode,
        modifiers: Modifiers,
    },

    /// Key released.
    KeyUp {
        key: KeyCode,
        modifiers: Modifiers,
    },

    /// Mouse button pressed.
    MouseButtonDown {
        button: MouseButton,
        modifiers: Modifiers,
    },

    /// Mouse button released.
    MouseButtonUp {
        button: MouseButton,
        modifiers: Modifiers,
    },

    /// Mouse cursor moved to a new position.
    ///
    /// Coordinates are in screen space (pixels, top-left origin).
    MouseMoved { x: f32, y: f32 },

    /// Scroll wheel turned; positive is away from the user.
    MouseScrolled { delta: f32 },

    /// Unrecognized or unsupported event, silently ignored downstream.
    Unidentified,
}

//=========================================================================
// Unit Tests
//=========================================================================
