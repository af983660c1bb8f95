//=========================================================================
// Input System
//=========================================================================
//
// High-level interface for input handling within the engine.
//
// Responsibilities:
// - Digest the frame's batch of raw input events into the persistent
//   `StateTracker`
// - Resolve key/button state into game actions via the `ActionMapper`
// - Expose per-frame queries: edge-triggered actions (just pressed),
//   level-triggered actions (held), mouse delta, scroll delta
//
// Frame lifecycle: `process_frame(events)` once per tick, then query.
//
//=========================================================================

//=== Submodules ==========================================================

pub mod event;

mod action;
mod action_mapper;
mod state_tracker;

//=== Public API ==========================================================

pub use action::Action;
pub use event::{InputEvent, KeyCode, Modifiers, MouseButton};
pub use state_tracker::StateTracker;

//=== Internal Imports ====================================================

use action_mapper::ActionMapper;
use std::collections::HashSet;

//=== InputSystem =========================================================

/// Owns the engine's input state and its action bindings.
///
/// This is the public-facing API for configuring and querying user input.
pub struct InputSystem<A: Action> {
    tracker: StateTracker,
    mapper: ActionMapper<A>,

    /// Actions whose key went down this frame (edge).
    pressed_actions: HashSet<A>,

    /// Actions whose key is currently held (level).
    held_actions: HashSet<A>,
}

impl<A: Action> InputSystem<A> {
    //--- Construction -----------------------------------------------------

    pub fn new() -> Self {
        Self {
            tracker: StateTracker::new(),
            mapper: ActionMapper::new(),
            pressed_actions: HashSet::new(),
            held_actions: HashSet::new(),
        }
    }

    //--- Binding API ------------------------------------------------------

    /// Binds a key to an action (no modifiers).
    pub fn bind_key(&mut self, key: KeyCode, action: A) {
        self.mapper.bind_key(key, action);
    }

    /// Binds a key with a modifier combination to an action.
    pub fn bind_key_with_mods(&mut self, key: KeyCode, modifiers: Modifiers, action: A) {
        self.mapper.bind_key_with_mods(key, modifiers, action);
    }

    /// Binds a mouse button to an action.
    pub fn bind_mouse(&mut self, button: MouseButton, action: A) {
        self.mapper.bind_mouse(button, action);
    }

    /// Removes every binding for a key.
    pub fn unbind_key(&mut self, key: KeyCode) {
        self.mapper.unbind_key_all_variants(key);
    }

    //--- Frame Processing -------------------------------------------------

    /// Digests one frame's worth of input events and recomputes the
    /// action sets.
    pub fn process_frame(&mut self, events: &[InputEvent]) {
        self.tracker.clear();
        self.tracker.process_events(events);
        self.tracker.finalize_frame();

        let modifiers = self.tracker.modifiers();

        self.pressed_actions.clear();
        for &key in self.tracker.keys_pressed() {
            if let Some(action) = self.mapper.resolve_key(key, modifiers) {
                self.pressed_actions.insert(action);
            }
        }
        for &button in self.tracker.buttons_pressed() {
            if let Some(action) = self.mapper.resolve_button(button, modifiers) {
                self.pressed_actions.insert(action);
            }
        }

        self.held_actions.clear();
        for &key in self.tracker.keys_down() {
            if let Some(action) = self.mapper.resolve_key(key, modifiers) {
                self.held_actions.insert(action);
            }
        }
    }

    //--- Query Methods ----------------------------------------------------

    /// Returns `true` if the action's binding went down this frame.
    pub fn just_pressed(&self, action: A) -> bool {
        self.pressed_actions.contains(&action)
    }

    /// Returns `true` while the action's binding is held.
    pub fn is_active(&self, action: A) -> bool {
        self.held_actions.contains(&action)
    }

    /// Iterates over the actions that went down this frame.
    pub fn pressed_actions(&self) -> impl Iterator<Item = &A> {
        self.pressed_actions.iter()
    }

    /// Mouse movement delta for this frame.
    pub fn mouse_delta(&self) -> (f32, f32) {
        self.tracker.mouse_delta()
    }

    /// Accumulated scroll delta for this frame.
    pub fn scroll_delta(&self) -> f32 {
        self.tracker.scroll_delta()
    }

    /// Resets the mouse delta reference (used when cursor capture toggles).
    pub fn rebase_mouse(&mut self) {
        self.tracker.rebase_mouse();
    }

    /// Low-level state access for queries the action layer doesn't cover.
    pub fn state(&self) -> &StateTracker {
        &self.tracker
    }
}

impl<A: Action> Default for InputSystem<A> {
    fn default() -> Self {
        Self::new()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    //--- Test Action Type -------------------------------------------------

    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    enum TestAction {
        Forward,
        Descend,
        Toggle,
    }

    impl Action for TestAction {}

    //--- Test Helpers -----------------------------------------------------

    fn key_down(key: KeyCode) -> InputEvent {
        InputEvent::KeyDown { key, modifiers: Modifiers::NONE }
    }

    fn key_up(key: KeyCode) -> InputEvent {
        InputEvent::KeyUp { key, modifiers: Modifiers::NONE }
    }

    fn bound_system() -> InputSystem<TestAction> {
        let mut system = InputSystem::new();
        system.bind_key(KeyCode::KeyW, TestAction::Forward);
        system.bind_key(KeyCode::ShiftLeft, TestAction::Descend);
        system.bind_key(KeyCode::KeyF, TestAction::Toggle);
        system
    }

    //--- Tests ------------------------------------------------------------

    #[test]
    fn press_produces_edge_and_level_action() {
        let mut system = bound_system();

        system.process_frame(&[key_down(KeyCode::KeyF)]);
        assert!(system.just_pressed(TestAction::Toggle));
        assert!(system.is_active(TestAction::Toggle));

        // Held across the next frame: level stays, edge clears
        system.process_frame(&[]);
        assert!(!system.just_pressed(TestAction::Toggle));
        assert!(system.is_active(TestAction::Toggle));
    }

    #[test]
    fn release_deactivates_the_action() {
        let mut system = bound_system();

        system.process_frame(&[key_down(KeyCode::KeyW)]);
        system.process_frame(&[key_up(KeyCode::KeyW)]);

        assert!(!system.is_active(TestAction::Forward));
    }

    #[test]
    fn unbound_keys_produce_no_actions() {
        let mut system = bound_system();

        system.process_frame(&[key_down(KeyCode::KeyQ)]);

        assert_eq!(system.pressed_actions().count(), 0);
    }

    #[test]
    fn concurrent_keys_activate_both_actions() {
        let mut system = bound_system();

        // Descending while moving forward: Shift is itself a bound key,
        // and its modifier bit must not mask the W binding.
        system.process_frame(&[
            InputEvent::KeyDown { key: KeyCode::ShiftLeft, modifiers: Modifiers::SHIFT },
            InputEvent::KeyDown { key: KeyCode::KeyW, modifiers: Modifiers::SHIFT },
        ]);

        assert!(system.is_active(TestAction::Forward));
        assert!(system.is_active(TestAction::Descend));
    }

    #[test]
    fn unbind_silences_the_key() {
        let mut system = bound_system();
        system.unbind_key(KeyCode::KeyF);

        system.process_frame(&[key_down(KeyCode::KeyF)]);

        assert!(!system.just_pressed(TestAction::Toggle));
    }

    #[test]
    fn mouse_delta_and_scroll_pass_through() {
        let mut system = bound_system();

        system.process_frame(&[InputEvent::MouseMoved { x: 10.0, y: 20.0 }]);
        system.process_frame(&[
            InputEvent::MouseMoved { x: 15.0, y: 18.0 },
            InputEvent::MouseScrolled { delta: -2.0 },
        ]);

        assert_eq!(system.mouse_delta(), (5.0, -2.0));
        assert_eq!(system.scroll_delta(), -2.0);
    }

    #[test]
    fn rebase_clears_the_frame_delta() {
        let mut system = bound_system();

        system.process_frame(&[InputEvent::MouseMoved { x: 0.0, y: 0.0 }]);
        system.process_frame(&[InputEvent::MouseMoved { x: 300.0, y: 300.0 }]);
        system.rebase_mouse();

        assert_eq!(system.mouse_delta(), (0.0, 0.0));
    }
}
