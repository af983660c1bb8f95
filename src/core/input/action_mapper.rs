//=========================================================================
// Action Mapper
//=========================================================================
//
// Maps raw input to game actions based on configured bindings.
//
// Architecture:
//   (key/button, modifiers) → HashMap → Action
//
// Resolution: an exact (key, modifiers) binding wins; otherwise the
// unmodified binding for the same key applies. The fallback keeps
// bindings working while a modifier key is itself bound as an input
// (holding Left Shift to descend must not mask the W binding).
//
//=========================================================================

//=== External Dependencies ===============================================

use std::collections::HashMap;

//=== Internal Dependencies ===============================================

use super::action::Action;
use super::event::{KeyCode, Modifiers, MouseButton};

//=== ActionMapper ========================================================

/// Maps input events to actions via (key/button, modifiers) lookups.
pub(crate) struct ActionMapper<A: Action> {
    /// Key bindings: (key, modifiers) → action
    key_bindings: HashMap<(KeyCode, Modifiers), A>,

    /// Mouse button bindings: (button, modifiers) → action
    mouse_bindings: HashMap<(MouseButton, Modifiers), A>,
}

impl<A: Action> ActionMapper<A> {
    /// Creates a mapper with no bindings.
    pub(crate) fn new() -> Self {
        Self {
            key_bindings: HashMap::new(),
            mouse_bindings: HashMap::new(),
        }
    }

    //--- Binding API ------------------------------------------------------

    /// Binds a key to an action (no modifiers).
    pub(crate) fn bind_key(&mut self, key: KeyCode, action: A) {
        self.bind_key_with_mods(key, Modifiers::NONE, action);
    }

    /// Binds a key with modifiers to an action.
    pub(crate) fn bind_key_with_mods(&mut self, key: KeyCode, modifiers: Modifiers, action: A) {
        self.key_bindings.insert((key, modifiers), action);
    }

    /// Binds a mouse button to an action (no modifiers).
    pub(crate) fn bind_mouse(&mut self, button: MouseButton, action: A) {
        self.mouse_bindings.insert((button, Modifiers::NONE), action);
    }

    /// Removes a key binding (exact modifier match).
    pub(crate) fn unbind_key_with_mods(&mut self, key: KeyCode, modifiers: Modifiers) {
        self.key_bindings.remove(&(key, modifiers));
    }

    /// Removes ALL bindings for a key (every modifier combination).
    pub(crate) fn unbind_key_all_variants(&mut self, key: KeyCode) {
        self.key_bindings.retain(|&(k, _), _| k != key);
    }

    //--- Resolution -------------------------------------------------------

    /// Resolves a key press to an action.
    ///
    /// Exact (key, modifiers) binding first, then the unmodified binding.
    pub(crate) fn resolve_key(&self, key: KeyCode, modifiers: Modifiers) -> Option<A> {
        self.key_bindings
            .get(&(key, modifiers))
            .or_else(|| self.key_bindings.get(&(key, Modifiers::NONE)))
            .copied()
    }

    /// Resolves a mouse button press to an action, same fallback rule.
    pub(crate) fn resolve_button(&self, button: MouseButton, modifiers: Modifiers) -> Option<A> {
        self.mouse_bindings
            .get(&(button, modifiers))
            .or_else(|| self.mouse_bindings.get(&(button, Modifiers::NONE)))
            .copied()
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
        Jump,
        Shoot,
        Save,
    }

    impl Action for TestAction {}

    //=====================================================================
    // Basic Binding Tests
    //=====================================================================

    #[test]
    fn bind_and_resolve_simple_key() {
        let mut mapper = ActionMapper::<TestAction>::new();
        mapper.bind_key(KeyCode::Space, TestAction::Jump);

        assert_eq!(
            mapper.resolve_key(KeyCode::Space, Modifiers::NONE),
            Some(TestAction::Jump)
        );
    }

    #[test]
    fn resolve_returns_none_if_no_binding() {
        let mapper = ActionMapper::<TestAction>::new();
        assert_eq!(mapper.resolve_key(KeyCode::Space, Modifiers::NONE), None);
    }

    #[test]
    fn mouse_binding_resolves() {
        let mut mapper = ActionMapper::<TestAction>::new();
        mapper.bind_mouse(MouseButton::Left, TestAction::Shoot);

        assert_eq!(
            mapper.resolve_button(MouseButton::Left, Modifiers::NONE),
            Some(TestAction::Shoot)
        );
        assert_eq!(mapper.resolve_button(MouseButton::Right, Modifiers::NONE), None);
    }

    //=====================================================================
    // Modifier Tests
    //=====================================================================

    #[test]
    fn exact_modifier_binding_wins() {
        let mut mapper = ActionMapper::<TestAction>::new();
        mapper.bind_key(KeyCode::KeyS, TestAction::Shoot);
        mapper.bind_key_with_mods(KeyCode::KeyS, Modifiers::CTRL, TestAction::Save);

        assert_eq!(
            mapper.resolve_key(KeyCode::KeyS, Modifiers::NONE),
            Some(TestAction::Shoot)
        );
        assert_eq!(
            mapper.resolve_key(KeyCode::KeyS, Modifiers::CTRL),
            Some(TestAction::Save)
        );
    }

    #[test]
    fn unmatched_modifiers_fall_back_to_unmodified_binding() {
        let mut mapper = ActionMapper::<TestAction>::new();
        mapper.bind_key(KeyCode::KeyW, TestAction::Jump);

        // Shift held (e.g. descending) must not mask the W binding
        assert_eq!(
            mapper.resolve_key(KeyCode::KeyW, Modifiers::SHIFT),
            Some(TestAction::Jump)
        );
    }

    #[test]
    fn modifier_only_binding_has_no_fallback() {
        let mut mapper = ActionMapper::<TestAction>::new();
        mapper.bind_key_with_mods(KeyCode::KeyS, Modifiers::CTRL, TestAction::Save);

        assert_eq!(mapper.resolve_key(KeyCode::KeyS, Modifiers::NONE), None);
        assert_eq!(mapper.resolve_key(KeyCode::KeyS, Modifiers::ALT), None);
    }

    //=====================================================================
    // Unbinding Tests
    //=====================================================================

    #[test]
    fn unbind_removes_exact_variant_only() {
        let mut mapper = ActionMapper::<TestAction>::new();
        mapper.bind_key(KeyCode::KeyS, TestAction::Shoot);
        mapper.bind_key_with_mods(KeyCode::KeyS, Modifiers::CTRL, TestAction::Save);

        mapper.unbind_key_with_mods(KeyCode::KeyS, Modifiers::CTRL);

        assert_eq!(mapper.resolve_key(KeyCode::KeyS, Modifiers::CTRL), Some(TestAction::Shoot));
    }

    #[test]
    fn unbind_all_variants_clears_the_key() {
        let mut mapper = ActionMapper::<TestAction>::new();
        mapper.bind_key(KeyCode::KeyS, TestAction::Shoot);
        mapper.bind_key_with_mods(KeyCode::KeyS, Modifiers::CTRL, TestAction::Save);

        mapper.unbind_key_all_variants(KeyCode::KeyS);

        assert_eq!(mapper.resolve_key(KeyCode::KeyS, Modifiers::NONE), None);
        assert_eq!(mapper.resolve_key(KeyCode::KeyS, Modifiers::CTRL), None);
    }

    #[test]
    fn rebinding_replaces_the_action() {
        let mut mapper = ActionMapper::<TestAction>::new();
        mapper.bind_key(KeyCode::Space, TestAction::Jump);
        mapper.bind_key(KeyCode::Space, TestAction::Shoot);

        assert_eq!(
            mapper.resolve_key(KeyCode::Space, Modifiers::NONE),
            Some(TestAction::Shoot)
        );
    }
}
