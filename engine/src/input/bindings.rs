//! Input Bindings Module
//!
//! Maps physical keys to logical actions. Several keys may drive the same
//! action (W and the up arrow both move forward), but each key drives at
//! most one action.

use std::collections::{HashMap, HashSet};

use super::KeyCode;

/// Logical input actions that can be bound to physical keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputAction {
    /// Walk forward, or raise the aim while first-person (default: W, Up)
    MoveForward,
    /// Walk backward, or lower the aim while first-person (default: S, Down)
    MoveBack,
    /// Rotate left (default: A, Left)
    TurnLeft,
    /// Rotate right (default: D, Right)
    TurnRight,
    /// Switch between chase and first-person view (default: Q)
    ToggleFirstPerson,
    /// Show or hide the top-down overview (default: E)
    ToggleOverview,
    /// Hold to charge, release to fire (default: Space)
    Charge,
}

impl InputAction {
    pub const ALL: [InputAction; 7] = [
        InputAction::MoveForward,
        InputAction::MoveBack,
        InputAction::TurnLeft,
        InputAction::TurnRight,
        InputAction::ToggleFirstPerson,
        InputAction::ToggleOverview,
        InputAction::Charge,
    ];
}

/// Maps physical keys to logical actions, supporting customizable key bindings.
#[derive(Debug, Clone)]
pub struct KeyBindings {
    /// Map from physical key to logical action
    key_to_action: HashMap<KeyCode, InputAction>,
    /// Keys bound to each action, in binding order
    action_to_keys: HashMap<InputAction, Vec<KeyCode>>,
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self::new()
    }
}

impl KeyBindings {
    /// Create a new KeyBindings instance with default key mappings.
    ///
    /// Default bindings:
    /// - W / ArrowUp = MoveForward
    /// - S / ArrowDown = MoveBack
    /// - A / ArrowLeft = TurnLeft
    /// - D / ArrowRight = TurnRight
    /// - Q = ToggleFirstPerson
    /// - E = ToggleOverview
    /// - Space = Charge
    pub fn new() -> Self {
        let mut bindings = Self::empty();

        bindings.bind(KeyCode::W, InputAction::MoveForward);
        bindings.bind(KeyCode::ArrowUp, InputAction::MoveForward);
        bindings.bind(KeyCode::S, InputAction::MoveBack);
        bindings.bind(KeyCode::ArrowDown, InputAction::MoveBack);
        bindings.bind(KeyCode::A, InputAction::TurnLeft);
        bindings.bind(KeyCode::ArrowLeft, InputAction::TurnLeft);
        bindings.bind(KeyCode::D, InputAction::TurnRight);
        bindings.bind(KeyCode::ArrowRight, InputAction::TurnRight);
        bindings.bind(KeyCode::Q, InputAction::ToggleFirstPerson);
        bindings.bind(KeyCode::E, InputAction::ToggleOverview);
        bindings.bind(KeyCode::Space, InputAction::Charge);

        bindings
    }

    /// Bindings with no keys mapped.
    pub fn empty() -> Self {
        Self {
            key_to_action: HashMap::new(),
            action_to_keys: HashMap::new(),
        }
    }

    /// Bind a physical key to a logical action.
    ///
    /// If the key was previously bound to another action, that binding is removed.
    /// Other keys already bound to `action` are kept.
    pub fn bind(&mut self, key: KeyCode, action: InputAction) {
        self.unbind_key(key);
        self.key_to_action.insert(key, action);
        self.action_to_keys.entry(action).or_default().push(key);
    }

    /// Remove the binding for a specific key.
    pub fn unbind_key(&mut self, key: KeyCode) {
        if let Some(action) = self.key_to_action.remove(&key)
            && let Some(keys) = self.action_to_keys.get_mut(&action)
        {
            keys.retain(|k| *k != key);
            if keys.is_empty() {
                self.action_to_keys.remove(&action);
            }
        }
    }

    /// Remove every key bound to an action.
    pub fn unbind_action(&mut self, action: InputAction) {
        if let Some(keys) = self.action_to_keys.remove(&action) {
            for key in keys {
                self.key_to_action.remove(&key);
            }
        }
    }

    /// Get the action bound to a physical key, if any.
    pub fn get_action(&self, key: KeyCode) -> Option<InputAction> {
        self.key_to_action.get(&key).copied()
    }

    /// Get the keys bound to a logical action (empty if unbound).
    pub fn get_keys(&self, action: InputAction) -> &[KeyCode] {
        self.action_to_keys.get(&action).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Check if an action is pressed, given a set of pressed keys.
    pub fn is_action_pressed(&self, action: InputAction, pressed_keys: &HashSet<KeyCode>) -> bool {
        self.get_keys(action).iter().any(|k| pressed_keys.contains(k))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_bindings() {
        let bindings = KeyBindings::new();

        assert_eq!(bindings.get_action(KeyCode::W), Some(InputAction::MoveForward));
        assert_eq!(bindings.get_action(KeyCode::ArrowUp), Some(InputAction::MoveForward));
        assert_eq!(bindings.get_action(KeyCode::S), Some(InputAction::MoveBack));
        assert_eq!(bindings.get_action(KeyCode::ArrowLeft), Some(InputAction::TurnLeft));
        assert_eq!(bindings.get_action(KeyCode::D), Some(InputAction::TurnRight));
        assert_eq!(bindings.get_action(KeyCode::Q), Some(InputAction::ToggleFirstPerson));
        assert_eq!(bindings.get_action(KeyCode::E), Some(InputAction::ToggleOverview));
        assert_eq!(bindings.get_action(KeyCode::Space), Some(InputAction::Charge));
        assert_eq!(bindings.get_action(KeyCode::Escape), None);
    }

    #[test]
    fn test_every_action_has_a_default_key() {
        let bindings = KeyBindings::new();
        for action in InputAction::ALL {
            assert!(!bindings.get_keys(action).is_empty(), "{action:?} unbound");
        }
    }

    #[test]
    fn test_rebind_key_moves_it() {
        let mut bindings = KeyBindings::new();

        bindings.bind(KeyCode::W, InputAction::Charge);

        assert_eq!(bindings.get_action(KeyCode::W), Some(InputAction::Charge));
        assert_eq!(bindings.get_keys(InputAction::MoveForward), &[KeyCode::ArrowUp]);
        assert_eq!(bindings.get_keys(InputAction::Charge), &[KeyCode::Space, KeyCode::W]);
    }

    #[test]
    fn test_is_action_pressed() {
        let bindings = KeyBindings::new();

        let mut pressed = HashSet::new();
        pressed.insert(KeyCode::ArrowUp);

        assert!(bindings.is_action_pressed(InputAction::MoveForward, &pressed));
        assert!(!bindings.is_action_pressed(InputAction::MoveBack, &pressed));
    }

    #[test]
    fn test_unbind_action() {
        let mut bindings = KeyBindings::new();

        bindings.unbind_action(InputAction::TurnLeft);

        assert_eq!(bindings.get_action(KeyCode::A), None);
        assert_eq!(bindings.get_action(KeyCode::ArrowLeft), None);
        assert!(bindings.get_keys(InputAction::TurnLeft).is_empty());
    }

    #[test]
    fn test_unbind_last_key() {
        let mut bindings = KeyBindings::new();
        bindings.unbind_key(KeyCode::Q);
        assert!(bindings.get_keys(InputAction::ToggleFirstPerson).is_empty());
    }
}
