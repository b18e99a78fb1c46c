//! Input Queue
//!
//! Collects key events between frames as logical [`InputEvent`]s. The frame
//! loop drains the queue once per frame and hands each event to the game.
//!
//! Held state is tracked per key and per action:
//! - a press of a key that is already down (OS auto-repeat) is dropped;
//! - an action is reported pressed when its first bound key goes down and
//!   released when its last bound key comes up.

use std::collections::{HashMap, HashSet, VecDeque};

use super::{InputAction, KeyBindings, KeyCode};

/// One logical edge of an action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InputEvent {
    pub action: InputAction,
    pub pressed: bool,
}

impl InputEvent {
    pub fn press(action: InputAction) -> Self {
        Self { action, pressed: true }
    }

    pub fn release(action: InputAction) -> Self {
        Self { action, pressed: false }
    }
}

/// FIFO of logical input events with repeat filtering.
#[derive(Debug, Clone, Default)]
pub struct InputQueue {
    bindings: KeyBindings,
    keys_down: HashSet<KeyCode>,
    /// Number of bound keys currently held per action
    held: HashMap<InputAction, u32>,
    events: VecDeque<InputEvent>,
}

impl InputQueue {
    pub fn new(bindings: KeyBindings) -> Self {
        Self {
            bindings,
            ..Self::default()
        }
    }

    pub fn bindings(&self) -> &KeyBindings {
        &self.bindings
    }

    /// Feed one physical key edge.
    pub fn handle_key(&mut self, key: KeyCode, pressed: bool) {
        let Some(action) = self.bindings.get_action(key) else {
            return;
        };

        if pressed {
            if !self.keys_down.insert(key) {
                return;
            }
            let count = self.held.entry(action).or_insert(0);
            *count += 1;
            if *count == 1 {
                self.events.push_back(InputEvent::press(action));
            }
        } else {
            if !self.keys_down.remove(&key) {
                return;
            }
            let count = self.held.entry(action).or_insert(1);
            *count = count.saturating_sub(1);
            if *count == 0 {
                self.held.remove(&action);
                self.events.push_back(InputEvent::release(action));
            }
        }
    }

    /// Feed a winit key edge.
    pub fn handle_winit_key(&mut self, key: winit::keyboard::PhysicalKey, pressed: bool) {
        self.handle_key(KeyCode::from_physical(key), pressed);
    }

    /// Queue a logical event directly (scripted input, tests).
    pub fn push(&mut self, event: InputEvent) {
        self.events.push_back(event);
    }

    /// Whether an action currently has at least one key held.
    pub fn is_held(&self, action: InputAction) -> bool {
        self.held.contains_key(&action)
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Take every queued event in arrival order.
    pub fn drain(&mut self) -> Vec<InputEvent> {
        self.events.drain(..).collect()
    }
}
