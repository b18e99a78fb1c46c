//! Input Module
//!
//! Platform-agnostic keyboard input. Key codes are decoupled from any
//! specific windowing system; `winit` keys enter through a small bridge.
//!
//! # Example
//!
//! ```rust,ignore
//! use woborms_engine::input::{InputQueue, KeyBindings, KeyCode};
//!
//! let mut queue = InputQueue::new(KeyBindings::new());
//! queue.handle_key(KeyCode::Q, true);
//! for event in queue.drain() {
//!     // hand to the turn controller
//! }
//! ```

pub mod bindings;
pub mod keyboard;
pub mod queue;

pub use bindings::{InputAction, KeyBindings};
pub use keyboard::KeyCode;
pub use queue::{InputEvent, InputQueue};
