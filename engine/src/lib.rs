//! Woborms Engine Library
//!
//! A headless engine for a turn-based robot artillery game. It provides the
//! pieces a match is built from; drawing is left to whatever consumes the
//! per-frame snapshots.
//!
//! # Modules
//!
//! - [`physics`] - Fixed-step rigid bodies, contacts and shot ballistics
//! - [`scene`] - Named transform hierarchies (robot rigs)
//! - [`anim`] - Keyframed joint animation over a scene graph
//! - [`camera`] - View selection and chase/first-person/overview poses
//! - [`input`] - Platform-agnostic keys, bindings and the input queue
//! - [`time`] - Frame-driven cancellable timers
//! - [`game`] - Woborms rules: robots, turns, projectiles, app flow
//!
//! # Example
//!
//! ```ignore
//! use woborms_engine::game::{GameConfig, Match};
//! use woborms_engine::input::KeyCode;
//!
//! let mut game = Match::new(GameConfig::default())?;
//!
//! // Feed window-system keys, then run a frame
//! game.input_mut().handle_key(KeyCode::Q, true);
//! let snapshot = game.frame(1.0 / 60.0);
//! assert_eq!(snapshot.hud.countdown, "20");
//! ```

pub mod anim;
pub mod camera;
pub mod input;
pub mod physics;
pub mod scene;
pub mod time;

// Game-specific modules (located in src/game/ directory)
#[path = "../../src/game/mod.rs"]
pub mod game;

// Re-export commonly used input types
pub use input::{InputAction, InputEvent, InputQueue, KeyBindings, KeyCode};
// Re-export the match entry points
pub use game::{App, GameConfig, Match};
