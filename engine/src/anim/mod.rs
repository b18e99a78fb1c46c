//! Animation Module
//!
//! Keyframed joint animation over the [`scene`](crate::scene) graph.
//!
//! - [`easing`] - Interpolation curves
//! - [`clip`] - Keyframes, targets and clip end behaviour
//! - [`animator`] - Single-clip player advanced once per tick

pub mod animator;
pub mod clip;
pub mod easing;

pub use animator::{AnimEvent, Animator};
pub use clip::{Clip, ClipEnd, Keyframe, Target};
pub use easing::Easing;
