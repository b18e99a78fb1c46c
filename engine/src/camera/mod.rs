//! Camera Module
//!
//! Decides which camera is shown and where it sits.
//! This module is window-system agnostic - it only deals with camera state and math.

pub mod rig;
pub mod view;

pub use rig::{CameraPose, CameraRig, CameraRigConfig};
pub use view::{CameraMode, ViewSelector};
