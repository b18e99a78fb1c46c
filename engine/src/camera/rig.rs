//! Camera Rig
//!
//! Produces eye/target poses for each [`CameraMode`]. Chase and first-person
//! poses are derived from scene transforms (the robot root and its head), so
//! they always follow the robot's current orientation.

use glam::{Affine3A, Vec3};
use serde::{Deserialize, Serialize};

use super::view::CameraMode;

/// Where a camera sits and what it looks at.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraPose {
    pub eye: Vec3,
    pub target: Vec3,
    pub up: Vec3,
}

impl CameraPose {
    /// Unit view direction.
    pub fn forward(&self) -> Vec3 {
        (self.target - self.eye).normalize_or_zero()
    }
}

/// Camera placement parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraRigConfig {
    /// Chase camera offset in the robot root's local space
    pub chase_offset: Vec3,
    /// Point the chase camera looks at, in the robot root's local space
    pub chase_look_at: Vec3,
    /// Height of the overview camera above the arena centre
    pub overview_height: f32,
}

impl Default for CameraRigConfig {
    fn default() -> Self {
        Self {
            chase_offset: Vec3::new(0.0, 2.8, 5.5),
            chase_look_at: Vec3::new(0.0, 0.0, -9.0),
            overview_height: 68.0,
        }
    }
}

/// Stateless pose builder.
#[derive(Debug, Clone, Copy, Default)]
pub struct CameraRig {
    pub config: CameraRigConfig,
}

impl CameraRig {
    pub fn new(config: CameraRigConfig) -> Self {
        Self { config }
    }

    /// Camera behind the robot, derived from the robot root's world transform.
    pub fn chase(&self, root: &Affine3A) -> CameraPose {
        CameraPose {
            eye: root.transform_point3(self.config.chase_offset),
            target: root.transform_point3(self.config.chase_look_at),
            up: Vec3::Y,
        }
    }

    /// Camera at the head, looking down the head's local -Z axis.
    pub fn first_person(&self, head: &Affine3A) -> CameraPose {
        CameraPose {
            eye: head.transform_point3(Vec3::ZERO),
            target: head.transform_point3(Vec3::NEG_Z),
            up: head.transform_vector3(Vec3::Y).normalize_or_zero(),
        }
    }

    /// Top-down camera over the arena origin. Up is -Z so the view is not degenerate.
    pub fn overview(&self) -> CameraPose {
        CameraPose {
            eye: Vec3::new(0.0, self.config.overview_height, 0.0),
            target: Vec3::ZERO,
            up: Vec3::NEG_Z,
        }
    }

    /// Pose for `mode` given the acting robot's root and head transforms.
    pub fn pose(&self, mode: CameraMode, root: &Affine3A, head: &Affine3A) -> CameraPose {
        match mode {
            CameraMode::Chase => self.chase(root),
            CameraMode::FirstPerson => self.first_person(head),
            CameraMode::Overview => self.overview(),
        }
    }
}
