//! Robot Rig
//!
//! Builds the joint hierarchy of one robot as a [`SceneGraph`]:
//!
//! ```text
//! waist (root, chase camera mount)
//! ├── torso
//! │   ├── head ── eye (first-person camera mount)
//! │   ├── left_shoulder ── left_elbow
//! │   └── right_shoulder ── right_elbow ── muzzle
//! ├── left_leg ── left_knee
//! └── right_leg ── right_knee
//! ```
//!
//! The waist sits at hip height; its yaw is the robot's facing. The head's
//! X rotation is the aim pitch.

use glam::{Affine3A, Vec3};

use crate::scene::{Channel, NodeId, SceneGraph};

use super::config::SpawnPoint;

// Body dimensions (meters)
pub const TORSO_WIDTH: f32 = 0.6;
pub const TORSO_HEIGHT: f32 = 1.0;
pub const TORSO_DEPTH: f32 = 0.45;
pub const HEAD_RADIUS: f32 = 0.35;
pub const HEAD_SINK: f32 = 0.1;
pub const LEG_WIDTH: f32 = 0.25;
pub const LEG_HEIGHT: f32 = 0.5;
pub const ARM_WIDTH: f32 = 0.18;
pub const ARM_HEIGHT: f32 = 0.45;
pub const JOINT_RADIUS: f32 = 0.135;
/// Distance from the end of the lower arm to the barrel tip
pub const MUZZLE_REACH: f32 = 0.22;

/// Rest angles
pub const SHOULDER_SPREAD: f32 = std::f32::consts::PI / 20.0;
pub const ELBOW_BEND: f32 = std::f32::consts::PI / 15.0;
/// Torso height above the waist at rest
pub const TORSO_REST_Y: f32 = TORSO_HEIGHT / 2.0;

/// Half extents of a standing robot's collision box.
pub fn standing_half_extents() -> Vec3 {
    Vec3::new(
        (TORSO_WIDTH + 2.0 * ARM_WIDTH) / 2.0,
        (2.0 * LEG_HEIGHT + TORSO_HEIGHT + 2.0 * HEAD_RADIUS - HEAD_SINK) / 2.0,
        TORSO_DEPTH / 2.0,
    )
}

/// Half extents of a collapsed robot's collision box.
pub fn downed_half_extents() -> Vec3 {
    Vec3::new(0.45, 0.96, 0.45)
}

/// Handles to every joint of a robot rig.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Joints {
    pub waist: NodeId,
    pub torso: NodeId,
    pub head: NodeId,
    pub eye: NodeId,
    pub left_leg: NodeId,
    pub left_knee: NodeId,
    pub right_leg: NodeId,
    pub right_knee: NodeId,
    pub left_shoulder: NodeId,
    pub left_elbow: NodeId,
    pub right_shoulder: NodeId,
    pub right_elbow: NodeId,
    pub muzzle: NodeId,
}

/// Scene graph of one robot plus its joint handles.
#[derive(Debug, Clone)]
pub struct RobotRig {
    pub scene: SceneGraph,
    pub joints: Joints,
}

impl RobotRig {
    /// Build a rig standing at `spawn`.
    pub fn build(spawn: &SpawnPoint) -> Self {
        let mut scene = SceneGraph::new();

        let waist = scene.add_root("waist", Vec3::new(spawn.x, 2.0 * LEG_HEIGHT, spawn.z));
        scene.set(waist, Channel::RotationY, spawn.yaw);

        let torso = scene.add_child(waist, "torso", Vec3::new(0.0, TORSO_REST_Y, 0.0));
        let head = scene.add_child(
            torso,
            "head",
            Vec3::new(0.0, TORSO_HEIGHT / 2.0 + HEAD_RADIUS - HEAD_SINK, 0.0),
        );
        let eye = scene.add_child(head, "eye", Vec3::ZERO);

        let hip_x = TORSO_WIDTH / 2.0 - LEG_WIDTH / 2.0;
        let left_leg = scene.add_child(waist, "left_leg", Vec3::new(-hip_x, 0.0, 0.0));
        let left_knee = scene.add_child(left_leg, "left_knee", Vec3::new(0.0, -LEG_HEIGHT, 0.0));
        let right_leg = scene.add_child(waist, "right_leg", Vec3::new(hip_x, 0.0, 0.0));
        let right_knee = scene.add_child(right_leg, "right_knee", Vec3::new(0.0, -LEG_HEIGHT, 0.0));

        let shoulder_x = TORSO_WIDTH / 2.0 + JOINT_RADIUS - 0.05;
        let shoulder_y = TORSO_HEIGHT / 2.0 - 0.075;
        let left_shoulder = scene.add_child(torso, "left_shoulder", Vec3::new(-shoulder_x, shoulder_y, 0.0));
        let left_elbow = scene.add_child(left_shoulder, "left_elbow", Vec3::new(0.0, -ARM_HEIGHT, 0.0));
        let right_shoulder = scene.add_child(torso, "right_shoulder", Vec3::new(shoulder_x, shoulder_y, 0.0));
        let right_elbow = scene.add_child(right_shoulder, "right_elbow", Vec3::new(0.0, -ARM_HEIGHT, 0.0));
        let muzzle = scene.add_child(right_elbow, "muzzle", Vec3::new(0.0, -ARM_HEIGHT - MUZZLE_REACH, 0.0));

        scene.set(left_shoulder, Channel::RotationZ, -SHOULDER_SPREAD);
        scene.set(right_shoulder, Channel::RotationZ, SHOULDER_SPREAD);
        scene.set(left_elbow, Channel::RotationX, ELBOW_BEND);
        scene.set(right_elbow, Channel::RotationX, ELBOW_BEND);

        Self {
            scene,
            joints: Joints {
                waist,
                torso,
                head,
                eye,
                left_leg,
                left_knee,
                right_leg,
                right_knee,
                left_shoulder,
                left_elbow,
                right_shoulder,
                right_elbow,
                muzzle,
            },
        }
    }

    /// Facing angle around +Y.
    pub fn yaw(&self) -> f32 {
        self.scene.get(self.joints.waist, Channel::RotationY)
    }

    pub fn set_yaw(&mut self, yaw: f32) {
        self.scene.set(self.joints.waist, Channel::RotationY, yaw);
    }

    /// Aim elevation (head pitch).
    pub fn pitch(&self) -> f32 {
        self.scene.get(self.joints.head, Channel::RotationX)
    }

    /// Set the aim elevation to `pitch` clamped into `[min, max]`.
    ///
    /// The right shoulder follows by the same amount so the barrel tracks the view.
    pub fn set_pitch(&mut self, pitch: f32, min: f32, max: f32) {
        let current = self.pitch();
        let clamped = pitch.clamp(min, max);
        let delta = clamped - current;
        self.scene.set(self.joints.head, Channel::RotationX, clamped);
        let shoulder = self.scene.get(self.joints.right_shoulder, Channel::RotationX);
        self.scene.set(self.joints.right_shoulder, Channel::RotationX, shoulder + delta);
    }

    /// Put the aim pitch back on top of an animated shoulder angle.
    ///
    /// Clips write the shoulder absolutely, which drops any pitch added by [`set_pitch`](Self::set_pitch).
    pub fn add_pitch_to_arm(&mut self) {
        let shoulder = self.scene.get(self.joints.right_shoulder, Channel::RotationX);
        self.scene.set(self.joints.right_shoulder, Channel::RotationX, shoulder + self.pitch());
    }

    /// Reset the head pitch without touching the arm.
    pub fn reset_head(&mut self) {
        self.scene.set(self.joints.head, Channel::RotationX, 0.0);
    }

    /// Ground position of the waist (x, z).
    pub fn ground_position(&self) -> (f32, f32) {
        let node = self.scene.node(self.joints.waist);
        node.map_or((0.0, 0.0), |n| (n.translation.x, n.translation.z))
    }

    pub fn set_ground_position(&mut self, x: f32, z: f32) {
        self.scene.set(self.joints.waist, Channel::PositionX, x);
        self.scene.set(self.joints.waist, Channel::PositionZ, z);
    }

    pub fn waist_transform(&self) -> Affine3A {
        self.scene.world_transform(self.joints.waist)
    }

    pub fn eye_transform(&self) -> Affine3A {
        self.scene.world_transform(self.joints.eye)
    }

    /// World position of the barrel tip, where shots leave.
    pub fn muzzle_position(&self) -> Vec3 {
        self.scene.world_position(self.joints.muzzle)
    }
}
