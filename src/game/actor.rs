//! Actor
//!
//! One robot in a match: its team, health, physics body, joint rig and
//! animation state. Bodies start static; only the robot whose turn it is
//! gets a dynamic body (with mass, no gravity) so it can walk and be pushed
//! out of walls.

use glam::{Quat, Vec3};

use crate::anim::{AnimEvent, Animator};
use crate::camera::{CameraMode, CameraPose, CameraRig};
use crate::physics::{BodyHandle, BodyKind, PhysicsWorld, RigidBody, Shape};

use super::config::{AimConfig, STARTING_HEALTH, SpawnPoint};
use super::rig::{RobotRig, downed_half_extents, standing_half_extents};
use super::robot_anim::{RobotClip, build_animator};
use super::team::{ActorId, Team};

/// Whether a robot is still in the match.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lifecycle {
    Alive,
    /// Health reached zero; the body stays as a downed obstacle
    Eliminated,
}

/// A robot.
#[derive(Debug, Clone)]
pub struct Actor {
    pub id: ActorId,
    pub team: Team,
    health: u8,
    lifecycle: Lifecycle,
    body: BodyHandle,
    pub rig: RobotRig,
    animator: Animator<RobotClip>,
    /// Set once the collapse finished and the hitbox was swapped
    downed: bool,
}

impl Actor {
    /// Create a robot at `spawn` and register its (static) body in `world`.
    pub fn spawn(id: ActorId, team: Team, spawn: &SpawnPoint, world: &mut PhysicsWorld) -> Self {
        let half_extents = standing_half_extents();
        let body = world.add_body(
            RigidBody::fixed(Shape::Cuboid { half_extents }, Vec3::new(spawn.x, half_extents.y, spawn.z))
                .with_rotation(Quat::from_rotation_y(spawn.yaw))
                .with_gravity_scale(0.0),
        );
        let rig = RobotRig::build(spawn);
        let mut animator = build_animator(&rig.joints);
        animator.play(RobotClip::Rest);

        Self {
            id,
            team,
            health: STARTING_HEALTH,
            lifecycle: Lifecycle::Alive,
            body,
            rig,
            animator,
            downed: false,
        }
    }

    pub fn health(&self) -> u8 {
        self.health
    }

    pub fn lifecycle(&self) -> Lifecycle {
        self.lifecycle
    }

    pub fn is_alive(&self) -> bool {
        self.lifecycle == Lifecycle::Alive
    }

    pub fn body(&self) -> BodyHandle {
        self.body
    }

    /// Whether the collapse finished and the downed hitbox is in place.
    pub fn is_downed(&self) -> bool {
        self.downed
    }

    /// Clip currently playing, if any.
    pub fn current_clip(&self) -> Option<RobotClip> {
        self.animator.current()
    }

    // ============================================================================
    // HEALTH
    // ============================================================================

    /// Take one point of damage. Returns `true` if this eliminated the robot.
    ///
    /// Plays the flinch on a non-lethal hit and the collapse on a lethal one.
    /// Hits on an eliminated robot change nothing.
    pub fn apply_hit(&mut self) -> bool {
        if !self.is_alive() {
            return false;
        }
        self.health = self.health.saturating_sub(1);
        if self.health == 0 {
            self.eliminate();
            true
        } else {
            self.animator.play(RobotClip::Flinch);
            false
        }
    }

    fn eliminate(&mut self) {
        self.lifecycle = Lifecycle::Eliminated;
        self.animator.play(RobotClip::Collapse);
    }

    // ============================================================================
    // ANIMATION
    // ============================================================================

    pub fn rest(&mut self) {
        self.play(RobotClip::Rest);
    }

    pub fn start_moving(&mut self) {
        self.play(RobotClip::StartWalk);
    }

    pub fn stop_moving(&mut self) {
        self.play(RobotClip::StopWalk);
    }

    pub fn enter_aim(&mut self) {
        self.play(RobotClip::Aim);
    }

    pub fn exit_aim(&mut self) {
        self.play(RobotClip::AimToRest);
    }

    pub fn fire(&mut self) {
        self.play(RobotClip::Recoil);
    }

    /// Eliminated robots keep their collapse; everything else is ignored.
    fn play(&mut self, clip: RobotClip) {
        if self.is_alive() {
            self.animator.play(clip);
        }
    }

    /// Advance the animation and swap in the downed hitbox once the collapse ends.
    pub fn advance_animation(&mut self, dt: f32, world: &mut PhysicsWorld) {
        let raising_gun = self.animator.current() == Some(RobotClip::Aim);
        let events = self.animator.advance(dt, &mut self.rig.scene);
        if raising_gun {
            self.rig.add_pitch_to_arm();
        }

        for event in events {
            let AnimEvent::ClipFinished(RobotClip::Collapse) = event else {
                continue;
            };
            if !self.downed {
                let half_extents = downed_half_extents();
                world.set_shape(self.body, Shape::Cuboid { half_extents });
                if let Some(body) = world.body_mut(self.body) {
                    body.position.y = half_extents.y;
                }
                self.downed = true;
                tracing::debug!(actor = self.id.0, "robot downed");
            }
        }
    }

    // ============================================================================
    // BODY
    // ============================================================================

    /// Give this robot a movable body for its turn.
    pub fn activate(&self, world: &mut PhysicsWorld, mass: f32) {
        if let Some(body) = world.body_mut(self.body) {
            body.mass = mass.max(0.001);
        }
        world.set_kind(self.body, BodyKind::Dynamic);
    }

    /// Freeze the body in place.
    pub fn deactivate(&self, world: &mut PhysicsWorld) {
        world.set_kind(self.body, BodyKind::Static);
    }

    /// Drive the body horizontally along the facing direction.
    ///
    /// `direction` is +1 forward, -1 backward, 0 to stop.
    pub fn drive(&self, world: &mut PhysicsWorld, direction: f32, speed: f32) {
        let yaw = self.yaw();
        let velocity = Vec3::new(-yaw.sin(), 0.0, -yaw.cos()) * speed * direction;
        world.set_velocity(self.body, velocity);
    }

    /// Copy the body's ground position into the rig and the rig's facing into the body.
    pub fn sync_from_body(&mut self, world: &mut PhysicsWorld) {
        if let Some(body) = world.body(self.body) {
            let (x, z) = (body.position.x, body.position.z);
            self.rig.set_ground_position(x, z);
        }
        world.set_rotation(self.body, Quat::from_rotation_y(self.yaw()));
    }

    // ============================================================================
    // AIM
    // ============================================================================

    pub fn yaw(&self) -> f32 {
        self.rig.yaw()
    }

    pub fn turn(&mut self, delta: f32) {
        self.rig.set_yaw(self.rig.yaw() + delta);
    }

    pub fn pitch(&self) -> f32 {
        self.rig.pitch()
    }

    /// Raise or lower the aim within the configured limits.
    pub fn adjust_pitch(&mut self, delta: f32, aim: &AimConfig) {
        let target = self.rig.pitch() + delta;
        self.rig.set_pitch(target, aim.min_pitch, aim.max_pitch);
    }

    pub fn reset_pitch(&mut self) {
        self.rig.reset_head();
    }

    pub fn muzzle_position(&self) -> Vec3 {
        self.rig.muzzle_position()
    }

    pub fn position(&self) -> Vec3 {
        self.rig.waist_transform().translation.into()
    }

    /// Camera pose for `mode` mounted on this robot.
    pub fn camera_pose(&self, rig: &CameraRig, mode: CameraMode) -> CameraPose {
        rig.pose(mode, &self.rig.waist_transform(), &self.rig.eye_transform())
    }
}
