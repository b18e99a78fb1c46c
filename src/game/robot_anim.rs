//! Robot animation clips
//!
//! The clip library every robot carries. Clips chain into each other the
//! way the turn flow expects: starting to walk rolls into the walk cycle,
//! stopping and lowering the gun both settle back into the breathing idle,
//! and the collapse holds its final pose forever.

use std::f32::consts::PI;

use crate::anim::{Animator, Clip, ClipEnd, Easing, Keyframe};
use crate::scene::Channel;

use super::rig::{ELBOW_BEND, Joints, SHOULDER_SPREAD, TORSO_REST_Y};

/// Every animation a robot can play.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RobotClip {
    /// Breathing idle loop
    Rest,
    /// First step, rolls into [`RobotClip::Walk`]
    StartWalk,
    /// Walk cycle loop
    Walk,
    /// Legs back together, rolls into [`RobotClip::Rest`]
    StopWalk,
    /// Raise the gun arm and hold
    Aim,
    /// Lower the gun arm, rolls into [`RobotClip::Rest`]
    AimToRest,
    /// Kick after a shot, rolls into [`RobotClip::RecoilRecover`]
    Recoil,
    RecoilRecover,
    /// Non-lethal hit reaction, rolls into [`RobotClip::Rest`]
    Flinch,
    /// Death: fall to the knees and slump, holds the final pose
    Collapse,
}

use Channel::{PositionY, PositionZ, RotationX, RotationY, RotationZ};

const WALK_STEP: f32 = 0.18;

/// Build the animator for one robot.
pub fn build_animator(j: &Joints) -> Animator<RobotClip> {
    let mut animator = Animator::new();

    animator.insert(
        RobotClip::Rest,
        Clip::new(ClipEnd::Loop)
            .with_keyframe(
                Keyframe::new(1.2, Easing::Linear)
                    .target(j.torso, PositionY, TORSO_REST_Y - 0.02)
                    .target(j.right_leg, RotationX, PI / 20.0)
                    .target(j.right_knee, RotationX, -PI / 10.0)
                    .target(j.left_leg, RotationX, PI / 20.0)
                    .target(j.left_knee, RotationX, -PI / 10.0)
                    .target(j.right_shoulder, RotationX, 0.0)
                    .target(j.right_shoulder, RotationZ, SHOULDER_SPREAD)
                    .target(j.right_elbow, RotationX, ELBOW_BEND)
                    .target(j.right_elbow, RotationZ, 0.0),
            )
            .with_keyframe(
                Keyframe::new(1.2, Easing::Linear)
                    .target(j.torso, PositionY, TORSO_REST_Y)
                    .target(j.right_leg, RotationX, 0.0)
                    .target(j.right_knee, RotationX, 0.0)
                    .target(j.left_leg, RotationX, 0.0)
                    .target(j.left_knee, RotationX, 0.0),
            ),
    );

    animator.insert(
        RobotClip::StartWalk,
        Clip::new(ClipEnd::Then(RobotClip::Walk)).with_keyframe(
            stride(j, [PI / 6.0, -PI / 6.0, -PI / 12.0, -PI / 6.0, -PI / 8.0, PI / 8.0], Easing::Linear)
                .target(j.right_shoulder, RotationZ, SHOULDER_SPREAD),
        ),
    );

    animator.insert(
        RobotClip::Walk,
        Clip::new(ClipEnd::Loop)
            .with_keyframe(stride(j, [0.0, 0.0, PI / 6.0, -PI / 3.0, 0.0, 0.0], Easing::QuadIn))
            .with_keyframe(stride(j, [-PI / 12.0, -PI / 6.0, PI / 6.0, -PI / 6.0, PI / 8.0, -PI / 8.0], Easing::Linear))
            .with_keyframe(stride(j, [PI / 6.0, -PI / 3.0, 0.0, 0.0, 0.0, 0.0], Easing::QuadIn))
            .with_keyframe(stride(j, [PI / 6.0, -PI / 6.0, -PI / 12.0, -PI / 6.0, -PI / 8.0, PI / 8.0], Easing::Linear)),
    );

    animator.insert(
        RobotClip::StopWalk,
        Clip::new(ClipEnd::Then(RobotClip::Rest)).with_keyframe(
            Keyframe::new(0.3, Easing::Linear)
                .target(j.right_leg, RotationX, 0.0)
                .target(j.right_knee, RotationX, 0.0)
                .target(j.left_leg, RotationX, 0.0)
                .target(j.left_knee, RotationX, 0.0)
                .target(j.right_shoulder, RotationX, 0.0)
                .target(j.left_shoulder, RotationX, 0.0),
        ),
    );

    animator.insert(
        RobotClip::Aim,
        Clip::new(ClipEnd::Hold).with_keyframe(
            Keyframe::new(0.15, Easing::QuadInOut)
                .target(j.right_leg, RotationX, 0.0)
                .target(j.right_knee, RotationX, 0.0)
                .target(j.left_leg, RotationX, 0.0)
                .target(j.left_knee, RotationX, 0.0)
                .target(j.torso, RotationY, 0.0)
                .target(j.right_shoulder, RotationX, PI / 1.9)
                .target(j.right_shoulder, RotationZ, -PI / 10.0)
                .target(j.right_elbow, RotationX, ELBOW_BEND)
                .target(j.left_shoulder, RotationX, 0.0),
        ),
    );

    animator.insert(
        RobotClip::AimToRest,
        Clip::new(ClipEnd::Then(RobotClip::Rest)).with_keyframe(lower_gun(j, Keyframe::new(0.4, Easing::QuadOut))),
    );

    animator.insert(
        RobotClip::Recoil,
        Clip::new(ClipEnd::Then(RobotClip::RecoilRecover)).with_keyframe(
            Keyframe::new(0.15, Easing::ExpoOut)
                .target(j.torso, RotationY, -PI / 12.0)
                .target(j.right_shoulder, RotationZ, PI / 8.0)
                .target(j.right_elbow, RotationX, PI / 2.0),
        ),
    );

    animator.insert(
        RobotClip::RecoilRecover,
        Clip::new(ClipEnd::Then(RobotClip::Rest))
            .with_keyframe(lower_gun(j, Keyframe::new(0.54, Easing::QuadOut).delayed(0.15))),
    );

    animator.insert(
        RobotClip::Flinch,
        Clip::new(ClipEnd::Then(RobotClip::Rest))
            .with_keyframe(
                Keyframe::new(0.3, Easing::QuarticOut)
                    .target(j.torso, RotationX, PI / 10.0)
                    .target(j.right_shoulder, RotationZ, 0.6 * PI)
                    .target(j.right_elbow, RotationZ, 0.3 * PI)
                    .target(j.left_shoulder, RotationZ, -0.6 * PI)
                    .target(j.left_elbow, RotationZ, -0.3 * PI),
            )
            .with_keyframe(
                Keyframe::new(0.5, Easing::QuadOut)
                    .target(j.torso, RotationX, 0.0)
                    .target(j.right_shoulder, RotationZ, SHOULDER_SPREAD)
                    .target(j.right_elbow, RotationZ, 0.0)
                    .target(j.left_shoulder, RotationZ, -SHOULDER_SPREAD)
                    .target(j.left_elbow, RotationZ, 0.0),
            ),
    );

    animator.insert(
        RobotClip::Collapse,
        Clip::new(ClipEnd::Hold)
            .with_keyframe(
                Keyframe::new(0.85, Easing::Linear)
                    .target(j.waist, PositionY, 0.95)
                    .target(j.right_leg, RotationX, PI / 10.0)
                    .target(j.right_knee, RotationX, -PI / 5.0)
                    .target(j.left_leg, RotationX, PI / 10.0)
                    .target(j.left_knee, RotationX, -PI / 5.0),
            )
            .with_keyframe(
                Keyframe::new(0.4, Easing::BounceOut)
                    .delayed(0.2)
                    .target(j.torso, RotationX, -PI / 10.0)
                    .offset(j.head, PositionY, -0.1)
                    .offset(j.head, PositionZ, -0.25)
                    .target(j.right_shoulder, RotationX, PI / 9.0)
                    .target(j.right_shoulder, RotationZ, 0.0)
                    .target(j.left_shoulder, RotationX, PI / 9.0)
                    .target(j.left_shoulder, RotationZ, 0.0)
                    .target(j.right_elbow, RotationX, 0.0)
                    .target(j.left_elbow, RotationX, 0.0),
            ),
    );

    animator
}

/// One walk pose: right leg, right knee, left leg, left knee, right shoulder, left shoulder (all X).
fn stride(j: &Joints, pose: [f32; 6], easing: Easing) -> Keyframe {
    let [right_leg, right_knee, left_leg, left_knee, right_shoulder, left_shoulder] = pose;
    Keyframe::new(WALK_STEP, easing)
        .target(j.right_leg, RotationX, right_leg)
        .target(j.right_knee, RotationX, right_knee)
        .target(j.left_leg, RotationX, left_leg)
        .target(j.left_knee, RotationX, left_knee)
        .target(j.right_shoulder, RotationX, right_shoulder)
        .target(j.left_shoulder, RotationX, left_shoulder)
}

/// Gun arm back down, torso and head straightened.
fn lower_gun(j: &Joints, keyframe: Keyframe) -> Keyframe {
    keyframe
        .target(j.torso, RotationY, 0.0)
        .target(j.right_shoulder, RotationX, 0.0)
        .target(j.right_shoulder, RotationZ, SHOULDER_SPREAD)
        .target(j.right_elbow, RotationX, ELBOW_BEND)
        .target(j.head, RotationX, 0.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::anim::AnimEvent;
    use crate::game::config::SpawnPoint;
    use crate::game::rig::RobotRig;
    use approx::assert_relative_eq;

    fn setup() -> (RobotRig, Animator<RobotClip>) {
        let rig = RobotRig::build(&SpawnPoint::new(0.0, 0.0, 0.0));
        let animator = build_animator(&rig.joints);
        (rig, animator)
    }

    #[test]
    fn test_every_clip_is_registered() {
        let (_, animator) = setup();
        for clip in [
            RobotClip::Rest,
            RobotClip::StartWalk,
            RobotClip::Walk,
            RobotClip::StopWalk,
            RobotClip::Aim,
            RobotClip::AimToRest,
            RobotClip::Recoil,
            RobotClip::RecoilRecover,
            RobotClip::Flinch,
            RobotClip::Collapse,
        ] {
            assert!(animator.clip(clip).is_some(), "{clip:?} missing");
        }
    }

    #[test]
    fn test_start_walk_rolls_into_walk_cycle() {
        let (mut rig, mut animator) = setup();
        animator.play(RobotClip::StartWalk);
        let events = animator.advance(0.2, &mut rig.scene);
        assert_eq!(events, vec![AnimEvent::ClipFinished(RobotClip::StartWalk)]);
        assert_eq!(animator.current(), Some(RobotClip::Walk));
        for _ in 0..20 {
            assert!(animator.advance(0.1, &mut rig.scene).is_empty());
        }
        assert_eq!(animator.current(), Some(RobotClip::Walk));
    }

    #[test]
    fn test_aim_raises_the_gun_arm_and_holds() {
        let (mut rig, mut animator) = setup();
        animator.play(RobotClip::Aim);
        animator.advance(0.5, &mut rig.scene);
        assert!(!animator.is_playing());
        assert_relative_eq!(rig.scene.get(rig.joints.right_shoulder, RotationX), PI / 1.9, epsilon = 1e-5);
    }

    #[test]
    fn test_recoil_settles_into_rest() {
        let (mut rig, mut animator) = setup();
        animator.play(RobotClip::Recoil);
        let mut finished = Vec::new();
        for _ in 0..20 {
            finished.extend(animator.advance(0.05, &mut rig.scene));
        }
        assert_eq!(
            finished,
            vec![
                AnimEvent::ClipFinished(RobotClip::Recoil),
                AnimEvent::ClipFinished(RobotClip::RecoilRecover)
            ]
        );
        assert_eq!(animator.current(), Some(RobotClip::Rest));
        assert_relative_eq!(rig.scene.get(rig.joints.torso, RotationY), 0.0, epsilon = 1e-5);
    }

    #[test]
    fn test_collapse_finishes_once_and_sinks_waist() {
        let (mut rig, mut animator) = setup();
        animator.play(RobotClip::Collapse);
        let events = animator.advance(2.0, &mut rig.scene);
        assert_eq!(events, vec![AnimEvent::ClipFinished(RobotClip::Collapse)]);
        assert!(animator.advance(1.0, &mut rig.scene).is_empty());
        assert_relative_eq!(rig.scene.get(rig.joints.waist, PositionY), 0.95, epsilon = 1e-5);
    }
}
