//! Ballistics for charged shots
//!
//! Converts a charge level and two aim angles into a launch velocity, and
//! builds the projectile body that carries it.
//!
//! # Angle conventions
//!
//! - `yaw` (horizontal angle) is the robot's rotation around +Y. At yaw 0 the
//!   robot faces -Z, matching the camera forward convention.
//! - `pitch` (vertical angle) is positive upward.
//!
//! # Example
//!
//! ```ignore
//! use woborms_engine::physics::ballistics::{launch_velocity, ShotParams};
//!
//! let v = launch_velocity(10.0, 3.6, 0.0, 0.0);
//! assert_eq!(v, glam::Vec3::new(0.0, 0.0, -36.0));
//! ```

use glam::Vec3;

use super::types::{BodyHandle, RigidBody, Shape};

/// Physical description of a fired projectile.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShotParams {
    /// Radius of the projectile sphere (meters)
    pub radius: f32,
    /// Mass of the projectile (kilograms)
    pub mass: f32,
    /// Multiplier from charge power to launch speed (m/s per power unit)
    pub power_scale: f32,
}

impl Default for ShotParams {
    fn default() -> Self {
        Self {
            radius: 0.2,
            mass: 1.0,
            power_scale: 3.6,
        }
    }
}

/// Compute the launch velocity for a shot.
///
/// The effective speed is `power * power_scale`. The vertical angle splits
/// it into an upward component (`sin`) and a horizontal projection (`cos`);
/// the horizontal angle then rotates that projection around +Y.
///
/// # Arguments
/// * `power` - Charge power at release
/// * `power_scale` - Speed per unit of power
/// * `yaw` - Horizontal aim angle (radians, 0 = facing -Z)
/// * `pitch` - Vertical aim angle (radians, positive = up)
pub fn launch_velocity(power: f32, power_scale: f32, yaw: f32, pitch: f32) -> Vec3 {
    let effective = power * power_scale;
    let vertical = effective * pitch.sin();
    let projection = effective * pitch.cos();
    Vec3::new(-projection * yaw.sin(), vertical, -projection * yaw.cos())
}

/// Build the dynamic body for a projectile leaving `muzzle` with `velocity`.
///
/// The body ignores `shooter` so a shot leaving the barrel never registers
/// against the robot that fired it.
pub fn projectile_body(params: &ShotParams, muzzle: Vec3, velocity: Vec3, shooter: BodyHandle) -> RigidBody {
    RigidBody::dynamic(Shape::Sphere { radius: params.radius }, muzzle, params.mass, velocity).ignoring(shooter)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::{FRAC_PI_2, FRAC_PI_6};

    #[test]
    fn test_shot_params_default() {
        let p = ShotParams::default();
        assert_eq!(p.radius, 0.2);
        assert_eq!(p.mass, 1.0);
        assert_eq!(p.power_scale, 3.6);
    }

    #[test]
    fn test_level_shot_forward() {
        let v = launch_velocity(10.0, 3.6, 0.0, 0.0);
        assert!((v.z + 36.0).abs() < 1e-4);
        assert!(v.x.abs() < 1e-4);
        assert!(v.y.abs() < 1e-4);
    }

    #[test]
    fn test_speed_matches_power() {
        let v = launch_velocity(5.0, 3.6, 1.3, 0.4);
        assert!((v.length() - 18.0).abs() < 1e-3);
    }

    #[test]
    fn test_pitch_splits_vertical_component() {
        let v = launch_velocity(2.0, 1.0, 0.0, FRAC_PI_6);
        assert!((v.y - 1.0).abs() < 1e-5);
        assert!((v.z + 3.0_f32.sqrt()).abs() < 1e-5);
    }

    #[test]
    fn test_yaw_quarter_turn_faces_minus_x() {
        let v = launch_velocity(1.0, 1.0, FRAC_PI_2, 0.0);
        assert!((v.x + 1.0).abs() < 1e-5);
        assert!(v.z.abs() < 1e-5);
    }

    #[test]
    fn test_projectile_body_ignores_shooter() {
        let body = projectile_body(&ShotParams::default(), Vec3::Y, Vec3::X, BodyHandle(4));
        assert_eq!(body.ignore, Some(BodyHandle(4)));
        assert!(body.is_dynamic());
        assert_eq!(body.shape, Shape::Sphere { radius: 0.2 });
    }
}
