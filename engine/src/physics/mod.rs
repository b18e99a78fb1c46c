//! Physics module
//!
//! Custom rigid-body physics for the arena, built without an external
//! physics library.
//!
//! # Unit System
//!
//! **1 unit = 1 meter** (SI units throughout)
//!
//! # Submodules
//!
//! - [`types`] - Bodies, shapes, handles and contacts
//! - [`collision`] - Narrow-phase sphere/box/plane overlap tests
//! - [`world`] - Fixed-step stepper with per-tick contact lists
//! - [`ballistics`] - Launch velocity from charge power and aim angles

pub mod ballistics;
pub mod collision;
pub mod types;
pub mod world;

pub use ballistics::{ShotParams, launch_velocity, projectile_body};
pub use collision::{Manifold, collide};
pub use types::{BodyHandle, BodyKind, Contact, Quat, RigidBody, Shape, Vec3};
pub use world::{PhysicsWorld, WorldConfig};
