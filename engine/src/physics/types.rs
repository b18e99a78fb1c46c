//! Physics types
//!
//! Core mathematical types re-exported from glam, plus the body/shape
//! descriptions shared by the world stepper and the collision tests.

pub use glam::{Quat, Vec3};

/// Stable handle to a body stored in a [`PhysicsWorld`](super::PhysicsWorld).
///
/// Handles are never reused within one world, so a stale handle simply
/// fails to resolve instead of aliasing a newer body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BodyHandle(pub u32);

/// Activation mode of a body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BodyKind {
    /// Inert: never integrated, only collided against.
    #[default]
    Static,
    /// Integrated every step (gravity, velocity) and pushed out of statics.
    Dynamic,
}

/// Collision shape of a body, expressed in the body's local frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Shape {
    /// Sphere centred on the body position.
    Sphere { radius: f32 },
    /// Box centred on the body position, oriented by the body rotation.
    Cuboid { half_extents: Vec3 },
    /// Infinite plane through the body position with the given world normal.
    /// Everything on the negative side is considered inside.
    Plane { normal: Vec3 },
}

impl Shape {
    /// Bounding radius around the body position (infinite for planes).
    pub fn bounding_radius(&self) -> f32 {
        match *self {
            Shape::Sphere { radius } => radius,
            Shape::Cuboid { half_extents } => half_extents.length(),
            Shape::Plane { .. } => f32::INFINITY,
        }
    }
}

/// A rigid body as seen by the stepper.
#[derive(Debug, Clone)]
pub struct RigidBody {
    pub position: Vec3,
    pub rotation: Quat,
    /// Linear velocity (m/s)
    pub velocity: Vec3,
    /// Mass (kg). Static bodies keep their mass but it is ignored.
    pub mass: f32,
    pub kind: BodyKind,
    pub shape: Shape,
    /// Multiplier on world gravity (0 = unaffected)
    pub gravity_scale: f32,
    /// A body this one never generates contacts with (e.g. a projectile's shooter)
    pub ignore: Option<BodyHandle>,
}

impl RigidBody {
    /// Create a static body with the given shape at `position`.
    pub fn fixed(shape: Shape, position: Vec3) -> Self {
        Self {
            position,
            rotation: Quat::IDENTITY,
            velocity: Vec3::ZERO,
            mass: 0.0,
            kind: BodyKind::Static,
            shape,
            gravity_scale: 1.0,
            ignore: None,
        }
    }

    /// Create a dynamic body with the given shape, mass and initial velocity.
    pub fn dynamic(shape: Shape, position: Vec3, mass: f32, velocity: Vec3) -> Self {
        Self {
            position,
            rotation: Quat::IDENTITY,
            velocity,
            mass: mass.max(0.001),
            kind: BodyKind::Dynamic,
            shape,
            gravity_scale: 1.0,
            ignore: None,
        }
    }

    pub fn with_rotation(mut self, rotation: Quat) -> Self {
        self.rotation = rotation;
        self
    }

    pub fn with_gravity_scale(mut self, scale: f32) -> Self {
        self.gravity_scale = scale;
        self
    }

    pub fn ignoring(mut self, other: BodyHandle) -> Self {
        self.ignore = Some(other);
        self
    }

    pub fn is_dynamic(&self) -> bool {
        self.kind == BodyKind::Dynamic
    }
}

/// One contact generated during the last world step.
///
/// `normal` points from `a` towards `b`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Contact {
    pub a: BodyHandle,
    pub b: BodyHandle,
    pub point: Vec3,
    pub normal: Vec3,
    pub depth: f32,
}

impl Contact {
    /// Whether this contact involves `body`.
    pub fn involves(&self, body: BodyHandle) -> bool {
        self.a == body || self.b == body
    }

    /// The body on the other side of the contact from `body`, if `body` is part of it.
    pub fn other(&self, body: BodyHandle) -> Option<BodyHandle> {
        if self.a == body {
            Some(self.b)
        } else if self.b == body {
            Some(self.a)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contact_other() {
        let c = Contact {
            a: BodyHandle(1),
            b: BodyHandle(7),
            point: Vec3::ZERO,
            normal: Vec3::Y,
            depth: 0.1,
        };
        assert_eq!(c.other(BodyHandle(1)), Some(BodyHandle(7)));
        assert_eq!(c.other(BodyHandle(7)), Some(BodyHandle(1)));
        assert_eq!(c.other(BodyHandle(3)), None);
        assert!(c.involves(BodyHandle(7)));
    }

    #[test]
    fn test_dynamic_mass_never_zero() {
        let body = RigidBody::dynamic(Shape::Sphere { radius: 0.2 }, Vec3::ZERO, 0.0, Vec3::ZERO);
        assert!(body.mass > 0.0);
        assert!(body.is_dynamic());
    }
}
