//! Physics World
//!
//! A small fixed-step rigid-body stepper. It owns every body in the match,
//! integrates dynamic bodies (gravity + velocity), generates contacts for
//! each overlapping pair that involves at least one dynamic body, and pushes
//! dynamic boxes out of whatever they overlap.
//!
//! Contacts are kept until the next call to [`PhysicsWorld::step`], so
//! callers can scan "this tick's contacts" after stepping.

use std::collections::BTreeMap;

use glam::{Quat, Vec3};

use super::collision::collide;
use super::types::{BodyHandle, BodyKind, Contact, RigidBody, Shape};

/// Global parameters of the world.
#[derive(Debug, Clone, Copy)]
pub struct WorldConfig {
    /// Gravity acceleration (m/s²)
    pub gravity: Vec3,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            gravity: Vec3::new(0.0, -9.81, 0.0),
        }
    }
}

/// Owns bodies and the contacts of the most recent step.
#[derive(Debug, Clone, Default)]
pub struct PhysicsWorld {
    config: WorldConfig,
    bodies: BTreeMap<BodyHandle, RigidBody>,
    contacts: Vec<Contact>,
    next_handle: u32,
}

impl PhysicsWorld {
    pub fn new(config: WorldConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    pub fn config(&self) -> &WorldConfig {
        &self.config
    }

    /// Add a body and return its handle.
    pub fn add_body(&mut self, body: RigidBody) -> BodyHandle {
        let handle = BodyHandle(self.next_handle);
        self.next_handle += 1;
        self.bodies.insert(handle, body);
        handle
    }

    /// Remove a body. Returns the removed body if the handle was live.
    pub fn remove_body(&mut self, handle: BodyHandle) -> Option<RigidBody> {
        self.bodies.remove(&handle)
    }

    pub fn body(&self, handle: BodyHandle) -> Option<&RigidBody> {
        self.bodies.get(&handle)
    }

    pub fn body_mut(&mut self, handle: BodyHandle) -> Option<&mut RigidBody> {
        self.bodies.get_mut(&handle)
    }

    pub fn body_count(&self) -> usize {
        self.bodies.len()
    }

    /// Number of bodies currently in [`BodyKind::Dynamic`] mode.
    pub fn dynamic_count(&self) -> usize {
        self.bodies.values().filter(|b| b.is_dynamic()).count()
    }

    /// Switch a body between static and dynamic. Going static also zeroes
    /// its velocity so it stays exactly where it was.
    pub fn set_kind(&mut self, handle: BodyHandle, kind: BodyKind) {
        if let Some(body) = self.bodies.get_mut(&handle) {
            body.kind = kind;
            if kind == BodyKind::Static {
                body.velocity = Vec3::ZERO;
            }
        }
    }

    /// Replace a body's collision shape (e.g. a robot collapsing to a downed hitbox).
    pub fn set_shape(&mut self, handle: BodyHandle, shape: Shape) {
        if let Some(body) = self.bodies.get_mut(&handle) {
            body.shape = shape;
        }
    }

    pub fn set_velocity(&mut self, handle: BodyHandle, velocity: Vec3) {
        if let Some(body) = self.bodies.get_mut(&handle) {
            body.velocity = velocity;
        }
    }

    pub fn set_rotation(&mut self, handle: BodyHandle, rotation: Quat) {
        if let Some(body) = self.bodies.get_mut(&handle) {
            body.rotation = rotation;
        }
    }

    /// Contacts generated by the most recent [`step`](Self::step).
    pub fn contacts(&self) -> &[Contact] {
        &self.contacts
    }

    /// Advance the simulation by `dt` seconds.
    ///
    /// 1. Integrate dynamic bodies (semi-implicit Euler).
    /// 2. Generate contacts for every overlapping pair with at least one
    ///    dynamic member, skipping pairs that ignore each other.
    /// 3. Push dynamic boxes out of their overlaps (spheres are left in place
    ///    so their contact is observable this tick).
    pub fn step(&mut self, dt: f32) {
        let gravity = self.config.gravity;
        for body in self.bodies.values_mut() {
            if body.kind != BodyKind::Dynamic {
                continue;
            }
            body.velocity += gravity * body.gravity_scale * dt;
            body.position += body.velocity * dt;
        }

        self.contacts.clear();
        let handles: Vec<BodyHandle> = self.bodies.keys().copied().collect();
        for (i, &ha) in handles.iter().enumerate() {
            for &hb in &handles[i + 1..] {
                let (a, b) = (&self.bodies[&ha], &self.bodies[&hb]);
                if !a.is_dynamic() && !b.is_dynamic() {
                    continue;
                }
                if a.ignore == Some(hb) || b.ignore == Some(ha) {
                    continue;
                }
                if let Some(m) = collide(a, b) {
                    self.contacts.push(Contact {
                        a: ha,
                        b: hb,
                        point: m.point,
                        normal: m.normal,
                        depth: m.depth,
                    });
                }
            }
        }

        let contacts = std::mem::take(&mut self.contacts);
        for contact in &contacts {
            self.resolve_penetration(contact);
        }
        self.contacts = contacts;
    }

    fn resolve_penetration(&mut self, contact: &Contact) {
        let pushable = |body: &RigidBody| body.is_dynamic() && matches!(body.shape, Shape::Cuboid { .. });

        let a_push = self.bodies.get(&contact.a).is_some_and(pushable);
        let b_push = self.bodies.get(&contact.b).is_some_and(pushable);
        let share = match (a_push, b_push) {
            (true, true) => 0.5,
            (true, false) | (false, true) => 1.0,
            (false, false) => return,
        };

        let correction = contact.normal * contact.depth * share;
        if a_push && let Some(a) = self.bodies.get_mut(&contact.a) {
            a.position -= correction;
            let into = a.velocity.dot(contact.normal);
            if into > 0.0 {
                a.velocity -= contact.normal * into;
            }
        }
        if b_push && let Some(b) = self.bodies.get_mut(&contact.b) {
            b.position += correction;
            let into = b.velocity.dot(-contact.normal);
            if into > 0.0 {
                b.velocity += contact.normal * into;
            }
        }
    }
}
