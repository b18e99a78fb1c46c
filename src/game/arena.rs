//! Arena
//!
//! Static collision geometry of the battlefield: the ground slab, every
//! wall and obstacle, and the kill plane below the map.

use glam::{Quat, Vec3};

use crate::physics::{BodyHandle, PhysicsWorld, RigidBody, Shape};

use super::config::ArenaConfig;

/// Handles to the arena's static bodies.
#[derive(Debug, Clone)]
pub struct Arena {
    pub ground: BodyHandle,
    pub walls: Vec<BodyHandle>,
    pub kill_plane: BodyHandle,
}

impl Arena {
    /// Add the arena's bodies to `world`.
    pub fn build(world: &mut PhysicsWorld, config: &ArenaConfig) -> Self {
        let ground = world.add_body(RigidBody::fixed(
            Shape::Cuboid {
                half_extents: Vec3::new(
                    config.ground_size / 2.0,
                    config.ground_thickness / 2.0,
                    config.ground_size / 2.0,
                ),
            },
            Vec3::new(0.0, -config.ground_thickness / 2.0, 0.0),
        ));

        let walls = config
            .all_walls()
            .iter()
            .map(|wall| {
                world.add_body(
                    RigidBody::fixed(
                        Shape::Cuboid {
                            half_extents: wall.half_extents(),
                        },
                        wall.center(),
                    )
                    .with_rotation(Quat::from_rotation_y(wall.yaw)),
                )
            })
            .collect();

        let kill_plane = world.add_body(RigidBody::fixed(
            Shape::Plane { normal: Vec3::Y },
            Vec3::new(0.0, config.kill_plane_y, 0.0),
        ));

        tracing::debug!(walls = config.all_walls().len(), "arena built");

        Self {
            ground,
            walls,
            kill_plane,
        }
    }

    /// Whether `body` belongs to the arena.
    pub fn contains(&self, body: BodyHandle) -> bool {
        body == self.ground || body == self.kill_plane || self.walls.contains(&body)
    }
}
