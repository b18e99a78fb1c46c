//! Battlefield
//!
//! Everything physical in a match: the world, the arena, every robot, the
//! team rosters and the projectiles in flight.

use glam::Vec3;

use crate::physics::{PhysicsWorld, WorldConfig};

use super::actor::Actor;
use super::arena::Arena;
use super::config::{ConfigError, GameConfig, TEAM_COUNT};
use super::projectile::ProjectileManager;
use super::team::{ActorId, Rosters, Team};

#[derive(Debug, Clone)]
pub struct Battlefield {
    pub world: PhysicsWorld,
    pub arena: Arena,
    pub actors: Vec<Actor>,
    pub rosters: Rosters,
    pub projectiles: ProjectileManager,
}

impl Battlefield {
    /// Build the arena and place `team_size * 2` robots on the first spawn slots.
    ///
    /// Slot `i` goes to [`Team::for_slot`]`(i)`, so teams alternate A, B, A, B.
    pub fn new(config: &GameConfig) -> Result<Self, ConfigError> {
        config.validate()?;

        let mut world = PhysicsWorld::new(WorldConfig {
            gravity: Vec3::new(0.0, config.physics.gravity, 0.0),
        });
        let arena = Arena::build(&mut world, &config.arena);

        let count = config.turn.team_size * TEAM_COUNT;
        let mut actors = Vec::with_capacity(count);
        let mut rosters = Rosters::new();
        for (slot, spawn) in config.arena.spawns.iter().take(count).enumerate() {
            let id = ActorId(slot);
            let team = Team::for_slot(slot);
            actors.push(Actor::spawn(id, team, spawn, &mut world));
            rosters.get_mut(team).push(id);
        }

        tracing::info!(robots = actors.len(), team_size = config.turn.team_size, "battlefield ready");

        Ok(Self {
            world,
            arena,
            actors,
            rosters,
            projectiles: ProjectileManager::new(&config.projectile),
        })
    }

    pub fn actor(&self, id: ActorId) -> Option<&Actor> {
        self.actors.get(id.0)
    }

    pub fn actor_mut(&mut self, id: ActorId) -> Option<&mut Actor> {
        self.actors.get_mut(id.0)
    }

    /// Advance every robot's animation.
    pub fn advance_animations(&mut self, dt: f32) {
        for actor in &mut self.actors {
            actor.advance_animation(dt, &mut self.world);
        }
    }

    /// Living robots of `team`.
    pub fn alive_count(&self, team: Team) -> usize {
        self.rosters.get(team).len()
    }
}
