//! Projectiles
//!
//! Spawns shot bodies and turns the world's per-tick contacts into shot
//! outcomes. A projectile resolves in the first tick it touches anything.
//! If any of that tick's contacts is a live robot the shot is a hit, even
//! when it grazed the ground or a wall in the same tick; otherwise (ground,
//! walls, the kill plane, a downed robot) it is a miss. Resolved bodies
//! leave the world immediately, so each shot reports exactly one outcome.

use glam::Vec3;

use crate::physics::{BodyHandle, PhysicsWorld, ShotParams, launch_velocity, projectile_body};

use super::actor::Actor;
use super::config::ProjectileConfig;
use super::team::{ActorId, Team};

/// Identifier of a fired projectile (creation order within the match).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ProjectileId(pub usize);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProjectileState {
    InFlight,
    /// Resolved; the body has been removed from the world
    Spent,
}

/// A fired shot.
#[derive(Debug, Clone)]
pub struct Projectile {
    pub id: ProjectileId,
    pub shooter: ActorId,
    pub team: Team,
    pub body: BodyHandle,
    /// Launch velocity
    pub velocity: Vec3,
    pub state: ProjectileState,
}

/// How a projectile resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProjectileOutcome {
    Hit {
        projectile: ProjectileId,
        shooter: ActorId,
        victim: ActorId,
    },
    Miss {
        projectile: ProjectileId,
        shooter: ActorId,
    },
}

/// Owns every projectile fired in a match.
#[derive(Debug, Clone, Default)]
pub struct ProjectileManager {
    params: ShotParams,
    projectiles: Vec<Projectile>,
}

impl ProjectileManager {
    pub fn new(config: &ProjectileConfig) -> Self {
        Self {
            params: ShotParams {
                radius: config.radius,
                mass: config.mass,
                power_scale: config.power_scale,
            },
            projectiles: Vec::new(),
        }
    }

    /// Launch a shot from `shooter`'s muzzle.
    ///
    /// # Arguments
    /// * `power` - Charge power at release
    /// * `yaw` - Horizontal aim (the shooter's facing)
    /// * `pitch` - Vertical aim (the shooter's head pitch)
    pub fn fire(&mut self, world: &mut PhysicsWorld, shooter: &Actor, power: f32, yaw: f32, pitch: f32) -> ProjectileId {
        let velocity = launch_velocity(power, self.params.power_scale, yaw, pitch);
        let muzzle = shooter.muzzle_position();
        let body = world.add_body(projectile_body(&self.params, muzzle, velocity, shooter.body()));
        let id = ProjectileId(self.projectiles.len());

        tracing::debug!(
            projectile = id.0,
            shooter = shooter.id.0,
            power,
            speed = velocity.length(),
            "projectile launched"
        );

        self.projectiles.push(Projectile {
            id,
            shooter: shooter.id,
            team: shooter.team,
            body,
            velocity,
            state: ProjectileState::InFlight,
        });
        id
    }

    /// Resolve every in-flight projectile that touched something during the last step.
    pub fn collect_outcomes(&mut self, world: &mut PhysicsWorld, actors: &[Actor]) -> Vec<ProjectileOutcome> {
        let mut outcomes = Vec::new();
        for projectile in self.projectiles.iter_mut().filter(|p| p.state == ProjectileState::InFlight) {
            let touched: Vec<BodyHandle> = world.contacts().iter().filter_map(|c| c.other(projectile.body)).collect();
            if touched.is_empty() {
                continue;
            }

            // A live robot anywhere in this tick wins over arena contacts
            let victim = touched
                .iter()
                .find_map(|&other| actors.iter().find(|a| a.body() == other && a.is_alive()));
            outcomes.push(match victim {
                Some(actor) => ProjectileOutcome::Hit {
                    projectile: projectile.id,
                    shooter: projectile.shooter,
                    victim: actor.id,
                },
                None => ProjectileOutcome::Miss {
                    projectile: projectile.id,
                    shooter: projectile.shooter,
                },
            });

            world.remove_body(projectile.body);
            projectile.state = ProjectileState::Spent;
        }
        outcomes
    }

    pub fn get(&self, id: ProjectileId) -> Option<&Projectile> {
        self.projectiles.get(id.0)
    }

    pub fn in_flight(&self) -> impl Iterator<Item = &Projectile> {
        self.projectiles.iter().filter(|p| p.state == ProjectileState::InFlight)
    }

    pub fn in_flight_count(&self) -> usize {
        self.in_flight().count()
    }

    pub fn spent_count(&self) -> usize {
        self.projectiles.len() - self.in_flight_count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::config::SpawnPoint;
    use crate::physics::{RigidBody, Shape, WorldConfig};

    fn setup() -> (PhysicsWorld, Vec<Actor>, ProjectileManager) {
        let mut world = PhysicsWorld::new(WorldConfig::default());
        let shooter = Actor::spawn(ActorId(0), Team::A, &SpawnPoint::new(0.0, 0.0, 0.0), &mut world);
        let target = Actor::spawn(ActorId(1), Team::B, &SpawnPoint::new(0.0, -6.0, 0.0), &mut world);
        let manager = ProjectileManager::new(&ProjectileConfig::default());
        (world, vec![shooter, target], manager)
    }

    fn run(world: &mut PhysicsWorld, actors: &[Actor], manager: &mut ProjectileManager) -> Vec<ProjectileOutcome> {
        for _ in 0..600 {
            world.step(1.0 / 60.0);
            let outcomes = manager.collect_outcomes(world, actors);
            if !outcomes.is_empty() {
                return outcomes;
            }
        }
        Vec::new()
    }

    #[test]
    fn test_flat_shot_hits_robot_in_front() {
        let (mut world, actors, mut manager) = setup();
        let id = manager.fire(&mut world, &actors[0], 10.0, 0.0, 0.0);
        assert_eq!(manager.in_flight_count(), 1);
        let outcomes = run(&mut world, &actors, &mut manager);
        assert_eq!(
            outcomes,
            vec![ProjectileOutcome::Hit {
                projectile: id,
                shooter: ActorId(0),
                victim: ActorId(1)
            }]
        );
        assert_eq!(manager.spent_count(), 1);
        assert!(world.body(manager.get(id).unwrap().body).is_none());
    }

    #[test]
    fn test_shot_into_floor_is_miss() {
        let (mut world, actors, mut manager) = setup();
        world.add_body(RigidBody::fixed(Shape::Plane { normal: Vec3::Y }, Vec3::ZERO));
        let id = manager.fire(&mut world, &actors[0], 2.0, std::f32::consts::PI, 0.0);
        let outcomes = run(&mut world, &actors, &mut manager);
        assert_eq!(
            outcomes,
            vec![ProjectileOutcome::Miss {
                projectile: id,
                shooter: ActorId(0)
            }]
        );
    }

    #[test]
    fn test_robot_contact_beats_ground_in_same_step() {
        // Same build order as a battlefield: arena first, robots after
        let mut world = PhysicsWorld::new(WorldConfig::default());
        world.add_body(RigidBody::fixed(Shape::Plane { normal: Vec3::Y }, Vec3::ZERO));
        let shooter = Actor::spawn(ActorId(0), Team::A, &SpawnPoint::new(0.0, 0.0, 0.0), &mut world);
        let target = Actor::spawn(ActorId(1), Team::B, &SpawnPoint::new(0.0, -6.0, 0.0), &mut world);
        let actors = vec![shooter, target];
        let mut manager = ProjectileManager::new(&ProjectileConfig::default());

        // Drop the shot against the target's front face, low enough to touch the floor too
        let id = manager.fire(&mut world, &actors[0], 1.0, 0.0, 0.0);
        let body = manager.get(id).unwrap().body;
        world.body_mut(body).unwrap().position = Vec3::new(0.0, 0.1, -5.7);
        world.set_velocity(body, Vec3::ZERO);

        world.step(1.0 / 60.0);
        let touched = world.contacts().iter().filter(|c| c.involves(body)).count();
        assert!(touched >= 2, "shot should touch floor and robot, got {touched}");

        let outcomes = manager.collect_outcomes(&mut world, &actors);
        assert_eq!(
            outcomes,
            vec![ProjectileOutcome::Hit {
                projectile: id,
                shooter: ActorId(0),
                victim: ActorId(1)
            }]
        );
        assert!(manager.collect_outcomes(&mut world, &actors).is_empty());
        assert_eq!(manager.in_flight_count(), 0);
    }

    #[test]
    fn test_shooter_is_never_hit_by_own_shot() {
        let (mut world, actors, mut manager) = setup();
        manager.fire(&mut world, &actors[0], 0.5, 0.0, 0.0);
        world.step(1.0 / 60.0);
        assert!(manager.collect_outcomes(&mut world, &actors).is_empty());
        assert_eq!(manager.in_flight_count(), 1);
    }
}
