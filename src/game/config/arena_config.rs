//! Arena Configuration
//!
//! Layout of the battlefield: ground slab, boundary walls, obstacles, the
//! kill plane that catches shots leaving the map, and robot spawn points.
//! `Default` reproduces the classic Woborms map, with round turrets
//! approximated by square pillars.

use std::f32::consts::{FRAC_PI_2, FRAC_PI_4, PI};

use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Where a robot starts and which way it faces.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct SpawnPoint {
    pub x: f32,
    pub z: f32,
    /// Initial yaw (radians, 0 = facing -Z)
    pub yaw: f32,
}

impl SpawnPoint {
    pub const fn new(x: f32, z: f32, yaw: f32) -> Self {
        Self { x, z, yaw }
    }
}

/// A static box obstacle standing on the ground.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct WallConfig {
    /// Centre of the footprint on the ground
    pub x: f32,
    pub z: f32,
    /// Full width along the wall's local X
    pub width: f32,
    /// Full height
    pub height: f32,
    /// Full depth along the wall's local Z
    pub depth: f32,
    /// Rotation around +Y (radians)
    pub yaw: f32,
}

impl WallConfig {
    pub const fn new(x: f32, z: f32, width: f32, height: f32, depth: f32, yaw: f32) -> Self {
        Self {
            x,
            z,
            width,
            height,
            depth,
            yaw,
        }
    }

    pub fn half_extents(&self) -> Vec3 {
        Vec3::new(self.width / 2.0, self.height / 2.0, self.depth / 2.0)
    }

    pub fn center(&self) -> Vec3 {
        Vec3::new(self.x, self.height / 2.0, self.z)
    }
}

/// Central configuration for the arena layout.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArenaConfig {
    /// Side of the square ground slab (meters). Its top face is at y = 0.
    pub ground_size: f32,
    /// Thickness of the ground slab
    pub ground_thickness: f32,
    /// Height of the boundary walls around the ground
    pub boundary_height: f32,
    /// Thickness of the boundary walls
    pub boundary_thickness: f32,
    /// Y of the invisible plane that catches everything falling off the map
    pub kill_plane_y: f32,
    /// Interior obstacles
    pub walls: Vec<WallConfig>,
    /// Spawn points by slot; even slots belong to team A, odd slots to team B
    pub spawns: Vec<SpawnPoint>,
}

impl ArenaConfig {
    /// Obstacles including the four boundary walls.
    pub fn all_walls(&self) -> Vec<WallConfig> {
        let g = self.ground_size;
        let t = self.boundary_thickness;
        let h = self.boundary_height;
        let edge = (g - t) / 2.0;
        let mut walls = vec![
            WallConfig::new(0.0, edge, g, h, t, 0.0),
            WallConfig::new(0.0, -edge, g, h, t, 0.0),
            WallConfig::new(edge, 0.0, g - 2.0 * t, h, t, FRAC_PI_2),
            WallConfig::new(-edge, 0.0, g - 2.0 * t, h, t, FRAC_PI_2),
        ];
        walls.extend(self.walls.iter().copied());
        walls
    }
}

impl Default for ArenaConfig {
    fn default() -> Self {
        // Building south of centre with an entrance gap in its south wall.
        let (bx, bz, bw, bd, bh, bt, door) = (18.5, -8.5, 11.0, 18.0, 4.0, 0.5, 2.5);
        let south_segment = (bw - door) / 2.0;

        let walls = vec![
            // Building
            WallConfig::new(bx + bw / 2.0 + bt / 2.0, bz, bd, bh, bt, FRAC_PI_2),
            WallConfig::new(bx - bw / 2.0 - bt / 2.0, bz, bd, bh, bt, FRAC_PI_2),
            WallConfig::new(bx, bz - bd / 2.0 + bt / 2.0, bw, bh, bt, 0.0),
            WallConfig::new(bx - door / 4.0 - bw / 4.0, bz + bd / 2.0 - bt / 2.0, south_segment, bh, bt, 0.0),
            WallConfig::new(bx + door / 4.0 + bw / 4.0, bz + bd / 2.0 - bt / 2.0, south_segment, bh, bt, 0.0),
            // Low white walls
            WallConfig::new(-20.0, 18.0, 18.0, 2.0, 0.45, FRAC_PI_2),
            WallConfig::new(-2.0, 22.0, 18.0, 2.0, 0.45, PI / 14.0),
            WallConfig::new(2.0, -11.0, 18.0, 2.0, 0.45, FRAC_PI_4),
            // Turrets
            WallConfig::new(-10.0, 11.0, 3.2, 10.0, 3.2, 0.0),
            WallConfig::new(2.0, -0.5, 3.2, 10.0, 3.2, 0.0),
            WallConfig::new(8.5, 3.5, 3.2, 10.0, 3.2, 0.0),
            WallConfig::new(16.0, -25.0, 3.2, 10.0, 3.2, 0.0),
        ];

        let spawns = vec![
            SpawnPoint::new(5.0, -10.0, PI),
            SpawnPoint::new(-18.5, -4.0, -FRAC_PI_2),
            SpawnPoint::new(24.0, 18.0, FRAC_PI_4),
            SpawnPoint::new(24.0, -23.7, FRAC_PI_2),
            SpawnPoint::new(-23.0, 19.5, -FRAC_PI_4),
            SpawnPoint::new(21.5, -10.5, PI),
            SpawnPoint::new(-16.2, -21.5, -0.75 * PI),
            SpawnPoint::new(2.4, 22.8, 0.0),
        ];

        Self {
            ground_size: 60.0,
            ground_thickness: 1.0,
            boundary_height: 2.0,
            boundary_thickness: 0.5,
            kill_plane_y: -10.0,
            walls,
            spawns,
        }
    }
}
