//! Config Module
//!
//! Centralized configuration for arena layout and gameplay parameters.

pub mod arena_config;
pub mod game_config;

pub use arena_config::{ArenaConfig, SpawnPoint, WallConfig};
pub use game_config::{
    AimConfig, ChargeConfig, ConfigError, GameConfig, MovementConfig, PhysicsConfig, ProjectileConfig,
    STARTING_HEALTH, TEAM_COUNT, TurnConfig,
};
