//! Game Configuration
//!
//! Every gameplay constant in one serializable struct. `Default` carries the
//! classic rules; a JSON file may override any subset of fields.
//!
//! # Example
//!
//! ```ignore
//! use woborms_engine::game::config::GameConfig;
//!
//! let config = GameConfig::load_or_default("woborms.json");
//! assert!(config.validate().is_ok());
//! ```

use std::f32::consts::{FRAC_PI_3, FRAC_PI_8};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use static_assertions::const_assert;
use thiserror::Error;

use super::arena_config::ArenaConfig;
use crate::camera::CameraRigConfig;

/// Health every robot starts with.
pub const STARTING_HEALTH: u8 = 3;

/// Number of teams in a match.
pub const TEAM_COUNT: usize = 2;

const_assert!(STARTING_HEALTH > 0);
const_assert!(TEAM_COUNT == 2);

/// Errors raised while loading or validating a configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed config JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("team size must be at least 1")]
    EmptyTeams,
    #[error("team size {team_size} needs {needed} spawn points, arena has {available}")]
    NotEnoughSpawns {
        team_size: usize,
        needed: usize,
        available: usize,
    },
    #[error("{field} must be positive (got {value})")]
    NonPositive { field: &'static str, value: f32 },
    #[error("aim pitch range is empty ({min} > {max})")]
    EmptyPitchRange { min: f32, max: f32 },
}

/// Turn pacing and roster size.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TurnConfig {
    /// Robots per team
    pub team_size: usize,
    /// Seconds an actor has to act
    pub turn_time: f32,
    /// Countdown resolution (seconds per tick)
    pub countdown_tick: f32,
    /// Pause between a resolution and the next turn
    pub transition_delay: f32,
}

impl Default for TurnConfig {
    fn default() -> Self {
        Self {
            team_size: 4,
            turn_time: 20.0,
            countdown_tick: 0.01,
            transition_delay: 1.8,
        }
    }
}

/// Charge accumulation while the fire key is held.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChargeConfig {
    /// Power added per charge tick
    pub step: f32,
    /// Seconds between charge ticks
    pub period: f32,
    /// Power at which the shot fires on its own
    pub max_power: f32,
}

impl Default for ChargeConfig {
    fn default() -> Self {
        Self {
            step: 0.1,
            period: 0.0135,
            max_power: 10.0,
        }
    }
}

impl ChargeConfig {
    /// Number of steps needed to reach `max_power` (at least one).
    pub fn max_steps(&self) -> u32 {
        ((self.max_power / self.step).round() as u32).max(1)
    }
}

/// Walking.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MovementConfig {
    /// Mass of the acting robot's body (kg)
    pub robot_mass: f32,
    /// Walking speed (m/s)
    pub walk_speed: f32,
    /// Turning speed while walking (rad/s)
    pub turn_rate: f32,
}

impl Default for MovementConfig {
    fn default() -> Self {
        Self {
            robot_mass: 70.0,
            walk_speed: 2.9,
            turn_rate: 1.2,
        }
    }
}

/// First-person aiming.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AimConfig {
    /// Fine yaw speed (rad/s)
    pub yaw_rate: f32,
    /// Pitch speed (rad/s)
    pub pitch_rate: f32,
    pub min_pitch: f32,
    pub max_pitch: f32,
}

impl Default for AimConfig {
    fn default() -> Self {
        Self {
            yaw_rate: 0.18,
            pitch_rate: 0.3,
            min_pitch: -FRAC_PI_8,
            max_pitch: FRAC_PI_3,
        }
    }
}

/// World stepping.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhysicsConfig {
    /// Vertical gravity (m/s², negative is down)
    pub gravity: f32,
    /// Fixed simulation step (seconds)
    pub fixed_step: f32,
    /// Cap on simulation steps in one frame; leftover time is dropped
    pub max_steps_per_frame: u32,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            gravity: -9.81,
            fixed_step: 1.0 / 60.0,
            max_steps_per_frame: 8,
        }
    }
}

/// Projectile body and launch scaling.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectileConfig {
    pub radius: f32,
    pub mass: f32,
    /// Launch speed per unit of charge power
    pub power_scale: f32,
}

impl Default for ProjectileConfig {
    fn default() -> Self {
        Self {
            radius: 0.2,
            mass: 1.0,
            power_scale: 3.6,
        }
    }
}

/// Complete configuration of a match.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub turn: TurnConfig,
    pub charge: ChargeConfig,
    pub movement: MovementConfig,
    pub aim: AimConfig,
    pub physics: PhysicsConfig,
    pub projectile: ProjectileConfig,
    pub arena: ArenaConfig,
    pub camera: CameraRigConfig,
}

impl GameConfig {
    /// Parse a JSON document. Missing fields take their defaults.
    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        let config: GameConfig = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Read and validate a JSON config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&text)
    }

    /// Like [`load`](Self::load), but falls back to defaults with a warning.
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        match Self::load(path.as_ref()) {
            Ok(config) => config,
            Err(err) => {
                tracing::warn!(path = %path.as_ref().display(), error = %err, "using default game config");
                Self::default()
            }
        }
    }

    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Check cross-field constraints.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.turn.team_size == 0 {
            return Err(ConfigError::EmptyTeams);
        }
        let needed = self.turn.team_size * TEAM_COUNT;
        if needed > self.arena.spawns.len() {
            return Err(ConfigError::NotEnoughSpawns {
                team_size: self.turn.team_size,
                needed,
                available: self.arena.spawns.len(),
            });
        }

        let positive = [
            ("turn.turn_time", self.turn.turn_time),
            ("turn.countdown_tick", self.turn.countdown_tick),
            ("charge.step", self.charge.step),
            ("charge.period", self.charge.period),
            ("charge.max_power", self.charge.max_power),
            ("movement.robot_mass", self.movement.robot_mass),
            ("physics.fixed_step", self.physics.fixed_step),
            ("projectile.radius", self.projectile.radius),
            ("projectile.mass", self.projectile.mass),
            ("projectile.power_scale", self.projectile.power_scale),
        ];
        for (field, value) in positive {
            if value.is_nan() || value <= 0.0 {
                return Err(ConfigError::NonPositive { field, value });
            }
        }
        if self.turn.transition_delay < 0.0 {
            return Err(ConfigError::NonPositive {
                field: "turn.transition_delay",
                value: self.turn.transition_delay,
            });
        }

        if self.aim.min_pitch > self.aim.max_pitch {
            return Err(ConfigError::EmptyPitchRange {
                min: self.aim.min_pitch,
                max: self.aim.max_pitch,
            });
        }
        Ok(())
    }

    /// Countdown ticks in one full turn.
    pub fn turn_ticks(&self) -> u32 {
        ((self.turn.turn_time / self.turn.countdown_tick).round() as u32).max(1)
    }
}
