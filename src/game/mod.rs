//! Game Module
//!
//! Woborms rules built on top of the engine: robots, teams, shots, the
//! turn state machine and the frame loop that ties them together.

pub mod actor;
pub mod app;
pub mod arena;
pub mod battlefield;
pub mod config;
pub mod hud;
pub mod projectile;
pub mod rig;
pub mod robot_anim;
pub mod session;
pub mod team;
pub mod turn;

pub use actor::{Actor, Lifecycle};
pub use app::{App, INSTRUCTIONS, MenuChoice, Screen};
pub use arena::Arena;
pub use battlefield::Battlefield;
pub use config::{ArenaConfig, ConfigError, GameConfig, SpawnPoint};
pub use hud::{HudState, VictoryAction};
pub use projectile::{Projectile, ProjectileId, ProjectileManager, ProjectileOutcome, ProjectileState};
pub use rig::{Joints, RobotRig};
pub use robot_anim::RobotClip;
pub use session::{ActorSnapshot, FrameSnapshot, Match};
pub use team::{ActorId, Roster, Rosters, Team};
pub use turn::{MatchResult, TurnController, TurnEvent, TurnOutcome, TurnPhase};
