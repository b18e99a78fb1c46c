//! Match session
//!
//! [`Match`] owns everything in one game and runs the frame loop:
//!
//! 1. Drain the input queue into the turn controller
//! 2. Advance the countdown, charge and transition timers
//! 3. Fixed-step physics: per step apply the acting robot's controls, step
//!    the world and resolve projectile contacts
//! 4. Advance every robot's animation
//! 5. Sync the acting robot's rig with its body
//! 6. Return a [`FrameSnapshot`] for whatever draws the game
//!
//! # Example
//!
//! ```ignore
//! use woborms_engine::game::{GameConfig, Match};
//! use woborms_engine::input::KeyCode;
//!
//! let mut game = Match::new(GameConfig::default())?;
//! game.input_mut().handle_key(KeyCode::Q, true);
//! let snapshot = game.frame(1.0 / 60.0);
//! println!("{}", snapshot.hud.countdown);
//! ```

use glam::Vec3;

use crate::camera::{CameraMode, CameraPose, CameraRig};
use crate::input::{InputQueue, KeyBindings};

use super::battlefield::Battlefield;
use super::config::{ConfigError, GameConfig};
use super::hud::HudState;
use super::team::{ActorId, Team};
use super::turn::{TurnController, TurnEvent, TurnPhase};

/// Pose and status of one robot, as a renderer needs it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ActorSnapshot {
    pub id: ActorId,
    pub team: Team,
    pub position: Vec3,
    pub yaw: f32,
    pub health: u8,
    pub alive: bool,
}

/// Everything a renderer needs for one frame.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameSnapshot {
    pub phase: TurnPhase,
    pub acting: Option<ActorId>,
    pub camera_mode: CameraMode,
    pub camera: CameraPose,
    pub hud: HudState,
    pub actors: Vec<ActorSnapshot>,
    /// Positions of projectiles still in flight
    pub projectiles: Vec<Vec3>,
    /// Turn events raised during this frame
    pub events: Vec<TurnEvent>,
}

/// One match, from the first turn to the victory screen.
#[derive(Debug, Clone)]
pub struct Match {
    config: GameConfig,
    input: InputQueue,
    field: Battlefield,
    turn: TurnController,
    camera: CameraRig,
    accumulator: f32,
}

impl Match {
    /// Set up the arena and robots and start the first turn.
    pub fn new(config: GameConfig) -> Result<Self, ConfigError> {
        Self::with_bindings(config, KeyBindings::new())
    }

    pub fn with_bindings(config: GameConfig, bindings: KeyBindings) -> Result<Self, ConfigError> {
        let mut field = Battlefield::new(&config)?;
        let mut turn = TurnController::new(&config);
        turn.begin_match(&mut field);

        let mut session = Self {
            camera: CameraRig::new(config.camera),
            config,
            input: InputQueue::new(bindings),
            field,
            turn,
            accumulator: 0.0,
        };
        session.log_events();
        Ok(session)
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn input_mut(&mut self) -> &mut InputQueue {
        &mut self.input
    }

    pub fn battlefield(&self) -> &Battlefield {
        &self.field
    }

    pub fn battlefield_mut(&mut self) -> &mut Battlefield {
        &mut self.field
    }

    pub fn turn(&self) -> &TurnController {
        &self.turn
    }

    pub fn is_over(&self) -> bool {
        self.turn.is_over()
    }

    /// Run one frame of `dt` seconds.
    pub fn frame(&mut self, dt: f32) -> FrameSnapshot {
        let dt = dt.max(0.0);

        for event in self.input.drain() {
            self.turn.handle_input(event, &mut self.field);
        }

        self.turn.advance_timers(dt, &mut self.field);

        self.step_physics(dt);

        self.field.advance_animations(dt);

        if let Some(id) = self.turn.acting_actor()
            && let Some(actor) = self.field.actors.get_mut(id.0)
        {
            actor.sync_from_body(&mut self.field.world);
        }

        let events = self.log_events();
        self.snapshot(events)
    }

    fn step_physics(&mut self, dt: f32) {
        let physics = self.config.physics;
        self.accumulator += dt;

        let mut steps = 0;
        while self.accumulator >= physics.fixed_step {
            if steps == physics.max_steps_per_frame {
                tracing::debug!(dropped = self.accumulator, "physics falling behind");
                self.accumulator = 0.0;
                break;
            }
            self.turn.apply_controls(physics.fixed_step, &mut self.field);
            self.field.world.step(physics.fixed_step);

            let field = &mut self.field;
            let outcomes = field.projectiles.collect_outcomes(&mut field.world, &field.actors);
            self.turn.resolve_outcomes(&outcomes, &mut self.field);

            self.accumulator -= physics.fixed_step;
            steps += 1;
        }
    }

    fn log_events(&mut self) -> Vec<TurnEvent> {
        let events = self.turn.drain_events();
        for event in &events {
            match event {
                TurnEvent::TurnStarted { turn, actor, team } => {
                    tracing::info!(turn, actor = actor.0, team = team.label(), "turn started");
                }
                TurnEvent::PhaseChanged { from, to } => {
                    tracing::debug!(?from, ?to, "phase changed");
                }
                TurnEvent::ShotFired { actor, power, .. } => {
                    tracing::info!(actor = actor.0, power, "shot fired");
                }
                TurnEvent::Resolved { actor, outcome } => {
                    tracing::info!(actor = actor.0, ?outcome, "turn resolved");
                }
                TurnEvent::ActorEliminated { actor, team } => {
                    tracing::info!(actor = actor.0, team = team.label(), "robot eliminated");
                }
                TurnEvent::MatchOver(result) => {
                    tracing::info!(?result, "match over");
                }
            }
        }
        events
    }

    fn snapshot(&self, events: Vec<TurnEvent>) -> FrameSnapshot {
        let camera_mode = self.turn.camera_mode();
        let camera = match self.turn.acting_actor().and_then(|id| self.field.actor(id)) {
            Some(actor) => actor.camera_pose(&self.camera, camera_mode),
            None => self.camera.overview(),
        };

        let actors = self
            .field
            .actors
            .iter()
            .map(|a| ActorSnapshot {
                id: a.id,
                team: a.team,
                position: a.position(),
                yaw: a.yaw(),
                health: a.health(),
                alive: a.is_alive(),
            })
            .collect();

        let projectiles = self
            .field
            .projectiles
            .in_flight()
            .filter_map(|p| self.field.world.body(p.body))
            .map(|b| b.position)
            .collect();

        FrameSnapshot {
            phase: self.turn.phase(),
            acting: self.turn.acting_actor(),
            camera_mode,
            camera,
            hud: HudState::from_turn(&self.turn),
            actors,
            projectiles,
            events,
        }
    }
}
