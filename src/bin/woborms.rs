//! Woborms - headless hot-seat match
//!
//! Run with: `cargo run --bin woborms -- [config.json]`
//!
//! Plays a full match with both teams on autopilot and logs every turn.
//! Each robot turns towards the nearest enemy, switches to first person,
//! raises its aim and charges for the power a flat-ground throw would need.
//! Walls are not taken into account, so plenty of shots miss.
//!
//! Set `RUST_LOG=debug` for phase changes and projectile launches.

use std::f32::consts::PI;

use glam::Vec3;
use woborms_engine::game::{GameConfig, Match, MatchResult, TurnEvent, TurnPhase, VictoryAction, hud};
use woborms_engine::input::KeyCode;

const FRAME: f32 = 1.0 / 60.0;
/// Give up after this much simulated time
const TIME_LIMIT: f32 = 30.0 * 60.0;
/// Elevation the autopilot aims at before charging
const AIM_PITCH: f32 = 0.35;
const YAW_TOLERANCE: f32 = 0.03;

fn init_tracing() {
    let filter =
        tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).with_target(false).compact().init();
}

/// What the autopilot is doing in the current turn.
#[derive(Debug, Clone, Copy, PartialEq)]
enum Plan {
    Facing,
    Raising,
    Charging { hold: f32 },
    Waiting,
}

struct Autopilot {
    turn: u32,
    plan: Plan,
}

impl Autopilot {
    fn new() -> Self {
        Self {
            turn: 0,
            plan: Plan::Waiting,
        }
    }

    /// Push this frame's key presses and releases.
    fn drive(&mut self, game: &mut Match) {
        let turn = game.turn();
        if turn.turn_number() != self.turn && turn.phase() == TurnPhase::AwaitingInput {
            self.turn = turn.turn_number();
            self.plan = Plan::Facing;
        }
        let Some(id) = turn.acting_actor() else {
            return;
        };
        let Some(actor) = game.battlefield().actor(id) else {
            return;
        };
        let (yaw, pitch, origin, team) = (actor.yaw(), actor.pitch(), actor.position(), actor.team);

        let target = game
            .battlefield()
            .actors
            .iter()
            .filter(|a| a.is_alive() && a.team != team)
            .map(|a| a.position())
            .min_by(|a, b| a.distance_squared(origin).total_cmp(&b.distance_squared(origin)));
        let Some(target) = target else {
            return;
        };

        let config = game.config().clone();
        let input = game.input_mut();
        match self.plan {
            Plan::Facing => {
                let offset = target - origin;
                let diff = wrap_angle(f32::atan2(-offset.x, -offset.z) - yaw);
                if diff.abs() > YAW_TOLERANCE {
                    input.handle_key(KeyCode::A, diff > 0.0);
                    input.handle_key(KeyCode::D, diff < 0.0);
                } else {
                    input.handle_key(KeyCode::A, false);
                    input.handle_key(KeyCode::D, false);
                    input.handle_key(KeyCode::Q, true);
                    input.handle_key(KeyCode::Q, false);
                    self.plan = Plan::Raising;
                }
            }
            Plan::Raising => {
                if pitch < AIM_PITCH.min(config.aim.max_pitch) {
                    input.handle_key(KeyCode::W, true);
                } else {
                    input.handle_key(KeyCode::W, false);
                    let power = required_power(target - origin, pitch, &config);
                    let hold = power / config.charge.step * config.charge.period;
                    input.handle_key(KeyCode::Space, true);
                    tracing::debug!(actor = id.0, power, "autopilot charging");
                    self.plan = Plan::Charging { hold };
                }
            }
            Plan::Charging { hold } => {
                let hold = hold - FRAME;
                if hold <= 0.0 {
                    input.handle_key(KeyCode::Space, false);
                    self.plan = Plan::Waiting;
                } else {
                    self.plan = Plan::Charging { hold };
                }
            }
            Plan::Waiting => {}
        }
    }
}

/// Charge power for a flat-ground throw over `offset` at elevation `pitch`.
fn required_power(offset: Vec3, pitch: f32, config: &GameConfig) -> f32 {
    let range = Vec3::new(offset.x, 0.0, offset.z).length();
    let spread = (2.0 * pitch).sin().max(0.05);
    let speed = (config.physics.gravity.abs() * range / spread).sqrt();
    (speed / config.projectile.power_scale).clamp(config.charge.step, config.charge.max_power)
}

fn wrap_angle(angle: f32) -> f32 {
    (angle + PI).rem_euclid(2.0 * PI) - PI
}

fn main() {
    init_tracing();

    let config = match std::env::args().nth(1) {
        Some(path) => GameConfig::load_or_default(path),
        None => GameConfig::default(),
    };

    let mut game = match Match::new(config) {
        Ok(game) => game,
        Err(err) => {
            tracing::error!(error = %err, "cannot start match");
            std::process::exit(1);
        }
    };

    let mut autopilot = Autopilot::new();
    let mut elapsed = 0.0;
    while !game.is_over() && elapsed < TIME_LIMIT {
        autopilot.drive(&mut game);
        let snapshot = game.frame(FRAME);
        if let Some(banner) = snapshot.hud.banner
            && snapshot.events.iter().any(|e| matches!(e, TurnEvent::Resolved { .. }))
        {
            tracing::info!(%banner);
        }
        elapsed += FRAME;
    }

    match game.turn().result() {
        Some(result) => {
            tracing::info!(
                result = hud::victory_text(result),
                turns = game.turn().turn_number(),
                seconds = elapsed,
                "match finished"
            );
            if let MatchResult::Winner(team) = result {
                let survivors = game.battlefield().alive_count(team);
                tracing::info!(team = team.label(), survivors, "winning team");
            }
            let options: Vec<&str> = VictoryAction::ALL.iter().map(|a| a.label()).collect();
            tracing::info!(?options, "victory screen");
        }
        None => tracing::warn!(seconds = elapsed, "no winner within the time limit"),
    }
}
