//! Turn Controller
//!
//! The match state machine. It decides whose turn it is, maps input to
//! walking, aiming and charging, runs the countdown, fires the shot,
//! resolves hits and eliminations, rotates the rosters and declares the
//! winner.
//!
//! ```text
//!                 Q                      Space (press)
//! AwaitingInput <───> Aiming ────────────────────────> Charging
//!       │               │                                 │ release / max power
//!       │ countdown = 0 │ countdown = 0                   ▼
//!       └───────────────┴───────────> Resolving <─────────┘
//!                                         │ first projectile contact
//!                                         ▼
//!                     GameOver <── TurnTransition ──(1.8 s)──> AwaitingInput
//!                   (roster empty)
//! ```
//!
//! Only the acting robot's body is ever dynamic: it is activated when its
//! turn starts and frozen again when the shot leaves or time runs out.
//! Every transition is recorded as a [`TurnEvent`] for the frame driver.

use crate::camera::{CameraMode, ViewSelector};
use crate::input::{InputAction, InputEvent};
use crate::time::{DelayTimer, RepeatingTimer};

use super::battlefield::Battlefield;
use super::config::{AimConfig, ChargeConfig, GameConfig, MovementConfig, TurnConfig};
use super::projectile::{ProjectileId, ProjectileOutcome};
use super::team::{ActorId, Team};

/// Phase of the current turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnPhase {
    /// Walking and turning with the chase camera
    AwaitingInput,
    /// First-person, adjusting pitch and yaw
    Aiming,
    /// Fire key held, power rising
    Charging,
    /// Shot in flight (or turn timed out)
    Resolving,
    /// Pause before the next robot acts
    TurnTransition,
    /// A team has no robots left
    GameOver,
}

/// How a turn ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnOutcome {
    HitEnemy { victim: ActorId, eliminated: bool },
    HitAlly { victim: ActorId, eliminated: bool },
    Missed,
    TimedOut,
}

/// Final result of a match.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchResult {
    Winner(Team),
    /// Both teams lost their last robot on the same shot
    Draw,
}

/// Something that happened during a frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TurnEvent {
    TurnStarted { turn: u32, actor: ActorId, team: Team },
    PhaseChanged { from: TurnPhase, to: TurnPhase },
    ShotFired { actor: ActorId, projectile: ProjectileId, power: f32 },
    Resolved { actor: ActorId, outcome: TurnOutcome },
    ActorEliminated { actor: ActorId, team: Team },
    MatchOver(MatchResult),
}

/// Held movement/aim keys. Their meaning depends on the phase.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct Controls {
    forward: bool,
    back: bool,
    left: bool,
    right: bool,
}

impl Controls {
    fn walking(&self) -> bool {
        self.forward || self.back
    }

    /// Walk direction: forward wins when both are held.
    fn drive(&self) -> f32 {
        if self.forward {
            1.0
        } else if self.back {
            -1.0
        } else {
            0.0
        }
    }

    /// Pitch direction while aiming.
    fn elevation(&self) -> f32 {
        f32::from(u8::from(self.forward)) - f32::from(u8::from(self.back))
    }

    /// Yaw direction: left is positive.
    fn steer(&self) -> f32 {
        f32::from(u8::from(self.left)) - f32::from(u8::from(self.right))
    }
}

/// Drives one match from the first turn to the victory screen.
#[derive(Debug, Clone)]
pub struct TurnController {
    turn_config: TurnConfig,
    charge_config: ChargeConfig,
    movement: MovementConfig,
    aim: AimConfig,
    turn_ticks: u32,

    phase: TurnPhase,
    turn: u32,
    next_team: Team,
    acting: Option<(ActorId, Team)>,

    countdown: RepeatingTimer,
    ticks_remaining: u32,
    charge: RepeatingTimer,
    charge_steps: u32,
    charge_held: bool,
    transition: DelayTimer,

    controls: Controls,
    view: ViewSelector,
    outcome: Option<TurnOutcome>,
    result: Option<MatchResult>,
    events: Vec<TurnEvent>,
}

impl TurnController {
    pub fn new(config: &GameConfig) -> Self {
        let mut transition = DelayTimer::new(0.0);
        transition.cancel();
        Self {
            turn_config: config.turn,
            charge_config: config.charge,
            movement: config.movement,
            aim: config.aim,
            turn_ticks: config.turn_ticks(),
            phase: TurnPhase::TurnTransition,
            turn: 0,
            next_team: Team::A,
            acting: None,
            countdown: RepeatingTimer::stopped(config.turn.countdown_tick),
            ticks_remaining: 0,
            charge: RepeatingTimer::stopped(config.charge.period),
            charge_steps: 0,
            charge_held: false,
            transition,
            controls: Controls::default(),
            view: ViewSelector::new(),
            outcome: None,
            result: None,
            events: Vec::new(),
        }
    }

    /// Start the first turn. Team A always acts first.
    pub fn begin_match(&mut self, field: &mut Battlefield) {
        self.next_team = Team::A;
        self.turn = 0;
        self.result = None;
        self.start_turn(field);
    }

    // ============================================================================
    // ACCESSORS
    // ============================================================================

    pub fn phase(&self) -> TurnPhase {
        self.phase
    }

    /// Robot whose turn it is (the last one to act once the match is over).
    pub fn acting_actor(&self) -> Option<ActorId> {
        self.acting.map(|(id, _)| id)
    }

    pub fn acting_team(&self) -> Option<Team> {
        self.acting.map(|(_, team)| team)
    }

    /// Team that acts after the current turn.
    pub fn next_team(&self) -> Team {
        self.next_team
    }

    /// 1-based number of the current turn.
    pub fn turn_number(&self) -> u32 {
        self.turn
    }

    pub fn view(&self) -> &ViewSelector {
        &self.view
    }

    /// Camera currently displayed.
    pub fn camera_mode(&self) -> CameraMode {
        self.view.active()
    }

    /// Seconds left on the countdown.
    pub fn countdown_remaining(&self) -> f32 {
        (f64::from(self.ticks_remaining) * f64::from(self.turn_config.countdown_tick)) as f32
    }

    /// Countdown as shown on screen: whole seconds, rounded up.
    pub fn countdown_display(&self) -> u32 {
        let seconds = f64::from(self.ticks_remaining) * f64::from(self.turn_config.countdown_tick);
        (seconds - 1e-6).ceil().max(0.0) as u32
    }

    /// Accumulated charge, capped at the maximum.
    pub fn power(&self) -> f32 {
        (self.charge_steps as f32 * self.charge_config.step).min(self.charge_config.max_power)
    }

    /// Outcome of the last resolved turn, cleared when the next one starts.
    pub fn last_outcome(&self) -> Option<TurnOutcome> {
        self.outcome
    }

    pub fn result(&self) -> Option<MatchResult> {
        self.result
    }

    pub fn is_over(&self) -> bool {
        self.phase == TurnPhase::GameOver
    }

    /// Take the events recorded since the last drain.
    pub fn drain_events(&mut self) -> Vec<TurnEvent> {
        std::mem::take(&mut self.events)
    }

    // ============================================================================
    // INPUT
    // ============================================================================

    /// Apply one input event. Input the current phase does not use is ignored.
    pub fn handle_input(&mut self, event: InputEvent, field: &mut Battlefield) {
        let InputEvent { action, pressed } = event;

        if matches!(self.phase, TurnPhase::Resolving | TurnPhase::GameOver) {
            self.ignore(action, pressed);
            return;
        }
        if action == InputAction::ToggleOverview {
            if pressed {
                self.view.toggle_overview();
            }
            return;
        }
        if !self.view.accepts(action, pressed) {
            self.ignore(action, pressed);
            return;
        }

        match (self.phase, action) {
            (TurnPhase::AwaitingInput, InputAction::MoveForward | InputAction::MoveBack) => {
                self.walk_key(action, pressed, field);
            }
            (TurnPhase::Aiming, InputAction::MoveForward) => self.controls.forward = pressed,
            (TurnPhase::Aiming, InputAction::MoveBack) => self.controls.back = pressed,
            (TurnPhase::AwaitingInput | TurnPhase::Aiming, InputAction::TurnLeft) => self.controls.left = pressed,
            (TurnPhase::AwaitingInput | TurnPhase::Aiming, InputAction::TurnRight) => self.controls.right = pressed,
            (TurnPhase::AwaitingInput, InputAction::ToggleFirstPerson) if pressed => self.enter_aiming(field),
            (TurnPhase::Aiming, InputAction::ToggleFirstPerson) if pressed => self.leave_aiming(field),
            (TurnPhase::Aiming, InputAction::Charge) if pressed => self.start_charging(),
            (TurnPhase::Charging, InputAction::Charge) if !pressed => self.charge_held = false,
            _ => self.ignore(action, pressed),
        }
    }

    fn ignore(&self, action: InputAction, pressed: bool) {
        tracing::trace!(?action, pressed, phase = ?self.phase, "input ignored");
    }

    fn walk_key(&mut self, action: InputAction, pressed: bool, field: &mut Battlefield) {
        let was_walking = self.controls.walking();
        if action == InputAction::MoveForward {
            self.controls.forward = pressed;
        } else {
            self.controls.back = pressed;
        }

        let Some((id, _)) = self.acting else {
            return;
        };
        let Some(actor) = field.actors.get_mut(id.0) else {
            return;
        };
        match (was_walking, self.controls.walking()) {
            (false, true) => actor.start_moving(),
            (true, false) => {
                actor.stop_moving();
                actor.drive(&mut field.world, 0.0, 0.0);
            }
            _ => {}
        }
    }

    fn enter_aiming(&mut self, field: &mut Battlefield) {
        self.controls = Controls::default();
        if let Some((id, _)) = self.acting
            && let Some(actor) = field.actors.get_mut(id.0)
        {
            actor.drive(&mut field.world, 0.0, 0.0);
            actor.enter_aim();
            actor.reset_pitch();
        }
        self.view.set_first_person(true);
        self.set_phase(TurnPhase::Aiming);
    }

    fn leave_aiming(&mut self, field: &mut Battlefield) {
        self.controls = Controls::default();
        if let Some(actor) = self.acting.and_then(|(id, _)| field.actors.get_mut(id.0)) {
            actor.exit_aim();
        }
        self.view.set_first_person(false);
        self.set_phase(TurnPhase::AwaitingInput);
    }

    fn start_charging(&mut self) {
        self.controls = Controls::default();
        self.countdown.cancel();
        self.charge_steps = 0;
        self.charge_held = true;
        self.charge.restart();
        self.set_phase(TurnPhase::Charging);
    }

    // ============================================================================
    // PER-FRAME UPDATE
    // ============================================================================

    /// Advance the countdown, charge and transition timers by `dt` seconds.
    pub fn advance_timers(&mut self, dt: f32, field: &mut Battlefield) {
        match self.phase {
            TurnPhase::AwaitingInput | TurnPhase::Aiming => {
                let fired = self.countdown.tick(dt);
                self.ticks_remaining = self.ticks_remaining.saturating_sub(fired);
                if fired > 0 && self.ticks_remaining == 0 {
                    self.time_out(field);
                }
            }
            TurnPhase::Charging => {
                for _ in 0..self.charge.tick(dt) {
                    self.charge_steps += 1;
                    if self.charge_steps >= self.charge_config.max_steps() || !self.charge_held {
                        self.release_shot(field);
                        break;
                    }
                }
            }
            TurnPhase::TurnTransition => {
                if self.transition.tick(dt) {
                    self.start_turn(field);
                }
            }
            TurnPhase::Resolving | TurnPhase::GameOver => {}
        }
    }

    /// Apply held movement or aim keys to the acting robot for one physics step.
    pub fn apply_controls(&mut self, dt: f32, field: &mut Battlefield) {
        let Some((id, _)) = self.acting else {
            return;
        };
        let Some(actor) = field.actors.get_mut(id.0) else {
            return;
        };

        match self.phase {
            TurnPhase::AwaitingInput => {
                actor.turn(self.controls.steer() * self.movement.turn_rate * dt);
                actor.drive(&mut field.world, self.controls.drive(), self.movement.walk_speed);
            }
            TurnPhase::Aiming => {
                actor.turn(self.controls.steer() * self.aim.yaw_rate * dt);
                actor.adjust_pitch(self.controls.elevation() * self.aim.pitch_rate * dt, &self.aim);
            }
            _ => {}
        }
    }

    /// Resolve the turn on the first projectile outcome of a step.
    pub fn resolve_outcomes(&mut self, outcomes: &[ProjectileOutcome], field: &mut Battlefield) {
        if self.phase != TurnPhase::Resolving {
            return;
        }
        let Some(first) = outcomes.first() else {
            return;
        };
        let outcome = match *first {
            ProjectileOutcome::Hit { victim, .. } => self.apply_hit(victim, field),
            ProjectileOutcome::Miss { .. } => TurnOutcome::Missed,
        };
        self.resolve(outcome, field);
    }

    // ============================================================================
    // TRANSITIONS
    // ============================================================================

    fn set_phase(&mut self, to: TurnPhase) {
        if self.phase != to {
            self.events.push(TurnEvent::PhaseChanged { from: self.phase, to });
            self.phase = to;
        }
    }

    /// Hand control to the next robot of the team whose turn it is.
    fn start_turn(&mut self, field: &mut Battlefield) {
        let team = self.next_team;
        let Some(id) = field.rosters.get_mut(team).advance() else {
            let result = match_result(field).unwrap_or(MatchResult::Winner(team.other()));
            self.finish(result);
            return;
        };

        self.next_team = team.other();
        self.turn += 1;
        self.acting = Some((id, team));
        self.controls = Controls::default();
        self.view.reset();
        self.outcome = None;
        self.charge.cancel();
        self.charge_steps = 0;
        self.charge_held = false;
        self.ticks_remaining = self.turn_ticks;
        self.countdown.restart();

        if let Some(actor) = field.actors.get_mut(id.0) {
            actor.activate(&mut field.world, self.movement.robot_mass);
        }

        self.events.push(TurnEvent::TurnStarted {
            turn: self.turn,
            actor: id,
            team,
        });
        self.set_phase(TurnPhase::AwaitingInput);
    }

    /// Countdown expired before the shot: freeze the robot and move on.
    fn time_out(&mut self, field: &mut Battlefield) {
        self.countdown.cancel();
        let was_aiming = self.phase == TurnPhase::Aiming;
        let was_walking = self.controls.walking();
        self.controls = Controls::default();

        if let Some((id, _)) = self.acting
            && let Some(actor) = field.actors.get_mut(id.0)
        {
            if was_aiming {
                actor.exit_aim();
            } else if was_walking {
                actor.stop_moving();
            }
            actor.deactivate(&mut field.world);
        }

        self.view.set_first_person(false);
        self.set_phase(TurnPhase::Resolving);
        self.resolve(TurnOutcome::TimedOut, field);
    }

    fn release_shot(&mut self, field: &mut Battlefield) {
        self.charge.cancel();
        self.charge_held = false;
        let power = self.power();

        let Some((id, _)) = self.acting else {
            return;
        };
        let Some(actor) = field.actors.get_mut(id.0) else {
            return;
        };
        actor.deactivate(&mut field.world);
        let (yaw, pitch) = (actor.yaw(), actor.pitch());
        let projectile = field.projectiles.fire(&mut field.world, actor, power, yaw, pitch);
        actor.fire();

        self.events.push(TurnEvent::ShotFired {
            actor: id,
            projectile,
            power,
        });
        self.set_phase(TurnPhase::Resolving);
    }

    fn apply_hit(&mut self, victim: ActorId, field: &mut Battlefield) -> TurnOutcome {
        let Some(actor) = field.actors.get_mut(victim.0) else {
            return TurnOutcome::Missed;
        };
        if !actor.is_alive() {
            return TurnOutcome::Missed;
        }

        let eliminated = actor.apply_hit();
        let team = actor.team;
        if eliminated && field.rosters.get_mut(team).remove(victim) {
            self.events.push(TurnEvent::ActorEliminated { actor: victim, team });
        }

        if Some(team) == self.acting_team() {
            TurnOutcome::HitAlly { victim, eliminated }
        } else {
            TurnOutcome::HitEnemy { victim, eliminated }
        }
    }

    fn resolve(&mut self, outcome: TurnOutcome, field: &mut Battlefield) {
        self.view.reset();
        self.outcome = Some(outcome);
        if let Some(actor) = self.acting_actor() {
            self.events.push(TurnEvent::Resolved { actor, outcome });
        }

        match match_result(field) {
            Some(result) => self.finish(result),
            None => {
                self.transition = DelayTimer::new(self.turn_config.transition_delay);
                self.set_phase(TurnPhase::TurnTransition);
            }
        }
    }

    fn finish(&mut self, result: MatchResult) {
        self.countdown.cancel();
        self.charge.cancel();
        self.transition.cancel();
        self.result = Some(result);
        self.events.push(TurnEvent::MatchOver(result));
        self.set_phase(TurnPhase::GameOver);
    }
}

/// The match result if at least one roster is empty.
fn match_result(field: &Battlefield) -> Option<MatchResult> {
    match (field.rosters.get(Team::A).is_empty(), field.rosters.get(Team::B).is_empty()) {
        (true, true) => Some(MatchResult::Draw),
        (true, false) => Some(MatchResult::Winner(Team::B)),
        (false, true) => Some(MatchResult::Winner(Team::A)),
        (false, false) => None,
    }
}
