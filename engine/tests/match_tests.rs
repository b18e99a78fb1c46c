//! Match Tests - Full Frames with Keys and Physics
//!
//! Plays matches through `Match::frame` the way a window loop would: keys
//! go into the input queue, shots fly through the physics world and the
//! snapshots are what gets checked.

use approx::assert_abs_diff_eq;
use woborms_engine::camera::CameraMode;
use woborms_engine::game::{FrameSnapshot, GameConfig, Match, Team, TurnEvent, TurnOutcome, TurnPhase};
use woborms_engine::input::{InputAction, KeyCode};

const DT: f32 = 1.0 / 60.0;

fn new_match() -> Match {
    Match::new(GameConfig::default()).unwrap()
}

fn tap(game: &mut Match, key: KeyCode) -> FrameSnapshot {
    game.input_mut().handle_key(key, true);
    game.input_mut().handle_key(key, false);
    game.frame(DT)
}

/// Run frames until `done` holds, collecting every event on the way.
fn run_until(game: &mut Match, max_frames: usize, done: impl Fn(&FrameSnapshot) -> bool) -> Vec<TurnEvent> {
    let mut events = Vec::new();
    for _ in 0..max_frames {
        let snapshot = game.frame(DT);
        events.extend(snapshot.events.iter().copied());
        if done(&snapshot) {
            return events;
        }
    }
    panic!("condition not reached within {max_frames} frames");
}

// ============================================================================
// Charging and firing
// ============================================================================

#[test]
fn test_held_charge_fires_itself_at_max_power() {
    let mut game = new_match();
    tap(&mut game, KeyCode::Q);
    game.input_mut().handle_key(KeyCode::Space, true);

    let events = run_until(&mut game, 200, |s| s.phase == TurnPhase::Resolving);

    let power = events
        .iter()
        .find_map(|e| match e {
            TurnEvent::ShotFired { power, .. } => Some(*power),
            _ => None,
        })
        .unwrap();
    assert_abs_diff_eq!(power, 10.0, epsilon = 1e-4);
    assert!(game.input_mut().is_held(InputAction::Charge));
    assert_eq!(game.battlefield().projectiles.in_flight_count(), 1);
}

#[test]
fn test_power_readout_rises_while_charging() {
    let mut game = new_match();
    tap(&mut game, KeyCode::Q);
    game.input_mut().handle_key(KeyCode::Space, true);
    let mut snapshot = game.frame(DT);
    for _ in 0..30 {
        snapshot = game.frame(DT);
    }
    assert_eq!(snapshot.phase, TurnPhase::Charging);
    assert!(game.turn().power() > 3.0);
    assert!(snapshot.hud.power.starts_with("POWER: "));
}

#[test]
fn test_weak_shot_lands_as_miss_and_turn_advances() {
    let mut game = new_match();
    let shooter = game.turn().acting_actor().unwrap();
    tap(&mut game, KeyCode::Q);
    game.input_mut().handle_key(KeyCode::Space, true);
    game.frame(DT);
    game.input_mut().handle_key(KeyCode::Space, false);

    let events = run_until(&mut game, 300, |s| s.phase == TurnPhase::TurnTransition);
    let resolved: Vec<_> = events
        .iter()
        .filter_map(|e| match e {
            TurnEvent::Resolved { actor, outcome } => Some((*actor, *outcome)),
            _ => None,
        })
        .collect();
    assert_eq!(resolved, vec![(shooter, TurnOutcome::Missed)]);
    assert_eq!(game.battlefield().projectiles.in_flight_count(), 0);
    assert_eq!(game.battlefield().projectiles.spent_count(), 1);

    // No second report while the transition runs
    let later = run_until(&mut game, 200, |s| s.phase == TurnPhase::AwaitingInput);
    assert!(!later.iter().any(|e| matches!(e, TurnEvent::Resolved { .. })));
    assert_eq!(game.turn().acting_team(), Some(Team::B));
}

// ============================================================================
// Countdown
// ============================================================================

#[test]
fn test_countdown_expiry_while_aiming() {
    let mut game = new_match();
    let snapshot = tap(&mut game, KeyCode::Q);
    assert_eq!(snapshot.camera_mode, CameraMode::FirstPerson);
    assert!(snapshot.hud.show_aim);

    let events = run_until(&mut game, 21 * 60, |s| s.phase == TurnPhase::TurnTransition);
    assert!(events.contains(&TurnEvent::Resolved {
        actor: game.turn().acting_actor().unwrap(),
        outcome: TurnOutcome::TimedOut
    }));
    assert!(!events.iter().any(|e| matches!(e, TurnEvent::ShotFired { .. })));
    assert_eq!(game.battlefield().projectiles.in_flight_count(), 0);
    assert_eq!(game.turn().camera_mode(), CameraMode::Chase);
    assert_eq!(game.battlefield().world.dynamic_count(), 0);

    let snapshot = game.frame(2.0);
    assert_eq!(snapshot.phase, TurnPhase::AwaitingInput);
    assert_eq!(game.turn().acting_team(), Some(Team::B));
    assert_eq!(snapshot.hud.countdown, "20");
}

#[test]
fn test_countdown_display_counts_down_whole_seconds() {
    let mut game = new_match();
    let mut snapshot = game.frame(DT);
    assert_eq!(snapshot.hud.countdown, "20");
    for _ in 0..61 {
        snapshot = game.frame(DT);
    }
    assert_eq!(snapshot.hud.countdown, "19");
}

// ============================================================================
// Views
// ============================================================================

#[test]
fn test_overview_toggled_twice_changes_nothing() {
    let mut game = new_match();
    let before = game.frame(DT);

    let over = tap(&mut game, KeyCode::E);
    assert_eq!(over.camera_mode, CameraMode::Overview);
    assert_eq!(over.phase, before.phase);
    let back = tap(&mut game, KeyCode::E);

    assert_eq!(back.camera_mode, before.camera_mode);
    assert_eq!(back.phase, before.phase);
    assert_eq!(back.acting, before.acting);
    assert!(back.actors[0].position.distance(before.actors[0].position) < 1e-4);
    assert_abs_diff_eq!(back.actors[0].yaw, before.actors[0].yaw, epsilon = 1e-6);
    assert!(back.projectiles.is_empty());
}

#[test]
fn test_first_person_toggled_twice_returns_to_chase() {
    let mut game = new_match();
    let before = game.frame(DT);
    tap(&mut game, KeyCode::Q);
    let back = tap(&mut game, KeyCode::Q);
    assert_eq!(back.phase, TurnPhase::AwaitingInput);
    assert_eq!(back.camera_mode, CameraMode::Chase);
    assert!(back.actors[0].position.distance(before.actors[0].position) < 1e-4);
}

#[test]
fn test_chase_camera_sits_behind_and_above_robot() {
    let mut game = new_match();
    let snapshot = game.frame(DT);
    let robot = &snapshot.actors[0];
    let facing = glam::Vec3::new(-robot.yaw.sin(), 0.0, -robot.yaw.cos());

    assert!(snapshot.camera.eye.y > robot.position.y);
    assert!((snapshot.camera.eye - robot.position).dot(facing) < 0.0);
    assert!(snapshot.camera.forward().dot(facing) > 0.0);
}

#[test]
fn test_first_person_camera_follows_aim() {
    let mut game = new_match();
    let level = tap(&mut game, KeyCode::Q).camera;
    game.input_mut().handle_key(KeyCode::W, true);
    let mut snapshot = game.frame(DT);
    for _ in 0..30 {
        snapshot = game.frame(DT);
    }
    assert!(snapshot.camera.forward().y > level.forward().y);
}

// ============================================================================
// Whole match
// ============================================================================

#[test]
fn test_events_start_with_first_turn() {
    let mut game = new_match();
    let snapshot = game.frame(DT);
    assert!(snapshot.events.is_empty(), "start events are drained when the match is built");
    assert_eq!(snapshot.acting, game.turn().acting_actor());
    assert_eq!(game.turn().turn_number(), 1);
}

#[test]
fn test_idle_match_keeps_alternating_teams() {
    let mut game = new_match();
    let mut teams = Vec::new();
    for _ in 0..4 {
        teams.push(game.turn().acting_team().unwrap());
        game.frame(21.0);
        game.frame(2.0);
    }
    assert_eq!(teams, vec![Team::A, Team::B, Team::A, Team::B]);
    assert!(!game.is_over());
}
