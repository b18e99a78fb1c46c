//! Turn Rules Tests - Rotation, Eliminations and Match End
//!
//! Drives the turn controller directly against a battlefield. Shots are
//! released for real, but their outcomes are injected so each scenario is
//! independent of arena geometry.

use woborms_engine::game::{
    ActorId, Battlefield, GameConfig, MatchResult, ProjectileId, ProjectileOutcome, Team, TurnController, TurnEvent,
    TurnOutcome, TurnPhase,
};
use woborms_engine::input::{InputAction, InputEvent};

const DT: f32 = 1.0 / 60.0;

/// A battlefield plus the controller running it.
struct Duel {
    field: Battlefield,
    turn: TurnController,
}

impl Duel {
    fn new(team_size: usize) -> Self {
        let mut config = GameConfig::default();
        config.turn.team_size = team_size;
        let field = Battlefield::new(&config).unwrap();
        let turn = TurnController::new(&config);
        Self { field, turn }
    }

    fn begin(mut self) -> Self {
        self.turn.begin_match(&mut self.field);
        self
    }

    fn press(&mut self, action: InputAction) {
        self.turn.handle_input(InputEvent::press(action), &mut self.field);
    }

    fn release(&mut self, action: InputAction) {
        self.turn.handle_input(InputEvent::release(action), &mut self.field);
    }

    /// Aim and release the weakest possible shot.
    fn shoot(&mut self) -> ProjectileId {
        self.press(InputAction::ToggleFirstPerson);
        self.press(InputAction::Charge);
        self.release(InputAction::Charge);
        self.turn.advance_timers(DT, &mut self.field);
        assert_eq!(self.turn.phase(), TurnPhase::Resolving);
        self.turn
            .drain_events()
            .iter()
            .find_map(|e| match e {
                TurnEvent::ShotFired { projectile, .. } => Some(*projectile),
                _ => None,
            })
            .unwrap()
    }

    /// Shoot and resolve as a hit on `victim`, or a miss.
    fn shoot_at(&mut self, victim: Option<ActorId>) {
        let shooter = self.turn.acting_actor().unwrap();
        let projectile = self.shoot();
        let outcome = match victim {
            Some(victim) => ProjectileOutcome::Hit {
                projectile,
                shooter,
                victim,
            },
            None => ProjectileOutcome::Miss { projectile, shooter },
        };
        self.turn.resolve_outcomes(&[outcome], &mut self.field);
    }

    fn time_out(&mut self) {
        self.turn.advance_timers(25.0, &mut self.field);
    }

    /// Sit out the transition delay.
    fn next_turn(&mut self) {
        assert_eq!(self.turn.phase(), TurnPhase::TurnTransition);
        self.turn.advance_timers(2.0, &mut self.field);
    }

    fn dynamic_actors(&self) -> usize {
        self.field
            .actors
            .iter()
            .filter(|a| self.field.world.body(a.body()).is_some_and(|b| b.is_dynamic()))
            .count()
    }
}

// ============================================================================
// Rotation
// ============================================================================

#[test]
fn test_teams_alternate_and_members_rotate() {
    let mut duel = Duel::new(2).begin();
    let mut order = Vec::new();
    for _ in 0..6 {
        order.push(duel.turn.acting_actor().unwrap());
        duel.time_out();
        duel.next_turn();
    }
    let ids: Vec<usize> = order.iter().map(|id| id.0).collect();
    assert_eq!(ids, vec![0, 1, 2, 3, 0, 1]);
}

#[test]
fn test_rotation_always_lands_on_live_robot() {
    for team_size in 1..=4 {
        // Every non-empty survivor set for team A
        for mask in 1u32..(1 << team_size) {
            let mut duel = Duel::new(team_size);
            for slot in 0..team_size {
                if mask & (1 << slot) == 0 {
                    let id = ActorId(slot * 2);
                    let actor = duel.field.actor_mut(id).unwrap();
                    while actor.is_alive() {
                        actor.apply_hit();
                    }
                    duel.field.rosters.get_mut(Team::A).remove(id);
                }
            }
            let mut duel = duel.begin();

            for _ in 0..(team_size * 4) {
                let id = duel.turn.acting_actor().unwrap();
                let actor = duel.field.actor(id).unwrap();
                assert!(actor.is_alive(), "size {team_size} mask {mask:b}: {id:?} is eliminated");
                assert_eq!(Some(actor.team), duel.turn.acting_team());
                duel.time_out();
                duel.next_turn();
            }
        }
    }
}

#[test]
fn test_elimination_mid_rotation_skips_removed_robot() {
    let mut duel = Duel::new(3).begin();
    // A0 shoots B1 three times over A's turns; B times out in between
    let mut turns = 0;
    while duel.field.actor(ActorId(1)).unwrap().is_alive() {
        if duel.turn.acting_team() == Some(Team::A) {
            duel.shoot_at(Some(ActorId(1)));
        } else {
            duel.time_out();
        }
        duel.next_turn();
        turns += 1;
        assert!(turns < 20);
    }

    assert!(!duel.field.rosters.get(Team::B).contains(ActorId(1)));
    for _ in 0..8 {
        assert_ne!(duel.turn.acting_actor(), Some(ActorId(1)));
        duel.time_out();
        duel.next_turn();
    }
}

// ============================================================================
// Colliders
// ============================================================================

#[test]
fn test_at_most_one_dynamic_robot_through_a_match() {
    let mut duel = Duel::new(4).begin();
    for round in 0..24 {
        assert!(duel.dynamic_actors() <= 1);
        match round % 3 {
            0 => duel.time_out(),
            1 => {
                duel.press(InputAction::MoveForward);
                assert_eq!(duel.dynamic_actors(), 1);
                duel.time_out();
            }
            _ => {
                duel.shoot();
                assert_eq!(duel.dynamic_actors(), 0);
                duel.turn.resolve_outcomes(
                    &[ProjectileOutcome::Miss {
                        projectile: ProjectileId(round),
                        shooter: duel.turn.acting_actor().unwrap(),
                    }],
                    &mut duel.field,
                );
            }
        }
        assert_eq!(duel.dynamic_actors(), 0);
        duel.next_turn();
    }
}

// ============================================================================
// Hits and eliminations
// ============================================================================

#[test]
fn test_health_drops_once_per_hit_and_removal_happens_once() {
    let mut duel = Duel::new(2).begin();
    let victim = ActorId(1);
    let mut seen = Vec::new();
    let mut eliminations = 0;

    for _ in 0..5 {
        // A's turn: hit B1
        duel.shoot_at(Some(victim));
        seen.push(duel.field.actor(victim).unwrap().health());
        eliminations += duel
            .turn
            .drain_events()
            .iter()
            .filter(|e| matches!(e, TurnEvent::ActorEliminated { .. }))
            .count();
        duel.next_turn();
        // B's turn
        duel.time_out();
        duel.next_turn();
    }

    assert_eq!(seen, vec![2, 1, 0, 0, 0]);
    assert_eq!(eliminations, 1);
    assert!(!duel.field.rosters.get(Team::B).contains(victim));
    assert!(duel.field.rosters.get(Team::B).contains(ActorId(3)));
}

#[test]
fn test_hit_on_downed_robot_counts_as_miss() {
    let mut duel = Duel::new(2).begin();
    let victim = ActorId(3);
    for _ in 0..3 {
        duel.shoot_at(Some(victim));
        duel.next_turn();
        duel.time_out();
        duel.next_turn();
    }
    duel.shoot_at(Some(victim));
    assert_eq!(duel.turn.last_outcome(), Some(TurnOutcome::Missed));
}

#[test]
fn test_friendly_fire_is_reported_as_ally_hit() {
    let mut duel = Duel::new(2).begin();
    duel.shoot_at(Some(ActorId(2)));
    assert_eq!(
        duel.turn.last_outcome(),
        Some(TurnOutcome::HitAlly {
            victim: ActorId(2),
            eliminated: false
        })
    );
    assert_eq!(duel.field.actor(ActorId(2)).unwrap().health(), 2);
}

#[test]
fn test_only_first_outcome_of_a_step_counts() {
    let mut duel = Duel::new(2).begin();
    let shooter = duel.turn.acting_actor().unwrap();
    let projectile = duel.shoot();
    let hit = ProjectileOutcome::Hit {
        projectile,
        shooter,
        victim: ActorId(1),
    };
    duel.turn.resolve_outcomes(&[hit, hit], &mut duel.field);
    duel.turn.resolve_outcomes(&[hit], &mut duel.field);

    let resolved = duel
        .turn
        .drain_events()
        .iter()
        .filter(|e| matches!(e, TurnEvent::Resolved { .. }))
        .count();
    assert_eq!(resolved, 1);
    assert_eq!(duel.field.actor(ActorId(1)).unwrap().health(), 2);
}

#[test]
fn test_last_robot_eliminated_ends_match_without_transition() {
    // Team A fields one robot, team B two
    let mut duel = Duel::new(2);
    duel.field.rosters.get_mut(Team::A).remove(ActorId(2));
    let mut duel = duel.begin();
    let target = ActorId(0);

    loop {
        match duel.turn.acting_team() {
            Some(Team::A) => duel.shoot_at(None),
            _ => duel.shoot_at(Some(target)),
        }
        if duel.turn.is_over() {
            break;
        }
        duel.next_turn();
    }

    assert_eq!(duel.turn.phase(), TurnPhase::GameOver);
    assert_eq!(duel.turn.result(), Some(MatchResult::Winner(Team::B)));
    assert_eq!(duel.turn.acting_team(), Some(Team::B));
    assert!(!duel.field.actor(target).unwrap().is_alive());

    let events = duel.turn.drain_events();
    assert!(events.contains(&TurnEvent::MatchOver(MatchResult::Winner(Team::B))));
    assert!(
        !events
            .iter()
            .any(|e| matches!(e, TurnEvent::PhaseChanged { to: TurnPhase::TurnTransition, .. }))
    );

    // Nothing moves once the match is over
    duel.turn.advance_timers(10.0, &mut duel.field);
    duel.press(InputAction::ToggleFirstPerson);
    assert_eq!(duel.turn.phase(), TurnPhase::GameOver);
}

#[test]
fn test_eliminating_both_last_robots_is_a_draw() {
    let mut duel = Duel::new(1);
    // Leave both survivors one hit from elimination
    for id in [ActorId(0), ActorId(1)] {
        let actor = duel.field.actor_mut(id).unwrap();
        actor.apply_hit();
        actor.apply_hit();
    }
    let mut duel = duel.begin();

    // The shooter's own team loses its last robot first
    let actor = duel.field.actor_mut(ActorId(0)).unwrap();
    actor.apply_hit();
    duel.field.rosters.get_mut(Team::A).remove(ActorId(0));
    duel.shoot_at(Some(ActorId(1)));

    assert_eq!(duel.turn.result(), Some(MatchResult::Draw));
}
