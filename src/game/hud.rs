//! HUD state
//!
//! Text and visibility flags a renderer needs to draw the overlay. Nothing
//! here draws; it only derives strings from the turn state.

use super::team::Team;
use super::turn::{MatchResult, TurnController, TurnOutcome, TurnPhase};

/// Choices on the victory screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VictoryAction {
    NewGame,
    MainMenu,
}

impl VictoryAction {
    pub const ALL: [VictoryAction; 2] = [VictoryAction::NewGame, VictoryAction::MainMenu];

    pub fn label(self) -> &'static str {
        match self {
            VictoryAction::NewGame => "New game",
            VictoryAction::MainMenu => "Main menu",
        }
    }
}

/// Overlay contents for one frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HudState {
    /// Two-digit countdown, e.g. `"07"`
    pub countdown: String,
    /// `"POWER: x.x"`
    pub power: String,
    /// Crosshair and power readout visible
    pub show_aim: bool,
    /// Result of the turn that just ended
    pub banner: Option<&'static str>,
    /// Victory text once the match is over
    pub victory: Option<&'static str>,
}

impl HudState {
    pub fn from_turn(turn: &TurnController) -> Self {
        let banner = match turn.phase() {
            TurnPhase::TurnTransition | TurnPhase::GameOver => turn.last_outcome().and_then(outcome_banner),
            _ => None,
        };
        Self {
            countdown: format_countdown(turn.countdown_display()),
            power: format_power(turn.power()),
            show_aim: turn.view().shows_crosshair(),
            banner,
            victory: turn.result().map(victory_text),
        }
    }
}

/// Whole seconds, always at least two digits.
pub fn format_countdown(seconds: u32) -> String {
    format!("{seconds:02}")
}

pub fn format_power(power: f32) -> String {
    format!("POWER: {power:.1}")
}

/// Banner for a resolved shot. Timeouts show none.
pub fn outcome_banner(outcome: TurnOutcome) -> Option<&'static str> {
    match outcome {
        TurnOutcome::HitEnemy { .. } => Some("You've hit an enemy!"),
        TurnOutcome::HitAlly { .. } => Some("You've hit an ally!"),
        TurnOutcome::Missed => Some("You missed!"),
        TurnOutcome::TimedOut => None,
    }
}

pub fn victory_text(result: MatchResult) -> &'static str {
    match result {
        MatchResult::Winner(Team::A) => "RED TEAM WINS!",
        MatchResult::Winner(Team::B) => "BLUE TEAM WINS!",
        MatchResult::Draw => "DRAW!",
    }
}
