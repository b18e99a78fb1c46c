//! View Selector
//!
//! Tracks which camera is displayed. The base view follows the turn
//! (chase while walking, first-person while aiming); the overview flag is
//! an orthogonal override that only changes what is shown.

use crate::input::InputAction;

/// Camera mode shown to the player.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum CameraMode {
    /// Behind and above the acting robot
    #[default]
    Chase,
    /// From the acting robot's head, looking along its aim
    FirstPerson,
    /// Detached camera looking down on the whole arena
    Overview,
}

/// Base view plus overview override.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub struct ViewSelector {
    first_person: bool,
    overview: bool,
}

impl ViewSelector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Camera currently displayed.
    pub fn active(&self) -> CameraMode {
        if self.overview {
            CameraMode::Overview
        } else {
            self.base()
        }
    }

    /// Camera the turn logic asked for, ignoring the overview override.
    pub fn base(&self) -> CameraMode {
        if self.first_person {
            CameraMode::FirstPerson
        } else {
            CameraMode::Chase
        }
    }

    pub fn is_overview(&self) -> bool {
        self.overview
    }

    /// Switch the base view. Any explicit base change also drops the overview.
    pub fn set_first_person(&mut self, first_person: bool) {
        self.first_person = first_person;
        self.overview = false;
    }

    pub fn toggle_overview(&mut self) {
        self.overview = !self.overview;
    }

    /// Back to the chase camera with no override.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Whether `action` may be acted on under the current view.
    ///
    /// Releases always pass so held state can never get stuck. Charging needs
    /// the crosshair, so a charge press is refused unless first-person is shown.
    pub fn accepts(&self, action: InputAction, pressed: bool) -> bool {
        if !pressed {
            return true;
        }
        match action {
            InputAction::Charge => self.active() == CameraMode::FirstPerson,
            _ => true,
        }
    }

    /// Crosshair and power readout are visible only while first-person is displayed.
    pub fn shows_crosshair(&self) -> bool {
        self.active() == CameraMode::FirstPerson
    }
}
