//! App flow
//!
//! Screens around a match: main menu, instructions, the match itself and
//! the victory screen shown on top of a finished match.

use super::config::{ConfigError, GameConfig};
use super::hud::VictoryAction;
use super::session::{FrameSnapshot, Match};

/// Controls help shown on the instructions screen.
pub const INSTRUCTIONS: &str = "\
Two teams of robots take turns. Each turn one robot may walk, aim and fire a single shot.

W / Up      walk forward (aim up when in first person)
S / Down    walk backward (aim down when in first person)
A / Left    turn left
D / Right   turn right
Q           switch to first person to aim
E           look at the whole arena
Space       hold to charge, release to fire (first person only)

Every robot survives two hits. The last team standing wins.";

/// Main menu entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    NewGame,
    Instructions,
}

impl MenuChoice {
    pub const ALL: [MenuChoice; 2] = [MenuChoice::NewGame, MenuChoice::Instructions];

    pub fn label(self) -> &'static str {
        match self {
            MenuChoice::NewGame => "New game",
            MenuChoice::Instructions => "How to play",
        }
    }
}

/// What the player is looking at.
#[derive(Debug)]
pub enum Screen {
    MainMenu,
    Instructions,
    InMatch(Box<Match>),
}

/// Top-level state machine.
#[derive(Debug)]
pub struct App {
    config: GameConfig,
    screen: Screen,
}

impl App {
    /// Start on the main menu. The config is validated up front so a new
    /// game can never fail later.
    pub fn new(config: GameConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            config,
            screen: Screen::MainMenu,
        })
    }

    pub fn screen(&self) -> &Screen {
        &self.screen
    }

    pub fn current_match(&mut self) -> Option<&mut Match> {
        match &mut self.screen {
            Screen::InMatch(game) => Some(game.as_mut()),
            _ => None,
        }
    }

    /// Pick a main menu entry. Ignored on other screens.
    pub fn choose(&mut self, choice: MenuChoice) -> Result<(), ConfigError> {
        if !matches!(self.screen, Screen::MainMenu) {
            return Ok(());
        }
        match choice {
            MenuChoice::NewGame => self.start_match()?,
            MenuChoice::Instructions => self.screen = Screen::Instructions,
        }
        Ok(())
    }

    /// Leave the instructions screen.
    pub fn back(&mut self) {
        if matches!(self.screen, Screen::Instructions) {
            self.screen = Screen::MainMenu;
        }
    }

    /// Pick a victory screen action. Ignored until the match is over.
    pub fn victory(&mut self, action: VictoryAction) -> Result<(), ConfigError> {
        let over = matches!(&self.screen, Screen::InMatch(game) if game.is_over());
        if !over {
            return Ok(());
        }
        match action {
            VictoryAction::NewGame => self.start_match()?,
            VictoryAction::MainMenu => self.screen = Screen::MainMenu,
        }
        Ok(())
    }

    /// Run one frame of the match, if one is on screen.
    pub fn frame(&mut self, dt: f32) -> Option<FrameSnapshot> {
        self.current_match().map(|game| game.frame(dt))
    }

    fn start_match(&mut self) -> Result<(), ConfigError> {
        let game = Match::new(self.config.clone())?;
        tracing::info!("new match");
        self.screen = Screen::InMatch(Box::new(game));
        Ok(())
    }
}
