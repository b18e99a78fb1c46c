//! Keyboard Input Module
//!
//! Generic key codes independent of the windowing system, plus the bridge
//! from `winit` physical keys.

/// Generic key codes, independent of windowing system.
///
/// These map to standard keyboard keys but are not tied to winit::keyboard::KeyCode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    // Letter keys
    W,
    A,
    S,
    D,
    Q,
    E,
    R,
    F,

    // Arrow keys
    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,

    // Control keys
    Space,
    Enter,
    Escape,
    Tab,
    ShiftLeft,
    ControlLeft,

    /// Catch-all for unhandled keys
    Unknown,
}

impl KeyCode {
    /// Convert a winit key code into the engine's key code.
    pub fn from_winit(key: winit::keyboard::KeyCode) -> Self {
        use winit::keyboard::KeyCode as W;
        match key {
            W::KeyW => KeyCode::W,
            W::KeyA => KeyCode::A,
            W::KeyS => KeyCode::S,
            W::KeyD => KeyCode::D,
            W::KeyQ => KeyCode::Q,
            W::KeyE => KeyCode::E,
            W::KeyR => KeyCode::R,
            W::KeyF => KeyCode::F,
            W::ArrowUp => KeyCode::ArrowUp,
            W::ArrowDown => KeyCode::ArrowDown,
            W::ArrowLeft => KeyCode::ArrowLeft,
            W::ArrowRight => KeyCode::ArrowRight,
            W::Space => KeyCode::Space,
            W::Enter => KeyCode::Enter,
            W::Escape => KeyCode::Escape,
            W::Tab => KeyCode::Tab,
            W::ShiftLeft => KeyCode::ShiftLeft,
            W::ControlLeft => KeyCode::ControlLeft,
            _ => KeyCode::Unknown,
        }
    }

    /// Convert a winit physical key (unidentified keys map to [`KeyCode::Unknown`]).
    pub fn from_physical(key: winit::keyboard::PhysicalKey) -> Self {
        match key {
            winit::keyboard::PhysicalKey::Code(code) => Self::from_winit(code),
            winit::keyboard::PhysicalKey::Unidentified(_) => KeyCode::Unknown,
        }
    }
}

impl From<winit::keyboard::KeyCode> for KeyCode {
    fn from(key: winit::keyboard::KeyCode) -> Self {
        Self::from_winit(key)
    }
}
