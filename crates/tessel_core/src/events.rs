//! Input vocabulary
//!
//! Raw device polling lives outside the engine; hosts translate their
//! platform events into these types before handing them to the tree.

/// Virtual key codes (platform-agnostic)
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub struct KeyCode(pub u32);

impl KeyCode {
    pub const A: KeyCode = KeyCode(0x41);
    pub const D: KeyCode = KeyCode(0x44);
    pub const S: KeyCode = KeyCode(0x53);
    pub const W: KeyCode = KeyCode(0x57);

    pub const KEY_1: KeyCode = KeyCode(0x31);
    pub const KEY_2: KeyCode = KeyCode(0x32);
    pub const KEY_3: KeyCode = KeyCode(0x33);

    pub const BACKSPACE: KeyCode = KeyCode(0x08);
    pub const TAB: KeyCode = KeyCode(0x09);
    pub const ENTER: KeyCode = KeyCode(0x0D);
    pub const ESCAPE: KeyCode = KeyCode(0x1B);
    pub const SPACE: KeyCode = KeyCode(0x20);

    pub const LEFT: KeyCode = KeyCode(0x25);
    pub const UP: KeyCode = KeyCode(0x26);
    pub const RIGHT: KeyCode = KeyCode(0x27);
    pub const DOWN: KeyCode = KeyCode(0x28);

    pub const UNKNOWN: KeyCode = KeyCode(0);

    /// Arrow keys map onto navigation directions
    pub fn nav_direction(self) -> Option<NavDirection> {
        match self {
            KeyCode::UP => Some(NavDirection::Up),
            KeyCode::DOWN => Some(NavDirection::Down),
            KeyCode::LEFT => Some(NavDirection::Left),
            KeyCode::RIGHT => Some(NavDirection::Right),
            _ => None,
        }
    }
}

/// Gamepad buttons, named by position rather than by vendor label
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum GamepadButton {
    South,
    East,
    West,
    North,
    LeftShoulder,
    RightShoulder,
    Start,
    Select,
    DpadUp,
    DpadDown,
    DpadLeft,
    DpadRight,
}

impl GamepadButton {
    /// D-pad buttons map onto navigation directions
    pub fn nav_direction(self) -> Option<NavDirection> {
        match self {
            GamepadButton::DpadUp => Some(NavDirection::Up),
            GamepadButton::DpadDown => Some(NavDirection::Down),
            GamepadButton::DpadLeft => Some(NavDirection::Left),
            GamepadButton::DpadRight => Some(NavDirection::Right),
            _ => None,
        }
    }
}

/// Pointer buttons
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum MouseButton {
    #[default]
    Left,
    Right,
    Middle,
}

/// The device class currently driving the UI.
///
/// Layout rules may hide elements for a given source, so switching source
/// forces a full re-layout.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum InputSource {
    #[default]
    KeyboardMouse,
    Controller,
    Touchscreen,
}

impl InputSource {
    /// Stable lowercase id used by layout tokens and config files
    pub fn id(self) -> &'static str {
        match self {
            InputSource::KeyboardMouse => "keyboardmouse",
            InputSource::Controller => "controller",
            InputSource::Touchscreen => "touchscreen",
        }
    }

    pub fn from_id(id: &str) -> Option<InputSource> {
        match id {
            "keyboardmouse" => Some(InputSource::KeyboardMouse),
            "controller" => Some(InputSource::Controller),
            "touchscreen" => Some(InputSource::Touchscreen),
            _ => None,
        }
    }
}

/// Directional focus input
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum NavDirection {
    Up,
    Down,
    Left,
    Right,
}
