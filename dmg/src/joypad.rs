//! Joypad buttons and the hooks to drive them.
use std::fmt;

use crate::constants::BUTTON_COUNT;

/// Receives button transitions from the front end.
///
/// Notifications are fire-and-forget. Implementations must tolerate
/// repeated presses or releases of the same button.
pub trait Joypad {
    fn button_pressed(&mut self, button: Button);

    fn button_released(&mut self, button: Button);
}

impl<J: Joypad + ?Sized> Joypad for &mut J {
    #[inline]
    fn button_pressed(&mut self, button: Button) {
        (**self).button_pressed(button)
    }

    #[inline]
    fn button_released(&mut self, button: Button) {
        (**self).button_released(button)
    }
}

/// The eight buttons of the DMG.
///
/// Discriminants follow the bit order of the P1 register,
/// direction keys in the low nibble and action keys in the high nibble.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Button {
    Right = 0,
    Left,
    Up,
    Down,
    A,
    B,
    Select,
    Start = 7,
}

impl Button {
    pub const ALL: [Button; BUTTON_COUNT as usize] = [
        Self::Right,
        Self::Left,
        Self::Up,
        Self::Down,
        Self::A,
        Self::B,
        Self::Select,
        Self::Start,
    ];

    pub fn as_u8(&self) -> u8 {
        *self as u8
    }

    #[inline]
    fn mask(&self) -> u8 {
        1 << self.as_u8()
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Right => "Right",
            Self::Left => "Left",
            Self::Up => "Up",
            Self::Down => "Down",
            Self::A => "A",
            Self::B => "B",
            Self::Select => "Select",
            Self::Start => "Start",
        }
    }
}

impl fmt::Display for Button {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl From<Button> for u8 {
    fn from(button: Button) -> Self {
        button.as_u8()
    }
}

impl TryFrom<u8> for Button {
    type Error = InvalidButton;

    fn try_from(button_id: u8) -> Result<Self, Self::Error> {
        Self::ALL
            .get(button_id as usize)
            .copied()
            .ok_or(InvalidButton(button_id))
    }
}

#[derive(Debug, PartialEq, Eq)]
pub struct InvalidButton(pub u8);

impl std::error::Error for InvalidButton {}

impl fmt::Display for InvalidButton {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "button id must be in range 0 <= id < {BUTTON_COUNT}, got {}",
            self.0
        )
    }
}

/// Pressed state of every button, packed into a single byte.
///
/// A set bit means the button is held down.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct JoypadState(u8);

impl JoypadState {
    pub fn new() -> Self {
        Self(0)
    }

    pub fn press(&mut self, button: Button) {
        self.0 |= button.mask();
    }

    pub fn release(&mut self, button: Button) {
        self.0 &= !button.mask();
    }

    pub fn is_pressed(&self, button: Button) -> bool {
        self.0 & button.mask() != 0
    }

    pub fn bits(&self) -> u8 {
        self.0
    }

    pub fn iter_pressed(&self) -> impl Iterator<Item = Button> + '_ {
        Button::ALL
            .into_iter()
            .filter(move |button| self.is_pressed(*button))
    }
}

impl Joypad for JoypadState {
    fn button_pressed(&mut self, button: Button) {
        self.press(button)
    }

    fn button_released(&mut self, button: Button) {
        self.release(button)
    }
}

impl fmt::Display for JoypadState {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for (index, button) in self.iter_pressed().enumerate() {
            if index > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{button}")?;
        }
        Ok(())
    }
}
