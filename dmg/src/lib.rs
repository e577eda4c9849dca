pub mod constants;
mod joypad;

pub use self::joypad::{Button, InvalidButton, Joypad, JoypadState};

pub mod prelude {
    pub use super::{
        constants::*,
        joypad::{Button, Joypad, JoypadState},
    };
}
