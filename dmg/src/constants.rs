//! Constant values of the DMG hardware, as seen by the front end.

/// Width of the LCD in pixels.
pub const SCREEN_WIDTH: u32 = 160;
/// Height of the LCD in pixels.
pub const SCREEN_HEIGHT: u32 = 144;

/// Number of buttons on the joypad.
pub const BUTTON_COUNT: u8 = 8;
