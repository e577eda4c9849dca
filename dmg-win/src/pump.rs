//! Per-frame presentation and input.
use dmg::Joypad;

use crate::{host::Host, keymap::KeyMap};

/// Drives one host frame at a time.
///
/// Each tick presents first, then drains input. Key transitions collected
/// during tick *N* are therefore seen by emulation code that runs after
/// tick *N* returns.
pub struct FramePump<H> {
    host: H,
    keymap: KeyMap,
}

impl<H: Host> FramePump<H> {
    pub fn new(host: H, keymap: KeyMap) -> Self {
        Self { host, keymap }
    }

    pub fn tick<J: Joypad + ?Sized>(&mut self, joypad: &mut J) {
        self.host.present();

        let keymap = &self.keymap;
        self.host
            .poll_events(&mut |keycode, transition| keymap.dispatch(keycode, transition, joypad));
    }

    /// Whether the user asked to close the window, as of the last tick.
    pub fn is_closed(&self) -> bool {
        self.host.close_requested()
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn keymap(&self) -> &KeyMap {
        &self.keymap
    }

    pub(crate) fn into_host(self) -> H {
        self.host
    }
}
