use dmg::Joypad;

use crate::{
    conf::WindowConf, error::AppError, host::Host, keymap::KeyMap, pump::FramePump,
    surface::Surface,
};

/// Observable state of the front end.
///
/// There is no uninitialized state: a [`Frontend`] only exists once setup
/// succeeded, and tearing it down consumes it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lifecycle {
    Running,
    /// The user asked to close the window. Ticking is still allowed.
    Closed,
}

/// DMG window front end.
///
/// Owns the host surface for its whole life. Host resources are released
/// when the front end is dropped, which covers early returns and unwinding
/// as well as [`Frontend::teardown`].
pub struct Frontend<H: Host = Surface> {
    pump: FramePump<H>,
}

impl Frontend<Surface> {
    /// Open the window and make its context current on this thread.
    pub fn initialize(conf: &WindowConf) -> Result<Self, AppError> {
        let surface = Surface::new(conf)?;
        Ok(Self::with_host(surface))
    }
}

impl<H: Host> Frontend<H> {
    /// Wrap an already initialized host, with the default key bindings.
    pub fn with_host(host: H) -> Self {
        Self::with_keymap(host, KeyMap::default())
    }

    pub fn with_keymap(host: H, keymap: KeyMap) -> Self {
        Self {
            pump: FramePump::new(host, keymap),
        }
    }

    /// Present the last frame and forward pending input to the joypad.
    #[inline]
    pub fn tick<J: Joypad + ?Sized>(&mut self, joypad: &mut J) {
        self.pump.tick(joypad)
    }

    #[inline]
    pub fn is_closed(&self) -> bool {
        self.pump.is_closed()
    }

    pub fn state(&self) -> Lifecycle {
        if self.is_closed() {
            Lifecycle::Closed
        } else {
            Lifecycle::Running
        }
    }

    pub fn host(&self) -> &H {
        self.pump.host()
    }

    /// Run until the window is closed, then tear down.
    ///
    /// `frame` is called once per tick, before presenting, to step
    /// the emulator.
    pub fn run<J, F>(mut self, joypad: &mut J, mut frame: F)
    where
        J: Joypad + ?Sized,
        F: FnMut(&mut J),
    {
        while !self.is_closed() {
            frame(joypad);
            self.tick(joypad);
        }

        self.teardown();
    }

    /// Release the host and return it, for callers that want to inspect it.
    pub fn into_host(self) -> H {
        self.pump.into_host()
    }

    /// Release all host resources.
    pub fn teardown(self) {
        log::debug!("frontend teardown in state {:?}", self.state());
        drop(self.into_host());
    }
}
