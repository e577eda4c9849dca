//! Host runtime interface.
use winit::event::VirtualKeyCode;

use crate::keymap::Transition;

/// Hooks into the windowing runtime that the frame pump drives.
///
/// Implementations are bound to the thread that created them. Every
/// call, including key callbacks made from [`Host::poll_events`],
/// happens on that thread.
pub trait Host {
    /// Present the most recently rendered back buffer.
    ///
    /// May block for up to one display refresh when vsync is on.
    fn present(&mut self);

    /// Drain all pending events, invoking `on_key` for every key transition.
    ///
    /// Returns once the queue is empty.
    fn poll_events(&mut self, on_key: &mut dyn FnMut(VirtualKeyCode, Transition));

    /// Whether the user asked to close the window, as of the last poll.
    fn close_requested(&self) -> bool;
}

impl<H: Host + ?Sized> Host for Box<H> {
    fn present(&mut self) {
        (**self).present()
    }

    fn poll_events(&mut self, on_key: &mut dyn FnMut(VirtualKeyCode, Transition)) {
        (**self).poll_events(on_key)
    }

    fn close_requested(&self) -> bool {
        (**self).close_requested()
    }
}
