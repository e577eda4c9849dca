mod app;
mod conf;
mod error;
mod host;
mod keymap;
mod pump;
mod render;
mod surface;

pub type EventLoop = winit::event_loop::EventLoop<()>;

pub use self::{
    app::{Frontend, Lifecycle},
    conf::{WindowConf, DEFAULT_TITLE, ZOOM},
    error::{AppError, ErrorKind},
    host::Host,
    keymap::{KeyBinding, KeyMap, Transition, DEFAULT_BINDINGS},
    pump::FramePump,
    render::GlInfo,
    surface::{Surface, GL_VERSION},
};

/// Re-exported so callers can name host keys without depending on winit.
pub use winit::event::VirtualKeyCode;
