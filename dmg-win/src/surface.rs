use std::collections::HashSet;
use std::num::NonZeroU32;

use glutin::config::{Config as GlutinConfig, ConfigTemplateBuilder};
use glutin::context::{
    ContextApi, ContextAttributesBuilder, GlProfile, PossiblyCurrentContext, Version as GlVersion,
};
use glutin::display::GetGlDisplay;
use glutin::prelude::*;
use glutin::surface::{Surface as GlutinSurface, SwapInterval, WindowSurface};
use glutin_winit::{DisplayBuilder, GlWindow};
use raw_window_handle::HasRawWindowHandle;
use winit::dpi::LogicalSize;
use winit::event::{ElementState, Event as EV, VirtualKeyCode, WindowEvent as WE};
use winit::event_loop::EventLoopBuilder;
use winit::platform::run_return::EventLoopExtRunReturn;
use winit::window::{Window, WindowBuilder};

use crate::{
    conf::WindowConf,
    error::AppError,
    host::Host,
    keymap::Transition,
    render::{GlInfo, Render},
    EventLoop,
};

/// Legacy context version requested from the driver.
pub const GL_VERSION: (u8, u8) = (2, 1);

/// The live window, its OpenGL context, and the event loop that feeds it.
///
/// Only one can exist per process. The handle is neither `Send` nor `Sync`:
/// the event loop and the current context stay on the thread that built
/// them. Dropping it releases every host resource.
pub struct Surface {
    render: Render,
    gl_surface: GlutinSurface<WindowSurface>,
    gl_context: PossiblyCurrentContext,
    window: Window,
    /// Keys currently held down, for telling auto-repeat apart from presses.
    held: HashSet<VirtualKeyCode>,
    close_requested: bool,
    event_loop: EventLoop,
}

impl Surface {
    /// Create the window with an OpenGL context current on this thread.
    ///
    /// - For Windows, the main window must be created first, for the OpenGL
    ///   context to be created.
    /// - For Android, the OpenGL context is created before the window exists.
    pub fn new(conf: &WindowConf) -> Result<Self, AppError> {
        // Checked before touching the host, which panics on a zero size.
        let [width, height] = conf.surface_size()?;

        let event_loop = EventLoopBuilder::new().build();
        log::info!("host init ok");

        // --------------------------------------------------------------------
        // Window

        let window_builder = WindowBuilder::new()
            .with_resizable(false)
            .with_inner_size(LogicalSize::new(width.get(), height.get()))
            .with_title(conf.title.as_str());

        let template = ConfigTemplateBuilder::new();

        let (window, gl_config) = DisplayBuilder::new()
            .with_window_builder(Some(window_builder.clone()))
            .build(&event_loop, template, pick_config)?;

        // On Android, the window is not available when the OpenGL display has to be created.
        // However on Windows the main window must first exist before OpenGL can be initialized.
        let window = match window {
            Some(window) => window,
            None => {
                log::info!("creating window with finalize_window");
                glutin_winit::finalize_window(&event_loop, window_builder, &gl_config)?
            }
        };

        // --------------------------------------------------------------------
        // OpenGL Context

        let raw_window_handle = window.raw_window_handle();
        let gl_display = gl_config.display();

        // The version is a request. Drivers may hand out anything compatible.
        let (major, minor) = GL_VERSION;
        let context_attributes = ContextAttributesBuilder::new()
            .with_context_api(ContextApi::OpenGl(Some(GlVersion::new(major, minor))))
            .with_profile(GlProfile::Compatibility)
            .build(Some(raw_window_handle));

        let fallback_context_attributes = ContextAttributesBuilder::new()
            .with_context_api(ContextApi::Gles(None))
            .build(Some(raw_window_handle));

        let not_current_gl_context = unsafe {
            match gl_display.create_context(&gl_config, &context_attributes) {
                Ok(context) => context,
                Err(err) => {
                    log::warn!("falling back to OpenGL ES: {err}");
                    gl_display.create_context(&gl_config, &fallback_context_attributes)?
                }
            }
        };

        // --------------------------------------------------------------------
        // Surface

        let attrs = window.build_surface_attributes(<_>::default());
        let gl_surface = unsafe { gl_display.create_window_surface(&gl_config, &attrs)? };

        // Binds the context to this thread for the lifetime of the surface.
        let gl_context = not_current_gl_context.make_current(&gl_surface)?;

        // Caps the frame rate to the display refresh. Best effort.
        if let Err(err) =
            gl_surface.set_swap_interval(&gl_context, SwapInterval::Wait(NonZeroU32::MIN))
        {
            log::error!("error setting vsync: {err:?}");
        }

        // --------------------------------------------------------------------
        // OpenGL Function Pointers

        let mut render = Render::new(&gl_display);
        render.clear(0.0, 0.0, 0.0);

        let surface = Self {
            render,
            gl_surface,
            gl_context,
            window,
            held: HashSet::new(),
            close_requested: false,
            event_loop,
        };
        log_gl_info(surface.gl_info());
        log::info!("window ok: {width}x{height}");

        Ok(surface)
    }

    /// Driver details of the context that was actually granted.
    pub fn gl_info(&self) -> &GlInfo {
        self.render.info()
    }
}

impl Host for Surface {
    fn present(&mut self) {
        if let Err(err) = self.gl_surface.swap_buffers(&self.gl_context) {
            log::error!("error swapping buffers: {err}");
        }
    }

    fn poll_events(&mut self, on_key: &mut dyn FnMut(VirtualKeyCode, Transition)) {
        let main_window_id = self.window.id();
        let held = &mut self.held;
        let close_requested = &mut self.close_requested;

        // Returns as soon as the queue is drained, instead of waiting for exit.
        self.event_loop.run_return(|event, _, control_flow| {
            control_flow.set_poll();

            match event {
                EV::WindowEvent { window_id, event } if window_id == main_window_id => {
                    match event {
                        WE::KeyboardInput { input, .. } => {
                            if let Some(keycode) = input.virtual_keycode {
                                on_key(keycode, classify(held, keycode, input.state));
                            }
                        }
                        WE::Focused(false) => focus_lost(held),
                        WE::CloseRequested => {
                            *close_requested = true;
                        }
                        _ => { /* blank */ }
                    }
                }
                EV::MainEventsCleared => {
                    control_flow.set_exit();
                }
                _ => { /* blank */ }
            }
        });
    }

    fn close_requested(&self) -> bool {
        self.close_requested
    }
}

impl Drop for Surface {
    fn drop(&mut self) {
        log::info!("teardown");
    }
}

/// Pick the first hardware accelerated config, or whatever comes first.
fn pick_config(configs: Box<dyn Iterator<Item = GlutinConfig> + '_>) -> GlutinConfig {
    let mut picked: Option<GlutinConfig> = None;

    for c in configs {
        log::debug!(
            "consider config: num_samples={}, hardware_accelerated={}",
            c.num_samples(),
            c.hardware_accelerated()
        );

        let upgrade = picked
            .as_ref()
            .map(|config| c.hardware_accelerated() && !config.hardware_accelerated())
            .unwrap_or(true);

        if upgrade {
            picked = Some(c);
        }
    }

    picked.expect("the system must supply at least one GL config")
}

fn log_gl_info(info: &GlInfo) {
    log::info!("created OpenGL renderer:\n{info}");

    match info.parse_version() {
        Some(granted) if granted < GL_VERSION => {
            log::warn!(
                "driver granted OpenGL {}.{}, requested {}.{}",
                granted.0,
                granted.1,
                GL_VERSION.0,
                GL_VERSION.1
            );
        }
        Some(_) => {}
        None => log::warn!("unrecognised OpenGL version string: {}", info.version),
    }
}

/// Turn a winit element state into a transition.
///
/// winit reports auto-repeat as further presses, so a press for a key that
/// is already held counts as a repeat.
pub(crate) fn classify(
    held: &mut HashSet<VirtualKeyCode>,
    keycode: VirtualKeyCode,
    state: ElementState,
) -> Transition {
    match state {
        ElementState::Pressed => {
            if held.insert(keycode) {
                Transition::Pressed
            } else {
                Transition::Repeat
            }
        }
        ElementState::Released => {
            held.remove(&keycode);
            Transition::Released
        }
    }
}

/// Forget held keys when the window loses focus.
///
/// Releases may never arrive for keys held while unfocused, and a stale
/// entry would turn the next real press into a repeat.
pub(crate) fn focus_lost(held: &mut HashSet<VirtualKeyCode>) {
    held.clear();
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_classify_repeat() {
        let mut held = HashSet::new();
        let key = VirtualKeyCode::Up;

        assert_eq!(classify(&mut held, key, ElementState::Pressed), Transition::Pressed);
        assert_eq!(classify(&mut held, key, ElementState::Pressed), Transition::Repeat);
        assert_eq!(classify(&mut held, key, ElementState::Pressed), Transition::Repeat);
        assert_eq!(classify(&mut held, key, ElementState::Released), Transition::Released);
        assert_eq!(classify(&mut held, key, ElementState::Pressed), Transition::Pressed);
    }

    #[test]
    fn test_classify_independent_keys() {
        let mut held = HashSet::new();

        assert_eq!(
            classify(&mut held, VirtualKeyCode::A, ElementState::Pressed),
            Transition::Pressed
        );
        assert_eq!(
            classify(&mut held, VirtualKeyCode::S, ElementState::Pressed),
            Transition::Pressed
        );
        assert_eq!(
            classify(&mut held, VirtualKeyCode::A, ElementState::Released),
            Transition::Released
        );
        assert_eq!(
            classify(&mut held, VirtualKeyCode::S, ElementState::Pressed),
            Transition::Repeat
        );
    }

    #[test]
    fn test_press_after_focus_lost() {
        let mut held = HashSet::new();
        let key = VirtualKeyCode::Return;

        assert_eq!(classify(&mut held, key, ElementState::Pressed), Transition::Pressed);

        // The release happened while another window had focus.
        focus_lost(&mut held);

        assert_eq!(classify(&mut held, key, ElementState::Pressed), Transition::Pressed);
        assert_eq!(classify(&mut held, key, ElementState::Pressed), Transition::Repeat);
    }

    #[test]
    fn test_classify_stray_release() {
        let mut held = HashSet::new();

        assert_eq!(
            classify(&mut held, VirtualKeyCode::Return, ElementState::Released),
            Transition::Released
        );
        assert!(held.is_empty());
    }
}
