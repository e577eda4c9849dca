use std::fmt;

use glow::{Context as GlowContext, HasContext};
use glutin::display::Display;
use glutin::prelude::GlDisplay;

/// The loaded OpenGL functions.
///
/// Drawing the emulated screen happens on the emulator side. The front end
/// only blanks the surface at startup and reports what the driver handed out.
pub struct Render {
    gl: GlowContext,
    info: GlInfo,
}

impl Render {
    /// The context must be current on the calling thread.
    pub fn new(gl_display: &Display) -> Self {
        let gl = unsafe {
            glow::Context::from_loader_function_cstr(|symbol| gl_display.get_proc_address(symbol))
        };
        let info = GlInfo::query(&gl);

        Self { gl, info }
    }

    pub fn clear(&mut self, red: f32, green: f32, blue: f32) {
        unsafe {
            self.gl.clear_color(red, green, blue, 1.0);
            self.gl.clear(glow::COLOR_BUFFER_BIT);
        }
    }

    pub fn info(&self) -> &GlInfo {
        &self.info
    }
}

/// Driver strings of the current context.
pub struct GlInfo {
    pub version: String,
    pub renderer: String,
    pub vendor: String,
}

impl GlInfo {
    fn query(gl: &GlowContext) -> Self {
        unsafe {
            Self {
                version: gl.get_parameter_string(glow::VERSION),
                renderer: gl.get_parameter_string(glow::RENDERER),
                vendor: gl.get_parameter_string(glow::VENDOR),
            }
        }
    }

    /// Major and minor version the driver granted.
    ///
    /// Desktop drivers report `"<major>.<minor>[.<release>] [vendor info]"`,
    /// while ES drivers prefix it with `"OpenGL ES "`.
    pub fn parse_version(&self) -> Option<(u8, u8)> {
        parse_version(&self.version)
    }
}

fn parse_version(version: &str) -> Option<(u8, u8)> {
    let number = version
        .trim_start_matches("OpenGL ES-CM ")
        .trim_start_matches("OpenGL ES-CL ")
        .trim_start_matches("OpenGL ES ")
        .split_whitespace()
        .next()?;

    let mut parts = number.split('.');
    let major = parts.next()?.parse().ok()?;
    let minor = parts.next()?.parse().ok()?;

    Some((major, minor))
}

impl fmt::Display for GlInfo {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let Self {
            version,
            renderer,
            vendor,
        } = self;
        writeln!(f, "OpenGL Version: {version}")?;
        writeln!(f, "Renderer: {renderer}")?;
        write!(f, "Vendor: {vendor}")
    }
}
