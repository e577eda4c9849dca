//! Application errors
use std::fmt;

#[derive(Debug)]
pub struct AppError {
    pub kind: ErrorKind,
}

impl std::error::Error for AppError {}

#[derive(Debug)]
pub enum ErrorKind {
    Io(std::io::Error),
    Conf(serde_yaml::Error),
    /// Logical screen size that cannot be turned into a window size.
    ScreenSize { width: u32, height: u32 },
    Window(winit::error::OsError),
    /// No display or GL config could be found for the window.
    Display(Box<dyn std::error::Error>),
    Gl(glutin::error::Error),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "application error: {}", self.kind)
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(err) => write!(f, "{err}"),
            Self::Conf(err) => write!(f, "config: {err}"),
            Self::ScreenSize { width, height } => write!(
                f,
                "screen size {width}x{height} must be non-zero and fit when zoomed"
            ),
            Self::Window(err) => write!(f, "{err}"),
            Self::Display(err) => write!(f, "display: {err}"),
            Self::Gl(err) => write!(f, "OpenGL: {err}"),
        }
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        Self {
            kind: ErrorKind::Io(err),
        }
    }
}

impl From<serde_yaml::Error> for AppError {
    fn from(err: serde_yaml::Error) -> Self {
        Self {
            kind: ErrorKind::Conf(err),
        }
    }
}

impl From<winit::error::OsError> for AppError {
    fn from(err: winit::error::OsError) -> Self {
        Self {
            kind: ErrorKind::Window(err),
        }
    }
}

impl From<Box<dyn std::error::Error>> for AppError {
    fn from(err: Box<dyn std::error::Error>) -> Self {
        Self {
            kind: ErrorKind::Display(err),
        }
    }
}

impl From<glutin::error::Error> for AppError {
    fn from(err: glutin::error::Error) -> Self {
        Self {
            kind: ErrorKind::Gl(err),
        }
    }
}
