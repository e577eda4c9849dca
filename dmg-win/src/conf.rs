//! Window configuration.
use std::{num::NonZeroU32, path::Path};

use dmg::constants::{SCREEN_HEIGHT, SCREEN_WIDTH};
use serde::Deserialize;
use smol_str::SmolStr;

use crate::error::{AppError, ErrorKind};

/// Integer scale applied to the logical screen to size the window.
pub const ZOOM: u32 = 5;

pub const DEFAULT_TITLE: &str = "Hack & Sangria - GB Emu";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct WindowConf {
    pub title: SmolStr,
    /// Logical width of the emulated screen, in pixels.
    pub screen_width: u32,
    /// Logical height of the emulated screen, in pixels.
    pub screen_height: u32,
}

impl WindowConf {
    pub fn from_file(filepath: impl AsRef<Path>) -> Result<Self, AppError> {
        let file = std::fs::File::open(filepath.as_ref())?;
        let conf: Self = serde_yaml::from_reader(file)?;
        log::debug!("loaded window config: {conf:#?}");
        conf.surface_size()?;
        Ok(conf)
    }

    pub fn from_yaml(source: &str) -> Result<Self, AppError> {
        let conf: Self = serde_yaml::from_str(source)?;
        conf.surface_size()?;
        Ok(conf)
    }

    /// Size of the window's client area, with zoom applied.
    ///
    /// Fails when either side is zero or does not fit in a `u32` once zoomed.
    pub fn surface_size(&self) -> Result<[NonZeroU32; 2], AppError> {
        let zoomed = |side: u32| side.checked_mul(ZOOM).and_then(NonZeroU32::new);

        match (zoomed(self.screen_width), zoomed(self.screen_height)) {
            (Some(width), Some(height)) => Ok([width, height]),
            _ => Err(AppError {
                kind: ErrorKind::ScreenSize {
                    width: self.screen_width,
                    height: self.screen_height,
                },
            }),
        }
    }
}

impl Default for WindowConf {
    fn default() -> Self {
        Self {
            title: SmolStr::new(DEFAULT_TITLE),
            screen_width: SCREEN_WIDTH,
            screen_height: SCREEN_HEIGHT,
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_default_size() {
        let conf = WindowConf::default();
        let [width, height] = conf.surface_size().unwrap();
        assert_eq!([width.get(), height.get()], [800, 720]);
        assert_eq!(conf.title.as_str(), DEFAULT_TITLE);
    }

    #[test]
    fn test_partial_yaml() {
        let conf = WindowConf::from_yaml("title: test window\n").unwrap();
        assert_eq!(conf.title.as_str(), "test window");
        assert_eq!(conf.screen_width, SCREEN_WIDTH);
        assert_eq!(conf.screen_height, SCREEN_HEIGHT);
    }

    #[test]
    fn test_screen_override() {
        let conf = WindowConf::from_yaml("screen_width: 64\nscreen_height: 32\n").unwrap();
        let [width, height] = conf.surface_size().unwrap();
        assert_eq!([width.get(), height.get()], [320, 160]);
    }

    #[test]
    fn test_zero_screen_rejected() {
        let err = WindowConf::from_yaml("screen_width: 0\n").unwrap_err();
        assert!(matches!(
            err.kind,
            ErrorKind::ScreenSize {
                width: 0,
                height: SCREEN_HEIGHT
            }
        ));

        let err = WindowConf::from_yaml("screen_height: 0\n").unwrap_err();
        assert!(matches!(err.kind, ErrorKind::ScreenSize { height: 0, .. }));
    }

    #[test]
    fn test_oversized_screen_rejected() {
        let err = WindowConf::from_yaml("screen_width: 1000000000\n").unwrap_err();
        assert!(matches!(
            err.kind,
            ErrorKind::ScreenSize {
                width: 1_000_000_000,
                ..
            }
        ));

        // Built by hand, bypassing the loader.
        let conf = WindowConf {
            screen_height: u32::MAX,
            ..WindowConf::default()
        };
        assert!(conf.surface_size().is_err());
    }

    #[test]
    fn test_bad_yaml() {
        let err = WindowConf::from_yaml("screen_width: wide\n").unwrap_err();
        assert!(matches!(err.kind, ErrorKind::Conf(_)));
    }
}
