//! Runtime configuration with TOML support.
//!
//! All sub-structs use `#[serde(default)]` so a partial TOML file (e.g.
//! only overriding `[render]`) works correctly.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::CurvescopeError;

/// Window creation options.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct WindowOptions {
    /// Window title.
    pub title: String,
    /// Initial width in logical pixels.
    pub width: u32,
    /// Initial height in logical pixels.
    pub height: u32,
}

impl Default for WindowOptions {
    fn default() -> Self {
        Self {
            title: "Curvescope".to_owned(),
            width: 1280,
            height: 800,
        }
    }
}

/// Rendering options.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct RenderOptions {
    /// Vertex count per curve regeneration.
    pub samples: usize,
    /// Clear color, RGBA in [0, 1].
    pub background: [f32; 4],
    /// Half-extent of the XY gridlines.
    pub grid_extent: f32,
    /// Spacing between XY gridlines.
    pub grid_step: f32,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            samples: 100_000,
            background: [0.1, 0.1, 0.1, 1.0],
            grid_extent: 25.0,
            grid_step: 1.0,
        }
    }
}

/// Camera start options.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct CameraOptions {
    /// Initial distance from the focus point.
    pub distance: f32,
    /// Vertical field of view in degrees.
    pub fovy: f32,
}

impl Default for CameraOptions {
    fn default() -> Self {
        Self {
            distance: 20.0,
            fovy: 60.0,
        }
    }
}

/// Top-level options container.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct Options {
    /// Window creation options.
    pub window: WindowOptions,
    /// Rendering options.
    pub render: RenderOptions,
    /// Camera start options.
    pub camera: CameraOptions,
}

impl Options {
    /// Load options from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`CurvescopeError::Io`] if the file cannot be read,
    /// [`CurvescopeError::OptionsParse`] if it isn't valid TOML, and
    /// [`CurvescopeError::OptionsInvalid`] if a value is out of range.
    pub fn load(path: &Path) -> Result<Self, CurvescopeError> {
        let text = std::fs::read_to_string(path)?;
        let options: Self = toml::from_str(&text)
            .map_err(|e| CurvescopeError::OptionsParse(e.to_string()))?;
        options.validate()?;
        Ok(options)
    }

    /// Check value ranges that the serde layer cannot express.
    ///
    /// Grid dimensions must be finite and positive (a zero step would
    /// mean an unbounded number of gridlines) and at least one curve
    /// sample is required.
    ///
    /// # Errors
    ///
    /// Returns [`CurvescopeError::OptionsInvalid`] naming the offending
    /// field.
    pub fn validate(&self) -> Result<(), CurvescopeError> {
        let render = &self.render;
        if !(render.grid_step.is_finite() && render.grid_step > 0.0) {
            return Err(CurvescopeError::OptionsInvalid(format!(
                "render.grid_step must be a positive number, got {}",
                render.grid_step
            )));
        }
        if !(render.grid_extent.is_finite() && render.grid_extent > 0.0) {
            return Err(CurvescopeError::OptionsInvalid(format!(
                "render.grid_extent must be a positive number, got {}",
                render.grid_extent
            )));
        }
        if render.samples == 0 {
            return Err(CurvescopeError::OptionsInvalid(
                "render.samples must be at least 1".to_owned(),
            ));
        }
        Ok(())
    }

    /// Load options from `path` if given, falling back to defaults and
    /// logging when no file is supplied.
    #[must_use]
    pub fn load_or_default(path: Option<&Path>) -> Self {
        match path {
            Some(p) => Self::load(p).unwrap_or_else(|e| {
                log::warn!(
                    "failed to load options from {}: {e}; using defaults",
                    p.display()
                );
                Self::default()
            }),
            None => Self::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_sane() {
        let options = Options::default();
        assert_eq!(options.render.samples, 100_000);
        assert!(options.render.grid_extent > 0.0);
        assert!(options.window.width > 0 && options.window.height > 0);
    }

    #[test]
    fn partial_toml_overrides_one_section() {
        let options: Options =
            toml::from_str("[render]\nsamples = 5000\n").unwrap();
        assert_eq!(options.render.samples, 5000);
        assert_eq!(options.window, WindowOptions::default());
        assert_eq!(options.camera, CameraOptions::default());
    }

    #[test]
    fn zero_grid_step_is_rejected() {
        let options: Options =
            toml::from_str("[render]\ngrid_step = 0.0\n").unwrap();
        assert!(matches!(
            options.validate(),
            Err(CurvescopeError::OptionsInvalid(_))
        ));
    }

    #[test]
    fn out_of_range_values_are_rejected() {
        let mut options = Options::default();
        options.render.grid_step = -1.0;
        assert!(options.validate().is_err());

        let mut options = Options::default();
        options.render.grid_extent = f32::NAN;
        assert!(options.validate().is_err());

        let mut options = Options::default();
        options.render.samples = 0;
        assert!(options.validate().is_err());

        assert!(Options::default().validate().is_ok());
    }

    #[test]
    fn options_round_trip_through_toml() {
        let options = Options::default();
        let text = toml::to_string(&options).unwrap();
        let parsed: Options = toml::from_str(&text).unwrap();
        assert_eq!(parsed, options);
    }
}
