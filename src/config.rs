//! Render configuration.
//!
//! A configuration is a set of optional values. Values can come from a JSON
//! file and from the command line; [`RenderConfig::overlay`] layers them and
//! [`RenderConfig::resolve`] fills the gaps with defaults and validates the
//! result.

use std::fs;
use std::path::{Path, PathBuf};

use glam::Vec3A;
use serde::Deserialize;
use thiserror::Error;

use crate::camera::CameraSettings;
use crate::integrator::Background;
use crate::presets::ScenePreset;
use crate::sphere::Sphere;
use crate::vector::{near_zero, unit_or_none};

/// Default output file.
pub const DEFAULT_OUTPUT: &str = "result.ppm";

/// Default recursion depth.
pub const DEFAULT_MAX_DEPTH: u32 = 50;

/// Errors that can occur while loading or validating a configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("failed to read config {path}: {source}")]
    Io {
        /// File that was being read
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// The configuration file is not valid JSON for [`RenderConfig`].
    #[error("invalid config: {0}")]
    Parse(#[from] serde_json::Error),

    /// A value is out of range.
    #[error("invalid value for {field}: {reason}")]
    Invalid {
        /// Offending field
        field: &'static str,
        /// What is wrong with it
        reason: String,
    },
}

/// Partial camera placement. Unset fields keep the preset's values.
#[derive(Debug, Clone, Copy, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CameraOverrides {
    /// Camera position
    pub lookfrom: Option<Vec3A>,
    /// Look-at point
    pub lookat: Option<Vec3A>,
    /// Up direction
    pub vup: Option<Vec3A>,
    /// Vertical field of view in degrees
    pub vfov: Option<f32>,
    /// Lens diameter
    pub aperture: Option<f32>,
    /// Distance to the plane of perfect focus
    pub focus_dist: Option<f32>,
}

impl CameraOverrides {
    /// Apply the set fields on top of `base`.
    pub fn apply(&self, base: CameraSettings) -> CameraSettings {
        CameraSettings {
            lookfrom: self.lookfrom.unwrap_or(base.lookfrom),
            lookat: self.lookat.unwrap_or(base.lookat),
            vup: self.vup.unwrap_or(base.vup),
            vfov: self.vfov.unwrap_or(base.vfov),
            aperture: self.aperture.unwrap_or(base.aperture),
            focus_dist: self.focus_dist.unwrap_or(base.focus_dist),
            aspect_ratio: base.aspect_ratio,
        }
    }
}

/// Layerable render configuration, as read from JSON or the command line.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RenderConfig {
    /// Image width in pixels
    pub width: Option<u32>,
    /// Image height in pixels
    pub height: Option<u32>,
    /// Samples per pixel
    pub samples_per_pixel: Option<u32>,
    /// Maximum path depth
    pub max_depth: Option<u32>,
    /// Sampler seed; a fresh one is drawn when unset
    pub seed: Option<u64>,
    /// Built-in scene
    pub scene: Option<ScenePreset>,
    /// Explicit sphere list replacing the preset's spheres
    pub spheres: Option<Vec<Sphere>>,
    /// Background replacing the preset's background
    pub background: Option<Background>,
    /// Camera placement overrides
    pub camera: Option<CameraOverrides>,
    /// Output image path
    pub output: Option<PathBuf>,
}

/// Fully specified render job.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderJob {
    /// Image width in pixels
    pub width: u32,
    /// Image height in pixels
    pub height: u32,
    /// Samples per pixel
    pub samples_per_pixel: u32,
    /// Maximum path depth
    pub max_depth: u32,
    /// Sampler seed, if fixed
    pub seed: Option<u64>,
    /// Built-in scene
    pub scene: ScenePreset,
    /// Explicit sphere list
    pub spheres: Option<Vec<Sphere>>,
    /// Background override
    pub background: Option<Background>,
    /// Camera placement overrides
    pub camera: CameraOverrides,
    /// Output image path
    pub output: PathBuf,
}

impl RenderConfig {
    /// Read a JSON configuration file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&raw)
    }

    /// Parse a JSON configuration.
    pub fn from_json(raw: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(raw)?)
    }

    /// Layer `top` over `self`: every value set in `top` wins.
    pub fn overlay(self, top: RenderConfig) -> RenderConfig {
        let camera = match (self.camera, top.camera) {
            (Some(base), Some(over)) => Some(CameraOverrides {
                lookfrom: over.lookfrom.or(base.lookfrom),
                lookat: over.lookat.or(base.lookat),
                vup: over.vup.or(base.vup),
                vfov: over.vfov.or(base.vfov),
                aperture: over.aperture.or(base.aperture),
                focus_dist: over.focus_dist.or(base.focus_dist),
            }),
            (base, over) => over.or(base),
        };

        RenderConfig {
            width: top.width.or(self.width),
            height: top.height.or(self.height),
            samples_per_pixel: top.samples_per_pixel.or(self.samples_per_pixel),
            max_depth: top.max_depth.or(self.max_depth),
            seed: top.seed.or(self.seed),
            scene: top.scene.or(self.scene),
            spheres: top.spheres.or(self.spheres),
            background: top.background.or(self.background),
            camera,
            output: top.output.or(self.output),
        }
    }

    /// Apply defaults and check ranges.
    pub fn resolve(self) -> Result<RenderJob, ConfigError> {
        let width = positive("width", self.width.unwrap_or(960))?;
        let height = positive("height", self.height.unwrap_or(720))?;
        let samples_per_pixel = positive("samples_per_pixel", self.samples_per_pixel.unwrap_or(4))?;
        let camera = self.camera.unwrap_or_default();

        if let Some(vfov) = camera.vfov {
            if !(vfov > 0.0 && vfov < 180.0) {
                return Err(ConfigError::Invalid {
                    field: "camera.vfov",
                    reason: format!("{} is outside (0, 180) degrees", vfov),
                });
            }
        }
        if camera.aperture.is_some_and(|a| a < 0.0) {
            return Err(ConfigError::Invalid {
                field: "camera.aperture",
                reason: "must not be negative".to_string(),
            });
        }
        if camera.focus_dist.is_some_and(|d| d <= 0.0) {
            return Err(ConfigError::Invalid {
                field: "camera.focus_dist",
                reason: "must be positive".to_string(),
            });
        }
        if let Some(spheres) = &self.spheres {
            if let Some(bad) = spheres.iter().find(|s| !(s.radius > 0.0)) {
                return Err(ConfigError::Invalid {
                    field: "spheres.radius",
                    reason: format!("{} is not a positive radius", bad.radius),
                });
            }
        }

        Ok(RenderJob {
            width,
            height,
            samples_per_pixel,
            max_depth: self.max_depth.unwrap_or(DEFAULT_MAX_DEPTH),
            seed: self.seed,
            scene: self.scene.unwrap_or_default(),
            spheres: self.spheres,
            background: self.background,
            camera,
            output: self.output.unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT)),
        })
    }
}

impl RenderJob {
    /// Width divided by height.
    pub fn aspect_ratio(&self) -> f32 {
        self.width as f32 / self.height as f32
    }

    /// Final camera settings for a preset's default placement.
    ///
    /// The merged placement is checked as a whole, since an override that is
    /// fine on its own can still collapse the camera frame against the
    /// preset's values.
    pub fn camera_settings(&self, base: CameraSettings) -> Result<CameraSettings, ConfigError> {
        let mut settings = self.camera.apply(base);
        settings.aspect_ratio = self.aspect_ratio();
        validate_camera(&settings)?;
        Ok(settings)
    }
}

/// Reject placements whose u/v/w frame would be NaN.
fn validate_camera(settings: &CameraSettings) -> Result<(), ConfigError> {
    if !(settings.vfov > 0.0 && settings.vfov < 180.0) {
        return Err(ConfigError::Invalid {
            field: "camera.vfov",
            reason: format!("{} is outside (0, 180) degrees", settings.vfov),
        });
    }
    if !(settings.aperture >= 0.0) {
        return Err(ConfigError::Invalid {
            field: "camera.aperture",
            reason: "must not be negative".to_string(),
        });
    }
    if !(settings.focus_dist > 0.0) {
        return Err(ConfigError::Invalid {
            field: "camera.focus_dist",
            reason: "must be positive".to_string(),
        });
    }

    let view = settings.lookfrom - settings.lookat;
    let Some(w) = unit_or_none(view).filter(|_| !near_zero(view)) else {
        return Err(ConfigError::Invalid {
            field: "camera.lookat",
            reason: format!("coincides with lookfrom {}", settings.lookfrom),
        });
    };

    let right = settings.vup.cross(w);
    if near_zero(right) || unit_or_none(right).is_none() {
        return Err(ConfigError::Invalid {
            field: "camera.vup",
            reason: format!("{} is parallel to the view direction", settings.vup),
        });
    }
    Ok(())
}

fn positive(field: &'static str, value: u32) -> Result<u32, ConfigError> {
    if value == 0 {
        return Err(ConfigError::Invalid {
            field,
            reason: "must be at least 1".to_string(),
        });
    }
    Ok(value)
}
