//! Sensor configuration value type
//!
//! `SensorConfig` is an immutable value owned by whatever configuration
//! authority edits the sensor (an editor or tuning system outside this
//! crate). The authority is responsible for keeping the fields inside their
//! authoring ranges; [`SensorConfig::sanitized`] applies exactly those
//! clamps, and [`SensorConfig::validate`] rejects instead of clamping for
//! callers that prefer errors.

use serde::{Deserialize, Serialize};

/// Maximum grid resolution per axis the authoring tool allows
pub const MAX_RESOLUTION: u32 = 50;

/// Maximum longitude half-span in degrees the authoring tool allows
///
/// Not enforced at generation time; see [`SensorConfig::angle_lon`].
pub const MAX_ANGLE_LON: f32 = 120.0;

/// Physical configuration of a detection sensor
///
/// The default is a 7x5 fan spanning 10 degrees of latitude either side of
/// the horizon and 60 degrees of longitude either side of forward, probing
/// 5 units out from a 7x3 capsule body.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SensorConfig {
    /// Grid columns (longitude samples), authoring range `[0, 50]`
    pub resolution_x: u32,
    /// Grid rows (latitude samples), authoring range `[0, 50]`
    pub resolution_y: u32,
    /// Latitude bound in degrees reached by the top row (`y = resolution_y - 1`)
    pub angle_north: f32,
    /// Latitude bound in degrees at the bottom row (`y = 0`); signed and
    /// independent of `angle_north`, not required to be symmetric
    pub angle_south: f32,
    /// Longitude half-span in degrees; the fan sweeps `-angle_lon` to
    /// `+angle_lon`. The authoring tool keeps this in `[0, 120]` but the
    /// core does not enforce it at evaluation time
    pub angle_lon: f32,
    /// Probe length from the body surface, non-negative
    pub ray_distance: f32,
    /// Total height of the capsule body, caps included
    pub capsule_height: f32,
    /// Radius of the capsule body
    pub capsule_radius: f32,
}

impl Default for SensorConfig {
    fn default() -> Self {
        Self {
            resolution_x: 7,
            resolution_y: 5,
            angle_north: 10.0,
            angle_south: -10.0,
            angle_lon: 60.0,
            ray_distance: 5.0,
            capsule_height: 7.0,
            capsule_radius: 3.0,
        }
    }
}

impl SensorConfig {
    /// Number of rays a fan generated from this configuration will hold
    pub fn ray_count(&self) -> usize {
        (self.resolution_x * self.resolution_y) as usize
    }

    /// Returns a copy with the authoring-tool clamps applied
    ///
    /// Resolutions are clamped into `[0, 50]`, `angle_lon` into `[0, 120]`,
    /// and `ray_distance`/`capsule_height`/`capsule_radius` to `>= 0`. The
    /// latitude bounds pass through unclamped.
    pub fn sanitized(self) -> Self {
        Self {
            resolution_x: self.resolution_x.min(MAX_RESOLUTION),
            resolution_y: self.resolution_y.min(MAX_RESOLUTION),
            angle_lon: self.angle_lon.clamp(0.0, MAX_ANGLE_LON),
            ray_distance: self.ray_distance.max(0.0),
            capsule_height: self.capsule_height.max(0.0),
            capsule_radius: self.capsule_radius.max(0.0),
            ..self
        }
    }

    /// Strict check of the same ranges [`sanitized`](Self::sanitized) clamps
    ///
    /// The geometry engine never calls this itself; generation accepts any
    /// configuration and degrades gracefully. It exists for configuration
    /// authorities that want rejection rather than silent clamping.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.resolution_x > MAX_RESOLUTION {
            return Err(ConfigError::ResolutionOutOfRange(self.resolution_x));
        }
        if self.resolution_y > MAX_RESOLUTION {
            return Err(ConfigError::ResolutionOutOfRange(self.resolution_y));
        }
        if !(0.0..=MAX_ANGLE_LON).contains(&self.angle_lon) {
            return Err(ConfigError::LongitudeOutOfRange(self.angle_lon));
        }
        if self.ray_distance < 0.0 {
            return Err(ConfigError::NegativeRayDistance(self.ray_distance));
        }
        if self.capsule_height < 0.0 || self.capsule_radius < 0.0 {
            return Err(ConfigError::NegativeCapsuleDimension {
                height: self.capsule_height,
                radius: self.capsule_radius,
            });
        }
        Ok(())
    }
}

/// Configuration errors
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    /// Grid resolution above the authoring maximum
    #[error("grid resolution out of range: {0} (maximum 50)")]
    ResolutionOutOfRange(u32),

    /// Longitude half-span outside the authoring range
    #[error("longitude half-span out of range: {0} (authoring range 0 to 120 degrees)")]
    LongitudeOutOfRange(f32),

    /// Negative probe length
    #[error("ray distance must be non-negative, got {0}")]
    NegativeRayDistance(f32),

    /// Negative capsule dimension
    #[error("capsule dimensions must be non-negative, got height {height} and radius {radius}")]
    NegativeCapsuleDimension {
        /// Configured capsule height
        height: f32,
        /// Configured capsule radius
        radius: f32,
    },
}
