//! Owning sensor container
//!
//! `DetectionSensor` bundles a configuration, the capsule body derived from
//! it, and the most recently generated ray fan. Nothing here regenerates
//! implicitly: mutating the configuration or shape leaves the current fan
//! untouched until the owning simulation calls [`DetectionSensor::regenerate`]
//! with the sensor's current pose. Edit-time auto-rebuild is a concern of
//! the configuration authority, not of this type.

use crate::foundation::math::{Pose, Vec3};
use crate::geometry::{CapsuleAxis, CapsuleShape};
use crate::sensor::config::SensorConfig;
use crate::sensor::evaluator::{evaluate, RaycastOracle, RayHit};
use crate::sensor::ray_fan::{generate, RayFan};

/// A detection sensor: configuration, capsule body, and the current ray fan
///
/// The stored shape's `center` is an offset relative to the pose anchor;
/// [`regenerate`](Self::regenerate) translates it to world space. The
/// default body is centered on the anchor with its length along the
/// sensor's forward axis.
#[derive(Debug, Clone)]
pub struct DetectionSensor {
    config: SensorConfig,
    shape: CapsuleShape,
    rays: RayFan,
}

impl DetectionSensor {
    /// Creates a sensor whose body is derived from the configuration's
    /// capsule dimensions, centered on the anchor, length along `+Z`
    ///
    /// The fan starts empty; call [`regenerate`](Self::regenerate) once the
    /// initial pose is known.
    pub fn new(config: SensorConfig) -> Self {
        let shape = CapsuleShape::new(
            Vec3::zeros(),
            config.capsule_height,
            config.capsule_radius,
            CapsuleAxis::Z,
        );
        Self::with_shape(config, shape)
    }

    /// Creates a sensor with an explicit body (anchor-relative center)
    pub fn with_shape(config: SensorConfig, shape: CapsuleShape) -> Self {
        Self {
            config,
            shape,
            rays: RayFan::empty(),
        }
    }

    /// Current configuration
    pub fn config(&self) -> &SensorConfig {
        &self.config
    }

    /// Current body shape (anchor-relative center)
    pub fn shape(&self) -> &CapsuleShape {
        &self.shape
    }

    /// Read-only view of the most recently generated ray fan
    pub fn rays(&self) -> &RayFan {
        &self.rays
    }

    /// Replaces the configuration and refreshes the body's capsule
    /// dimensions from it
    ///
    /// Does not regenerate the fan; the owner calls
    /// [`regenerate`](Self::regenerate) when ready.
    pub fn set_config(&mut self, config: SensorConfig) {
        self.shape.height = config.capsule_height;
        self.shape.radius = config.capsule_radius;
        self.config = config;
    }

    /// Replaces the body shape outright (anchor-relative center)
    ///
    /// Does not regenerate the fan.
    pub fn set_shape(&mut self, shape: CapsuleShape) {
        self.shape = shape;
    }

    /// Fully rebuilds the ray fan for the given pose, replacing the
    /// previous fan wholesale
    pub fn regenerate(&mut self, pose: &Pose) {
        let world_shape = CapsuleShape {
            center: pose.position + self.shape.center,
            ..self.shape
        };
        self.rays = generate(&self.config, &world_shape, pose);
    }

    /// Evaluates the current fan against a raycast oracle
    ///
    /// See [`evaluate`] for the ordering and bounding contract.
    pub fn evaluate(&self, oracle: &dyn RaycastOracle) -> Vec<Option<RayHit>> {
        evaluate(&self.rays, oracle)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const EPSILON: f32 = 1e-4;

    #[test]
    fn test_new_sensor_starts_empty() {
        let sensor = DetectionSensor::new(SensorConfig::default());
        assert!(sensor.rays().is_empty());
        assert_eq!(sensor.shape().height, 7.0);
        assert_eq!(sensor.shape().radius, 3.0);
        assert_eq!(sensor.shape().axis, CapsuleAxis::Z);
    }

    #[test]
    fn test_regenerate_fills_fan_for_pose() {
        let mut sensor = DetectionSensor::new(SensorConfig::default());
        sensor.regenerate(&Pose::identity());
        assert_eq!(sensor.rays().len(), 35);
    }

    #[test]
    fn test_setters_do_not_regenerate() {
        let mut sensor = DetectionSensor::new(SensorConfig::default());
        sensor.regenerate(&Pose::identity());

        let config = SensorConfig {
            resolution_x: 2,
            resolution_y: 2,
            ..SensorConfig::default()
        };
        sensor.set_config(config);

        // The fan still reflects the previous generation
        assert_eq!(sensor.rays().len(), 35);

        sensor.regenerate(&Pose::identity());
        assert_eq!(sensor.rays().len(), 4);
    }

    #[test]
    fn test_set_config_refreshes_body_dimensions() {
        let mut sensor = DetectionSensor::new(SensorConfig::default());
        sensor.set_config(SensorConfig {
            capsule_height: 2.0,
            capsule_radius: 1.0,
            ..SensorConfig::default()
        });
        assert_eq!(sensor.shape().height, 2.0);
        assert_eq!(sensor.shape().radius, 1.0);
    }

    #[test]
    fn test_regenerate_anchors_body_at_pose() {
        let config = SensorConfig {
            resolution_x: 1,
            resolution_y: 1,
            capsule_height: 2.0,
            capsule_radius: 1.0,
            ..SensorConfig::default()
        };
        let mut sensor = DetectionSensor::new(config);

        let position = Vec3::new(10.0, 0.0, -4.0);
        sensor.regenerate(&Pose::from_position(position));

        // Single forward ray starts on the translated sphere's surface
        let ray = &sensor.rays().rays()[0];
        assert_relative_eq!(ray.start_point, position + Vec3::z(), epsilon = EPSILON);
    }

    #[test]
    fn test_regenerate_replaces_fan_wholesale() {
        let mut sensor = DetectionSensor::new(SensorConfig::default());
        sensor.regenerate(&Pose::identity());
        let first = sensor.rays().clone();

        let moved = Pose::from_position(Vec3::new(0.0, 0.0, 5.0));
        sensor.regenerate(&moved);

        assert_eq!(sensor.rays().len(), first.len());
        assert_ne!(*sensor.rays(), first);
    }
}
