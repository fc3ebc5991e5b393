//! Detection sensing: configuration, ray fan generation, query evaluation
//!
//! The pipeline runs one way: configuration + pose -> [`ray_fan::generate`]
//! (which projects ray origins onto the capsule body) -> [`RayFan`] ->
//! [`evaluator::evaluate`] against an external [`RaycastOracle`] -> per-ray
//! hit results. Regeneration is full and stateless; there is no incremental
//! update path.
//!
//! # Module Organization
//!
//! - [`config`] - Sensor configuration value type and authoring clamps
//! - [`ray_fan`] - Probe ray grid generation
//! - [`evaluator`] - Hit evaluation against a raycast oracle
//! - [`detection`] - Owning sensor container with explicit regeneration

pub mod config;
pub mod detection;
pub mod evaluator;
pub mod ray_fan;

// Re-export commonly used types
pub use config::{ConfigError, SensorConfig, MAX_ANGLE_LON, MAX_RESOLUTION};
pub use detection::DetectionSensor;
pub use evaluator::{evaluate, RayHit, RaycastOracle};
pub use ray_fan::{generate, DetectionRay, RayFan, FAR_POINT_DISTANCE};
