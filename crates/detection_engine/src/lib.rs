//! # Detection Engine
//!
//! Capsule-anchored detection ray fans for simulated agents.
//!
//! ## Features
//!
//! - **Ray Fan Generation**: Deterministic 2D grids of probe rays bounded
//!   by independent latitude angles and a symmetric longitude half-span
//! - **Capsule Geometry**: Pure nearest-surface-point queries used to
//!   anchor each probe on the agent's body
//! - **Query Evaluation**: Batch hit evaluation against a pluggable
//!   raycast oracle, order-preserving and never fatal
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use detection_engine::prelude::*;
//!
//! fn main() {
//!     let config = SensorConfig::default();
//!     let mut sensor = DetectionSensor::new(config);
//!
//!     // Regenerate whenever the configuration or pose changes
//!     sensor.regenerate(&Pose::identity());
//!
//!     for ray in sensor.rays() {
//!         println!("probe from {:?} toward {:?}", ray.start_point, ray.direction);
//!     }
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::too_many_arguments)]

pub mod foundation;
pub mod geometry;
pub mod sensor;

pub use geometry::{CapsuleAxis, CapsuleShape};
pub use sensor::{DetectionSensor, RayFan, RayHit, RaycastOracle, SensorConfig};

/// Common imports for engine users
pub mod prelude {
    pub use crate::{
        foundation::math::{Pose, Quat, Vec3},
        geometry::{CapsuleAxis, CapsuleShape},
        sensor::{
            evaluate, generate, ConfigError, DetectionRay, DetectionSensor, RayFan, RayHit,
            RaycastOracle, SensorConfig,
        },
    };
}
