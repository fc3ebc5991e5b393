//! Detection query evaluation
//!
//! Turns a ray fan into per-ray hit results by consulting an external
//! raycast oracle. The oracle abstracts whatever physics or scene backend
//! the host simulation uses; this crate never implements one.

use crate::foundation::math::Vec3;
use crate::sensor::ray_fan::RayFan;

/// Result of a raycast query against the environment
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RayHit {
    /// The point of intersection in world space
    pub point: Vec3,
    /// The distance from the ray origin to the hit point
    pub distance: f32,
    /// The surface normal at the intersection point
    pub normal: Vec3,
}

/// External capability that casts a single ray and reports the nearest hit
///
/// `Send + Sync` so callers that own a thread-safe backend may fan queries
/// out across workers; this crate itself only ever calls it sequentially.
pub trait RaycastOracle: Send + Sync {
    /// Cast a ray from `origin` along `direction`, reporting the nearest
    /// intersection within `max_distance`, if any
    fn cast(&self, origin: Vec3, direction: Vec3, max_distance: f32) -> Option<RayHit>;
}

/// Evaluates every ray of a fan against the oracle, in fan order
///
/// Each ray is cast from its start point along its direction, bounded by
/// the fan's `ray_distance` (the same bound that produced the ray's end
/// point — the query never probes past it). The result sequence matches
/// the fan's length and index order exactly, so downstream consumers
/// correlate hits to rays positionally. A miss or failed query is recorded
/// as `None` at that index and never aborts the batch.
pub fn evaluate(fan: &RayFan, oracle: &dyn RaycastOracle) -> Vec<Option<RayHit>> {
    fan.iter()
        .map(|ray| oracle.cast(ray.start_point, ray.direction, fan.ray_distance()))
        .collect()
}
