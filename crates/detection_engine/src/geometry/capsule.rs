//! Capsule shape primitive and nearest-surface-point query
//!
//! A capsule is a sphere of a given radius swept along a medial line
//! segment. The query here is stateless and side-effect-free: no collision
//! body is created or destroyed, the math operates directly on the shape
//! value.

use serde::{Deserialize, Serialize};

use crate::foundation::math::Vec3;

/// Tolerance below which a query point is considered to lie on the medial axis
const AXIS_EPSILON: f32 = 1e-6;

/// Local axis along which a capsule's length extends
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CapsuleAxis {
    /// Length runs along the `+X` (right) axis
    X,
    /// Length runs along the `+Y` (up) axis
    Y,
    /// Length runs along the `+Z` (forward) axis
    Z,
}

impl CapsuleAxis {
    /// Unit vector of this axis
    pub fn direction(self) -> Vec3 {
        match self {
            Self::X => Vec3::x(),
            Self::Y => Vec3::y(),
            Self::Z => Vec3::z(),
        }
    }

    /// A fixed unit vector orthogonal to this axis (`X -> Y`, `Y -> Z`, `Z -> X`)
    ///
    /// Used as the outward fallback direction when a query point lands
    /// exactly on the medial axis and the true outward direction is
    /// undefined.
    pub fn orthogonal(self) -> Vec3 {
        match self {
            Self::X => Vec3::y(),
            Self::Y => Vec3::z(),
            Self::Z => Vec3::x(),
        }
    }
}

/// A capsule: a sphere of `radius` swept along a segment of
/// `max(height - 2 * radius, 0)` centered at `center` along `axis`
///
/// Detection sensor bodies run their length along the sensor's *forward*
/// axis ([`CapsuleAxis::Z`]) rather than the conventional "up".
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CapsuleShape {
    /// Center of the capsule in world space
    pub center: Vec3,
    /// Total height, caps included
    pub height: f32,
    /// Sweep radius
    pub radius: f32,
    /// Axis the capsule's length runs along
    pub axis: CapsuleAxis,
}

impl CapsuleShape {
    /// Creates a new capsule shape
    pub fn new(center: Vec3, height: f32, radius: f32, axis: CapsuleAxis) -> Self {
        Self {
            center,
            height,
            radius,
            axis,
        }
    }

    /// Half-length of the medial segment
    ///
    /// Collapses to 0 when `height <= 2 * radius`, degenerating the capsule
    /// to a sphere of `radius` centered at `center`.
    pub fn segment_half_length(&self) -> f32 {
        (self.height - 2.0 * self.radius).max(0.0) * 0.5
    }

    /// Nearest point on the medial segment to `point`
    pub fn closest_point_on_axis(&self, point: Vec3) -> Vec3 {
        let half = self.segment_half_length();
        let axis_dir = self.axis.direction();
        // Project onto the segment, clamping to its endpoints
        let t = (point - self.center).dot(&axis_dir).clamp(-half, half);
        self.center + axis_dir * t
    }

    /// Nearest point on the capsule's surface to `point`
    ///
    /// The surface point is the medial-segment projection offset by
    /// `radius` along the outward direction toward `point`. Degenerate
    /// inputs have defined results rather than faults:
    /// - `point` exactly on the medial axis: the outward direction is
    ///   undefined, so the offset falls back to [`CapsuleAxis::orthogonal`]
    ///   (only reachable in degenerate configurations).
    /// - `radius <= 0`: returns the bare segment point, no offset.
    pub fn closest_point_on_surface(&self, point: Vec3) -> Vec3 {
        let axis_point = self.closest_point_on_axis(point);
        if self.radius <= 0.0 {
            return axis_point;
        }

        let offset = point - axis_point;
        let distance_squared = offset.magnitude_squared();
        if distance_squared <= AXIS_EPSILON * AXIS_EPSILON {
            return axis_point + self.axis.orthogonal() * self.radius;
        }

        axis_point + offset * (self.radius / distance_squared.sqrt())
    }
}
