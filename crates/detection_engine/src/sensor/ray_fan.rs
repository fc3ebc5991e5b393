//! Probe ray grid generation
//!
//! Builds the ordered fan of detection rays from a sensor configuration, a
//! capsule body, and a world pose. Generation is a pure function of its
//! inputs: identical inputs produce bit-identical fans, and there is no
//! incremental update path; the owning simulation regenerates the whole fan
//! whenever configuration or pose changes.

use log::{debug, warn};

use crate::foundation::math::{utils, Pose, Quat, Vec3};
use crate::geometry::CapsuleShape;
use crate::sensor::config::{SensorConfig, MAX_ANGLE_LON};

/// Distance of the virtual far point used to anchor each ray on the body
///
/// The ray origin is found by projecting a point this far along the ray
/// direction back onto the capsule surface with a closest-point query, as a
/// stand-in for a true ray/surface intersection. The approximation is only
/// accurate when the far point dwarfs both the capsule extent and the probe
/// length, which this constant guarantees for the supported configuration
/// ranges.
pub const FAR_POINT_DISTANCE: f32 = 99_999.0;

/// A single directional probe anchored on the sensor body's surface
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DetectionRay {
    /// Unit direction of the probe in world space
    pub direction: Vec3,
    /// Probe origin, on the capsule body's surface
    pub start_point: Vec3,
    /// `start_point + direction * ray_distance`
    pub end_point: Vec3,
}

impl DetectionRay {
    /// Get a point along the ray at distance `t` from its start
    pub fn point_at(&self, t: f32) -> Vec3 {
        self.start_point + self.direction * t
    }
}

/// The full ordered grid of probe rays generated from a sensor configuration
///
/// Rays are stored column-major: grid coordinate `(x, y)` lives at index
/// `resolution_y * x + y`. A fan is read-only once produced; it is replaced
/// wholesale by the next regeneration.
#[derive(Debug, Clone, PartialEq)]
pub struct RayFan {
    rays: Vec<DetectionRay>,
    resolution_x: u32,
    resolution_y: u32,
    ray_distance: f32,
}

impl RayFan {
    /// A fan with no rays
    pub fn empty() -> Self {
        Self {
            rays: Vec::new(),
            resolution_x: 0,
            resolution_y: 0,
            ray_distance: 0.0,
        }
    }

    /// All rays in index order
    pub fn rays(&self) -> &[DetectionRay] {
        &self.rays
    }

    /// Iterate over rays in index order
    pub fn iter(&self) -> std::slice::Iter<'_, DetectionRay> {
        self.rays.iter()
    }

    /// Number of rays (`resolution_x * resolution_y`)
    pub fn len(&self) -> usize {
        self.rays.len()
    }

    /// Whether the fan holds no rays
    pub fn is_empty(&self) -> bool {
        self.rays.is_empty()
    }

    /// Grid columns
    pub fn resolution_x(&self) -> u32 {
        self.resolution_x
    }

    /// Grid rows
    pub fn resolution_y(&self) -> u32 {
        self.resolution_y
    }

    /// Probe length the fan was generated with
    pub fn ray_distance(&self) -> f32 {
        self.ray_distance
    }

    /// Flat index of grid coordinate `(x, y)`
    pub fn index_of(&self, x: u32, y: u32) -> usize {
        (self.resolution_y * x + y) as usize
    }

    /// Ray at grid coordinate `(x, y)`, if inside the grid
    pub fn get(&self, x: u32, y: u32) -> Option<&DetectionRay> {
        if x < self.resolution_x && y < self.resolution_y {
            self.rays.get(self.index_of(x, y))
        } else {
            None
        }
    }
}

impl<'a> IntoIterator for &'a RayFan {
    type Item = &'a DetectionRay;
    type IntoIter = std::slice::Iter<'a, DetectionRay>;

    fn into_iter(self) -> Self::IntoIter {
        self.rays.iter()
    }
}

/// World-space probe direction for one grid sample
///
/// Composition order is fixed as
/// `pose.rotation * yaw * pitch * FORWARD` with `FORWARD = +Z`, yaw about
/// the local up axis `+Y` and pitch about the local right axis `+X` (roll
/// stays 0). At `(pitch, yaw) = (0, 0)` this reproduces exactly
/// `pose.rotation * FORWARD`. Positive yaw swings toward local `+X`;
/// positive pitch tilts toward local `-Y`.
fn sample_direction(pose: &Pose, pitch_deg: f32, yaw_deg: f32) -> Vec3 {
    let pitch = Quat::from_axis_angle(&Vec3::x_axis(), utils::deg_to_rad(pitch_deg));
    let yaw = Quat::from_axis_angle(&Vec3::y_axis(), utils::deg_to_rad(yaw_deg));
    pose.rotation * (yaw * pitch * Vec3::z())
}

/// Generates the ordered probe-ray grid for one sensor state
///
/// For grid coordinate `(x, y)`, latitude interpolates
/// `angle_south -> angle_north` over the rows and longitude interpolates
/// `-angle_lon -> +angle_lon` over the columns; a resolution of 1 on either
/// axis pins that angle to 0 (explicit branch, no division by zero). Each
/// ray starts on the capsule surface (closest-point projection of a distant
/// point along its direction) and ends `ray_distance` further out.
///
/// A resolution of 0 on either axis yields an empty fan; no configuration
/// within the documented ranges fails.
pub fn generate(config: &SensorConfig, shape: &CapsuleShape, pose: &Pose) -> RayFan {
    if config.angle_lon < 0.0 || config.angle_lon > MAX_ANGLE_LON {
        warn!(
            "longitude half-span {} outside authoring range 0..=120; generating anyway",
            config.angle_lon
        );
    }

    let mut rays = Vec::with_capacity(config.ray_count());
    for x in 0..config.resolution_x {
        // resolution 1 pins the angle instead of dividing by zero
        let yaw = if config.resolution_x > 1 {
            let t = x as f32 / (config.resolution_x - 1) as f32;
            utils::lerp(-config.angle_lon, config.angle_lon, t)
        } else {
            0.0
        };

        for y in 0..config.resolution_y {
            let pitch = if config.resolution_y > 1 {
                let t = y as f32 / (config.resolution_y - 1) as f32;
                utils::lerp(config.angle_south, config.angle_north, t)
            } else {
                0.0
            };

            let direction = sample_direction(pose, pitch, yaw);
            let far_point = pose.position + direction * FAR_POINT_DISTANCE;
            let start_point = shape.closest_point_on_surface(far_point);
            let end_point = start_point + direction * config.ray_distance;
            rays.push(DetectionRay {
                direction,
                start_point,
                end_point,
            });
        }
    }

    debug!(
        "generated {} detection rays ({}x{} grid)",
        rays.len(),
        config.resolution_x,
        config.resolution_y
    );

    RayFan {
        rays,
        resolution_x: config.resolution_x,
        resolution_y: config.resolution_y,
        ray_distance: config.ray_distance,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::math::constants::PI;
    use crate::geometry::CapsuleAxis;
    use approx::assert_relative_eq;

    const EPSILON: f32 = 1e-4;

    fn unit_sphere_body() -> CapsuleShape {
        // height <= 2 * radius: degenerates to a unit sphere at the origin
        CapsuleShape::new(Vec3::zeros(), 2.0, 1.0, CapsuleAxis::Z)
    }

    fn config(resolution_x: u32, resolution_y: u32) -> SensorConfig {
        SensorConfig {
            resolution_x,
            resolution_y,
            ..SensorConfig::default()
        }
    }

    /// Latitude angle of a direction, degrees, positive toward -Y
    fn pitch_of(direction: Vec3) -> f32 {
        utils::rad_to_deg((-direction.y).asin())
    }

    /// Longitude angle of a direction, degrees, positive toward +X
    fn yaw_of(direction: Vec3) -> f32 {
        utils::rad_to_deg(direction.x.atan2(direction.z))
    }

    #[test]
    fn test_fan_length_matches_grid() {
        let shape = unit_sphere_body();
        let pose = Pose::identity();
        for (x, y) in [(0, 0), (0, 5), (5, 0), (1, 1), (7, 5), (50, 50)] {
            let fan = generate(&config(x, y), &shape, &pose);
            assert_eq!(fan.len(), (x * y) as usize);
            assert_eq!(fan.is_empty(), x == 0 || y == 0);
        }
    }

    #[test]
    fn test_single_ray_is_pure_forward() {
        let fan = generate(&config(1, 1), &unit_sphere_body(), &Pose::identity());
        assert_eq!(fan.len(), 1);

        let ray = &fan.rays()[0];
        assert_eq!(ray.direction, Vec3::z());
        assert_relative_eq!(ray.start_point, Vec3::z(), epsilon = EPSILON);
        assert_relative_eq!(ray.end_point, Vec3::z() * 6.0, epsilon = EPSILON);
    }

    #[test]
    fn test_single_ray_follows_pose_rotation() {
        // 90 degrees of pose yaw turns the whole fan toward +X
        let rotation = Quat::from_axis_angle(&Vec3::y_axis(), PI / 2.0);
        let pose = Pose::from_position_rotation(Vec3::zeros(), rotation);
        let fan = generate(&config(1, 1), &unit_sphere_body(), &pose);

        let ray = &fan.rays()[0];
        assert_eq!(ray.direction, pose.forward());
        assert_relative_eq!(ray.direction, Vec3::x(), epsilon = EPSILON);
    }

    #[test]
    fn test_pitch_spans_south_to_north() {
        let config = SensorConfig {
            resolution_x: 1,
            resolution_y: 5,
            angle_north: 25.0,
            angle_south: -40.0,
            ..SensorConfig::default()
        };
        let fan = generate(&config, &unit_sphere_body(), &Pose::identity());

        let bottom = fan.get(0, 0).unwrap();
        let top = fan.get(0, 4).unwrap();
        assert_relative_eq!(pitch_of(bottom.direction), -40.0, epsilon = EPSILON);
        assert_relative_eq!(pitch_of(top.direction), 25.0, epsilon = EPSILON);

        // Monotonic in y between the bounds
        for y in 1..5 {
            let previous = pitch_of(fan.get(0, y - 1).unwrap().direction);
            let current = pitch_of(fan.get(0, y).unwrap().direction);
            assert!(current > previous);
        }
    }

    #[test]
    fn test_yaw_spans_symmetric_longitude() {
        let config = SensorConfig {
            resolution_x: 5,
            resolution_y: 1,
            angle_lon: 45.0,
            ..SensorConfig::default()
        };
        let fan = generate(&config, &unit_sphere_body(), &Pose::identity());

        assert_relative_eq!(yaw_of(fan.get(0, 0).unwrap().direction), -45.0, epsilon = EPSILON);
        assert_relative_eq!(yaw_of(fan.get(4, 0).unwrap().direction), 45.0, epsilon = EPSILON);

        // Odd column count: symmetric about the straight-ahead center column
        assert_relative_eq!(yaw_of(fan.get(2, 0).unwrap().direction), 0.0, epsilon = EPSILON);
        for x in 0..=1 {
            let left = yaw_of(fan.get(x, 0).unwrap().direction);
            let right = yaw_of(fan.get(4 - x, 0).unwrap().direction);
            assert_relative_eq!(left, -right, epsilon = EPSILON);
        }
    }

    #[test]
    fn test_column_major_indexing() {
        let config = SensorConfig {
            resolution_x: 3,
            resolution_y: 4,
            ..SensorConfig::default()
        };
        let fan = generate(&config, &unit_sphere_body(), &Pose::identity());

        assert_eq!(fan.index_of(2, 3), 11);
        for x in 0..3 {
            for y in 0..4 {
                let by_grid = fan.get(x, y).unwrap();
                let by_index = &fan.rays()[(4 * x + y) as usize];
                assert_eq!(by_grid, by_index);
            }
        }
        assert!(fan.get(3, 0).is_none());
        assert!(fan.get(0, 4).is_none());
    }

    #[test]
    fn test_sphere_body_three_ray_sweep() {
        // 3x1 fan, 60 degree half-span, degenerate sphere body of radius 1:
        // rays at -60/0/+60 degrees of yaw, zero pitch, starting one radius
        // from the origin and ending six units out
        let config = SensorConfig {
            resolution_x: 3,
            resolution_y: 1,
            angle_lon: 60.0,
            angle_north: 0.0,
            angle_south: 0.0,
            ray_distance: 5.0,
            capsule_height: 2.0,
            capsule_radius: 1.0,
            ..SensorConfig::default()
        };
        let shape = CapsuleShape::new(Vec3::zeros(), 2.0, 1.0, CapsuleAxis::Z);
        let fan = generate(&config, &shape, &Pose::identity());

        assert_eq!(fan.len(), 3);
        for (index, expected_yaw) in [(0, -60.0), (1, 0.0), (2, 60.0)] {
            let ray = &fan.rays()[index];
            assert_relative_eq!(yaw_of(ray.direction), expected_yaw, epsilon = EPSILON);
            assert_relative_eq!(pitch_of(ray.direction), 0.0, epsilon = EPSILON);

            assert_relative_eq!(ray.start_point.magnitude(), 1.0, epsilon = EPSILON);
            assert_relative_eq!(ray.start_point, ray.direction, epsilon = EPSILON);
            assert_relative_eq!(ray.end_point.magnitude(), 6.0, epsilon = EPSILON);
            assert_relative_eq!(ray.end_point, ray.direction * 6.0, epsilon = EPSILON);
        }
    }

    #[test]
    fn test_start_points_sit_on_capsule_surface() {
        let config = SensorConfig::default();
        let shape = CapsuleShape::new(
            Vec3::zeros(),
            config.capsule_height,
            config.capsule_radius,
            CapsuleAxis::Z,
        );
        let fan = generate(&config, &shape, &Pose::identity());

        for ray in &fan {
            // Surface distance from the medial segment equals the radius
            let axis_point = shape.closest_point_on_axis(ray.start_point);
            assert_relative_eq!(
                (ray.start_point - axis_point).magnitude(),
                shape.radius,
                epsilon = EPSILON
            );
            assert_relative_eq!(ray.direction.magnitude(), 1.0, epsilon = EPSILON);
            assert_relative_eq!(
                ray.end_point,
                ray.point_at(config.ray_distance),
                epsilon = EPSILON
            );
        }
    }

    #[test]
    fn test_generation_is_bit_reproducible() {
        let config = SensorConfig::default();
        let shape = CapsuleShape::new(Vec3::new(1.0, 2.0, 3.0), 7.0, 3.0, CapsuleAxis::Z);
        let rotation = Quat::from_axis_angle(&Vec3::y_axis(), 0.37);
        let pose = Pose::from_position_rotation(Vec3::new(1.0, 2.0, 3.0), rotation);

        let first = generate(&config, &shape, &pose);
        let second = generate(&config, &shape, &pose);
        assert_eq!(first, second);
    }

    #[test]
    fn test_zero_ray_distance_collapses_end_points() {
        let config = SensorConfig {
            ray_distance: 0.0,
            ..SensorConfig::default()
        };
        let fan = generate(&config, &unit_sphere_body(), &Pose::identity());
        for ray in &fan {
            assert_eq!(ray.end_point, ray.start_point);
        }
    }
}
