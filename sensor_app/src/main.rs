//! Detection Sensor Demo
//!
//! Exercises the full detection flow without any physics backend:
//! - A sphere-field scene implements the raycast oracle
//! - An agent sweeps its heading in place, regenerating its ray fan each
//!   step and evaluating it against the field
//! - Per-step hit summaries are logged

use detection_engine::prelude::*;
use log::{debug, info};
use rand::Rng;

// Scene layout
const NUM_OBSTACLES: usize = 24;
const FIELD_RADIUS: f32 = 25.0;
const MIN_OBSTACLE_RADIUS: f32 = 0.5;
const MAX_OBSTACLE_RADIUS: f32 = 2.5;

// Agent sweep
const SIMULATION_STEPS: u32 = 12;
const SWEEP_STEP_DEGREES: f32 = 30.0;

/// A spherical obstacle in the demo scene
#[derive(Debug, Clone, Copy)]
struct Obstacle {
    center: Vec3,
    radius: f32,
}

impl Obstacle {
    /// Test ray intersection with this obstacle
    ///
    /// Returns the nearest hit within `max_distance`, None otherwise.
    fn intersect_ray(&self, origin: Vec3, direction: Vec3, max_distance: f32) -> Option<RayHit> {
        // Quadratic formula coefficients for ray-sphere intersection
        // Solve: |origin + t*direction - center|^2 = radius^2
        let oc = origin - self.center;
        let a = direction.dot(&direction);
        let b = 2.0 * oc.dot(&direction);
        let c = oc.dot(&oc) - self.radius * self.radius;

        let discriminant = b * b - 4.0 * a * c;
        if discriminant < 0.0 {
            return None;
        }

        // Use the closest intersection in front of the origin
        let sqrt_discriminant = discriminant.sqrt();
        let t1 = (-b - sqrt_discriminant) / (2.0 * a);
        let t2 = (-b + sqrt_discriminant) / (2.0 * a);
        let t = if t1 > 0.0 {
            t1
        } else if t2 > 0.0 {
            t2
        } else {
            return None;
        };

        if t > max_distance {
            return None;
        }

        let point = origin + direction * t;
        let normal = (point - self.center).normalize();
        Some(RayHit {
            point,
            distance: t,
            normal,
        })
    }
}

/// Sphere-field raycast oracle for the demo scene
struct SphereField {
    obstacles: Vec<Obstacle>,
}

impl SphereField {
    /// Scatter obstacles on a ring around the agent
    fn scattered(rng: &mut impl Rng) -> Self {
        let mut obstacles = Vec::with_capacity(NUM_OBSTACLES);
        for _ in 0..NUM_OBSTACLES {
            let angle: f32 = rng.gen_range(0.0..std::f32::consts::TAU);
            let distance: f32 = rng.gen_range(4.0..FIELD_RADIUS);
            let height: f32 = rng.gen_range(-3.0..3.0);
            obstacles.push(Obstacle {
                center: Vec3::new(
                    angle.cos() * distance,
                    height,
                    angle.sin() * distance,
                ),
                radius: rng.gen_range(MIN_OBSTACLE_RADIUS..MAX_OBSTACLE_RADIUS),
            });
        }
        Self { obstacles }
    }
}

impl RaycastOracle for SphereField {
    fn cast(&self, origin: Vec3, direction: Vec3, max_distance: f32) -> Option<RayHit> {
        self.obstacles
            .iter()
            .filter_map(|obstacle| obstacle.intersect_ray(origin, direction, max_distance))
            .min_by(|a, b| a.distance.total_cmp(&b.distance))
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    println!("=== Detection Sensor Demo ===");
    println!("An agent sweeps its heading through a full turn, probing a");
    println!("field of {} spherical obstacles with its ray fan.", NUM_OBSTACLES);
    println!();

    let mut rng = rand::thread_rng();
    let field = SphereField::scattered(&mut rng);

    let config = SensorConfig {
        ray_distance: 12.0,
        ..SensorConfig::default()
    }
    .sanitized();
    config.validate()?;

    info!(
        "sensor: {}x{} fan, {} units of probe length",
        config.resolution_x, config.resolution_y, config.ray_distance
    );

    let mut sensor = DetectionSensor::new(config);

    for step in 0..SIMULATION_STEPS {
        let heading = SWEEP_STEP_DEGREES * step as f32;
        let rotation = Quat::from_axis_angle(&Vec3::y_axis(), heading.to_radians());
        let pose = Pose::from_position_rotation(Vec3::zeros(), rotation);

        // Explicit regeneration: the pose changed this step
        sensor.regenerate(&pose);
        let results = sensor.evaluate(&field);

        let hits = results.iter().flatten().count();
        let nearest = results
            .iter()
            .flatten()
            .min_by(|a, b| a.distance.total_cmp(&b.distance));

        match nearest {
            Some(hit) => info!(
                "heading {:>5.1}°: {:>2}/{} rays hit, nearest contact at {:.2} units",
                heading,
                hits,
                results.len(),
                hit.distance
            ),
            None => info!(
                "heading {:>5.1}°: {:>2}/{} rays hit",
                heading,
                hits,
                results.len()
            ),
        }

        for (index, hit) in results.iter().enumerate() {
            if let Some(hit) = hit {
                debug!(
                    "  ray {:>2}: contact at {:.2} units, normal {:?}",
                    index, hit.distance, hit.normal
                );
            }
        }
    }

    Ok(())
}
