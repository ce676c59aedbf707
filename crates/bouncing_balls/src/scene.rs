//! Scene construction

use rand::Rng;
use sim_engine::foundation::math::constants::PI;
use sim_engine::prelude::*;

use crate::config::{BallSpawn, ResponsePolicy, SceneConfig};

/// Mass of a ball from its radius, proportional to its area
pub fn ball_mass(radius: f64) -> f64 {
    PI * radius * radius
}

/// Spawn one ball with the full component set and the configured response
///
/// Attachment order matters for the boundary component's physics lookup:
/// render, collider, physics, boundary reflection.
pub fn spawn_ball(
    world: &mut World,
    policy: ResponsePolicy,
    spawn: &BallSpawn,
) -> Result<EntityId, SimulationError> {
    let ball = world.spawn(spawn.x, spawn.y);

    world.attach_circle_render(ball, spawn.radius)?;
    let collider = world.attach_collider(ball, spawn.radius)?;
    world.attach_physics(ball, spawn.dx, spawn.dy, ball_mass(spawn.radius))?;
    world.attach_boundary_reflection(ball, spawn.radius)?;

    let trigger: Box<dyn CollisionResponse> = match policy {
        ResponsePolicy::Bounce => Box::new(ElasticBounce),
        ResponsePolicy::Freeze => Box::new(FreezeOnContact::default()),
        ResponsePolicy::Log => Box::new(ContactLogger),
    };
    world.add_trigger(collider, trigger)?;

    Ok(ball)
}

/// Populate the world from the configuration
///
/// Uses the explicit ball list unless `random_balls` asks for a generated
/// layout.
pub fn populate(world: &mut World, config: &SceneConfig) -> Result<Vec<EntityId>, SimulationError> {
    let spawns = match config.random_balls {
        Some(count) => random_scene(count, &mut rand::thread_rng()),
        None => config.balls.clone(),
    };

    spawns
        .iter()
        .map(|spawn| spawn_ball(world, config.response, spawn))
        .collect()
}

/// Generate `count` balls placed without initial overlap
///
/// Placement is rejection-sampled; a crowded request may end up with fewer
/// balls than asked for, which is logged.
pub fn random_scene<R: Rng>(count: u32, rng: &mut R) -> Vec<BallSpawn> {
    const MAX_ATTEMPTS: u32 = 100;

    let mut spawns: Vec<BallSpawn> = Vec::new();
    for _ in 0..count {
        let mut placed = false;
        for _ in 0..MAX_ATTEMPTS {
            let radius = rng.gen_range(0.03..0.12);
            let x = rng.gen_range(-1.0 + radius..1.0 - radius);
            let y = rng.gen_range(-1.0 + radius..1.0 - radius);
            let circle = BoundingCircle::new(Vec2::new(x, y), radius);

            let overlaps = spawns.iter().any(|existing| {
                circle.intersects(&BoundingCircle::new(
                    Vec2::new(existing.x, existing.y),
                    existing.radius,
                ))
            });
            if overlaps {
                continue;
            }

            let dx = rng.gen_range(-0.0005..0.0005);
            let dy = rng.gen_range(-0.0005..0.0005);
            spawns.push(BallSpawn::new(x, y, dx, dy, radius));
            placed = true;
            break;
        }
        if !placed {
            log::warn!("scene too crowded, placed {} of {} balls", spawns.len(), count);
            break;
        }
    }

    spawns
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_classic_scene_spawns_six_balls() {
        let mut world = World::new();
        let config = SceneConfig::default();

        let balls = populate(&mut world, &config).unwrap();

        assert_eq!(balls.len(), 6);
        assert_eq!(world.entity_count(), 6);
        // render + collider + physics + boundary per ball
        assert_eq!(world.component_count(), 24);
        assert_eq!(world.collider_count(), 6);
    }

    #[test]
    fn test_spawned_ball_has_trigger_and_mass() {
        let mut world = World::new();
        let spawn = BallSpawn::new(0.5, 0.5, -0.00045, 0.0, 0.1);

        let ball = spawn_ball(&mut world, ResponsePolicy::Bounce, &spawn).unwrap();

        let collider = world.first_component(ball, Capability::Collider).unwrap();
        assert_eq!(world.collider(collider).unwrap().trigger_count(), 1);

        let physics = world.first_component(ball, Capability::Physics).unwrap();
        assert!((world.physics(physics).unwrap().mass() - PI * 0.01).abs() < 1e-12);
    }

    #[test]
    fn test_random_scene_is_overlap_free() {
        let mut rng = StdRng::seed_from_u64(7);
        let spawns = random_scene(12, &mut rng);

        assert!(!spawns.is_empty());
        for (i, a) in spawns.iter().enumerate() {
            assert!(a.radius > 0.0);
            assert!(a.x.abs() + a.radius <= 1.0);
            assert!(a.y.abs() + a.radius <= 1.0);
            for b in &spawns[i + 1..] {
                let circle_a = BoundingCircle::new(Vec2::new(a.x, a.y), a.radius);
                let circle_b = BoundingCircle::new(Vec2::new(b.x, b.y), b.radius);
                assert!(!circle_a.intersects(&circle_b));
            }
        }
    }
}
