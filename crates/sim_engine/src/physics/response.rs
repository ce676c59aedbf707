//! Collision response policies
//!
//! Responses are strategy objects registered on a collider through
//! [`World::add_trigger`](crate::ecs::World::add_trigger). When the broad
//! phase detects an overlap, every trigger on the detecting collider runs
//! with the two collider handles and the tick's `dt`. Responses read and
//! mutate sibling components of both entities through the world.

use crate::ecs::components::Color;
use crate::ecs::{Capability, ComponentId, World};
use crate::error::SimulationError;
use crate::foundation::math::Vec2;

/// A response invoked when two colliders overlap
///
/// `us` is the collider whose fixed update detected the overlap, `them` the
/// collider it overlapped with.
pub trait CollisionResponse {
    /// React to a detected overlap
    ///
    /// # Errors
    ///
    /// Any error aborts the remainder of the current tick's dispatch.
    fn on_collision(
        &mut self,
        world: &mut World,
        us: ComponentId,
        them: ComponentId,
        dt: f64,
    ) -> Result<(), SimulationError>;
}

impl<F> CollisionResponse for F
where
    F: FnMut(&mut World, ComponentId, ComponentId, f64) -> Result<(), SimulationError>,
{
    fn on_collision(
        &mut self,
        world: &mut World,
        us: ComponentId,
        them: ComponentId,
        dt: f64,
    ) -> Result<(), SimulationError> {
        self(world, us, them, dt)
    }
}

/// Elastic bounce between the two entities' physics components
///
/// Applies the 1-D elastic-collision formula independently per axis:
///
/// ```text
/// v1' = (v1·(m1−m2) + 2·m2·v2) / (m1+m2)
/// v2' = (v2·(m2−m1) + 2·m1·v1) / (m1+m2)
/// ```
///
/// Exact only for head-on collisions along the line of centers; the
/// per-axis simplification is intentional. After assigning the new
/// velocities, both entities advance one step of `dt` using them so the
/// pair separates instead of re-triggering on the next tick.
#[derive(Debug, Clone, Copy, Default)]
pub struct ElasticBounce;

impl CollisionResponse for ElasticBounce {
    fn on_collision(
        &mut self,
        world: &mut World,
        us: ComponentId,
        them: ComponentId,
        dt: f64,
    ) -> Result<(), SimulationError> {
        let entity_a = world.component(us)?.entity();
        let entity_b = world.component(them)?.entity();

        let physics_a = world.first_component(entity_a, Capability::Physics)?;
        let physics_b = world.first_component(entity_b, Capability::Physics)?;

        let (v1, m1) = {
            let physics = world.physics(physics_a)?;
            (physics.velocity(), physics.mass())
        };
        let (v2, m2) = {
            let physics = world.physics(physics_b)?;
            (physics.velocity(), physics.mass())
        };

        let new_v1 = (v1 * (m1 - m2) + v2 * (2.0 * m2)) / (m1 + m2);
        let new_v2 = (v2 * (m2 - m1) + v1 * (2.0 * m1)) / (m1 + m2);

        world.physics_mut(physics_a)?.set_velocity(new_v1);
        world.physics_mut(physics_b)?.set_velocity(new_v2);

        // Back both entities off by one step of the new velocities so the
        // same contact does not register again next tick.
        world.entity_mut(entity_a)?.translate(new_v1 * dt);
        world.entity_mut(entity_b)?.translate(new_v2 * dt);

        Ok(())
    }
}

/// Freeze both entities on contact and recolor them
///
/// Zeroes both physics velocities and recolors both circle-render siblings.
/// A state-mutation example: responses may touch components other than
/// physics.
#[derive(Debug, Clone, Copy)]
pub struct FreezeOnContact {
    color: Color,
}

impl FreezeOnContact {
    /// Freeze with a custom marker color
    pub fn with_color(color: Color) -> Self {
        Self { color }
    }
}

impl Default for FreezeOnContact {
    fn default() -> Self {
        Self { color: Color::RED }
    }
}

impl CollisionResponse for FreezeOnContact {
    fn on_collision(
        &mut self,
        world: &mut World,
        us: ComponentId,
        them: ComponentId,
        _dt: f64,
    ) -> Result<(), SimulationError> {
        let entity_a = world.component(us)?.entity();
        let entity_b = world.component(them)?.entity();

        for entity in [entity_a, entity_b] {
            let physics = world.first_component(entity, Capability::Physics)?;
            world.physics_mut(physics)?.set_velocity(Vec2::zeros());

            let render = world.first_component(entity, Capability::CircleRender)?;
            world.circle_render_mut(render)?.set_color(self.color);
        }

        Ok(())
    }
}

/// Log each contact without mutating any state
#[derive(Debug, Clone, Copy, Default)]
pub struct ContactLogger;

impl CollisionResponse for ContactLogger {
    fn on_collision(
        &mut self,
        _world: &mut World,
        us: ComponentId,
        them: ComponentId,
        _dt: f64,
    ) -> Result<(), SimulationError> {
        log::info!("contact: {:?} <-> {:?}", us.key(), them.key());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    /// Two entities in contact, each with a collider and physics attached
    fn contact_pair(
        world: &mut World,
        v1: Vec2,
        m1: f64,
        v2: Vec2,
        m2: f64,
    ) -> (ComponentId, ComponentId) {
        let a = world.spawn(0.0, 0.0);
        let b = world.spawn(0.15, 0.0);
        let collider_a = world.attach_collider(a, 0.1).unwrap();
        let collider_b = world.attach_collider(b, 0.1).unwrap();
        world.attach_physics(a, v1.x, v1.y, m1).unwrap();
        world.attach_physics(b, v2.x, v2.y, m2).unwrap();
        (collider_a, collider_b)
    }

    fn velocity_of(world: &World, collider: ComponentId) -> Vec2 {
        let entity = world.component(collider).unwrap().entity();
        let physics = world.first_component(entity, Capability::Physics).unwrap();
        world.physics(physics).unwrap().velocity()
    }

    #[test]
    fn test_equal_masses_swap_velocities() {
        let mut world = World::new();
        let (us, them) = contact_pair(
            &mut world,
            Vec2::new(1.0, 0.0),
            2.0,
            Vec2::new(-1.0, 0.0),
            2.0,
        );

        ElasticBounce.on_collision(&mut world, us, them, 0.0).unwrap();

        assert_eq!(velocity_of(&world, us), Vec2::new(-1.0, 0.0));
        assert_eq!(velocity_of(&world, them), Vec2::new(1.0, 0.0));
    }

    #[test]
    fn test_momentum_is_conserved() {
        let mut world = World::new();
        let v1 = Vec2::new(0.7, -0.2);
        let v2 = Vec2::new(-0.4, 0.9);
        let (m1, m2) = (1.5, 0.3);
        let (us, them) = contact_pair(&mut world, v1, m1, v2, m2);

        ElasticBounce.on_collision(&mut world, us, them, 0.0).unwrap();

        let before = v1 * m1 + v2 * m2;
        let after = velocity_of(&world, us) * m1 + velocity_of(&world, them) * m2;
        assert_relative_eq!(before.x, after.x, epsilon = 1e-12);
        assert_relative_eq!(before.y, after.y, epsilon = 1e-12);
    }

    #[test]
    fn test_bounce_separates_by_one_step() {
        let mut world = World::new();
        let (us, them) = contact_pair(
            &mut world,
            Vec2::new(1.0, 0.0),
            2.0,
            Vec2::new(-1.0, 0.0),
            2.0,
        );

        ElasticBounce.on_collision(&mut world, us, them, 0.01).unwrap();

        let entity_a = world.component(us).unwrap().entity();
        let entity_b = world.component(them).unwrap().entity();
        // Positions advance one step of the swapped velocities
        assert_relative_eq!(world.entity(entity_a).unwrap().position().x, -0.01);
        assert_relative_eq!(world.entity(entity_b).unwrap().position().x, 0.16);
    }

    #[test]
    fn test_bounce_requires_physics_siblings() {
        let mut world = World::new();
        let a = world.spawn(0.0, 0.0);
        let b = world.spawn(0.1, 0.0);
        let us = world.attach_collider(a, 0.1).unwrap();
        let them = world.attach_collider(b, 0.1).unwrap();

        let result = ElasticBounce.on_collision(&mut world, us, them, 0.01);
        assert_eq!(
            result,
            Err(SimulationError::MissingCapability(Capability::Physics))
        );
    }

    #[test]
    fn test_freeze_zeroes_and_recolors_both() {
        let mut world = World::new();
        let (us, them) = contact_pair(
            &mut world,
            Vec2::new(1.0, 0.5),
            1.0,
            Vec2::new(-1.0, 0.0),
            1.0,
        );
        let entity_a = world.component(us).unwrap().entity();
        let entity_b = world.component(them).unwrap().entity();
        world.attach_circle_render(entity_a, 0.1).unwrap();
        world.attach_circle_render(entity_b, 0.1).unwrap();

        FreezeOnContact::default()
            .on_collision(&mut world, us, them, 0.01)
            .unwrap();

        assert_eq!(velocity_of(&world, us), Vec2::zeros());
        assert_eq!(velocity_of(&world, them), Vec2::zeros());
        for entity in [entity_a, entity_b] {
            let render = world
                .first_component(entity, Capability::CircleRender)
                .unwrap();
            assert_eq!(world.circle_render(render).unwrap().color(), Color::RED);
        }
    }

    #[test]
    fn test_logger_mutates_nothing() {
        let mut world = World::new();
        let v1 = Vec2::new(1.0, 0.0);
        let v2 = Vec2::new(-1.0, 0.0);
        let (us, them) = contact_pair(&mut world, v1, 1.0, v2, 1.0);

        ContactLogger.on_collision(&mut world, us, them, 0.01).unwrap();

        assert_eq!(velocity_of(&world, us), v1);
        assert_eq!(velocity_of(&world, them), v2);
    }

    #[test]
    fn test_closures_are_responses() {
        let mut world = World::new();
        let (us, them) = contact_pair(
            &mut world,
            Vec2::new(1.0, 0.0),
            1.0,
            Vec2::new(-1.0, 0.0),
            1.0,
        );

        let mut seen = 0;
        let mut counter = |_: &mut World, _: ComponentId, _: ComponentId, _: f64| {
            seen += 1;
            Ok::<(), SimulationError>(())
        };
        counter.on_collision(&mut world, us, them, 0.01).unwrap();
        counter.on_collision(&mut world, us, them, 0.01).unwrap();

        assert_eq!(seen, 2);
    }
}
