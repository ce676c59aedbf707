//! Simulation world: arenas, registry, and update dispatch
//!
//! The world owns every entity and component in two slotmap arenas and keeps
//! two ordered handle lists: the registry of all components (construction
//! order, driving both update cadences) and the global collider list (the
//! broad-phase scan set). Registration is append-only; nothing is ever
//! removed.

use crate::ecs::component::{Behavior, Capability, Component, ComponentId};
use crate::ecs::components::{
    BoundaryReflectionComponent, CircleRenderComponent, ColliderComponent, Color,
    PhysicsComponent,
};
use crate::ecs::entity::{Entity, EntityId};
use crate::error::SimulationError;
use crate::foundation::collections::{HandleMap, TypedHandle};
use crate::foundation::math::Vec2;
use crate::physics::collision::BoundingCircle;
use crate::physics::response::CollisionResponse;

/// One circle to draw, produced by the variable-cadence update
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CircleInstance {
    /// Center position in domain space
    pub position: Vec2,
    /// Circle radius
    pub radius: f64,
    /// Fill color
    pub color: Color,
}

/// Container for all simulation state
///
/// Single-threaded by contract: all updates run synchronously inside the
/// host's idle/display callbacks, in strict registration order.
pub struct World {
    entities: HandleMap<Entity>,
    components: HandleMap<Component>,
    registry: Vec<ComponentId>,
    colliders: Vec<ComponentId>,
    frame: Vec<CircleInstance>,
}

impl Default for World {
    fn default() -> Self {
        Self::new()
    }
}

impl World {
    /// Create an empty world
    pub fn new() -> Self {
        Self {
            entities: HandleMap::new(),
            components: HandleMap::new(),
            registry: Vec::new(),
            colliders: Vec::new(),
            frame: Vec::new(),
        }
    }

    // --- construction -----------------------------------------------------

    /// Create an entity at the given position
    pub fn spawn(&mut self, x: f64, y: f64) -> EntityId {
        TypedHandle::new(self.entities.insert(Entity::new(x, y)))
    }

    /// Attach a behavior to an entity
    ///
    /// Appends the new component to the entity's list and to the global
    /// registry; colliders are additionally appended to the broad-phase
    /// scan list.
    ///
    /// # Errors
    ///
    /// Fails if the entity handle does not resolve in this world.
    pub fn attach(
        &mut self,
        entity: EntityId,
        behavior: Behavior,
    ) -> Result<ComponentId, SimulationError> {
        if !self.entities.contains_key(entity.key()) {
            return Err(SimulationError::StaleEntity);
        }

        let is_collider = behavior.capability() == Capability::Collider;
        let id: ComponentId =
            TypedHandle::new(self.components.insert(Component::new(entity, behavior)));

        self.registry.push(id);
        if is_collider {
            self.colliders.push(id);
        }
        self.entities[entity.key()].push_component(id);

        Ok(id)
    }

    /// Attach a physics component with initial velocity and mass
    ///
    /// # Errors
    ///
    /// Rejects a non-positive mass or a stale entity handle.
    pub fn attach_physics(
        &mut self,
        entity: EntityId,
        dx: f64,
        dy: f64,
        mass: f64,
    ) -> Result<ComponentId, SimulationError> {
        self.attach(entity, Behavior::Physics(PhysicsComponent::new(dx, dy, mass)?))
    }

    /// Attach a broad-phase collider
    ///
    /// # Errors
    ///
    /// Rejects a non-positive radius or a stale entity handle.
    pub fn attach_collider(
        &mut self,
        entity: EntityId,
        radius: f64,
    ) -> Result<ComponentId, SimulationError> {
        self.attach(entity, Behavior::Collider(ColliderComponent::new(radius)?))
    }

    /// Attach a boundary reflection component
    ///
    /// A physics component must be attached to the same entity before this
    /// component's fixed update runs (not necessarily before attachment).
    ///
    /// # Errors
    ///
    /// Rejects a non-positive radius or a stale entity handle.
    pub fn attach_boundary_reflection(
        &mut self,
        entity: EntityId,
        radius: f64,
    ) -> Result<ComponentId, SimulationError> {
        self.attach(
            entity,
            Behavior::BoundaryReflection(BoundaryReflectionComponent::new(radius)?),
        )
    }

    /// Attach a circle render component in the default color
    ///
    /// # Errors
    ///
    /// Rejects a non-positive radius or a stale entity handle.
    pub fn attach_circle_render(
        &mut self,
        entity: EntityId,
        radius: f64,
    ) -> Result<ComponentId, SimulationError> {
        self.attach(
            entity,
            Behavior::CircleRender(CircleRenderComponent::new(radius)?),
        )
    }

    /// Register a collision response trigger on a collider
    ///
    /// # Errors
    ///
    /// Fails if the handle is stale or does not refer to a collider.
    pub fn add_trigger(
        &mut self,
        collider: ComponentId,
        trigger: Box<dyn CollisionResponse>,
    ) -> Result<(), SimulationError> {
        self.collider_mut(collider)?.add_trigger(trigger);
        Ok(())
    }

    // --- lookup -----------------------------------------------------------

    /// Borrow an entity
    ///
    /// # Errors
    ///
    /// Fails if the handle does not resolve in this world.
    pub fn entity(&self, id: EntityId) -> Result<&Entity, SimulationError> {
        self.entities.get(id.key()).ok_or(SimulationError::StaleEntity)
    }

    /// Mutably borrow an entity
    ///
    /// # Errors
    ///
    /// Fails if the handle does not resolve in this world.
    pub fn entity_mut(&mut self, id: EntityId) -> Result<&mut Entity, SimulationError> {
        self.entities
            .get_mut(id.key())
            .ok_or(SimulationError::StaleEntity)
    }

    /// Borrow a component
    ///
    /// # Errors
    ///
    /// Fails if the handle does not resolve in this world.
    pub fn component(&self, id: ComponentId) -> Result<&Component, SimulationError> {
        self.components
            .get(id.key())
            .ok_or(SimulationError::StaleComponent)
    }

    /// Mutably borrow a component
    ///
    /// # Errors
    ///
    /// Fails if the handle does not resolve in this world.
    pub fn component_mut(&mut self, id: ComponentId) -> Result<&mut Component, SimulationError> {
        self.components
            .get_mut(id.key())
            .ok_or(SimulationError::StaleComponent)
    }

    /// All components of a capability attached to an entity
    ///
    /// Linear scan of the entity's list in attachment order; an empty result
    /// is not an error.
    ///
    /// # Errors
    ///
    /// Fails only if the entity handle does not resolve in this world.
    pub fn components_of(
        &self,
        entity: EntityId,
        capability: Capability,
    ) -> Result<Vec<ComponentId>, SimulationError> {
        let entity = self.entity(entity)?;

        Ok(entity
            .components()
            .iter()
            .copied()
            .filter(|&id| {
                self.components
                    .get(id.key())
                    .map_or(false, |component| component.capability() == capability)
            })
            .collect())
    }

    /// First component of a capability attached to an entity
    ///
    /// # Errors
    ///
    /// Surfaces [`SimulationError::MissingCapability`] when no component of
    /// the capability is attached.
    pub fn first_component(
        &self,
        entity: EntityId,
        capability: Capability,
    ) -> Result<ComponentId, SimulationError> {
        self.components_of(entity, capability)?
            .into_iter()
            .next()
            .ok_or(SimulationError::MissingCapability(capability))
    }

    // --- typed accessors --------------------------------------------------

    /// Borrow a physics component
    ///
    /// # Errors
    ///
    /// Fails on a stale handle or a capability mismatch.
    pub fn physics(&self, id: ComponentId) -> Result<&PhysicsComponent, SimulationError> {
        match self.component(id)?.behavior() {
            Behavior::Physics(physics) => Ok(physics),
            other => Err(SimulationError::CapabilityMismatch {
                expected: Capability::Physics,
                found: other.capability(),
            }),
        }
    }

    /// Mutably borrow a physics component
    ///
    /// # Errors
    ///
    /// Fails on a stale handle or a capability mismatch.
    pub fn physics_mut(
        &mut self,
        id: ComponentId,
    ) -> Result<&mut PhysicsComponent, SimulationError> {
        match self.component_mut(id)?.behavior_mut() {
            Behavior::Physics(physics) => Ok(physics),
            other => Err(SimulationError::CapabilityMismatch {
                expected: Capability::Physics,
                found: other.capability(),
            }),
        }
    }

    /// Borrow a collider component
    ///
    /// # Errors
    ///
    /// Fails on a stale handle or a capability mismatch.
    pub fn collider(&self, id: ComponentId) -> Result<&ColliderComponent, SimulationError> {
        match self.component(id)?.behavior() {
            Behavior::Collider(collider) => Ok(collider),
            other => Err(SimulationError::CapabilityMismatch {
                expected: Capability::Collider,
                found: other.capability(),
            }),
        }
    }

    /// Mutably borrow a collider component
    ///
    /// # Errors
    ///
    /// Fails on a stale handle or a capability mismatch.
    pub fn collider_mut(
        &mut self,
        id: ComponentId,
    ) -> Result<&mut ColliderComponent, SimulationError> {
        match self.component_mut(id)?.behavior_mut() {
            Behavior::Collider(collider) => Ok(collider),
            other => Err(SimulationError::CapabilityMismatch {
                expected: Capability::Collider,
                found: other.capability(),
            }),
        }
    }

    /// Borrow a circle render component
    ///
    /// # Errors
    ///
    /// Fails on a stale handle or a capability mismatch.
    pub fn circle_render(
        &self,
        id: ComponentId,
    ) -> Result<&CircleRenderComponent, SimulationError> {
        match self.component(id)?.behavior() {
            Behavior::CircleRender(render) => Ok(render),
            other => Err(SimulationError::CapabilityMismatch {
                expected: Capability::CircleRender,
                found: other.capability(),
            }),
        }
    }

    /// Mutably borrow a circle render component
    ///
    /// # Errors
    ///
    /// Fails on a stale handle or a capability mismatch.
    pub fn circle_render_mut(
        &mut self,
        id: ComponentId,
    ) -> Result<&mut CircleRenderComponent, SimulationError> {
        match self.component_mut(id)?.behavior_mut() {
            Behavior::CircleRender(render) => Ok(render),
            other => Err(SimulationError::CapabilityMismatch {
                expected: Capability::CircleRender,
                found: other.capability(),
            }),
        }
    }

    // --- counts -----------------------------------------------------------

    /// Number of entities in the world
    pub fn entity_count(&self) -> usize {
        self.entities.len()
    }

    /// Number of components in the registry
    pub fn component_count(&self) -> usize {
        self.registry.len()
    }

    /// Number of colliders in the broad-phase scan list
    pub fn collider_count(&self) -> usize {
        self.colliders.len()
    }

    // --- dispatch ---------------------------------------------------------

    /// Run the variable-cadence hook on every component in registration order
    ///
    /// Rebuilds the frame's render queue; non-render components have no
    /// variable hook.
    ///
    /// # Errors
    ///
    /// The first failing hook aborts the remainder of the dispatch.
    pub fn update_all(&mut self, dt: f64) -> Result<(), SimulationError> {
        self.frame.clear();

        let mut index = 0;
        while index < self.registry.len() {
            let id = self.registry[index];
            self.update_component(id, dt)?;
            index += 1;
        }

        Ok(())
    }

    /// Run the fixed-cadence hook on every component in registration order
    ///
    /// # Errors
    ///
    /// The first failing hook aborts the remainder of the dispatch; there is
    /// no isolation between components.
    pub fn fixed_update_all(&mut self, dt: f64) -> Result<(), SimulationError> {
        let mut index = 0;
        while index < self.registry.len() {
            let id = self.registry[index];
            self.fixed_update_component(id, dt)?;
            index += 1;
        }

        Ok(())
    }

    /// Circles produced by the most recent variable update, in registration
    /// order, for the host to draw
    pub fn frame(&self) -> &[CircleInstance] {
        &self.frame
    }

    fn update_component(&mut self, id: ComponentId, _dt: f64) -> Result<(), SimulationError> {
        let component = self.component(id)?;
        let entity = component.entity();

        if let Behavior::CircleRender(render) = component.behavior() {
            let instance = CircleInstance {
                position: self.entity(entity)?.position(),
                radius: render.radius(),
                color: render.color(),
            };
            self.frame.push(instance);
        }

        Ok(())
    }

    fn fixed_update_component(&mut self, id: ComponentId, dt: f64) -> Result<(), SimulationError> {
        match self.component(id)?.behavior() {
            Behavior::Physics(_) => self.physics_fixed_update(id, dt),
            Behavior::BoundaryReflection(_) => self.boundary_fixed_update(id),
            Behavior::Collider(_) => self.collider_fixed_update(id, dt),
            Behavior::CircleRender(_) => Ok(()),
        }
    }

    /// Explicit Euler: advance the owning entity by `velocity * dt`
    fn physics_fixed_update(&mut self, id: ComponentId, dt: f64) -> Result<(), SimulationError> {
        let component = self.component(id)?;
        let entity = component.entity();
        let displacement = match component.behavior() {
            Behavior::Physics(physics) => physics.displacement(dt),
            _ => unreachable!("dispatched on capability"),
        };

        self.entity_mut(entity)?.translate(displacement);
        Ok(())
    }

    /// Flip the sibling physics component's velocity at the domain edges
    fn boundary_fixed_update(&mut self, id: ComponentId) -> Result<(), SimulationError> {
        let component = self.component(id)?;
        let entity = component.entity();
        let boundary = match component.behavior() {
            Behavior::BoundaryReflection(boundary) => boundary.clone(),
            _ => unreachable!("dispatched on capability"),
        };

        let position = self.entity(entity)?.position();
        let physics_id = self.first_component(entity, Capability::Physics)?;

        let reflected = boundary.reflect(position, self.physics(physics_id)?.velocity());
        self.physics_mut(physics_id)?.set_velocity(reflected);
        Ok(())
    }

    /// Broad phase: scan every collider in the world against every collider
    /// on this entity, firing this collider's triggers on each overlap
    ///
    /// O(C²) per tick across all colliders. Each overlapping pair is seen
    /// once from each side within the same tick, so responses fire from both
    /// perspectives in registration order.
    fn collider_fixed_update(&mut self, id: ComponentId, dt: f64) -> Result<(), SimulationError> {
        let owner = self.component(id)?.entity();
        let own_colliders = self.components_of(owner, Capability::Collider)?;

        let mut other_index = 0;
        while other_index < self.colliders.len() {
            let other = self.colliders[other_index];
            other_index += 1;

            for &own in &own_colliders {
                if other == own {
                    continue;
                }

                // Positions are read fresh for every pair: an earlier
                // response in this same scan may have moved either entity.
                let own_circle =
                    BoundingCircle::new(self.entity(owner)?.position(), self.collider(own)?.radius());
                let other_entity = self.component(other)?.entity();
                let other_circle = BoundingCircle::new(
                    self.entity(other_entity)?.position(),
                    self.collider(other)?.radius(),
                );

                if own_circle.intersects(&other_circle) {
                    log::trace!(
                        "overlap: {:?} <-> {:?} (distance {:.4})",
                        id.key(),
                        other.key(),
                        own_circle.center_distance(&other_circle)
                    );
                    self.fire_triggers(id, other, dt)?;
                }
            }
        }

        Ok(())
    }

    /// Invoke every trigger registered on `us` with the overlapping pair
    ///
    /// The trigger list is detached for the duration of the calls so the
    /// responses can borrow the world mutably; triggers registered by a
    /// response while the list is detached are kept.
    fn fire_triggers(
        &mut self,
        us: ComponentId,
        them: ComponentId,
        dt: f64,
    ) -> Result<(), SimulationError> {
        let mut triggers = self.collider_mut(us)?.take_triggers();

        let mut outcome = Ok(());
        for trigger in &mut triggers {
            if let Err(error) = trigger.on_collision(self, us, them, dt) {
                outcome = Err(error);
                break;
            }
        }

        self.collider_mut(us)?.restore_triggers(triggers);
        outcome
    }
}
