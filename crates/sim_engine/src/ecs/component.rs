//! Component trait objects replaced by a closed sum type
//!
//! Every attachable behavior is one variant of [`Behavior`]; the registry
//! dispatches the two update cadences by pattern match instead of virtual
//! calls. The capability tag is a typed enum rather than a string, so sibling
//! lookup cannot typo a tag, while still allowing several components of the
//! same capability on one entity.

use std::fmt;

use crate::ecs::components::{
    BoundaryReflectionComponent, CircleRenderComponent, ColliderComponent, PhysicsComponent,
};
use crate::ecs::entity::EntityId;
use crate::foundation::collections::TypedHandle;

/// Stable handle to a [`Component`] in a world's arena
pub type ComponentId = TypedHandle<Component>;

/// Capability tag identifying what a component can do
///
/// Used for sibling lookup on an entity; several components of the same
/// capability may be attached to one entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Capability {
    /// Kinematic integration (velocity, mass)
    Physics,
    /// Pairwise circle-overlap detection with response triggers
    Collider,
    /// Velocity reflection at the domain edges
    BoundaryReflection,
    /// Circle presentation data for the host renderer
    CircleRender,
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Physics => "Physics",
            Self::Collider => "Collider",
            Self::BoundaryReflection => "BoundaryReflection",
            Self::CircleRender => "CircleRender",
        };
        f.write_str(name)
    }
}

/// The closed set of attachable behaviors
#[derive(Debug)]
pub enum Behavior {
    /// Explicit-Euler velocity integration
    Physics(PhysicsComponent),
    /// Broad-phase circle collider with response triggers
    Collider(ColliderComponent),
    /// Per-axis velocity reflection at the domain edges
    BoundaryReflection(BoundaryReflectionComponent),
    /// Circle presentation data
    CircleRender(CircleRenderComponent),
}

impl Behavior {
    /// The capability tag for this behavior
    pub fn capability(&self) -> Capability {
        match self {
            Self::Physics(_) => Capability::Physics,
            Self::Collider(_) => Capability::Collider,
            Self::BoundaryReflection(_) => Capability::BoundaryReflection,
            Self::CircleRender(_) => Capability::CircleRender,
        }
    }
}

/// A behavior attached to an entity
///
/// Holds a non-owning handle back to the owning entity; entities outlive all
/// of their components because neither is ever removed.
#[derive(Debug)]
pub struct Component {
    entity: EntityId,
    behavior: Behavior,
}

impl Component {
    /// Create a component owned by the given entity
    pub(crate) fn new(entity: EntityId, behavior: Behavior) -> Self {
        Self { entity, behavior }
    }

    /// Handle of the owning entity
    pub fn entity(&self) -> EntityId {
        self.entity
    }

    /// The attached behavior
    pub fn behavior(&self) -> &Behavior {
        &self.behavior
    }

    /// Mutable access to the attached behavior
    pub fn behavior_mut(&mut self) -> &mut Behavior {
        &mut self.behavior
    }

    /// The capability tag of the attached behavior
    pub fn capability(&self) -> Capability {
        self.behavior.capability()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capability_of_each_variant() {
        let physics = Behavior::Physics(PhysicsComponent::new(0.0, 0.0, 1.0).unwrap());
        let collider = Behavior::Collider(ColliderComponent::new(0.1).unwrap());
        let boundary =
            Behavior::BoundaryReflection(BoundaryReflectionComponent::new(0.1).unwrap());
        let render = Behavior::CircleRender(CircleRenderComponent::new(0.1).unwrap());

        assert_eq!(physics.capability(), Capability::Physics);
        assert_eq!(collider.capability(), Capability::Collider);
        assert_eq!(boundary.capability(), Capability::BoundaryReflection);
        assert_eq!(render.capability(), Capability::CircleRender);
    }

    #[test]
    fn test_capability_display_matches_tag() {
        assert_eq!(Capability::Physics.to_string(), "Physics");
        assert_eq!(Capability::Collider.to_string(), "Collider");
    }
}
