//! Attachable component data
//!
//! Each module holds the data for one capability. Update semantics live in
//! the world dispatch; the structs here validate their construction
//! arguments and expose the state the hooks and response policies touch.

pub mod boundary;
pub mod circle_render;
pub mod collider;
pub mod physics;

pub use boundary::BoundaryReflectionComponent;
pub use circle_render::{CircleRenderComponent, Color};
pub use collider::ColliderComponent;
pub use physics::PhysicsComponent;
