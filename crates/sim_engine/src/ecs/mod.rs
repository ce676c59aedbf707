//! Entity-component model
//!
//! Entities are positional containers; behavior comes from components
//! attached to them. All entities and components live in arenas owned by a
//! [`World`], referenced through stable typed handles. Construction is
//! append-only for the life of the process: there is no removal API.

pub mod component;
pub mod components;
pub mod entity;
pub mod world;

pub use component::{Behavior, Capability, Component, ComponentId};
pub use entity::{Entity, EntityId};
pub use world::{CircleInstance, World};
