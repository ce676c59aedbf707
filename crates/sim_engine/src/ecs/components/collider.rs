//! Broad-phase circle collider component

use std::fmt;

use crate::error::SimulationError;
use crate::physics::response::CollisionResponse;

/// Circle collider scanned against every other collider each fixed tick
///
/// Holds the ordered list of response triggers invoked when an overlap is
/// detected. Besides the per-entity component list, every collider is also
/// registered in the world's global collider list for the broad-phase scan.
pub struct ColliderComponent {
    radius: f64,
    triggers: Vec<Box<dyn CollisionResponse>>,
}

impl ColliderComponent {
    /// Create a collider with the given circle radius
    ///
    /// # Errors
    ///
    /// Rejects a non-positive radius.
    pub fn new(radius: f64) -> Result<Self, SimulationError> {
        if radius <= 0.0 {
            return Err(SimulationError::NonPositiveParameter {
                name: "radius",
                value: radius,
            });
        }

        Ok(Self {
            radius,
            triggers: Vec::new(),
        })
    }

    /// Radius of the collision circle
    pub fn radius(&self) -> f64 {
        self.radius
    }

    /// Register a response trigger, invoked on every detected overlap
    pub fn add_trigger(&mut self, trigger: Box<dyn CollisionResponse>) {
        self.triggers.push(trigger);
    }

    /// Number of registered response triggers
    pub fn trigger_count(&self) -> usize {
        self.triggers.len()
    }

    /// Detach the trigger list for invocation while the world is borrowed
    pub(crate) fn take_triggers(&mut self) -> Vec<Box<dyn CollisionResponse>> {
        std::mem::take(&mut self.triggers)
    }

    /// Reattach a previously taken trigger list, keeping registration order
    /// ahead of any triggers added while it was detached
    pub(crate) fn restore_triggers(&mut self, mut taken: Vec<Box<dyn CollisionResponse>>) {
        taken.append(&mut self.triggers);
        self.triggers = taken;
    }
}

impl fmt::Debug for ColliderComponent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ColliderComponent")
            .field("radius", &self.radius)
            .field("triggers", &self.triggers.len())
            .finish()
    }
}
