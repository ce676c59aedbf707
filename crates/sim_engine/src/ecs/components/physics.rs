//! Kinematic integration component

use crate::error::SimulationError;
use crate::foundation::math::Vec2;

/// Velocity and mass for explicit-Euler integration
///
/// The fixed-cadence hook advances the owning entity by `velocity * dt` per
/// axis. Purely kinematic: no clamping and no collision awareness. Velocity
/// is mutated by boundary reflection and by collision response policies;
/// mass is immutable after construction.
#[derive(Debug, Clone)]
pub struct PhysicsComponent {
    velocity: Vec2,
    mass: f64,
}

impl PhysicsComponent {
    /// Create a physics component with an initial velocity and mass
    ///
    /// # Errors
    ///
    /// Rejects a non-positive mass.
    pub fn new(dx: f64, dy: f64, mass: f64) -> Result<Self, SimulationError> {
        if mass <= 0.0 {
            return Err(SimulationError::NonPositiveParameter {
                name: "mass",
                value: mass,
            });
        }

        Ok(Self {
            velocity: Vec2::new(dx, dy),
            mass,
        })
    }

    /// Current velocity
    pub fn velocity(&self) -> Vec2 {
        self.velocity
    }

    /// Replace the current velocity
    pub fn set_velocity(&mut self, velocity: Vec2) {
        self.velocity = velocity;
    }

    /// Mass (constant after construction)
    pub fn mass(&self) -> f64 {
        self.mass
    }

    /// Displacement covered in one step of `dt`
    pub fn displacement(&self, dt: f64) -> Vec2 {
        self.velocity * dt
    }
}
