//! Velocity reflection at the domain edges

use crate::error::SimulationError;
use crate::foundation::math::Vec2;

/// Upper domain edge on both axes
pub const DOMAIN_MAX: f64 = 1.0;

/// Lower domain edge on both axes
pub const DOMAIN_MIN: f64 = -1.0;

/// Reflects a sibling physics component's velocity at the domain edges
///
/// Each axis is handled independently: when the bounding circle reaches the
/// upper edge the axis velocity is forced negative, at the lower edge forced
/// positive. The flip keys on the sign of the penetration, not the direction
/// of travel, so re-applying it while still past the edge is a no-op.
/// Position is never clamped back inside the domain; a fast entity can
/// overshoot past the wall until the next tick reflects it.
#[derive(Debug, Clone)]
pub struct BoundaryReflectionComponent {
    radius: f64,
}

impl BoundaryReflectionComponent {
    /// Create a boundary reflection component for a bounding circle
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

        Ok(Self { radius })
    }

    /// Radius of the bounding circle tested against the edges
    pub fn radius(&self) -> f64 {
        self.radius
    }

    /// Velocity after applying the per-axis reflection rule at `position`
    pub fn reflect(&self, position: Vec2, velocity: Vec2) -> Vec2 {
        let mut reflected = velocity;

        if position.x + self.radius >= DOMAIN_MAX {
            reflected.x = -reflected.x.abs();
        }
        if position.x - self.radius <= DOMAIN_MIN {
            reflected.x = reflected.x.abs();
        }
        if position.y + self.radius >= DOMAIN_MAX {
            reflected.y = -reflected.y.abs();
        }
        if position.y - self.radius <= DOMAIN_MIN {
            reflected.y = reflected.y.abs();
        }

        reflected
    }
}
