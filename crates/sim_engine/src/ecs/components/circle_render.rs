//! Circle presentation component
//!
//! The engine never draws. The variable-cadence hook contributes one
//! [`CircleInstance`](crate::ecs::world::CircleInstance) per frame to the
//! world's render queue; the host drains the queue and rasterizes however it
//! likes.

use crate::error::SimulationError;

/// RGB color with components in `[0, 1]`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    /// Red component
    pub r: f32,
    /// Green component
    pub g: f32,
    /// Blue component
    pub b: f32,
}

impl Color {
    /// Opaque blue, the default circle color
    pub const BLUE: Self = Self::new(0.0, 0.0, 1.0);

    /// Opaque red, used by freeze-on-contact
    pub const RED: Self = Self::new(1.0, 0.0, 0.0);

    /// Create a color from RGB components
    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }
}

/// Presentation data for a circle entity
#[derive(Debug, Clone)]
pub struct CircleRenderComponent {
    radius: f64,
    color: Color,
}

impl CircleRenderComponent {
    /// Create a circle of the given radius in the default color
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
            color: Color::BLUE,
        })
    }

    /// Radius of the drawn circle
    pub fn radius(&self) -> f64 {
        self.radius
    }

    /// Current color
    pub fn color(&self) -> Color {
        self.color
    }

    /// Change the color (state mutation hook for response policies)
    pub fn set_color(&mut self, color: Color) {
        self.color = color;
    }
}
