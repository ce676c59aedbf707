//! Math utilities and types
//!
//! Provides the fundamental math types for 2D simulation. Simulation state is
//! kept in `f64` so that fixed-step runs reproduce bit for bit.

pub use nalgebra::Vector2;

/// 2D vector type
pub type Vec2 = Vector2<f64>;

/// Math constants
pub mod constants {
    /// Pi constant
    pub const PI: f64 = std::f64::consts::PI;

    /// 2 * Pi
    pub const TAU: f64 = 2.0 * PI;
}
