//! # Sim Engine
//!
//! A fixed-timestep simulation engine composing per-entity behavior from
//! attachable components.
//!
//! ## Features
//!
//! - **Fixed Timestep**: Deterministic logic updates decoupled from the
//!   presentation rate via a time accumulator
//! - **Component Model**: Entities own ordered lists of attachable components
//!   with capability lookup across siblings
//! - **Collision Detection**: Pairwise circle broad phase with pluggable
//!   response policies (elastic bounce, freeze, log)
//! - **Host Agnostic**: The host event pump supplies a monotonic time source
//!   and wires the idle/display entry points; the engine performs no
//!   windowing, drawing, or input handling of its own
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use sim_engine::prelude::*;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let mut world = World::new();
//!     let ball = world.spawn(0.5, 0.5);
//!     world.attach_circle_render(ball, 0.2)?;
//!     let collider = world.attach_collider(ball, 0.2)?;
//!     world.attach_physics(ball, -0.00045, 0.0, 0.12)?;
//!     world.attach_boundary_reflection(ball, 0.2)?;
//!     world.add_trigger(collider, Box::new(ElasticBounce))?;
//!
//!     let mut clock = SimulationClock::new(1000.0 / 60.0)?;
//!     let time = MonotonicTime::new();
//!     clock.start(time.now_ms());
//!     loop {
//!         let report = clock.on_idle(time.now_ms(), &mut world)?;
//!         if report.redraw_requested {
//!             clock.on_display(time.now_ms(), &mut world)?;
//!             // hand world.frame() to the renderer here
//!         }
//!     }
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::too_many_arguments)]

pub mod foundation;
pub mod ecs;
pub mod physics;

mod clock;
mod config;
mod error;

pub use clock::{IdleReport, LoopMetrics, SimulationClock};
pub use config::{Config, ConfigError, SimConfig};
pub use error::SimulationError;

/// Common imports for engine users
pub mod prelude {
    pub use crate::{
        clock::{IdleReport, LoopMetrics, SimulationClock},
        config::{Config, ConfigError, SimConfig},
        ecs::{
            components::{
                BoundaryReflectionComponent, CircleRenderComponent, ColliderComponent, Color,
                PhysicsComponent,
            },
            Behavior, Capability, CircleInstance, Component, ComponentId, Entity, EntityId, World,
        },
        error::SimulationError,
        foundation::{
            math::Vec2,
            time::{MonotonicTime, Stopwatch, TimeSource},
        },
        physics::{
            collision::BoundingCircle,
            response::{CollisionResponse, ContactLogger, ElasticBounce, FreezeOnContact},
        },
    };
}
