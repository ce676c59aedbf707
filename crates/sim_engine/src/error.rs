//! Engine-level error types

use crate::ecs::Capability;
use thiserror::Error;

/// Errors surfaced by the simulation core
///
/// There is no recovery policy in this engine: every error aborts the
/// remainder of the current dispatch and propagates to the host, which
/// decides whether to restart.
#[derive(Error, Debug, Clone, Copy, PartialEq)]
pub enum SimulationError {
    /// A component queried a sibling capability that is not attached
    #[error("entity has no {0} component attached")]
    MissingCapability(Capability),

    /// A construction argument that must be positive was zero or negative
    #[error("invalid {name}: {value} (must be positive)")]
    NonPositiveParameter {
        /// Name of the offending parameter
        name: &'static str,
        /// The rejected value
        value: f64,
    },

    /// A typed accessor was handed a component of a different capability
    #[error("expected a {expected} component, found {found}")]
    CapabilityMismatch {
        /// Capability the caller asked for
        expected: Capability,
        /// Capability actually stored under the handle
        found: Capability,
    },

    /// An entity handle did not resolve in this world
    #[error("entity handle does not belong to this world")]
    StaleEntity,

    /// A component handle did not resolve in this world
    #[error("component handle does not belong to this world")]
    StaleComponent,
}
