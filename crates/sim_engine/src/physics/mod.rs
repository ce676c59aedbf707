//! Collision math and response policies

pub mod collision;
pub mod response;

pub use collision::BoundingCircle;
pub use response::{CollisionResponse, ContactLogger, ElasticBounce, FreezeOnContact};
