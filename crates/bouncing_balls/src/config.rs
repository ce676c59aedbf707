//! Demo configuration

use serde::{Deserialize, Serialize};
use sim_engine::prelude::{Config, SimConfig};

/// Which response policy the scene registers on every collider
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResponsePolicy {
    /// Elastic bounce between colliding balls
    Bounce,
    /// Freeze both balls on contact and recolor them
    Freeze,
    /// Log each contact without touching the simulation
    Log,
}

/// Initial state for one ball
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BallSpawn {
    /// Starting x position
    pub x: f64,
    /// Starting y position
    pub y: f64,
    /// Velocity x component, units per millisecond
    pub dx: f64,
    /// Velocity y component, units per millisecond
    pub dy: f64,
    /// Ball radius
    pub radius: f64,
}

impl BallSpawn {
    /// Create a spawn record
    pub fn new(x: f64, y: f64, dx: f64, dy: f64, radius: f64) -> Self {
        Self { x, y, dx, dy, radius }
    }
}

/// Full demo configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SceneConfig {
    /// Simulation loop settings
    pub sim: SimConfig,

    /// Response policy registered on every collider
    pub response: ResponsePolicy,

    /// Explicit ball list, used when `random_balls` is unset
    pub balls: Vec<BallSpawn>,

    /// Spawn this many randomly placed balls instead of the explicit list
    pub random_balls: Option<u32>,

    /// Stop after this many seconds; run until killed when unset
    pub duration_secs: Option<f64>,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            sim: SimConfig::default(),
            response: ResponsePolicy::Bounce,
            balls: classic_scene(),
            random_balls: None,
            duration_secs: None,
        }
    }
}

impl Config for SceneConfig {}

/// The classic six-ball layout
pub fn classic_scene() -> Vec<BallSpawn> {
    vec![
        BallSpawn::new(0.5, 0.5, -0.00045, 0.0, 0.1),
        BallSpawn::new(-0.25, 0.5, 0.00045, 0.0, 0.2),
        BallSpawn::new(-0.75, 0.45, 0.0001, 0.0002, 0.1),
        BallSpawn::new(0.0, 0.0, 0.0007, -0.00005, 0.15),
        BallSpawn::new(0.6, -0.45, 0.0003, -0.0002, 0.05),
        BallSpawn::new(-0.35, -0.45, 0.0003, -0.0002, 0.05),
    ]
}
