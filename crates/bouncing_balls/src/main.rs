//! Bouncing balls demo
//!
//! Headless host for the simulation engine: pumps the clock's idle and
//! display entry points from a monotonic time source and "presents" each
//! frame by draining the render queue into trace logs. Windowing and
//! drawing belong to a real host; this binary only shows the wiring.

mod config;
mod scene;

use std::time::Duration;

use sim_engine::foundation::logging;
use sim_engine::prelude::*;

use crate::config::SceneConfig;

const CONFIG_PATH: &str = "balls.toml";

fn main() -> Result<(), Box<dyn std::error::Error>> {
    logging::init_with_default("info");

    let config = load_config();
    config.sim.validate()?;

    let mut world = World::new();
    let balls = scene::populate(&mut world, &config)?;
    log::info!(
        "spawned {} balls, {:?} response, {} updates/s",
        balls.len(),
        config.response,
        config.sim.updates_per_second
    );

    let mut clock = config.sim.clock()?;
    let time = MonotonicTime::new();
    let run_time = Stopwatch::start_new();
    clock.start(time.now_ms());

    loop {
        let report = clock.on_idle(time.now_ms(), &mut world)?;
        if report.redraw_requested {
            clock.on_display(time.now_ms(), &mut world)?;
            present(world.frame());
        }

        if let Some(limit) = config.duration_secs {
            if run_time.elapsed_secs() >= limit {
                break;
            }
        }

        // Yield briefly instead of spinning like the original idle callback.
        std::thread::sleep(Duration::from_millis(1));
    }

    log::info!(
        "finished after {:.1} s, {} fixed ticks",
        run_time.elapsed_secs(),
        clock.tick_count()
    );
    Ok(())
}

fn load_config() -> SceneConfig {
    if std::path::Path::new(CONFIG_PATH).exists() {
        match SceneConfig::load_from_file(CONFIG_PATH) {
            Ok(config) => {
                log::info!("loaded {CONFIG_PATH}");
                return config;
            }
            Err(error) => {
                log::warn!("failed to load {CONFIG_PATH}: {error}, using defaults");
            }
        }
    }
    SceneConfig::default()
}

fn present(frame: &[CircleInstance]) {
    for instance in frame {
        log::trace!(
            "circle ({:+.3}, {:+.3}) r {:.2} rgb ({:.1}, {:.1}, {:.1})",
            instance.position.x,
            instance.position.y,
            instance.radius,
            instance.color.r,
            instance.color.g,
            instance.color.b
        );
    }
}
