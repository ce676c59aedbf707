//! Fixed-timestep simulation clock
//!
//! Decouples the fixed-rate logic update from the variable-rate presentation
//! update with a time accumulator. The host wires [`SimulationClock::on_idle`]
//! into its idle callback and [`SimulationClock::on_display`] into its
//! display callback, feeding both from the same monotonic time source.

use crate::ecs::World;
use crate::error::SimulationError;

/// Outcome of one idle invocation
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IdleReport {
    /// Number of fixed ticks executed
    pub ticks: u32,
    /// Whether the host should schedule a redraw
    pub redraw_requested: bool,
}

/// Update and frame rate measurement
///
/// Counts fixed ticks and presented frames; every measurement interval of
/// elapsed time the counters are converted into per-second rates, logged,
/// and reset. Observability only: rates feed no control decision.
#[derive(Debug, Clone)]
pub struct LoopMetrics {
    interval_ms: f64,
    last_measurement_ms: f64,
    update_count: u32,
    frame_count: u32,
    updates_per_second: f64,
    frames_per_second: f64,
}

impl LoopMetrics {
    /// Default measurement interval
    pub const DEFAULT_INTERVAL_MS: f64 = 500.0;

    fn new(interval_ms: f64) -> Self {
        Self {
            interval_ms,
            last_measurement_ms: 0.0,
            update_count: 0,
            frame_count: 0,
            updates_per_second: 0.0,
            frames_per_second: 0.0,
        }
    }

    fn start(&mut self, now_ms: f64) {
        self.last_measurement_ms = now_ms;
        self.update_count = 0;
        self.frame_count = 0;
    }

    fn record_update(&mut self, now_ms: f64) {
        self.update_count += 1;
        self.roll_over(now_ms);
    }

    fn record_frame(&mut self) {
        self.frame_count += 1;
    }

    fn roll_over(&mut self, now_ms: f64) {
        let elapsed_ms = now_ms - self.last_measurement_ms;
        if elapsed_ms < self.interval_ms {
            return;
        }

        self.updates_per_second = f64::from(self.update_count) * 1000.0 / elapsed_ms;
        self.frames_per_second = f64::from(self.frame_count) * 1000.0 / elapsed_ms;
        log::info!(
            "ups: {:.0} fps: {:.0}",
            self.updates_per_second,
            self.frames_per_second
        );

        self.update_count = 0;
        self.frame_count = 0;
        self.last_measurement_ms = now_ms;
    }

    /// Fixed ticks per second over the last completed interval
    pub fn updates_per_second(&self) -> f64 {
        self.updates_per_second
    }

    /// Presented frames per second over the last completed interval
    pub fn frames_per_second(&self) -> f64 {
        self.frames_per_second
    }
}

/// Time-accumulator clock driving the two update cadences
///
/// Each idle invocation adds the real elapsed time to the accumulator and
/// drains it in fixed-size steps, running one [`World::fixed_update_all`]
/// per step. After the drain the accumulator holds less than one step. The
/// drain has no iteration cap: a long stall runs a correspondingly long
/// burst of ticks before control returns to the host.
pub struct SimulationClock {
    fixed_step_ms: f64,
    accumulated_ms: f64,
    last_loop_time_ms: f64,
    tick_count: u64,
    metrics: LoopMetrics,
}

impl SimulationClock {
    /// Create a clock with the given fixed step
    ///
    /// # Errors
    ///
    /// Rejects a non-positive step.
    pub fn new(fixed_step_ms: f64) -> Result<Self, SimulationError> {
        if fixed_step_ms <= 0.0 {
            return Err(SimulationError::NonPositiveParameter {
                name: "fixed_step_ms",
                value: fixed_step_ms,
            });
        }

        Ok(Self {
            fixed_step_ms,
            accumulated_ms: 0.0,
            last_loop_time_ms: 0.0,
            tick_count: 0,
            metrics: LoopMetrics::new(LoopMetrics::DEFAULT_INTERVAL_MS),
        })
    }

    /// Create a clock targeting a number of fixed updates per second
    ///
    /// # Errors
    ///
    /// Rejects a non-positive rate.
    pub fn from_updates_per_second(updates_per_second: f64) -> Result<Self, SimulationError> {
        if updates_per_second <= 0.0 {
            return Err(SimulationError::NonPositiveParameter {
                name: "updates_per_second",
                value: updates_per_second,
            });
        }

        Self::new(1000.0 / updates_per_second)
    }

    /// Set the measurement interval
    ///
    /// # Errors
    ///
    /// Rejects a non-positive interval.
    pub fn with_measurement_interval(mut self, interval_ms: f64) -> Result<Self, SimulationError> {
        if interval_ms <= 0.0 {
            return Err(SimulationError::NonPositiveParameter {
                name: "measurement_interval_ms",
                value: interval_ms,
            });
        }

        self.metrics.interval_ms = interval_ms;
        Ok(self)
    }

    /// Anchor the clock at the current host time
    ///
    /// Call once before the first idle invocation so the first elapsed
    /// interval is measured from here rather than from time zero.
    pub fn start(&mut self, now_ms: f64) {
        self.last_loop_time_ms = now_ms;
        self.accumulated_ms = 0.0;
        self.metrics.start(now_ms);
        log::debug!("clock started, fixed step {:.3} ms", self.fixed_step_ms);
    }

    /// Idle entry point: accumulate elapsed time and drain fixed ticks
    ///
    /// # Errors
    ///
    /// The first failing fixed update propagates immediately; remaining
    /// ticks of the drain are abandoned.
    pub fn on_idle(
        &mut self,
        now_ms: f64,
        world: &mut World,
    ) -> Result<IdleReport, SimulationError> {
        let elapsed_ms = now_ms - self.last_loop_time_ms;
        self.accumulated_ms += elapsed_ms;

        let mut report = IdleReport::default();
        while self.accumulated_ms >= self.fixed_step_ms {
            world.fixed_update_all(self.fixed_step_ms)?;
            self.accumulated_ms -= self.fixed_step_ms;
            self.tick_count += 1;
            report.ticks += 1;
            report.redraw_requested = true;
            self.metrics.record_update(now_ms);
        }

        self.last_loop_time_ms = now_ms;
        Ok(report)
    }

    /// Display entry point: run the variable update for one presented frame
    ///
    /// The variable `dt` is the time since the last idle invocation; the
    /// idle hook alone advances the loop time.
    ///
    /// # Errors
    ///
    /// Propagates the first failing variable hook.
    pub fn on_display(&mut self, now_ms: f64, world: &mut World) -> Result<(), SimulationError> {
        let dt = now_ms - self.last_loop_time_ms;
        world.update_all(dt)?;
        self.metrics.record_frame();
        Ok(())
    }

    /// The fixed step in milliseconds
    pub fn fixed_step_ms(&self) -> f64 {
        self.fixed_step_ms
    }

    /// Unconsumed accumulated time, always less than one step after a drain
    pub fn accumulated_ms(&self) -> f64 {
        self.accumulated_ms
    }

    /// Total fixed ticks executed since the clock started
    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }

    /// Throughput measurements
    pub fn metrics(&self) -> &LoopMetrics {
        &self.metrics
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_rejects_non_positive_step() {
        assert!(SimulationClock::new(0.0).is_err());
        assert!(SimulationClock::new(-16.0).is_err());
        assert!(SimulationClock::from_updates_per_second(0.0).is_err());
    }

    #[test]
    fn test_step_from_updates_per_second() {
        let clock = SimulationClock::from_updates_per_second(60.0).unwrap();
        assert_relative_eq!(clock.fixed_step_ms(), 1000.0 / 60.0);
    }

    #[test]
    fn test_accumulator_invariant() {
        let mut clock = SimulationClock::new(10.0).unwrap();
        let mut world = World::new();
        clock.start(0.0);

        let report = clock.on_idle(35.0, &mut world).unwrap();
        assert_eq!(report.ticks, 3);
        assert!(report.redraw_requested);
        assert_relative_eq!(clock.accumulated_ms(), 5.0);

        // Too little elapsed time: no tick, no redraw, remainder kept
        let report = clock.on_idle(38.0, &mut world).unwrap();
        assert_eq!(report.ticks, 0);
        assert!(!report.redraw_requested);
        assert_relative_eq!(clock.accumulated_ms(), 8.0);

        let report = clock.on_idle(41.0, &mut world).unwrap();
        assert_eq!(report.ticks, 1);
        assert_relative_eq!(clock.accumulated_ms(), 1.0);
        assert_eq!(clock.tick_count(), 4);

        assert!(clock.accumulated_ms() >= 0.0);
        assert!(clock.accumulated_ms() < clock.fixed_step_ms());
    }

    #[test]
    fn test_large_stall_runs_many_ticks() {
        let mut clock = SimulationClock::new(10.0).unwrap();
        let mut world = World::new();
        clock.start(0.0);

        let report = clock.on_idle(1000.0, &mut world).unwrap();
        assert_eq!(report.ticks, 100);
    }

    #[test]
    fn test_display_rebuilds_frame_without_advancing_loop_time() {
        let mut clock = SimulationClock::new(10.0).unwrap();
        let mut world = World::new();
        let entity = world.spawn(0.3, -0.1);
        world.attach_circle_render(entity, 0.05).unwrap();
        clock.start(0.0);

        clock.on_idle(25.0, &mut world).unwrap();
        clock.on_display(30.0, &mut world).unwrap();
        assert_eq!(world.frame().len(), 1);

        // Display did not consume time: the next idle sees 15 ms elapsed
        // (5 remaining + 10 new), running exactly one tick.
        let report = clock.on_idle(35.0, &mut world).unwrap();
        assert_eq!(report.ticks, 1);
    }

    #[test]
    fn test_metrics_roll_over() {
        let mut clock = SimulationClock::new(10.0).unwrap();
        let mut world = World::new();
        clock.start(0.0);

        let mut now = 0.0;
        while now < 500.0 {
            now += 10.0;
            clock.on_idle(now, &mut world).unwrap();
            if now < 500.0 {
                clock.on_display(now, &mut world).unwrap();
            }
        }

        // 50 updates and 49 frames over exactly 500 ms
        assert_relative_eq!(clock.metrics().updates_per_second(), 100.0);
        assert_relative_eq!(clock.metrics().frames_per_second(), 98.0);
    }

    #[test]
    fn test_identical_tick_schedules_are_bitwise_deterministic() {
        let build = || {
            let mut world = World::new();
            let a = world.spawn(0.0, 0.0);
            let b = world.spawn(0.5, 0.0);
            let collider_a = world.attach_collider(a, 0.1).unwrap();
            let collider_b = world.attach_collider(b, 0.1).unwrap();
            world.attach_physics(a, 0.001, 0.0002, 1.0).unwrap();
            world.attach_physics(b, -0.001, 0.0, 1.0).unwrap();
            world
                .add_trigger(collider_a, Box::new(crate::physics::ElasticBounce))
                .unwrap();
            world
                .add_trigger(collider_b, Box::new(crate::physics::ElasticBounce))
                .unwrap();
            (world, a, b)
        };

        // Same total elapsed time, very different idle schedules
        let (mut world_x, ax, bx) = build();
        let mut clock_x = SimulationClock::new(10.0).unwrap();
        clock_x.start(0.0);
        clock_x.on_idle(1000.0, &mut world_x).unwrap();

        let (mut world_y, ay, by) = build();
        let mut clock_y = SimulationClock::new(10.0).unwrap();
        clock_y.start(0.0);
        let mut now = 0.0;
        for step in [3.0, 7.0, 11.0, 29.0] {
            while now + step <= 1000.0 {
                now += step;
                clock_y.on_idle(now, &mut world_y).unwrap();
            }
        }
        clock_y.on_idle(1000.0, &mut world_y).unwrap();

        assert_eq!(clock_x.tick_count(), clock_y.tick_count());
        for (left, right) in [(ax, ay), (bx, by)] {
            let p = world_x.entity(left).unwrap().position();
            let q = world_y.entity(right).unwrap().position();
            assert_eq!(p.x.to_bits(), q.x.to_bits());
            assert_eq!(p.y.to_bits(), q.y.to_bits());
        }
    }
}
