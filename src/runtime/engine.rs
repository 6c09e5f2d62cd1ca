//! Engine - Command and query surface for a UI layer.
//!
//! Every command is accepted in both `Idle` and `Running` states. Disabling
//! edits while a run is in progress is left to the caller.

use std::sync::Arc;

use log::debug;
use tokio::sync::watch;

use super::{Interval, Scheduler, SchedulerError, SchedulerState, Simulation, Snapshot};
use crate::compute::{DEFAULT_ALIVE_PROBABILITY, GridBuffer, GridError, GridStats};
use crate::schema::{ConfigError, EngineConfig};

/// One live grid plus the run-loop that advances it.
pub struct Engine {
    simulation: Arc<Simulation>,
    scheduler: Scheduler,
}

impl Engine {
    /// All-dead `rows x cols` grid, idle, default interval.
    pub fn create(rows: usize, cols: usize) -> Result<Self, GridError> {
        let grid = GridBuffer::create(rows, cols)?;
        Ok(Self::with_grid(
            grid,
            DEFAULT_ALIVE_PROBABILITY,
            Interval::default(),
        ))
    }

    /// Engine seeded and timed from a validated configuration.
    pub fn from_config(config: &EngineConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let grid = config.seed.generate(config.dimensions()?);
        Ok(Self::with_grid(
            grid,
            config.alive_probability,
            config.interval()?,
        ))
    }

    fn with_grid(grid: GridBuffer, alive_probability: f64, interval: Interval) -> Self {
        let simulation = Arc::new(Simulation::new(grid, alive_probability));
        let scheduler = Scheduler::new(Arc::clone(&simulation), interval);
        Self {
            simulation,
            scheduler,
        }
    }

    /// Flip cell `(row, col)`.
    pub fn toggle(&self, row: usize, col: usize) -> Result<(), GridError> {
        self.simulation.toggle(row, col)
    }

    /// Apply exactly one transition, whatever the run state.
    ///
    /// While running this stacks on top of the scheduled ticks.
    pub fn step(&self) -> u64 {
        self.simulation.step()
    }

    pub fn resize(&self, rows: usize, cols: usize) -> Result<(), GridError> {
        self.simulation.resize(rows, cols)
    }

    /// Fill the grid with random cells at the configured alive probability.
    pub fn randomize(&self) {
        self.simulation.randomize();
    }

    /// Stop the run-loop and clear every cell.
    pub fn reset(&self) {
        self.scheduler.stop();
        self.simulation.clear();
        debug!("Engine reset");
    }

    /// Set the interval and start the run-loop.
    ///
    /// An invalid interval is rejected before anything changes. When already
    /// running only the interval is updated.
    pub fn start(&self, interval_ms: u64) -> Result<(), SchedulerError> {
        let interval = Interval::from_millis(interval_ms)?;
        self.scheduler.set_interval(interval);
        self.scheduler.start()
    }

    /// Start the run-loop at the current interval.
    pub fn resume(&self) -> Result<(), SchedulerError> {
        self.scheduler.start()
    }

    pub fn stop(&self) {
        self.scheduler.stop();
    }

    pub fn set_interval(&self, interval_ms: u64) -> Result<(), SchedulerError> {
        self.scheduler.set_interval(Interval::from_millis(interval_ms)?);
        Ok(())
    }

    pub fn current_grid(&self) -> Arc<GridBuffer> {
        self.simulation.current_grid()
    }

    pub fn is_running(&self) -> bool {
        self.scheduler.is_running()
    }

    pub fn state(&self) -> SchedulerState {
        self.scheduler.state()
    }

    pub fn interval(&self) -> Interval {
        self.scheduler.interval()
    }

    pub fn generation(&self) -> u64 {
        self.simulation.generation()
    }

    pub fn snapshot(&self) -> Snapshot {
        self.simulation.snapshot()
    }

    pub fn stats(&self) -> GridStats {
        GridStats::from_grid(&self.simulation.current_grid())
    }

    /// Receiver notified after every grid replacement and on start/stop.
    pub fn subscribe(&self) -> watch::Receiver<Snapshot> {
        self.simulation.subscribe()
    }
}

impl Default for Engine {
    fn default() -> Self {
        Self::with_grid(
            GridBuffer::default(),
            DEFAULT_ALIVE_PROBABILITY,
            Interval::default(),
        )
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::schema::{Pattern, Seed};

    #[test]
    fn test_default_engine() {
        let engine = Engine::default();
        let grid = engine.current_grid();
        assert_eq!((grid.rows(), grid.cols()), (20, 20));
        assert_eq!(grid.population(), 0);
        assert!(!engine.is_running());
        assert_eq!(engine.interval().as_millis(), 500);
    }

    #[test]
    fn test_create_rejects_bad_dimensions() {
        assert!(Engine::create(9, 50).is_err());
        assert!(Engine::create(50, 101).is_err());
        assert!(Engine::create(10, 100).is_ok());
    }

    #[test]
    fn test_top_edge_blinker_scenario() {
        let engine = Engine::create(20, 20).unwrap();
        engine.toggle(0, 1).unwrap();
        engine.toggle(0, 2).unwrap();
        engine.toggle(0, 3).unwrap();

        assert_eq!(engine.step(), 1);
        let grid = engine.current_grid();
        assert_eq!(grid.alive_cells().collect::<Vec<_>>(), vec![(0, 2), (1, 2)]);

        engine.step();
        assert_eq!(engine.current_grid().population(), 0);
    }

    #[test]
    fn test_randomize_small_grid() {
        let engine = Engine::create(10, 10).unwrap();
        engine.randomize();
        assert!(engine.stats().alive > 0);
    }

    #[test]
    fn test_resize_out_of_bounds_is_atomic() {
        let engine = Engine::create(15, 15).unwrap();
        engine.toggle(14, 14).unwrap();
        let before = engine.current_grid();

        assert!(engine.resize(15, 5).is_err());
        assert_eq!(*engine.current_grid(), *before);

        engine.resize(14, 30).unwrap();
        let grid = engine.current_grid();
        assert_eq!((grid.rows(), grid.cols()), (14, 30));
        assert_eq!(grid.population(), 0);
    }

    #[test]
    fn test_invalid_interval_rejected() {
        let engine = Engine::default();
        assert_eq!(
            engine.start(10),
            Err(SchedulerError::IntervalOutOfBounds { millis: 10 })
        );
        assert!(!engine.is_running());
        assert!(engine.set_interval(5_000).is_err());
        assert_eq!(engine.interval().as_millis(), 500);
    }

    #[test]
    fn test_from_config_seeds_grid() {
        let config = EngineConfig {
            rows: 12,
            cols: 12,
            interval_ms: 80,
            seed: Seed {
                pattern: Pattern::Blinker { row: 6, col: 5 },
            },
            ..Default::default()
        };
        let engine = Engine::from_config(&config).unwrap();
        assert_eq!(engine.interval().as_millis(), 80);
        assert_eq!(
            engine.current_grid().alive_cells().collect::<Vec<_>>(),
            vec![(6, 5), (6, 6), (6, 7)]
        );

        let bad = EngineConfig {
            cols: 3,
            ..Default::default()
        };
        assert!(Engine::from_config(&bad).is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn test_run_and_reset() {
        let engine = Engine::create(20, 20).unwrap();
        for (r, c) in [(9, 9), (9, 10), (9, 11)] {
            engine.toggle(r, c).unwrap();
        }

        engine.start(100).unwrap();
        tokio::time::sleep(Duration::from_millis(450)).await;
        assert_eq!(engine.generation(), 4);
        assert!(engine.is_running());

        let mut rx = engine.subscribe();
        engine.reset();
        assert!(!engine.is_running());
        let seen = rx.borrow_and_update().clone();
        assert!(!seen.running);
        assert_eq!(seen.grid.population(), 0);
        assert_eq!(engine.generation(), 0);
        assert_eq!(engine.current_grid().population(), 0);

        tokio::time::sleep(Duration::from_millis(500)).await;
        assert_eq!(engine.generation(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_start_while_running_updates_interval() {
        let engine = Engine::default();
        engine.start(100).unwrap();
        engine.start(1_000).unwrap();
        assert!(engine.is_running());
        assert_eq!(engine.interval().as_millis(), 1_000);
        engine.stop();
    }

    #[tokio::test(start_paused = true)]
    async fn test_subscriber_follows_run() {
        let engine = Engine::create(10, 10).unwrap();
        let mut rx = engine.subscribe();
        engine.start(50).unwrap();

        // Starting is published before the first tick
        rx.changed().await.unwrap();
        let started = rx.borrow_and_update().clone();
        assert!(started.running);
        assert_eq!(started.generation, 0);

        rx.changed().await.unwrap();
        assert_eq!(rx.borrow_and_update().generation, 1);
        rx.changed().await.unwrap();
        assert_eq!(rx.borrow_and_update().generation, 2);

        engine.stop();
        rx.changed().await.unwrap();
        let stopped = rx.borrow_and_update().clone();
        assert!(!stopped.running);
        assert_eq!(stopped.generation, 2);
        assert_eq!(engine.snapshot().running, engine.is_running());
    }
}
