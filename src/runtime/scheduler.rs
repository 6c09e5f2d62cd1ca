//! Scheduler - Timed run-loop driving a [`Simulation`].
//!
//! The loop is a tokio task: wait one interval, then re-check the state under
//! the control lock and step only if the run that spawned the task is still
//! current. `stop` takes the same lock, so once it returns no further step is
//! applied.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use log::{debug, info, trace};
use tokio::runtime::Handle;
use tokio::task::JoinHandle;

use super::Simulation;

/// Shortest accepted delay between generations.
pub const MIN_INTERVAL_MS: u64 = 50;
/// Longest accepted delay between generations.
pub const MAX_INTERVAL_MS: u64 = 2000;
/// Delay used when nothing else is configured.
pub const DEFAULT_INTERVAL_MS: u64 = 500;

/// Scheduler errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SchedulerError {
    #[error(
        "Interval {millis} ms is outside [{min}, {max}] ms",
        min = MIN_INTERVAL_MS,
        max = MAX_INTERVAL_MS
    )]
    IntervalOutOfBounds { millis: u64 },
    #[error("No tokio runtime available to drive the run-loop")]
    NoRuntime,
}

/// Validated delay between scheduled generations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Interval(u64);

impl Interval {
    pub fn from_millis(millis: u64) -> Result<Self, SchedulerError> {
        if (MIN_INTERVAL_MS..=MAX_INTERVAL_MS).contains(&millis) {
            Ok(Self(millis))
        } else {
            Err(SchedulerError::IntervalOutOfBounds { millis })
        }
    }

    #[inline]
    pub fn as_millis(&self) -> u64 {
        self.0
    }

    #[inline]
    pub fn as_duration(&self) -> Duration {
        Duration::from_millis(self.0)
    }
}

impl Default for Interval {
    fn default() -> Self {
        Self(DEFAULT_INTERVAL_MS)
    }
}

/// Run-loop state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchedulerState {
    Idle,
    Running,
}

struct Control {
    state: SchedulerState,
    /// Bumped on every start; a task exits once its epoch is stale.
    epoch: u64,
    task: Option<JoinHandle<()>>,
}

struct Shared {
    control: Mutex<Control>,
    interval_ms: AtomicU64,
    simulation: Arc<Simulation>,
}

impl Shared {
    fn lock(&self) -> MutexGuard<'_, Control> {
        self.control.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn interval(&self) -> Interval {
        Interval(self.interval_ms.load(Ordering::Relaxed))
    }
}

/// Idle/Running state machine over a shared [`Simulation`].
///
/// Holds only timing and control state; the grid stays with the simulation.
pub struct Scheduler {
    shared: Arc<Shared>,
}

impl Scheduler {
    pub fn new(simulation: Arc<Simulation>, interval: Interval) -> Self {
        Self {
            shared: Arc::new(Shared {
                control: Mutex::new(Control {
                    state: SchedulerState::Idle,
                    epoch: 0,
                    task: None,
                }),
                interval_ms: AtomicU64::new(interval.as_millis()),
                simulation,
            }),
        }
    }

    /// Idle -> Running. No-op when already running.
    ///
    /// Must be called from within a tokio runtime.
    pub fn start(&self) -> Result<(), SchedulerError> {
        let mut control = self.shared.lock();
        if control.state == SchedulerState::Running {
            return Ok(());
        }
        let handle = Handle::try_current().map_err(|_| SchedulerError::NoRuntime)?;

        control.epoch += 1;
        let epoch = control.epoch;
        control.state = SchedulerState::Running;
        control.task = Some(handle.spawn(run_loop(Arc::clone(&self.shared), epoch)));
        self.shared.simulation.set_running(true);

        info!(
            "Scheduler started (interval {} ms)",
            self.shared.interval().as_millis()
        );
        Ok(())
    }

    /// Running -> Idle. No-op when already idle.
    pub fn stop(&self) {
        let mut control = self.shared.lock();
        if control.state == SchedulerState::Idle {
            return;
        }
        control.state = SchedulerState::Idle;
        if let Some(task) = control.task.take() {
            task.abort();
        }
        self.shared.simulation.set_running(false);
        info!(
            "Scheduler stopped at generation {}",
            self.shared.simulation.generation()
        );
    }

    /// Change the delay. A wait already in progress keeps its old length.
    pub fn set_interval(&self, interval: Interval) {
        let previous = self
            .shared
            .interval_ms
            .swap(interval.as_millis(), Ordering::Relaxed);
        if previous != interval.as_millis() {
            debug!(
                "Interval changed {} ms -> {} ms",
                previous,
                interval.as_millis()
            );
        }
    }

    pub fn interval(&self) -> Interval {
        self.shared.interval()
    }

    pub fn state(&self) -> SchedulerState {
        self.shared.lock().state
    }

    pub fn is_running(&self) -> bool {
        self.state() == SchedulerState::Running
    }
}

impl Drop for Scheduler {
    fn drop(&mut self) {
        self.stop();
    }
}

async fn run_loop(shared: Arc<Shared>, epoch: u64) {
    loop {
        // Read per wait so interval changes apply from the next tick
        tokio::time::sleep(shared.interval().as_duration()).await;

        let generation = {
            let control = shared.lock();
            if control.state != SchedulerState::Running || control.epoch != epoch {
                trace!("Run-loop {epoch} exiting");
                return;
            }
            shared.simulation.step()
        };
        trace!("Run-loop {epoch} tick -> generation {generation}");
    }
}
