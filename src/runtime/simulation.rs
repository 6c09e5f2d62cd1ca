//! Simulation - Single owner of the live grid.
//!
//! The live grid is an `Arc<GridBuffer>` swapped wholesale on every change,
//! so readers holding a previous snapshot never see a partially updated grid.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use log::{debug, trace};
use tokio::sync::watch;

use crate::compute::{self, Dimensions, GridBuffer, GridError, GridStats};

/// Read-only view of the live state handed to renderers.
#[derive(Debug, Clone)]
pub struct Snapshot {
    pub grid: Arc<GridBuffer>,
    /// Transitions applied since the grid was last created, resized,
    /// randomized or reset.
    pub generation: u64,
    /// Whether the run-loop was driving the grid when this was published.
    pub running: bool,
}

impl Snapshot {
    /// Population statistics for this snapshot.
    pub fn stats(&self) -> GridStats {
        GridStats::from_grid(&self.grid)
    }
}

struct Live {
    grid: Arc<GridBuffer>,
    generation: u64,
    running: bool,
}

impl Live {
    fn snapshot(&self) -> Snapshot {
        Snapshot {
            grid: Arc::clone(&self.grid),
            generation: self.generation,
            running: self.running,
        }
    }
}

/// Owner of the live grid and generation counter.
pub struct Simulation {
    live: Mutex<Live>,
    alive_probability: f64,
    updates: watch::Sender<Snapshot>,
}

impl Simulation {
    /// Take ownership of an initial grid.
    pub fn new(grid: GridBuffer, alive_probability: f64) -> Self {
        let live = Live {
            grid: Arc::new(grid),
            generation: 0,
            running: false,
        };
        let (updates, _) = watch::channel(live.snapshot());
        Self {
            live: Mutex::new(live),
            alive_probability,
            updates,
        }
    }

    /// Current grid. Cheap: clones the `Arc`, not the cells.
    pub fn current_grid(&self) -> Arc<GridBuffer> {
        Arc::clone(&self.lock().grid)
    }

    pub fn generation(&self) -> u64 {
        self.lock().generation
    }

    pub fn snapshot(&self) -> Snapshot {
        self.lock().snapshot()
    }

    /// Receiver notified after every grid replacement and on start/stop.
    pub fn subscribe(&self) -> watch::Receiver<Snapshot> {
        self.updates.subscribe()
    }

    /// Apply one transition. Returns the new generation number.
    pub fn step(&self) -> u64 {
        let mut live = self.lock();
        let next = compute::step(&live.grid);
        live.generation += 1;
        trace!(
            "Generation {}: {} alive",
            live.generation,
            next.population()
        );
        self.publish(&mut live, next);
        live.generation
    }

    /// Flip one cell. The generation counter is left as is.
    pub fn toggle(&self, row: usize, col: usize) -> Result<(), GridError> {
        let mut live = self.lock();
        let next = live.grid.toggle(row, col)?;
        self.publish(&mut live, next);
        Ok(())
    }

    /// Re-shape the grid, keeping the overlapping region.
    ///
    /// Dimensions are validated before the live grid is touched.
    pub fn resize(&self, rows: usize, cols: usize) -> Result<(), GridError> {
        let dims = Dimensions::new(rows, cols)?;
        let mut live = self.lock();
        let next = compute::resize(&live.grid, dims);
        debug!(
            "Resized grid {}x{} -> {}x{}",
            live.grid.rows(),
            live.grid.cols(),
            rows,
            cols
        );
        live.generation = 0;
        self.publish(&mut live, next);
        Ok(())
    }

    /// Replace the grid with random cells of the same shape.
    pub fn randomize(&self) {
        let mut live = self.lock();
        let next = compute::randomize(live.grid.dimensions(), self.alive_probability);
        debug!("Randomized grid: {} alive", next.population());
        live.generation = 0;
        self.publish(&mut live, next);
    }

    /// Record the run-loop state and notify subscribers when it changes.
    pub fn set_running(&self, running: bool) {
        let mut live = self.lock();
        if live.running != running {
            live.running = running;
            self.updates.send_replace(live.snapshot());
        }
    }

    /// Replace the grid with an all-dead grid of the same shape.
    pub fn clear(&self) {
        let mut live = self.lock();
        let next = GridBuffer::new(live.grid.dimensions());
        live.generation = 0;
        self.publish(&mut live, next);
    }

    fn publish(&self, live: &mut Live, grid: GridBuffer) {
        live.grid = Arc::new(grid);
        self.updates.send_replace(live.snapshot());
    }

    fn lock(&self) -> MutexGuard<'_, Live> {
        // Live is only ever replaced as a whole, so a poisoned lock still holds
        // a consistent grid.
        self.live.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
