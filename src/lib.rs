//! Life Engine - Conway's Game of Life on a bounded, resizable grid.
//!
//! This crate provides the simulation core: the grid value type, the bounded
//! transition rule, resize and randomize transformations, and a timed
//! run-loop with start/stop/step control.
//!
//! # Architecture
//!
//! The crate is split into three modules:
//!
//! - `compute`: Grid data model and pure transformations (step, resize, randomize)
//! - `runtime`: Live state ownership, the tokio-driven scheduler and the `Engine` facade
//! - `schema`: Configuration types and seeding for initial grids
//!
//! # Example
//!
//! ```rust,no_run
//! use life_engine::Engine;
//!
//! # async fn demo() -> Result<(), Box<dyn std::error::Error>> {
//! let engine = Engine::create(20, 20)?;
//! engine.toggle(5, 4)?;
//! engine.toggle(5, 5)?;
//! engine.toggle(5, 6)?;
//!
//! // Manual single step
//! engine.step();
//!
//! // Timed run at one generation every 200 ms
//! engine.start(200)?;
//! tokio::time::sleep(std::time::Duration::from_secs(1)).await;
//! engine.stop();
//!
//! println!("Generation {}:\n{}", engine.generation(), engine.current_grid());
//! # Ok(())
//! # }
//! ```

pub mod compute;
pub mod runtime;
pub mod schema;

// Re-export commonly used types
pub use compute::{Dimensions, GridBuffer, GridError, GridStats};
pub use runtime::{Engine, Interval, Scheduler, SchedulerError, SchedulerState, Simulation, Snapshot};
pub use schema::{ConfigError, EngineConfig, Pattern, Seed};
