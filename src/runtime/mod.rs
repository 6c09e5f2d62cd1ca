//! Runtime module - Live state ownership and the timed run-loop.

mod engine;
mod scheduler;
mod simulation;

pub use engine::*;
pub use scheduler::*;
pub use simulation::*;
