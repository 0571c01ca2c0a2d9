//! Runtime core for a 2D, concurrent, stack-based esoteric language.
//!
//! This crate has no notion of files, terminals, or command lines — it
//! only knows how to turn program text plus an initial seed stack into
//! output bytes, given an I/O adapter and an RNG. The CLI crate supplies
//! both and owns everything process-shaped.

pub mod engine;
pub mod error;
pub mod grid;
pub mod io;
pub mod pointer;
pub mod rng;
pub mod scheduler;
pub mod value;

pub use engine::Engine;
pub use error::{EngineError, EngineResult};
pub use grid::Grid;
pub use io::{ByteIo, MemoryIo};
pub use pointer::Pointer;
pub use rng::{FixedRng, MirrorRng, MIRRORS};
pub use scheduler::Scheduler;
pub use value::Value;
