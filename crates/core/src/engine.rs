//! Engine: the composition root. Owns the grid, the scheduler, the RNG,
//! and the I/O adapter behind a single `run` entry point, so the CLI has
//! exactly one call to make.

use crate::error::EngineResult;
use crate::grid::Grid;
use crate::io::ByteIo;
use crate::pointer::Pointer;
use crate::rng::MirrorRng;
use crate::scheduler::Scheduler;
use crate::value::Value;
use tracing::error;

pub struct Engine {
    grid: Grid,
    scheduler: Scheduler,
}

impl Engine {
    /// Builds an engine from program source lines and pointer 0's seed
    /// stack (the values passed after `-s` on the command line).
    pub fn new(lines: Vec<String>, seed_stack: Vec<Value>) -> Self {
        let grid = Grid::from_lines(lines);
        let mut scheduler = Scheduler::new();
        let id = scheduler.alloc_id();
        let initial = Pointer::new(id, seed_stack, 1, 0, 0, 0, &grid);
        scheduler.register(initial);
        Self { grid, scheduler }
    }

    /// Runs every pointer to completion. Logs and returns the first
    /// fatal error encountered, if any.
    pub fn run(&mut self, rng: &mut dyn MirrorRng, io: &mut dyn ByteIo) -> EngineResult<()> {
        self.scheduler.run(&mut self.grid, rng, io).inspect_err(|e| {
            error!(error = %e, "interpreter halted");
        })
    }
}
