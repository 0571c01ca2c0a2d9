//! Scheduler: owns the live pointer set, drives execution in rounds,
//! and routes `@` sends by pointer id.
//!
//! A round snapshots the ids present at round start and runs each one
//! to completion or a parked `Wait`. Pointers spawned mid-round (`&`)
//! are not visited until the next round, which is what makes `&`/`@`
//! handshakes between a parent and its freshly spawned child
//! deterministic.

use crate::error::{EngineError, EngineResult};
use crate::grid::Grid;
use crate::io::ByteIo;
use crate::pointer::Pointer;
use crate::rng::MirrorRng;
use crate::value::Value;
use std::collections::BTreeMap;
use tracing::{debug, trace};

#[derive(Debug, Default)]
pub struct Scheduler {
    pointers: BTreeMap<u32, Pointer>,
    next_id: u32,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocates the next pointer id. Ids are never reused.
    pub fn alloc_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Registers a newly spawned pointer. It joins the pointer set
    /// immediately but is excluded from the snapshot of the round in
    /// progress, so it first runs on the next round.
    pub fn register(&mut self, pointer: Pointer) {
        debug!(id = pointer.id, "pointer spawned");
        self.pointers.insert(pointer.id, pointer);
    }

    /// Delivers `value` to pointer `target`'s message queue.
    ///
    /// Called only for sends to a pointer other than the sender itself
    /// — self-sends are handled inline by the sender (see
    /// `Pointer::execute`'s `@` handler), since the sending pointer is
    /// temporarily removed from this map while it runs (see `run`).
    pub fn send(&mut self, target: i64, value: Value) -> EngineResult<()> {
        let id = u32::try_from(target).map_err(|_| EngineError::NoSuchPointer(target))?;
        match self.pointers.get_mut(&id) {
            Some(p) => {
                p.deliver(value);
                Ok(())
            }
            None => Err(EngineError::NoSuchPointer(target)),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.pointers.is_empty()
    }

    /// Runs every live pointer to completion, in rounds, until none
    /// remain.
    pub fn run(
        &mut self,
        grid: &mut Grid,
        rng: &mut dyn MirrorRng,
        io: &mut dyn ByteIo,
    ) -> EngineResult<()> {
        let mut round = 0u64;
        while !self.is_empty() {
            trace!(round, live = self.pointers.len(), "scheduler round start");
            let ids: Vec<u32> = self.pointers.keys().copied().collect();
            for id in ids {
                // A pointer can only vanish mid-round by dying during its
                // own run below; nothing else removes entries from `self.pointers`.
                let Some(mut pointer) = self.pointers.remove(&id) else {
                    continue;
                };
                let result = loop {
                    match pointer.step(grid, self, rng, io) {
                        Ok(true) => continue,
                        Ok(false) => break Ok(()),
                        Err(e) => break Err(e),
                    }
                };
                if pointer.alive {
                    self.pointers.insert(id, pointer);
                } else {
                    debug!(id, "pointer retired");
                }
                result?;
            }
            round += 1;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::MemoryIo;
    use crate::rng::FixedRng;

    #[test]
    fn spawn_send_rendezvous() {
        // The parent (id 0) spawns a child one cell ahead with `&`, then
        // continues right into the cell the child's `Pointer::new` also
        // preloaded as its first instruction. Both pointers read that
        // shared `y?` pair, so the branch is guarded by id instead of by
        // position: the parent (id 0) takes its `@` send and dies, while
        // the child (id 1) skips the send and falls through to `#o;`,
        // where it parks until round 1 delivers "ping".
        let grid = Grid::from_lines(vec!["\"ping\"0&1y?@y?;#o;".to_string()]);
        let mut grid = grid;
        let mut sched = Scheduler::new();
        let id = sched.alloc_id();
        let parent = Pointer::new(id, vec![], 1, 0, 0, 0, &grid);
        sched.register(parent);
        let mut rng = FixedRng::new(vec![0]);
        let mut io = MemoryIo::default();
        sched.run(&mut grid, &mut rng, &mut io).unwrap();
        assert_eq!(io.output_string(), "ping");
    }

    #[test]
    fn send_to_unknown_pointer_is_fatal() {
        let grid = Grid::from_lines(vec!["1@;".to_string()]);
        let mut grid = grid;
        let mut sched = Scheduler::new();
        let id = sched.alloc_id();
        let parent = Pointer::new(id, vec![Value::from("x")], 1, 0, 0, 0, &grid);
        sched.register(parent);
        let mut rng = FixedRng::new(vec![0]);
        let mut io = MemoryIo::default();
        let err = sched.run(&mut grid, &mut rng, &mut io).unwrap_err();
        assert_eq!(err, EngineError::NoSuchPointer(1));
    }

    #[test]
    fn ids_are_never_reused() {
        let mut sched = Scheduler::new();
        assert_eq!(sched.alloc_id(), 0);
        assert_eq!(sched.alloc_id(), 1);
        assert_eq!(sched.alloc_id(), 2);
    }
}
