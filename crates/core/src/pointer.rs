//! Pointer: a single execution context traversing the grid.
//!
//! Holds position, direction, the stack-of-stacks, the instruction
//! overlay, the pending message queue, string-mode state, and the
//! single-shot skip flag. `step` is the whole engine in miniature: it
//! either drains the instruction overlay or advances the cursor and
//! loads the next grid character, and it is the only place that decides
//! whether this pointer keeps running or yields back to the scheduler.

use crate::error::{EngineError, EngineResult};
use crate::grid::Grid;
use crate::io::ByteIo;
use crate::rng::{MirrorRng, MIRRORS};
use crate::scheduler::Scheduler;
use crate::value::Value;
use std::collections::VecDeque;

#[derive(Debug)]
pub struct Pointer {
    pub id: u32,
    pub x: i64,
    pub y: i64,
    pub dx: i64,
    pub dy: i64,
    stacks: Vec<Vec<Value>>,
    instructions: VecDeque<u8>,
    messages: VecDeque<Value>,
    string_mode: Option<u8>,
    must_skip: bool,
    pub alive: bool,
}

impl Pointer {
    /// Creates a pointer at `(x, y)` heading `(dx, dy)`, seeding its
    /// bottom stack and loading the character already under it (the
    /// first `step` executes that character rather than advancing to
    /// find one).
    pub fn new(id: u32, seed: Vec<Value>, dx: i64, dy: i64, x: i64, y: i64, grid: &Grid) -> Self {
        let mut instructions = VecDeque::with_capacity(1);
        instructions.push_back(grid.get(x, y));
        Self {
            id,
            x,
            y,
            dx,
            dy,
            stacks: vec![seed],
            instructions,
            messages: VecDeque::new(),
            string_mode: None,
            must_skip: false,
            alive: true,
        }
    }

    pub fn deliver(&mut self, value: Value) {
        self.messages.push_back(value);
    }

    /// Runs one scheduler quantum: dispatch from the instruction overlay,
    /// or advance and load. Returns whether the scheduler should call
    /// `step` again immediately (`true`) or yield (`false`).
    pub fn step(
        &mut self,
        grid: &mut Grid,
        sched: &mut Scheduler,
        rng: &mut dyn MirrorRng,
        io: &mut dyn ByteIo,
    ) -> EngineResult<bool> {
        if !self.alive {
            return Ok(false);
        }
        if let Some(byte) = self.instructions.pop_front() {
            self.execute(byte, grid, sched, rng, io)?;
        } else {
            self.advance(grid);
        }
        Ok(self.alive && self.instructions.front() != Some(&b'#'))
    }

    fn advance(&mut self, grid: &Grid) {
        self.x += self.dx;
        self.y += self.dy;
        let mut wrapped = false;
        if self.dy < 0 && self.y < 0 {
            self.y = grid.col_max_y(self.x);
            wrapped = true;
        } else if self.dy > 0 && self.y > grid.col_max_y(self.x) {
            self.y = 0;
            wrapped = true;
        }
        if self.dx < 0 && self.x < 0 {
            self.x = grid.row_max_x(self.y);
            wrapped = true;
        } else if self.dx > 0 && self.x > grid.row_max_x(self.y) {
            self.x = 0;
            wrapped = true;
        }
        if wrapped {
            self.must_skip = false;
        }
        if self.must_skip {
            self.must_skip = false;
        } else {
            self.instructions.push_back(grid.get(self.x, self.y));
        }
    }

    fn execute(
        &mut self,
        byte: u8,
        grid: &mut Grid,
        sched: &mut Scheduler,
        rng: &mut dyn MirrorRng,
        io: &mut dyn ByteIo,
    ) -> EngineResult<()> {
        if self.must_skip {
            self.must_skip = false;
            return Ok(());
        }
        if let Some(quote) = self.string_mode {
            if byte == quote {
                self.string_mode = None;
            } else {
                self.push_byte_onto_top_string(byte);
            }
            return Ok(());
        }
        if byte == b'\'' || byte == b'"' {
            self.string_mode = Some(byte);
            self.push(Value::Str(Vec::new()));
            return Ok(());
        }
        self.dispatch(byte, grid, sched, rng, io)
    }

    fn dispatch(
        &mut self,
        byte: u8,
        grid: &mut Grid,
        sched: &mut Scheduler,
        rng: &mut dyn MirrorRng,
        io: &mut dyn ByteIo,
    ) -> EngineResult<()> {
        match byte {
            b' ' => {}
            b'<' => self.set_dir(-1, 0),
            b'>' => self.set_dir(1, 0),
            b'^' => self.set_dir(0, -1),
            b'v' => self.set_dir(0, 1),
            b'/' | b'\\' | b'|' | b'_' => self.apply_mirror(byte),
            b'x' => {
                let pick = rng.pick_mirror() % 4;
                self.apply_mirror(MIRRORS[pick as usize]);
            }
            b'!' => self.must_skip = true,
            b'?' => {
                let v = self.pop()?;
                self.must_skip = v.as_bytes() != b"0";
            }
            b'w' => {
                self.push(Value::Int(self.x));
                self.push(Value::Int(self.y));
            }
            b'j' => {
                let y2 = self.pop_int()?;
                let x2 = self.pop_int()?;
                if x2 < 0 || y2 < 0 {
                    return Err(EngineError::JumpNegative);
                }
                self.x = x2;
                self.y = y2;
            }
            b';' => self.alive = false,
            b'0'..=b'9' => self.push(Value::Str(vec![byte])),
            b'+' => {
                let b = self.pop_int()?;
                let a = self.pop_int()?;
                self.push(Value::Int(a + b));
            }
            b'-' => {
                let b = self.pop_int()?;
                let a = self.pop_int()?;
                self.push(Value::Int(a - b));
            }
            b'*' => {
                let b = self.pop_int()?;
                let a = self.pop_int()?;
                self.push(Value::Int(a * b));
            }
            b'%' => {
                let b = self.pop_int()?;
                let a = self.pop_int()?;
                if b == 0 {
                    return Err(EngineError::DivByZero);
                }
                self.push(Value::Int(a / b));
                self.push(Value::Int(a % b));
            }
            b'.' => {
                let b = self.pop()?.as_bytes();
                let mut a = self.pop()?.as_bytes();
                a.extend(b);
                self.push(Value::Str(a));
            }
            b'=' => {
                let b = self.pop()?.as_bytes();
                let a = self.pop()?.as_bytes();
                self.push_bool(a == b);
            }
            b'(' => {
                let b = self.pop()?.as_bytes();
                let a = self.pop()?.as_bytes();
                self.push_bool(a < b);
            }
            b')' => {
                let b = self.pop()?.as_bytes();
                let a = self.pop()?.as_bytes();
                self.push_bool(a > b);
            }
            b'[' => {
                let b = self.pop_int()?;
                let a = self.pop_int()?;
                self.push_bool(a < b);
            }
            b']' => {
                let b = self.pop_int()?;
                let a = self.pop_int()?;
                self.push_bool(a > b);
            }
            b',' => {
                let v = self.pop()?;
                self.push(v.clone());
                self.push(v);
            }
            b'~' => {
                self.pop()?;
            }
            b'$' => {
                let b = self.pop()?;
                let a = self.pop()?;
                self.push(b);
                self.push(a);
            }
            b':' => {
                let top = self.current_mut();
                let acc: Vec<u8> = top.drain(..).flat_map(|v| v.as_bytes()).collect();
                self.push(Value::Str(acc));
            }
            b'{' => {
                let top = self.current_mut();
                if !top.is_empty() {
                    let bottom = top.remove(0);
                    self.push(bottom);
                }
            }
            b'}' => {
                if !self.current().is_empty() {
                    let v = self.pop()?;
                    self.current_mut().insert(0, v);
                }
            }
            b'r' => self.current_mut().reverse(),
            b'l' => {
                let len = self.current().len() as i64;
                self.push(Value::Int(len));
            }
            b'e' => {
                let s = self.pop()?.as_bytes();
                let new_stack = s.into_iter().map(|b| Value::Str(vec![b])).collect();
                self.stacks.push(new_stack);
            }
            b'n' => {
                let k = self.pop_int()?.max(0) as usize;
                let mut collected = Vec::with_capacity(k);
                for _ in 0..k {
                    collected.push(self.pop()?);
                }
                collected.reverse();
                self.stacks.push(collected);
            }
            b'm' => {
                let top = self.stacks.pop().expect("pointer always has a stack");
                match self.stacks.last_mut() {
                    Some(below) => {
                        let mut merged = top;
                        merged.extend(below.drain(..));
                        *below = merged;
                    }
                    None => self.stacks.push(Vec::new()),
                }
            }
            b'd' => {
                let copy = self.current().clone();
                self.stacks.push(copy);
            }
            b'g' => {
                let y = self.pop_int()?;
                let x = self.pop_int()?;
                self.push(Value::Str(vec![grid.get(x, y)]));
            }
            b'p' => {
                let y = self.pop_int()?;
                let x = self.pop_int()?;
                let bytes = self.pop()?.as_bytes();
                if bytes.len() != 1 {
                    return Err(EngineError::BadChar);
                }
                grid.set(x, y, bytes[0]);
            }
            b'&' => {
                let k = self.pop_int()?.max(0) as usize;
                let mut collected = Vec::with_capacity(k);
                for _ in 0..k {
                    collected.push(self.pop()?);
                }
                collected.reverse();
                let id = sched.alloc_id();
                let child = Pointer::new(id, collected, self.dx, self.dy, self.x + self.dx, self.y + self.dy, grid);
                sched.register(child);
            }
            b'#' => {
                if let Some(v) = self.messages.pop_front() {
                    self.push(v);
                } else {
                    self.instructions.push_front(b'#');
                }
            }
            b'@' => {
                let t = self.pop_int()?;
                let v = self.pop()?;
                if t >= 0 && t as u32 == self.id {
                    self.messages.push_back(v);
                } else {
                    sched.send(t, v)?;
                }
            }
            b'y' => self.push(Value::Int(self.id as i64)),
            b'c' => {
                let n = self.pop_int()?;
                let byte = (n & 0xff) as u8;
                self.push(Value::Str(vec![byte]));
            }
            b'a' => {
                let s = self.pop()?.as_bytes();
                if s.len() != 1 {
                    return Err(EngineError::BadChar);
                }
                self.push(Value::Int(s[0] as i64));
            }
            b'i' => match io.read_byte() {
                Some(b) => self.push(Value::Str(vec![b])),
                None => self.push(Value::Str(Vec::new())),
            },
            b'o' => {
                let s = self.pop()?.as_bytes();
                io.write(&s);
                io.flush();
            }
            b'`' => {
                let s = self.pop()?.as_bytes();
                for byte in s.into_iter().rev() {
                    self.instructions.push_front(byte);
                }
            }
            other => return Err(EngineError::BadInstruction(other)),
        }
        Ok(())
    }

    fn set_dir(&mut self, dx: i64, dy: i64) {
        self.dx = dx;
        self.dy = dy;
    }

    fn apply_mirror(&mut self, op: u8) {
        match op {
            b'/' => {
                let (dx, dy) = (-self.dy, -self.dx);
                self.dx = dx;
                self.dy = dy;
            }
            b'\\' => std::mem::swap(&mut self.dx, &mut self.dy),
            b'|' => self.dx = -self.dx,
            b'_' => self.dy = -self.dy,
            _ => unreachable!("apply_mirror called with a non-mirror byte"),
        }
    }

    fn push(&mut self, v: Value) {
        self.current_mut().push(v);
    }

    fn push_bool(&mut self, b: bool) {
        self.push(Value::Int(if b { 1 } else { 0 }));
    }

    fn pop(&mut self) -> EngineResult<Value> {
        self.current_mut().pop().ok_or(EngineError::StackUnderflow)
    }

    fn pop_int(&mut self) -> EngineResult<i64> {
        self.pop()?.as_int()
    }

    fn current(&self) -> &Vec<Value> {
        self.stacks.last().expect("pointer always has a stack")
    }

    fn current_mut(&mut self) -> &mut Vec<Value> {
        self.stacks.last_mut().expect("pointer always has a stack")
    }

    fn push_byte_onto_top_string(&mut self, byte: u8) {
        match self.current_mut().last_mut() {
            Some(Value::Str(s)) => s.push(byte),
            _ => unreachable!("string mode always pushes an empty string first"),
        }
    }
}
