//! # Instruction Tracing
//!
//! A [`TraceRecord`] is a snapshot of the machine taken just before an
//! instruction executes. Hosts receive one per cycle through a hook installed
//! with [`Machine::set_trace_hook`](crate::Machine::set_trace_hook); the
//! machine keeps no "current instruction" state of its own.

use crate::flags::Flags;
use crate::machine::REGISTER_COUNT;
use std::fmt;

/// Callback invoked with the state about to execute.
pub type TraceHook = Box<dyn FnMut(&TraceRecord)>;

/// Machine state at the start of one cycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TraceRecord {
    /// Number of instructions completed before this one.
    pub cycle: u64,

    /// Address of the opcode.
    pub pc: usize,

    /// Bytes at `pc`, `pc + 1` and `pc + 2`; bytes past the end of memory read as 0.
    pub bytes: [u8; 3],

    pub registers: [u8; REGISTER_COUNT],

    pub flags: Flags,
}

impl fmt::Display for TraceRecord {
    /// `TRACE: 00 | 82 00 08 | 00 00 00 00 00 00 00 F4`
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "TRACE: {:02X} | {:02X} {:02X} {:02X} |",
            self.pc, self.bytes[0], self.bytes[1], self.bytes[2]
        )?;
        for value in self.registers {
            write!(f, " {:02X}", value)?;
        }
        Ok(())
    }
}
