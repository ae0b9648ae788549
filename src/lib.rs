//! # LS-8 Register Machine
//!
//! An interpreter for the LS-8, an 8-bit register machine with 256 bytes of
//! memory, eight general-purpose registers, a program counter, a flags
//! register, and a downward-growing stack addressed through R7.
//!
//! The crate is organized around a single owned [`Machine`] aggregate that
//! runs a fetch-decode-dispatch loop over a byte-addressable [`MemoryBus`].
//! Printed values leave the machine through an injected [`OutputSink`], so the
//! engine never writes to the console itself.
//!
//! ## Quick Start
//!
//! ```rust
//! use ls8::{parse_program, LoopState, Machine, Output};
//!
//! let program = parse_program(
//!     "10000010 # LDI R0,8
//!      00000000
//!      00001000
//!      01000111 # PRN R0
//!      00000000
//!      00000001 # HLT",
//! )
//! .unwrap();
//!
//! let mut machine = Machine::new(Vec::new());
//! machine.load(&program).unwrap();
//!
//! assert_eq!(machine.run(), LoopState::Halted);
//! assert_eq!(machine.output(), &vec![Output::Number(8)]);
//! ```
//!
//! ## Modules
//!
//! - `machine` - Machine state, configuration, and the execution loop
//! - `decoder` - Opcode byte decoding
//! - `opcodes` - The closed LS-8 instruction set and its bit layout
//! - `memory` - MemoryBus trait and the flat memory implementation
//! - `flags` - Comparison flags register
//! - `output` - Output sinks for PRN/PRA
//! - `trace` - Per-instruction trace records
//! - `loader` - Parser for the textual `.ls8` program format
//! - `disassembler` - Byte stream to mnemonic listing

pub mod decoder;
pub mod disassembler;
pub mod flags;
pub mod loader;
pub mod machine;
pub mod memory;
pub mod opcodes;
pub mod output;
pub mod trace;
pub mod wasm;

// Instruction handlers (not part of public API)
mod instructions;

pub use decoder::{decode, Instruction, Operands};
pub use disassembler::{disassemble, DisassemblyLine};
pub use flags::Flags;
pub use instructions::alu::{AluOp, AluOutcome};
pub use loader::{load_program_file, parse_program, ParseError, ParseErrorKind};
pub use machine::{LoopState, Machine, MachineConfig, DEFAULT_STACK_TOP, REGISTER_COUNT, SP};
pub use memory::{FlatMemory, MemoryBus, DEFAULT_MEMORY_SIZE};
pub use opcodes::Opcode;
pub use output::{FnSink, NullSink, Output, OutputSink, WriterSink};
pub use trace::{TraceHook, TraceRecord};

use std::path::PathBuf;
use thiserror::Error;

/// Fatal conditions that stop the execution loop.
///
/// A fault is never recovered from: the machine enters
/// [`LoopState::Faulted`] and stays there until [`Machine::reset`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error)]
pub enum FaultKind {
    /// The byte at PC is not a known instruction.
    #[error("invalid opcode")]
    InvalidOpcode,

    /// A memory address or register index was outside its valid range.
    #[error("out-of-bounds access")]
    OutOfBoundsAccess,

    /// DIV or MOD with a zero divisor.
    #[error("division by zero")]
    DivisionByZero,

    /// The ALU was asked to perform an operation it does not implement.
    #[error("unsupported ALU operation")]
    UnsupportedAluOperation,

    /// A push would move the stack pointer below address 0.
    #[error("stack overflow")]
    StackOverflow,

    /// A pop was attempted with the stack pointer at the stack top.
    #[error("stack underflow")]
    StackUnderflow,
}

impl FaultKind {
    /// Process exit code used by the command-line runner for this fault.
    pub fn exit_code(self) -> u8 {
        match self {
            FaultKind::InvalidOpcode => 10,
            FaultKind::OutOfBoundsAccess => 11,
            FaultKind::DivisionByZero => 12,
            FaultKind::UnsupportedAluOperation => 13,
            FaultKind::StackOverflow => 14,
            FaultKind::StackUnderflow => 15,
        }
    }
}

/// Errors raised while placing a program into memory.
///
/// Loading is all-or-nothing: when any of these is returned, memory is
/// left exactly as it was.
#[derive(Debug, Error)]
pub enum LoadError {
    /// The program has more bytes than the machine has memory.
    #[error("program is {len} bytes but memory holds only {capacity}")]
    ProgramTooLarge { len: usize, capacity: usize },

    /// The memory bus refused a read or write within the program's range.
    #[error("memory rejected the program: {0}")]
    Fault(FaultKind),

    /// The program text could not be parsed.
    #[error(transparent)]
    Parse(#[from] ParseError),

    /// The program file could not be read.
    #[error("cannot read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Rejected [`MachineConfig`] values.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("memory size must be between 1 and {max} bytes, got {size}")]
    InvalidMemorySize { size: usize, max: usize },

    #[error("stack top {stack_top:#04X} lies beyond memory of {memory_size} bytes")]
    StackTopOutOfRange { stack_top: u8, memory_size: usize },
}
