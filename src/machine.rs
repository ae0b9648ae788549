//! # Machine State and Execution
//!
//! This module contains the [`Machine`] struct holding all LS-8 state and the
//! fetch-decode-dispatch loop that drives it.
//!
//! ## Machine State
//!
//! The machine maintains:
//! - **Memory**: a `MemoryBus` of at most 256 bytes
//! - **Registers**: R0-R7, 8-bit; R7 is the stack pointer
//! - **Program counter** (PC): address of the next opcode
//! - **Flags**: result of the most recent `CMP`
//! - **Cycle counter**: completed instructions
//!
//! ## Execution Model
//!
//! - `step()`: execute one instruction and report the resulting [`LoopState`]
//! - `run()`: step until the machine halts, faults, or exhausts its cycle budget
//!
//! The loop advances PC by the instruction size unless the instruction is
//! control-flow class, in which case the handler alone sets PC.

use crate::decoder::{self, Instruction, Operands};
use crate::flags::Flags;
use crate::instructions::{alu, control, io, load_store, stack};
use crate::memory::{FlatMemory, MemoryBus, DEFAULT_MEMORY_SIZE};
use crate::opcodes::Opcode;
use crate::output::OutputSink;
use crate::trace::{TraceHook, TraceRecord};
use crate::{ConfigError, FaultKind, LoadError};

/// Number of general-purpose registers.
pub const REGISTER_COUNT: usize = 8;

/// Index of the stack-pointer register.
pub const SP: usize = 7;

/// Initial stack pointer: the stack grows down from just below 0xF4.
pub const DEFAULT_STACK_TOP: u8 = 0xF4;

/// Where the execution loop stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopState {
    /// More instructions can run.
    Running,

    /// `HLT` executed. Terminal.
    Halted,

    /// A fault stopped the machine. Terminal.
    Faulted(FaultKind),

    /// The configured cycle budget is used up. The machine itself is still
    /// running and continues if the budget is raised.
    CycleBudgetExceeded,
}

impl LoopState {
    /// True for `Halted` and `Faulted`, after which no instruction runs.
    pub fn is_terminal(self) -> bool {
        matches!(self, LoopState::Halted | LoopState::Faulted(_))
    }
}

/// Construction-time settings for a [`Machine`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MachineConfig {
    /// Bytes of memory, 1..=256.
    pub memory_size: usize,

    /// Initial value of R7; an empty stack has SP equal to this.
    pub stack_top: u8,

    /// Maximum number of instructions `run()` may execute.
    pub cycle_budget: Option<u64>,
}

impl Default for MachineConfig {
    fn default() -> Self {
        Self {
            memory_size: DEFAULT_MEMORY_SIZE,
            stack_top: DEFAULT_STACK_TOP,
            cycle_budget: None,
        }
    }
}

impl MachineConfig {
    /// Checks that the memory size fits 8-bit addressing and the stack lies in memory.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.memory_size == 0 || self.memory_size > DEFAULT_MEMORY_SIZE {
            return Err(ConfigError::InvalidMemorySize {
                size: self.memory_size,
                max: DEFAULT_MEMORY_SIZE,
            });
        }
        if self.stack_top as usize > self.memory_size {
            return Err(ConfigError::StackTopOutOfRange {
                stack_top: self.stack_top,
                memory_size: self.memory_size,
            });
        }
        Ok(())
    }
}

/// LS-8 machine state and execution context.
///
/// Generic over the memory implementation and the sink that receives printed
/// values.
///
/// # Examples
///
/// ```
/// use ls8::{LoopState, Machine, Output};
///
/// // LDI R0,8; LDI R1,9; ADD R0,R1; PRN R0; HLT
/// let program = [
///     0b1000_0010, 0, 8,
///     0b1000_0010, 1, 9,
///     0b1010_0000, 0, 1,
///     0b0100_0111, 0,
///     0b0000_0001,
/// ];
///
/// let mut machine = Machine::new(Vec::new());
/// machine.load(&program).unwrap();
///
/// assert_eq!(machine.run(), LoopState::Halted);
/// assert_eq!(machine.output(), &vec![Output::Number(17)]);
/// ```
pub struct Machine<M: MemoryBus, O: OutputSink> {
    pub(crate) memory: M,

    pub(crate) registers: [u8; REGISTER_COUNT],

    pub(crate) pc: usize,

    pub(crate) flags: Flags,

    /// Running, Halted or Faulted; budget exhaustion is reported, never stored.
    pub(crate) state: LoopState,

    /// SP value of an empty stack.
    pub(crate) stack_top: u8,

    cycles: u64,

    cycle_budget: Option<u64>,

    pub(crate) output: O,

    trace_hook: Option<TraceHook>,
}

impl<O: OutputSink> Machine<FlatMemory, O> {
    /// Creates a machine with 256 bytes of memory and default settings.
    pub fn new(output: O) -> Self {
        Self::with_memory(FlatMemory::new(), output)
    }

    /// Creates a machine with flat memory sized and configured by `config`.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if `config` fails [`MachineConfig::validate`].
    pub fn with_config(config: MachineConfig, output: O) -> Result<Self, ConfigError> {
        config.validate()?;
        let mut machine = Self::with_memory(FlatMemory::with_size(config.memory_size), output);
        machine.stack_top = config.stack_top;
        machine.registers[SP] = config.stack_top;
        machine.cycle_budget = config.cycle_budget;
        Ok(machine)
    }
}

impl<M: MemoryBus, O: OutputSink> Machine<M, O> {
    /// Creates a machine over an existing memory.
    ///
    /// The stack top is [`DEFAULT_STACK_TOP`], or the memory size if memory is
    /// smaller than that.
    pub fn with_memory(memory: M, output: O) -> Self {
        let stack_top = memory.size().min(DEFAULT_STACK_TOP as usize) as u8;
        let mut registers = [0; REGISTER_COUNT];
        registers[SP] = stack_top;

        Self {
            memory,
            registers,
            pc: 0,
            flags: Flags::empty(),
            state: LoopState::Running,
            stack_top,
            cycles: 0,
            cycle_budget: None,
            output,
            trace_hook: None,
        }
    }

    /// Copies `program` into memory starting at address 0.
    ///
    /// Every target address is checked for writability before the first byte
    /// is copied, so a failed load leaves memory untouched.
    ///
    /// # Errors
    ///
    /// [`LoadError::ProgramTooLarge`] if the program does not fit, or
    /// [`LoadError::Fault`] if the memory bus rejects a write.
    pub fn load(&mut self, program: &[u8]) -> Result<(), LoadError> {
        let capacity = self.memory.size();
        if program.len() > capacity {
            return Err(LoadError::ProgramTooLarge {
                len: program.len(),
                capacity,
            });
        }

        // Write each old byte back unchanged to find rejecting addresses
        for addr in 0..program.len() {
            let old = self.memory.read(addr).map_err(LoadError::Fault)?;
            self.memory.write(addr, old).map_err(LoadError::Fault)?;
        }

        program
            .iter()
            .enumerate()
            .try_for_each(|(addr, &byte)| self.memory.write(addr, byte))
            .map_err(LoadError::Fault)
    }

    /// Returns registers, PC, flags, cycle count and loop state to power-on
    /// values. Memory and output are kept.
    pub fn reset(&mut self) {
        self.registers = [0; REGISTER_COUNT];
        self.registers[SP] = self.stack_top;
        self.pc = 0;
        self.flags = Flags::empty();
        self.state = LoopState::Running;
        self.cycles = 0;
    }

    /// Executes one instruction.
    ///
    /// Performs the fetch-decode-dispatch cycle:
    /// 1. Fetch the opcode at PC and decode it
    /// 2. Fetch its operand bytes
    /// 3. Run the handler
    /// 4. Advance PC unless the instruction is control-flow class
    ///
    /// Once the machine is halted or faulted, further calls execute nothing
    /// and return the same state. If the cycle budget is used up, returns
    /// [`LoopState::CycleBudgetExceeded`] without executing.
    ///
    /// # Examples
    ///
    /// ```
    /// use ls8::{FaultKind, LoopState, Machine, NullSink};
    ///
    /// let mut machine = Machine::new(NullSink);
    /// machine.load(&[0b1111_1111]).unwrap();
    ///
    /// assert_eq!(machine.step(), LoopState::Faulted(FaultKind::InvalidOpcode));
    /// assert_eq!(machine.cycles(), 0);
    /// ```
    pub fn step(&mut self) -> LoopState {
        if self.state != LoopState::Running {
            return self.state;
        }
        if let Some(budget) = self.cycle_budget {
            if self.cycles >= budget {
                return LoopState::CycleBudgetExceeded;
            }
        }

        if let Err(fault) = self.execute_next() {
            self.state = LoopState::Faulted(fault);
        }

        self.state
    }

    /// Steps until the machine leaves [`LoopState::Running`].
    pub fn run(&mut self) -> LoopState {
        loop {
            let state = self.step();
            if state != LoopState::Running {
                return state;
            }
        }
    }

    fn execute_next(&mut self) -> Result<(), FaultKind> {
        let opcode_byte = self.memory.read(self.pc)?;
        let instruction = decoder::decode(opcode_byte)?;
        let operands = self.fetch_operands(&instruction)?;

        if self.trace_hook.is_some() {
            let record = self.trace_record();
            if let Some(hook) = self.trace_hook.as_mut() {
                hook(&record);
            }
        }

        self.dispatch(instruction.opcode, operands)?;
        self.cycles += 1;

        if !instruction.sets_pc && self.state == LoopState::Running {
            self.pc += instruction.size();
        }

        Ok(())
    }

    fn fetch_operands(&self, instruction: &Instruction) -> Result<Operands, FaultKind> {
        let mut operands = Operands::default();
        if instruction.operand_count >= 1 {
            operands.a = self.memory.read(self.pc.saturating_add(1))?;
        }
        if instruction.operand_count >= 2 {
            operands.b = self.memory.read(self.pc.saturating_add(2))?;
        }
        Ok(operands)
    }

    fn dispatch(&mut self, opcode: Opcode, operands: Operands) -> Result<(), FaultKind> {
        match opcode {
            Opcode::Nop => Ok(()),
            Opcode::Hlt => {
                self.state = LoopState::Halted;
                Ok(())
            }

            Opcode::Ldi => load_store::execute_ldi(self, operands),
            Opcode::Ld => load_store::execute_ld(self, operands),
            Opcode::St => load_store::execute_st(self, operands),

            Opcode::Push => stack::execute_push(self, operands),
            Opcode::Pop => stack::execute_pop(self, operands),

            Opcode::Prn => io::execute_prn(self, operands),
            Opcode::Pra => io::execute_pra(self, operands),

            Opcode::Call => control::execute_call(self, operands),
            Opcode::Ret => control::execute_ret(self),
            Opcode::Jmp => control::execute_jump(self, control::Condition::Always, operands),
            Opcode::Jeq => control::execute_jump(self, control::Condition::Equal, operands),
            Opcode::Jne => control::execute_jump(self, control::Condition::NotEqual, operands),
            Opcode::Jgt => control::execute_jump(self, control::Condition::Greater, operands),
            Opcode::Jlt => control::execute_jump(self, control::Condition::Less, operands),
            Opcode::Jle => control::execute_jump(self, control::Condition::LessOrEqual, operands),
            Opcode::Jge => {
                control::execute_jump(self, control::Condition::GreaterOrEqual, operands)
            }

            Opcode::Add
            | Opcode::Sub
            | Opcode::Mul
            | Opcode::Div
            | Opcode::Mod
            | Opcode::Inc
            | Opcode::Dec
            | Opcode::Cmp
            | Opcode::And
            | Opcode::Or
            | Opcode::Xor
            | Opcode::Not
            | Opcode::Shl
            | Opcode::Shr => alu::execute(self, opcode, operands),
        }
    }

    fn trace_record(&self) -> TraceRecord {
        let byte_at = |addr: usize| self.memory.read(addr).unwrap_or(0);
        TraceRecord {
            cycle: self.cycles,
            pc: self.pc,
            bytes: [
                byte_at(self.pc),
                byte_at(self.pc.saturating_add(1)),
                byte_at(self.pc.saturating_add(2)),
            ],
            registers: self.registers,
            flags: self.flags,
        }
    }

    /// Installs a callback that sees every instruction before it executes.
    pub fn set_trace_hook<F>(&mut self, hook: F)
    where
        F: FnMut(&TraceRecord) + 'static,
    {
        self.trace_hook = Some(Box::new(hook));
    }

    /// Removes the trace callback.
    pub fn clear_trace_hook(&mut self) {
        self.trace_hook = None;
    }

    /// Limits the total number of instructions; `None` removes the limit.
    pub fn set_cycle_budget(&mut self, budget: Option<u64>) {
        self.cycle_budget = budget;
    }

    pub fn cycle_budget(&self) -> Option<u64> {
        self.cycle_budget
    }

    // ========== Register and Memory Access ==========

    /// Reads register `index`.
    ///
    /// # Errors
    ///
    /// [`FaultKind::OutOfBoundsAccess`] if `index >= 8`.
    pub fn register(&self, index: usize) -> Result<u8, FaultKind> {
        self.registers
            .get(index)
            .copied()
            .ok_or(FaultKind::OutOfBoundsAccess)
    }

    /// Writes register `index`.
    ///
    /// # Errors
    ///
    /// [`FaultKind::OutOfBoundsAccess`] if `index >= 8`.
    pub fn set_register(&mut self, index: usize, value: u8) -> Result<(), FaultKind> {
        let slot = self
            .registers
            .get_mut(index)
            .ok_or(FaultKind::OutOfBoundsAccess)?;
        *slot = value;
        Ok(())
    }

    /// Reads memory at `addr`.
    pub fn read_memory(&self, addr: usize) -> Result<u8, FaultKind> {
        self.memory.read(addr)
    }

    /// Writes memory at `addr`.
    pub fn write_memory(&mut self, addr: usize, value: u8) -> Result<(), FaultKind> {
        self.memory.write(addr, value)
    }

    /// All eight registers.
    pub fn registers(&self) -> [u8; REGISTER_COUNT] {
        self.registers
    }

    /// Returns the program counter.
    pub fn pc(&self) -> usize {
        self.pc
    }

    /// Sets the program counter; an out-of-range value faults on the next fetch.
    pub fn set_pc(&mut self, pc: usize) {
        self.pc = pc;
    }

    /// Returns the stack pointer (R7).
    pub fn sp(&self) -> u8 {
        self.registers[SP]
    }

    /// SP value of an empty stack.
    pub fn stack_top(&self) -> u8 {
        self.stack_top
    }

    pub fn flags(&self) -> Flags {
        self.flags
    }

    /// Instructions completed since creation or the last reset.
    pub fn cycles(&self) -> u64 {
        self.cycles
    }

    /// Current state, without executing anything.
    pub fn state(&self) -> LoopState {
        self.state
    }

    pub fn memory(&self) -> &M {
        &self.memory
    }

    pub fn memory_mut(&mut self) -> &mut M {
        &mut self.memory
    }

    pub fn output(&self) -> &O {
        &self.output
    }

    pub fn output_mut(&mut self) -> &mut O {
        &mut self.output
    }

    /// Consumes the machine, returning its memory and output sink.
    pub fn into_parts(self) -> (M, O) {
        (self.memory, self.output)
    }
}
