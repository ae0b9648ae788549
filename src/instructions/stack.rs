//! # Stack Operations
//!
//! This module implements stack manipulation instructions:
//! - PUSH: Push a register onto the stack
//! - POP: Pop the top of the stack into a register
//!
//! The stack lives at the top of memory and grows downward. R7 holds the
//! address of the current top item; an empty stack has R7 equal to the
//! machine's stack top (0xF4 by default).
//!
//! `push_value` and `pop_value` are shared with CALL and RET.

use crate::decoder::Operands;
use crate::machine::SP;
use crate::memory::MemoryBus;
use crate::output::OutputSink;
use crate::{FaultKind, Machine};

/// Pushes one byte.
///
/// 1. Fail with `StackOverflow` if SP is already 0
/// 2. Write `value` to `SP - 1`
/// 3. Decrement SP
///
/// SP is only changed after the write succeeds.
pub(crate) fn push_value<M: MemoryBus, O: OutputSink>(
    machine: &mut Machine<M, O>,
    value: u8,
) -> Result<(), FaultKind> {
    let sp = machine.registers[SP];
    let new_sp = sp.checked_sub(1).ok_or(FaultKind::StackOverflow)?;

    machine.memory.write(new_sp as usize, value)?;
    machine.registers[SP] = new_sp;

    Ok(())
}

/// Pops one byte.
///
/// Fails with `StackUnderflow` if SP is at (or above) the stack top.
pub(crate) fn pop_value<M: MemoryBus, O: OutputSink>(
    machine: &mut Machine<M, O>,
) -> Result<u8, FaultKind> {
    let sp = machine.registers[SP];
    if sp >= machine.stack_top {
        return Err(FaultKind::StackUnderflow);
    }

    let value = machine.memory.read(sp as usize)?;
    machine.registers[SP] = sp + 1;

    Ok(value)
}

/// Executes the PUSH instruction.
///
/// The register is read before SP moves, so `PUSH R7` stores the stack
/// pointer as it was before the push.
///
/// Bytes: 2
/// Flags affected: None
pub(crate) fn execute_push<M: MemoryBus, O: OutputSink>(
    machine: &mut Machine<M, O>,
    operands: Operands,
) -> Result<(), FaultKind> {
    let value = machine.register(operands.a as usize)?;
    push_value(machine, value)
}

/// Executes the POP instruction.
///
/// The popped value is written after SP moves, so `POP R7` loads the stack
/// pointer from the stack. `PUSH R7; POP R7` therefore leaves SP unchanged.
///
/// Bytes: 2
/// Flags affected: None
pub(crate) fn execute_pop<M: MemoryBus, O: OutputSink>(
    machine: &mut Machine<M, O>,
    operands: Operands,
) -> Result<(), FaultKind> {
    // Validate the destination before touching SP
    machine.register(operands.a as usize)?;

    let value = pop_value(machine)?;
    machine.set_register(operands.a as usize, value)
}
