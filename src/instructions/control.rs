//! # Control Flow Instructions
//!
//! This module implements the control-flow class, the instructions that set
//! PC themselves:
//! - CALL: Push the return address and jump to a register
//! - RET: Pop the return address into PC
//! - JMP: Jump to a register unconditionally
//! - JEQ, JNE, JGT, JLT, JLE, JGE: Jump to a register if the flags match
//!
//! A conditional jump that is not taken moves PC past its own two bytes.

use crate::decoder::Operands;
use crate::flags::Flags;
use crate::instructions::stack::{pop_value, push_value};
use crate::memory::MemoryBus;
use crate::opcodes::Opcode;
use crate::output::OutputSink;
use crate::{FaultKind, Machine};

/// The flag test a jump performs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Condition {
    Always,
    Equal,
    NotEqual,
    Greater,
    Less,
    GreaterOrEqual,
    LessOrEqual,
}

impl Condition {
    pub(crate) fn holds(self, flags: Flags) -> bool {
        match self {
            Condition::Always => true,
            Condition::Equal => flags.contains(Flags::EQUAL),
            Condition::NotEqual => !flags.contains(Flags::EQUAL),
            Condition::Greater => flags.contains(Flags::GREATER_THAN),
            Condition::Less => flags.contains(Flags::LESS_THAN),
            Condition::GreaterOrEqual => flags.intersects(Flags::GREATER_THAN | Flags::EQUAL),
            Condition::LessOrEqual => flags.intersects(Flags::LESS_THAN | Flags::EQUAL),
        }
    }
}

/// Executes the CALL instruction.
///
/// 1. Push the return address, `PC + 2` (the byte after CALL's operand)
/// 2. Set PC to the value of the operand register
///
/// A return address that does not fit in a byte lies outside any valid
/// memory and faults with `OutOfBoundsAccess`.
pub(crate) fn execute_call<M: MemoryBus, O: OutputSink>(
    machine: &mut Machine<M, O>,
    operands: Operands,
) -> Result<(), FaultKind> {
    let target = machine.register(operands.a as usize)?;

    let return_address = machine.pc + Opcode::Call.size();
    let return_address = u8::try_from(return_address).map_err(|_| FaultKind::OutOfBoundsAccess)?;

    push_value(machine, return_address)?;
    machine.pc = target as usize;

    Ok(())
}

/// Executes the RET instruction: pop the top of the stack into PC.
pub(crate) fn execute_ret<M: MemoryBus, O: OutputSink>(
    machine: &mut Machine<M, O>,
) -> Result<(), FaultKind> {
    let return_address = pop_value(machine)?;
    machine.pc = return_address as usize;
    Ok(())
}

/// Executes JMP and the conditional jumps.
///
/// The operand register is read whether or not the jump is taken, so an
/// invalid register index always faults.
pub(crate) fn execute_jump<M: MemoryBus, O: OutputSink>(
    machine: &mut Machine<M, O>,
    condition: Condition,
    operands: Operands,
) -> Result<(), FaultKind> {
    let target = machine.register(operands.a as usize)?;

    if condition.holds(machine.flags) {
        machine.pc = target as usize;
    } else {
        machine.pc += Opcode::Jmp.size();
    }

    Ok(())
}
