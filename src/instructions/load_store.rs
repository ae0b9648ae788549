//! # Load and Store Instructions
//!
//! - LDI: Load an immediate byte into a register
//! - LD: Load a register from the address held in another register
//! - ST: Store a register to the address held in another register

use crate::decoder::Operands;
use crate::memory::MemoryBus;
use crate::output::OutputSink;
use crate::{FaultKind, Machine};

/// Executes LDI: `R[a] = b`.
///
/// Bytes: 3
pub(crate) fn execute_ldi<M: MemoryBus, O: OutputSink>(
    machine: &mut Machine<M, O>,
    operands: Operands,
) -> Result<(), FaultKind> {
    machine.set_register(operands.a as usize, operands.b)
}

/// Executes LD: `R[a] = MEM[R[b]]`.
///
/// Bytes: 3
pub(crate) fn execute_ld<M: MemoryBus, O: OutputSink>(
    machine: &mut Machine<M, O>,
    operands: Operands,
) -> Result<(), FaultKind> {
    machine.register(operands.a as usize)?;
    let addr = machine.register(operands.b as usize)?;
    let value = machine.memory.read(addr as usize)?;
    machine.set_register(operands.a as usize, value)
}

/// Executes ST: `MEM[R[a]] = R[b]`.
///
/// Bytes: 3
pub(crate) fn execute_st<M: MemoryBus, O: OutputSink>(
    machine: &mut Machine<M, O>,
    operands: Operands,
) -> Result<(), FaultKind> {
    let addr = machine.register(operands.a as usize)?;
    let value = machine.register(operands.b as usize)?;
    machine.memory.write(addr as usize, value)
}
