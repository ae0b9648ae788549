//! # Output Instructions
//!
//! - PRN: Print a register as a decimal number
//! - PRA: Print a register as a character
//!
//! Both go through the machine's `OutputSink`.

use crate::decoder::Operands;
use crate::memory::MemoryBus;
use crate::output::{Output, OutputSink};
use crate::{FaultKind, Machine};

/// Executes PRN.
///
/// Bytes: 2
pub(crate) fn execute_prn<M: MemoryBus, O: OutputSink>(
    machine: &mut Machine<M, O>,
    operands: Operands,
) -> Result<(), FaultKind> {
    let value = machine.register(operands.a as usize)?;
    machine.output.emit(Output::Number(value));
    Ok(())
}

/// Executes PRA.
///
/// Bytes: 2
pub(crate) fn execute_pra<M: MemoryBus, O: OutputSink>(
    machine: &mut Machine<M, O>,
    operands: Operands,
) -> Result<(), FaultKind> {
    let value = machine.register(operands.a as usize)?;
    machine.output.emit(Output::Char(value));
    Ok(())
}
