//! # Instruction Decoder
//!
//! Turns the opcode byte at PC into an [`Instruction`]: the opcode itself, how
//! many operand bytes follow it, and whether the instruction manages PC on its
//! own. Decoding is pure and total over `0..=255`.

use crate::opcodes::{Opcode, CONTROL_FLOW_BIT, OPERAND_COUNT_SHIFT};
use crate::FaultKind;

/// A decoded instruction, valid for a single cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Instruction {
    /// Which instruction to run.
    pub opcode: Opcode,

    /// Number of operand bytes following the opcode (0-2).
    pub operand_count: u8,

    /// Control-flow class: the handler sets PC and the loop must not advance it.
    pub sets_pc: bool,
}

impl Instruction {
    /// Encoded size in bytes, opcode included.
    pub fn size(&self) -> usize {
        1 + self.operand_count as usize
    }
}

/// Operand bytes fetched after the opcode.
///
/// Operands the instruction does not declare are zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Operands {
    pub a: u8,
    pub b: u8,
}

/// Decodes an opcode byte.
///
/// # Errors
///
/// Returns [`FaultKind::InvalidOpcode`] when the operand-count bits are `11`
/// or the byte does not name a known instruction.
///
/// # Examples
///
/// ```
/// use ls8::{decode, FaultKind, Opcode};
///
/// let call = decode(0b0101_0000).unwrap();
/// assert_eq!(call.opcode, Opcode::Call);
/// assert_eq!(call.operand_count, 1);
/// assert!(call.sets_pc);
///
/// assert_eq!(decode(0b1100_0000), Err(FaultKind::InvalidOpcode));
/// ```
pub fn decode(byte: u8) -> Result<Instruction, FaultKind> {
    let operand_count = byte >> OPERAND_COUNT_SHIFT;
    if operand_count > 2 {
        return Err(FaultKind::InvalidOpcode);
    }

    let opcode = Opcode::from_byte(byte).ok_or(FaultKind::InvalidOpcode)?;

    Ok(Instruction {
        opcode,
        operand_count,
        sets_pc: byte & CONTROL_FLOW_BIT != 0,
    })
}
