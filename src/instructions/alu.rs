//! # ALU (Arithmetic Logic Unit) Instructions
//!
//! The ALU is a pure function over two register values. Arithmetic wraps
//! modulo 256, the machine's word size. `CMP` is the exception to
//! "result goes back into register A": it writes the flags register and
//! leaves both registers alone.

use crate::decoder::Operands;
use crate::flags::Flags;
use crate::memory::MemoryBus;
use crate::opcodes::Opcode;
use crate::output::OutputSink;
use crate::{FaultKind, Machine};

/// An operation the ALU can perform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AluOp {
    Add,
    Sub,
    Mul,
    Div,
    Mod,
    Inc,
    Dec,
    And,
    Or,
    Xor,
    Not,
    Shl,
    Shr,
    Cmp,
}

/// What an ALU operation produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AluOutcome {
    /// New value for register A.
    Value(u8),

    /// New flags register contents (CMP only).
    Flags(Flags),
}

impl TryFrom<Opcode> for AluOp {
    type Error = FaultKind;

    /// Maps an opcode to its ALU operation.
    ///
    /// Fails with [`FaultKind::UnsupportedAluOperation`] for anything the ALU
    /// does not implement.
    fn try_from(opcode: Opcode) -> Result<Self, Self::Error> {
        let op = match opcode {
            Opcode::Add => AluOp::Add,
            Opcode::Sub => AluOp::Sub,
            Opcode::Mul => AluOp::Mul,
            Opcode::Div => AluOp::Div,
            Opcode::Mod => AluOp::Mod,
            Opcode::Inc => AluOp::Inc,
            Opcode::Dec => AluOp::Dec,
            Opcode::And => AluOp::And,
            Opcode::Or => AluOp::Or,
            Opcode::Xor => AluOp::Xor,
            Opcode::Not => AluOp::Not,
            Opcode::Shl => AluOp::Shl,
            Opcode::Shr => AluOp::Shr,
            Opcode::Cmp => AluOp::Cmp,
            _ => return Err(FaultKind::UnsupportedAluOperation),
        };
        Ok(op)
    }
}

impl AluOp {
    /// True for operations that read only register A.
    pub fn is_unary(self) -> bool {
        matches!(self, AluOp::Inc | AluOp::Dec | AluOp::Not)
    }

    /// Computes `a op b`.
    ///
    /// Unary operations ignore `b`. `DIV` truncates toward zero.
    ///
    /// # Errors
    ///
    /// [`FaultKind::DivisionByZero`] for `DIV` or `MOD` with `b == 0`.
    ///
    /// # Examples
    ///
    /// ```
    /// use ls8::{AluOp, AluOutcome, FaultKind, Flags};
    ///
    /// assert_eq!(AluOp::Add.apply(8, 9), Ok(AluOutcome::Value(17)));
    /// assert_eq!(AluOp::Add.apply(200, 100), Ok(AluOutcome::Value(44)));
    /// assert_eq!(AluOp::Div.apply(7, 2), Ok(AluOutcome::Value(3)));
    /// assert_eq!(AluOp::Div.apply(7, 0), Err(FaultKind::DivisionByZero));
    /// assert_eq!(AluOp::Cmp.apply(3, 5), Ok(AluOutcome::Flags(Flags::LESS_THAN)));
    /// ```
    pub fn apply(self, a: u8, b: u8) -> Result<AluOutcome, FaultKind> {
        let value = match self {
            AluOp::Add => a.wrapping_add(b),
            AluOp::Sub => a.wrapping_sub(b),
            AluOp::Mul => a.wrapping_mul(b),
            AluOp::Div => a.checked_div(b).ok_or(FaultKind::DivisionByZero)?,
            AluOp::Mod => a.checked_rem(b).ok_or(FaultKind::DivisionByZero)?,
            AluOp::Inc => a.wrapping_add(1),
            AluOp::Dec => a.wrapping_sub(1),
            AluOp::And => a & b,
            AluOp::Or => a | b,
            AluOp::Xor => a ^ b,
            AluOp::Not => !a,
            // Shifting by the word size or more clears every bit
            AluOp::Shl => a.checked_shl(b as u32).unwrap_or(0),
            AluOp::Shr => a.checked_shr(b as u32).unwrap_or(0),
            AluOp::Cmp => return Ok(AluOutcome::Flags(Flags::compare(a, b))),
        };
        Ok(AluOutcome::Value(value))
    }
}

/// Executes an ALU instruction: `R[a] = R[a] op R[b]`, or `FL = cmp(R[a], R[b])`.
///
/// Both register operands are validated before anything is written, so a
/// fault leaves registers and flags unchanged.
pub(crate) fn execute<M: MemoryBus, O: OutputSink>(
    machine: &mut Machine<M, O>,
    opcode: Opcode,
    operands: Operands,
) -> Result<(), FaultKind> {
    let op = AluOp::try_from(opcode)?;

    let a = machine.register(operands.a as usize)?;
    let b = if op.is_unary() {
        0
    } else {
        machine.register(operands.b as usize)?
    };

    match op.apply(a, b)? {
        AluOutcome::Value(value) => machine.set_register(operands.a as usize, value),
        AluOutcome::Flags(flags) => {
            machine.flags = flags;
            Ok(())
        }
    }
}
