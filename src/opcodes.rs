//! # LS-8 Instruction Set
//!
//! This module defines the closed set of LS-8 instructions. Every opcode byte
//! carries its own metadata in its bit layout:
//!
//! ```text
//!  7 6   5   4   3 2 1 0
//! +---+---+---+---+-------+
//! |A A| B | C |  I I I I  |
//! +---+---+---+---+-------+
//! ```
//!
//! - `AA`: number of operand bytes that follow the opcode (0-2)
//! - `B`: set on ALU operations
//! - `C`: set on instructions that write PC themselves (control-flow class)
//! - `IIII`: instruction identifier within its class
//!
//! The full byte is the instruction's identity. Interrupt opcodes (`INT`,
//! `IRET`) are not part of this machine and decode as invalid.

/// Shift that moves the operand-count bits down to bit 0.
pub const OPERAND_COUNT_SHIFT: u8 = 6;

/// Marks ALU operations.
pub const ALU_BIT: u8 = 0b0010_0000;

/// Marks instructions that set PC directly.
pub const CONTROL_FLOW_BIT: u8 = 0b0001_0000;

/// Selects the instruction identifier.
pub const INSTRUCTION_ID_MASK: u8 = 0b0000_1111;

/// Every instruction the machine can execute.
///
/// The discriminant is the opcode byte as it appears in memory.
///
/// # Examples
///
/// ```
/// use ls8::Opcode;
///
/// let ldi = Opcode::from_byte(0b1000_0010).unwrap();
/// assert_eq!(ldi, Opcode::Ldi);
/// assert_eq!(ldi.mnemonic(), "LDI");
/// assert_eq!(ldi.operand_count(), 2);
/// assert!(!ldi.sets_pc());
///
/// assert!(Opcode::from_byte(0xFF).is_none());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Opcode {
    Nop = 0b0000_0000,
    Hlt = 0b0000_0001,
    Ret = 0b0001_0001,

    Ldi = 0b1000_0010,
    Ld = 0b1000_0011,
    St = 0b1000_0100,

    Push = 0b0100_0101,
    Pop = 0b0100_0110,
    Prn = 0b0100_0111,
    Pra = 0b0100_1000,

    Call = 0b0101_0000,
    Jmp = 0b0101_0100,
    Jeq = 0b0101_0101,
    Jne = 0b0101_0110,
    Jgt = 0b0101_0111,
    Jlt = 0b0101_1000,
    Jle = 0b0101_1001,
    Jge = 0b0101_1010,

    Inc = 0b0110_0101,
    Dec = 0b0110_0110,
    Not = 0b0110_1001,

    Add = 0b1010_0000,
    Sub = 0b1010_0001,
    Mul = 0b1010_0010,
    Div = 0b1010_0011,
    Mod = 0b1010_0100,
    Cmp = 0b1010_0111,
    And = 0b1010_1000,
    Or = 0b1010_1010,
    Xor = 0b1010_1011,
    Shl = 0b1010_1100,
    Shr = 0b1010_1101,
}

impl Opcode {
    /// All opcodes, in encoding order by class.
    pub const ALL: [Opcode; 32] = [
        Opcode::Nop,
        Opcode::Hlt,
        Opcode::Ret,
        Opcode::Ldi,
        Opcode::Ld,
        Opcode::St,
        Opcode::Push,
        Opcode::Pop,
        Opcode::Prn,
        Opcode::Pra,
        Opcode::Call,
        Opcode::Jmp,
        Opcode::Jeq,
        Opcode::Jne,
        Opcode::Jgt,
        Opcode::Jlt,
        Opcode::Jle,
        Opcode::Jge,
        Opcode::Inc,
        Opcode::Dec,
        Opcode::Not,
        Opcode::Add,
        Opcode::Sub,
        Opcode::Mul,
        Opcode::Div,
        Opcode::Mod,
        Opcode::Cmp,
        Opcode::And,
        Opcode::Or,
        Opcode::Xor,
        Opcode::Shl,
        Opcode::Shr,
    ];

    /// Looks up the instruction encoded by `byte`.
    ///
    /// Returns `None` for bytes that do not name an instruction.
    pub fn from_byte(byte: u8) -> Option<Opcode> {
        let opcode = match byte {
            0b0000_0000 => Opcode::Nop,
            0b0000_0001 => Opcode::Hlt,
            0b0001_0001 => Opcode::Ret,
            0b1000_0010 => Opcode::Ldi,
            0b1000_0011 => Opcode::Ld,
            0b1000_0100 => Opcode::St,
            0b0100_0101 => Opcode::Push,
            0b0100_0110 => Opcode::Pop,
            0b0100_0111 => Opcode::Prn,
            0b0100_1000 => Opcode::Pra,
            0b0101_0000 => Opcode::Call,
            0b0101_0100 => Opcode::Jmp,
            0b0101_0101 => Opcode::Jeq,
            0b0101_0110 => Opcode::Jne,
            0b0101_0111 => Opcode::Jgt,
            0b0101_1000 => Opcode::Jlt,
            0b0101_1001 => Opcode::Jle,
            0b0101_1010 => Opcode::Jge,
            0b0110_0101 => Opcode::Inc,
            0b0110_0110 => Opcode::Dec,
            0b0110_1001 => Opcode::Not,
            0b1010_0000 => Opcode::Add,
            0b1010_0001 => Opcode::Sub,
            0b1010_0010 => Opcode::Mul,
            0b1010_0011 => Opcode::Div,
            0b1010_0100 => Opcode::Mod,
            0b1010_0111 => Opcode::Cmp,
            0b1010_1000 => Opcode::And,
            0b1010_1010 => Opcode::Or,
            0b1010_1011 => Opcode::Xor,
            0b1010_1100 => Opcode::Shl,
            0b1010_1101 => Opcode::Shr,
            _ => return None,
        };
        Some(opcode)
    }

    /// Returns the opcode byte.
    pub const fn byte(self) -> u8 {
        self as u8
    }

    /// Number of operand bytes following the opcode.
    pub const fn operand_count(self) -> u8 {
        self.byte() >> OPERAND_COUNT_SHIFT
    }

    /// Total encoded size in bytes, opcode included.
    pub const fn size(self) -> usize {
        1 + self.operand_count() as usize
    }

    /// True for control-flow-class instructions, which set PC themselves.
    pub const fn sets_pc(self) -> bool {
        self.byte() & CONTROL_FLOW_BIT != 0
    }

    /// True for instructions executed by the ALU.
    pub const fn is_alu(self) -> bool {
        self.byte() & ALU_BIT != 0
    }

    /// Instruction identifier within its class.
    pub const fn id(self) -> u8 {
        self.byte() & INSTRUCTION_ID_MASK
    }

    /// Assembly mnemonic.
    pub fn mnemonic(self) -> &'static str {
        match self {
            Opcode::Nop => "NOP",
            Opcode::Hlt => "HLT",
            Opcode::Ret => "RET",
            Opcode::Ldi => "LDI",
            Opcode::Ld => "LD",
            Opcode::St => "ST",
            Opcode::Push => "PUSH",
            Opcode::Pop => "POP",
            Opcode::Prn => "PRN",
            Opcode::Pra => "PRA",
            Opcode::Call => "CALL",
            Opcode::Jmp => "JMP",
            Opcode::Jeq => "JEQ",
            Opcode::Jne => "JNE",
            Opcode::Jgt => "JGT",
            Opcode::Jlt => "JLT",
            Opcode::Jle => "JLE",
            Opcode::Jge => "JGE",
            Opcode::Inc => "INC",
            Opcode::Dec => "DEC",
            Opcode::Not => "NOT",
            Opcode::Add => "ADD",
            Opcode::Sub => "SUB",
            Opcode::Mul => "MUL",
            Opcode::Div => "DIV",
            Opcode::Mod => "MOD",
            Opcode::Cmp => "CMP",
            Opcode::And => "AND",
            Opcode::Or => "OR",
            Opcode::Xor => "XOR",
            Opcode::Shl => "SHL",
            Opcode::Shr => "SHR",
        }
    }
}

impl std::fmt::Display for Opcode {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        f.write_str(self.mnemonic())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_byte_round_trips_every_opcode() {
        for opcode in Opcode::ALL {
            assert_eq!(Opcode::from_byte(opcode.byte()), Some(opcode));
        }
    }

    #[test]
    fn test_from_byte_covers_exactly_the_known_set() {
        let known = (0..=255u8).filter_map(Opcode::from_byte).count();
        assert_eq!(known, Opcode::ALL.len());
    }

    #[test]
    fn test_operand_counts_never_exceed_two() {
        for opcode in Opcode::ALL {
            assert!(opcode.operand_count() <= 2, "{} has too many operands", opcode);
        }
    }

    #[test]
    fn test_control_flow_class() {
        let control: Vec<Opcode> = Opcode::ALL.into_iter().filter(|op| op.sets_pc()).collect();
        assert_eq!(
            control,
            vec![
                Opcode::Ret,
                Opcode::Call,
                Opcode::Jmp,
                Opcode::Jeq,
                Opcode::Jne,
                Opcode::Jgt,
                Opcode::Jlt,
                Opcode::Jle,
                Opcode::Jge,
            ]
        );
    }

    #[test]
    fn test_alu_class_has_no_control_flow() {
        for opcode in Opcode::ALL.into_iter().filter(|op| op.is_alu()) {
            assert!(!opcode.sets_pc());
        }
    }

    #[test]
    fn test_sizes() {
        assert_eq!(Opcode::Hlt.size(), 1);
        assert_eq!(Opcode::Prn.size(), 2);
        assert_eq!(Opcode::Ldi.size(), 3);
        assert_eq!(Opcode::Ret.size(), 1);
    }
}
