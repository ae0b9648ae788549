//! LS-8 Disassembler Module
//!
//! Converts a byte stream into a listing of mnemonics, e.g. for `--disassemble`
//! in the command-line runner or a debugger view.

use crate::opcodes::Opcode;
use std::fmt;

/// One entry of a disassembly listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisassemblyLine {
    /// Address of the first byte
    pub address: usize,

    /// The raw bytes: opcode and operands, or a single undecodable byte
    pub bytes: Vec<u8>,

    /// `None` for bytes that are not a complete instruction
    pub opcode: Option<Opcode>,
}

impl DisassemblyLine {
    /// Assembly text without address or bytes, e.g. `LDI R0,8`.
    pub fn text(&self) -> String {
        let directive = || match self.bytes.first() {
            Some(byte) => format!(".byte 0b{:08b}", byte),
            None => ".byte".to_string(),
        };

        let Some(opcode) = self.opcode else {
            return directive();
        };

        match (opcode, self.bytes.get(1..).unwrap_or_default()) {
            (_, []) if self.bytes.len() == 1 => opcode.mnemonic().to_string(),
            (Opcode::Ldi, [reg, value]) => format!("LDI R{},{}", reg, value),
            (_, [reg]) => format!("{} R{}", opcode, reg),
            (_, [a, b]) => format!("{} R{},R{}", opcode, a, b),
            _ => directive(),
        }
    }
}

impl fmt::Display for DisassemblyLine {
    /// `03: 47 00     PRN R0`
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let hex: Vec<String> = self.bytes.iter().map(|b| format!("{:02X}", b)).collect();
        write!(f, "{:02X}: {:<9} {}", self.address, hex.join(" "), self.text())
    }
}

/// Disassembles `bytes` starting at address 0.
///
/// Bytes that do not decode, and instructions cut short by the end of the
/// input, are emitted one byte at a time as `.byte` lines.
///
/// # Examples
///
/// ```
/// use ls8::disassemble;
///
/// let listing = disassemble(&[0b1000_0010, 0, 8, 0b0100_0111, 0, 0b0000_0001]);
/// let text: Vec<String> = listing.iter().map(|line| line.text()).collect();
/// assert_eq!(text, ["LDI R0,8", "PRN R0", "HLT"]);
/// ```
pub fn disassemble(bytes: &[u8]) -> Vec<DisassemblyLine> {
    let mut lines = Vec::new();
    let mut pc = 0;

    while pc < bytes.len() {
        let decoded = Opcode::from_byte(bytes[pc]).filter(|op| pc + op.size() <= bytes.len());

        match decoded {
            Some(opcode) => {
                let size = opcode.size();
                lines.push(DisassemblyLine {
                    address: pc,
                    bytes: bytes[pc..pc + size].to_vec(),
                    opcode: Some(opcode),
                });
                pc += size;
            }
            None => {
                lines.push(DisassemblyLine {
                    address: pc,
                    bytes: vec![bytes[pc]],
                    opcode: None,
                });
                pc += 1;
            }
        }
    }

    lines
}
