//! Integration tests for the disassembler.

use ls8::{disassemble, load_program_file, Opcode};
use std::path::Path;

#[test]
fn test_disassemble_print8() {
    let listing = disassemble(&[0b1000_0010, 0, 8, 0b0100_0111, 0, 0b0000_0001]);

    let addresses: Vec<usize> = listing.iter().map(|l| l.address).collect();
    assert_eq!(addresses, vec![0, 3, 5]);

    let rendered: Vec<String> = listing.iter().map(|l| l.to_string()).collect();
    assert_eq!(
        rendered,
        vec![
            "00: 82 00 08  LDI R0,8",
            "03: 47 00     PRN R0",
            "05: 01        HLT",
        ]
    );
}

#[test]
fn test_every_opcode_disassembles() {
    for opcode in Opcode::ALL {
        let mut bytes = vec![opcode.byte()];
        bytes.extend(std::iter::repeat(1).take(opcode.operand_count() as usize));

        let listing = disassemble(&bytes);
        assert_eq!(listing.len(), 1, "{}", opcode);
        assert_eq!(listing[0].opcode, Some(opcode));
        assert!(listing[0].text().starts_with(opcode.mnemonic()));
    }
}

#[test]
fn test_register_operand_forms() {
    let listing = disassemble(&[
        0b0101_0000, 2, // CALL R2
        0b1010_0111, 0, 1, // CMP R0,R1
        0b0110_1001, 3, // NOT R3
    ]);
    let text: Vec<String> = listing.iter().map(|l| l.text()).collect();
    assert_eq!(text, ["CALL R2", "CMP R0,R1", "NOT R3"]);
}

#[test]
fn test_data_bytes_resynchronize() {
    // An invalid byte followed by a valid instruction
    let listing = disassemble(&[0b0101_0010, 0b0100_0111, 0]);
    assert_eq!(listing[0].text(), ".byte 0b01010010");
    assert_eq!(listing[1].address, 1);
    assert_eq!(listing[1].text(), "PRN R0");
}

#[test]
fn test_disassemble_sample_program() {
    let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("programs/mult.ls8");
    let program = load_program_file(path).unwrap();

    let text: Vec<String> = disassemble(&program).iter().map(|l| l.text()).collect();
    assert_eq!(text, ["LDI R0,8", "LDI R1,9", "MUL R0,R1", "PRN R0", "HLT"]);
}
