//! Tests for LDI, LD, ST, PRN and PRA, and for placing programs in memory.

use ls8::{
    FaultKind, FlatMemory, LoadError, LoopState, Machine, MemoryBus, NullSink, Output,
    WriterSink,
};

const LDI: u8 = 0b1000_0010;
const LD: u8 = 0b1000_0011;
const ST: u8 = 0b1000_0100;
const PRN: u8 = 0b0100_0111;
const PRA: u8 = 0b0100_1000;
const HLT: u8 = 0b0000_0001;

/// Helper function to create a machine with a program loaded at address 0
fn setup_machine(program: &[u8]) -> Machine<FlatMemory, Vec<Output>> {
    let mut machine = Machine::new(Vec::new());
    machine.load(program).unwrap();
    machine
}

// ========== LDI / LD / ST ==========

#[test]
fn test_ldi_sets_register() {
    let mut machine = setup_machine(&[LDI, 3, 0xAB, HLT]);

    machine.step();
    assert_eq!(machine.register(3), Ok(0xAB));
    assert_eq!(machine.pc(), 3);
}

#[test]
fn test_ldi_into_sp() {
    let mut machine = setup_machine(&[LDI, 7, 0x80, HLT]);
    machine.run();
    assert_eq!(machine.sp(), 0x80);
}

#[test]
fn test_ld_reads_memory_at_register_address() {
    // R1 = 0x90; R0 = MEM[R1]
    let mut machine = setup_machine(&[LDI, 1, 0x90, LD, 0, 1, HLT]);
    machine.write_memory(0x90, 77).unwrap();

    assert_eq!(machine.run(), LoopState::Halted);
    assert_eq!(machine.register(0), Ok(77));
}

#[test]
fn test_st_writes_memory_at_register_address() {
    // R0 = 0x90; R1 = 55; MEM[R0] = R1
    let mut machine = setup_machine(&[LDI, 0, 0x90, LDI, 1, 55, ST, 0, 1, HLT]);

    assert_eq!(machine.run(), LoopState::Halted);
    assert_eq!(machine.read_memory(0x90), Ok(55));
    assert_eq!(machine.register(0), Ok(0x90));
}

#[test]
fn test_st_then_ld() {
    let program = [LDI, 0, 0xA0, LDI, 1, 9, ST, 0, 1, LD, 2, 0, PRN, 2, HLT];
    let mut machine = setup_machine(&program);

    assert_eq!(machine.run(), LoopState::Halted);
    assert_eq!(machine.output(), &vec![Output::Number(9)]);
}

#[test]
fn test_ld_outside_small_memory_faults() {
    let mut machine = Machine::with_memory(FlatMemory::with_size(16), Vec::new());
    machine.load(&[LDI, 1, 100, LD, 0, 1, HLT]).unwrap();

    assert_eq!(machine.run(), LoopState::Faulted(FaultKind::OutOfBoundsAccess));
    assert_eq!(machine.pc(), 3);
    assert_eq!(machine.register(0), Ok(0));
}

#[test]
fn test_ldi_invalid_register_faults() {
    let mut machine = setup_machine(&[LDI, 8, 1, HLT]);
    assert_eq!(machine.run(), LoopState::Faulted(FaultKind::OutOfBoundsAccess));
}

// ========== PRN / PRA ==========

#[test]
fn test_prn_emits_decimal_value() {
    let mut machine = setup_machine(&[LDI, 0, 200, PRN, 0, HLT]);
    machine.run();
    assert_eq!(machine.output(), &vec![Output::Number(200)]);
}

#[test]
fn test_pra_emits_character() {
    let mut machine = setup_machine(&[LDI, 0, b'A', PRA, 0, HLT]);
    machine.run();
    assert_eq!(machine.output(), &vec![Output::Char(b'A')]);
}

#[test]
fn test_output_to_writer() {
    let program = [LDI, 0, 8, PRN, 0, LDI, 1, b'!', PRA, 1, PRN, 0, HLT];
    let mut machine = Machine::new(WriterSink::new(Vec::new()));
    machine.load(&program).unwrap();

    assert_eq!(machine.run(), LoopState::Halted);

    let (_, mut sink) = machine.into_parts();
    assert!(sink.take_error().is_none());
    assert_eq!(sink.into_inner(), b"8\n!8\n".to_vec());
}

#[test]
fn test_prn_invalid_register_emits_nothing() {
    let mut machine = setup_machine(&[PRN, 9, HLT]);
    assert_eq!(machine.run(), LoopState::Faulted(FaultKind::OutOfBoundsAccess));
    assert!(machine.output().is_empty());
}

// ========== Program Loading ==========

#[test]
fn test_load_places_bytes_from_zero() {
    let machine = setup_machine(&[1, 2, 3]);
    assert_eq!(&machine.memory().as_slice()[..4], &[1, 2, 3, 0]);
}

#[test]
fn test_load_full_memory() {
    let program = vec![0u8; 256];
    let mut machine = Machine::new(NullSink);
    assert!(machine.load(&program).is_ok());
}

#[test]
fn test_program_too_large_leaves_memory_unchanged() {
    let mut machine = Machine::new(NullSink);
    machine.write_memory(0, 0xEE).unwrap();

    let program = vec![0u8; 257];
    let result = machine.load(&program);

    assert!(matches!(
        result,
        Err(LoadError::ProgramTooLarge {
            len: 257,
            capacity: 256
        })
    ));
    assert_eq!(machine.read_memory(0), Ok(0xEE));
}

#[test]
fn test_program_too_large_for_small_memory() {
    let mut machine = Machine::with_memory(FlatMemory::with_size(4), NullSink);
    let err = machine.load(&[0; 5]).unwrap_err();
    assert_eq!(err.to_string(), "program is 5 bytes but memory holds only 4");
    assert!(machine.memory().as_slice().iter().all(|&b| b == 0));
}

// ========== Accessors ==========

#[test]
fn test_register_accessors_bounds_checked() {
    let mut machine = Machine::new(NullSink);

    assert_eq!(machine.set_register(6, 1), Ok(()));
    assert_eq!(machine.register(6), Ok(1));
    assert_eq!(machine.register(8), Err(FaultKind::OutOfBoundsAccess));
    assert_eq!(machine.set_register(8, 1), Err(FaultKind::OutOfBoundsAccess));
}

#[test]
fn test_memory_accessors_bounds_checked() {
    let mut machine = Machine::with_memory(FlatMemory::with_size(16), NullSink);

    assert_eq!(machine.write_memory(15, 3), Ok(()));
    assert_eq!(machine.read_memory(15), Ok(3));
    assert_eq!(machine.read_memory(16), Err(FaultKind::OutOfBoundsAccess));
    assert_eq!(machine.write_memory(16, 3), Err(FaultKind::OutOfBoundsAccess));
    assert_eq!(machine.memory().size(), 16);
}
