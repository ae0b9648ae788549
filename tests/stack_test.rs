//! Tests for PUSH and POP.
//!
//! Tests cover:
//! - Pushing and popping values in LIFO order
//! - SP movement and where pushed bytes land in memory
//! - Overflow at address 0 and underflow at the stack top
//! - The R7 (stack pointer) operand cases

use ls8::{
    FaultKind, FlatMemory, LoopState, Machine, MachineConfig, Output, DEFAULT_STACK_TOP, SP,
};

const LDI: u8 = 0b1000_0010;
const PRN: u8 = 0b0100_0111;
const HLT: u8 = 0b0000_0001;
const PUSH: u8 = 0b0100_0101;
const POP: u8 = 0b0100_0110;

/// Helper function to create a machine with a program loaded at address 0
fn setup_machine(program: &[u8]) -> Machine<FlatMemory, Vec<Output>> {
    let mut machine = Machine::new(Vec::new());
    machine.load(program).unwrap();
    machine
}

// ========== Basic Operation ==========

#[test]
fn test_push_writes_below_sp() {
    let mut machine = setup_machine(&[LDI, 0, 42, PUSH, 0, HLT]);

    machine.run();

    assert_eq!(machine.sp(), DEFAULT_STACK_TOP - 1);
    assert_eq!(machine.read_memory(0xF3), Ok(42));
    assert_eq!(machine.register(0), Ok(42));
}

#[test]
fn test_push_pop_round_trip() {
    let mut machine = setup_machine(&[LDI, 0, 42, PUSH, 0, LDI, 0, 0, POP, 1, HLT]);

    assert_eq!(machine.run(), LoopState::Halted);
    assert_eq!(machine.register(1), Ok(42));
    assert_eq!(machine.sp(), DEFAULT_STACK_TOP);
}

#[test]
fn test_stack_is_lifo() {
    // Push 1, 2, 3 then pop and print three times
    let program = [
        LDI, 0, 1, PUSH, 0, LDI, 0, 2, PUSH, 0, LDI, 0, 3, PUSH, 0, POP, 1, PRN, 1, POP, 1, PRN,
        1, POP, 1, PRN, 1, HLT,
    ];
    let mut machine = setup_machine(&program);

    assert_eq!(machine.run(), LoopState::Halted);
    assert_eq!(
        machine.output(),
        &vec![Output::Number(3), Output::Number(2), Output::Number(1)]
    );
    assert_eq!(machine.sp(), DEFAULT_STACK_TOP);
}

#[test]
fn test_push_pop_every_register() {
    for reg in 0..7u8 {
        let mut machine = setup_machine(&[LDI, reg, 0x5A, PUSH, reg, LDI, reg, 0, POP, reg, HLT]);
        assert_eq!(machine.run(), LoopState::Halted);
        assert_eq!(machine.register(reg as usize), Ok(0x5A), "R{}", reg);
        assert_eq!(machine.sp(), DEFAULT_STACK_TOP);
    }
}

// ========== R7 Operand ==========

#[test]
fn test_push_sp_stores_old_value() {
    let mut machine = setup_machine(&[PUSH, 7, HLT]);

    machine.run();

    assert_eq!(machine.read_memory(0xF3), Ok(DEFAULT_STACK_TOP));
    assert_eq!(machine.sp(), DEFAULT_STACK_TOP - 1);
}

#[test]
fn test_push_pop_sp_round_trip() {
    let mut machine = setup_machine(&[PUSH, 7, POP, 7, HLT]);

    assert_eq!(machine.run(), LoopState::Halted);
    assert_eq!(machine.sp(), DEFAULT_STACK_TOP);
}

#[test]
fn test_pop_into_sp_loads_sp() {
    // Push 0x80 and pop it into R7
    let mut machine = setup_machine(&[LDI, 0, 0x80, PUSH, 0, POP, 7, HLT]);

    assert_eq!(machine.run(), LoopState::Halted);
    assert_eq!(machine.register(SP), Ok(0x80));
}

// ========== Faults ==========

#[test]
fn test_pop_empty_stack_underflows() {
    let mut machine = setup_machine(&[LDI, 0, 9, POP, 0, HLT]);

    assert_eq!(machine.run(), LoopState::Faulted(FaultKind::StackUnderflow));
    assert_eq!(machine.register(0), Ok(9));
    assert_eq!(machine.sp(), DEFAULT_STACK_TOP);
    assert_eq!(machine.pc(), 3);
}

#[test]
fn test_push_at_address_zero_overflows() {
    let mut machine = setup_machine(&[LDI, 7, 0, PUSH, 0, HLT]);

    assert_eq!(machine.run(), LoopState::Faulted(FaultKind::StackOverflow));
    assert_eq!(machine.sp(), 0);
}

#[test]
fn test_stack_fills_down_to_address_zero() {
    // Small memory: program at the bottom, four bytes of stack above it
    let config = MachineConfig {
        memory_size: 16,
        stack_top: 16,
        cycle_budget: None,
    };
    let mut machine = Machine::with_config(config, Vec::new()).unwrap();
    machine.load(&[PUSH, 0, PUSH, 0, PUSH, 0, HLT]).unwrap();

    assert_eq!(machine.run(), LoopState::Halted);
    assert_eq!(machine.sp(), 13);
}

#[test]
fn test_push_overwrites_program_bytes() {
    // With SP at 3 the pushed byte lands on address 2, the next opcode
    let mut machine = setup_machine(&[PUSH, 0, HLT]);
    machine.set_register(SP, 3).unwrap();
    machine.set_register(0, 0b0000_0001).unwrap();

    assert_eq!(machine.run(), LoopState::Halted);
    assert_eq!(machine.read_memory(2), Ok(0b0000_0001));
}

#[test]
fn test_pop_invalid_register_does_not_move_sp() {
    let mut machine = setup_machine(&[PUSH, 0, POP, 9, HLT]);

    assert_eq!(machine.run(), LoopState::Faulted(FaultKind::OutOfBoundsAccess));
    assert_eq!(machine.sp(), DEFAULT_STACK_TOP - 1);
}

#[test]
fn test_push_invalid_register_faults() {
    let mut machine = setup_machine(&[PUSH, 8, HLT]);

    assert_eq!(machine.run(), LoopState::Faulted(FaultKind::OutOfBoundsAccess));
    assert_eq!(machine.sp(), DEFAULT_STACK_TOP);
}
