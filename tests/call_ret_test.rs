//! Tests for CALL and RET.
//!
//! Tests cover:
//! - Return address placement on the stack
//! - Returning to the instruction after CALL
//! - Nested calls
//! - Faults from an empty stack or an unrepresentable return address

use ls8::{FaultKind, FlatMemory, LoopState, Machine, Output, DEFAULT_STACK_TOP};

const LDI: u8 = 0b1000_0010;
const PRN: u8 = 0b0100_0111;
const HLT: u8 = 0b0000_0001;
const CALL: u8 = 0b0101_0000;
const RET: u8 = 0b0001_0001;
const ADD: u8 = 0b1010_0000;

/// Helper function to create a machine with a program loaded at address 0
fn setup_machine(program: &[u8]) -> Machine<FlatMemory, Vec<Output>> {
    let mut machine = Machine::new(Vec::new());
    machine.load(program).unwrap();
    machine
}

#[test]
fn test_call_pushes_return_address() {
    // 0: LDI R1,10  3: CALL R1  5: HLT ... 10: RET
    let program = [LDI, 1, 10, CALL, 1, HLT, 0, 0, 0, 0, RET];
    let mut machine = setup_machine(&program);

    machine.step();
    assert_eq!(machine.step(), LoopState::Running);

    assert_eq!(machine.pc(), 10);
    assert_eq!(machine.sp(), DEFAULT_STACK_TOP - 1);
    assert_eq!(machine.read_memory(0xF3), Ok(5), "call site 3 plus two");
}

#[test]
fn test_call_ret_returns_after_call() {
    let program = [LDI, 1, 10, CALL, 1, HLT, 0, 0, 0, 0, RET];
    let mut machine = setup_machine(&program);

    machine.step();
    machine.step();
    assert_eq!(machine.step(), LoopState::Running);

    assert_eq!(machine.pc(), 5);
    assert_eq!(machine.sp(), DEFAULT_STACK_TOP);
    assert_eq!(machine.step(), LoopState::Halted);
}

#[test]
fn test_subroutine_computes_result() {
    // 0:  LDI R0,2
    // 3:  LDI R1,3
    // 6:  LDI R2,14
    // 9:  CALL R2
    // 11: PRN R0
    // 13: HLT
    // 14: ADD R0,R1
    // 17: RET
    let program = [
        LDI, 0, 2, LDI, 1, 3, LDI, 2, 14, CALL, 2, PRN, 0, HLT, ADD, 0, 1, RET,
    ];
    let mut machine = setup_machine(&program);

    assert_eq!(machine.run(), LoopState::Halted);
    assert_eq!(machine.output(), &vec![Output::Number(5)]);
    assert_eq!(machine.sp(), DEFAULT_STACK_TOP);
}

#[test]
fn test_nested_calls() {
    // 0:  LDI R1,9
    // 3:  CALL R1
    // 5:  PRN R0
    // 7:  HLT
    // 9:  LDI R2,20    ; outer subroutine
    // 12: CALL R2
    // 14: ADD R0,R0
    // 17: RET
    // 20: LDI R0,4     ; inner subroutine
    // 23: RET
    let mut program = vec![0u8; 24];
    program[0..8].copy_from_slice(&[LDI, 1, 9, CALL, 1, PRN, 0, HLT]);
    program[9..18].copy_from_slice(&[LDI, 2, 20, CALL, 2, ADD, 0, 0, RET]);
    program[20..24].copy_from_slice(&[LDI, 0, 4, RET]);

    let mut machine = setup_machine(&program);

    assert_eq!(machine.run(), LoopState::Halted);
    assert_eq!(machine.output(), &vec![Output::Number(8)]);
    assert_eq!(machine.sp(), DEFAULT_STACK_TOP);
}

#[test]
fn test_ret_on_empty_stack_underflows() {
    let mut machine = setup_machine(&[RET]);

    assert_eq!(machine.run(), LoopState::Faulted(FaultKind::StackUnderflow));
    assert_eq!(machine.pc(), 0);
}

#[test]
fn test_call_near_top_of_memory_faults() {
    // CALL at 254 would return to 256, which is not an address
    let mut machine = setup_machine(&[]);
    machine.write_memory(254, CALL).unwrap();
    machine.write_memory(255, 0).unwrap();
    machine.set_pc(254);

    assert_eq!(machine.run(), LoopState::Faulted(FaultKind::OutOfBoundsAccess));
    assert_eq!(machine.sp(), DEFAULT_STACK_TOP);
    assert_eq!(machine.pc(), 254);
}

#[test]
fn test_call_with_full_stack_overflows() {
    let mut machine = setup_machine(&[LDI, 7, 0, CALL, 0]);

    assert_eq!(machine.run(), LoopState::Faulted(FaultKind::StackOverflow));
    assert_eq!(machine.pc(), 3);
}
