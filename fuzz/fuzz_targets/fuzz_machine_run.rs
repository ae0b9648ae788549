//! Fuzz target for the execution loop.
//!
//! This target creates arbitrary machine states and memory contents, then
//! runs under a cycle budget to find panics and broken invariants.

#![no_main]

use arbitrary::Arbitrary;
use ls8::{FlatMemory, LoopState, Machine, Output, REGISTER_COUNT};
use libfuzzer_sys::fuzz_target;

/// Arbitrary machine initial state for fuzzing
#[derive(Debug, Arbitrary)]
struct FuzzMachineState {
    /// R0-R7, including the stack pointer
    registers: [u8; REGISTER_COUNT],
    /// Starting program counter
    pc: u8,
    /// Memory size; mapped into 1..=256
    memory_size: u8,
    /// Instructions to run before giving up
    budget: u16,
}

/// Complete fuzz input
#[derive(Debug, Arbitrary)]
struct FuzzInput {
    state: FuzzMachineState,
    memory: Vec<u8>,
}

fuzz_target!(|input: FuzzInput| {
    let size = input.state.memory_size as usize + 1;
    let mut machine = Machine::with_memory(FlatMemory::with_size(size), Vec::<Output>::new());

    let program = &input.memory[..input.memory.len().min(size)];
    machine.load(program).unwrap();

    for (index, &value) in input.state.registers.iter().enumerate() {
        machine.set_register(index, value).unwrap();
    }
    machine.set_pc(input.state.pc as usize);
    machine.set_cycle_budget(Some(input.state.budget as u64));

    // Faults are expected; panics are not
    let state = machine.run();

    assert_ne!(state, LoopState::Running);
    assert!(machine.cycles() <= input.state.budget as u64);
    assert!(machine.output().len() as u64 <= machine.cycles());
    if state.is_terminal() {
        let cycles = machine.cycles();
        assert_eq!(machine.step(), state);
        assert_eq!(machine.cycles(), cycles);
    }
});
