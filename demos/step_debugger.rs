//! Step Debugger example
//!
//! Single-steps a program the way a debugger front end would: show the
//! listing, then execute one instruction at a time and print the state
//! between steps.
//!
//! Run with: `cargo run --example step_debugger [program.ls8]`
//! Defaults to `programs/call.ls8`.

use ls8::{disassemble, load_program_file, LoopState, Machine, Output};
use std::collections::HashMap;

fn main() {
    let path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| format!("{}/programs/call.ls8", env!("CARGO_MANIFEST_DIR")));

    let program = match load_program_file(&path) {
        Ok(program) => program,
        Err(err) => {
            eprintln!("{}", err);
            std::process::exit(1);
        }
    };

    println!("Listing of {}:", path);
    println!("----------");
    let listing = disassemble(&program);
    for line in &listing {
        println!("  {}", line);
    }
    let text_at: HashMap<usize, String> = listing
        .iter()
        .map(|line| (line.address, line.text()))
        .collect();

    let mut machine = Machine::new(Vec::<Output>::new());
    if let Err(err) = machine.load(&program) {
        eprintln!("{}", err);
        std::process::exit(1);
    }
    machine.set_cycle_budget(Some(500));

    println!("\nStepping:");
    println!("---------");
    println!("  {:>5}  {:>4}  {:<12}  {:<23}  FL   SP", "cycle", "PC", "instruction", "R0-R6");

    loop {
        let pc = machine.pc();
        let instruction = text_at.get(&pc).cloned().unwrap_or_else(|| "??".to_string());
        let printed_before = machine.output().len();

        let state = machine.step();

        let registers: Vec<String> = machine.registers()[..7]
            .iter()
            .map(|r| format!("{:02X}", r))
            .collect();
        println!(
            "  {:>5}  0x{:02X}  {:<12}  {:<23}  {}  {:02X}",
            machine.cycles(),
            pc,
            instruction,
            registers.join(" "),
            machine.flags(),
            machine.sp()
        );
        for out in &machine.output()[printed_before..] {
            println!("         -> printed {}", out);
        }

        match state {
            LoopState::Running => continue,
            LoopState::Halted => {
                println!("\nHalted after {} cycles", machine.cycles());
                break;
            }
            LoopState::Faulted(kind) => {
                println!("\nFault: {} at PC 0x{:02X}", kind, machine.pc());
                break;
            }
            LoopState::CycleBudgetExceeded => {
                println!("\nGave up after {} cycles", machine.cycles());
                break;
            }
        }
    }
}
