//! Run Program example
//!
//! Demonstrates embedding the interpreter in a host program.
//!
//! This example shows:
//! - Parsing `.ls8` text into bytes
//! - Collecting printed values with a closure sink
//! - Running to completion and inspecting the final state
//!
//! Run with: `cargo run --example run_program`

use ls8::{parse_program, FnSink, LoopState, Machine, Output};

const SOURCE: &str = "\
# Prints 1 through 5, then their sum
10000010 # LDI R0,0       ; counter
00000000
00000000
10000010 # LDI R1,0       ; sum
00000001
00000000
10000010 # LDI R2,5       ; limit
00000010
00000101
10000010 # LDI R3,LOOP
00000011
00001100
01100101 # LOOP: INC R0
00000000
01000111 # PRN R0
00000000
10100000 # ADD R1,R0
00000001
00000000
10100111 # CMP R0,R2
00000000
00000010
01010110 # JNE R3
00000011
01000111 # PRN R1
00000001
00000001 # HLT
";

fn main() {
    println!("LS-8 Interpreter - Run Program Example");
    println!("======================================\n");

    let program = match parse_program(SOURCE) {
        Ok(program) => program,
        Err(err) => {
            eprintln!("Parse error: {}", err);
            std::process::exit(1);
        }
    };
    println!("Parsed {} bytes\n", program.len());

    let mut printed = Vec::new();
    let state = {
        let mut machine = Machine::new(FnSink(|out: Output| printed.push(out)));
        if let Err(err) = machine.load(&program) {
            eprintln!("Load error: {}", err);
            std::process::exit(1);
        }
        machine.set_cycle_budget(Some(1_000));

        let state = machine.run();

        println!("Final state:");
        println!("------------");
        println!("  State:  {:?}", state);
        println!("  PC:     0x{:02X}", machine.pc());
        println!("  SP:     0x{:02X}", machine.sp());
        println!("  Flags:  {}", machine.flags());
        println!("  Cycles: {}", machine.cycles());
        for (index, value) in machine.registers().iter().enumerate() {
            println!("  R{}:     {}", index, value);
        }
        state
    };

    println!("\nPrinted values:");
    println!("---------------");
    for out in &printed {
        println!("  {}", out);
    }

    match state {
        LoopState::Halted => println!("\nProgram halted normally."),
        other => println!("\nProgram stopped early: {:?}", other),
    }
}
