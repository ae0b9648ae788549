//! Command-line runner for LS-8 programs.
//!
//! ```text
//! ls8 programs/mult.ls8
//! ls8 --trace --max-cycles 1000 programs/call.ls8
//! ls8 --disassemble programs/stack.ls8
//! ```
//!
//! Exit status: 0 when the program halts, the fault's code (10-15) when it
//! faults, 3 when `--max-cycles` runs out, 2 when the program cannot be
//! loaded.

#[macro_use]
mod log;

use anyhow::Context;
use clap::Parser;
use ls8::{
    disassemble, load_program_file, LoopState, Machine, MachineConfig, WriterSink,
    DEFAULT_MEMORY_SIZE, DEFAULT_STACK_TOP,
};
use std::io;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::atomic::Ordering;

/// Program could not be loaded or the machine could not be set up.
const EXIT_SETUP_FAILURE: u8 = 2;

/// `--max-cycles` ran out before the program halted.
const EXIT_BUDGET_EXCEEDED: u8 = 3;

#[derive(Parser, Debug)]
#[command(name = "ls8", version, about = "Run an LS-8 program")]
struct Args {
    /// Program file: one binary byte per line, `#` starts a comment
    program: PathBuf,

    /// Print a trace line to stderr before every instruction
    #[arg(long)]
    trace: bool,

    /// Print a disassembly listing instead of running the program
    #[arg(long)]
    disassemble: bool,

    /// Stop after this many instructions
    #[arg(long, value_name = "N")]
    max_cycles: Option<u64>,

    /// Memory size in bytes (1-256)
    #[arg(long, value_name = "BYTES", default_value_t = DEFAULT_MEMORY_SIZE)]
    memory_size: usize,

    /// Initial stack pointer; accepts decimal, 0x.. or 0b..
    #[arg(long, value_name = "ADDR", default_value_t = DEFAULT_STACK_TOP, value_parser = parse_byte)]
    stack_top: u8,

    /// Report progress on stderr
    #[arg(short, long)]
    verbose: bool,
}

fn parse_byte(text: &str) -> Result<u8, String> {
    let parsed = if let Some(hex) = text.strip_prefix("0x") {
        u8::from_str_radix(hex, 16)
    } else if let Some(bin) = text.strip_prefix("0b") {
        u8::from_str_radix(bin, 2)
    } else {
        text.parse()
    };
    parsed.map_err(|e| format!("`{}` is not a byte value: {}", text, e))
}

fn main() -> ExitCode {
    let args = Args::parse();
    log::VERBOSE.store(args.verbose, Ordering::Relaxed);

    match run(&args) {
        Ok(code) => ExitCode::from(code),
        Err(err) => {
            error!("{:#}", err);
            ExitCode::from(EXIT_SETUP_FAILURE)
        }
    }
}

fn run(args: &Args) -> anyhow::Result<u8> {
    let program = load_program_file(&args.program)?;
    info!(
        "loaded {} bytes from {}",
        program.len(),
        args.program.display()
    );

    if args.disassemble {
        for line in disassemble(&program) {
            println!("{}", line);
        }
        return Ok(0);
    }

    let config = MachineConfig {
        memory_size: args.memory_size,
        stack_top: args.stack_top,
        cycle_budget: args.max_cycles,
    };
    let sink = WriterSink::new(io::stdout().lock());
    let mut machine = Machine::with_config(config, sink).context("invalid machine configuration")?;
    machine
        .load(&program)
        .with_context(|| format!("cannot load {}", args.program.display()))?;

    if args.trace {
        machine.set_trace_hook(|record| trace!("{}", record));
    }

    let state = machine.run();
    let pc = machine.pc();
    let cycles = machine.cycles();

    let (_, mut sink) = machine.into_parts();
    sink.flush().context("cannot write program output")?;

    let code = match state {
        LoopState::Halted => {
            info!("halted after {} cycles", cycles);
            0
        }
        LoopState::Faulted(kind) => {
            error!("{} at PC {:#04X} after {} cycles", kind, pc, cycles);
            kind.exit_code()
        }
        LoopState::CycleBudgetExceeded => {
            warn!("stopped at PC {:#04X} after {} cycles", pc, cycles);
            EXIT_BUDGET_EXCEEDED
        }
        LoopState::Running => unreachable!("run() returns only once the machine stops"),
    };

    Ok(code)
}
