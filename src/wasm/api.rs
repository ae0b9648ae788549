//! WASM API for the LS-8 machine.
//!
//! Provides JavaScript-callable interfaces for loading `.ls8` programs,
//! stepping and running the machine, inspecting state, and disassembly.

use crate::{
    disassemble, parse_program, FlatMemory, LoopState, Machine, MachineConfig, Output,
};
use wasm_bindgen::prelude::*;

/// JavaScript-compatible error wrapper
#[wasm_bindgen]
#[derive(Debug, Clone)]
pub struct JsError {
    message: String,
}

#[wasm_bindgen]
impl JsError {
    #[wasm_bindgen(constructor)]
    pub fn new(message: &str) -> JsError {
        JsError {
            message: message.to_string(),
        }
    }

    #[wasm_bindgen(getter)]
    pub fn message(&self) -> String {
        self.message.clone()
    }
}

/// One line of a disassembly listing
#[wasm_bindgen]
#[derive(Debug, Clone)]
pub struct ListingLine {
    address: usize,
    bytes: Vec<u8>,
    text: String,
}

#[wasm_bindgen]
impl ListingLine {
    #[wasm_bindgen(getter)]
    pub fn address(&self) -> usize {
        self.address
    }

    #[wasm_bindgen(getter)]
    pub fn bytes(&self) -> Vec<u8> {
        self.bytes.clone()
    }

    #[wasm_bindgen(getter)]
    pub fn text(&self) -> String {
        self.text.clone()
    }
}

/// Loop state as a string for JavaScript: "running", "halted",
/// "budget-exceeded", or "fault: <kind>".
fn state_name(state: LoopState) -> String {
    match state {
        LoopState::Running => "running".to_string(),
        LoopState::Halted => "halted".to_string(),
        LoopState::CycleBudgetExceeded => "budget-exceeded".to_string(),
        LoopState::Faulted(kind) => format!("fault: {}", kind),
    }
}

/// Main emulator interface for JavaScript
#[wasm_bindgen]
pub struct Ls8Emulator {
    machine: Machine<FlatMemory, Vec<Output>>,
}

#[wasm_bindgen]
impl Ls8Emulator {
    /// Create a machine with 256 bytes of memory
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        Ls8Emulator {
            machine: Machine::new(Vec::new()),
        }
    }

    /// Create a machine with a custom memory size and stack top
    pub fn with_memory_size(memory_size: usize, stack_top: u8) -> Result<Ls8Emulator, JsError> {
        let config = MachineConfig {
            memory_size,
            stack_top,
            cycle_budget: None,
        };
        Machine::with_config(config, Vec::new())
            .map(|machine| Ls8Emulator { machine })
            .map_err(|e| JsError::new(&e.to_string()))
    }

    /// Parse `.ls8` source text and load it at address 0, returning its size
    pub fn load_source(&mut self, source: String) -> Result<usize, JsError> {
        let program = parse_program(&source).map_err(|e| JsError::new(&e.to_string()))?;
        self.load_bytes(&program)?;
        Ok(program.len())
    }

    /// Load raw bytes at address 0
    pub fn load_bytes(&mut self, program: &[u8]) -> Result<(), JsError> {
        self.machine
            .load(program)
            .map_err(|e| JsError::new(&e.to_string()))
    }

    /// Execute a single instruction
    pub fn step(&mut self) -> String {
        state_name(self.machine.step())
    }

    /// Run until halt, fault, or `max_cycles` more instructions
    pub fn run(&mut self, max_cycles: u32) -> String {
        let budget = self.machine.cycles() + max_cycles as u64;
        self.machine.set_cycle_budget(Some(budget));
        let state = self.machine.run();
        self.machine.set_cycle_budget(None);
        state_name(state)
    }

    /// Call `on_trace` with a `TRACE: ...` line before every instruction
    pub fn set_trace_callback(&mut self, on_trace: js_sys::Function) {
        self.machine.set_trace_hook(move |record| {
            let _ = on_trace.call1(&JsValue::NULL, &JsValue::from_str(&record.to_string()));
        });
    }

    /// Stop calling the trace callback
    pub fn clear_trace_callback(&mut self) {
        self.machine.clear_trace_hook();
    }

    /// Reset registers and PC, keeping memory
    pub fn reset(&mut self) {
        self.machine.reset();
        self.machine.output_mut().clear();
    }

    #[wasm_bindgen(getter)]
    pub fn state(&self) -> String {
        state_name(self.machine.state())
    }

    #[wasm_bindgen(getter)]
    pub fn pc(&self) -> usize {
        self.machine.pc()
    }

    #[wasm_bindgen(getter)]
    pub fn sp(&self) -> u8 {
        self.machine.sp()
    }

    /// Flags register bits (00000LGE)
    #[wasm_bindgen(getter)]
    pub fn flags(&self) -> u8 {
        self.machine.flags().bits()
    }

    #[wasm_bindgen(getter)]
    pub fn cycles(&self) -> f64 {
        self.machine.cycles() as f64 // Convert u64 to f64 for JavaScript
    }

    /// R0-R7
    pub fn registers(&self) -> Vec<u8> {
        self.machine.registers().to_vec()
    }

    pub fn read_memory(&self, addr: usize) -> Result<u8, JsError> {
        self.machine
            .read_memory(addr)
            .map_err(|e| JsError::new(&e.to_string()))
    }

    pub fn write_memory(&mut self, addr: usize, value: u8) -> Result<(), JsError> {
        self.machine
            .write_memory(addr, value)
            .map_err(|e| JsError::new(&e.to_string()))
    }

    /// Whole memory, for display
    pub fn memory(&self) -> Vec<u8> {
        self.machine.memory().as_slice().to_vec()
    }

    /// Drain printed output as terminal text
    pub fn take_output(&mut self) -> String {
        let mut text = String::new();
        for out in self.machine.output_mut().drain(..) {
            match out {
                Output::Number(_) => {
                    text.push_str(&out.to_string());
                    text.push('\n');
                }
                Output::Char(_) => text.push_str(&out.to_string()),
            }
        }
        text
    }

    /// Disassemble the whole memory
    pub fn disassemble(&self) -> Vec<JsValue> {
        disassemble(self.machine.memory().as_slice())
            .into_iter()
            .map(|line| {
                JsValue::from(ListingLine {
                    address: line.address,
                    text: line.text(),
                    bytes: line.bytes,
                })
            })
            .collect()
    }
}

impl Default for Ls8Emulator {
    fn default() -> Self {
        Self::new()
    }
}
