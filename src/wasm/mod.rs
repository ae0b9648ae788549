//! WebAssembly bindings for the LS-8 machine.
//!
//! This module provides JavaScript-callable interfaces to the interpreter,
//! enabling browser-based execution of `.ls8` programs.

#[cfg(feature = "wasm")]
pub mod api;

#[cfg(feature = "wasm")]
pub use api::Ls8Emulator;
