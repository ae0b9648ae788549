//! # LS-8 Instruction Implementations
//!
//! This module contains the handlers for every LS-8 instruction, organized by
//! category. Each handler is a standalone function taking the machine by
//! exclusive reference plus the fetched operand bytes, and returns
//! `Err(FaultKind)` on a fatal condition. Handlers never advance PC for
//! ordinary instructions; the execution loop does that.
//!
//! ## Categories
//!
//! - **alu**: Arithmetic, logic and compare (ADD, SUB, MUL, DIV, MOD, INC, DEC,
//!   AND, OR, XOR, NOT, SHL, SHR, CMP)
//! - **control**: Instructions that set PC (CALL, RET, JMP, JEQ, JNE, JGT, JLT,
//!   JLE, JGE)
//! - **stack**: PUSH and POP, plus the push/pop primitives CALL and RET share
//! - **load_store**: Register and memory loads (LDI, LD, ST)
//! - **io**: Output to the machine's sink (PRN, PRA)

pub mod alu;
pub mod control;
pub mod io;
pub mod load_store;
pub mod stack;
