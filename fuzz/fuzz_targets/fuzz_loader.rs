//! Fuzz target for the `.ls8` text parser and the disassembler.
//!
//! Any text must either parse or report a line inside the input, and whatever
//! parses must disassemble back into exactly the same bytes.

#![no_main]

use libfuzzer_sys::fuzz_target;
use ls8::{disassemble, parse_program};

fuzz_target!(|source: &str| {
    match parse_program(source) {
        Ok(bytes) => {
            let listing = disassemble(&bytes);
            let rebuilt: Vec<u8> = listing.iter().flat_map(|line| line.bytes.clone()).collect();
            assert_eq!(rebuilt, bytes);
        }
        Err(err) => {
            assert!(err.line >= 1);
            assert!(err.line <= source.lines().count());
        }
    }
});
