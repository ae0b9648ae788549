//! Program loader for the textual `.ls8` format.
//!
//! An `.ls8` file holds one byte per line written as a binary literal.
//! Everything after a `#` is a comment, and lines that are empty once the
//! comment and surrounding whitespace are stripped are skipped:
//!
//! ```text
//! # print8.ls8
//! 10000010 # LDI R0,8
//! 00000000
//! 00001000
//! 01000111 # PRN R0
//! 00000000
//! 00000001 # HLT
//! ```

use crate::LoadError;
use std::path::Path;
use thiserror::Error;

/// A line of program text that is not a valid byte.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("line {line}: {kind}")]
pub struct ParseError {
    /// Line number, starting at 1.
    pub line: usize,

    pub kind: ParseErrorKind,
}

/// Why a line was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseErrorKind {
    /// The text contains characters other than `0` and `1`.
    #[error("`{0}` is not a binary literal")]
    InvalidLiteral(String),

    /// The literal's value is above 255.
    #[error("`{0}` does not fit in a byte")]
    ValueTooLarge(String),
}

/// Parses program text into bytes.
///
/// An optional `0b` prefix and `_` digit separators are accepted.
///
/// # Errors
///
/// The first offending line, as a [`ParseError`].
///
/// # Examples
///
/// ```
/// use ls8::{parse_program, ParseErrorKind};
///
/// let bytes = parse_program("# header\n\n10000010 # LDI\n0b0000_0001\n").unwrap();
/// assert_eq!(bytes, vec![0b1000_0010, 0b0000_0001]);
///
/// let err = parse_program("00000001\n2\n").unwrap_err();
/// assert_eq!(err.line, 2);
/// assert_eq!(err.kind, ParseErrorKind::InvalidLiteral("2".to_string()));
/// ```
pub fn parse_program(source: &str) -> Result<Vec<u8>, ParseError> {
    let mut bytes = Vec::new();

    for (index, raw_line) in source.lines().enumerate() {
        let text = strip_comment(raw_line).trim();
        if text.is_empty() {
            continue;
        }

        let byte = parse_literal(text).map_err(|kind| ParseError {
            line: index + 1,
            kind,
        })?;
        bytes.push(byte);
    }

    Ok(bytes)
}

/// Reads and parses a program file.
///
/// # Errors
///
/// [`LoadError::Io`] if the file cannot be read, [`LoadError::Parse`] if its
/// contents are not a valid program.
pub fn load_program_file(path: impl AsRef<Path>) -> Result<Vec<u8>, LoadError> {
    let path = path.as_ref();
    let source = std::fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(parse_program(&source)?)
}

fn strip_comment(line: &str) -> &str {
    match line.find('#') {
        Some(pos) => &line[..pos],
        None => line,
    }
}

fn parse_literal(text: &str) -> Result<u8, ParseErrorKind> {
    let digits: String = text
        .strip_prefix("0b")
        .unwrap_or(text)
        .chars()
        .filter(|&c| c != '_')
        .collect();

    if digits.is_empty() || !digits.chars().all(|c| c == '0' || c == '1') {
        return Err(ParseErrorKind::InvalidLiteral(text.to_string()));
    }

    let significant = digits.trim_start_matches('0');
    if significant.is_empty() {
        return Ok(0);
    }
    u8::from_str_radix(significant, 2).map_err(|_| ParseErrorKind::ValueTooLarge(text.to_string()))
}
