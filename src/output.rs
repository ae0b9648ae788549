//! # Output Sinks
//!
//! `PRN` and `PRA` hand their values to an [`OutputSink`] owned by the machine.
//! The machine never touches stdout, so a host decides where output goes:
//! into a `Vec` for tests, onto a writer for a terminal, or through a closure.

use std::fmt;
use std::io::{self, Write};

/// A value printed by the program.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Output {
    /// From `PRN`: a number rendered in decimal.
    Number(u8),

    /// From `PRA`: a raw byte rendered as a character.
    Char(u8),
}

impl fmt::Display for Output {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Output::Number(value) => write!(f, "{}", value),
            Output::Char(byte) => write!(f, "{}", *byte as char),
        }
    }
}

/// Consumer of printed values.
pub trait OutputSink {
    /// Receives one printed value.
    fn emit(&mut self, output: Output);
}

/// Collects every value in order.
impl OutputSink for Vec<Output> {
    fn emit(&mut self, output: Output) {
        self.push(output);
    }
}

impl<S: OutputSink + ?Sized> OutputSink for &mut S {
    fn emit(&mut self, output: Output) {
        (**self).emit(output);
    }
}

/// Discards everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl OutputSink for NullSink {
    fn emit(&mut self, _output: Output) {}
}

/// Forwards every value to a closure.
///
/// # Examples
///
/// ```
/// use ls8::{FnSink, Output, OutputSink};
///
/// let mut total = 0u32;
/// let mut sink = FnSink(|out| {
///     if let Output::Number(n) = out {
///         total += n as u32;
///     }
/// });
/// sink.emit(Output::Number(2));
/// sink.emit(Output::Number(3));
/// drop(sink);
/// assert_eq!(total, 5);
/// ```
pub struct FnSink<F: FnMut(Output)>(pub F);

impl<F: FnMut(Output)> OutputSink for FnSink<F> {
    fn emit(&mut self, output: Output) {
        (self.0)(output);
    }
}

/// Writes values to an [`io::Write`] the way a terminal expects them:
/// numbers one per line, characters as raw bytes.
///
/// Emitting cannot fail, so the first I/O error is kept and later writes are
/// skipped; check it with [`WriterSink::take_error`] once the run is over.
pub struct WriterSink<W: Write> {
    writer: W,
    error: Option<io::Error>,
}

impl<W: Write> WriterSink<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            error: None,
        }
    }

    /// Returns the first write error, if any occurred.
    pub fn take_error(&mut self) -> Option<io::Error> {
        self.error.take()
    }

    /// Flushes the writer, reporting a stored error first.
    pub fn flush(&mut self) -> io::Result<()> {
        if let Some(err) = self.error.take() {
            return Err(err);
        }
        self.writer.flush()
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> OutputSink for WriterSink<W> {
    fn emit(&mut self, output: Output) {
        if self.error.is_some() {
            return;
        }
        let result = match output {
            Output::Number(value) => writeln!(self.writer, "{}", value),
            Output::Char(byte) => self.writer.write_all(&[byte]),
        };
        if let Err(err) = result {
            self.error = Some(err);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vec_sink_collects_in_order() {
        let mut sink = Vec::new();
        sink.emit(Output::Number(8));
        sink.emit(Output::Char(b'A'));
        assert_eq!(sink, vec![Output::Number(8), Output::Char(b'A')]);
    }

    #[test]
    fn test_writer_sink_format() {
        let mut sink = WriterSink::new(Vec::new());
        sink.emit(Output::Number(17));
        sink.emit(Output::Char(b'h'));
        sink.emit(Output::Char(b'i'));
        sink.emit(Output::Char(b'\n'));
        assert!(sink.take_error().is_none());
        assert_eq!(sink.into_inner(), b"17\nhi\n");
    }

    #[test]
    fn test_writer_sink_keeps_first_error() {
        struct Broken;
        impl Write for Broken {
            fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
                Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
            }
            fn flush(&mut self) -> io::Result<()> {
                Ok(())
            }
        }

        let mut sink = WriterSink::new(Broken);
        sink.emit(Output::Number(1));
        sink.emit(Output::Number(2));
        let err = sink.take_error().expect("error should be recorded");
        assert_eq!(err.kind(), io::ErrorKind::BrokenPipe);
        assert!(sink.take_error().is_none());
    }

    #[test]
    fn test_output_display() {
        assert_eq!(Output::Number(255).to_string(), "255");
        assert_eq!(Output::Char(b'Z').to_string(), "Z");
    }
}
