//! Leveled, colored diagnostics on stderr for the runner.
//!
//! Program output goes to stdout; everything the runner itself has to say
//! (load failures, faults, traces) goes here so the two never interleave.

use std::fmt::Display;
use std::io::Write;
use std::sync::atomic::{AtomicBool, Ordering};
use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};

/// Log level for filtering messages.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Level {
    Trace = 0,
    Info = 1,
    Warn = 2,
    Error = 3,
}

impl Display for Level {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Level::Trace => write!(f, "TRACE"),
            Level::Info => write!(f, "INFO"),
            Level::Warn => write!(f, "WARN"),
            Level::Error => write!(f, "ERROR"),
        }
    }
}

/// When false, info-level messages are dropped.
pub static VERBOSE: AtomicBool = AtomicBool::new(false);

/// Internal logging function. Use the `trace!`, `info!`, `warn!`, or `error!` macros instead.
#[doc(hidden)]
pub fn log(level: Level, message: &str) {
    if level == Level::Info && !VERBOSE.load(Ordering::Relaxed) {
        return;
    }

    let mut stderr = StandardStream::stderr(ColorChoice::Auto);
    let mut spec = ColorSpec::new();
    match level {
        Level::Trace => {
            spec.set_fg(Some(Color::Cyan));
        }
        Level::Warn => {
            spec.set_fg(Some(Color::Yellow)).set_bold(true);
        }
        Level::Error => {
            spec.set_fg(Some(Color::Red)).set_bold(true);
        }
        Level::Info => {
            spec.clear();
        }
    }
    let _ = stderr.set_color(&spec);

    // Trace lines already carry their own `TRACE:` prefix
    if level != Level::Trace {
        let _ = write!(stderr, "[{:5}] ", level);
    }
    let _ = writeln!(stderr, "{}", message);
    let _ = stderr.reset();
}

/// Logs a trace line verbatim.
macro_rules! trace {
    ($($arg:tt)*) => {{
        $crate::log::log($crate::log::Level::Trace, &format!($($arg)*))
    }};
}

/// Logs an info-level message (shown with `--verbose`).
macro_rules! info {
    ($($arg:tt)*) => {{
        $crate::log::log($crate::log::Level::Info, &format!($($arg)*))
    }};
}

/// Logs a warning-level message.
macro_rules! warn {
    ($($arg:tt)*) => {{
        $crate::log::log($crate::log::Level::Warn, &format!($($arg)*))
    }};
}

/// Logs an error-level message.
macro_rules! error {
    ($($arg:tt)*) => {{
        $crate::log::log($crate::log::Level::Error, &format!($($arg)*))
    }};
}
