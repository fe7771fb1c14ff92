//! Error types surfaced by adapter construction and best-effort operations.

use std::fmt;
use std::io;

/// Errors produced by this crate.
///
/// Construction errors (`InsufficientBudget`, `TooManyVariables`,
/// `OutOfMemory`) are fatal: an adapter either comes up with its pools sized
/// within the requested budget, or it does not come up at all.
/// Capability gaps, in contrast, are not represented here at runtime; an
/// engine that cannot quantify universally simply does not implement the
/// corresponding trait.
#[derive(Debug)]
pub enum Error {
    /// The megabyte budget is too small to allocate a usable node table for
    /// the engine, given the declared variable count.
    InsufficientBudget {
        engine: &'static str,
        budget_mb: u64,
        varcount: Option<usize>,
    },
    /// The engine cannot address the requested number of variables.
    TooManyVariables {
        engine: &'static str,
        requested: usize,
        max: usize,
    },
    /// The engine failed to allocate its initial variables or terminals.
    OutOfMemory { engine: &'static str },
    /// A best-effort operation (such as DOT export) is not offered by this
    /// engine.
    Unsupported {
        engine: &'static str,
        what: &'static str,
    },
    /// An I/O failure while writing an export stream.
    Io(io::Error),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InsufficientBudget { engine, budget_mb, varcount } => {
                write!(f, "budget of {} MiB is too small for engine '{}'", budget_mb, engine)?;
                if let Some(n) = varcount {
                    write!(f, " with {} variables", n)?;
                }
                Ok(())
            }
            Error::TooManyVariables { engine, requested, max } => {
                write!(
                    f,
                    "engine '{}' supports at most {} variables, {} requested",
                    engine, max, requested
                )
            }
            Error::OutOfMemory { engine } => {
                write!(f, "engine '{}' ran out of memory during initialization", engine)
            }
            Error::Unsupported { engine, what } => {
                write!(f, "engine '{}' does not support {}", engine, what)
            }
            Error::Io(e) => write!(f, "export failed: {}", e),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for Error {
    fn from(e: io::Error) -> Self {
        Error::Io(e)
    }
}
