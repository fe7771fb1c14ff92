//! Uniform, read-only statistics reporting across engines.

use std::fmt;

/// One engine-internal counter. `None` means the engine cannot report it
/// (for example because the native counter is compiled out); the renderer
/// prints it as unavailable instead of dropping the line.
#[derive(Debug, Clone)]
pub struct Counter {
    pub name: &'static str,
    pub value: Option<u64>,
}

impl Counter {
    pub fn new(name: &'static str, value: u64) -> Self {
        Counter { name, value: Some(value) }
    }

    pub fn unavailable(name: &'static str) -> Self {
        Counter { name, value: None }
    }
}

/// Snapshot of one adapter's introspection data.
///
/// The text rendering is human-readable only; no structured schema is
/// guaranteed across adapters.
#[derive(Debug, Clone)]
pub struct StatsReport {
    pub engine: &'static str,
    pub varcount: usize,
    /// Live node-table population, where the engine has a shared table.
    pub allocated_nodes: Option<usize>,
    pub counters: Vec<Counter>,
}

impl fmt::Display for StatsReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "[{}] {} variables", self.engine, self.varcount)?;
        match self.allocated_nodes {
            Some(n) => writeln!(f, "  allocated nodes: {}", n)?,
            None => writeln!(f, "  allocated nodes: unavailable")?,
        }
        for counter in &self.counters {
            match counter.value {
                Some(v) => writeln!(f, "  {}: {}", counter.name, v)?,
                None => writeln!(f, "  {}: unavailable", counter.name)?,
            }
        }
        Ok(())
    }
}
