//! Driver: select an engine adapter by name, run one workload on it.

use std::fs::File;
use std::path::PathBuf;
use std::time::Instant;

use clap::{Parser, Subcommand, ValueEnum};
use color_eyre::eyre::{eyre, Result};
use log::LevelFilter;
use simplelog::{ColorChoice, Config, TermLogger, TerminalMode};

#[cfg(feature = "cudd")]
use bdd_bench::adapters::Cudd;
use bdd_bench::adapters::{LibBdd, OxiddBcdd, OxiddBdd};
use bdd_bench::engine::Engine;
use bdd_bench::workload::{self, Lit};

#[derive(Debug, Parser)]
#[command(version, about = "Run one symbolic workload on a chosen BDD engine")]
struct Cli {
    /// Engine adapter to benchmark
    #[arg(value_enum, short, long)]
    engine: EngineKind,

    /// Memory budget for the engine, in MiB
    #[arg(long, default_value_t = 128)]
    mb: u64,

    /// Number of variables; defaults to what the workload needs
    #[arg(long)]
    vars: Option<usize>,

    /// Worker threads for engines with an internal task runtime
    #[arg(long, default_value_t = 1)]
    threads: u32,

    /// Print engine statistics after the run
    #[arg(long)]
    stats: bool,

    /// Export the final diagram to a DOT file (best effort)
    #[arg(long)]
    dot: Option<PathBuf>,

    #[command(subcommand)]
    workload: Workload,
}

#[derive(Debug, Clone, Subcommand)]
enum Workload {
    /// Build the N-Queens placement function over n*n variables
    Queens {
        #[arg(short, default_value_t = 6)]
        n: usize,
    },
    /// Conjoin clauses given as DIMACS-style literal lists, e.g. "1 -2 3"
    Cnf { clauses: Vec<String> },
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, ValueEnum)]
enum EngineKind {
    OxiddBdd,
    OxiddBcdd,
    LibBdd,
    #[cfg(feature = "cudd")]
    Cudd,
}

fn main() -> Result<()> {
    color_eyre::install()?;
    TermLogger::init(
        LevelFilter::Info,
        Config::default(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    )?;

    let cli = Cli::parse();

    let clauses = match &cli.workload {
        Workload::Cnf { clauses } => parse_clauses(clauses)?,
        _ => Vec::new(),
    };
    let varcount = match (&cli.vars, &cli.workload) {
        (Some(v), _) => *v,
        (None, Workload::Queens { n }) => n * n,
        (None, Workload::Cnf { .. }) => {
            1 + clauses.iter().flatten().map(|&(label, _)| label).max().unwrap_or(0)
        }
    };

    match cli.engine {
        EngineKind::OxiddBdd => {
            run(&cli, OxiddBdd::with_threads(cli.mb, varcount, cli.threads)?, &clauses)
        }
        EngineKind::OxiddBcdd => {
            run(&cli, OxiddBcdd::with_threads(cli.mb, varcount, cli.threads)?, &clauses)
        }
        EngineKind::LibBdd => run(&cli, LibBdd::new(cli.mb, varcount)?, &clauses),
        #[cfg(feature = "cudd")]
        EngineKind::Cudd => run(&cli, Cudd::new(cli.mb, varcount)?, &clauses),
    }
}

fn run<E: Engine>(cli: &Cli, engine: E, clauses: &[Vec<Lit>]) -> Result<()> {
    let start = Instant::now();
    let result = match &cli.workload {
        Workload::Queens { n } => workload::queens(&engine, *n),
        Workload::Cnf { .. } => workload::cnf(&engine, clauses),
    };
    let elapsed = start.elapsed();

    log::info!("[{}] built in {:.2} ms", E::NAME, elapsed.as_secs_f64() * 1000.0);
    log::info!("[{}] result nodes: {}", E::NAME, engine.nodecount(&result));
    log::info!("[{}] satisfying assignments: {}", E::NAME, engine.satcount(&result));
    if let Some(nodes) = engine.allocated_nodes() {
        log::info!("[{}] allocated nodes: {}", E::NAME, nodes);
    }

    if let Some(path) = &cli.dot {
        let mut file = File::create(path)?;
        match engine.export_dot(&result, &mut file) {
            Ok(()) => log::info!("[{}] DOT written to {}", E::NAME, path.display()),
            Err(e) => log::warn!("[{}] {}", E::NAME, e),
        }
    }

    if cli.stats {
        engine.print_stats();
    }

    Ok(())
}

/// Parse DIMACS-flavored clause strings: 1-indexed variables, negative for
/// negated literals.
fn parse_clauses(clauses: &[String]) -> Result<Vec<Vec<Lit>>> {
    clauses
        .iter()
        .map(|clause| {
            clause
                .split_whitespace()
                .map(|tok| {
                    let lit: i64 = tok
                        .parse()
                        .map_err(|_| eyre!("invalid literal '{}' in clause '{}'", tok, clause))?;
                    if lit == 0 {
                        return Err(eyre!("literal 0 is reserved in clause '{}'", clause));
                    }
                    Ok(((lit.unsigned_abs() - 1) as usize, lit > 0))
                })
                .collect()
        })
        .collect()
}
