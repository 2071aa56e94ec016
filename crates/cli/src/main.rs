//! Trace-driven cache hierarchy simulator CLI.
//!
//! This binary wires the cache hierarchy core to the outside world. It performs:
//! 1. **Configuration:** Built-in defaults, an optional JSON file, then command-line overrides.
//! 2. **Replay:** Reads a trace file (or stdin) and issues one access per line.
//! 3. **Reporting:** Prints per-level statistics as text or JSON.

use std::io;
use std::path::PathBuf;
use std::{fs, process};

use clap::Parser;
use serde::Serialize;
use tracing_subscriber::EnvFilter;

use cachesim_core::config::CacheConfig;
use cachesim_core::sim::{self, ReplaySummary, TraceEntry};
use cachesim_core::{CacheHierarchy, HierarchyConfig, HierarchyStats};

#[derive(Parser, Debug)]
#[command(
    name = "cachesim",
    author,
    version,
    about = "Two-level cache hierarchy latency simulator",
    long_about = "Replay a memory trace through split L1 instruction/data caches backed by a unified L2.\n\nCache geometry is given as sets:ways:hit_time; zero sets disables an L1.\n\nExamples:\n  cachesim traces/gcc.trace\n  cachesim --icache 512:2:2 --dcache 256:4:2 --l2cache 4096:8:10 --inclusive traces/gcc.trace\n  zcat traces/mcf.trace.gz | cachesim --config hierarchy.json --json"
)]
struct Cli {
    /// Trace file; reads stdin when omitted or `-`.
    trace: Option<PathBuf>,

    /// JSON hierarchy configuration; command-line flags override its fields.
    #[arg(long)]
    config: Option<PathBuf>,

    /// L1 instruction cache geometry (sets:ways:hit_time).
    #[arg(long, value_name = "S:W:H")]
    icache: Option<CacheConfig>,

    /// L1 data cache geometry (sets:ways:hit_time).
    #[arg(long, value_name = "S:W:H")]
    dcache: Option<CacheConfig>,

    /// L2 cache geometry (sets:ways:hit_time).
    #[arg(long = "l2cache", value_name = "S:W:H")]
    l2cache: Option<CacheConfig>,

    /// Invalidate L1 copies of lines evicted from the L2.
    #[arg(long)]
    inclusive: bool,

    /// Line size in bytes, shared by every level.
    #[arg(long = "blocksize", value_name = "BYTES")]
    block_size: Option<u32>,

    /// Main-memory latency in cycles.
    #[arg(long = "memspeed", value_name = "CYCLES")]
    memory_latency: Option<u32>,

    /// Emit statistics as JSON instead of the text report.
    #[arg(long)]
    json: bool,
}

#[derive(Serialize)]
struct JsonReport<'a> {
    config: JsonConfig,
    replay: &'a ReplaySummary,
    stats: &'a HierarchyStats,
}

#[derive(Serialize)]
struct JsonConfig {
    icache: String,
    dcache: String,
    l2cache: String,
    inclusive: bool,
    block_size: u32,
    memory_latency: u32,
}

impl From<&HierarchyConfig> for JsonConfig {
    fn from(config: &HierarchyConfig) -> Self {
        Self {
            icache: config.icache.to_string(),
            dcache: config.dcache.to_string(),
            l2cache: config.l2.to_string(),
            inclusive: config.inclusive,
            block_size: config.block_size,
            memory_latency: config.memory_latency,
        }
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    if let Err(e) = run(&cli) {
        eprintln!("[!] {e}");
        process::exit(1);
    }
}

/// Builds the configuration: defaults, then the JSON file, then flags.
fn resolve_config(cli: &Cli) -> Result<HierarchyConfig, Box<dyn std::error::Error>> {
    let mut config = match &cli.config {
        Some(path) => {
            let json = fs::read_to_string(path)
                .map_err(|e| format!("could not read config '{}': {e}", path.display()))?;
            HierarchyConfig::from_json(&json)?
        }
        None => HierarchyConfig::default(),
    };

    if let Some(icache) = cli.icache {
        config.icache = icache;
    }
    if let Some(dcache) = cli.dcache {
        config.dcache = dcache;
    }
    if let Some(l2) = cli.l2cache {
        config.l2 = l2;
    }
    if cli.inclusive {
        config.inclusive = true;
    }
    if let Some(block_size) = cli.block_size {
        config.block_size = block_size;
    }
    if let Some(memory_latency) = cli.memory_latency {
        config.memory_latency = memory_latency;
    }
    Ok(config)
}

fn read_entries(trace: Option<&PathBuf>) -> Result<Vec<TraceEntry>, Box<dyn std::error::Error>> {
    let entries = match trace {
        Some(path) if path.as_os_str() != "-" => sim::load_trace(path)?,
        _ => sim::read_trace(io::stdin().lock())?,
    };
    Ok(entries)
}

fn run(cli: &Cli) -> Result<(), Box<dyn std::error::Error>> {
    let config = resolve_config(cli)?;
    let mut hierarchy = CacheHierarchy::new(&config)?;

    let entries = read_entries(cli.trace.as_ref())?;
    tracing::info!(accesses = entries.len(), "trace loaded");

    let summary = sim::replay(&mut hierarchy, entries);
    let stats = hierarchy.stats();

    if cli.json {
        let report = JsonReport {
            config: JsonConfig::from(&config),
            replay: &summary,
            stats: &stats,
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!(
            "accesses {} (I {} / D {}) | total_cycles {} | avg_latency {:.2}",
            summary.accesses(),
            summary.instructions,
            summary.data,
            summary.total_cycles,
            summary.avg_latency()
        );
        stats.print(&config);
    }
    Ok(())
}
