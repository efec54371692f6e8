//! knuth: the single-car elevator from TAOCP §2.2.5, run to completion.
//!
//! By default the built-in passenger table is simulated and every dispatched
//! step is traced to stdout.  `RUST_LOG=debug` adds the controller's
//! narration on stderr.  `knuth --help` lists the options.

use std::fs::File;
use std::io::{self, BufReader, BufWriter, Cursor};
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use log::info;

use lift_core::{SimConfig, SimRng};
use lift_schedule::{
    ManifestSpec, PassengerManifest, generate_manifest, load_manifest_csv, load_manifest_reader,
};
use lift_sim::{NoopObserver, Sim, SimBuilder, SimError, SimStats};
use lift_trace::TraceWriter;

// ── Exit statuses ─────────────────────────────────────────────────────────────

const EXIT_FAILURE:  u8 = 1;
const EXIT_USAGE:    u8 = 2;
const EXIT_CAPACITY: u8 = 3;

// ── Built-in passenger table ──────────────────────────────────────────────────

// Patience is relative to arrival.  User 16 wants the floor they are already
// on and is dropped on arrival.
const KNUTH_CSV: &str = "\
origin,destination,arrival,patience,name\n\
0,2,0,152,User 1\n\
4,1,38,1000,User 2\n\
2,1,136,1000,User 3\n\
2,1,141,1000,User 4\n\
3,1,291,1000,User 5\n\
2,1,364,176,User 6\n\
1,2,602,1000,User 7\n\
1,0,827,1000,User 8\n\
1,3,876,1000,User 9\n\
0,4,1048,1000,User 10\n\
2,2,4384,1000,User 16\n\
2,3,4384,1000,User 17\n\
3,2,5100,1000,User 18\n\
3,1,5700,1000,User 19\n\
2,0,5710,1000,User 20\n\
3,1,7000,1000,User 21\n\
1,3,7000,350,User 22\n\
3,2,7620,1000,User 23\n\
0,0,9999,1000,DUMMY\n\
";

// ── Command line ──────────────────────────────────────────────────────────────

enum Source {
    BuiltIn,
    Csv(PathBuf),
    Random { count: usize, seed: u64 },
}

#[derive(Parser, Debug)]
#[command(name = "knuth", about = "Single-car elevator simulation (TAOCP 2.2.5)")]
struct Cli {
    /// Passenger table as CSV: origin,destination,arrival,patience,name.
    #[arg(long, value_name = "FILE.csv", conflicts_with = "random")]
    manifest: Option<PathBuf>,

    /// Generate N random passengers instead of the built-in table.
    #[arg(long, value_name = "N")]
    random: Option<usize>,

    /// Seed for --random.
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// JSON SimConfig; missing fields keep their defaults.
    #[arg(long, value_name = "FILE.json")]
    config: Option<PathBuf>,

    /// Write the step trace to FILE instead of stdout.
    #[arg(long, value_name = "FILE", conflicts_with = "quiet")]
    trace: Option<PathBuf>,

    /// No step trace, summary only.
    #[arg(long)]
    quiet: bool,

    /// Check state invariants after every step.
    #[arg(long)]
    check: bool,
}

impl Cli {
    fn source(&self) -> Source {
        match (&self.manifest, self.random) {
            (Some(path), _) => Source::Csv(path.clone()),
            (None, Some(count)) => Source::Random { count, seed: self.seed },
            (None, None) => Source::BuiltIn,
        }
    }
}

// ── Setup ─────────────────────────────────────────────────────────────────────

fn load_config(opts: &Cli) -> Result<SimConfig> {
    let mut config = match &opts.config {
        Some(path) => {
            let file = File::open(path).with_context(|| format!("opening {}", path.display()))?;
            serde_json::from_reader(BufReader::new(file))
                .with_context(|| format!("parsing {}", path.display()))?
        }
        None => SimConfig::default(),
    };
    config.check_invariants |= opts.check;
    Ok(config)
}

fn load_manifest(source: &Source, config: &SimConfig) -> Result<PassengerManifest> {
    let manifest = match source {
        Source::BuiltIn => load_manifest_reader(Cursor::new(KNUTH_CSV))?,
        Source::Csv(path) => {
            load_manifest_csv(path).with_context(|| format!("loading {}", path.display()))?
        }
        Source::Random { count, seed } => {
            let spec = ManifestSpec {
                count:     *count,
                min_floor: config.min_floor,
                max_floor: config.max_floor,
                ..ManifestSpec::default()
            };
            generate_manifest(&spec, &mut SimRng::new(*seed))?
        }
    };
    Ok(manifest)
}

// ── Run ───────────────────────────────────────────────────────────────────────

fn simulate(sim: &mut Sim, opts: &Cli) -> Result<SimStats> {
    if opts.quiet {
        return Ok(sim.run(&mut NoopObserver)?);
    }
    let stats = match &opts.trace {
        Some(path) => {
            let mut trace = TraceWriter::create(path)
                .with_context(|| format!("creating {}", path.display()))?;
            let stats = sim.run(&mut trace)?;
            if let Some(e) = trace.take_error() {
                return Err(e).with_context(|| format!("writing {}", path.display()));
            }
            stats
        }
        None => {
            let mut trace = TraceWriter::new(BufWriter::new(io::stdout().lock()));
            let stats = sim.run(&mut trace)?;
            if let Some(e) = trace.take_error() {
                return Err(e).context("writing trace to stdout");
            }
            stats
        }
    };
    Ok(stats)
}

fn print_summary(sim: &Sim, stats: &SimStats) {
    println!();
    println!("=== knuth: rust_lift elevator ===");
    println!(
        "Passengers: {}  |  Served: {}  |  Gave up: {}  |  Dropped: {}",
        sim.state.passengers.len(),
        stats.served,
        stats.abandoned,
        stats.dropped
    );
    let mean = |m: Option<f64>| m.map_or_else(|| "-".to_owned(), |v| format!("{v:.1}"));
    println!(
        "Mean wait: {}  |  Mean ride: {}  |  Finished at {}",
        mean(stats.mean_wait()),
        mean(stats.mean_ride()),
        stats.final_time
    );
    println!("Events dispatched: {}  (peak pending {})", stats.events_dispatched, stats.peak_pending);
    println!();

    println!("{:<10} {:<10} {:>7} {:>8} {:>8}", "passenger", "outcome", "arrive", "boarded", "left");
    for r in sim.state.passengers.iter() {
        let at = |t: Option<lift_core::Tick>| t.map_or_else(|| "-".to_owned(), |t| t.0.to_string());
        println!(
            "{:<10} {:<10} {:>7} {:>8} {:>8}",
            r.passenger.name,
            format!("{:?}", r.state),
            r.passenger.arrival.0,
            at(r.boarded_at),
            at(r.alighted_at.or(r.left_at)),
        );
    }
    println!();

    println!("Step profile:");
    for (label, n) in &stats.step_counts {
        println!("  {label:<4} {n:>6}");
    }
}

fn run(opts: &Cli) -> Result<()> {
    let config = load_config(opts)?;
    let manifest = load_manifest(&opts.source(), &config)?;
    match manifest.floor_span() {
        Some((lo, hi)) => info!("{} passengers between {lo} and {hi}", manifest.len()),
        None => info!("empty manifest"),
    }

    let mut sim = SimBuilder::new().config(config).manifest(manifest).build()?;
    let stats = simulate(&mut sim, opts)?;
    print_summary(&sim, &stats);
    Ok(())
}

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> ExitCode {
    env_logger::init();

    let opts = match Cli::try_parse() {
        Ok(opts) => opts,
        Err(e) => {
            // --help lands here too, on stdout.
            let _ = e.print();
            return if e.use_stderr() { ExitCode::from(EXIT_USAGE) } else { ExitCode::SUCCESS };
        }
    };

    match run(&opts) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("knuth: {e:#}");
            let capacity = e.downcast_ref::<SimError>().is_some_and(SimError::is_capacity_exceeded);
            ExitCode::from(if capacity { EXIT_CAPACITY } else { EXIT_FAILURE })
        }
    }
}
