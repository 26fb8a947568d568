//! Market Sim - headless market runner.
//!
//! Seeds (or resumes) a neural-agent market, settles a fixed number of
//! days, prints a run summary, and optionally snapshots the final state.
//!
//! Every run is fully determined by its seed: the same seed and day count
//! replay the same market, trade for trade. Pass `--load` to continue from
//! a snapshot instead of seeding a fresh one.

use std::path::PathBuf;
use std::time::Instant;

use clap::Parser;
use simulation::{Engine, SimulationConfig};
use types::Cash;

/// Market Sim - neural-agent stock market simulation
#[derive(Parser, Debug)]
#[command(name = "market-sim")]
#[command(about = "Neural-agent stock market simulation with tax-aware accounting")]
#[command(version)]
struct Args {
    /// Days to settle before exiting
    #[arg(long, env = "SIM_DAYS", default_value_t = 30)]
    days: u32,

    /// Seed for the market's random stream
    #[arg(long, env = "SIM_SEED", default_value_t = 42)]
    seed: u64,

    /// Starting cash per investor, in dollars
    #[arg(long, env = "SIM_CASH", default_value_t = 100.0)]
    cash: f64,

    /// Log every settled day and event headline
    #[arg(long, env = "SIM_VERBOSE")]
    verbose: bool,

    /// Resume from a snapshot instead of seeding a fresh market
    #[arg(long, env = "SIM_LOAD")]
    load: Option<PathBuf>,

    /// Write the final state to this path on exit
    #[arg(long, env = "SIM_SNAPSHOT")]
    snapshot: Option<PathBuf>,
}

fn main() {
    let args = Args::parse();

    eprintln!("╔═══════════════════════════════════════════════════════╗");
    eprintln!(
        "║  Market Sim - {}                               ║",
        if args.load.is_some() {
            "Resumed Run"
        } else {
            "Fresh Run  "
        }
    );
    eprintln!("╠═══════════════════════════════════════════════════════╣");
    eprintln!(
        "║  Seed: {:12}  │  Days to settle: {:6}          ║",
        args.seed, args.days
    );
    eprintln!(
        "║  Starting cash: ${:<10.2}                            ║",
        args.cash
    );
    eprintln!("╚═══════════════════════════════════════════════════════╝");
    eprintln!();

    let config = SimulationConfig::new(args.seed)
        .with_initial_cash(Cash::from_float(args.cash))
        .with_verbose(args.verbose);

    // ─────────────────────────────────────────────────────────────────────────
    // Build the engine: fresh genesis, or resume from a snapshot
    // ─────────────────────────────────────────────────────────────────────────
    let mut engine = match &args.load {
        Some(path) => match Engine::load(path, config) {
            Ok(engine) => {
                eprintln!("Resumed {} at day {}", path.display(), engine.day());
                engine
            }
            Err(e) => {
                eprintln!("Failed to load {}: {}", path.display(), e);
                std::process::exit(1);
            }
        },
        None => Engine::new(config),
    };

    // ─────────────────────────────────────────────────────────────────────────
    // Settle the requested days, reporting progress every 10%
    // ─────────────────────────────────────────────────────────────────────────
    eprintln!("Settling {} days...", args.days);
    let start = Instant::now();

    for settled in 1..=args.days {
        engine.advance_days(1);
        if settled < args.days && settled % (args.days / 10).max(1) == 0 {
            let pct = settled * 100 / args.days;
            eprintln!("  {}% (day {})", pct, engine.day());
        }
    }

    let elapsed = start.elapsed();

    // ─────────────────────────────────────────────────────────────────────────
    // Run summary
    // ─────────────────────────────────────────────────────────────────────────
    let state = engine.state();
    let index = state
        .market_index_history
        .last()
        .map(|point| point.price)
        .unwrap_or(0.0);
    let top_fund = state
        .investors
        .iter()
        .filter(|investor| !investor.human)
        .max_by_key(|investor| investor.total_value(&state.stocks));
    let player = state.investors.iter().find(|investor| investor.human);

    eprintln!();
    eprintln!("╔═══════════════════════════════════════════════════════╗");
    eprintln!("║  Run Complete                                         ║");
    eprintln!("╠═══════════════════════════════════════════════════════╣");
    eprintln!(
        "║  Days: {:5}  │  Elapsed: {:6.2}s  │  {:8.1} days/s  ║",
        args.days,
        elapsed.as_secs_f64(),
        args.days as f64 / elapsed.as_secs_f64().max(f64::EPSILON)
    );
    eprintln!(
        "║  Final day: {:5}  │  Market index: {:12.2}      ║",
        engine.day(),
        index
    );
    eprintln!(
        "║  Events on record: {:3}                                ║",
        state.event_history.len()
    );
    if let Some(fund) = top_fund {
        eprintln!(
            "║  Top fund: {:24} ${:<12.2}     ║",
            fund.name,
            fund.total_value(&state.stocks).to_float()
        );
    }
    if let Some(player) = player {
        eprintln!(
            "║  Player account:                      ${:<12.2}     ║",
            player.total_value(&state.stocks).to_float()
        );
    }
    eprintln!("╚═══════════════════════════════════════════════════════╝");

    if let Some(path) = &args.snapshot {
        match engine.save(path) {
            Ok(()) => eprintln!("Snapshot written to {}", path.display()),
            Err(e) => eprintln!("Failed to write {}: {}", path.display(), e),
        }
    }
}
