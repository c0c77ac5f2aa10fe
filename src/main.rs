use std::thread;
use std::time::Duration;

use clap::Parser;
use debris_collection::*;
use log::LevelFilter;

#[derive(Parser, Debug)]
#[command(name = "debris-planner", about = "Autonomous space debris collection planner")]
struct Args {
    /// Number of debris tokens scattered across the orbits
    #[arg(long, default_value_t = DEFAULT_DEBRIS_COUNT)]
    debris_count: u32,

    /// Fuel units carried after each refuel
    #[arg(long, default_value_t = DEFAULT_MAX_FUEL)]
    max_fuel: u32,

    /// Debris the satellite can hold before returning to base
    #[arg(long, default_value_t = DEFAULT_STORAGE_CAPACITY)]
    storage_capacity: u32,

    /// Seed for debris placement; random when omitted
    #[arg(long)]
    seed: Option<u64>,

    /// Sleep between ticks instead of running as fast as possible
    #[arg(long)]
    realtime: bool,

    /// Print the final snapshot as JSON
    #[arg(long)]
    json: bool,

    /// Emit per-tick diagnostics on stderr
    #[arg(short, long)]
    verbose: bool,
}

// Upper bound on engine ticks before the runner gives up
const MAX_TICKS: usize = 1_000;

fn log_level(verbose: bool) -> LevelFilter {
    if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    env_logger::Builder::new()
        .filter_level(log_level(args.verbose))
        .init();

    let config = MissionConfig::new(args.debris_count, args.max_fuel, args.storage_capacity)?;
    let mut driver = match args.seed {
        Some(seed) => MissionDriver::with_seed(config, seed),
        None => MissionDriver::new(config),
    };

    driver.start();

    if args.realtime {
        let frame = Duration::from_millis(50);
        let mut printed = 0;
        while !driver.status().is_terminal() && driver.pending_jobs() > 0 {
            thread::sleep(frame);
            driver.advance(frame);

            let entries = driver.log().entries();
            for entry in &entries[printed..] {
                println!("{}", entry);
            }
            printed = entries.len();

            for event in driver.drain_events() {
                let MissionEvent::Collecting { debris_id, orbit } = event;
                log::debug!("collecting {} in {}", debris_id, orbit);
            }
        }
    } else {
        driver.run_to_end(MAX_TICKS);
    }

    if args.json {
        println!("{}", serde_json::to_string_pretty(&driver.snapshot())?);
        return Ok(());
    }

    if !args.realtime {
        println!("--- Mission Log ---");
        for entry in driver.log().entries() {
            println!("{}", entry);
        }
    }

    println!("\nMission status: {:?}", driver.status());
    match driver.summary() {
        Some(summary) => println!(
            "Debris collected: {} | Moves: {} | Fuel left: {}",
            summary.total_debris_collected, summary.total_moves, summary.fuel_left
        ),
        None => println!("No summary: mission did not complete."),
    }

    driver.telemetry().display_data(driver.state().moves());

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verbose_flag_selects_debug_logging() {
        let quiet = Args::try_parse_from(["main"]).expect("defaults parse");
        assert!(!quiet.verbose);
        assert_eq!(log_level(quiet.verbose), LevelFilter::Warn);

        let verbose = Args::try_parse_from(["main", "-v"]).expect("short flag parses");
        assert_eq!(log_level(verbose.verbose), LevelFilter::Debug);
        assert!(log_level(verbose.verbose) >= LevelFilter::Info);
    }

    #[test]
    fn test_cli_defaults_build_a_valid_config() {
        let args = Args::try_parse_from(["main", "--seed", "3"]).expect("args parse");
        assert_eq!(args.seed, Some(3));

        let config = MissionConfig::new(args.debris_count, args.max_fuel, args.storage_capacity)
            .expect("defaults are in range");
        assert_eq!(config, MissionConfig::default());
    }

    #[test]
    fn test_out_of_range_flag_is_reported() {
        let args = Args::try_parse_from(["main", "--max-fuel", "1"]).expect("args parse");
        let err = MissionConfig::new(args.debris_count, args.max_fuel, args.storage_capacity)
            .expect_err("max fuel below minimum");
        assert!(err.to_string().starts_with("Configuration error: max fuel 1"));
    }
}
