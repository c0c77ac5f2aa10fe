use debris_collection::{
    Action, Debris, MissionConfig, MissionDriver, MissionFailure, MissionState, MissionStatus,
    MissionSummary, Orbit, Position, ReturnReason, Satellite, INIT_LOG_MESSAGE, START_DELAY,
    START_LOG_MESSAGE, TICK_INTERVAL,
};

fn config(debris_count: u32, max_fuel: u32, storage_capacity: u32) -> MissionConfig {
    MissionConfig::new(debris_count, max_fuel, storage_capacity).expect("valid config")
}

// Helper function to build a driver around a hand-placed scenario
fn scenario_driver(
    config: MissionConfig,
    satellite: Satellite,
    debris: Vec<Debris>,
) -> MissionDriver {
    let state =
        MissionState::with_satellite(config, satellite, debris).expect("scenario is consistent");
    let mut driver = MissionDriver::from_state(state, 0);
    driver.start_current();
    driver.advance(START_DELAY);
    assert_eq!(driver.status(), MissionStatus::Running);
    driver
}

fn run_simulation(state: &mut MissionState, max_ticks: usize) -> usize {
    let config = *state.config();
    let total = state.debris().len();
    let mut ticks = 0;
    let mut last_collected = 0;

    state.begin();
    while ticks < max_ticks {
        let Some(outcome) = state.tick() else {
            break;
        };
        ticks += 1;

        let satellite = state.satellite();
        assert!(
            satellite.storage <= config.storage_capacity(),
            "storage {} exceeded capacity {}",
            satellite.storage,
            config.storage_capacity()
        );
        assert!(
            satellite.fuel <= config.max_fuel(),
            "fuel {} exceeded max {}",
            satellite.fuel,
            config.max_fuel()
        );
        assert_eq!(
            state.collected_count() + state.remaining_count(),
            total,
            "debris must be conserved"
        );
        assert!(
            state.collected_count() >= last_collected,
            "collected count went backwards after {:?}",
            outcome.action
        );
        last_collected = state.collected_count();

        if state.status().is_terminal() {
            break;
        }
    }
    ticks
}

#[test]
fn test_single_debris_mission_trace() {
    println!("INTEGRATION TEST: Single Debris Mission");

    let mut driver = scenario_driver(
        config(1, 6, 2),
        Satellite::new(6),
        vec![Debris::new("D1", Orbit::Orbit1)],
    );

    let mut fuel_trace = Vec::new();
    let mut storage_trace = Vec::new();
    while !driver.status().is_terminal() {
        assert_eq!(driver.advance(TICK_INTERVAL), 1);
        fuel_trace.push(driver.satellite().fuel);
        storage_trace.push(driver.satellite().storage);
    }

    assert_eq!(fuel_trace, vec![5, 5, 4, 4, 4]);
    assert_eq!(storage_trace, vec![0, 1, 1, 0, 0]);
    assert_eq!(
        driver.log().entries(),
        &[
            INIT_LOG_MESSAGE,
            START_LOG_MESSAGE,
            "🪐 Moving from base to orbit_1 (most debris).",
            "♻️ Collecting debris D1 in orbit_1.",
            "🛰️ All known debris collected. Returning to base.",
            "📦 Emptying storage at base. Removed 1 debris.",
            "✅ Mission Complete: All debris collected and satellite returned to base.",
        ]
    );
    assert_eq!(driver.status(), MissionStatus::Complete);
    assert_eq!(
        driver.summary(),
        Some(&MissionSummary {
            total_debris_collected: 1,
            total_moves: 2,
            fuel_left: 4,
        })
    );
    assert_eq!(driver.pending_jobs(), 0, "no ticks after completion");
    println!("Single Debris Mission Test: PASSED");
}

#[test]
fn test_full_hold_returns_on_last_unit_of_fuel() {
    println!("INTEGRATION TEST: Storage Full With One Unit Of Fuel");

    let mut driver = scenario_driver(
        config(2, 2, 2),
        Satellite {
            position: Position::Orbit(Orbit::Orbit3),
            fuel: 1,
            storage: 2,
        },
        vec![
            Debris::new("D1", Orbit::Orbit3),
            Debris::new("D2", Orbit::Orbit5),
        ],
    );

    driver.advance(TICK_INTERVAL);

    assert_eq!(driver.status(), MissionStatus::Running);
    assert_eq!(driver.satellite().position, Position::Base);
    assert_eq!(driver.satellite().fuel, 0);
    assert_eq!(driver.state().moves(), 1);
    assert_eq!(
        driver.log().last(),
        Some(Action::ReturnToBase {
            reason: ReturnReason::StorageFull
        }
        .to_string()
        .as_str())
    );

    // Base housekeeping brings the tank back before the next departure
    assert_eq!(driver.run_to_end(100), MissionStatus::Complete);
    println!("Storage Full Return Test: PASSED");
}

#[test]
fn test_out_of_fuel_in_orbit_fails() {
    println!("INTEGRATION TEST: Stranded In Orbit");

    let mut driver = scenario_driver(
        config(2, 6, 2),
        Satellite {
            position: Position::Orbit(Orbit::Orbit2),
            fuel: 0,
            storage: 1,
        },
        vec![
            Debris::new("D1", Orbit::Orbit4),
            Debris::new("D2", Orbit::Orbit5),
        ],
    );

    driver.advance(TICK_INTERVAL);

    assert_eq!(driver.status(), MissionStatus::Failed);
    assert_eq!(
        driver.log().last(),
        Some(
            MissionFailure::StrandedInOrbit {
                orbit: Orbit::Orbit2
            }
            .to_string()
            .as_str()
        )
    );
    assert_eq!(driver.satellite().fuel, 0);
    assert!(driver.summary().is_none());

    assert_eq!(driver.advance(TICK_INTERVAL * 5), 0, "failure is terminal");
    assert_eq!(driver.pending_jobs(), 0);
    println!("Stranded In Orbit Test: PASSED");
}

#[test]
fn test_reset_mid_run() {
    println!("INTEGRATION TEST: Reset While Running");

    let mut driver = MissionDriver::with_seed(config(6, 8, 2), 42);
    driver.start();
    driver.advance(START_DELAY + TICK_INTERVAL * 3);
    assert_eq!(driver.status(), MissionStatus::Running);
    assert!(driver.state().moves() > 0);
    let previous_generation = driver.generation();

    driver.reset();

    assert_eq!(driver.status(), MissionStatus::Idle);
    assert_eq!(driver.log().entries(), &[INIT_LOG_MESSAGE]);
    assert_eq!(driver.satellite(), &Satellite::new(8));
    assert_eq!(driver.debris().len(), 6);
    assert!(driver.debris().iter().all(|d| d.is_in_orbit()));
    assert!(driver.summary().is_none());
    assert_eq!(driver.state().moves(), 0);
    assert!(driver.generation() > previous_generation);
    assert_eq!(driver.pending_jobs(), 0, "old ticks no longer count as pending");

    // The tick queued by the old mission must not leak into the new one
    assert_eq!(driver.advance(TICK_INTERVAL * 4), 0);
    assert_eq!(driver.discarded_jobs(), 1);
    assert_eq!(driver.log().len(), 1);

    assert!(driver.start());
    assert_eq!(driver.run_to_end(200), MissionStatus::Complete);
    println!("Reset While Running Test: PASSED");
}

#[test]
fn test_invariants_and_termination_across_configs() {
    println!("INTEGRATION TEST: Invariant Sweep");

    let mut runs = 0;
    for debris_count in [1, 2, 4, 7, 10] {
        for max_fuel in [2, 3, 6, 11, 20] {
            for storage_capacity in 1..=5 {
                for seed in 0..8u64 {
                    let config = config(debris_count, max_fuel, storage_capacity);
                    let driver = MissionDriver::with_seed(config, seed);
                    let mut state = driver.state().clone();

                    let bound = 6 * debris_count as usize + 2;
                    let ticks = run_simulation(&mut state, bound);

                    assert!(
                        state.status().is_terminal(),
                        "mission {:?} seed {} did not finish within {} ticks",
                        config,
                        seed,
                        bound
                    );
                    assert_eq!(state.status(), MissionStatus::Complete);
                    assert!(ticks <= bound);

                    let summary = state.summary().expect("complete missions have a summary");
                    assert_eq!(summary.total_debris_collected, debris_count);
                    assert_eq!(summary.fuel_left, state.satellite().fuel);
                    runs += 1;
                }
            }
        }
    }

    println!("Checked {} seeded missions", runs);
    println!("Invariant Sweep Test: PASSED");
}

#[test]
fn test_same_seed_same_mission() {
    let run = |seed: u64| {
        let mut driver = MissionDriver::with_seed(config(8, 5, 3), seed);
        driver.start();
        driver.run_to_end(500);
        (driver.log().entries().to_vec(), driver.summary().copied())
    };

    assert_eq!(run(17), run(17));
}

#[test]
fn test_greedy_visits_busiest_orbit_first() {
    let mut driver = scenario_driver(
        config(5, 10, 5),
        Satellite::new(10),
        vec![
            Debris::new("D1", Orbit::Orbit1),
            Debris::new("D2", Orbit::Orbit4),
            Debris::new("D3", Orbit::Orbit4),
            Debris::new("D4", Orbit::Orbit2),
            Debris::new("D5", Orbit::Orbit2),
        ],
    );

    // Orbit 2 and orbit 4 tie; the lower index wins
    driver.advance(TICK_INTERVAL);
    assert_eq!(driver.satellite().position, Position::Orbit(Orbit::Orbit2));

    driver.advance(TICK_INTERVAL * 2);
    assert_eq!(driver.satellite().storage, 2);

    driver.advance(TICK_INTERVAL);
    assert_eq!(driver.satellite().position, Position::Orbit(Orbit::Orbit4));
    assert_eq!(
        driver.log().last(),
        Some("🪐 Current orbit clear. Moving from orbit_2 to orbit_4.")
    );
}
