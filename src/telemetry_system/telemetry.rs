use serde::{Deserialize, Serialize};

use crate::control::debris::Position;
use crate::control::mission::{MissionState, MissionStatus};

/// Append-only, human-readable record of a mission run.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MissionLog {
    entries: Vec<String>,
}

impl MissionLog {
    pub fn new() -> Self {
        MissionLog {
            entries: Vec::new(),
        }
    }

    pub fn starting_with(message: impl Into<String>) -> Self {
        MissionLog {
            entries: vec![message.into()],
        }
    }

    pub fn push(&mut self, message: impl Into<String>) {
        self.entries.push(message.into());
    }

    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    pub fn last(&self) -> Option<&str> {
        self.entries.last().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct TickSample {
    pub tick: u64,
    pub status: MissionStatus,
    pub position: Position,
    pub fuel: u32,
    pub storage: u32,
    pub collected: usize,
}

pub struct Telemetry {
    samples: Vec<TickSample>,
    min_fuel: u32,
    peak_storage: u32,
    state_ticks: Vec<(MissionStatus, u64)>,
    tick: u64,
}

impl Telemetry {
    pub fn new() -> Self {
        Telemetry {
            samples: Vec::new(),
            min_fuel: u32::MAX,
            peak_storage: 0,
            state_ticks: Vec::new(),
            tick: 0,
        }
    }

    pub fn collect_data(&mut self, state: &MissionState) {
        self.tick += 1;
        let satellite = state.satellite();

        self.min_fuel = self.min_fuel.min(satellite.fuel);
        self.peak_storage = self.peak_storage.max(satellite.storage);

        self.samples.push(TickSample {
            tick: self.tick,
            status: state.status(),
            position: satellite.position,
            fuel: satellite.fuel,
            storage: satellite.storage,
            collected: state.collected_count(),
        });

        // Track status transitions
        match self.state_ticks.last() {
            Some((last_status, _)) if *last_status == state.status() => {}
            _ => self.state_ticks.push((state.status(), self.tick)),
        }
    }

    pub fn samples(&self) -> &[TickSample] {
        &self.samples
    }

    pub fn min_fuel(&self) -> Option<u32> {
        (!self.samples.is_empty()).then_some(self.min_fuel)
    }

    pub fn peak_storage(&self) -> u32 {
        self.peak_storage
    }

    pub fn state_ticks(&self) -> &[(MissionStatus, u64)] {
        &self.state_ticks
    }

    /// Debris collected per move made, zero before the first move.
    pub fn collection_efficiency(&self, moves: u32) -> f64 {
        let collected = self.samples.last().map_or(0, |s| s.collected);
        if moves == 0 {
            0.0
        } else {
            collected as f64 / moves as f64
        }
    }

    pub fn display_data(&self, moves: u32) {
        println!("--- Telemetry Data ---");
        for sample in &self.samples {
            println!(
                "Tick {:>3}: {:<9} fuel={:<2} storage={} collected={} [{:?}]",
                sample.tick,
                sample.position.to_string(),
                sample.fuel,
                sample.storage,
                sample.collected,
                sample.status
            );
        }
        println!("--- End of Telemetry ---");

        println!("\n--- Simulation Summary ---");
        match self.min_fuel() {
            Some(fuel) => println!("Min Fuel: {}", fuel),
            None => println!("Min Fuel: n/a"),
        }
        println!("Peak Storage: {}", self.peak_storage);
        println!(
            "Collection Efficiency: {:.2} debris/move",
            self.collection_efficiency(moves)
        );

        println!("\n--- State Transitions ---");
        for (status, tick) in &self.state_ticks {
            println!("State {:?} reached at tick {}", status, tick);
        }
    }
}

impl Default for Telemetry {
    fn default() -> Self {
        Self::new()
    }
}
