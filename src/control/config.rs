use serde::{Deserialize, Serialize};

use crate::constants::{
    DEFAULT_DEBRIS_COUNT, DEFAULT_MAX_FUEL, DEFAULT_STORAGE_CAPACITY, MAX_DEBRIS_COUNT,
    MAX_FUEL_CAPACITY, MAX_STORAGE_CAPACITY, MIN_DEBRIS_COUNT, MIN_FUEL_CAPACITY,
    MIN_STORAGE_CAPACITY,
};
use crate::errors::{ConfigError, SimulationError};

/// Static mission parameters. Immutable for the duration of a run.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawMissionConfig")]
pub struct MissionConfig {
    debris_count: u32,
    max_fuel: u32,
    storage_capacity: u32,
}

impl MissionConfig {
    pub fn new(
        debris_count: u32,
        max_fuel: u32,
        storage_capacity: u32,
    ) -> Result<Self, SimulationError> {
        check_bounds(debris_count, max_fuel, storage_capacity)?;

        Ok(MissionConfig {
            debris_count,
            max_fuel,
            storage_capacity,
        })
    }

    pub fn debris_count(&self) -> u32 {
        self.debris_count
    }

    pub fn max_fuel(&self) -> u32 {
        self.max_fuel
    }

    pub fn storage_capacity(&self) -> u32 {
        self.storage_capacity
    }
}

fn check_bounds(
    debris_count: u32,
    max_fuel: u32,
    storage_capacity: u32,
) -> Result<(), ConfigError> {
    if !(MIN_DEBRIS_COUNT..=MAX_DEBRIS_COUNT).contains(&debris_count) {
        return Err(ConfigError::DebrisCount {
            value: debris_count,
            min: MIN_DEBRIS_COUNT,
            max: MAX_DEBRIS_COUNT,
        });
    }
    if !(MIN_FUEL_CAPACITY..=MAX_FUEL_CAPACITY).contains(&max_fuel) {
        return Err(ConfigError::MaxFuel {
            value: max_fuel,
            min: MIN_FUEL_CAPACITY,
            max: MAX_FUEL_CAPACITY,
        });
    }
    if !(MIN_STORAGE_CAPACITY..=MAX_STORAGE_CAPACITY).contains(&storage_capacity) {
        return Err(ConfigError::StorageCapacity {
            value: storage_capacity,
            min: MIN_STORAGE_CAPACITY,
            max: MAX_STORAGE_CAPACITY,
        });
    }
    Ok(())
}

#[derive(Deserialize)]
struct RawMissionConfig {
    debris_count: u32,
    max_fuel: u32,
    storage_capacity: u32,
}

impl TryFrom<RawMissionConfig> for MissionConfig {
    type Error = SimulationError;

    fn try_from(raw: RawMissionConfig) -> Result<Self, Self::Error> {
        MissionConfig::new(raw.debris_count, raw.max_fuel, raw.storage_capacity)
    }
}

impl Default for MissionConfig {
    fn default() -> Self {
        MissionConfig {
            debris_count: DEFAULT_DEBRIS_COUNT,
            max_fuel: DEFAULT_MAX_FUEL,
            storage_capacity: DEFAULT_STORAGE_CAPACITY,
        }
    }
}
