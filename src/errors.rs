use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SimulationError {
    #[error("Configuration error: {0}")]
    ConfigError(#[from] ConfigError),

    #[error("Mission error: {0}")]
    MissionError(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("debris count {value} outside [{min}, {max}]")]
    DebrisCount { value: u32, min: u32, max: u32 },

    #[error("max fuel {value} outside [{min}, {max}]")]
    MaxFuel { value: u32, min: u32, max: u32 },

    #[error("storage capacity {value} outside [{min}, {max}]")]
    StorageCapacity { value: u32, min: u32, max: u32 },
}
