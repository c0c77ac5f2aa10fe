pub mod constants;
pub mod control;
pub mod errors;
pub mod telemetry_system;

pub use constants::*;
pub use control::config::MissionConfig;
pub use control::debris::{generate_debris, Debris, DebrisStatus, Orbit, Position};
pub use control::driver::{MissionDriver, MissionSnapshot};
pub use control::mission::{
    step, Action, MissionEvent, MissionFailure, MissionState, MissionStatus, MissionSummary,
    ReturnReason, StepOutcome,
};
pub use control::satellite::Satellite;
pub use control::targeting::select_target;

// Re-export commonly used items from telemetry_system
pub use telemetry_system::telemetry::{MissionLog, Telemetry, TickSample};
