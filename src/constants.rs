use std::time::Duration;

// Orbital Layout
pub const ORBIT_COUNT: usize = 5;

// Configuration Bounds
pub const MIN_DEBRIS_COUNT: u32 = 1;
pub const MAX_DEBRIS_COUNT: u32 = 10;
pub const MIN_FUEL_CAPACITY: u32 = 2;
pub const MAX_FUEL_CAPACITY: u32 = 20;
pub const MIN_STORAGE_CAPACITY: u32 = 1;
pub const MAX_STORAGE_CAPACITY: u32 = 5;

// Default Configuration
pub const DEFAULT_DEBRIS_COUNT: u32 = 4;
pub const DEFAULT_MAX_FUEL: u32 = 6;
pub const DEFAULT_STORAGE_CAPACITY: u32 = 2;

// Fuel Policy
pub const FUEL_PER_MOVE: u32 = 1;
pub const CRITICAL_FUEL_LEVEL: u32 = 1; // return to base at or below this

// Driver Timing
pub const TICK_INTERVAL: Duration = Duration::from_millis(800);
pub const START_DELAY: Duration = Duration::from_millis(100);
pub const COLLECT_FLASH: Duration = Duration::from_millis(500);

// Mission Log
pub const INIT_LOG_MESSAGE: &str = "Mission planner initialized. Ready for commands.";
pub const START_LOG_MESSAGE: &str = "🚀 Mission Started!";
