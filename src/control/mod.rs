pub mod config;
pub mod debris;
pub mod driver;
pub mod mission;
pub mod satellite;
pub mod targeting;
