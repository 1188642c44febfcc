pub mod common;
pub mod config;
pub mod error;
pub mod reader;
pub mod report;

pub use config::{ReadConfig, RegisterLocation};
pub use error::{AgentError, Result};
pub use reader::{EnergyReader, EnergySample, LocationReading};

// Re-export the register layer for callers of the library
pub use joulemeter_raw as raw;
