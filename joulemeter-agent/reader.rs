use std::path::PathBuf;

use joulemeter_raw::{read_energy, VendorProfile};

use crate::config::{ReadConfig, RegisterLocation};
use crate::error::Result;

/// One energy reading from one register file
#[derive(Debug, Clone, PartialEq)]
pub struct EnergySample {
    pub label: String,
    pub path: PathBuf,
    pub vendor: &'static str,
    pub joules: f64,
}

/// Outcome of reading one configured location
#[derive(Debug)]
pub struct LocationReading {
    pub location: RegisterLocation,
    pub result: Result<EnergySample>,
}

pub struct EnergyReader {
    config: ReadConfig,
    profile: VendorProfile,
}

impl EnergyReader {
    pub fn new(config: ReadConfig) -> Self {
        let profile = config.vendor.profile();

        tracing::debug!(
            "Using {} profile: energy MSR 0x{:X}, unit MSR 0x{:X}",
            config.vendor,
            profile.energy_offset,
            profile.unit_offset
        );

        Self { config, profile }
    }

    pub fn locations(&self) -> &[RegisterLocation] {
        &self.config.locations
    }

    pub fn read_location(&self, location: &RegisterLocation) -> Result<EnergySample> {
        let joules = read_energy(self.profile, &location.path)?;

        tracing::debug!("Energy read: {} = {:.6} J", location, joules);

        Ok(EnergySample {
            label: location.label.clone(),
            path: location.path.clone(),
            vendor: self.config.vendor.name(),
            joules,
        })
    }

    /// Read every configured location once, in configuration order
    ///
    /// A failing location is reported in its own entry and does not stop
    /// the remaining reads.
    pub fn read_all(&self) -> Vec<LocationReading> {
        self.config
            .locations
            .iter()
            .map(|location| {
                let result = self.read_location(location);
                if let Err(e) = &result {
                    tracing::error!("Failed to read energy for {}: {}", location, e);
                }

                LocationReading {
                    location: location.clone(),
                    result,
                }
            })
            .collect()
    }
}
