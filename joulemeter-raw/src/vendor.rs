//! Vendor energy register profiles
//!
//! Intel and AMD expose the same kind of energy counter and unit register,
//! at different MSR addresses.
//!
//! ## References
//!
//! - Intel® 64 and IA-32 Architectures Software Developer's Manual, Volume 4
//! - AMD Processor Programming Reference (PPR) for Family 17h and later

use std::fmt;
use std::str::FromStr;

/// MSR addresses for the energy and unit registers
pub mod msr {
    /// Intel RAPL Power Unit - energy, power, and time units
    pub const INTEL_RAPL_POWER_UNIT: u64 = 0x606;

    /// Intel PP0 Energy Status - core energy consumption
    pub const INTEL_PP0_ENERGY_STATUS: u64 = 0x639;

    /// AMD RAPL Power Unit - same layout as the Intel register
    pub const AMD_RAPL_POWER_UNIT: u64 = 0xC001_0299;

    /// AMD Core Energy Status
    pub const AMD_CORE_ENERGY_STATUS: u64 = 0xC001_029A;
}

/// The pair of registers a vendor uses for energy accounting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct VendorProfile {
    /// Energy counter register
    pub energy_offset: u64,
    /// Unit register holding the energy scaling exponent
    pub unit_offset: u64,
}

impl VendorProfile {
    pub const INTEL: VendorProfile = VendorProfile {
        energy_offset: msr::INTEL_PP0_ENERGY_STATUS,
        unit_offset: msr::INTEL_RAPL_POWER_UNIT,
    };

    pub const AMD: VendorProfile = VendorProfile {
        energy_offset: msr::AMD_CORE_ENERGY_STATUS,
        unit_offset: msr::AMD_RAPL_POWER_UNIT,
    };
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Vendor {
    Intel,
    Amd,
}

impl Vendor {
    pub fn name(&self) -> &'static str {
        match self {
            Vendor::Intel => "intel",
            Vendor::Amd => "amd",
        }
    }

    pub fn profile(&self) -> VendorProfile {
        match self {
            Vendor::Intel => VendorProfile::INTEL,
            Vendor::Amd => VendorProfile::AMD,
        }
    }

    pub fn all() -> [Vendor; 2] {
        [Vendor::Intel, Vendor::Amd]
    }
}

impl fmt::Display for Vendor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown CPU vendor '{0}', expected 'intel' or 'amd'")]
pub struct ParseVendorError(pub String);

impl FromStr for Vendor {
    type Err = ParseVendorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "intel" => Ok(Vendor::Intel),
            "amd" => Ok(Vendor::Amd),
            _ => Err(ParseVendorError(s.to_string())),
        }
    }
}
