// CPU vendor detection

use once_cell::sync::Lazy;

use joulemeter_raw::Vendor;

use crate::common::cpuid;
use crate::error::{AgentError, Result};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CpuVendor {
    Intel,
    Amd,
    Unknown(String),
}

impl CpuVendor {
    /// Map a CPUID vendor identification string
    pub fn from_vendor_string(id: &str) -> Self {
        match id {
            "GenuineIntel" => CpuVendor::Intel,
            // Hygon Dhyana is Zen-based and keeps the AMD RAPL registers
            "AuthenticAMD" | "HygonGenuine" => CpuVendor::Amd,
            other => CpuVendor::Unknown(other.to_string()),
        }
    }

    pub fn name(&self) -> &str {
        match self {
            CpuVendor::Intel => "Intel",
            CpuVendor::Amd => "AMD",
            CpuVendor::Unknown(id) if id.is_empty() => "Unknown",
            CpuVendor::Unknown(id) => id,
        }
    }

    /// Register profile selector for this vendor
    pub fn energy_vendor(&self) -> Result<Vendor> {
        match self {
            CpuVendor::Intel => Ok(Vendor::Intel),
            CpuVendor::Amd => Ok(Vendor::Amd),
            CpuVendor::Unknown(_) => Err(AgentError::UnsupportedVendor(format!(
                "{} has no supported energy registers, pass --vendor explicitly",
                self.name()
            ))),
        }
    }
}

pub static CPU_VENDOR: Lazy<CpuVendor> = Lazy::new(detect_vendor);

fn detect_vendor() -> CpuVendor {
    let id = cpuid::vendor_string();
    let vendor = CpuVendor::from_vendor_string(&id);

    match &vendor {
        CpuVendor::Unknown(_) => tracing::warn!("Unrecognized CPU vendor id: {:?}", id),
        known => tracing::info!("Detected CPU vendor: {}", known.name()),
    }

    vendor
}
