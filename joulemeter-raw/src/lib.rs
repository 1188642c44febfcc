//! # joulemeter-raw
//!
//! Energy register access for Intel and AMD processors.
//!
//! This crate reads the RAPL energy counter and unit registers through the
//! per-core register files of the Linux `msr` driver and converts the raw
//! counter into joules.
//!
//! ## Usage
//!
//! ```ignore
//! use joulemeter_raw::{msr_path, read_energy, Vendor};
//!
//! let joules = read_energy(Vendor::Intel.profile(), msr_path(0))?;
//! println!("core 0: {joules:.6} J");
//! ```

pub mod energy;
pub mod msr;
pub mod vendor;

pub use energy::{
    extract_scale_exponent, read_amd_energy, read_energy, read_intel_energy, scale_energy,
};
pub use msr::{msr_path, read_register, AccessErrorKind, MsrError, Result};
pub use vendor::{ParseVendorError, Vendor, VendorProfile};
