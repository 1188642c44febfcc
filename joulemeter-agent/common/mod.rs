pub mod cpuid;
pub mod vendor;

pub use vendor::{CpuVendor, CPU_VENDOR};
