//! MSR (Model-Specific Register) read primitives
//!
//! This module reads raw 64-bit register values through the per-core
//! register files exposed by the Linux `msr` driver (`/dev/cpu/*/msr`).
//! The file handle lives only for the duration of a single read.

use std::fs::File;
use std::io::{Read, Seek, SeekFrom};
use std::path::{Path, PathBuf};

pub type Result<T> = std::result::Result<T, MsrError>;

/// Errors that can occur while reading a register file
#[derive(Debug, thiserror::Error)]
pub enum MsrError {
    #[error("Failed to open MSR file {}: {source}", path.display())]
    OpenFailed {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to seek in MSR file {} to 0x{offset:X}: {source}", path.display())]
    SeekFailed {
        path: PathBuf,
        offset: u64,
        source: std::io::Error,
    },

    #[error("Failed to read MSR file {} at 0x{offset:X}: {source}", path.display())]
    ShortRead {
        path: PathBuf,
        offset: u64,
        source: std::io::Error,
    },
}

/// The step of a register read that failed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessErrorKind {
    Open,
    Seek,
    ShortRead,
}

impl MsrError {
    pub fn kind(&self) -> AccessErrorKind {
        match self {
            MsrError::OpenFailed { .. } => AccessErrorKind::Open,
            MsrError::SeekFailed { .. } => AccessErrorKind::Seek,
            MsrError::ShortRead { .. } => AccessErrorKind::ShortRead,
        }
    }

    /// Register file the failed read targeted
    pub fn path(&self) -> &Path {
        match self {
            MsrError::OpenFailed { path, .. }
            | MsrError::SeekFailed { path, .. }
            | MsrError::ShortRead { path, .. } => path,
        }
    }
}

/// Conventional register file location for a logical CPU
pub fn msr_path(cpu: u32) -> PathBuf {
    PathBuf::from(format!("/dev/cpu/{cpu}/msr"))
}

/// Read a 64-bit value from a register file
///
/// # Arguments
///
/// * `location` - Register file, e.g. `/dev/cpu/0/msr`
/// * `offset` - MSR address, used as the byte position within the file
///
/// # Errors
///
/// Returns an error if:
/// - The register file cannot be opened (requires root/CAP_SYS_RAWIO)
/// - Seeking to `offset` is rejected
/// - Fewer than 8 bytes are available at `offset` (the MSR does not exist
///   on this CPU, or the file is not a register file)
///
/// There are no retries. The file handle is closed on every path.
///
/// # Example
///
/// ```ignore
/// use joulemeter_raw::{msr_path, read_register};
///
/// let value = read_register(msr_path(0), 0x606)?;
/// println!("MSR 0x606 = 0x{:016X}", value);
/// ```
pub fn read_register(location: impl AsRef<Path>, offset: u64) -> Result<u64> {
    let path = location.as_ref();
    let mut file = File::open(path).map_err(|e| MsrError::OpenFailed {
        path: path.to_path_buf(),
        source: e,
    })?;

    file.seek(SeekFrom::Start(offset))
        .map_err(|e| MsrError::SeekFailed {
            path: path.to_path_buf(),
            offset,
            source: e,
        })?;

    let mut buffer = [0u8; 8];
    file.read_exact(&mut buffer)
        .map_err(|e| MsrError::ShortRead {
            path: path.to_path_buf(),
            offset,
            source: e,
        })?;

    Ok(u64::from_ne_bytes(buffer))
}
