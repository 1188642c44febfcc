use std::fmt;
use std::path::{Path, PathBuf};

use joulemeter_raw::{msr_path, Vendor};

use crate::error::{AgentError, Result};

/// Widest core range accepted in a single `start-end` entry
pub const MAX_CORE_RANGE: u32 = 4096;

/// A register file to read, with the label it is reported under
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegisterLocation {
    pub label: String,
    pub path: PathBuf,
    pub core: Option<u32>,
}

impl RegisterLocation {
    /// `/dev/cpu/<core>/msr`
    pub fn core(core: u32) -> Self {
        Self {
            label: format!("core_{core}"),
            path: msr_path(core),
            core: Some(core),
        }
    }

    /// An explicit register file, labelled by its path
    pub fn file(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref().to_path_buf();
        Self {
            label: path.display().to_string(),
            path,
            core: None,
        }
    }
}

impl fmt::Display for RegisterLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.label, self.path.display())
    }
}

#[derive(Debug, Clone)]
pub struct ReadConfig {
    pub vendor: Vendor,
    pub locations: Vec<RegisterLocation>,
}

impl ReadConfig {
    /// Create a configuration; with no locations, core 0 is read
    pub fn new(vendor: Vendor, locations: Vec<RegisterLocation>) -> Self {
        let locations = if locations.is_empty() {
            vec![RegisterLocation::core(0)]
        } else {
            locations
        };

        Self { vendor, locations }
    }

    /// Build from core ids and explicit register files, cores first
    pub fn from_sources(vendor: Vendor, cores: &[u32], paths: &[PathBuf]) -> Self {
        let locations = cores
            .iter()
            .map(|&core| RegisterLocation::core(core))
            .chain(paths.iter().map(RegisterLocation::file))
            .collect();

        Self::new(vendor, locations)
    }

    /// First `/dev/cpu/*/msr` location, if any core was requested
    pub fn first_cpu_location(&self) -> Option<&RegisterLocation> {
        self.locations.iter().find(|l| l.core.is_some())
    }
}

/// Parse a list of range strings like ["0-3", "5", "8-11"] into core ids
///
/// Supports multiple formats:
/// - Single values: "0", "5"
/// - Ranges: "0-3" (inclusive)
/// - Comma-separated: "0,2,4"
/// - Mixed: "0-3,5,8-11"
///
/// The result is sorted with duplicates removed.
pub fn parse_core_list(inputs: &[String]) -> Result<Vec<u32>> {
    let mut result = Vec::new();

    for input in inputs {
        for part in input.split(',') {
            let part = part.trim();
            if part.is_empty() {
                continue;
            }

            if let Some((start_str, end_str)) = part.split_once('-') {
                let start = parse_core_id(start_str, part)?;
                let end = parse_core_id(end_str, part)?;
                if start > end {
                    return Err(AgentError::ConfigError(format!(
                        "Core range '{part}' is reversed"
                    )));
                }
                if end - start >= MAX_CORE_RANGE {
                    return Err(AgentError::ConfigError(format!(
                        "Core range '{part}' spans more than {MAX_CORE_RANGE} cores"
                    )));
                }
                result.extend(start..=end);
            } else {
                result.push(parse_core_id(part, part)?);
            }
        }
    }

    result.sort_unstable();
    result.dedup();

    Ok(result)
}

fn parse_core_id(value: &str, part: &str) -> Result<u32> {
    value
        .trim()
        .parse::<u32>()
        .map_err(|e| AgentError::ConfigError(format!("Invalid core id in '{part}': {e}")))
}
