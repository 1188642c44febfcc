//! Energy counter to joule conversion
//!
//! The energy status register holds a raw counter. The unit register
//! carries a 5-bit exponent (bits 8-12) such that
//! `joules = counter * 2^-exponent`.

use std::path::Path;

use crate::msr::{read_register, Result};
use crate::vendor::VendorProfile;

/// Energy scaling exponent of a raw unit register value
///
/// Intel `MSR_RAPL_POWER_UNIT` and AMD `RAPL_PWR_UNIT` share the layout:
/// power units in bits 0-3, energy units in bits 8-12, time units in
/// bits 16-19. Only the energy field matters here.
pub fn extract_scale_exponent(raw_unit: u64) -> u8 {
    ((raw_unit >> 8) & 0x1F) as u8
}

/// Scale a raw energy counter to joules
///
/// Power-of-two scaling is exact in `f64`; only the conversion of counters
/// above 2^53 rounds.
pub fn scale_energy(raw_energy: u64, exponent: u8) -> f64 {
    raw_energy as f64 * 0.5f64.powi(i32::from(exponent))
}

/// Read the energy counter at `location` and convert it to joules
///
/// The energy register is read first, then the unit register. Either
/// failure aborts the conversion and is returned unchanged; no partial
/// value is produced.
pub fn read_energy(profile: VendorProfile, location: impl AsRef<Path>) -> Result<f64> {
    let location = location.as_ref();
    let raw_energy = read_register(location, profile.energy_offset)?;
    let raw_unit = read_register(location, profile.unit_offset)?;

    Ok(scale_energy(raw_energy, extract_scale_exponent(raw_unit)))
}

/// Energy in joules from an Intel register file
pub fn read_intel_energy(location: impl AsRef<Path>) -> Result<f64> {
    read_energy(VendorProfile::INTEL, location)
}

/// Energy in joules from an AMD register file
pub fn read_amd_energy(location: impl AsRef<Path>) -> Result<f64> {
    read_energy(VendorProfile::AMD, location)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::msr::AccessErrorKind;
    use std::io::{Seek, SeekFrom, Write};

    fn register_file(registers: &[(u64, u64)]) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        for &(offset, value) in registers {
            file.seek(SeekFrom::Start(offset)).unwrap();
            file.write_all(&value.to_ne_bytes()).unwrap();
        }
        file.flush().unwrap();
        file
    }

    fn intel_file(energy: u64, unit: u64) -> tempfile::NamedTempFile {
        register_file(&[(0x606, unit), (0x639, energy)])
    }

    #[test]
    fn test_extract_scale_exponent_ignores_other_bits() {
        let noise = [
            0u64,
            0xFF,
            0xFFFF_FFFF_FFFF_E0FF,
            0x1234_5678_9ABC_C0DE & !0x1F00,
            0xA5A5_A5A5_A5A5_A0A5,
        ];

        for n in 0u8..=31 {
            for &bits in &noise {
                let raw = (bits & !0x1F00) | (u64::from(n) << 8);
                assert_eq!(extract_scale_exponent(raw), n, "raw = 0x{raw:016X}");
            }
        }
    }

    #[test]
    fn test_scale_energy_matches_power_of_two_division() {
        for n in 0u8..=31 {
            for raw in [1u64, 1_000_000, 0x0000_FFFF_FFFF, 1 << 52] {
                let expected = raw as f64 / (1u64 << n) as f64;
                assert_eq!(scale_energy(raw, n), expected);
            }
        }
    }

    #[test]
    fn test_scale_energy_boundaries() {
        assert_eq!(scale_energy(123_456, 0), 123_456.0);

        let smallest = scale_energy(1, 31);
        assert!(smallest > 0.0);
        assert_eq!(smallest, 1.0 / 2_147_483_648.0);

        let largest = scale_energy(u64::MAX, 31);
        assert!(largest.is_finite());
        assert!((largest - 8_589_934_592.0).abs() < 1.0);
    }

    #[test]
    fn test_read_intel_energy() {
        let file = intel_file(1_000_000, 0x0E00);

        let joules = read_intel_energy(file.path()).unwrap();
        assert_eq!(joules, 1_000_000.0 / 16384.0);
        assert!((joules - 61.035156).abs() < 1e-6);
    }

    #[test]
    fn test_power_and_time_unit_bits_do_not_change_energy() {
        let energy = 0x0123_4567u64;
        let expected = scale_energy(energy, 14);

        for unit in [0x0E00u64, 0x000A_0E03, 0xFFFF_FFFF_FFF0_EEFF, 0x000F_0E0F] {
            let file = intel_file(energy, unit);
            assert_eq!(read_intel_energy(file.path()).unwrap(), expected, "unit = 0x{unit:X}");
        }
    }

    #[test]
    fn test_zero_counter_is_zero_joules() {
        let file = intel_file(0, 0x000A_1003);
        assert_eq!(read_intel_energy(file.path()).unwrap(), 0.0);
    }

    #[test]
    fn test_unscaled_energy_with_zero_exponent() {
        let file = intel_file(42, 0x000A_0003);
        assert_eq!(read_intel_energy(file.path()).unwrap(), 42.0);
    }

    #[test]
    fn test_missing_location_is_open_failure() {
        let dir = tempfile::tempdir().unwrap();

        let err = read_intel_energy(dir.path().join("msr")).unwrap_err();
        assert_eq!(err.kind(), AccessErrorKind::Open);
    }

    #[test]
    fn test_unit_read_failure_fails_conversion() {
        let profile = VendorProfile {
            energy_offset: 0x10,
            unit_offset: 0x1000,
        };
        let file = register_file(&[(0x10, 1_000_000)]);

        let err = read_energy(profile, file.path()).unwrap_err();
        assert_eq!(err.kind(), AccessErrorKind::ShortRead);
    }

    #[test]
    fn test_repeated_reads_are_identical() {
        let file = intel_file(0x0123_4567_89AB, 0x000A_0E03);

        let first = read_intel_energy(file.path()).unwrap();
        for _ in 0..5 {
            assert_eq!(read_intel_energy(file.path()).unwrap(), first);
        }
    }

    #[test]
    fn test_read_amd_energy() {
        // MSR 0xC0010299 and 0xC001029A are adjacent byte offsets in a plain
        // file, so the unit read sees the energy counter shifted up a byte.
        let energy = 0x0000_0001_0000_0010u64;
        let file = register_file(&[(0xC001_0299, 0x03), (0xC001_029A, energy)]);

        let joules = read_amd_energy(file.path()).unwrap();
        assert_eq!(joules, energy as f64 / 65536.0);
    }
}
