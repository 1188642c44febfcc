#[cfg(target_arch = "x86_64")]
pub fn cpuid(eax: u32, ecx: u32) -> (u32, u32, u32, u32) {
    let mut ebx: u32;
    let mut edx: u32;
    let mut eax_out = eax;
    let mut ecx_out = ecx;

    unsafe {
        std::arch::asm!(
            "mov {0:r}, rbx",
            "cpuid",
            "xchg {0:r}, rbx",
            out(reg) ebx,
            inout("eax") eax_out,
            inout("ecx") ecx_out,
            out("edx") edx,
            options(nostack, preserves_flags)
        );
    }

    (eax_out, ebx, ecx_out, edx)
}

#[cfg(not(target_arch = "x86_64"))]
pub fn cpuid(_eax: u32, _ecx: u32) -> (u32, u32, u32, u32) {
    (0, 0, 0, 0)
}

/// 12-byte vendor identification string from CPUID leaf 0
///
/// Returns an empty string on non-x86 hosts.
pub fn vendor_string() -> String {
    let (_eax, ebx, ecx, edx) = cpuid(0, 0);

    // Register order is EBX, EDX, ECX
    let mut bytes = Vec::with_capacity(12);
    for reg in [ebx, edx, ecx] {
        bytes.extend_from_slice(&reg.to_le_bytes());
    }

    String::from_utf8_lossy(&bytes)
        .trim_end_matches('\0')
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    #[cfg(target_arch = "x86_64")]
    fn test_vendor_string_is_twelve_bytes() {
        let vendor = vendor_string();
        println!("CPUID vendor: {vendor}");
        assert_eq!(vendor.len(), 12);
    }

    #[test]
    #[allow(clippy::similar_names)] // CPU register names are standard
    fn test_cpuid() {
        let (eax, ebx, ecx, edx) = cpuid(0, 0);
        println!("CPUID(0,0): EAX={eax:08X} EBX={ebx:08X} ECX={ecx:08X} EDX={edx:08X}");
    }
}
