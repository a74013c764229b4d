//! GPU detection
//!
//! Best-effort probe for a GPU usable by the accelerated runner.

#[cfg(any(target_os = "linux", target_os = "windows", target_os = "macos"))]
use std::process::Command;

/// GPU information
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GpuInfo {
    pub name: String,
    pub vram_total_mb: u64,
    pub is_available: bool,
}

impl GpuInfo {
    fn not_detected() -> Self {
        Self {
            name: "GPU not detected".to_string(),
            vram_total_mb: 0,
            is_available: false,
        }
    }
}

/// Detect an available GPU (best effort, never fails)
pub fn detect_gpu() -> GpuInfo {
    #[cfg(any(target_os = "linux", target_os = "windows"))]
    {
        if let Some(info) = detect_gpu_nvidia_smi() {
            return info;
        }
    }

    #[cfg(target_os = "macos")]
    {
        if let Some(info) = detect_gpu_metal() {
            return info;
        }
    }

    tracing::debug!("No GPU detected");
    GpuInfo::not_detected()
}

// =============================================================================
// NVIDIA (Linux, Windows)
// =============================================================================

#[cfg(any(target_os = "linux", target_os = "windows"))]
fn detect_gpu_nvidia_smi() -> Option<GpuInfo> {
    let output = Command::new("nvidia-smi")
        .args(["--query-gpu=name,memory.total", "--format=csv,noheader,nounits"])
        .output()
        .ok()?;

    if !output.status.success() {
        return None;
    }

    parse_nvidia_smi(&String::from_utf8_lossy(&output.stdout))
}

/// Parse the first GPU line of `nvidia-smi --query-gpu=name,memory.total` CSV output
#[cfg_attr(not(any(target_os = "linux", target_os = "windows")), allow(dead_code))]
fn parse_nvidia_smi(stdout: &str) -> Option<GpuInfo> {
    let line = stdout.lines().find(|l| !l.trim().is_empty())?;
    let (name, vram) = line.split_once(',')?;
    let name = name.trim();
    if name.is_empty() {
        return None;
    }

    Some(GpuInfo {
        name: name.to_string(),
        vram_total_mb: vram.trim().parse().unwrap_or(0),
        is_available: true,
    })
}

// =============================================================================
// Metal (macOS)
// =============================================================================

#[cfg(target_os = "macos")]
fn detect_gpu_metal() -> Option<GpuInfo> {
    let output = Command::new("system_profiler")
        .args(["SPDisplaysDataType"])
        .output()
        .ok()?;

    if !output.status.success() {
        return None;
    }

    parse_system_profiler(&String::from_utf8_lossy(&output.stdout))
}

/// Pick the chipset out of `system_profiler SPDisplaysDataType` output.
/// Only GPUs reporting Metal support count.
#[cfg_attr(not(target_os = "macos"), allow(dead_code))]
fn parse_system_profiler(stdout: &str) -> Option<GpuInfo> {
    let mut name: Option<String> = None;
    let mut metal = false;

    for line in stdout.lines() {
        let trimmed = line.trim();
        if let Some(chipset) = trimmed.strip_prefix("Chipset Model:") {
            let chipset = chipset.trim();
            if !chipset.is_empty() && name.is_none() {
                name = Some(chipset.to_string());
            }
        }
        // "Metal Support: Metal 3" on newer releases, "Metal Family: ..." on older
        if trimmed.starts_with("Metal Support:") || trimmed.starts_with("Metal Family:") {
            metal = true;
        }
    }

    if !metal {
        return None;
    }

    Some(GpuInfo {
        name: format!("{} (Metal)", name?),
        vram_total_mb: 0,
        is_available: true,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_nvidia_smi() {
        let info = parse_nvidia_smi("\nNVIDIA GeForce RTX 3070, 8192\nNVIDIA T4, 15360\n").unwrap();
        assert_eq!(info.name, "NVIDIA GeForce RTX 3070");
        assert_eq!(info.vram_total_mb, 8192);
        assert!(info.is_available);
    }

    #[test]
    fn test_parse_nvidia_smi_empty() {
        assert!(parse_nvidia_smi("").is_none());
        assert!(parse_nvidia_smi("garbage").is_none());
    }

    #[test]
    fn test_parse_system_profiler() {
        let stdout = "Graphics/Displays:\n\n    Apple M2 Pro:\n\n      Chipset Model: Apple M2 Pro\n      Type: GPU\n      Metal Support: Metal 3\n";
        let info = parse_system_profiler(stdout).unwrap();
        assert_eq!(info.name, "Apple M2 Pro (Metal)");
        assert!(info.is_available);

        assert!(parse_system_profiler("      Chipset Model: Intel GMA 950\n").is_none());
    }

    #[test]
    fn test_detect_gpu_never_panics() {
        let info = detect_gpu();
        if !info.is_available {
            assert_eq!(info, GpuInfo::not_detected());
        }
    }
}
