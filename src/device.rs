//! Compute device selection.
//!
//! Every vector and tensor is tiny, so CPU is the sensible default. GPU
//! devices are only tried when the crate is built with the `cuda` or `metal`
//! feature, and `TENSEM_NO_GPU` forces CPU regardless.

use candle_core::Device;
use tracing::info;

/// Check whether GPU use has been disabled through the environment.
pub fn gpu_disabled() -> bool {
    std::env::var_os("TENSEM_NO_GPU").is_some()
}

/// Pick the best available device.
///
/// Priority: `TENSEM_NO_GPU` (forces CPU), CUDA, Metal, then CPU.
pub fn best_device() -> Device {
    if gpu_disabled() {
        info!("using CPU device (TENSEM_NO_GPU set)");
        return Device::Cpu;
    }

    #[cfg(feature = "cuda")]
    {
        if let Ok(device) = Device::new_cuda(0) {
            info!("using CUDA device");
            return device;
        }
    }

    #[cfg(feature = "metal")]
    {
        if let Ok(device) = Device::new_metal(0) {
            info!("using Metal device");
            return device;
        }
    }

    info!("using CPU device");
    Device::Cpu
}

/// Always CPU.
pub fn cpu_device() -> Device {
    Device::Cpu
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cpu_device() {
        assert!(matches!(cpu_device(), Device::Cpu));
    }

    #[test]
    fn test_best_device_without_features_is_cpu() {
        if cfg!(any(feature = "cuda", feature = "metal")) {
            return;
        }
        assert!(matches!(best_device(), Device::Cpu));
    }
}
