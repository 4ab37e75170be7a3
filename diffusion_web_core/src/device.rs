use diffusion_rs_core::ModelDType;

/// Compute backend compiled into this build.
///
/// `diffusion_rs_core` places the model on CUDA when built with the `cuda`
/// feature, on Metal with the `metal` feature, and on CPU otherwise. This
/// mirrors that choice so the default precision can follow the device.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Accelerator {
    Cuda,
    Metal,
    Cpu,
}

impl Accelerator {
    pub fn detect() -> Self {
        if cfg!(feature = "cuda") {
            Self::Cuda
        } else if cfg!(feature = "metal") {
            Self::Metal
        } else {
            Self::Cpu
        }
    }

    pub fn is_accelerated(self) -> bool {
        !matches!(self, Self::Cpu)
    }
}

/// Default weight dtype for a backend: reduced precision on an accelerated
/// device, full precision on CPU.
pub fn default_dtype(accelerator: Accelerator) -> ModelDType {
    if accelerator.is_accelerated() {
        ModelDType::F16
    } else {
        ModelDType::F32
    }
}
