use clap::ValueEnum;
use diffusion_rs_core::{DiffusionGenerationParams, ModelDType, Offloading, TokenSource};
use serde::{Deserialize, Serialize};

/// Model presets with sensible sampling defaults.
#[derive(Clone, Debug, Copy, PartialEq, Eq, ValueEnum)]
pub enum KnownModel {
    #[value(name = "schnell")]
    Schnell,
    #[value(name = "dev")]
    Dev,
}

impl KnownModel {
    pub fn model_id(&self) -> &'static str {
        match self {
            Self::Schnell => "black-forest-labs/FLUX.1-schnell",
            Self::Dev => "black-forest-labs/FLUX.1-dev",
        }
    }

    pub fn default_num_steps(&self) -> usize {
        match self {
            Self::Schnell => 4,
            Self::Dev => 50,
        }
    }

    pub fn default_guidance_scale(&self) -> f64 {
        match self {
            Self::Schnell => 0.0,
            Self::Dev => 3.5,
        }
    }
}

/// Sampling settings fixed at startup and applied to every request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationDefaults {
    pub height: usize,
    pub width: usize,
    /// The number of denoising steps. More steps usually mean a higher quality
    /// image at the expense of slower inference.
    pub num_steps: usize,
    /// Higher guidance scale encourages images closely linked to the prompt,
    /// usually at the expense of lower image quality.
    pub guidance_scale: f64,
}

impl GenerationDefaults {
    pub fn for_model(which: KnownModel) -> Self {
        Self {
            height: 720,
            width: 1280,
            num_steps: which.default_num_steps(),
            guidance_scale: which.default_guidance_scale(),
        }
    }

    pub fn to_params(&self) -> DiffusionGenerationParams {
        DiffusionGenerationParams {
            height: self.height,
            width: self.width,
            num_steps: self.num_steps,
            guidance_scale: self.guidance_scale,
        }
    }
}

/// Everything needed to construct the pipeline, decided once at process start.
#[derive(Debug, Clone)]
pub struct PipelineOptions {
    /// Hugging Face model ID or local path.
    pub model_id: String,
    pub dtype: ModelDType,
    pub token: TokenSource,
    /// Only applicable for Hugging Face models.
    pub revision: Option<String>,
    pub offloading: Option<Offloading>,
    /// Suppress loading progress output.
    pub silent: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn presets_resolve_to_documented_models() {
        assert_eq!(
            KnownModel::Schnell.model_id(),
            "black-forest-labs/FLUX.1-schnell"
        );
        assert_eq!(KnownModel::Dev.model_id(), "black-forest-labs/FLUX.1-dev");
        assert_eq!(KnownModel::Schnell.default_num_steps(), 4);
        assert_eq!(KnownModel::Dev.default_num_steps(), 50);
        assert_eq!(KnownModel::Schnell.default_guidance_scale(), 0.0);
        assert_eq!(KnownModel::Dev.default_guidance_scale(), 3.5);
    }

    #[test]
    fn defaults_have_nonzero_geometry() {
        let defaults = GenerationDefaults::for_model(KnownModel::Schnell);
        assert!(defaults.height > 0);
        assert!(defaults.width > 0);

        let params = defaults.to_params();
        assert_eq!(params.height, defaults.height);
        assert_eq!(params.width, defaults.width);
        assert_eq!(params.num_steps, defaults.num_steps);
    }
}
