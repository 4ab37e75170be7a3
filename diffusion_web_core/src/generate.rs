use std::io::Cursor;

use anyhow::Result;
use diffusion_rs_core::{ModelSource, Pipeline};
use image::DynamicImage;
use tracing::info;

use crate::config::{GenerationDefaults, PipelineOptions};

/// Prompt in, image out.
///
/// The HTTP handlers depend on this seam instead of [`Pipeline`] directly so
/// they can be exercised without downloading model weights.
pub trait TextToImage: Send + Sync {
    fn generate(&self, prompt: &str) -> Result<DynamicImage>;
}

/// The loaded pipeline together with the sampling settings fixed at startup.
pub struct DiffusionGenerator {
    pipeline: Pipeline,
    defaults: GenerationDefaults,
}

impl DiffusionGenerator {
    /// Load the model. Construction happens once per process; a failure here
    /// is fatal to the caller. There is no retry and no fallback model.
    pub fn load(options: PipelineOptions, defaults: GenerationDefaults) -> Result<Self> {
        info!(
            "loading `{}` with dtype {}",
            options.model_id, options.dtype
        );
        let pipeline = Pipeline::load(
            ModelSource::from_model_id(&options.model_id),
            options.silent,
            options.token,
            options.revision,
            options.offloading,
            &options.dtype,
        )?;
        Ok(Self { pipeline, defaults })
    }

    pub fn defaults(&self) -> &GenerationDefaults {
        &self.defaults
    }
}

impl TextToImage for DiffusionGenerator {
    fn generate(&self, prompt: &str) -> Result<DynamicImage> {
        let images = self
            .pipeline
            .forward(vec![prompt.to_string()], self.defaults.to_params())?;
        images
            .into_iter()
            .next()
            .ok_or_else(|| anyhow::anyhow!("pipeline returned no images"))
    }
}

/// PNG-encode an image for embedding in a JSON response.
pub fn encode_png(image: &DynamicImage) -> Result<Vec<u8>> {
    let mut buf = Cursor::new(Vec::new());
    image.write_to(&mut buf, image::ImageFormat::Png)?;
    Ok(buf.into_inner())
}
