//! Core crate for diffusion_web: everything needed to stand a diffusion
//! pipeline up once and turn prompts into images with it.
//!
//! The heavy lifting (component download, device placement, denoising) is
//! entirely inside `diffusion_rs_core`; this crate only decides the loading
//! options (model, dtype, credential) and fronts the generation call with a
//! small trait so the HTTP layer can be tested without model weights.
//!
//! ```rust,no_run
//! use diffusion_web_core::{
//!     default_dtype, resolve_token_source, Accelerator, DiffusionGenerator,
//!     GenerationDefaults, KnownModel, PipelineOptions, TextToImage,
//! };
//!
//! let which = KnownModel::Schnell;
//! let options = PipelineOptions {
//!     model_id: which.model_id().to_string(),
//!     dtype: default_dtype(Accelerator::detect()),
//!     token: resolve_token_source(None),
//!     revision: None,
//!     offloading: None,
//!     silent: false,
//! };
//! let generator = DiffusionGenerator::load(options, GenerationDefaults::for_model(which))?;
//!
//! let image = generator.generate("Draw a picture of a sunrise.")?;
//! image.save("image.png")?;
//! # Ok::<(), anyhow::Error>(())
//! ```

mod config;
mod device;
mod generate;
mod token;

pub use config::{GenerationDefaults, KnownModel, PipelineOptions};
pub use device::{default_dtype, Accelerator};
pub use generate::{encode_png, DiffusionGenerator, TextToImage};
pub use token::{resolve_token_source, HF_TOKEN_VAR};

pub use diffusion_rs_core::{ModelDType, Offloading, TokenSource};
