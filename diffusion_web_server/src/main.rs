//! diffusion-web: a single-field web UI over a diffusion pipeline.
//!
//! Loads the model once at startup, then serves an embedded page and a JSON
//! generation endpoint until shutdown.

use std::sync::Arc;

use clap::Parser;
use tokio::signal;
use tracing::info;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

use diffusion_web_core::{
    default_dtype, resolve_token_source, Accelerator, DiffusionGenerator, GenerationDefaults,
    KnownModel, ModelDType, Offloading, PipelineOptions,
};

mod error;
mod handlers;
mod routes;
mod state;

use state::AppState;

#[derive(Parser)]
#[command(name = "diffusion-web", about = "Prompt-to-image web UI", version)]
struct Args {
    /// Host to bind to
    #[arg(long, default_value = "127.0.0.1")]
    host: String,

    /// Port to listen on
    #[arg(long, default_value_t = 7860)]
    port: u16,

    /// Which model preset to serve
    #[arg(long, value_enum, default_value = "schnell")]
    which: KnownModel,

    /// Model ID (or local path) overriding the preset
    #[arg(long)]
    model_id: Option<String>,

    /// Weight dtype. Defaults to f16 on an accelerated build and f32 on CPU.
    #[arg(long, value_enum)]
    dtype: Option<ModelDType>,

    /// Hugging Face token for gated repositories. Overrides the HF_TOKEN
    /// environment variable.
    #[arg(long)]
    token: Option<String>,

    /// Offloading setting to use for this model
    #[arg(long, value_enum)]
    offloading: Option<Offloading>,

    /// Image height in pixels
    #[arg(long, default_value_t = 720)]
    height: usize,

    /// Image width in pixels
    #[arg(long, default_value_t = 1280)]
    width: usize,

    /// Number of denoising steps. Defaults to the preset's value.
    #[arg(long)]
    num_steps: Option<usize>,

    /// Guidance scale. Defaults to the preset's value.
    #[arg(long)]
    guidance_scale: Option<f64>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy();
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let accelerator = Accelerator::detect();
    let model_id = args
        .model_id
        .clone()
        .unwrap_or_else(|| args.which.model_id().to_string());
    let dtype = args.dtype.unwrap_or_else(|| default_dtype(accelerator));
    info!("backend: {accelerator:?}, dtype: {dtype}");

    let mut defaults = GenerationDefaults::for_model(args.which);
    defaults.height = args.height;
    defaults.width = args.width;
    if let Some(num_steps) = args.num_steps {
        defaults.num_steps = num_steps;
    }
    if let Some(guidance_scale) = args.guidance_scale {
        defaults.guidance_scale = guidance_scale;
    }

    let options = PipelineOptions {
        model_id: model_id.clone(),
        dtype,
        token: resolve_token_source(args.token),
        revision: None,
        offloading: args.offloading,
        silent: false,
    };

    // The one pipeline for the process lifetime. A load failure exits here,
    // before the listener is bound.
    let generator = DiffusionGenerator::load(options, defaults)?;
    let state = AppState::new(Arc::new(generator), model_id);

    let app = routes::router(state);
    let addr = format!("{}:{}", args.host, args.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("listening on http://{addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("shutting down");
}
