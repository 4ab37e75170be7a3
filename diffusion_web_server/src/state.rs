use std::sync::Arc;

use diffusion_web_core::TextToImage;

/// Shared application state: the one generator loaded at startup.
///
/// Requests share the pipeline with no coordination layer; concurrent
/// generations serialize on the pipeline's internal lock.
#[derive(Clone)]
pub struct AppState {
    pub generator: Arc<dyn TextToImage>,
    pub model_id: String,
}

impl AppState {
    pub fn new(generator: Arc<dyn TextToImage>, model_id: String) -> Self {
        Self {
            generator,
            model_id,
        }
    }
}
