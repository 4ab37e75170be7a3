//! HTTP request handlers.

use std::time::{SystemTime, UNIX_EPOCH};

use axum::{
    extract::State,
    response::{Html, IntoResponse},
    Json,
};
use base64::Engine;
use serde::{Deserialize, Serialize};

use diffusion_web_core::encode_png;

use crate::error::ApiError;
use crate::state::AppState;

const INDEX_HTML: &str = include_str!("../assets/index.html");

/// The embedded single-field page.
pub async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub model: String,
}

pub async fn health(State(state): State<AppState>) -> impl IntoResponse {
    Json(HealthResponse {
        status: "ok",
        model: state.model_id.clone(),
    })
}

#[derive(Debug, Deserialize)]
pub struct GenerationRequest {
    pub prompt: String,
}

#[derive(Serialize)]
pub struct GenerationResponse {
    pub created: u64,
    pub model: String,
    pub data: Vec<ImagePayload>,
}

#[derive(Serialize)]
pub struct ImagePayload {
    pub b64_json: String,
}

/// Run the full synchronous inference call for one prompt and return the
/// first image, PNG-encoded and base64-embedded.
pub async fn generate(
    State(state): State<AppState>,
    Json(request): Json<GenerationRequest>,
) -> Result<Json<GenerationResponse>, ApiError> {
    tracing::info!(prompt = %request.prompt, "generation request");

    // `forward` blocks for the whole denoising loop; keep it off the runtime.
    let generator = state.generator.clone();
    let prompt = request.prompt;
    let image = tokio::task::spawn_blocking(move || generator.generate(&prompt))
        .await
        .map_err(|_| ApiError::TaskJoin)??;

    let png = encode_png(&image)?;
    let b64_json = base64::engine::general_purpose::STANDARD.encode(png);
    let created = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs();

    Ok(Json(GenerationResponse {
        created,
        model: state.model_id.clone(),
        data: vec![ImagePayload { b64_json }],
    }))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use anyhow::anyhow;
    use axum::body::Body;
    use axum::http::{header, Request, StatusCode};
    use base64::Engine;
    use http_body_util::BodyExt;
    use image::DynamicImage;
    use tower::ServiceExt;

    use diffusion_web_core::TextToImage;

    use crate::routes::router;
    use crate::state::AppState;

    struct FixedImage;

    impl TextToImage for FixedImage {
        fn generate(&self, _prompt: &str) -> anyhow::Result<DynamicImage> {
            Ok(DynamicImage::new_rgb8(4, 4))
        }
    }

    struct AlwaysFails;

    impl TextToImage for AlwaysFails {
        fn generate(&self, _prompt: &str) -> anyhow::Result<DynamicImage> {
            Err(anyhow!("out of memory"))
        }
    }

    fn app(generator: Arc<dyn TextToImage>) -> axum::Router {
        router(AppState::new(generator, "test-model".to_string()))
    }

    fn post_generation(prompt: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/v1/images/generations")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(format!("{{\"prompt\":\"{prompt}\"}}")))
            .unwrap()
    }

    #[tokio::test]
    async fn index_serves_embedded_page() {
        let response = app(Arc::new(FixedImage))
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = response.into_body().collect().await.unwrap().to_bytes();
        let page = std::str::from_utf8(&body).unwrap();
        assert!(page.contains("id=\"prompt\""));
        assert!(page.contains("/v1/images/generations"));
    }

    #[tokio::test]
    async fn health_reports_loaded_model() {
        let response = app(Arc::new(FixedImage))
            .oneshot(
                Request::builder()
                    .uri("/health")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = response.into_body().collect().await.unwrap().to_bytes();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["status"], "ok");
        assert_eq!(json["model"], "test-model");
    }

    #[tokio::test]
    async fn generation_returns_decodable_png() {
        let response = app(Arc::new(FixedImage))
            .oneshot(post_generation("a sunrise over mountains"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = response.into_body().collect().await.unwrap().to_bytes();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["model"], "test-model");

        let b64_json = json["data"][0]["b64_json"].as_str().unwrap();
        assert!(!b64_json.is_empty());

        let png = base64::engine::general_purpose::STANDARD
            .decode(b64_json)
            .unwrap();
        let image = image::load_from_memory(&png).unwrap();
        assert_eq!(image.width(), 4);
        assert_eq!(image.height(), 4);
    }

    #[tokio::test]
    async fn generation_failure_maps_to_500_json() {
        let response = app(Arc::new(AlwaysFails))
            .oneshot(post_generation("anything"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = response.into_body().collect().await.unwrap().to_bytes();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["error"]["type"], "generation_error");
        assert!(json["error"]["message"]
            .as_str()
            .unwrap()
            .contains("out of memory"));
    }
}
