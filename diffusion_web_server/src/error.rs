use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

/// Errors surfaced to HTTP clients as an OpenAI-style JSON body.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("image generation failed: {0}")]
    Generation(#[from] anyhow::Error),

    #[error("generation task did not complete")]
    TaskJoin,
}

impl ApiError {
    fn kind(&self) -> &'static str {
        match self {
            Self::Generation(_) => "generation_error",
            Self::TaskJoin => "server_error",
        }
    }
}

#[derive(Serialize)]
struct ErrorBody {
    error: ErrorDetail,
}

#[derive(Serialize)]
struct ErrorDetail {
    message: String,
    r#type: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        tracing::error!(error = %self, "request failed");
        let body = ErrorBody {
            error: ErrorDetail {
                message: self.to_string(),
                r#type: self.kind().to_string(),
            },
        };
        (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response()
    }
}
