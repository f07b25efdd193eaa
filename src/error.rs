use axum::extract::{FromRequest, Request};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;

use crate::completion::CompletionError;
use crate::templates::RenderError;

/// Everything a handler can fail with, mapped onto an HTTP status and a
/// `{"error": <text>}` body. Upstream error text is passed through verbatim.
#[derive(Debug, Error)]
pub enum ApiError {
    /// A required request field was absent or empty.
    #[error("{0}")]
    MissingInput(&'static str),
    /// The request body could not be read as JSON of the expected shape.
    #[error("{0}")]
    InvalidBody(String),
    /// A template the operation depends on is not registered.
    #[error("{0}")]
    TemplateNotFound(&'static str),
    /// DELETE target does not exist.
    #[error("Prompt not found")]
    PromptNotFound,
    #[error(transparent)]
    Render(#[from] RenderError),
    #[error(transparent)]
    Upstream(#[from] CompletionError),
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            Self::MissingInput(_) | Self::InvalidBody(_) | Self::TemplateNotFound(_) => {
                StatusCode::BAD_REQUEST
            }
            Self::PromptNotFound => StatusCode::NOT_FOUND,
            Self::Render(_) | Self::Upstream(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = self.to_string();
        if status.is_server_error() {
            tracing::error!(%status, error = %message, "Request failed");
        } else {
            tracing::warn!(%status, error = %message, "Request rejected");
        }
        (status, Json(json!({ "error": message }))).into_response()
    }
}

/// `Json` whose rejection is rendered as the same `{"error": ...}` body every
/// other failure uses, so callers always receive a JSON object.
pub struct ApiJson<T>(pub T);

#[axum::async_trait]
impl<T, S> FromRequest<S> for ApiJson<T>
where
    T: serde::de::DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(Self(value)),
            Err(rejection) => Err(ApiError::InvalidBody(rejection.body_text())),
        }
    }
}
