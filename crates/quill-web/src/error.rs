use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use quill_client::ClientError;
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum WebError {
    #[error(transparent)]
    Client(#[from] ClientError),

    #[error("{0}")]
    BadRequest(String),
}

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
}

impl WebError {
    pub fn status(&self) -> StatusCode {
        match self {
            WebError::BadRequest(_) => StatusCode::BAD_REQUEST,
            WebError::Client(e) if e.is_unauthorized() => StatusCode::UNAUTHORIZED,
            WebError::Client(ClientError::InvalidToken(_)) => StatusCode::UNAUTHORIZED,
            WebError::Client(ClientError::Api { status, .. }) => {
                StatusCode::from_u16(*status).unwrap_or(StatusCode::BAD_GATEWAY)
            }
            WebError::Client(_) => StatusCode::BAD_GATEWAY,
        }
    }
}

impl IntoResponse for WebError {
    fn into_response(self) -> Response {
        let status = self.status();
        (
            status,
            Json(ErrorResponse {
                error: self.to_string(),
            }),
        )
            .into_response()
    }
}
