use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::utils::mailer::MailError;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    Validation(&'static str),
    #[error("mail send failed: {0}")]
    MailFail(#[from] MailError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error) = match &self {
            ApiError::Validation(message) => (StatusCode::BAD_REQUEST, *message),
            ApiError::MailFail(e) => {
                tracing::error!("Failed to send email: {}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, "MAIL_FAIL")
            }
        };
        (status, Json(json!({ "ok": false, "error": error }))).into_response()
    }
}
