use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use toiawase_export::ExportError;
use toiawase_persist::PersistError;

pub const NOT_FOUND_MESSAGE: &str = "メッセージが見つかりません";
pub const SERVER_ERROR_MESSAGE: &str = "サーバーエラー";

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Message not found: {0}")]
    MessageNotFound(String),

    #[error("Persistence error: {0}")]
    Persist(#[from] PersistError),

    #[error("Export error: {0}")]
    Export(#[from] ExportError),

    #[error("Template error: {0}")]
    Render(#[from] minijinja::Error),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::MessageNotFound(_) => (StatusCode::NOT_FOUND, NOT_FOUND_MESSAGE.to_string()),
            ApiError::Persist(ref e) if e.is_not_found() => {
                tracing::debug!("Record lookup failed: {}", e);
                (StatusCode::NOT_FOUND, NOT_FOUND_MESSAGE.to_string())
            }
            ApiError::Persist(ref e) => {
                tracing::error!("Persistence error: {}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, SERVER_ERROR_MESSAGE.to_string())
            }
            ApiError::Export(ref e) => {
                tracing::error!("Export error: {}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, SERVER_ERROR_MESSAGE.to_string())
            }
            ApiError::Render(ref e) => {
                tracing::error!("Template error: {:#}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, SERVER_ERROR_MESSAGE.to_string())
            }
        };

        (status, message).into_response()
    }
}

pub type ApiResult<T> = Result<T, ApiError>;
