//! # ToDo Service エラー定義
//!
//! サービス固有のエラーと、HTTP レスポンス（RFC 9457 Problem Details）への変換を定義する。

use axum::{
    Json,
    extract::rejection::{JsonRejection, PathRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;
use todolist_domain::DomainError;
use todolist_infra::InfraError;
use todolist_shared::ErrorResponse;

/// ToDo Service で発生するエラー
#[derive(Debug, Error)]
pub enum ApiError {
    /// リソースが見つからない
    #[error("リソースが見つかりません: {0}")]
    NotFound(String),

    /// 入力値が不正（形状・型・値の範囲）
    #[error("バリデーションエラー: {0}")]
    Validation(String),

    /// リクエストボディが JSON として解釈できない
    #[error("不正なリクエスト: {0}")]
    BadRequest(String),

    /// Content-Type が JSON でない
    #[error("サポートされていないメディアタイプ: {0}")]
    UnsupportedMediaType(String),

    /// データベースエラー
    #[error("データベースエラー: {0}")]
    Database(#[from] InfraError),

    /// 内部エラー
    #[error("内部エラー: {0}")]
    Internal(String),
}

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::Validation(msg) => Self::Validation(msg),
            e @ DomainError::NotFound { .. } => Self::NotFound(e.to_string()),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        match rejection {
            JsonRejection::JsonDataError(e) => Self::Validation(e.body_text()),
            JsonRejection::JsonSyntaxError(e) => Self::BadRequest(e.body_text()),
            JsonRejection::MissingJsonContentType(e) => Self::UnsupportedMediaType(e.body_text()),
            other => Self::BadRequest(other.body_text()),
        }
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        match rejection {
            PathRejection::FailedToDeserializePathParams(e) => Self::Validation(e.body_text()),
            other => Self::Internal(other.body_text()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = match self {
            ApiError::NotFound(msg) => ErrorResponse::not_found(msg),
            ApiError::Validation(msg) => ErrorResponse::validation_error(msg),
            ApiError::BadRequest(msg) => ErrorResponse::bad_request(msg),
            ApiError::UnsupportedMediaType(msg) => ErrorResponse::unsupported_media_type(msg),
            ApiError::Database(e) => {
                tracing::error!(
                    error = %e,
                    span_trace = %e.span_trace(),
                    "データベースエラー"
                );
                ErrorResponse::internal_error()
            }
            ApiError::Internal(msg) => {
                tracing::error!("内部エラー: {}", msg);
                ErrorResponse::internal_error()
            }
        };

        let status =
            StatusCode::from_u16(body.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (status, Json(body)).into_response()
    }
}
