//! # ヘルスチェックハンドラ
//!
//! ToDo Service の稼働状態を確認するためのエンドポイント。
//!
//! ## エンドポイント
//!
//! - `GET /health`: プロセスが応答できるか（liveness）
//! - `GET /health/ready`: データベースに到達できるか（readiness）
//!
//! ## レスポンス例
//!
//! ```json
//! {
//!   "status": "healthy",
//!   "version": "0.1.0"
//! }
//! ```

use std::{collections::HashMap, sync::Arc};

use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use sqlx::SqlitePool;
use todolist_infra::db;
use todolist_shared::{CheckStatus, HealthResponse, ReadinessResponse, ReadinessStatus};

/// Readiness Check の共有状態
pub struct ReadinessState {
    pub pool: SqlitePool,
}

/// ヘルスチェックエンドポイント
#[utoipa::path(
    get,
    path = "/health",
    tag = "health",
    responses(
        (status = 200, description = "サーバー稼働中", body = HealthResponse)
    )
)]
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status:  "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Readiness Check エンドポイント
///
/// データベースへの疎通を確認し、失敗時は 503 を返す。
#[utoipa::path(
    get,
    path = "/health/ready",
    tag = "health",
    responses(
        (status = 200, description = "全依存先が利用可能", body = ReadinessResponse),
        (status = 503, description = "一部の依存先が利用不可", body = ReadinessResponse)
    )
)]
#[tracing::instrument(skip_all)]
pub async fn readiness_check(State(state): State<Arc<ReadinessState>>) -> impl IntoResponse {
    let database = match db::ping(&state.pool).await {
        Ok(()) => CheckStatus::Ok,
        Err(e) => {
            tracing::warn!(error = %e, "データベースの疎通確認に失敗しました");
            CheckStatus::Error
        }
    };

    let response =
        ReadinessResponse::from_checks(HashMap::from([("database".to_string(), database)]));
    let status = match response.status {
        ReadinessStatus::Ready => StatusCode::OK,
        ReadinessStatus::NotReady => StatusCode::SERVICE_UNAVAILABLE,
    };

    (status, Json(response))
}
