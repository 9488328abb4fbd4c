//! # アプリケーション構築
//!
//! DI（リポジトリ・State）の初期化とルーター構築を担当する。
//! `main.rs` はインフラ初期化とサーバー起動に集中する。

use std::sync::Arc;

use axum::{Router, routing::get};
use sqlx::SqlitePool;
use todolist_infra::{
    SqliteTransactionManager,
    TransactionManager,
    repository::{SqliteTodoRepository, TodoRepository},
};
use todolist_shared::observability::{MakeRequestUuidV7, make_request_span};
use tower_http::{
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};

use crate::{
    handler::{
        ReadinessState,
        TodoState,
        create_todo,
        delete_todo,
        get_todo,
        health_check,
        list_todos,
        readiness_check,
        root,
        update_todo,
    },
    openapi::openapi_json,
    usecase::TodoUseCaseImpl,
};

/// DI コンテナの構築とルーター定義を行う
///
/// 接続プールを受け取り、リポジトリ → ユースケース → State → Router の
/// 順に組み立てる。
pub fn build_app(pool: SqlitePool) -> Router {
    let todo_repository: Arc<dyn TodoRepository> =
        Arc::new(SqliteTodoRepository::new(pool.clone()));
    let tx_manager: Arc<dyn TransactionManager> =
        Arc::new(SqliteTransactionManager::new(pool.clone()));

    let todo_state = Arc::new(TodoState {
        usecase: TodoUseCaseImpl::new(todo_repository, tx_manager),
    });
    let readiness_state = Arc::new(ReadinessState { pool });

    Router::new()
        .route("/", get(root))
        .route("/health", get(health_check))
        .route("/health/ready", get(readiness_check))
        .with_state(readiness_state)
        .route("/todo", get(list_todos).post(create_todo))
        .route(
            "/todo/{id}",
            get(get_todo).put(update_todo).delete(delete_todo),
        )
        .with_state(todo_state)
        .route("/openapi.json", get(openapi_json))
        // Request ID の生成 → スパン作成 → レスポンスへの伝播の順に適用される
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(TraceLayer::new_for_http().make_span_with(make_request_span))
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuidV7))
}
