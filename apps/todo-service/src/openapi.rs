//! # OpenAPI 仕様定義
//!
//! utoipa を使用して ToDo Service の OpenAPI 仕様を Rust の型から自動生成する。
//! `ApiDoc::openapi()` で OpenAPI ドキュメントを取得できる。

use axum::Json;
use utoipa::OpenApi;

use crate::handler::{health, root, todo};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "ToDo List API",
        version = "0.1.0",
        description = "ToDo リストの作成・取得・更新・削除を行う API"
    ),
    paths(
        // root
        root::root,
        // health
        health::health_check,
        health::readiness_check,
        // todo
        todo::list_todos,
        todo::create_todo,
        todo::get_todo,
        todo::update_todo,
        todo::delete_todo,
    ),
    components(schemas(
        todolist_shared::ErrorResponse,
    )),
    tags(
        (name = "root", description = "サービスバナー"),
        (name = "health", description = "ヘルスチェック"),
        (name = "todo", description = "ToDo 管理"),
    )
)]
pub struct ApiDoc;

/// GET /openapi.json
pub async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}
