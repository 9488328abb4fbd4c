//! # ToDo ハンドラ
//!
//! ToDo リストの CRUD API を提供する。
//!
//! ## エンドポイント
//!
//! - `GET /todo` - ToDo 一覧（作成順）
//! - `POST /todo` - ToDo 作成
//! - `GET /todo/{id}` - ToDo 取得
//! - `PUT /todo/{id}` - ToDo 更新（内容を丸ごと置き換え）
//! - `DELETE /todo/{id}` - ToDo 削除

use std::sync::Arc;

use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use chrono::NaiveTime;
use serde::{Deserialize, Serialize};
use todolist_domain::todo::{Todo, TodoId};
use todolist_shared::ErrorResponse;
use utoipa::ToSchema;

use crate::{
    error::ApiError,
    extract::{ApiJson, ApiPath},
    usecase::{CreateTodoInput, TodoUseCaseImpl, UpdateTodoInput},
};

/// ToDo API の共有状態
pub struct TodoState {
    pub usecase: TodoUseCaseImpl,
}

// --- リクエスト/レスポンス型 ---

/// ToDo 作成・更新リクエスト
#[derive(Debug, Deserialize, ToSchema)]
pub struct TodoRequest {
    /// タスク本文（1〜256 文字）
    #[schema(example = "buy milk")]
    pub task:           String,
    /// 推奨時刻（`HH:MM:SS`）。省略または `null` で推奨時刻なし
    #[schema(value_type = Option<String>, example = "08:30:00")]
    pub suggested_time: Option<NaiveTime>,
}

/// ToDo DTO
#[derive(Debug, Serialize, Deserialize, PartialEq, ToSchema)]
pub struct TodoResponse {
    pub id:             i64,
    pub task:           String,
    #[schema(example = "08:30:00")]
    pub suggested_time: Option<String>,
}

impl From<&Todo> for TodoResponse {
    fn from(todo: &Todo) -> Self {
        Self {
            id:             todo.id().as_i64(),
            task:           todo.task().as_str().to_string(),
            suggested_time: todo.suggested_time().map(|t| t.to_string()),
        }
    }
}

// --- ハンドラ ---

/// GET /todo
///
/// ToDo 一覧を作成順で取得する。
#[utoipa::path(
    get,
    path = "/todo",
    tag = "todo",
    responses(
        (status = 200, description = "ToDo 一覧", body = Vec<TodoResponse>),
        (status = 500, description = "内部エラー", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip_all)]
pub async fn list_todos(
    State(state): State<Arc<TodoState>>,
) -> Result<impl IntoResponse, ApiError> {
    let todos = state.usecase.list_todos().await?;

    let items: Vec<TodoResponse> = todos.iter().map(TodoResponse::from).collect();
    Ok((StatusCode::OK, Json(items)))
}

/// POST /todo
///
/// ToDo を作成する。
///
/// ## レスポンス
///
/// - `201 Created`: 作成された ToDo
/// - `400 Bad Request`: JSON 構文エラー
/// - `415 Unsupported Media Type`: Content-Type が JSON でない
/// - `422 Unprocessable Entity`: バリデーションエラー
#[utoipa::path(
    post,
    path = "/todo",
    tag = "todo",
    request_body = TodoRequest,
    responses(
        (status = 201, description = "作成された ToDo", body = TodoResponse),
        (status = 400, description = "JSON 構文エラー", body = ErrorResponse),
        (status = 415, description = "Content-Type が JSON でない", body = ErrorResponse),
        (status = 422, description = "バリデーションエラー", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip_all)]
pub async fn create_todo(
    State(state): State<Arc<TodoState>>,
    ApiJson(req): ApiJson<TodoRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let input = CreateTodoInput {
        task:           req.task,
        suggested_time: req.suggested_time,
    };

    let todo = state.usecase.create_todo(input).await?;

    Ok((StatusCode::CREATED, Json(TodoResponse::from(&todo))))
}

/// GET /todo/{id}
///
/// ToDo を 1 件取得する。
#[utoipa::path(
    get,
    path = "/todo/{id}",
    tag = "todo",
    params(("id" = i64, Path, description = "ToDo ID")),
    responses(
        (status = 200, description = "ToDo", body = TodoResponse),
        (status = 404, description = "ToDo が見つからない", body = ErrorResponse),
        (status = 422, description = "ID が整数でない", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip_all, fields(%id))]
pub async fn get_todo(
    State(state): State<Arc<TodoState>>,
    ApiPath(id): ApiPath<i64>,
) -> Result<impl IntoResponse, ApiError> {
    let todo = state.usecase.get_todo(TodoId::from_i64(id)).await?;

    Ok((StatusCode::OK, Json(TodoResponse::from(&todo))))
}

/// PUT /todo/{id}
///
/// ToDo の内容を置き換える。
///
/// ## レスポンス
///
/// - `200 OK`: 更新後の ToDo
/// - `400 Bad Request`: JSON 構文エラー
/// - `404 Not Found`: ToDo が見つからない
/// - `415 Unsupported Media Type`: Content-Type が JSON でない
/// - `422 Unprocessable Entity`: バリデーションエラー、ID が整数でない
#[utoipa::path(
    put,
    path = "/todo/{id}",
    tag = "todo",
    params(("id" = i64, Path, description = "ToDo ID")),
    request_body = TodoRequest,
    responses(
        (status = 200, description = "更新後の ToDo", body = TodoResponse),
        (status = 400, description = "JSON 構文エラー", body = ErrorResponse),
        (status = 404, description = "ToDo が見つからない", body = ErrorResponse),
        (status = 415, description = "Content-Type が JSON でない", body = ErrorResponse),
        (status = 422, description = "バリデーションエラー・ID が整数でない", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip_all, fields(%id))]
pub async fn update_todo(
    State(state): State<Arc<TodoState>>,
    ApiPath(id): ApiPath<i64>,
    ApiJson(req): ApiJson<TodoRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let input = UpdateTodoInput {
        id:             TodoId::from_i64(id),
        task:           req.task,
        suggested_time: req.suggested_time,
    };

    let todo = state.usecase.update_todo(input).await?;

    Ok((StatusCode::OK, Json(TodoResponse::from(&todo))))
}

/// DELETE /todo/{id}
///
/// ToDo を削除する。
///
/// ## レスポンス
///
/// - `204 No Content`: 削除成功
/// - `404 Not Found`: ToDo が見つからない
#[utoipa::path(
    delete,
    path = "/todo/{id}",
    tag = "todo",
    params(("id" = i64, Path, description = "ToDo ID")),
    responses(
        (status = 204, description = "削除成功"),
        (status = 404, description = "ToDo が見つからない", body = ErrorResponse),
        (status = 422, description = "ID が整数でない", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip_all, fields(%id))]
pub async fn delete_todo(
    State(state): State<Arc<TodoState>>,
    ApiPath(id): ApiPath<i64>,
) -> Result<impl IntoResponse, ApiError> {
    state.usecase.delete_todo(TodoId::from_i64(id)).await?;

    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;
    use axum::{
        Router,
        body::Body,
        http::{Method, Request},
        routing::get,
    };
    use pretty_assertions::assert_eq;
    use rstest::rstest;
    use todolist_domain::todo::TodoContents;
    use todolist_infra::{
        InfraError,
        TransactionManager,
        TxContext,
        mock::{MockTodoRepository, MockTransactionManager},
        repository::TodoRepository,
    };
    use tower::ServiceExt;

    use super::*;

    // --- スタブ ---

    /// 常に DB エラーを返すリポジトリ
    struct FailingTodoRepository;

    #[async_trait]
    impl TodoRepository for FailingTodoRepository {
        async fn insert(
            &self,
            _tx: &mut TxContext,
            _contents: &TodoContents,
        ) -> Result<Todo, InfraError> {
            Err(InfraError::unexpected("insert failed"))
        }

        async fn find_by_id(&self, _id: TodoId) -> Result<Option<Todo>, InfraError> {
            Err(InfraError::unexpected("find failed"))
        }

        async fn find_all(&self) -> Result<Vec<Todo>, InfraError> {
            Err(InfraError::unexpected("find failed"))
        }

        async fn update(
            &self,
            _tx: &mut TxContext,
            _id: TodoId,
            _contents: &TodoContents,
        ) -> Result<Option<Todo>, InfraError> {
            Err(InfraError::unexpected("update failed"))
        }

        async fn delete(&self, _tx: &mut TxContext, _id: TodoId) -> Result<bool, InfraError> {
            Err(InfraError::unexpected("delete failed"))
        }
    }

    // --- ヘルパー ---

    fn create_test_app(repo: Arc<dyn TodoRepository>) -> Router {
        let tx_manager: Arc<dyn TransactionManager> = Arc::new(MockTransactionManager);
        let state = Arc::new(TodoState {
            usecase: TodoUseCaseImpl::new(repo, tx_manager),
        });

        Router::new()
            .route("/todo", get(list_todos).post(create_todo))
            .route(
                "/todo/{id}",
                get(get_todo).put(update_todo).delete(delete_todo),
            )
            .with_state(state)
    }

    fn json_request(method: Method, uri: &str, body: serde_json::Value) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn empty_request(method: Method, uri: &str) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .body(Body::empty())
            .unwrap()
    }

    async fn response_body<T: serde::de::DeserializeOwned>(
        response: axum::http::Response<Body>,
    ) -> T {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    // --- テストケース ---

    #[tokio::test]
    async fn test_post_推奨時刻なしで作成すると201が返る() {
        // Given
        let sut = create_test_app(Arc::new(MockTodoRepository::new()));

        // When
        let response = sut
            .oneshot(json_request(
                Method::POST,
                "/todo",
                serde_json::json!({ "task": "buy milk" }),
            ))
            .await
            .unwrap();

        // Then
        assert_eq!(response.status(), StatusCode::CREATED);
        let body: TodoResponse = response_body(response).await;
        assert_eq!(
            body,
            TodoResponse {
                id:             1,
                task:           "buy milk".to_string(),
                suggested_time: None,
            }
        );
    }

    #[tokio::test]
    async fn test_post_推奨時刻はhh_mm_ss形式で返る() {
        let sut = create_test_app(Arc::new(MockTodoRepository::new()));

        let response = sut
            .oneshot(json_request(
                Method::POST,
                "/todo",
                serde_json::json!({ "task": "buy milk", "suggested_time": "08:30:00" }),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::CREATED);
        let body: serde_json::Value = response_body(response).await;
        assert_eq!(body["suggested_time"], "08:30:00");
    }

    #[rstest]
    #[case::taskが欠落(serde_json::json!({ "suggested_time": "08:30:00" }))]
    #[case::taskが文字列でない(serde_json::json!({ "task": 123 }))]
    #[case::時刻の形式が不正(serde_json::json!({ "task": "a", "suggested_time": "25:99" }))]
    #[case::taskが空白のみ(serde_json::json!({ "task": "   " }))]
    #[case::taskが257文字(serde_json::json!({ "task": "a".repeat(257) }))]
    #[tokio::test]
    async fn test_post_不正な入力は422が返る(#[case] body: serde_json::Value) {
        let repo = MockTodoRepository::new();
        let sut = create_test_app(Arc::new(repo.clone()));

        let response = sut
            .oneshot(json_request(Method::POST, "/todo", body))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        let error: ErrorResponse = response_body(response).await;
        assert_eq!(error.status, 422);
        assert!(repo.snapshot().is_empty());
    }

    #[tokio::test]
    async fn test_post_json構文エラーは400が返る() {
        let sut = create_test_app(Arc::new(MockTodoRepository::new()));

        let request = Request::builder()
            .method(Method::POST)
            .uri("/todo")
            .header("content-type", "application/json")
            .body(Body::from("{\"task\": "))
            .unwrap();
        let response = sut.oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_post_content_typeがjsonでなければ415が返る() {
        let sut = create_test_app(Arc::new(MockTodoRepository::new()));

        let request = Request::builder()
            .method(Method::POST)
            .uri("/todo")
            .body(Body::from("{\"task\": \"buy milk\"}"))
            .unwrap();
        let response = sut.oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::UNSUPPORTED_MEDIA_TYPE);
    }

    #[tokio::test]
    async fn test_get_一覧は作成順で返る() {
        // Given
        let repo = MockTodoRepository::new();
        let sut = create_test_app(Arc::new(repo.clone()));
        for task in ["a", "b", "c"] {
            let response = sut
                .clone()
                .oneshot(json_request(
                    Method::POST,
                    "/todo",
                    serde_json::json!({ "task": task }),
                ))
                .await
                .unwrap();
            assert_eq!(response.status(), StatusCode::CREATED);
        }

        // When
        let response = sut.oneshot(empty_request(Method::GET, "/todo")).await.unwrap();

        // Then
        assert_eq!(response.status(), StatusCode::OK);
        let body: Vec<TodoResponse> = response_body(response).await;
        let tasks: Vec<&str> = body.iter().map(|t| t.task.as_str()).collect();
        assert_eq!(tasks, vec!["a", "b", "c"]);
    }

    #[tokio::test]
    async fn test_get_空の一覧は空配列が返る() {
        let sut = create_test_app(Arc::new(MockTodoRepository::new()));

        let response = sut.oneshot(empty_request(Method::GET, "/todo")).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body: Vec<TodoResponse> = response_body(response).await;
        assert!(body.is_empty());
    }

    #[tokio::test]
    async fn test_get_存在しないidは404でidを含むdetailが返る() {
        let sut = create_test_app(Arc::new(MockTodoRepository::new()));

        let response = sut
            .oneshot(empty_request(Method::GET, "/todo/999999"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let error: ErrorResponse = response_body(response).await;
        assert_eq!(error.detail, "ToDo が見つかりません: 999999");
    }

    #[tokio::test]
    async fn test_get_整数でないidは422が返る() {
        let sut = create_test_app(Arc::new(MockTodoRepository::new()));

        let response = sut
            .oneshot(empty_request(Method::GET, "/todo/abc"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn test_put_存在しないidは404が返る() {
        let sut = create_test_app(Arc::new(MockTodoRepository::new()));

        let response = sut
            .oneshot(json_request(
                Method::PUT,
                "/todo/999999",
                serde_json::json!({ "task": "x" }),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_put_content_typeがjsonでなければ415が返る() {
        let sut = create_test_app(Arc::new(MockTodoRepository::new()));

        let request = Request::builder()
            .method(Method::PUT)
            .uri("/todo/1")
            .body(Body::from("{\"task\": \"buy milk\"}"))
            .unwrap();
        let response = sut.oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::UNSUPPORTED_MEDIA_TYPE);
    }

    #[tokio::test]
    async fn test_delete_成功すると204で空ボディが返る() {
        let repo = MockTodoRepository::new();
        let sut = create_test_app(Arc::new(repo.clone()));
        let response = sut
            .clone()
            .oneshot(json_request(
                Method::POST,
                "/todo",
                serde_json::json!({ "task": "a" }),
            ))
            .await
            .unwrap();
        let created: TodoResponse = response_body(response).await;

        let response = sut
            .oneshot(empty_request(
                Method::DELETE,
                &format!("/todo/{}", created.id),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NO_CONTENT);
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        assert!(bytes.is_empty());
        assert!(repo.snapshot().is_empty());
    }

    #[tokio::test]
    async fn test_db障害時は500で固定detailが返る() {
        let sut = create_test_app(Arc::new(FailingTodoRepository));

        let response = sut.oneshot(empty_request(Method::GET, "/todo")).await.unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let error: ErrorResponse = response_body(response).await;
        assert_eq!(error.detail, "内部エラーが発生しました");
    }
}
