//! ToDo 管理ユースケース

use std::sync::Arc;

use chrono::NaiveTime;
use todolist_domain::{
    DomainError,
    todo::{SuggestedTime, Todo, TodoContents, TodoId, TodoTask},
};
use todolist_infra::{TransactionManager, repository::TodoRepository};

use crate::error::ApiError;

/// ToDo 作成の入力
pub struct CreateTodoInput {
    pub task:           String,
    pub suggested_time: Option<NaiveTime>,
}

/// ToDo 更新の入力
///
/// タスク本文と推奨時刻は丸ごと置き換える（`suggested_time: None` なら推奨時刻を消す）。
pub struct UpdateTodoInput {
    pub id:             TodoId,
    pub task:           String,
    pub suggested_time: Option<NaiveTime>,
}

/// ToDo 管理ユースケース
pub struct TodoUseCaseImpl {
    todo_repository: Arc<dyn TodoRepository>,
    tx_manager:      Arc<dyn TransactionManager>,
}

impl TodoUseCaseImpl {
    pub fn new(
        todo_repository: Arc<dyn TodoRepository>,
        tx_manager: Arc<dyn TransactionManager>,
    ) -> Self {
        Self {
            todo_repository,
            tx_manager,
        }
    }

    /// ToDo 一覧を取得する（作成順）
    pub async fn list_todos(&self) -> Result<Vec<Todo>, ApiError> {
        Ok(self.todo_repository.find_all().await?)
    }

    /// ToDo を 1 件取得する
    pub async fn get_todo(&self, id: TodoId) -> Result<Todo, ApiError> {
        self.todo_repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| not_found(id).into())
    }

    /// ToDo を作成する
    ///
    /// 1. タスク本文のバリデーション
    /// 2. 挿入してコミット
    pub async fn create_todo(&self, input: CreateTodoInput) -> Result<Todo, ApiError> {
        let contents = build_contents(input.task, input.suggested_time)?;

        let mut tx = self.tx_manager.begin().await?;
        let todo = self.todo_repository.insert(&mut tx, &contents).await?;
        tx.commit().await?;

        tracing::info!(todo_id = %todo.id(), "ToDo を作成しました");
        Ok(todo)
    }

    /// ToDo を更新する
    ///
    /// 対象が存在しない場合はコミットせずに Not Found を返す。
    pub async fn update_todo(&self, input: UpdateTodoInput) -> Result<Todo, ApiError> {
        let contents = build_contents(input.task, input.suggested_time)?;

        let mut tx = self.tx_manager.begin().await?;
        let Some(todo) = self
            .todo_repository
            .update(&mut tx, input.id, &contents)
            .await?
        else {
            return Err(not_found(input.id).into());
        };
        tx.commit().await?;

        tracing::info!(todo_id = %todo.id(), "ToDo を更新しました");
        Ok(todo)
    }

    /// ToDo を削除する
    ///
    /// 対象が存在しない場合はコミットせずに Not Found を返す。
    pub async fn delete_todo(&self, id: TodoId) -> Result<(), ApiError> {
        let mut tx = self.tx_manager.begin().await?;
        if !self.todo_repository.delete(&mut tx, id).await? {
            return Err(not_found(id).into());
        }
        tx.commit().await?;

        tracing::info!(todo_id = %id, "ToDo を削除しました");
        Ok(())
    }
}

fn build_contents(
    task: String,
    suggested_time: Option<NaiveTime>,
) -> Result<TodoContents, DomainError> {
    Ok(TodoContents::new(
        TodoTask::new(task)?,
        suggested_time.map(SuggestedTime::new),
    ))
}

fn not_found(id: TodoId) -> DomainError {
    DomainError::NotFound {
        entity_type: "ToDo",
        id:          id.to_string(),
    }
}
