//! # TodoRepository
//!
//! ToDo の永続化を担当するリポジトリ。
//!
//! ## 設計方針
//!
//! - **ID はストレージが採番**: `INTEGER PRIMARY KEY AUTOINCREMENT` で単調増加し、再利用しない
//! - **存在しない ID は `None` / `false`**: Not Found の判定はユースケース層が行う
//! - **並行更新は後勝ち**: バージョン管理は行わない

use async_trait::async_trait;
use chrono::NaiveTime;
use sqlx::SqlitePool;
use todolist_domain::todo::{SuggestedTime, Todo, TodoContents, TodoId, TodoTask};

use crate::{db::TxContext, error::InfraError};

/// ToDo リポジトリトレイト
#[async_trait]
pub trait TodoRepository: Send + Sync {
    /// ToDo を挿入し、採番された ID 付きの ToDo を返す
    async fn insert(&self, tx: &mut TxContext, contents: &TodoContents)
    -> Result<Todo, InfraError>;

    /// ID で ToDo を検索する
    async fn find_by_id(&self, id: TodoId) -> Result<Option<Todo>, InfraError>;

    /// 全 ToDo を ID 昇順で取得する
    async fn find_all(&self) -> Result<Vec<Todo>, InfraError>;

    /// ToDo の内容を置き換える
    ///
    /// 対象が存在しない場合は `None` を返す。
    async fn update(
        &self,
        tx: &mut TxContext,
        id: TodoId,
        contents: &TodoContents,
    ) -> Result<Option<Todo>, InfraError>;

    /// ToDo を削除する
    ///
    /// 削除した場合は `true`、対象が存在しない場合は `false` を返す。
    async fn delete(&self, tx: &mut TxContext, id: TodoId) -> Result<bool, InfraError>;
}

/// `todos` テーブルの 1 行
#[derive(Debug, sqlx::FromRow)]
struct TodoRow {
    id:             i64,
    task:           String,
    suggested_time: Option<NaiveTime>,
}

impl TryFrom<TodoRow> for Todo {
    type Error = InfraError;

    fn try_from(row: TodoRow) -> Result<Self, Self::Error> {
        let task = TodoTask::new(row.task).map_err(|e| {
            InfraError::unexpected(format!("不正なタスクが格納されています (id={}): {e}", row.id))
        })?;

        Ok(Todo::new(
            TodoId::from_i64(row.id),
            TodoContents::new(task, row.suggested_time.map(SuggestedTime::new)),
        ))
    }
}

/// SQLite 実装の TodoRepository
#[derive(Debug, Clone)]
pub struct SqliteTodoRepository {
    pool: SqlitePool,
}

impl SqliteTodoRepository {
    /// 新しいリポジトリインスタンスを作成
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TodoRepository for SqliteTodoRepository {
    #[tracing::instrument(skip_all, level = "debug")]
    async fn insert(
        &self,
        tx: &mut TxContext,
        contents: &TodoContents,
    ) -> Result<Todo, InfraError> {
        let result = sqlx::query(
            r#"
            INSERT INTO todos (task, suggested_time)
            VALUES (?, ?)
            "#,
        )
        .bind(contents.task().as_str())
        .bind(contents.suggested_time().map(|t| t.as_naive_time()))
        .execute(tx.conn())
        .await?;

        let id = TodoId::from_i64(result.last_insert_rowid());
        tracing::debug!(%id, "ToDo を挿入しました");

        Ok(Todo::new(id, contents.clone()))
    }

    #[tracing::instrument(skip_all, level = "debug", fields(%id))]
    async fn find_by_id(&self, id: TodoId) -> Result<Option<Todo>, InfraError> {
        let row = sqlx::query_as::<_, TodoRow>(
            r#"
            SELECT id, task, suggested_time
            FROM todos
            WHERE id = ?
            "#,
        )
        .bind(id.as_i64())
        .fetch_optional(&self.pool)
        .await?;

        row.map(Todo::try_from).transpose()
    }

    #[tracing::instrument(skip_all, level = "debug")]
    async fn find_all(&self) -> Result<Vec<Todo>, InfraError> {
        let rows = sqlx::query_as::<_, TodoRow>(
            r#"
            SELECT id, task, suggested_time
            FROM todos
            ORDER BY id ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(Todo::try_from).collect()
    }

    #[tracing::instrument(skip_all, level = "debug", fields(%id))]
    async fn update(
        &self,
        tx: &mut TxContext,
        id: TodoId,
        contents: &TodoContents,
    ) -> Result<Option<Todo>, InfraError> {
        let result = sqlx::query(
            r#"
            UPDATE todos
            SET task = ?, suggested_time = ?
            WHERE id = ?
            "#,
        )
        .bind(contents.task().as_str())
        .bind(contents.suggested_time().map(|t| t.as_naive_time()))
        .bind(id.as_i64())
        .execute(tx.conn())
        .await?;

        if result.rows_affected() == 0 {
            return Ok(None);
        }

        Ok(Some(Todo::new(id, contents.clone())))
    }

    #[tracing::instrument(skip_all, level = "debug", fields(%id))]
    async fn delete(&self, tx: &mut TxContext, id: TodoId) -> Result<bool, InfraError> {
        let result = sqlx::query(
            r#"
            DELETE FROM todos
            WHERE id = ?
            "#,
        )
        .bind(id.as_i64())
        .execute(tx.conn())
        .await?;

        Ok(result.rows_affected() > 0)
    }
}
