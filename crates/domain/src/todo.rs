//! # ToDo
//!
//! ToDo リストの項目を表現するドメインモデル。
//!
//! ## 構成
//!
//! | 型 | 種別 | 説明 |
//! |----|------|------|
//! | [`TodoId`] | 値オブジェクト | ストレージが採番する整数 ID |
//! | [`TodoTask`] | 値オブジェクト | タスク本文（1〜256 文字） |
//! | [`SuggestedTime`] | 値オブジェクト | 推奨時刻（時:分:秒、日付なし） |
//! | [`TodoContents`] | 値 | 永続化前の内容（ID を持たない） |
//! | [`Todo`] | エンティティ | 永続化済みの ToDo |
//!
//! ID は永続化時にストレージ層が採番するため、[`TodoContents`] は ID を持たない。
//! 更新時も ID は変わらず、内容（タスク本文と推奨時刻）のみが置き換わる。
//!
//! ## 使用例
//!
//! ```rust
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use chrono::NaiveTime;
//! use todolist_domain::todo::{SuggestedTime, Todo, TodoContents, TodoId, TodoTask};
//!
//! let time = SuggestedTime::new(NaiveTime::from_hms_opt(8, 30, 0).unwrap());
//! let contents = TodoContents::new(TodoTask::new("buy milk")?, Some(time));
//! let todo = Todo::new(TodoId::from_i64(1), contents);
//!
//! assert_eq!(todo.id().as_i64(), 1);
//! assert_eq!(todo.suggested_time().unwrap().to_string(), "08:30:00");
//! # Ok(())
//! # }
//! ```

use chrono::{NaiveTime, Timelike};
use serde::{Deserialize, Serialize};

use crate::DomainError;

// =========================================================================
// TodoId
// =========================================================================

/// ToDo の一意識別子
///
/// ストレージ層が挿入時に採番する。一度採番された ID は変更されない。
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
    derive_more::Display,
)]
#[display("{_0}")]
pub struct TodoId(i64);

impl TodoId {
    /// 既存の整数値から ID を作成する
    pub fn from_i64(value: i64) -> Self {
        Self(value)
    }

    /// 内部の i64 値を取得する
    pub fn as_i64(&self) -> i64 {
        self.0
    }
}

// =========================================================================
// TodoTask（タスク本文）
// =========================================================================

/// タスク本文の最大文字数（DB: `VARCHAR(256)`）
pub const MAX_TASK_LENGTH: usize = 256;

/// タスク本文（値オブジェクト）
///
/// # 不変条件
///
/// - 空白のみではない
/// - 最大 256 文字（`chars().count()` でカウント）
///
/// 値は入力のまま保持する（前後の空白も除去しない）。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TodoTask(String);

impl TodoTask {
    pub fn new(value: impl Into<String>) -> Result<Self, DomainError> {
        let value = value.into();

        if value.trim().is_empty() {
            return Err(DomainError::Validation("タスクは必須です".to_string()));
        }

        if value.chars().count() > MAX_TASK_LENGTH {
            return Err(DomainError::Validation(format!(
                "タスクは {MAX_TASK_LENGTH} 文字以内である必要があります"
            )));
        }

        Ok(Self(value))
    }

    /// 文字列参照を取得する
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for TodoTask {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

// =========================================================================
// SuggestedTime（推奨時刻）
// =========================================================================

/// 推奨時刻（値オブジェクト）
///
/// 日付を持たない時刻。秒未満は切り捨てて保持する。
/// 表示形式は常に `HH:MM:SS`。
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SuggestedTime(NaiveTime);

impl SuggestedTime {
    pub fn new(time: NaiveTime) -> Self {
        Self(time.with_nanosecond(0).unwrap_or(time))
    }

    /// 内部の `NaiveTime` を取得する
    pub fn as_naive_time(&self) -> NaiveTime {
        self.0
    }
}

impl std::fmt::Display for SuggestedTime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.format("%H:%M:%S"))
    }
}

// =========================================================================
// TodoContents（永続化前の内容）
// =========================================================================

/// ToDo の内容
///
/// 作成・更新の入力として使う。ID はストレージ層が決めるためここには含めない。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TodoContents {
    task:           TodoTask,
    suggested_time: Option<SuggestedTime>,
}

impl TodoContents {
    pub fn new(task: TodoTask, suggested_time: Option<SuggestedTime>) -> Self {
        Self {
            task,
            suggested_time,
        }
    }

    pub fn task(&self) -> &TodoTask {
        &self.task
    }

    pub fn suggested_time(&self) -> Option<SuggestedTime> {
        self.suggested_time
    }
}

// =========================================================================
// Todo（ToDo エンティティ）
// =========================================================================

/// ToDo エンティティ
///
/// 永続化済みの ToDo。必ず ID を持つ。
///
/// # 不変条件
///
/// - `id` は生存中の全レコードで一意
/// - `task` は空ではない
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Todo {
    id:       TodoId,
    contents: TodoContents,
}

impl Todo {
    /// 採番済みの ID と内容から ToDo を組み立てる
    pub fn new(id: TodoId, contents: TodoContents) -> Self {
        Self { id, contents }
    }

    /// 内容を置き換えた ToDo を返す（ID は変わらない）
    pub fn with_contents(self, contents: TodoContents) -> Self {
        Self {
            id: self.id,
            contents,
        }
    }

    pub fn id(&self) -> TodoId {
        self.id
    }

    pub fn task(&self) -> &TodoTask {
        self.contents.task()
    }

    pub fn suggested_time(&self) -> Option<SuggestedTime> {
        self.contents.suggested_time()
    }

    pub fn contents(&self) -> &TodoContents {
        &self.contents
    }
}
