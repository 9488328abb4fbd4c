//! テスト共通フィクスチャ
//!
//! インメモリ SQLite を使用する統合テストで共通利用するヘルパー。
//! Rust の統合テスト規約に従い `tests/common/mod.rs` に配置。

// 各テストファイルが独立したクレートとしてコンパイルされるため、
// 使用しない関数に dead_code 警告が出る。モジュール全体で抑制する。
#![allow(dead_code)]

use chrono::NaiveTime;
use sqlx::SqlitePool;
use todolist_domain::todo::{SuggestedTime, TodoContents, TodoTask};
use todolist_infra::{SqliteTransactionManager, TransactionManager, db};

/// スキーマ初期化済みのインメモリプールを作成
pub async fn setup_pool() -> SqlitePool {
    db::create_in_memory_pool()
        .await
        .expect("インメモリプールの作成に失敗")
}

/// プールに紐づく TransactionManager を作成
pub fn tx_manager(pool: &SqlitePool) -> impl TransactionManager {
    SqliteTransactionManager::new(pool.clone())
}

/// 時:分:秒 から推奨時刻を作成
pub fn time(h: u32, m: u32, s: u32) -> SuggestedTime {
    SuggestedTime::new(NaiveTime::from_hms_opt(h, m, s).unwrap())
}

/// タスク本文と推奨時刻から内容を作成
pub fn contents(task: &str, suggested_time: Option<SuggestedTime>) -> TodoContents {
    TodoContents::new(TodoTask::new(task).unwrap(), suggested_time)
}
