//! # Todolist インフラ層
//!
//! データベースとの接続・通信を担当するインフラストラクチャ層。
//!
//! ## 設計方針
//!
//! リポジトリトレイトとその SQLite 実装を提供し、ストレージの詳細を
//! ユースケース層から隠蔽する。ユースケース層はトレイト経由でのみ
//! データにアクセスする。
//!
//! ## 責務
//!
//! - **データベース接続**: SQLite 接続プールの作成とスキーマ初期化
//! - **データアクセスセッション**: 書き込み用トランザクション（[`TxContext`]）
//! - **リポジトリ実装**: [`repository::TodoRepository`] の SQLite 実装
//!
//! ## 依存関係
//!
//! ```text
//! service → infra → domain
//! ```
//!
//! ## 使用例
//!
//! ```rust,ignore
//! use todolist_infra::{db, repository::SqliteTodoRepository};
//!
//! async fn setup() -> Result<(), Box<dyn std::error::Error>> {
//!     let pool = db::create_pool("sqlite://todoo.db", 5).await?;
//!     db::init_schema(&pool).await?;
//!     let repository = SqliteTodoRepository::new(pool);
//!     Ok(())
//! }
//! ```

pub mod db;
pub mod error;
#[cfg(any(test, feature = "test-utils"))]
pub mod mock;
pub mod repository;

pub use db::{SqliteTransactionManager, TransactionManager, TxContext};
pub use error::{InfraError, InfraErrorKind};
